//! Terminal implementations of the front-end collaborators.

use projectbook_core::Notifier;

/// Prints notifications to stderr.
pub struct TerminalNotifier;

impl Notifier for TerminalNotifier {
    fn error(&self, message: &str) {
        eprintln!("✗ {}", message);
    }
}
