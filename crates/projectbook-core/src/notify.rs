//! User-facing notifications raised by the API layer.

use tracing::warn;

/// Message shown when the server rejects the stored token
pub const SESSION_EXPIRED_MESSAGE: &str = "登录已过期，请重新登录";

pub trait Notifier: Send + Sync {
    /// Surface an error message to the user
    fn error(&self, message: &str);
}

/// Notifier that only writes to the log. Used when no front-end is attached.
#[derive(Debug, Default, Clone, Copy)]
pub struct TracingNotifier;

impl Notifier for TracingNotifier {
    fn error(&self, message: &str) {
        warn!(message = message, "User notification");
    }
}
