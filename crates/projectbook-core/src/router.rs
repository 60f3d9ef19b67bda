//! Client-side navigation.

use std::sync::Mutex;

use tracing::debug;

/// Route the user is sent to when the session is no longer valid
pub const LOGIN_ROUTE: &str = "/login";

pub trait Navigator: Send + Sync {
    fn push(&self, path: &str);
}

/// Navigator that records every pushed route.
///
/// Front-ends read `current()` after a request to decide what to show next.
#[derive(Debug, Default)]
pub struct HistoryRouter {
    history: Mutex<Vec<String>>,
}

impl HistoryRouter {
    pub fn new() -> Self {
        Self::default()
    }

    /// Most recently pushed route, if any
    pub fn current(&self) -> Option<String> {
        self.history
            .lock()
            .ok()
            .and_then(|history| history.last().cloned())
    }

    pub fn history(&self) -> Vec<String> {
        self.history
            .lock()
            .map(|history| history.clone())
            .unwrap_or_default()
    }
}

impl Navigator for HistoryRouter {
    fn push(&self, path: &str) {
        debug!(path = path, "Navigating");
        if let Ok(mut history) = self.history.lock() {
            history.push(path.to_string());
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_history_router_tracks_pushes() {
        let router = HistoryRouter::new();
        assert_eq!(router.current(), None);

        router.push("/projects");
        router.push(LOGIN_ROUTE);

        assert_eq!(router.current().as_deref(), Some(LOGIN_ROUTE));
        assert_eq!(router.history(), vec!["/projects", LOGIN_ROUTE]);
    }
}
