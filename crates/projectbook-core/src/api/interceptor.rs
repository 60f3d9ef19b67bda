//! Request and response interceptors.
//!
//! Outbound interceptors see every request before it is sent; inbound
//! interceptors see every outcome, successful or not, before it reaches
//! the caller. Both run synchronously inside the request future.

use std::sync::Arc;

use reqwest::header::{self, HeaderValue};
use reqwest::{Request, Response};
use tracing::{debug, info, warn};

use crate::notify::{Notifier, SESSION_EXPIRED_MESSAGE};
use crate::router::{Navigator, LOGIN_ROUTE};
use crate::storage::{TokenStore, TOKEN_KEY};

use super::ApiError;

pub trait RequestInterceptor: Send + Sync {
    fn on_request(&self, request: Request) -> Result<Request, ApiError>;
}

pub trait ResponseInterceptor: Send + Sync {
    /// Inspect an outcome. Implementations must hand back the error they
    /// were given unless they deliberately recover from it.
    fn on_response(&self, outcome: Result<Response, ApiError>) -> Result<Response, ApiError>;
}

/// Attaches `Authorization: Bearer <token>` when a token is stored.
pub struct AuthInterceptor {
    store: Arc<dyn TokenStore>,
}

impl AuthInterceptor {
    pub fn new(store: Arc<dyn TokenStore>) -> Self {
        Self { store }
    }

    fn stored_token(&self) -> Option<String> {
        match self.store.get(TOKEN_KEY) {
            Ok(token) => token.filter(|t| !t.is_empty()),
            Err(e) => {
                warn!(error = %e, "Failed to read token, sending request without credentials");
                None
            }
        }
    }
}

impl RequestInterceptor for AuthInterceptor {
    fn on_request(&self, mut request: Request) -> Result<Request, ApiError> {
        if let Some(token) = self.stored_token() {
            let value = HeaderValue::from_str(&format!("Bearer {}", token))
                .map_err(|e| ApiError::Configuration(format!("Invalid token header: {}", e)))?;
            request.headers_mut().insert(header::AUTHORIZATION, value);
        }
        Ok(request)
    }
}

/// Clears the stored token and sends the user to the login route when the
/// server answers 401. The error is always passed on to the caller.
pub struct SessionExpiryInterceptor {
    store: Arc<dyn TokenStore>,
    notifier: Arc<dyn Notifier>,
    navigator: Arc<dyn Navigator>,
}

impl SessionExpiryInterceptor {
    pub fn new(
        store: Arc<dyn TokenStore>,
        notifier: Arc<dyn Notifier>,
        navigator: Arc<dyn Navigator>,
    ) -> Self {
        Self {
            store,
            notifier,
            navigator,
        }
    }

    fn expire_session(&self) {
        if let Err(e) = self.store.remove(TOKEN_KEY) {
            warn!(error = %e, "Failed to remove expired token");
        }
        self.notifier.error(SESSION_EXPIRED_MESSAGE);
        self.navigator.push(LOGIN_ROUTE);
    }
}

impl ResponseInterceptor for SessionExpiryInterceptor {
    fn on_response(&self, outcome: Result<Response, ApiError>) -> Result<Response, ApiError> {
        match outcome {
            Ok(response) => Ok(response),
            Err(e) if e.is_unauthorized() => {
                info!("Session expired, redirecting to login");
                self.expire_session();
                Err(e)
            }
            Err(e) => {
                debug!(error = %e, "Passing through request error");
                Err(e)
            }
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::router::HistoryRouter;
    use crate::storage::{MemoryStore, StoreError};
    use reqwest::StatusCode;
    use std::sync::Mutex;

    #[derive(Default)]
    struct RecordingNotifier {
        messages: Mutex<Vec<String>>,
    }

    impl Notifier for RecordingNotifier {
        fn error(&self, message: &str) {
            self.messages.lock().unwrap().push(message.to_string());
        }
    }

    fn request() -> Request {
        reqwest::Client::new()
            .get("http://localhost:8000/api/projects/")
            .build()
            .unwrap()
    }

    fn expiry(
        store: &Arc<MemoryStore>,
    ) -> (SessionExpiryInterceptor, Arc<RecordingNotifier>, Arc<HistoryRouter>) {
        let notifier = Arc::new(RecordingNotifier::default());
        let router = Arc::new(HistoryRouter::new());
        let interceptor =
            SessionExpiryInterceptor::new(store.clone(), notifier.clone(), router.clone());
        (interceptor, notifier, router)
    }

    #[test]
    fn test_auth_header_attached_when_token_present() {
        let store = Arc::new(MemoryStore::with_entry(TOKEN_KEY, "abc123"));
        let request = AuthInterceptor::new(store).on_request(request()).unwrap();

        assert_eq!(
            request.headers().get(header::AUTHORIZATION).unwrap(),
            "Bearer abc123"
        );
        assert_eq!(request.url().path(), "/api/projects/");
    }

    #[test]
    fn test_no_auth_header_without_token() {
        let store = Arc::new(MemoryStore::new());
        let request = AuthInterceptor::new(store).on_request(request()).unwrap();
        assert!(request.headers().get(header::AUTHORIZATION).is_none());
    }

    #[test]
    fn test_unauthorized_clears_session_and_propagates() {
        let store = Arc::new(MemoryStore::with_entry(TOKEN_KEY, "abc123"));
        let (interceptor, notifier, router) = expiry(&store);

        let result = interceptor.on_response(Err(ApiError::from_status(
            StatusCode::UNAUTHORIZED,
            "Could not validate credentials",
        )));

        assert!(matches!(
            result,
            Err(ApiError::Unauthorized(ref b)) if b == "Could not validate credentials"
        ));
        assert!(!store.contains(TOKEN_KEY));
        assert_eq!(*notifier.messages.lock().unwrap(), vec![SESSION_EXPIRED_MESSAGE]);
        assert_eq!(router.history(), vec![LOGIN_ROUTE]);
    }

    #[test]
    fn test_other_errors_have_no_side_effects() {
        let store = Arc::new(MemoryStore::with_entry(TOKEN_KEY, "abc123"));
        let (interceptor, notifier, router) = expiry(&store);

        for status in [
            StatusCode::NOT_FOUND,
            StatusCode::INTERNAL_SERVER_ERROR,
            StatusCode::FORBIDDEN,
        ] {
            let result = interceptor.on_response(Err(ApiError::from_status(status, "")));
            assert_eq!(result.unwrap_err().status(), Some(status.as_u16()));
        }
        let result = interceptor.on_response(Err(ApiError::InvalidResponse("garbled".into())));
        assert!(matches!(result, Err(ApiError::InvalidResponse(_))));

        assert_eq!(store.get(TOKEN_KEY).unwrap().as_deref(), Some("abc123"));
        assert!(notifier.messages.lock().unwrap().is_empty());
        assert!(router.history().is_empty());
    }

    struct BrokenStore;

    impl TokenStore for BrokenStore {
        fn get(&self, _key: &str) -> Result<Option<String>, StoreError> {
            Ok(Some("abc123".to_string()))
        }

        fn set(&self, _key: &str, _value: &str) -> Result<(), StoreError> {
            Err(StoreError::Poisoned)
        }

        fn remove(&self, _key: &str) -> Result<(), StoreError> {
            Err(StoreError::Io(std::io::Error::new(
                std::io::ErrorKind::PermissionDenied,
                "read-only cache dir",
            )))
        }
    }

    #[test]
    fn test_unauthorized_still_redirects_when_removal_fails() {
        let notifier = Arc::new(RecordingNotifier::default());
        let router = Arc::new(HistoryRouter::new());
        let interceptor =
            SessionExpiryInterceptor::new(Arc::new(BrokenStore), notifier.clone(), router.clone());

        let result =
            interceptor.on_response(Err(ApiError::from_status(StatusCode::UNAUTHORIZED, "")));

        assert!(matches!(result, Err(ApiError::Unauthorized(_))));
        assert_eq!(*notifier.messages.lock().unwrap(), vec![SESSION_EXPIRED_MESSAGE]);
        assert_eq!(router.history(), vec![LOGIN_ROUTE]);
    }

    #[test]
    fn test_repeated_unauthorized_is_idempotent() {
        let store = Arc::new(MemoryStore::with_entry(TOKEN_KEY, "abc123"));
        let (interceptor, notifier, router) = expiry(&store);

        for _ in 0..2 {
            let result =
                interceptor.on_response(Err(ApiError::from_status(StatusCode::UNAUTHORIZED, "")));
            assert!(result.unwrap_err().is_unauthorized());
        }

        assert_eq!(store.get(TOKEN_KEY).unwrap(), None);
        // One notification and one redirect per 401
        assert_eq!(notifier.messages.lock().unwrap().len(), 2);
        assert_eq!(router.history(), vec![LOGIN_ROUTE, LOGIN_ROUTE]);
    }
}
