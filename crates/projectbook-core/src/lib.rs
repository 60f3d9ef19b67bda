//! projectbook core - authenticated API client for the projectbook backend.
//!
//! The client attaches the stored bearer token to every request and, when
//! the server answers 401, clears the token, notifies the user and routes
//! to the login page before handing the error back to the caller.

pub mod api;
pub mod config;
pub mod models;
pub mod notify;
pub mod router;
pub mod storage;

pub use api::{ApiClient, ApiClientBuilder, ApiError};
pub use config::{ClientConfig, DEFAULT_BASE_URL};
pub use notify::{Notifier, TracingNotifier, SESSION_EXPIRED_MESSAGE};
pub use router::{HistoryRouter, Navigator, LOGIN_ROUTE};
pub use storage::{FileStore, KeyringStore, MemoryStore, StoreError, TokenStore, TOKEN_KEY};
