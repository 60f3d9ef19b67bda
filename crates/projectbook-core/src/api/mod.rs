//! REST API client module for the projectbook backend.
//!
//! This module provides the `ApiClient` for issuing requests against the
//! backend, the interceptors that attach the bearer token and react to
//! expired sessions, and typed login/project endpoints.

pub mod client;
pub mod error;
pub mod interceptor;
pub mod projects;

pub use client::{ApiClient, ApiClientBuilder};
pub use error::ApiError;
pub use interceptor::{
    AuthInterceptor, RequestInterceptor, ResponseInterceptor, SessionExpiryInterceptor,
};
