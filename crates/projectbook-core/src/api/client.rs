//! API client for the projectbook backend.
//!
//! `ApiClient` owns the shared HTTP configuration: the base URL every
//! relative path is resolved against, plus the ordered interceptor chains
//! that run around each request.

use std::sync::Arc;

use reqwest::{Client, Method, RequestBuilder, Response};
use serde::{de::DeserializeOwned, Serialize};
use tracing::debug;

use crate::config::ClientConfig;
use crate::notify::{Notifier, TracingNotifier};
use crate::router::{HistoryRouter, Navigator};
use crate::storage::{MemoryStore, TokenStore};

use super::interceptor::{
    AuthInterceptor, RequestInterceptor, ResponseInterceptor, SessionExpiryInterceptor,
};
use super::ApiError;

/// API client for the projectbook backend.
/// Clone is cheap - reqwest::Client and the interceptor chains are reference counted.
#[derive(Clone)]
pub struct ApiClient {
    client: Client,
    base_url: String,
    store: Arc<dyn TokenStore>,
    request_interceptors: Arc<[Arc<dyn RequestInterceptor>]>,
    response_interceptors: Arc<[Arc<dyn ResponseInterceptor>]>,
}

impl ApiClient {
    /// Create a client with the default configuration and in-memory storage
    pub fn new() -> Result<Self, ApiError> {
        Self::builder().build()
    }

    pub fn builder() -> ApiClientBuilder {
        ApiClientBuilder::default()
    }

    pub fn base_url(&self) -> &str {
        &self.base_url
    }

    /// Token storage shared with the interceptors
    pub fn store(&self) -> &Arc<dyn TokenStore> {
        &self.store
    }

    /// Resolve a path against the base URL. Absolute URLs pass through.
    pub fn url(&self, path: &str) -> String {
        if path.starts_with("http://") || path.starts_with("https://") {
            path.to_string()
        } else {
            format!("{}/{}", self.base_url, path.trim_start_matches('/'))
        }
    }

    /// Start a request against `path`. Send it with [`ApiClient::send`] so
    /// the interceptors run.
    pub fn request(&self, method: Method, path: &str) -> RequestBuilder {
        self.client.request(method, self.url(path))
    }

    /// Send a request through both interceptor chains.
    ///
    /// Non-2xx responses are turned into errors before the inbound chain
    /// runs, so inbound interceptors see them as `Err`.
    pub async fn send(&self, builder: RequestBuilder) -> Result<Response, ApiError> {
        let outcome = match self.prepare(builder) {
            Ok(request) => self.dispatch(request).await,
            Err(e) => Err(e),
        };

        self.response_interceptors
            .iter()
            .fold(outcome, |outcome, interceptor| interceptor.on_response(outcome))
    }

    fn prepare(&self, builder: RequestBuilder) -> Result<reqwest::Request, ApiError> {
        let request = builder.build()?;
        self.request_interceptors
            .iter()
            .try_fold(request, |request, interceptor| interceptor.on_request(request))
    }

    async fn dispatch(&self, request: reqwest::Request) -> Result<Response, ApiError> {
        let method = request.method().clone();
        let url = request.url().to_string();

        let response = self.client.execute(request).await?;
        debug!(method = %method, url = %url, status = %response.status(), "Response received");

        Self::check_response(response).await
    }

    /// Check if response is successful, returning an error with body if not.
    async fn check_response(response: Response) -> Result<Response, ApiError> {
        if response.status().is_success() {
            Ok(response)
        } else {
            let status = response.status();
            let body = response.text().await.unwrap_or_default();
            Err(ApiError::from_status(status, &body))
        }
    }

    async fn parse_json<T: DeserializeOwned>(response: Response) -> Result<T, ApiError> {
        let url = response.url().to_string();
        let text = response.text().await?;
        serde_json::from_str(&text).map_err(|e| {
            ApiError::InvalidResponse(format!("Failed to parse JSON response from {}: {}", url, e))
        })
    }

    pub async fn get<T: DeserializeOwned>(&self, path: &str) -> Result<T, ApiError> {
        let response = self.send(self.request(Method::GET, path)).await?;
        Self::parse_json(response).await
    }

    pub async fn post<T: DeserializeOwned, B: Serialize + ?Sized>(
        &self,
        path: &str,
        body: &B,
    ) -> Result<T, ApiError> {
        let response = self.send(self.request(Method::POST, path).json(body)).await?;
        Self::parse_json(response).await
    }

    pub async fn post_form<T: DeserializeOwned, B: Serialize + ?Sized>(
        &self,
        path: &str,
        form: &B,
    ) -> Result<T, ApiError> {
        let response = self.send(self.request(Method::POST, path).form(form)).await?;
        Self::parse_json(response).await
    }

    pub async fn put<T: DeserializeOwned, B: Serialize + ?Sized>(
        &self,
        path: &str,
        body: &B,
    ) -> Result<T, ApiError> {
        let response = self.send(self.request(Method::PUT, path).json(body)).await?;
        Self::parse_json(response).await
    }

    pub async fn delete<T: DeserializeOwned>(&self, path: &str) -> Result<T, ApiError> {
        let response = self.send(self.request(Method::DELETE, path)).await?;
        Self::parse_json(response).await
    }
}

/// Builder for ApiClient.
///
/// Collaborators that are not supplied fall back to an in-memory store, a
/// log-only notifier and a history-recording router.
#[derive(Default)]
pub struct ApiClientBuilder {
    config: Option<ClientConfig>,
    store: Option<Arc<dyn TokenStore>>,
    notifier: Option<Arc<dyn Notifier>>,
    navigator: Option<Arc<dyn Navigator>>,
    request_interceptors: Vec<Arc<dyn RequestInterceptor>>,
    response_interceptors: Vec<Arc<dyn ResponseInterceptor>>,
}

impl ApiClientBuilder {
    pub fn config(mut self, config: ClientConfig) -> Self {
        self.config = Some(config);
        self
    }

    /// Shorthand for a default config with the given base URL
    pub fn base_url(mut self, url: impl Into<String>) -> Self {
        let mut config = self.config.take().unwrap_or_default();
        config.base_url = url.into();
        self.config = Some(config);
        self
    }

    pub fn store(mut self, store: Arc<dyn TokenStore>) -> Self {
        self.store = Some(store);
        self
    }

    pub fn notifier(mut self, notifier: Arc<dyn Notifier>) -> Self {
        self.notifier = Some(notifier);
        self
    }

    pub fn navigator(mut self, navigator: Arc<dyn Navigator>) -> Self {
        self.navigator = Some(navigator);
        self
    }

    /// Add an outbound interceptor. Runs after the auth interceptor.
    pub fn request_interceptor(mut self, interceptor: Arc<dyn RequestInterceptor>) -> Self {
        self.request_interceptors.push(interceptor);
        self
    }

    /// Add an inbound interceptor. Runs after the session expiry interceptor.
    pub fn response_interceptor(mut self, interceptor: Arc<dyn ResponseInterceptor>) -> Self {
        self.response_interceptors.push(interceptor);
        self
    }

    pub fn build(self) -> Result<ApiClient, ApiError> {
        let config = self.config.unwrap_or_default();
        let base_url = config.normalized_base_url().to_string();
        if !(base_url.starts_with("http://") || base_url.starts_with("https://")) {
            return Err(ApiError::Configuration(format!(
                "base URL must be http(s), got {:?}",
                config.base_url
            )));
        }

        let store = self
            .store
            .unwrap_or_else(|| Arc::new(MemoryStore::new()) as Arc<dyn TokenStore>);
        let notifier = self
            .notifier
            .unwrap_or_else(|| Arc::new(TracingNotifier) as Arc<dyn Notifier>);
        let navigator = self
            .navigator
            .unwrap_or_else(|| Arc::new(HistoryRouter::new()) as Arc<dyn Navigator>);

        let mut request_interceptors: Vec<Arc<dyn RequestInterceptor>> =
            vec![Arc::new(AuthInterceptor::new(store.clone()))];
        request_interceptors.extend(self.request_interceptors);

        let mut response_interceptors: Vec<Arc<dyn ResponseInterceptor>> = vec![Arc::new(
            SessionExpiryInterceptor::new(store.clone(), notifier, navigator),
        )];
        response_interceptors.extend(self.response_interceptors);

        let client = Client::builder().timeout(config.timeout).build()?;

        Ok(ApiClient {
            client,
            base_url,
            store,
            request_interceptors: request_interceptors.into(),
            response_interceptors: response_interceptors.into(),
        })
    }
}
