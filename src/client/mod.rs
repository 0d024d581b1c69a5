//! Authenticated API Client
//!
//! Single chokepoint for every call to the evaluation backend.
//!
//! Each call:
//! 1. reads the bearer token from the injected [`SessionStore`]
//! 2. sends `Content-Type: application/json` and, when a token exists,
//!    `Authorization: Bearer <token>`; caller headers override both
//! 3. serializes the optional body to JSON text
//! 4. on 2xx decodes the body into the caller's type, otherwise fails with
//!    the body text (or the status line when the body is empty)
//!
//! The client never retries and never touches the session beyond reading
//! it. Reacting to a 401 is up to the caller, see
//! [`crate::auth::handle_error`].

mod error;
mod options;

pub use error::{ApiError, ApiResult};
pub use options::RequestOptions;
pub use reqwest::Method;

use reqwest::header::{HeaderMap, HeaderName, HeaderValue, AUTHORIZATION, CONTENT_TYPE};
use reqwest::{Client, StatusCode};
use serde::de::DeserializeOwned;
use serde::Serialize;
use std::sync::Arc;
use std::time::Duration;
use uuid::Uuid;

use crate::session::SessionStore;

/// Connection settings for [`ApiClient`]
#[derive(Debug, Clone)]
pub struct ClientConfig {
    /// Backend base URL without trailing slash (e.g., "http://localhost:5000")
    pub base_url: String,
    /// Per-request timeout
    pub timeout: Duration,
}

impl Default for ClientConfig {
    fn default() -> Self {
        Self {
            base_url: "http://localhost:5000".to_string(),
            timeout: Duration::from_secs(30),
        }
    }
}

/// REST client that injects the session token into every request
#[derive(Clone)]
pub struct ApiClient {
    http: Client,
    base_url: String,
    session: Arc<dyn SessionStore>,
}

impl ApiClient {
    /// Create a client for the given backend and session store
    pub fn new(config: ClientConfig, session: Arc<dyn SessionStore>) -> ApiResult<Self> {
        let http = Client::builder().timeout(config.timeout).build()?;

        Ok(Self {
            http,
            base_url: config.base_url.trim_end_matches('/').to_string(),
            session,
        })
    }

    pub fn base_url(&self) -> &str {
        &self.base_url
    }

    /// The session store this client reads its token from
    pub fn session(&self) -> &Arc<dyn SessionStore> {
        &self.session
    }

    /// Resolve a path against the base URL; absolute URLs pass through
    pub fn resolve_url(&self, path: &str) -> String {
        if path.starts_with("http://") || path.starts_with("https://") {
            path.to_string()
        } else if path.starts_with('/') {
            format!("{}{}", self.base_url, path)
        } else {
            format!("{}/{}", self.base_url, path)
        }
    }

    /// Send a request and decode the JSON response into `R`
    pub async fn request<B, R>(&self, path: &str, options: RequestOptions<B>) -> ApiResult<R>
    where
        B: Serialize,
        R: DeserializeOwned,
    {
        let url = self.resolve_url(path);
        let request_id = Uuid::new_v4();
        let headers = self.build_headers(&options.headers)?;

        let mut builder = self
            .http
            .request(options.method.clone(), &url)
            .headers(headers);

        if let Some(body) = &options.body {
            let text = serde_json::to_string(body).map_err(ApiError::Encode)?;
            builder = builder.body(text);
        }

        tracing::debug!(
            request_id = %request_id,
            method = %options.method,
            url = %url,
            "Sending request"
        );

        let response = builder.send().await.map_err(|e| {
            tracing::warn!(request_id = %request_id, url = %url, error = %e, "Request failed");
            ApiError::Transport(e)
        })?;

        let status = response.status();
        if !status.is_success() {
            let text = response.text().await.unwrap_or_default();
            let err = ApiError::from_response(status, text);
            tracing::warn!(
                request_id = %request_id,
                status = status.as_u16(),
                error = %err,
                "Backend returned an error"
            );
            return Err(err);
        }

        let bytes = response.bytes().await?;
        tracing::debug!(
            request_id = %request_id,
            status = status.as_u16(),
            bytes = bytes.len(),
            "Response received"
        );

        decode_body(status, &bytes)
    }

    /// GET `path`
    pub async fn get<R: DeserializeOwned>(&self, path: &str) -> ApiResult<R> {
        self.request(path, RequestOptions::<()>::new(Method::GET)).await
    }

    /// POST `body` to `path`
    pub async fn post<B, R>(&self, path: &str, body: &B) -> ApiResult<R>
    where
        B: Serialize,
        R: DeserializeOwned,
    {
        self.request(path, RequestOptions::new(Method::POST).body(body))
            .await
    }

    /// PUT `body` to `path`
    pub async fn put<B, R>(&self, path: &str, body: &B) -> ApiResult<R>
    where
        B: Serialize,
        R: DeserializeOwned,
    {
        self.request(path, RequestOptions::new(Method::PUT).body(body))
            .await
    }

    /// PATCH `path` with `body`
    pub async fn patch<B, R>(&self, path: &str, body: &B) -> ApiResult<R>
    where
        B: Serialize,
        R: DeserializeOwned,
    {
        self.request(path, RequestOptions::new(Method::PATCH).body(body))
            .await
    }

    /// DELETE `path`
    pub async fn delete<R: DeserializeOwned>(&self, path: &str) -> ApiResult<R> {
        self.request(path, RequestOptions::<()>::new(Method::DELETE)).await
    }

    fn build_headers(&self, overrides: &[(String, String)]) -> ApiResult<HeaderMap> {
        let mut headers = HeaderMap::new();
        headers.insert(CONTENT_TYPE, HeaderValue::from_static("application/json"));

        if let Some(token) = self.session.get()? {
            let value = HeaderValue::from_str(&format!("Bearer {}", token))
                .map_err(|_| ApiError::InvalidHeader(AUTHORIZATION.as_str().to_string()))?;
            headers.insert(AUTHORIZATION, value);
        }

        for (name, value) in overrides {
            let name = HeaderName::from_bytes(name.as_bytes())
                .map_err(|_| ApiError::InvalidHeader(name.clone()))?;
            let value = HeaderValue::from_str(value)
                .map_err(|_| ApiError::InvalidHeader(name.as_str().to_string()))?;
            headers.insert(name, value);
        }

        Ok(headers)
    }
}

/// Decode a success body
///
/// Only `204 No Content` may come without a body; it decodes as JSON `null`.
/// An empty body on any other 2xx is a decode error.
fn decode_body<R: DeserializeOwned>(status: StatusCode, bytes: &[u8]) -> ApiResult<R> {
    if status == StatusCode::NO_CONTENT && bytes.iter().all(u8::is_ascii_whitespace) {
        return serde_json::from_str("null").map_err(ApiError::Decode);
    }
    serde_json::from_slice(bytes).map_err(ApiError::Decode)
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::session::MemorySession;

    fn client_with(session: MemorySession) -> ApiClient {
        let config = ClientConfig {
            base_url: "http://localhost:5000/".to_string(),
            ..Default::default()
        };
        ApiClient::new(config, Arc::new(session)).unwrap()
    }

    #[test]
    fn test_resolve_url() {
        let client = client_with(MemorySession::new());
        assert_eq!(client.base_url(), "http://localhost:5000");
        assert_eq!(
            client.resolve_url("/api/assignments"),
            "http://localhost:5000/api/assignments"
        );
        assert_eq!(
            client.resolve_url("api/users/me"),
            "http://localhost:5000/api/users/me"
        );
        assert_eq!(
            client.resolve_url("https://cdn.example.org/x.json"),
            "https://cdn.example.org/x.json"
        );
    }

    #[test]
    fn test_headers_with_token() {
        let client = client_with(MemorySession::with_token("abc"));
        let headers = client.build_headers(&[]).unwrap();
        assert_eq!(headers[AUTHORIZATION], "Bearer abc");
        assert_eq!(headers[CONTENT_TYPE], "application/json");
    }

    #[test]
    fn test_headers_without_token() {
        let client = client_with(MemorySession::new());
        let headers = client.build_headers(&[]).unwrap();
        assert!(headers.get(AUTHORIZATION).is_none());
        assert_eq!(headers[CONTENT_TYPE], "application/json");
    }

    #[test]
    fn test_caller_headers_override_defaults() {
        let client = client_with(MemorySession::with_token("abc"));
        let overrides = vec![
            ("Content-Type".to_string(), "text/plain".to_string()),
            ("Authorization".to_string(), "Bearer other".to_string()),
            ("X-Client".to_string(), "evaltrack".to_string()),
        ];
        let headers = client.build_headers(&overrides).unwrap();
        assert_eq!(headers[CONTENT_TYPE], "text/plain");
        assert_eq!(headers[AUTHORIZATION], "Bearer other");
        assert_eq!(headers["x-client"], "evaltrack");
        assert_eq!(headers.get_all(AUTHORIZATION).iter().count(), 1);
    }

    #[test]
    fn test_invalid_header_name() {
        let client = client_with(MemorySession::new());
        let overrides = vec![("bad header".to_string(), "x".to_string())];
        let err = client.build_headers(&overrides).unwrap_err();
        assert!(matches!(err, ApiError::InvalidHeader(_)));
    }

    #[test]
    fn test_decode_body() {
        let value: serde_json::Value = decode_body(StatusCode::OK, br#"[{"id":"1"}]"#).unwrap();
        assert_eq!(value[0]["id"], "1");

        let err = decode_body::<Vec<String>>(StatusCode::OK, b"not json").unwrap_err();
        assert!(matches!(err, ApiError::Decode(_)));
    }

    #[test]
    fn test_empty_body_only_allowed_for_no_content() {
        let empty: Option<serde_json::Value> = decode_body(StatusCode::NO_CONTENT, b"").unwrap();
        assert!(empty.is_none());

        let err = decode_body::<serde_json::Value>(StatusCode::OK, b"").unwrap_err();
        assert!(matches!(err, ApiError::Decode(_)));

        let err = decode_body::<serde_json::Value>(StatusCode::CREATED, b"  ").unwrap_err();
        assert!(matches!(err, ApiError::Decode(_)));
    }
}
