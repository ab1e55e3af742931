//! HTTP access layer.
//!
//! A single configured [`HttpClient`] performs every request the resource
//! clients make. It owns the three cross-cutting concerns of the API contract:
//!
//! - **Credential transport**: the session travels in cookies; the underlying
//!   `reqwest` cookie store attaches them on every call.
//! - **Anti-forgery**: the value of the `csrftoken` cookie is captured from
//!   `Set-Cookie` response headers and echoed back as the `X-CSRFToken` header
//!   on every non-GET request. GET requests never carry it.
//! - **Error normalization**: transport failures and non-2xx statuses are
//!   mapped onto the [`ApiError`] taxonomy before the caller sees them.
//!
//! This layer returns decoded payloads unchanged and never interprets
//! business fields.

use crate::config::ApiConfig;
use crate::error::{ApiError, Result};
use reqwest::header::SET_COOKIE;
use reqwest::{Client, Method, Response, StatusCode};
use serde::Serialize;
use serde::de::DeserializeOwned;
use serde_json::Value;
use std::sync::{Arc, RwLock};

/// Name of the cookie carrying the anti-forgery token.
pub const CSRF_COOKIE: &str = "csrftoken";

/// Header the anti-forgery token is echoed into on state-changing requests.
pub const CSRF_HEADER: &str = "X-CSRFToken";

/// Configured request client shared by all resource clients.
///
/// Cheap to clone; clones share the same cookie store and captured
/// anti-forgery token.
#[derive(Debug, Clone)]
pub struct HttpClient {
    client: Client,
    base_url: String,
    csrf_token: Arc<RwLock<Option<String>>>,
}

impl HttpClient {
    /// Build a client from the given configuration.
    ///
    /// # Errors
    ///
    /// Returns [`ApiError::ClientSetup`] if the underlying client cannot be
    /// constructed.
    pub fn new(config: &ApiConfig) -> Result<Self> {
        let client = Client::builder()
            .timeout(config.timeout)
            .cookie_store(true)
            .build()
            .map_err(|e| ApiError::ClientSetup(e.to_string()))?;

        Ok(Self {
            client,
            base_url: config.base_url.trim_end_matches('/').to_string(),
            csrf_token: Arc::new(RwLock::new(None)),
        })
    }

    /// Retrieve a resource.
    ///
    /// # Errors
    ///
    /// Returns the normalized [`ApiError`] for any failure.
    pub async fn get<T: DeserializeOwned>(&self, path: &str, query: &[(String, String)]) -> Result<T> {
        let response = self.send(Method::GET, path, query, None::<&()>).await?;
        Self::decode(response).await
    }

    /// Create a resource.
    ///
    /// # Errors
    ///
    /// Returns the normalized [`ApiError`] for any failure.
    pub async fn post<B, T>(&self, path: &str, body: &B) -> Result<T>
    where
        B: Serialize + ?Sized + Sync,
        T: DeserializeOwned,
    {
        let response = self.send(Method::POST, path, &[], Some(body)).await?;
        Self::decode(response).await
    }

    /// Issue a bodyless POST (e.g., logout).
    ///
    /// # Errors
    ///
    /// Returns the normalized [`ApiError`] for any failure.
    pub async fn post_empty<T: DeserializeOwned>(&self, path: &str) -> Result<T> {
        let response = self.send(Method::POST, path, &[], None::<&()>).await?;
        Self::decode(response).await
    }

    /// Replace a resource.
    ///
    /// # Errors
    ///
    /// Returns the normalized [`ApiError`] for any failure.
    pub async fn put<B, T>(&self, path: &str, body: &B) -> Result<T>
    where
        B: Serialize + ?Sized + Sync,
        T: DeserializeOwned,
    {
        let response = self.send(Method::PUT, path, &[], Some(body)).await?;
        Self::decode(response).await
    }

    /// Partially update a resource.
    ///
    /// # Errors
    ///
    /// Returns the normalized [`ApiError`] for any failure.
    pub async fn patch<B, T>(&self, path: &str, body: &B) -> Result<T>
    where
        B: Serialize + ?Sized + Sync,
        T: DeserializeOwned,
    {
        let response = self.send(Method::PATCH, path, &[], Some(body)).await?;
        Self::decode(response).await
    }

    /// Delete a resource. The response body, if any, is discarded.
    ///
    /// # Errors
    ///
    /// Returns the normalized [`ApiError`] for any failure.
    pub async fn delete(&self, path: &str) -> Result<()> {
        self.send(Method::DELETE, path, &[], None::<&()>).await?;
        Ok(())
    }

    async fn send<B>(
        &self,
        method: Method,
        path: &str,
        query: &[(String, String)],
        body: Option<&B>,
    ) -> Result<Response>
    where
        B: Serialize + ?Sized + Sync,
    {
        let url = format!("{}{path}", self.base_url);
        let mut request = self.client.request(method.clone(), &url);

        if !query.is_empty() {
            request = request.query(query);
        }

        // Double-submit anti-forgery: echo the captured cookie value on every
        // state-changing request. Retrieval requests never attach it.
        if method != Method::GET {
            if let Some(token) = self.csrf_token() {
                request = request.header(CSRF_HEADER, token);
            }
        }

        if let Some(body) = body {
            request = request.json(body);
        }

        let response = request.send().await.map_err(|e| {
            tracing::warn!(method = %method, path, category = "network", error = %e, "request failed");
            ApiError::Network(e.to_string())
        })?;

        self.capture_csrf_cookie(&response);

        let status = response.status();
        if status.is_success() {
            Ok(response)
        } else {
            let error = Self::classify(status, response).await;
            tracing::warn!(
                method = %method,
                path,
                status = status.as_u16(),
                category = error.category(),
                "request failed"
            );
            Err(error)
        }
    }

    async fn decode<T: DeserializeOwned>(response: Response) -> Result<T> {
        response
            .json::<T>()
            .await
            .map_err(|e| ApiError::ClientSetup(format!("response decoding failed: {e}")))
    }

    /// Map a non-2xx response onto the error taxonomy.
    async fn classify(status: StatusCode, response: Response) -> ApiError {
        let body = response.text().await.unwrap_or_default();
        let raw: Option<Value> = serde_json::from_str(&body).ok();
        let message = raw.as_ref().and_then(detail_message).unwrap_or_else(|| {
            if body.is_empty() {
                status.canonical_reason().unwrap_or("request failed").to_string()
            } else {
                body.clone()
            }
        });

        match status {
            StatusCode::UNAUTHORIZED => ApiError::Unauthorized { message, raw },
            StatusCode::FORBIDDEN => ApiError::Forbidden { message, raw },
            StatusCode::NOT_FOUND => ApiError::NotFound { message, raw },
            s if s.is_server_error() => ApiError::Server {
                status: s.as_u16(),
                message,
                raw,
            },
            s => ApiError::Validation {
                status: s.as_u16(),
                message,
                raw,
            },
        }
    }

    /// Capture the anti-forgery token from any `Set-Cookie` header naming it.
    ///
    /// This is the client-visible storage the double-submit scheme reads from.
    fn capture_csrf_cookie(&self, response: &Response) {
        for header in response.headers().get_all(SET_COOKIE) {
            let Ok(cookie) = header.to_str() else { continue };
            if let Some(rest) = cookie.strip_prefix(CSRF_COOKIE) {
                if let Some(value) = rest.strip_prefix('=') {
                    let token = value.split(';').next().unwrap_or_default().trim();
                    if !token.is_empty() {
                        if let Ok(mut slot) = self.csrf_token.write() {
                            *slot = Some(token.to_string());
                        }
                    }
                }
            }
        }
    }

    fn csrf_token(&self) -> Option<String> {
        self.csrf_token.read().ok().and_then(|slot| slot.clone())
    }
}

/// Extract the server's human-readable message from an error payload.
///
/// The backend uses `detail` for framework-level errors, `error` for the
/// login endpoint, and `message` elsewhere.
fn detail_message(raw: &Value) -> Option<String> {
    for key in ["detail", "error", "message"] {
        if let Some(message) = raw.get(key).and_then(Value::as_str) {
            return Some(message.to_string());
        }
    }
    None
}

#[cfg(test)]
mod tests {
    use super::*;
    use serde_json::json;

    #[test]
    fn test_detail_message_key_precedence() {
        assert_eq!(
            detail_message(&json!({"detail": "not found"})),
            Some("not found".to_string())
        );
        assert_eq!(
            detail_message(&json!({"error": "Invalid credentials"})),
            Some("Invalid credentials".to_string())
        );
        assert_eq!(
            detail_message(&json!({"detail": "a", "error": "b"})),
            Some("a".to_string())
        );
        assert_eq!(detail_message(&json!({"count": 3})), None);
    }

    #[test]
    #[allow(clippy::unwrap_used)]
    fn test_base_url_trailing_slash_is_trimmed() {
        let client = HttpClient::new(&ApiConfig::new("http://localhost:8000/api/")).unwrap();
        assert_eq!(client.base_url, "http://localhost:8000/api");
    }
}
