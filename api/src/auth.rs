//! Authentication resource client.
//!
//! Stateless façade over the `/auth/` endpoints. Every method maps onto
//! exactly one REST call and passes the normalized result through unchanged,
//! with one sequencing exception: [`AuthClient::login`] primes the
//! anti-forgery token first, because the login POST cannot succeed without it.

use crate::error::{ApiError, Result};
use crate::http::HttpClient;
use crate::types::{AuthCheck, Credentials, LoginResponse, UserProfile};
use serde_json::Value;

/// Client for the authentication endpoints.
#[derive(Debug, Clone)]
pub struct AuthClient {
    http: HttpClient,
}

impl AuthClient {
    /// Create an auth client over the shared HTTP access layer.
    #[must_use]
    pub const fn new(http: HttpClient) -> Self {
        Self { http }
    }

    /// Prime the anti-forgery cookie (`GET /auth/csrf/`).
    ///
    /// # Errors
    ///
    /// Returns the normalized [`ApiError`] for any failure.
    pub async fn csrf(&self) -> Result<()> {
        let _body: Value = self.http.get("/auth/csrf/", &[]).await?;
        Ok(())
    }

    /// Log in with the given credentials (`POST /auth/login/`).
    ///
    /// Primes the anti-forgery token first; the login is aborted with
    /// [`ApiError::ClientSetup`] if priming fails, since the POST would be
    /// rejected anyway.
    ///
    /// # Errors
    ///
    /// Returns [`ApiError::ClientSetup`] if token priming fails, otherwise
    /// the normalized [`ApiError`] of the login call itself.
    pub async fn login(&self, credentials: &Credentials) -> Result<LoginResponse> {
        self.csrf()
            .await
            .map_err(|e| ApiError::ClientSetup(format!("CSRF token priming failed: {e}")))?;
        self.http.post("/auth/login/", credentials).await
    }

    /// Destroy the current session (`POST /auth/logout/`).
    ///
    /// # Errors
    ///
    /// Returns the normalized [`ApiError`] for any failure.
    pub async fn logout(&self) -> Result<()> {
        let _body: Value = self.http.post_empty("/auth/logout/").await?;
        Ok(())
    }

    /// Fetch the current user's profile (`GET /auth/user/`).
    ///
    /// # Errors
    ///
    /// Returns the normalized [`ApiError`] for any failure.
    pub async fn current_user(&self) -> Result<UserProfile> {
        self.http.get("/auth/user/", &[]).await
    }

    /// Probe the session's authentication status (`GET /auth/check/`).
    ///
    /// # Errors
    ///
    /// Returns the normalized [`ApiError`] for any failure.
    pub async fn check(&self) -> Result<AuthCheck> {
        self.http.get("/auth/check/", &[]).await
    }
}
