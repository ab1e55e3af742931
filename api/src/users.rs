//! User management resource client.
//!
//! Admin-only rider/driver management on `/users/` and `/users/{id}/`.
//! Same shape as the ride client: one method per REST call, no state.

use crate::error::Result;
use crate::http::HttpClient;
use crate::types::{Page, UserRecord};
use serde::Serialize;

/// Client for the user management endpoints.
#[derive(Debug, Clone)]
pub struct UserClient {
    http: HttpClient,
}

impl UserClient {
    /// Create a user client over the shared HTTP access layer.
    #[must_use]
    pub const fn new(http: HttpClient) -> Self {
        Self { http }
    }

    /// List users (`GET /users/`) with the given query parameters.
    ///
    /// # Errors
    ///
    /// Returns the normalized [`ApiError`](crate::ApiError) for any failure.
    pub async fn list(&self, query: &[(String, String)]) -> Result<Page<UserRecord>> {
        self.http.get("/users/", query).await
    }

    /// Fetch a single user (`GET /users/{id}/`).
    ///
    /// # Errors
    ///
    /// Returns the normalized [`ApiError`](crate::ApiError) for any failure.
    pub async fn retrieve(&self, id: i64) -> Result<UserRecord> {
        self.http.get(&format!("/users/{id}/"), &[]).await
    }

    /// Create a user (`POST /users/`).
    ///
    /// # Errors
    ///
    /// Returns the normalized [`ApiError`](crate::ApiError) for any failure.
    pub async fn create<B>(&self, body: &B) -> Result<UserRecord>
    where
        B: Serialize + ?Sized + Sync,
    {
        self.http.post("/users/", body).await
    }

    /// Replace a user (`PUT /users/{id}/`).
    ///
    /// # Errors
    ///
    /// Returns the normalized [`ApiError`](crate::ApiError) for any failure.
    pub async fn update<B>(&self, id: i64, body: &B) -> Result<UserRecord>
    where
        B: Serialize + ?Sized + Sync,
    {
        self.http.put(&format!("/users/{id}/"), body).await
    }

    /// Delete a user (`DELETE /users/{id}/`).
    ///
    /// # Errors
    ///
    /// Returns the normalized [`ApiError`](crate::ApiError) for any failure.
    pub async fn delete(&self, id: i64) -> Result<()> {
        self.http.delete(&format!("/users/{id}/")).await
    }
}
