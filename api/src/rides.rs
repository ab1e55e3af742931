//! Ride resource client.
//!
//! One method per REST call on `/rides/` and `/rides/{id}/`; no state, no
//! retries, results and errors pass through unchanged.

use crate::error::Result;
use crate::http::HttpClient;
use crate::types::{Page, RideRecord};
use serde::Serialize;

/// Client for the ride collection endpoints.
#[derive(Debug, Clone)]
pub struct RideClient {
    http: HttpClient,
}

impl RideClient {
    /// Create a ride client over the shared HTTP access layer.
    #[must_use]
    pub const fn new(http: HttpClient) -> Self {
        Self { http }
    }

    /// List rides (`GET /rides/`) with the given query parameters.
    ///
    /// # Errors
    ///
    /// Returns the normalized [`ApiError`](crate::ApiError) for any failure.
    pub async fn list(&self, query: &[(String, String)]) -> Result<Page<RideRecord>> {
        self.http.get("/rides/", query).await
    }

    /// Fetch a single ride (`GET /rides/{id}/`).
    ///
    /// # Errors
    ///
    /// Returns the normalized [`ApiError`](crate::ApiError) for any failure.
    pub async fn retrieve(&self, id: i64) -> Result<RideRecord> {
        self.http.get(&format!("/rides/{id}/"), &[]).await
    }

    /// Create a ride (`POST /rides/`).
    ///
    /// # Errors
    ///
    /// Returns the normalized [`ApiError`](crate::ApiError) for any failure.
    pub async fn create<B>(&self, body: &B) -> Result<RideRecord>
    where
        B: Serialize + ?Sized + Sync,
    {
        self.http.post("/rides/", body).await
    }

    /// Replace a ride (`PUT /rides/{id}/`).
    ///
    /// # Errors
    ///
    /// Returns the normalized [`ApiError`](crate::ApiError) for any failure.
    pub async fn update<B>(&self, id: i64, body: &B) -> Result<RideRecord>
    where
        B: Serialize + ?Sized + Sync,
    {
        self.http.put(&format!("/rides/{id}/"), body).await
    }

    /// Partially update a ride (`PATCH /rides/{id}/`).
    ///
    /// # Errors
    ///
    /// Returns the normalized [`ApiError`](crate::ApiError) for any failure.
    pub async fn partial_update<B>(&self, id: i64, body: &B) -> Result<RideRecord>
    where
        B: Serialize + ?Sized + Sync,
    {
        self.http.patch(&format!("/rides/{id}/"), body).await
    }

    /// Delete a ride (`DELETE /rides/{id}/`).
    ///
    /// # Errors
    ///
    /// Returns the normalized [`ApiError`](crate::ApiError) for any failure.
    pub async fn delete(&self, id: i64) -> Result<()> {
        self.http.delete(&format!("/rides/{id}/")).await
    }
}
