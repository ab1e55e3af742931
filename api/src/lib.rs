//! # Dispatch Console API Client
//!
//! Typed HTTP client for the dispatch console REST API: session-cookie
//! authentication with double-submit CSRF protection, thin resource clients
//! for the auth, ride, and user endpoints, and a uniform error taxonomy.
//!
//! ## Example
//!
//! ```no_run
//! use dispatch_console_api::{ApiConfig, AuthClient, Credentials, HttpClient, RideClient};
//!
//! #[tokio::main]
//! async fn main() -> Result<(), Box<dyn std::error::Error>> {
//!     let http = HttpClient::new(&ApiConfig::from_env())?;
//!
//!     let auth = AuthClient::new(http.clone());
//!     auth.login(&Credentials::new("dispatcher", "secret")).await?;
//!
//!     let rides = RideClient::new(http);
//!     let page = rides.list(&[("page".to_string(), "1".to_string())]).await?;
//!     println!("{} rides total", page.count);
//!     Ok(())
//! }
//! ```
//!
//! ## Contract
//!
//! - Every request goes through the single [`HttpClient`]; resource clients
//!   add no state and no retry logic.
//! - All failures are normalized into [`ApiError`] before callers see them.
//! - Requests fail with [`ApiError::Network`] after 10 seconds without a
//!   response rather than hanging.

pub mod auth;
pub mod config;
pub mod error;
pub mod http;
pub mod rides;
pub mod types;
pub mod users;

// Re-export main types for convenience
pub use auth::AuthClient;
pub use config::ApiConfig;
pub use error::{ApiError, Result};
pub use http::{CSRF_COOKIE, CSRF_HEADER, HttpClient};
pub use rides::RideClient;
pub use types::{
    AuthCheck, Credentials, FilterSet, LoginResponse, Ordering, Page, RideListOverrides,
    RideRecord, RideStatus, UserProfile, UserRecord,
};
pub use users::UserClient;
