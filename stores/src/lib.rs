//! # Dispatch Console Stores
//!
//! Client-side state synchronization layer for the dispatch console: the
//! stores that own authentication status, the paginated ride collection, and
//! transient UI signals, plus the navigation guard that couples
//! authentication state to route access.
//!
//! Stores are explicit context objects constructed once per application
//! session; there are no process-wide singletons. Each store is a cheap
//! `Clone` handle over shared state; only a store's own methods write its
//! state. Derived values (`is_admin`, `has_rides`) are recomputed on read
//! from the current snapshot.
//!
//! ## Example
//!
//! ```no_run
//! use dispatch_console_api::{ApiConfig, Credentials};
//! use dispatch_console_stores::{AppContext, FilterUpdate};
//! use dispatch_console_api::RideStatus;
//!
//! #[tokio::main]
//! async fn main() -> Result<(), Box<dyn std::error::Error>> {
//!     let app = AppContext::new(&ApiConfig::from_env())?;
//!
//!     app.auth.login(&Credentials::new("dispatcher", "secret")).await?;
//!     app.rides
//!         .set_filter(FilterUpdate::Status(Some(RideStatus::EnRoute)))
//!         .await;
//!     app.rides.fetch_rides(&Default::default()).await?;
//!
//!     println!("{} rides", app.rides.snapshot().await.total_items);
//!     Ok(())
//! }
//! ```

pub mod auth_store;
pub mod ride_store;
pub mod router;
pub mod ui_store;

pub use auth_store::{AuthPhase, AuthStore, Session};
pub use ride_store::{FilterUpdate, PAGE_SIZE, RideCollection, RideStore, total_pages_for};
pub use router::{LOGIN, NavigationGuard, RIDE_DETAIL, RIDES, Route, RouteDecision};
pub use ui_store::{Toast, ToastSeverity, UiStore};

use dispatch_console_api::{
    ApiConfig, AuthClient, HttpClient, Result, RideClient, UserClient,
};

/// The stores of one application session, built over a shared HTTP client.
///
/// Constructed once at startup and passed by reference to consumers.
#[derive(Debug, Clone)]
pub struct AppContext {
    /// Session identity and authentication state machine.
    pub auth: AuthStore,
    /// Paginated, filtered ride collection.
    pub rides: RideStore,
    /// Admin user management client (stateless, no store).
    pub users: UserClient,
    /// Transient notification and visibility state.
    pub ui: UiStore,
    /// Route transition guard.
    pub guard: NavigationGuard,
}

impl AppContext {
    /// Build the full store context from a configuration.
    ///
    /// All stores share one [`HttpClient`], so they share the session cookie
    /// and the captured anti-forgery token.
    ///
    /// # Errors
    ///
    /// Returns [`dispatch_console_api::ApiError::ClientSetup`] if the HTTP
    /// client cannot be constructed.
    pub fn new(config: &ApiConfig) -> Result<Self> {
        let http = HttpClient::new(config)?;
        let auth = AuthStore::new(AuthClient::new(http.clone()));
        Ok(Self {
            guard: NavigationGuard::new(auth.clone()),
            rides: RideStore::new(RideClient::new(http.clone())),
            users: UserClient::new(http),
            ui: UiStore::new(),
            auth,
        })
    }
}
