//! Navigation guard.
//!
//! Runs before every route transition. Reads the authentication store
//! (triggering at most a passive re-check, never a direct write) and decides
//! whether the transition proceeds or redirects.

use crate::auth_store::AuthStore;

/// A navigable route with its access metadata.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct Route {
    /// Route name, unique within the route table.
    pub name: &'static str,
    /// Whether the route requires an authenticated session.
    pub requires_auth: bool,
}

impl Route {
    /// Declare a route. Authentication is required unless opted out.
    #[must_use]
    pub const fn new(name: &'static str) -> Self {
        Self {
            name,
            requires_auth: true,
        }
    }

    /// Declare a route that does not require authentication.
    #[must_use]
    pub const fn public(name: &'static str) -> Self {
        Self {
            name,
            requires_auth: false,
        }
    }
}

/// The login route.
pub const LOGIN: Route = Route::public("login");

/// The default ride listing route.
pub const RIDES: Route = Route::new("rides");

/// The ride detail route.
pub const RIDE_DETAIL: Route = Route::new("ride-detail");

/// Outcome of a guard check.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum RouteDecision {
    /// Render the target route.
    Proceed,
    /// Navigate to this route instead.
    Redirect(Route),
}

/// Guard coupling authentication state to route access.
#[derive(Debug, Clone)]
pub struct NavigationGuard {
    auth: AuthStore,
}

impl NavigationGuard {
    /// Create a guard over the given authentication store.
    #[must_use]
    pub const fn new(auth: AuthStore) -> Self {
        Self { auth }
    }

    /// Decide a transition to `to`.
    ///
    /// When the target requires authentication and the store holds neither a
    /// cached authenticated flag nor a cached identity, the session is
    /// re-checked first ([`AuthStore::check_auth`] never raises, so a probe
    /// failure simply reads as unauthenticated). Unauthenticated access to a
    /// protected route redirects to [`LOGIN`]; an authenticated visit to the
    /// login route redirects to [`RIDES`]. Everything else proceeds.
    pub async fn before_each(&self, to: &Route) -> RouteDecision {
        if to.requires_auth {
            let session = self.auth.session().await;
            if !session.authenticated && session.user.is_none() {
                self.auth.check_auth().await;
            }
            if !self.auth.session().await.authenticated {
                tracing::debug!(route = to.name, "unauthenticated navigation, redirecting to login");
                return RouteDecision::Redirect(LOGIN);
            }
        }

        if to.name == LOGIN.name && self.auth.session().await.authenticated {
            return RouteDecision::Redirect(RIDES);
        }

        RouteDecision::Proceed
    }
}
