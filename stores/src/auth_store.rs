//! Authentication store.
//!
//! Owns the client's locally cached belief about the current session and
//! exposes it as an explicit state machine:
//!
//! ```text
//! Unknown → Checking → {Authenticated, Unauthenticated}
//! Authenticated → LoggingOut → Unauthenticated
//! ```
//!
//! Error handling is deliberately asymmetric, matching the checked backend
//! contract: a failed login clears the session and re-raises; a failed logout
//! keeps the stale local session and re-raises; [`AuthStore::check_auth`] is a
//! passive probe that absorbs every failure into the unauthenticated state and
//! never returns an error.

use dispatch_console_api::{ApiError, AuthClient, Credentials, LoginResponse, Result, UserProfile};
use std::sync::Arc;
use tokio::sync::RwLock;

/// Discrete states of the authentication machine.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub enum AuthPhase {
    /// No authentication operation has run yet.
    #[default]
    Unknown,
    /// A login, probe, or refresh is in flight.
    Checking,
    /// The last successful check reported an authenticated session.
    Authenticated,
    /// The last check reported no session (or failed).
    Unauthenticated,
    /// A logout is in flight.
    LoggingOut,
}

/// The locally cached session identity.
///
/// Invariant: `authenticated` implies `user.is_some()`. Both fields are only
/// ever written together, from the result of the last server round trip.
#[derive(Debug, Clone, PartialEq, Default)]
pub struct Session {
    /// Identity reported by the last successful check, if any.
    pub user: Option<UserProfile>,
    /// Whether the server considered the session authenticated.
    pub authenticated: bool,
}

impl Session {
    /// Whether the session's user has administrative capability.
    ///
    /// Recomputed on read from the current snapshot.
    #[must_use]
    pub fn is_admin(&self) -> bool {
        self.user.as_ref().is_some_and(UserProfile::is_admin)
    }
}

#[derive(Debug, Default)]
struct AuthState {
    session: Session,
    phase: AuthPhase,
    loading: bool,
    error: Option<ApiError>,
}

/// Store owning the session state.
///
/// Constructed once per application session; clones share the same state.
/// Overlapping calls are not serialized: last write wins on the shared
/// session, which is an accepted limitation of the source contract.
#[derive(Debug, Clone)]
pub struct AuthStore {
    client: AuthClient,
    state: Arc<RwLock<AuthState>>,
}

impl AuthStore {
    /// Create a store over the given auth client.
    #[must_use]
    pub fn new(client: AuthClient) -> Self {
        Self {
            client,
            state: Arc::new(RwLock::new(AuthState::default())),
        }
    }

    /// Log in and populate the session from the server's response.
    ///
    /// On failure the session is cleared, the error is recorded, and the
    /// error is re-raised so the initiating UI action observes it.
    ///
    /// # Errors
    ///
    /// Returns the normalized [`ApiError`] of the login call.
    pub async fn login(&self, credentials: &Credentials) -> Result<LoginResponse> {
        self.begin(AuthPhase::Checking).await;
        match self.client.login(credentials).await {
            Ok(response) => {
                let mut state = self.state.write().await;
                state.session = Session {
                    user: Some(response.user.clone()),
                    authenticated: true,
                };
                state.phase = AuthPhase::Authenticated;
                state.loading = false;
                tracing::debug!(user = %response.user.username, "login succeeded");
                Ok(response)
            }
            Err(error) => {
                let mut state = self.state.write().await;
                state.session = Session::default();
                state.phase = AuthPhase::Unauthenticated;
                state.error = Some(error.clone());
                state.loading = false;
                Err(error)
            }
        }
    }

    /// Destroy the server session and clear the local one.
    ///
    /// The local session is cleared only on success: a failed logout leaves
    /// the store in its previous (possibly stale) authenticated state until
    /// the next check corrects it, and re-raises the error.
    ///
    /// # Errors
    ///
    /// Returns the normalized [`ApiError`] of the logout call.
    pub async fn logout(&self) -> Result<()> {
        self.begin(AuthPhase::LoggingOut).await;
        match self.client.logout().await {
            Ok(()) => {
                let mut state = self.state.write().await;
                state.session = Session::default();
                state.phase = AuthPhase::Unauthenticated;
                state.loading = false;
                tracing::debug!("logout succeeded");
                Ok(())
            }
            Err(error) => {
                let mut state = self.state.write().await;
                state.phase = if state.session.authenticated {
                    AuthPhase::Authenticated
                } else {
                    AuthPhase::Unauthenticated
                };
                state.error = Some(error.clone());
                state.loading = false;
                Err(error)
            }
        }
    }

    /// Reconcile the session with the server's reported status.
    ///
    /// Used opportunistically (by the navigation guard, among others), so it
    /// never raises: any failure, including a network failure, collapses into
    /// the unauthenticated state. Returns the resulting session snapshot.
    pub async fn check_auth(&self) -> Session {
        self.begin(AuthPhase::Checking).await;
        match self.client.check().await {
            Ok(check) => {
                let mut state = self.state.write().await;
                state.session = Session {
                    user: check.user,
                    authenticated: check.authenticated,
                };
                state.phase = if check.authenticated {
                    AuthPhase::Authenticated
                } else {
                    AuthPhase::Unauthenticated
                };
                state.loading = false;
                state.session.clone()
            }
            Err(error) => {
                tracing::debug!(category = error.category(), "auth check failed, treating as unauthenticated");
                let mut state = self.state.write().await;
                state.session = Session::default();
                state.phase = AuthPhase::Unauthenticated;
                state.error = Some(error);
                state.loading = false;
                state.session.clone()
            }
        }
    }

    /// Refresh the cached identity from the identity endpoint.
    ///
    /// Absence of an identity is treated as being unauthenticated: any
    /// failure clears the session. Failures are absorbed, not raised.
    pub async fn current_user(&self) -> Option<UserProfile> {
        self.begin(AuthPhase::Checking).await;
        match self.client.current_user().await {
            Ok(user) => {
                let mut state = self.state.write().await;
                state.session = Session {
                    user: Some(user.clone()),
                    authenticated: true,
                };
                state.phase = AuthPhase::Authenticated;
                state.loading = false;
                Some(user)
            }
            Err(error) => {
                let mut state = self.state.write().await;
                state.session = Session::default();
                state.phase = AuthPhase::Unauthenticated;
                state.error = Some(error);
                state.loading = false;
                None
            }
        }
    }

    /// Snapshot of the current session.
    pub async fn session(&self) -> Session {
        self.state.read().await.session.clone()
    }

    /// Current state-machine phase.
    pub async fn phase(&self) -> AuthPhase {
        self.state.read().await.phase
    }

    /// Whether an authentication operation is in flight.
    pub async fn is_loading(&self) -> bool {
        self.state.read().await.loading
    }

    /// Last recorded error, if any.
    pub async fn error(&self) -> Option<ApiError> {
        self.state.read().await.error.clone()
    }

    /// Whether an error is recorded. Recomputed on read.
    pub async fn has_error(&self) -> bool {
        self.state.read().await.error.is_some()
    }

    /// Clear the recorded error.
    pub async fn clear_error(&self) {
        self.state.write().await.error = None;
    }

    async fn begin(&self, phase: AuthPhase) {
        let mut state = self.state.write().await;
        state.phase = phase;
        state.loading = true;
        state.error = None;
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn profile(is_staff: bool) -> UserProfile {
        UserProfile {
            id: 1,
            username: "dispatcher".to_string(),
            email: String::new(),
            first_name: String::new(),
            last_name: String::new(),
            is_staff,
            is_superuser: false,
        }
    }

    #[test]
    fn test_session_is_admin_requires_user() {
        assert!(!Session::default().is_admin());

        let session = Session {
            user: Some(profile(false)),
            authenticated: true,
        };
        assert!(!session.is_admin());

        let session = Session {
            user: Some(profile(true)),
            authenticated: true,
        };
        assert!(session.is_admin());
    }

    #[test]
    fn test_default_phase_is_unknown() {
        assert_eq!(AuthPhase::default(), AuthPhase::Unknown);
    }
}
