//! Wire types for the dispatch console REST API.
//!
//! Records returned by the backend are treated as opaque beyond the fields the
//! client actually depends on: the identifiers, the privilege flags, and the
//! pagination envelope. Everything else is carried through a flattened map so
//! that server-side additions survive a round trip unchanged.

use serde::{Deserialize, Serialize};
use serde_json::{Map, Value};

// ═══════════════════════════════════════════════════════════════════════
// Authentication
// ═══════════════════════════════════════════════════════════════════════

/// Login credentials.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct Credentials {
    /// Username or email address.
    pub username: String,
    /// Plain-text password, sent over the credentialed transport only.
    pub password: String,
}

impl Credentials {
    /// Create credentials from a username/password pair.
    #[must_use]
    pub fn new(username: impl Into<String>, password: impl Into<String>) -> Self {
        Self {
            username: username.into(),
            password: password.into(),
        }
    }
}

/// Profile of the authenticated user, as reported by the auth endpoints.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct UserProfile {
    /// Backend user identifier.
    pub id: i64,
    /// Login name.
    pub username: String,
    /// Email address.
    #[serde(default)]
    pub email: String,
    /// Given name.
    #[serde(default)]
    pub first_name: String,
    /// Family name.
    #[serde(default)]
    pub last_name: String,
    /// Staff privilege flag.
    #[serde(default)]
    pub is_staff: bool,
    /// Superuser privilege flag.
    #[serde(default)]
    pub is_superuser: bool,
}

impl UserProfile {
    /// Whether this user has administrative capability.
    ///
    /// Derived on read from the privilege flags; never cached.
    #[must_use]
    pub const fn is_admin(&self) -> bool {
        self.is_staff || self.is_superuser
    }
}

/// Response body of a successful login.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct LoginResponse {
    /// The authenticated user's profile.
    pub user: UserProfile,
    /// Human-readable confirmation from the server, if any.
    #[serde(default)]
    pub message: Option<String>,
}

/// Response body of the authentication probe endpoint.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct AuthCheck {
    /// Whether the server considers the session authenticated.
    pub authenticated: bool,
    /// The session's user, present only when authenticated.
    #[serde(default)]
    pub user: Option<UserProfile>,
}

// ═══════════════════════════════════════════════════════════════════════
// Rides
// ═══════════════════════════════════════════════════════════════════════

/// A ride record.
///
/// Only the identifier is interpreted by the client; all other fields are
/// opaque payload passed through unchanged.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct RideRecord {
    /// Unique ride identifier.
    pub id_ride: i64,
    /// Remaining fields, passed through untouched.
    #[serde(flatten)]
    pub fields: Map<String, Value>,
}

/// A rider/driver record from the user management endpoints.
///
/// Like [`RideRecord`], opaque beyond its identifier.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct UserRecord {
    /// Unique user identifier.
    pub id_user: i64,
    /// Remaining fields, passed through untouched.
    #[serde(flatten)]
    pub fields: Map<String, Value>,
}

/// Paginated list envelope returned by collection endpoints.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Page<T> {
    /// Records on the current page.
    #[serde(default = "Vec::new")]
    pub results: Vec<T>,
    /// Total number of records across all pages.
    #[serde(default)]
    pub count: u64,
}

/// Ride lifecycle status.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "kebab-case")]
pub enum RideStatus {
    /// Driver is on the way to the pickup point.
    EnRoute,
    /// Rider is being picked up.
    Pickup,
    /// Rider is being dropped off.
    Dropoff,
}

impl RideStatus {
    /// Wire representation of the status.
    #[must_use]
    pub const fn as_str(self) -> &'static str {
        match self {
            Self::EnRoute => "en-route",
            Self::Pickup => "pickup",
            Self::Dropoff => "dropoff",
        }
    }
}

impl std::fmt::Display for RideStatus {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.write_str(self.as_str())
    }
}

/// Sort order for ride listings.
///
/// Rendered as the conventional `ordering` query parameter: the field name,
/// prefixed with `-` when descending.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct Ordering {
    /// Field to sort by.
    pub field: String,
    /// Whether to sort descending.
    pub descending: bool,
}

impl Ordering {
    /// Ascending order on the given field.
    #[must_use]
    pub fn ascending(field: impl Into<String>) -> Self {
        Self {
            field: field.into(),
            descending: false,
        }
    }

    /// Descending order on the given field.
    #[must_use]
    pub fn descending(field: impl Into<String>) -> Self {
        Self {
            field: field.into(),
            descending: true,
        }
    }

    /// Render the `ordering` query parameter value.
    #[must_use]
    pub fn to_query(&self) -> String {
        if self.descending {
            format!("-{}", self.field)
        } else {
            self.field.clone()
        }
    }
}

impl Default for Ordering {
    /// Newest rides first.
    fn default() -> Self {
        Self::descending("pickup_time")
    }
}

/// Persisted filter state for the ride collection.
///
/// Empty and absent fields are omitted from outgoing requests, never sent as
/// empty strings.
#[derive(Debug, Clone, PartialEq, Default, Serialize, Deserialize)]
pub struct FilterSet {
    /// Filter by ride status.
    pub status: Option<RideStatus>,
    /// Filter by rider email (substring match on the backend).
    pub rider_email: Option<String>,
    /// Sort order.
    pub ordering: Ordering,
    /// GPS latitude for distance-based sorting.
    pub latitude: Option<f64>,
    /// GPS longitude for distance-based sorting.
    pub longitude: Option<f64>,
}

/// Per-call overrides for a ride listing request.
///
/// Each populated field takes precedence over the corresponding persisted
/// filter; an explicitly empty string masks the persisted value entirely.
#[derive(Debug, Clone, PartialEq, Default)]
pub struct RideListOverrides {
    /// Override the page number.
    pub page: Option<u32>,
    /// Override the status filter.
    pub status: Option<RideStatus>,
    /// Override the rider email filter (empty string masks it).
    pub rider_email: Option<String>,
    /// Override the sort order.
    pub ordering: Option<Ordering>,
    /// Override the latitude.
    pub latitude: Option<f64>,
    /// Override the longitude.
    pub longitude: Option<f64>,
}
