//! Ride collection store.
//!
//! Server-authoritative pagination and filtering with local reconciliation on
//! writes: nothing is inserted, replaced, or removed until the server has
//! confirmed the mutation, and replacements always use the server's canonical
//! record rather than the request body.

use dispatch_console_api::{
    ApiError, FilterSet, Ordering, Page, Result, RideClient, RideListOverrides, RideRecord,
    RideStatus,
};
use serde_json::Value;
use std::collections::BTreeMap;
use std::sync::Arc;
use tokio::sync::RwLock;

/// Fixed page size of the backend's list endpoints.
///
/// Must match the server's pagination setting exactly; a mismatch is a
/// contract bug, not something to special-case here.
pub const PAGE_SIZE: u64 = 10;

/// Snapshot view of the collection state.
#[derive(Debug, Clone, PartialEq)]
pub struct RideCollection {
    /// Records of the most recent successful fetch.
    pub items: Vec<RideRecord>,
    /// Current page position (1-based).
    pub page: u32,
    /// Total pages, derived from `total_items` and [`PAGE_SIZE`].
    pub total_pages: u64,
    /// Total records across all pages, as reported by the server.
    pub total_items: u64,
    /// Persisted filter state.
    pub filters: FilterSet,
}

/// A single filter field change.
///
/// Routing every change through one type keeps the page-reset rule in one
/// place: any filter change invalidates the current page position.
#[derive(Debug, Clone, PartialEq)]
pub enum FilterUpdate {
    /// Set or clear the status filter.
    Status(Option<RideStatus>),
    /// Set or clear the rider email filter.
    RiderEmail(Option<String>),
    /// Replace the sort order.
    Ordering(Ordering),
    /// Set or clear the latitude used for distance sorting.
    Latitude(Option<f64>),
    /// Set or clear the longitude used for distance sorting.
    Longitude(Option<f64>),
}

#[derive(Debug)]
struct RideState {
    rides: Vec<RideRecord>,
    current_ride: Option<RideRecord>,
    page: u32,
    total_pages: u64,
    total_items: u64,
    filters: FilterSet,
    loading: bool,
    error: Option<ApiError>,
}

impl Default for RideState {
    fn default() -> Self {
        Self {
            rides: Vec::new(),
            current_ride: None,
            page: 1,
            total_pages: 1,
            total_items: 0,
            filters: FilterSet::default(),
            loading: false,
            error: None,
        }
    }
}

/// Store owning the paginated, filtered ride collection.
///
/// Constructed once per application session; clones share the same state.
/// Overlapping fetches are not fenced: whichever response resolves last wins,
/// a documented limitation carried over from the source contract.
#[derive(Debug, Clone)]
pub struct RideStore {
    client: RideClient,
    state: Arc<RwLock<RideState>>,
}

impl RideStore {
    /// Create a store over the given ride client.
    #[must_use]
    pub fn new(client: RideClient) -> Self {
        Self {
            client,
            state: Arc::new(RwLock::new(RideState::default())),
        }
    }

    /// Fetch the collection for the current `(page, filters)` pair.
    ///
    /// Query parameters are merged in increasing precedence: the current
    /// page, the persisted filters, then `overrides`. Empty and absent values
    /// are never sent. On success the items and totals are replaced
    /// wholesale; on failure the previous items stay untouched and the error
    /// is recorded and re-raised.
    ///
    /// # Errors
    ///
    /// Returns the normalized [`ApiError`] of the list call.
    pub async fn fetch_rides(&self, overrides: &RideListOverrides) -> Result<Page<RideRecord>> {
        let query = {
            let state = self.state.read().await;
            build_query(state.page, &state.filters, overrides)
        };
        self.begin().await;
        match self.client.list(&query).await {
            Ok(page) => {
                let mut state = self.state.write().await;
                state.rides = page.results.clone();
                state.total_items = page.count;
                state.total_pages = total_pages_for(page.count);
                state.loading = false;
                tracing::debug!(count = page.count, "ride collection replaced");
                Ok(page)
            }
            Err(error) => self.fail(error).await,
        }
    }

    /// Fetch a single ride into the "current ride" slot.
    ///
    /// Independent from the collection: the slot is populated even when the
    /// record is not on the current page.
    ///
    /// # Errors
    ///
    /// Returns the normalized [`ApiError`] of the retrieve call.
    pub async fn fetch_ride_by_id(&self, id: i64) -> Result<RideRecord> {
        self.begin().await;
        match self.client.retrieve(id).await {
            Ok(ride) => {
                let mut state = self.state.write().await;
                state.current_ride = Some(ride.clone());
                state.loading = false;
                Ok(ride)
            }
            Err(error) => self.fail(error).await,
        }
    }

    /// Create a ride.
    ///
    /// The confirmed record is prepended to the collection; nothing is
    /// mutated speculatively, so a failure needs no rollback.
    ///
    /// # Errors
    ///
    /// Returns the normalized [`ApiError`] of the create call.
    pub async fn create_ride(&self, data: &Value) -> Result<RideRecord> {
        self.begin().await;
        match self.client.create(data).await {
            Ok(ride) => {
                let mut state = self.state.write().await;
                state.rides.insert(0, ride.clone());
                state.loading = false;
                tracing::debug!(id_ride = ride.id_ride, "ride created");
                Ok(ride)
            }
            Err(error) => self.fail(error).await,
        }
    }

    /// Replace a ride.
    ///
    /// On success the matching collection entry and the "current ride" slot
    /// (if it matches) are replaced with the server's returned canonical
    /// record, not the request body, so server-computed fields never drift.
    ///
    /// # Errors
    ///
    /// Returns the normalized [`ApiError`] of the update call.
    pub async fn update_ride(&self, id: i64, data: &Value) -> Result<RideRecord> {
        self.begin().await;
        match self.client.update(id, data).await {
            Ok(ride) => {
                let mut state = self.state.write().await;
                Self::reconcile(&mut state, id, ride.clone());
                state.loading = false;
                Ok(ride)
            }
            Err(error) => self.fail(error).await,
        }
    }

    /// Partially update a ride, with the same reconciliation as
    /// [`RideStore::update_ride`].
    ///
    /// # Errors
    ///
    /// Returns the normalized [`ApiError`] of the patch call.
    pub async fn patch_ride(&self, id: i64, data: &Value) -> Result<RideRecord> {
        self.begin().await;
        match self.client.partial_update(id, data).await {
            Ok(ride) => {
                let mut state = self.state.write().await;
                Self::reconcile(&mut state, id, ride.clone());
                state.loading = false;
                Ok(ride)
            }
            Err(error) => self.fail(error).await,
        }
    }

    /// Delete a ride.
    ///
    /// On success the matching entry is removed from the collection and the
    /// "current ride" slot is cleared if it pointed at the deleted record.
    ///
    /// # Errors
    ///
    /// Returns the normalized [`ApiError`] of the delete call.
    pub async fn delete_ride(&self, id: i64) -> Result<()> {
        self.begin().await;
        match self.client.delete(id).await {
            Ok(()) => {
                let mut state = self.state.write().await;
                state.rides.retain(|ride| ride.id_ride != id);
                if state
                    .current_ride
                    .as_ref()
                    .is_some_and(|ride| ride.id_ride == id)
                {
                    state.current_ride = None;
                }
                state.loading = false;
                tracing::debug!(id_ride = id, "ride deleted");
                Ok(())
            }
            Err(error) => self.fail(error).await,
        }
    }

    /// Set the current page without fetching; the fetch is caller-initiated.
    pub async fn set_page(&self, page: u32) {
        self.state.write().await.page = page;
    }

    /// Apply a single filter change and reset the page position to 1.
    pub async fn set_filter(&self, update: FilterUpdate) {
        let mut state = self.state.write().await;
        match update {
            FilterUpdate::Status(status) => state.filters.status = status,
            FilterUpdate::RiderEmail(email) => state.filters.rider_email = email,
            FilterUpdate::Ordering(ordering) => state.filters.ordering = ordering,
            FilterUpdate::Latitude(latitude) => state.filters.latitude = latitude,
            FilterUpdate::Longitude(longitude) => state.filters.longitude = longitude,
        }
        state.page = 1;
    }

    /// Reset all filters to their defaults (newest first) and the page to 1.
    pub async fn clear_filters(&self) {
        let mut state = self.state.write().await;
        state.filters = FilterSet::default();
        state.page = 1;
    }

    /// Snapshot of the collection state.
    pub async fn snapshot(&self) -> RideCollection {
        let state = self.state.read().await;
        RideCollection {
            items: state.rides.clone(),
            page: state.page,
            total_pages: state.total_pages,
            total_items: state.total_items,
            filters: state.filters.clone(),
        }
    }

    /// Records of the most recent successful fetch.
    pub async fn rides(&self) -> Vec<RideRecord> {
        self.state.read().await.rides.clone()
    }

    /// The singular "current ride" slot.
    pub async fn current_ride(&self) -> Option<RideRecord> {
        self.state.read().await.current_ride.clone()
    }

    /// Whether the collection holds any records. Recomputed on read.
    pub async fn has_rides(&self) -> bool {
        !self.state.read().await.rides.is_empty()
    }

    /// Whether a collection operation is in flight.
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

    async fn begin(&self) {
        let mut state = self.state.write().await;
        state.loading = true;
        state.error = None;
    }

    /// Record an error, clear the loading flag, and re-raise.
    async fn fail<T>(&self, error: ApiError) -> Result<T> {
        let mut state = self.state.write().await;
        state.error = Some(error.clone());
        state.loading = false;
        Err(error)
    }

    fn reconcile(state: &mut RideState, id: i64, ride: RideRecord) {
        if let Some(entry) = state.rides.iter_mut().find(|entry| entry.id_ride == id) {
            *entry = ride.clone();
        }
        if state
            .current_ride
            .as_ref()
            .is_some_and(|current| current.id_ride == id)
        {
            state.current_ride = Some(ride);
        }
    }
}

/// Total pages for a collection of `count` records at the fixed page size.
#[must_use]
pub const fn total_pages_for(count: u64) -> u64 {
    count.div_ceil(PAGE_SIZE)
}

/// Merge the current page, persisted filters, and per-call overrides into
/// outgoing query parameters.
///
/// Precedence increases left to right; empty strings and absent values are
/// stripped, and an explicitly empty override masks the persisted filter.
fn build_query(
    page: u32,
    filters: &FilterSet,
    overrides: &RideListOverrides,
) -> Vec<(String, String)> {
    let mut params: BTreeMap<&'static str, String> = BTreeMap::new();
    params.insert("page", page.to_string());

    if let Some(status) = filters.status {
        params.insert("status", status.as_str().to_string());
    }
    if let Some(email) = &filters.rider_email {
        if !email.is_empty() {
            params.insert("rider_email", email.clone());
        }
    }
    if !filters.ordering.field.is_empty() {
        params.insert("ordering", filters.ordering.to_query());
    }
    if let Some(latitude) = filters.latitude {
        params.insert("latitude", latitude.to_string());
    }
    if let Some(longitude) = filters.longitude {
        params.insert("longitude", longitude.to_string());
    }

    if let Some(page) = overrides.page {
        params.insert("page", page.to_string());
    }
    if let Some(status) = overrides.status {
        params.insert("status", status.as_str().to_string());
    }
    if let Some(email) = &overrides.rider_email {
        params.remove("rider_email");
        if !email.is_empty() {
            params.insert("rider_email", email.clone());
        }
    }
    if let Some(ordering) = &overrides.ordering {
        params.remove("ordering");
        if !ordering.field.is_empty() {
            params.insert("ordering", ordering.to_query());
        }
    }
    if let Some(latitude) = overrides.latitude {
        params.insert("latitude", latitude.to_string());
    }
    if let Some(longitude) = overrides.longitude {
        params.insert("longitude", longitude.to_string());
    }

    params
        .into_iter()
        .map(|(key, value)| (key.to_string(), value))
        .collect()
}
