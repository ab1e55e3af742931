//! UI signal store.
//!
//! Ephemeral, non-authoritative notification state: one active toast and a
//! sidebar visibility flag. No history is kept: a new toast pre-empts any
//! in-flight auto-hide for the prior one ("last shown wins"). The auto-hide
//! is an explicit cancellable task: replacing a toast aborts the previous
//! task, and a generation counter fences out any abort race.

use std::sync::Arc;
use std::time::Duration;
use tokio::sync::RwLock;
use tokio::task::JoinHandle;

/// Severity of a toast notification.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub enum ToastSeverity {
    /// Neutral information.
    #[default]
    Info,
    /// A completed action.
    Success,
    /// A recoverable problem.
    Warning,
    /// A failed action.
    Error,
}

impl ToastSeverity {
    /// Default auto-hide duration for this severity.
    #[must_use]
    pub const fn default_duration(self) -> Duration {
        match self {
            Self::Info | Self::Success => Duration::from_millis(3000),
            Self::Warning => Duration::from_millis(4000),
            Self::Error => Duration::from_millis(5000),
        }
    }
}

/// The single active toast descriptor.
#[derive(Debug, Clone, PartialEq, Default)]
pub struct Toast {
    /// Whether the toast is currently shown.
    pub visible: bool,
    /// Message text.
    pub message: String,
    /// Severity, driving presentation and default duration.
    pub severity: ToastSeverity,
}

#[derive(Debug, Default)]
struct UiState {
    sidebar_open: bool,
    toast: Toast,
    generation: u64,
    hide_task: Option<JoinHandle<()>>,
}

/// Store owning transient UI state.
///
/// Constructed once per application session; clones share the same state.
#[derive(Debug, Clone, Default)]
pub struct UiStore {
    state: Arc<RwLock<UiState>>,
}

impl UiStore {
    /// Create an empty UI store.
    #[must_use]
    pub fn new() -> Self {
        Self::default()
    }

    /// Show a toast, replacing any currently active one.
    ///
    /// Schedules an auto-hide after `duration` unless `duration` is zero, in
    /// which case the toast persists until [`UiStore::hide_toast`]. The
    /// previous toast's auto-hide task is aborted, not raced.
    pub async fn show_toast(
        &self,
        message: impl Into<String>,
        severity: ToastSeverity,
        duration: Duration,
    ) {
        let mut state = self.state.write().await;
        if let Some(task) = state.hide_task.take() {
            task.abort();
        }
        state.generation += 1;
        state.toast = Toast {
            visible: true,
            message: message.into(),
            severity,
        };
        if !duration.is_zero() {
            let generation = state.generation;
            let shared = Arc::clone(&self.state);
            state.hide_task = Some(tokio::spawn(async move {
                tokio::time::sleep(duration).await;
                let mut state = shared.write().await;
                // A newer toast owns the slot now; leave it alone.
                if state.generation == generation {
                    state.toast.visible = false;
                }
            }));
        }
    }

    /// Show a success toast with the default 3 s duration.
    pub async fn show_success(&self, message: impl Into<String>) {
        let severity = ToastSeverity::Success;
        self.show_toast(message, severity, severity.default_duration())
            .await;
    }

    /// Show an error toast with the default 5 s duration.
    pub async fn show_error(&self, message: impl Into<String>) {
        let severity = ToastSeverity::Error;
        self.show_toast(message, severity, severity.default_duration())
            .await;
    }

    /// Show a warning toast with the default 4 s duration.
    pub async fn show_warning(&self, message: impl Into<String>) {
        let severity = ToastSeverity::Warning;
        self.show_toast(message, severity, severity.default_duration())
            .await;
    }

    /// Show an info toast with the default 3 s duration.
    pub async fn show_info(&self, message: impl Into<String>) {
        let severity = ToastSeverity::Info;
        self.show_toast(message, severity, severity.default_duration())
            .await;
    }

    /// Manually dismiss the active toast and cancel its auto-hide.
    pub async fn hide_toast(&self) {
        let mut state = self.state.write().await;
        if let Some(task) = state.hide_task.take() {
            task.abort();
        }
        state.generation += 1;
        state.toast.visible = false;
    }

    /// Snapshot of the active toast.
    pub async fn toast(&self) -> Toast {
        self.state.read().await.toast.clone()
    }

    /// Toggle the sidebar.
    pub async fn toggle_sidebar(&self) {
        let mut state = self.state.write().await;
        state.sidebar_open = !state.sidebar_open;
    }

    /// Open the sidebar.
    pub async fn open_sidebar(&self) {
        self.state.write().await.sidebar_open = true;
    }

    /// Close the sidebar.
    pub async fn close_sidebar(&self) {
        self.state.write().await.sidebar_open = false;
    }

    /// Whether the sidebar is open.
    pub async fn sidebar_open(&self) -> bool {
        self.state.read().await.sidebar_open
    }
}
