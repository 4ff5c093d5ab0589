use std::{
    sync::{
        Arc,
        atomic::{AtomicBool, AtomicU64, Ordering},
    },
    time::Duration,
};

use crate::ui::{Page, ToastContainer};

pub const DEFAULT_AUTOHIDE: Duration = Duration::from_millis(5_000);

static NEXT_TOAST_ID: AtomicU64 = AtomicU64::new(1);

#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Default)]
pub enum Severity {
    #[default]
    Info,
    Success,
    Warning,
    Danger,
}

impl Severity {
    pub fn as_str(&self) -> &'static str {
        match self {
            Severity::Info => "info",
            Severity::Success => "success",
            Severity::Warning => "warning",
            Severity::Danger => "danger",
        }
    }
}

impl std::fmt::Display for Severity {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.write_str(self.as_str())
    }
}

#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Toast {
    pub id: u64,
    pub message: String,
    pub severity: Severity,
}

/// Shows messages as toasts when the page has a container, as alerts
/// otherwise.
pub struct Notifier {
    page: Arc<dyn Page>,
    autohide: Option<Duration>,
}

impl Notifier {
    pub fn new(page: Arc<dyn Page>) -> Self {
        Self { page, autohide: Some(DEFAULT_AUTOHIDE) }
    }

    /// `None` keeps toasts up until dismissed by hand.
    pub fn with_autohide(mut self, autohide: Option<Duration>) -> Self {
        self.autohide = autohide;
        self
    }

    /// Display `message`. Returns a handle only when a toast was created;
    /// the alert fallback has nothing to dismiss.
    ///
    /// Autohide needs a tokio runtime; outside one the toast stays until
    /// dismissed.
    pub fn show(&self, message: &str, severity: Severity) -> Option<ToastHandle> {
        let Some(container) = self.page.toast_container() else {
            tracing::debug!(%severity, "no toast container, falling back to alert");
            self.page.alert(message);
            return None;
        };

        let toast = Toast {
            id: NEXT_TOAST_ID.fetch_add(1, Ordering::Relaxed),
            message: message.to_string(),
            severity,
        };
        container.append(&toast);

        let handle = ToastHandle {
            state: Arc::new(ToastState { id: toast.id, container, dismissed: AtomicBool::new(false) }),
        };

        if let Some(delay) = self.autohide
            && let Ok(rt) = tokio::runtime::Handle::try_current()
        {
            let handle = handle.clone();
            rt.spawn(async move {
                tokio::time::sleep(delay).await;
                handle.dismiss();
            });
        }

        Some(handle)
    }
}

struct ToastState {
    id: u64,
    container: Arc<dyn ToastContainer>,
    dismissed: AtomicBool,
}

/// A displayed toast. Cloning shares the same toast.
#[derive(Clone)]
pub struct ToastHandle {
    state: Arc<ToastState>,
}

impl ToastHandle {
    pub fn id(&self) -> u64 {
        self.state.id
    }

    pub fn is_dismissed(&self) -> bool {
        self.state.dismissed.load(Ordering::Acquire)
    }

    /// Remove the toast from its container. Only the first call has an
    /// effect; returns whether this call removed it.
    pub fn dismiss(&self) -> bool {
        if self.state.dismissed.swap(true, Ordering::AcqRel) {
            return false;
        }
        self.state.container.remove(self.state.id);
        true
    }
}

impl std::fmt::Debug for ToastHandle {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("ToastHandle")
            .field("id", &self.state.id)
            .field("dismissed", &self.is_dismissed())
            .finish()
    }
}
