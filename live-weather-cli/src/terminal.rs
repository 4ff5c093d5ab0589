//! Terminal rendition of the page a live-location button lives on.

use std::sync::Arc;

use live_weather_core::{
    Severity, Toast,
    ui::{Button, Page, ToastContainer},
};
use parking_lot::Mutex;

pub const BUTTON_ID: &str = "live-location";

/// Status line standing in for a button.
pub struct TerminalButton {
    label: Mutex<String>,
    disabled: Mutex<bool>,
}

impl TerminalButton {
    pub fn new(label: &str) -> Self {
        Self { label: Mutex::new(label.to_string()), disabled: Mutex::new(false) }
    }
}

impl Button for TerminalButton {
    fn label(&self) -> String {
        self.label.lock().clone()
    }

    fn set_label(&self, label: &str) {
        *self.label.lock() = label.to_string();
        if *self.disabled.lock() {
            eprintln!("[{label}]");
        }
    }

    fn set_disabled(&self, disabled: bool) {
        *self.disabled.lock() = disabled;
    }

    fn is_disabled(&self) -> bool {
        *self.disabled.lock()
    }

    fn set_title(&self, title: &str) {
        eprintln!("({} unavailable: {title})", self.label.lock());
    }
}

/// Prints toasts to stderr, one line each.
pub struct TerminalToasts;

impl ToastContainer for TerminalToasts {
    fn append(&self, toast: &Toast) {
        let tag = match toast.severity {
            Severity::Info => "info",
            Severity::Success => "ok",
            Severity::Warning => "warn",
            Severity::Danger => "error",
        };
        eprintln!("{tag:>5}: {}", toast.message);
    }

    fn remove(&self, id: u64) {
        tracing::trace!(id, "toast dismissed");
    }
}

pub struct TerminalPage {
    button: Arc<TerminalButton>,
    toasts: Option<Arc<TerminalToasts>>,
}

impl TerminalPage {
    /// `toasts = false` makes every notification go through `alert`.
    pub fn new(button_label: &str, toasts: bool) -> Self {
        Self {
            button: Arc::new(TerminalButton::new(button_label)),
            toasts: toasts.then(|| Arc::new(TerminalToasts)),
        }
    }
}

impl Page for TerminalPage {
    fn button(&self, id: &str) -> Option<Arc<dyn Button>> {
        (id == BUTTON_ID).then(|| self.button.clone() as Arc<dyn Button>)
    }

    fn toast_container(&self) -> Option<Arc<dyn ToastContainer>> {
        self.toasts.clone().map(|t| t as Arc<dyn ToastContainer>)
    }

    fn alert(&self, message: &str) {
        println!("{message}");
    }
}
