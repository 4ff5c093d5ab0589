//! Host UI surfaces the live-location button talks to.
//!
//! A browser page, a terminal or a test double can all sit behind these.

use std::sync::Arc;

use crate::notify::Toast;

/// A clickable control with a text label.
pub trait Button: Send + Sync {
    fn label(&self) -> String;
    fn set_label(&self, label: &str);
    fn set_disabled(&self, disabled: bool);
    fn is_disabled(&self) -> bool;
    /// Hover text explaining the control's state.
    fn set_title(&self, title: &str);
}

/// Element that holds transient notifications.
pub trait ToastContainer: Send + Sync {
    fn append(&self, toast: &Toast);
    fn remove(&self, id: u64);
}

/// The document a binding lives in.
pub trait Page: Send + Sync {
    fn button(&self, id: &str) -> Option<Arc<dyn Button>>;

    /// `None` when the page has no notification area.
    fn toast_container(&self) -> Option<Arc<dyn ToastContainer>>;

    /// Blocking, synchronous message box.
    fn alert(&self, message: &str);
}
