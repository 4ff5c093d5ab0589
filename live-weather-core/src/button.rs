//! "Use my location" button: wires a page button to a [`LocationClient`].

use std::{sync::Arc, time::Duration};

use crate::{
    LiveLocationError, LocationClient, RequestOutcome, WeatherResult,
    notify::{Notifier, Severity},
    ui::{Button, Page},
};

pub const LOADING_LABEL: &str = "Getting location...";
pub const UNSUPPORTED_TITLE: &str = "Geolocation is not supported on this device";
/// Shown in the success toast when the server's payload has no city.
pub const UNKNOWN_CITY: &str = "unknown location";

pub type SuccessCallback = Box<dyn Fn(&WeatherResult) + Send + Sync>;
pub type ErrorCallback = Box<dyn Fn(&LiveLocationError) + Send + Sync>;

pub struct LiveLocationButton {
    button: Arc<dyn Button>,
    client: Arc<LocationClient>,
    notifier: Notifier,
    on_success: Option<SuccessCallback>,
    on_error: Option<ErrorCallback>,
    active: bool,
}

impl LiveLocationButton {
    /// Bind the button `button_id` on `page`. Returns `None` if the page has
    /// no such button.
    ///
    /// When the client has no geolocation support the button is disabled
    /// for good and clicks do nothing.
    pub fn bind(
        page: Arc<dyn Page>,
        button_id: &str,
        client: Arc<LocationClient>,
        on_success: Option<SuccessCallback>,
        on_error: Option<ErrorCallback>,
    ) -> Option<Self> {
        let Some(button) = page.button(button_id) else {
            tracing::debug!(button_id, "live location button not found");
            return None;
        };

        let active = client.is_supported();
        if !active {
            button.set_disabled(true);
            button.set_title(UNSUPPORTED_TITLE);
        }

        Some(Self { button, client, notifier: Notifier::new(page), on_success, on_error, active })
    }

    pub fn with_toast_autohide(mut self, autohide: Option<Duration>) -> Self {
        self.notifier = self.notifier.with_autohide(autohide);
        self
    }

    /// Whether clicks are handled.
    pub fn is_active(&self) -> bool {
        self.active
    }

    /// Handle one click. `None` when the binding is inert.
    ///
    /// The button's label and enabled state are restored on every exit,
    /// including a panicking callback or the future being dropped.
    pub async fn click(&self) -> Option<RequestOutcome> {
        if !self.active {
            return None;
        }

        let _restore = RestoreButton::engage(self.button.as_ref());

        let result = self.client.fetch_weather_by_location().await;

        match &result {
            Ok(weather) => {
                if let Some(on_success) = &self.on_success {
                    on_success(weather);
                }
                let city = weather.city().unwrap_or(UNKNOWN_CITY);
                self.notifier.show(&format!("Location detected: {city}"), Severity::Success);
            }
            Err(err) => {
                tracing::warn!(kind = %err.kind(), "live location error: {err}");
                if let Some(on_error) = &self.on_error {
                    on_error(err);
                }
                self.notifier.show(&err.to_string(), Severity::Danger);
            }
        }

        Some(RequestOutcome::from(result))
    }
}

/// Puts the button in its loading state; puts it back on drop.
struct RestoreButton<'a> {
    button: &'a dyn Button,
    label: String,
}

impl<'a> RestoreButton<'a> {
    fn engage(button: &'a dyn Button) -> Self {
        let label = button.label();
        button.set_disabled(true);
        button.set_label(LOADING_LABEL);
        Self { button, label }
    }
}

impl Drop for RestoreButton<'_> {
    fn drop(&mut self) {
        self.button.set_disabled(false);
        self.button.set_label(&self.label);
    }
}
