//! Core library for the `live-weather` client.
//!
//! This crate defines:
//! - The location client: one-shot geolocation, then a POST of the fix to the
//!   irrigation server's live weather endpoint
//! - Abstraction over geolocation backends and host UI surfaces
//! - The "use my location" button binding and notification display
//! - Configuration on disk
//!
//! It is used by `live-weather-cli`, but any host that can implement the
//! [`ui`] traits can drive it.

pub mod button;
pub mod client;
pub mod config;
pub mod error;
pub mod geolocation;
pub mod model;
pub mod notify;
pub mod ui;

pub use button::LiveLocationButton;
pub use client::LocationClient;
pub use config::{Config, PositionConfig};
pub use error::{ErrorKind, LiveLocationError};
pub use geolocation::{Geolocation, PositionError, PositionErrorCode};
pub use model::{
    Coordinates, LastKnown, LiveWeatherRequest, LiveWeatherResponse, Position, PositionOptions,
    RequestOutcome, WeatherResult,
};
pub use notify::{Notifier, Severity, Toast, ToastHandle};
