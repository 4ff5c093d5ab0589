use std::time::Duration;

use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};
use serde_json::Value;

use crate::error::{ErrorKind, LiveLocationError};

/// A single resolved fix, as handed back to callers.
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub struct Coordinates {
    pub latitude: f64,
    pub longitude: f64,
    pub accuracy_meters: f64,
}

/// Raw reading reported by a geolocation backend.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct Position {
    pub coords: Coordinates,
    pub timestamp: DateTime<Utc>,
}

/// Options passed to the backend for a one-shot position query.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct PositionOptions {
    pub enable_high_accuracy: bool,
    pub timeout: Duration,
    /// Oldest cached fix the backend may return; zero forces a fresh one.
    pub maximum_age: Duration,
}

impl PositionOptions {
    pub const LIVE_TIMEOUT: Duration = Duration::from_millis(10_000);

    /// High accuracy, 10 s timeout, no cached fixes.
    pub const fn live() -> Self {
        Self {
            enable_high_accuracy: true,
            timeout: Self::LIVE_TIMEOUT,
            maximum_age: Duration::ZERO,
        }
    }
}

impl Default for PositionOptions {
    fn default() -> Self {
        Self::live()
    }
}

/// Last coordinates seen by a client. Overwritten on every successful fix.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct LastKnown {
    pub latitude: f64,
    pub longitude: f64,
}

/// Body of `POST /irrigation/weather/live`.
#[derive(Debug, Clone, Serialize)]
pub struct LiveWeatherRequest {
    pub latitude: f64,
    pub longitude: f64,
}

impl From<&Coordinates> for LiveWeatherRequest {
    fn from(coords: &Coordinates) -> Self {
        Self { latitude: coords.latitude, longitude: coords.longitude }
    }
}

/// Envelope returned by the live weather endpoint.
///
/// Fields stay as raw JSON; a body that is not an object reads as an empty
/// envelope, which is a rejection.
#[derive(Debug, Clone, Default, PartialEq)]
pub struct LiveWeatherResponse {
    pub success: Value,
    pub weather: Value,
    pub message: Value,
}

impl LiveWeatherResponse {
    pub fn from_json(mut body: Value) -> Self {
        match body.as_object_mut() {
            Some(obj) => Self {
                success: obj.remove("success").unwrap_or_default(),
                weather: obj.remove("weather").unwrap_or_default(),
                message: obj.remove("message").unwrap_or_default(),
            },
            None => Self::default(),
        }
    }

    pub fn is_success(&self) -> bool {
        is_truthy(&self.success)
    }

    /// The server's explanation, if it gave a usable one.
    pub fn message(&self) -> Option<String> {
        match &self.message {
            Value::String(s) if !s.is_empty() => Some(s.clone()),
            Value::String(_) => None,
            other if is_truthy(other) => Some(other.to_string()),
            _ => None,
        }
    }
}

/// JSON truthiness: `false`, `null`, `0` and `""` are falsy.
pub(crate) fn is_truthy(value: &Value) -> bool {
    match value {
        Value::Null => false,
        Value::Bool(b) => *b,
        Value::Number(n) => n.as_f64().is_some_and(|f| f != 0.0 && !f.is_nan()),
        Value::String(s) => !s.is_empty(),
        Value::Array(_) | Value::Object(_) => true,
    }
}

/// Server-defined weather payload, passed through untouched.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(transparent)]
pub struct WeatherResult(pub Value);

impl WeatherResult {
    pub fn city(&self) -> Option<&str> {
        self.0.get("city").and_then(Value::as_str)
    }

    pub fn as_json(&self) -> &Value {
        &self.0
    }
}

/// Result of one user-initiated request.
#[derive(Debug, Clone, PartialEq)]
pub enum RequestOutcome {
    Success(WeatherResult),
    Failure(ErrorKind, String),
}

impl From<Result<WeatherResult, LiveLocationError>> for RequestOutcome {
    fn from(result: Result<WeatherResult, LiveLocationError>) -> Self {
        match result {
            Ok(weather) => Self::Success(weather),
            Err(err) => Self::Failure(err.kind(), err.to_string()),
        }
    }
}
