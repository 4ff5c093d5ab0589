//! Location client: acquire a fix, then ask the irrigation server for the
//! weather at that fix.

use anyhow::{Context, Result};
use parking_lot::Mutex;
use reqwest::{
    Client, Url,
    header::{CONTENT_TYPE, COOKIE},
};
use serde_json::Value;

use crate::{
    Config, Coordinates, LastKnown, LiveLocationError, LiveWeatherRequest, LiveWeatherResponse,
    PositionOptions, WeatherResult,
    geolocation::{Geolocation, PositionError, PositionErrorCode, geolocation_from_config},
};

/// Path of the live weather endpoint, relative to the server origin.
pub const LIVE_WEATHER_PATH: &str = "/irrigation/weather/live";

#[derive(Debug)]
pub struct LocationClient {
    geolocation: Box<dyn Geolocation>,
    http: Client,
    endpoint: Url,
    session_cookie: Option<String>,
    last_known: Mutex<Option<LastKnown>>,
}

impl LocationClient {
    pub fn new(server_url: Url, geolocation: Box<dyn Geolocation>) -> Result<Self> {
        let endpoint = server_url
            .join(LIVE_WEATHER_PATH)
            .with_context(|| format!("Cannot build weather endpoint from '{server_url}'"))?;

        Ok(Self {
            geolocation,
            http: Client::new(),
            endpoint,
            session_cookie: None,
            last_known: Mutex::new(None),
        })
    }

    /// Construct a client from config: server origin, session cookie and
    /// geolocation backend.
    pub fn from_config(config: &Config) -> Result<Self> {
        let client = Self::new(config.server_url()?, geolocation_from_config(config))?;
        Ok(client.with_session_cookie(config.session_cookie.clone()))
    }

    pub fn with_session_cookie(mut self, cookie: Option<String>) -> Self {
        self.session_cookie = cookie.filter(|c| !c.is_empty());
        self
    }

    pub fn endpoint(&self) -> &Url {
        &self.endpoint
    }

    pub fn is_supported(&self) -> bool {
        self.geolocation.is_supported()
    }

    /// Coordinates of the most recent successful fix, if any.
    pub fn last_known(&self) -> Option<LastKnown> {
        *self.last_known.lock()
    }

    /// Request a fresh high-accuracy fix, waiting at most 10 seconds.
    pub async fn current_coordinates(&self) -> Result<Coordinates, LiveLocationError> {
        if !self.is_supported() {
            tracing::warn!("geolocation requested on a host without support");
            return Err(LiveLocationError::Unsupported);
        }

        let options = PositionOptions::live();
        let query = self.geolocation.current_position(&options);

        let position = match tokio::time::timeout(options.timeout, query).await {
            Ok(Ok(position)) => position,
            Ok(Err(err)) => {
                tracing::debug!(code = err.code.code(), detail = %err.message, "geolocation failed");
                return Err(position_error_to_live(&err));
            }
            Err(_) => {
                tracing::debug!(timeout_ms = options.timeout.as_millis() as u64, "geolocation timed out");
                return Err(LiveLocationError::Timeout);
            }
        };

        let coords = position.coords;
        *self.last_known.lock() =
            Some(LastKnown { latitude: coords.latitude, longitude: coords.longitude });

        tracing::info!(
            latitude = coords.latitude,
            longitude = coords.longitude,
            accuracy_m = coords.accuracy_meters,
            taken_at = %position.timestamp,
            "resolved location",
        );

        Ok(coords)
    }

    /// Acquire a fix, then fetch the live weather for it.
    pub async fn fetch_weather_by_location(&self) -> Result<WeatherResult, LiveLocationError> {
        let coords = self.current_coordinates().await?;
        self.fetch_weather_at(&coords).await
    }

    /// POST the given coordinates to the live weather endpoint.
    ///
    /// The HTTP status is not consulted: the server reports failures inside
    /// the JSON envelope.
    pub async fn fetch_weather_at(
        &self,
        coords: &Coordinates,
    ) -> Result<WeatherResult, LiveLocationError> {
        let body = LiveWeatherRequest::from(coords);

        let mut request = self
            .http
            .post(self.endpoint.clone())
            .header(CONTENT_TYPE, "application/json")
            .json(&body);

        if let Some(cookie) = &self.session_cookie {
            request = request.header(COOKIE, cookie);
        }

        tracing::debug!(endpoint = %self.endpoint, ?body, "requesting live weather");

        let res = request.send().await.map_err(|e| {
            LiveLocationError::Transport(format!("Failed to send request to weather endpoint: {e}"))
        })?;

        let status = res.status();
        let text = res.text().await.map_err(|e| {
            LiveLocationError::Transport(format!("Failed to read weather response body: {e}"))
        })?;

        let json: Value = serde_json::from_str(&text).map_err(|e| {
            LiveLocationError::Transport(format!(
                "Malformed weather response (status {status}): {e}"
            ))
        })?;

        let envelope = LiveWeatherResponse::from_json(json);

        if !envelope.is_success() {
            let err = LiveLocationError::rejected(envelope.message());
            tracing::warn!(%status, reason = %err, "weather request rejected by server");
            return Err(err);
        }

        tracing::debug!(%status, "live weather received");
        Ok(WeatherResult(envelope.weather))
    }
}

fn position_error_to_live(err: &PositionError) -> LiveLocationError {
    match err.code {
        PositionErrorCode::PermissionDenied => LiveLocationError::PermissionDenied,
        PositionErrorCode::PositionUnavailable => LiveLocationError::PositionUnavailable,
        PositionErrorCode::Timeout => LiveLocationError::Timeout,
        PositionErrorCode::Other(_) => LiveLocationError::Unknown,
    }
}
