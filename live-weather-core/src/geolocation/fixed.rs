use async_trait::async_trait;
use chrono::Utc;

use crate::{Coordinates, Position, PositionOptions, config::PositionConfig};

use super::{Geolocation, PositionError, PositionErrorCode};

/// Accuracy reported for fixed positions when none is configured.
pub const DEFAULT_FIXED_ACCURACY_METERS: f64 = 100.0;

/// Backend that always reports the same, operator-supplied position.
///
/// Every query yields a freshly timestamped fix, so it satisfies a zero
/// `maximum_age`.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct FixedGeolocation {
    coords: Coordinates,
}

impl FixedGeolocation {
    pub fn new(latitude: f64, longitude: f64, accuracy_meters: f64) -> Self {
        Self { coords: Coordinates { latitude, longitude, accuracy_meters } }
    }

    fn validate(&self) -> Result<(), PositionError> {
        let Coordinates { latitude, longitude, accuracy_meters } = self.coords;

        if !(-90.0..=90.0).contains(&latitude) || !(-180.0..=180.0).contains(&longitude) {
            return Err(PositionError::new(
                PositionErrorCode::PositionUnavailable,
                format!("configured position ({latitude}, {longitude}) is out of range"),
            ));
        }
        if !accuracy_meters.is_finite() || accuracy_meters < 0.0 {
            return Err(PositionError::new(
                PositionErrorCode::PositionUnavailable,
                format!("configured accuracy {accuracy_meters} is invalid"),
            ));
        }
        Ok(())
    }
}

impl From<&PositionConfig> for FixedGeolocation {
    fn from(cfg: &PositionConfig) -> Self {
        Self::new(
            cfg.latitude,
            cfg.longitude,
            cfg.accuracy_meters.unwrap_or(DEFAULT_FIXED_ACCURACY_METERS),
        )
    }
}

#[async_trait]
impl Geolocation for FixedGeolocation {
    fn is_supported(&self) -> bool {
        true
    }

    async fn current_position(&self, _options: &PositionOptions) -> Result<Position, PositionError> {
        self.validate()?;
        Ok(Position { coords: self.coords, timestamp: Utc::now() })
    }
}
