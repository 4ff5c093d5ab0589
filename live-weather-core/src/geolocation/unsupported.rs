use async_trait::async_trait;

use crate::{Position, PositionOptions};

use super::{Geolocation, PositionError, PositionErrorCode};

/// Host without any geolocation capability.
#[derive(Debug, Clone, Copy, Default)]
pub struct NoGeolocation;

#[async_trait]
impl Geolocation for NoGeolocation {
    fn is_supported(&self) -> bool {
        false
    }

    async fn current_position(&self, _options: &PositionOptions) -> Result<Position, PositionError> {
        Err(PositionError::new(
            PositionErrorCode::PositionUnavailable,
            "no geolocation capability on this host",
        ))
    }
}
