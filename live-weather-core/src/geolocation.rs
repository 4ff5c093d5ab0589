use crate::{
    Config, Position, PositionOptions,
    geolocation::{fixed::FixedGeolocation, unsupported::NoGeolocation},
};
use async_trait::async_trait;
use std::fmt::Debug;

pub mod fixed;
pub mod unsupported;

/// Failure codes a geolocation backend may report.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum PositionErrorCode {
    PermissionDenied,
    PositionUnavailable,
    Timeout,
    Other(u16),
}

impl PositionErrorCode {
    /// Map the numeric codes used by web geolocation (1, 2, 3).
    pub fn from_code(code: u16) -> Self {
        match code {
            1 => PositionErrorCode::PermissionDenied,
            2 => PositionErrorCode::PositionUnavailable,
            3 => PositionErrorCode::Timeout,
            other => PositionErrorCode::Other(other),
        }
    }

    pub fn code(&self) -> u16 {
        match self {
            PositionErrorCode::PermissionDenied => 1,
            PositionErrorCode::PositionUnavailable => 2,
            PositionErrorCode::Timeout => 3,
            PositionErrorCode::Other(code) => *code,
        }
    }
}

/// Error reported by a backend. `message` is backend detail, not user text.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct PositionError {
    pub code: PositionErrorCode,
    pub message: String,
}

impl PositionError {
    pub fn new(code: PositionErrorCode, message: impl Into<String>) -> Self {
        Self { code, message: message.into() }
    }
}

/// A host capability that can produce a one-shot position fix.
#[async_trait]
pub trait Geolocation: Send + Sync + Debug {
    /// Whether the host offers geolocation at all.
    fn is_supported(&self) -> bool;

    async fn current_position(&self, options: &PositionOptions) -> Result<Position, PositionError>;
}

/// Construct the geolocation backend described by config: a fixed position
/// when one is configured, otherwise none.
pub fn geolocation_from_config(config: &Config) -> Box<dyn Geolocation> {
    match config.position {
        Some(ref pos) => Box::new(FixedGeolocation::from(pos)),
        None => Box::new(NoGeolocation),
    }
}
