//! Error taxonomy for live-location requests.

use thiserror::Error;

/// Message used when the server rejects a request without saying why.
pub const DEFAULT_REJECTION_MESSAGE: &str = "Failed to fetch weather";

/// Fieldless discriminant of [`LiveLocationError`].
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum ErrorKind {
    Unsupported,
    PermissionDenied,
    PositionUnavailable,
    Timeout,
    Unknown,
    ServerRejected,
    Transport,
}

impl ErrorKind {
    pub fn as_str(&self) -> &'static str {
        match self {
            ErrorKind::Unsupported => "unsupported",
            ErrorKind::PermissionDenied => "permission_denied",
            ErrorKind::PositionUnavailable => "position_unavailable",
            ErrorKind::Timeout => "timeout",
            ErrorKind::Unknown => "unknown",
            ErrorKind::ServerRejected => "server_rejected",
            ErrorKind::Transport => "transport",
        }
    }

    /// Whether the failure happened while acquiring a fix.
    pub fn is_location(&self) -> bool {
        !matches!(self, ErrorKind::ServerRejected | ErrorKind::Transport)
    }
}

impl std::fmt::Display for ErrorKind {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.write_str(self.as_str())
    }
}

/// Terminal failure of a live-location request. `Display` is the text shown
/// to the user.
#[derive(Debug, Clone, PartialEq, Eq, Error)]
pub enum LiveLocationError {
    #[error("Geolocation is not supported on this device")]
    Unsupported,

    #[error("Location permission denied. Please enable location access.")]
    PermissionDenied,

    #[error("Location information unavailable.")]
    PositionUnavailable,

    #[error("Location request timed out.")]
    Timeout,

    #[error("Unable to get location")]
    Unknown,

    #[error("{0}")]
    ServerRejected(String),

    #[error("{0}")]
    Transport(String),
}

impl LiveLocationError {
    pub fn kind(&self) -> ErrorKind {
        match self {
            Self::Unsupported => ErrorKind::Unsupported,
            Self::PermissionDenied => ErrorKind::PermissionDenied,
            Self::PositionUnavailable => ErrorKind::PositionUnavailable,
            Self::Timeout => ErrorKind::Timeout,
            Self::Unknown => ErrorKind::Unknown,
            Self::ServerRejected(_) => ErrorKind::ServerRejected,
            Self::Transport(_) => ErrorKind::Transport,
        }
    }

    /// Build a rejection from the server's optional `message` field.
    pub fn rejected(message: Option<String>) -> Self {
        let message = message
            .filter(|m| !m.is_empty())
            .unwrap_or_else(|| DEFAULT_REJECTION_MESSAGE.to_string());
        Self::ServerRejected(message)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn rejected_defaults_missing_message() {
        let err = LiveLocationError::rejected(None);
        assert_eq!(err.to_string(), DEFAULT_REJECTION_MESSAGE);
        assert_eq!(err.kind(), ErrorKind::ServerRejected);
    }

    #[test]
    fn rejected_defaults_empty_message() {
        let err = LiveLocationError::rejected(Some(String::new()));
        assert_eq!(err.to_string(), DEFAULT_REJECTION_MESSAGE);
    }

    #[test]
    fn rejected_keeps_server_message() {
        let err = LiveLocationError::rejected(Some("no data".into()));
        assert_eq!(err, LiveLocationError::ServerRejected("no data".into()));
        assert_eq!(err.to_string(), "no data");
    }

    #[test]
    fn location_errors_are_classified() {
        assert!(LiveLocationError::Timeout.kind().is_location());
        assert!(LiveLocationError::Unsupported.kind().is_location());
        assert!(!LiveLocationError::Transport("down".into()).kind().is_location());
        assert!(!ErrorKind::ServerRejected.is_location());
    }

    #[test]
    fn kind_names_are_snake_case() {
        assert_eq!(ErrorKind::PermissionDenied.to_string(), "permission_denied");
        assert_eq!(LiveLocationError::Unknown.kind().as_str(), "unknown");
    }
}
