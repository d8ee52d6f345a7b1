//! Error types for keyframe tracks and easing lookups

use serde::{Deserialize, Serialize};

/// Error type for keyframe and track operations
#[derive(thiserror::Error, Debug, Clone, PartialEq, Serialize, Deserialize)]
#[non_exhaustive]
pub enum KeyframeError {
    /// Easing tag outside the easing table
    #[error("Unknown easing tag: {tag} (expected 0..=31)")]
    InvalidEasingTag { tag: i64 },

    /// Easing name not present in the easing table
    #[error("Unknown easing name: {name}")]
    UnknownEasingName { name: String },

    /// Sample requested on a track without keyframes
    #[error("Cannot sample an empty track")]
    EmptyTrack,

    /// Keyframe not present in the track
    #[error("Keyframe not found: {id}")]
    KeyframeNotFound { id: String },

    /// Keyframe time that cannot be ordered (NaN or infinite)
    #[error("Invalid keyframe time: {time}")]
    InvalidTime { time: f32 },

    /// Serialization error
    #[error("Serialization error: {reason}")]
    Serialization { reason: String },

    /// A writer panicked while holding a shared track
    #[error("Shared track lock poisoned")]
    LockPoisoned,
}

impl KeyframeError {
    /// Get error category for logging
    #[inline]
    pub fn category(&self) -> &'static str {
        match self {
            Self::InvalidEasingTag { .. } | Self::UnknownEasingName { .. } => "easing",
            Self::EmptyTrack | Self::KeyframeNotFound { .. } => "track",
            Self::InvalidTime { .. } => "validation",
            Self::Serialization { .. } => "serialization",
            Self::LockPoisoned => "concurrency",
        }
    }
}

impl From<serde_json::Error> for KeyframeError {
    fn from(err: serde_json::Error) -> Self {
        Self::Serialization {
            reason: err.to_string(),
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_error_messages() {
        let err = KeyframeError::InvalidEasingTag { tag: 32 };
        assert_eq!(err.to_string(), "Unknown easing tag: 32 (expected 0..=31)");
        assert_eq!(
            KeyframeError::EmptyTrack.to_string(),
            "Cannot sample an empty track"
        );
    }

    #[test]
    fn test_error_categories() {
        assert_eq!(KeyframeError::InvalidEasingTag { tag: -1 }.category(), "easing");
        assert_eq!(KeyframeError::EmptyTrack.category(), "track");
        assert_eq!(KeyframeError::InvalidTime { time: f32::NAN }.category(), "validation");
    }

    #[test]
    fn test_from_serde_json() {
        let err: KeyframeError = serde_json::from_str::<u8>("\"x\"").unwrap_err().into();
        assert!(matches!(err, KeyframeError::Serialization { .. }));
    }

    #[test]
    fn test_serialization() {
        let error = KeyframeError::KeyframeNotFound {
            id: "abc".to_string(),
        };
        let serialized = serde_json::to_string(&error).unwrap();
        let deserialized: KeyframeError = serde_json::from_str(&serialized).unwrap();
        assert_eq!(error, deserialized);
    }
}
