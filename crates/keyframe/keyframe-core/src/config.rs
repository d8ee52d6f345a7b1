//! Core configuration for keyframe-core.

use crate::easing::EasingMode;
use crate::KeyframeError;
use serde::{Deserialize, Serialize};

/// Configuration for new tracks.
/// Keep this minimal; expand as needed without breaking API.
#[derive(Clone, Debug, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct Config {
    /// Initial capacity hint for the keyframe buffer.
    pub keyframe_capacity: usize,
    /// Easing mode given to keyframes created by `Track::insert_empty`.
    pub default_easing: EasingMode,
}

impl Default for Config {
    fn default() -> Self {
        Self {
            keyframe_capacity: 16,
            default_easing: EasingMode::Linear,
        }
    }
}

impl Config {
    /// Parse a configuration; missing fields keep their defaults.
    pub fn from_json(json: &str) -> Result<Self, KeyframeError> {
        Ok(serde_json::from_str(json)?)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn partial_json_keeps_defaults() {
        let config = Config::from_json(r#"{"default_easing": 27}"#).unwrap();
        assert_eq!(config.default_easing, EasingMode::BackEaseOut);
        assert_eq!(config.keyframe_capacity, Config::default().keyframe_capacity);
    }

    #[test]
    fn invalid_easing_tag_is_rejected() {
        assert!(matches!(
            Config::from_json(r#"{"default_easing": 99}"#),
            Err(KeyframeError::Serialization { .. })
        ));
    }
}
