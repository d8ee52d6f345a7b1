use crate::KeyframeError;
use serde::{Deserialize, Serialize};
use uuid::Uuid;

/// Unique identifier for a keyframe
///
/// Ids live only in memory; the persisted keyframe format does not carry them.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub struct KeyframeId(Uuid);

impl KeyframeId {
    /// Generate a new keyframe ID
    #[inline]
    pub fn new() -> Self {
        Self(Uuid::new_v4())
    }

    /// Create a keyframe ID from a UUID string
    ///
    /// Malformed input is a [`KeyframeError::Serialization`] error; whether the
    /// id belongs to a track is only known on lookup.
    #[inline]
    pub fn from_string(id: impl AsRef<str>) -> Result<Self, KeyframeError> {
        Uuid::parse_str(id.as_ref())
            .map(Self)
            .map_err(|err| KeyframeError::Serialization {
                reason: format!("invalid keyframe id '{}': {err}", id.as_ref()),
            })
    }

    /// Get the underlying UUID
    #[inline]
    pub fn uuid(&self) -> Uuid {
        self.0
    }
}

impl Default for KeyframeId {
    fn default() -> Self {
        Self::new()
    }
}

impl From<Uuid> for KeyframeId {
    #[inline]
    fn from(uuid: Uuid) -> Self {
        Self(uuid)
    }
}

impl std::fmt::Display for KeyframeId {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        write!(f, "{}", self.0)
    }
}
