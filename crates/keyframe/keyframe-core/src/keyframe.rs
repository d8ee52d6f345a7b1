use crate::easing::EasingMode;
use crate::ids::KeyframeId;
use crate::value::{Transform, Vector3, Vector4};
use crate::KeyframeError;
use serde::{Deserialize, Serialize};
use std::cmp::Ordering;

/// A timed transform snapshot plus the easing curve of the segment leaving it.
///
/// Keyframes are ordered (and compared) by `time` only; transform and easing
/// mode do not take part. Use [`Keyframe::same_content`] for a field-wise check.
#[derive(Debug, Clone, Copy, Serialize, Deserialize)]
pub struct Keyframe {
    /// Runtime identity, not persisted.
    #[serde(skip)]
    id: KeyframeId,
    /// Seconds; negative times are legal.
    #[serde(default)]
    pub(crate) time: f32,
    #[serde(flatten)]
    pub transform: Transform,
    #[serde(rename = "mode", default)]
    pub mode: EasingMode,
}

impl Keyframe {
    /// Create a keyframe with explicit fields.
    #[inline]
    pub fn new(time: f32, transform: Transform, mode: EasingMode) -> Self {
        Self {
            id: KeyframeId::new(),
            time,
            transform,
            mode,
        }
    }

    /// Create a keyframe from a raw easing tag, rejecting tags outside the table.
    pub fn with_tag(time: f32, transform: Transform, tag: i64) -> Result<Self, KeyframeError> {
        Ok(Self::new(time, transform, EasingMode::from_tag(tag)?))
    }

    /// Zero position and rotation, unit scale, opaque white, linear easing.
    #[inline]
    pub fn empty(time: f32) -> Self {
        Self::new(time, Transform::empty(), EasingMode::Linear)
    }

    #[inline]
    pub fn id(&self) -> KeyframeId {
        self.id
    }

    /// Time of this keyframe.
    ///
    /// Time is only writable before insertion or through
    /// [`Track::set_time`](crate::Track::set_time), which keeps the track sorted.
    #[inline]
    pub fn time(&self) -> f32 {
        self.time
    }

    #[inline]
    pub fn with_time(mut self, time: f32) -> Self {
        self.time = time;
        self
    }

    #[inline]
    pub fn with_position(mut self, position: Vector3) -> Self {
        self.transform.position = position;
        self
    }

    #[inline]
    pub fn with_rotation(mut self, rotation: Vector3) -> Self {
        self.transform.rotation = rotation;
        self
    }

    #[inline]
    pub fn with_scale(mut self, scale: Vector3) -> Self {
        self.transform.scale = scale;
        self
    }

    #[inline]
    pub fn with_color(mut self, color: Vector4) -> Self {
        self.transform.color = color;
        self
    }

    #[inline]
    pub fn with_mode(mut self, mode: EasingMode) -> Self {
        self.mode = mode;
        self
    }

    /// Set the easing mode from a raw tag. On error the mode is left unchanged.
    pub fn set_mode_tag(&mut self, tag: i64) -> Result<(), KeyframeError> {
        self.mode = EasingMode::from_tag(tag)?;
        Ok(())
    }

    /// Field-wise equality of time, transform and mode (ids ignored).
    pub fn same_content(&self, other: &Keyframe) -> bool {
        self.time == other.time && self.transform == other.transform && self.mode == other.mode
    }

    /// Fresh id, same content.
    pub(crate) fn reissue_id(mut self) -> Self {
        self.id = KeyframeId::new();
        self
    }
}

impl Default for Keyframe {
    fn default() -> Self {
        Self::empty(0.0)
    }
}

impl PartialEq for Keyframe {
    fn eq(&self, other: &Self) -> bool {
        self.cmp(other) == Ordering::Equal
    }
}

impl Eq for Keyframe {}

impl PartialOrd for Keyframe {
    fn partial_cmp(&self, other: &Self) -> Option<Ordering> {
        Some(self.cmp(other))
    }
}

impl Ord for Keyframe {
    fn cmp(&self, other: &Self) -> Ordering {
        // `+ 0.0` folds -0.0 into 0.0 so this agrees with the track's `<=`.
        (self.time + 0.0).total_cmp(&(other.time + 0.0))
    }
}
