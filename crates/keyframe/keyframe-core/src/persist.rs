//! Persisted keyframe lists.
//!
//! A list is a JSON array with one record per keyframe:
//!
//! ```json
//! [{"time":0.0,
//!   "position":{"x":0.0,"y":0.0,"z":0.0},
//!   "rotation":{"x":0.0,"y":0.0,"z":0.0},
//!   "scale":{"x":1.0,"y":1.0,"z":1.0},
//!   "color":{"x":1.0,"y":1.0,"z":1.0,"w":1.0},
//!   "mode":1}]
//! ```
//!
//! Record order is kept as is in both directions; nothing here sorts.
//! Missing fields fall back to [`Keyframe::empty`] values, and a `mode`
//! outside the easing table fails the whole list.

use crate::keyframe::Keyframe;
use crate::KeyframeError;

/// Serialize keyframes in the given order.
///
/// JSON has no encoding for NaN or infinity, so a non-finite time fails with
/// [`KeyframeError::InvalidTime`] instead of being written as `null`.
pub fn keyframes_to_json(keyframes: &[Keyframe]) -> Result<String, KeyframeError> {
    if let Some(bad) = keyframes.iter().find(|k| !k.time().is_finite()) {
        return Err(KeyframeError::InvalidTime { time: bad.time() });
    }
    Ok(serde_json::to_string(keyframes)?)
}

/// Deserialize keyframes, preserving record order. Each keyframe gets a new id.
pub fn keyframes_from_json(json: &str) -> Result<Vec<Keyframe>, KeyframeError> {
    Ok(serde_json::from_str(json)?)
}
