//! Keyframe Core (engine-agnostic)
//!
//! Timed transform snapshots ("keyframes") tagged with one of 32 easing
//! curves, collected in a time-ordered [`Track`] that resolves a query time
//! into a single interpolated [`Transform`].
//!
//! The crate does no rendering and owns no playback clock: callers mutate a
//! track and ask it for samples.

pub mod config;
pub mod easing;
pub mod error;
pub mod ids;
pub mod keyframe;
pub mod persist;
pub mod sampling;
pub mod shared;
pub mod track;
pub mod value;

// Re-exports for consumers (adapters)
pub use config::Config;
pub use easing::{ease_lerp, easing_by_name, easing_fn, EasingFn, EasingMode, EASING_COUNT};
pub use error::KeyframeError;
pub use ids::KeyframeId;
pub use keyframe::Keyframe;
pub use persist::{keyframes_from_json, keyframes_to_json};
pub use sampling::{sample_keyframes, Bracket};
pub use shared::SharedTrack;
pub use track::{TimeChanged, Track};
pub use value::{Lerp, Transform, Vector3, Vector4};

/// Keyframe core result type
pub type Result<T> = core::result::Result<T, KeyframeError>;
