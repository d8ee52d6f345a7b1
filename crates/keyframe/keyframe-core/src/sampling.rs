//! Bracket resolution and blending over time-sorted keyframes.
//!
//! Model:
//! - Keyframes are sorted by ascending time (equal times keep insertion order).
//! - Before the first keyframe and after the last one the boundary transform
//!   is returned unchanged; there is no extrapolation.
//! - Inside the range the segment `[a, b]` with `a.time <= t < b.time` is
//!   located by binary search, its raw progress is remapped by `a.mode`
//!   (the earlier keyframe owns its outgoing segment) and every transform
//!   component is blended with an unclamped lerp.

use crate::keyframe::Keyframe;
use crate::value::{Lerp, Transform};
use crate::KeyframeError;
use log::trace;

/// Segment selected for a query time.
///
/// `start == end` when the query was clamped to a boundary keyframe.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct Bracket {
    pub start: usize,
    pub end: usize,
    /// Raw (un-eased) progress through the segment.
    pub progress: f32,
}

impl Bracket {
    #[inline]
    fn at(idx: usize) -> Self {
        Self {
            start: idx,
            end: idx,
            progress: 0.0,
        }
    }

    #[inline]
    pub fn is_boundary(&self) -> bool {
        self.start == self.end
    }
}

/// Raw progress of `t` through `[t0, t1]`.
///
/// A zero-length segment yields `1.0`, i.e. the later keyframe wins.
/// Evaluated in `f64` so spans wider than `f32::MAX` stay finite.
#[inline]
pub fn segment_progress(t0: f32, t1: f32, t: f32) -> f32 {
    if t1 == t0 {
        1.0
    } else {
        let (t0, t1, t) = (f64::from(t0), f64::from(t1), f64::from(t));
        ((t - t0) / (t1 - t0)) as f32
    }
}

/// Locate the keyframes surrounding `t`.
pub fn find_bracket(keyframes: &[Keyframe], t: f32) -> Result<Bracket, KeyframeError> {
    let (first, last) = match (keyframes.first(), keyframes.last()) {
        (Some(first), Some(last)) => (first, last),
        _ => return Err(KeyframeError::EmptyTrack),
    };
    if t.is_nan() {
        return Err(KeyframeError::InvalidTime { time: t });
    }

    let n = keyframes.len();
    if n == 1 {
        return Ok(Bracket::at(0));
    }
    // Checked before the lower bound so that keyframes sharing the final time
    // resolve to the later one.
    if t >= last.time() {
        return Ok(Bracket::at(n - 1));
    }
    if t <= first.time() {
        return Ok(Bracket::at(0));
    }

    // first.time < t < last.time, so 1 <= end <= n - 1.
    let end = keyframes.partition_point(|k| k.time() <= t);
    let start = end - 1;
    let progress = segment_progress(keyframes[start].time(), keyframes[end].time(), t);
    trace!(
        "bracket: t={} -> [{}, {}] progress={}",
        t,
        start,
        end,
        progress
    );
    Ok(Bracket {
        start,
        end,
        progress,
    })
}

/// Blend `a -> b` by `a`'s easing curve applied to `progress`.
///
/// The eased factor is not clamped, so overshooting curves overshoot.
#[inline]
pub fn blend(a: &Keyframe, b: &Keyframe, progress: f32) -> Transform {
    let eased = a.mode.apply(progress);
    a.transform.lerp_unclamped(&b.transform, eased)
}

/// Sample time-sorted keyframes at `t`.
pub fn sample_keyframes(keyframes: &[Keyframe], t: f32) -> Result<Transform, KeyframeError> {
    let bracket = find_bracket(keyframes, t)?;
    if bracket.is_boundary() {
        return Ok(keyframes[bracket.start].transform);
    }
    Ok(blend(
        &keyframes[bracket.start],
        &keyframes[bracket.end],
        bracket.progress,
    ))
}
