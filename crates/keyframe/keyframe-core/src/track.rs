use crate::config::Config;
use crate::easing::EasingMode;
use crate::ids::KeyframeId;
use crate::keyframe::Keyframe;
use crate::persist::{keyframes_from_json, keyframes_to_json};
use crate::sampling::{find_bracket, sample_keyframes, Bracket};
use crate::value::Transform;
use crate::KeyframeError;
use log::{debug, trace};
use std::fmt;

/// Notification sent after [`Track::set_time`] has moved a keyframe.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct TimeChanged {
    pub id: KeyframeId,
    pub old_time: f32,
    pub new_time: f32,
    /// Position of the keyframe after re-sorting.
    pub index: usize,
}

type TimeListener = Box<dyn FnMut(&TimeChanged) + Send + Sync>;

/// A time-ordered sequence of keyframes.
///
/// Keyframes are kept sorted by ascending time; keyframes sharing a time stay
/// in insertion order. Times can only change through [`Track::set_time`], so
/// [`Track::sample`] never observes an unsorted sequence.
pub struct Track {
    keyframes: Vec<Keyframe>,
    default_easing: EasingMode,
    listener: Option<TimeListener>,
}

#[inline]
fn check_time(time: f32) -> Result<(), KeyframeError> {
    if time.is_finite() {
        Ok(())
    } else {
        Err(KeyframeError::InvalidTime { time })
    }
}

impl Track {
    /// Create a new empty track
    #[inline]
    pub fn new() -> Self {
        Self::with_config(&Config::default())
    }

    #[inline]
    pub fn with_config(config: &Config) -> Self {
        Self {
            keyframes: Vec::with_capacity(config.keyframe_capacity),
            default_easing: config.default_easing,
            listener: None,
        }
    }

    /// Build a track from keyframes in any order.
    ///
    /// The sort is stable, so keyframes sharing a time keep their given order.
    pub fn from_keyframes(keyframes: Vec<Keyframe>) -> Result<Self, KeyframeError> {
        let mut track = Self::new();
        track.keyframes.reserve(keyframes.len());
        for kf in keyframes {
            track.insert(kf)?;
        }
        debug!("track loaded with {} keyframes", track.len());
        Ok(track)
    }

    /// Load a track from a persisted keyframe list.
    pub fn from_json(json: &str) -> Result<Self, KeyframeError> {
        Self::from_keyframes(keyframes_from_json(json)?)
    }

    /// Persist the keyframes in their current (sorted) order.
    pub fn to_json(&self) -> Result<String, KeyframeError> {
        keyframes_to_json(&self.keyframes)
    }

    /// Add a keyframe, placing it after any keyframes with the same time.
    ///
    /// Returns the id to use for later edits. A keyframe whose id is already
    /// present (e.g. a copy) is stored under a fresh id.
    pub fn insert(&mut self, keyframe: Keyframe) -> Result<KeyframeId, KeyframeError> {
        check_time(keyframe.time())?;
        let keyframe = if self.position(keyframe.id()).is_some() {
            keyframe.reissue_id()
        } else {
            keyframe
        };
        let idx = self.insertion_index(keyframe.time());
        self.keyframes.insert(idx, keyframe);
        trace!("insert keyframe {} at index {}", keyframe.id(), idx);
        Ok(keyframe.id())
    }

    /// Add an empty keyframe at `time` using the configured default easing.
    pub fn insert_empty(&mut self, time: f32) -> Result<KeyframeId, KeyframeError> {
        self.insert(Keyframe::empty(time).with_mode(self.default_easing))
    }

    /// Remove a keyframe by ID
    pub fn remove(&mut self, id: KeyframeId) -> Result<Keyframe, KeyframeError> {
        let pos = self.require(id)?;
        trace!("remove keyframe {} from index {}", id, pos);
        Ok(self.keyframes.remove(pos))
    }

    /// Move a keyframe to `new_time`, re-sort, then notify the time listener.
    ///
    /// The keyframe lands after any other keyframes already at `new_time`.
    pub fn set_time(&mut self, id: KeyframeId, new_time: f32) -> Result<(), KeyframeError> {
        check_time(new_time)?;
        let pos = self.require(id)?;
        let mut keyframe = self.keyframes.remove(pos);
        let old_time = keyframe.time;
        keyframe.time = new_time;
        let index = self.insertion_index(new_time);
        self.keyframes.insert(index, keyframe);
        debug!(
            "set_time: keyframe {} {} -> {} (index {} -> {})",
            id, old_time, new_time, pos, index
        );

        if let Some(listener) = self.listener.as_mut() {
            listener(&TimeChanged {
                id,
                old_time,
                new_time,
                index,
            });
        }
        Ok(())
    }

    pub fn set_mode(&mut self, id: KeyframeId, mode: EasingMode) -> Result<(), KeyframeError> {
        let pos = self.require(id)?;
        self.keyframes[pos].mode = mode;
        Ok(())
    }

    pub fn set_transform(
        &mut self,
        id: KeyframeId,
        transform: Transform,
    ) -> Result<(), KeyframeError> {
        let pos = self.require(id)?;
        self.keyframes[pos].transform = transform;
        Ok(())
    }

    /// Register the observer called after every successful [`Track::set_time`].
    pub fn set_time_listener<F>(&mut self, listener: F)
    where
        F: FnMut(&TimeChanged) + Send + Sync + 'static,
    {
        self.listener = Some(Box::new(listener));
    }

    pub fn clear_time_listener(&mut self) {
        self.listener = None;
    }

    #[inline]
    pub fn has_time_listener(&self) -> bool {
        self.listener.is_some()
    }

    /// Sample the track at `t`.
    ///
    /// Fails with [`KeyframeError::EmptyTrack`] when there are no keyframes.
    /// Outside the keyframe range the boundary transform is returned as is.
    pub fn sample(&self, t: f32) -> Result<Transform, KeyframeError> {
        sample_keyframes(&self.keyframes, t)
    }

    /// Segment that [`Track::sample`] would blend for `t`.
    pub fn bracket(&self, t: f32) -> Result<Bracket, KeyframeError> {
        find_bracket(&self.keyframes, t)
    }

    /// Get a keyframe by ID
    #[inline]
    pub fn get(&self, id: KeyframeId) -> Option<&Keyframe> {
        self.keyframes.iter().find(|k| k.id() == id)
    }

    /// Index of a keyframe in time order
    #[inline]
    pub fn position(&self, id: KeyframeId) -> Option<usize> {
        self.keyframes.iter().position(|k| k.id() == id)
    }

    #[inline]
    pub fn keyframes(&self) -> &[Keyframe] {
        &self.keyframes
    }

    #[inline]
    pub fn iter(&self) -> std::slice::Iter<'_, Keyframe> {
        self.keyframes.iter()
    }

    #[inline]
    pub fn len(&self) -> usize {
        self.keyframes.len()
    }

    #[inline]
    pub fn is_empty(&self) -> bool {
        self.keyframes.is_empty()
    }

    #[inline]
    pub fn first(&self) -> Option<&Keyframe> {
        self.keyframes.first()
    }

    #[inline]
    pub fn last(&self) -> Option<&Keyframe> {
        self.keyframes.last()
    }

    /// `(first.time, last.time)`, or `None` for an empty track.
    #[inline]
    pub fn time_range(&self) -> Option<(f32, f32)> {
        match (self.keyframes.first(), self.keyframes.last()) {
            (Some(first), Some(last)) => Some((first.time(), last.time())),
            _ => None,
        }
    }

    pub fn clear(&mut self) {
        self.keyframes.clear();
    }

    #[inline]
    fn insertion_index(&self, time: f32) -> usize {
        self.keyframes.partition_point(|k| k.time() <= time)
    }

    #[inline]
    fn require(&self, id: KeyframeId) -> Result<usize, KeyframeError> {
        self.position(id)
            .ok_or_else(|| KeyframeError::KeyframeNotFound { id: id.to_string() })
    }
}

impl Default for Track {
    fn default() -> Self {
        Self::new()
    }
}

impl fmt::Debug for Track {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("Track")
            .field("keyframes", &self.keyframes)
            .field("default_easing", &self.default_easing)
            .field("has_time_listener", &self.listener.is_some())
            .finish()
    }
}

impl<'a> IntoIterator for &'a Track {
    type Item = &'a Keyframe;
    type IntoIter = std::slice::Iter<'a, Keyframe>;

    fn into_iter(self) -> Self::IntoIter {
        self.keyframes.iter()
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::value::Vector3;
    use std::sync::{Arc, Mutex};

    fn kf(time: f32, x: f32) -> Keyframe {
        Keyframe::empty(time).with_position(Vector3::new(x, 0.0, 0.0))
    }

    fn times(track: &Track) -> Vec<f32> {
        track.iter().map(|k| k.time()).collect()
    }

    #[test]
    fn insert_keeps_time_order() {
        let mut track = Track::new();
        for t in [3.0, -1.0, 2.0, 0.0] {
            track.insert(Keyframe::empty(t)).unwrap();
        }
        assert_eq!(times(&track), vec![-1.0, 0.0, 2.0, 3.0]);
        assert_eq!(track.time_range(), Some((-1.0, 3.0)));
    }

    #[test]
    fn equal_times_keep_insertion_order() {
        let mut track = Track::new();
        let a = track.insert(kf(1.0, 1.0)).unwrap();
        let b = track.insert(kf(1.0, 2.0)).unwrap();
        let c = track.insert(kf(1.0, 3.0)).unwrap();
        let ids: Vec<_> = track.iter().map(|k| k.id()).collect();
        assert_eq!(ids, vec![a, b, c]);
    }

    #[test]
    fn insert_rejects_non_finite_time() {
        let mut track = Track::new();
        assert!(matches!(
            track.insert(Keyframe::empty(f32::NAN)),
            Err(KeyframeError::InvalidTime { .. })
        ));
        assert!(track.insert(Keyframe::empty(f32::INFINITY)).is_err());
        assert!(track.is_empty());
    }

    #[test]
    fn inserting_a_copy_gets_a_fresh_id() {
        let mut track = Track::new();
        let key = kf(0.0, 1.0);
        let a = track.insert(key).unwrap();
        let b = track.insert(key).unwrap();
        assert_ne!(a, b);
        assert_eq!(track.len(), 2);
    }

    #[test]
    fn remove_missing_is_not_found() {
        let mut track = Track::new();
        let id = track.insert(kf(0.0, 0.0)).unwrap();
        let removed = track.remove(id).unwrap();
        assert_eq!(removed.id(), id);
        assert!(matches!(
            track.remove(id),
            Err(KeyframeError::KeyframeNotFound { .. })
        ));
    }

    #[test]
    fn set_time_resorts_and_notifies() {
        let mut track = Track::new();
        let a = track.insert(kf(0.0, 0.0)).unwrap();
        track.insert(kf(1.0, 1.0)).unwrap();
        track.insert(kf(2.0, 2.0)).unwrap();

        let events = Arc::new(Mutex::new(Vec::new()));
        let sink = Arc::clone(&events);
        track.set_time_listener(move |ev| sink.lock().unwrap().push(*ev));

        track.set_time(a, 5.0).unwrap();
        assert_eq!(times(&track), vec![1.0, 2.0, 5.0]);
        assert_eq!(track.position(a), Some(2));

        let events = events.lock().unwrap();
        assert_eq!(
            *events,
            vec![TimeChanged {
                id: a,
                old_time: 0.0,
                new_time: 5.0,
                index: 2,
            }]
        );
    }

    #[test]
    fn set_time_lands_after_equal_times() {
        let mut track = Track::new();
        let a = track.insert(kf(0.0, 0.0)).unwrap();
        let b = track.insert(kf(3.0, 1.0)).unwrap();
        track.set_time(a, 3.0).unwrap();
        assert_eq!(track.position(b), Some(0));
        assert_eq!(track.position(a), Some(1));
    }

    #[test]
    fn failed_set_time_leaves_track_untouched() {
        let mut track = Track::new();
        let a = track.insert(kf(0.0, 0.0)).unwrap();
        let fired = Arc::new(Mutex::new(0));
        let counter = Arc::clone(&fired);
        track.set_time_listener(move |_| *counter.lock().unwrap() += 1);

        assert!(track.set_time(a, f32::NAN).is_err());
        assert!(track.set_time(KeyframeId::new(), 1.0).is_err());
        assert_eq!(times(&track), vec![0.0]);
        assert_eq!(*fired.lock().unwrap(), 0);
    }

    #[test]
    fn set_time_without_listener() {
        let mut track = Track::new();
        let a = track.insert(kf(0.0, 0.0)).unwrap();
        assert!(!track.has_time_listener());
        track.set_time(a, -4.0).unwrap();
        assert_eq!(track.get(a).unwrap().time(), -4.0);
    }

    #[test]
    fn update_mode_and_transform() {
        let mut track = Track::new();
        let a = track.insert(kf(0.0, 0.0)).unwrap();
        track.insert(kf(1.0, 10.0)).unwrap();
        track.set_mode(a, EasingMode::QuadraticEaseIn).unwrap();
        assert_eq!(track.sample(0.5).unwrap().position.x, 2.5);

        let moved = Transform::from_position(Vector3::new(4.0, 0.0, 0.0));
        track.set_transform(a, moved).unwrap();
        assert_eq!(track.sample(0.0).unwrap(), moved);
        assert!(track.set_mode(KeyframeId::new(), EasingMode::Linear).is_err());
    }

    #[test]
    fn insert_empty_uses_configured_easing() {
        let config = Config {
            default_easing: EasingMode::SineEaseOut,
            ..Config::default()
        };
        let mut track = Track::with_config(&config);
        let id = track.insert_empty(1.0).unwrap();
        assert_eq!(track.get(id).unwrap().mode, EasingMode::SineEaseOut);
    }

    #[test]
    fn from_keyframes_is_stable() {
        let keys = vec![kf(2.0, 0.0), kf(1.0, 1.0), kf(1.0, 2.0), kf(0.0, 3.0)];
        let track = Track::from_keyframes(keys).unwrap();
        let xs: Vec<f32> = track.iter().map(|k| k.transform.position.x).collect();
        assert_eq!(xs, vec![3.0, 1.0, 2.0, 0.0]);
    }

    #[test]
    fn clear_empties_the_track() {
        let mut track = Track::from_keyframes(vec![kf(0.0, 0.0), kf(1.0, 1.0)]).unwrap();
        track.clear();
        assert!(track.is_empty());
        assert_eq!(track.time_range(), None);
        assert_eq!(track.sample(0.0), Err(KeyframeError::EmptyTrack));
    }
}
