//! A track shared across threads.
//!
//! Samples take a read lock and may run concurrently; every mutation takes the
//! write lock, so writers are serialized against readers and each other.

use crate::easing::EasingMode;
use crate::ids::KeyframeId;
use crate::keyframe::Keyframe;
use crate::track::{TimeChanged, Track};
use crate::value::Transform;
use crate::KeyframeError;
use std::sync::{Arc, RwLock, RwLockReadGuard, RwLockWriteGuard};

/// Cloneable handle to a [`Track`] behind a read/write lock.
#[derive(Debug, Clone, Default)]
pub struct SharedTrack {
    inner: Arc<RwLock<Track>>,
}

impl SharedTrack {
    pub fn new(track: Track) -> Self {
        Self {
            inner: Arc::new(RwLock::new(track)),
        }
    }

    /// Shared read access; hold it only as long as needed.
    pub fn read(&self) -> Result<RwLockReadGuard<'_, Track>, KeyframeError> {
        self.inner.read().map_err(|_| KeyframeError::LockPoisoned)
    }

    /// Exclusive write access.
    pub fn write(&self) -> Result<RwLockWriteGuard<'_, Track>, KeyframeError> {
        self.inner.write().map_err(|_| KeyframeError::LockPoisoned)
    }

    pub fn sample(&self, t: f32) -> Result<Transform, KeyframeError> {
        self.read()?.sample(t)
    }

    pub fn insert(&self, keyframe: Keyframe) -> Result<KeyframeId, KeyframeError> {
        self.write()?.insert(keyframe)
    }

    pub fn remove(&self, id: KeyframeId) -> Result<Keyframe, KeyframeError> {
        self.write()?.remove(id)
    }

    pub fn set_time(&self, id: KeyframeId, new_time: f32) -> Result<(), KeyframeError> {
        self.write()?.set_time(id, new_time)
    }

    pub fn set_mode(&self, id: KeyframeId, mode: EasingMode) -> Result<(), KeyframeError> {
        self.write()?.set_mode(id, mode)
    }

    /// Install the time-change listener of the wrapped track.
    ///
    /// The listener runs inside [`SharedTrack::set_time`] while the write lock
    /// is held. It must not call back into this `SharedTrack` (or any clone of
    /// it): the lock is not reentrant and the call deadlocks. Forward the event
    /// instead, e.g. over a channel, and read the track once `set_time` returns.
    pub fn set_time_listener<F>(&self, listener: F) -> Result<(), KeyframeError>
    where
        F: FnMut(&TimeChanged) + Send + Sync + 'static,
    {
        self.write()?.set_time_listener(listener);
        Ok(())
    }

    pub fn len(&self) -> Result<usize, KeyframeError> {
        Ok(self.read()?.len())
    }

    pub fn is_empty(&self) -> Result<bool, KeyframeError> {
        Ok(self.read()?.is_empty())
    }
}

impl From<Track> for SharedTrack {
    fn from(track: Track) -> Self {
        Self::new(track)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::value::Vector3;
    use std::sync::{mpsc, Mutex};
    use std::thread;

    fn ramp() -> Track {
        let mut track = Track::new();
        track
            .insert(Keyframe::empty(0.0).with_position(Vector3::zero()))
            .unwrap();
        track
            .insert(Keyframe::empty(1.0).with_position(Vector3::new(10.0, 0.0, 0.0)))
            .unwrap();
        track
    }

    #[test]
    fn concurrent_readers_see_the_same_samples() {
        let shared = SharedTrack::new(ramp());
        let handles: Vec<_> = (0..4)
            .map(|_| {
                let track = shared.clone();
                thread::spawn(move || track.sample(0.5).unwrap().position.x)
            })
            .collect();
        for handle in handles {
            assert_eq!(handle.join().unwrap(), 5.0);
        }
    }

    #[test]
    fn writes_are_visible_to_later_reads() {
        let shared = SharedTrack::from(ramp());
        let writer = shared.clone();
        thread::spawn(move || {
            writer
                .insert(Keyframe::empty(2.0).with_position(Vector3::new(20.0, 0.0, 0.0)))
                .unwrap();
        })
        .join()
        .unwrap();
        assert_eq!(shared.len().unwrap(), 3);
        assert_eq!(shared.sample(1.5).unwrap().position.x, 15.0);
    }

    #[test]
    fn listener_forwards_events_outside_the_lock() {
        let shared = SharedTrack::new(ramp());
        let id = shared.read().unwrap().keyframes()[0].id();
        let (tx, rx) = mpsc::channel();
        let tx = Mutex::new(tx);
        shared
            .set_time_listener(move |event| {
                let _ = tx.lock().unwrap().send(*event);
            })
            .unwrap();

        shared.set_time(id, 2.0).unwrap();
        let event = rx.try_recv().unwrap();
        assert_eq!(event.index, 1);
        // Safe to read the track once the event has been handed over.
        let track = shared.read().unwrap();
        assert_eq!(track.keyframes()[event.index].id(), id);
    }

    #[test]
    fn poisoned_lock_is_reported() {
        let shared = SharedTrack::new(ramp());
        let poisoner = shared.clone();
        let _ = thread::spawn(move || {
            let _guard = poisoner.write().unwrap();
            panic!("writer failed");
        })
        .join();
        assert_eq!(shared.sample(0.5), Err(KeyframeError::LockPoisoned));
    }
}
