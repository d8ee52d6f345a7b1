use approx::assert_abs_diff_eq;
use keyframe_core::{EasingMode, Keyframe, Track, Transform, Vector3, Vector4};

fn assert_transform_eq(a: &Transform, b: &Transform) {
    for (x, y) in a.position.to_array().iter().zip(b.position.to_array()) {
        assert_abs_diff_eq!(*x, y, epsilon = 1e-5);
    }
    for (x, y) in a.rotation.to_array().iter().zip(b.rotation.to_array()) {
        assert_abs_diff_eq!(*x, y, epsilon = 1e-5);
    }
    for (x, y) in a.scale.to_array().iter().zip(b.scale.to_array()) {
        assert_abs_diff_eq!(*x, y, epsilon = 1e-5);
    }
    for (x, y) in a.color.to_array().iter().zip(b.color.to_array()) {
        assert_abs_diff_eq!(*x, y, epsilon = 1e-5);
    }
}

/// One keyframe per easing mode, with distinct transforms.
fn every_mode_track() -> Track {
    let mut track = Track::new();
    for (i, mode) in EasingMode::ALL.iter().enumerate() {
        let f = i as f32;
        let kf = Keyframe::new(
            f * 0.5 - 3.0,
            Transform::new(
                Vector3::new(f, -f, f * 2.0),
                Vector3::new(f * 0.1, 0.0, -f * 0.1),
                Vector3::new(1.0 + f, 1.0, 1.0),
                Vector4::new(f / 32.0, 1.0 - f / 32.0, 0.5, 1.0),
            ),
            *mode,
        );
        track.insert(kf).unwrap();
    }
    track
}

#[test]
fn sampling_at_a_keyframe_time_returns_its_transform() {
    let track = every_mode_track();
    for kf in track.keyframes() {
        let out = track.sample(kf.time()).unwrap();
        assert_transform_eq(&out, &kf.transform);
    }
}

#[test]
fn boundaries_clamp_without_extrapolation() {
    let track = every_mode_track();
    let first = track.first().unwrap().transform;
    let last = track.last().unwrap().transform;
    let (start, end) = track.time_range().unwrap();
    for dt in [1e-3, 0.5, 1.0, 10.0, 1e6] {
        assert_eq!(track.sample(start - dt).unwrap(), first);
        assert_eq!(track.sample(end + dt).unwrap(), last);
    }
    assert_eq!(track.sample(f32::NEG_INFINITY).unwrap(), first);
    assert_eq!(track.sample(f32::INFINITY).unwrap(), last);
}

#[test]
fn segment_end_approaches_next_keyframe() {
    let track = every_mode_track();
    let keys = track.keyframes();
    for pair in keys.windows(2) {
        let (a, b) = (&pair[0], &pair[1]);
        // Every curve except Constant is continuous at p == 1.
        if a.mode == EasingMode::Constant {
            continue;
        }
        let near_end = b.time() - 1e-4;
        let out = track.sample(near_end).unwrap();
        assert_abs_diff_eq!(out.position.x, b.transform.position.x, epsilon = 0.05);
    }
}

#[test]
fn bracket_uses_binary_search_ordering() {
    let mut track = Track::new();
    for i in 0..1000 {
        track.insert(Keyframe::empty(i as f32)).unwrap();
    }
    let b = track.bracket(500.25).unwrap();
    assert_eq!((b.start, b.end), (500, 501));
    assert_abs_diff_eq!(b.progress, 0.25, epsilon = 1e-4);
    assert!(track.bracket(-1.0).unwrap().is_boundary());
}
