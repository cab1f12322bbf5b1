use glam::Vec3;
use viewer_core::state::Pose;
use viewer_core::tween::{Ease, PoseEases, PoseTween, Tween};

#[test]
fn eases_fix_endpoints_and_midpoint() {
    for ease in [Ease::Linear, Ease::Power2InOut, Ease::Power3InOut] {
        assert_eq!(ease.apply(0.0), 0.0);
        assert_eq!(ease.apply(1.0), 1.0);
        assert!((ease.apply(0.5) - 0.5).abs() < 1e-6);
    }
}

#[test]
fn stronger_ease_starts_slower() {
    let t = 0.25;
    let p2 = Ease::Power2InOut.apply(t);
    let p3 = Ease::Power3InOut.apply(t);
    assert!((p2 - 0.0625).abs() < 1e-6);
    assert!((p3 - 0.03125).abs() < 1e-6);
    assert!(p3 < p2 && p2 < t);
}

#[test]
fn ease_clamps_out_of_range_input() {
    assert_eq!(Ease::Power2InOut.apply(-1.0), 0.0);
    assert_eq!(Ease::Power2InOut.apply(2.0), 1.0);
}

#[test]
fn tween_lands_exactly_on_end_value() {
    let mut tw = Tween::new(45.0_f32, 30.0, 1.0, Ease::Power2InOut);
    let mid = tw.advance(0.3);
    assert!(mid < 45.0 && mid > 30.0);
    assert!(!tw.is_finished());
    let end = tw.advance(5.0);
    assert_eq!(end, 30.0);
    assert!(tw.is_finished());
    assert_eq!(tw.advance(1.0), 30.0);
}

#[test]
fn vector_tween_interpolates_componentwise() {
    let mut tw = Tween::new(Vec3::ZERO, Vec3::new(2.0, 4.0, -6.0), 2.0, Ease::Linear);
    let v = tw.advance(1.0);
    assert!((v - Vec3::new(1.0, 2.0, -3.0)).length() < 1e-6);
}

#[test]
fn zero_duration_finishes_immediately() {
    let tw = Tween::new(1.0_f32, 2.0, 0.0, Ease::Linear);
    assert!(tw.is_finished());
    assert_eq!(tw.value(), 2.0);
}

#[test]
fn negative_dt_does_not_rewind() {
    let mut tw = Tween::new(0.0_f32, 1.0, 1.0, Ease::Linear);
    tw.advance(0.5);
    let v = tw.advance(-0.4);
    assert!((v - 0.5).abs() < 1e-6);
}

#[test]
fn pose_tween_reports_one_completion_after_all_parts() {
    let from = Pose {
        eye: Vec3::new(0.0, 8.0, 10.0),
        target: Vec3::ZERO,
        fov_degrees: 45.0,
    };
    let to = Pose {
        eye: Vec3::new(1.0, 3.0, 5.0),
        target: Vec3::new(1.0, 0.0, 0.0),
        fov_degrees: 30.0,
    };
    let mut seq = PoseTween::new(from, to, 1.0, PoseEases::uniform(Ease::Power2InOut));
    let mut completions = 0;
    for _ in 0..8 {
        let (_, done) = seq.advance(0.25);
        if done {
            completions += 1;
        }
        if completions == 1 {
            break;
        }
    }
    assert_eq!(completions, 1);
    assert!(seq.is_finished());
    assert_eq!(seq.end(), to);
    let (pose, done) = seq.advance(0.0);
    assert!(done);
    assert_eq!(pose, to);
}

#[test]
fn pose_tween_is_not_done_midway() {
    let from = Pose {
        eye: Vec3::ZERO,
        target: Vec3::ZERO,
        fov_degrees: 30.0,
    };
    let to = Pose {
        eye: Vec3::ONE,
        target: Vec3::ONE,
        fov_degrees: 45.0,
    };
    let eases = PoseEases {
        eye: Ease::Power3InOut,
        target: Ease::Power3InOut,
        fov: Ease::Power2InOut,
    };
    let mut seq = PoseTween::new(from, to, 1.0, eases);
    let (pose, done) = seq.advance(0.5);
    assert!(!done);
    assert!(pose.fov_degrees > 30.0 && pose.fov_degrees < 45.0);
}
