//! Finite property tweens driven by the frame clock.
//!
//! A [`Tween`] is a deterministic function of elapsed time that lands exactly
//! on its end value once its duration has passed. [`PoseTween`] joins three of
//! them (eye, target, field of view) that start together and reports a single
//! completion once all three are done.

use crate::state::Pose;
use glam::Vec3;

#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub enum Ease {
    Linear,
    /// Cubic ease-in-out.
    Power2InOut,
    /// Quartic ease-in-out.
    Power3InOut,
}

impl Ease {
    pub fn apply(self, t: f32) -> f32 {
        let t = t.clamp(0.0, 1.0);
        match self {
            Ease::Linear => t,
            Ease::Power2InOut => in_out_pow(t, 3),
            Ease::Power3InOut => in_out_pow(t, 4),
        }
    }
}

#[inline]
fn in_out_pow(t: f32, n: i32) -> f32 {
    if t < 0.5 {
        2f32.powi(n - 1) * t.powi(n)
    } else {
        1.0 - (-2.0 * t + 2.0).powi(n) / 2.0
    }
}

pub trait Lerp: Copy {
    fn lerp_to(self, to: Self, t: f32) -> Self;
}

impl Lerp for f32 {
    fn lerp_to(self, to: Self, t: f32) -> Self {
        self + (to - self) * t
    }
}

impl Lerp for Vec3 {
    fn lerp_to(self, to: Self, t: f32) -> Self {
        self.lerp(to, t)
    }
}

#[derive(Clone, Debug)]
pub struct Tween<T: Lerp> {
    from: T,
    to: T,
    duration: f32,
    elapsed: f32,
    ease: Ease,
}

impl<T: Lerp> Tween<T> {
    pub fn new(from: T, to: T, duration_sec: f32, ease: Ease) -> Self {
        Self {
            from,
            to,
            duration: duration_sec.max(0.0),
            elapsed: 0.0,
            ease,
        }
    }

    /// Advance by `dt_sec` and return the new value.
    pub fn advance(&mut self, dt_sec: f32) -> T {
        self.elapsed = (self.elapsed + dt_sec.max(0.0)).min(self.duration);
        self.value()
    }

    pub fn value(&self) -> T {
        if self.is_finished() {
            return self.to;
        }
        let t = self.ease.apply(self.elapsed / self.duration);
        self.from.lerp_to(self.to, t)
    }

    pub fn is_finished(&self) -> bool {
        self.elapsed >= self.duration
    }

    pub fn end(&self) -> T {
        self.to
    }
}

#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub struct PoseEases {
    pub eye: Ease,
    pub target: Ease,
    pub fov: Ease,
}

impl PoseEases {
    pub const fn uniform(ease: Ease) -> Self {
        Self {
            eye: ease,
            target: ease,
            fov: ease,
        }
    }
}

/// Join over three camera tweens sharing one duration.
#[derive(Clone, Debug)]
pub struct PoseTween {
    eye: Tween<Vec3>,
    target: Tween<Vec3>,
    fov: Tween<f32>,
}

impl PoseTween {
    pub fn new(from: Pose, to: Pose, duration_sec: f32, eases: PoseEases) -> Self {
        Self {
            eye: Tween::new(from.eye, to.eye, duration_sec, eases.eye),
            target: Tween::new(from.target, to.target, duration_sec, eases.target),
            fov: Tween::new(from.fov_degrees, to.fov_degrees, duration_sec, eases.fov),
        }
    }

    /// Step all three tweens. The flag is `true` only once every tween has
    /// reached its end value.
    pub fn advance(&mut self, dt_sec: f32) -> (Pose, bool) {
        let pose = Pose {
            eye: self.eye.advance(dt_sec),
            target: self.target.advance(dt_sec),
            fov_degrees: self.fov.advance(dt_sec),
        };
        (pose, self.is_finished())
    }

    pub fn is_finished(&self) -> bool {
        self.eye.is_finished() && self.target.is_finished() && self.fov.is_finished()
    }

    pub fn end(&self) -> Pose {
        Pose {
            eye: self.eye.end(),
            target: self.target.end(),
            fov_degrees: self.fov.end(),
        }
    }
}
