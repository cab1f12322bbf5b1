//! Camera and colour types shared with the web frontend.
//!
//! These types avoid platform-specific APIs so the interaction logic can be
//! exercised on the host. The web frontend consumes them to build camera
//! matrices and per-part shading uniforms.

use crate::constants::{CAMERA_FAR, CAMERA_NEAR, HOME_EYE, INITIAL_FOV_DEG, INITIAL_LOOK_AT};
use glam::{Mat4, Vec3};

/// Linear RGB colour.
#[derive(Clone, Copy, Debug, PartialEq)]
pub struct Color {
    pub r: f32,
    pub g: f32,
    pub b: f32,
}

impl Color {
    pub const WHITE: Color = Color::new(1.0, 1.0, 1.0);

    pub const fn new(r: f32, g: f32, b: f32) -> Self {
        Self { r, g, b }
    }

    /// Decode an sRGB hex triplet (`0xRRGGBB`) into linear space.
    pub fn from_hex(hex: u32) -> Self {
        let channel = |shift: u32| srgb_to_linear(((hex >> shift) & 0xff) as f32 / 255.0);
        Self::new(channel(16), channel(8), channel(0))
    }

    pub fn to_array(self) -> [f32; 3] {
        [self.r, self.g, self.b]
    }

    pub fn scaled(self, k: f32) -> Self {
        Self::new(self.r * k, self.g * k, self.b * k)
    }
}

#[inline]
fn srgb_to_linear(c: f32) -> f32 {
    if c <= 0.04045 {
        c / 12.92
    } else {
        ((c + 0.055) / 1.055).powf(2.4)
    }
}

/// The animatable part of the camera: where it sits, what it looks at, and
/// how wide it sees.
#[derive(Clone, Copy, Debug, PartialEq)]
pub struct Pose {
    pub eye: Vec3,
    pub target: Vec3,
    pub fov_degrees: f32,
}

/// Right-handed perspective camera that always looks at `target`.
///
/// `target` doubles as the orbit target: navigation and focus sequences both
/// write it, which keeps the camera aimed at it on every step.
#[derive(Clone, Debug)]
pub struct Camera {
    pub eye: Vec3,
    pub target: Vec3,
    pub up: Vec3,
    pub aspect: f32,
    pub fov_degrees: f32,
    pub znear: f32,
    pub zfar: f32,
}

impl Camera {
    /// Camera at the home eye position, aimed at the origin.
    pub fn new(aspect: f32) -> Self {
        Self {
            eye: HOME_EYE,
            target: INITIAL_LOOK_AT,
            up: Vec3::Y,
            aspect,
            fov_degrees: INITIAL_FOV_DEG,
            znear: CAMERA_NEAR,
            zfar: CAMERA_FAR,
        }
    }

    /// Compute the clip-space projection matrix.
    pub fn projection_matrix(&self) -> Mat4 {
        Mat4::perspective_rh(
            self.fov_degrees.to_radians(),
            self.aspect.max(1e-6),
            self.znear,
            self.zfar,
        )
    }

    /// Compute the view matrix that transforms world to view space.
    pub fn view_matrix(&self) -> Mat4 {
        Mat4::look_at_rh(self.eye, self.target, self.up)
    }

    pub fn view_projection(&self) -> Mat4 {
        self.projection_matrix() * self.view_matrix()
    }

    pub fn set_aspect(&mut self, width: f32, height: f32) {
        if width > 0.0 && height > 0.0 {
            self.aspect = width / height;
        }
    }

    pub fn pose(&self) -> Pose {
        Pose {
            eye: self.eye,
            target: self.target,
            fov_degrees: self.fov_degrees,
        }
    }

    pub fn set_pose(&mut self, pose: Pose) {
        self.eye = pose.eye;
        self.target = pose.target;
        self.fov_degrees = pose.fov_degrees;
    }
}
