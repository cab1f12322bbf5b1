use crate::constants::{
    ORBIT_DAMPING_FACTOR, ORBIT_MAX_AZIMUTH, ORBIT_MAX_DISTANCE, ORBIT_MAX_POLAR,
    ORBIT_MIN_AZIMUTH, ORBIT_MIN_DISTANCE, ORBIT_MIN_POLAR, ORBIT_PAN_SPEED, ORBIT_ROTATE_SPEED,
    ORBIT_ZOOM_SPEED,
};
use crate::state::Camera;
use glam::{Vec2, Vec3};
use smallvec::SmallVec;
use std::f32::consts::{PI, TAU};

const EPS: f32 = 1e-6;

#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub enum PointerButton {
    Primary,
    Middle,
    Secondary,
}

#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub enum OrbitAction {
    Rotate,
    Pan,
    Dolly,
}

#[derive(Clone, Copy, Debug, PartialEq)]
pub struct OrbitConfig {
    pub enable_damping: bool,
    pub damping_factor: f32,
    pub rotate_speed: f32,
    pub pan_speed: f32,
    pub zoom_speed: f32,
    /// Pan along the camera's screen plane instead of the ground plane.
    pub screen_space_panning: bool,
    pub min_polar: f32,
    pub max_polar: f32,
    pub min_azimuth: f32,
    pub max_azimuth: f32,
    pub min_distance: f32,
    pub max_distance: f32,
    pub primary: OrbitAction,
    pub middle: OrbitAction,
    pub secondary: OrbitAction,
}

impl Default for OrbitConfig {
    fn default() -> Self {
        Self {
            enable_damping: true,
            damping_factor: ORBIT_DAMPING_FACTOR,
            rotate_speed: ORBIT_ROTATE_SPEED,
            pan_speed: ORBIT_PAN_SPEED,
            zoom_speed: ORBIT_ZOOM_SPEED,
            screen_space_panning: false,
            min_polar: ORBIT_MIN_POLAR,
            max_polar: ORBIT_MAX_POLAR,
            min_azimuth: ORBIT_MIN_AZIMUTH,
            max_azimuth: ORBIT_MAX_AZIMUTH,
            min_distance: ORBIT_MIN_DISTANCE,
            max_distance: ORBIT_MAX_DISTANCE,
            primary: OrbitAction::Pan,
            middle: OrbitAction::Dolly,
            secondary: OrbitAction::Rotate,
        }
    }
}

/// Raw input fed to the controls. Positions are client-space pixels.
#[derive(Clone, Debug, PartialEq)]
pub enum OrbitInput {
    PointerDown { button: PointerButton, pos: Vec2 },
    PointerMove { pos: Vec2 },
    PointerUp,
    Wheel { delta_y: f32 },
    /// Current set of touch points after a touch starts, moves or ends.
    Touches(SmallVec<[Vec2; 2]>),
}

#[derive(Clone, Copy, Debug, PartialEq)]
enum Gesture {
    Mouse { action: OrbitAction, last: Vec2 },
    TouchOne { last: Vec2 },
    TouchTwo { last_mid: Vec2, last_dist: f32 },
}

/// Spherical orbit around `camera.target` with damping and angle/distance
/// clamps. One finger pans; two fingers pinch to dolly while their midpoint
/// pans.
#[derive(Clone, Debug)]
pub struct OrbitControls {
    pub config: OrbitConfig,
    enabled: bool,
    // pending motion, consumed by `update`
    delta_theta: f32,
    delta_phi: f32,
    scale: f32,
    pan_offset: Vec3,
    gesture: Option<Gesture>,
}

impl Default for OrbitControls {
    fn default() -> Self {
        Self::new(OrbitConfig::default())
    }
}

impl OrbitControls {
    pub fn new(config: OrbitConfig) -> Self {
        Self {
            config,
            enabled: true,
            delta_theta: 0.0,
            delta_phi: 0.0,
            scale: 1.0,
            pan_offset: Vec3::ZERO,
            gesture: None,
        }
    }

    pub fn enabled(&self) -> bool {
        self.enabled
    }

    /// Disabling drops any in-flight gesture and pending damped motion so
    /// nothing is replayed when input comes back.
    pub fn set_enabled(&mut self, enabled: bool) {
        self.enabled = enabled;
        if !enabled {
            self.gesture = None;
            self.clear_pending();
        }
    }

    pub fn has_pending_motion(&self) -> bool {
        self.delta_theta.abs() > EPS
            || self.delta_phi.abs() > EPS
            || self.pan_offset.length_squared() > EPS
            || (self.scale - 1.0).abs() > EPS
    }

    /// Feed one input event. `viewport` is the element size in the same
    /// client pixels as the positions.
    pub fn handle(&mut self, input: OrbitInput, camera: &Camera, viewport: Vec2) {
        if !self.enabled {
            return;
        }
        match input {
            OrbitInput::PointerDown { button, pos } => {
                let action = match button {
                    PointerButton::Primary => self.config.primary,
                    PointerButton::Middle => self.config.middle,
                    PointerButton::Secondary => self.config.secondary,
                };
                self.gesture = Some(Gesture::Mouse { action, last: pos });
            }
            OrbitInput::PointerMove { pos } => {
                if let Some(Gesture::Mouse { action, last }) = self.gesture {
                    let delta = pos - last;
                    match action {
                        OrbitAction::Rotate => self.rotate_by_pixels(delta, viewport),
                        OrbitAction::Pan => self.pan_by_pixels(delta, camera, viewport),
                        OrbitAction::Dolly => {
                            if delta.y > 0.0 {
                                self.dolly_out(self.zoom_scale());
                            } else if delta.y < 0.0 {
                                self.dolly_in(self.zoom_scale());
                            }
                        }
                    }
                    self.gesture = Some(Gesture::Mouse { action, last: pos });
                }
            }
            OrbitInput::PointerUp => {
                if matches!(self.gesture, Some(Gesture::Mouse { .. })) {
                    self.gesture = None;
                }
            }
            OrbitInput::Wheel { delta_y } => {
                if delta_y < 0.0 {
                    self.dolly_in(self.zoom_scale());
                } else if delta_y > 0.0 {
                    self.dolly_out(self.zoom_scale());
                }
            }
            OrbitInput::Touches(points) => self.handle_touches(&points, camera, viewport),
        }
    }

    fn handle_touches(&mut self, points: &[Vec2], camera: &Camera, viewport: Vec2) {
        match points {
            [] => self.gesture = None,
            [p] => {
                if let Some(Gesture::TouchOne { last }) = self.gesture {
                    self.pan_by_pixels(*p - last, camera, viewport);
                }
                self.gesture = Some(Gesture::TouchOne { last: *p });
            }
            [a, b, ..] => {
                let mid = (*a + *b) * 0.5;
                let dist = a.distance(*b);
                if let Some(Gesture::TouchTwo {
                    last_mid,
                    last_dist,
                }) = self.gesture
                {
                    if last_dist > EPS && dist > EPS {
                        self.dolly_out((dist / last_dist).powf(self.config.zoom_speed));
                    }
                    self.pan_by_pixels(mid - last_mid, camera, viewport);
                }
                self.gesture = Some(Gesture::TouchTwo {
                    last_mid: mid,
                    last_dist: dist,
                });
            }
        }
    }

    fn zoom_scale(&self) -> f32 {
        0.95_f32.powf(self.config.zoom_speed)
    }

    fn dolly_in(&mut self, scale: f32) {
        self.scale *= scale;
    }

    fn dolly_out(&mut self, scale: f32) {
        self.scale /= scale;
    }

    fn rotate_by_pixels(&mut self, delta: Vec2, viewport: Vec2) {
        let h = viewport.y.max(1.0);
        self.delta_theta -= TAU * delta.x / h * self.config.rotate_speed;
        self.delta_phi -= TAU * delta.y / h * self.config.rotate_speed;
    }

    fn pan_by_pixels(&mut self, delta: Vec2, camera: &Camera, viewport: Vec2) {
        let h = viewport.y.max(1.0);
        let offset = camera.eye - camera.target;
        // world units spanned by the viewport height at the target's depth
        let target_distance =
            offset.length() * (camera.fov_degrees.to_radians() * 0.5).tan();
        let pan_left = 2.0 * delta.x * target_distance / h * self.config.pan_speed;
        let pan_up = 2.0 * delta.y * target_distance / h * self.config.pan_speed;

        let forward = (camera.target - camera.eye).try_normalize().unwrap_or(Vec3::NEG_Z);
        let right = forward.cross(camera.up).try_normalize().unwrap_or(Vec3::X);
        let up = if self.config.screen_space_panning {
            right.cross(forward)
        } else {
            camera.up.cross(right)
        };
        self.pan_offset += -right * pan_left + up * pan_up;
    }

    /// Apply one tick of pending motion to the camera. Returns `true` when the
    /// eye or target moved, which is the change notification.
    ///
    /// Angle and distance clamps are enforced while applying motion; with no
    /// pending motion the camera is left untouched.
    pub fn update(&mut self, camera: &mut Camera) -> bool {
        if !self.enabled || !self.has_pending_motion() {
            self.clear_pending();
            return false;
        }
        let (last_eye, last_target) = (camera.eye, camera.target);
        let cfg = self.config;
        let k = if cfg.enable_damping {
            cfg.damping_factor
        } else {
            1.0
        };

        let offset = camera.eye - camera.target;
        let radius = offset.length();
        let mut theta = offset.x.atan2(offset.z);
        let mut phi = if radius > 0.0 {
            (offset.y / radius).clamp(-1.0, 1.0).acos()
        } else {
            0.0
        };

        theta += self.delta_theta * k;
        phi += self.delta_phi * k;
        theta = clamp_azimuth(theta, cfg.min_azimuth, cfg.max_azimuth);
        phi = phi.clamp(cfg.min_polar, cfg.max_polar).clamp(EPS, PI - EPS);
        let radius = (radius * self.scale).clamp(cfg.min_distance, cfg.max_distance);

        camera.target += self.pan_offset * k;
        let sin_phi = phi.sin();
        let offset = Vec3::new(
            radius * sin_phi * theta.sin(),
            radius * phi.cos(),
            radius * sin_phi * theta.cos(),
        );
        camera.eye = camera.target + offset;

        if cfg.enable_damping {
            self.delta_theta *= 1.0 - k;
            self.delta_phi *= 1.0 - k;
            self.pan_offset *= 1.0 - k;
        } else {
            self.delta_theta = 0.0;
            self.delta_phi = 0.0;
            self.pan_offset = Vec3::ZERO;
        }
        self.scale = 1.0;

        // any movement counts, however small, so the pan clamp sees every step
        camera.eye != last_eye || camera.target != last_target
    }

    fn clear_pending(&mut self) {
        self.delta_theta = 0.0;
        self.delta_phi = 0.0;
        self.scale = 1.0;
        self.pan_offset = Vec3::ZERO;
    }
}

/// Clamp an azimuth angle into [min, max], wrapping it into range first.
fn clamp_azimuth(theta: f32, min: f32, max: f32) -> f32 {
    if !(min.is_finite() && max.is_finite()) {
        return theta;
    }
    let mut t = theta;
    while t < -PI {
        t += TAU;
    }
    while t > PI {
        t -= TAU;
    }
    t.clamp(min, max)
}
