use glam::Vec3;
use std::f32::consts::{FRAC_PI_3, FRAC_PI_4, FRAC_PI_6};

// Fixed tuning for the single scene this viewer presents.

// Camera
pub const INITIAL_FOV_DEG: f32 = 45.0;
pub const ZOOM_FOV_DEG: f32 = 30.0;
pub const CAMERA_NEAR: f32 = 0.1;
pub const CAMERA_FAR: f32 = 1000.0;
pub const HOME_EYE: Vec3 = Vec3::new(0.0, 8.0, 10.0);
pub const INITIAL_LOOK_AT: Vec3 = Vec3::ZERO; // startup aim; resets return to HOME_TARGET
pub const HOME_TARGET: Vec3 = Vec3::new(0.0, 1.0, 0.0);

// Focus choreography
pub const ZOOM_EYE_OFFSET: Vec3 = Vec3::new(0.0, 3.0, 5.0); // eye position relative to the focused part
pub const FOCUS_TWEEN_SEC: f32 = 1.0;

// Orbit navigation
pub const ORBIT_DAMPING_FACTOR: f32 = 0.05;
pub const ORBIT_ROTATE_SPEED: f32 = 1.0;
pub const ORBIT_PAN_SPEED: f32 = 1.0;
pub const ORBIT_ZOOM_SPEED: f32 = 1.0;
pub const ORBIT_MIN_POLAR: f32 = FRAC_PI_6;
pub const ORBIT_MAX_POLAR: f32 = FRAC_PI_3;
pub const ORBIT_MIN_AZIMUTH: f32 = -FRAC_PI_4;
pub const ORBIT_MAX_AZIMUTH: f32 = FRAC_PI_4;
pub const ORBIT_MIN_DISTANCE: f32 = 10.0;
pub const ORBIT_MAX_DISTANCE: f32 = 20.0;

// Pan clamp applied to the orbit target while idle
pub const PAN_LIMIT_X: f32 = 5.0;
pub const PAN_LIMIT_Z: f32 = 1.0;
pub const GROUND_Y: f32 = 0.0;

// Model placement
pub const MODEL_SCALE: f32 = 18.0;
pub const MODEL_ORIGIN: Vec3 = Vec3::ZERO;

// Scene lighting (sRGB hex)
pub const BACKGROUND_HEX: u32 = 0x808080;
pub const AMBIENT_HEX: u32 = 0xffffff;
pub const AMBIENT_INTENSITY: f32 = 1.0;
pub const DIRECTIONAL_HEX: u32 = 0xffffff;
pub const DIRECTIONAL_INTENSITY: f32 = 1.0;
pub const DIRECTIONAL_POSITION: Vec3 = Vec3::new(5.0, 5.0, 5.0);

// Hover highlight palette
pub const HIGHLIGHT_BOX_HEX: u32 = 0x00ff00;
pub const HIGHLIGHT_CYLINDER_HEX: u32 = 0x0000ff;
pub const HIGHLIGHT_LINE_HEX: u32 = 0xff0000;
