use crate::constants::{GROUND_Y, PAN_LIMIT_X, PAN_LIMIT_Z};
use crate::state::Camera;

/// Keeps panning from drifting the model out of frame.
///
/// Applied after each navigation change notification while the focus
/// controller is idle. The target's horizontal coordinates are clamped into a
/// rectangle, the eye follows by the same delta so the view direction is kept,
/// and the target is pinned to the ground height.
#[derive(Clone, Copy, Debug, PartialEq)]
pub struct PanLimits {
    pub half_x: f32,
    pub half_z: f32,
    pub ground_y: f32,
}

impl Default for PanLimits {
    fn default() -> Self {
        Self {
            half_x: PAN_LIMIT_X,
            half_z: PAN_LIMIT_Z,
            ground_y: GROUND_Y,
        }
    }
}

impl PanLimits {
    pub fn apply(&self, camera: &mut Camera) {
        let t = camera.target;
        let x = t.x.clamp(-self.half_x, self.half_x);
        let z = t.z.clamp(-self.half_z, self.half_z);
        if x != t.x || z != t.z {
            camera.eye.x += x - t.x;
            camera.eye.z += z - t.z;
            camera.target.x = x;
            camera.target.z = z;
        }
        camera.target.y = self.ground_y;
    }

    pub fn contains(&self, camera: &Camera) -> bool {
        let t = camera.target;
        t.x.abs() <= self.half_x && t.z.abs() <= self.half_z && t.y == self.ground_y
    }
}
