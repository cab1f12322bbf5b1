use crate::scene::{Aabb, PartId, Scene};
use crate::state::Camera;
use glam::{Vec3, Vec4};

/// Pointer position in normalised device coordinates: x right and y up,
/// both in [-1, 1].
#[derive(Clone, Copy, Debug, Default, PartialEq)]
pub struct Ndc {
    pub x: f32,
    pub y: f32,
}

impl Ndc {
    pub fn new(x: f32, y: f32) -> Self {
        Self { x, y }
    }

    /// Map client-space pixels (origin top-left) over a `width` x `height`
    /// viewport.
    pub fn from_client(client_x: f32, client_y: f32, width: f32, height: f32) -> Self {
        Self {
            x: (client_x / width.max(1.0)) * 2.0 - 1.0,
            y: -(client_y / height.max(1.0)) * 2.0 + 1.0,
        }
    }
}

#[derive(Clone, Copy, Debug, PartialEq)]
pub struct Ray {
    pub origin: Vec3,
    pub dir: Vec3,
}

impl Ray {
    pub fn new(origin: Vec3, dir: Vec3) -> Self {
        Self { origin, dir }
    }

    /// World-space ray from the camera eye through `ndc`.
    pub fn from_camera(camera: &Camera, ndc: Ndc) -> Self {
        let inv = camera.view_projection().inverse();
        let far = inv * Vec4::new(ndc.x, ndc.y, 1.0, 1.0);
        let far = far.truncate() / far.w;
        let dir = (far - camera.eye).try_normalize().unwrap_or(Vec3::NEG_Z);
        Self {
            origin: camera.eye,
            dir,
        }
    }

    pub fn at(&self, t: f32) -> Vec3 {
        self.origin + self.dir * t
    }
}

/// Slab test. Returns the entry distance (0 when the origin is inside).
#[inline]
pub fn ray_aabb(ray: &Ray, bounds: &Aabb) -> Option<f32> {
    if bounds.is_empty() {
        return None;
    }
    let inv = ray.dir.recip();
    let t0 = (bounds.min - ray.origin) * inv;
    let t1 = (bounds.max - ray.origin) * inv;
    let t_near = t0.min(t1).max_element().max(0.0);
    let t_far = t0.max(t1).min_element();
    (t_near <= t_far).then_some(t_near)
}

/// Möller–Trumbore, double-sided.
#[inline]
pub fn ray_triangle(ray: &Ray, a: Vec3, b: Vec3, c: Vec3) -> Option<f32> {
    const EPS: f32 = 1e-7;
    let e1 = b - a;
    let e2 = c - a;
    let p = ray.dir.cross(e2);
    let det = e1.dot(p);
    if det.abs() < EPS {
        return None;
    }
    let inv_det = 1.0 / det;
    let s = ray.origin - a;
    let u = s.dot(p) * inv_det;
    if !(0.0..=1.0).contains(&u) {
        return None;
    }
    let q = s.cross(e1);
    let v = ray.dir.dot(q) * inv_det;
    if v < 0.0 || u + v > 1.0 {
        return None;
    }
    let t = e2.dot(q) * inv_det;
    (t >= 0.0).then_some(t)
}

#[derive(Clone, Copy, Debug, PartialEq)]
pub struct Hit {
    pub part: PartId,
    pub distance: f32,
    pub point: Vec3,
}

/// Nearest part hit by `ray`, fixed and untyped parts included.
pub fn pick(scene: &Scene, ray: &Ray) -> Option<Hit> {
    let mut best: Option<Hit> = None;
    for (id, part) in scene.parts() {
        let world = scene.part_world_matrix(id);
        let inv = world.inverse();
        // Leave the local direction unnormalised so `t` stays a world distance.
        let local = Ray::new(
            inv.transform_point3(ray.origin),
            inv.transform_vector3(ray.dir),
        );
        let Some(t_box) = ray_aabb(&local, &part.mesh.bounds) else {
            continue;
        };
        if best.is_some_and(|b| t_box > b.distance) {
            continue;
        }
        for [a, b, c] in part.mesh.triangles() {
            if let Some(t) = ray_triangle(&local, a, b, c) {
                match best {
                    Some(h) if t >= h.distance => {}
                    _ => {
                        best = Some(Hit {
                            part: id,
                            distance: t,
                            point: ray.at(t),
                        })
                    }
                }
            }
        }
    }
    best
}
