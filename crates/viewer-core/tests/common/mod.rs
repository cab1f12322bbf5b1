// Shared fixtures: cube scenes, a world-to-NDC projector and an in-memory
// GLB writer so importer tests need no files on disk.

#![allow(dead_code)]

use glam::Vec3;
use serde_json::{json, Value};
use viewer_core::raycast::Ndc;
use viewer_core::scene::{Material, MeshData, PartId, Scene, SceneSettings, Transform};
use viewer_core::state::{Camera, Color};

pub const BASE_GREY: Color = Color::new(0.5, 0.5, 0.5);

pub fn cube_mesh(half: f32) -> MeshData {
    let h = half;
    let positions = vec![
        [-h, -h, -h],
        [h, -h, -h],
        [h, h, -h],
        [-h, h, -h],
        [-h, -h, h],
        [h, -h, h],
        [h, h, h],
        [-h, h, h],
    ];
    #[rustfmt::skip]
    let indices = vec![
        0, 2, 1, 0, 3, 2, // back
        4, 5, 6, 4, 6, 7, // front
        0, 1, 5, 0, 5, 4, // bottom
        3, 6, 2, 3, 7, 6, // top
        0, 4, 7, 0, 7, 3, // left
        1, 2, 6, 1, 6, 5, // right
    ];
    MeshData::new(positions, None, Some(indices))
}

/// One unit cube per `(name, position)` under an identity root.
pub fn cube_scene(parts: &[(&str, Vec3)]) -> (Scene, Vec<PartId>) {
    let mut scene = Scene::new(SceneSettings::default());
    let root = scene.add_node("root", Transform::IDENTITY, None);
    let ids = parts
        .iter()
        .map(|(name, pos)| {
            let node = scene.add_node(*name, Transform::from_translation(*pos), Some(root));
            scene
                .add_part(
                    node,
                    *name,
                    cube_mesh(0.5),
                    Material {
                        color: BASE_GREY,
                        ..Material::default()
                    },
                )
                .expect("node exists")
        })
        .collect();
    (scene, ids)
}

pub fn ndc_of(camera: &Camera, world: Vec3) -> Ndc {
    let clip = camera.view_projection() * world.extend(1.0);
    Ndc::new(clip.x / clip.w, clip.y / clip.w)
}

/// NDC of a screen corner where the test scenes have nothing.
pub fn empty_ndc() -> Ndc {
    Ndc::new(0.95, 0.95)
}

pub fn assert_vec3_near(a: Vec3, b: Vec3, eps: f32) {
    assert!(a.distance(b) <= eps, "{a:?} != {b:?} (eps {eps})");
}

#[derive(Default)]
pub struct Prim<'a> {
    pub positions: &'a [[f32; 3]],
    pub indices: Option<&'a [u16]>,
    pub color: [f32; 4],
    /// glTF primitive mode; triangles when unset.
    pub mode: Option<u32>,
    /// Reuse a material from [`GlbBuilder::add_material`] instead of `color`.
    pub material: Option<usize>,
}

pub const TRIANGLE: [[f32; 3]; 3] = [[0.0, 0.0, 0.0], [1.0, 0.0, 0.0], [0.0, 1.0, 0.0]];

#[derive(Default)]
pub struct GlbBuilder {
    bin: Vec<u8>,
    buffer_views: Vec<Value>,
    accessors: Vec<Value>,
    nodes: Vec<Value>,
    meshes: Vec<Value>,
    materials: Vec<Value>,
    animations: Vec<Value>,
    scene_nodes: Vec<usize>,
}

const ARRAY_BUFFER: u32 = 34962;
const ELEMENT_ARRAY_BUFFER: u32 = 34963;
const FLOAT: u32 = 5126;
const UNSIGNED_SHORT: u32 = 5123;

impl GlbBuilder {
    pub fn new() -> Self {
        Self::default()
    }

    fn push_view(&mut self, bytes: &[u8], target: Option<u32>) -> usize {
        while self.bin.len() % 4 != 0 {
            self.bin.push(0);
        }
        let offset = self.bin.len();
        self.bin.extend_from_slice(bytes);
        let mut view = json!({
            "buffer": 0,
            "byteOffset": offset,
            "byteLength": bytes.len(),
        });
        if let Some(t) = target {
            view["target"] = json!(t);
        }
        self.buffer_views.push(view);
        self.buffer_views.len() - 1
    }

    fn vec3_accessor(&mut self, values: &[[f32; 3]], target: Option<u32>) -> usize {
        let bytes: Vec<u8> = values
            .iter()
            .flat_map(|v| v.iter().flat_map(|c| c.to_le_bytes()))
            .collect();
        let view = self.push_view(&bytes, target);
        let min = (0..3)
            .map(|i| values.iter().map(|v| v[i]).fold(f32::MAX, f32::min))
            .collect::<Vec<_>>();
        let max = (0..3)
            .map(|i| values.iter().map(|v| v[i]).fold(f32::MIN, f32::max))
            .collect::<Vec<_>>();
        self.accessors.push(json!({
            "bufferView": view,
            "componentType": FLOAT,
            "count": values.len(),
            "type": "VEC3",
            "min": min,
            "max": max,
        }));
        self.accessors.len() - 1
    }

    fn scalar_accessor(&mut self, values: &[f32]) -> usize {
        let bytes: Vec<u8> = values.iter().flat_map(|c| c.to_le_bytes()).collect();
        let view = self.push_view(&bytes, None);
        let min = values.iter().copied().fold(f32::MAX, f32::min);
        let max = values.iter().copied().fold(f32::MIN, f32::max);
        self.accessors.push(json!({
            "bufferView": view,
            "componentType": FLOAT,
            "count": values.len(),
            "type": "SCALAR",
            "min": [min],
            "max": [max],
        }));
        self.accessors.len() - 1
    }

    fn index_accessor(&mut self, indices: &[u16]) -> usize {
        let bytes: Vec<u8> = indices.iter().flat_map(|i| i.to_le_bytes()).collect();
        let view = self.push_view(&bytes, Some(ELEMENT_ARRAY_BUFFER));
        self.accessors.push(json!({
            "bufferView": view,
            "componentType": UNSIGNED_SHORT,
            "count": indices.len(),
            "type": "SCALAR",
        }));
        self.accessors.len() - 1
    }

    pub fn add_material(&mut self, color: [f32; 4]) -> usize {
        self.materials.push(json!({
            "pbrMetallicRoughness": { "baseColorFactor": color }
        }));
        self.materials.len() - 1
    }

    pub fn add_mesh(&mut self, name: &str, prims: &[Prim<'_>]) -> usize {
        let mut primitives = Vec::new();
        for prim in prims {
            let position = self.vec3_accessor(prim.positions, Some(ARRAY_BUFFER));
            let material = match prim.material {
                Some(m) => m,
                None => self.add_material(prim.color),
            };
            let mut p = json!({
                "attributes": { "POSITION": position },
                "material": material,
            });
            if let Some(indices) = prim.indices {
                p["indices"] = json!(self.index_accessor(indices));
            }
            if let Some(mode) = prim.mode {
                p["mode"] = json!(mode);
            }
            primitives.push(p);
        }
        self.meshes.push(json!({ "name": name, "primitives": primitives }));
        self.meshes.len() - 1
    }

    /// A one-triangle mesh node named `name` at `translation`, added as a
    /// scene root.
    pub fn add_triangle_part(&mut self, name: &str, translation: [f32; 3]) -> usize {
        let mesh = self.add_mesh(
            name,
            &[Prim {
                positions: &TRIANGLE,
                indices: Some(&[0, 1, 2]),
                color: [0.2, 0.4, 0.6, 1.0],
                ..Prim::default()
            }],
        );
        let node = self.add_node(Some(name), Some(mesh), translation, &[]);
        self.add_root(node);
        node
    }

    pub fn add_node(
        &mut self,
        name: Option<&str>,
        mesh: Option<usize>,
        translation: [f32; 3],
        children: &[usize],
    ) -> usize {
        let mut node = json!({ "translation": translation });
        if let Some(n) = name {
            node["name"] = json!(n);
        }
        if let Some(m) = mesh {
            node["mesh"] = json!(m);
        }
        if !children.is_empty() {
            node["children"] = json!(children);
        }
        self.nodes.push(node);
        self.nodes.len() - 1
    }

    pub fn add_root(&mut self, node: usize) {
        self.scene_nodes.push(node);
    }

    pub fn add_translation_animation(
        &mut self,
        name: &str,
        node: usize,
        times: &[f32],
        values: &[[f32; 3]],
        interpolation: &str,
    ) {
        let input = self.scalar_accessor(times);
        let output = self.vec3_accessor(values, None);
        self.animations.push(json!({
            "name": name,
            "samplers": [{ "input": input, "output": output, "interpolation": interpolation }],
            "channels": [{ "sampler": 0, "target": { "node": node, "path": "translation" } }],
        }));
    }

    pub fn build(mut self) -> Vec<u8> {
        while self.bin.len() % 4 != 0 {
            self.bin.push(0);
        }
        let mut doc = json!({
            "asset": { "version": "2.0" },
            "scene": 0,
            "scenes": [{ "nodes": self.scene_nodes }],
            "nodes": self.nodes,
        });
        if !self.meshes.is_empty() {
            doc["meshes"] = json!(self.meshes);
            doc["materials"] = json!(self.materials);
        }
        if !self.animations.is_empty() {
            doc["animations"] = json!(self.animations);
        }
        if !self.bin.is_empty() {
            doc["buffers"] = json!([{ "byteLength": self.bin.len() }]);
            doc["bufferViews"] = json!(self.buffer_views);
            doc["accessors"] = json!(self.accessors);
        }

        let mut json_chunk = serde_json::to_vec(&doc).expect("serialise gltf json");
        while json_chunk.len() % 4 != 0 {
            json_chunk.push(b' ');
        }
        let has_bin = !self.bin.is_empty();
        let total = 12 + 8 + json_chunk.len() + if has_bin { 8 + self.bin.len() } else { 0 };

        let mut out = Vec::with_capacity(total);
        out.extend_from_slice(b"glTF");
        out.extend_from_slice(&2u32.to_le_bytes());
        out.extend_from_slice(&(total as u32).to_le_bytes());
        out.extend_from_slice(&(json_chunk.len() as u32).to_le_bytes());
        out.extend_from_slice(b"JSON");
        out.extend_from_slice(&json_chunk);
        if has_bin {
            out.extend_from_slice(&(self.bin.len() as u32).to_le_bytes());
            out.extend_from_slice(b"BIN\0");
            out.extend_from_slice(&self.bin);
        }
        out
    }
}
