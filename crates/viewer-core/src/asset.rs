//! Binary glTF import.
//!
//! Decodes a GLB into a scene subtree under a fixed-transform model root, one
//! [`Part`](crate::scene::Part) per triangle primitive, plus any embedded
//! animation clips.
//!
//! Names are sanitized and made unique across the file before parts are
//! classified. A node with a single primitive gives the part its own name;
//! a node with several gets one part per primitive named after the mesh
//! (`Cube`, `Cube_1`, ...).

use crate::animation::{
    AnimationClip, AnimationMixer, Interpolation, Keyframes, Track, TrackData,
};
use crate::constants::{MODEL_ORIGIN, MODEL_SCALE};
use crate::scene::{Material, MeshData, NodeId, Scene, SceneSettings, Transform};
use crate::state::Color;
use fnv::FnvHashMap;
use glam::{Quat, Vec3};
use gltf::animation::util::ReadOutputs;

#[derive(Debug, thiserror::Error)]
pub enum AssetError {
    #[error("failed to parse glTF: {0}")]
    Parse(#[from] gltf::Error),
    #[error("glTF references a binary chunk but the file has none")]
    MissingBinaryChunk,
    #[error("buffer {0} is external; only self-contained GLB files are supported")]
    ExternalBuffer(usize),
    #[error("glTF has no scene")]
    NoScene,
    #[error("mesh '{mesh}' primitive {primitive} has no positions")]
    MissingPositions { mesh: String, primitive: usize },
}

pub struct LoadedModel {
    /// Imported graph, rooted at `root`.
    pub graph: Scene,
    pub root: NodeId,
    pub clips: Vec<AnimationClip>,
}

impl LoadedModel {
    /// Move the graph into `scene` as a new root and return a mixer playing
    /// the model's clips against it.
    pub fn attach_to(self, scene: &mut Scene) -> AnimationMixer {
        let offset = scene.attach(self.graph, None);
        AnimationMixer::new(self.clips, offset)
    }
}

pub fn model_root_transform() -> Transform {
    Transform {
        translation: MODEL_ORIGIN,
        rotation: Quat::IDENTITY,
        scale: Vec3::splat(MODEL_SCALE),
    }
}

pub fn import_model(bytes: &[u8]) -> Result<LoadedModel, AssetError> {
    let file = gltf::Gltf::from_slice(bytes)?;
    let blob = file.blob.as_deref();
    let document = &file.document;

    let buffers = document
        .buffers()
        .map(|b| match b.source() {
            gltf::buffer::Source::Bin => blob.ok_or(AssetError::MissingBinaryChunk),
            gltf::buffer::Source::Uri(_) => Err(AssetError::ExternalBuffer(b.index())),
        })
        .collect::<Result<Vec<&[u8]>, _>>()?;

    let gltf_scene = document
        .default_scene()
        .or_else(|| document.scenes().next())
        .ok_or(AssetError::NoScene)?;

    let mut graph = Scene::new(SceneSettings::default());
    let root = graph.add_node("model", model_root_transform(), None);
    let mut names = NameRegistry::default();

    // node names claim their unique form before any mesh name does
    let mut node_map: FnvHashMap<usize, NodeId> = FnvHashMap::default();
    let mut mesh_nodes: Vec<(NodeId, Option<String>, gltf::Mesh)> = Vec::new();
    let mut stack: Vec<(gltf::Node, NodeId)> = gltf_scene.nodes().map(|n| (n, root)).collect();
    while let Some((node, parent)) = stack.pop() {
        let (translation, rotation, scale) = node.transform().decomposed();
        let local = Transform {
            translation: Vec3::from_array(translation),
            rotation: Quat::from_array(rotation).normalize(),
            scale: Vec3::from_array(scale),
        };
        let name = node.name().map(|n| names.unique(n));
        let placeholder = format!("node_{}", node.index());
        let id = graph.add_node(name.clone().unwrap_or(placeholder), local, Some(parent));
        node_map.insert(node.index(), id);
        if let Some(mesh) = node.mesh() {
            mesh_nodes.push((id, name, mesh));
        }
        // reversed so siblings pop in document order
        let children: Vec<_> = node.children().collect();
        stack.extend(children.into_iter().rev().map(|c| (c, id)));
    }

    for (id, node_name, mesh) in mesh_nodes {
        let mesh_name = mesh
            .name()
            .map(str::to_owned)
            .unwrap_or_else(|| format!("mesh_{}", mesh.index()));
        let single = mesh.primitives().len() == 1;
        for primitive in mesh.primitives() {
            let part_name = match (&node_name, single) {
                (Some(n), true) => n.clone(),
                _ => names.unique(&mesh_name),
            };
            if single && node_name.is_none() {
                if let Some(node) = graph.node_mut(id) {
                    node.name = part_name.clone();
                }
            }
            let Some(data) = read_primitive(&primitive, &buffers, &part_name)? else {
                log::warn!(
                    "[asset] skipping {:?} primitive {} of '{}'",
                    primitive.mode(),
                    primitive.index(),
                    part_name
                );
                continue;
            };
            graph.add_part(id, part_name, data, read_material(&primitive));
        }
    }

    let clips = document
        .animations()
        .map(|anim| read_clip(&anim, &buffers, &node_map))
        .collect::<Vec<_>>();

    let interactive = graph.parts().filter(|(_, p)| p.is_interactive()).count();
    let fixed = graph.parts().filter(|(_, p)| p.fixed).count();
    log::info!(
        "[asset] imported {} parts ({} interactive, {} fixed), {} clips",
        graph.part_count(),
        interactive,
        fixed,
        clips.len()
    );

    Ok(LoadedModel { graph, root, clips })
}

/// Triangle-list geometry for a primitive; `None` for points and lines.
fn read_primitive(
    primitive: &gltf::Primitive,
    buffers: &[&[u8]],
    mesh_name: &str,
) -> Result<Option<MeshData>, AssetError> {
    use gltf::mesh::Mode;

    let mode = primitive.mode();
    if !matches!(mode, Mode::Triangles | Mode::TriangleStrip | Mode::TriangleFan) {
        return Ok(None);
    }
    let reader = primitive.reader(|buffer| buffers.get(buffer.index()).copied());
    let positions: Vec<[f32; 3]> = reader
        .read_positions()
        .ok_or_else(|| AssetError::MissingPositions {
            mesh: mesh_name.to_owned(),
            primitive: primitive.index(),
        })?
        .collect();
    let normals = reader.read_normals().map(|n| n.collect::<Vec<_>>());
    let indices = reader.read_indices().map(|i| i.into_u32().collect::<Vec<_>>());
    let indices = match mode {
        Mode::TriangleStrip | Mode::TriangleFan => {
            let base = indices.unwrap_or_else(|| (0..positions.len() as u32).collect());
            Some(to_triangle_list(&base, mode == Mode::TriangleFan))
        }
        _ => indices,
    };
    Ok(Some(MeshData::new(positions, normals, indices)))
}

/// Expand strip or fan indices into a plain triangle list. Odd strip
/// triangles are flipped to keep a consistent winding.
pub fn to_triangle_list(indices: &[u32], fan: bool) -> Vec<u32> {
    let count = indices.len().saturating_sub(2);
    let mut out = Vec::with_capacity(count * 3);
    for i in 0..count {
        let tri = if fan {
            [indices[0], indices[i + 1], indices[i + 2]]
        } else if i % 2 == 0 {
            [indices[i], indices[i + 1], indices[i + 2]]
        } else {
            [indices[i + 2], indices[i + 1], indices[i]]
        };
        out.extend_from_slice(&tri);
    }
    out
}

/// Normalise an authored name the way scene graphs expect to address it:
/// whitespace becomes `_` and the path characters `[ ] . : /` are dropped.
/// Blender's `Cylinder.007` therefore becomes `Cylinder007`.
pub fn sanitize_node_name(name: &str) -> String {
    name.chars()
        .filter(|c| !matches!(*c, '[' | ']' | '.' | ':' | '/'))
        .map(|c| if c.is_whitespace() { '_' } else { c })
        .collect()
}

/// Hands out sanitized names, suffixing repeats as `name_1`, `name_2`, ...
#[derive(Default)]
struct NameRegistry {
    used: FnvHashMap<String, u32>,
}

impl NameRegistry {
    fn unique(&mut self, raw: &str) -> String {
        let name = sanitize_node_name(raw);
        match self.used.get_mut(&name) {
            Some(count) => {
                *count += 1;
                format!("{}_{}", name, count)
            }
            None => {
                self.used.insert(name.clone(), 0);
                name
            }
        }
    }
}

fn read_material(primitive: &gltf::Primitive) -> Material {
    let material = primitive.material();
    let pbr = material.pbr_metallic_roughness();
    let [r, g, b, a] = pbr.base_color_factor();
    Material {
        color: Color::new(r, g, b),
        opacity: a,
        metallic: pbr.metallic_factor(),
        roughness: pbr.roughness_factor(),
    }
}

fn read_clip(
    anim: &gltf::Animation,
    buffers: &[&[u8]],
    node_map: &FnvHashMap<usize, NodeId>,
) -> AnimationClip {
    let mut tracks = Vec::new();
    for channel in anim.channels() {
        let Some(&node) = node_map.get(&channel.target().node().index()) else {
            continue;
        };
        let reader = channel.reader(|buffer| buffers.get(buffer.index()).copied());
        let (Some(inputs), Some(outputs)) = (reader.read_inputs(), reader.read_outputs()) else {
            continue;
        };
        let times: Vec<f32> = inputs.collect();
        let (interpolation, cubic) = match channel.sampler().interpolation() {
            gltf::animation::Interpolation::Linear => (Interpolation::Linear, false),
            gltf::animation::Interpolation::Step => (Interpolation::Step, false),
            // keep the keyframe values, drop the tangents
            gltf::animation::Interpolation::CubicSpline => (Interpolation::Linear, true),
        };
        let data = match outputs {
            ReadOutputs::Translations(v) => TrackData::Translation(Keyframes::new(
                times,
                keyframe_values(v.map(Vec3::from_array), cubic),
                interpolation,
            )),
            ReadOutputs::Rotations(v) => TrackData::Rotation(Keyframes::new(
                times,
                keyframe_values(v.into_f32().map(Quat::from_array), cubic),
                interpolation,
            )),
            ReadOutputs::Scales(v) => TrackData::Scale(Keyframes::new(
                times,
                keyframe_values(v.map(Vec3::from_array), cubic),
                interpolation,
            )),
            ReadOutputs::MorphTargetWeights(_) => continue,
        };
        tracks.push(Track { node, data });
    }
    let name = anim
        .name()
        .map(str::to_owned)
        .unwrap_or_else(|| format!("clip_{}", anim.index()));
    AnimationClip::new(name, tracks)
}

fn keyframe_values<T, I: Iterator<Item = T>>(values: I, cubic: bool) -> Vec<T> {
    if cubic {
        // in-tangent, value, out-tangent per key
        values.skip(1).step_by(3).collect()
    } else {
        values.collect()
    }
}
