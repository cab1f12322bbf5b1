//! Scene graph: a node hierarchy with local transforms, and the renderable
//! parts hung off mesh nodes.

use crate::classify::{self, PartKind};
use crate::constants::{
    AMBIENT_HEX, AMBIENT_INTENSITY, BACKGROUND_HEX, DIRECTIONAL_HEX, DIRECTIONAL_INTENSITY,
    DIRECTIONAL_POSITION,
};
use crate::state::Color;
use glam::{Mat4, Quat, Vec3};
use smallvec::SmallVec;

pub type NodeId = usize;

#[derive(Clone, Copy, Debug, PartialEq, Eq, Hash, PartialOrd, Ord)]
pub struct PartId(pub usize);

#[derive(Clone, Copy, Debug, PartialEq)]
pub struct Transform {
    pub translation: Vec3,
    pub rotation: Quat,
    pub scale: Vec3,
}

impl Transform {
    pub const IDENTITY: Transform = Transform {
        translation: Vec3::ZERO,
        rotation: Quat::IDENTITY,
        scale: Vec3::ONE,
    };

    pub fn from_translation(translation: Vec3) -> Self {
        Self {
            translation,
            ..Self::IDENTITY
        }
    }

    pub fn matrix(&self) -> Mat4 {
        Mat4::from_scale_rotation_translation(self.scale, self.rotation, self.translation)
    }
}

impl Default for Transform {
    fn default() -> Self {
        Self::IDENTITY
    }
}

#[derive(Clone, Debug)]
pub struct Node {
    pub name: String,
    pub local: Transform,
    pub parent: Option<NodeId>,
    pub children: Vec<NodeId>,
    pub parts: SmallVec<[PartId; 1]>,
}

#[derive(Clone, Copy, Debug, PartialEq)]
pub struct Aabb {
    pub min: Vec3,
    pub max: Vec3,
}

impl Aabb {
    pub const EMPTY: Aabb = Aabb {
        min: Vec3::splat(f32::MAX),
        max: Vec3::splat(f32::MIN),
    };

    pub fn from_points<I: IntoIterator<Item = Vec3>>(points: I) -> Self {
        points.into_iter().fold(Self::EMPTY, |acc, p| Aabb {
            min: acc.min.min(p),
            max: acc.max.max(p),
        })
    }

    pub fn is_empty(&self) -> bool {
        self.min.x > self.max.x
    }
}

/// Indexed triangle geometry in the part's local space.
#[derive(Clone, Debug)]
pub struct MeshData {
    pub positions: Vec<[f32; 3]>,
    pub normals: Vec<[f32; 3]>,
    pub indices: Vec<u32>,
    pub bounds: Aabb,
}

impl MeshData {
    /// Build a mesh, filling in sequential indices and smooth normals when the
    /// source omits them.
    pub fn new(
        positions: Vec<[f32; 3]>,
        normals: Option<Vec<[f32; 3]>>,
        indices: Option<Vec<u32>>,
    ) -> Self {
        let indices = indices.unwrap_or_else(|| (0..positions.len() as u32).collect());
        let normals = match normals {
            Some(n) if n.len() == positions.len() => n,
            _ => smooth_normals(&positions, &indices),
        };
        let bounds = Aabb::from_points(positions.iter().map(|p| Vec3::from_array(*p)));
        Self {
            positions,
            normals,
            indices,
            bounds,
        }
    }

    pub fn triangles(&self) -> impl Iterator<Item = [Vec3; 3]> + '_ {
        self.indices.chunks_exact(3).filter_map(move |tri| {
            let a = self.positions.get(tri[0] as usize)?;
            let b = self.positions.get(tri[1] as usize)?;
            let c = self.positions.get(tri[2] as usize)?;
            Some([Vec3::from_array(*a), Vec3::from_array(*b), Vec3::from_array(*c)])
        })
    }
}

fn smooth_normals(positions: &[[f32; 3]], indices: &[u32]) -> Vec<[f32; 3]> {
    let mut acc = vec![Vec3::ZERO; positions.len()];
    for tri in indices.chunks_exact(3) {
        let [i0, i1, i2] = [tri[0] as usize, tri[1] as usize, tri[2] as usize];
        if i0 >= positions.len() || i1 >= positions.len() || i2 >= positions.len() {
            continue;
        }
        let a = Vec3::from_array(positions[i0]);
        let b = Vec3::from_array(positions[i1]);
        let c = Vec3::from_array(positions[i2]);
        let n = (b - a).cross(c - a);
        acc[i0] += n;
        acc[i1] += n;
        acc[i2] += n;
    }
    acc.into_iter()
        .map(|n| n.try_normalize().unwrap_or(Vec3::Y).to_array())
        .collect()
}

/// Per-part surface parameters. Every part owns its own copy, so recolouring
/// one part never bleeds into another that shared a source material.
#[derive(Clone, Copy, Debug, PartialEq)]
pub struct Material {
    pub color: Color,
    pub opacity: f32,
    pub metallic: f32,
    pub roughness: f32,
}

impl Default for Material {
    fn default() -> Self {
        Self {
            color: Color::WHITE,
            opacity: 1.0,
            metallic: 0.0,
            roughness: 1.0,
        }
    }
}

#[derive(Clone, Debug)]
pub struct Part {
    pub name: String,
    pub node: NodeId,
    pub mesh: MeshData,
    pub material: Material,
    pub kind: Option<PartKind>,
    pub fixed: bool,
    pub original_scale: Option<Vec3>,
    original_color: Color,
}

impl Part {
    /// Classify by name and capture the material colour as the original.
    pub fn new(name: String, node: NodeId, mesh: MeshData, material: Material) -> Self {
        let kind = classify::classify(&name);
        let fixed = classify::is_fixed(&name);
        Self {
            name,
            node,
            mesh,
            material,
            kind,
            fixed,
            original_scale: None,
            original_color: material.color,
        }
    }

    /// Typed and not fixed: reacts to hover and click.
    pub fn is_interactive(&self) -> bool {
        self.kind.is_some() && !self.fixed
    }

    pub fn color(&self) -> Color {
        self.material.color
    }

    pub fn set_color(&mut self, color: Color) {
        self.material.color = color;
    }

    pub fn original_color(&self) -> Color {
        self.original_color
    }

    pub fn restore_color(&mut self) {
        self.material.color = self.original_color;
    }
}

#[derive(Clone, Copy, Debug, PartialEq)]
pub struct AmbientLight {
    pub color: Color,
    pub intensity: f32,
}

#[derive(Clone, Copy, Debug, PartialEq)]
pub struct DirectionalLight {
    pub color: Color,
    pub intensity: f32,
    pub position: Vec3,
}

impl DirectionalLight {
    /// Direction from the lit surface towards the light, aimed at the origin.
    pub fn direction(&self) -> Vec3 {
        self.position.try_normalize().unwrap_or(Vec3::Y)
    }
}

#[derive(Clone, Copy, Debug, PartialEq)]
pub struct SceneSettings {
    pub background: Color,
    pub ambient: AmbientLight,
    pub directional: DirectionalLight,
}

impl Default for SceneSettings {
    fn default() -> Self {
        Self {
            background: Color::from_hex(BACKGROUND_HEX),
            ambient: AmbientLight {
                color: Color::from_hex(AMBIENT_HEX),
                intensity: AMBIENT_INTENSITY,
            },
            directional: DirectionalLight {
                color: Color::from_hex(DIRECTIONAL_HEX),
                intensity: DIRECTIONAL_INTENSITY,
                position: DIRECTIONAL_POSITION,
            },
        }
    }
}

#[derive(Clone, Debug, Default)]
pub struct Scene {
    pub settings: SceneSettings,
    nodes: Vec<Node>,
    parts: Vec<Part>,
    roots: Vec<NodeId>,
    world: Vec<Mat4>,
    generation: u64,
}

impl Scene {
    pub fn new(settings: SceneSettings) -> Self {
        Self {
            settings,
            ..Default::default()
        }
    }

    pub fn add_node(
        &mut self,
        name: impl Into<String>,
        local: Transform,
        parent: Option<NodeId>,
    ) -> NodeId {
        let id = self.nodes.len();
        let parent = parent.filter(|p| *p < id);
        let parent_world = parent.map_or(Mat4::IDENTITY, |p| self.world_matrix(p));
        self.nodes.push(Node {
            name: name.into(),
            local,
            parent,
            children: Vec::new(),
            parts: SmallVec::new(),
        });
        self.world.push(parent_world * local.matrix());
        match parent {
            Some(p) => self.nodes[p].children.push(id),
            None => self.roots.push(id),
        }
        id
    }

    /// Hang a new part off `node`. Returns `None` if the node does not exist.
    pub fn add_part(
        &mut self,
        node: NodeId,
        name: impl Into<String>,
        mesh: MeshData,
        material: Material,
    ) -> Option<PartId> {
        let owner = self.nodes.get_mut(node)?;
        let id = PartId(self.parts.len());
        owner.parts.push(id);
        let mut part = Part::new(name.into(), node, mesh, material);
        if part.fixed {
            part.original_scale = Some(owner.local.scale);
        }
        self.parts.push(part);
        self.generation += 1;
        Some(id)
    }

    pub fn node(&self, id: NodeId) -> Option<&Node> {
        self.nodes.get(id)
    }

    pub fn node_mut(&mut self, id: NodeId) -> Option<&mut Node> {
        self.nodes.get_mut(id)
    }

    pub fn nodes(&self) -> &[Node] {
        &self.nodes
    }

    pub fn roots(&self) -> &[NodeId] {
        &self.roots
    }

    pub fn part(&self, id: PartId) -> Option<&Part> {
        self.parts.get(id.0)
    }

    pub fn part_mut(&mut self, id: PartId) -> Option<&mut Part> {
        self.parts.get_mut(id.0)
    }

    pub fn parts(&self) -> impl Iterator<Item = (PartId, &Part)> {
        self.parts.iter().enumerate().map(|(i, p)| (PartId(i), p))
    }

    pub fn parts_mut(&mut self) -> impl Iterator<Item = &mut Part> {
        self.parts.iter_mut()
    }

    pub fn part_count(&self) -> usize {
        self.parts.len()
    }

    pub fn find_part(&self, name: &str) -> Option<PartId> {
        self.parts
            .iter()
            .position(|p| p.name == name)
            .map(PartId)
    }

    /// Bumped whenever parts are added, so renderers know to re-upload.
    pub fn generation(&self) -> u64 {
        self.generation
    }

    /// Move every node and part of `other` into this scene below `parent`
    /// (or as new roots). Returns the index offset applied to `other`'s nodes.
    pub fn attach(&mut self, other: Scene, parent: Option<NodeId>) -> usize {
        let node_offset = self.nodes.len();
        let part_offset = self.parts.len();
        let parent = parent.filter(|p| *p < node_offset);

        for mut node in other.nodes {
            node.parent = match node.parent {
                Some(p) => Some(p + node_offset),
                None => parent,
            };
            for c in &mut node.children {
                *c += node_offset;
            }
            for part in &mut node.parts {
                part.0 += part_offset;
            }
            self.nodes.push(node);
        }
        for root in other.roots {
            let id = root + node_offset;
            match parent {
                Some(p) => self.nodes[p].children.push(id),
                None => self.roots.push(id),
            }
        }
        for mut part in other.parts {
            part.node += node_offset;
            self.parts.push(part);
        }
        self.generation += 1;
        self.update_world_transforms();
        node_offset
    }

    /// Recompute every node's world matrix from the local transforms.
    pub fn update_world_transforms(&mut self) {
        self.world.resize(self.nodes.len(), Mat4::IDENTITY);
        let mut stack: Vec<(NodeId, Mat4)> =
            self.roots.iter().map(|r| (*r, Mat4::IDENTITY)).collect();
        while let Some((id, parent_world)) = stack.pop() {
            let Some(node) = self.nodes.get(id) else {
                continue;
            };
            let world = parent_world * node.local.matrix();
            self.world[id] = world;
            stack.extend(node.children.iter().map(|c| (*c, world)));
        }
    }

    pub fn world_matrix(&self, node: NodeId) -> Mat4 {
        self.world.get(node).copied().unwrap_or(Mat4::IDENTITY)
    }

    pub fn part_world_matrix(&self, id: PartId) -> Mat4 {
        self.part(id)
            .map_or(Mat4::IDENTITY, |p| self.world_matrix(p.node))
    }

    pub fn part_world_position(&self, id: PartId) -> Vec3 {
        self.part_world_matrix(id).w_axis.truncate()
    }
}
