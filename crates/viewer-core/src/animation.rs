//! Keyframed node animation embedded in the model, played back in a loop.

use crate::scene::{NodeId, Scene};
use glam::{Quat, Vec3};

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Interpolation {
    Linear,
    Step,
}

pub trait Interpolate: Copy {
    fn interpolate(self, to: Self, t: f32) -> Self;
}

impl Interpolate for Vec3 {
    fn interpolate(self, to: Self, t: f32) -> Self {
        self.lerp(to, t)
    }
}

impl Interpolate for Quat {
    fn interpolate(self, to: Self, t: f32) -> Self {
        self.slerp(to, t)
    }
}

#[derive(Debug, Clone)]
pub struct Keyframes<T: Interpolate> {
    pub times: Vec<f32>,
    pub values: Vec<T>,
    pub interpolation: Interpolation,
}

impl<T: Interpolate> Keyframes<T> {
    pub fn new(times: Vec<f32>, values: Vec<T>, interpolation: Interpolation) -> Self {
        Self {
            times,
            values,
            interpolation,
        }
    }

    pub fn duration(&self) -> f32 {
        self.times.last().copied().unwrap_or(0.0)
    }

    /// Sample at `time`, holding the first/last value outside the key range.
    pub fn sample(&self, time: f32) -> Option<T> {
        let len = self.times.len().min(self.values.len());
        if len == 0 {
            return None;
        }
        // first index whose time is strictly after `time`
        let next = self.times[..len].partition_point(|&t| t <= time);
        if next == 0 {
            return Some(self.values[0]);
        }
        if next >= len {
            return Some(self.values[len - 1]);
        }
        let prev = next - 1;
        match self.interpolation {
            Interpolation::Step => Some(self.values[prev]),
            Interpolation::Linear => {
                let t0 = self.times[prev];
                let span = self.times[next] - t0;
                let alpha = if span > 0.0 { (time - t0) / span } else { 0.0 };
                Some(self.values[prev].interpolate(self.values[next], alpha))
            }
        }
    }
}

#[derive(Debug, Clone)]
pub enum TrackData {
    Translation(Keyframes<Vec3>),
    Rotation(Keyframes<Quat>),
    Scale(Keyframes<Vec3>),
}

#[derive(Debug, Clone)]
pub struct Track {
    /// Node index within the graph the clip was imported with.
    pub node: NodeId,
    pub data: TrackData,
}

#[derive(Debug, Clone)]
pub struct AnimationClip {
    pub name: String,
    pub duration: f32,
    pub tracks: Vec<Track>,
}

impl AnimationClip {
    pub fn new(name: String, tracks: Vec<Track>) -> Self {
        let duration = tracks
            .iter()
            .map(|t| match &t.data {
                TrackData::Translation(k) | TrackData::Scale(k) => k.duration(),
                TrackData::Rotation(k) => k.duration(),
            })
            .fold(0.0_f32, f32::max);
        Self {
            name,
            duration,
            tracks,
        }
    }

    /// Write the clip's pose at `time` into the scene's local transforms.
    pub fn apply(&self, time: f32, scene: &mut Scene, node_offset: usize) {
        for track in &self.tracks {
            let Some(node) = scene.node_mut(track.node + node_offset) else {
                continue;
            };
            match &track.data {
                TrackData::Translation(k) => {
                    if let Some(v) = k.sample(time) {
                        node.local.translation = v;
                    }
                }
                TrackData::Rotation(k) => {
                    if let Some(q) = k.sample(time) {
                        node.local.rotation = q.normalize();
                    }
                }
                TrackData::Scale(k) => {
                    if let Some(v) = k.sample(time) {
                        node.local.scale = v;
                    }
                }
            }
        }
    }
}

#[derive(Debug, Clone)]
struct ClipAction {
    clip: AnimationClip,
    time: f32,
}

/// Plays every attached clip at once, each looping over its own duration.
#[derive(Debug, Clone, Default)]
pub struct AnimationMixer {
    actions: Vec<ClipAction>,
    node_offset: usize,
}

impl AnimationMixer {
    /// `node_offset` maps the clips' node indices onto the scene they were
    /// attached to.
    pub fn new(clips: Vec<AnimationClip>, node_offset: usize) -> Self {
        Self {
            actions: clips
                .into_iter()
                .map(|clip| ClipAction { clip, time: 0.0 })
                .collect(),
            node_offset,
        }
    }

    pub fn is_empty(&self) -> bool {
        self.actions.is_empty()
    }

    pub fn clip_names(&self) -> impl Iterator<Item = &str> {
        self.actions.iter().map(|a| a.clip.name.as_str())
    }

    pub fn update(&mut self, dt_sec: f32, scene: &mut Scene) {
        if self.actions.is_empty() {
            return;
        }
        for action in &mut self.actions {
            action.time += dt_sec.max(0.0);
            if action.clip.duration > 0.0 {
                action.time %= action.clip.duration;
            }
            action.clip.apply(action.time, scene, self.node_offset);
        }
        scene.update_world_transforms();
    }
}
