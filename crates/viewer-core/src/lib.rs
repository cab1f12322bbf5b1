pub mod animation;
pub mod asset;
pub mod classify;
pub mod constants;
pub mod focus;
pub mod navigation;
pub mod orbit;
pub mod raycast;
pub mod scene;
pub mod state;
pub mod tween;
pub mod viewer;

pub static SCENE_WGSL: &str = include_str!("../shaders/scene.wgsl");

pub use asset::{import_model, AssetError, LoadedModel};
pub use classify::{PartInfo, PartKind};
pub use focus::{FocusCommand, FocusController, FocusEvent, FocusEvents, FocusState, SequenceKind};
pub use raycast::Ndc;
pub use scene::{PartId, Scene};
pub use state::*;
pub use viewer::Viewer;
