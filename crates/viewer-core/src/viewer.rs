use crate::animation::AnimationMixer;
use crate::asset::LoadedModel;
use crate::focus::{FocusCommand, FocusController, FocusEvents, FocusState, FocusView};
use crate::navigation::PanLimits;
use crate::orbit::{OrbitControls, OrbitInput};
use crate::scene::{Scene, SceneSettings};
use crate::state::Camera;
use glam::Vec2;

/// The application driver minus the browser: one scene, one camera, orbit
/// navigation, the pan clamp, the focus controller and the clip mixer.
pub struct Viewer {
    pub scene: Scene,
    pub camera: Camera,
    pub controls: OrbitControls,
    pub pan_limits: PanLimits,
    focus: FocusController,
    mixer: AnimationMixer,
    viewport: Vec2,
}

impl Viewer {
    pub fn new(width: f32, height: f32) -> Self {
        let mut camera = Camera::new(1.0);
        camera.set_aspect(width, height);
        Self {
            scene: Scene::new(SceneSettings::default()),
            camera,
            controls: OrbitControls::default(),
            pan_limits: PanLimits::default(),
            focus: FocusController::new(),
            mixer: AnimationMixer::default(),
            viewport: Vec2::new(width, height),
        }
    }

    /// Attach an imported model and start playing its clips.
    pub fn attach_model(&mut self, model: LoadedModel) {
        self.mixer = model.attach_to(&mut self.scene);
        if !self.mixer.is_empty() {
            log::info!(
                "[viewer] playing clips: {}",
                self.mixer.clip_names().collect::<Vec<_>>().join(", ")
            );
        }
    }

    pub fn focus_state(&self) -> FocusState {
        self.focus.state()
    }

    pub fn viewport(&self) -> Vec2 {
        self.viewport
    }

    pub fn dispatch(&mut self, cmd: FocusCommand) -> FocusEvents {
        self.focus.dispatch(
            cmd,
            FocusView {
                scene: &mut self.scene,
                camera: &self.camera,
                controls: &mut self.controls,
            },
        )
    }

    pub fn orbit_input(&mut self, input: OrbitInput) {
        self.controls.handle(input, &self.camera, self.viewport);
    }

    /// One frame: clips, navigation (pan-clamped while idle), then the
    /// focus sequence.
    pub fn frame(&mut self, dt_sec: f32) -> FocusEvents {
        self.mixer.update(dt_sec, &mut self.scene);
        let changed = self.controls.update(&mut self.camera);
        if changed && self.focus.state().is_idle() {
            self.pan_limits.apply(&mut self.camera);
        }
        self.focus.tick(dt_sec, &mut self.camera, &mut self.controls)
    }

    pub fn resize(&mut self, width: f32, height: f32) {
        self.camera.set_aspect(width, height);
        self.viewport = Vec2::new(width, height);
    }
}
