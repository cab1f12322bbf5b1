mod common;

use common::*;
use glam::Vec3;
use viewer_core::classify::info_for;
use viewer_core::focus::{
    home_pose, FocusCommand, FocusController, FocusEvent, FocusEvents, FocusState, FocusView,
    SequenceKind,
};
use viewer_core::orbit::OrbitControls;
use viewer_core::raycast::Ndc;
use viewer_core::scene::{PartId, Scene};
use viewer_core::state::{Camera, Color, Pose};

const CYL_POS: Vec3 = Vec3::new(-3.0, 0.0, 0.0);
const BOX_POS: Vec3 = Vec3::new(3.0, 0.0, 0.0);
const FIXED_POS: Vec3 = Vec3::new(0.0, 0.0, 0.0);
const PLANE_POS: Vec3 = Vec3::new(0.0, 0.0, 3.0);

struct Rig {
    scene: Scene,
    camera: Camera,
    controls: OrbitControls,
    focus: FocusController,
    cylinder: PartId,
    boxy: PartId,
    fixed: PartId,
    plane: PartId,
}

impl Rig {
    fn new() -> Self {
        let (scene, ids) = cube_scene(&[
            ("Cylinder002", CYL_POS),
            ("Box001", BOX_POS),
            ("Cylinder007", FIXED_POS),
            ("Plane", PLANE_POS),
        ]);
        Self {
            scene,
            camera: Camera::new(4.0 / 3.0),
            controls: OrbitControls::default(),
            focus: FocusController::new(),
            cylinder: ids[0],
            boxy: ids[1],
            fixed: ids[2],
            plane: ids[3],
        }
    }

    fn dispatch(&mut self, cmd: FocusCommand) -> FocusEvents {
        self.focus.dispatch(
            cmd,
            FocusView {
                scene: &mut self.scene,
                camera: &self.camera,
                controls: &mut self.controls,
            },
        )
    }

    fn tick(&mut self, dt: f32) -> FocusEvents {
        self.focus.tick(dt, &mut self.camera, &mut self.controls)
    }

    fn ndc(&self, world: Vec3) -> Ndc {
        ndc_of(&self.camera, world)
    }

    fn hover(&mut self, world: Vec3) -> FocusEvents {
        let ndc = self.ndc(world);
        self.dispatch(FocusCommand::PointerMove(ndc))
    }

    fn click(&mut self, ndc: Ndc) -> FocusEvents {
        self.dispatch(FocusCommand::Click {
            ndc,
            on_overlay: false,
        })
    }

    fn click_at(&mut self, world: Vec3) -> FocusEvents {
        let ndc = self.ndc(world);
        self.click(ndc)
    }

    fn color(&self, id: PartId) -> Color {
        self.scene.part(id).unwrap().color()
    }

    fn finish(&mut self) -> FocusEvents {
        assert!(self.tick(0.5).is_empty());
        self.tick(0.6)
    }

    fn zoom_in_on_cylinder(&mut self) {
        self.click_at(CYL_POS);
        self.finish();
        assert_eq!(self.focus.state(), FocusState::Zoomed(self.cylinder));
    }
}

fn zoom_pose(p: Vec3) -> Pose {
    Pose {
        eye: p + Vec3::new(0.0, 3.0, 5.0),
        target: p,
        fov_degrees: 30.0,
    }
}

#[test]
fn hover_paints_interactive_part_and_restores_on_exit() {
    let mut rig = Rig::new();
    let events = rig.hover(BOX_POS);
    assert_eq!(
        events.as_slice(),
        &[FocusEvent::Label(Some("Box001".to_string()))]
    );
    assert_eq!(rig.color(rig.boxy), Color::new(0.0, 1.0, 0.0));

    let events = rig.hover(CYL_POS);
    assert_eq!(
        events.as_slice(),
        &[FocusEvent::Label(Some("Cylinder002".to_string()))]
    );
    assert_eq!(rig.color(rig.boxy), BASE_GREY);
    assert_eq!(rig.color(rig.cylinder), Color::new(0.0, 0.0, 1.0));

    let events = rig.dispatch(FocusCommand::PointerMove(empty_ndc()));
    assert_eq!(events.as_slice(), &[FocusEvent::Label(None)]);
    assert_eq!(rig.color(rig.cylinder), BASE_GREY);
}

#[test]
fn hover_ignores_fixed_and_untyped_parts() {
    let mut rig = Rig::new();
    let events = rig.hover(FIXED_POS);
    assert_eq!(events.as_slice(), &[FocusEvent::Label(None)]);
    assert_eq!(rig.color(rig.fixed), BASE_GREY);

    let events = rig.hover(PLANE_POS);
    assert_eq!(events.as_slice(), &[FocusEvent::Label(None)]);
    assert_eq!(rig.color(rig.plane), BASE_GREY);
}

#[test]
fn hover_never_recolours_fixed_parts() {
    let mut rig = Rig::new();
    let marker = Color::new(0.9, 0.1, 0.1);
    let fixed = rig.fixed;
    rig.scene.part_mut(fixed).unwrap().set_color(marker);
    rig.hover(BOX_POS);
    rig.hover(FIXED_POS);
    assert_eq!(rig.color(fixed), marker);
}

#[test]
fn click_on_part_zooms_in() {
    let mut rig = Rig::new();
    let events = rig.click_at(CYL_POS);
    assert_eq!(
        events.as_slice(),
        &[
            FocusEvent::OverlayShown(info_for("Cylinder002")),
            FocusEvent::SequenceStarted(SequenceKind::ZoomIn),
        ]
    );
    assert_eq!(
        rig.focus.state(),
        FocusState::Transitioning(SequenceKind::ZoomIn)
    );
    assert!(!rig.controls.enabled());

    assert!(rig.tick(0.5).is_empty());
    assert!(rig.focus.state().is_transitioning());
    assert!(rig.camera.fov_degrees < 45.0 && rig.camera.fov_degrees > 30.0);

    let events = rig.tick(0.6);
    assert_eq!(
        events.as_slice(),
        &[FocusEvent::SequenceComplete(SequenceKind::ZoomIn)]
    );
    let state = rig.focus.state();
    assert!(state.is_zoomed_in());
    assert_eq!(state.current_focused(), Some(rig.cylinder));
    assert_eq!(rig.camera.pose(), zoom_pose(CYL_POS));
    assert!(rig.controls.enabled());
}

#[test]
fn clicks_that_miss_or_hit_inert_parts_do_nothing() {
    let mut rig = Rig::new();
    assert!(rig.click(empty_ndc()).is_empty());
    assert!(rig.click_at(FIXED_POS).is_empty());
    assert!(rig.click_at(PLANE_POS).is_empty());
    assert_eq!(rig.focus.state(), FocusState::Idle);
    assert!(rig.controls.enabled());
    assert_eq!(rig.camera.pose(), Camera::new(4.0 / 3.0).pose());
}

#[test]
fn clicks_during_a_transition_are_rejected() {
    let mut rig = Rig::new();
    rig.click_at(CYL_POS);
    rig.tick(0.3);
    assert!(rig.click_at(BOX_POS).is_empty());
    assert!(rig.click(empty_ndc()).is_empty());
    assert_eq!(
        rig.focus.state(),
        FocusState::Transitioning(SequenceKind::ZoomIn)
    );

    rig.tick(1.0);
    assert_eq!(rig.focus.state(), FocusState::Zoomed(rig.cylinder));
    assert_eq!(rig.camera.pose(), zoom_pose(CYL_POS));
}

#[test]
fn click_while_zoomed_resets_to_home() {
    let mut rig = Rig::new();
    rig.zoom_in_on_cylinder();

    let events = rig.click(empty_ndc());
    assert_eq!(
        events.as_slice(),
        &[
            FocusEvent::OverlayHidden,
            FocusEvent::SequenceStarted(SequenceKind::Reset),
        ]
    );
    assert_eq!(
        rig.focus.state(),
        FocusState::Transitioning(SequenceKind::Reset)
    );
    assert!(!rig.controls.enabled());

    let events = rig.finish();
    assert_eq!(
        events.as_slice(),
        &[FocusEvent::SequenceComplete(SequenceKind::Reset)]
    );
    assert_eq!(rig.focus.state(), FocusState::Idle);
    assert_eq!(rig.focus.state().current_focused(), None);
    assert_eq!(rig.camera.pose(), home_pose());
    assert_eq!(rig.camera.target, Vec3::new(0.0, 1.0, 0.0));
    assert!(rig.controls.enabled());
}

#[test]
fn click_on_another_part_while_zoomed_still_resets() {
    let mut rig = Rig::new();
    rig.zoom_in_on_cylinder();
    let events = rig.click_at(BOX_POS);
    assert!(events.contains(&FocusEvent::SequenceStarted(SequenceKind::Reset)));
}

#[test]
fn clicks_on_the_overlay_are_ignored() {
    let mut rig = Rig::new();
    rig.zoom_in_on_cylinder();
    let events = rig.dispatch(FocusCommand::Click {
        ndc: empty_ndc(),
        on_overlay: true,
    });
    assert!(events.is_empty());
    assert_eq!(rig.focus.state(), FocusState::Zoomed(rig.cylinder));
}

#[test]
fn close_while_zoomed_resets() {
    let mut rig = Rig::new();
    rig.zoom_in_on_cylinder();
    let events = rig.dispatch(FocusCommand::Close);
    assert_eq!(
        events.as_slice(),
        &[
            FocusEvent::OverlayHidden,
            FocusEvent::SequenceStarted(SequenceKind::Reset),
        ]
    );
    rig.finish();
    assert_eq!(rig.camera.pose(), home_pose());
}

#[test]
fn close_while_idle_only_hides_the_overlay() {
    let mut rig = Rig::new();
    let before = rig.camera.pose();
    for _ in 0..2 {
        let events = rig.dispatch(FocusCommand::Close);
        assert_eq!(events.as_slice(), &[FocusEvent::OverlayHidden]);
        assert_eq!(rig.focus.state(), FocusState::Idle);
    }
    assert!(rig.tick(1.0).is_empty());
    assert_eq!(rig.camera.pose(), before);
}

#[test]
fn close_during_transition_keeps_the_sequence() {
    let mut rig = Rig::new();
    rig.click_at(BOX_POS);
    rig.tick(0.2);
    let events = rig.dispatch(FocusCommand::Close);
    assert_eq!(events.as_slice(), &[FocusEvent::OverlayHidden]);
    assert_eq!(
        rig.focus.state(),
        FocusState::Transitioning(SequenceKind::ZoomIn)
    );
    // the sequence still lands; the panel is not raised again
    let events = rig.tick(1.0);
    assert_eq!(
        events.as_slice(),
        &[FocusEvent::SequenceComplete(SequenceKind::ZoomIn)]
    );
    assert_eq!(rig.focus.state(), FocusState::Zoomed(rig.boxy));
}

#[test]
fn hover_keeps_working_during_a_transition() {
    let mut rig = Rig::new();
    rig.click_at(CYL_POS);
    rig.tick(0.1);
    let events = rig.hover(BOX_POS);
    assert_eq!(
        events.as_slice(),
        &[FocusEvent::Label(Some("Box001".to_string()))]
    );
    assert_eq!(rig.color(rig.boxy), Color::new(0.0, 1.0, 0.0));
}

#[test]
fn tick_is_inert_without_a_sequence() {
    let mut rig = Rig::new();
    assert!(rig.tick(0.016).is_empty());
    rig.zoom_in_on_cylinder();
    assert!(rig.tick(1.0).is_empty());
    assert_eq!(rig.camera.pose(), zoom_pose(CYL_POS));
}

#[test]
fn full_cycle_can_repeat() {
    let mut rig = Rig::new();
    for _ in 0..2 {
        rig.zoom_in_on_cylinder();
        rig.dispatch(FocusCommand::Close);
        rig.finish();
        assert_eq!(rig.focus.state(), FocusState::Idle);
        assert_eq!(rig.camera.pose(), home_pose());
    }
}
