//! Hover highlighting and the click-to-zoom / reset camera choreography.
//!
//! The controller is the only writer of the focus state. It has three stable
//! phases:
//!
//! - **Idle**: the user navigates freely; a click on an interactive part
//!   starts a zoom-in sequence.
//! - **Transitioning**: a zoom-in or reset sequence owns the camera and orbit
//!   input is disabled. Clicks are rejected.
//! - **Zoomed**: the camera rests on a part. Its overlay was shown when the
//!   zoom began and stays up unless the close control hid it mid-flight. Any
//!   click outside the overlay, or the close control, starts a reset.
//!
//! Input arrives as [`FocusCommand`]s through [`FocusController::dispatch`];
//! sequences advance on the frame clock through [`FocusController::tick`].
//! Both return the [`FocusEvent`]s the front end applies to the page.
//!
//! Hover is independent of the phase: every pointer sample restores the
//! original colour of all non-fixed parts, then paints the nearest hit if it
//! is interactive.

use crate::classify::{self, PartInfo};
use crate::constants::{
    FOCUS_TWEEN_SEC, HOME_EYE, HOME_TARGET, INITIAL_FOV_DEG, ZOOM_EYE_OFFSET, ZOOM_FOV_DEG,
};
use crate::orbit::OrbitControls;
use crate::raycast::{self, Ndc, Ray};
use crate::scene::{PartId, Scene};
use crate::state::{Camera, Pose};
use crate::tween::{Ease, PoseEases, PoseTween};
use smallvec::SmallVec;

#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub enum SequenceKind {
    ZoomIn,
    Reset,
}

#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub enum FocusState {
    Idle,
    Transitioning(SequenceKind),
    Zoomed(PartId),
}

impl FocusState {
    pub fn is_idle(self) -> bool {
        matches!(self, FocusState::Idle)
    }

    pub fn is_transitioning(self) -> bool {
        matches!(self, FocusState::Transitioning(_))
    }

    pub fn is_zoomed_in(self) -> bool {
        matches!(self, FocusState::Zoomed(_))
    }

    /// The focused part, present only while zoomed.
    pub fn current_focused(self) -> Option<PartId> {
        match self {
            FocusState::Zoomed(id) => Some(id),
            _ => None,
        }
    }
}

#[derive(Clone, Copy, Debug, PartialEq)]
pub enum FocusCommand {
    PointerMove(Ndc),
    /// `on_overlay` is set when the click landed inside the overlay panel;
    /// such clicks never pick the scene.
    Click { ndc: Ndc, on_overlay: bool },
    Close,
}

#[derive(Clone, Debug, PartialEq)]
pub enum FocusEvent {
    /// Hover label text, or `None` to hide it.
    Label(Option<String>),
    OverlayShown(&'static PartInfo),
    OverlayHidden,
    SequenceStarted(SequenceKind),
    SequenceComplete(SequenceKind),
}

pub type FocusEvents = SmallVec<[FocusEvent; 4]>;

/// Everything a command may read or write.
pub struct FocusView<'a> {
    pub scene: &'a mut Scene,
    pub camera: &'a Camera,
    pub controls: &'a mut OrbitControls,
}

#[derive(Clone, Debug)]
struct Sequence {
    kind: SequenceKind,
    /// Part to record on completion; only set for zoom-in.
    part: Option<PartId>,
    tween: PoseTween,
}

#[derive(Clone, Debug)]
enum Phase {
    Idle,
    Transitioning(Sequence),
    Zoomed(PartId),
}

#[derive(Clone, Debug)]
pub struct FocusController {
    phase: Phase,
}

impl Default for FocusController {
    fn default() -> Self {
        Self::new()
    }
}

impl FocusController {
    pub fn new() -> Self {
        Self { phase: Phase::Idle }
    }

    pub fn state(&self) -> FocusState {
        match &self.phase {
            Phase::Idle => FocusState::Idle,
            Phase::Transitioning(seq) => FocusState::Transitioning(seq.kind),
            Phase::Zoomed(id) => FocusState::Zoomed(*id),
        }
    }

    pub fn dispatch(&mut self, cmd: FocusCommand, view: FocusView<'_>) -> FocusEvents {
        let mut events = FocusEvents::new();
        match cmd {
            FocusCommand::PointerMove(ndc) => self.hover(ndc, view, &mut events),
            FocusCommand::Click { ndc, on_overlay } => {
                if !on_overlay {
                    self.click(ndc, view, &mut events);
                }
            }
            FocusCommand::Close => self.close(view, &mut events),
        }
        events
    }

    fn hover(&mut self, ndc: Ndc, view: FocusView<'_>, events: &mut FocusEvents) {
        for part in view.scene.parts_mut().filter(|p| !p.fixed) {
            part.restore_color();
        }
        let ray = Ray::from_camera(view.camera, ndc);
        let hovered = raycast::pick(view.scene, &ray)
            .and_then(|hit| view.scene.part_mut(hit.part))
            .filter(|part| part.is_interactive());
        match hovered {
            Some(part) => {
                if let Some(kind) = part.kind {
                    part.set_color(kind.highlight_color());
                }
                events.push(FocusEvent::Label(Some(part.name.clone())));
            }
            None => events.push(FocusEvent::Label(None)),
        }
    }

    fn click(&mut self, ndc: Ndc, view: FocusView<'_>, events: &mut FocusEvents) {
        match self.phase {
            Phase::Transitioning(_) => {
                log::debug!("[focus] click ignored during transition");
            }
            Phase::Zoomed(_) => self.begin_reset(view, events),
            Phase::Idle => {
                let ray = Ray::from_camera(view.camera, ndc);
                let target = raycast::pick(view.scene, &ray)
                    .map(|hit| hit.part)
                    .filter(|id| view.scene.part(*id).is_some_and(|p| p.is_interactive()));
                if let Some(id) = target {
                    self.begin_zoom(id, view, events);
                }
            }
        }
    }

    fn close(&mut self, view: FocusView<'_>, events: &mut FocusEvents) {
        match self.phase {
            Phase::Zoomed(_) => self.begin_reset(view, events),
            // nothing to undo; just make sure the panel is down
            Phase::Idle | Phase::Transitioning(_) => events.push(FocusEvent::OverlayHidden),
        }
    }

    fn begin_zoom(&mut self, id: PartId, view: FocusView<'_>, events: &mut FocusEvents) {
        let Some(part) = view.scene.part(id) else {
            return;
        };
        view.controls.set_enabled(false);
        let focus_point = view.scene.part_world_position(id);
        let info = classify::info_for(&part.name);
        log::info!("[focus] zoom-in on {}", part.name);

        let to = Pose {
            eye: focus_point + ZOOM_EYE_OFFSET,
            target: focus_point,
            fov_degrees: ZOOM_FOV_DEG,
        };
        let tween = PoseTween::new(
            view.camera.pose(),
            to,
            FOCUS_TWEEN_SEC,
            PoseEases::uniform(Ease::Power2InOut),
        );
        self.phase = Phase::Transitioning(Sequence {
            kind: SequenceKind::ZoomIn,
            part: Some(id),
            tween,
        });
        events.push(FocusEvent::OverlayShown(info));
        events.push(FocusEvent::SequenceStarted(SequenceKind::ZoomIn));
    }

    fn begin_reset(&mut self, view: FocusView<'_>, events: &mut FocusEvents) {
        view.controls.set_enabled(false);
        log::info!("[focus] reset to home view");
        let tween = PoseTween::new(
            view.camera.pose(),
            home_pose(),
            FOCUS_TWEEN_SEC,
            PoseEases {
                eye: Ease::Power3InOut,
                target: Ease::Power3InOut,
                fov: Ease::Power2InOut,
            },
        );
        self.phase = Phase::Transitioning(Sequence {
            kind: SequenceKind::Reset,
            part: None,
            tween,
        });
        events.push(FocusEvent::OverlayHidden);
        events.push(FocusEvent::SequenceStarted(SequenceKind::Reset));
    }

    /// Advance the active sequence by `dt_sec`, writing the camera pose. On
    /// the tick where all three tweens finish, the pose snaps to the end
    /// values, orbit input is re-enabled and the next stable phase begins.
    pub fn tick(
        &mut self,
        dt_sec: f32,
        camera: &mut Camera,
        controls: &mut OrbitControls,
    ) -> FocusEvents {
        let mut events = FocusEvents::new();
        let Phase::Transitioning(seq) = &mut self.phase else {
            return events;
        };
        let (pose, done) = seq.tween.advance(dt_sec);
        camera.set_pose(pose);
        if !done {
            return events;
        }

        camera.set_pose(seq.tween.end());
        controls.set_enabled(true);
        let (kind, part) = (seq.kind, seq.part);
        self.phase = match (kind, part) {
            (SequenceKind::ZoomIn, Some(id)) => Phase::Zoomed(id),
            _ => Phase::Idle,
        };
        log::debug!("[focus] {:?} complete", kind);
        events.push(FocusEvent::SequenceComplete(kind));
        events
    }
}

pub fn home_pose() -> Pose {
    Pose {
        eye: HOME_EYE,
        target: HOME_TARGET,
        fov_degrees: INITIAL_FOV_DEG,
    }
}
