use glam::Vec2;
use smallvec::SmallVec;
use viewer_core::orbit::PointerButton;
use viewer_core::raycast::Ndc;

// Pure pointer helpers; no web_sys so they can be exercised on the host.

/// Map a DOM `MouseEvent.button` code.
#[inline]
pub fn button_from_dom(button: i16) -> Option<PointerButton> {
    match button {
        0 => Some(PointerButton::Primary),
        1 => Some(PointerButton::Middle),
        2 => Some(PointerButton::Secondary),
        _ => None,
    }
}

/// Client coordinates to NDC over an element whose top-left corner is at
/// `origin` and whose CSS size is `size`.
#[inline]
pub fn client_to_ndc(client: Vec2, origin: Vec2, size: Vec2) -> Ndc {
    let local = client - origin;
    Ndc::from_client(local.x, local.y, size.x, size.y)
}

/// Active touch pointers, in the order they went down.
#[derive(Default, Clone, Debug)]
pub struct TouchTracker {
    touches: SmallVec<[(i32, Vec2); 2]>,
}

impl TouchTracker {
    pub fn down(&mut self, pointer_id: i32, pos: Vec2) {
        match self.touches.iter_mut().find(|(id, _)| *id == pointer_id) {
            Some(slot) => slot.1 = pos,
            None => self.touches.push((pointer_id, pos)),
        }
    }

    /// Returns `false` for pointers that never went down.
    pub fn moved(&mut self, pointer_id: i32, pos: Vec2) -> bool {
        match self.touches.iter_mut().find(|(id, _)| *id == pointer_id) {
            Some(slot) => {
                slot.1 = pos;
                true
            }
            None => false,
        }
    }

    pub fn up(&mut self, pointer_id: i32) {
        self.touches.retain(|(id, _)| *id != pointer_id);
    }

    pub fn len(&self) -> usize {
        self.touches.len()
    }

    pub fn is_empty(&self) -> bool {
        self.touches.is_empty()
    }

    pub fn points(&self) -> SmallVec<[Vec2; 2]> {
        self.touches.iter().map(|(_, p)| *p).collect()
    }
}
