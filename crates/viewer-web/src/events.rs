use crate::constants::INFO_PANEL_SELECTOR;
use crate::dom::{self, Elements};
use crate::input::{self, TouchTracker};
use crate::overlay;
use glam::Vec2;
use std::cell::RefCell;
use std::rc::Rc;
use viewer_core::orbit::OrbitInput;
use viewer_core::{FocusCommand, Ndc, Viewer};
use wasm_bindgen::closure::Closure;
use wasm_bindgen::JsCast;
use web_sys as web;

pub struct InputWiring {
    pub viewer: Rc<RefCell<Viewer>>,
    pub ui: Elements,
}

fn listen_pointer(
    target: &web::EventTarget,
    event: &str,
    handler: impl FnMut(web::PointerEvent) + 'static,
) {
    let closure = Closure::wrap(Box::new(handler) as Box<dyn FnMut(_)>);
    let _ = target.add_event_listener_with_callback(event, closure.as_ref().unchecked_ref());
    closure.forget();
}

fn pointer_ndc(ev: &web::MouseEvent, canvas: &web::HtmlCanvasElement) -> Ndc {
    let rect = canvas.get_bounding_client_rect();
    input::client_to_ndc(
        Vec2::new(ev.client_x() as f32, ev.client_y() as f32),
        Vec2::new(rect.left() as f32, rect.top() as f32),
        Vec2::new(rect.width() as f32, rect.height() as f32),
    )
}

#[inline]
fn client_pos(ev: &web::MouseEvent) -> Vec2 {
    Vec2::new(ev.client_x() as f32, ev.client_y() as f32)
}

/// Whether the event originated inside the info panel.
fn on_overlay(ev: &web::Event) -> bool {
    ev.target()
        .and_then(|t| t.dyn_into::<web::Element>().ok())
        .and_then(|el| el.closest(INFO_PANEL_SELECTOR).ok().flatten())
        .is_some()
}

/// Hover, scene click and close control: the focus controller's inputs.
pub fn wire_focus_handlers(w: &InputWiring) {
    let Some(window) = web::window() else {
        return;
    };

    // pointermove
    {
        let viewer = w.viewer.clone();
        let ui = w.ui.clone();
        listen_pointer(&window, "pointermove", move |ev: web::PointerEvent| {
            let ndc = pointer_ndc(&ev, &ui.canvas);
            let events = viewer.borrow_mut().dispatch(FocusCommand::PointerMove(ndc));
            overlay::apply(&ui, &events);
        });
    }

    // click
    {
        let viewer = w.viewer.clone();
        let ui = w.ui.clone();
        let closure = Closure::wrap(Box::new(move |ev: web::MouseEvent| {
            let cmd = FocusCommand::Click {
                ndc: pointer_ndc(&ev, &ui.canvas),
                on_overlay: on_overlay(&ev),
            };
            let events = viewer.borrow_mut().dispatch(cmd);
            overlay::apply(&ui, &events);
        }) as Box<dyn FnMut(_)>);
        let _ = window.add_event_listener_with_callback("click", closure.as_ref().unchecked_ref());
        closure.forget();
    }

    // close control
    {
        let viewer = w.viewer.clone();
        let ui = w.ui.clone();
        dom::add_click_listener(&w.ui.close_button, move || {
            let events = viewer.borrow_mut().dispatch(FocusCommand::Close);
            overlay::apply(&ui, &events);
        });
    }
}

/// Mouse, wheel and touch input for orbit navigation on the canvas.
pub fn wire_orbit_handlers(w: &InputWiring) {
    let canvas = w.ui.canvas.clone();
    let touches = Rc::new(RefCell::new(TouchTracker::default()));

    // pointerdown
    {
        let viewer = w.viewer.clone();
        let touches = touches.clone();
        let canvas_target = canvas.clone();
        listen_pointer(&canvas, "pointerdown", move |ev: web::PointerEvent| {
            let pos = client_pos(&ev);
            let input = if ev.pointer_type() == "touch" {
                let mut t = touches.borrow_mut();
                t.down(ev.pointer_id(), pos);
                Some(OrbitInput::Touches(t.points()))
            } else {
                input::button_from_dom(ev.button())
                    .map(|button| OrbitInput::PointerDown { button, pos })
            };
            if let Some(input) = input {
                viewer.borrow_mut().orbit_input(input);
                let _ = canvas_target.set_pointer_capture(ev.pointer_id());
            }
        });
    }

    // pointermove
    {
        let viewer = w.viewer.clone();
        let touches = touches.clone();
        listen_pointer(&canvas, "pointermove", move |ev: web::PointerEvent| {
            let pos = client_pos(&ev);
            let input = if ev.pointer_type() == "touch" {
                let mut t = touches.borrow_mut();
                t.moved(ev.pointer_id(), pos)
                    .then(|| OrbitInput::Touches(t.points()))
            } else {
                Some(OrbitInput::PointerMove { pos })
            };
            if let Some(input) = input {
                viewer.borrow_mut().orbit_input(input);
            }
        });
    }

    // pointerup / pointercancel
    for name in ["pointerup", "pointercancel"] {
        let viewer = w.viewer.clone();
        let touches = touches.clone();
        listen_pointer(&canvas, name, move |ev: web::PointerEvent| {
            let input = if ev.pointer_type() == "touch" {
                let mut t = touches.borrow_mut();
                t.up(ev.pointer_id());
                OrbitInput::Touches(t.points())
            } else {
                OrbitInput::PointerUp
            };
            viewer.borrow_mut().orbit_input(input);
        });
    }

    // wheel
    {
        let viewer = w.viewer.clone();
        let closure = Closure::wrap(Box::new(move |ev: web::WheelEvent| {
            viewer.borrow_mut().orbit_input(OrbitInput::Wheel {
                delta_y: ev.delta_y() as f32,
            });
            ev.prevent_default();
        }) as Box<dyn FnMut(_)>);
        let _ = canvas.add_event_listener_with_callback("wheel", closure.as_ref().unchecked_ref());
        closure.forget();
    }

    // secondary button rotates, so keep the browser menu out of the way
    {
        let closure = Closure::wrap(Box::new(move |ev: web::Event| {
            ev.prevent_default();
        }) as Box<dyn FnMut(_)>);
        let _ = canvas
            .add_event_listener_with_callback("contextmenu", closure.as_ref().unchecked_ref());
        closure.forget();
    }
}

/// Keep the canvas backing store and the camera aspect in step with the window.
pub fn wire_resize(w: &InputWiring) {
    let viewer = w.viewer.clone();
    let canvas = w.ui.canvas.clone();
    let closure = Closure::wrap(Box::new(move || {
        dom::sync_canvas_backing_size(&canvas);
        let (width, height) = dom::canvas_css_size(&canvas);
        viewer.borrow_mut().resize(width, height);
    }) as Box<dyn FnMut()>);
    if let Some(window) = web::window() {
        let _ = window.add_event_listener_with_callback("resize", closure.as_ref().unchecked_ref());
    }
    closure.forget();
}
