#![cfg(target_arch = "wasm32")]
use instant::Instant;
use std::cell::RefCell;
use std::rc::Rc;
use viewer_core::Viewer;
use wasm_bindgen::prelude::*;
use wasm_bindgen_futures::spawn_local;

mod constants;
mod dom;
mod events;
mod frame;
mod input;
mod loader;
mod overlay;
mod progress;
mod render;

#[wasm_bindgen(start)]
pub fn start() -> Result<(), JsValue> {
    console_error_panic_hook::set_once();
    console_log::init_with_level(log::Level::Info).ok();
    log::info!("viewer-web starting");

    spawn_local(async move {
        if let Err(e) = init().await {
            log::error!("init error: {:?}", e);
        }
    });
    Ok(())
}

async fn init() -> anyhow::Result<()> {
    let document = dom::window_document().ok_or_else(|| anyhow::anyhow!("no document"))?;
    let ui = dom::Elements::lookup(&document)?;

    // Avoid grabbing a 2D context here to allow WebGPU to acquire the canvas
    dom::sync_canvas_backing_size(&ui.canvas);
    let (width, height) = dom::canvas_css_size(&ui.canvas);
    let viewer = Rc::new(RefCell::new(Viewer::new(width, height)));

    let wiring = events::InputWiring {
        viewer: viewer.clone(),
        ui: ui.clone(),
    };
    events::wire_resize(&wiring);
    events::wire_orbit_handlers(&wiring);
    events::wire_focus_handlers(&wiring);

    {
        let viewer = viewer.clone();
        loader::load_model(ui.clone(), constants::MODEL_PATH, move |model| {
            viewer.borrow_mut().attach_model(model);
        });
    }

    let gpu = frame::init_gpu(&ui.canvas).await;
    let frame_ctx = Rc::new(RefCell::new(frame::FrameContext {
        viewer,
        ui,
        gpu,
        uploaded_generation: None,
        last_instant: Instant::now(),
    }));
    frame::start_loop(frame_ctx);
    Ok(())
}
