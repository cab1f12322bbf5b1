use crate::dom::Elements;
use crate::overlay;
use crate::render;
use instant::Instant;
use std::cell::RefCell;
use std::rc::Rc;
use viewer_core::Viewer;
use wasm_bindgen::closure::Closure;
use wasm_bindgen::JsCast;
use web_sys as web;

pub struct FrameContext<'a> {
    pub viewer: Rc<RefCell<Viewer>>,
    pub ui: Elements,
    pub gpu: Option<render::GpuState<'a>>,
    /// Scene generation last uploaded to the GPU.
    pub uploaded_generation: Option<u64>,
    pub last_instant: Instant,
}

impl<'a> FrameContext<'a> {
    pub fn frame(&mut self) {
        let now = Instant::now();
        let dt = now - self.last_instant;
        self.last_instant = now;
        let dt_sec = dt.as_secs_f32();

        let events = self.viewer.borrow_mut().frame(dt_sec);
        overlay::apply(&self.ui, &events);

        let Some(gpu) = self.gpu.as_mut() else {
            return;
        };
        gpu.resize_if_needed(self.ui.canvas.width(), self.ui.canvas.height());
        let viewer = self.viewer.borrow();
        let generation = viewer.scene.generation();
        if self.uploaded_generation != Some(generation) {
            gpu.upload_scene(&viewer.scene);
            self.uploaded_generation = Some(generation);
        }
        match gpu.render(&viewer.scene, &viewer.camera) {
            Ok(()) => {}
            Err(wgpu::SurfaceError::Lost | wgpu::SurfaceError::Outdated) => gpu.reconfigure(),
            Err(e) => log::warn!("[gpu] frame skipped: {:?}", e),
        }
    }
}

pub async fn init_gpu(canvas: &web::HtmlCanvasElement) -> Option<render::GpuState<'static>> {
    // the surface borrows the canvas for the page's lifetime
    let leaked_canvas = Box::leak(Box::new(canvas.clone()));
    match render::GpuState::new(leaked_canvas).await {
        Ok(g) => Some(g),
        Err(e) => {
            log::error!("WebGPU init error: {:?}", e);
            None
        }
    }
}

pub fn start_loop(frame_ctx: Rc<RefCell<FrameContext<'static>>>) {
    let tick: Rc<RefCell<Option<Closure<dyn FnMut()>>>> = Rc::new(RefCell::new(None));
    let tick_clone = tick.clone();
    let frame_ctx_tick = frame_ctx.clone();
    *tick.borrow_mut() = Some(Closure::wrap(Box::new(move || {
        frame_ctx_tick.borrow_mut().frame();
        if let (Some(w), Some(cb)) = (web::window(), tick_clone.borrow().as_ref()) {
            let _ = w.request_animation_frame(cb.as_ref().unchecked_ref());
        }
    }) as Box<dyn FnMut()>));
    if let (Some(w), Some(cb)) = (web::window(), tick.borrow().as_ref()) {
        let _ = w.request_animation_frame(cb.as_ref().unchecked_ref());
    }
}
