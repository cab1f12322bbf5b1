use crate::constants::{
    CANVAS_ID, CLOSE_BUTTON_ID, INFO_DESCRIPTION_ID, INFO_IMAGE_ID, INFO_PANEL_ID, INFO_TITLE_ID,
    LOADING_ID, NAME_LABEL_ID,
};
use wasm_bindgen::JsCast;
use web_sys as web;

#[inline]
pub fn window_document() -> Option<web::Document> {
    web::window().and_then(|w| w.document())
}

#[inline]
pub fn add_click_listener(element: &web::Element, mut handler: impl FnMut() + 'static) {
    let closure =
        wasm_bindgen::closure::Closure::wrap(Box::new(move || handler()) as Box<dyn FnMut()>);
    let _ = element.add_event_listener_with_callback("click", closure.as_ref().unchecked_ref());
    closure.forget();
}

pub fn sync_canvas_backing_size(canvas: &web::HtmlCanvasElement) {
    if let Some(w) = web::window() {
        let dpr = w.device_pixel_ratio();
        let rect = canvas.get_bounding_client_rect();
        let w_px = (rect.width() * dpr) as u32;
        let h_px = (rect.height() * dpr) as u32;
        canvas.set_width(w_px.max(1));
        canvas.set_height(h_px.max(1));
    }
}

/// CSS-pixel size of the canvas, the space pointer coordinates live in.
pub fn canvas_css_size(canvas: &web::HtmlCanvasElement) -> (f32, f32) {
    let rect = canvas.get_bounding_client_rect();
    (rect.width() as f32, rect.height() as f32)
}

/// Every page element the viewer touches. All are required.
#[derive(Clone)]
pub struct Elements {
    pub canvas: web::HtmlCanvasElement,
    pub loading: web::Element,
    pub name_label: web::Element,
    pub info_panel: web::Element,
    pub info_title: web::Element,
    pub info_description: web::Element,
    pub info_image: web::Element,
    pub close_button: web::Element,
}

impl Elements {
    pub fn lookup(document: &web::Document) -> anyhow::Result<Self> {
        let canvas = required(document, CANVAS_ID)?
            .dyn_into::<web::HtmlCanvasElement>()
            .map_err(|e| anyhow::anyhow!(format!("{:?}", e)))?;
        Ok(Self {
            canvas,
            loading: required(document, LOADING_ID)?,
            name_label: required(document, NAME_LABEL_ID)?,
            info_panel: required(document, INFO_PANEL_ID)?,
            info_title: required(document, INFO_TITLE_ID)?,
            info_description: required(document, INFO_DESCRIPTION_ID)?,
            info_image: required(document, INFO_IMAGE_ID)?,
            close_button: required(document, CLOSE_BUTTON_ID)?,
        })
    }
}

fn required(document: &web::Document, id: &str) -> anyhow::Result<web::Element> {
    document
        .get_element_by_id(id)
        .ok_or_else(|| anyhow::anyhow!("missing #{}", id))
}
