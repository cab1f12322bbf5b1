use crate::constants::PANEL_ACTIVE_CLASS;
use crate::dom::Elements;
use viewer_core::{FocusEvent, PartInfo};
use web_sys as web;

#[inline]
fn set_visible(el: &web::Element, visible: bool) {
    let _ = el.set_attribute("style", if visible { "display:block" } else { "display:none" });
}

pub fn show_info(ui: &Elements, info: &PartInfo) {
    ui.info_title.set_text_content(Some(info.title));
    ui.info_description.set_text_content(Some(info.description));
    let _ = ui.info_image.set_attribute("src", info.image_url);
    let _ = ui.info_panel.class_list().add_1(PANEL_ACTIVE_CLASS);
}

#[inline]
pub fn hide_info(ui: &Elements) {
    let _ = ui.info_panel.class_list().remove_1(PANEL_ACTIVE_CLASS);
}

pub fn set_label(ui: &Elements, name: Option<&str>) {
    match name {
        Some(name) => {
            ui.name_label.set_text_content(Some(name));
            set_visible(&ui.name_label, true);
        }
        None => set_visible(&ui.name_label, false),
    }
}

#[inline]
pub fn set_loading(ui: &Elements, text: &str) {
    ui.loading.set_text_content(Some(text));
}

#[inline]
pub fn hide_loading(ui: &Elements) {
    set_visible(&ui.loading, false);
}

/// Reflect focus controller output on the page.
pub fn apply(ui: &Elements, events: &[FocusEvent]) {
    for ev in events {
        match ev {
            FocusEvent::Label(name) => set_label(ui, name.as_deref()),
            FocusEvent::OverlayShown(info) => show_info(ui, info),
            FocusEvent::OverlayHidden => hide_info(ui),
            FocusEvent::SequenceStarted(kind) => log::debug!("[ui] {:?} started", kind),
            FocusEvent::SequenceComplete(kind) => log::debug!("[ui] {:?} complete", kind),
        }
    }
}
