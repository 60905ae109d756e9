use dots_core::State;
use web_sys as web;

use crate::constants::{HELP_OVERLAY_ID, STATUS_ID};

#[inline]
pub fn show(document: &web::Document) {
    if let Some(el) = document.get_element_by_id(HELP_OVERLAY_ID) {
        _ = el.class_list().remove_1("hidden");
        // fallback for environments without CSS class
        _ = el.set_attribute("style", "");
    }
}

#[inline]
pub fn hide(document: &web::Document) {
    if let Some(el) = document.get_element_by_id(HELP_OVERLAY_ID) {
        _ = el.class_list().add_1("hidden");
        _ = el.set_attribute("style", "display:none");
    }
}

#[inline]
pub fn is_hidden(document: &web::Document) -> bool {
    if let Some(el) = document.get_element_by_id(HELP_OVERLAY_ID) {
        if el.class_list().contains("hidden") {
            return true;
        }
        return el
            .get_attribute("style")
            .map(|s| s.contains("display:none"))
            .unwrap_or(false);
    }
    false
}

#[inline]
pub fn toggle(document: &web::Document) {
    if is_hidden(document) {
        show(document);
    } else {
        hide(document);
    }
}

/// Show the current state name and, while a level is being fed, its value.
pub fn update_status(document: &web::Document, state: State, level: Option<f32>) {
    if let Some(el) = document.get_element_by_id(STATUS_ID) {
        let text = match level {
            Some(l) => format!("{} • level {:.0}px", state, l),
            None => state.to_string(),
        };
        el.set_text_content(Some(&text));
    }
}
