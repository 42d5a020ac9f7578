use crate::constants::{MOTION_BUTTON_ID, SOUND_OVERLAY_ID, SOUND_PROGRESS_ID};
use web_sys as web;

const PANEL_STYLE: &str = "position:fixed;left:50%;bottom:24px;transform:translateX(-50%);\
color:#cfe7ff;font:13px system-ui;background:rgba(10,14,24,0.8);padding:8px 12px;\
border-radius:6px;border:1px solid rgba(80,110,150,0.35);text-align:center;";

const BUTTON_STYLE: &str = "position:fixed;right:16px;top:16px;color:#cfe7ff;\
font:13px system-ui;background:rgba(10,14,24,0.8);padding:6px 10px;border-radius:6px;\
border:1px solid rgba(80,110,150,0.35);cursor:pointer;";

/// Audio prompt shown until the asset is playing.
pub fn ensure_sound_prompt(document: &web::Document) {
    if document.get_element_by_id(SOUND_OVERLAY_ID).is_some() {
        return;
    }
    if let Ok(panel) = document.create_element("div") {
        panel.set_id(SOUND_OVERLAY_ID);
        _ = panel.set_attribute("style", PANEL_STYLE);
        panel.set_inner_html(&format!(
            "<div>tap anywhere for sound</div><div id=\"{}\"></div>",
            SOUND_PROGRESS_ID
        ));
        if let Some(body) = document.body() {
            _ = body.append_child(&panel);
        }
    }
}

/// Motion opt-in button, only created on touch-capable devices.
pub fn ensure_motion_button(document: &web::Document) {
    if document.get_element_by_id(MOTION_BUTTON_ID).is_some() {
        return;
    }
    if let Ok(button) = document.create_element("button") {
        button.set_id(MOTION_BUTTON_ID);
        _ = button.set_attribute("style", BUTTON_STYLE);
        button.set_inner_html("enable motion control");
        if let Some(body) = document.body() {
            _ = body.append_child(&button);
        }
    }
}

pub fn set_motion_label(document: &web::Document, label: &str) {
    if let Some(el) = document.get_element_by_id(MOTION_BUTTON_ID) {
        el.set_inner_html(label);
    }
}

/// Informational only; the loader does not wait on it.
pub fn set_progress(document: &web::Document, percent: u32) {
    if let Some(el) = document.get_element_by_id(SOUND_PROGRESS_ID) {
        el.set_inner_html(&format!("loading audio {percent}%"));
    }
}

pub fn hide_sound_prompt(document: &web::Document) {
    if let Some(el) = document.get_element_by_id(SOUND_OVERLAY_ID) {
        _ = el.set_attribute("style", "display:none");
    }
}
