use crate::constants::*;
use crate::core::{ModalContent, ToolSummary};
use crate::dom;
use wasm_bindgen::JsCast;
use web_sys as web;

const TOOL_ATTR: &str = "data-tool";
const STATE_ATTR: &str = "data-state";

/// Show the modal for `tool_key` with a loading placeholder.
pub fn open_loading(document: &web::Document, tool_key: &str, tool: ToolSummary) {
    let Some(modal) = document.get_element_by_id(MODAL_ID) else {
        log::info!("[modal] no #{} element", MODAL_ID);
        return;
    };
    _ = modal.set_attribute(TOOL_ATTR, tool_key);
    render(document, &ModalContent::loading(tool));
    _ = modal.class_list().remove_1("hidden");
}

pub fn render(document: &web::Document, content: &ModalContent) {
    dom::set_text(document, MODAL_TITLE_ID, content.title());
    let tool = content.tool();
    dom::set_text(document, MODAL_TOOL_NAME_ID, &tool.name);
    dom::set_text(document, MODAL_TOOL_CATEGORY_ID, &tool.category);
    dom::set_text(document, MODAL_TOOL_DESCRIPTION_ID, &tool.description);
    if let Some(body) = document.get_element_by_id(MODAL_BODY_ID) {
        body.set_inner_html(&content.body_html());
    }
    if let Some(modal) = document.get_element_by_id(MODAL_ID) {
        _ = modal.set_attribute(STATE_ATTR, content.state_name());
    }
}

/// Render a fetch result only if the modal is still open for the same tool;
/// a slower earlier response must not replace a newer one.
pub fn render_for(document: &web::Document, tool_key: &str, content: &ModalContent) -> bool {
    let current = document
        .get_element_by_id(MODAL_ID)
        .and_then(|m| m.get_attribute(TOOL_ATTR));
    if current.as_deref() != Some(tool_key) {
        return false;
    }
    render(document, content);
    true
}

pub fn close(document: &web::Document) {
    if let Some(modal) = document.get_element_by_id(MODAL_ID) {
        _ = modal.class_list().add_1("hidden");
        _ = modal.remove_attribute(TOOL_ATTR);
    }
}

/// Close button, backdrop click and Escape.
pub fn wire(document: &web::Document) {
    let doc = document.clone();
    dom::add_click_listener(document, MODAL_CLOSE_ID, move |_| close(&doc));

    let doc = document.clone();
    dom::add_click_listener(document, MODAL_ID, move |ev| {
        let on_backdrop = ev
            .target()
            .and_then(|t| t.dyn_into::<web::Element>().ok())
            .map(|el| el.id() == MODAL_ID)
            .unwrap_or(false);
        if on_backdrop {
            close(&doc);
        }
    });

    let doc = document.clone();
    let closure = wasm_bindgen::closure::Closure::wrap(Box::new(move |ev: web::KeyboardEvent| {
        if ev.key() == "Escape" {
            close(&doc);
        }
    }) as Box<dyn FnMut(_)>);
    if let Some(wnd) = web::window() {
        _ = wnd.add_event_listener_with_callback("keydown", closure.as_ref().unchecked_ref());
    }
    closure.forget();
}
