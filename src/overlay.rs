use crate::constants::*;
use crate::core::{tooltip_position, Tool};
use crate::dom;
use glam::Vec2;
use web_sys as web;

fn viewport_size() -> Vec2 {
    let Some(w) = web::window() else {
        return Vec2::ZERO;
    };
    let width = w.inner_width().ok().and_then(|v| v.as_f64()).unwrap_or(0.0);
    let height = w.inner_height().ok().and_then(|v| v.as_f64()).unwrap_or(0.0);
    Vec2::new(width as f32, height as f32)
}

/// Populate and reveal the sidebar and the pointer tooltip for `tool`.
pub fn show_details(document: &web::Document, tool: &Tool, pointer: Vec2) {
    show_sidebar(document, tool);

    dom::set_text(document, TOOLTIP_NAME_ID, &tool.name);
    dom::set_text(document, TOOLTIP_CATEGORY_ID, &tool.category);
    dom::set_text(document, TOOLTIP_DESC_ID, &tool.description);
    if let Some(el) = document.get_element_by_id(TOOLTIP_ID) {
        _ = el.class_list().remove_1("hidden");
        _ = el.class_list().add_1("visible");
    }
    move_tooltip(document, pointer);
}

#[inline]
pub fn move_tooltip(document: &web::Document, pointer: Vec2) {
    if let Some(el) = dom::html_element(document, TOOLTIP_ID) {
        let pos = tooltip_position(pointer, viewport_size());
        let style = el.style();
        _ = style.set_property("left", &format!("{}px", pos.x));
        _ = style.set_property("top", &format!("{}px", pos.y));
        // fallback for environments without CSS class
        _ = style.set_property("display", "block");
    }
}

pub fn hide_details(document: &web::Document) {
    if let Some(el) = document.get_element_by_id(SIDEBAR_ID) {
        _ = el.class_list().remove_1("show");
    }
    if let Some(el) = dom::html_element(document, TOOLTIP_ID) {
        _ = el.class_list().remove_1("visible");
        _ = el.class_list().add_1("hidden");
        _ = el.style().set_property("display", "none");
    }
}

fn show_sidebar(document: &web::Document, tool: &Tool) {
    let Some(sidebar) = document.get_element_by_id(SIDEBAR_ID) else {
        return;
    };
    dom::set_text(document, SIDEBAR_NAME_ID, &tool.name.to_uppercase());
    dom::set_text(document, SIDEBAR_CATEGORY_ID, &tool.category);
    dom::set_text(document, SIDEBAR_DESC_ID, &tool.description);
    if let Some(tags) = document.get_element_by_id(SIDEBAR_TAGS_ID) {
        tags.set_inner_html("");
        for tag in &tool.tags {
            if let Ok(chip) = document.create_element("span") {
                chip.set_class_name("tool-tag");
                chip.set_text_content(Some(tag));
                _ = tags.append_child(&chip);
            }
        }
    }
    _ = sidebar.class_list().add_1("show");
}
