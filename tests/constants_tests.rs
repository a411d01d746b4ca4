// Host-side tests for front-end constants.
// The main crate is wasm-only, so we include the pure-Rust module directly.

#![allow(dead_code)]
mod constants {
    include!("../src/constants.rs");
}

use constants::*;

#[test]
#[allow(clippy::assertions_on_constants)]
fn uniform_slots_respect_dynamic_offset_alignment() {
    // WebGPU's minUniformBufferOffsetAlignment default
    assert_eq!(UNIFORM_SLOT_STRIDE % 256, 0);
    assert!(UNIFORM_SLOT_STRIDE >= 128);
}

#[test]
#[allow(clippy::assertions_on_constants)]
fn icon_texture_fits_default_limits() {
    assert!(ICON_TEXTURE_SIZE.is_power_of_two());
    assert!(ICON_TEXTURE_SIZE <= 2048);
    // Default maxTextureArrayLayers is 256
    assert!(MAX_ICON_LAYERS > 0 && MAX_ICON_LAYERS <= 256);
    // Rows must be 256-byte aligned for texture uploads
    assert_eq!((ICON_TEXTURE_SIZE * 4) % 256, 0);
}

#[test]
#[allow(clippy::assertions_on_constants)]
fn glow_and_path_values_are_sane() {
    assert!(GLOW_SCALE > 1.0);
    assert!(GLOW_Z_OFFSET > 0.0);
    assert!(PATH_LINE_ALPHA > 0.0 && PATH_LINE_ALPHA < 1.0);
    assert!(CLEAR_RGBA.iter().all(|c| (0.0..=1.0).contains(c)));
}

#[test]
fn element_ids_are_distinct() {
    let ids = [
        ROOT_ID,
        SKILLS_WINDOW_ID,
        PROJECTS_WINDOW_ID,
        CONTACT_WINDOW_ID,
        STARS_CANVAS_ID,
        SIDEBAR_ID,
        SIDEBAR_NAME_ID,
        SIDEBAR_CATEGORY_ID,
        SIDEBAR_DESC_ID,
        SIDEBAR_TAGS_ID,
        TOOLTIP_ID,
        TOOLTIP_NAME_ID,
        TOOLTIP_CATEGORY_ID,
        TOOLTIP_DESC_ID,
        MODAL_ID,
        MODAL_TITLE_ID,
        MODAL_BODY_ID,
        MODAL_CLOSE_ID,
        MODAL_TOOL_NAME_ID,
        MODAL_TOOL_CATEGORY_ID,
        MODAL_TOOL_DESCRIPTION_ID,
    ];
    for (i, a) in ids.iter().enumerate() {
        assert!(!a.is_empty());
        assert!(!a.contains(' '));
        assert!(ids[i + 1..].iter().all(|b| b != a), "duplicate id {}", a);
    }
}

#[test]
fn attributes_and_endpoints_are_well_formed() {
    for attr in [CURVE_ATTR, TOOLS_ENDPOINT_ATTR, HOVER_SCALE_ATTR] {
        assert!(attr.starts_with("data-"));
    }
    for ep in [PROJECTS_ENDPOINT, TOOLS_ENDPOINT] {
        assert!(ep.starts_with("/api/") && ep.ends_with('/'));
    }
}
