pub mod pointer;

pub use pointer::{wire_input_handlers, InputWiring};

use crate::core::{Effect, Lifecycle, ModalContent, SceneContext, ToolSummary};
use crate::{api, dom, modal, overlay};
use wasm_bindgen_futures::spawn_local;
use web_sys as web;

/// Carry out what the interaction controller asked for.
pub fn apply_effects(
    document: &web::Document,
    scene: &SceneContext,
    effects: &[Effect],
    lifecycle: &Lifecycle,
) {
    for effect in effects {
        match effect {
            Effect::ShowDetails { handle, anchor } => {
                if let Some(obj) = scene.registry().find(*handle) {
                    overlay::show_details(document, &obj.tool, *anchor);
                }
            }
            Effect::MoveTooltip(p) => overlay::move_tooltip(document, *p),
            Effect::HideDetails => overlay::hide_details(document),
            Effect::SetCursor(cursor) => dom::set_body_cursor(document, cursor.css()),
            // Already applied to the camera by the scene
            Effect::Orbit(_) => {}
            Effect::FetchProjects { handle, tool_key } => {
                let tool = scene
                    .registry()
                    .find(*handle)
                    .map(|o| ToolSummary::from(&o.tool))
                    .unwrap_or_else(|| ToolSummary::named(tool_key));
                open_projects(document, tool_key.clone(), tool, lifecycle.clone());
            }
            Effect::OpenLink(url) => {
                log::info!("[click] opening {}", url);
                if let Some(w) = web::window() {
                    _ = w.open_with_url_and_target(url, "_blank");
                }
            }
        }
    }
}

fn open_projects(document: &web::Document, tool_key: String, tool: ToolSummary, lifecycle: Lifecycle) {
    log::info!("[click] fetching projects for {}", tool_key);
    modal::open_loading(document, &tool_key, tool.clone());
    let document = document.clone();
    spawn_local(async move {
        let result = api::fetch_projects(&tool_key).await;
        if !lifecycle.is_alive() {
            return;
        }
        if let Err(e) = &result {
            log::warn!("[api] projects for {}: {:#}", tool_key, e);
        }
        let content = ModalContent::from_result(tool, result);
        if !modal::render_for(&document, &tool_key, &content) {
            log::info!("[api] dropped stale projects response for {}", tool_key);
        }
    });
}
