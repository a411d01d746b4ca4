#![cfg(target_arch = "wasm32")]
use crate::constants::*;
use crate::core::{
    default_tools, Lifecycle, SceneConfig, SceneContext, Tool, ViewportRouter, ViewportWindow,
    VisualMode,
};
use instant::Instant;
use std::cell::RefCell;
use std::rc::Rc;
use wasm_bindgen::prelude::*;
use wasm_bindgen::JsCast;
use wasm_bindgen_futures::spawn_local;
use web_sys as web;

mod api;
mod constants;
mod core;
mod dom;
mod events;
mod frame;
mod icons;
mod modal;
mod overlay;
mod render;
mod stars;

fn wire_canvas_resize(canvas: &web::HtmlCanvasElement) {
    dom::sync_canvas_backing_size(canvas);
    let canvas_resize = canvas.clone();
    let resize_closure = Closure::wrap(Box::new(move || {
        dom::sync_canvas_backing_size(&canvas_resize);
    }) as Box<dyn FnMut()>);
    if let Some(window) = web::window() {
        _ = window
            .add_event_listener_with_callback("resize", resize_closure.as_ref().unchecked_ref());
    }
    resize_closure.forget();
}

fn wire_teardown(lifecycle: &Lifecycle) {
    let lifecycle = lifecycle.clone();
    let closure = Closure::wrap(Box::new(move |ev: web::PageTransitionEvent| {
        if lifecycle.page_hidden(ev.persisted()) {
            log::info!("[scene] pagehide, stopping");
        } else if ev.persisted() {
            log::info!("[scene] pagehide into page cache, keeping scene");
        }
    }) as Box<dyn FnMut(_)>);
    if let Some(window) = web::window() {
        _ = window.add_event_listener_with_callback("pagehide", closure.as_ref().unchecked_ref());
    }
    closure.forget();
}

/// Section windows the scene is drawn into; the skills section is the only
/// interactive one.
fn section_windows() -> Vec<ViewportWindow> {
    vec![
        ViewportWindow::new(SKILLS_WINDOW_ID, true, VisualMode::Primary),
        ViewportWindow::new(PROJECTS_WINDOW_ID, false, VisualMode::Recessed),
        ViewportWindow::new(CONTACT_WINDOW_ID, false, VisualMode::Tilted),
    ]
}

fn scene_config(root: &web::Element) -> SceneConfig {
    let preset = root.get_attribute(CURVE_ATTR).unwrap_or_default();
    let config = SceneConfig::preset(&preset).unwrap_or_else(|e| {
        log::warn!("[scene] {}, using the ring", e);
        SceneConfig::ring()
    });
    match root
        .get_attribute(HOVER_SCALE_ATTR)
        .and_then(|s| s.trim().parse::<f32>().ok())
    {
        Some(factor) => config.with_hover_factor(factor),
        None => config,
    }
}

async fn load_tools(root: &web::Element) -> Vec<Tool> {
    let Some(endpoint) = root.get_attribute(TOOLS_ENDPOINT_ATTR) else {
        return default_tools();
    };
    let endpoint = match endpoint.trim() {
        "" => TOOLS_ENDPOINT,
        other => other,
    };
    match api::fetch_tool_catalog(endpoint).await {
        Ok(tools) => {
            log::info!("[api] {} tools from {}", tools.len(), endpoint);
            tools
        }
        Err(e) => {
            log::warn!("[api] tool catalog unavailable ({:#}), using defaults", e);
            default_tools()
        }
    }
}

async fn build_scene(
    document: &web::Document,
    root: &web::Element,
) -> anyhow::Result<Option<frame::SceneParts<'static>>> {
    let config = scene_config(root);
    let tools = load_tools(root).await;
    let scene = SceneContext::build(config, &tools)?;

    let canvas = dom::ensure_scene_canvas(document, root)?;
    // Maintain canvas internal pixel size to match CSS size * devicePixelRatio
    wire_canvas_resize(&canvas);

    let Some(gpu) = frame::init_gpu(&canvas, scene.path(), scene.registry().len()).await else {
        return Ok(None);
    };
    Ok(Some(frame::SceneParts {
        scene,
        router: ViewportRouter::new(section_windows()),
        gpu,
        canvas,
    }))
}

#[wasm_bindgen(start)]
pub fn start() -> Result<(), JsValue> {
    console_error_panic_hook::set_once();
    console_log::init_with_level(log::Level::Info).ok();
    log::info!("skills-orbit starting");

    spawn_local(async move {
        if let Err(e) = init().await {
            log::error!("init error: {:?}", e);
        }
    });
    Ok(())
}

async fn init() -> anyhow::Result<()> {
    let window = web::window().ok_or_else(|| anyhow::anyhow!("no window"))?;
    let document = window
        .document()
        .ok_or_else(|| anyhow::anyhow!("no document"))?;

    let lifecycle = Lifecycle::new();
    wire_teardown(&lifecycle);

    let stars = stars::StarsLayer::attach(&document);
    if stars.is_none() {
        log::info!("[stars] no #{} canvas, starfield off", STARS_CANVAS_ID);
    }

    let parts = match document.get_element_by_id(ROOT_ID) {
        Some(root) => build_scene(&document, &root).await?,
        None => {
            log::info!("[scene] no #{} element, scene off", ROOT_ID);
            None
        }
    };
    if parts.is_none() && stars.is_none() {
        return Ok(());
    }

    let icon_plan = parts
        .as_ref()
        .map(|p| icons::plan(p.scene.registry(), p.gpu.icon_layers()));
    let has_scene = parts.is_some();

    let frame_ctx = Rc::new(RefCell::new(frame::FrameContext {
        document: document.clone(),
        parts,
        stars,
        lifecycle: lifecycle.clone(),
        last_instant: Instant::now(),
    }));

    if has_scene {
        events::wire_input_handlers(events::InputWiring {
            ctx: frame_ctx.clone(),
        });
        modal::wire(&document);
    }
    if let Some((jobs, unassigned)) = icon_plan {
        icons::load_all(frame_ctx.clone(), lifecycle, jobs, unassigned);
    }

    frame::start_loop(frame_ctx);
    Ok(())
}
