use crate::core::{LayoutSource, ScreenRect};
use wasm_bindgen::JsCast;
use web_sys as web;

#[inline]
pub fn window_document() -> Option<web::Document> {
    web::window().and_then(|w| w.document())
}

#[inline]
pub fn add_click_listener(
    document: &web::Document,
    element_id: &str,
    mut handler: impl FnMut(web::MouseEvent) + 'static,
) {
    if let Some(el) = document.get_element_by_id(element_id) {
        let closure = wasm_bindgen::closure::Closure::wrap(
            Box::new(move |ev: web::MouseEvent| handler(ev)) as Box<dyn FnMut(_)>,
        );
        let _ = el.add_event_listener_with_callback("click", closure.as_ref().unchecked_ref());
        closure.forget();
    }
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

#[inline]
pub fn element_rect(el: &web::Element) -> ScreenRect {
    let r = el.get_bounding_client_rect();
    ScreenRect::new(r.left() as f32, r.top() as f32, r.width() as f32, r.height() as f32)
}

pub fn set_text(document: &web::Document, id: &str, text: &str) {
    if let Some(el) = document.get_element_by_id(id) {
        el.set_text_content(Some(text));
    }
}

pub fn html_element(document: &web::Document, id: &str) -> Option<web::HtmlElement> {
    document
        .get_element_by_id(id)
        .and_then(|el| el.dyn_into::<web::HtmlElement>().ok())
}

pub fn set_body_cursor(document: &web::Document, css: &str) {
    if let Some(body) = document.body() {
        _ = body.style().set_property("cursor", css);
    }
}

/// Full-viewport WebGPU canvas inside `root`, reusing one if the page
/// already provides it.
pub fn ensure_scene_canvas(
    document: &web::Document,
    root: &web::Element,
) -> anyhow::Result<web::HtmlCanvasElement> {
    if let Some(existing) = root.query_selector("canvas").ok().flatten() {
        if let Ok(canvas) = existing.dyn_into::<web::HtmlCanvasElement>() {
            return Ok(canvas);
        }
    }
    let canvas: web::HtmlCanvasElement = document
        .create_element("canvas")
        .map_err(|e| anyhow::anyhow!("{:?}", e))?
        .dyn_into()
        .map_err(|e| anyhow::anyhow!("{:?}", e))?;
    // Overlay the page without eating its pointer events
    _ = canvas.set_attribute(
        "style",
        "position:fixed;inset:0;width:100vw;height:100vh;pointer-events:none;",
    );
    root.append_child(&canvas)
        .map_err(|e| anyhow::anyhow!("{:?}", e))?;
    Ok(canvas)
}

/// Live layout read straight from the DOM every frame.
pub struct DomLayout<'d> {
    pub document: &'d web::Document,
    pub canvas: &'d web::HtmlCanvasElement,
}

impl LayoutSource for DomLayout<'_> {
    fn region_rect(&self, region_id: &str) -> Option<ScreenRect> {
        self.document
            .get_element_by_id(region_id)
            .map(|el| element_rect(&el))
    }

    fn viewport(&self) -> ScreenRect {
        element_rect(self.canvas)
    }

    fn target_size(&self) -> (u32, u32) {
        (self.canvas.width(), self.canvas.height())
    }
}
