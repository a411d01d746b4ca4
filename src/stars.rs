use crate::constants::{STARS_CANVAS_ID, STARS_SEED};
use crate::core::stars::{Starfield, STAR_COUNT};
use crate::core::MAX_FRAME_DELTA_SEC;
use std::f64::consts::TAU;
use wasm_bindgen::JsCast;
use web_sys as web;

/// 2D-canvas renderer for the background starfield.
pub struct StarsLayer {
    canvas: web::HtmlCanvasElement,
    ctx: web::CanvasRenderingContext2d,
    field: Starfield,
}

fn window_size() -> (u32, u32) {
    let Some(w) = web::window() else {
        return (0, 0);
    };
    let px = |v: Result<wasm_bindgen::JsValue, wasm_bindgen::JsValue>| {
        v.ok().and_then(|v| v.as_f64()).unwrap_or(0.0) as u32
    };
    (px(w.inner_width()), px(w.inner_height()))
}

impl StarsLayer {
    /// None when the page has no star canvas.
    pub fn attach(document: &web::Document) -> Option<Self> {
        let canvas: web::HtmlCanvasElement = document
            .get_element_by_id(STARS_CANVAS_ID)?
            .dyn_into()
            .ok()?;
        let ctx: web::CanvasRenderingContext2d =
            canvas.get_context("2d").ok()??.dyn_into().ok()?;
        let (w, h) = window_size();
        canvas.set_width(w.max(1));
        canvas.set_height(h.max(1));
        let field = Starfield::new(w.max(1) as f32, h.max(1) as f32, STAR_COUNT, STARS_SEED);
        log::info!("[stars] {} stars on {}x{}", STAR_COUNT, w, h);
        Some(Self { canvas, ctx, field })
    }

    fn sync_size(&mut self) {
        let (w, h) = window_size();
        if w == 0 || h == 0 || (w == self.canvas.width() && h == self.canvas.height()) {
            return;
        }
        self.canvas.set_width(w);
        self.canvas.set_height(h);
        self.field.resize(w as f32, h as f32);
    }

    pub fn frame(&mut self, dt_sec: f32) {
        self.sync_size();
        self.field.update(dt_sec.clamp(0.0, MAX_FRAME_DELTA_SEC));

        let ctx = &self.ctx;
        let (w, h) = self.field.size();
        ctx.clear_rect(0.0, 0.0, w as f64, h as f64);
        for star in self.field.points() {
            ctx.begin_path();
            _ = ctx.arc(star.x as f64, star.y as f64, star.radius as f64, 0.0, TAU);
            ctx.set_fill_style_str(&format!("rgba(255,255,255,{:.3})", star.opacity));
            ctx.fill();
        }
        if let Some(s) = self.field.streak() {
            ctx.begin_path();
            ctx.move_to(s.tail[0] as f64, s.tail[1] as f64);
            ctx.line_to(s.head[0] as f64, s.head[1] as f64);
            ctx.set_stroke_style_str(&format!("rgba(255,255,255,{:.3})", s.opacity));
            ctx.set_line_width(2.0);
            ctx.stroke();
        }
    }
}
