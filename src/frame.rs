use crate::core::{Lifecycle, SceneContext, ViewportRouter};
use crate::dom::DomLayout;
use crate::events;
use crate::render;
use crate::stars::StarsLayer;
use glam::Vec3;
use instant::Instant;
use std::cell::RefCell;
use std::rc::Rc;
use wasm_bindgen::closure::Closure;
use wasm_bindgen::JsCast;
use web_sys as web;

/// Everything the 3D scene needs each frame; absent when the page has no
/// scene root or WebGPU is unavailable.
pub struct SceneParts<'a> {
    pub scene: SceneContext,
    pub router: ViewportRouter,
    pub gpu: render::GpuState<'a>,
    pub canvas: web::HtmlCanvasElement,
}

pub struct FrameContext<'a> {
    pub document: web::Document,
    pub parts: Option<SceneParts<'a>>,
    pub stars: Option<StarsLayer>,
    pub lifecycle: Lifecycle,
    pub last_instant: Instant,
}

impl<'a> FrameContext<'a> {
    pub fn frame(&mut self) {
        let now = Instant::now();
        let dt_sec = (now - self.last_instant).as_secs_f32();
        self.last_instant = now;

        // Nothing is drawn for a hidden tab; the clamp absorbs the gap later
        if self.document.hidden() {
            return;
        }

        if let Some(stars) = &mut self.stars {
            stars.frame(dt_sec);
        }

        let Some(parts) = self.parts.as_mut() else {
            return;
        };
        parts
            .gpu
            .resize_if_needed(parts.canvas.width(), parts.canvas.height());
        let layout = DomLayout {
            document: &self.document,
            canvas: &parts.canvas,
        };
        let mut target = parts.gpu.begin_frame();
        let out = parts.scene.frame(dt_sec, &layout, &parts.router, &mut target);
        target.finish();

        if !out.effects.is_empty() {
            events::apply_effects(&self.document, &parts.scene, &out.effects, &self.lifecycle);
        }
    }

    /// Drop GPU resources and the starfield; the loop stops rescheduling.
    pub fn teardown(&mut self) {
        if self.parts.take().is_some() {
            log::info!("[scene] torn down");
        }
        self.stars = None;
    }
}

pub async fn init_gpu(
    canvas: &web::HtmlCanvasElement,
    path: &[Vec3],
    objects: usize,
) -> Option<render::GpuState<'static>> {
    // leak a canvas clone to satisfy 'static lifetime for surface
    let leaked_canvas = Box::leak(Box::new(canvas.clone()));
    match render::GpuState::new(leaked_canvas, path, objects).await {
        Ok(g) => Some(g),
        Err(e) => {
            log::error!("WebGPU init error: {:?}", e);
            None
        }
    }
}

pub fn start_loop(frame_ctx: Rc<RefCell<FrameContext<'static>>>) {
    let tick: Rc<RefCell<Option<Closure<dyn FnMut()>>>> = Rc::new(RefCell::new(None));
    let tick_clone = tick.clone();
    let frame_ctx_tick = frame_ctx.clone();
    *tick.borrow_mut() = Some(Closure::wrap(Box::new(move || {
        let alive = {
            let Ok(mut ctx) = frame_ctx_tick.try_borrow_mut() else {
                request_frame(&tick_clone);
                return;
            };
            if ctx.lifecycle.is_alive() {
                ctx.frame();
                true
            } else {
                ctx.teardown();
                false
            }
        };
        if alive {
            request_frame(&tick_clone);
        }
    }) as Box<dyn FnMut()>));
    request_frame(&tick);
}

fn request_frame(tick: &Rc<RefCell<Option<Closure<dyn FnMut()>>>>) {
    if let (Some(w), Some(cb)) = (web::window(), tick.borrow().as_ref()) {
        _ = w.request_animation_frame(cb.as_ref().unchecked_ref());
    }
}
