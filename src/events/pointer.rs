use crate::core::PointerInput;
use crate::frame::FrameContext;
use glam::Vec2;
use std::cell::RefCell;
use std::rc::Rc;
use wasm_bindgen::JsCast;
use web_sys as web;

#[derive(Clone)]
pub struct InputWiring {
    pub ctx: Rc<RefCell<FrameContext<'static>>>,
}

/// Listeners live on the window: the scene canvas ignores pointer events so
/// the page underneath stays usable.
pub fn wire_input_handlers(w: InputWiring) {
    wire_pointer(&w, "pointermove", PointerInput::Move);
    wire_pointer(&w, "pointerdown", PointerInput::Press);
    wire_pointer(&w, "pointerup", PointerInput::Release);
    wire_click(&w);
    wire_mouseout(&w);
}

#[inline]
fn client_pos(ev: &web::MouseEvent) -> Vec2 {
    Vec2::new(ev.client_x() as f32, ev.client_y() as f32)
}

fn dispatch(w: &InputWiring, input: PointerInput) {
    let Ok(mut guard) = w.ctx.try_borrow_mut() else {
        return;
    };
    let ctx = &mut *guard;
    let Some(parts) = ctx.parts.as_mut() else {
        return;
    };
    let effects = parts.scene.handle(input);
    if !effects.is_empty() {
        super::apply_effects(&ctx.document, &parts.scene, &effects, &ctx.lifecycle);
    }
}

fn wire_pointer(w: &InputWiring, event: &str, make: fn(Vec2) -> PointerInput) {
    let w = w.clone();
    let closure = wasm_bindgen::closure::Closure::wrap(Box::new(move |ev: web::PointerEvent| {
        dispatch(&w, make(client_pos(&ev)));
    }) as Box<dyn FnMut(_)>);
    if let Some(wnd) = web::window() {
        _ = wnd.add_event_listener_with_callback(event, closure.as_ref().unchecked_ref());
    }
    closure.forget();
}

fn wire_click(w: &InputWiring) {
    let w = w.clone();
    let closure = wasm_bindgen::closure::Closure::wrap(Box::new(move |ev: web::MouseEvent| {
        dispatch(
            &w,
            PointerInput::Click {
                at: client_pos(&ev),
                time_ms: ev.time_stamp(),
            },
        );
    }) as Box<dyn FnMut(_)>);
    if let Some(wnd) = web::window() {
        _ = wnd.add_event_listener_with_callback("click", closure.as_ref().unchecked_ref());
    }
    closure.forget();
}

fn wire_mouseout(w: &InputWiring) {
    let w = w.clone();
    let closure = wasm_bindgen::closure::Closure::wrap(Box::new(move |ev: web::MouseEvent| {
        // No related target means the pointer left the document
        if ev.related_target().is_none() {
            dispatch(&w, PointerInput::Leave);
        }
    }) as Box<dyn FnMut(_)>);
    if let Some(wnd) = web::window() {
        _ = wnd.add_event_listener_with_callback("mouseout", closure.as_ref().unchecked_ref());
    }
    closure.forget();
}
