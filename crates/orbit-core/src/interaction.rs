//! Pointer interaction state machine.
//!
//! The controller never touches the DOM or the renderer. Callers feed it
//! [`PointerInput`]s plus one ray-cast result per frame, and it answers with
//! [`Effect`]s for the frontend to apply. Phases:
//!
//! - `Idle`: nothing under the pointer, or the pointer is outside the region.
//! - `Hovering(h)`: the nearest hit inside the interactive region is `h`.
//! - `Dragging`: a press inside the region is active; pointer deltas orbit the
//!   camera and hover detection is frozen until release.

use crate::constants::{
    CLICK_DEBOUNCE_MS, CLICK_DRAG_TOLERANCE_PX, HOVER_SCALE_FACTOR, IDLE_SCALE,
    TOOLTIP_EDGE_MARGIN_PX, TOOLTIP_HEIGHT_PX, TOOLTIP_OFFSET_PX, TOOLTIP_WIDTH_PX,
};
use crate::geometry::ScreenRect;
use crate::registry::{ObjectHandle, ObjectRegistry};
use glam::Vec2;
use smallvec::{smallvec, SmallVec};

#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub enum Phase {
    Idle,
    Hovering(ObjectHandle),
    Dragging,
}

#[derive(Clone, Copy, Debug, PartialEq)]
pub enum PointerInput {
    Move(Vec2),
    /// Pointer left the document entirely.
    Leave,
    Press(Vec2),
    Release(Vec2),
    Click { at: Vec2, time_ms: f64 },
}

#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub enum Cursor {
    Default,
    Pointer,
    Grabbing,
}

impl Cursor {
    pub fn css(self) -> &'static str {
        match self {
            Cursor::Default => "default",
            Cursor::Pointer => "pointer",
            Cursor::Grabbing => "grabbing",
        }
    }
}

#[derive(Clone, Debug, PartialEq)]
pub enum Effect {
    ShowDetails { handle: ObjectHandle, anchor: Vec2 },
    MoveTooltip(Vec2),
    HideDetails,
    SetCursor(Cursor),
    /// Pointer delta (CSS px) to apply to the orbit camera.
    Orbit(Vec2),
    FetchProjects { handle: ObjectHandle, tool_key: String },
    OpenLink(String),
}

pub type Effects = SmallVec<[Effect; 4]>;

#[derive(Clone, Debug, Default, PartialEq)]
pub struct InteractionState {
    pub pointer: Option<Vec2>,
    pub hovered: Option<ObjectHandle>,
    pub dragging: bool,
    pub drag_anchor: Option<Vec2>,
}

/// Accepts a click only if the previous accepted click is at least
/// `window_ms` old. Rejected clicks do not extend the window.
#[derive(Clone, Debug)]
pub struct ClickDebounce {
    window_ms: f64,
    last_accepted: Option<f64>,
}

impl ClickDebounce {
    pub fn new(window_ms: f64) -> Self {
        Self {
            window_ms,
            last_accepted: None,
        }
    }

    pub fn accept(&mut self, now_ms: f64) -> bool {
        match self.last_accepted {
            Some(prev) if now_ms - prev < self.window_ms => false,
            _ => {
                self.last_accepted = Some(now_ms);
                true
            }
        }
    }
}

#[derive(Clone, Debug)]
pub struct InteractionConfig {
    pub debounce_ms: f64,
    pub idle_scale: f32,
    pub hover_scale: f32,
    pub open_links_directly: bool,
    pub drag_tolerance_px: f32,
}

impl Default for InteractionConfig {
    fn default() -> Self {
        Self {
            debounce_ms: CLICK_DEBOUNCE_MS,
            idle_scale: IDLE_SCALE,
            hover_scale: IDLE_SCALE * HOVER_SCALE_FACTOR,
            open_links_directly: false,
            drag_tolerance_px: CLICK_DRAG_TOLERANCE_PX,
        }
    }
}

#[derive(Clone, Debug)]
pub struct InteractionController {
    state: InteractionState,
    config: InteractionConfig,
    debounce: ClickDebounce,
    region: Option<ScreenRect>,
    drag_travel: f32,
    swallow_click: bool,
}

impl InteractionController {
    pub fn new(config: InteractionConfig) -> Self {
        Self {
            debounce: ClickDebounce::new(config.debounce_ms),
            config,
            state: InteractionState::default(),
            region: None,
            drag_travel: 0.0,
            swallow_click: false,
        }
    }

    pub fn state(&self) -> &InteractionState {
        &self.state
    }

    pub fn config(&self) -> &InteractionConfig {
        &self.config
    }

    pub fn region(&self) -> Option<ScreenRect> {
        self.region
    }

    pub fn phase(&self) -> Phase {
        if self.state.dragging {
            Phase::Dragging
        } else if let Some(h) = self.state.hovered {
            Phase::Hovering(h)
        } else {
            Phase::Idle
        }
    }

    fn inside(&self, p: Vec2) -> bool {
        self.region.map(|r| r.contains(p)).unwrap_or(false)
    }

    pub fn pointer_inside(&self) -> bool {
        self.state.pointer.map(|p| self.inside(p)).unwrap_or(false)
    }

    /// Pointer position to ray-cast this frame, if hover detection is live.
    pub fn hover_point(&self) -> Option<Vec2> {
        if self.state.dragging {
            return None;
        }
        self.state.pointer.filter(|p| self.inside(*p))
    }

    /// Update the interactive region from live layout. If the region moved
    /// out from under a stationary pointer the hover is dropped.
    pub fn set_region(&mut self, region: Option<ScreenRect>, registry: &mut ObjectRegistry) -> Effects {
        self.region = region;
        if !self.state.dragging && !self.pointer_inside() {
            return self.clear_hover(registry);
        }
        SmallVec::new()
    }

    pub fn handle(&mut self, input: PointerInput, registry: &mut ObjectRegistry) -> Effects {
        match input {
            PointerInput::Move(p) => self.on_move(p, registry),
            PointerInput::Leave => {
                self.state.pointer = None;
                self.state.dragging = false;
                self.state.drag_anchor = None;
                self.clear_hover(registry)
            }
            PointerInput::Press(p) => {
                self.state.pointer = Some(p);
                self.swallow_click = false;
                if !self.inside(p) {
                    return SmallVec::new();
                }
                self.state.dragging = true;
                self.state.drag_anchor = Some(p);
                self.drag_travel = 0.0;
                smallvec![Effect::SetCursor(Cursor::Grabbing)]
            }
            PointerInput::Release(p) => {
                self.state.pointer = Some(p);
                if !self.state.dragging {
                    return SmallVec::new();
                }
                self.state.dragging = false;
                self.state.drag_anchor = None;
                self.swallow_click = self.drag_travel > self.config.drag_tolerance_px;
                let cursor = if self.state.hovered.is_some() {
                    Cursor::Pointer
                } else {
                    Cursor::Default
                };
                smallvec![Effect::SetCursor(cursor)]
            }
            PointerInput::Click { at, time_ms } => self.on_click(at, time_ms, registry),
        }
    }

    fn on_move(&mut self, p: Vec2, registry: &mut ObjectRegistry) -> Effects {
        self.state.pointer = Some(p);
        if self.state.dragging {
            let anchor = self.state.drag_anchor.unwrap_or(p);
            let delta = p - anchor;
            self.state.drag_anchor = Some(p);
            self.drag_travel += delta.length();
            if delta == Vec2::ZERO {
                return SmallVec::new();
            }
            return smallvec![Effect::Orbit(delta)];
        }
        if !self.inside(p) {
            return self.clear_hover(registry);
        }
        if self.state.hovered.is_some() {
            return smallvec![Effect::MoveTooltip(p)];
        }
        SmallVec::new()
    }

    fn on_click(&mut self, at: Vec2, time_ms: f64, registry: &ObjectRegistry) -> Effects {
        if std::mem::take(&mut self.swallow_click) {
            return SmallVec::new();
        }
        if !self.inside(at) {
            return SmallVec::new();
        }
        let Some(handle) = self.state.hovered else {
            return SmallVec::new();
        };
        let Some(obj) = registry.find(handle) else {
            return SmallVec::new();
        };
        if !self.debounce.accept(time_ms) {
            log::debug!("[click] debounced");
            return SmallVec::new();
        }
        match (&obj.tool.link_ref, self.config.open_links_directly) {
            (Some(link), true) => smallvec![Effect::OpenLink(link.clone())],
            _ => smallvec![Effect::FetchProjects {
                handle,
                tool_key: obj.tool.key().to_string(),
            }],
        }
    }

    /// Apply this frame's ray-cast result. Ignored while dragging.
    pub fn apply_hit(&mut self, hit: Option<ObjectHandle>, registry: &mut ObjectRegistry) -> Effects {
        if self.state.dragging {
            return SmallVec::new();
        }
        let next = if self.pointer_inside() { hit } else { None };
        if next == self.state.hovered {
            return SmallVec::new();
        }
        registry.set_hovered(next, self.config.idle_scale, self.config.hover_scale);
        self.state.hovered = next;
        match (next, self.state.pointer) {
            (Some(handle), Some(anchor)) => smallvec![
                Effect::ShowDetails { handle, anchor },
                Effect::SetCursor(Cursor::Pointer)
            ],
            _ => smallvec![Effect::HideDetails, Effect::SetCursor(Cursor::Default)],
        }
    }

    fn clear_hover(&mut self, registry: &mut ObjectRegistry) -> Effects {
        if self.state.hovered.take().is_none() {
            return SmallVec::new();
        }
        registry.set_hovered(None, self.config.idle_scale, self.config.hover_scale);
        smallvec![Effect::HideDetails, Effect::SetCursor(Cursor::Default)]
    }
}

/// Tooltip top-left for a pointer position, flipped to the other side of the
/// pointer when it would overflow the viewport.
pub fn tooltip_position(pointer: Vec2, viewport: Vec2) -> Vec2 {
    let mut x = pointer.x + TOOLTIP_OFFSET_PX;
    let mut y = pointer.y + TOOLTIP_OFFSET_PX;
    if x + TOOLTIP_WIDTH_PX > viewport.x - TOOLTIP_EDGE_MARGIN_PX {
        x = pointer.x - TOOLTIP_WIDTH_PX - TOOLTIP_EDGE_MARGIN_PX;
    }
    if y + TOOLTIP_HEIGHT_PX > viewport.y - TOOLTIP_EDGE_MARGIN_PX {
        y = pointer.y - TOOLTIP_HEIGHT_PX - TOOLTIP_EDGE_MARGIN_PX;
    }
    Vec2::new(x, y)
}
