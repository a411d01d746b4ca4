//! Multi-window rendering of one shared scene.
//!
//! Each [`ViewportWindow`] names a DOM region. Every frame the router reads
//! the live rect of each region, clears the shared canvas once, then for each
//! visible window restricts viewport and scissor to that rect, applies the
//! window's visual overrides, and issues one render pass. Non-primary
//! overrides are reverted right after their pass.

use crate::constants::{MAX_WINDOWS, MIN_WINDOW_SIZE_PX};
use crate::geometry::{DeviceRect, ScreenRect};
use crate::scene::SceneSnapshot;
use glam::{Mat4, Vec2, Vec4};
use smallvec::SmallVec;

#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub enum VisualMode {
    /// Full-strength ring and backdrop; the interactive window.
    Primary,
    /// Slightly smaller ring, backdrop pushed down and faded.
    Recessed,
    /// Ring slightly smaller, backdrop rolled a little.
    Tilted,
}

impl VisualMode {
    pub fn parse(s: &str) -> Option<Self> {
        match s.trim().to_ascii_lowercase().as_str() {
            "primary" | "skills" => Some(VisualMode::Primary),
            "recessed" | "projects" => Some(VisualMode::Recessed),
            "tilted" | "contact" => Some(VisualMode::Tilted),
            _ => None,
        }
    }

    pub fn overrides(self) -> VisualOverrides {
        match self {
            VisualMode::Primary => VisualOverrides::NEUTRAL,
            VisualMode::Recessed => VisualOverrides {
                ring_scale: 0.92,
                ring_opacity: 1.0,
                backdrop_opacity: 0.85,
                backdrop_offset: Vec2::new(0.0, -0.2),
                backdrop_roll: 0.0,
            },
            VisualMode::Tilted => VisualOverrides {
                ring_scale: 0.95,
                ring_opacity: 1.0,
                backdrop_opacity: 0.95,
                backdrop_offset: Vec2::ZERO,
                backdrop_roll: -0.08,
            },
        }
    }
}

/// Per-window tweaks applied to the shared scene objects.
#[derive(Clone, Copy, Debug, PartialEq)]
pub struct VisualOverrides {
    pub ring_scale: f32,
    pub ring_opacity: f32,
    pub backdrop_opacity: f32,
    pub backdrop_offset: Vec2,
    pub backdrop_roll: f32,
}

impl VisualOverrides {
    pub const NEUTRAL: VisualOverrides = VisualOverrides {
        ring_scale: 1.0,
        ring_opacity: 1.0,
        backdrop_opacity: 1.0,
        backdrop_offset: Vec2::ZERO,
        backdrop_roll: 0.0,
    };
}

impl Default for VisualOverrides {
    fn default() -> Self {
        Self::NEUTRAL
    }
}

#[derive(Clone, Debug, PartialEq)]
pub struct ViewportWindow {
    pub region_id: String,
    pub interactive: bool,
    pub mode: VisualMode,
}

impl ViewportWindow {
    pub fn new(region_id: &str, interactive: bool, mode: VisualMode) -> Self {
        Self {
            region_id: region_id.to_string(),
            interactive,
            mode,
        }
    }
}

/// Live layout queries. Implemented over the DOM in the frontend and by
/// fixtures in tests.
pub trait LayoutSource {
    fn region_rect(&self, region_id: &str) -> Option<ScreenRect>;
    /// Visible viewport in CSS pixels.
    fn viewport(&self) -> ScreenRect;
    /// Render target size in device pixels.
    fn target_size(&self) -> (u32, u32);
}

/// Where one window lands on the render target.
#[derive(Clone, Copy, Debug, PartialEq)]
pub struct PassViewport {
    /// Window rect in CSS pixels; its aspect drives the projection.
    pub rect: ScreenRect,
    /// Viewport/scissor rect clipped to the target.
    pub device: DeviceRect,
    /// Clip-space correction for the part of the window cut off by clipping.
    pub crop: Mat4,
}

impl PassViewport {
    pub fn aspect(&self) -> f32 {
        self.rect.aspect()
    }
}

/// Backend hooks invoked by [`ViewportRouter::render_all`], in call order.
pub trait RenderTarget {
    /// Called once per frame, before `clear`, with the state every pass draws.
    fn prepare(&mut self, _scene: &SceneSnapshot<'_>) {}
    fn clear(&mut self);
    fn set_viewport(&mut self, viewport: &PassViewport);
    fn set_scissor(&mut self, rect: DeviceRect);
    fn apply_overrides(&mut self, overrides: &VisualOverrides);
    fn render(&mut self);
}

#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub enum SkipReason {
    MissingRegion,
    Degenerate,
    Offscreen,
}

#[derive(Clone, Debug, Default, PartialEq)]
pub struct RouterReport {
    pub rendered: SmallVec<[usize; 4]>,
    pub skipped: SmallVec<[(usize, SkipReason); 4]>,
}

#[derive(Clone, Debug)]
pub struct ViewportRouter {
    windows: Vec<ViewportWindow>,
    min_size: f32,
}

impl ViewportRouter {
    pub fn new(mut windows: Vec<ViewportWindow>) -> Self {
        if windows.len() > MAX_WINDOWS {
            log::warn!(
                "[viewport] {} windows registered, keeping the first {}",
                windows.len(),
                MAX_WINDOWS
            );
            windows.truncate(MAX_WINDOWS);
        }
        Self {
            windows,
            min_size: MIN_WINDOW_SIZE_PX,
        }
    }

    pub fn windows(&self) -> &[ViewportWindow] {
        &self.windows
    }

    pub fn interactive_window(&self) -> Option<&ViewportWindow> {
        self.windows.iter().find(|w| w.interactive)
    }

    fn visible_rect(&self, w: &ViewportWindow, layout: &impl LayoutSource) -> Result<ScreenRect, SkipReason> {
        let rect = layout
            .region_rect(&w.region_id)
            .ok_or(SkipReason::MissingRegion)?;
        if rect.is_degenerate(self.min_size) {
            return Err(SkipReason::Degenerate);
        }
        if rect.is_outside(&layout.viewport()) {
            return Err(SkipReason::Offscreen);
        }
        Ok(rect)
    }

    /// Rect and overrides of the interactive window when it is on screen.
    pub fn interactive_rect(&self, layout: &impl LayoutSource) -> Option<(ScreenRect, VisualOverrides)> {
        let w = self.interactive_window()?;
        let rect = self.visible_rect(w, layout).ok()?;
        Some((rect, w.mode.overrides()))
    }

    pub fn render_all(&self, layout: &impl LayoutSource, target: &mut impl RenderTarget) -> RouterReport {
        let mut report = RouterReport::default();
        target.clear();
        for (i, w) in self.windows.iter().enumerate() {
            let rect = match self.visible_rect(w, layout) {
                Ok(r) => r,
                Err(reason) => {
                    report.skipped.push((i, reason));
                    continue;
                }
            };
            let Some(vp) = pass_viewport(rect, layout) else {
                report.skipped.push((i, SkipReason::Offscreen));
                continue;
            };
            target.set_viewport(&vp);
            target.set_scissor(vp.device);
            target.apply_overrides(&w.mode.overrides());
            target.render();
            if w.mode != VisualMode::Primary {
                target.apply_overrides(&VisualOverrides::NEUTRAL);
            }
            report.rendered.push(i);
        }
        report
    }
}

/// Map a CSS-pixel window rect onto the render target, clipping to its
/// bounds. The returned crop matrix keeps the projection of a partially
/// clipped window identical to the unclipped one.
pub fn pass_viewport(rect: ScreenRect, layout: &impl LayoutSource) -> Option<PassViewport> {
    let vp = layout.viewport();
    let (tw, th) = layout.target_size();
    if tw == 0 || th == 0 || vp.width <= 0.0 || vp.height <= 0.0 {
        return None;
    }
    let sx = tw as f32 / vp.width;
    let sy = th as f32 / vp.height;
    let x0 = (rect.left - vp.left) * sx;
    let y0 = (rect.top - vp.top) * sy;
    let w = rect.width * sx;
    let h = rect.height * sy;

    let cx0 = x0.max(0.0).floor();
    let cy0 = y0.max(0.0).floor();
    let cx1 = (x0 + w).min(tw as f32).ceil();
    let cy1 = (y0 + h).min(th as f32).ceil();
    if cx1 <= cx0 || cy1 <= cy0 {
        return None;
    }
    let cw = cx1 - cx0;
    let ch = cy1 - cy0;

    let crop = Mat4::from_cols(
        Vec4::new(w / cw, 0.0, 0.0, 0.0),
        Vec4::new(0.0, h / ch, 0.0, 0.0),
        Vec4::new(0.0, 0.0, 1.0, 0.0),
        Vec4::new(
            (2.0 * (x0 - cx0) + w) / cw - 1.0,
            1.0 - (2.0 * (y0 - cy0) + h) / ch,
            0.0,
            1.0,
        ),
    );
    Some(PassViewport {
        rect,
        device: DeviceRect {
            x: cx0 as u32,
            y: cy0 as u32,
            width: cw as u32,
            height: ch as u32,
        },
        crop,
    })
}
