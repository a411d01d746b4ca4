//! Scene context: everything the per-frame driver and the event handlers
//! share, owned in one place instead of module globals.

use crate::clock::{glow_opacity, light_intensity, AnimationClock, FrameTime};
use crate::constants::{
    DRAG_SENSITIVITY, HOVER_SCALE_FACTOR, IDLE_SCALE, INFINITY_LIFT, INFINITY_RADIUS,
    MAX_FRAME_DELTA_SEC, PATH_SEGMENTS, PICK_RADIUS, RING_DEPTH, RING_RADIUS_X, RING_RADIUS_Y,
    SCALE_SMOOTHING_RATE,
};
use crate::curve::CurveShape;
use crate::error::SceneError;
use crate::geometry::{OrbitCamera, ScreenRect};
use crate::interaction::{Effect, Effects, InteractionConfig, InteractionController, PointerInput};
use crate::registry::{Hit, ObjectHandle, ObjectRegistry, RegistryConfig};
use crate::tool::Tool;
use crate::viewport::{LayoutSource, RenderTarget, RouterReport, ViewportRouter, VisualOverrides};
use glam::{Vec2, Vec3};

#[derive(Clone, Debug)]
pub struct SceneConfig {
    pub curve: CurveShape,
    pub registry: RegistryConfig,
    pub interaction: InteractionConfig,
    pub pick_radius: f32,
    pub max_frame_delta: f32,
    pub drag_sensitivity: f32,
    pub scale_smoothing_rate: f32,
    pub path_segments: usize,
}

impl Default for SceneConfig {
    fn default() -> Self {
        Self::ring()
    }
}

impl SceneConfig {
    /// Evenly spaced tools on a slightly wobbling ellipse.
    pub fn ring() -> Self {
        Self {
            curve: CurveShape::Ellipse {
                radius_x: RING_RADIUS_X,
                radius_y: RING_RADIUS_Y,
                tilt: 0.0,
                depth: RING_DEPTH,
            },
            registry: RegistryConfig::default(),
            interaction: InteractionConfig::default(),
            pick_radius: PICK_RADIUS,
            max_frame_delta: MAX_FRAME_DELTA_SEC,
            drag_sensitivity: DRAG_SENSITIVITY,
            scale_smoothing_rate: SCALE_SMOOTHING_RATE,
            path_segments: PATH_SEGMENTS,
        }
    }

    /// Figure-eight path; objects drift apart slowly.
    pub fn infinity() -> Self {
        let mut cfg = Self::ring();
        cfg.curve = CurveShape::Lemniscate {
            radius: INFINITY_RADIUS,
            lift: INFINITY_LIFT,
        };
        cfg.registry.speed_jitter = 0.004;
        cfg
    }

    /// Tilted orbit with a bigger hover boost; clicks open the tool's link.
    pub fn atom() -> Self {
        let mut cfg = Self::ring();
        cfg.curve = CurveShape::Ellipse {
            radius_x: RING_RADIUS_X * 0.9,
            radius_y: RING_RADIUS_Y * 1.2,
            tilt: 0.35,
            depth: RING_DEPTH * 2.0,
        };
        cfg.interaction.hover_scale = IDLE_SCALE * 1.5;
        cfg.interaction.open_links_directly = true;
        cfg
    }

    pub fn preset(name: &str) -> Result<Self, SceneError> {
        match name.trim().to_ascii_lowercase().as_str() {
            "" | "ring" | "orbit" => Ok(Self::ring()),
            "infinity" => Ok(Self::infinity()),
            "atom" => Ok(Self::atom()),
            other => Err(SceneError::UnknownPreset(other.to_string())),
        }
    }

    /// Hover boost as a multiple of the idle scale, kept within 1.2–1.8.
    pub fn with_hover_factor(mut self, factor: f32) -> Self {
        let f = if factor.is_finite() {
            factor.clamp(1.2, 1.8)
        } else {
            HOVER_SCALE_FACTOR
        };
        self.interaction.hover_scale = self.interaction.idle_scale * f;
        self
    }
}

/// Read-only view of the state every render pass draws from.
#[derive(Clone, Copy, Debug)]
pub struct SceneSnapshot<'a> {
    pub orbit: &'a OrbitCamera,
    pub objects: &'a ObjectRegistry,
    pub path: &'a [Vec3],
    pub hovered: Option<ObjectHandle>,
    pub glow: f32,
    pub light: f32,
}

#[derive(Clone, Debug, Default)]
pub struct FrameOutput {
    pub time: FrameTime,
    /// Hover transitions produced by this frame's hit test.
    pub effects: Effects,
    pub report: RouterReport,
}

pub struct SceneContext {
    config: SceneConfig,
    registry: ObjectRegistry,
    controller: InteractionController,
    clock: AnimationClock,
    orbit: OrbitCamera,
    path: Vec<Vec3>,
}

impl SceneContext {
    pub fn build(config: SceneConfig, tools: &[Tool]) -> Result<Self, SceneError> {
        if tools.is_empty() {
            return Err(SceneError::NoTools);
        }
        let mut registry = ObjectRegistry::build(tools, &config.registry);
        registry.advance(&config.curve, 0.0);
        let path = config.curve.sample(config.path_segments);
        log::info!(
            "[scene] built {} objects on a {} path",
            registry.len(),
            curve_name(&config.curve)
        );
        Ok(Self {
            controller: InteractionController::new(config.interaction.clone()),
            clock: AnimationClock::new(config.max_frame_delta),
            orbit: OrbitCamera::default(),
            registry,
            path,
            config,
        })
    }

    pub fn config(&self) -> &SceneConfig {
        &self.config
    }

    pub fn registry(&self) -> &ObjectRegistry {
        &self.registry
    }

    pub fn registry_mut(&mut self) -> &mut ObjectRegistry {
        &mut self.registry
    }

    pub fn controller(&self) -> &InteractionController {
        &self.controller
    }

    pub fn orbit(&self) -> &OrbitCamera {
        &self.orbit
    }

    pub fn clock(&self) -> &AnimationClock {
        &self.clock
    }

    pub fn path(&self) -> &[Vec3] {
        &self.path
    }

    pub fn glow_opacity(&self) -> f32 {
        glow_opacity(self.clock.elapsed())
    }

    pub fn light_intensity(&self) -> f32 {
        light_intensity(self.clock.elapsed())
    }

    /// Feed one pointer event through the state machine. Orbit deltas are
    /// applied to the camera here; the rest is for the caller.
    pub fn handle(&mut self, input: PointerInput) -> Effects {
        let effects = self.controller.handle(input, &mut self.registry);
        for e in &effects {
            if let Effect::Orbit(delta) = e {
                self.orbit.rotate_by(*delta, self.config.drag_sensitivity);
            }
        }
        effects
    }

    /// Clock tick, curve positions and scale smoothing.
    pub fn advance(&mut self, raw_dt_sec: f32) -> FrameTime {
        let time = self.clock.tick(raw_dt_sec);
        self.registry.advance(&self.config.curve, time.elapsed);
        self.registry
            .smooth_scales(time.dt, self.config.scale_smoothing_rate);
        time
    }

    /// Nearest object under `pointer` when the scene is drawn into `rect`.
    pub fn pick(&self, pointer: Vec2, rect: ScreenRect, overrides: &VisualOverrides) -> Option<Hit> {
        let camera = self.orbit.camera(rect.aspect());
        let ray = camera.ray_from_ndc(rect.to_ndc(pointer));
        self.registry
            .pick(&ray, self.config.pick_radius, overrides.ring_scale)
    }

    /// Re-run hit testing against the interactive window's current rect.
    pub fn update_hover(&mut self, interactive: Option<(ScreenRect, VisualOverrides)>) -> Effects {
        let mut effects = self
            .controller
            .set_region(interactive.map(|(r, _)| r), &mut self.registry);
        let hit = match (self.controller.hover_point(), interactive) {
            (Some(p), Some((rect, overrides))) => self.pick(p, rect, &overrides).map(|h| h.handle),
            _ => None,
        };
        effects.extend(self.controller.apply_hit(hit, &mut self.registry));
        effects
    }

    pub fn snapshot(&self) -> SceneSnapshot<'_> {
        SceneSnapshot {
            orbit: &self.orbit,
            objects: &self.registry,
            path: &self.path,
            hovered: self.controller.state().hovered,
            glow: self.glow_opacity(),
            light: self.light_intensity(),
        }
    }

    /// One animation frame: tick, move objects, hit-test, then render every
    /// window exactly once.
    pub fn frame(
        &mut self,
        raw_dt_sec: f32,
        layout: &impl LayoutSource,
        router: &ViewportRouter,
        target: &mut impl RenderTarget,
    ) -> FrameOutput {
        let time = self.advance(raw_dt_sec);
        let effects = self.update_hover(router.interactive_rect(layout));
        target.prepare(&self.snapshot());
        let report = router.render_all(layout, target);
        FrameOutput {
            time,
            effects,
            report,
        }
    }
}

fn curve_name(curve: &CurveShape) -> &'static str {
    match curve {
        CurveShape::Circle { .. } => "circle",
        CurveShape::Ellipse { .. } => "ellipse",
        CurveShape::Lemniscate { .. } => "lemniscate",
        CurveShape::Spline { .. } => "spline",
    }
}
