//! Interactive scene objects, one per tool.

use crate::constants::{IDLE_SCALE, ORBIT_SPEED};
use crate::curve::{wrap_unit, CurveShape};
use crate::geometry::{ray_sphere, Ray};
use crate::tool::{Rgb, Tool};
use fnv::FnvHashMap;
use glam::Vec3;
use rand::prelude::*;
use smallvec::SmallVec;

/// Renderable identity of an orbiting object. Stable for the registry's lifetime.
#[derive(Clone, Copy, Debug, PartialEq, Eq, Hash, PartialOrd, Ord)]
pub struct ObjectHandle(pub u32);

#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub enum IconState {
    Loading,
    Ready { layer: u32 },
    Failed,
}

/// What the renderer draws for an object.
#[derive(Clone, Copy, Debug, PartialEq)]
pub enum Visual {
    Icon { layer: u32 },
    /// Solid disc in the tool's colour; used while loading and after a failure.
    Fallback { color: Rgb },
}

#[derive(Clone, Debug)]
pub struct OrbitingObject {
    pub handle: ObjectHandle,
    pub tool: Tool,
    pub base_t: f32,
    pub speed: f32,
    pub t: f32,
    pub position: Vec3,
    pub current_scale: f32,
    pub target_scale: f32,
    pub hovered: bool,
    icon: IconState,
}

impl OrbitingObject {
    pub fn icon_state(&self) -> IconState {
        self.icon
    }

    pub fn visual(&self) -> Visual {
        match self.icon {
            IconState::Ready { layer } => Visual::Icon { layer },
            IconState::Loading | IconState::Failed => Visual::Fallback {
                color: self.tool.color,
            },
        }
    }
}

#[derive(Clone, Copy, Debug, PartialEq)]
pub struct Hit {
    pub handle: ObjectHandle,
    pub distance: f32,
}

#[derive(Clone, Debug)]
pub struct RegistryConfig {
    pub speed: f32,
    /// Extra per-object speed in `[0, speed_jitter)`, drawn from `seed`.
    pub speed_jitter: f32,
    pub seed: u64,
    pub idle_scale: f32,
}

impl Default for RegistryConfig {
    fn default() -> Self {
        Self {
            speed: ORBIT_SPEED,
            speed_jitter: 0.0,
            seed: 7,
            idle_scale: IDLE_SCALE,
        }
    }
}

#[derive(Clone, Debug, Default)]
pub struct ObjectRegistry {
    objects: Vec<OrbitingObject>,
    by_handle: FnvHashMap<ObjectHandle, usize>,
}

impl ObjectRegistry {
    /// One object per tool, spread evenly: `t_i = i / N`.
    pub fn build(tools: &[Tool], cfg: &RegistryConfig) -> Self {
        let n = tools.len();
        let mut rng = StdRng::seed_from_u64(cfg.seed);
        let mut objects = Vec::with_capacity(n);
        let mut by_handle = FnvHashMap::default();
        for (i, tool) in tools.iter().enumerate() {
            let handle = ObjectHandle(i as u32 + 1);
            let base_t = i as f32 / n as f32;
            let jitter = if cfg.speed_jitter > 0.0 {
                rng.gen::<f32>() * cfg.speed_jitter
            } else {
                0.0
            };
            by_handle.insert(handle, objects.len());
            objects.push(OrbitingObject {
                handle,
                tool: tool.clone(),
                base_t,
                speed: cfg.speed + jitter,
                t: base_t,
                position: Vec3::ZERO,
                current_scale: cfg.idle_scale,
                target_scale: cfg.idle_scale,
                hovered: false,
                icon: IconState::Loading,
            });
        }
        Self { objects, by_handle }
    }

    pub fn len(&self) -> usize {
        self.objects.len()
    }

    pub fn is_empty(&self) -> bool {
        self.objects.is_empty()
    }

    pub fn iter(&self) -> impl Iterator<Item = &OrbitingObject> {
        self.objects.iter()
    }

    pub fn iter_mut(&mut self) -> impl Iterator<Item = &mut OrbitingObject> {
        self.objects.iter_mut()
    }

    pub fn find(&self, handle: ObjectHandle) -> Option<&OrbitingObject> {
        self.by_handle.get(&handle).map(|&i| &self.objects[i])
    }

    pub fn find_mut(&mut self, handle: ObjectHandle) -> Option<&mut OrbitingObject> {
        match self.by_handle.get(&handle) {
            Some(&i) => self.objects.get_mut(i),
            None => None,
        }
    }

    pub fn find_by_name(&self, name: &str) -> Option<&OrbitingObject> {
        self.objects
            .iter()
            .find(|o| o.tool.name.eq_ignore_ascii_case(name))
    }

    pub fn mark_icon_ready(&mut self, handle: ObjectHandle, layer: u32) -> bool {
        match self.find_mut(handle) {
            Some(o) => {
                o.icon = IconState::Ready { layer };
                true
            }
            None => false,
        }
    }

    /// The object stays registered and pickable; only its visual changes.
    pub fn mark_icon_failed(&mut self, handle: ObjectHandle) -> bool {
        match self.find_mut(handle) {
            Some(o) => {
                log::warn!("[icons] using fallback disc for {}", o.tool.name);
                o.icon = IconState::Failed;
                true
            }
            None => false,
        }
    }

    /// Place every object at `t_i(now) = (base_i + now * speed_i) mod 1`.
    pub fn advance(&mut self, curve: &CurveShape, elapsed_sec: f64) {
        for o in &mut self.objects {
            let raw = (o.base_t as f64 + elapsed_sec * o.speed as f64).rem_euclid(1.0);
            o.t = wrap_unit(raw as f32);
            o.position = curve.position(o.t);
        }
    }

    /// Exponential approach of `current_scale` toward `target_scale`.
    pub fn smooth_scales(&mut self, dt_sec: f32, rate: f32) {
        let alpha = 1.0 - (-dt_sec.max(0.0) * rate).exp();
        for o in &mut self.objects {
            o.current_scale += (o.target_scale - o.current_scale) * alpha;
        }
    }

    pub fn hovered(&self) -> Option<ObjectHandle> {
        self.objects.iter().find(|o| o.hovered).map(|o| o.handle)
    }

    /// Move the hover flag. The previous object is reset before the new one is
    /// boosted, so at most one object is ever hovered.
    pub fn set_hovered(&mut self, next: Option<ObjectHandle>, idle_scale: f32, hover_scale: f32) {
        for o in &mut self.objects {
            if o.hovered && Some(o.handle) != next {
                o.hovered = false;
                o.target_scale = idle_scale;
            }
        }
        if let Some(h) = next {
            if let Some(o) = self.find_mut(h) {
                o.hovered = true;
                o.target_scale = hover_scale;
            }
        }
    }

    /// All intersections along the ray, nearest first. `ring_scale` is the
    /// window's ring scale override applied in X and Y around the origin.
    pub fn hits(&self, ray: &Ray, pick_radius: f32, ring_scale: f32) -> SmallVec<[Hit; 4]> {
        let mut hits: SmallVec<[Hit; 4]> = self
            .objects
            .iter()
            .filter_map(|o| {
                let center = o.position * Vec3::new(ring_scale, ring_scale, 1.0);
                let radius = pick_radius * o.current_scale * ring_scale;
                ray_sphere(ray.origin, ray.dir, center, radius).map(|d| Hit {
                    handle: o.handle,
                    distance: d,
                })
            })
            .collect();
        hits.sort_by(|a, b| a.distance.total_cmp(&b.distance));
        hits
    }

    pub fn pick(&self, ray: &Ray, pick_radius: f32, ring_scale: f32) -> Option<Hit> {
        self.hits(ray, pick_radius, ring_scale).first().copied()
    }
}
