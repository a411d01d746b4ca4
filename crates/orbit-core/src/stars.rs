//! Starfield background simulation.
//!
//! Stars drift toward the viewer in a simple perspective projection and
//! twinkle; a single shooting star fires every few seconds. Units are canvas
//! pixels; rates are per second (converted from per-frame rates at 60 fps).

use rand::prelude::*;
use std::f32::consts::{FRAC_PI_4, TAU};

pub const STAR_COUNT: usize = 200;
const DRIFT_SPEED: f32 = 30.0;
const FOCAL: f32 = 200.0;
const TWINKLE_RATE: f32 = 60.0;
const SHOOTING_FADE_PER_SEC: f32 = 1.2;
const SHOOTING_MIN_INTERVAL_SEC: f32 = 5.0;
const SHOOTING_SPAWN_CHANCE: f32 = 0.3;

#[derive(Clone, Debug)]
struct Star {
    x: f32,
    y: f32,
    z: f32,
    size: f32,
    opacity: f32,
    twinkle_speed: f32,
    twinkle_phase: f32,
}

#[derive(Clone, Debug)]
struct ShootingStar {
    x: f32,
    y: f32,
    length: f32,
    speed: f32,
    angle: f32,
    opacity: f32,
    active: bool,
}

#[derive(Clone, Copy, Debug, PartialEq)]
pub struct StarPoint {
    pub x: f32,
    pub y: f32,
    pub radius: f32,
    pub opacity: f32,
}

#[derive(Clone, Copy, Debug, PartialEq)]
pub struct Streak {
    pub tail: [f32; 2],
    pub head: [f32; 2],
    pub opacity: f32,
}

pub struct Starfield {
    width: f32,
    height: f32,
    stars: Vec<Star>,
    shooting: ShootingStar,
    since_shooting: f32,
    interval: f32,
    rng: StdRng,
}

impl Starfield {
    pub fn new(width: f32, height: f32, count: usize, seed: u64) -> Self {
        let mut rng = StdRng::seed_from_u64(seed);
        let width = width.max(1.0);
        let height = height.max(1.0);
        let stars = (0..count)
            .map(|_| random_star(&mut rng, width, height))
            .collect();
        let interval = SHOOTING_MIN_INTERVAL_SEC + rng.gen::<f32>() * 10.0;
        let shooting = idle_shooting_star(&mut rng, width, height);
        Self {
            width,
            height,
            stars,
            shooting,
            since_shooting: 0.0,
            interval,
            rng,
        }
    }

    pub fn resize(&mut self, width: f32, height: f32) {
        self.width = width.max(1.0);
        self.height = height.max(1.0);
    }

    pub fn size(&self) -> (f32, f32) {
        (self.width, self.height)
    }

    pub fn update(&mut self, dt_sec: f32) {
        let dt = dt_sec.max(0.0);
        let (w, h) = (self.width, self.height);
        for i in 0..self.stars.len() {
            let star = &mut self.stars[i];
            star.z -= DRIFT_SPEED * dt;
            star.twinkle_phase += star.twinkle_speed * TWINKLE_RATE * dt;
            if star.z <= 0.0 {
                let mut fresh = random_star(&mut self.rng, w, h);
                fresh.z = w;
                self.stars[i] = fresh;
            }
        }

        self.since_shooting += dt;
        if !self.shooting.active
            && self.since_shooting > self.interval
            && self.rng.gen::<f32>() < SHOOTING_SPAWN_CHANCE
        {
            self.shooting = idle_shooting_star(&mut self.rng, w, h);
            self.shooting.active = true;
            self.shooting.opacity = 1.0;
            self.since_shooting = 0.0;
        }
        if self.shooting.active {
            let s = &mut self.shooting;
            s.x += s.angle.cos() * s.speed * dt;
            s.y += s.angle.sin() * s.speed * dt;
            s.opacity -= SHOOTING_FADE_PER_SEC * dt;
            if s.opacity <= 0.0 || s.x > w || s.y > h {
                s.active = false;
            }
        }
    }

    /// Projected, on-screen stars.
    pub fn points(&self) -> impl Iterator<Item = StarPoint> + '_ {
        let (w, h) = (self.width, self.height);
        self.stars.iter().filter_map(move |s| {
            let factor = FOCAL / s.z.max(1e-3);
            let x = (s.x - w / 2.0) * factor + w / 2.0;
            let y = (s.y - h / 2.0) * factor + h / 2.0;
            if x < 0.0 || x > w || y < 0.0 || y > h {
                return None;
            }
            Some(StarPoint {
                x,
                y,
                radius: (s.size * factor).max(0.5),
                opacity: s.opacity * (0.7 + 0.3 * s.twinkle_phase.sin()),
            })
        })
    }

    pub fn streak(&self) -> Option<Streak> {
        let s = &self.shooting;
        if !s.active || s.opacity <= 0.0 {
            return None;
        }
        Some(Streak {
            tail: [s.x - s.angle.cos() * s.length, s.y - s.angle.sin() * s.length],
            head: [s.x, s.y],
            opacity: s.opacity.min(1.0),
        })
    }
}

fn random_star(rng: &mut StdRng, w: f32, h: f32) -> Star {
    Star {
        x: rng.gen::<f32>() * w,
        y: rng.gen::<f32>() * h,
        z: rng.gen::<f32>() * w,
        size: rng.gen::<f32>() * 2.0 + 0.5,
        opacity: rng.gen::<f32>() * 0.5 + 0.3,
        twinkle_speed: rng.gen::<f32>() * 0.02 + 0.01,
        twinkle_phase: rng.gen::<f32>() * TAU,
    }
}

fn idle_shooting_star(rng: &mut StdRng, w: f32, h: f32) -> ShootingStar {
    ShootingStar {
        x: rng.gen::<f32>() * w,
        y: rng.gen::<f32>() * h * 0.5,
        length: rng.gen::<f32>() * 80.0 + 40.0,
        speed: (rng.gen::<f32>() * 10.0 + 5.0) * 60.0,
        angle: FRAC_PI_4 + rng.gen::<f32>() * 0.2 - 0.1,
        opacity: 0.0,
        active: false,
    }
}
