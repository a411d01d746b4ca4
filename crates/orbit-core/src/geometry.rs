//! Screen rectangles, rays and the orbit camera.
//!
//! Screen-space values are CSS pixels in client coordinates (origin top-left,
//! y down), the same space `getBoundingClientRect` and pointer events use.

use crate::constants::{
    CAMERA_DISTANCE, CAMERA_FOVY_DEG, CAMERA_ZFAR, CAMERA_ZNEAR, PITCH_LIMIT,
};
use glam::{Mat4, Vec2, Vec3, Vec4};

#[derive(Clone, Copy, Debug, Default, PartialEq)]
pub struct ScreenRect {
    pub left: f32,
    pub top: f32,
    pub width: f32,
    pub height: f32,
}

impl ScreenRect {
    pub const fn new(left: f32, top: f32, width: f32, height: f32) -> Self {
        Self {
            left,
            top,
            width,
            height,
        }
    }

    #[inline]
    pub fn right(&self) -> f32 {
        self.left + self.width
    }

    #[inline]
    pub fn bottom(&self) -> f32 {
        self.top + self.height
    }

    /// Edges are inclusive.
    #[inline]
    pub fn contains(&self, p: Vec2) -> bool {
        p.x >= self.left && p.x <= self.right() && p.y >= self.top && p.y <= self.bottom()
    }

    #[inline]
    pub fn aspect(&self) -> f32 {
        self.width / self.height.max(1e-3)
    }

    pub fn is_degenerate(&self, min_size: f32) -> bool {
        !(self.width >= min_size && self.height >= min_size)
    }

    /// True when no part of the rect overlaps `viewport`.
    pub fn is_outside(&self, viewport: &ScreenRect) -> bool {
        self.bottom() < viewport.top
            || self.top > viewport.bottom()
            || self.right() < viewport.left
            || self.left > viewport.right()
    }

    /// Map a point inside the rect to normalized device coordinates (y up).
    pub fn to_ndc(&self, p: Vec2) -> Vec2 {
        let x = (p.x - self.left) / self.width.max(1e-3);
        let y = (p.y - self.top) / self.height.max(1e-3);
        Vec2::new(x * 2.0 - 1.0, 1.0 - y * 2.0)
    }
}

/// Integer rect in render-target pixels (origin top-left, as WebGPU expects
/// for both viewport and scissor).
#[derive(Clone, Copy, Debug, Default, PartialEq, Eq)]
pub struct DeviceRect {
    pub x: u32,
    pub y: u32,
    pub width: u32,
    pub height: u32,
}

impl DeviceRect {
    pub fn is_empty(&self) -> bool {
        self.width == 0 || self.height == 0
    }
}

#[derive(Clone, Copy, Debug, PartialEq)]
pub struct Ray {
    pub origin: Vec3,
    pub dir: Vec3,
}

/// Distance along the ray to the near intersection with a sphere, if any.
#[inline]
pub fn ray_sphere(ray_origin: Vec3, ray_dir: Vec3, center: Vec3, radius: f32) -> Option<f32> {
    let oc = ray_origin - center;
    let b = oc.dot(ray_dir);
    let c = oc.dot(oc) - radius * radius;
    let disc = b * b - c;
    if disc < 0.0 {
        return None;
    }
    let t = -b - disc.sqrt();
    (t >= 0.0).then_some(t)
}

/// Right-handed perspective camera.
#[derive(Clone, Debug)]
pub struct Camera {
    pub eye: Vec3,
    pub target: Vec3,
    pub up: Vec3,
    pub aspect: f32,
    pub fovy_radians: f32,
    pub znear: f32,
    pub zfar: f32,
}

impl Camera {
    pub fn projection_matrix(&self) -> Mat4 {
        Mat4::perspective_rh(self.fovy_radians, self.aspect, self.znear, self.zfar)
    }

    pub fn view_matrix(&self) -> Mat4 {
        Mat4::look_at_rh(self.eye, self.target, self.up)
    }

    pub fn view_proj(&self) -> Mat4 {
        self.projection_matrix() * self.view_matrix()
    }

    /// World-space ray through a point given in normalized device coordinates.
    pub fn ray_from_ndc(&self, ndc: Vec2) -> Ray {
        let inv = self.view_proj().inverse();
        let p_far = inv * Vec4::new(ndc.x, ndc.y, 1.0, 1.0);
        let p1: Vec3 = p_far.truncate() / p_far.w;
        Ray {
            origin: self.eye,
            dir: (p1 - self.eye).normalize(),
        }
    }

    /// Billboard axes in world space for camera-facing sprites.
    pub fn right_up(&self) -> (Vec3, Vec3) {
        let fwd = (self.target - self.eye).normalize();
        let right = fwd.cross(self.up).normalize();
        let up = right.cross(fwd);
        (right, up)
    }
}

/// Camera that orbits a fixed target; drag gestures rotate yaw and pitch.
#[derive(Clone, Debug)]
pub struct OrbitCamera {
    pub target: Vec3,
    pub distance: f32,
    pub yaw: f32,
    pub pitch: f32,
    pub fovy_radians: f32,
}

impl Default for OrbitCamera {
    fn default() -> Self {
        Self {
            target: Vec3::ZERO,
            distance: CAMERA_DISTANCE,
            yaw: 0.0,
            pitch: 0.0,
            fovy_radians: CAMERA_FOVY_DEG.to_radians(),
        }
    }
}

impl OrbitCamera {
    pub fn eye(&self) -> Vec3 {
        let (sy, cy) = self.yaw.sin_cos();
        let (sp, cp) = self.pitch.sin_cos();
        self.target + Vec3::new(sy * cp, sp, cy * cp) * self.distance
    }

    /// Rotate by a pointer delta in CSS pixels. Yaw follows +dx, pitch follows
    /// +dy and is clamped short of the poles.
    pub fn rotate_by(&mut self, delta: Vec2, sensitivity: f32) {
        self.yaw += delta.x * sensitivity;
        self.pitch = (self.pitch + delta.y * sensitivity).clamp(-PITCH_LIMIT, PITCH_LIMIT);
    }

    pub fn camera(&self, aspect: f32) -> Camera {
        Camera {
            eye: self.eye(),
            target: self.target,
            up: Vec3::Y,
            aspect: aspect.max(1e-3),
            fovy_radians: self.fovy_radians,
            znear: CAMERA_ZNEAR,
            zfar: CAMERA_ZFAR,
        }
    }
}
