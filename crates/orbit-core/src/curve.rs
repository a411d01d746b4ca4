//! Closed parametric paths the orbiting icons travel along.
//!
//! Every shape is evaluated from a normalized parameter `t`. Inputs are
//! wrapped into `[0, 1)` first, so callers may feed an ever-growing clock value
//! and still land on the same point each lap.

use crate::error::SceneError;
use glam::Vec3;
use std::f32::consts::TAU;

/// Wrap any finite parameter into `[0, 1)`.
#[inline]
pub fn wrap_unit(t: f32) -> f32 {
    if !t.is_finite() {
        return 0.0;
    }
    let w = t.rem_euclid(1.0);
    // rem_euclid can round up to exactly 1.0 for tiny negative inputs
    if w >= 1.0 {
        0.0
    } else {
        w
    }
}

#[derive(Clone, Debug, PartialEq)]
pub enum CurveShape {
    /// Flat circle in the XY plane.
    Circle { radius: f32 },
    /// Ellipse in the XY plane rotated by `tilt` radians, with `z = sin θ · depth`.
    Ellipse {
        radius_x: f32,
        radius_y: f32,
        tilt: f32,
        depth: f32,
    },
    /// Figure-eight (lemniscate of Bernoulli) lying mostly in XZ with a vertical lift.
    Lemniscate { radius: f32, lift: f32 },
    /// Closed Catmull-Rom spline through the control points.
    Spline { points: Vec<Vec3> },
}

impl CurveShape {
    pub fn spline(points: Vec<Vec3>) -> Result<Self, SceneError> {
        if points.len() < 3 {
            return Err(SceneError::SplineTooShort {
                needed: 3,
                got: points.len(),
            });
        }
        Ok(CurveShape::Spline { points })
    }

    pub fn position(&self, t: f32) -> Vec3 {
        let u = wrap_unit(t);
        let theta = u * TAU;
        match self {
            CurveShape::Circle { radius } => {
                Vec3::new(theta.cos() * radius, theta.sin() * radius, 0.0)
            }
            CurveShape::Ellipse {
                radius_x,
                radius_y,
                tilt,
                depth,
            } => {
                let x = theta.cos() * radius_x;
                let y = theta.sin() * radius_y;
                let (s, c) = tilt.sin_cos();
                Vec3::new(x * c - y * s, x * s + y * c, theta.sin() * depth)
            }
            CurveShape::Lemniscate { radius, lift } => {
                let (s, c) = theta.sin_cos();
                let scale = radius / (1.0 + s * s);
                Vec3::new(scale * c, lift * s * c, scale * s * c)
            }
            CurveShape::Spline { points } => catmull_rom_closed(points, u),
        }
    }

    /// Points along one full lap, first point repeated at the end so a line
    /// strip closes the loop.
    pub fn sample(&self, segments: usize) -> Vec<Vec3> {
        let n = segments.max(3);
        (0..=n)
            .map(|i| self.position(i as f32 / n as f32))
            .collect()
    }
}

fn catmull_rom_closed(points: &[Vec3], u: f32) -> Vec3 {
    let n = points.len();
    if n == 0 {
        return Vec3::ZERO;
    }
    let f = u * n as f32;
    let i = (f.floor() as usize).min(n - 1);
    let local = f - i as f32;
    let p0 = points[(i + n - 1) % n];
    let p1 = points[i];
    let p2 = points[(i + 1) % n];
    let p3 = points[(i + 2) % n];
    let t2 = local * local;
    let t3 = t2 * local;
    0.5 * ((2.0 * p1)
        + (p2 - p0) * local
        + (2.0 * p0 - 5.0 * p1 + 4.0 * p2 - p3) * t2
        + (3.0 * p1 - p0 - 3.0 * p2 + p3) * t3)
}
