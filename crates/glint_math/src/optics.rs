//! Reflection and refraction of directions about a surface normal.

use crate::{unit_vector, Vec3};

/// Reflect a vector about a normal.
#[inline]
pub fn reflect(v: Vec3, n: Vec3) -> Vec3 {
    v - 2.0 * v.dot(n) * n
}

/// Refract `v` through a surface with normal `n` using Snell's law.
///
/// `eta_ratio` is the incident index over the transmitted index. Returns
/// `None` on total internal reflection.
pub fn refract(v: Vec3, n: Vec3, eta_ratio: f64) -> Option<Vec3> {
    let uv = unit_vector(v);
    let dt = uv.dot(n);
    let discriminant = 1.0 - eta_ratio * eta_ratio * (1.0 - dt * dt);
    if discriminant > 0.0 {
        Some(eta_ratio * (uv - n * dt) - n * discriminant.sqrt())
    } else {
        None
    }
}
