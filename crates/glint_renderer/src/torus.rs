//! Torus primitive intersected through a quartic.
//!
//! Rays are moved into the torus frame, where the ring lies in the XY plane
//! around the origin. There a point is on the surface when
//! `(|p|^2 + R1^2 - R2^2)^2 = 4 R1^2 (px^2 + py^2)`, and substituting the ray
//! gives a quartic in `t`.

use crate::{HitRecord, Material};
use glint_math::{solve_quartic, unit_vector, Interval, Quat, Ray, Vec3};
use std::sync::Arc;

/// Roots at or below this are self-intersections of the ray origin.
const ROOT_EPSILON: f64 = 1e-4;

/// A torus around `axis`, centered at `center`.
#[derive(Debug, Clone)]
pub struct Torus {
    center: Vec3,
    axis: Vec3,
    /// Distance from the center to the middle of the tube
    major_radius: f64,
    /// Tube radius
    minor_radius: f64,
    /// World to torus frame
    to_local: Quat,
    material: Arc<Material>,
}

impl Torus {
    pub fn new(
        center: Vec3,
        axis: Vec3,
        major_radius: f64,
        minor_radius: f64,
        material: Arc<Material>,
    ) -> Self {
        let axis = unit_vector(axis);
        Self {
            center,
            axis,
            major_radius,
            minor_radius,
            to_local: Quat::from_rotation_arc(axis, Vec3::Z),
            material,
        }
    }

    pub fn center(&self) -> Vec3 {
        self.center
    }

    pub fn axis(&self) -> Vec3 {
        self.axis
    }

    pub fn hit(&self, ray: &Ray, ray_t: Interval) -> Option<HitRecord<'_>> {
        let o = self.to_local * (ray.origin() - self.center);
        let d = self.to_local * ray.direction();

        let r1_sq = self.major_radius * self.major_radius;
        let r2_sq = self.minor_radius * self.minor_radius;

        let g = 4.0 * r1_sq * (d.x * d.x + d.y * d.y);
        let h = 8.0 * r1_sq * (o.x * d.x + o.y * d.y);
        let i = 4.0 * r1_sq * (o.x * o.x + o.y * o.y);
        let j = d.length_squared();
        let k = 2.0 * o.dot(d);
        let l = o.length_squared() + r1_sq - r2_sq;

        let roots = solve_quartic(
            j * j,
            2.0 * j * k,
            2.0 * j * l + k * k - g,
            2.0 * k * l - h,
            l * l - i,
        );

        let t = roots
            .iter()
            .copied()
            .filter(|&t| t > ROOT_EPSILON)
            .min_by(f64::total_cmp)?;
        if !ray_t.surrounds(t) {
            return None;
        }

        // Gradient of the implicit surface at the local hit point
        let q = o + d * t;
        let a = 1.0 - self.major_radius / (q.x * q.x + q.y * q.y).sqrt();
        let local_normal = unit_vector(Vec3::new(a * q.x, a * q.y, q.z));

        Some(HitRecord {
            t,
            p: ray.at(t),
            normal: self.to_local.inverse() * local_normal,
            material: &self.material,
        })
    }
}
