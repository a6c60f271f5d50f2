//! Triangle primitive for ray tracing.
//!
//! Intersects the supporting plane, then accepts the point when the three
//! sub-triangle areas it forms with the edges add up to the full area. The
//! area test cannot tell a point from its mirror image across an edge inside
//! the plane, so a small tolerance on the sum is all that rejects outsiders.

use crate::{HitRecord, Material};
use glint_math::{unit_vector, Interval, Ray, Vec3};
use std::sync::Arc;

/// Largest accepted sum of the barycentric area ratios.
const AREA_SUM_TOLERANCE: f64 = 1.001;

/// A triangle primitive.
#[derive(Debug, Clone)]
pub struct Triangle {
    /// Vertices
    p1: Vec3,
    p2: Vec3,
    p3: Vec3,
    /// Face normal (unit length)
    normal: Vec3,
    material: Arc<Material>,
}

impl Triangle {
    /// Create a new triangle from three vertices.
    ///
    /// The normal is `cross(p1 - p2, p3 - p2)`, normalized.
    pub fn new(p1: Vec3, p2: Vec3, p3: Vec3, material: Arc<Material>) -> Self {
        let normal = unit_vector((p1 - p2).cross(p3 - p2));
        Self::with_normal(p1, p2, p3, normal, material)
    }

    /// Create a triangle with an explicit face normal.
    pub fn with_normal(
        p1: Vec3,
        p2: Vec3,
        p3: Vec3,
        normal: Vec3,
        material: Arc<Material>,
    ) -> Self {
        Self {
            p1,
            p2,
            p3,
            normal: unit_vector(normal),
            material,
        }
    }

    pub fn vertices(&self) -> [Vec3; 3] {
        [self.p1, self.p2, self.p3]
    }

    pub fn normal(&self) -> Vec3 {
        self.normal
    }

    /// Area-ratio barycentric weights of a point in the triangle's plane.
    ///
    /// Each weight is the area of the sub-triangle opposite a vertex over the
    /// full area. Inside the triangle the weights sum to one.
    pub fn barycentric(&self, point: Vec3) -> (f64, f64, f64) {
        let pa = self.p1 - point;
        let pb = self.p2 - point;
        let pc = self.p3 - point;

        let full = (self.p2 - self.p1).cross(self.p3 - self.p1).length();
        let alpha = pb.cross(pc).length() / full;
        let beta = pa.cross(pc).length() / full;
        let gamma = pa.cross(pb).length() / full;
        (alpha, beta, gamma)
    }

    pub fn hit(&self, ray: &Ray, ray_t: Interval) -> Option<HitRecord<'_>> {
        let denominator = ray.direction().dot(self.normal);
        if denominator == 0.0 {
            return None;
        }

        let t = (self.p1 - ray.origin()).dot(self.normal) / denominator;
        if !ray_t.surrounds(t) {
            return None;
        }

        let p = ray.at(t);
        let (alpha, beta, gamma) = self.barycentric(p);
        let in_unit = |w: f64| Interval::UNIT.contains(w);
        if !(in_unit(alpha) && in_unit(beta) && in_unit(gamma)) {
            return None;
        }
        if alpha + beta + gamma > AREA_SUM_TOLERANCE {
            return None;
        }

        Some(HitRecord {
            t,
            p,
            normal: self.normal,
            material: &self.material,
        })
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::Color;

    fn triangle() -> Triangle {
        Triangle::new(
            Vec3::new(0.0, 0.0, 0.0),
            Vec3::new(1.0, 0.0, 0.0),
            Vec3::new(0.0, 1.0, 0.0),
            Arc::new(Material::lambertian(Color::splat(0.5))),
        )
    }

    #[test]
    fn test_normal_from_vertices() {
        // cross(p1 - p2, p3 - p2) = cross(-X, (-1, 1, 0)) = -Z
        let tri = triangle();
        assert!((tri.normal() - Vec3::NEG_Z).length() < 1e-12);
    }

    #[test]
    fn test_explicit_normal_normalized() {
        let tri = Triangle::with_normal(
            Vec3::ZERO,
            Vec3::X,
            Vec3::Y,
            Vec3::new(0.0, 0.0, 4.0),
            Arc::new(Material::dielectric(1.5)),
        );
        assert_eq!(tri.normal(), Vec3::Z);
    }

    #[test]
    fn test_centroid_hit() {
        let tri = triangle();
        let centroid = Vec3::new(1.0 / 3.0, 1.0 / 3.0, 0.0);
        let ray = Ray::new(centroid + Vec3::Z, Vec3::NEG_Z);

        let rec = tri.hit(&ray, Interval::from_min(0.001)).unwrap();
        assert!((rec.t - 1.0).abs() < 1e-9);
        assert!((rec.p - centroid).length() < 1e-9);

        let (alpha, beta, gamma) = tri.barycentric(rec.p);
        for w in [alpha, beta, gamma] {
            assert!((0.0..=1.0).contains(&w));
            assert!((w - 1.0 / 3.0).abs() < 1e-9);
        }
        assert!((alpha + beta + gamma - 1.0).abs() < 1e-9);
    }

    #[test]
    fn test_outside_hull_misses() {
        let tri = triangle();
        let ray = Ray::new(Vec3::new(1.0, 1.0, 1.0), Vec3::NEG_Z);
        assert!(tri.hit(&ray, Interval::from_min(0.001)).is_none());

        let ray = Ray::new(Vec3::new(-0.2, 0.5, 1.0), Vec3::NEG_Z);
        assert!(tri.hit(&ray, Interval::from_min(0.001)).is_none());
    }

    #[test]
    fn test_parallel_ray_misses() {
        let tri = triangle();
        let ray = Ray::new(Vec3::new(0.2, 0.2, 1.0), Vec3::X);
        assert!(tri.hit(&ray, Interval::from_min(0.001)).is_none());
    }

    #[test]
    fn test_hit_outside_interval() {
        let tri = triangle();
        let ray = Ray::new(Vec3::new(0.2, 0.2, 5.0), Vec3::NEG_Z);
        assert!(tri.hit(&ray, Interval::new(0.001, 4.0)).is_none());
        // Behind the origin
        let ray = Ray::new(Vec3::new(0.2, 0.2, -5.0), Vec3::NEG_Z);
        assert!(tri.hit(&ray, Interval::from_min(0.001)).is_none());
    }

    #[test]
    fn test_back_side_hit_keeps_normal() {
        let tri = triangle();
        let ray = Ray::new(Vec3::new(0.2, 0.2, -1.0), Vec3::Z);
        let rec = tri.hit(&ray, Interval::from_min(0.001)).unwrap();
        assert_eq!(rec.normal, tri.normal());
    }
}
