//! Sphere primitive for ray tracing.

use crate::{HitRecord, Material};
use glint_math::{unit_vector, Interval, Ray, Vec3};
use std::sync::Arc;

/// A sphere primitive.
///
/// A negative radius keeps the same surface but turns the normals inward,
/// which is the usual trick for hollow glass.
#[derive(Debug, Clone)]
pub struct Sphere {
    center: Vec3,
    radius: f64,
    material: Arc<Material>,
}

impl Sphere {
    /// Create a new sphere.
    pub fn new(center: Vec3, radius: f64, material: Arc<Material>) -> Self {
        Self {
            center,
            radius,
            material,
        }
    }

    pub fn center(&self) -> Vec3 {
        self.center
    }

    pub fn radius(&self) -> f64 {
        self.radius
    }

    pub fn hit(&self, ray: &Ray, ray_t: Interval) -> Option<HitRecord<'_>> {
        let oc = ray.origin() - self.center;
        let a = ray.direction().length_squared();
        let b = oc.dot(ray.direction());
        let c = oc.length_squared() - self.radius * self.radius;

        // Grazing rays count as misses
        let discriminant = b * b - a * c;
        if discriminant <= 0.0 {
            return None;
        }

        let sqrtd = discriminant.sqrt();

        // Find the nearest root in the acceptable range
        let mut root = (-b - sqrtd) / a;
        if !ray_t.surrounds(root) {
            root = (-b + sqrtd) / a;
            if !ray_t.surrounds(root) {
                return None;
            }
        }

        let p = ray.at(root);
        Some(HitRecord {
            t: root,
            p,
            normal: unit_vector((p - self.center) / self.radius),
            material: &self.material,
        })
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::Color;

    fn gray() -> Arc<Material> {
        Arc::new(Material::lambertian(Color::splat(0.5)))
    }

    #[test]
    fn test_sphere_hit() {
        for radius in [0.5, 1.0, 3.0] {
            let sphere = Sphere::new(Vec3::ZERO, radius, gray());
            let ray = Ray::new(Vec3::new(0.0, 0.0, 2.0 * radius), Vec3::NEG_Z);

            let rec = sphere.hit(&ray, Interval::from_min(0.001)).unwrap();
            assert!((rec.t - radius).abs() < 1e-9);
            assert!((rec.p - Vec3::new(0.0, 0.0, radius)).length() < 1e-9);
            assert!((rec.normal - Vec3::Z).length() < 1e-9);
        }
    }

    #[test]
    fn test_sphere_miss() {
        let sphere = Sphere::new(Vec3::new(0.0, 0.0, -1.0), 0.5, gray());

        let ray = Ray::new(Vec3::ZERO, Vec3::Y);
        assert!(sphere.hit(&ray, Interval::from_min(0.001)).is_none());

        // Tangent ray is a miss
        let ray = Ray::new(Vec3::new(0.5, 0.0, 0.0), Vec3::NEG_Z);
        assert!(sphere.hit(&ray, Interval::from_min(0.001)).is_none());
    }

    #[test]
    fn test_sphere_from_inside_hits_far_side() {
        let sphere = Sphere::new(Vec3::ZERO, 1.0, gray());
        let ray = Ray::new(Vec3::ZERO, Vec3::X);

        let rec = sphere.hit(&ray, Interval::from_min(0.001)).unwrap();
        assert!((rec.t - 1.0).abs() < 1e-9);
        // Normals are not flipped toward the ray
        assert!((rec.normal - Vec3::X).length() < 1e-9);
    }

    #[test]
    fn test_sphere_behind_ray_misses() {
        let sphere = Sphere::new(Vec3::new(0.0, 0.0, 5.0), 1.0, gray());
        let ray = Ray::new(Vec3::ZERO, Vec3::NEG_Z);
        assert!(sphere.hit(&ray, Interval::from_min(0.001)).is_none());
    }

    #[test]
    fn test_negative_radius_points_inward() {
        let sphere = Sphere::new(Vec3::ZERO, -1.0, gray());
        let ray = Ray::new(Vec3::new(0.0, 0.0, 2.0), Vec3::NEG_Z);

        let rec = sphere.hit(&ray, Interval::from_min(0.001)).unwrap();
        assert!((rec.t - 1.0).abs() < 1e-9);
        assert!((rec.normal - Vec3::NEG_Z).length() < 1e-9);
    }
}
