//! Hit records, the closed set of geometry kinds, and composites of them.

use crate::{Cube, Material, Sphere, Torus, Triangle};
use glint_math::{Interval, Ray, Vec3};

/// Record of a ray-object intersection.
#[derive(Debug, Clone, Copy)]
pub struct HitRecord<'a> {
    /// Parameter t where the intersection occurs
    pub t: f64,
    /// Point of intersection
    pub p: Vec3,
    /// Unit surface normal, pointing out of the object regardless of the
    /// side the ray arrived from
    pub normal: Vec3,
    /// Material at the intersection point
    pub material: &'a Material,
}

/// Anything a ray can hit.
#[derive(Debug, Clone)]
pub enum Geometry {
    Sphere(Sphere),
    Triangle(Triangle),
    Cube(Cube),
    Torus(Torus),
    Composite(Composite),
}

impl Geometry {
    /// Test if a ray hits this object strictly inside `ray_t`.
    pub fn hit(&self, ray: &Ray, ray_t: Interval) -> Option<HitRecord<'_>> {
        match self {
            Geometry::Sphere(sphere) => sphere.hit(ray, ray_t),
            Geometry::Triangle(triangle) => triangle.hit(ray, ray_t),
            Geometry::Cube(cube) => cube.hit(ray, ray_t),
            Geometry::Torus(torus) => torus.hit(ray, ray_t),
            Geometry::Composite(composite) => composite.hit(ray, ray_t),
        }
    }
}

impl From<Sphere> for Geometry {
    fn from(sphere: Sphere) -> Self {
        Geometry::Sphere(sphere)
    }
}

impl From<Triangle> for Geometry {
    fn from(triangle: Triangle) -> Self {
        Geometry::Triangle(triangle)
    }
}

impl From<Cube> for Geometry {
    fn from(cube: Cube) -> Self {
        Geometry::Cube(cube)
    }
}

impl From<Torus> for Geometry {
    fn from(torus: Torus) -> Self {
        Geometry::Torus(torus)
    }
}

impl From<Composite> for Geometry {
    fn from(composite: Composite) -> Self {
        Geometry::Composite(composite)
    }
}

/// An ordered list of objects hit as one.
#[derive(Debug, Clone, Default)]
pub struct Composite {
    objects: Vec<Geometry>,
}

impl Composite {
    /// Create a new empty composite.
    pub fn new() -> Self {
        Self::default()
    }

    /// Add an object to the composite.
    pub fn add(&mut self, object: impl Into<Geometry>) {
        self.objects.push(object.into());
    }

    /// Get the number of direct children.
    pub fn len(&self) -> usize {
        self.objects.len()
    }

    /// Check if the composite is empty.
    pub fn is_empty(&self) -> bool {
        self.objects.is_empty()
    }

    pub fn objects(&self) -> &[Geometry] {
        &self.objects
    }

    /// Nearest hit among the children.
    ///
    /// The interval shrinks to the closest hit so far, so a later child only
    /// wins when it is strictly nearer.
    pub fn hit(&self, ray: &Ray, ray_t: Interval) -> Option<HitRecord<'_>> {
        let mut closest = None;
        let mut closest_so_far = ray_t.max;

        for object in &self.objects {
            if let Some(rec) = object.hit(ray, ray_t.with_max(closest_so_far)) {
                closest_so_far = rec.t;
                closest = Some(rec);
            }
        }

        closest
    }
}

impl<G: Into<Geometry>> FromIterator<G> for Composite {
    fn from_iter<I: IntoIterator<Item = G>>(iter: I) -> Self {
        Self {
            objects: iter.into_iter().map(Into::into).collect(),
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::Color;
    use std::sync::Arc;

    fn sphere(z: f64, albedo: f64) -> Sphere {
        Sphere::new(
            Vec3::new(0.0, 0.0, z),
            1.0,
            Arc::new(Material::lambertian(Color::splat(albedo))),
        )
    }

    #[test]
    fn test_empty_composite_misses() {
        let composite = Composite::new();
        let ray = Ray::new(Vec3::ZERO, Vec3::NEG_Z);
        assert!(composite.is_empty());
        assert!(composite.hit(&ray, Interval::from_min(0.001)).is_none());
    }

    #[test]
    fn test_nearest_hit_wins_regardless_of_order() {
        let ray = Ray::new(Vec3::new(0.0, 0.0, 5.0), Vec3::NEG_Z);
        let near = sphere(0.5, 0.1);
        let far = sphere(-0.5, 0.9);

        for objects in [[near.clone(), far.clone()], [far, near]] {
            let composite: Composite = objects.into_iter().collect();
            assert_eq!(composite.len(), 2);

            let rec = composite.hit(&ray, Interval::from_min(0.001)).unwrap();
            assert!((rec.t - 3.5).abs() < 1e-9);
            assert_eq!(*rec.material, Material::lambertian(Color::splat(0.1)));
        }
    }

    #[test]
    fn test_composite_respects_interval() {
        let ray = Ray::new(Vec3::new(0.0, 0.0, 5.0), Vec3::NEG_Z);
        let mut composite = Composite::new();
        composite.add(sphere(0.0, 0.5));

        assert!(composite.hit(&ray, Interval::new(0.001, 3.0)).is_none());
        let rec = composite.hit(&ray, Interval::new(0.001, 10.0)).unwrap();
        assert!((rec.t - 4.0).abs() < 1e-9);
    }

    #[test]
    fn test_nested_composite() {
        let ray = Ray::new(Vec3::new(0.0, 0.0, 5.0), Vec3::NEG_Z);
        let mut inner = Composite::new();
        inner.add(sphere(0.5, 0.1));

        let mut outer = Composite::new();
        outer.add(sphere(-3.0, 0.9));
        outer.add(inner);

        let world = Geometry::from(outer);
        let rec = world.hit(&ray, Interval::from_min(0.001)).unwrap();
        assert!((rec.t - 3.5).abs() < 1e-9);
    }
}
