//! Glint math - vector algebra, rays, sampling and root solving.
//!
//! Vectors are glam's double precision `DVec3`; the torus intersection
//! feeds a quartic solver that needs the extra precision.

// Re-export glam for convenience
pub use glam;
pub use glam::{DQuat as Quat, DVec3 as Vec3};

mod interval;
mod optics;
pub mod quartic;
mod ray;
mod sampling;

pub use interval::Interval;
pub use optics::{reflect, refract};
pub use quartic::{solve_quartic, Roots};
pub use ray::Ray;
pub use sampling::{gen_f64, random_in_unit_disk, random_in_unit_sphere};

/// Normalize `v` to unit length.
///
/// `v` must not be the zero vector.
#[inline]
pub fn unit_vector(v: Vec3) -> Vec3 {
    v / v.length()
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_vec3_operations() {
        let a = Vec3::new(1.0, 2.0, 3.0);
        let b = Vec3::new(4.0, 5.0, 6.0);
        assert_eq!(a + b, Vec3::new(5.0, 7.0, 9.0));
        assert_eq!(a * b, Vec3::new(4.0, 10.0, 18.0));
        assert_eq!(b / a, Vec3::new(4.0, 2.5, 2.0));
        assert_eq!(a.cross(b), Vec3::new(-3.0, 6.0, -3.0));
        assert_eq!(a.dot(b), 32.0);
    }

    #[test]
    fn test_unit_vector_length() {
        let v = unit_vector(Vec3::new(3.0, -4.0, 12.0));
        assert!((v.length() - 1.0).abs() < 1e-12);
    }

    #[test]
    fn test_unit_vector_idempotent() {
        let samples = [
            Vec3::new(1.0, 2.0, 3.0),
            Vec3::new(-0.001, 0.0, 0.002),
            Vec3::new(1e6, -3e5, 42.0),
        ];
        for v in samples {
            let once = unit_vector(v);
            let twice = unit_vector(once);
            assert!((once - twice).length() < 1e-12, "{once:?} vs {twice:?}");
        }
    }
}
