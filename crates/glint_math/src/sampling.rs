//! Random sampling helpers.
//!
//! The generator is always passed in explicitly so each render task can
//! own its own stream.

use crate::Vec3;
use rand::{Rng, RngCore};

/// Uniform random number in [0, 1).
#[inline]
pub fn gen_f64(rng: &mut dyn RngCore) -> f64 {
    rng.gen::<f64>()
}

/// Uniform random point strictly inside the unit sphere.
pub fn random_in_unit_sphere(rng: &mut dyn RngCore) -> Vec3 {
    loop {
        let p = Vec3::new(
            gen_f64(rng) * 2.0 - 1.0,
            gen_f64(rng) * 2.0 - 1.0,
            gen_f64(rng) * 2.0 - 1.0,
        );
        if p.length_squared() < 1.0 {
            return p;
        }
    }
}

/// Uniform random point strictly inside the unit disk in the XY plane.
pub fn random_in_unit_disk(rng: &mut dyn RngCore) -> Vec3 {
    loop {
        let p = Vec3::new(gen_f64(rng) * 2.0 - 1.0, gen_f64(rng) * 2.0 - 1.0, 0.0);
        if p.length_squared() < 1.0 {
            return p;
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use rand::rngs::StdRng;
    use rand::SeedableRng;

    #[test]
    fn test_gen_f64_range() {
        let mut rng = StdRng::seed_from_u64(7);
        for _ in 0..1000 {
            let x = gen_f64(&mut rng);
            assert!((0.0..1.0).contains(&x));
        }
    }

    #[test]
    fn test_unit_sphere_samples_inside() {
        let mut rng = StdRng::seed_from_u64(42);
        let mut mean = Vec3::ZERO;
        for _ in 0..2000 {
            let p = random_in_unit_sphere(&mut rng);
            assert!(p.length_squared() < 1.0);
            mean += p;
        }
        // Roughly centered at the origin
        assert!((mean / 2000.0).length() < 0.1);
    }

    #[test]
    fn test_unit_disk_samples_flat() {
        let mut rng = StdRng::seed_from_u64(42);
        for _ in 0..1000 {
            let p = random_in_unit_disk(&mut rng);
            assert!(p.length_squared() < 1.0);
            assert_eq!(p.z, 0.0);
        }
    }

    #[test]
    fn test_seeded_streams_repeat() {
        let mut a = StdRng::seed_from_u64(3);
        let mut b = StdRng::seed_from_u64(3);
        assert_eq!(random_in_unit_sphere(&mut a), random_in_unit_sphere(&mut b));
    }
}
