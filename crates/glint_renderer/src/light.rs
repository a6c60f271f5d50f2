//! The single light used to shade a render.

use crate::Color;
use glint_math::{random_in_unit_sphere, unit_vector, Vec3};
use rand::RngCore;
use serde::{Deserialize, Serialize};

/// How a light's vector is interpreted.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum LightKind {
    /// `vector` is a direction pointing toward the light.
    Directional,
    /// `vector` is the light's position.
    Point,
}

/// A directional or point light.
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub struct Light {
    pub kind: LightKind,
    /// Position for point lights, direction toward the light otherwise
    pub vector: Vec3,
    pub color: Color,
}

impl Light {
    /// Create a point light at `position`.
    pub fn point(position: Vec3, color: Color) -> Self {
        Self {
            kind: LightKind::Point,
            vector: position,
            color,
        }
    }

    /// Create a directional light shining from `direction`.
    pub fn directional(direction: Vec3, color: Color) -> Self {
        Self {
            kind: LightKind::Directional,
            vector: direction,
            color,
        }
    }

    /// Unit direction from `p` toward the light.
    pub fn direction_from(&self, p: Vec3) -> Vec3 {
        match self.kind {
            LightKind::Point => unit_vector(self.vector - p),
            LightKind::Directional => unit_vector(self.vector),
        }
    }

    /// Unit direction from `p` toward a randomly displaced light sample.
    ///
    /// Resampling the light on every call softens shadow edges once
    /// several samples per pixel are averaged.
    pub fn jittered_direction_from(&self, p: Vec3, rng: &mut dyn RngCore) -> Vec3 {
        let sample = self.vector + random_in_unit_sphere(rng);
        match self.kind {
            LightKind::Point => unit_vector(sample - p),
            LightKind::Directional => unit_vector(sample),
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use rand::rngs::StdRng;
    use rand::SeedableRng;

    #[test]
    fn test_point_light_direction() {
        let light = Light::point(Vec3::new(0.0, 6.0, 0.0), Color::ONE);
        let dir = light.direction_from(Vec3::new(0.0, 1.0, 0.0));
        assert!((dir - Vec3::Y).length() < 1e-12);
    }

    #[test]
    fn test_directional_light_ignores_position() {
        let light = Light::directional(Vec3::new(0.0, 10.0, 0.0), Color::ONE);
        assert_eq!(light.direction_from(Vec3::ZERO), Vec3::Y);
        assert_eq!(light.direction_from(Vec3::new(5.0, -3.0, 2.0)), Vec3::Y);
    }

    #[test]
    fn test_jitter_stays_near_light() {
        let mut rng = StdRng::seed_from_u64(1);
        let light = Light::point(Vec3::new(0.0, 10.0, 0.0), Color::ONE);
        for _ in 0..100 {
            let dir = light.jittered_direction_from(Vec3::ZERO, &mut rng);
            assert!((dir.length() - 1.0).abs() < 1e-9);
            // Unit-radius jitter at distance 10 stays within ~6 degrees
            assert!(dir.dot(Vec3::Y) > 0.99);
        }
    }

    #[test]
    fn test_light_kind_json_names() {
        let light: Light =
            serde_json::from_str(r#"{"kind":"point","vector":[0,6,0],"color":[1,1,1]}"#).unwrap();
        assert_eq!(light.kind, LightKind::Point);
        assert_eq!(light.vector, Vec3::new(0.0, 6.0, 0.0));
    }
}
