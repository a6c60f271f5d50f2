//! Surface materials: stochastic scattering and direct lighting.
//!
//! Every material answers two questions at a hit point. `scatter` picks the
//! next bounce of the path, and `shade` describes how the single scene light
//! reaches the point (a shadow-test ray, a specular highlight and a diffuse
//! factor). The Blinn variants share their base material's scattering and
//! add a half-vector highlight on top.

use crate::{HitRecord, Light};
use glint_math::{gen_f64, random_in_unit_sphere, reflect, refract, unit_vector, Ray, Vec3};
use rand::RngCore;

/// Color type alias (RGB values typically 0-1)
pub type Color = Vec3;

/// Diffuse factor reported by materials that do not compute one.
pub const FIXED_DIFFUSE_FACTOR: f64 = 1.0;

/// Metals get no direct diffuse term.
const METAL_DIFFUSE_FACTOR: f64 = 0.0;

/// Lower bound on the Blinn diffuse factor so facets turned away from the
/// light never go fully black.
const MIN_BLINN_DIFFUSE: f64 = 0.1;

/// A surface material.
#[derive(Debug, Clone, PartialEq)]
pub enum Material {
    Lambertian {
        albedo: Color,
    },
    Metal {
        albedo: Color,
        /// Roughness, 0.0 = perfect mirror, 1.0 = very rough
        fuzz: f64,
    },
    Dielectric {
        /// Index of refraction (1.0 = air, 1.5 = glass, 2.4 = diamond)
        refraction_index: f64,
    },
    BlinnLambertian {
        albedo: Color,
        shininess: f64,
    },
    BlinnMetal {
        albedo: Color,
        fuzz: f64,
        shininess: f64,
    },
    BlinnDielectric {
        refraction_index: f64,
        shininess: f64,
    },
}

/// Outcome of a successful scatter.
#[derive(Debug, Clone, Copy)]
pub struct ScatterResult {
    pub attenuation: Color,
    pub scattered: Ray,
}

/// Direct lighting at a hit point.
#[derive(Debug, Clone, Copy)]
pub struct DirectLighting {
    /// Ray from the hit point toward a jittered light sample
    pub shadow_ray: Ray,
    /// Highlight color, zero for non-Blinn materials
    pub specular: Color,
    /// Cosine-like diffuse weight, or a fixed value for non-Blinn materials
    pub diffuse_factor: f64,
}

impl Material {
    pub fn lambertian(albedo: Color) -> Self {
        Material::Lambertian { albedo }
    }

    /// Fuzz is clamped to [0, 1].
    pub fn metal(albedo: Color, fuzz: f64) -> Self {
        Material::Metal {
            albedo,
            fuzz: fuzz.clamp(0.0, 1.0),
        }
    }

    pub fn dielectric(refraction_index: f64) -> Self {
        Material::Dielectric { refraction_index }
    }

    pub fn blinn_lambertian(albedo: Color, shininess: f64) -> Self {
        Material::BlinnLambertian { albedo, shininess }
    }

    /// Fuzz is clamped to [0, 1].
    pub fn blinn_metal(albedo: Color, fuzz: f64, shininess: f64) -> Self {
        Material::BlinnMetal {
            albedo,
            fuzz: fuzz.clamp(0.0, 1.0),
            shininess,
        }
    }

    pub fn blinn_dielectric(refraction_index: f64, shininess: f64) -> Self {
        Material::BlinnDielectric {
            refraction_index,
            shininess,
        }
    }

    /// Specular exponent of the Blinn variants.
    pub fn shininess(&self) -> Option<f64> {
        match *self {
            Material::BlinnLambertian { shininess, .. }
            | Material::BlinnMetal { shininess, .. }
            | Material::BlinnDielectric { shininess, .. } => Some(shininess),
            _ => None,
        }
    }

    /// Scatter an incoming ray.
    ///
    /// `contribution` scales the attenuation of the colored materials; it is
    /// how direct lighting and shadowing reach the path. Returns `None` when
    /// the ray is absorbed.
    pub fn scatter(
        &self,
        ray_in: &Ray,
        rec: &HitRecord,
        contribution: f64,
        rng: &mut dyn RngCore,
    ) -> Option<ScatterResult> {
        match *self {
            Material::Lambertian { albedo } | Material::BlinnLambertian { albedo, .. } => {
                Some(scatter_lambertian(albedo * contribution, rec, rng))
            }
            Material::Metal { albedo, fuzz } | Material::BlinnMetal { albedo, fuzz, .. } => {
                scatter_metal(albedo * contribution, fuzz, ray_in, rec, rng)
            }
            Material::Dielectric { refraction_index }
            | Material::BlinnDielectric {
                refraction_index, ..
            } => Some(scatter_dielectric(refraction_index, ray_in, rec, rng)),
        }
    }

    /// Evaluate direct lighting from `light` at a hit point.
    ///
    /// `view` is the unit vector from the hit point back toward the viewer.
    pub fn shade(
        &self,
        rec: &HitRecord,
        light: &Light,
        view: Vec3,
        rng: &mut dyn RngCore,
    ) -> DirectLighting {
        let shadow_ray = Ray::new(rec.p, light.jittered_direction_from(rec.p, rng));

        let Some(shininess) = self.shininess() else {
            let diffuse_factor = match self {
                Material::Metal { .. } => METAL_DIFFUSE_FACTOR,
                _ => FIXED_DIFFUSE_FACTOR,
            };
            return DirectLighting {
                shadow_ray,
                specular: Color::ZERO,
                diffuse_factor,
            };
        };

        let to_light = light.direction_from(rec.p);
        let diffuse_factor = unit_vector(rec.normal).dot(to_light).max(MIN_BLINN_DIFFUSE);

        // Light exactly behind the viewer has no half vector
        let highlight = (to_light + view)
            .try_normalize()
            .map_or(0.0, |half| rec.normal.dot(half).max(0.0).powf(shininess));

        DirectLighting {
            shadow_ray,
            specular: light.color * highlight,
            diffuse_factor,
        }
    }
}

fn scatter_lambertian(attenuation: Color, rec: &HitRecord, rng: &mut dyn RngCore) -> ScatterResult {
    // Offset unit-sphere sample: an approximation of cosine weighting
    let direction = rec.normal + random_in_unit_sphere(rng);
    ScatterResult {
        attenuation,
        scattered: Ray::new(rec.p, direction),
    }
}

fn scatter_metal(
    attenuation: Color,
    fuzz: f64,
    ray_in: &Ray,
    rec: &HitRecord,
    rng: &mut dyn RngCore,
) -> Option<ScatterResult> {
    let reflected = reflect(unit_vector(ray_in.direction), rec.normal);
    let direction = reflected + fuzz * random_in_unit_sphere(rng);

    // Fuzz can push the ray below the surface; treat that as absorbed
    if direction.dot(rec.normal) > 0.0 {
        Some(ScatterResult {
            attenuation,
            scattered: Ray::new(rec.p, direction),
        })
    } else {
        None
    }
}

fn scatter_dielectric(
    refraction_index: f64,
    ray_in: &Ray,
    rec: &HitRecord,
    rng: &mut dyn RngCore,
) -> ScatterResult {
    let direction = ray_in.direction;
    let d_dot_n = direction.dot(rec.normal);

    // Normals point out of the object; a positive dot means we are leaving it
    let (outward_normal, eta_ratio, cosine) = if d_dot_n > 0.0 {
        (
            -rec.normal,
            refraction_index,
            refraction_index * d_dot_n / direction.length(),
        )
    } else {
        (rec.normal, 1.0 / refraction_index, -d_dot_n / direction.length())
    };

    let scattered_direction = match refract(direction, outward_normal, eta_ratio) {
        Some(refracted) if gen_f64(rng) >= schlick(cosine, refraction_index) => refracted,
        // Total internal reflection, or the Fresnel draw picked reflection
        _ => reflect(direction, rec.normal),
    };

    ScatterResult {
        attenuation: Color::ONE,
        scattered: Ray::new(rec.p, scattered_direction),
    }
}

/// Schlick's approximation of Fresnel reflectance, clamped to [0, 1].
pub fn schlick(cosine: f64, refraction_index: f64) -> f64 {
    let r0 = ((1.0 - refraction_index) / (1.0 + refraction_index)).powi(2);
    (r0 + (1.0 - r0) * (1.0 - cosine).powi(5)).clamp(0.0, 1.0)
}
