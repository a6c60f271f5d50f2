//! Core path tracing renderer.
//!
//! Implements Monte Carlo path tracing with:
//! - Recursive ray tracing with a depth cutoff
//! - Direct lighting from a single light with jittered soft shadows
//! - Blinn highlights added on top of the scattered contribution
//! - Gamma correction
//! - Anti-aliasing via multi-sampling

use crate::bucket::DEFAULT_BUCKET_SIZE;
use crate::{Camera, Color, Composite, Light, FIXED_DIFFUSE_FACTOR};
use glint_math::{gen_f64, unit_vector, Interval, Ray};
use log::warn;
use rand::RngCore;
use serde::{Deserialize, Serialize};

/// Render configuration.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct RenderConfig {
    /// Image width in pixels
    pub width: u32,
    /// Image height in pixels
    pub height: u32,
    /// Samples per pixel for anti-aliasing
    pub samples_per_pixel: u32,
    /// Deepest bounce that is still traced; deeper rays return black
    pub max_depth: u32,
    /// Contribution scale for points whose shadow ray is blocked
    pub shadow_attenuation: f64,
    /// Diffuse factor that means "no diffuse weighting"
    pub fixed_diffuse_factor: f64,
    /// Minimum ray parameter, to avoid re-hitting the surface just left
    pub hit_epsilon: f64,
    /// Seed for the per-bucket random generators
    pub seed: u64,
    /// Bucket edge length in pixels
    pub bucket_size: u32,
}

impl Default for RenderConfig {
    fn default() -> Self {
        Self {
            width: 600,
            height: 300,
            samples_per_pixel: 150,
            max_depth: 50,
            shadow_attenuation: 0.2,
            fixed_diffuse_factor: FIXED_DIFFUSE_FACTOR,
            hit_epsilon: 0.001,
            seed: 0,
            bucket_size: DEFAULT_BUCKET_SIZE,
        }
    }
}

impl RenderConfig {
    /// Replace values that cannot produce an image, warning about each.
    pub fn sanitized(mut self) -> Self {
        if self.width == 0 {
            warn!("Image width of 0 clamped to 1");
            self.width = 1;
        }
        if self.height == 0 {
            warn!("Image height of 0 clamped to 1");
            self.height = 1;
        }
        if self.samples_per_pixel == 0 {
            warn!("0 samples per pixel clamped to 1");
            self.samples_per_pixel = 1;
        }
        if self.bucket_size == 0 {
            warn!("Bucket size of 0 replaced with {}", DEFAULT_BUCKET_SIZE);
            self.bucket_size = DEFAULT_BUCKET_SIZE;
        }
        if self.hit_epsilon.is_nan() || self.hit_epsilon < 0.0 {
            warn!("Invalid hit epsilon {} replaced with 0.001", self.hit_epsilon);
            self.hit_epsilon = 0.001;
        }
        self
    }

    /// Width over height.
    pub fn aspect_ratio(&self) -> f64 {
        self.width as f64 / self.height as f64
    }
}

/// Compute the color seen by a ray.
///
/// `depth` counts bounces so far and starts at 0 for camera rays. The world
/// is intersected once for the ray and once for the shadow ray at every
/// bounce.
pub fn ray_color(
    ray: &Ray,
    world: &Composite,
    light: &Light,
    depth: u32,
    config: &RenderConfig,
    rng: &mut dyn RngCore,
) -> Color {
    // If we've exceeded max depth, return black (no light)
    if depth > config.max_depth {
        return Color::ZERO;
    }

    let ray_t = Interval::from_min(config.hit_epsilon);
    let Some(rec) = world.hit(ray, ray_t) else {
        return sky_gradient(ray);
    };

    let view = unit_vector(-ray.direction());
    let lighting = rec.material.shade(&rec, light, view, rng);

    let (shadow_scale, specular) = if world.hit(&lighting.shadow_ray, ray_t).is_some() {
        (config.shadow_attenuation, Color::ZERO)
    } else {
        (1.0, lighting.specular)
    };

    let contribution = if lighting.diffuse_factor == config.fixed_diffuse_factor {
        shadow_scale
    } else {
        lighting.diffuse_factor * shadow_scale
    };

    match rec.material.scatter(ray, &rec, contribution, rng) {
        Some(result) => {
            let bounced = ray_color(&result.scattered, world, light, depth + 1, config, rng);
            result.attenuation * bounced + specular
        }
        // Absorbed
        None => Color::ZERO,
    }
}

/// Background seen by rays that escape the scene.
///
/// Blends white at the horizon below into light blue straight up.
pub fn sky_gradient(ray: &Ray) -> Color {
    let unit_direction = unit_vector(ray.direction());
    let a = 0.5 * (unit_direction.y + 1.0);
    let white = Color::new(1.0, 1.0, 1.0);
    let blue = Color::new(0.5, 0.7, 1.0);
    white * (1.0 - a) + blue * a
}

/// Apply gamma correction (gamma = 2.0).
#[inline]
pub fn linear_to_gamma(linear: f64) -> f64 {
    if linear > 0.0 {
        linear.sqrt()
    } else {
        0.0
    }
}

/// Convert a linear color to 8-bit RGB.
pub fn color_to_rgb(color: Color) -> [u8; 3] {
    let to_byte = |c: f64| (255.99 * Interval::UNIT.clamp(linear_to_gamma(c))) as u8;
    [to_byte(color.x), to_byte(color.y), to_byte(color.z)]
}

/// Render a single pixel with multi-sampling.
///
/// Row `y = 0` is the top of the image.
pub fn render_pixel(
    camera: &Camera,
    world: &Composite,
    light: &Light,
    x: u32,
    y: u32,
    config: &RenderConfig,
    rng: &mut dyn RngCore,
) -> Color {
    let mut pixel_color = Color::ZERO;
    let row = (config.height - 1 - y) as f64;

    for _ in 0..config.samples_per_pixel {
        let s = (x as f64 + gen_f64(rng)) / config.width as f64;
        let t = (row + gen_f64(rng)) / config.height as f64;
        let ray = camera.get_ray(s, t, rng);
        pixel_color += ray_color(&ray, world, light, 0, config, rng);
    }

    // Average the samples
    pixel_color / config.samples_per_pixel as f64
}

/// Linear colors for a whole image, row 0 at the top.
#[derive(Debug, Clone, PartialEq)]
pub struct ImageBuffer {
    pub width: u32,
    pub height: u32,
    pub pixels: Vec<Color>,
}

impl ImageBuffer {
    /// Create a new image buffer filled with black.
    pub fn new(width: u32, height: u32) -> Self {
        Self {
            width,
            height,
            pixels: vec![Color::ZERO; width as usize * height as usize],
        }
    }

    /// Get the pixel at (x, y).
    pub fn get(&self, x: u32, y: u32) -> Color {
        self.pixels[self.index(x, y)]
    }

    /// Set the pixel at (x, y).
    pub fn set(&mut self, x: u32, y: u32, color: Color) {
        let index = self.index(x, y);
        self.pixels[index] = color;
    }

    // Widened before multiplying; u32 products overflow on large images
    fn index(&self, x: u32, y: u32) -> usize {
        y as usize * self.width as usize + x as usize
    }

    /// Gamma-corrected RGB bytes, row-major from the top.
    pub fn to_rgb(&self) -> Vec<u8> {
        let mut bytes = Vec::with_capacity(self.pixels.len() * 3);
        for color in &self.pixels {
            bytes.extend_from_slice(&color_to_rgb(*color));
        }
        bytes
    }
}

/// Render the entire scene to an image buffer on the calling thread.
///
/// Every pixel draws from the one generator, so the result differs from the
/// bucketed parallel render for the same seed.
pub fn render(
    camera: &Camera,
    world: &Composite,
    light: &Light,
    config: &RenderConfig,
    rng: &mut dyn RngCore,
) -> ImageBuffer {
    let mut image = ImageBuffer::new(config.width, config.height);

    for y in 0..config.height {
        for x in 0..config.width {
            let color = render_pixel(camera, world, light, x, y, config, rng);
            image.set(x, y, color);
        }
    }

    image
}
