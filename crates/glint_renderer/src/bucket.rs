//! Bucket-based tile rendering.
//!
//! Divides the image into tiles (buckets) that are rendered independently
//! and in parallel using rayon. Each bucket seeds its own generator from the
//! render seed and its index, so a given seed always produces the same image
//! no matter how the buckets are scheduled.

use crate::renderer::render_pixel;
use crate::{Camera, Color, Composite, ImageBuffer, Light, RenderConfig};
use log::{debug, info};
use rand::rngs::StdRng;
use rand::SeedableRng;
use rayon::prelude::*;
use std::time::Instant;

/// A rectangular region of the image to render.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct Bucket {
    /// X coordinate of bucket's top-left corner
    pub x: u32,
    /// Y coordinate of bucket's top-left corner
    pub y: u32,
    /// Width of the bucket in pixels
    pub width: u32,
    /// Height of the bucket in pixels
    pub height: u32,
    /// Index of this bucket in the render order
    pub index: usize,
}

impl Bucket {
    /// Create a new bucket.
    pub fn new(x: u32, y: u32, width: u32, height: u32, index: usize) -> Self {
        Self {
            x,
            y,
            width,
            height,
            index,
        }
    }

    /// Get the total number of pixels in this bucket.
    pub fn pixel_count(&self) -> usize {
        self.width as usize * self.height as usize
    }

    /// Seed for this bucket's generator.
    pub fn seed(&self, render_seed: u64) -> u64 {
        // Golden-ratio increment spreads neighbouring indices apart
        render_seed ^ (self.index as u64 + 1).wrapping_mul(0x9E37_79B9_7F4A_7C15)
    }
}

/// Default bucket size in pixels.
pub const DEFAULT_BUCKET_SIZE: u32 = 64;

/// Generate buckets for an image, sorted in spiral order from center.
///
/// Buckets near the middle of the frame come first, so the interesting part
/// of the picture is done early.
pub fn generate_buckets(width: u32, height: u32, bucket_size: u32) -> Vec<Bucket> {
    let bucket_size = bucket_size.max(1);
    let mut buckets = Vec::new();
    let mut index = 0;

    // Generate grid of buckets
    let mut y = 0;
    while y < height {
        let mut x = 0;
        while x < width {
            let bw = bucket_size.min(width - x);
            let bh = bucket_size.min(height - y);
            buckets.push(Bucket::new(x, y, bw, bh, index));
            index += 1;
            x += bucket_size;
        }
        y += bucket_size;
    }

    sort_spiral(&mut buckets, width, height);

    // Update indices after sorting
    for (i, bucket) in buckets.iter_mut().enumerate() {
        bucket.index = i;
    }

    buckets
}

/// Sort buckets by distance from image center.
fn sort_spiral(buckets: &mut [Bucket], width: u32, height: u32) {
    let center_x = width as f64 / 2.0;
    let center_y = height as f64 / 2.0;
    let distance = |b: &Bucket| {
        let bx = b.x as f64 + b.width as f64 / 2.0;
        let by = b.y as f64 + b.height as f64 / 2.0;
        (bx - center_x).powi(2) + (by - center_y).powi(2)
    };

    // Stable sort keeps row-major order among equally distant buckets
    buckets.sort_by(|a, b| distance(a).total_cmp(&distance(b)));
}

/// Result of rendering a bucket.
#[derive(Debug, Clone)]
pub struct BucketResult {
    /// The bucket that was rendered
    pub bucket: Bucket,
    /// Pixel colors in row-major order
    pub pixels: Vec<Color>,
}

impl BucketResult {
    /// Create a new bucket result.
    pub fn new(bucket: Bucket, pixels: Vec<Color>) -> Self {
        Self { bucket, pixels }
    }
}

/// Render a single bucket with its own seeded generator.
///
/// Returns pixels in row-major order within the bucket.
pub fn render_bucket(
    bucket: &Bucket,
    camera: &Camera,
    world: &Composite,
    light: &Light,
    config: &RenderConfig,
) -> BucketResult {
    let mut rng = StdRng::seed_from_u64(bucket.seed(config.seed));
    let mut pixels = Vec::with_capacity(bucket.pixel_count());

    for local_y in 0..bucket.height {
        for local_x in 0..bucket.width {
            let global_x = bucket.x + local_x;
            let global_y = bucket.y + local_y;
            pixels.push(render_pixel(
                camera, world, light, global_x, global_y, config, &mut rng,
            ));
        }
    }

    debug!(
        "Bucket {} at ({}, {}) done, {} pixels",
        bucket.index,
        bucket.x,
        bucket.y,
        pixels.len()
    );
    BucketResult::new(*bucket, pixels)
}

/// Render the whole image, one rayon task per bucket.
pub fn render_buckets(
    camera: &Camera,
    world: &Composite,
    light: &Light,
    config: &RenderConfig,
) -> ImageBuffer {
    let buckets = generate_buckets(config.width, config.height, config.bucket_size);
    info!(
        "Rendering {}x{} at {} spp in {} buckets on {} threads",
        config.width,
        config.height,
        config.samples_per_pixel,
        buckets.len(),
        rayon::current_num_threads()
    );
    let start = Instant::now();

    let results: Vec<BucketResult> = buckets
        .par_iter()
        .map(|bucket| render_bucket(bucket, camera, world, light, config))
        .collect();

    let mut image = ImageBuffer::new(config.width, config.height);
    for result in results {
        let bucket = result.bucket;
        let row_len = bucket.width as usize;
        for (i, color) in result.pixels.into_iter().enumerate() {
            let local_x = (i % row_len) as u32;
            let local_y = (i / row_len) as u32;
            image.set(bucket.x + local_x, bucket.y + local_y, color);
        }
    }

    info!("Render finished in {:.2?}", start.elapsed());
    image
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::Scene;

    #[test]
    fn test_generate_buckets_exact_fit() {
        let buckets = generate_buckets(128, 128, 64);
        assert_eq!(buckets.len(), 4); // 2x2 grid

        // Total pixels should equal image size
        let total_pixels: usize = buckets.iter().map(|b| b.pixel_count()).sum();
        assert_eq!(total_pixels, 128 * 128);
    }

    #[test]
    fn test_generate_buckets_partial_fit() {
        let buckets = generate_buckets(100, 30, 64);
        assert_eq!(buckets.len(), 2);

        let total_pixels: usize = buckets.iter().map(|b| b.pixel_count()).sum();
        assert_eq!(total_pixels, 100 * 30);
    }

    #[test]
    fn test_spiral_order() {
        let buckets = generate_buckets(192, 192, 64);
        assert_eq!(buckets.len(), 9); // 3x3 grid

        // First bucket should be the center one
        let first = &buckets[0];
        assert_eq!(first.x, 64);
        assert_eq!(first.y, 64);
        assert!(buckets.iter().enumerate().all(|(i, b)| b.index == i));
    }

    #[test]
    fn test_bucket_seeds_differ() {
        let buckets = generate_buckets(192, 192, 64);
        let mut seeds: Vec<u64> = buckets.iter().map(|b| b.seed(7)).collect();
        seeds.sort_unstable();
        seeds.dedup();
        assert_eq!(seeds.len(), buckets.len());
    }

    #[test]
    fn test_parallel_render_is_deterministic() {
        let scene = Scene::showcase();
        let config = RenderConfig {
            width: 24,
            height: 12,
            samples_per_pixel: 2,
            bucket_size: 5,
            seed: 1234,
            ..RenderConfig::default()
        };
        let camera = scene.build_camera(&config);

        let first = render_buckets(&camera, &scene.world, &scene.light, &config);
        let second = render_buckets(&camera, &scene.world, &scene.light, &config);
        assert_eq!(first, second);

        let reseeded = RenderConfig {
            seed: 4321,
            ..config.clone()
        };
        let third = render_buckets(&camera, &scene.world, &scene.light, &reseeded);
        assert_ne!(first, third);
    }

    #[test]
    fn test_parallel_render_fills_every_pixel() {
        let scene = Scene::single_sphere();
        let config = RenderConfig {
            width: 17,
            height: 9,
            samples_per_pixel: 1,
            bucket_size: 4,
            ..RenderConfig::default()
        };
        let camera = scene.build_camera(&config);

        let image = render_buckets(&camera, &scene.world, &scene.light, &config);
        // Nothing in this scene renders pure black, so an unset pixel would show
        assert!(image.pixels.iter().all(|c| c.length() > 0.0));
    }
}
