//! Glint renderer - CPU path tracing
//!
//! A Monte Carlo path tracer with a single light, Blinn highlights and
//! jittered soft shadows. Geometry and materials are closed enums; the
//! integrator in [`ray_color`] ties them together.
//!
//! Around the core sit the camera, bucketed parallel rendering, scene
//! presets, JSON scene descriptions and image output.

mod bucket;
mod camera;
mod cube;
pub mod description;
mod hittable;
mod light;
mod material;
pub mod output;
mod renderer;
mod scene;
mod sphere;
mod torus;
mod triangle;

pub use bucket::{
    generate_buckets, render_bucket, render_buckets, Bucket, BucketResult, DEFAULT_BUCKET_SIZE,
};
pub use camera::{Camera, CameraSettings};
pub use cube::Cube;
pub use description::{load_scene, SceneDescription, SceneError};
pub use hittable::{Composite, Geometry, HitRecord};
pub use light::{Light, LightKind};
pub use material::{schlick, Color, DirectLighting, Material, ScatterResult, FIXED_DIFFUSE_FACTOR};
pub use output::OutputError;
pub use renderer::{
    color_to_rgb, linear_to_gamma, ray_color, render, render_pixel, sky_gradient, ImageBuffer,
    RenderConfig,
};
pub use scene::{Preset, Scene};
pub use sphere::Sphere;
pub use torus::Torus;
pub use triangle::Triangle;

/// Re-export Vec3 and common math types from glint_math
pub use glint_math::{Interval, Ray, Vec3};
