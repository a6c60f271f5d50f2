//! Scenes: the world, its light and camera placement.
//!
//! Built-in presets live here; scenes read from JSON are assembled by the
//! [`description`](crate::description) module.

use crate::{
    Camera, CameraSettings, Color, Composite, Cube, Light, Material, RenderConfig, Sphere, Torus,
};
use glint_math::{gen_f64, Vec3};
use log::debug;
use rand::rngs::StdRng;
use rand::{RngCore, SeedableRng};
use std::sync::Arc;

/// Everything needed to render an image apart from output settings.
#[derive(Debug, Clone)]
pub struct Scene {
    pub world: Composite,
    pub light: Light,
    pub camera: CameraSettings,
    /// Render settings suggested by the scene, applied over the defaults
    pub render: Option<RenderConfig>,
}

/// Built-in scenes.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Preset {
    Showcase,
    Random,
    Torus,
    SingleSphere,
}

impl Preset {
    /// Assemble the preset. Only `Random` uses the seed.
    pub fn build(self, seed: u64) -> Scene {
        match self {
            Preset::Showcase => Scene::showcase(),
            Preset::Random => Scene::random(&mut StdRng::seed_from_u64(seed)),
            Preset::Torus => Scene::torus(),
            Preset::SingleSphere => Scene::single_sphere(),
        }
    }
}

impl Scene {
    pub fn new(world: Composite, light: Light, camera: CameraSettings) -> Self {
        Self {
            world,
            light,
            camera,
            render: None,
        }
    }

    /// Camera for the image size in `config`.
    pub fn build_camera(&self, config: &RenderConfig) -> Camera {
        Camera::new(&self.camera, config.aspect_ratio())
    }

    /// Blinn metal, glass and diffuse spheres next to a red box on a yellow
    /// ground, lit from above.
    pub fn showcase() -> Self {
        let mut world = Composite::new();
        world.add(Sphere::new(
            Vec3::new(0.0, -101.5, -2.0),
            100.0,
            Arc::new(Material::lambertian(Color::new(0.8, 0.8, 0.0))),
        ));
        world.add(Sphere::new(
            Vec3::new(2.0, -1.0, -1.0),
            0.5,
            Arc::new(Material::blinn_metal(Color::new(0.8, 0.6, 0.2), 0.0, 20.0)),
        ));
        world.add(Sphere::new(
            Vec3::new(-2.0, -1.0, -1.0),
            0.5,
            Arc::new(Material::blinn_dielectric(1.5, 20.0)),
        ));
        world.add(Sphere::new(
            Vec3::new(0.0, -1.0, 1.0),
            0.5,
            Arc::new(Material::blinn_lambertian(Color::new(0.2, 0.2, 0.8), 20.0)),
        ));
        world.add(Cube::new(
            Vec3::new(-0.5, -0.5, -2.0),
            Vec3::new(-0.5, -1.5, -2.0),
            Vec3::new(0.5, -1.5, -2.0),
            Arc::new(Material::blinn_lambertian(Color::new(1.0, 0.0, 0.0), 20.0)),
        ));

        debug!("Showcase scene: {} objects", world.len());
        Self::new(world, overhead_light(), showcase_camera())
    }

    /// A Blinn torus standing on the showcase ground.
    pub fn torus() -> Self {
        let mut world = Composite::new();
        world.add(Sphere::new(
            Vec3::new(0.0, -101.5, -2.0),
            100.0,
            Arc::new(Material::lambertian(Color::new(0.8, 0.8, 0.0))),
        ));
        world.add(Torus::new(
            Vec3::ZERO,
            Vec3::Z,
            1.0,
            0.5,
            Arc::new(Material::blinn_lambertian(Color::new(0.7, 0.7, 0.9), 20.0)),
        ));

        debug!("Torus scene: {} objects", world.len());
        Self::new(world, overhead_light(), showcase_camera())
    }

    /// One diffuse sphere straight ahead of a pinhole camera.
    pub fn single_sphere() -> Self {
        let mut world = Composite::new();
        world.add(Sphere::new(
            Vec3::new(0.0, 0.0, -1.0),
            0.5,
            Arc::new(Material::lambertian(Color::new(0.5, 0.5, 0.5))),
        ));

        let light = Light::directional(Vec3::Y, Color::ONE);
        let camera = CameraSettings::new()
            .with_position(Vec3::ZERO, Vec3::NEG_Z, Vec3::Y)
            .with_lens(90.0, 0.0);
        Self::new(world, light, camera)
    }

    /// A grid of small random spheres around three large ones.
    pub fn random(rng: &mut dyn RngCore) -> Self {
        let mut world = Composite::new();
        world.add(Sphere::new(
            Vec3::new(0.0, -1000.0, 0.0),
            1000.0,
            Arc::new(Material::lambertian(Color::splat(0.5))),
        ));

        let clearing = Vec3::new(4.0, 0.2, 0.0);
        let glass = Arc::new(Material::dielectric(1.5));
        for a in -11..11 {
            for b in -11..11 {
                let choose_mat = gen_f64(rng);
                let center = Vec3::new(
                    a as f64 + 0.9 * gen_f64(rng),
                    0.2,
                    b as f64 + 0.9 * gen_f64(rng),
                );
                if (center - clearing).length() <= 0.9 {
                    continue;
                }

                let material = if choose_mat < 0.8 {
                    // Diffuse
                    let albedo = Color::new(
                        gen_f64(rng) * gen_f64(rng),
                        gen_f64(rng) * gen_f64(rng),
                        gen_f64(rng) * gen_f64(rng),
                    );
                    Arc::new(Material::lambertian(albedo))
                } else if choose_mat < 0.95 {
                    // Metal
                    let albedo = Color::new(
                        0.5 * (1.0 + gen_f64(rng)),
                        0.5 * (1.0 + gen_f64(rng)),
                        0.5 * (1.0 + gen_f64(rng)),
                    );
                    Arc::new(Material::metal(albedo, 0.5 * gen_f64(rng)))
                } else {
                    glass.clone()
                };
                world.add(Sphere::new(center, 0.2, material));
            }
        }

        world.add(Sphere::new(Vec3::new(0.0, 1.0, 0.0), 1.0, glass));
        world.add(Sphere::new(
            Vec3::new(-4.0, 1.0, 0.0),
            1.0,
            Arc::new(Material::lambertian(Color::new(0.4, 0.2, 0.1))),
        ));
        world.add(Sphere::new(
            Vec3::new(4.0, 1.0, 0.0),
            1.0,
            Arc::new(Material::metal(Color::new(0.7, 0.6, 0.0), 0.0)),
        ));

        debug!("Random scene: {} objects", world.len());

        let camera = CameraSettings::new()
            .with_position(Vec3::new(13.0, 2.0, 3.0), Vec3::ZERO, Vec3::Y)
            .with_lens(20.0, 0.1)
            .with_focus_dist(10.0);
        let light = Light::point(Vec3::new(0.0, 20.0, 0.0), Color::ONE);

        Self {
            render: Some(RenderConfig {
                width: 600,
                height: 400,
                ..RenderConfig::default()
            }),
            ..Self::new(world, light, camera)
        }
    }
}

fn overhead_light() -> Light {
    Light::point(Vec3::new(0.0, 6.0, 0.0), Color::ONE)
}

fn showcase_camera() -> CameraSettings {
    let look_from = Vec3::new(-3.0, 1.0, 5.0);
    let look_at = Vec3::new(0.0, -0.5, -1.0);
    CameraSettings::new()
        .with_position(look_from, look_at, Vec3::Y)
        .with_lens(40.0, 0.1)
}
