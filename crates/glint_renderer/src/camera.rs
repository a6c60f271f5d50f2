//! Thin-lens camera for ray generation.

use glint_math::{random_in_unit_disk, unit_vector, Ray, Vec3};
use rand::RngCore;
use serde::{Deserialize, Serialize};

/// Where the camera sits and how its lens behaves.
///
/// This is the serializable half of the camera; the image aspect ratio is
/// supplied when it is turned into a [`Camera`].
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct CameraSettings {
    pub look_from: Vec3,
    pub look_at: Vec3,
    pub vup: Vec3,
    /// Vertical field of view in degrees
    pub vfov: f64,
    /// Lens diameter, 0.0 for a pinhole
    pub aperture: f64,
    /// Distance to the plane of perfect focus, `|look_from - look_at|` when unset
    pub focus_dist: Option<f64>,
}

impl Default for CameraSettings {
    fn default() -> Self {
        Self {
            look_from: Vec3::ZERO,
            look_at: Vec3::NEG_Z,
            vup: Vec3::Y,
            vfov: 90.0,
            aperture: 0.0,
            focus_dist: None,
        }
    }
}

impl CameraSettings {
    /// Create camera settings with default values.
    pub fn new() -> Self {
        Self::default()
    }

    /// Set camera position.
    pub fn with_position(mut self, look_from: Vec3, look_at: Vec3, vup: Vec3) -> Self {
        self.look_from = look_from;
        self.look_at = look_at;
        self.vup = vup;
        self
    }

    /// Set lens settings.
    pub fn with_lens(mut self, vfov: f64, aperture: f64) -> Self {
        self.vfov = vfov;
        self.aperture = aperture;
        self
    }

    /// Focus at a fixed distance instead of on `look_at`.
    pub fn with_focus_dist(mut self, focus_dist: f64) -> Self {
        self.focus_dist = Some(focus_dist);
        self
    }

    /// Focus distance in effect.
    pub fn focus_dist(&self) -> f64 {
        self.focus_dist
            .unwrap_or_else(|| (self.look_from - self.look_at).length())
    }
}

/// Camera for generating rays into the scene.
#[derive(Debug, Clone, Copy)]
pub struct Camera {
    origin: Vec3,
    lower_left_corner: Vec3,
    horizontal: Vec3,
    vertical: Vec3,
    u: Vec3,
    v: Vec3,
    lens_radius: f64,
}

impl Camera {
    /// Build a camera for an image with the given width over height.
    pub fn new(settings: &CameraSettings, aspect: f64) -> Self {
        let focus_dist = settings.focus_dist();
        let half_height = (settings.vfov.to_radians() / 2.0).tan();
        let half_width = aspect * half_height;

        // Orthonormal basis, w pointing back toward the viewer
        let w = unit_vector(settings.look_from - settings.look_at);
        let u = unit_vector(settings.vup.cross(w));
        let v = w.cross(u);

        let origin = settings.look_from;
        let lower_left_corner = origin
            - half_width * focus_dist * u
            - half_height * focus_dist * v
            - focus_dist * w;

        Self {
            origin,
            lower_left_corner,
            horizontal: 2.0 * half_width * focus_dist * u,
            vertical: 2.0 * half_height * focus_dist * v,
            u,
            v,
            lens_radius: settings.aperture / 2.0,
        }
    }

    /// Ray through the viewport point `(s, t)`, both in [0, 1].
    ///
    /// `t = 0` is the bottom edge. The origin is jittered across the lens.
    pub fn get_ray(&self, s: f64, t: f64, rng: &mut dyn RngCore) -> Ray {
        let rd = self.lens_radius * random_in_unit_disk(rng);
        let offset = self.u * rd.x + self.v * rd.y;
        Ray::new(
            self.origin + offset,
            self.lower_left_corner + s * self.horizontal + t * self.vertical - self.origin - offset,
        )
    }
}
