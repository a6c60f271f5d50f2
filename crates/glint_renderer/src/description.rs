//! JSON scene descriptions.
//!
//! A description names its materials once and lets objects refer to them,
//! so several primitives can share one material:
//!
//! ```json
//! {
//!   "materials": {
//!     "ground": { "type": "lambertian", "albedo": [0.8, 0.8, 0.0] },
//!     "glass": { "type": "blinn_dielectric", "refraction_index": 1.5, "shininess": 20 }
//!   },
//!   "objects": [
//!     { "type": "sphere", "center": [0, -101.5, -2], "radius": 100, "material": "ground" },
//!     { "type": "sphere", "center": [-2, -1, -1], "radius": 0.5, "material": "glass" }
//!   ],
//!   "light": { "kind": "point", "vector": [0, 6, 0], "color": [1, 1, 1] },
//!   "camera": { "look_from": [-3, 1, 5], "look_at": [0, -0.5, -1], "vfov": 40, "aperture": 0.1 },
//!   "render": { "width": 600, "height": 300, "samples_per_pixel": 150 }
//! }
//! ```

use std::collections::BTreeMap;
use std::fs;
use std::path::Path;
use std::sync::Arc;

use glint_math::Vec3;
use log::debug;
use serde::{Deserialize, Serialize};
use thiserror::Error;

use crate::{
    CameraSettings, Color, Composite, Cube, Light, LightKind, Material, RenderConfig, Scene,
    Sphere, Torus, Triangle,
};

/// Errors that can occur while loading a scene description.
#[derive(Error, Debug)]
pub enum SceneError {
    #[error("IO error: {0}")]
    Io(#[from] std::io::Error),

    #[error("Parse error: {0}")]
    Parse(#[from] serde_json::Error),

    #[error("Object {index} uses unknown material \"{name}\"")]
    UnknownMaterial { name: String, index: usize },

    #[error("Scene has no objects")]
    Empty,

    #[error("Object {index} is invalid: {reason}")]
    InvalidObject { index: usize, reason: String },

    #[error("Light is invalid: {0}")]
    InvalidLight(String),

    #[error("Camera is invalid: {0}")]
    InvalidCamera(String),
}

/// Result type for scene loading.
pub type SceneResult<T> = Result<T, SceneError>;

/// A material as written in a description.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(tag = "type", rename_all = "snake_case")]
pub enum MaterialDesc {
    Lambertian {
        albedo: Color,
    },
    Metal {
        albedo: Color,
        #[serde(default)]
        fuzz: f64,
    },
    Dielectric {
        refraction_index: f64,
    },
    BlinnLambertian {
        albedo: Color,
        shininess: f64,
    },
    BlinnMetal {
        albedo: Color,
        #[serde(default)]
        fuzz: f64,
        shininess: f64,
    },
    BlinnDielectric {
        refraction_index: f64,
        shininess: f64,
    },
}

impl From<&MaterialDesc> for Material {
    fn from(desc: &MaterialDesc) -> Self {
        match *desc {
            MaterialDesc::Lambertian { albedo } => Material::lambertian(albedo),
            MaterialDesc::Metal { albedo, fuzz } => Material::metal(albedo, fuzz),
            MaterialDesc::Dielectric { refraction_index } => Material::dielectric(refraction_index),
            MaterialDesc::BlinnLambertian { albedo, shininess } => {
                Material::blinn_lambertian(albedo, shininess)
            }
            MaterialDesc::BlinnMetal {
                albedo,
                fuzz,
                shininess,
            } => Material::blinn_metal(albedo, fuzz, shininess),
            MaterialDesc::BlinnDielectric {
                refraction_index,
                shininess,
            } => Material::blinn_dielectric(refraction_index, shininess),
        }
    }
}

/// An object as written in a description.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(tag = "type", rename_all = "snake_case")]
pub enum ObjectDesc {
    Sphere {
        center: Vec3,
        radius: f64,
        material: String,
    },
    Triangle {
        vertices: [Vec3; 3],
        /// Face normal; derived from the vertices when absent
        #[serde(default)]
        normal: Option<Vec3>,
        material: String,
    },
    /// Box from its top-front-left, bottom-front-left and bottom-front-right
    /// corners
    Cube {
        corners: [Vec3; 3],
        material: String,
    },
    Torus {
        #[serde(default)]
        center: Vec3,
        #[serde(default = "default_torus_axis")]
        axis: Vec3,
        major_radius: f64,
        minor_radius: f64,
        material: String,
    },
}

fn default_torus_axis() -> Vec3 {
    Vec3::Z
}

impl ObjectDesc {
    fn material(&self) -> &str {
        match self {
            ObjectDesc::Sphere { material, .. }
            | ObjectDesc::Triangle { material, .. }
            | ObjectDesc::Cube { material, .. }
            | ObjectDesc::Torus { material, .. } => material,
        }
    }

    /// Reason the object cannot be built, if any.
    fn defect(&self) -> Option<String> {
        match *self {
            ObjectDesc::Sphere { radius, .. } if radius == 0.0 || !radius.is_finite() => {
                Some(format!("sphere radius {radius} must be finite and non-zero"))
            }
            ObjectDesc::Triangle {
                vertices: [p1, p2, p3],
                normal,
                ..
            } => {
                if (p1 - p2).cross(p3 - p2).length_squared() == 0.0 {
                    Some("triangle vertices are collinear".to_string())
                } else if normal.is_some_and(|n| n.length_squared() == 0.0) {
                    Some("triangle normal has zero length".to_string())
                } else {
                    None
                }
            }
            ObjectDesc::Cube {
                corners: [p1, p2, p3],
                ..
            } => {
                if (p1 - p2).cross(p3 - p2).length_squared() == 0.0 {
                    Some("cube corners are collinear".to_string())
                } else {
                    None
                }
            }
            ObjectDesc::Torus {
                axis,
                major_radius,
                minor_radius,
                ..
            } => {
                if axis.length_squared() == 0.0 {
                    Some("torus axis has zero length".to_string())
                } else if !(major_radius > 0.0 && minor_radius > 0.0) {
                    Some(format!(
                        "torus radii {major_radius} and {minor_radius} must be positive"
                    ))
                } else {
                    None
                }
            }
            _ => None,
        }
    }
}

/// A complete scene as written on disk.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct SceneDescription {
    #[serde(default)]
    pub materials: BTreeMap<String, MaterialDesc>,
    pub objects: Vec<ObjectDesc>,
    pub light: Light,
    #[serde(default)]
    pub camera: CameraSettings,
    #[serde(default)]
    pub render: Option<RenderConfig>,
}

impl SceneDescription {
    /// Parse a description from JSON text.
    pub fn from_json(json: &str) -> SceneResult<Self> {
        Ok(serde_json::from_str(json)?)
    }

    /// Read and parse a description file.
    pub fn load<P: AsRef<Path>>(path: P) -> SceneResult<Self> {
        let text = fs::read_to_string(path)?;
        Self::from_json(&text)
    }

    /// Build the scene, resolving material names.
    pub fn into_scene(self) -> SceneResult<Scene> {
        if self.objects.is_empty() {
            return Err(SceneError::Empty);
        }
        if let Some(reason) = light_defect(&self.light) {
            return Err(SceneError::InvalidLight(reason));
        }
        if let Some(reason) = camera_defect(&self.camera) {
            return Err(SceneError::InvalidCamera(reason));
        }

        let materials: BTreeMap<&str, Arc<Material>> = self
            .materials
            .iter()
            .map(|(name, desc)| (name.as_str(), Arc::new(Material::from(desc))))
            .collect();

        let mut world = Composite::new();
        for (index, object) in self.objects.iter().enumerate() {
            let name = object.material();
            let material = materials
                .get(name)
                .cloned()
                .ok_or_else(|| SceneError::UnknownMaterial {
                    name: name.to_string(),
                    index,
                })?;
            if let Some(reason) = object.defect() {
                return Err(SceneError::InvalidObject { index, reason });
            }

            match *object {
                ObjectDesc::Sphere { center, radius, .. } => {
                    world.add(Sphere::new(center, radius, material));
                }
                ObjectDesc::Triangle {
                    vertices: [p1, p2, p3],
                    normal,
                    ..
                } => match normal {
                    Some(normal) => world.add(Triangle::with_normal(p1, p2, p3, normal, material)),
                    None => world.add(Triangle::new(p1, p2, p3, material)),
                },
                ObjectDesc::Cube {
                    corners: [p1, p2, p3],
                    ..
                } => world.add(Cube::new(p1, p2, p3, material)),
                ObjectDesc::Torus {
                    center,
                    axis,
                    major_radius,
                    minor_radius,
                    ..
                } => world.add(Torus::new(center, axis, major_radius, minor_radius, material)),
            }
        }

        debug!(
            "Scene description: {} objects, {} materials",
            world.len(),
            materials.len()
        );

        Ok(Scene {
            world,
            light: self.light,
            camera: self.camera,
            render: self.render,
        })
    }
}

// Degenerate directions turn into NaN rays rather than failing later
fn light_defect(light: &Light) -> Option<String> {
    if !light.vector.is_finite() {
        Some("light vector must be finite".to_string())
    } else if light.kind == LightKind::Directional && light.vector.length_squared() == 0.0 {
        Some("directional light has zero direction".to_string())
    } else {
        None
    }
}

fn camera_defect(camera: &CameraSettings) -> Option<String> {
    let view = camera.look_from - camera.look_at;
    if view.length_squared() == 0.0 {
        Some("look_from and look_at are the same point".to_string())
    } else if camera.vup.cross(view).length_squared() == 0.0 {
        Some("vup is parallel to the view direction".to_string())
    } else if !(camera.vfov > 0.0 && camera.vfov < 180.0) {
        Some(format!("vfov {} must be between 0 and 180 degrees", camera.vfov))
    } else {
        None
    }
}

/// Load a scene description file and build the scene.
pub fn load_scene<P: AsRef<Path>>(path: P) -> SceneResult<Scene> {
    SceneDescription::load(path)?.into_scene()
}
