//! Box primitive built from twelve triangles.

use crate::{Composite, HitRecord, Material, Triangle};
use glint_math::{unit_vector, Interval, Ray, Vec3};
use std::sync::Arc;

/// A box given by three of its corners.
///
/// ```text
///      c3 ______ c2
///     /          /
///    p1 ______ c1
///      c7 ______ c6
///     /          /
///    p2 ______ p3
/// ```
///
/// `p1` sits above `p2`, and `p3` is next to `p2` on the base. The depth of
/// the box runs along `cross(p1 - p2, p3 - p2)` and matches the base width.
#[derive(Debug, Clone)]
pub struct Cube {
    corners: [Vec3; 8],
    faces: Composite,
}

impl Cube {
    pub fn new(p1: Vec3, p2: Vec3, p3: Vec3, material: Arc<Material>) -> Self {
        let up = p1 - p2;
        let side = p3 - p2;
        let back = unit_vector(up.cross(side)) * side.length();

        // Top ring c0..c3, bottom ring c4..c7 with c[4 + j] under c[j]
        let corners = [
            p1,
            p1 + side,
            p1 + side + back,
            p1 + back,
            p2,
            p3,
            p3 + back,
            p2 + back,
        ];
        let center = (corners[0] + corners[6]) * 0.5;

        let mut quads = Vec::with_capacity(6);
        for j in 0..4 {
            let next = (j + 1) % 4;
            quads.push([corners[j], corners[4 + j], corners[4 + next], corners[next]]);
        }
        quads.push([corners[3], corners[0], corners[1], corners[2]]);
        quads.push([corners[7], corners[4], corners[5], corners[6]]);

        let mut faces = Composite::new();
        for [q0, q1, q2, q3] in quads {
            let mut normal = unit_vector((q1 - q0).cross(q3 - q0));
            let face_center = (q0 + q1 + q2 + q3) * 0.25;
            if normal.dot(face_center - center) < 0.0 {
                normal = -normal;
            }
            faces.add(Triangle::with_normal(q0, q1, q2, normal, material.clone()));
            faces.add(Triangle::with_normal(q0, q3, q2, normal, material.clone()));
        }

        Self { corners, faces }
    }

    pub fn corners(&self) -> &[Vec3; 8] {
        &self.corners
    }

    /// Number of triangles making up the surface.
    pub fn triangle_count(&self) -> usize {
        self.faces.len()
    }

    pub fn hit(&self, ray: &Ray, ray_t: Interval) -> Option<HitRecord<'_>> {
        self.faces.hit(ray, ray_t)
    }
}
