/// ViewFrustum - six clip planes derived from a view and a projection matrix.
///
/// Each plane is a Vec4 (A, B, C, D) with (A, B, C) the unit inward normal:
/// a point P is on the visible side when `A*Px + B*Py + C*Pz + D >= 0`.
/// Works for perspective and orthographic projections alike.

use glam::{Mat4, Vec3, Vec4};
use crate::math::matrix_from_buffer;
use super::aabb::AABB;

/// Result of a 3-way frustum/AABB classification
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum FrustumTest {
    /// AABB is entirely outside the frustum
    Outside,
    /// AABB is entirely inside the frustum
    Inside,
    /// AABB straddles at least one plane
    Partial,
}

/// Frustum plane indices
pub const PLANE_LEFT: usize = 0;
pub const PLANE_RIGHT: usize = 1;
pub const PLANE_BOTTOM: usize = 2;
pub const PLANE_TOP: usize = 3;
pub const PLANE_NEAR: usize = 4;
pub const PLANE_FAR: usize = 5;

/// View frustum used for visibility culling.
///
/// A frustum that was never updated has six zero planes and culls nothing.
#[derive(Debug, Clone, Copy, Default, PartialEq)]
pub struct ViewFrustum {
    planes: [Vec4; 6],
}

impl ViewFrustum {
    /// Frustum with no planes yet (every volume is visible)
    pub fn new() -> Self {
        Self::default()
    }

    /// Extract planes from a combined projection * view matrix.
    ///
    /// Gribb & Hartmann: each plane is the sum or difference of the last
    /// row of the clip matrix with one of the first three rows.
    pub fn from_view_projection(clip: &Mat4) -> Self {
        let row0 = clip.row(0);
        let row1 = clip.row(1);
        let row2 = clip.row(2);
        let row3 = clip.row(3);

        let mut planes = [
            row3 + row0, // left
            row3 - row0, // right
            row3 + row1, // bottom
            row3 - row1, // top
            row3 + row2, // near
            row3 - row2, // far
        ];

        for plane in &mut planes {
            let normal_len = plane.truncate().length();
            if normal_len > 0.0 {
                *plane /= normal_len;
            }
        }

        Self { planes }
    }

    /// Recompute the planes from column-major view and projection buffers
    pub fn update_frustum(&mut self, view: &[f32; 16], projection: &[f32; 16]) {
        let clip = matrix_from_buffer(projection) * matrix_from_buffer(view);
        *self = Self::from_view_projection(&clip);
    }

    /// Planes in PLANE_* order
    pub fn planes(&self) -> &[Vec4; 6] {
        &self.planes
    }

    /// Plane at `index` (a PLANE_* constant), `None` past the sixth
    pub fn plane(&self, index: usize) -> Option<Vec4> {
        self.planes.get(index).copied()
    }

    /// Conservative visibility test: `true` if the box is inside or crosses
    /// the frustum. May report false positives near corners, never false
    /// negatives.
    pub fn intersects_or_is_contained(&self, aabb: &AABB) -> bool {
        self.planes.iter().all(|plane| {
            let normal = plane.truncate();
            normal.dot(positive_vertex(normal, aabb)) + plane.w >= 0.0
        })
    }

    /// Classify a box as fully outside, fully inside, or straddling
    pub fn classify_aabb(&self, aabb: &AABB) -> FrustumTest {
        let mut all_inside = true;

        for plane in &self.planes {
            let normal = plane.truncate();

            if normal.dot(positive_vertex(normal, aabb)) + plane.w < 0.0 {
                return FrustumTest::Outside;
            }
            if normal.dot(negative_vertex(normal, aabb)) + plane.w < 0.0 {
                all_inside = false;
            }
        }

        if all_inside { FrustumTest::Inside } else { FrustumTest::Partial }
    }

    pub fn intersects_point(&self, point: Vec3) -> bool {
        self.intersects_sphere(point, 0.0)
    }

    /// `true` unless the sphere lies entirely behind one of the planes
    pub fn intersects_sphere(&self, center: Vec3, radius: f32) -> bool {
        let center = center.extend(1.0);
        self.planes.iter().all(|plane| plane.dot(center) >= -radius)
    }
}

/// Corner of the box furthest along `normal`
fn positive_vertex(normal: Vec3, aabb: &AABB) -> Vec3 {
    Vec3::new(
        if normal.x >= 0.0 { aabb.max.x } else { aabb.min.x },
        if normal.y >= 0.0 { aabb.max.y } else { aabb.min.y },
        if normal.z >= 0.0 { aabb.max.z } else { aabb.min.z },
    )
}

/// Corner of the box furthest against `normal`
fn negative_vertex(normal: Vec3, aabb: &AABB) -> Vec3 {
    Vec3::new(
        if normal.x >= 0.0 { aabb.min.x } else { aabb.max.x },
        if normal.y >= 0.0 { aabb.min.y } else { aabb.max.y },
        if normal.z >= 0.0 { aabb.min.z } else { aabb.max.z },
    )
}

#[cfg(test)]
#[path = "view_frustum_tests.rs"]
mod tests;
