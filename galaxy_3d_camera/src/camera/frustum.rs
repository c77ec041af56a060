/// Frustum - six clipping planes for visibility culling.
///
/// Each plane is represented as a Vec4 (A, B, C, D) where:
/// - (A, B, C) is the inward-pointing normal
/// - D is the signed distance
/// - A point P is inside the frustum if dot(plane, P_homogeneous) >= 0 for all planes
///
/// Planes live in whatever space the source matrix maps from. The culler
/// feeds it `proj * view * world_to_camera * local_to_world`, so tests run
/// directly against mesh-local bounding spheres.

use glam::{Mat4, Vec3, Vec4};
use super::projection::DepthConvention;

/// Frustum plane indices
pub const PLANE_LEFT: usize = 0;
pub const PLANE_RIGHT: usize = 1;
pub const PLANE_BOTTOM: usize = 2;
pub const PLANE_TOP: usize = 3;
pub const PLANE_NEAR: usize = 4;
pub const PLANE_FAR: usize = 5;

/// Six frustum planes for culling.
///
/// With an infinite projection one of the depth planes has a zero normal
/// and a non-negative offset, so it accepts everything.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct Frustum {
    /// Frustum planes: left, right, bottom, top, near, far
    pub planes: [Vec4; 6],
}

impl Frustum {
    /// Extract frustum planes from a combined projection matrix built in
    /// the active depth convention.
    pub fn from_view_projection(vp: &Mat4) -> Self {
        Self::from_clip_matrix(vp, DepthConvention::ACTIVE)
    }

    /// Gribb & Hartmann row combinations for a 0..1 clip depth range, each
    /// plane normalized by the length of its normal.
    ///
    /// Both conventions clip to `0 <= z <= w`; `convention` only decides
    /// which of the two depth bounds is the near plane.
    pub fn from_clip_matrix(vp: &Mat4, convention: DepthConvention) -> Self {
        let row0 = vp.row(0);
        let row1 = vp.row(1);
        let row2 = vp.row(2);
        let row3 = vp.row(3);

        let depth_min = row2;
        let depth_max = row3 - row2;
        let (near, far) = match convention {
            DepthConvention::Reversed => (depth_max, depth_min),
            DepthConvention::Conventional => (depth_min, depth_max),
        };

        let mut planes = [
            row3 + row0, // left
            row3 - row0, // right
            row3 + row1, // bottom
            row3 - row1, // top
            near,
            far,
        ];

        for plane in &mut planes {
            let normal_len = plane.truncate().length();
            if normal_len > 0.0 {
                *plane /= normal_len;
            }
        }

        Self { planes }
    }

    /// Signed distance from `point` to plane `index` (positive inside)
    pub fn signed_distance(&self, index: usize, point: Vec3) -> f32 {
        let plane = self.planes[index];
        plane.truncate().dot(point) + plane.w
    }

    /// Sphere test: visible unless the sphere lies entirely behind a plane.
    ///
    /// Conservative: spheres near a frustum corner may pass while outside.
    pub fn intersects_sphere(&self, centroid: Vec3, radius: f32) -> bool {
        (0..self.planes.len()).all(|i| self.signed_distance(i, centroid) >= -radius)
    }

    /// Point test, same as a zero-radius sphere
    pub fn contains_point(&self, point: Vec3) -> bool {
        self.intersects_sphere(point, 0.0)
    }
}

#[cfg(test)]
#[path = "frustum_tests.rs"]
mod tests;
