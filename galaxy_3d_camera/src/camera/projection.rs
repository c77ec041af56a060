/// Depth conventions and infinite perspective projections
///
/// All projections are right-handed with an infinite far plane. The depth
/// convention is a build-time policy: reversed depth by default, conventional
/// 0..1 with the `conventional-depth` feature.

use glam::Mat4;

/// Mapping of view distance to NDC depth
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum DepthConvention {
    /// Near plane at depth 1, infinity at depth 0
    Reversed,
    /// Near plane at depth 0, infinity at depth 1
    Conventional,
}

impl DepthConvention {
    /// Convention selected at build time
    #[cfg(not(feature = "conventional-depth"))]
    pub const ACTIVE: DepthConvention = DepthConvention::Reversed;

    /// Convention selected at build time
    #[cfg(feature = "conventional-depth")]
    pub const ACTIVE: DepthConvention = DepthConvention::Conventional;

    /// Depth of the farthest possible sample, the value depth buffers are cleared to
    pub fn clear_depth(self) -> f32 {
        match self {
            DepthConvention::Reversed => 0.0,
            DepthConvention::Conventional => 1.0,
        }
    }

    /// Depth written at the near plane
    pub fn near_depth(self) -> f32 {
        match self {
            DepthConvention::Reversed => 1.0,
            DepthConvention::Conventional => 0.0,
        }
    }

    /// Right-handed infinite perspective projection in this convention
    ///
    /// `fov_y` is the vertical field of view in radians.
    pub fn perspective(self, fov_y: f32, aspect: f32, near: f32) -> Mat4 {
        match self {
            DepthConvention::Reversed => Mat4::perspective_infinite_reverse_rh(fov_y, aspect, near),
            DepthConvention::Conventional => Mat4::perspective_infinite_rh(fov_y, aspect, near),
        }
    }
}

#[cfg(test)]
#[path = "projection_tests.rs"]
mod tests;
