/// Camera and camera pool descriptors

use bitflags::bitflags;
use crate::error::Result;

/// Maximum number of multiview slots per camera
pub const MAX_MULTIVIEW: u32 = 6;

/// Default camera pool capacity
pub const MAX_CAMERAS: u32 = 256;

/// Default number of entity ids a camera can query occlusion for
pub const MAX_ENTITIES: u32 = 256;

bitflags! {
    /// Creation-time camera features
    #[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
    pub struct CameraFeatures: u32 {
        /// Record a depth-only prepass before the color pass
        const DEPTH_PREPASS = 1 << 0;
        /// Render every view in one pass with one layer per view
        const MULTIVIEW = 1 << 1;
    }
}

/// Descriptor for creating a camera
///
/// Every field is fixed for the lifetime of the camera.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct CameraDesc {
    /// Render target width in pixels
    pub width: u32,
    /// Render target height in pixels
    pub height: u32,
    /// MSAA sample count (power of two, 1..=64)
    pub msaa_samples: u32,
    /// Number of multiview slots (1..=MAX_MULTIVIEW)
    pub max_views: u32,
    pub features: CameraFeatures,
}

impl Default for CameraDesc {
    fn default() -> Self {
        Self {
            width: 512,
            height: 512,
            msaa_samples: 1,
            max_views: 1,
            features: CameraFeatures::DEPTH_PREPASS,
        }
    }
}

impl CameraDesc {
    /// Check the descriptor, logging and returning `InvalidConfiguration` on failure
    pub fn validate(&self) -> Result<()> {
        if self.width == 0 || self.height == 0 {
            crate::engine_bail!("galaxy3d::Camera", InvalidConfiguration,
                "camera size must be non-zero (got {}x{})", self.width, self.height);
        }
        if self.max_views == 0 || self.max_views > MAX_MULTIVIEW {
            crate::engine_bail!("galaxy3d::Camera", InvalidConfiguration,
                "max_views must be in 1..={} (got {})", MAX_MULTIVIEW, self.max_views);
        }
        if !self.msaa_samples.is_power_of_two() || self.msaa_samples > 64 {
            crate::engine_bail!("galaxy3d::Camera", InvalidConfiguration,
                "msaa_samples must be a power of two in 1..=64 (got {})", self.msaa_samples);
        }
        Ok(())
    }

    pub fn uses_multiview(&self) -> bool {
        self.features.contains(CameraFeatures::MULTIVIEW)
    }

    pub fn depth_prepass(&self) -> bool {
        self.features.contains(CameraFeatures::DEPTH_PREPASS)
    }

    /// One pass for a multiview camera, one per view otherwise
    pub fn render_pass_count(&self) -> u32 {
        if self.uses_multiview() { 1 } else { self.max_views }
    }
}

/// Descriptor for creating a camera pool
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct CameraPoolDesc {
    /// Number of camera slots
    pub capacity: u32,
    /// Entity ids per camera for occlusion queries
    pub max_entities: u32,
}

impl Default for CameraPoolDesc {
    fn default() -> Self {
        Self {
            capacity: MAX_CAMERAS,
            max_entities: MAX_ENTITIES,
        }
    }
}

impl CameraPoolDesc {
    pub fn validate(&self) -> Result<()> {
        if self.capacity == 0 {
            crate::engine_bail!("galaxy3d::CameraPool", InvalidConfiguration,
                "camera pool capacity must be non-zero");
        }
        Ok(())
    }
}

#[cfg(test)]
#[path = "camera_desc_tests.rs"]
mod tests;
