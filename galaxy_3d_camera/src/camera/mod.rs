//! Camera module - pooled cameras and their per-frame visibility work.
//!
//! The pool owns every camera and hands out `CameraHandle`s. Each frame a
//! `CameraCuller` produces the camera's `VisibilitySet`, the render thread
//! wraps draws in occlusion queries whose answers feed the next frame, and
//! `RenderSync` tells waiters when the camera's frame is done.

mod camera;
mod camera_buffer;
mod camera_desc;
mod camera_pool;
mod culler;
mod frustum;
mod occlusion;
mod projection;
mod render_sync;
mod visibility;

pub use camera::{Camera, RenderMode};
pub use camera_buffer::{CameraObject, CameraRecord, CameraUploadBuffer};
pub use camera_desc::{
    CameraDesc, CameraFeatures, CameraPoolDesc,
    MAX_CAMERAS, MAX_ENTITIES, MAX_MULTIVIEW,
};
pub use camera_pool::{CameraHandle, CameraPool};
pub use culler::{BruteForceCuller, CameraCuller, FrustumCuller};
pub use frustum::{
    Frustum,
    PLANE_LEFT, PLANE_RIGHT, PLANE_BOTTOM, PLANE_TOP, PLANE_NEAR, PLANE_FAR,
};
pub use occlusion::OcclusionQueries;
pub use projection::DepthConvention;
pub use render_sync::RenderSync;
pub use visibility::{VisibilitySet, VisibleEntity};
