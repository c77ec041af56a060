/*!
# Galaxy 3D Camera

Camera subsystem of the Galaxy 3D rendering engine.

Cameras live in a fixed-capacity pool and are reached through cheap,
cloneable handles. Each frame a camera is culled against the scene, its
draws are wrapped in GPU occlusion queries whose answers feed the next
frame, its matrices are uploaded to a GPU-visible array indexed by camera
id, and a per-camera render handshake tells consumers the frame is done.

## Architecture

- **CameraPool**: creation, lookup, deletion, render-order range, GPU upload
- **Camera**: multiview projections/views, clear values, render passes
- **CameraCuller**: `FrustumCuller` and `BruteForceCuller` strategies
- **OcclusionQueries**: one-frame-late GPU occlusion query cycle
- **RenderSync**: render-complete handshake between threads
- **GraphicsDevice**: backend seam for buffers, query pools, render targets
- **EntityProvider**: scene seam for bounding spheres and transforms
*/

// Internal modules
mod error;
mod engine;
pub mod log;
pub mod utils;
pub mod graphics_device;
pub mod entity;
pub mod camera;

// Main galaxy3d namespace module
pub mod galaxy3d {
    // Error types
    pub use crate::error::{Error, Result};

    // Engine singleton
    pub use crate::engine::Engine;

    // Logging sub-module (types only, NOT macros)
    pub mod log {
        pub use crate::log::{Logger, LogEntry, LogSeverity, DefaultLogger};
    }

    // Camera sub-module
    pub mod camera {
        pub use crate::camera::*;
    }

    // GPU seam sub-module
    pub mod graphics_device {
        pub use crate::graphics_device::*;
    }

    // Scene seam sub-module
    pub mod entity {
        pub use crate::entity::*;
    }

    // Pool utilities
    pub mod utils {
        pub use crate::utils::*;
    }
}

// Re-export math library at crate root
pub use glam;
