/// GraphicsDevice trait - factory for the GPU resources cameras own

use std::sync::Arc;
use crate::error::Result;
use super::{Buffer, BufferDesc, QueryPool, QueryPoolDesc, RenderTarget, RenderTargetDesc};

/// Graphics device factory
///
/// Implemented by backend crates. Shared as `Arc<Mutex<dyn GraphicsDevice>>`;
/// every created resource is released when its last `Arc` drops.
pub trait GraphicsDevice: Send + Sync {
    /// Create a buffer
    ///
    /// # Errors
    ///
    /// `OutOfMemory` when the allocation cannot be satisfied
    fn create_buffer(&mut self, desc: BufferDesc) -> Result<Arc<dyn Buffer>>;

    /// Create an occlusion query pool
    fn create_query_pool(&mut self, desc: QueryPoolDesc) -> Result<Arc<dyn QueryPool>>;

    /// Create a render target with its render passes
    fn create_render_target(&mut self, desc: RenderTargetDesc) -> Result<Arc<dyn RenderTarget>>;
}
