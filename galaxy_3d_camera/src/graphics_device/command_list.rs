/// CommandList trait - for recording camera-related GPU commands

use std::sync::Arc;
use crate::error::Result;
use super::{Buffer, QueryPool, RenderTarget};

/// Command list for recording rendering commands
pub trait CommandList: Send + Sync {
    /// Reset queries `[first, first + count)` of a pool
    fn reset_query_pool(&mut self, pool: &Arc<dyn QueryPool>, first: u32, count: u32) -> Result<()>;

    /// Start an occlusion query at `index`
    fn begin_query(&mut self, pool: &Arc<dyn QueryPool>, index: u32) -> Result<()>;

    /// End the occlusion query at `index`
    fn end_query(&mut self, pool: &Arc<dyn QueryPool>, index: u32) -> Result<()>;

    /// Copy `size` bytes from the start of `src` to the start of `dst`
    fn copy_buffer(&mut self, src: &Arc<dyn Buffer>, dst: &Arc<dyn Buffer>, size: u64) -> Result<()>;

    /// Begin render pass `pass_index` of a render target
    ///
    /// # Arguments
    ///
    /// * `target` - Render target owning the pass
    /// * `pass_index` - Pass index in `0..target.render_pass_count()`
    /// * `clear_values` - Clear values for attachments
    fn begin_render_pass(
        &mut self,
        target: &Arc<dyn RenderTarget>,
        pass_index: u32,
        clear_values: &[ClearValue],
    ) -> Result<()>;

    /// End the current render pass
    fn end_render_pass(&mut self) -> Result<()>;

    /// Set the viewport
    fn set_viewport(&mut self, viewport: Viewport) -> Result<()>;

    /// Set the scissor rectangle
    fn set_scissor(&mut self, scissor: Rect2D) -> Result<()>;
}

/// Viewport
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct Viewport {
    pub x: f32,
    pub y: f32,
    pub width: f32,
    pub height: f32,
    pub min_depth: f32,
    pub max_depth: f32,
}

/// 2D rectangle
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct Rect2D {
    pub x: i32,
    pub y: i32,
    pub width: u32,
    pub height: u32,
}

/// Clear value for an attachment
#[derive(Debug, Clone, Copy, PartialEq)]
pub enum ClearValue {
    /// Color clear value (RGBA)
    Color([f32; 4]),
    /// Depth/stencil clear value
    DepthStencil { depth: f32, stencil: u32 },
}
