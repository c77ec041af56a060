/// Mock graphics device for unit tests (no GPU required)
///
/// Resources keep their data in memory so tests can inspect what the camera
/// subsystem wrote. Query pools return whatever results the test programs.

use std::sync::Arc;
use parking_lot::Mutex;
use crate::error::{Error, Result};
use super::*;

// ============================================================================
// Mock Buffer
// ============================================================================

#[derive(Debug)]
pub struct MockBuffer {
    pub name: String,
    pub usage: BufferUsage,
    pub data: Mutex<Vec<u8>>,
}

impl MockBuffer {
    pub fn new(name: String, size: u64, usage: BufferUsage) -> Self {
        Self {
            name,
            usage,
            data: Mutex::new(vec![0u8; size as usize]),
        }
    }

    /// Copy of `len` bytes starting at `offset`
    pub fn read(&self, offset: usize, len: usize) -> Vec<u8> {
        self.data.lock()[offset..offset + len].to_vec()
    }
}

impl Buffer for MockBuffer {
    fn update(&self, offset: u64, data: &[u8]) -> Result<()> {
        let mut bytes = self.data.lock();
        let start = offset as usize;
        let end = start + data.len();
        if end > bytes.len() {
            return Err(Error::BackendError(format!(
                "write of {} bytes at {} overflows buffer '{}' ({} bytes)",
                data.len(), offset, self.name, bytes.len()
            )));
        }
        bytes[start..end].copy_from_slice(data);
        Ok(())
    }

    fn size(&self) -> u64 {
        self.data.lock().len() as u64
    }
}

// ============================================================================
// Mock QueryPool
// ============================================================================

#[derive(Debug)]
pub struct MockQueryPool {
    pub name: String,
    pub query_count: u32,
    results: Mutex<Option<Vec<u64>>>,
    fail: Mutex<bool>,
    pub reads: Mutex<u32>,
}

impl MockQueryPool {
    pub fn new(name: String, query_count: u32) -> Self {
        Self {
            name,
            query_count,
            results: Mutex::new(None),
            fail: Mutex::new(false),
            reads: Mutex::new(0),
        }
    }

    /// Program the raw values returned by `read_results` (`None` = not ready)
    pub fn set_results(&self, results: Option<Vec<u64>>) {
        *self.results.lock() = results;
    }

    /// Make `read_results` fail with a backend error
    pub fn set_failing(&self, fail: bool) {
        *self.fail.lock() = fail;
    }

    pub fn read_count(&self) -> u32 {
        *self.reads.lock()
    }
}

impl QueryPool for MockQueryPool {
    fn query_count(&self) -> u32 {
        self.query_count
    }

    fn read_results(&self, first: u32, count: u32) -> Result<Option<Vec<u64>>> {
        *self.reads.lock() += 1;
        if *self.fail.lock() {
            return Err(Error::BackendError("device lost".to_string()));
        }
        Ok(self.results.lock().as_ref().map(|raw| {
            (first..first + count)
                .map(|i| raw.get(i as usize).copied().unwrap_or(0))
                .collect()
        }))
    }
}

// ============================================================================
// Mock RenderTarget
// ============================================================================

#[derive(Debug)]
pub struct MockRenderTarget {
    pub desc: RenderTargetDesc,
}

impl RenderTarget for MockRenderTarget {
    fn width(&self) -> u32 {
        self.desc.width
    }

    fn height(&self) -> u32 {
        self.desc.height
    }

    fn layers(&self) -> u32 {
        self.desc.layers
    }

    fn render_pass_count(&self) -> u32 {
        self.desc.render_pass_count
    }
}

// ============================================================================
// Mock GraphicsDevice
// ============================================================================

/// Keeps a typed handle on everything it creates
#[derive(Debug, Default)]
pub struct MockGraphicsDevice {
    pub buffers: Vec<Arc<MockBuffer>>,
    pub query_pools: Vec<Arc<MockQueryPool>>,
    pub render_targets: Vec<Arc<MockRenderTarget>>,
    /// When set, `create_render_target` fails with `OutOfMemory`
    pub fail_render_targets: bool,
}

impl MockGraphicsDevice {
    pub fn new() -> Self {
        Self::default()
    }

    /// Most recently created query pool
    pub fn last_query_pool(&self) -> Option<Arc<MockQueryPool>> {
        self.query_pools.last().cloned()
    }

    /// Render targets still referenced outside the mock
    pub fn live_render_targets(&self) -> usize {
        self.render_targets.iter().filter(|t| Arc::strong_count(t) > 1).count()
    }

    /// Query pools still referenced outside the mock
    pub fn live_query_pools(&self) -> usize {
        self.query_pools.iter().filter(|p| Arc::strong_count(p) > 1).count()
    }
}

impl GraphicsDevice for MockGraphicsDevice {
    fn create_buffer(&mut self, desc: BufferDesc) -> Result<Arc<dyn Buffer>> {
        let buffer = Arc::new(MockBuffer::new(desc.name, desc.size, desc.usage));
        self.buffers.push(buffer.clone());
        Ok(buffer)
    }

    fn create_query_pool(&mut self, desc: QueryPoolDesc) -> Result<Arc<dyn QueryPool>> {
        let pool = Arc::new(MockQueryPool::new(desc.name, desc.query_count));
        self.query_pools.push(pool.clone());
        Ok(pool)
    }

    fn create_render_target(&mut self, desc: RenderTargetDesc) -> Result<Arc<dyn RenderTarget>> {
        if self.fail_render_targets {
            return Err(Error::OutOfMemory);
        }
        let target = Arc::new(MockRenderTarget { desc });
        self.render_targets.push(target.clone());
        Ok(target)
    }
}

// ============================================================================
// Mock CommandList
// ============================================================================

/// Records every command as a string plus the structured arguments tests
/// usually assert on
#[derive(Debug, Default)]
pub struct MockCommandList {
    pub commands: Vec<String>,
    pub clear_values: Vec<ClearValue>,
    pub viewports: Vec<Viewport>,
    pub scissors: Vec<Rect2D>,
}

impl MockCommandList {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn count(&self, prefix: &str) -> usize {
        self.commands.iter().filter(|c| c.starts_with(prefix)).count()
    }
}

impl CommandList for MockCommandList {
    fn reset_query_pool(&mut self, _pool: &Arc<dyn QueryPool>, first: u32, count: u32) -> Result<()> {
        self.commands.push(format!("reset_query_pool({}, {})", first, count));
        Ok(())
    }

    fn begin_query(&mut self, _pool: &Arc<dyn QueryPool>, index: u32) -> Result<()> {
        self.commands.push(format!("begin_query({})", index));
        Ok(())
    }

    fn end_query(&mut self, _pool: &Arc<dyn QueryPool>, index: u32) -> Result<()> {
        self.commands.push(format!("end_query({})", index));
        Ok(())
    }

    fn copy_buffer(&mut self, _src: &Arc<dyn Buffer>, _dst: &Arc<dyn Buffer>, size: u64) -> Result<()> {
        self.commands.push(format!("copy_buffer({})", size));
        Ok(())
    }

    fn begin_render_pass(
        &mut self,
        _target: &Arc<dyn RenderTarget>,
        pass_index: u32,
        clear_values: &[ClearValue],
    ) -> Result<()> {
        self.commands.push(format!("begin_render_pass({})", pass_index));
        self.clear_values = clear_values.to_vec();
        Ok(())
    }

    fn end_render_pass(&mut self) -> Result<()> {
        self.commands.push("end_render_pass".to_string());
        Ok(())
    }

    fn set_viewport(&mut self, viewport: Viewport) -> Result<()> {
        self.commands.push("set_viewport".to_string());
        self.viewports.push(viewport);
        Ok(())
    }

    fn set_scissor(&mut self, scissor: Rect2D) -> Result<()> {
        self.commands.push("set_scissor".to_string());
        self.scissors.push(scissor);
        Ok(())
    }
}

#[cfg(test)]
#[path = "mock_graphics_device_tests.rs"]
mod tests;
