/// RenderTarget trait - the attachments a camera renders into

/// Descriptor for creating a camera render target
#[derive(Debug, Clone)]
pub struct RenderTargetDesc {
    /// Debug name
    pub name: String,
    /// Width in pixels
    pub width: u32,
    /// Height in pixels
    pub height: u32,
    /// MSAA sample count
    pub samples: u32,
    /// Array layers (one per multiview slot)
    pub layers: u32,
    /// Number of render passes the target must support
    pub render_pass_count: u32,
    /// Whether a depth-only prepass is recorded before the color pass
    pub depth_prepass: bool,
}

/// Render target resource trait
///
/// Owns the color and depth attachments plus the render passes that
/// write them. Destroyed when its last `Arc` is dropped.
pub trait RenderTarget: Send + Sync {
    /// Width in pixels
    fn width(&self) -> u32;

    /// Height in pixels
    fn height(&self) -> u32;

    /// Array layers
    fn layers(&self) -> u32;

    /// Number of render passes
    fn render_pass_count(&self) -> u32;
}
