/// Graphics device module - the GPU seam of the camera subsystem

pub mod graphics_device;
pub mod buffer;
pub mod query_pool;
pub mod render_target;
pub mod command_list;

pub use graphics_device::*;
pub use buffer::*;
pub use query_pool::*;
pub use render_target::*;
pub use command_list::*;

// Mock graphics device for tests (no GPU required)
#[cfg(test)]
pub mod mock_graphics_device;
