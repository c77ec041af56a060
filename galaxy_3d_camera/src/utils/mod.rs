//! Generic containers shared by the camera subsystem.

mod slot_allocator;
mod object_pool;

pub use slot_allocator::SlotAllocator;
pub use object_pool::{ObjectPool, Nameable, Identifiable};
