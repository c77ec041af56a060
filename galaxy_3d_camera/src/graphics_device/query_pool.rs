/// Occlusion query pool trait

use crate::error::Result;

/// Descriptor for creating an occlusion query pool
#[derive(Debug, Clone)]
pub struct QueryPoolDesc {
    /// Debug name
    pub name: String,
    /// Number of query slots
    pub query_count: u32,
}

/// Pool of GPU occlusion queries
///
/// Queries are reset, begun, and ended through a `CommandList`; results
/// are read back from the CPU once the GPU has finished with them.
pub trait QueryPool: Send + Sync {
    /// Number of query slots
    fn query_count(&self) -> u32;

    /// Read the sample counts of queries `[first, first + count)`
    ///
    /// Returns `Ok(None)` while results are not available yet. Available
    /// slots hold `samples + 1`; `0` means the slot has no result.
    fn read_results(&self, first: u32, count: u32) -> Result<Option<Vec<u64>>>;
}
