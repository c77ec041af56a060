use std::cmp::Reverse;
use std::collections::BinaryHeap;

/// Allocates and recycles `u32` slot indices within a fixed capacity.
///
/// Backs every id-indexed GPU array of the camera subsystem: a slot index
/// doubles as the record offset in the camera upload buffer, so indices
/// stay dense. Freed indices are recycled lowest first.
///
/// # Example
///
/// ```ignore
/// let mut alloc = SlotAllocator::with_capacity(4);
/// let a = alloc.alloc();  // Some(0)
/// let b = alloc.alloc();  // Some(1)
/// alloc.free(0);           // 0 is now available
/// let c = alloc.alloc();  // Some(0) (recycled)
/// ```
#[derive(Debug, Clone)]
pub struct SlotAllocator {
    free_list: BinaryHeap<Reverse<u32>>,
    in_use: Vec<bool>,
    next_id: u32,
    len: u32,
}

impl SlotAllocator {
    /// Create an empty allocator handing out indices in `0..capacity`
    pub fn with_capacity(capacity: u32) -> Self {
        Self {
            free_list: BinaryHeap::new(),
            in_use: vec![false; capacity as usize],
            next_id: 0,
            len: 0,
        }
    }

    /// Allocate the lowest available slot index, or `None` when full
    pub fn alloc(&mut self) -> Option<u32> {
        let id = match self.free_list.pop() {
            Some(Reverse(id)) => id,
            None if self.next_id < self.capacity() => {
                let id = self.next_id;
                self.next_id += 1;
                id
            }
            None => return None,
        };
        self.in_use[id as usize] = true;
        self.len += 1;
        Some(id)
    }

    /// Return a slot index for reuse.
    ///
    /// Returns `false` (and changes nothing) if `id` is not currently allocated.
    pub fn free(&mut self, id: u32) -> bool {
        match self.in_use.get_mut(id as usize) {
            Some(slot) if *slot => {
                *slot = false;
                self.len -= 1;
                self.free_list.push(Reverse(id));
                true
            }
            _ => false,
        }
    }

    /// Whether `id` is currently allocated
    pub fn is_allocated(&self, id: u32) -> bool {
        self.in_use.get(id as usize).copied().unwrap_or(false)
    }

    /// Highest index ever allocated + 1
    pub fn high_water_mark(&self) -> u32 {
        self.next_id
    }

    /// Maximum number of simultaneously allocated slots
    pub fn capacity(&self) -> u32 {
        self.in_use.len() as u32
    }

    /// Number of currently allocated slots
    pub fn len(&self) -> u32 {
        self.len
    }

    /// Whether no slots are currently allocated
    pub fn is_empty(&self) -> bool {
        self.len == 0
    }

    /// Whether every slot is in use
    pub fn is_full(&self) -> bool {
        self.len == self.capacity()
    }
}

#[cfg(test)]
#[path = "slot_allocator_tests.rs"]
mod tests;
