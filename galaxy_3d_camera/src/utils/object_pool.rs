//! Fixed-capacity, name-indexed arena of records.
//!
//! Records live in a dense vector of optional slots; a slot index is the
//! record's id and stays stable until the record is removed. Removal resets
//! the slot, it never compacts the vector, so id-indexed GPU arrays built
//! next to the pool keep their layout.

use rustc_hash::FxHashMap;
use crate::error::Result;
use super::slot_allocator::SlotAllocator;

/// Records that carry a unique name
pub trait Nameable {
    fn name(&self) -> &str;
}

/// Records that carry their pool slot index
pub trait Identifiable {
    fn id(&self) -> u32;
}

/// Arena of named records with slot reuse
#[derive(Debug)]
pub struct ObjectPool<T> {
    /// Log source used for raised errors (e.g. "galaxy3d::CameraPool")
    source: &'static str,
    /// Record kind used in error messages (e.g. "Camera")
    type_name: &'static str,
    slots: Vec<Option<T>>,
    lookup: FxHashMap<String, u32>,
    allocator: SlotAllocator,
}

impl<T: Nameable + Identifiable> ObjectPool<T> {
    pub fn new(source: &'static str, type_name: &'static str, capacity: u32) -> Self {
        let mut slots = Vec::with_capacity(capacity as usize);
        slots.resize_with(capacity as usize, || None);
        Self {
            source,
            type_name,
            slots,
            lookup: FxHashMap::default(),
            allocator: SlotAllocator::with_capacity(capacity),
        }
    }

    /// Reserve a slot for `name` and fill it with `build(id)`.
    ///
    /// If `build` fails the slot and the name are released before its
    /// error is returned unchanged.
    ///
    /// # Errors
    ///
    /// - `AlreadyExists` if `name` is registered
    /// - `CapacityExceeded` if every slot is in use
    /// - whatever `build` returns
    pub fn insert_with<F>(&mut self, name: &str, build: F) -> Result<&T>
    where
        F: FnOnce(u32) -> Result<T>,
    {
        if self.lookup.contains_key(name) {
            crate::engine_bail!(self.source, AlreadyExists,
                "{} '{}' already exists", self.type_name, name);
        }

        let Some(id) = self.allocator.alloc() else {
            crate::engine_bail!(self.source, CapacityExceeded,
                "max {} limit reached ({})", self.type_name, self.capacity());
        };
        self.lookup.insert(name.to_string(), id);

        match build(id) {
            Ok(record) => {
                debug_assert_eq!(record.id(), id);
                debug_assert_eq!(record.name(), name);
                Ok(self.slots[id as usize].insert(record))
            }
            Err(err) => {
                self.lookup.remove(name);
                self.allocator.free(id);
                Err(err)
            }
        }
    }

    /// Record registered under `name`
    pub fn get(&self, name: &str) -> Result<&T> {
        match self.find(name) {
            Some(record) => Ok(record),
            None => Err(crate::engine_err!(self.source, NotFound,
                "{} '{}' does not exist", self.type_name, name)),
        }
    }

    /// Record in slot `id`
    ///
    /// # Errors
    ///
    /// - `IndexOutOfRange` if `id >= capacity`
    /// - `NotFound` if the slot is empty
    pub fn get_by_id(&self, id: u32) -> Result<&T> {
        self.check_id(id)?;
        match self.slots[id as usize].as_ref() {
            Some(record) => Ok(record),
            None => Err(crate::engine_err!(self.source, NotFound,
                "{} slot {} is empty", self.type_name, id)),
        }
    }

    /// Non-logging lookup by name
    pub fn find(&self, name: &str) -> Option<&T> {
        self.lookup
            .get(name)
            .and_then(|&id| self.slots[id as usize].as_ref())
    }

    pub fn contains(&self, name: &str) -> bool {
        self.lookup.contains_key(name)
    }

    /// Remove the record registered under `name` and free its slot
    pub fn remove(&mut self, name: &str) -> Result<T> {
        match self.lookup.get(name) {
            Some(&id) => self.take_slot(id),
            None => Err(crate::engine_err!(self.source, NotFound,
                "{} '{}' does not exist", self.type_name, name)),
        }
    }

    /// Remove the record in slot `id` and free the slot
    pub fn remove_by_id(&mut self, id: u32) -> Result<T> {
        self.check_id(id)?;
        if self.slots[id as usize].is_none() {
            crate::engine_bail!(self.source, NotFound,
                "{} slot {} is empty", self.type_name, id);
        }
        self.take_slot(id)
    }

    /// Live records in slot order
    pub fn iter(&self) -> impl Iterator<Item = &T> {
        self.slots.iter().flatten()
    }

    pub fn capacity(&self) -> u32 {
        self.allocator.capacity()
    }

    pub fn len(&self) -> u32 {
        self.allocator.len()
    }

    pub fn is_empty(&self) -> bool {
        self.allocator.is_empty()
    }

    fn check_id(&self, id: u32) -> Result<()> {
        if id >= self.capacity() {
            crate::engine_bail!(self.source, IndexOutOfRange,
                "{} id {} >= capacity {}", self.type_name, id, self.capacity());
        }
        Ok(())
    }

    fn take_slot(&mut self, id: u32) -> Result<T> {
        let Some(record) = self.slots[id as usize].take() else {
            crate::engine_bail!(self.source, NotFound,
                "{} slot {} is empty", self.type_name, id);
        };
        self.lookup.remove(record.name());
        self.allocator.free(id);
        Ok(record)
    }
}

#[cfg(test)]
#[path = "object_pool_tests.rs"]
mod tests;
