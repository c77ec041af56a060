/// OcclusionQueries - per-camera GPU occlusion query cycle.
///
/// One cycle per frame: `reset`, then `begin`/`end` around each draw, then
/// `download` once the GPU is done. Results are consumed one frame late:
/// `is_visible` answers from the draw-index map of the last downloaded
/// cycle, so slot indices reshuffled by the current frame never leak into
/// the answer.
///
/// Stored results carry a -1 bias: a raw value of 0 means "slot not
/// available" and leaves the previous result in place, raw `n + 1` means
/// `n` samples passed. Slots start at 1 so unknown draws count as visible.

use std::mem;
use std::sync::Arc;
use rustc_hash::FxHashMap;
use crate::entity::EntityId;
use crate::error::Result;
use crate::graphics_device::{CommandList, QueryPool};

pub struct OcclusionQueries {
    query_pool: Arc<dyn QueryPool>,
    capacity: u32,
    max_queried: u32,
    recorded: bool,
    downloaded: bool,
    paused: bool,
    entity_to_draw_index: FxHashMap<EntityId, u32>,
    previous_entity_to_draw_index: FxHashMap<EntityId, u32>,
    results: Vec<u64>,
}

impl OcclusionQueries {
    /// Wrap a query pool; one result slot per query
    pub fn new(query_pool: Arc<dyn QueryPool>) -> Self {
        let capacity = query_pool.query_count();
        Self {
            query_pool,
            capacity,
            max_queried: 0,
            recorded: false,
            downloaded: false,
            paused: false,
            entity_to_draw_index: FxHashMap::default(),
            previous_entity_to_draw_index: FxHashMap::default(),
            results: vec![1; capacity as usize],
        }
    }

    /// Reset every query slot. Must precede the frame's first `begin`.
    pub fn reset(&mut self, cmd: &mut dyn CommandList) -> Result<()> {
        if self.paused {
            return Ok(());
        }
        cmd.reset_query_pool(&self.query_pool, 0, self.capacity)?;
        self.max_queried = 0;
        self.recorded = false;
        Ok(())
    }

    /// Start the query for `entity` drawn at `draw_index`
    pub fn begin(&mut self, cmd: &mut dyn CommandList, entity: EntityId, draw_index: u32) -> Result<()> {
        if self.paused {
            return Ok(());
        }
        self.check_draw_index(draw_index)?;
        self.entity_to_draw_index.insert(entity, draw_index);
        self.recorded = true;
        self.downloaded = false;
        cmd.begin_query(&self.query_pool, draw_index)
    }

    /// End the query started by `begin`
    pub fn end(&mut self, cmd: &mut dyn CommandList, _entity: EntityId, draw_index: u32) -> Result<()> {
        if self.paused {
            return Ok(());
        }
        self.check_draw_index(draw_index)?;
        self.max_queried = self.max_queried.max(draw_index + 1);
        cmd.end_query(&self.query_pool, draw_index)
    }

    /// Read back the results of the recorded cycle
    ///
    /// Returns `true` when results were stored. Skipped while paused, when
    /// nothing was recorded, or when this cycle was already downloaded.
    /// Results that are not ready (or a readback failure) leave every field
    /// untouched; the next call retries.
    pub fn download(&mut self) -> bool {
        if self.paused || !self.recorded || self.downloaded || self.max_queried == 0 {
            return false;
        }

        let raw = match self.query_pool.read_results(0, self.max_queried) {
            Ok(Some(raw)) => raw,
            Ok(None) => {
                crate::engine_trace!("galaxy3d::OcclusionQueries",
                    "{} query results not ready, retrying next frame", self.max_queried);
                return false;
            }
            Err(err) => {
                crate::engine_trace!("galaxy3d::OcclusionQueries",
                    "query readback failed ({}), retrying next frame", err);
                return false;
            }
        };

        for (slot, &value) in raw.iter().enumerate().take(self.results.len()) {
            if value != 0 {
                self.results[slot] = value - 1;
            }
        }
        self.previous_entity_to_draw_index = mem::take(&mut self.entity_to_draw_index);
        self.downloaded = true;
        true
    }

    /// Occlusion answer for `entity` from the last downloaded cycle
    ///
    /// Entities without a downloaded query are visible.
    pub fn is_visible(&self, entity: EntityId) -> bool {
        match self.previous_entity_to_draw_index.get(&entity) {
            Some(&slot) => self.results.get(slot as usize).map_or(true, |&samples| samples > 0),
            None => true,
        }
    }

    pub fn pause(&mut self) {
        self.paused = true;
    }

    pub fn resume(&mut self) {
        self.paused = false;
    }

    pub fn is_paused(&self) -> bool {
        self.paused
    }

    /// Draws issued this cycle (highest ended draw index + 1)
    pub fn max_queried(&self) -> u32 {
        self.max_queried
    }

    pub fn is_recorded(&self) -> bool {
        self.recorded
    }

    pub fn is_downloaded(&self) -> bool {
        self.downloaded
    }

    /// Number of query slots
    pub fn capacity(&self) -> u32 {
        self.capacity
    }

    /// Stored (bias-corrected) sample counts per draw slot
    pub fn results(&self) -> &[u64] {
        &self.results
    }

    pub fn query_pool(&self) -> &Arc<dyn QueryPool> {
        &self.query_pool
    }

    fn check_draw_index(&self, draw_index: u32) -> Result<()> {
        if draw_index >= self.capacity {
            crate::engine_bail!("galaxy3d::OcclusionQueries", IndexOutOfRange,
                "draw index {} >= query capacity {}", draw_index, self.capacity);
        }
        Ok(())
    }
}

#[cfg(test)]
#[path = "occlusion_tests.rs"]
mod tests;
