/// VisibilitySet - result of culling one camera.
///
/// Holds one distance-sorted entity list per used multiview slot, or a
/// single merged list when the camera renders all views in one pass.
/// The camera caches the last set so a paused camera can hand it back.

use rdst::RadixKey;
use crate::entity::EntityId;

/// One entity that survived culling
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct VisibleEntity {
    pub entity: EntityId,
    /// Distance from the camera to the entity's world-space centroid
    pub distance: f32,
    /// Last occlusion answer for this entity (true when no data exists yet)
    pub visible: bool,
}

// Non-negative finite f32 bit patterns sort like the values they encode.
impl RadixKey for VisibleEntity {
    const LEVELS: usize = 4;

    #[inline]
    fn get_level(&self, level: usize) -> u8 {
        (self.distance.to_bits() >> (level * 8)) as u8
    }
}

/// Per-view candidate lists
#[derive(Debug, Clone, Default, PartialEq)]
pub struct VisibilitySet {
    views: Vec<Vec<VisibleEntity>>,
    merged: bool,
}

impl VisibilitySet {
    pub(crate) fn new(views: Vec<Vec<VisibleEntity>>, merged: bool) -> Self {
        Self { views, merged }
    }

    /// Set with `view_count` empty lists
    pub fn empty(view_count: usize) -> Self {
        Self {
            views: vec![Vec::new(); view_count],
            merged: false,
        }
    }

    /// Whether every view was merged into list 0
    pub fn is_merged(&self) -> bool {
        self.merged
    }

    /// Number of lists
    pub fn view_count(&self) -> usize {
        self.views.len()
    }

    /// Candidates of list `index` sorted by ascending distance
    pub fn view(&self, index: usize) -> &[VisibleEntity] {
        self.views.get(index).map(Vec::as_slice).unwrap_or(&[])
    }

    pub fn views(&self) -> &[Vec<VisibleEntity>] {
        &self.views
    }

    /// Number of entries across every list
    pub fn total_count(&self) -> usize {
        self.views.iter().map(Vec::len).sum()
    }

    pub fn is_empty(&self) -> bool {
        self.total_count() == 0
    }
}

#[cfg(test)]
#[path = "visibility_tests.rs"]
mod tests;
