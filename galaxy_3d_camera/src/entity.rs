//! Entity seam - the narrow view of the scene the camera subsystem reads.
//!
//! Entity storage, meshes, and transform hierarchies live elsewhere; the
//! culler only needs a bounding sphere and a few matrices per entity.

use glam::{Mat4, Vec3};

/// Dense entity identifier in `0..EntityProvider::entity_count()`
pub type EntityId = u32;

/// Mesh bounding sphere in mesh-local space
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct BoundingSphere {
    pub centroid: Vec3,
    pub radius: f32,
}

impl BoundingSphere {
    pub fn new(centroid: Vec3, radius: f32) -> Self {
        Self { centroid, radius }
    }
}

/// Transform data of one entity
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct EntityTransform {
    /// Mesh-local to world
    pub local_to_world: Mat4,
    /// Rotation part of parent-to-local (world-to-view for a camera entity)
    pub parent_to_local_rotation: Mat4,
    /// Translation part of parent-to-local
    pub parent_to_local_translation: Mat4,
    /// Position in world space
    pub world_position: Vec3,
}

impl EntityTransform {
    /// Transform of an entity placed at `position` with no rotation or scale
    pub fn from_translation(position: Vec3) -> Self {
        Self {
            local_to_world: Mat4::from_translation(position),
            parent_to_local_rotation: Mat4::IDENTITY,
            parent_to_local_translation: Mat4::from_translation(-position),
            world_position: position,
        }
    }

    /// Transform of a camera entity at `eye` looking at `target`
    ///
    /// The parent-to-local pair is the right-handed look-at matrix split into
    /// its rotation and translation factors.
    pub fn looking_at(eye: Vec3, target: Vec3, up: Vec3) -> Self {
        let view = Mat4::look_at_rh(eye, target, up);
        let rotation = Mat4::from_mat3(glam::Mat3::from_mat4(view));
        Self {
            local_to_world: view.inverse(),
            parent_to_local_rotation: rotation,
            parent_to_local_translation: Mat4::from_translation(-eye),
            world_position: eye,
        }
    }
}

/// Read access to scene entities
///
/// Returning `None` means the entity lacks that component; such entities
/// are skipped by culling.
pub trait EntityProvider: Send + Sync {
    /// Number of entity ids (ids are `0..entity_count()`)
    fn entity_count(&self) -> u32;

    /// Mesh bounding sphere, if the entity has a mesh
    fn bounding_sphere(&self, id: EntityId) -> Option<BoundingSphere>;

    /// Transform, if the entity has one
    fn transform(&self, id: EntityId) -> Option<EntityTransform>;
}

#[cfg(test)]
#[path = "entity_tests.rs"]
mod tests;
