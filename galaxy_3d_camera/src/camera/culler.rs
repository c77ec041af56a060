/// Culling strategies producing a camera's `VisibilitySet`.
///
/// Both strategies share the candidate pass (every entity other than the
/// camera entity that has a mesh and a transform) and the output pass
/// (world-space distance to the camera, occlusion answer, radix sort by
/// distance, multiview merge). They differ only in which candidates each
/// view keeps.

use glam::Vec3;
use rdst::RadixSort;
use rustc_hash::FxHashSet;
use crate::entity::{BoundingSphere, EntityId, EntityProvider, EntityTransform};
use super::camera::Camera;
use super::frustum::Frustum;
use super::visibility::{VisibilitySet, VisibleEntity};

/// Strategy computing which entities a camera may draw
pub trait CameraCuller: Send + Sync {
    /// Visibility of `entities` from `camera` placed at `camera_entity`
    ///
    /// Returns one list per used view, or a single merged list for
    /// multiview cameras. A camera entity without a transform yields
    /// empty lists.
    fn cull(&mut self, camera: &Camera, camera_entity: EntityId, entities: &dyn EntityProvider) -> VisibilitySet;
}

// ===== FRUSTUM CULLER =====

/// Keeps entities whose mesh bounding sphere touches the view frustum
#[derive(Debug, Default)]
pub struct FrustumCuller {
    candidates: Vec<Candidate>,
}

impl FrustumCuller {
    pub fn new() -> Self {
        Self::default()
    }
}

impl CameraCuller for FrustumCuller {
    fn cull(&mut self, camera: &Camera, camera_entity: EntityId, entities: &dyn EntityProvider) -> VisibilitySet {
        let Some(eye) = entities.transform(camera_entity) else {
            return VisibilitySet::empty(camera.used_views() as usize);
        };
        collect_candidates(&mut self.candidates, camera_entity, entities);

        let world_to_camera = eye.parent_to_local_rotation * eye.parent_to_local_translation;
        let per_view: Vec<Vec<&Candidate>> = (0..camera.used_views() as usize)
            .map(|slot| {
                let object = camera.used_view_object(slot);
                let view_proj = object.proj * object.view * world_to_camera;
                self.candidates
                    .iter()
                    .filter(|candidate| {
                        let frustum = Frustum::from_view_projection(&(view_proj * candidate.transform.local_to_world));
                        frustum.intersects_sphere(candidate.sphere.centroid, candidate.sphere.radius)
                    })
                    .collect()
            })
            .collect();

        build_visibility(camera, eye.world_position, per_view)
    }
}

// ===== BRUTE FORCE CULLER =====

/// Keeps every candidate; useful as a reference and for tiny scenes
#[derive(Debug, Default)]
pub struct BruteForceCuller {
    candidates: Vec<Candidate>,
}

impl BruteForceCuller {
    pub fn new() -> Self {
        Self::default()
    }
}

impl CameraCuller for BruteForceCuller {
    fn cull(&mut self, camera: &Camera, camera_entity: EntityId, entities: &dyn EntityProvider) -> VisibilitySet {
        let Some(eye) = entities.transform(camera_entity) else {
            return VisibilitySet::empty(camera.used_views() as usize);
        };
        collect_candidates(&mut self.candidates, camera_entity, entities);

        let per_view: Vec<Vec<&Candidate>> = (0..camera.used_views())
            .map(|_| self.candidates.iter().collect())
            .collect();

        build_visibility(camera, eye.world_position, per_view)
    }
}

// ===== SHARED PASSES =====

#[derive(Debug, Clone, Copy)]
struct Candidate {
    id: EntityId,
    sphere: BoundingSphere,
    transform: EntityTransform,
}

impl Candidate {
    fn world_centroid(&self) -> Vec3 {
        self.transform.local_to_world.transform_point3(self.sphere.centroid)
    }
}

/// Refill `out` with every entity except `camera_entity` that has both a
/// mesh and a transform (buffer reused across frames)
fn collect_candidates(out: &mut Vec<Candidate>, camera_entity: EntityId, entities: &dyn EntityProvider) {
    out.clear();
    out.extend((0..entities.entity_count()).filter(|&id| id != camera_entity).filter_map(|id| {
        let sphere = entities.bounding_sphere(id)?;
        let transform = entities.transform(id)?;
        Some(Candidate { id, sphere, transform })
    }));
}

fn build_visibility(camera: &Camera, eye_position: Vec3, per_view: Vec<Vec<&Candidate>>) -> VisibilitySet {
    let merged = camera.uses_multiview();
    let per_view = if merged {
        let mut seen = FxHashSet::default();
        let union: Vec<&Candidate> = per_view
            .into_iter()
            .flatten()
            .filter(|candidate| seen.insert(candidate.id))
            .collect();
        vec![union]
    } else {
        per_view
    };

    let views = per_view
        .into_iter()
        .map(|list| {
            let mut sorted: Vec<VisibleEntity> = list
                .into_iter()
                .map(|candidate| VisibleEntity {
                    entity: candidate.id,
                    distance: candidate.world_centroid().distance(eye_position),
                    visible: camera.is_entity_visible(candidate.id),
                })
                .collect();
            sorted.radix_sort_unstable();
            sorted
        })
        .collect();

    VisibilitySet::new(views, merged)
}

#[cfg(test)]
#[path = "culler_tests.rs"]
mod tests;
