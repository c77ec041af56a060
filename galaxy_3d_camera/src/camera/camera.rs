/// Camera - one pooled camera record.
///
/// Owns its multiview matrices, clear values, render order, occlusion query
/// cycle, and cached visibility set, plus the GPU render target it draws
/// into. Cameras are created and destroyed by `CameraPool` and reached
/// through a `CameraHandle`.
///
/// Every multiview accessor takes a view index and fails with
/// `IndexOutOfRange` when it is not below `max_views()`.

use std::fmt;
use std::sync::Arc;
use std::sync::atomic::{AtomicI32, Ordering};
use glam::{Mat4, Vec4};
use crate::entity::{EntityId, EntityProvider};
use crate::error::Result;
use crate::graphics_device::{ClearValue, CommandList, QueryPool, Rect2D, RenderTarget, Viewport};
use super::camera_buffer::{CameraObject, CameraRecord};
use super::camera_desc::{CameraDesc, MAX_MULTIVIEW};
use super::culler::CameraCuller;
use super::occlusion::OcclusionQueries;
use super::projection::DepthConvention;
use super::render_sync::RenderSync;
use super::visibility::VisibilitySet;

/// Shading mode a camera can force on everything it draws
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum RenderMode {
    Pbr,
    Normal,
    BaseColor,
    TexCoord,
    Blinn,
    Depth,
    Volume,
    Skybox,
    Hidden,
}

pub struct Camera {
    id: u32,
    name: String,
    desc: CameraDesc,

    multiviews: [CameraObject; MAX_MULTIVIEW as usize],
    used_views: u32,

    // Shared with handles so the pool reads it without locking the camera
    render_order: Arc<AtomicI32>,
    clear_color: Vec4,
    clear_depth: f32,
    clear_stencil: u32,
    // Not applied by culling yet
    max_visibility_distance: f32,
    render_mode_override: Option<RenderMode>,

    occlusion: OcclusionQueries,
    visibility: VisibilitySet,

    render_target: Arc<dyn RenderTarget>,
    render_sync: Arc<RenderSync>,
    dirty: bool,
}

impl Camera {
    /// Build a camera around already allocated GPU resources
    pub(crate) fn new(
        id: u32,
        name: String,
        desc: CameraDesc,
        render_target: Arc<dyn RenderTarget>,
        query_pool: Arc<dyn QueryPool>,
    ) -> Self {
        Self {
            id,
            name,
            desc,
            multiviews: [CameraObject::default(); MAX_MULTIVIEW as usize],
            used_views: 1,
            render_order: Arc::new(AtomicI32::new(0)),
            clear_color: Vec4::ZERO,
            clear_depth: DepthConvention::ACTIVE.clear_depth(),
            clear_stencil: 0,
            max_visibility_distance: f32::INFINITY,
            render_mode_override: None,
            occlusion: OcclusionQueries::new(query_pool),
            visibility: VisibilitySet::empty(1),
            render_target,
            render_sync: Arc::new(RenderSync::new()),
            dirty: true,
        }
    }

    // ===== IDENTITY / CONFIGURATION =====

    pub fn id(&self) -> u32 {
        self.id
    }

    pub fn name(&self) -> &str {
        &self.name
    }

    pub fn desc(&self) -> &CameraDesc {
        &self.desc
    }

    pub fn width(&self) -> u32 {
        self.desc.width
    }

    pub fn height(&self) -> u32 {
        self.desc.height
    }

    pub fn msaa_samples(&self) -> u32 {
        self.desc.msaa_samples
    }

    pub fn max_views(&self) -> u32 {
        self.desc.max_views
    }

    /// Highest multiview slot set so far + 1 (at least 1)
    pub fn used_views(&self) -> u32 {
        self.used_views
    }

    pub fn uses_multiview(&self) -> bool {
        self.desc.uses_multiview()
    }

    pub fn records_depth_prepass(&self) -> bool {
        self.desc.depth_prepass()
    }

    pub fn render_target(&self) -> &Arc<dyn RenderTarget> {
        &self.render_target
    }

    /// Sync block shared with every handle of this camera
    pub fn render_sync(&self) -> &Arc<RenderSync> {
        &self.render_sync
    }

    // ===== PROJECTION / VIEW =====

    /// Infinite perspective projection in the build's depth convention
    ///
    /// Also resets the clear depth to the convention's far value and raises
    /// `used_views` to at least `view_index + 1`.
    ///
    /// # Errors
    ///
    /// - `IndexOutOfRange` if `view_index >= max_views()`
    /// - `InvalidConfiguration` if `width` or `height` is not positive
    pub fn set_perspective_projection(
        &mut self,
        fov_radians: f32,
        width: f32,
        height: f32,
        near_pos: f32,
        view_index: u32,
    ) -> Result<()> {
        let slot = self.check_view(view_index)?;
        if !(width > 0.0 && height > 0.0) {
            crate::engine_bail!("galaxy3d::Camera", InvalidConfiguration,
                "camera '{}': projection size must be positive (got {}x{})", self.name, width, height);
        }

        let convention = DepthConvention::ACTIVE;
        let proj = convention.perspective(fov_radians, width / height, near_pos);
        let object = &mut self.multiviews[slot];
        object.proj = proj;
        object.proj_inv = proj.inverse();
        object.near_pos = near_pos;
        object.fov = fov_radians;

        self.clear_depth = convention.clear_depth();
        self.raise_used_views(view_index);
        self.dirty = true;
        Ok(())
    }

    /// Caller-built projection; it must follow the build's depth convention
    pub fn set_custom_projection(&mut self, projection: Mat4, near_pos: f32, view_index: u32) -> Result<()> {
        let slot = self.check_view(view_index)?;
        let object = &mut self.multiviews[slot];
        object.proj = projection;
        object.proj_inv = projection.inverse();
        object.near_pos = near_pos;
        self.dirty = true;
        Ok(())
    }

    /// Set a view matrix; raises `used_views` to at least `view_index + 1`
    pub fn set_view(&mut self, view: Mat4, view_index: u32) -> Result<()> {
        let slot = self.check_view(view_index)?;
        let object = &mut self.multiviews[slot];
        object.view = view;
        object.view_inv = view.inverse();
        self.raise_used_views(view_index);
        self.dirty = true;
        Ok(())
    }

    pub fn projection(&self, view_index: u32) -> Result<Mat4> {
        Ok(self.multiview(view_index)?.proj)
    }

    pub fn projection_inverse(&self, view_index: u32) -> Result<Mat4> {
        Ok(self.multiview(view_index)?.proj_inv)
    }

    pub fn view(&self, view_index: u32) -> Result<Mat4> {
        Ok(self.multiview(view_index)?.view)
    }

    pub fn view_inverse(&self, view_index: u32) -> Result<Mat4> {
        Ok(self.multiview(view_index)?.view_inv)
    }

    /// `projection * view`, computed on the fly
    pub fn view_projection(&self, view_index: u32) -> Result<Mat4> {
        let object = self.multiview(view_index)?;
        Ok(object.proj * object.view)
    }

    pub fn near_pos(&self, view_index: u32) -> Result<f32> {
        Ok(self.multiview(view_index)?.near_pos)
    }

    pub fn fov(&self, view_index: u32) -> Result<f32> {
        Ok(self.multiview(view_index)?.fov)
    }

    /// Raw matrices of one multiview slot
    pub fn multiview(&self, view_index: u32) -> Result<&CameraObject> {
        let slot = self.check_view(view_index)?;
        Ok(&self.multiviews[slot])
    }

    /// Matrices of a slot already known to be below `used_views`
    pub(crate) fn used_view_object(&self, slot: usize) -> &CameraObject {
        &self.multiviews[slot]
    }

    // ===== RENDER SETTINGS =====

    pub fn render_order(&self) -> i32 {
        self.render_order.load(Ordering::Relaxed)
    }

    /// Store the order only; `CameraPool::set_render_order` also refreshes
    /// the pool-wide range
    pub(crate) fn store_render_order(&mut self, order: i32) {
        self.render_order.store(order, Ordering::Relaxed);
        self.dirty = true;
    }

    pub(crate) fn render_order_cell(&self) -> &Arc<AtomicI32> {
        &self.render_order
    }

    pub fn set_clear_color(&mut self, color: Vec4) {
        self.clear_color = color;
        self.dirty = true;
    }

    pub fn clear_color(&self) -> Vec4 {
        self.clear_color
    }

    pub fn set_clear_depth(&mut self, depth: f32) {
        self.clear_depth = depth;
        self.dirty = true;
    }

    pub fn clear_depth(&self) -> f32 {
        self.clear_depth
    }

    pub fn set_clear_stencil(&mut self, stencil: u32) {
        self.clear_stencil = stencil;
        self.dirty = true;
    }

    pub fn clear_stencil(&self) -> u32 {
        self.clear_stencil
    }

    /// Stored for callers; culling does not apply it
    pub fn set_max_visibility_distance(&mut self, distance: f32) {
        self.max_visibility_distance = distance;
        self.dirty = true;
    }

    pub fn max_visibility_distance(&self) -> f32 {
        self.max_visibility_distance
    }

    /// Draw everything seen by this camera with `mode`
    pub fn force_render_mode(&mut self, mode: RenderMode) {
        self.render_mode_override = Some(mode);
        self.dirty = true;
    }

    pub fn clear_render_mode_override(&mut self) {
        self.render_mode_override = None;
        self.dirty = true;
    }

    pub fn render_mode_override(&self) -> Option<RenderMode> {
        self.render_mode_override
    }

    // ===== VISIBILITY =====

    /// Freeze culling and occlusion queries; cached answers stay in place
    pub fn pause_visibility_testing(&mut self) {
        if !self.occlusion.is_paused() {
            crate::engine_debug!("galaxy3d::Camera", "Camera '{}': visibility testing paused", self.name);
        }
        self.occlusion.pause();
    }

    pub fn resume_visibility_testing(&mut self) {
        if self.occlusion.is_paused() {
            crate::engine_debug!("galaxy3d::Camera", "Camera '{}': visibility testing resumed", self.name);
        }
        self.occlusion.resume();
    }

    pub fn is_visibility_testing_paused(&self) -> bool {
        self.occlusion.is_paused()
    }

    /// Cull `entities` as seen from `camera_entity` and cache the result
    ///
    /// While paused the cached set is returned unchanged.
    pub fn update_visibility(
        &mut self,
        culler: &mut dyn CameraCuller,
        camera_entity: EntityId,
        entities: &dyn EntityProvider,
    ) -> &VisibilitySet {
        if !self.is_visibility_testing_paused() {
            self.visibility = culler.cull(self, camera_entity, entities);
        }
        &self.visibility
    }

    /// Last computed visibility set
    pub fn visibility(&self) -> &VisibilitySet {
        &self.visibility
    }

    // ===== OCCLUSION QUERIES =====

    pub fn reset_queries(&mut self, cmd: &mut dyn CommandList) -> Result<()> {
        self.occlusion.reset(cmd)
    }

    pub fn begin_query(&mut self, cmd: &mut dyn CommandList, entity: EntityId, draw_index: u32) -> Result<()> {
        self.occlusion.begin(cmd, entity, draw_index)
    }

    pub fn end_query(&mut self, cmd: &mut dyn CommandList, entity: EntityId, draw_index: u32) -> Result<()> {
        self.occlusion.end(cmd, entity, draw_index)
    }

    /// See `OcclusionQueries::download`
    pub fn download_query_results(&mut self) -> bool {
        self.occlusion.download()
    }

    /// Occlusion answer from the last downloaded query cycle
    pub fn is_entity_visible(&self, entity: EntityId) -> bool {
        self.occlusion.is_visible(entity)
    }

    pub fn occlusion(&self) -> &OcclusionQueries {
        &self.occlusion
    }

    // ===== RENDER PASSES =====

    pub fn render_pass_count(&self) -> u32 {
        self.render_target.render_pass_count()
    }

    /// Begin render pass `index` with this camera's clear values, a
    /// Y-flipped viewport, and a full-target scissor
    pub fn begin_render_pass(&self, cmd: &mut dyn CommandList, index: u32) -> Result<()> {
        self.check_render_pass(index)?;

        let clear_values = [
            ClearValue::Color(self.clear_color.to_array()),
            ClearValue::DepthStencil { depth: self.clear_depth, stencil: self.clear_stencil },
        ];
        cmd.begin_render_pass(&self.render_target, index, &clear_values)?;

        let width = self.render_target.width();
        let height = self.render_target.height();
        cmd.set_viewport(Viewport {
            x: 0.0,
            y: height as f32,
            width: width as f32,
            height: -(height as f32),
            min_depth: 0.0,
            max_depth: 1.0,
        })?;
        cmd.set_scissor(Rect2D { x: 0, y: 0, width, height })
    }

    pub fn end_render_pass(&self, cmd: &mut dyn CommandList, index: u32) -> Result<()> {
        self.check_render_pass(index)?;
        cmd.end_render_pass()
    }

    // ===== GPU RECORD =====

    pub fn is_dirty(&self) -> bool {
        self.dirty
    }

    /// Shader-side record with derived matrices refreshed for every slot
    /// up to `max_views()`
    pub fn gpu_record(&self) -> CameraRecord {
        let mut record = CameraRecord { multiviews: self.multiviews };
        for object in record.multiviews.iter_mut().take(self.desc.max_views as usize) {
            *object = object.refreshed();
        }
        record
    }

    /// Mark the current record as uploaded
    pub(crate) fn clear_dirty(&mut self) {
        self.dirty = false;
    }

    // ===== INTERNAL =====

    fn check_view(&self, view_index: u32) -> Result<usize> {
        if view_index >= self.desc.max_views {
            crate::engine_bail!("galaxy3d::Camera", IndexOutOfRange,
                "camera '{}': multiview index {} >= {}", self.name, view_index, self.desc.max_views);
        }
        Ok(view_index as usize)
    }

    fn check_render_pass(&self, index: u32) -> Result<()> {
        if index >= self.render_pass_count() {
            crate::engine_bail!("galaxy3d::Camera", IndexOutOfRange,
                "camera '{}': render pass index {} >= {}", self.name, index, self.render_pass_count());
        }
        Ok(())
    }

    fn raise_used_views(&mut self, view_index: u32) {
        self.used_views = self.used_views.max(view_index + 1);
    }
}

impl fmt::Display for Camera {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        let used = &self.multiviews[..self.used_views as usize];
        writeln!(f, "{{")?;
        writeln!(f, "\ttype: \"Camera\",")?;
        writeln!(f, "\tname: \"{}\",", self.name)?;
        writeln!(f, "\tused_views: {},", self.used_views)?;
        writeln!(f, "\tprojections: [")?;
        for (i, object) in used.iter().enumerate() {
            let sep = if i + 1 == used.len() { "" } else { "," };
            writeln!(f, "\t\t{}{}", object.proj, sep)?;
        }
        writeln!(f, "\t],")?;
        writeln!(f, "\tviews: [")?;
        for (i, object) in used.iter().enumerate() {
            let sep = if i + 1 == used.len() { "" } else { "," };
            writeln!(f, "\t\t{}{}", object.view, sep)?;
            writeln!(f, "\t\tnear_pos: {},", object.near_pos)?;
            writeln!(f, "\t\tfov: {}", object.fov)?;
        }
        writeln!(f, "\t],")?;
        write!(f, "}}")
    }
}

impl fmt::Debug for Camera {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("Camera")
            .field("id", &self.id)
            .field("name", &self.name)
            .field("desc", &self.desc)
            .field("used_views", &self.used_views)
            .field("render_order", &self.render_order())
            .field("dirty", &self.dirty)
            .finish_non_exhaustive()
    }
}

#[cfg(test)]
#[path = "camera_tests.rs"]
mod tests;
