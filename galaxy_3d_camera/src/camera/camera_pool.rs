/// CameraPool - fixed-capacity arena of cameras.
///
/// Owns every camera record, the name → slot lookup, the pool-wide
/// min/max render order, and the upload buffer shaders read camera
/// matrices from. All mutation goes through one pool lock, taken before
/// any per-camera GPU allocation or release.
///
/// Cameras are handed out as `CameraHandle`s. A handle stays valid after
/// the camera is deleted; the camera's GPU resources are released once
/// the last handle is dropped.
///
/// Lock order: pool state, then graphics device. The pool never blocks on
/// a camera lock while holding its own, so a thread may hold camera guards
/// and still call into the pool.

use std::sync::{Arc, Mutex, MutexGuard};
use std::sync::atomic::{AtomicI32, Ordering};
use crate::error::Result;
use crate::graphics_device::{CommandList, GraphicsDevice, QueryPoolDesc, RenderTargetDesc};
use crate::utils::{Identifiable, Nameable, ObjectPool};
use super::camera::Camera;
use super::camera_buffer::CameraUploadBuffer;
use super::camera_desc::{CameraDesc, CameraPoolDesc};
use super::render_sync::RenderSync;

// ===== CAMERA HANDLE =====

/// Shared reference to a pooled camera
///
/// Cheap to clone. The render sync block and render order are reachable
/// without locking the camera, so a thread blocked in
/// `wait_for_render_complete` never holds the camera lock.
#[derive(Clone)]
pub struct CameraHandle {
    id: u32,
    name: Arc<str>,
    camera: Arc<parking_lot::Mutex<Camera>>,
    render_sync: Arc<RenderSync>,
    render_order: Arc<AtomicI32>,
}

impl CameraHandle {
    fn new(camera: Camera) -> Self {
        Self {
            id: camera.id(),
            name: Arc::from(camera.name()),
            render_sync: camera.render_sync().clone(),
            render_order: camera.render_order_cell().clone(),
            camera: Arc::new(parking_lot::Mutex::new(camera)),
        }
    }

    /// Pool slot of the camera
    pub fn id(&self) -> u32 {
        self.id
    }

    pub fn name(&self) -> &str {
        &self.name
    }

    /// Lock the camera for reading or mutation
    pub fn lock(&self) -> parking_lot::MutexGuard<'_, Camera> {
        self.camera.lock()
    }

    pub fn render_sync(&self) -> &Arc<RenderSync> {
        &self.render_sync
    }

    /// Current render order, read without locking the camera
    pub fn render_order(&self) -> i32 {
        self.render_order.load(Ordering::Relaxed)
    }

    /// Producer side of the render handshake
    pub fn mark_render_complete(&self) {
        self.render_sync.mark_render_complete();
    }

    /// Consumer side of the render handshake; blocks until the next mark
    pub fn wait_for_render_complete(&self) {
        self.render_sync.wait_for_render_complete();
    }

    /// Whether both handles point at the same camera record
    pub fn same_camera(&self, other: &CameraHandle) -> bool {
        Arc::ptr_eq(&self.camera, &other.camera)
    }
}

impl Nameable for CameraHandle {
    fn name(&self) -> &str {
        CameraHandle::name(self)
    }
}

impl Identifiable for CameraHandle {
    fn id(&self) -> u32 {
        CameraHandle::id(self)
    }
}

impl std::fmt::Debug for CameraHandle {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("CameraHandle")
            .field("id", &self.id)
            .field("name", &self.name)
            .finish()
    }
}

// ===== CAMERA POOL =====

struct PoolState {
    cameras: ObjectPool<CameraHandle>,
    min_render_order: i32,
    max_render_order: i32,
}

pub struct CameraPool {
    graphics_device: Arc<Mutex<dyn GraphicsDevice>>,
    state: parking_lot::Mutex<PoolState>,
    upload_buffer: CameraUploadBuffer,
    desc: CameraPoolDesc,
}

impl CameraPool {
    /// Create an empty pool and its upload buffer
    ///
    /// # Errors
    ///
    /// - `InvalidConfiguration` if `desc` is invalid
    /// - `BackendError` if the graphics device lock is poisoned
    /// - any error raised while allocating the upload buffer
    pub fn new(graphics_device: Arc<Mutex<dyn GraphicsDevice>>, desc: CameraPoolDesc) -> Result<Self> {
        desc.validate()?;

        let upload_buffer = {
            let mut device = lock_device(&graphics_device)?;
            CameraUploadBuffer::new(&mut *device, desc.capacity)?
        };

        crate::engine_info!("galaxy3d::CameraPool",
            "Camera pool created (capacity {}, {} occlusion queries per camera)",
            desc.capacity, desc.max_entities);

        Ok(Self {
            graphics_device,
            state: parking_lot::Mutex::new(PoolState {
                cameras: ObjectPool::new("galaxy3d::CameraPool", "Camera", desc.capacity),
                min_render_order: 0,
                max_render_order: 0,
            }),
            upload_buffer,
            desc,
        })
    }

    // ===== CREATION / DELETION =====

    /// Create a camera named `name`
    ///
    /// Allocates the camera's occlusion query pool and render target. If
    /// either allocation fails the slot and name are released and the
    /// device error is returned unchanged.
    ///
    /// # Errors
    ///
    /// - `InvalidConfiguration` if `desc` is invalid
    /// - `AlreadyExists` if `name` is taken
    /// - `CapacityExceeded` if every slot is in use
    /// - any error raised by the graphics device
    pub fn create_camera(&self, name: &str, desc: CameraDesc) -> Result<CameraHandle> {
        desc.validate()?;

        let mut state = self.state.lock();
        let query_count = self.desc.max_entities;
        let handle = state.cameras.insert_with(name, |id| {
            let mut device = lock_device(&self.graphics_device)?;
            let query_pool = device.create_query_pool(QueryPoolDesc {
                name: format!("{}_occlusion", name),
                query_count,
            })?;
            let render_target = device.create_render_target(RenderTargetDesc {
                name: format!("{}_target", name),
                width: desc.width,
                height: desc.height,
                samples: desc.msaa_samples,
                layers: desc.max_views,
                render_pass_count: desc.render_pass_count(),
                depth_prepass: desc.depth_prepass(),
            })?;
            Ok(CameraHandle::new(Camera::new(id, name.to_string(), desc, render_target, query_pool)))
        })?;

        crate::engine_info!("galaxy3d::CameraPool",
            "Camera '{}' created (id {}, {}x{}, {} view(s))",
            name, handle.id, desc.width, desc.height, desc.max_views);

        Ok(handle.clone())
    }

    /// Delete the camera named `name` and free its slot
    pub fn delete_camera(&self, name: &str) -> Result<()> {
        let mut state = self.state.lock();
        let handle = state.cameras.remove(name)?;
        self.release(handle)
    }

    /// Delete the camera in slot `id` and free the slot
    ///
    /// # Errors
    ///
    /// - `IndexOutOfRange` if `id >= capacity()`
    /// - `NotFound` if the slot is empty
    pub fn delete_camera_by_id(&self, id: u32) -> Result<()> {
        let mut state = self.state.lock();
        let handle = state.cameras.remove_by_id(id)?;
        self.release(handle)
    }

    fn release(&self, handle: CameraHandle) -> Result<()> {
        self.upload_buffer.clear(handle.id)?;
        crate::engine_debug!("galaxy3d::CameraPool",
            "Camera '{}' deleted (slot {} freed)", handle.name, handle.id);
        Ok(())
    }

    // ===== LOOKUP =====

    /// Camera registered under `name`
    pub fn camera(&self, name: &str) -> Result<CameraHandle> {
        self.state.lock().cameras.get(name).cloned()
    }

    /// Camera in slot `id`
    ///
    /// # Errors
    ///
    /// - `IndexOutOfRange` if `id >= capacity()`
    /// - `NotFound` if the slot is empty
    pub fn camera_by_id(&self, id: u32) -> Result<CameraHandle> {
        self.state.lock().cameras.get_by_id(id).cloned()
    }

    /// Non-logging lookup by name
    pub fn find_camera(&self, name: &str) -> Option<CameraHandle> {
        self.state.lock().cameras.find(name).cloned()
    }

    /// Every live camera in slot order
    pub fn cameras(&self) -> Vec<CameraHandle> {
        self.state.lock().cameras.iter().cloned().collect()
    }

    /// Live cameras whose render order is `order`, in slot order
    pub fn cameras_by_order(&self, order: i32) -> Vec<CameraHandle> {
        let state = self.state.lock();
        state
            .cameras
            .iter()
            .filter(|handle| handle.render_order() == order)
            .cloned()
            .collect()
    }

    pub fn capacity(&self) -> u32 {
        self.desc.capacity
    }

    pub fn camera_count(&self) -> u32 {
        self.state.lock().cameras.len()
    }

    pub fn desc(&self) -> &CameraPoolDesc {
        &self.desc
    }

    // ===== RENDER ORDER =====

    /// Store `order` on `camera`, then rescan every live camera to refresh
    /// the pool-wide min/max render order
    ///
    /// Locks `camera` briefly, so the caller must not hold that camera's
    /// guard. Guards on other cameras are fine.
    pub fn set_render_order(&self, camera: &CameraHandle, order: i32) {
        camera.lock().store_render_order(order);
        let mut state = self.state.lock();

        let pooled = state.cameras.find(&camera.name).is_some_and(|live| live.same_camera(camera));
        if !pooled {
            crate::engine_warn!("galaxy3d::CameraPool",
                "Camera '{}' is no longer pooled; its render order does not count toward the pool range",
                camera.name);
        }

        let mut range: Option<(i32, i32)> = None;
        for handle in state.cameras.iter() {
            let value = handle.render_order();
            range = Some(match range {
                Some((min, max)) => (min.min(value), max.max(value)),
                None => (value, value),
            });
        }
        let (min, max) = range.unwrap_or((0, 0));
        state.min_render_order = min;
        state.max_render_order = max;

        crate::engine_debug!("galaxy3d::CameraPool",
            "Camera '{}' render order set to {} (pool range {}..={})", camera.name, order, min, max);
    }

    /// Lowest render order seen by the last `set_render_order`
    pub fn min_render_order(&self) -> i32 {
        self.state.lock().min_render_order
    }

    /// Highest render order seen by the last `set_render_order`
    pub fn max_render_order(&self) -> i32 {
        self.state.lock().max_render_order
    }

    // ===== GPU UPLOAD =====

    /// Write every dirty camera into the staging buffer, then record the
    /// staging → device copy into `cmd`
    ///
    /// Cameras locked elsewhere are skipped and stay dirty for the next
    /// upload. Returns the number of camera records written.
    pub fn upload_records(&self, cmd: &mut dyn CommandList) -> Result<u32> {
        let state = self.state.lock();
        let mut written = 0;
        for handle in state.cameras.iter() {
            let Some(mut camera) = handle.camera.try_lock() else {
                crate::engine_trace!("galaxy3d::CameraPool",
                    "Camera '{}' busy, upload deferred", handle.name);
                continue;
            };
            if camera.is_dirty() {
                self.upload_buffer.write(handle.id, &camera.gpu_record())?;
                camera.clear_dirty();
                written += 1;
            }
        }
        self.upload_buffer.record_copy(cmd)?;
        Ok(written)
    }

    pub fn upload_buffer(&self) -> &CameraUploadBuffer {
        &self.upload_buffer
    }
}

fn lock_device(device: &Arc<Mutex<dyn GraphicsDevice>>) -> Result<MutexGuard<'_, dyn GraphicsDevice + 'static>> {
    device.lock().map_err(|_| {
        crate::engine_err!("galaxy3d::CameraPool", BackendError, "Graphics device lock poisoned")
    })
}

#[cfg(test)]
#[path = "camera_pool_tests.rs"]
mod tests;
