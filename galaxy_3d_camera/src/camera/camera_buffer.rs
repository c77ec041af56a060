/// GPU layout of camera data and the pool-wide upload buffer.
///
/// Shaders index the device-local buffer by camera id, then by multiview
/// slot. The pool writes dirty cameras into the staging buffer and records
/// one staging → device copy per frame.

use std::mem;
use std::sync::Arc;
use bytemuck::{Pod, Zeroable};
use glam::Mat4;
use crate::error::Result;
use crate::graphics_device::{Buffer, BufferDesc, BufferUsage, CommandList, GraphicsDevice};
use super::camera_desc::MAX_MULTIVIEW;

/// Matrices of one multiview slot, as read by shaders (336 bytes)
#[repr(C)]
#[derive(Debug, Clone, Copy, PartialEq, Pod, Zeroable)]
pub struct CameraObject {
    pub view: Mat4,
    pub proj: Mat4,
    pub view_inv: Mat4,
    pub proj_inv: Mat4,
    pub view_proj: Mat4,
    pub near_pos: f32,
    pub fov: f32,
    pub _pad0: f32,
    pub _pad1: f32,
}

impl Default for CameraObject {
    fn default() -> Self {
        Self {
            view: Mat4::IDENTITY,
            proj: Mat4::IDENTITY,
            view_inv: Mat4::IDENTITY,
            proj_inv: Mat4::IDENTITY,
            view_proj: Mat4::IDENTITY,
            near_pos: 0.0,
            fov: 0.0,
            _pad0: 0.0,
            _pad1: 0.0,
        }
    }
}

impl CameraObject {
    /// Copy with inverses and view-projection recomputed from `view` and `proj`
    pub fn refreshed(&self) -> Self {
        Self {
            view_inv: self.view.inverse(),
            proj_inv: self.proj.inverse(),
            view_proj: self.proj * self.view,
            ..*self
        }
    }
}

/// Every multiview slot of one camera
#[repr(C)]
#[derive(Debug, Clone, Copy, PartialEq, Pod, Zeroable)]
pub struct CameraRecord {
    pub multiviews: [CameraObject; MAX_MULTIVIEW as usize],
}

impl Default for CameraRecord {
    fn default() -> Self {
        Self {
            multiviews: [CameraObject::default(); MAX_MULTIVIEW as usize],
        }
    }
}

/// Staging + device-local buffer pair holding one `CameraRecord` per pool slot
pub struct CameraUploadBuffer {
    staging: Arc<dyn Buffer>,
    device_local: Arc<dyn Buffer>,
    capacity: u32,
}

impl CameraUploadBuffer {
    /// Bytes per camera slot
    pub const RECORD_SIZE: u64 = mem::size_of::<CameraRecord>() as u64;

    /// Allocate both buffers for `capacity` cameras
    pub fn new(device: &mut dyn GraphicsDevice, capacity: u32) -> Result<Self> {
        let size = Self::RECORD_SIZE * capacity as u64;
        let staging = device.create_buffer(BufferDesc {
            name: "camera_records_staging".to_string(),
            size,
            usage: BufferUsage::Staging,
        })?;
        let device_local = device.create_buffer(BufferDesc {
            name: "camera_records".to_string(),
            size,
            usage: BufferUsage::Storage,
        })?;
        Ok(Self { staging, device_local, capacity })
    }

    /// Total size of each buffer in bytes
    pub fn size(&self) -> u64 {
        Self::RECORD_SIZE * self.capacity as u64
    }

    pub fn capacity(&self) -> u32 {
        self.capacity
    }

    /// Write the record of camera `id` into the staging buffer
    pub fn write(&self, id: u32, record: &CameraRecord) -> Result<()> {
        if id >= self.capacity {
            crate::engine_bail!("galaxy3d::CameraPool", IndexOutOfRange,
                "camera record {} >= upload capacity {}", id, self.capacity);
        }
        self.staging.update(Self::RECORD_SIZE * id as u64, bytemuck::bytes_of(record))
    }

    /// Zero the staging record of camera `id`
    pub fn clear(&self, id: u32) -> Result<()> {
        self.write(id, &CameraRecord::zeroed())
    }

    /// Record the staging → device copy of the whole array
    pub fn record_copy(&self, cmd: &mut dyn CommandList) -> Result<()> {
        cmd.copy_buffer(&self.staging, &self.device_local, self.size())
    }

    /// Buffer shaders read camera data from
    pub fn device_buffer(&self) -> &Arc<dyn Buffer> {
        &self.device_local
    }

    pub fn staging_buffer(&self) -> &Arc<dyn Buffer> {
        &self.staging
    }
}

#[cfg(test)]
#[path = "camera_buffer_tests.rs"]
mod tests;
