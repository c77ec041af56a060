use glam::{Mat4, Vec3};
use bytemuck::Zeroable;
use super::*;
use crate::error::Error;
use crate::graphics_device::mock_graphics_device::{MockCommandList, MockGraphicsDevice};

#[test]
fn test_layout_sizes() {
    assert_eq!(mem::size_of::<CameraObject>(), 336);
    assert_eq!(mem::size_of::<CameraRecord>(), 336 * MAX_MULTIVIEW as usize);
    assert_eq!(CameraUploadBuffer::RECORD_SIZE, 2016);
}

#[test]
fn test_refreshed_recomputes_derived_matrices() {
    let object = CameraObject {
        view: Mat4::look_at_rh(Vec3::new(1.0, 2.0, 3.0), Vec3::ZERO, Vec3::Y),
        proj: Mat4::perspective_infinite_reverse_rh(1.0, 1.5, 0.1),
        near_pos: 0.1,
        fov: 1.0,
        ..Default::default()
    };
    let refreshed = object.refreshed();

    assert!((refreshed.view * refreshed.view_inv).abs_diff_eq(Mat4::IDENTITY, 1e-4));
    assert!((refreshed.proj * refreshed.proj_inv).abs_diff_eq(Mat4::IDENTITY, 1e-4));
    assert_eq!(refreshed.view_proj, object.proj * object.view);
    assert_eq!(refreshed.near_pos, 0.1);
    assert_eq!(refreshed.fov, 1.0);
}

#[test]
fn test_default_record_is_identity() {
    let record = CameraRecord::default();
    assert!(record.multiviews.iter().all(|m| m.view == Mat4::IDENTITY && m.view_proj == Mat4::IDENTITY));
}

#[test]
fn test_upload_buffer_allocates_staging_and_device_local() {
    let mut device = MockGraphicsDevice::new();
    let upload = CameraUploadBuffer::new(&mut device, 4).unwrap();

    assert_eq!(upload.size(), 4 * 2016);
    assert_eq!(device.buffers.len(), 2);
    assert_eq!(device.buffers[0].usage, BufferUsage::Staging);
    assert_eq!(device.buffers[1].usage, BufferUsage::Storage);
    assert_eq!(upload.device_buffer().size(), 4 * 2016);
}

#[test]
fn test_write_lands_at_slot_offset() {
    let mut device = MockGraphicsDevice::new();
    let upload = CameraUploadBuffer::new(&mut device, 4).unwrap();

    let mut record = CameraRecord::zeroed();
    record.multiviews[0].near_pos = 0.5;
    upload.write(2, &record).unwrap();

    let staging = &device.buffers[0];
    let bytes = staging.read(2 * 2016, 2016);
    let written: CameraRecord = bytemuck::pod_read_unaligned(&bytes);
    assert_eq!(written.multiviews[0].near_pos, 0.5);

    // Slot 1 untouched
    assert!(staging.read(2016, 2016).iter().all(|&b| b == 0));
}

#[test]
fn test_clear_zeroes_slot() {
    let mut device = MockGraphicsDevice::new();
    let upload = CameraUploadBuffer::new(&mut device, 2).unwrap();
    upload.write(1, &CameraRecord::default()).unwrap();
    upload.clear(1).unwrap();
    assert!(device.buffers[0].read(2016, 2016).iter().all(|&b| b == 0));
}

#[test]
fn test_write_out_of_range() {
    let mut device = MockGraphicsDevice::new();
    let upload = CameraUploadBuffer::new(&mut device, 2).unwrap();
    assert!(matches!(upload.write(2, &CameraRecord::default()), Err(Error::IndexOutOfRange(_))));
}

#[test]
fn test_record_copy() {
    let mut device = MockGraphicsDevice::new();
    let upload = CameraUploadBuffer::new(&mut device, 3).unwrap();
    let mut cmd = MockCommandList::new();
    upload.record_copy(&mut cmd).unwrap();
    assert_eq!(cmd.commands, vec![format!("copy_buffer({})", 3 * 2016)]);
}
