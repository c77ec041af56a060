use super::*;

fn approx_eq(a: &Mat4, b: &Mat4) -> bool {
    a.abs_diff_eq(*b, 1e-5)
}

#[test]
fn test_from_translation() {
    let t = EntityTransform::from_translation(Vec3::new(1.0, 2.0, 3.0));
    assert_eq!(t.world_position, Vec3::new(1.0, 2.0, 3.0));
    assert_eq!(t.local_to_world.transform_point3(Vec3::ZERO), Vec3::new(1.0, 2.0, 3.0));
    assert_eq!(t.parent_to_local_rotation, Mat4::IDENTITY);
    assert!(approx_eq(&(t.parent_to_local_translation * t.local_to_world), &Mat4::IDENTITY));
}

#[test]
fn test_looking_at_factors_recompose_view() {
    let eye = Vec3::new(3.0, 4.0, 5.0);
    let target = Vec3::new(0.0, 1.0, -2.0);
    let t = EntityTransform::looking_at(eye, target, Vec3::Y);

    let view = Mat4::look_at_rh(eye, target, Vec3::Y);
    let recomposed = t.parent_to_local_rotation * t.parent_to_local_translation;
    assert!(approx_eq(&recomposed, &view));
    assert_eq!(t.world_position, eye);
}

#[test]
fn test_bounding_sphere_new() {
    let sphere = BoundingSphere::new(Vec3::X, 2.5);
    assert_eq!(sphere.centroid, Vec3::X);
    assert_eq!(sphere.radius, 2.5);
}
