// Host-side tests for viewport mapping, camera rays and the focus tween.

use globe_core::{focus_eye, Camera, CameraTween, Easing, Viewport};
use glam::{Vec2, Vec3};

fn camera() -> Camera {
    Camera {
        eye: Vec3::new(0.0, 0.0, 2.5),
        target: Vec3::ZERO,
        up: Vec3::Y,
        aspect: 1.5,
        fovy_radians: 75f32.to_radians(),
        znear: 0.1,
        zfar: 1000.0,
    }
}

#[test]
fn viewport_maps_corners_to_ndc() {
    let vp = Viewport::new(800.0, 600.0);
    assert_eq!(vp.to_ndc(Vec2::new(0.0, 0.0)), Vec2::new(-1.0, 1.0));
    assert_eq!(vp.to_ndc(Vec2::new(800.0, 600.0)), Vec2::new(1.0, -1.0));
    assert_eq!(vp.to_ndc(Vec2::new(400.0, 300.0)), Vec2::ZERO);
    let px = Vec2::new(123.0, 456.0);
    assert!((vp.from_ndc(vp.to_ndc(px)) - px).length() < 1e-3);
}

#[test]
fn centre_ray_points_at_target() {
    let cam = camera();
    let ray = cam.ray_through_ndc(Vec2::ZERO);
    assert_eq!(ray.origin, cam.eye);
    assert!((ray.dir - Vec3::new(0.0, 0.0, -1.0)).length() < 1e-5);
}

#[test]
fn projected_points_cast_rays_back_through_themselves() {
    let cam = camera();
    let p = Vec3::new(0.4, -0.3, 0.2);
    let ndc = cam.project(p).expect("in front");
    let ray = cam.ray_through_ndc(ndc);
    let t = (p - ray.origin).dot(ray.dir);
    assert!((ray.at(t) - p).length() < 1e-4);
    assert!(cam.project(Vec3::new(0.0, 0.0, 5.0)).is_none(), "behind the eye");
}

#[test]
fn cubic_easing_shape() {
    let e = Easing::CubicInOut;
    assert_eq!(e.apply(0.0), 0.0);
    assert_eq!(e.apply(1.0), 1.0);
    assert!((e.apply(0.5) - 0.5).abs() < 1e-6);
    assert!(e.apply(0.25) < 0.25, "slow start");
    assert!(e.apply(0.75) > 0.75, "slow finish");
    assert!((e.apply(0.3) + e.apply(0.7) - 1.0).abs() < 1e-6, "symmetric");
    assert_eq!(e.apply(-1.0), 0.0);
    assert_eq!(e.apply(2.0), 1.0);
    assert_eq!(Easing::Linear.apply(0.4), 0.4);
}

#[test]
fn tween_hits_both_endpoints() {
    let from = Vec3::new(0.0, 0.0, 2.5);
    let to = Vec3::new(1.5, 0.0, 0.0);
    let mut tween = CameraTween::new(from, to, 1.2, Easing::CubicInOut);
    assert!((tween.sample() - from).length() < 1e-5);
    let mid = tween.step(0.6);
    assert!((mid.length() - 2.0).abs() < 1e-4, "radius is interpolated");
    assert!(!tween.is_finished());
    let end = tween.step(10.0);
    assert_eq!(end, to);
    assert!(tween.is_finished());
    assert_eq!(tween.progress(), 1.0);
}

#[test]
fn zero_duration_tween_is_immediately_done() {
    let to = Vec3::new(0.0, 1.5, 0.0);
    let tween = CameraTween::new(Vec3::new(0.0, 0.0, 3.0), to, 0.0, Easing::Linear);
    assert!(tween.is_finished());
    assert_eq!(tween.sample(), to);
}

#[test]
fn focus_eye_sits_above_surface_point() {
    let surface = Vec3::new(0.0, 0.0, -1.0);
    let eye = focus_eye(surface, 1.0, 0.5);
    assert!((eye - Vec3::new(0.0, 0.0, -1.5)).length() < 1e-6);
}
