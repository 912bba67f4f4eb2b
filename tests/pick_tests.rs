// Host-side tests for ray picking against spheres, marker cylinders and sets.

use globe_core::{ray_capped_cylinder, ray_sphere, LocationRecord, MarkerId, MarkerSet, Ray};
use glam::Vec3;

#[test]
fn ray_sphere_hits_front_face() {
    let ray = Ray::new(Vec3::new(0.0, 0.0, 5.0), Vec3::new(0.0, 0.0, -2.0));
    let t = ray_sphere(&ray, Vec3::ZERO, 1.0).expect("hit");
    assert!((t - 4.0).abs() < 1e-5);
    assert!((ray.at(t) - Vec3::Z).length() < 1e-5);
}

#[test]
fn ray_sphere_miss_and_behind() {
    let ray = Ray::new(Vec3::new(0.0, 2.0, 5.0), Vec3::new(0.0, 0.0, -1.0));
    assert!(ray_sphere(&ray, Vec3::ZERO, 1.0).is_none());
    let away = Ray::new(Vec3::new(0.0, 0.0, 5.0), Vec3::Z);
    assert!(ray_sphere(&away, Vec3::ZERO, 1.0).is_none());
}

#[test]
fn ray_sphere_from_inside_reports_exit() {
    let ray = Ray::new(Vec3::ZERO, Vec3::X);
    let t = ray_sphere(&ray, Vec3::ZERO, 2.0).expect("exit");
    assert!((t - 2.0).abs() < 1e-5);
}

#[test]
fn cylinder_side_hit() {
    // upright cylinder at the origin, ray crossing it at mid-height
    let ray = Ray::new(Vec3::new(-5.0, 0.5, 0.0), Vec3::X);
    let t = ray_capped_cylinder(&ray, Vec3::ZERO, Vec3::Y, 1.0, 0.25).expect("side hit");
    assert!((t - 4.75).abs() < 1e-5);
}

#[test]
fn cylinder_cap_hit_along_axis() {
    let ray = Ray::new(Vec3::new(0.0, 3.0, 0.0), -Vec3::Y);
    let t = ray_capped_cylinder(&ray, Vec3::ZERO, Vec3::Y, 1.0, 0.25).expect("top cap");
    assert!((t - 2.0).abs() < 1e-5);
}

#[test]
fn cylinder_misses_above_height_and_outside_radius() {
    let above = Ray::new(Vec3::new(-5.0, 1.5, 0.0), Vec3::X);
    assert!(ray_capped_cylinder(&above, Vec3::ZERO, Vec3::Y, 1.0, 0.25).is_none());
    let wide = Ray::new(Vec3::new(-5.0, 0.5, 0.3), Vec3::X);
    assert!(ray_capped_cylinder(&wide, Vec3::ZERO, Vec3::Y, 1.0, 0.25).is_none());
    let behind = Ray::new(Vec3::new(5.0, 0.5, 0.0), Vec3::X);
    assert!(ray_capped_cylinder(&behind, Vec3::ZERO, Vec3::Y, 1.0, 0.25).is_none());
}

#[test]
fn tilted_cylinder_follows_its_axis() {
    let axis = Vec3::new(1.0, 1.0, 0.0).normalize();
    let mid = axis * 0.5;
    let ray = Ray::new(mid + Vec3::new(0.0, 0.0, 4.0), -Vec3::Z);
    let t = ray_capped_cylinder(&ray, Vec3::ZERO, axis, 1.0, 0.1).expect("hit");
    assert!((t - 3.9).abs() < 1e-4);
}

fn record(id: u32, lat: f64, lon: f64, value: f64) -> LocationRecord {
    LocationRecord {
        id,
        name: format!("r{id}"),
        lat,
        lon,
        value,
    }
}

#[test]
fn nearest_hit_prefers_closest_marker() {
    // both on the +X meridian; the taller one is closer to an eye on the +X axis
    let markers = MarkerSet::from_records(&[record(1, 0.0, 0.0, 1.0), record(2, 0.0, 0.0, 10.0)], 1.0);
    let ray = Ray::new(Vec3::new(3.0, 0.0, 0.0), -Vec3::X);
    let (id, t) = markers.nearest_hit(&ray).expect("hit");
    assert_eq!(id, MarkerId(1));
    assert!((t - 1.8).abs() < 1e-4);
}

#[test]
fn nearest_hit_ties_go_to_lower_index() {
    let markers = MarkerSet::from_records(&[record(1, 10.0, 20.0, 5.0), record(2, 10.0, 20.0, 5.0)], 1.0);
    let tip = markers.get(MarkerId(0)).map(|m| m.tip()).expect("marker");
    let ray = Ray::new(tip * 3.0, -tip);
    let (id, _) = markers.nearest_hit(&ray).expect("hit");
    assert_eq!(id, MarkerId(0));
}

#[test]
fn marker_pick_ignores_globe_occlusion() {
    // marker on the far side is still reported
    let markers = MarkerSet::from_records(&[record(1, 0.0, 180.0, 1.0)], 1.0);
    let ray = Ray::new(Vec3::new(3.0, 0.0, 0.0), -Vec3::X);
    assert_eq!(markers.nearest_hit(&ray).map(|(id, _)| id), Some(MarkerId(0)));
}
