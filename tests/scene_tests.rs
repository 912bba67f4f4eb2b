// Host-side tests for the scene: picking through the camera, hover callbacks,
// focus animation and orbit controls.

use globe_core::{
    GlobeScene, HoverTransition, LocationRecord, MarkerId, SceneConfig, Viewport,
    ORBIT_MAX_DISTANCE, ORBIT_MIN_DISTANCE,
};
use glam::{Vec2, Vec3};

fn record(id: u32, name: &str, lat: f64, lon: f64, value: f64) -> LocationRecord {
    LocationRecord {
        id,
        name: name.to_string(),
        lat,
        lon,
        value,
    }
}

/// A at (1,0,0) facing +X, B at (0,0,-1) facing away from the camera.
fn two_marker_scene() -> GlobeScene {
    GlobeScene::new(
        &[record(1, "A", 0.0, 0.0, 10.0), record(2, "B", 0.0, 90.0, 5.0)],
        Viewport::new(800.0, 800.0),
        SceneConfig::default(),
    )
}

fn screen_point_on(scene: &GlobeScene, id: MarkerId) -> Vec2 {
    let m = scene.markers().get(id).expect("marker exists");
    let mid = m.position + m.normal * (m.height * 0.5);
    scene.project_to_screen(mid).expect("marker in front of camera")
}

fn empty_space(scene: &GlobeScene) -> Vec2 {
    scene.viewport().from_ndc(Vec2::new(0.9, 0.9))
}

#[test]
fn pointer_sequence_reports_a_then_none_and_b_then_none() {
    let mut scene = two_marker_scene();
    let mut seen: Vec<Option<String>> = Vec::new();
    let mut sink = |r: Option<&LocationRecord>| seen.push(r.map(|r| r.name.clone()));

    let over_a = screen_point_on(&scene, MarkerId(0));
    // B sits on the view axis, so the centre of the screen hits its base
    let centre = Vec2::new(400.0, 400.0);
    let nothing = empty_space(&scene);

    assert_eq!(
        scene.pointer_move(over_a, &mut sink),
        HoverTransition::Entered(MarkerId(0))
    );
    assert_eq!(
        scene.pointer_move(centre, &mut sink),
        HoverTransition::Switched {
            from: MarkerId(0),
            to: MarkerId(1)
        }
    );
    assert_eq!(
        scene.pointer_move(nothing, &mut sink),
        HoverTransition::Left(MarkerId(1))
    );
    drop(sink);

    assert_eq!(
        seen,
        vec![
            Some("A".to_string()),
            None,
            Some("B".to_string()),
            None
        ]
    );
    assert_eq!(scene.markers().hovered_count(), 0);
}

#[test]
fn repeated_pointer_position_notifies_once() {
    let mut scene = two_marker_scene();
    let mut seen: Vec<Option<u32>> = Vec::new();
    let mut sink = |r: Option<&LocationRecord>| seen.push(r.map(|r| r.id));

    let over_a = screen_point_on(&scene, MarkerId(0));
    assert_eq!(
        scene.pointer_move(over_a, &mut sink),
        HoverTransition::Entered(MarkerId(0))
    );
    for _ in 0..4 {
        assert_eq!(
            scene.pointer_move(over_a, &mut sink),
            HoverTransition::Unchanged
        );
    }
    drop(sink);

    assert_eq!(seen, vec![Some(1)]);
    assert_eq!(scene.markers().hovered_count(), 1);
}

#[test]
fn release_hover_reports_none_once() {
    let mut scene = two_marker_scene();
    let mut seen: Vec<Option<u32>> = Vec::new();
    let mut sink = |r: Option<&LocationRecord>| seen.push(r.map(|r| r.id));

    let over_a = screen_point_on(&scene, MarkerId(0));
    scene.pointer_move(over_a, &mut sink);
    assert_eq!(
        scene.release_hover(&mut sink),
        HoverTransition::Left(MarkerId(0))
    );
    assert_eq!(scene.release_hover(&mut sink), HoverTransition::Unchanged);
    drop(sink);

    assert_eq!(seen, vec![Some(1), None]);
    assert_eq!(scene.hovered(), None);
    assert_eq!(scene.markers().hovered_count(), 0);
}

#[test]
fn hovered_record_tracks_selection() {
    let mut scene = two_marker_scene();
    let mut sink = |_: Option<&LocationRecord>| {};
    let over_a = screen_point_on(&scene, MarkerId(0));
    scene.pointer_move(over_a, &mut sink);
    assert_eq!(scene.hovered(), Some(MarkerId(0)));
    assert_eq!(scene.hovered_record().map(|r| r.id), Some(1));
    let nothing = empty_space(&scene);
    scene.pointer_move(nothing, &mut sink);
    assert!(scene.hovered_record().is_none());
}

#[test]
fn click_on_empty_space_does_nothing() {
    let mut scene = two_marker_scene();
    let nothing = empty_space(&scene);
    assert_eq!(scene.click(nothing), None);
    assert!(scene.focus().is_none());
}

#[test]
fn click_focuses_camera_above_marker() {
    let mut scene = two_marker_scene();
    let over_a = screen_point_on(&scene, MarkerId(0));
    assert_eq!(scene.click(over_a), Some(MarkerId(0)));
    let dest = scene.focus().map(|t| t.destination()).expect("tween started");
    assert!((dest - Vec3::new(1.5, 0.0, 0.0)).length() < 1e-5);

    let start_eye = scene.camera().eye;
    for _ in 0..30 {
        scene.advance(0.05);
        // the eye sweeps around the globe rather than through it
        assert!(scene.camera().eye.length() > 1.49);
    }
    assert!(scene.focus().is_none(), "tween finishes after its duration");
    assert!(
        (scene.camera().eye - Vec3::new(1.5, 0.0, 0.0)).length() < 1e-3,
        "eye {:?}",
        scene.camera().eye
    );
    assert_ne!(start_eye, scene.camera().eye);
    assert_eq!(scene.camera().target, Vec3::ZERO);
}

#[test]
fn new_focus_replaces_in_flight_tween() {
    let mut scene = two_marker_scene();
    assert!(scene.focus_on(MarkerId(0)));
    scene.advance(0.3);
    let mid_eye = scene.camera().eye;
    assert!(scene.focus_on(MarkerId(1)));
    let tween = scene.focus().expect("replacement tween");
    assert!((tween.destination() - Vec3::new(0.0, 0.0, -1.5)).length() < 1e-5);
    assert_eq!(tween.progress(), 0.0);
    // the replacement starts where the camera currently is
    assert!((tween.sample() - mid_eye).length() < 1e-5);
    assert!(!scene.focus_on(MarkerId(9)));
}

#[test]
fn zoom_is_clamped_to_control_range() {
    let mut scene = two_marker_scene();
    for _ in 0..200 {
        scene.zoom(-1.0);
        scene.advance(0.016);
    }
    let d = scene.camera().distance_to_target();
    assert!((d - ORBIT_MIN_DISTANCE).abs() < 1e-4, "zoomed in to {d}");

    for _ in 0..200 {
        scene.zoom(1.0);
        scene.advance(0.016);
    }
    let d = scene.camera().distance_to_target();
    assert!((d - ORBIT_MAX_DISTANCE).abs() < 1e-3, "zoomed out to {d}");
}

#[test]
fn orbit_drag_keeps_distance_and_moves_eye() {
    let mut scene = two_marker_scene();
    let before = scene.camera().eye;
    scene.orbit_drag(Vec2::new(120.0, 40.0));
    for _ in 0..60 {
        scene.advance(0.016);
    }
    let after = scene.camera().eye;
    assert!((after - before).length() > 0.1);
    assert!((after.length() - before.length()).abs() < 1e-4);
}

#[test]
fn vertical_drag_never_flips_over_the_pole() {
    let mut scene = two_marker_scene();
    for _ in 0..100 {
        scene.orbit_drag(Vec2::new(0.0, 400.0));
        scene.advance(0.016);
    }
    let eye = scene.camera().eye;
    let horizontal = Vec2::new(eye.x, eye.z).length();
    assert!(horizontal > 0.0, "eye stays off the polar axis: {eye:?}");
    assert!(eye.y.abs() < scene.camera().distance_to_target());
}

#[test]
fn resize_updates_aspect_only() {
    let mut scene = two_marker_scene();
    let eye = scene.camera().eye;
    scene.resize(Viewport::new(1600.0, 400.0));
    assert!((scene.camera().aspect - 4.0).abs() < 1e-6);
    assert_eq!(scene.viewport(), Viewport::new(1600.0, 400.0));
    assert_eq!(scene.camera().eye, eye);
    assert_eq!(scene.markers().len(), 2);
}

#[test]
fn scene_starts_at_configured_camera() {
    let scene = GlobeScene::new(&[], Viewport::new(0.0, 0.0), SceneConfig::default());
    assert_eq!(scene.camera().eye, Vec3::new(0.0, 0.0, 2.5));
    assert!((scene.camera().fovy_radians - 75f32.to_radians()).abs() < 1e-6);
    assert!(scene.markers().is_empty());
    // zero-sized viewports are bumped to 1x1
    assert_eq!(scene.viewport(), Viewport::new(1.0, 1.0));
    assert_eq!(scene.pick(Vec2::ZERO), None);
}
