// Host-side tests for pure pointer helpers.
// The main crate is wasm-only, so we include the pure-Rust modules directly.

#![allow(dead_code)]
mod input {
    include!("../src/input.rs");
}

use glam::Vec2;
use input::*;

#[test]
fn pointer_local_is_relative_to_rect() {
    let p = pointer_local_px(150.0, 90.0, 100.0, 40.0);
    assert_eq!(p, Vec2::new(50.0, 50.0));
    let outside = pointer_local_px(10.0, 5.0, 100.0, 40.0);
    assert!(outside.x < 0.0 && outside.y < 0.0);
}

#[test]
fn wheel_modes_normalize_to_pixels() {
    assert_eq!(wheel_delta_px(3.0, 0, 16.0, 800.0), 3.0);
    assert_eq!(wheel_delta_px(3.0, 1, 16.0, 800.0), 48.0);
    assert_eq!(wheel_delta_px(-1.0, 2, 16.0, 800.0), -800.0);
}

#[test]
fn moves_without_a_drag_are_ignored() {
    let mut drag = DragState::default();
    assert_eq!(drag.move_to(Vec2::new(5.0, 5.0)), None);
    assert!(!drag.suppresses_click(4.0));
}

#[test]
fn drag_reports_deltas_and_accumulates_travel() {
    let mut drag = DragState::default();
    drag.begin(Vec2::new(10.0, 10.0));
    assert_eq!(drag.move_to(Vec2::new(13.0, 14.0)), Some(Vec2::new(3.0, 4.0)));
    assert_eq!(drag.move_to(Vec2::new(13.0, 10.0)), Some(Vec2::new(0.0, -4.0)));
    assert!((drag.travelled - 9.0).abs() < 1e-6);
    drag.end();
    assert!(!drag.active);
    // the click after pointerup still sees the travel
    assert!(drag.suppresses_click(4.0));
    assert_eq!(drag.move_to(Vec2::new(0.0, 0.0)), None);
}

#[test]
fn small_jitter_still_counts_as_click() {
    let mut drag = DragState::default();
    drag.begin(Vec2::new(0.0, 0.0));
    drag.move_to(Vec2::new(1.0, 1.0));
    drag.end();
    assert!(!drag.suppresses_click(4.0));
    // a new press resets the travel
    drag.begin(Vec2::new(50.0, 50.0));
    assert_eq!(drag.travelled, 0.0);
}
