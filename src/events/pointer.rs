use super::Listeners;
use crate::constants::{CLICK_DRAG_TOLERANCE_PX, WHEEL_LINE_PX, WHEEL_PAGE_PX};
use crate::dom;
use crate::input;
use crate::panel::HoverSinks;
use globe_core::GlobeScene;
use glam::Vec2;
use std::cell::RefCell;
use std::rc::Rc;
use wasm_bindgen::JsCast;
use web_sys as web;

#[derive(Clone)]
pub struct PointerWiring {
    pub canvas: web::HtmlCanvasElement,
    pub scene: Rc<RefCell<GlobeScene>>,
    pub sinks: Rc<RefCell<HoverSinks>>,
    pub drag_state: Rc<RefCell<input::DragState>>,
}

pub fn wire_pointer_handlers(w: &PointerWiring, listeners: &mut Listeners) {
    wire_pointermove(w, listeners);
    wire_pointerdown(w, listeners);
    wire_pointerup(w, listeners);
    wire_click(w, listeners);
    wire_wheel(w, listeners);
}

fn local_px(ev: &web::MouseEvent, canvas: &web::HtmlCanvasElement) -> Vec2 {
    let rect = canvas.get_bounding_client_rect();
    input::pointer_local_px(
        ev.client_x() as f32,
        ev.client_y() as f32,
        rect.left() as f32,
        rect.top() as f32,
    )
}

fn wire_pointermove(w: &PointerWiring, listeners: &mut Listeners) {
    let w = w.clone();
    listeners.add(&w.canvas.clone(), "pointermove", move |ev: web::Event| {
        let Some(ev) = ev.dyn_ref::<web::MouseEvent>() else {
            return;
        };
        let pos = local_px(ev, &w.canvas);

        let drag_delta = w.drag_state.borrow_mut().move_to(pos);
        let mut scene = w.scene.borrow_mut();
        if let Some(delta) = drag_delta {
            scene.orbit_drag(delta);
        }
        // The hover test runs on every move, dragging or not
        let mut sinks = w.sinks.borrow_mut();
        scene.pointer_move(pos, &mut *sinks);
    });
}

fn wire_pointerdown(w: &PointerWiring, listeners: &mut Listeners) {
    let w = w.clone();
    listeners.add(&w.canvas.clone(), "pointerdown", move |ev: web::Event| {
        let Some(pev) = ev.dyn_ref::<web::PointerEvent>() else {
            return;
        };
        if pev.button() != 0 {
            return;
        }
        let pos = local_px(pev, &w.canvas);
        w.drag_state.borrow_mut().begin(pos);
        _ = w.canvas.set_pointer_capture(pev.pointer_id());
        dom::set_cursor(&w.canvas, "grabbing");
    });
}

fn wire_pointerup(w: &PointerWiring, listeners: &mut Listeners) {
    let w = w.clone();
    listeners.add(&w.canvas.clone(), "pointerup", move |ev: web::Event| {
        w.drag_state.borrow_mut().end();
        if let Some(pev) = ev.dyn_ref::<web::PointerEvent>() {
            _ = w.canvas.release_pointer_capture(pev.pointer_id());
        }
        dom::set_cursor(&w.canvas, "grab");
    });
}

fn wire_click(w: &PointerWiring, listeners: &mut Listeners) {
    let w = w.clone();
    listeners.add(&w.canvas.clone(), "click", move |ev: web::Event| {
        let Some(ev) = ev.dyn_ref::<web::MouseEvent>() else {
            return;
        };
        if w.drag_state.borrow().suppresses_click(CLICK_DRAG_TOLERANCE_PX) {
            return;
        }
        let pos = local_px(ev, &w.canvas);
        let mut scene = w.scene.borrow_mut();
        if let Some(id) = scene.click(pos) {
            if let Some(marker) = scene.markers().get(id) {
                log::info!("[focus] {}", marker.record.name);
            }
        }
    });
}

fn wire_wheel(w: &PointerWiring, listeners: &mut Listeners) {
    let w = w.clone();
    listeners.add(&w.canvas.clone(), "wheel", move |ev: web::Event| {
        let Some(wev) = ev.dyn_ref::<web::WheelEvent>() else {
            return;
        };
        ev.prevent_default();
        let delta = input::wheel_delta_px(
            wev.delta_y() as f32,
            wev.delta_mode(),
            WHEEL_LINE_PX,
            WHEEL_PAGE_PX,
        );
        w.scene.borrow_mut().zoom(delta);
    });
}
