use super::Listeners;
use crate::dom;
use globe_core::{GlobeScene, Viewport};
use std::cell::RefCell;
use std::rc::Rc;
use web_sys as web;

/// Keep the canvas backing store and the scene viewport in step with the
/// window. The renderer picks the new backing size up on its next frame.
pub fn wire_resize(
    window: &web::Window,
    canvas: &web::HtmlCanvasElement,
    scene: &Rc<RefCell<GlobeScene>>,
    listeners: &mut Listeners,
) {
    let canvas = canvas.clone();
    let scene = scene.clone();
    listeners.add(window, "resize", move |_ev: web::Event| {
        dom::sync_canvas_backing_size(&canvas);
        let (w, h) = dom::css_size(&canvas);
        scene.borrow_mut().resize(Viewport::new(w, h));
    });
}
