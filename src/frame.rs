use crate::constants::MAX_FRAME_DT_SEC;
use crate::render;
use globe_core::{FrameLoop, GlobeScene};
use instant::Instant;
use std::cell::RefCell;
use std::rc::Rc;
use wasm_bindgen::closure::Closure;
use wasm_bindgen::JsCast;
use web_sys as web;

pub type TickClosure = Closure<dyn FnMut()>;

pub struct FrameContext {
    pub scene: Rc<RefCell<GlobeScene>>,
    pub gpu: Rc<RefCell<Option<render::GpuState>>>,
    pub canvas: web::HtmlCanvasElement,
    pub last_instant: Instant,
}

impl FrameContext {
    pub fn frame(&mut self) {
        let now = Instant::now();
        let dt_sec = (now - self.last_instant)
            .as_secs_f32()
            .min(MAX_FRAME_DT_SEC);
        self.last_instant = now;

        let mut scene = self.scene.borrow_mut();
        scene.advance(dt_sec);

        let mut gpu = self.gpu.borrow_mut();
        let Some(gpu) = gpu.as_mut() else {
            return;
        };
        gpu.resize_if_needed(self.canvas.width(), self.canvas.height());
        let instances = render::marker_instances(scene.markers());
        match gpu.render(scene.camera(), &instances) {
            Ok(()) => {}
            Err(wgpu::SurfaceError::Lost | wgpu::SurfaceError::Outdated) => gpu.reconfigure(),
            Err(e) => log::error!("render error: {:?}", e),
        }
    }
}

/// Owner of the requestAnimationFrame callback and its liveness state.
pub struct FrameDriver {
    state: Rc<RefCell<FrameLoop<i32>>>,
    tick: Rc<RefCell<Option<TickClosure>>>,
}

fn request_frame(tick: &TickClosure) -> Option<i32> {
    let w = web::window()?;
    match w.request_animation_frame(tick.as_ref().unchecked_ref()) {
        Ok(id) => Some(id),
        Err(e) => {
            log::error!("requestAnimationFrame failed: {:?}", e);
            None
        }
    }
}

pub fn start_loop(mut frame_ctx: FrameContext) -> FrameDriver {
    let state = Rc::new(RefCell::new(FrameLoop::new()));
    let tick: Rc<RefCell<Option<TickClosure>>> = Rc::new(RefCell::new(None));
    // Weak so the closure does not keep itself alive
    let tick_weak = Rc::downgrade(&tick);
    let state_tick = state.clone();
    *tick.borrow_mut() = Some(Closure::wrap(Box::new(move || {
        if !state_tick.borrow_mut().begin_frame() {
            return;
        }
        frame_ctx.frame();
        let Some(tick) = tick_weak.upgrade() else {
            return;
        };
        let next = tick.borrow().as_ref().and_then(request_frame);
        if let Some(id) = next {
            state_tick.borrow_mut().schedule(id);
        }
    }) as Box<dyn FnMut()>));

    if state.borrow_mut().start() {
        let first = tick.borrow().as_ref().and_then(request_frame);
        if let Some(id) = first {
            state.borrow_mut().schedule(id);
        }
    }
    FrameDriver { state, tick }
}

impl FrameDriver {
    pub fn is_running(&self) -> bool {
        self.state.borrow().is_running()
    }

    /// Stop the loop and cancel the outstanding frame. Returns the tick
    /// closure the first time so the caller can drop it outside any callback.
    pub fn stop(&self) -> Option<TickClosure> {
        if let Some(id) = self.state.borrow_mut().teardown() {
            if let Some(w) = web::window() {
                _ = w.cancel_animation_frame(id);
            }
        }
        self.tick.borrow_mut().take()
    }
}
