//! DOM listener wiring. Every listener is kept in a [`Listeners`] list so a
//! disposed globe can remove exactly what it added.

use wasm_bindgen::closure::Closure;
use wasm_bindgen::JsCast;
use web_sys as web;

mod pointer;
mod resize;

pub use pointer::{wire_pointer_handlers, PointerWiring};
pub use resize::wire_resize;

pub type EventClosure = Closure<dyn FnMut(web::Event)>;

/// One attached DOM listener.
pub struct Listener {
    target: web::EventTarget,
    kind: &'static str,
    closure: EventClosure,
}

impl Listener {
    pub fn attach(
        target: &web::EventTarget,
        kind: &'static str,
        handler: impl FnMut(web::Event) + 'static,
    ) -> Option<Self> {
        let closure = Closure::wrap(Box::new(handler) as Box<dyn FnMut(web::Event)>);
        match target.add_event_listener_with_callback(kind, closure.as_ref().unchecked_ref()) {
            Ok(()) => Some(Self {
                target: target.clone(),
                kind,
                closure,
            }),
            Err(e) => {
                log::warn!("[events] failed to add {} listener: {:?}", kind, e);
                None
            }
        }
    }

    /// Remove the listener. The closure is handed back because it may be the
    /// one currently executing; the caller drops it later.
    pub fn detach(self) -> EventClosure {
        _ = self
            .target
            .remove_event_listener_with_callback(self.kind, self.closure.as_ref().unchecked_ref());
        self.closure
    }
}

#[derive(Default)]
pub struct Listeners {
    attached: Vec<Listener>,
}

impl Listeners {
    pub fn add(
        &mut self,
        target: &web::EventTarget,
        kind: &'static str,
        handler: impl FnMut(web::Event) + 'static,
    ) {
        if let Some(listener) = Listener::attach(target, kind, handler) {
            self.attached.push(listener);
        }
    }

    pub fn len(&self) -> usize {
        self.attached.len()
    }

    pub fn is_empty(&self) -> bool {
        self.attached.is_empty()
    }

    pub fn detach_all(&mut self) -> Vec<EventClosure> {
        self.attached.drain(..).map(Listener::detach).collect()
    }
}
