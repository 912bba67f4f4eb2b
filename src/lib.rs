#![cfg(target_arch = "wasm32")]
use globe_core::starfield::default_starfield;
use globe_core::{bundled_locations, GlobeScene, MountSlot, SceneConfig, Viewport};
use instant::Instant;
use std::cell::{Cell, RefCell};
use std::rc::Rc;
use wasm_bindgen::prelude::*;
use wasm_bindgen_futures::spawn_local;
use web_sys as web;

mod constants;
mod dom;
mod events;
mod frame;
mod input;
mod panel;
mod render;
mod texture;

use constants::{DEFAULT_CONTAINER_ID, DETAILS_PANEL_ID, GLOBE_TEXTURE_URL};
use panel::{DetailsPanel, HoverSinks, JsHoverCallback};

/// Everything one mounted globe owns on the page.
struct Mounted {
    canvas: web::HtmlCanvasElement,
    scene: Rc<RefCell<GlobeScene>>,
    sinks: Rc<RefCell<HoverSinks>>,
    gpu: Rc<RefCell<Option<render::GpuState>>>,
    listeners: events::Listeners,
    frames: frame::FrameDriver,
}

impl Mounted {
    fn teardown(mut self) {
        let tick = self.frames.stop();
        let retired = self.listeners.detach_all();
        if let Some(gpu) = self.gpu.borrow_mut().take() {
            gpu.dispose();
        }
        self.canvas.remove();

        // A hover callback may be the caller, in which case the scene and the
        // sinks are still borrowed by the pointermove handler.
        if let (Ok(mut scene), Ok(mut sinks)) =
            (self.scene.try_borrow_mut(), self.sinks.try_borrow_mut())
        {
            scene.release_hover(&mut *sinks);
        }
        log::info!("[globe] disposed, {} listeners removed", retired.len());

        // Closures may still be on the JS stack; release them once the
        // current task has returned.
        let Mounted { scene, sinks, .. } = self;
        spawn_local(async move {
            drop(tick);
            drop(retired);
            drop(sinks);
            drop(scene);
        });
    }
}

/// Handle returned to the host page by [`mount`].
#[wasm_bindgen]
pub struct GlobeHandle {
    inner: Option<Mounted>,
}

#[wasm_bindgen]
impl GlobeHandle {
    /// Stop rendering and remove the globe from the page. Safe to call twice.
    pub fn dispose(&mut self) {
        match self.inner.take() {
            Some(mounted) => mounted.teardown(),
            None => log::debug!("[globe] dispose on an already disposed globe"),
        }
    }

    #[wasm_bindgen(getter)]
    pub fn disposed(&self) -> bool {
        self.inner.is_none()
    }
}

thread_local! {
    static AUTO_MOUNTED: RefCell<MountSlot<Mounted>> = RefCell::new(MountSlot::default());
    // Cleared when the startup mount is superseded before it finishes.
    static AUTO_PENDING: Cell<bool> = const { Cell::new(false) };
}

#[wasm_bindgen(start)]
pub fn start() -> Result<(), JsValue> {
    console_error_panic_hook::set_once();
    console_log::init_with_level(log::Level::Info).ok();
    log::info!("globe-web starting");

    let has_default_root = dom::window_document()
        .and_then(|d| d.get_element_by_id(DEFAULT_CONTAINER_ID))
        .is_some();
    if !has_default_root {
        log::info!("no #{} on the page; waiting for mount()", DEFAULT_CONTAINER_ID);
        return Ok(());
    }
    AUTO_PENDING.with(|p| p.set(true));
    spawn_local(async move {
        match init(DEFAULT_CONTAINER_ID, None).await {
            Ok(Some(mounted)) => {
                if !AUTO_PENDING.with(|p| p.replace(false)) {
                    log::info!("[globe] startup mount superseded before it finished");
                    mounted.teardown();
                    return;
                }
                let displaced =
                    AUTO_MOUNTED.with(|slot| slot.borrow_mut().fill(DEFAULT_CONTAINER_ID, mounted));
                if let Some(old) = displaced {
                    old.teardown();
                }
            }
            Ok(None) => AUTO_PENDING.with(|p| p.set(false)),
            Err(e) => {
                AUTO_PENDING.with(|p| p.set(false));
                log::error!("init error: {:?}", e);
            }
        }
    });
    Ok(())
}

/// Tear down the globe mounted at startup. Returns whether one was live.
#[wasm_bindgen]
pub fn unmount() -> bool {
    let was_pending = AUTO_PENDING.with(|p| p.replace(false));
    let taken = AUTO_MOUNTED.with(|slot| slot.borrow_mut().take());
    match taken {
        Some(mounted) => {
            mounted.teardown();
            true
        }
        None => was_pending,
    }
}

/// Dispose the startup globe if it lives in `container_id`.
fn evict_auto_mount(container_id: &str) {
    if container_id == DEFAULT_CONTAINER_ID {
        AUTO_PENDING.with(|p| p.set(false));
    }
    let taken = AUTO_MOUNTED.with(|slot| slot.borrow_mut().take_for(container_id));
    if let Some(mounted) = taken {
        log::info!("[globe] replacing startup globe in #{}", container_id);
        mounted.teardown();
    }
}

/// Mount a globe into the element with id `container_id`. Resolves to a
/// [`GlobeHandle`], or `null` when the container or WebGPU is unavailable.
/// A startup globe already in that container is disposed first.
#[wasm_bindgen]
pub async fn mount(container_id: String, on_hover: Option<js_sys::Function>) -> JsValue {
    evict_auto_mount(&container_id);
    match init(&container_id, on_hover).await {
        Ok(Some(mounted)) => GlobeHandle {
            inner: Some(mounted),
        }
        .into(),
        Ok(None) => JsValue::NULL,
        Err(e) => {
            log::error!("init error: {:?}", e);
            JsValue::NULL
        }
    }
}

async fn init(
    container_id: &str,
    on_hover: Option<js_sys::Function>,
) -> anyhow::Result<Option<Mounted>> {
    let window = web::window().ok_or_else(|| anyhow::anyhow!("no window"))?;
    let document = window
        .document()
        .ok_or_else(|| anyhow::anyhow!("no document"))?;
    let Some(container) = document.get_element_by_id(container_id) else {
        log::warn!("mount target #{} not found; nothing created", container_id);
        return Ok(None);
    };

    let records = bundled_locations().unwrap_or_else(|e| {
        log::error!("bundled dataset unreadable, mounting without markers: {}", e);
        Vec::new()
    });

    let canvas = dom::create_canvas(&document, &container)
        .ok_or_else(|| anyhow::anyhow!("could not create canvas in #{}", container_id))?;
    dom::sync_canvas_backing_size(&canvas);
    let (css_w, css_h) = dom::css_size(&canvas);
    let scene = GlobeScene::new(&records, Viewport::new(css_w, css_h), SceneConfig::default());

    let stars = default_starfield();
    let gpu = match render::GpuState::new(&canvas, &stars, scene.markers().len()).await {
        Ok(g) => g,
        Err(e) => {
            log::warn!("WebGPU unavailable, globe not mounted: {:?}", e);
            canvas.remove();
            return Ok(None);
        }
    };
    let gpu = Rc::new(RefCell::new(Some(gpu)));
    texture::spawn_texture_load(GLOBE_TEXTURE_URL, Rc::downgrade(&gpu));

    let scene = Rc::new(RefCell::new(scene));
    let sinks = Rc::new(RefCell::new(HoverSinks {
        panel: DetailsPanel::find(&document, DETAILS_PANEL_ID),
        callback: on_hover.map(JsHoverCallback),
    }));

    let mut listeners = events::Listeners::default();
    events::wire_resize(&window, &canvas, &scene, &mut listeners);
    events::wire_pointer_handlers(
        &events::PointerWiring {
            canvas: canvas.clone(),
            scene: scene.clone(),
            sinks: sinks.clone(),
            drag_state: Rc::new(RefCell::new(input::DragState::default())),
        },
        &mut listeners,
    );

    let frames = frame::start_loop(frame::FrameContext {
        scene: scene.clone(),
        gpu: gpu.clone(),
        canvas: canvas.clone(),
        last_instant: Instant::now(),
    });
    log::info!(
        "[globe] mounted in #{} with {} markers, {} listeners, loop running={}",
        container_id,
        records.len(),
        listeners.len(),
        frames.is_running()
    );

    Ok(Some(Mounted {
        canvas,
        scene,
        sinks,
        gpu,
        listeners,
        frames,
    }))
}
