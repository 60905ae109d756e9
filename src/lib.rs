#![cfg(target_arch = "wasm32")]
use std::cell::{Cell, RefCell};
use std::rc::Rc;

use dots_core::{DotsEngine, State};
use instant::Instant;
use wasm_bindgen::prelude::*;
use wasm_bindgen_futures::spawn_local;

mod audio;
mod constants;
mod dom;
mod events;
mod frame;
mod input;
mod overlay;
mod render;

use constants::{AUTO_ADVANCE_SEC, CANVAS_ID, SYNTHETIC_LEVEL_PERIOD_SEC};

thread_local! {
    static ENGINE: RefCell<Option<Rc<RefCell<DotsEngine>>>> = const { RefCell::new(None) };
    static HOST_FEEDS_LEVEL: Cell<bool> = const { Cell::new(false) };
}

/// True once the page has called `set_dots_input_level`.
pub(crate) fn host_feeds_level() -> bool {
    HOST_FEEDS_LEVEL.with(Cell::get)
}

#[wasm_bindgen(start)]
pub fn start() -> Result<(), JsValue> {
    console_error_panic_hook::set_once();
    console_log::init_with_level(log::Level::Info).ok();
    log::info!("dots-web starting");

    spawn_local(async move {
        if let Err(e) = init().await {
            log::error!("init error: {:?}", e);
        }
    });
    Ok(())
}

async fn init() -> anyhow::Result<()> {
    let document = dom::window_document().ok_or_else(|| anyhow::anyhow!("no document"))?;
    let canvas = dom::canvas_by_id(&document, CANVAS_ID)?;
    let ctx = dom::context_2d(&canvas)?;

    let engine = Rc::new(RefCell::new(DotsEngine::new()));
    let dirty = Rc::new(RefCell::new(true));
    {
        let dirty = dirty.clone();
        engine
            .borrow_mut()
            .set_redraw_listener(move || *dirty.borrow_mut() = true);
    }

    // Later size changes are picked up by the frame loop.
    let size = dom::sync_canvas_backing_size(&canvas);
    engine.borrow_mut().init(size.0, size.1);
    log::info!("[engine] state={}", engine.borrow().state());
    overlay::update_status(&document, State::Idle, None);

    ENGINE.with(|slot| *slot.borrow_mut() = Some(engine.clone()));

    let mic = Rc::new(RefCell::new(None));
    let auto_advance = Rc::new(RefCell::new(false));
    events::wire_global_keydown(
        engine.clone(),
        mic.clone(),
        auto_advance.clone(),
        dirty.clone(),
    );

    let frame_ctx = Rc::new(RefCell::new(frame::FrameContext {
        engine,
        mic,
        canvas,
        ctx,
        document: document.clone(),
        dirty,
        auto_advance,
        auto_timer: input::Interval::new(AUTO_ADVANCE_SEC),
        auto_was_on: false,
        speak_timer: input::Interval::new(SYNTHETIC_LEVEL_PERIOD_SEC),
        last_instant: Instant::now(),
        size,
        level: 0.0,
    }));
    frame::start_loop(frame_ctx);
    Ok(())
}

/// Host hook: set the indicator state by name from page scripts.
#[wasm_bindgen]
pub fn set_dots_state(name: &str) -> Result<(), JsValue> {
    let state: State = name
        .parse()
        .map_err(|e: dots_core::UnknownState| JsValue::from_str(&e.to_string()))?;
    ENGINE.with(|slot| {
        if let Some(engine) = slot.borrow().as_ref() {
            engine.borrow_mut().set_state(state);
        }
    });
    Ok(())
}

/// Host hook: feed an external amplitude (pixels) instead of the microphone.
#[wasm_bindgen]
pub fn set_dots_input_level(level: f32) {
    HOST_FEEDS_LEVEL.with(|flag| flag.set(true));
    ENGINE.with(|slot| {
        if let Some(engine) = slot.borrow().as_ref() {
            engine.borrow_mut().set_input_level(level);
        }
    });
}
