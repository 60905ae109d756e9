use std::cell::RefCell;
use std::rc::Rc;
use std::time::Duration;

use dots_core::{DotsEngine, State};
use instant::Instant;
use wasm_bindgen::closure::Closure;
use wasm_bindgen::JsCast;
use web_sys as web;

use crate::audio::MicLevel;
use crate::constants::*;
use crate::{dom, input, overlay, render};

pub struct FrameContext {
    pub engine: Rc<RefCell<DotsEngine>>,
    pub mic: Rc<RefCell<Option<MicLevel>>>,
    pub canvas: web::HtmlCanvasElement,
    pub ctx: web::CanvasRenderingContext2d,
    pub document: web::Document,
    /// Set by the engine's redraw listener, cleared after painting.
    pub dirty: Rc<RefCell<bool>>,
    /// Toggled by the `a` key.
    pub auto_advance: Rc<RefCell<bool>>,
    pub auto_timer: input::Interval,
    pub auto_was_on: bool,
    pub speak_timer: input::Interval,
    pub last_instant: Instant,
    pub size: (u32, u32),
    pub level: f32,
}

impl FrameContext {
    pub fn frame(&mut self) {
        let now = Instant::now();
        let dt_sec = (now - self.last_instant).as_secs_f32().min(MAX_FRAME_DT_SEC);
        self.last_instant = now;

        let size = dom::sync_canvas_backing_size(&self.canvas);
        if size != self.size {
            self.size = size;
            self.engine.borrow_mut().init(size.0, size.1);
            *self.dirty.borrow_mut() = true;
        }

        self.update_auto_advance(dt_sec);
        let level = self.update_level(dt_sec);
        self.engine
            .borrow_mut()
            .tick(Duration::from_secs_f32(dt_sec));

        if std::mem::take(&mut *self.dirty.borrow_mut()) {
            let engine = self.engine.borrow();
            render::draw_frame(&self.ctx, &self.canvas, &engine);
            overlay::update_status(&self.document, engine.state(), level);
        }
    }

    /// Step to the next state every `AUTO_ADVANCE_SEC` while auto mode is on.
    fn update_auto_advance(&mut self, dt_sec: f32) {
        let on = *self.auto_advance.borrow();
        if on != self.auto_was_on {
            self.auto_was_on = on;
            self.auto_timer.reset();
            log::info!("[auto] {}", if on { "on" } else { "off" });
        }
        if !on || self.auto_timer.advance(dt_sec) == 0 {
            return;
        }
        let mut engine = self.engine.borrow_mut();
        let next = input::next_state(engine.state());
        engine.set_state(next);
        *self.dirty.borrow_mut() = true;
    }

    /// Feed the smoothed microphone level into the engine. Without a mic, a
    /// random level stands in while the user is speaking, unless the page
    /// feeds its own.
    fn update_level(&mut self, dt_sec: f32) -> Option<f32> {
        let max_px = self.engine.borrow().layout().tile_height * MIC_MAX_LEVEL_TILES;
        let rms = self.mic.borrow().as_ref().map(|mic| mic.read_rms());
        let Some(rms) = rms else {
            return self.update_synthetic_level(dt_sec, max_px);
        };
        let target = input::rms_to_level(rms, MIC_GAIN, max_px);
        self.level = input::smooth_level(self.level, target, MIC_LEVEL_SMOOTHING);
        self.engine.borrow_mut().set_input_level(self.level);
        Some(self.level)
    }

    fn update_synthetic_level(&mut self, dt_sec: f32, max_px: f32) -> Option<f32> {
        if crate::host_feeds_level() || self.engine.borrow().state() != State::UserSpeaking {
            self.speak_timer.reset();
            return None;
        }
        if self.speak_timer.advance(dt_sec) > 0 {
            self.level = input::synthetic_level(js_sys::Math::random() as f32, max_px);
            self.engine.borrow_mut().set_input_level(self.level);
        }
        Some(self.level)
    }
}

pub fn start_loop(frame_ctx: Rc<RefCell<FrameContext>>) {
    let tick: Rc<RefCell<Option<Closure<dyn FnMut()>>>> = Rc::new(RefCell::new(None));
    let tick_clone = tick.clone();
    *tick.borrow_mut() = Some(Closure::wrap(Box::new(move || {
        frame_ctx.borrow_mut().frame();
        request_frame(&tick_clone);
    }) as Box<dyn FnMut()>));
    request_frame(&tick);
}

fn request_frame(tick: &Rc<RefCell<Option<Closure<dyn FnMut()>>>>) {
    if let (Some(w), Some(cb)) = (web::window(), tick.borrow().as_ref()) {
        _ = w.request_animation_frame(cb.as_ref().unchecked_ref());
    }
}
