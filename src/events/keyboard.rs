use std::cell::RefCell;
use std::rc::Rc;

use dots_core::DotsEngine;
use wasm_bindgen::JsCast;
use web_sys as web;

use crate::audio::{self, MicLevel};
use crate::input::{action_for_key, next_state, previous_state, KeyAction};
use crate::overlay;

pub fn handle_global_keydown(
    ev: &web::KeyboardEvent,
    engine: &Rc<RefCell<DotsEngine>>,
    mic: &Rc<RefCell<Option<MicLevel>>>,
    auto_advance: &Rc<RefCell<bool>>,
    dirty: &Rc<RefCell<bool>>,
) {
    let Some(action) = action_for_key(&ev.key()) else {
        return;
    };
    match action {
        KeyAction::SetState(state) => {
            engine.borrow_mut().set_state(state);
        }
        KeyAction::NextState | KeyAction::PreviousState => {
            let mut eng = engine.borrow_mut();
            let current = eng.state();
            let target = if action == KeyAction::NextState {
                next_state(current)
            } else {
                previous_state(current)
            };
            eng.set_state(target);
        }
        KeyAction::ToggleAutoAdvance => {
            let mut on = auto_advance.borrow_mut();
            *on = !*on;
            log::info!("[keys] auto advance={}", *on);
        }
        KeyAction::ToggleGrid => {
            let mut eng = engine.borrow_mut();
            let enabled = !eng.params().debug_grid;
            eng.set_debug_grid(enabled);
            log::info!("[keys] debug grid={}", enabled);
        }
        KeyAction::ToggleHelp => {
            if let Some(doc) = crate::dom::window_document() {
                overlay::toggle(&doc);
            }
        }
        KeyAction::StartMicrophone => {
            log::info!("[keys] requesting microphone");
            audio::spawn_microphone(mic.clone());
        }
    }
    *dirty.borrow_mut() = true;
    ev.prevent_default();
}

pub fn wire_global_keydown(
    engine: Rc<RefCell<DotsEngine>>,
    mic: Rc<RefCell<Option<MicLevel>>>,
    auto_advance: Rc<RefCell<bool>>,
    dirty: Rc<RefCell<bool>>,
) {
    if let Some(window) = web::window() {
        let closure =
            wasm_bindgen::closure::Closure::wrap(Box::new(move |ev: web::KeyboardEvent| {
                handle_global_keydown(&ev, &engine, &mic, &auto_advance, &dirty);
            }) as Box<dyn FnMut(_)>);
        _ = window.add_event_listener_with_callback("keydown", closure.as_ref().unchecked_ref());
        closure.forget();
    }
}
