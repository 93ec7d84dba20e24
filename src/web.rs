//! Browser bindings
//!
//! The page owns rendering and input; it calls into [`WebGame`] from its
//! animation frame and tap handlers and reads back a JSON [`Frame`].
//!
//! [`Frame`]: crate::session::Frame

use wasm_bindgen::prelude::*;

use crate::persistence::LocalStorageStore;
use crate::platform::now_ms;
use crate::session::Session;
use crate::settings::Tuning;
use crate::sim::kinematics::JumpOutcome;

#[wasm_bindgen(start)]
pub fn wasm_main() {
    console_error_panic_hook::set_once();
    // Fails only if a logger is already installed
    let _ = console_log::init_with_level(log::Level::Info);
    log::info!("Hen Hop (web) starting...");
}

/// One game session exposed to JavaScript
#[wasm_bindgen]
pub struct WebGame {
    session: Session<LocalStorageStore>,
}

#[wasm_bindgen]
impl WebGame {
    /// Session sized to the page's field
    #[wasm_bindgen(constructor)]
    pub fn new(field_width: f32, field_height: f32) -> WebGame {
        let mut tuning = Tuning::load();
        tuning.field_width = field_width;
        tuning.field_height = field_height;
        if let Err(e) = tuning.validate() {
            log::warn!("Field {}x{} rejected ({}), using defaults", field_width, field_height, e);
            tuning = Tuning::default();
        }
        WebGame {
            session: Session::new(tuning, LocalStorageStore),
        }
    }

    /// Start or replay
    pub fn start(&mut self) -> bool {
        self.session.start_run(now_ms())
    }

    /// Results -> start screen
    pub fn menu(&mut self) -> bool {
        self.session.go_to_menu()
    }

    /// Tap anywhere during play; true if the tap caused a jump
    pub fn trigger(&mut self) -> bool {
        self.session.trigger(now_ms()) != JumpOutcome::Ignored
    }

    /// Call once per animation frame; returns ticks run
    pub fn pump(&mut self) -> u32 {
        self.session.pump(now_ms())
    }

    /// Current frame as JSON
    pub fn frame(&self) -> String {
        serde_json::to_string(&self.session.frame()).unwrap_or_else(|e| {
            log::warn!("Frame serialization failed: {}", e);
            String::from("{}")
        })
    }
}
