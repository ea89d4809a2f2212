//! Browser bindings
//!
//! `WebGame` owns the process-wide `Game` backed by LocalStorage. The host
//! page calls the commands from its input handlers and `frame` from
//! `requestAnimationFrame`, then reads scalars or a JSON snapshot to render.

use wasm_bindgen::prelude::*;

use crate::game::Game;
use crate::persistence::LocalStore;
use crate::sim::{LaneShift, TickOutcome};
use crate::view::FrameView;

#[wasm_bindgen(start)]
pub fn wasm_start() {
    console_error_panic_hook::set_once();
    let _ = console_log::init_with_level(log::Level::Info);
    log::info!("Lane Runner (web) core loaded");
}

#[wasm_bindgen]
pub struct WebGame {
    game: Game<LocalStore>,
}

#[wasm_bindgen]
impl WebGame {
    /// Seed defaults to a random one when omitted
    #[wasm_bindgen(constructor)]
    pub fn new(seed: Option<f64>) -> WebGame {
        let seed = seed.map(|s| s as u64).unwrap_or_else(rand::random);
        WebGame {
            game: Game::new(LocalStore::new(), seed),
        }
    }

    #[wasm_bindgen(js_name = startGame)]
    pub fn start_game(&mut self) {
        self.game.start_game();
    }

    #[wasm_bindgen(js_name = pauseGame)]
    pub fn pause_game(&mut self) {
        self.game.pause_game();
    }

    #[wasm_bindgen(js_name = resumeGame)]
    pub fn resume_game(&mut self) {
        self.game.resume_game();
    }

    #[wasm_bindgen(js_name = togglePause)]
    pub fn toggle_pause(&mut self) {
        self.game.toggle_pause();
    }

    #[wasm_bindgen(js_name = returnToMenu)]
    pub fn return_to_menu(&mut self) {
        self.game.return_to_menu();
    }

    /// `-1` steers left, `+1` right; anything else is ignored
    #[wasm_bindgen(js_name = switchLane)]
    pub fn switch_lane(&mut self, direction: i32) {
        if let Some(shift) = LaneShift::from_delta(direction) {
            self.game.switch_lane(shift);
        }
    }

    /// Raw simulation step with an unclamped delta. Returns true on a crash.
    pub fn tick(&mut self, dt: f32) -> bool {
        matches!(self.game.tick(dt), TickOutcome::Crashed(_))
    }

    /// Clamped frame step with lane follow. Returns true on a crash.
    pub fn frame(&mut self, dt: f32) -> bool {
        matches!(self.game.frame(dt), TickOutcome::Crashed(_))
    }

    #[wasm_bindgen(getter)]
    pub fn phase(&self) -> String {
        self.game.phase().name().to_string()
    }

    #[wasm_bindgen(getter)]
    pub fn score(&self) -> f64 {
        self.game.state().score
    }

    #[wasm_bindgen(getter = bestScore)]
    pub fn best_score(&self) -> f64 {
        self.game.state().best_score
    }

    #[wasm_bindgen(getter)]
    pub fn speed(&self) -> f32 {
        self.game.state().speed
    }

    #[wasm_bindgen(getter = currentLane)]
    pub fn current_lane(&self) -> i32 {
        self.game.state().current_lane
    }

    #[wasm_bindgen(getter = targetLane)]
    pub fn target_lane(&self) -> i32 {
        self.game.state().target_lane
    }

    #[wasm_bindgen(getter = playerX)]
    pub fn player_x(&self) -> f32 {
        self.game.state().player_x
    }

    // Counters cross as plain numbers rather than BigInt
    #[wasm_bindgen(getter = laneChangeTick)]
    pub fn lane_change_tick(&self) -> f64 {
        self.game.state().lane_change_tick as f64
    }

    #[wasm_bindgen(getter = nearAlertTick)]
    pub fn near_alert_tick(&self) -> f64 {
        self.game.state().near_alert_tick as f64
    }

    #[wasm_bindgen(getter = crashTick)]
    pub fn crash_tick(&self) -> f64 {
        self.game.state().crash_tick as f64
    }

    /// Full frame snapshot (entities included) as JSON
    pub fn snapshot(&self) -> Result<String, JsError> {
        Ok(FrameView::of(self.game.state()).to_json()?)
    }
}
