//! The world object a host owns for the life of the process
//!
//! Binds the simulation to the host's storage: the best score is read once
//! here and written once per GameOver transition.

use crate::consts::MAX_FRAME_DELTA;
use crate::persistence::{KeyValueStore, load_best_score, save_best_score};
use crate::sim::{GamePhase, GameState, LaneShift, TickOutcome, tick};

pub struct Game<S: KeyValueStore> {
    state: GameState,
    store: S,
    /// Upper bound on a single frame's delta
    max_frame_delta: f32,
    /// Simulated seconds committed in the current run
    run_time: f64,
}

impl<S: KeyValueStore> Game<S> {
    pub fn new(store: S, seed: u64) -> Self {
        let best = load_best_score(&store);
        log::info!("Game ready (seed {}, best {:.0})", seed, best);
        Self {
            state: GameState::new(seed, best),
            store,
            max_frame_delta: MAX_FRAME_DELTA,
            run_time: 0.0,
        }
    }

    /// Change the per-frame delta cap. Non-positive or non-finite caps restore the default.
    pub fn set_max_frame_delta(&mut self, cap: f32) {
        self.max_frame_delta = if cap.is_finite() && cap > 0.0 {
            cap
        } else {
            MAX_FRAME_DELTA
        };
    }

    pub fn max_frame_delta(&self) -> f32 {
        self.max_frame_delta
    }

    /// Delta a frame would actually simulate for `raw_dt`
    pub fn clamp_delta(&self, raw_dt: f32) -> f32 {
        if raw_dt.is_finite() {
            raw_dt.clamp(0.0, self.max_frame_delta)
        } else {
            0.0
        }
    }

    /// Simulated seconds the current run has advanced
    pub fn run_time(&self) -> f64 {
        self.run_time
    }

    pub fn state(&self) -> &GameState {
        &self.state
    }

    pub fn store(&self) -> &S {
        &self.store
    }

    pub fn phase(&self) -> GamePhase {
        self.state.phase
    }

    pub fn start_game(&mut self) {
        if self.state.phase == GamePhase::Menu {
            self.run_time = 0.0;
        }
        self.state.start_game();
    }

    pub fn pause_game(&mut self) {
        self.state.pause_game();
    }

    pub fn resume_game(&mut self) {
        self.state.resume_game();
    }

    pub fn toggle_pause(&mut self) {
        self.state.toggle_pause();
    }

    pub fn return_to_menu(&mut self) {
        self.state.return_to_menu();
    }

    pub fn switch_lane(&mut self, shift: LaneShift) {
        self.state.switch_lane(shift);
    }

    /// Raw simulation step; persists the best score when the run ends
    pub fn tick(&mut self, dt: f32) -> TickOutcome {
        let outcome = tick(&mut self.state, dt);
        match outcome {
            TickOutcome::Advanced if dt.is_finite() && dt > 0.0 => {
                self.run_time += f64::from(dt);
            }
            TickOutcome::Crashed(_) => {
                if let Err(e) = save_best_score(&mut self.store, self.state.best_score) {
                    log::warn!("Failed to persist best score: {}", e);
                }
            }
            _ => {}
        }
        outcome
    }

    /// One host frame: clamp the delta, ease the player toward its lane, then tick
    pub fn frame(&mut self, raw_dt: f32) -> TickOutcome {
        let dt = self.clamp_delta(raw_dt);
        self.state.follow_lane(dt);
        self.tick(dt)
    }
}
