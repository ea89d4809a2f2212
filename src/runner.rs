//! Headless session driver
//!
//! Plays one run at a fixed frame delta, optionally steered by the autopilot,
//! and reports where it ended. Elapsed time is the simulated time the game
//! actually committed, not the number of frames times the requested delta.

use serde::Serialize;

use crate::autopilot::Autopilot;
use crate::game::Game;
use crate::persistence::KeyValueStore;
use crate::settings::Settings;
use crate::sim::{EventCursor, GamePhase, SimEvent, TickOutcome};

/// End-of-session report, printed as JSON by the native binary
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct RunSummary {
    pub seed: u64,
    pub phase: GamePhase,
    pub frames: u64,
    pub elapsed: f64,
    pub score: f64,
    pub best_score: f64,
    pub speed: f32,
    pub lane_changes: u64,
    pub near_misses: u64,
    pub crashes: u64,
    pub road_blocks: usize,
    /// Paint of each live vehicle, in spawn order
    pub traffic_colors: Vec<&'static str>,
}

impl RunSummary {
    fn capture<S: KeyValueStore>(game: &Game<S>, frames: u64) -> Self {
        let state = game.state();
        Self {
            seed: state.seed,
            phase: state.phase,
            frames,
            elapsed: game.run_time(),
            score: state.score,
            best_score: state.best_score,
            speed: state.speed,
            lane_changes: state.lane_change_tick,
            near_misses: state.near_alert_tick,
            crashes: state.crash_tick,
            road_blocks: state.road_blocks.len(),
            traffic_colors: state.traffic.iter().map(|t| t.color.hex()).collect(),
        }
    }
}

/// Run one session from the menu until `run_seconds` of simulated time pass
/// or the player crashes.
pub fn run_session<S: KeyValueStore>(game: &mut Game<S>, settings: &Settings) -> RunSummary {
    game.set_max_frame_delta(settings.max_frame_delta);
    let dt = game.clamp_delta(settings.frame_delta);
    let run_seconds = f64::from(settings.run_seconds);
    let autopilot = settings.autopilot.then(Autopilot::default);

    game.start_game();
    if dt <= 0.0 || !game.state().is_playing() {
        log::warn!("Session not started (phase {:?}, dt {})", game.phase(), dt);
        return RunSummary::capture(game, 0);
    }

    let mut cursor = EventCursor::new(game.state());
    let mut frames = 0;

    while game.run_time() < run_seconds {
        if let Some(shift) = autopilot.as_ref().and_then(|a| a.decide(game.state())) {
            game.switch_lane(shift);
        }
        let outcome = game.frame(dt);
        frames += 1;

        let elapsed = game.run_time();
        for event in cursor.poll(game.state()) {
            match event {
                SimEvent::LaneChange => {
                    log::debug!("{:.2}s lane -> {}", elapsed, game.state().target_lane)
                }
                SimEvent::NearMiss => log::debug!("{:.2}s near miss", elapsed),
                SimEvent::Crash => log::info!("{:.2}s crash", elapsed),
            }
        }

        if let TickOutcome::Crashed(hit) = outcome {
            log::info!("Run over: hit {:?} #{}", hit.hazard, hit.id);
            break;
        }
    }

    RunSummary::capture(game, frames)
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::consts::*;
    use crate::persistence::MemoryStore;

    fn settings(frame_delta: f32, max_frame_delta: f32, run_seconds: f32) -> Settings {
        Settings {
            frame_delta,
            max_frame_delta,
            run_seconds,
            autopilot: false,
            ..Settings::default()
        }
    }

    #[test]
    fn test_elapsed_matches_simulated_time() {
        let mut game = Game::new(MemoryStore::new(), 3);
        // Short enough that the first center-lane vehicle can't arrive
        let summary = run_session(&mut game, &settings(0.08, 0.1, 0.78));

        assert_eq!(summary.phase, GamePhase::Playing);
        assert_eq!(summary.frames, 10);
        assert!((summary.elapsed - 0.8).abs() < 1e-5, "elapsed {}", summary.elapsed);

        // Speed ramps linearly with simulated time
        let simulated = f64::from((summary.speed - BASE_SPEED) / SPEED_RAMP_RATE);
        assert!((summary.elapsed - simulated).abs() < 1e-3, "{} vs {}", summary.elapsed, simulated);
    }

    #[test]
    fn test_requested_delta_above_cap_is_clamped() {
        let mut game = Game::new(MemoryStore::new(), 3);
        let summary = run_session(&mut game, &settings(0.2, MAX_FRAME_DELTA, 0.48));

        assert_eq!(summary.frames, 10);
        assert!((summary.elapsed - 0.5).abs() < 1e-5);
        let simulated = f64::from((summary.speed - BASE_SPEED) / SPEED_RAMP_RATE);
        assert!((summary.elapsed - simulated).abs() < 1e-3);
    }

    #[test]
    fn test_unattended_run_ends_in_a_crash() {
        let mut game = Game::new(MemoryStore::new(), 5);
        let summary = run_session(&mut game, &settings(1.0 / 60.0, MAX_FRAME_DELTA, 600.0));

        assert_eq!(summary.phase, GamePhase::GameOver);
        assert_eq!(summary.crashes, 1);
        assert_eq!(summary.best_score, summary.score);
        assert!(summary.elapsed < 600.0);
        assert_eq!(summary.traffic_colors.len(), game.state().traffic.len());
        let palette: Vec<_> = crate::sim::TrafficColor::ALL.iter().map(|c| c.hex()).collect();
        assert!(summary.traffic_colors.iter().all(|hex| palette.contains(hex)));
    }

    #[test]
    fn test_session_needs_the_menu() {
        let mut game = Game::new(MemoryStore::new(), 5);
        game.start_game();
        game.pause_game();
        let summary = run_session(&mut game, &settings(1.0 / 60.0, MAX_FRAME_DELTA, 1.0));
        assert_eq!(summary.frames, 0);
        assert_eq!(summary.phase, GamePhase::Paused);
    }
}
