//! Game state and core simulation types
//!
//! One `GameState` lives for the whole process. Commands on it are
//! synchronous and silently ignored outside their valid phase.

use glam::FloatExt;
use rand::SeedableRng;
use rand_pcg::Pcg32;
use serde::{Deserialize, Serialize};

use crate::consts::*;
use crate::{clamp_lane, lane_x};

/// Current phase of gameplay
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default, Serialize, Deserialize)]
pub enum GamePhase {
    /// Title screen, waiting for a start command
    #[default]
    Menu,
    /// Active gameplay
    Playing,
    /// Run frozen in place
    Paused,
    /// Run ended by a collision
    GameOver,
}

impl GamePhase {
    /// Lowercase name used by web hosts
    pub fn name(&self) -> &'static str {
        match self {
            GamePhase::Menu => "menu",
            GamePhase::Playing => "playing",
            GamePhase::Paused => "paused",
            GamePhase::GameOver => "gameover",
        }
    }
}

/// Entity identifier, unique across traffic and obstacles for the process lifetime
pub type EntityId = u32;

/// Paint tag for a traffic vehicle (presentation only)
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub enum TrafficColor {
    Rose,
    Orange,
    Amber,
    Lime,
    Violet,
    Magenta,
}

impl TrafficColor {
    pub const ALL: [TrafficColor; 6] = [
        TrafficColor::Rose,
        TrafficColor::Orange,
        TrafficColor::Amber,
        TrafficColor::Lime,
        TrafficColor::Violet,
        TrafficColor::Magenta,
    ];

    pub fn hex(&self) -> &'static str {
        match self {
            TrafficColor::Rose => "#ff3366",
            TrafficColor::Orange => "#ff6633",
            TrafficColor::Amber => "#ffcc00",
            TrafficColor::Lime => "#33ff66",
            TrafficColor::Violet => "#9933ff",
            TrafficColor::Magenta => "#ff33cc",
        }
    }
}

/// A traffic vehicle sharing the road with the player
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct TrafficVehicle {
    pub id: EntityId,
    pub lane: i32,
    /// Forward position: negative is ahead of the player, positive behind
    pub z: f32,
    pub color: TrafficColor,
    /// Own cruise speed, independent of world speed
    pub speed: f32,
}

/// Obstacle variants. Collision geometry is identical for all of them.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub enum ObstacleKind {
    Cone,
    Barrier,
    Duck,
    Crate,
}

impl ObstacleKind {
    pub const ALL: [ObstacleKind; 4] = [
        ObstacleKind::Cone,
        ObstacleKind::Barrier,
        ObstacleKind::Duck,
        ObstacleKind::Crate,
    ];
}

/// A static obstacle fixed to the road surface
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct RoadBlock {
    pub id: EntityId,
    pub lane: i32,
    pub z: f32,
    pub kind: ObstacleKind,
}

/// One-lane steering command
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub enum LaneShift {
    Left,
    Right,
}

impl LaneShift {
    /// Map a raw `-1 | +1` delta; anything else is not a lane shift
    pub fn from_delta(delta: i32) -> Option<Self> {
        match delta {
            -1 => Some(LaneShift::Left),
            1 => Some(LaneShift::Right),
            _ => None,
        }
    }

    pub fn delta(&self) -> i32 {
        match self {
            LaneShift::Left => -1,
            LaneShift::Right => 1,
        }
    }
}

/// Complete simulation state
#[derive(Debug, Clone, PartialEq)]
pub struct GameState {
    /// Seed the RNG was created from
    pub seed: u64,
    pub phase: GamePhase,
    /// Distance-weighted survival score, non-decreasing while playing
    pub score: f64,
    /// Best score over all runs, updated on entering GameOver
    pub best_score: f64,
    /// HUD speed in [BASE_SPEED, MAX_SPEED]
    pub speed: f32,
    /// Lane the player is settled in
    pub current_lane: i32,
    /// Lane the player is steering toward
    pub target_lane: i32,
    /// Continuous lateral position used for collisions
    pub player_x: f32,
    /// Live traffic in spawn order
    pub traffic: Vec<TrafficVehicle>,
    /// Live obstacles in spawn order
    pub road_blocks: Vec<RoadBlock>,
    /// Seconds until the next traffic spawn attempt (negative when overdue)
    pub spawn_timer: f32,
    /// Seconds until the next obstacle spawn attempt (negative when overdue)
    pub block_spawn_timer: f32,
    /// Seconds before the near-miss cue may fire again
    pub near_alert_cooldown: f32,
    /// Event counters, bumped once per occurrence
    pub lane_change_tick: u64,
    pub near_alert_tick: u64,
    pub crash_tick: u64,
    /// Spawn RNG
    pub(crate) rng: Pcg32,
    /// Next entity ID (never reset, so IDs stay unique across runs)
    pub(crate) next_id: EntityId,
}

impl GameState {
    /// Create the process-wide state in the menu phase
    pub fn new(seed: u64, best_score: f64) -> Self {
        Self {
            seed,
            phase: GamePhase::Menu,
            score: 0.0,
            best_score,
            speed: BASE_SPEED,
            current_lane: PLAYER_START_LANE,
            target_lane: PLAYER_START_LANE,
            player_x: lane_x(PLAYER_START_LANE),
            traffic: Vec::new(),
            road_blocks: Vec::new(),
            spawn_timer: 0.0,
            block_spawn_timer: 0.0,
            near_alert_cooldown: 0.0,
            lane_change_tick: 0,
            near_alert_tick: 0,
            crash_tick: 0,
            rng: Pcg32::seed_from_u64(seed),
            next_id: 1,
        }
    }

    /// Allocate a new entity ID
    pub fn next_entity_id(&mut self) -> EntityId {
        let id = self.next_id;
        self.next_id += 1;
        id
    }

    pub fn is_playing(&self) -> bool {
        self.phase == GamePhase::Playing
    }

    /// Begin a fresh run (menu only)
    pub fn start_game(&mut self) {
        if self.phase != GamePhase::Menu {
            return;
        }
        self.phase = GamePhase::Playing;
        self.score = 0.0;
        self.speed = BASE_SPEED;
        self.current_lane = PLAYER_START_LANE;
        self.target_lane = PLAYER_START_LANE;
        self.player_x = lane_x(PLAYER_START_LANE);
        self.traffic.clear();
        self.road_blocks.clear();
        self.spawn_timer = 0.0;
        self.block_spawn_timer = 0.0;
        self.near_alert_cooldown = 0.0;
        log::debug!("Run started (best {:.0})", self.best_score);
    }

    pub fn pause_game(&mut self) {
        if self.phase == GamePhase::Playing {
            self.phase = GamePhase::Paused;
        }
    }

    pub fn resume_game(&mut self) {
        if self.phase == GamePhase::Paused {
            self.phase = GamePhase::Playing;
        }
    }

    pub fn toggle_pause(&mut self) {
        match self.phase {
            GamePhase::Playing => self.phase = GamePhase::Paused,
            GamePhase::Paused => self.phase = GamePhase::Playing,
            _ => {}
        }
    }

    /// Leave the game-over screen. Entities and score stay stale until the next start.
    pub fn return_to_menu(&mut self) {
        if self.phase == GamePhase::GameOver {
            self.phase = GamePhase::Menu;
        }
    }

    /// Steer one lane left or right, clamped to the road
    pub fn switch_lane(&mut self, shift: LaneShift) {
        if !self.is_playing() {
            return;
        }
        let lane = clamp_lane(self.target_lane + shift.delta());
        if lane != self.target_lane {
            self.target_lane = lane;
            self.lane_change_tick += 1;
        }
    }

    /// Ease the player's lateral position toward the target lane slot
    pub fn follow_lane(&mut self, dt: f32) {
        if !self.is_playing() || dt <= 0.0 {
            return;
        }
        let target_x = lane_x(self.target_lane);
        let t = 1.0 - (-LANE_SWITCH_SPEED * dt).exp();
        self.player_x = self.player_x.lerp(target_x, t);

        if (self.player_x - target_x).abs() < LANE_SETTLE_DISTANCE {
            self.current_lane = self.target_lane;
        }
    }

    /// Collision ends the run: ratchet best score and bump the crash counter
    pub(crate) fn game_over(&mut self) {
        self.best_score = self.best_score.max(self.score);
        self.crash_tick += 1;
        self.phase = GamePhase::GameOver;
        log::info!("Crashed at score {:.0} (best {:.0})", self.score, self.best_score);
    }
}
