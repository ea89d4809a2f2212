//! Lane Runner - a three-lane endless runner simulation
//!
//! Core modules:
//! - `sim`: Deterministic simulation (spawning, motion, collisions, game state)
//! - `game`: Single-owner world object binding the simulation to host storage
//! - `persistence`: Key-value storage for the best score
//! - `settings`: Host configuration for the headless runner
//! - `autopilot`: Lane-picking bot used by the demo runner
//! - `runner`: Headless session driver behind the native binary
//! - `view`: Per-frame snapshot for presentation hosts
//! - `web`: wasm-bindgen facade (wasm32 only)

pub mod autopilot;
pub mod game;
pub mod persistence;
pub mod runner;
pub mod settings;
pub mod sim;
pub mod view;
#[cfg(target_arch = "wasm32")]
pub mod web;

pub use autopilot::Autopilot;
pub use game::Game;
pub use settings::Settings;

/// Game configuration constants
pub mod consts {
    /// Number of lanes on the road
    pub const LANE_COUNT: i32 = 3;
    /// Distance between lane centers
    pub const LANE_WIDTH: f32 = 2.5;
    /// Lateral slot for each lane, left to right
    pub const LANE_POSITIONS: [f32; LANE_COUNT as usize] = [-LANE_WIDTH, 0.0, LANE_WIDTH];

    /// Player starts in the center lane
    pub const PLAYER_START_LANE: i32 = 1;
    /// Player sits at the origin of the z axis; entities approach from negative z
    pub const PLAYER_Z: f32 = 0.0;
    /// Exponential lane-follow rate (1/s)
    pub const LANE_SWITCH_SPEED: f32 = 12.0;
    /// Player counts as settled into the target lane within this lateral distance
    pub const LANE_SETTLE_DISTANCE: f32 = 0.1;

    /// Speed bounds (HUD units)
    pub const BASE_SPEED: f32 = 8.0;
    pub const MAX_SPEED: f32 = 30.0;
    /// Speed gained per second of play
    pub const SPEED_RAMP_RATE: f32 = 0.15;
    /// World units travelled per HUD speed unit
    pub const WORLD_SPEED_MULTIPLIER: f32 = 3.5;
    /// Traffic closes on the player at world speed minus this share of its own speed
    pub const TRAFFIC_SPEED_FACTOR: f32 = 0.3;

    /// Traffic spawn interval (seconds) at base and max speed
    pub const SPAWN_INTERVAL_BASE: f32 = 1.2;
    pub const SPAWN_INTERVAL_MIN: f32 = 0.4;
    /// Obstacle spawn interval (seconds) at base and max speed
    pub const BLOCK_SPAWN_INTERVAL_BASE: f32 = 2.2;
    pub const BLOCK_SPAWN_INTERVAL_MIN: f32 = 0.9;

    /// Spawn line, far ahead of the player
    pub const SPAWN_Z_OFFSET: f32 = -80.0;
    /// Entities at or past this z are behind the camera and removed
    pub const DESPAWN_Z: f32 = 20.0;
    pub const MAX_TRAFFIC: usize = 12;
    pub const MAX_BLOCKS: usize = 6;
    /// Same-lane clearance required around the spawn line
    pub const TRAFFIC_SPAWN_GUARD: f32 = 8.0;
    pub const BLOCK_SPAWN_GUARD: f32 = 10.0;

    /// Individual traffic cruise speed is `speed * (MIN + random * SPREAD)`
    pub const TRAFFIC_CRUISE_MIN: f32 = 0.3;
    pub const TRAFFIC_CRUISE_SPREAD: f32 = 0.4;

    /// Lateral distance under which the player overlaps an entity's lane
    pub const LANE_HIT_THRESHOLD: f32 = 1.05;
    /// Hard-collision z windows (exclusive), a bit longer ahead than behind
    pub const TRAFFIC_HIT_Z: (f32, f32) = (-1.75, 1.35);
    pub const BLOCK_HIT_Z: (f32, f32) = (-1.7, 1.25);

    /// Near-miss cue band
    pub const NEAR_LATERAL_THRESHOLD: f32 = 3.0;
    pub const NEAR_Z: (f32, f32) = (-0.8, 4.6);
    pub const NEAR_ALERT_COOLDOWN: f32 = 0.2;

    /// Largest frame delta a host should feed `tick`
    pub const MAX_FRAME_DELTA: f32 = 0.05;

    /// Storage key for the persisted best score
    pub const BEST_SCORE_KEY: &str = "rdr_best";
}

/// Lateral slot of a lane index (clamped into the road)
#[inline]
pub fn lane_x(lane: i32) -> f32 {
    consts::LANE_POSITIONS[clamp_lane(lane) as usize]
}

/// Clamp a lane index to the valid range
#[inline]
pub fn clamp_lane(lane: i32) -> i32 {
    lane.clamp(0, consts::LANE_COUNT - 1)
}

/// Clamp a value into [0, 1]
#[inline]
pub fn clamp01(value: f32) -> f32 {
    value.clamp(0.0, 1.0)
}
