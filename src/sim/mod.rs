//! Deterministic simulation module
//!
//! All gameplay logic lives here. This module must be pure and deterministic:
//! - Seeded RNG only
//! - Entity lists only change inside `tick` or on a new run
//! - No rendering, audio or storage dependencies

pub mod collision;
pub mod events;
pub mod spawn;
pub mod state;
pub mod tick;

pub use collision::{Collision, Hazard, first_collision, update_near_alert};
pub use events::{EventCursor, SimEvent};
pub use spawn::{SpawnAttempt, block_interval, traffic_interval};
pub use state::{
    EntityId, GamePhase, GameState, LaneShift, ObstacleKind, RoadBlock, TrafficColor,
    TrafficVehicle,
};
pub use tick::{TickOutcome, tick};
