//! Procedural spawn scheduling for traffic and obstacles
//!
//! Each entity kind has its own countdown. Timers keep counting below zero
//! while a spawn is overdue (e.g. the lane is capped) and are reset to a
//! speed-scaled interval whenever an attempt is made, accepted or not.

use rand::Rng;

use super::state::{EntityId, ObstacleKind, RoadBlock, TrafficColor, TrafficVehicle};
use crate::clamp01;
use crate::consts::*;

/// Result of one scheduler step
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum SpawnAttempt {
    /// Timer still running
    NotDue,
    /// Overdue, but the collection is full
    Capped,
    /// Lane was occupied near the spawn line
    Rejected { lane: i32 },
    Spawned { id: EntityId, lane: i32 },
}

/// 0 at base speed, 1 at max speed
pub fn speed_factor(speed: f32) -> f32 {
    clamp01((speed - BASE_SPEED) / (MAX_SPEED - BASE_SPEED))
}

/// Interpolate from `base` down to `min` as speed ramps up
pub fn spawn_interval(speed: f32, base: f32, min: f32) -> f32 {
    base - speed_factor(speed) * (base - min)
}

pub fn traffic_interval(speed: f32) -> f32 {
    spawn_interval(speed, SPAWN_INTERVAL_BASE, SPAWN_INTERVAL_MIN)
}

pub fn block_interval(speed: f32) -> f32 {
    spawn_interval(speed, BLOCK_SPAWN_INTERVAL_BASE, BLOCK_SPAWN_INTERVAL_MIN)
}

#[inline]
fn near_spawn_line(lane: i32, z: f32, candidate_lane: i32, guard: f32) -> bool {
    lane == candidate_lane && (z - SPAWN_Z_OFFSET).abs() < guard
}

/// Advance the traffic timer and maybe spawn a vehicle at the spawn line
pub fn schedule_traffic<R: Rng>(
    timer: &mut f32,
    traffic: &mut Vec<TrafficVehicle>,
    speed: f32,
    dt: f32,
    rng: &mut R,
    next_id: &mut EntityId,
) -> SpawnAttempt {
    *timer -= dt;
    if *timer > 0.0 {
        return SpawnAttempt::NotDue;
    }
    if traffic.len() >= MAX_TRAFFIC {
        return SpawnAttempt::Capped;
    }
    *timer = traffic_interval(speed);

    let lane = rng.random_range(0..LANE_COUNT);
    if traffic
        .iter()
        .any(|t| near_spawn_line(t.lane, t.z, lane, TRAFFIC_SPAWN_GUARD))
    {
        return SpawnAttempt::Rejected { lane };
    }

    let color = TrafficColor::ALL[rng.random_range(0..TrafficColor::ALL.len())];
    let cruise = speed * (TRAFFIC_CRUISE_MIN + rng.random::<f32>() * TRAFFIC_CRUISE_SPREAD);
    let id = allocate(next_id);
    traffic.push(TrafficVehicle {
        id,
        lane,
        z: SPAWN_Z_OFFSET,
        color,
        speed: cruise,
    });
    SpawnAttempt::Spawned { id, lane }
}

/// Advance the obstacle timer and maybe drop an obstacle at the spawn line.
/// Obstacles also keep clear of traffic sitting on the spawn line.
pub fn schedule_block<R: Rng>(
    timer: &mut f32,
    blocks: &mut Vec<RoadBlock>,
    traffic: &[TrafficVehicle],
    speed: f32,
    dt: f32,
    rng: &mut R,
    next_id: &mut EntityId,
) -> SpawnAttempt {
    *timer -= dt;
    if *timer > 0.0 {
        return SpawnAttempt::NotDue;
    }
    if blocks.len() >= MAX_BLOCKS {
        return SpawnAttempt::Capped;
    }
    *timer = block_interval(speed);

    let lane = rng.random_range(0..LANE_COUNT);
    let blocked = blocks
        .iter()
        .any(|b| near_spawn_line(b.lane, b.z, lane, BLOCK_SPAWN_GUARD))
        || traffic
            .iter()
            .any(|t| near_spawn_line(t.lane, t.z, lane, BLOCK_SPAWN_GUARD));
    if blocked {
        return SpawnAttempt::Rejected { lane };
    }

    let kind = ObstacleKind::ALL[rng.random_range(0..ObstacleKind::ALL.len())];
    let id = allocate(next_id);
    blocks.push(RoadBlock {
        id,
        lane,
        z: SPAWN_Z_OFFSET,
        kind,
    });
    SpawnAttempt::Spawned { id, lane }
}

fn allocate(next_id: &mut EntityId) -> EntityId {
    let id = *next_id;
    *next_id += 1;
    id
}
