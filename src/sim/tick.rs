//! Per-frame simulation update
//!
//! Every tick is computed as a tentative next state and committed in one
//! write. A collision discards the tentative state and only applies the
//! GameOver transition.

use super::collision::{Collision, first_collision, update_near_alert};
use super::spawn::{SpawnAttempt, schedule_block, schedule_traffic};
use super::state::{GameState, RoadBlock, TrafficVehicle};
use crate::consts::*;

/// What a tick did
#[derive(Debug, Clone, Copy, PartialEq)]
pub enum TickOutcome {
    /// Not playing; nothing changed
    Idle,
    /// Simulation advanced and was committed
    Advanced,
    /// The player hit something; the run is over
    Crashed(Collision),
}

/// Advance the simulation by `dt` seconds.
///
/// Hosts should cap `dt` (see `MAX_FRAME_DELTA`) so entities can't tunnel
/// through the hit window. Negative or non-finite deltas count as zero.
pub fn tick(state: &mut GameState, dt: f32) -> TickOutcome {
    if !state.is_playing() {
        return TickOutcome::Idle;
    }
    let dt = if dt.is_finite() { dt.max(0.0) } else { 0.0 };

    let speed = (state.speed + SPEED_RAMP_RATE * dt).min(MAX_SPEED);
    let score = state.score + f64::from(dt * speed);
    // HUD speed stays readable; the world moves faster
    let world_speed = speed * WORLD_SPEED_MULTIPLIER;

    let mut traffic: Vec<TrafficVehicle> = state
        .traffic
        .iter()
        .map(|t| TrafficVehicle {
            z: t.z + (world_speed - t.speed * TRAFFIC_SPEED_FACTOR) * dt,
            ..t.clone()
        })
        .filter(|t| t.z < DESPAWN_Z)
        .collect();

    // Obstacles are fixed to the road
    let mut road_blocks: Vec<RoadBlock> = state
        .road_blocks
        .iter()
        .map(|b| RoadBlock {
            z: b.z + world_speed * dt,
            ..b.clone()
        })
        .filter(|b| b.z < DESPAWN_Z)
        .collect();

    let mut rng = state.rng.clone();
    let mut next_id = state.next_id;
    let mut spawn_timer = state.spawn_timer;
    let mut block_spawn_timer = state.block_spawn_timer;

    let attempt = schedule_traffic(&mut spawn_timer, &mut traffic, speed, dt, &mut rng, &mut next_id);
    if let SpawnAttempt::Rejected { lane } = attempt {
        log::trace!("Traffic spawn skipped: lane {} occupied", lane);
    }
    let attempt = schedule_block(
        &mut block_spawn_timer,
        &mut road_blocks,
        &traffic,
        speed,
        dt,
        &mut rng,
        &mut next_id,
    );
    if let SpawnAttempt::Rejected { lane } = attempt {
        log::trace!("Obstacle spawn skipped: lane {} occupied", lane);
    }

    let alert = update_near_alert(state.player_x, &traffic, state.near_alert_cooldown, dt);

    if let Some(hit) = first_collision(state.player_x, &traffic, &road_blocks) {
        log::debug!("Collision with {:?} #{}", hit.hazard, hit.id);
        state.game_over();
        return TickOutcome::Crashed(hit);
    }

    state.speed = speed;
    state.score = score;
    state.traffic = traffic;
    state.road_blocks = road_blocks;
    state.spawn_timer = spawn_timer;
    state.block_spawn_timer = block_spawn_timer;
    state.near_alert_cooldown = alert.cooldown;
    if alert.fired {
        state.near_alert_tick += 1;
    }
    state.rng = rng;
    state.next_id = next_id;

    TickOutcome::Advanced
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::lane_x;
    use crate::sim::state::GamePhase;
    use crate::sim::collision::Hazard;
    use crate::sim::state::{ObstacleKind, TrafficColor};

    const DT: f32 = 0.016;

    fn playing(seed: u64) -> GameState {
        let mut state = GameState::new(seed, 0.0);
        state.start_game();
        state
    }

    /// Push both spawn timers far out so nothing spawns during the test
    fn quiet(state: &mut GameState) {
        state.spawn_timer = 1e6;
        state.block_spawn_timer = 1e6;
    }

    #[test]
    fn test_tick_idle_outside_playing() {
        let mut state = GameState::new(1, 5.0);
        let before = state.clone();
        assert_eq!(tick(&mut state, DT), TickOutcome::Idle);
        assert_eq!(state, before);
    }

    #[test]
    fn test_tick_ramps_speed_and_score() {
        let mut state = playing(1);
        quiet(&mut state);
        assert_eq!(tick(&mut state, 1.0), TickOutcome::Advanced);
        assert!((state.speed - (BASE_SPEED + SPEED_RAMP_RATE)).abs() < 1e-5);
        assert!((state.score - f64::from(state.speed)).abs() < 1e-5);
    }

    #[test]
    fn test_score_keeps_growing_at_large_values() {
        let mut state = playing(1);
        quiet(&mut state);
        state.score = 16_777_216.0;
        tick(&mut state, 1.0 / 60.0);
        assert!(state.score > 16_777_216.0);
    }

    #[test]
    fn test_speed_caps_at_max() {
        let mut state = playing(1);
        quiet(&mut state);
        state.speed = MAX_SPEED - 0.001;
        tick(&mut state, DT);
        assert_eq!(state.speed, MAX_SPEED);
        tick(&mut state, DT);
        assert_eq!(state.speed, MAX_SPEED);
    }

    #[test]
    fn test_first_tick_spawns_both_kinds() {
        let mut state = playing(11);
        tick(&mut state, DT);
        // Timers start at zero, so the first frame spawns traffic
        assert_eq!(state.traffic.len(), 1);
        assert!(state.spawn_timer > 0.0);
        assert!(state.block_spawn_timer > 0.0);
        // Obstacle may be rejected if it drew the traffic lane
        assert!(state.road_blocks.len() <= 1);
    }

    #[test]
    fn test_traffic_moves_with_relative_speed() {
        let mut state = playing(1);
        quiet(&mut state);
        state.traffic.push(TrafficVehicle {
            id: 900,
            lane: 0,
            z: -50.0,
            color: TrafficColor::Violet,
            speed: 10.0,
        });
        state.road_blocks.push(RoadBlock {
            id: 901,
            lane: 2,
            z: -50.0,
            kind: ObstacleKind::Barrier,
        });
        tick(&mut state, 0.1);
        let world = state.speed * WORLD_SPEED_MULTIPLIER;
        let expected_car = -50.0 + (world - 10.0 * TRAFFIC_SPEED_FACTOR) * 0.1;
        let expected_block = -50.0 + world * 0.1;
        assert!((state.traffic[0].z - expected_car).abs() < 1e-4);
        assert!((state.road_blocks[0].z - expected_block).abs() < 1e-4);
        // Vehicles close the gap more slowly than obstacles
        assert!(state.traffic[0].z < state.road_blocks[0].z);
    }

    #[test]
    fn test_entities_despawn_past_boundary() {
        let mut state = playing(1);
        quiet(&mut state);
        state.traffic.push(TrafficVehicle {
            id: 900,
            lane: 0,
            z: DESPAWN_Z - 0.1,
            color: TrafficColor::Rose,
            speed: 1.0,
        });
        state.road_blocks.push(RoadBlock {
            id: 901,
            lane: 2,
            z: DESPAWN_Z - 0.1,
            kind: ObstacleKind::Duck,
        });
        tick(&mut state, DT);
        assert!(state.traffic.is_empty());
        assert!(state.road_blocks.is_empty());
    }

    #[test]
    fn test_collision_discards_tick() {
        let mut state = playing(1);
        state.score = 123.0;
        state.best_score = 50.0;
        state.spawn_timer = 0.5;
        state.block_spawn_timer = 0.7;
        state.traffic.push(TrafficVehicle {
            id: 900,
            lane: 1,
            z: -0.5,
            color: TrafficColor::Lime,
            speed: 5.0,
        });
        let before = state.clone();

        let outcome = tick(&mut state, DT);
        assert_eq!(
            outcome,
            TickOutcome::Crashed(Collision {
                id: 900,
                hazard: Hazard::Traffic
            })
        );
        assert_eq!(state.phase, GamePhase::GameOver);
        assert_eq!(state.best_score, 123.0);
        assert_eq!(state.crash_tick, 1);
        // Nothing else from this frame was committed
        assert_eq!(state.speed, before.speed);
        assert_eq!(state.score, before.score);
        assert_eq!(state.spawn_timer, before.spawn_timer);
        assert_eq!(state.block_spawn_timer, before.block_spawn_timer);
        assert_eq!(state.traffic, before.traffic);
        assert_eq!(state.near_alert_tick, before.near_alert_tick);
    }

    #[test]
    fn test_obstacle_collision_in_adjacent_lane_is_missed() {
        let mut state = playing(1);
        quiet(&mut state);
        state.road_blocks.push(RoadBlock {
            id: 77,
            lane: 0,
            z: 0.0,
            kind: ObstacleKind::Crate,
        });
        assert_eq!(tick(&mut state, DT), TickOutcome::Advanced);

        // Player drifting left catches it
        state.road_blocks[0].z = 0.0;
        state.player_x = lane_x(0) + 0.5;
        assert!(matches!(tick(&mut state, DT), TickOutcome::Crashed(c) if c.hazard == Hazard::Obstacle));
    }

    #[test]
    fn test_near_miss_bumps_counter() {
        let mut state = playing(1);
        quiet(&mut state);
        state.traffic.push(TrafficVehicle {
            id: 5,
            lane: 0,
            z: 1.0,
            color: TrafficColor::Orange,
            speed: 5.0,
        });
        tick(&mut state, DT);
        assert_eq!(state.near_alert_tick, 1);
        assert_eq!(state.near_alert_cooldown, NEAR_ALERT_COOLDOWN);
        assert_eq!(state.phase, GamePhase::Playing);

        // Still in the band, but cooling down
        tick(&mut state, DT);
        assert_eq!(state.near_alert_tick, 1);
    }

    #[test]
    fn test_same_seed_same_run() {
        let mut a = playing(99);
        let mut b = playing(99);
        for _ in 0..200 {
            tick(&mut a, DT);
            tick(&mut b, DT);
        }
        assert_eq!(a, b);
    }
}
