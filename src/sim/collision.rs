//! Collision and proximity checks
//!
//! These are arcade thresholds, not bounding-box contact tests. The player's
//! lateral position is the continuous `player_x`, so a hit follows the
//! lane-change animation instead of snapping to lane indices.

use super::state::{EntityId, RoadBlock, TrafficVehicle};
use crate::consts::*;
use crate::lane_x;

/// Open z interval `(min, max)`
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct ZWindow {
    pub min: f32,
    pub max: f32,
}

impl ZWindow {
    pub const fn new(bounds: (f32, f32)) -> Self {
        Self {
            min: bounds.0,
            max: bounds.1,
        }
    }

    #[inline]
    pub fn contains(&self, z: f32) -> bool {
        z > self.min && z < self.max
    }
}

pub const TRAFFIC_HIT_WINDOW: ZWindow = ZWindow::new(TRAFFIC_HIT_Z);
pub const BLOCK_HIT_WINDOW: ZWindow = ZWindow::new(BLOCK_HIT_Z);
pub const NEAR_WINDOW: ZWindow = ZWindow::new(NEAR_Z);

/// What the player ran into
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Hazard {
    Traffic,
    Obstacle,
}

/// A hard collision
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct Collision {
    pub id: EntityId,
    pub hazard: Hazard,
}

#[inline]
fn lateral_gap(player_x: f32, lane: i32) -> f32 {
    (player_x - lane_x(lane)).abs()
}

/// Hard collision with a traffic vehicle
pub fn hits_traffic(player_x: f32, vehicle: &TrafficVehicle) -> bool {
    lateral_gap(player_x, vehicle.lane) < LANE_HIT_THRESHOLD
        && TRAFFIC_HIT_WINDOW.contains(vehicle.z)
}

/// Hard collision with an obstacle
pub fn hits_block(player_x: f32, block: &RoadBlock) -> bool {
    lateral_gap(player_x, block.lane) < LANE_HIT_THRESHOLD && BLOCK_HIT_WINDOW.contains(block.z)
}

/// Vehicle is passing close enough to cue a near-miss
pub fn is_near_miss(player_x: f32, vehicle: &TrafficVehicle) -> bool {
    lateral_gap(player_x, vehicle.lane) < NEAR_LATERAL_THRESHOLD && NEAR_WINDOW.contains(vehicle.z)
}

/// First hard collision, traffic before obstacles, in list order
pub fn first_collision(
    player_x: f32,
    traffic: &[TrafficVehicle],
    blocks: &[RoadBlock],
) -> Option<Collision> {
    if let Some(v) = traffic.iter().find(|v| hits_traffic(player_x, v)) {
        return Some(Collision {
            id: v.id,
            hazard: Hazard::Traffic,
        });
    }
    blocks
        .iter()
        .find(|b| hits_block(player_x, b))
        .map(|b| Collision {
            id: b.id,
            hazard: Hazard::Obstacle,
        })
}

/// Near-miss cue state after one frame
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct NearAlert {
    pub cooldown: f32,
    pub fired: bool,
}

/// Decay the cue cooldown and fire at most once if any vehicle is in the near band
pub fn update_near_alert(
    player_x: f32,
    traffic: &[TrafficVehicle],
    cooldown: f32,
    dt: f32,
) -> NearAlert {
    let cooldown = (cooldown - dt).max(0.0);
    if cooldown <= 0.0 && traffic.iter().any(|v| is_near_miss(player_x, v)) {
        NearAlert {
            cooldown: NEAR_ALERT_COOLDOWN,
            fired: true,
        }
    } else {
        NearAlert {
            cooldown,
            fired: false,
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::sim::state::{ObstacleKind, TrafficColor};

    fn car(lane: i32, z: f32) -> TrafficVehicle {
        TrafficVehicle {
            id: 1,
            lane,
            z,
            color: TrafficColor::Rose,
            speed: 5.0,
        }
    }

    fn block(lane: i32, z: f32) -> RoadBlock {
        RoadBlock {
            id: 2,
            lane,
            z,
            kind: ObstacleKind::Cone,
        }
    }

    #[test]
    fn test_traffic_hit_window() {
        let x = lane_x(1);
        assert!(hits_traffic(x, &car(1, 0.0)));
        assert!(hits_traffic(x, &car(1, -1.7)));
        assert!(hits_traffic(x, &car(1, 1.3)));
        // Window is open at both ends
        assert!(!hits_traffic(x, &car(1, -1.75)));
        assert!(!hits_traffic(x, &car(1, 1.35)));
        assert!(!hits_traffic(x, &car(1, -20.0)));
    }

    #[test]
    fn test_block_window_is_tighter() {
        let x = lane_x(1);
        assert!(hits_block(x, &block(1, -1.65)));
        assert!(!hits_block(x, &block(1, -1.72)));
        assert!(hits_block(x, &block(1, 1.2)));
        assert!(!hits_block(x, &block(1, 1.3)));
    }

    #[test]
    fn test_lateral_threshold_tracks_player_x() {
        // Mid lane change: 1.0 from lane 1, 1.5 from lane 2
        let x = 1.0;
        assert!(hits_traffic(x, &car(1, 0.0)));
        assert!(!hits_traffic(x, &car(2, 0.0)));
        assert!(!hits_traffic(lane_x(0), &car(1, 0.0)));
    }

    #[test]
    fn test_near_miss_band() {
        let x = lane_x(1);
        // Adjacent lane, just ahead
        assert!(is_near_miss(x, &car(0, 2.0)));
        assert!(is_near_miss(x, &car(2, -0.5)));
        // Too far ahead or behind
        assert!(!is_near_miss(x, &car(0, -3.0)));
        assert!(!is_near_miss(x, &car(0, 5.0)));
        // Two lanes away is 5.0 laterally
        assert!(!is_near_miss(lane_x(0), &car(2, 1.0)));
    }

    #[test]
    fn test_first_collision_prefers_traffic() {
        let x = lane_x(1);
        let traffic = vec![car(0, 0.0), car(1, 0.5)];
        let blocks = vec![block(1, 0.0)];
        let hit = first_collision(x, &traffic, &blocks).unwrap();
        assert_eq!(hit.hazard, Hazard::Traffic);

        let hit = first_collision(x, &[], &blocks).unwrap();
        assert_eq!(hit.hazard, Hazard::Obstacle);
        assert_eq!(hit.id, 2);

        assert!(first_collision(x, &[car(0, 0.0)], &[block(2, 0.0)]).is_none());
    }

    #[test]
    fn test_near_alert_debounce() {
        let traffic = vec![car(0, 1.0)];
        let x = lane_x(1);
        let mut cooldown = 0.0;
        let mut fired = 0;
        // One second of frames with the vehicle parked in the band
        for _ in 0..62 {
            let alert = update_near_alert(x, &traffic, cooldown, 0.016);
            cooldown = alert.cooldown;
            if alert.fired {
                fired += 1;
            }
        }
        assert!((1..=5).contains(&fired), "fired {fired} times");
    }

    #[test]
    fn test_near_alert_decays_without_traffic() {
        let alert = update_near_alert(0.0, &[], 0.15, 0.1);
        assert!(!alert.fired);
        assert!((alert.cooldown - 0.05).abs() < 1e-6);
        let alert = update_near_alert(0.0, &[], 0.05, 0.1);
        assert_eq!(alert.cooldown, 0.0);
    }
}
