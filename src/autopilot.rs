//! Lane-picking bot for the headless runner
//!
//! Reads the same state a presentation layer would and answers with at most
//! one lane shift per frame.

use crate::consts::*;
use crate::sim::{GameState, LaneShift};

/// How far ahead the bot looks for hazards
const LOOKAHEAD: f32 = 40.0;
/// Clearance below which the current lane counts as threatened
const DANGER_DISTANCE: f32 = 18.0;

#[derive(Debug, Clone, Copy)]
pub struct Autopilot {
    pub lookahead: f32,
    pub danger_distance: f32,
}

impl Default for Autopilot {
    fn default() -> Self {
        Self {
            lookahead: LOOKAHEAD,
            danger_distance: DANGER_DISTANCE,
        }
    }
}

impl Autopilot {
    /// Distance to the nearest hazard in `lane` that the player has not passed yet
    pub fn clearance(&self, state: &GameState, lane: i32) -> f32 {
        let (_, hit_behind) = TRAFFIC_HIT_Z;
        let traffic = state.traffic.iter().map(|t| (t.lane, t.z));
        let blocks = state.road_blocks.iter().map(|b| (b.lane, b.z));
        traffic
            .chain(blocks)
            .filter(|&(l, z)| l == lane && z > -self.lookahead && z < hit_behind)
            .map(|(_, z)| (PLAYER_Z - z).max(0.0))
            .fold(f32::INFINITY, f32::min)
    }

    /// Steer away from a threatened lane toward the clearest neighbor
    pub fn decide(&self, state: &GameState) -> Option<LaneShift> {
        if !state.is_playing() {
            return None;
        }
        let lane = state.target_lane;
        let here = self.clearance(state, lane);
        if here >= self.danger_distance {
            return None;
        }

        let left = (lane > 0).then(|| (LaneShift::Left, self.clearance(state, lane - 1)));
        let right = (lane < LANE_COUNT - 1)
            .then(|| (LaneShift::Right, self.clearance(state, lane + 1)));

        [left, right]
            .into_iter()
            .flatten()
            .filter(|&(_, clear)| clear > here)
            .max_by(|a, b| a.1.total_cmp(&b.1))
            .map(|(shift, _)| shift)
    }
}
