//! Read-only frame snapshot for presentation hosts
//!
//! Everything a renderer or HUD polls once per frame, flattened into plain
//! serializable data with camelCase keys for JavaScript consumers.

use serde::Serialize;

use crate::sim::{EntityId, GameState, ObstacleKind};

#[derive(Debug, Clone, PartialEq, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct VehicleView {
    pub id: EntityId,
    pub lane: i32,
    pub z: f32,
    /// CSS hex paint
    pub color: &'static str,
}

#[derive(Debug, Clone, PartialEq, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct BlockView {
    pub id: EntityId,
    pub lane: i32,
    pub z: f32,
    pub kind: ObstacleKind,
}

#[derive(Debug, Clone, PartialEq, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct FrameView {
    pub phase: &'static str,
    pub score: f64,
    pub best_score: f64,
    pub speed: f32,
    pub current_lane: i32,
    pub target_lane: i32,
    pub player_x: f32,
    pub traffic: Vec<VehicleView>,
    pub road_blocks: Vec<BlockView>,
    pub lane_change_tick: u64,
    pub near_alert_tick: u64,
    pub crash_tick: u64,
}

impl FrameView {
    pub fn of(state: &GameState) -> Self {
        Self {
            phase: state.phase.name(),
            score: state.score,
            best_score: state.best_score,
            speed: state.speed,
            current_lane: state.current_lane,
            target_lane: state.target_lane,
            player_x: state.player_x,
            traffic: state
                .traffic
                .iter()
                .map(|t| VehicleView {
                    id: t.id,
                    lane: t.lane,
                    z: t.z,
                    color: t.color.hex(),
                })
                .collect(),
            road_blocks: state
                .road_blocks
                .iter()
                .map(|b| BlockView {
                    id: b.id,
                    lane: b.lane,
                    z: b.z,
                    kind: b.kind,
                })
                .collect(),
            lane_change_tick: state.lane_change_tick,
            near_alert_tick: state.near_alert_tick,
            crash_tick: state.crash_tick,
        }
    }

    pub fn to_json(&self) -> Result<String, serde_json::Error> {
        serde_json::to_string(self)
    }
}
