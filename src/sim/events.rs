//! One-shot events derived from the state's monotonic counters
//!
//! The simulation never pushes events. Audio/haptics consumers keep an
//! `EventCursor` and poll it once per frame.

use super::state::GameState;

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum SimEvent {
    LaneChange,
    NearMiss,
    Crash,
}

/// Last counter values seen by a consumer
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq)]
pub struct EventCursor {
    lane_change: u64,
    near_alert: u64,
    crash: u64,
}

impl EventCursor {
    /// Start from the state's current counters so past events are not replayed
    pub fn new(state: &GameState) -> Self {
        Self {
            lane_change: state.lane_change_tick,
            near_alert: state.near_alert_tick,
            crash: state.crash_tick,
        }
    }

    /// Events that happened since the previous poll, one per counter increment
    pub fn poll(&mut self, state: &GameState) -> Vec<SimEvent> {
        let mut events = Vec::new();
        for (seen, now, event) in [
            (&mut self.lane_change, state.lane_change_tick, SimEvent::LaneChange),
            (&mut self.near_alert, state.near_alert_tick, SimEvent::NearMiss),
            (&mut self.crash, state.crash_tick, SimEvent::Crash),
        ] {
            let fresh = now.saturating_sub(*seen);
            events.extend(std::iter::repeat_n(event, fresh as usize));
            *seen = now;
        }
        events
    }
}
