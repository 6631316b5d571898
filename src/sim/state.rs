//! Game state and core simulation types
//!
//! Everything that changes during a session lives in [`GameState`]. The
//! driver in `tick` owns one and mutates it once per frame.

use serde::{Deserialize, Serialize};

use super::traffic::{Lane, TrafficAgent, TrafficPool};
use super::vehicle::Vehicle;
use crate::tuning::Tuning;

/// Current phase of gameplay
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default, Serialize, Deserialize)]
pub enum GamePhase {
    /// Driving
    #[default]
    Active,
    /// Hit traffic; terminal until the session is reset
    Crashed,
}

/// Notifications for the view layer, in the order they happened
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub enum GameEvent {
    /// Create a visual for a new car
    AgentSpawned {
        id: u32,
        lane: Lane,
        distance: f64,
        color: u32,
    },
    /// Remove the visual for a passed car
    AgentRecycled { id: u32 },
    /// Show the near-miss banner; it hides itself after `duration_ticks`
    NearMiss { reward: u64, duration_ticks: u32 },
    /// Show game over. Fires once per session.
    Crashed { agent_id: u32 },
}

/// Complete session state (deterministic, serializable)
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct GameState {
    /// Run seed for reproducibility
    pub seed: u64,
    pub phase: GamePhase,
    pub score: u64,
    /// Simulation tick counter (only advances while Active)
    pub time_ticks: u64,
    /// Ticks left on the near-miss banner (0 = hidden)
    pub near_miss_ticks: u32,
    /// Number of cars passed
    pub near_misses: u32,
    pub vehicle: Vehicle,
    pub traffic: TrafficPool,
    /// Next entity ID
    next_id: u32,
}

impl GameState {
    /// Fresh session: car at the origin, empty road, zero score
    pub fn new(seed: u64, tuning: &Tuning) -> Self {
        Self {
            seed,
            phase: GamePhase::Active,
            score: 0,
            time_ticks: 0,
            near_miss_ticks: 0,
            near_misses: 0,
            vehicle: Vehicle::default(),
            traffic: TrafficPool::new(tuning.max_traffic),
            next_id: 1,
        }
    }

    /// Allocate a new entity ID. Wraps after `u32::MAX`; the pool never
    /// holds anywhere near that many cars at once.
    pub fn next_entity_id(&mut self) -> u32 {
        let id = self.next_id;
        self.next_id = self.next_id.wrapping_add(1);
        id
    }

    /// Put a new car on the road. `None` if the pool is full.
    pub fn spawn_agent(&mut self, lane: Lane, distance: f64, color: u32) -> Option<GameEvent> {
        let id = self.next_entity_id();
        let agent = TrafficAgent {
            id,
            lane,
            distance,
            color,
        };
        if self.traffic.insert(agent).is_none() {
            log::warn!("Traffic pool full ({} cars), spawn dropped", self.traffic.len());
            return None;
        }
        log::debug!("Spawned car {id} in {lane:?} lane at {distance}");
        Some(GameEvent::AgentSpawned {
            id,
            lane,
            distance,
            color,
        })
    }

    #[inline]
    pub fn is_crashed(&self) -> bool {
        self.phase == GamePhase::Crashed
    }

    /// Credit a passed car and raise the banner. Ignored once crashed.
    pub fn award_near_miss(&mut self, reward: u64, duration_ticks: u32) -> Option<GameEvent> {
        if self.is_crashed() {
            return None;
        }
        self.score += reward;
        self.near_misses += 1;
        self.near_miss_ticks = duration_ticks;
        Some(GameEvent::NearMiss {
            reward,
            duration_ticks,
        })
    }

    /// Count down the near-miss banner
    pub fn decay_near_miss(&mut self) {
        self.near_miss_ticks = self.near_miss_ticks.saturating_sub(1);
    }

    /// Transition to Crashed. Returns the event only on the first call.
    pub fn crash(&mut self, agent_id: u32) -> Option<GameEvent> {
        if self.is_crashed() {
            return None;
        }
        self.phase = GamePhase::Crashed;
        log::info!(
            "Crashed into car {} at tick {} (score {})",
            agent_id,
            self.time_ticks,
            self.score
        );
        Some(GameEvent::Crashed { agent_id })
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_new_session() {
        let state = GameState::new(5, &Tuning::default());
        assert_eq!(state.phase, GamePhase::Active);
        assert_eq!(state.score, 0);
        assert_eq!(state.vehicle, Vehicle::default());
        assert!(state.traffic.is_empty());
    }

    #[test]
    fn test_entity_ids_are_unique() {
        let mut state = GameState::new(5, &Tuning::default());
        let a = state.next_entity_id();
        let b = state.next_entity_id();
        assert_ne!(a, b);
    }

    #[test]
    fn test_entity_ids_wrap_instead_of_overflowing() {
        let mut state = GameState::new(5, &Tuning::default());
        state.next_id = u32::MAX;
        assert_eq!(state.next_entity_id(), u32::MAX);
        assert_eq!(state.next_entity_id(), 0);
        assert_eq!(state.next_entity_id(), 1);
    }

    #[test]
    fn test_spawn_dropped_when_pool_full() {
        let mut tuning = Tuning::default();
        tuning.max_traffic = 2;
        let mut state = GameState::new(5, &tuning);
        assert!(state.spawn_agent(Lane::Left, 100.0, 0).is_some());
        assert!(state.spawn_agent(Lane::Center, 100.0, 0).is_some());
        assert_eq!(state.spawn_agent(Lane::Right, 100.0, 0), None);
        assert_eq!(state.traffic.len(), 2);
    }

    #[test]
    fn test_crash_fires_once() {
        let mut state = GameState::new(5, &Tuning::default());
        assert_eq!(state.crash(3), Some(GameEvent::Crashed { agent_id: 3 }));
        assert_eq!(state.crash(3), None);
        assert_eq!(state.crash(9), None);
        assert_eq!(state.phase, GamePhase::Crashed);
    }

    #[test]
    fn test_near_miss_scoring() {
        let mut state = GameState::new(5, &Tuning::default());
        let event = state.award_near_miss(100, 30);
        assert_eq!(
            event,
            Some(GameEvent::NearMiss {
                reward: 100,
                duration_ticks: 30
            })
        );
        assert_eq!(state.score, 100);
        assert_eq!(state.near_miss_ticks, 30);

        for _ in 0..40 {
            state.decay_near_miss();
        }
        assert_eq!(state.near_miss_ticks, 0);
    }

    #[test]
    fn test_no_score_after_crash() {
        let mut state = GameState::new(5, &Tuning::default());
        state.award_near_miss(100, 30);
        state.crash(1);
        assert!(state.award_near_miss(100, 30).is_none());
        assert_eq!(state.score, 100);
    }
}
