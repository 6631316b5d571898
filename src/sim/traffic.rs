//! Oncoming traffic
//!
//! Agents spawn far ahead in one of three lanes and close in on the player
//! every tick. Once behind the recycle threshold they are removed.

use glam::DVec2;
use rand::Rng;
use serde::{Deserialize, Serialize};

use crate::tuning::Tuning;

/// Discrete lateral slot for traffic
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub enum Lane {
    Left,
    Center,
    Right,
}

impl Lane {
    pub const ALL: [Lane; 3] = [Lane::Left, Lane::Center, Lane::Right];

    /// Lateral offset of the lane centre (positive = left, matching [`super::Vehicle`])
    #[inline]
    pub fn offset(self, spacing: f64) -> f64 {
        match self {
            Lane::Left => spacing,
            Lane::Center => 0.0,
            Lane::Right => -spacing,
        }
    }
}

/// One oncoming car
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct TrafficAgent {
    pub id: u32,
    pub lane: Lane,
    /// Longitudinal distance ahead of the player (negative once passed)
    pub distance: f64,
    /// 24-bit RGB body colour, cosmetic
    pub color: u32,
}

impl TrafficAgent {
    /// Position in the (lateral, longitudinal) plane
    #[inline]
    pub fn position(&self, lane_spacing: f64) -> DVec2 {
        DVec2::new(self.lane.offset(lane_spacing), self.distance)
    }
}

/// Outcome of a successful spawn roll
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct SpawnRoll {
    pub lane: Lane,
    pub color: u32,
}

/// Roll for a new agent this tick. Chance is `spawn_rate * speed`, so a
/// stationary player never sees new traffic.
pub fn roll_spawn<R: Rng>(rng: &mut R, speed: f64, tuning: &Tuning) -> Option<SpawnRoll> {
    let roll: f64 = rng.random();
    if roll >= tuning.spawn_rate * speed {
        return None;
    }
    let lane = Lane::ALL[rng.random_range(0..Lane::ALL.len())];
    let color = rng.random_range(0..=0x00FF_FFFF);
    Some(SpawnRoll { lane, color })
}

/// All active traffic, exclusively owned
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
pub struct TrafficPool {
    agents: Vec<TrafficAgent>,
    capacity: usize,
}

impl TrafficPool {
    pub fn new(capacity: usize) -> Self {
        Self {
            agents: Vec::with_capacity(capacity),
            capacity,
        }
    }

    #[inline]
    pub fn agents(&self) -> &[TrafficAgent] {
        &self.agents
    }

    #[inline]
    pub fn len(&self) -> usize {
        self.agents.len()
    }

    #[inline]
    pub fn is_empty(&self) -> bool {
        self.agents.is_empty()
    }

    #[inline]
    pub fn is_full(&self) -> bool {
        self.agents.len() >= self.capacity
    }

    #[cfg(test)]
    pub fn get(&self, id: u32) -> Option<&TrafficAgent> {
        self.agents.iter().find(|a| a.id == id)
    }

    /// Add an agent. Returns `None` when the pool is at capacity.
    pub fn insert(&mut self, agent: TrafficAgent) -> Option<&TrafficAgent> {
        if self.is_full() {
            return None;
        }
        self.agents.push(agent);
        self.agents.last()
    }

    /// Move every agent toward the player
    pub fn advance(&mut self, step: f64) {
        for agent in &mut self.agents {
            agent.distance -= step;
        }
    }

    /// Remove every agent behind `threshold`, except `spared` (the agent the
    /// player hit this tick, if any). Removed agents are returned in pool order.
    pub fn recycle(&mut self, threshold: f64, spared: Option<u32>) -> Vec<TrafficAgent> {
        let (passed, kept): (Vec<_>, Vec<_>) = std::mem::take(&mut self.agents)
            .into_iter()
            .partition(|a| a.distance < threshold && Some(a.id) != spared);
        self.agents = kept;
        passed
    }
}

/// Per-tick approach distance at the given player speed
#[inline]
pub fn approach_step(speed: f64, tuning: &Tuning) -> f64 {
    tuning.traffic_base_step + tuning.traffic_speed_factor * speed
}

#[cfg(test)]
mod tests {
    use super::*;
    use rand::SeedableRng;
    use rand_pcg::Pcg32;

    fn agent(id: u32, lane: Lane, distance: f64) -> TrafficAgent {
        TrafficAgent {
            id,
            lane,
            distance,
            color: 0xFFFFFF,
        }
    }

    #[test]
    fn test_lane_offsets() {
        assert_eq!(Lane::Left.offset(3.0), 3.0);
        assert_eq!(Lane::Center.offset(3.0), 0.0);
        assert_eq!(Lane::Right.offset(3.0), -3.0);
    }

    #[test]
    fn test_advance_moves_every_agent() {
        let mut pool = TrafficPool::new(8);
        pool.insert(agent(1, Lane::Left, 100.0));
        pool.insert(agent(2, Lane::Right, 50.0));

        let tuning = Tuning::default();
        let step = approach_step(1.0, &tuning);
        assert!((step - 2.5).abs() < 1e-12);

        pool.advance(step);
        assert!((pool.get(1).unwrap().distance - 97.5).abs() < 1e-12);
        assert!((pool.get(2).unwrap().distance - 47.5).abs() < 1e-12);
    }

    #[test]
    fn test_recycle_removes_adjacent_passed_agents() {
        let mut pool = TrafficPool::new(8);
        // Two passed agents next to each other must both go (no skipping)
        pool.insert(agent(1, Lane::Left, -21.0));
        pool.insert(agent(2, Lane::Center, -25.0));
        pool.insert(agent(3, Lane::Right, 10.0));
        pool.insert(agent(4, Lane::Left, -20.0));

        let removed = pool.recycle(-20.0, None);
        let ids: Vec<u32> = removed.iter().map(|a| a.id).collect();
        assert_eq!(ids, vec![1, 2]);

        // Exactly at the threshold stays
        let remaining: Vec<u32> = pool.agents().iter().map(|a| a.id).collect();
        assert_eq!(remaining, vec![3, 4]);
    }

    #[test]
    fn test_recycle_spares_collided_agent() {
        let mut pool = TrafficPool::new(8);
        pool.insert(agent(7, Lane::Center, -30.0));
        let removed = pool.recycle(-20.0, Some(7));
        assert!(removed.is_empty());
        assert_eq!(pool.len(), 1);
    }

    #[test]
    fn test_capacity_is_enforced() {
        let mut pool = TrafficPool::new(2);
        assert!(pool.insert(agent(1, Lane::Left, 100.0)).is_some());
        assert!(pool.insert(agent(2, Lane::Left, 100.0)).is_some());
        assert!(pool.is_full());
        assert!(pool.insert(agent(3, Lane::Left, 100.0)).is_none());
        assert_eq!(pool.len(), 2);
    }

    #[test]
    fn test_no_spawn_when_stationary() {
        let tuning = Tuning::default();
        let mut rng = Pcg32::seed_from_u64(1);
        for _ in 0..1000 {
            assert!(roll_spawn(&mut rng, 0.0, &tuning).is_none());
        }
    }

    #[test]
    fn test_spawn_rate_scales_with_speed() {
        let tuning = Tuning::default();
        let mut rng = Pcg32::seed_from_u64(42);
        let trials = 20_000;
        let hits = (0..trials)
            .filter(|_| roll_spawn(&mut rng, tuning.max_speed, &tuning).is_some())
            .count();
        // Expected 5% at top speed
        let rate = hits as f64 / trials as f64;
        assert!((0.04..0.06).contains(&rate), "spawn rate {rate}");
    }

    #[test]
    fn test_spawn_uses_every_lane() {
        let mut tuning = Tuning::default();
        tuning.spawn_rate = 1.0;
        let mut rng = Pcg32::seed_from_u64(7);
        let mut seen = std::collections::HashSet::new();
        for _ in 0..200 {
            if let Some(roll) = roll_spawn(&mut rng, 1.0, &tuning) {
                assert!(roll.color <= 0xFF_FFFF);
                seen.insert(roll.lane);
            }
        }
        assert_eq!(seen.len(), Lane::ALL.len());
    }
}
