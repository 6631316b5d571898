//! Per-frame simulation driver
//!
//! The host (browser animation frame or a headless loop) calls
//! [`Simulation::tick`] exactly once per frame. Each tick runs, in order:
//! kinematics, traffic advance, collision, recycle/scoring, spawn.

use rand::SeedableRng;
use rand_pcg::Pcg32;

use super::collision::first_contact;
use super::input::InputState;
use super::readout::Readout;
use super::state::{GameEvent, GameState};
use super::traffic::{approach_step, roll_spawn};
use crate::tuning::Tuning;

/// What one tick produced for the view layer
#[derive(Debug, Clone, PartialEq)]
pub struct TickOutput {
    /// Scene and session notifications, in order
    pub events: Vec<GameEvent>,
    pub readout: Readout,
}

/// A single game session plus the tuning and RNG that drive it
#[derive(Debug, Clone)]
pub struct Simulation {
    pub state: GameState,
    tuning: Tuning,
    rng: Pcg32,
}

impl Simulation {
    pub fn new(seed: u64, tuning: Tuning) -> Self {
        log::info!("Starting session (seed {seed})");
        Self {
            state: GameState::new(seed, &tuning),
            rng: Pcg32::seed_from_u64(seed),
            tuning,
        }
    }

    /// Start over: car at the origin, empty road, zero score, Active
    pub fn reset(&mut self, seed: u64) {
        log::info!(
            "Resetting session (seed {seed}, previous score {})",
            self.state.score
        );
        self.state = GameState::new(seed, &self.tuning);
        self.rng = Pcg32::seed_from_u64(seed);
    }

    #[inline]
    pub fn tuning(&self) -> &Tuning {
        &self.tuning
    }

    pub fn readout(&self) -> Readout {
        Readout::from_state(&self.state, &self.tuning)
    }

    /// Advance the session by one frame
    pub fn tick(&mut self, input: &InputState) -> TickOutput {
        let mut events = Vec::new();

        // Banner timing runs even after a crash; it is presentation only
        self.state.decay_near_miss();

        if !self.state.is_crashed() {
            self.step(input, &mut events);
        }

        TickOutput {
            events,
            readout: self.readout(),
        }
    }

    fn step(&mut self, input: &InputState, events: &mut Vec<GameEvent>) {
        let tuning = &self.tuning;
        let state = &mut self.state;

        state.time_ticks += 1;

        state.vehicle.integrate(input, tuning);
        let speed = state.vehicle.speed;

        state.traffic.advance(approach_step(speed, tuning));

        let contact = first_contact(
            state.vehicle.position(),
            state.traffic.agents(),
            tuning.lane_spacing,
            tuning.collision_distance,
        );

        // The car we hit is never credited as passed
        let spared = contact.map(|c| c.agent_id);
        for agent in state.traffic.recycle(tuning.recycle_threshold, spared) {
            log::debug!("Recycled car {} at {:.2}", agent.id, agent.distance);
            events.push(GameEvent::AgentRecycled { id: agent.id });
            events.extend(state.award_near_miss(tuning.near_miss_reward, tuning.near_miss_ticks));
        }

        if let Some(contact) = contact {
            events.extend(state.crash(contact.agent_id));
            return;
        }

        if let Some(roll) = roll_spawn(&mut self.rng, speed, tuning) {
            events.extend(state.spawn_agent(roll.lane, tuning.spawn_distance, roll.color));
        }
    }
}
