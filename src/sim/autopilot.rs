//! Demo driver
//!
//! Plays the game for attract mode and headless runs. Every tick the
//! current traffic is rolled forward under a few candidate plans and the
//! first step of the first plan that stays clear is taken.
//!
//! Every lateral position is within collision range of some lane, so
//! steering alone cannot dodge a car that is already close. The driver
//! holds a low cruise speed to leave itself enough ticks to change slot.

use super::collision::first_contact;
use super::input::{Control, InputState};
use super::state::GameState;
use super::traffic::{TrafficAgent, approach_step};
use super::vehicle::Vehicle;
use crate::tuning::Tuning;

/// Cruise speed as a fraction of top speed
const CRUISE_FRACTION: f64 = 0.2;
/// Ticks each plan is rolled forward
const HORIZON: u32 = 240;

/// Steer toward `target` and either cruise or coast
#[derive(Debug, Clone, Copy)]
struct Plan {
    target: f64,
    cruise: bool,
}

impl Plan {
    fn input(&self, vehicle: &Vehicle, tuning: &Tuning) -> InputState {
        let mut input = InputState::default();
        if self.cruise && vehicle.speed < tuning.max_speed * CRUISE_FRACTION {
            input.press(Control::Accelerate);
        }
        let dead_zone = tuning.steer_step / 2.0;
        if self.target - vehicle.lateral > dead_zone {
            input.press(Control::SteerLeft);
        } else if vehicle.lateral - self.target > dead_zone {
            input.press(Control::SteerRight);
        }
        input
    }

    /// Tick of the first contact when following this plan against the
    /// traffic on the road now. `None` if every car gets by.
    fn first_hit(&self, state: &GameState, tuning: &Tuning) -> Option<u32> {
        let mut vehicle = state.vehicle.clone();
        let mut agents: Vec<TrafficAgent> = state.traffic.agents().to_vec();

        for tick in 1..=HORIZON {
            vehicle.integrate(&self.input(&vehicle, tuning), tuning);
            let step = approach_step(vehicle.speed, tuning);
            for agent in &mut agents {
                agent.distance -= step;
            }
            agents.retain(|a| a.distance > -tuning.collision_distance);

            let contact = first_contact(
                vehicle.position(),
                &agents,
                tuning.lane_spacing,
                tuning.collision_distance,
            );
            if contact.is_some() {
                return Some(tick);
            }
            if agents.is_empty() {
                return None;
            }
        }
        None
    }
}

/// Produce this tick's controls for the demo driver
pub fn autopilot_input(state: &GameState, tuning: &Tuning) -> InputState {
    // Kerbs and the centre line: each is in range of a single lane
    let lateral = state.vehicle.lateral;
    let mut targets = [tuning.lateral_bound, 0.0, -tuning.lateral_bound];
    targets.sort_by(|a, b| (a - lateral).abs().total_cmp(&(b - lateral).abs()));

    let mut fallback: Option<(u32, Plan)> = None;
    for cruise in [true, false] {
        for target in targets {
            let plan = Plan { target, cruise };
            match plan.first_hit(state, tuning) {
                None => return plan.input(&state.vehicle, tuning),
                Some(tick) if fallback.is_none_or(|(best, _)| tick > best) => {
                    fallback = Some((tick, plan));
                }
                Some(_) => {}
            }
        }
    }

    // Boxed in: put the hit off as long as possible
    log::debug!("Autopilot boxed in at lateral {lateral:.2}");
    fallback.map_or_else(InputState::default, |(_, plan)| {
        plan.input(&state.vehicle, tuning)
    })
}
