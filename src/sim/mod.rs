//! Deterministic simulation module
//!
//! All gameplay logic lives here. This module must be pure and deterministic:
//! - One tick per frame, driven by the host
//! - Seeded RNG only
//! - No rendering or platform dependencies

pub mod autopilot;
pub mod collision;
pub mod input;
pub mod readout;
pub mod state;
pub mod tick;
pub mod traffic;
pub mod vehicle;

pub use autopilot::autopilot_input;
pub use collision::{Contact, first_contact};
pub use input::{Control, InputState, KeyBindings};
pub use readout::{Gear, Readout};
pub use state::{GameEvent, GamePhase, GameState};
pub use tick::{Simulation, TickOutput};
pub use traffic::{Lane, TrafficAgent, TrafficPool};
pub use vehicle::Vehicle;
