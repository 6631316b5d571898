//! Derived display values
//!
//! Speedometer, RPM bar and gear are all functions of the current speed; the
//! view layer never computes them itself.

use serde::{Deserialize, Serialize};

use super::state::GameState;
use crate::tuning::Tuning;

/// Gear indicator
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub enum Gear {
    Neutral,
    Drive(u32),
}

impl Gear {
    /// Gear for a displayed speed: neutral at 0, else one gear per `band`
    /// (rounded up)
    pub fn from_display_speed(speed: u32, band: u32) -> Self {
        if speed == 0 {
            Gear::Neutral
        } else {
            Gear::Drive(speed.div_ceil(band.max(1)))
        }
    }
}

impl std::fmt::Display for Gear {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        match self {
            Gear::Neutral => write!(f, "N"),
            Gear::Drive(n) => write!(f, "{n}"),
        }
    }
}

/// Everything the HUD shows for one frame
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub struct Readout {
    /// Speedometer value
    pub speed: u32,
    /// RPM bar fill, 0..=100
    pub rpm_percent: f64,
    pub gear: Gear,
    pub score: u64,
    /// Near-miss banner visible
    pub near_miss: bool,
    /// Game-over panel visible
    pub crashed: bool,
}

impl Readout {
    pub fn from_state(state: &GameState, tuning: &Tuning) -> Self {
        let speed_units = state.vehicle.speed;
        let speed = (speed_units * tuning.speed_display_scale).floor().max(0.0) as u32;
        let rpm_percent = (speed_units / tuning.max_speed * 100.0).clamp(0.0, 100.0);

        Self {
            speed,
            rpm_percent,
            gear: Gear::from_display_speed(speed, tuning.gear_band),
            score: state.score,
            near_miss: state.near_miss_ticks > 0,
            crashed: state.is_crashed(),
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_gear_bands() {
        assert_eq!(Gear::from_display_speed(0, 40), Gear::Neutral);
        assert_eq!(Gear::from_display_speed(1, 40), Gear::Drive(1));
        assert_eq!(Gear::from_display_speed(40, 40), Gear::Drive(1));
        assert_eq!(Gear::from_display_speed(41, 40), Gear::Drive(2));
        assert_eq!(Gear::from_display_speed(80, 40), Gear::Drive(2));
        assert_eq!(Gear::from_display_speed(200, 40), Gear::Drive(5));
    }

    #[test]
    fn test_gear_display() {
        assert_eq!(Gear::Neutral.to_string(), "N");
        assert_eq!(Gear::Drive(3).to_string(), "3");
    }

    #[test]
    fn test_readout_at_top_speed() {
        let tuning = Tuning::default();
        let mut state = GameState::new(1, &tuning);
        state.vehicle.speed = tuning.max_speed;

        let readout = Readout::from_state(&state, &tuning);
        assert_eq!(readout.speed, 200);
        assert_eq!(readout.rpm_percent, 100.0);
        assert_eq!(readout.gear, Gear::Drive(5));
        assert!(!readout.crashed);
    }

    #[test]
    fn test_readout_at_rest() {
        let tuning = Tuning::default();
        let state = GameState::new(1, &tuning);
        let readout = Readout::from_state(&state, &tuning);
        assert_eq!(readout.speed, 0);
        assert_eq!(readout.rpm_percent, 0.0);
        assert_eq!(readout.gear, Gear::Neutral);
        assert!(!readout.near_miss);
    }

    #[test]
    fn test_tiny_speed_displays_neutral() {
        let tuning = Tuning::default();
        let mut state = GameState::new(1, &tuning);
        // Friction tail: nonzero internally, rounds down to 0 MPH
        state.vehicle.speed = 0.001;
        let readout = Readout::from_state(&state, &tuning);
        assert_eq!(readout.speed, 0);
        assert_eq!(readout.gear, Gear::Neutral);
        assert!(readout.rpm_percent > 0.0);
    }
}
