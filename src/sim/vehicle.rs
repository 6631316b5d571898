//! Player car kinematics
//!
//! The car never moves longitudinally in world space; the road (traffic)
//! comes to it. Only speed and lateral offset are integrated.

use glam::DVec2;
use serde::{Deserialize, Serialize};

use super::input::{Control, InputState};
use crate::tuning::Tuning;

/// The player's car
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
pub struct Vehicle {
    /// Forward speed, always within [0, max_speed]
    pub speed: f64,
    /// Lateral offset from the road centre (positive = left)
    pub lateral: f64,
    /// Body roll for rendering (radians)
    pub roll: f64,
    /// Nose pitch for rendering (radians)
    pub pitch: f64,
}

impl Vehicle {
    /// Position in the (lateral, longitudinal) plane
    #[inline]
    pub fn position(&self) -> DVec2 {
        DVec2::new(self.lateral, 0.0)
    }

    /// Advance speed and lateral offset by one tick
    pub fn integrate(&mut self, input: &InputState, tuning: &Tuning) {
        if input.is_held(Control::Accelerate) {
            self.speed += tuning.acceleration;
        } else {
            self.speed *= tuning.friction;
        }
        self.speed = self.speed.clamp(0.0, tuning.max_speed);

        let left = input.is_held(Control::SteerLeft);
        let right = input.is_held(Control::SteerRight);
        if left {
            self.lateral += tuning.steer_step;
        }
        if right {
            self.lateral -= tuning.steer_step;
        }
        self.lateral = self
            .lateral
            .clamp(-tuning.lateral_bound, tuning.lateral_bound);

        // Cosmetic only
        let roll_left = if left { -tuning.steer_tilt } else { 0.0 };
        let roll_right = if right { tuning.steer_tilt } else { 0.0 };
        self.roll = roll_left + roll_right;
        self.pitch = self.speed * tuning.pitch_factor;
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use proptest::prelude::*;

    #[test]
    fn test_accelerate_from_rest() {
        let tuning = Tuning::default();
        let mut car = Vehicle::default();
        let input = InputState::with(&[Control::Accelerate]);

        for _ in 0..50 {
            car.integrate(&input, &tuning);
        }
        assert!((car.speed - 1.0).abs() < 1e-9);
        assert!((car.pitch - 0.05).abs() < 1e-9);
    }

    #[test]
    fn test_speed_clamped_to_max() {
        let tuning = Tuning::default();
        let mut car = Vehicle::default();
        let input = InputState::with(&[Control::Accelerate]);

        for _ in 0..1000 {
            car.integrate(&input, &tuning);
        }
        assert_eq!(car.speed, tuning.max_speed);
    }

    #[test]
    fn test_friction_decays_geometrically() {
        let tuning = Tuning::default();
        let mut car = Vehicle {
            speed: 2.0,
            ..Default::default()
        };
        let idle = InputState::default();

        let mut prev = car.speed;
        for _ in 0..10 {
            car.integrate(&idle, &tuning);
            assert!(car.speed < prev);
            assert!((car.speed - prev * tuning.friction).abs() < 1e-12);
            prev = car.speed;
        }

        // 0.98^n * 2.0 < 1e-3 well within a thousand ticks
        for _ in 0..1000 {
            car.integrate(&idle, &tuning);
            assert!(car.speed >= 0.0);
        }
        assert!(car.speed < 1e-3);
    }

    #[test]
    fn test_brake_has_no_effect_beyond_friction() {
        let tuning = Tuning::default();
        let mut braking = Vehicle {
            speed: 1.5,
            ..Default::default()
        };
        let mut coasting = braking.clone();

        braking.integrate(&InputState::with(&[Control::Brake]), &tuning);
        coasting.integrate(&InputState::default(), &tuning);
        assert_eq!(braking.speed, coasting.speed);
    }

    #[test]
    fn test_steering_and_bounds() {
        let tuning = Tuning::default();
        let mut car = Vehicle::default();

        car.integrate(&InputState::with(&[Control::SteerLeft]), &tuning);
        assert!((car.lateral - 0.15).abs() < 1e-12);
        assert_eq!(car.roll, -tuning.steer_tilt);

        for _ in 0..100 {
            car.integrate(&InputState::with(&[Control::SteerLeft]), &tuning);
        }
        assert_eq!(car.lateral, tuning.lateral_bound);

        for _ in 0..200 {
            car.integrate(&InputState::with(&[Control::SteerRight]), &tuning);
        }
        assert_eq!(car.lateral, -tuning.lateral_bound);
        assert_eq!(car.roll, tuning.steer_tilt);
    }

    #[test]
    fn test_both_steering_keys_cancel() {
        let tuning = Tuning::default();
        let mut car = Vehicle {
            lateral: 1.0,
            ..Default::default()
        };
        car.integrate(
            &InputState::with(&[Control::SteerLeft, Control::SteerRight]),
            &tuning,
        );
        assert!((car.lateral - 1.0).abs() < 1e-12);
        assert_eq!(car.roll, 0.0);
    }

    proptest! {
        #[test]
        fn prop_state_stays_bounded(
            start_speed in 0.0f64..=2.5,
            start_lateral in -5.0f64..=5.0,
            inputs in proptest::collection::vec(any::<[bool; 4]>(), 1..200),
        ) {
            let tuning = Tuning::default();
            let mut car = Vehicle {
                speed: start_speed,
                lateral: start_lateral,
                ..Default::default()
            };

            for flags in inputs {
                let mut input = InputState::default();
                for (control, held) in Control::ALL.into_iter().zip(flags) {
                    input.set(control, held);
                }
                car.integrate(&input, &tuning);

                prop_assert!(car.speed >= 0.0 && car.speed <= tuning.max_speed);
                prop_assert!(car.lateral.abs() <= tuning.lateral_bound);
            }
        }
    }
}
