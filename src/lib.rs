//! Highway Dodge - An arcade lane-dodging driving game
//!
//! Core modules:
//! - `sim`: Deterministic simulation (kinematics, traffic, collisions, game state)
//! - `tuning`: Data-driven game balance
//! - `settings`: Player preferences (key bindings, comfort options)
//! - `ui`: HUD text and loading screen progress

pub mod settings;
pub mod sim;
pub mod tuning;
pub mod ui;

pub use settings::{CarPose, Settings};
pub use tuning::{Tuning, TuningError};

/// Game configuration constants
///
/// Distances are in world units, rates are per tick. One tick is one
/// rendered frame.
pub mod consts {
    /// Top speed of the player car
    pub const MAX_SPEED: f64 = 2.5;
    /// Speed gained per tick while accelerating
    pub const ACCELERATION: f64 = 0.02;
    /// Multiplicative speed decay per tick when not accelerating
    pub const FRICTION: f64 = 0.98;

    /// Lateral movement per tick while a steering key is held
    pub const STEER_STEP: f64 = 0.15;
    /// Player may not leave [-LATERAL_BOUND, LATERAL_BOUND]
    pub const LATERAL_BOUND: f64 = 5.0;
    /// Distance between adjacent lane centres
    pub const LANE_SPACING: f64 = 3.0;

    /// Spawn probability per tick per unit of player speed
    pub const SPAWN_RATE: f64 = 0.02;
    /// Traffic spawns this far ahead of the player
    pub const SPAWN_DISTANCE: f64 = 100.0;
    /// Traffic approach per tick when the player is stopped
    pub const TRAFFIC_BASE_STEP: f64 = 0.5;
    /// Extra traffic approach per tick per unit of player speed
    pub const TRAFFIC_SPEED_FACTOR: f64 = 2.0;
    /// Traffic behind this distance has been passed
    pub const RECYCLE_THRESHOLD: f64 = -20.0;
    /// Cap on simultaneously active traffic
    pub const MAX_TRAFFIC: usize = 32;

    /// Centre-to-centre distance below which cars collide
    pub const COLLISION_DISTANCE: f64 = 2.5;

    /// Score for each car passed
    pub const NEAR_MISS_REWARD: u64 = 100;
    /// How long the near-miss banner stays up (~500 ms at 60 fps)
    pub const NEAR_MISS_TICKS: u32 = 30;

    /// Internal speed to displayed MPH
    pub const SPEED_DISPLAY_SCALE: f64 = 80.0;
    /// Displayed MPH per gear
    pub const GEAR_BAND: u32 = 40;

    /// Body roll while steering (radians)
    pub const STEER_TILT: f64 = 0.05;
    /// Nose pitch per unit of speed (radians)
    pub const PITCH_FACTOR: f64 = 0.05;
}
