//! Player preferences
//!
//! Read from LocalStorage, separately from tuning. The page writes them.

use serde::{Deserialize, Serialize};

use crate::sim::{KeyBindings, Vehicle};

/// Player preferences
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct Settings {
    /// Key code to control mapping
    pub controls: KeyBindings,

    // === HUD ===
    /// Flash "NEAR MISS" when a car is passed
    pub near_miss_banner: bool,

    // === Loading ===
    /// Loading screen duration (ms)
    pub loading_duration_ms: f64,

    // === Accessibility ===
    /// Reduced motion (no body roll or nose pitch)
    pub reduced_motion: bool,
}

impl Default for Settings {
    fn default() -> Self {
        Self {
            controls: KeyBindings::default(),
            near_miss_banner: true,
            loading_duration_ms: crate::ui::loading::DEFAULT_DURATION_MS,
            reduced_motion: false,
        }
    }
}

/// Where and how to draw the player's car this frame
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub struct CarPose {
    pub lateral: f64,
    pub roll: f64,
    pub pitch: f64,
}

impl Settings {
    /// Pose to render for `vehicle`; reduced motion keeps the car level
    pub fn car_pose(&self, vehicle: &Vehicle) -> CarPose {
        let (roll, pitch) = if self.reduced_motion {
            (0.0, 0.0)
        } else {
            (vehicle.roll, vehicle.pitch)
        };
        CarPose {
            lateral: vehicle.lateral,
            roll,
            pitch,
        }
    }

    /// Parse settings JSON, falling back to defaults for anything unreadable
    pub fn from_json_or_default(json: &str) -> Self {
        match serde_json::from_str(json) {
            Ok(settings) => settings,
            Err(e) => {
                log::warn!("Ignoring unreadable settings: {e}");
                Self::default()
            }
        }
    }

    /// LocalStorage key (used only in wasm32)
    #[allow(dead_code)]
    const STORAGE_KEY: &'static str = "highway_dodge_settings";

    /// Load settings from LocalStorage (WASM only)
    #[cfg(target_arch = "wasm32")]
    pub fn load() -> Self {
        let storage = web_sys::window()
            .and_then(|w| w.local_storage().ok())
            .flatten();

        if let Some(storage) = storage {
            if let Ok(Some(json)) = storage.get_item(Self::STORAGE_KEY) {
                log::info!("Loaded settings from LocalStorage");
                return Self::from_json_or_default(&json);
            }
        }

        log::info!("Using default settings");
        Self::default()
    }

    /// Native stub
    #[cfg(not(target_arch = "wasm32"))]
    pub fn load() -> Self {
        Self::default()
    }
}
