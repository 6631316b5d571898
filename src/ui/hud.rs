//! HUD text
//!
//! Turns a [`Readout`] into the exact strings the page displays.

use crate::sim::Readout;

/// Banner text for a passed car
pub const NEAR_MISS_LABEL: &str = "NEAR MISS";

#[derive(Debug, Clone, PartialEq, Eq)]
pub struct HudText {
    pub speed: String,
    /// CSS width for the RPM bar, e.g. `"40%"`
    pub rpm_width: String,
    pub gear: String,
    pub score: String,
    /// `None` hides the banner
    pub banner: Option<&'static str>,
    pub game_over: bool,
}

impl HudText {
    pub fn from_readout(readout: &Readout, show_banner: bool) -> Self {
        Self {
            speed: readout.speed.to_string(),
            rpm_width: format!("{}%", readout.rpm_percent),
            gear: readout.gear.to_string(),
            score: readout.score.to_string(),
            banner: (show_banner && readout.near_miss).then_some(NEAR_MISS_LABEL),
            game_over: readout.crashed,
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::sim::Gear;

    fn readout() -> Readout {
        Readout {
            speed: 80,
            rpm_percent: 40.0,
            gear: Gear::Drive(2),
            score: 300,
            near_miss: true,
            crashed: false,
        }
    }

    #[test]
    fn test_hud_text() {
        let hud = HudText::from_readout(&readout(), true);
        assert_eq!(hud.speed, "80");
        assert_eq!(hud.rpm_width, "40%");
        assert_eq!(hud.gear, "2");
        assert_eq!(hud.score, "300");
        assert_eq!(hud.banner, Some(NEAR_MISS_LABEL));
        assert!(!hud.game_over);
    }

    #[test]
    fn test_neutral_and_game_over() {
        let r = Readout {
            speed: 0,
            rpm_percent: 0.0,
            gear: Gear::Neutral,
            near_miss: false,
            crashed: true,
            ..readout()
        };
        let hud = HudText::from_readout(&r, true);
        assert_eq!(hud.gear, "N");
        assert_eq!(hud.rpm_width, "0%");
        assert_eq!(hud.banner, None);
        assert!(hud.game_over);
    }

    #[test]
    fn test_banner_can_be_disabled() {
        let hud = HudText::from_readout(&readout(), false);
        assert_eq!(hud.banner, None);
    }
}
