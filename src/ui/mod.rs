//! Presentation helpers shared by the web and native hosts
//!
//! Nothing here touches the DOM directly; the host writes the results.

pub mod hud;
pub mod loading;

pub use hud::HudText;
pub use loading::{LoadingProgress, LoadingScreen};
