//! Loading screen progress
//!
//! A fixed-length progress bar shown before the game page. Progress is a
//! pure function of elapsed time so the host only has to feed timestamps.

/// Default time the bar takes to fill (ms)
pub const DEFAULT_DURATION_MS: f64 = 10_000.0;
/// Page the loading screen hands over to
pub const DEFAULT_NEXT_PAGE: &str = "Game.html";

/// Progress at one instant
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct LoadingProgress {
    /// Bar fill, 0..=100
    pub percent: f64,
    /// Integer percentage for the label
    pub label: u32,
    /// Time is up; move on to the game
    pub finished: bool,
}

#[derive(Debug, Clone)]
pub struct LoadingScreen {
    pub duration_ms: f64,
    pub next_page: String,
    start_ms: Option<f64>,
}

impl Default for LoadingScreen {
    fn default() -> Self {
        Self::new(DEFAULT_DURATION_MS)
    }
}

impl LoadingScreen {
    pub fn new(duration_ms: f64) -> Self {
        Self {
            duration_ms,
            next_page: DEFAULT_NEXT_PAGE.to_string(),
            start_ms: None,
        }
    }

    /// Progress after `elapsed_ms`
    pub fn progress(&self, elapsed_ms: f64) -> LoadingProgress {
        let elapsed_ms = elapsed_ms.max(0.0);
        let percent = if self.duration_ms <= 0.0 {
            100.0
        } else {
            (elapsed_ms / self.duration_ms * 100.0).min(100.0)
        };
        LoadingProgress {
            percent,
            label: percent.floor() as u32,
            finished: elapsed_ms >= self.duration_ms,
        }
    }

    /// Progress for an animation-frame timestamp; the first frame seen
    /// marks the start
    pub fn frame(&mut self, timestamp_ms: f64) -> LoadingProgress {
        let start = *self.start_ms.get_or_insert(timestamp_ms);
        self.progress(timestamp_ms - start)
    }
}
