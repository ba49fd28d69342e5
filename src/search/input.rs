//! Input shaping for the search runtime: query debounce and bottom-edge detection.

use std::time::Duration;

use tokio::time::Instant;

/// Coalesces rapid query edits into one value after a quiet period.
///
/// Blank text bypasses the window so clearing the field takes effect at once
/// and discards whatever was pending.
#[derive(Debug)]
pub struct QueryDebouncer {
    window: Duration,
    pending: Option<(String, Instant)>,
}

impl QueryDebouncer {
    pub fn new(window: Duration) -> Self {
        Self {
            window,
            pending: None,
        }
    }

    /// Record an edit. Returns the text when it applies immediately.
    pub fn push(&mut self, text: String, now: Instant) -> Option<String> {
        if text.trim().is_empty() || self.window.is_zero() {
            self.pending = None;
            return Some(text);
        }
        self.pending = Some((text, now + self.window));
        None
    }

    /// When the pending edit becomes due.
    pub fn deadline(&self) -> Option<Instant> {
        self.pending.as_ref().map(|(_, deadline)| *deadline)
    }

    /// Take the pending edit if its quiet period has elapsed.
    pub fn take_due(&mut self, now: Instant) -> Option<String> {
        match &self.pending {
            Some((_, deadline)) if *deadline <= now => self.pending.take().map(|(text, _)| text),
            _ => None,
        }
    }
}

/// Turns a stream of "is at bottom" samples into rising-edge events.
#[derive(Debug, Default)]
pub struct BottomEdgeDetector {
    at_bottom: bool,
}

impl BottomEdgeDetector {
    pub fn new() -> Self {
        Self::default()
    }

    /// True only when the position moves from not-at-bottom to at-bottom.
    pub fn update(&mut self, at_bottom: bool) -> bool {
        let reached = at_bottom && !self.at_bottom;
        self.at_bottom = at_bottom;
        reached
    }
}
