//! Transient feedback messages
//!
//! Shows a short message after each submitted answer, driven only by
//! `GameState::last_result`. Timing is passed in by the caller (ms), so
//! the same logic runs under a browser clock or a native one.

use crate::consts::FEEDBACK_DURATION_MS;
use crate::sim::LastResult;

/// A message currently on screen
#[derive(Debug, Clone, PartialEq)]
pub struct FeedbackMessage {
    pub text: &'static str,
    pub is_error: bool,
    /// Timestamp (ms) when the message appeared
    pub shown_at: f64,
}

/// Feedback message tracker
#[derive(Debug, Clone)]
pub struct Feedback {
    current: Option<FeedbackMessage>,
    duration_ms: f64,
}

impl Default for Feedback {
    fn default() -> Self {
        Self::new(FEEDBACK_DURATION_MS)
    }
}

impl Feedback {
    pub fn new(duration_ms: f64) -> Self {
        Self {
            current: None,
            duration_ms,
        }
    }

    /// React to the latest question outcome
    pub fn observe(&mut self, result: LastResult, now_ms: f64) {
        if let Some((text, is_error)) = result.message() {
            self.current = Some(FeedbackMessage {
                text,
                is_error,
                shown_at: now_ms,
            });
        }
    }

    /// Message to display at `now_ms`, expiring it once its time is up
    pub fn current(&mut self, now_ms: f64) -> Option<&FeedbackMessage> {
        let expired = self
            .current
            .as_ref()
            .is_some_and(|m| now_ms - m.shown_at >= self.duration_ms);
        if expired {
            self.current = None;
        }
        self.current.as_ref()
    }

    /// Drop any message immediately (e.g. on restart)
    pub fn clear(&mut self) {
        self.current = None;
    }
}
