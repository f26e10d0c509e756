//! Input controller: debounced conversion with listener fan-out.
//!
//! Owns the raw input text and a single armed deadline. New input replaces
//! the deadline, which *is* the cancellation of the previous one. No timer
//! task exists to race, so a superseded keystroke can never fire.
//!
//! State machine: Idle → Pending (deadline armed) → Settled (result
//! published), re-entering Pending on any new input, including from Pending.

use std::time::{Duration, Instant};

use crate::convert::{ConversionResult, decode};

#[cfg(test)]
mod tests;

/// Quiet period after the last input before conversion runs.
pub const DEBOUNCE_MS: u64 = 150;

/// Callback invoked synchronously when a ConversionResult is published.
pub type Listener = Box<dyn FnMut(&ConversionResult) + Send>;

/// Debounced input controller.
///
/// Pure timing and state: no terminal output, no host calls. The driving
/// loop races new input against [`sleep_duration`](Self::sleep_duration) and
/// calls [`take_if_ready`](Self::take_if_ready) when the sleep wins.
pub struct InputController {
    /// Current raw input (most recent keystroke/event wins)
    raw: String,
    /// Armed deadline; `Some` means Pending, `None` means Idle/Settled
    last_input: Option<Instant>,
    /// Most recently published result
    settled: Option<ConversionResult>,
    /// Copy acknowledgment, cleared on any new input
    copied: bool,
    listeners: Vec<Listener>,
    debounce: Duration,
}

impl InputController {
    pub fn new() -> Self {
        Self::with_debounce(Duration::from_millis(DEBOUNCE_MS))
    }

    pub fn with_debounce(debounce: Duration) -> Self {
        Self {
            raw: String::new(),
            last_input: None,
            settled: None,
            copied: false,
            listeners: Vec::new(),
            debounce,
        }
    }

    /// Register a listener; all listeners are notified synchronously, in
    /// registration order, each time a result is published.
    pub fn subscribe(&mut self, listener: Listener) {
        self.listeners.push(listener);
    }

    /// Accept new input: store it, clear the copy acknowledgment and re-arm
    /// the deadline (canceling any pending conversion).
    pub fn on_input(&mut self, text: impl Into<String>) {
        self.raw = text.into();
        self.copied = false;
        self.last_input = Some(Instant::now());
    }

    /// Whether a deadline is armed (Pending state).
    pub fn is_pending(&self) -> bool {
        self.last_input.is_some()
    }

    /// Whether the quiet period has elapsed for the armed deadline.
    pub fn is_ready(&self) -> bool {
        let Some(last_input) = self.last_input else {
            return false;
        };
        last_input.elapsed() >= self.debounce
    }

    /// Convert and publish if the quiet period has elapsed.
    ///
    /// Decodes the raw input as it is *now*; since input and deadline are
    /// replaced together, this is exactly the value captured at arming time.
    pub fn take_if_ready(&mut self) -> Option<&ConversionResult> {
        if !self.is_ready() {
            return None;
        }
        self.last_input = None;

        let result = decode(&self.raw);
        for listener in &mut self.listeners {
            listener(&result);
        }
        self.settled = Some(result);
        self.settled.as_ref()
    }

    /// Precise sleep until the armed deadline, for the driving select loop.
    pub fn sleep_duration(&self) -> Duration {
        let Some(last_input) = self.last_input else {
            return Duration::from_secs(86400);
        };
        self.debounce
            .saturating_sub(last_input.elapsed())
            .max(Duration::from_millis(1))
    }

    /// The most recently published result, if any.
    pub fn result(&self) -> Option<&ConversionResult> {
        self.settled.as_ref()
    }

    /// Acknowledge a successful clipboard copy. No-op unless a Success
    /// result is live (copy only acts on settled markup).
    pub fn mark_copied(&mut self) {
        if matches!(self.settled, Some(Ok(_))) {
            self.copied = true;
        }
    }

    pub fn copied(&self) -> bool {
        self.copied
    }

    /// Drop any pending conversion so nothing fires after the consumer is
    /// gone.
    pub fn dispose(&mut self) {
        self.last_input = None;
    }
}

impl Default for InputController {
    fn default() -> Self {
        Self::new()
    }
}
