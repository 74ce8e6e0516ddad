//! Deadline-based debounce gate for "text changed" intents.

use std::time::{Duration, Instant};

#[derive(Clone, Debug)]
struct Pending {
    text: String,
    deadline: Instant,
}

/// Coalesces rapid text changes so only the settled value is sent upstream.
///
/// The gate holds no timer resource: it stores a deadline and the integration
/// layer polls [`DebounceGate::fire_due`] from its tick loop with the current
/// time. Each [`DebounceGate::schedule`] replaces any pending entry, so a
/// burst of N schedules spaced closer than the delay yields exactly one fired
/// text, the last one. One gate per widget instance; dropping the instance
/// drops the gate, which is how a pending deadline is prevented from firing
/// against an unmounted widget.
#[derive(Clone, Debug, Default)]
pub struct DebounceGate {
    pending: Option<Pending>,
}

impl DebounceGate {
    pub fn new() -> Self {
        Self::default()
    }

    /// Schedule `text` to fire once `delay` has elapsed from `now`,
    /// cancelling any previously pending text.
    pub fn schedule(&mut self, text: String, now: Instant, delay: Duration) {
        self.pending = Some(Pending {
            text,
            deadline: now + delay,
        });
    }

    /// Drop any pending text without firing it.
    pub fn cancel(&mut self) {
        self.pending = None;
    }

    pub fn is_pending(&self) -> bool {
        self.pending.is_some()
    }

    /// Take the pending text if its quiet period has elapsed.
    ///
    /// Returns `None` while the deadline is still in the future or when
    /// nothing is pending; a fired text is never returned twice.
    pub fn fire_due(&mut self, now: Instant) -> Option<String> {
        if self.pending.as_ref().is_some_and(|p| now >= p.deadline) {
            return self.pending.take().map(|p| p.text);
        }
        None
    }
}
