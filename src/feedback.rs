use std::io::{self, Write};
use std::sync::{Arc, Mutex, PoisonError};
use std::time::{Duration, Instant};
use tracing::debug;

/// A short feedback cue sent outward after a copy attempt.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Pulse {
    Success,
    Failure,
}

impl Pulse {
    pub fn duration(self) -> Duration {
        match self {
            Pulse::Success => Duration::from_millis(30),
            Pulse::Failure => Duration::from_millis(50),
        }
    }
}

/// Receiver of feedback pulses. Fire-and-forget: nothing is acknowledged and a
/// sink that cannot deliver simply drops the pulse.
pub trait FeedbackSink {
    fn pulse(&self, pulse: Pulse);
}

/// Used when no feedback capability exists.
#[derive(Debug, Clone, Copy, Default)]
pub struct NoFeedback;

impl FeedbackSink for NoFeedback {
    fn pulse(&self, _pulse: Pulse) {}
}

/// Terminal stand-in for a vibration motor: the status bar flashes for the
/// length of the pulse, and a failure can optionally ring the bell.
#[derive(Debug, Clone, Default)]
pub struct FlashFeedback {
    last: Arc<Mutex<Option<(Pulse, Instant)>>>,
    bell_on_failure: bool,
}

impl FlashFeedback {
    pub fn new(bell_on_failure: bool) -> Self {
        Self {
            last: Arc::default(),
            bell_on_failure,
        }
    }

    /// The pulse still being shown at `now`, if any.
    pub fn active_at(&self, now: Instant) -> Option<Pulse> {
        let last = self.last.lock().unwrap_or_else(PoisonError::into_inner);
        (*last).and_then(|(pulse, started)| {
            (now.saturating_duration_since(started) < pulse.duration()).then_some(pulse)
        })
    }

    pub fn active(&self) -> Option<Pulse> {
        self.active_at(Instant::now())
    }
}

impl FeedbackSink for FlashFeedback {
    fn pulse(&self, pulse: Pulse) {
        debug!(?pulse, duration_ms = pulse.duration().as_millis() as u64, "Feedback pulse");
        *self.last.lock().unwrap_or_else(PoisonError::into_inner) = Some((pulse, Instant::now()));

        if pulse == Pulse::Failure && self.bell_on_failure {
            let mut stdout = io::stdout();
            let _ = stdout.write_all(b"\x07").and_then(|_| stdout.flush());
        }
    }
}
