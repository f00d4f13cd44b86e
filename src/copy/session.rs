use super::error::CopyError;
use super::state::{CopyState, Transition};
use crate::clipboard::ClipboardWriter;
use crate::feedback::{FeedbackSink, Pulse};
use std::sync::{Arc, Mutex, MutexGuard, PoisonError};
use std::time::Duration;
use tokio::task::JoinHandle;
use tokio::time::{Instant, sleep_until};
use tracing::{debug, info, warn};

/// How long a domain stays confirmed after a successful copy.
pub const CONFIRM_WINDOW: Duration = Duration::from_millis(1500);

#[derive(Debug, Clone, PartialEq, Eq)]
pub enum CopyOutcome {
    Confirmed,
    Failed(CopyError),
}

impl CopyOutcome {
    pub fn is_confirmed(&self) -> bool {
        matches!(self, CopyOutcome::Confirmed)
    }
}

#[derive(Debug, Default)]
struct Shared {
    state: CopyState,
    next_generation: u64,
    expiry: Option<JoinHandle<()>>,
}

fn lock(shared: &Mutex<Shared>) -> MutexGuard<'_, Shared> {
    shared.lock().unwrap_or_else(PoisonError::into_inner)
}

/// Tracks the single "recently copied" domain and its expiry timer.
///
/// A successful copy replaces whatever was confirmed before, aborting the old
/// expiry task and spawning a fresh one. The expiry task carries the
/// generation it was armed for and clears the state only if that generation
/// still owns it. Dropping the manager aborts any live timer.
pub struct CopySessionManager<C, F> {
    clipboard: C,
    feedback: F,
    window: Duration,
    shared: Arc<Mutex<Shared>>,
}

impl<C, F> CopySessionManager<C, F> {
    pub fn new(clipboard: C, feedback: F) -> Self {
        Self::with_window(clipboard, feedback, CONFIRM_WINDOW)
    }

    pub fn with_window(clipboard: C, feedback: F, window: Duration) -> Self {
        Self {
            clipboard,
            feedback,
            window,
            shared: Arc::default(),
        }
    }

    pub fn is_confirmed(&self, domain: &str) -> bool {
        lock(&self.shared).state.is_confirmed(domain)
    }

    pub fn confirmed(&self) -> Option<String> {
        lock(&self.shared).state.confirmed().map(str::to_string)
    }

    /// Whether an expiry timer is currently armed.
    pub fn has_pending_expiry(&self) -> bool {
        lock(&self.shared)
            .expiry
            .as_ref()
            .is_some_and(|handle| !handle.is_finished())
    }

    /// Abort any live timer and drop the confirmation.
    pub fn shutdown(&self) {
        let mut shared = lock(&self.shared);
        if let Some(handle) = shared.expiry.take() {
            handle.abort();
        }
        shared.state = CopyState::Idle;
    }
}

impl<C: ClipboardWriter, F: FeedbackSink> CopySessionManager<C, F> {
    /// Write `domain` to the clipboard and confirm it on success.
    ///
    /// Failures leave the current confirmation untouched.
    pub async fn request_copy(&self, domain: &str) -> CopyOutcome {
        match self.clipboard.write(domain).await {
            Ok(()) => {
                self.confirm(domain);
                self.feedback.pulse(Pulse::Success);
                CopyOutcome::Confirmed
            }
            Err(err) => {
                warn!(domain, error = %err, "Copy failed");
                self.feedback.pulse(Pulse::Failure);
                CopyOutcome::Failed(err)
            }
        }
    }

    fn confirm(&self, domain: &str) {
        let mut shared = lock(&self.shared);

        if let Some(handle) = shared.expiry.take() {
            handle.abort();
        }

        shared.next_generation += 1;
        let generation = shared.next_generation;

        match shared.state.confirm(domain, generation) {
            Transition::Armed => info!(domain, "Copied"),
            Transition::Rearmed => debug!(domain, "Copied again, window restarted"),
            Transition::Superseded { previous } => {
                info!(domain, superseded = %previous, "Copied, replacing previous")
            }
        }

        let deadline = Instant::now() + self.window;
        let timer_shared = Arc::clone(&self.shared);
        shared.expiry = Some(tokio::spawn(async move {
            sleep_until(deadline).await;
            let mut shared = lock(&timer_shared);
            if shared.state.expire(generation) {
                shared.expiry = None;
                debug!(generation, "Copy confirmation expired");
            }
        }));
    }
}

impl<C, F> Drop for CopySessionManager<C, F> {
    fn drop(&mut self) {
        if let Some(handle) = lock(&self.shared).expiry.take() {
            handle.abort();
        }
    }
}
