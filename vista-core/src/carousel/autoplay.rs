//! Autoplay timer ownership.
//!
//! `Autoplay` is either off, or on while holding the handle of the one
//! running timer. The "enabled" flag is derived from the variant, so the flag
//! and the timer cannot disagree.

use std::fmt;
use std::sync::atomic::{AtomicU64, Ordering};
use std::sync::{Arc, Mutex};
use std::time::Duration;

use tokio_util::sync::CancellationToken;
use tracing::debug;

/// Identity of one started autoplay timer. Unique for the lifetime of the
/// process so ticks from a torn-down timer can never match a newer one.
#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Hash)]
pub struct TimerId(u64);

impl TimerId {
    pub(crate) fn next() -> Self {
        static NEXT: AtomicU64 = AtomicU64::new(1);
        TimerId(NEXT.fetch_add(1, Ordering::Relaxed))
    }

    pub fn get(self) -> u64 {
        self.0
    }
}

impl fmt::Display for TimerId {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "timer#{}", self.0)
    }
}

/// Owning handle to a running repeating timer. Cancelling is idempotent, and
/// dropping the handle cancels the timer.
#[derive(Debug)]
pub struct TimerHandle {
    id: TimerId,
    token: CancellationToken,
}

impl TimerHandle {
    pub fn new(id: TimerId, token: CancellationToken) -> Self {
        Self { id, token }
    }

    pub fn id(&self) -> TimerId {
        self.id
    }

    pub fn cancel(&self) {
        self.token.cancel();
    }

    pub fn is_cancelled(&self) -> bool {
        self.token.is_cancelled()
    }
}

impl Drop for TimerHandle {
    fn drop(&mut self) {
        self.token.cancel();
    }
}

/// Host-side timer facility. Implementations start a repeating timer that
/// delivers `CarouselMessage::AutoplayTick(id)` every `interval` until the
/// returned handle is cancelled. The first tick arrives one full interval
/// after `start`.
pub trait TickScheduler: Send + fmt::Debug {
    fn start(&mut self, id: TimerId, interval: Duration) -> TimerHandle;
}

/// Autoplay on/off state.
#[derive(Debug, Default)]
pub enum Autoplay {
    #[default]
    Off,
    On(TimerHandle),
}

impl Autoplay {
    pub fn is_enabled(&self) -> bool {
        matches!(self, Autoplay::On(_))
    }

    pub fn timer_id(&self) -> Option<TimerId> {
        match self {
            Autoplay::Off => None,
            Autoplay::On(handle) => Some(handle.id()),
        }
    }
}

/// Single repeating timer that requests "advance to next" at a fixed
/// cadence. Restartable and cancelable; at most one timer is ever live.
#[derive(Debug)]
pub struct AutoplayScheduler {
    scheduler: Box<dyn TickScheduler>,
    interval: Duration,
    state: Autoplay,
}

impl AutoplayScheduler {
    pub fn new(scheduler: Box<dyn TickScheduler>, interval: Duration) -> Self {
        Self {
            scheduler,
            interval,
            state: Autoplay::Off,
        }
    }

    pub fn is_enabled(&self) -> bool {
        self.state.is_enabled()
    }

    pub fn state(&self) -> &Autoplay {
        &self.state
    }

    pub fn interval(&self) -> Duration {
        self.interval
    }

    /// (Re)start from zero elapsed time. Any previous timer is torn down
    /// before the new one is created.
    pub fn start(&mut self) -> TimerId {
        self.stop();
        let id = TimerId::next();
        let handle = self.scheduler.start(id, self.interval);
        debug!(%id, interval_ms = self.interval.as_millis() as u64, "autoplay started");
        self.state = Autoplay::On(handle);
        id
    }

    /// Cancel the running timer, if any. Safe to call when already off.
    pub fn stop(&mut self) {
        if let Autoplay::On(handle) = std::mem::take(&mut self.state) {
            handle.cancel();
            debug!(id = %handle.id(), "autoplay stopped");
        }
    }

    /// Whether a tick from `id` belongs to the live timer.
    pub fn accepts(&self, id: TimerId) -> bool {
        self.state.timer_id() == Some(id)
    }
}

/// Scheduler that never fires on its own. Tests and custom hosts deliver
/// ticks by hand and inspect which timers were started or cancelled.
#[derive(Debug, Clone, Default)]
pub struct ManualTickScheduler {
    timers: Arc<Mutex<Vec<(TimerId, CancellationToken)>>>,
}

impl ManualTickScheduler {
    pub fn new() -> Self {
        Self::default()
    }

    /// Every timer ever started, oldest first.
    pub fn started(&self) -> Vec<TimerId> {
        self.with_timers(|timers| timers.iter().map(|(id, _)| *id).collect())
    }

    /// Timers that are still running.
    pub fn active(&self) -> Vec<TimerId> {
        self.with_timers(|timers| {
            timers
                .iter()
                .filter(|(_, token)| !token.is_cancelled())
                .map(|(id, _)| *id)
                .collect()
        })
    }

    pub fn active_count(&self) -> usize {
        self.active().len()
    }

    fn with_timers<T>(
        &self,
        f: impl FnOnce(&mut Vec<(TimerId, CancellationToken)>) -> T,
    ) -> T {
        let mut guard = self
            .timers
            .lock()
            .unwrap_or_else(|poisoned| poisoned.into_inner());
        f(&mut guard)
    }
}

impl TickScheduler for ManualTickScheduler {
    fn start(&mut self, id: TimerId, _interval: Duration) -> TimerHandle {
        let token = CancellationToken::new();
        self.with_timers(|timers| timers.push((id, token.clone())));
        TimerHandle::new(id, token)
    }
}
