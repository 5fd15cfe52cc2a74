//! Fixed-cadence dispatch scheduling
//!
//! Two-state machine driving the acquire-and-send cycle: `Idle` while
//! waiting out the interval, `Dispatching` for the duration of one tick's
//! work. There is no terminal state; the loop runs for the life of the
//! process, and a tick ends in `Idle` whether dispatch succeeded or not.
//!
//! The scheduler owns only the cadence. Servicing the transport's liveness
//! happens in the run loop on every iteration, independent of tick
//! boundaries, so a quiet interval never starves the connection.

use crate::constants::DISPATCH_INTERVAL_MS;
use crate::time::{TimeSource, Timestamp};

/// Scheduler phase
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum SchedulerState {
    /// Waiting for the next tick boundary
    Idle,
    /// One tick's acquisition-and-send attempt is in flight
    Dispatching,
}

/// Fixed-interval tick source
///
/// The last-dispatch timestamp lives here rather than in a process-wide
/// global, so independent instances can coexist under test.
#[derive(Debug)]
pub struct Scheduler<T: TimeSource> {
    clock: T,
    interval_ms: u64,
    last_dispatch: Timestamp,
    state: SchedulerState,
}

impl<T: TimeSource> Scheduler<T> {
    /// Create a scheduler with the default 5 s cadence
    ///
    /// The first tick fires one full interval after construction, matching
    /// the node's boot behavior.
    pub fn new(clock: T) -> Self {
        Self::with_interval(clock, DISPATCH_INTERVAL_MS)
    }

    /// Create a scheduler with an explicit cadence
    pub fn with_interval(clock: T, interval_ms: u64) -> Self {
        let last_dispatch = clock.now();
        Self {
            clock,
            interval_ms,
            last_dispatch,
            state: SchedulerState::Idle,
        }
    }

    /// Current phase
    pub fn state(&self) -> SchedulerState {
        self.state
    }

    /// Check the tick boundary; transitions `Idle -> Dispatching` when the
    /// interval has elapsed and stamps the new dispatch time
    ///
    /// Returns true when the caller should run one acquisition-and-send
    /// cycle, then call [`complete`](Self::complete).
    pub fn poll(&mut self) -> bool {
        if self.state != SchedulerState::Idle {
            return false;
        }
        let now = self.clock.now();
        if now.saturating_sub(self.last_dispatch) <= self.interval_ms {
            return false;
        }
        self.last_dispatch = now;
        self.state = SchedulerState::Dispatching;
        true
    }

    /// End the current tick, success or failure; transitions back to `Idle`
    pub fn complete(&mut self) {
        self.state = SchedulerState::Idle;
    }
}
