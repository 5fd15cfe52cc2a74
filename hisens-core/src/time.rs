//! Time base for the acquisition loop
//!
//! Everything that measures elapsed time (the 20 ms sampling window, the
//! 5 s dispatch cadence) goes through the [`TimeSource`] trait so tests can
//! substitute synthetic clocks instead of sleeping.

/// Milliseconds since an arbitrary origin (boot for monotonic sources)
pub type Timestamp = u64;

/// Source of millisecond timestamps
pub trait TimeSource {
    /// Current timestamp in milliseconds
    fn now(&self) -> Timestamp;
}

/// Wall-clock time source backed by the OS (requires std)
#[cfg(feature = "std")]
#[derive(Debug, Clone, Copy, Default)]
pub struct SystemTime;

#[cfg(feature = "std")]
impl TimeSource for SystemTime {
    fn now(&self) -> Timestamp {
        use std::time::{SystemTime as StdSystemTime, UNIX_EPOCH};

        StdSystemTime::now()
            .duration_since(UNIX_EPOCH)
            .unwrap_or_default()
            .as_millis() as Timestamp
    }
}

/// Manually-driven time source for testing
#[derive(Debug, Clone)]
pub struct FixedTime {
    timestamp: Timestamp,
}

impl FixedTime {
    /// Clock frozen at `timestamp`
    pub fn new(timestamp: Timestamp) -> Self {
        Self { timestamp }
    }

    /// Jump to an absolute timestamp
    pub fn set(&mut self, timestamp: Timestamp) {
        self.timestamp = timestamp;
    }

    /// Move the clock forward
    pub fn advance(&mut self, ms: u64) {
        self.timestamp += ms;
    }
}

impl TimeSource for FixedTime {
    fn now(&self) -> Timestamp {
        self.timestamp
    }
}

/// Time source that advances by a fixed step on every read
///
/// Lets bounded polling loops (the voltage scan) run to completion
/// instantly in tests: each observation of the clock moves it forward.
#[derive(Debug)]
pub struct SteppingTime {
    now: core::cell::Cell<Timestamp>,
    step_ms: u64,
}

impl SteppingTime {
    /// Clock starting at `start`, advancing `step_ms` per read
    pub fn new(start: Timestamp, step_ms: u64) -> Self {
        Self {
            now: core::cell::Cell::new(start),
            step_ms,
        }
    }
}

impl TimeSource for SteppingTime {
    fn now(&self) -> Timestamp {
        let current = self.now.get();
        self.now.set(current + self.step_ms);
        current
    }
}
