//! Core acquisition engine for HI-Sens telemetry nodes
//!
//! Samples a digital temperature probe and an analog AC-voltage line,
//! assembles the readings into a per-tick batch, and paces dispatch on a
//! fixed cadence. Designed for microcontroller-class targets.
//!
//! Key constraints:
//! - No heap allocation outside batch serialization
//! - Single-threaded, cooperative control flow
//! - Hardware and time behind trait seams for host-side testing
//!
//! ```no_run
//! use hisens_core::{SensorKind, Reading, TelemetryBatch};
//!
//! let mut batch = TelemetryBatch::new();
//! let reading = Reading::new(
//!     "ESP32-LAB-01",
//!     "TEMP-DS18B20",
//!     SensorKind::Temperature,
//!     23.4,
//!     "Laboratorio Real",
//! )
//! .unwrap();
//! batch.push(reading).ok();
//! let wire = batch.to_json().unwrap();
//! # let _ = wire;
//! ```

#![cfg_attr(not(feature = "std"), no_std)]
#![deny(unsafe_code)]
#![warn(missing_docs)]

#[cfg(not(feature = "std"))]
extern crate alloc;

pub mod constants;
pub mod errors;
pub mod readings;
pub mod scheduler;
pub mod sensors;
pub mod time;

// Public API
pub use errors::{SensorError, SensorResult};
pub use readings::{Reading, SensorKind, TelemetryBatch};
pub use scheduler::{Scheduler, SchedulerState};
pub use sensors::{
    AnalogSource, TemperatureProbe, TemperatureReader, VoltageSampler, VoltageSamplerConfig,
};
pub use time::{TimeSource, Timestamp};

/// Crate version string
pub const VERSION: &str = env!("CARGO_PKG_VERSION");
