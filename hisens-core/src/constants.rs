//! Tuning constants for the acquisition pipeline
//!
//! The voltage constants are hand-calibrated against a reference meter on
//! the deployed ZMPT101 module, not derived analytically. Changing the
//! formula they feed (peak-to-peak / sensitivity * mains reference) would
//! invalidate the calibration, so they are exposed as named overridables
//! rather than folded into a "corrected" RMS computation.

/// Sentinel the DS18B20 driver reports for a failed conversion, in °C
pub const TEMP_FAULT_SENTINEL_C: f64 = -127.0;

/// Length of the analog scan window, in milliseconds
///
/// One full cycle of a 50 Hz mains waveform.
pub const SAMPLE_WINDOW_MS: u64 = 20;

/// Raw peak-to-peak swing below which the line is treated as carrying
/// no signal (ADC noise)
pub const NOISE_FLOOR_RAW: u16 = 30;

/// Calibrated scale factor mapping raw peak-to-peak swing to
/// RMS-equivalent volts. Tune against a multimeter: if the node reads
/// low, raise it.
pub const SENSITIVITY: f64 = 580.0;

/// Nominal mains voltage the sensitivity factor was calibrated at
pub const MAINS_REFERENCE_VOLTS: f64 = 220.0;

/// Default dispatch cadence, in milliseconds
pub const DISPATCH_INTERVAL_MS: u64 = 5000;

/// Capacity of an id field (`id_nodo`, `id_sensor`) on the wire
pub const MAX_ID_LEN: usize = 32;

/// Capacity of the free-text `ubicacion` field
pub const MAX_LOCATION_LEN: usize = 48;

/// Maximum readings per batch (one per sensor kind today, with headroom)
pub const MAX_BATCH_READINGS: usize = 8;
