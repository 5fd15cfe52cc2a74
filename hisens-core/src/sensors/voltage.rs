//! Time-boxed AC voltage estimation
//!
//! Scans the analog line for one full 50 Hz cycle (20 ms), tracks the raw
//! min/max swing, and maps peak-to-peak to an RMS-equivalent line voltage
//! through a hand-calibrated sensitivity factor:
//!
//! ```text
//! volts = peak_to_peak / SENSITIVITY * 220.0
//! ```
//!
//! This is deliberately not a true RMS integral. The ZMPT101 module is
//! calibrated (trimpot plus [`SENSITIVITY`](crate::constants::SENSITIVITY))
//! against a reference meter with exactly this formula; substituting a
//! mathematically correct one would invalidate the calibration. Swings
//! below the noise floor report 0.0 V so an idle line does not produce
//! phantom readings.
//!
//! The scan busy-polls for the whole window by design. The window is
//! bounded by an injected [`TimeSource`] so tests complete instantly with
//! a synthetic clock.

use crate::constants::{MAINS_REFERENCE_VOLTS, NOISE_FLOOR_RAW, SAMPLE_WINDOW_MS, SENSITIVITY};
use crate::time::TimeSource;

/// Hardware seam for the raw analog input line (12-bit ADC reads)
pub trait AnalogSource {
    /// One raw ADC read of the line
    fn read_raw(&mut self) -> u16;
}

/// Calibration knobs for the sampler
///
/// Defaults are the deployed node's hand-tuned values; they are knobs,
/// not derived quantities.
#[derive(Debug, Clone, Copy)]
pub struct VoltageSamplerConfig {
    /// Scan window length in milliseconds
    pub window_ms: u64,
    /// Raw swing below which the line reads as 0.0 V
    pub noise_floor_raw: u16,
    /// Raw-swing-to-volts scale factor
    pub sensitivity: f64,
    /// Nominal mains voltage the sensitivity was calibrated at
    pub reference_volts: f64,
}

impl Default for VoltageSamplerConfig {
    fn default() -> Self {
        Self {
            window_ms: SAMPLE_WINDOW_MS,
            noise_floor_raw: NOISE_FLOOR_RAW,
            sensitivity: SENSITIVITY,
            reference_volts: MAINS_REFERENCE_VOLTS,
        }
    }
}

/// Peak-to-peak waveform scanner over an [`AnalogSource`]
#[derive(Debug)]
pub struct VoltageSampler<A: AnalogSource, T: TimeSource> {
    line: A,
    clock: T,
    config: VoltageSamplerConfig,
}

impl<A: AnalogSource, T: TimeSource> VoltageSampler<A, T> {
    /// Sampler with the deployed calibration defaults
    pub fn new(line: A, clock: T) -> Self {
        Self::with_config(line, clock, VoltageSamplerConfig::default())
    }

    /// Sampler with explicit calibration
    pub fn with_config(line: A, clock: T, config: VoltageSamplerConfig) -> Self {
        Self {
            line,
            clock,
            config,
        }
    }

    /// Scan the line for one window and estimate the RMS-equivalent voltage
    ///
    /// Blocks the calling thread for the full window. Always reads the
    /// line at least once and always returns a value; 0.0 means no signal.
    pub fn sample(&mut self) -> f64 {
        let start = self.clock.now();
        let first = self.line.read_raw();
        let mut min = first;
        let mut max = first;

        while self.clock.now().saturating_sub(start) < self.config.window_ms {
            let raw = self.line.read_raw();
            if raw > max {
                max = raw;
            }
            if raw < min {
                min = raw;
            }
        }

        estimate_from_swing(max - min, &self.config)
    }
}

/// Map a raw peak-to-peak swing to volts per the calibration formula
pub fn estimate_from_swing(peak_to_peak: u16, config: &VoltageSamplerConfig) -> f64 {
    if peak_to_peak < config.noise_floor_raw {
        return 0.0;
    }
    f64::from(peak_to_peak) / config.sensitivity * config.reference_volts
}
