//! Simulated hardware drivers for host runs
//!
//! The deployed node talks to a DS18B20 on the digital bus and a ZMPT101
//! on the analog line. On a workstation there is neither, so these
//! drivers synthesize plausible signals: ambient temperature drifting
//! through the 20-25 °C band and a mains waveform whose swing lands on
//! the 220 V calibration point. Deterministic counters, no randomness,
//! so agent runs are reproducible.

use hisens_core::{AnalogSource, TemperatureProbe};

/// Ambient temperature walking the 20-25 °C band
#[derive(Debug, Default)]
pub struct SimProbe {
    counter: u32,
}

impl TemperatureProbe for SimProbe {
    fn convert(&mut self) -> f64 {
        self.counter += 1;
        20.0 + f64::from(self.counter % 100) * 0.05
    }
}

/// Mains waveform centered on mid-scale with a 580-count swing
///
/// Coarse four-point cycle; the sampler only cares about the extremes.
#[derive(Debug, Default)]
pub struct SimMainsLine {
    phase: usize,
}

impl AnalogSource for SimMainsLine {
    fn read_raw(&mut self) -> u16 {
        const CYCLE: [u16; 4] = [2048, 2338, 2048, 1758];
        let raw = CYCLE[self.phase % CYCLE.len()];
        self.phase += 1;
        raw
    }
}
