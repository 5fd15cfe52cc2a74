//! Single-shot digital temperature acquisition
//!
//! The DS18B20 family signals a failed conversion in-band: the driver
//! returns -127 °C instead of raising an error. That sentinel is checked
//! here, once, and surfaced as an explicit [`SensorError`] so the rest of
//! the pipeline never compares against the magic number.

use crate::constants::TEMP_FAULT_SENTINEL_C;
use crate::errors::{SensorError, SensorResult};

/// Hardware seam for a single-shot digital temperature probe
///
/// `convert` triggers one conversion cycle and returns the first device's
/// value in °C, or the fault sentinel when the conversion failed.
pub trait TemperatureProbe {
    /// Trigger one conversion and return the result in °C
    fn convert(&mut self) -> f64;
}

/// Validating front-end over a [`TemperatureProbe`]
#[derive(Debug)]
pub struct TemperatureReader<P: TemperatureProbe> {
    probe: P,
}

impl<P: TemperatureProbe> TemperatureReader<P> {
    /// Wrap a probe
    pub fn new(probe: P) -> Self {
        Self { probe }
    }

    /// Run one conversion and validate the result
    ///
    /// Fails with [`SensorError::ConversionFailed`] on the fault sentinel;
    /// the caller skips the temperature reading for that tick. No retry is
    /// attempted within a tick.
    pub fn read_celsius(&mut self) -> SensorResult<f64> {
        let celsius = self.probe.convert();
        if !celsius.is_finite() {
            return Err(SensorError::InvalidValue);
        }
        if celsius == TEMP_FAULT_SENTINEL_C {
            return Err(SensorError::ConversionFailed);
        }
        Ok(celsius)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    struct ScriptedProbe {
        values: heapless::Vec<f64, 4>,
        next: usize,
    }

    impl ScriptedProbe {
        fn new(values: &[f64]) -> Self {
            Self {
                values: heapless::Vec::from_slice(values).unwrap(),
                next: 0,
            }
        }
    }

    impl TemperatureProbe for ScriptedProbe {
        fn convert(&mut self) -> f64 {
            let value = self.values[self.next];
            self.next += 1;
            value
        }
    }

    #[test]
    fn valid_conversion_passes_through() {
        let mut reader = TemperatureReader::new(ScriptedProbe::new(&[23.4]));
        assert_eq!(reader.read_celsius(), Ok(23.4));
    }

    #[test]
    fn sentinel_becomes_sensor_error() {
        let mut reader = TemperatureReader::new(ScriptedProbe::new(&[-127.0]));
        assert_eq!(reader.read_celsius(), Err(SensorError::ConversionFailed));
    }

    #[test]
    fn fault_is_per_conversion_not_sticky() {
        let mut reader = TemperatureReader::new(ScriptedProbe::new(&[-127.0, 21.5]));
        assert!(reader.read_celsius().is_err());
        assert_eq!(reader.read_celsius(), Ok(21.5));
    }

    #[test]
    fn nan_is_rejected() {
        let mut reader = TemperatureReader::new(ScriptedProbe::new(&[f64::NAN]));
        assert_eq!(reader.read_celsius(), Err(SensorError::InvalidValue));
    }
}
