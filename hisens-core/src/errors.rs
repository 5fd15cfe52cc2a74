//! Error types for sensor acquisition
//!
//! Kept small and Copy, in line with the rest of the core: errors are
//! produced once per tick at most and are always recovered locally by
//! dropping the affected reading.

use thiserror_no_std::Error;

/// Result type for sensor operations
pub type SensorResult<T> = Result<T, SensorError>;

/// Faults raised while acquiring a sensor reading
#[derive(Error, Debug, Clone, Copy, PartialEq)]
pub enum SensorError {
    /// The digital probe reported its fault sentinel instead of a
    /// measurement (conversion error, probe absent, or wiring fault)
    #[error("temperature conversion failed: probe returned fault sentinel")]
    ConversionFailed,

    /// The probe returned a value that is not a number
    #[error("temperature conversion produced a non-finite value")]
    InvalidValue,
}
