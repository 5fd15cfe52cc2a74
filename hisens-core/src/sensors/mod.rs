//! Sensor acquisition front-ends
//!
//! Each sensor wraps a hardware seam trait ([`TemperatureProbe`],
//! [`AnalogSource`]) so the acquisition logic runs unchanged against real
//! drivers on the node and scripted doubles in tests.

pub mod temperature;
pub mod voltage;

pub use temperature::{TemperatureProbe, TemperatureReader};
pub use voltage::{AnalogSource, VoltageSampler, VoltageSamplerConfig};
