//! Reading and batch model, plus the wire contract
//!
//! ## Wire format
//!
//! Batches serialize to a JSON array the collector ingests as-is:
//!
//! ```json
//! [{"id_nodo":"ESP32-LAB-01","id_sensor":"TEMP-DS18B20","tipo":"TEMPERATURA",
//!   "valor":23.4,"ubicacion":"Laboratorio Real"}]
//! ```
//!
//! Field order follows struct declaration order and must stay stable:
//! downstream golden tests (and the collector's logs) rely on
//! byte-identical output for identical inputs.
//!
//! ## Memory model
//!
//! Id and location fields are fixed-capacity [`heapless`] strings so a
//! `Reading` has a deterministic footprint on the node; only the final
//! serialization step allocates. A batch holds at most
//! [`MAX_BATCH_READINGS`] readings and lives for a single tick: built,
//! serialized, dropped. Nothing is persisted across ticks.

#[cfg(not(feature = "std"))]
use alloc::vec::Vec;

use serde::{Deserialize, Serialize};

use crate::constants::{MAX_BATCH_READINGS, MAX_ID_LEN, MAX_LOCATION_LEN};

/// Fixed-capacity id field (`id_nodo`, `id_sensor`)
pub type IdString = heapless::String<MAX_ID_LEN>;

/// Fixed-capacity free-text placement tag (`ubicacion`)
pub type LocationString = heapless::String<MAX_LOCATION_LEN>;

/// Measurement kind - closed set for this node
///
/// Wire names are the Spanish literals the collector's schema uses.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub enum SensorKind {
    /// Degrees Celsius from the digital probe
    #[serde(rename = "TEMPERATURA")]
    Temperature,
    /// RMS-equivalent volts from the analog transducer
    #[serde(rename = "VOLTAJE")]
    Voltage,
}

impl SensorKind {
    /// The literal emitted in the `tipo` field
    pub const fn wire_name(&self) -> &'static str {
        match self {
            SensorKind::Temperature => "TEMPERATURA",
            SensorKind::Voltage => "VOLTAJE",
        }
    }
}

/// One sensor observation, tagged with node and sensor identity
///
/// Declaration order is the wire order: `id_nodo`, `id_sensor`, `tipo`,
/// `valor`, `ubicacion`.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Reading {
    /// Physical device identity, constant for the process lifetime
    #[serde(rename = "id_nodo")]
    pub node_id: IdString,
    /// Sensor instance identity
    #[serde(rename = "id_sensor")]
    pub sensor_id: IdString,
    /// Measurement kind
    #[serde(rename = "tipo")]
    pub kind: SensorKind,
    /// Measured quantity in physical units (°C or V)
    #[serde(rename = "valor")]
    pub value: f64,
    /// Free-text placement tag; advisory only
    #[serde(rename = "ubicacion")]
    pub location: LocationString,
}

impl Reading {
    /// Build a reading, or `None` if an id or location overflows its
    /// wire capacity
    pub fn new(
        node_id: &str,
        sensor_id: &str,
        kind: SensorKind,
        value: f64,
        location: &str,
    ) -> Option<Self> {
        Some(Self {
            node_id: IdString::try_from(node_id).ok()?,
            sensor_id: IdString::try_from(sensor_id).ok()?,
            kind,
            value,
            location: LocationString::try_from(location).ok()?,
        })
    }
}

/// Ordered set of readings produced within one scheduling tick
///
/// The temperature reading (when valid) precedes the voltage reading.
/// An empty batch means every sensor failed validation this tick and
/// must not be handed to a transport.
#[derive(Debug, Clone, Default, PartialEq)]
pub struct TelemetryBatch {
    readings: heapless::Vec<Reading, MAX_BATCH_READINGS>,
}

impl TelemetryBatch {
    /// Empty batch for the current tick
    pub fn new() -> Self {
        Self::default()
    }

    /// Append a reading, returning it back if the batch is full
    pub fn push(&mut self, reading: Reading) -> Result<(), Reading> {
        self.readings.push(reading)
    }

    /// True when no sensor produced a valid reading this tick
    pub fn is_empty(&self) -> bool {
        self.readings.is_empty()
    }

    /// Number of readings collected
    pub fn len(&self) -> usize {
        self.readings.len()
    }

    /// Readings in dispatch order
    pub fn readings(&self) -> &[Reading] {
        &self.readings
    }

    /// Serialize to the JSON array the collector expects
    pub fn to_json(&self) -> Result<Vec<u8>, serde_json::Error> {
        serde_json::to_vec(&self.readings)
    }
}
