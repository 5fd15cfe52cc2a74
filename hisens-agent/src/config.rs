//! Provisioning-time configuration
//!
//! Everything here is fixed when the node is provisioned: identity,
//! collector endpoints, cadence, calibration. There is no runtime
//! reconfiguration surface. Edit the defaults and reflash.

use hisens_core::constants::DISPATCH_INTERVAL_MS;
use hisens_core::VoltageSamplerConfig;

/// Node identity stamped on every reading
pub const NODE_ID: &str = "ESP32-LAB-01";
/// Sensor id of the temperature probe
pub const TEMP_SENSOR_ID: &str = "TEMP-DS18B20";
/// Sensor id of the voltage transducer
pub const VOLT_SENSOR_ID: &str = "VOLT-ZMPT101";
/// Placement tag, advisory only
pub const LOCATION: &str = "Laboratorio Real";

/// Collector host for the Socket.IO transport (no scheme, no trailing slash)
#[cfg(feature = "socketio")]
pub const BACKEND_HOST: &str = "hi-sens-t-production.up.railway.app";
/// Collector URL for the HTTP transport
#[cfg(all(feature = "http", not(feature = "socketio")))]
pub const BACKEND_URL: &str = "https://hi-sens-t-production.up.railway.app/api/lectura";

/// Identity fields copied into each reading
#[derive(Debug, Clone)]
pub struct NodeIdentity {
    pub node_id: &'static str,
    pub temp_sensor_id: &'static str,
    pub volt_sensor_id: &'static str,
    pub location: &'static str,
}

/// Full agent configuration
#[derive(Debug, Clone)]
pub struct AgentConfig {
    pub identity: NodeIdentity,
    /// Dispatch cadence in milliseconds
    pub interval_ms: u64,
    /// Voltage calibration knobs
    pub sampler: VoltageSamplerConfig,
}

impl Default for AgentConfig {
    fn default() -> Self {
        Self {
            identity: NodeIdentity {
                node_id: NODE_ID,
                temp_sensor_id: TEMP_SENSOR_ID,
                volt_sensor_id: VOLT_SENSOR_ID,
                location: LOCATION,
            },
            interval_ms: DISPATCH_INTERVAL_MS,
            sampler: VoltageSamplerConfig::default(),
        }
    }
}
