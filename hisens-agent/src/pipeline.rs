//! One tick of the acquisition-and-send pipeline
//!
//! A tick collects the temperature reading (skipped with a warning when
//! the probe faults), always collects the voltage reading, and dispatches
//! the batch through the configured transport. Every fault is swallowed
//! here: logged, the affected data dropped, and control returned to the
//! loop. Nothing escalates, nothing is retried, nothing is buffered.

use log::{error, info, warn};

use hisens_connectors::Connector;
use hisens_core::{
    AnalogSource, Reading, SensorKind, TelemetryBatch, TemperatureProbe, TemperatureReader,
    TimeSource, VoltageSampler,
};

use crate::config::NodeIdentity;

/// Acquire one batch: temperature first (when valid), then voltage
///
/// A temperature fault never suppresses the voltage reading; the two
/// sensors fail independently.
pub fn collect_batch<P, A, T>(
    reader: &mut TemperatureReader<P>,
    sampler: &mut VoltageSampler<A, T>,
    identity: &NodeIdentity,
) -> TelemetryBatch
where
    P: TemperatureProbe,
    A: AnalogSource,
    T: TimeSource,
{
    let mut batch = TelemetryBatch::new();

    match reader.read_celsius() {
        Ok(celsius) => push_reading(
            &mut batch,
            identity,
            identity.temp_sensor_id,
            SensorKind::Temperature,
            celsius,
        ),
        Err(e) => warn!("temperature reading skipped: {e}"),
    }

    let volts = sampler.sample();
    push_reading(
        &mut batch,
        identity,
        identity.volt_sensor_id,
        SensorKind::Voltage,
        volts,
    );

    batch
}

fn push_reading(
    batch: &mut TelemetryBatch,
    identity: &NodeIdentity,
    sensor_id: &str,
    kind: SensorKind,
    value: f64,
) {
    let Some(reading) = Reading::new(identity.node_id, sensor_id, kind, value, identity.location)
    else {
        error!("reading for {sensor_id} dropped: identity field over wire capacity");
        return;
    };
    if batch.push(reading).is_err() {
        error!("reading for {sensor_id} dropped: batch full");
    }
}

/// Serialize and deliver one batch; returns whether it went out
///
/// Empty batches are suppressed before the transport ever sees them.
/// Failures are logged and the batch is lost; the caller continues
/// unconditionally.
pub fn dispatch<C: Connector>(batch: &TelemetryBatch, connector: &mut C) -> bool {
    if batch.is_empty() {
        warn!("no valid readings this tick; dispatch suppressed");
        return false;
    }

    let payload = match batch.to_json() {
        Ok(payload) => payload,
        Err(e) => {
            error!("batch serialization failed: {e}");
            return false;
        }
    };

    match connector.send(&payload) {
        Ok(()) => {
            info!("sent {} readings ({} bytes)", batch.len(), payload.len());
            true
        }
        Err(e) => {
            warn!("dispatch failed, batch dropped: {e}");
            false
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use hisens_connectors::{ChannelEvent, ConnectionState};
    use hisens_core::time::SteppingTime;

    struct ScriptedProbe(f64);

    impl TemperatureProbe for ScriptedProbe {
        fn convert(&mut self) -> f64 {
            self.0
        }
    }

    /// Square-ish wave with a 580-count swing: reads as 220.0 V
    struct MainsLine {
        tick: usize,
    }

    impl AnalogSource for MainsLine {
        fn read_raw(&mut self) -> u16 {
            self.tick += 1;
            if self.tick % 2 == 0 {
                2338
            } else {
                1758
            }
        }
    }

    struct RecordingConnector {
        sent: Vec<Vec<u8>>,
        fail: bool,
    }

    impl RecordingConnector {
        fn new() -> Self {
            Self {
                sent: Vec::new(),
                fail: false,
            }
        }
    }

    impl Connector for RecordingConnector {
        type Error = &'static str;

        fn send(&mut self, payload: &[u8]) -> Result<(), Self::Error> {
            if self.fail {
                return Err("scripted transport fault");
            }
            self.sent.push(payload.to_vec());
            Ok(())
        }

        fn state(&self) -> ConnectionState {
            ConnectionState::Connected
        }

        fn service(&mut self) -> Option<ChannelEvent> {
            None
        }
    }

    fn identity() -> NodeIdentity {
        NodeIdentity {
            node_id: "ESP32-LAB-01",
            temp_sensor_id: "TEMP-DS18B20",
            volt_sensor_id: "VOLT-ZMPT101",
            location: "Laboratorio Real",
        }
    }

    fn collect(probe_value: f64) -> TelemetryBatch {
        let mut reader = TemperatureReader::new(ScriptedProbe(probe_value));
        let mut sampler = VoltageSampler::new(MainsLine { tick: 0 }, SteppingTime::new(0, 1));
        collect_batch(&mut reader, &mut sampler, &identity())
    }

    #[test]
    fn tick_produces_temperature_then_voltage() {
        let batch = collect(23.4);
        assert_eq!(batch.len(), 2);
        assert_eq!(batch.readings()[0].kind, SensorKind::Temperature);
        assert_eq!(batch.readings()[0].value, 23.4);
        assert_eq!(batch.readings()[1].kind, SensorKind::Voltage);
        assert!((batch.readings()[1].value - 220.0).abs() < 1e-9);
    }

    #[test]
    fn probe_fault_drops_only_the_temperature() {
        let batch = collect(-127.0);
        assert_eq!(batch.len(), 1);
        assert_eq!(batch.readings()[0].kind, SensorKind::Voltage);
    }

    #[test]
    fn dispatched_payload_matches_wire_contract() {
        let mut reader = TemperatureReader::new(ScriptedProbe(23.4));
        // flat line: the voltage reads 0.0, so pin the golden bytes on it
        struct FlatLine;
        impl AnalogSource for FlatLine {
            fn read_raw(&mut self) -> u16 {
                2048
            }
        }
        let mut sampler = VoltageSampler::new(FlatLine, SteppingTime::new(0, 1));
        let batch = collect_batch(&mut reader, &mut sampler, &identity());

        let mut connector = RecordingConnector::new();
        assert!(dispatch(&batch, &mut connector));
        assert_eq!(
            String::from_utf8(connector.sent[0].clone()).unwrap(),
            concat!(
                r#"[{"id_nodo":"ESP32-LAB-01","id_sensor":"TEMP-DS18B20","#,
                r#""tipo":"TEMPERATURA","valor":23.4,"ubicacion":"Laboratorio Real"},"#,
                r#"{"id_nodo":"ESP32-LAB-01","id_sensor":"VOLT-ZMPT101","#,
                r#""tipo":"VOLTAJE","valor":0.0,"ubicacion":"Laboratorio Real"}]"#,
            )
        );
    }

    #[test]
    fn empty_batch_never_reaches_the_transport() {
        let mut connector = RecordingConnector::new();
        assert!(!dispatch(&TelemetryBatch::new(), &mut connector));
        assert!(connector.sent.is_empty());
    }

    #[test]
    fn transport_fault_is_swallowed() {
        let batch = collect(21.0);
        let mut connector = RecordingConnector::new();
        connector.fail = true;
        assert!(!dispatch(&batch, &mut connector));
    }

    #[test]
    fn identical_ticks_dispatch_identical_bytes() {
        let mut connector = RecordingConnector::new();
        dispatch(&collect(23.4), &mut connector);
        dispatch(&collect(23.4), &mut connector);
        assert_eq!(connector.sent[0], connector.sent[1]);
    }
}
