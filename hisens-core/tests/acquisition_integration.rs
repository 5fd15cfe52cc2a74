//! End-to-end acquisition tests: sensors through batch serialization
//!
//! Exercises the public API only, the way the agent binary uses it.

use hisens_core::time::SteppingTime;
use hisens_core::{
    AnalogSource, Reading, SensorError, SensorKind, TelemetryBatch, TemperatureProbe,
    TemperatureReader, VoltageSampler,
};

struct ConstProbe(f64);

impl TemperatureProbe for ConstProbe {
    fn convert(&mut self) -> f64 {
        self.0
    }
}

struct SquareLine {
    low: u16,
    high: u16,
    tick: usize,
}

impl AnalogSource for SquareLine {
    fn read_raw(&mut self) -> u16 {
        self.tick += 1;
        if self.tick % 2 == 0 {
            self.high
        } else {
            self.low
        }
    }
}

fn acquire(probe: f64, low: u16, high: u16) -> TelemetryBatch {
    let mut reader = TemperatureReader::new(ConstProbe(probe));
    let mut sampler = VoltageSampler::new(
        SquareLine {
            low,
            high,
            tick: 0,
        },
        SteppingTime::new(0, 1),
    );

    let mut batch = TelemetryBatch::new();
    if let Ok(celsius) = reader.read_celsius() {
        let reading = Reading::new(
            "ESP32-LAB-01",
            "TEMP-DS18B20",
            SensorKind::Temperature,
            celsius,
            "Laboratorio Real",
        )
        .unwrap();
        batch.push(reading).unwrap();
    }
    let volts = sampler.sample();
    let reading = Reading::new(
        "ESP32-LAB-01",
        "VOLT-ZMPT101",
        SensorKind::Voltage,
        volts,
        "Laboratorio Real",
    )
    .unwrap();
    batch.push(reading).unwrap();
    batch
}

#[test]
fn healthy_tick_serializes_both_sensors() {
    let batch = acquire(23.4, 1758, 2338);
    let json = batch.to_json().unwrap();
    let text = String::from_utf8(json).unwrap();

    assert!(text.starts_with(r#"[{"id_nodo":"ESP32-LAB-01""#));
    assert!(text.contains(r#""tipo":"TEMPERATURA","valor":23.4"#));
    assert!(text.contains(r#""tipo":"VOLTAJE","valor":220.0"#));
}

#[test]
fn faulted_probe_leaves_voltage_only() {
    let batch = acquire(-127.0, 1758, 2338);
    assert_eq!(batch.len(), 1);
    assert_eq!(batch.readings()[0].kind, SensorKind::Voltage);

    // and the fault is visible at the reader boundary
    let mut reader = TemperatureReader::new(ConstProbe(-127.0));
    assert_eq!(reader.read_celsius(), Err(SensorError::ConversionFailed));
}

#[test]
fn idle_line_reports_zero_volts() {
    let batch = acquire(21.0, 2040, 2060);
    let voltage = batch
        .readings()
        .iter()
        .find(|r| r.kind == SensorKind::Voltage)
        .unwrap();
    assert_eq!(voltage.value, 0.0);
}

#[test]
fn batches_are_reproducible_across_ticks() {
    let first = acquire(23.4, 1758, 2338).to_json().unwrap();
    let second = acquire(23.4, 1758, 2338).to_json().unwrap();
    assert_eq!(first, second);
}
