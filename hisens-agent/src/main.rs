//! HI-Sens telemetry node agent
//!
//! Samples the temperature probe and the AC-voltage line once per
//! interval, batches the readings, and dispatches the batch to the
//! collector over the transport selected at build time (`socketio`
//! feature for the persistent event session, `http` for stateless
//! POSTs). Runs indefinitely; every fault is logged and swallowed.
//!
//! Single-threaded by design: the 20 ms analog scan and the network
//! calls block the loop, so the cadence is best-effort.

mod config;
mod pipeline;
mod sim;

use std::thread;
use std::time::Duration;

use log::{info, warn};

use hisens_connectors::{ChannelEvent, Connector};
use hisens_core::time::SystemTime;
use hisens_core::{Scheduler, TemperatureReader, VoltageSampler};

use config::AgentConfig;

#[cfg(not(any(feature = "socketio", feature = "http")))]
compile_error!("select a transport: build with the `socketio` or `http` feature");

/// Pause between loop iterations; keeps the host CPU sane without
/// time-gating the liveness servicing
const LOOP_PAUSE_MS: u64 = 10;

fn main() {
    env_logger::init();

    let config = AgentConfig::default();
    info!(
        "hisens-agent {} starting as {} ({})",
        hisens_core::VERSION,
        config.identity.node_id,
        config.identity.location
    );

    let connector = build_connector();
    run(config, connector)
}

/// Persistent Socket.IO session; retries the initial handshake until the
/// collector is reachable, like the firmware waits for its link
#[cfg(feature = "socketio")]
fn build_connector() -> impl Connector {
    use hisens_connectors::socketio::SocketIoSession;
    use hisens_connectors::{SocketConfig, SocketIoConnector};

    let socket_config = SocketConfig::new(config::BACKEND_HOST);
    loop {
        match SocketIoSession::connect(&socket_config) {
            Ok(session) => {
                info!("session opened to {}", socket_config.url());
                return SocketIoConnector::new(session, socket_config.event_name.clone());
            }
            Err(e) => {
                warn!("collector connect failed: {e}; retrying");
                thread::sleep(Duration::from_millis(500));
            }
        }
    }
}

/// Stateless HTTPS POST transport
#[cfg(all(feature = "http", not(feature = "socketio")))]
fn build_connector() -> impl Connector {
    use hisens_connectors::{HttpConfig, HttpConnector};

    match HttpConnector::new(HttpConfig::new(config::BACKEND_URL)) {
        Ok(connector) => connector,
        Err(e) => {
            // the URL is a provisioning-time constant; nothing to do at
            // runtime but refuse to start
            log::error!("transport misprovisioned: {e}");
            std::process::exit(1);
        }
    }
}

fn run<C: Connector>(config: AgentConfig, mut connector: C) -> ! {
    let mut reader = TemperatureReader::new(sim::SimProbe::default());
    let mut sampler =
        VoltageSampler::with_config(sim::SimMainsLine::default(), SystemTime, config.sampler);
    let mut scheduler = Scheduler::with_interval(SystemTime, config.interval_ms);

    loop {
        // liveness runs every iteration, never only at tick boundaries
        match connector.service() {
            Some(ChannelEvent::Connected) => info!("connected to collector"),
            Some(ChannelEvent::Disconnected) => warn!("collector link lost"),
            None => {}
        }

        if scheduler.poll() {
            let batch = pipeline::collect_batch(&mut reader, &mut sampler, &config.identity);
            pipeline::dispatch(&batch, &mut connector);
            scheduler.complete();
        }

        thread::sleep(Duration::from_millis(LOOP_PAUSE_MS));
    }
}
