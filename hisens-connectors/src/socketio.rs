//! Persistent Socket.IO event transport
//!
//! Mirrors the collector's ingest contract: one long-lived secure session
//! per node, batches emitted under a fixed event name (`dato_sensor`),
//! standard `/socket.io/?EIO=4` handshake on a fixed host and port.
//!
//! ## Session seam
//!
//! [`SocketIoConnector`] is generic over [`EventSession`] so the
//! connection-state handling and fail-fast send policy are testable
//! without a network. The production session ([`SocketIoSession`], behind
//! the `socketio` feature) wraps the `rust_socketio` sync client;
//! reconnection after a drop is that client's own background concern, not
//! this module's.
//!
//! ## Send policy
//!
//! `send` is fire-and-forget. When the session is not connected it fails
//! immediately with [`SocketError::NotConnected`] - no blocking, no
//! buffering, no retry queue, and the session state is left untouched.
//! The batch is simply lost, as on the reference firmware.

use log::debug;
use thiserror::Error;

use crate::{ChannelEvent, ConnectionState, Connector};

/// Default collector port (TLS)
pub const DEFAULT_PORT: u16 = 443;

/// Event name the collector ingests batches under
pub const DEFAULT_EVENT_NAME: &str = "dato_sensor";

/// Socket transport faults
#[derive(Debug, Error)]
pub enum SocketError {
    /// Session is not in the connected state; the batch was dropped
    /// without blocking
    #[error("not connected; batch dropped")]
    NotConnected,

    /// Initial handshake with the collector failed
    #[error("connect failed: {0}")]
    Connect(String),

    /// The session rejected the emission
    #[error("emit failed: {0}")]
    Emit(String),

    /// The batch bytes were not valid JSON
    #[error("payload is not valid JSON: {0}")]
    Payload(String),
}

/// Socket.IO endpoint configuration
///
/// Fixed at provisioning time; the host goes in without scheme or
/// trailing slash, as on the reference firmware.
#[derive(Debug, Clone)]
pub struct SocketConfig {
    /// Collector hostname (no scheme, no trailing slash)
    pub host: String,
    /// Collector port
    pub port: u16,
    /// Event name batches are emitted under
    pub event_name: String,
}

impl SocketConfig {
    /// Configuration for `host` with the default port and event name
    pub fn new(host: impl Into<String>) -> Self {
        Self {
            host: host.into(),
            port: DEFAULT_PORT,
            event_name: DEFAULT_EVENT_NAME.into(),
        }
    }

    /// Override the collector port
    pub fn port(mut self, port: u16) -> Self {
        self.port = port;
        self
    }

    /// Override the emission event name
    pub fn event_name(mut self, name: impl Into<String>) -> Self {
        self.event_name = name.into();
        self
    }

    /// Secure URL for the session handshake
    pub fn url(&self) -> String {
        format!("https://{}:{}", self.host, self.port)
    }
}

/// Minimal surface the connector needs from a Socket.IO session
///
/// The production implementation owns the network client; tests supply
/// scripted fakes.
pub trait EventSession {
    /// Current link state as last observed by the session
    fn state(&self) -> ConnectionState;

    /// Emit one event with a JSON payload; only called while connected
    fn emit(&mut self, event: &str, payload: &[u8]) -> Result<(), SocketError>;
}

/// Persistent event transport over an [`EventSession`]
pub struct SocketIoConnector<S: EventSession> {
    session: S,
    event_name: String,
    last_state: ConnectionState,
}

impl<S: EventSession> SocketIoConnector<S> {
    /// Wrap an established (or establishing) session
    pub fn new(session: S, event_name: impl Into<String>) -> Self {
        let last_state = session.state();
        Self {
            session,
            event_name: event_name.into(),
            last_state,
        }
    }
}

impl<S: EventSession> Connector for SocketIoConnector<S> {
    type Error = SocketError;

    fn send(&mut self, payload: &[u8]) -> Result<(), SocketError> {
        if self.session.state() != ConnectionState::Connected {
            return Err(SocketError::NotConnected);
        }
        self.session.emit(&self.event_name, payload)?;
        debug!("emitted {} bytes on '{}'", payload.len(), self.event_name);
        Ok(())
    }

    fn state(&self) -> ConnectionState {
        self.session.state()
    }

    fn service(&mut self) -> Option<ChannelEvent> {
        let state = self.session.state();
        if state == self.last_state {
            return None;
        }
        self.last_state = state;
        match state {
            ConnectionState::Connected => Some(ChannelEvent::Connected),
            ConnectionState::Disconnected => Some(ChannelEvent::Disconnected),
            ConnectionState::Connecting => None,
        }
    }
}

/// Production session on the `rust_socketio` sync client
///
/// The client runs its own receive loop and reconnects on drops; this
/// wrapper only tracks the link state the reserved `connect`/`close`
/// events report, through a shared cell the callbacks update.
#[cfg(feature = "socketio")]
pub struct SocketIoSession {
    client: rust_socketio::client::Client,
    state: std::sync::Arc<std::sync::Mutex<ConnectionState>>,
}

#[cfg(feature = "socketio")]
impl SocketIoSession {
    /// Establish the session; blocks until the handshake resolves
    pub fn connect(config: &SocketConfig) -> Result<Self, SocketError> {
        use std::sync::{Arc, Mutex};

        let state = Arc::new(Mutex::new(ConnectionState::Connecting));

        let on_connect = {
            let state = Arc::clone(&state);
            move |_payload, _client| {
                *state.lock().unwrap() = ConnectionState::Connected;
            }
        };
        let on_close = {
            let state = Arc::clone(&state);
            move |_payload, _client| {
                *state.lock().unwrap() = ConnectionState::Disconnected;
            }
        };

        let client = rust_socketio::ClientBuilder::new(config.url())
            .reconnect_on_disconnect(true)
            .on(rust_socketio::Event::Connect, on_connect)
            .on(rust_socketio::Event::Close, on_close)
            .connect()
            .map_err(|e| SocketError::Connect(e.to_string()))?;

        Ok(Self { client, state })
    }
}

#[cfg(feature = "socketio")]
impl EventSession for SocketIoSession {
    fn state(&self) -> ConnectionState {
        *self.state.lock().unwrap()
    }

    fn emit(&mut self, event: &str, payload: &[u8]) -> Result<(), SocketError> {
        let value: serde_json::Value =
            serde_json::from_slice(payload).map_err(|e| SocketError::Payload(e.to_string()))?;
        self.client
            .emit(event, rust_socketio::Payload::Text(vec![value]))
            .map_err(|e| SocketError::Emit(e.to_string()))
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    struct FakeSession {
        state: ConnectionState,
        emitted: Vec<(String, Vec<u8>)>,
        fail_emit: bool,
    }

    impl FakeSession {
        fn new(state: ConnectionState) -> Self {
            Self {
                state,
                emitted: Vec::new(),
                fail_emit: false,
            }
        }
    }

    impl EventSession for FakeSession {
        fn state(&self) -> ConnectionState {
            self.state
        }

        fn emit(&mut self, event: &str, payload: &[u8]) -> Result<(), SocketError> {
            if self.fail_emit {
                return Err(SocketError::Emit("scripted failure".into()));
            }
            self.emitted.push((event.into(), payload.to_vec()));
            Ok(())
        }
    }

    #[test]
    fn config_defaults_match_collector_contract() {
        let config = SocketConfig::new("collector.example.net");
        assert_eq!(config.port, 443);
        assert_eq!(config.event_name, "dato_sensor");
        assert_eq!(config.url(), "https://collector.example.net:443");
    }

    #[test]
    fn send_emits_under_configured_event_name() {
        let session = FakeSession::new(ConnectionState::Connected);
        let mut connector = SocketIoConnector::new(session, "dato_sensor");

        connector.send(b"[]").unwrap();
        assert_eq!(
            connector.session.emitted,
            vec![("dato_sensor".to_string(), b"[]".to_vec())]
        );
    }

    #[test]
    fn send_fails_fast_when_disconnected() {
        let session = FakeSession::new(ConnectionState::Disconnected);
        let mut connector = SocketIoConnector::new(session, "dato_sensor");

        let result = connector.send(b"[1]");
        assert!(matches!(result, Err(SocketError::NotConnected)));
        // the session was never touched and the state is unchanged
        assert!(connector.session.emitted.is_empty());
        assert_eq!(connector.state(), ConnectionState::Disconnected);
    }

    #[test]
    fn send_fails_fast_while_connecting() {
        let session = FakeSession::new(ConnectionState::Connecting);
        let mut connector = SocketIoConnector::new(session, "dato_sensor");
        assert!(matches!(connector.send(b"[]"), Err(SocketError::NotConnected)));
    }

    #[test]
    fn emit_failure_propagates() {
        let mut session = FakeSession::new(ConnectionState::Connected);
        session.fail_emit = true;
        let mut connector = SocketIoConnector::new(session, "dato_sensor");
        assert!(matches!(connector.send(b"[]"), Err(SocketError::Emit(_))));
    }

    #[test]
    fn service_reports_transitions_once() {
        let session = FakeSession::new(ConnectionState::Connecting);
        let mut connector = SocketIoConnector::new(session, "dato_sensor");

        // no transition yet
        assert_eq!(connector.service(), None);

        connector.session.state = ConnectionState::Connected;
        assert_eq!(connector.service(), Some(ChannelEvent::Connected));
        // steady state is quiet
        assert_eq!(connector.service(), None);

        connector.session.state = ConnectionState::Disconnected;
        assert_eq!(connector.service(), Some(ChannelEvent::Disconnected));
        assert_eq!(connector.service(), None);
    }
}
