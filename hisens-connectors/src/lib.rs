//! Delivery transports for HI-Sens telemetry batches
//!
//! ## Overview
//!
//! A node delivers each serialized batch through exactly one transport,
//! chosen at provisioning time:
//!
//! - **Socket.IO** ([`socketio`]): a long-lived secure event session to the
//!   collector. Cheap per-batch emission, but the session must be serviced
//!   every loop iteration and a disconnected session drops batches on the
//!   floor.
//! - **HTTPS POST** ([`http`]): one self-contained request per batch. No
//!   session to babysit, at the cost of a fresh connection per dispatch.
//!
//! ## Failure policy
//!
//! Both transports share the node's failure policy: a failed dispatch is
//! reported to the caller and the diagnostic log, the batch is dropped,
//! and nothing is buffered or retried. The scheduling loop continues
//! unconditionally on the next tick. A transport fault is never fatal.
//!
//! ## Connection events
//!
//! The persistent transport surfaces link transitions as [`ChannelEvent`]
//! values from [`Connector::service`] instead of firing callbacks, so the
//! single-threaded run loop observes them synchronously and logs them.

#[cfg(feature = "http")]
pub mod http;
pub mod socketio;

// Re-export common types
#[cfg(feature = "http")]
pub use http::{HttpConfig, HttpConnector, HttpError};
pub use socketio::{EventSession, SocketConfig, SocketError, SocketIoConnector};

/// Link state of a persistent transport session
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum ConnectionState {
    /// No link to the collector
    Disconnected,
    /// Handshake in progress
    Connecting,
    /// Session established; emissions will be attempted
    Connected,
}

/// Link transition observed while servicing a transport
///
/// Diagnostic only: the pipeline never changes behavior based on these,
/// it just logs them.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum ChannelEvent {
    /// Session reached [`ConnectionState::Connected`]
    Connected,
    /// Session dropped to [`ConnectionState::Disconnected`]
    Disconnected,
}

/// Batch delivery transport
pub trait Connector {
    /// Transport-specific fault type
    type Error: core::fmt::Display;

    /// Deliver one serialized batch
    ///
    /// Fire-and-forget: on error the batch is lost and the caller moves on.
    fn send(&mut self, payload: &[u8]) -> Result<(), Self::Error>;

    /// Current link state (stateless transports always report connected)
    fn state(&self) -> ConnectionState;

    /// Service connection liveness; called every loop iteration,
    /// independent of dispatch timing
    ///
    /// Returns a link transition when one occurred since the last call.
    fn service(&mut self) -> Option<ChannelEvent>;
}
