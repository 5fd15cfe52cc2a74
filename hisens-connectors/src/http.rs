//! Stateless HTTPS POST transport
//!
//! One self-contained request per batch: connect, POST the JSON array,
//! read the status, drop the connection. Nothing persists between
//! dispatches and nothing is retried.
//!
//! ## Status contract
//!
//! Faithful to the reference firmware's `HTTPClient`, which returns a
//! negative code only when the request never reached the server: any
//! positive HTTP status - including 4xx/5xx - counts as delivered, and
//! only transport-level failures (refused connection, DNS, timeout) are
//! faults. The response body is read and discarded on every path so the
//! underlying connection is always released, mirroring the firmware's
//! unconditional `http.end()`.

use std::time::Duration;

use log::{debug, warn};
use thiserror::Error;

use crate::{ChannelEvent, ConnectionState, Connector};

/// HTTP transport faults
#[derive(Debug, Error)]
pub enum HttpError {
    /// Invalid endpoint configuration
    #[error("configuration error: {0}")]
    Config(String),

    /// The request never completed at the transport level; the batch
    /// was dropped
    #[error("transport failure: {0}")]
    Transport(String),
}

/// HTTP endpoint configuration, fixed at provisioning time
#[derive(Debug, Clone)]
pub struct HttpConfig {
    /// Full collector URL the batches are POSTed to
    pub url: String,
    /// Per-request timeout imposed on the underlying agent
    pub timeout: Duration,
    /// User agent string
    pub user_agent: String,
}

impl HttpConfig {
    /// Configuration for `url` with default timeout
    pub fn new(url: impl Into<String>) -> Self {
        Self {
            url: url.into(),
            timeout: Duration::from_secs(10),
            user_agent: format!("hisens-node/{}", env!("CARGO_PKG_VERSION")),
        }
    }

    /// Override the request timeout in seconds
    pub fn timeout_secs(mut self, secs: u64) -> Self {
        self.timeout = Duration::from_secs(secs);
        self
    }
}

/// One-shot POST connector on a ureq agent
pub struct HttpConnector {
    config: HttpConfig,
    agent: ureq::Agent,
}

impl HttpConnector {
    /// Create the connector, validating the endpoint URL
    pub fn new(config: HttpConfig) -> Result<Self, HttpError> {
        if !config.url.starts_with("http://") && !config.url.starts_with("https://") {
            return Err(HttpError::Config(
                "URL must start with http:// or https://".into(),
            ));
        }

        let agent = ureq::AgentBuilder::new()
            .timeout(config.timeout)
            .user_agent(&config.user_agent)
            .build();

        Ok(Self { config, agent })
    }
}

impl Connector for HttpConnector {
    type Error = HttpError;

    fn send(&mut self, payload: &[u8]) -> Result<(), HttpError> {
        let response = self
            .agent
            .post(&self.config.url)
            .set("Content-Type", "application/json")
            .send_bytes(payload);

        match response {
            Ok(resp) => {
                let status = resp.status();
                // drain the body so the connection is released
                let _ = resp.into_string();
                debug!("collector answered {status}");
                Ok(())
            }
            Err(ureq::Error::Status(status, resp)) => {
                // a positive status means the collector answered; per the
                // reference contract that counts as delivered
                let _ = resp.into_string();
                warn!("collector answered {status}");
                Ok(())
            }
            Err(ureq::Error::Transport(e)) => Err(HttpError::Transport(e.to_string())),
        }
    }

    fn state(&self) -> ConnectionState {
        // each dispatch is self-contained; there is no session to lose
        ConnectionState::Connected
    }

    fn service(&mut self) -> Option<ChannelEvent> {
        None
    }
}
