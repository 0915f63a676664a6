use std::time::Duration;

use thiserror::Error;

use crate::{command::Command, event::HostEvent};

/// A connection to a scene-graph host.
///
/// Implementations buffer commands and deliver host events; the upload engine
/// never blocks on a reply.
pub trait Session {
    /// Queue a command for the host
    fn send(&mut self, command: Command) -> Result<(), SessionError>;

    /// Wait at most `timeout` for traffic and return every event received
    fn poll(&mut self, timeout: Duration) -> Result<Vec<HostEvent>, SessionError>;

    /// Amount of outbound data not yet accepted by the host, in
    /// implementation-defined units
    fn outstanding(&self) -> usize;
}

/// Errors that can occur while talking to the host
#[derive(Debug, Error)]
pub enum SessionError {
    /// Underlying transport failed
    #[error("Session I/O error: {0}")]
    Io(#[from] std::io::Error),

    /// A message could not be encoded or decoded
    #[error("Session codec error: {0}")]
    Codec(String),

    /// The host closed the connection
    #[error("Session closed by host")]
    Closed,
}
