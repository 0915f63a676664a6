use std::{
    io::{self, BufRead, BufReader, ErrorKind, Write},
    net::TcpStream,
    time::{Duration, Instant},
};

use log::{debug, trace, warn};
use serde::{Deserialize, Serialize};

use vml_shared::{Command, HostEvent, Session, SessionError};

/// Port used when the host address does not name one.
pub const DEFAULT_PORT: u16 = 4950;

/// Shortest wait a socket read timeout accepts.
const MIN_READ_TIMEOUT: Duration = Duration::from_millis(1);

/// One line received from the host.
#[derive(Debug, Serialize, Deserialize)]
enum Inbound {
    Event(HostEvent),
    /// Amount of command data the host has not yet processed
    Size(usize),
}

/// A [`Session`] speaking line-delimited JSON over TCP: every command is
/// written as one line, and every line read back is either a host event or a
/// report of how much data is still queued.
pub struct TcpSession {
    writer: TcpStream,
    reader: BufReader<TcpStream>,
    partial: Vec<u8>,
    outstanding: usize,
}

impl TcpSession {
    /// Connect to `address`, given as `host` or `host:port`.
    pub fn connect(address: &str) -> Result<Self, SessionError> {
        let target = if address.contains(':') {
            address.to_string()
        } else {
            format!("{}:{}", address, DEFAULT_PORT)
        };
        debug!("opening session to {}", target);
        let stream = TcpStream::connect(target.as_str())?;
        Self::from_stream(stream)
    }

    pub fn from_stream(stream: TcpStream) -> Result<Self, SessionError> {
        stream.set_nodelay(true)?;
        let reader = BufReader::new(stream.try_clone()?);
        Ok(Self {
            writer: stream,
            reader,
            partial: Vec::new(),
            outstanding: 0,
        })
    }

    /// Read one complete line, keeping any partial line for the next call.
    /// Returns `None` when the wait ran out.
    fn read_line(&mut self) -> Result<Option<Inbound>, SessionError> {
        match self.reader.read_until(b'\n', &mut self.partial) {
            Ok(0) => Err(SessionError::Closed),
            Ok(_) if self.partial.ends_with(b"\n") => {
                let line = std::mem::take(&mut self.partial);
                serde_json::from_slice(&line)
                    .map(Some)
                    .map_err(|error| SessionError::Codec(error.to_string()))
            }
            Ok(_) => Ok(None),
            Err(error) if is_timeout(&error) => Ok(None),
            Err(error) => Err(error.into()),
        }
    }
}

impl Session for TcpSession {
    fn send(&mut self, command: Command) -> Result<(), SessionError> {
        let mut line =
            serde_json::to_vec(&command).map_err(|error| SessionError::Codec(error.to_string()))?;
        line.push(b'\n');
        self.writer.write_all(&line)?;
        trace!("sent {} bytes", line.len());
        Ok(())
    }

    /// Read whatever arrives within `timeout`. Lines still arriving when it
    /// runs out are left for the next poll.
    fn poll(&mut self, timeout: Duration) -> Result<Vec<HostEvent>, SessionError> {
        let deadline = Instant::now() + timeout;
        let mut events = Vec::new();
        loop {
            let remaining = deadline.saturating_duration_since(Instant::now());
            self.reader
                .get_ref()
                .set_read_timeout(Some(remaining.max(MIN_READ_TIMEOUT)))?;
            match self.read_line() {
                Ok(Some(Inbound::Event(event))) => events.push(event),
                Ok(Some(Inbound::Size(size))) => self.outstanding = size,
                Ok(None) => break,
                Err(SessionError::Codec(message)) => {
                    warn!("dropping unreadable line from host: {}", message);
                }
                Err(error) => return Err(error),
            }
            if Instant::now() >= deadline {
                break;
            }
        }
        Ok(events)
    }

    fn outstanding(&self) -> usize {
        self.outstanding
    }
}

fn is_timeout(error: &io::Error) -> bool {
    matches!(error.kind(), ErrorKind::WouldBlock | ErrorKind::TimedOut)
}
