mod tcp;

pub use tcp::{TcpSession, DEFAULT_PORT};
