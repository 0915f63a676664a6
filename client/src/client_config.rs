use std::{default::Default, time::Duration};

use vml_shared::TEXT_CHUNK_SIZE;

/// Contains Config properties which will be used by the loader
#[derive(Clone, Debug)]
pub struct ClientConfig {
    /// User name sent with the connect request
    pub name: String,
    /// Password sent with the connect request
    pub password: String,
    /// Host address, as `host` or `host:port`
    pub address: String,
    /// How long one poll of the session may wait for host traffic
    pub poll_timeout: Duration,
    /// After the last element is sent, keep polling until the session's
    /// outstanding data drops below this
    pub drain_threshold: usize,
    /// Largest piece of text, in bytes, sent in a single command
    pub text_chunk_size: usize,
}

impl Default for ClientConfig {
    fn default() -> Self {
        Self {
            name: "loader".to_string(),
            password: "<secret>".to_string(),
            address: "localhost".to_string(),
            poll_timeout: Duration::from_millis(10),
            drain_threshold: 10,
            text_chunk_size: TEXT_CHUNK_SIZE,
        }
    }
}
