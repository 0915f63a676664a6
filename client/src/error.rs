use std::path::PathBuf;

use thiserror::Error;

use vml_shared::{DocumentError, SessionError};

/// Errors that can stop a load run
#[derive(Debug, Error)]
pub enum ClientError {
    /// No input documents were given
    #[error("No VML documents to load")]
    NoDocuments,

    /// An input file could not be read
    #[error("Could not read {}: {source}", .path.display())]
    Read {
        path: PathBuf,
        source: std::io::Error,
    },

    /// An input file is not a well-formed document
    #[error("Could not parse {}: {source}", .path.display())]
    Load {
        path: PathBuf,
        source: DocumentError,
    },

    /// The session to the host failed
    #[error("Session error: {0}")]
    Session(#[from] SessionError),
}
