//! # VML Client
//! Uploads VML scene documents to a scene-graph host. Entities are created
//! one at a time, and each acknowledgment the host sends back is matched to
//! the document element that asked for it before the next element is sent.

#![deny(
    trivial_casts,
    trivial_numeric_casts,
    unstable_features,
    unused_import_braces
)]

pub mod transport;

mod client_config;
mod driver;
mod error;
mod upload;

pub use client_config::ClientConfig;
pub use driver::Driver;
pub use error::ClientError;
pub use upload::{
    EntityIdTable, FragmentIdTable, FragmentSlot, GroupKind, NameIndex, Pending, PendingTracker,
    Phase, SubresourceKind, Traversal, Uploader,
};

use std::{fs, path::Path};

use log::{debug, warn};

use vml_shared::Document;

/// Read and parse every file into one document. Files are parsed
/// independently; their root elements are uploaded together.
///
/// A file that cannot be read or parsed is reported and left out. Fails only
/// when no file could be loaded, with the error of the first one.
pub fn load_documents<P: AsRef<Path>>(paths: &[P]) -> Result<Document, ClientError> {
    let mut document = Document::new();
    let mut first_error = None;
    let mut loaded = 0;
    for path in paths {
        match load_file(&mut document, path.as_ref()) {
            Ok(()) => loaded += 1,
            Err(error) => {
                warn!("{}, skipping it", error);
                first_error.get_or_insert(error);
            }
        }
    }
    match first_error {
        Some(error) if loaded == 0 => Err(error),
        None if loaded == 0 => Err(ClientError::NoDocuments),
        _ => Ok(document),
    }
}

fn load_file(document: &mut Document, path: &Path) -> Result<(), ClientError> {
    let source = fs::read_to_string(path).map_err(|source| ClientError::Read {
        path: path.to_path_buf(),
        source,
    })?;
    document
        .load_str(&source)
        .map_err(|source| ClientError::Load {
            path: path.to_path_buf(),
            source,
        })?;
    debug!("loaded {}", path.display());
    Ok(())
}
