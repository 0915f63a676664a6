mod error;
mod parser;
mod tree;

pub use error::DocumentError;
pub use tree::{Document, ElementId};
