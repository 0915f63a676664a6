//! Per-kind element handlers. Each adds a `process_<kind>` method to the
//! uploader that returns false for elements it does not recognize.

mod audio;
mod bitmap;
mod common;
mod curve;
mod geometry;
mod material;
mod object;
mod text;
