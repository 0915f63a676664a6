//! # VML Shared
//! Types shared between the VML loader and the hosts and tools it talks to:
//! the document model, symbolic type tables, session commands and events.

#![deny(trivial_numeric_casts, unstable_features, unused_import_braces)]

mod command;
mod constants;
mod document;
mod event;
mod session;
mod type_maps;
mod types;

pub use command::{
    AudioSamples, Command, CurveKey, Fragment, MethodParam, PolygonValue, RampPoint, TagValue,
    TilePixels, VertexValue,
};
pub use constants::{
    CURVE_DIMENSIONS_MAX, METHOD_PARAMS_MAX, ORDINAL_MAX, RAMP_POINTS_MAX, TAG_BLOB_MAX,
    TEXT_CHUNK_SIZE, TILE_PIXELS, TILE_SIZE,
};
pub use document::{Document, DocumentError, ElementId};
pub use event::HostEvent;
pub use session::{Session, SessionError};
pub use type_maps::{
    AudioBlockType, BitmapLayerType, BlendType, EntityKind, FragmentType, GeometryLayerType,
    LightType, MethodParamType, NoiseType, RampChannel, RampType, TagType, UPLOAD_ORDER,
};
pub use types::{BoneId, BufferId, CurveId, EntityId, FragmentId, GroupId, LayerId, Ordinal, Owner};
