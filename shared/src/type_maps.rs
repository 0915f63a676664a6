//! Static `(name, value)` tables mapping the symbolic names used in VML
//! documents onto host enumerations.
//!
//! Every table is searched linearly; the tables are small and looked up once
//! per element. Where a value has more than one accepted spelling, the first
//! entry is the canonical one returned by `name()`.

use serde::{Deserialize, Serialize};

fn lookup<T: Copy>(table: &[(&'static str, T)], name: &str) -> Option<T> {
    table
        .iter()
        .find(|(entry, _)| *entry == name)
        .map(|(_, value)| *value)
}

fn reverse<T: Copy + PartialEq>(table: &[(&'static str, T)], value: T) -> &'static str {
    table
        .iter()
        .find(|(_, entry)| *entry == value)
        .map(|(name, _)| *name)
        .unwrap_or("?")
}

// EntityKind

#[derive(Clone, Copy, Debug, PartialEq, Eq, Hash, PartialOrd, Ord, Serialize, Deserialize)]
pub enum EntityKind {
    Object,
    Geometry,
    Material,
    Bitmap,
    Text,
    Curve,
    Audio,
}

const ENTITY_KINDS: &[(&str, EntityKind)] = &[
    ("object", EntityKind::Object),
    ("geometry", EntityKind::Geometry),
    ("material", EntityKind::Material),
    ("bitmap", EntityKind::Bitmap),
    ("text", EntityKind::Text),
    ("curve", EntityKind::Curve),
    ("audio", EntityKind::Audio),
];

/// Entities are uploaded in this order: objects depend on everything else,
/// materials depend on bitmaps.
pub const UPLOAD_ORDER: [EntityKind; 7] = [
    EntityKind::Audio,
    EntityKind::Bitmap,
    EntityKind::Curve,
    EntityKind::Geometry,
    EntityKind::Text,
    EntityKind::Material,
    EntityKind::Object,
];

impl EntityKind {
    pub fn from_name(name: &str) -> Option<Self> {
        lookup(ENTITY_KINDS, name)
    }

    pub fn name(self) -> &'static str {
        reverse(ENTITY_KINDS, self)
    }

    /// Position of this kind in [`UPLOAD_ORDER`]; lower uploads first.
    pub fn priority(self) -> usize {
        UPLOAD_ORDER
            .iter()
            .position(|kind| *kind == self)
            .unwrap_or(UPLOAD_ORDER.len())
    }
}

// Tags

#[derive(Clone, Copy, Debug, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub enum TagType {
    Boolean,
    Uint32,
    Real64,
    String,
    Real64Vec3,
    Link,
    Animation,
    Blob,
}

const TAG_TYPES: &[(&str, TagType)] = &[
    ("boolean", TagType::Boolean),
    ("uint32", TagType::Uint32),
    ("real64", TagType::Real64),
    ("string", TagType::String),
    ("real64-vec3", TagType::Real64Vec3),
    ("link", TagType::Link),
    ("animation", TagType::Animation),
    ("blob", TagType::Blob),
];

impl TagType {
    pub fn from_name(name: &str) -> Option<Self> {
        lookup(TAG_TYPES, name)
    }

    pub fn name(self) -> &'static str {
        reverse(TAG_TYPES, self)
    }
}

// Object methods

#[derive(Clone, Copy, Debug, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub enum MethodParamType {
    Int8,
    Int16,
    Int32,
    Uint8,
    Uint16,
    Uint32,
    Real32,
    Real64,
    Real32Vec2,
    Real32Vec3,
    Real32Vec4,
    Real64Vec2,
    Real64Vec3,
    Real64Vec4,
    Real32Mat4,
    Real32Mat9,
    Real32Mat16,
    Real64Mat4,
    Real64Mat9,
    Real64Mat16,
    String,
    Node,
    Layer,
}

const METHOD_PARAM_TYPES: &[(&str, MethodParamType)] = &[
    ("VN_O_METHOD_PTYPE_INT8", MethodParamType::Int8),
    ("VN_O_METHOD_PTYPE_INT16", MethodParamType::Int16),
    ("VN_O_METHOD_PTYPE_INT32", MethodParamType::Int32),
    ("VN_O_METHOD_PTYPE_UINT8", MethodParamType::Uint8),
    ("VN_O_METHOD_PTYPE_UINT16", MethodParamType::Uint16),
    ("VN_O_METHOD_PTYPE_UINT32", MethodParamType::Uint32),
    ("VN_O_METHOD_PTYPE_REAL32", MethodParamType::Real32),
    ("VN_O_METHOD_PTYPE_REAL64", MethodParamType::Real64),
    ("VN_O_METHOD_PTYPE_REAL32_VEC2", MethodParamType::Real32Vec2),
    ("VN_O_METHOD_PTYPE_REAL32_VEC3", MethodParamType::Real32Vec3),
    ("VN_O_METHOD_PTYPE_REAL32_VEC4", MethodParamType::Real32Vec4),
    ("VN_O_METHOD_PTYPE_REAL64_VEC2", MethodParamType::Real64Vec2),
    ("VN_O_METHOD_PTYPE_REAL64_VEC3", MethodParamType::Real64Vec3),
    ("VN_O_METHOD_PTYPE_REAL64_VEC4", MethodParamType::Real64Vec4),
    ("VN_O_METHOD_PTYPE_REAL32_MAT4", MethodParamType::Real32Mat4),
    ("VN_O_METHOD_PTYPE_REAL32_MAT9", MethodParamType::Real32Mat9),
    ("VN_O_METHOD_PTYPE_REAL32_MAT16", MethodParamType::Real32Mat16),
    ("VN_O_METHOD_PTYPE_REAL64_MAT4", MethodParamType::Real64Mat4),
    ("VN_O_METHOD_PTYPE_REAL64_MAT9", MethodParamType::Real64Mat9),
    ("VN_O_METHOD_PTYPE_REAL64_MAT16", MethodParamType::Real64Mat16),
    ("VN_O_METHOD_PTYPE_STRING", MethodParamType::String),
    ("VN_O_METHOD_PTYPE_NODE", MethodParamType::Node),
    ("VN_O_METHOD_PTYPE_LAYER", MethodParamType::Layer),
];

impl MethodParamType {
    pub fn from_name(name: &str) -> Option<Self> {
        lookup(METHOD_PARAM_TYPES, name)
    }

    pub fn name(self) -> &'static str {
        reverse(METHOD_PARAM_TYPES, self)
    }
}

// Geometry

#[derive(Clone, Copy, Debug, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub enum GeometryLayerType {
    VertexXyz,
    VertexUint32,
    VertexReal,
    PolygonCornerUint32,
    PolygonCornerReal,
    PolygonFaceUint8,
    PolygonFaceUint32,
    PolygonFaceReal,
}

const GEOMETRY_LAYER_TYPES: &[(&str, GeometryLayerType)] = &[
    ("vertex-xyz", GeometryLayerType::VertexXyz),
    ("vertex-uint32", GeometryLayerType::VertexUint32),
    ("vertex-real", GeometryLayerType::VertexReal),
    ("polygon-corner-uint32", GeometryLayerType::PolygonCornerUint32),
    ("polygon-corner-real", GeometryLayerType::PolygonCornerReal),
    ("polygon-face-uint8", GeometryLayerType::PolygonFaceUint8),
    ("polygon-face-uint32", GeometryLayerType::PolygonFaceUint32),
    ("polygon-face-real", GeometryLayerType::PolygonFaceReal),
    // spelling written by older savers
    ("polygon_face_uint8", GeometryLayerType::PolygonFaceUint8),
];

impl GeometryLayerType {
    pub fn from_name(name: &str) -> Option<Self> {
        lookup(GEOMETRY_LAYER_TYPES, name)
    }

    pub fn name(self) -> &'static str {
        reverse(GEOMETRY_LAYER_TYPES, self)
    }

    pub fn is_vertex(self) -> bool {
        matches!(
            self,
            GeometryLayerType::VertexXyz
                | GeometryLayerType::VertexUint32
                | GeometryLayerType::VertexReal
        )
    }
}

// Materials

#[derive(Clone, Copy, Debug, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub enum FragmentType {
    Color,
    Light,
    Reflection,
    Transparency,
    Volume,
    Geometry,
    Texture,
    Noise,
    Blender,
    Matrix,
    Ramp,
    Animation,
    Alternative,
    Output,
}

const FRAGMENT_TYPES: &[(&str, FragmentType)] = &[
    ("color", FragmentType::Color),
    ("light", FragmentType::Light),
    ("reflection", FragmentType::Reflection),
    ("transparency", FragmentType::Transparency),
    ("volume", FragmentType::Volume),
    ("geometry", FragmentType::Geometry),
    ("texture", FragmentType::Texture),
    ("noise", FragmentType::Noise),
    ("blender", FragmentType::Blender),
    ("matrix", FragmentType::Matrix),
    ("ramp", FragmentType::Ramp),
    ("animation", FragmentType::Animation),
    ("alternative", FragmentType::Alternative),
    ("output", FragmentType::Output),
];

impl FragmentType {
    pub fn from_name(name: &str) -> Option<Self> {
        lookup(FRAGMENT_TYPES, name)
    }

    pub fn name(self) -> &'static str {
        reverse(FRAGMENT_TYPES, self)
    }
}

#[derive(Clone, Copy, Debug, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub enum LightType {
    Direct,
    Ambient,
    DirectAndAmbient,
    BackDirect,
    BackAmbient,
    BackDirectAndAmbient,
}

const LIGHT_TYPES: &[(&str, LightType)] = &[
    ("VN_M_LIGHT_DIRECT", LightType::Direct),
    ("VN_M_LIGHT_AMBIENT", LightType::Ambient),
    ("VN_M_LIGHT_DIRECT_AND_AMBIENT", LightType::DirectAndAmbient),
    ("VN_M_LIGHT_BACK_DIRECT", LightType::BackDirect),
    ("VN_M_LIGHT_BACK_AMBIENT", LightType::BackAmbient),
    ("VN_M_LIGHT_BACK_DIRECT_AND_AMBIENT", LightType::BackDirectAndAmbient),
];

impl LightType {
    pub fn from_name(name: &str) -> Option<Self> {
        lookup(LIGHT_TYPES, name)
    }

    pub fn name(self) -> &'static str {
        reverse(LIGHT_TYPES, self)
    }
}

#[derive(Clone, Copy, Debug, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub enum NoiseType {
    PerlinZeroToOne,
    PerlinMinusOneToOne,
}

const NOISE_TYPES: &[(&str, NoiseType)] = &[
    ("VN_M_NOISE_PERLIN_ZERO_TO_ONE", NoiseType::PerlinZeroToOne),
    ("VN_M_NOISE_PERLIN_MINUS_ONE_TO_ONE", NoiseType::PerlinMinusOneToOne),
];

impl NoiseType {
    pub fn from_name(name: &str) -> Option<Self> {
        lookup(NOISE_TYPES, name)
    }

    pub fn name(self) -> &'static str {
        reverse(NOISE_TYPES, self)
    }
}

#[derive(Clone, Copy, Debug, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub enum BlendType {
    Fade,
    Add,
    Subtract,
    Multiply,
    Divide,
    Dot,
}

const BLEND_TYPES: &[(&str, BlendType)] = &[
    ("VN_M_BLEND_FADE", BlendType::Fade),
    ("VN_M_BLEND_ADD", BlendType::Add),
    ("VN_M_BLEND_SUBTRACT", BlendType::Subtract),
    ("VN_M_BLEND_MULTIPLY", BlendType::Multiply),
    ("VN_M_BLEND_DIVIDE", BlendType::Divide),
    ("VN_M_BLEND_DOT", BlendType::Dot),
];

impl BlendType {
    pub fn from_name(name: &str) -> Option<Self> {
        lookup(BLEND_TYPES, name)
    }

    pub fn name(self) -> &'static str {
        reverse(BLEND_TYPES, self)
    }
}

#[derive(Clone, Copy, Debug, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub enum RampType {
    Square,
    Linear,
    Smooth,
}

const RAMP_TYPES: &[(&str, RampType)] = &[
    ("VN_M_RAMP_SQUARE", RampType::Square),
    ("VN_M_RAMP_LINEAR", RampType::Linear),
    ("VN_M_RAMP_SMOOTH", RampType::Smooth),
];

impl RampType {
    pub fn from_name(name: &str) -> Option<Self> {
        lookup(RAMP_TYPES, name)
    }

    pub fn name(self) -> &'static str {
        reverse(RAMP_TYPES, self)
    }
}

#[derive(Clone, Copy, Debug, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub enum RampChannel {
    Red,
    Green,
    Blue,
}

const RAMP_CHANNELS: &[(&str, RampChannel)] = &[
    ("VN_M_RAMP_RED", RampChannel::Red),
    ("VN_M_RAMP_GREEN", RampChannel::Green),
    ("VN_M_RAMP_BLUE", RampChannel::Blue),
];

impl RampChannel {
    pub fn from_name(name: &str) -> Option<Self> {
        lookup(RAMP_CHANNELS, name)
    }

    pub fn name(self) -> &'static str {
        reverse(RAMP_CHANNELS, self)
    }
}

// Bitmaps

#[derive(Clone, Copy, Debug, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub enum BitmapLayerType {
    Uint1,
    Uint8,
    Uint16,
    Real32,
    Real64,
}

const BITMAP_LAYER_TYPES: &[(&str, BitmapLayerType)] = &[
    ("uint1", BitmapLayerType::Uint1),
    ("uint8", BitmapLayerType::Uint8),
    ("uint16", BitmapLayerType::Uint16),
    ("real32", BitmapLayerType::Real32),
    ("real64", BitmapLayerType::Real64),
];

impl BitmapLayerType {
    pub fn from_name(name: &str) -> Option<Self> {
        lookup(BITMAP_LAYER_TYPES, name)
    }

    pub fn name(self) -> &'static str {
        reverse(BITMAP_LAYER_TYPES, self)
    }
}

// Audio

#[derive(Clone, Copy, Debug, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub enum AudioBlockType {
    Int8,
    Int16,
    Int24,
    Int32,
    Real32,
    Real64,
}

const AUDIO_BLOCK_TYPES: &[(&str, AudioBlockType)] = &[
    ("int8", AudioBlockType::Int8),
    ("int16", AudioBlockType::Int16),
    ("int24", AudioBlockType::Int24),
    ("int32", AudioBlockType::Int32),
    ("real32", AudioBlockType::Real32),
    ("real64", AudioBlockType::Real64),
];

impl AudioBlockType {
    pub fn from_name(name: &str) -> Option<Self> {
        lookup(AUDIO_BLOCK_TYPES, name)
    }

    pub fn name(self) -> &'static str {
        reverse(AUDIO_BLOCK_TYPES, self)
    }

    /// Number of samples carried by one block of this type.
    pub fn block_size(self) -> usize {
        match self {
            AudioBlockType::Int8 => 1024,
            AudioBlockType::Int16 => 512,
            AudioBlockType::Int24 => 384,
            AudioBlockType::Int32 => 256,
            AudioBlockType::Real32 => 256,
            AudioBlockType::Real64 => 128,
        }
    }
}
