use serde::{Deserialize, Serialize};

use crate::{
    type_maps::{
        AudioBlockType, BitmapLayerType, BlendType, EntityKind, FragmentType, GeometryLayerType,
        LightType, MethodParamType, NoiseType, RampChannel, RampType,
    },
    types::{BoneId, BufferId, CurveId, EntityId, FragmentId, GroupId, LayerId},
};

/// A request sent from the loader to the host.
///
/// Identifiers carried here are always host-assigned; document ordinals are
/// remapped before a command is built, so an unresolved reference can only
/// appear as `None` in the fields that allow it.
#[derive(Clone, Debug, PartialEq, Serialize, Deserialize)]
pub enum Command {
    Connect {
        name: String,
        password: String,
        address: String,
    },
    Terminate {
        message: String,
    },
    SubscribeIndex,

    // Entities
    CreateEntity {
        kind: EntityKind,
    },
    SubscribeEntity {
        entity: EntityId,
    },
    SetEntityName {
        entity: EntityId,
        name: String,
    },

    // Tags
    CreateTagGroup {
        entity: EntityId,
        name: String,
    },
    CreateTag {
        entity: EntityId,
        group: GroupId,
        name: String,
        value: TagValue,
    },

    // Objects
    ObjectSetPosition {
        entity: EntityId,
        position: [f64; 3],
    },
    ObjectSetRotation {
        entity: EntityId,
        rotation: [f64; 4],
    },
    ObjectSetScale {
        entity: EntityId,
        scale: [f64; 3],
    },
    ObjectSetLight {
        entity: EntityId,
        color: [f64; 3],
    },
    ObjectSetLink {
        entity: EntityId,
        link: u16,
        target_entity: EntityId,
        label: String,
        target: u32,
    },
    CreateMethodGroup {
        entity: EntityId,
        name: String,
    },
    CreateMethod {
        entity: EntityId,
        group: GroupId,
        name: String,
        params: Vec<MethodParam>,
    },

    // Geometry
    CreateGeometryLayer {
        entity: EntityId,
        name: String,
        layer_type: GeometryLayerType,
    },
    SetVertex {
        entity: EntityId,
        layer: LayerId,
        index: u32,
        value: VertexValue,
    },
    SetPolygon {
        entity: EntityId,
        layer: LayerId,
        index: u32,
        value: PolygonValue,
    },
    SetVertexCrease {
        entity: EntityId,
        layer: String,
        default: u32,
    },
    SetEdgeCrease {
        entity: EntityId,
        layer: String,
        default: u32,
    },
    CreateBone {
        entity: EntityId,
        bone: BoneId,
        weight: String,
        reference: String,
        parent: Option<BoneId>,
        position_label: String,
        rotation_label: String,
    },

    // Materials
    /// `fragment` is `None` when asking the host to allocate a new fragment.
    CreateFragment {
        entity: EntityId,
        fragment: Option<FragmentId>,
        value: Fragment,
    },

    // Bitmaps
    SetBitmapDimensions {
        entity: EntityId,
        width: u16,
        height: u16,
        depth: u16,
    },
    CreateBitmapLayer {
        entity: EntityId,
        name: String,
        layer_type: BitmapLayerType,
    },
    SetTile {
        entity: EntityId,
        layer: LayerId,
        tile_x: u16,
        tile_y: u16,
        z: u16,
        pixels: TilePixels,
    },

    // Curves
    CreateCurve {
        entity: EntityId,
        name: String,
        dimensions: u8,
    },
    SetCurveKey {
        entity: EntityId,
        curve: CurveId,
        key: CurveKey,
    },

    // Text
    SetTextLanguage {
        entity: EntityId,
        language: String,
    },
    CreateTextBuffer {
        entity: EntityId,
        name: String,
    },
    SetText {
        entity: EntityId,
        buffer: BufferId,
        pos: u32,
        length: u32,
        text: String,
    },

    // Audio
    CreateAudioBuffer {
        entity: EntityId,
        name: String,
        block_type: AudioBlockType,
        frequency: f64,
    },
    SetAudioBlock {
        entity: EntityId,
        buffer: BufferId,
        index: u32,
        samples: AudioSamples,
    },
}

impl Command {
    /// The entity this command addresses, if any.
    pub fn entity(&self) -> Option<EntityId> {
        match self {
            Command::Connect { .. }
            | Command::Terminate { .. }
            | Command::SubscribeIndex
            | Command::CreateEntity { .. } => None,
            Command::SubscribeEntity { entity }
            | Command::SetEntityName { entity, .. }
            | Command::CreateTagGroup { entity, .. }
            | Command::CreateTag { entity, .. }
            | Command::ObjectSetPosition { entity, .. }
            | Command::ObjectSetRotation { entity, .. }
            | Command::ObjectSetScale { entity, .. }
            | Command::ObjectSetLight { entity, .. }
            | Command::ObjectSetLink { entity, .. }
            | Command::CreateMethodGroup { entity, .. }
            | Command::CreateMethod { entity, .. }
            | Command::CreateGeometryLayer { entity, .. }
            | Command::SetVertex { entity, .. }
            | Command::SetPolygon { entity, .. }
            | Command::SetVertexCrease { entity, .. }
            | Command::SetEdgeCrease { entity, .. }
            | Command::CreateBone { entity, .. }
            | Command::CreateFragment { entity, .. }
            | Command::SetBitmapDimensions { entity, .. }
            | Command::CreateBitmapLayer { entity, .. }
            | Command::SetTile { entity, .. }
            | Command::CreateCurve { entity, .. }
            | Command::SetCurveKey { entity, .. }
            | Command::SetTextLanguage { entity, .. }
            | Command::CreateTextBuffer { entity, .. }
            | Command::SetText { entity, .. }
            | Command::CreateAudioBuffer { entity, .. }
            | Command::SetAudioBlock { entity, .. } => Some(*entity),
        }
    }
}

#[derive(Clone, Debug, PartialEq, Serialize, Deserialize)]
pub enum TagValue {
    Boolean(bool),
    Uint32(u32),
    Real64(f64),
    String(String),
    Real64Vec3([f64; 3]),
    Link(EntityId),
    Animation { curve: EntityId, start: u32, end: u32 },
    Blob(Vec<u8>),
}

#[derive(Clone, Debug, PartialEq, Eq, Serialize, Deserialize)]
pub struct MethodParam {
    pub name: String,
    pub param_type: MethodParamType,
}

#[derive(Clone, Copy, Debug, PartialEq, Serialize, Deserialize)]
pub enum VertexValue {
    Xyz([f64; 3]),
    Uint32(u32),
    Real(f64),
}

#[derive(Clone, Copy, Debug, PartialEq, Serialize, Deserialize)]
pub enum PolygonValue {
    CornerUint32([u32; 4]),
    CornerReal([f64; 4]),
    FaceUint8(u8),
    FaceUint32(u32),
    FaceReal(f64),
}

#[derive(Clone, Debug, PartialEq, Serialize, Deserialize)]
pub enum TilePixels {
    Uint8(Vec<u8>),
    Uint16(Vec<u16>),
    Real32(Vec<f32>),
    Real64(Vec<f64>),
}

#[derive(Clone, Debug, PartialEq, Serialize, Deserialize)]
pub struct CurveKey {
    pub key: u32,
    pub pos: f64,
    pub value: Vec<f64>,
    pub pre_value: Vec<f64>,
    pub pre_pos: Vec<u32>,
    pub post_value: Vec<f64>,
    pub post_pos: Vec<u32>,
}

#[derive(Clone, Debug, PartialEq, Serialize, Deserialize)]
pub enum AudioSamples {
    Int8(Vec<i8>),
    Int16(Vec<i16>),
    Int24(Vec<i32>),
    Int32(Vec<i32>),
    Real32(Vec<f32>),
    Real64(Vec<f64>),
}

impl AudioSamples {
    pub fn len(&self) -> usize {
        match self {
            AudioSamples::Int8(samples) => samples.len(),
            AudioSamples::Int16(samples) => samples.len(),
            AudioSamples::Int24(samples) | AudioSamples::Int32(samples) => samples.len(),
            AudioSamples::Real32(samples) => samples.len(),
            AudioSamples::Real64(samples) => samples.len(),
        }
    }

    pub fn is_empty(&self) -> bool {
        self.len() == 0
    }
}

#[derive(Clone, Copy, Debug, PartialEq, Serialize, Deserialize)]
pub struct RampPoint {
    pub pos: f64,
    pub color: [f64; 3],
}

/// One node of a material's fragment graph.
///
/// Fragment references are host fragment ids; entity references are host
/// entity ids. `None` means "no reference".
#[derive(Clone, Debug, PartialEq, Serialize, Deserialize)]
pub enum Fragment {
    Color {
        color: [f64; 3],
    },
    Light {
        light_type: LightType,
        normal_falloff: f64,
        brdf: Option<EntityId>,
        brdf_layers: [String; 3],
    },
    Reflection {
        normal_falloff: f64,
    },
    Transparency {
        normal_falloff: f64,
        refraction_index: f64,
    },
    Volume {
        diffusion: f64,
        color: [f64; 3],
        lighting: Option<FragmentId>,
    },
    Geometry {
        layers: [String; 3],
    },
    Texture {
        bitmap: Option<EntityId>,
        layers: [String; 3],
        mapping: Option<FragmentId>,
    },
    Noise {
        noise_type: NoiseType,
        mapping: Option<FragmentId>,
    },
    Blender {
        blend_type: BlendType,
        data_a: Option<FragmentId>,
        data_b: Option<FragmentId>,
        control: Option<FragmentId>,
    },
    Matrix {
        matrix: [f64; 16],
        data: Option<FragmentId>,
    },
    Ramp {
        ramp_type: RampType,
        channel: RampChannel,
        mapping: Option<FragmentId>,
        points: Vec<RampPoint>,
    },
    Animation {
        label: String,
    },
    Alternative {
        alt_a: Option<FragmentId>,
        alt_b: Option<FragmentId>,
    },
    Output {
        label: String,
        front: Option<FragmentId>,
        back: Option<FragmentId>,
    },
}

impl Fragment {
    /// A fragment of the given type with every field zeroed and every
    /// reference empty, used to reserve a host id before its contents are
    /// known.
    pub fn cleared(fragment_type: FragmentType) -> Self {
        match fragment_type {
            FragmentType::Color => Fragment::Color { color: [0.0; 3] },
            FragmentType::Light => Fragment::Light {
                light_type: LightType::Direct,
                normal_falloff: 0.0,
                brdf: None,
                brdf_layers: Default::default(),
            },
            FragmentType::Reflection => Fragment::Reflection {
                normal_falloff: 0.0,
            },
            FragmentType::Transparency => Fragment::Transparency {
                normal_falloff: 0.0,
                refraction_index: 0.0,
            },
            FragmentType::Volume => Fragment::Volume {
                diffusion: 0.0,
                color: [0.0; 3],
                lighting: None,
            },
            FragmentType::Geometry => Fragment::Geometry {
                layers: Default::default(),
            },
            FragmentType::Texture => Fragment::Texture {
                bitmap: None,
                layers: Default::default(),
                mapping: None,
            },
            FragmentType::Noise => Fragment::Noise {
                noise_type: NoiseType::PerlinZeroToOne,
                mapping: None,
            },
            FragmentType::Blender => Fragment::Blender {
                blend_type: BlendType::Fade,
                data_a: None,
                data_b: None,
                control: None,
            },
            FragmentType::Matrix => Fragment::Matrix {
                matrix: [0.0; 16],
                data: None,
            },
            FragmentType::Ramp => Fragment::Ramp {
                ramp_type: RampType::Square,
                channel: RampChannel::Red,
                mapping: None,
                points: Vec::new(),
            },
            FragmentType::Animation => Fragment::Animation {
                label: String::new(),
            },
            FragmentType::Alternative => Fragment::Alternative {
                alt_a: None,
                alt_b: None,
            },
            FragmentType::Output => Fragment::Output {
                label: String::new(),
                front: None,
                back: None,
            },
        }
    }

    pub fn fragment_type(&self) -> FragmentType {
        match self {
            Fragment::Color { .. } => FragmentType::Color,
            Fragment::Light { .. } => FragmentType::Light,
            Fragment::Reflection { .. } => FragmentType::Reflection,
            Fragment::Transparency { .. } => FragmentType::Transparency,
            Fragment::Volume { .. } => FragmentType::Volume,
            Fragment::Geometry { .. } => FragmentType::Geometry,
            Fragment::Texture { .. } => FragmentType::Texture,
            Fragment::Noise { .. } => FragmentType::Noise,
            Fragment::Blender { .. } => FragmentType::Blender,
            Fragment::Matrix { .. } => FragmentType::Matrix,
            Fragment::Ramp { .. } => FragmentType::Ramp,
            Fragment::Animation { .. } => FragmentType::Animation,
            Fragment::Alternative { .. } => FragmentType::Alternative,
            Fragment::Output { .. } => FragmentType::Output,
        }
    }

    /// Every fragment id this fragment points at.
    pub fn fragment_refs(&self) -> Vec<FragmentId> {
        let refs: Vec<Option<FragmentId>> = match self {
            Fragment::Volume { lighting, .. } => vec![*lighting],
            Fragment::Texture { mapping, .. }
            | Fragment::Noise { mapping, .. }
            | Fragment::Ramp { mapping, .. } => vec![*mapping],
            Fragment::Blender {
                data_a,
                data_b,
                control,
                ..
            } => vec![*data_a, *data_b, *control],
            Fragment::Matrix { data, .. } => vec![*data],
            Fragment::Alternative { alt_a, alt_b } => vec![*alt_a, *alt_b],
            Fragment::Output { front, back, .. } => vec![*front, *back],
            Fragment::Color { .. }
            | Fragment::Light { .. }
            | Fragment::Reflection { .. }
            | Fragment::Transparency { .. }
            | Fragment::Geometry { .. }
            | Fragment::Animation { .. } => Vec::new(),
        };
        refs.into_iter().flatten().collect()
    }
}
