use serde::{Deserialize, Serialize};

use crate::{
    type_maps::{BitmapLayerType, EntityKind, FragmentType, GeometryLayerType},
    types::{BufferId, CurveId, EntityId, FragmentId, GroupId, LayerId, Owner},
};

/// A notification delivered by the host.
///
/// Creation events are broadcast to every subscriber, so an event is not
/// necessarily the answer to a request made by this client.
#[derive(Clone, Debug, PartialEq, Serialize, Deserialize)]
pub enum HostEvent {
    ConnectAccept {
        avatar: EntityId,
        address: String,
    },
    EntityCreated {
        entity: EntityId,
        kind: EntityKind,
        owner: Owner,
    },
    TagGroupCreated {
        entity: EntityId,
        group: GroupId,
        name: String,
    },
    MethodGroupCreated {
        entity: EntityId,
        group: GroupId,
        name: String,
    },
    GeometryLayerCreated {
        entity: EntityId,
        layer: LayerId,
        name: String,
        layer_type: GeometryLayerType,
    },
    BitmapLayerCreated {
        entity: EntityId,
        layer: LayerId,
        name: String,
        layer_type: BitmapLayerType,
    },
    FragmentCreated {
        entity: EntityId,
        fragment: FragmentId,
        fragment_type: FragmentType,
    },
    CurveCreated {
        entity: EntityId,
        curve: CurveId,
        name: String,
        dimensions: u8,
    },
    TextBufferCreated {
        entity: EntityId,
        buffer: BufferId,
        name: String,
    },
    AudioBufferCreated {
        entity: EntityId,
        buffer: BufferId,
        name: String,
    },
}

impl HostEvent {
    pub fn entity(&self) -> EntityId {
        match self {
            HostEvent::ConnectAccept { avatar, .. } => *avatar,
            HostEvent::EntityCreated { entity, .. }
            | HostEvent::TagGroupCreated { entity, .. }
            | HostEvent::MethodGroupCreated { entity, .. }
            | HostEvent::GeometryLayerCreated { entity, .. }
            | HostEvent::BitmapLayerCreated { entity, .. }
            | HostEvent::FragmentCreated { entity, .. }
            | HostEvent::CurveCreated { entity, .. }
            | HostEvent::TextBufferCreated { entity, .. }
            | HostEvent::AudioBufferCreated { entity, .. } => *entity,
        }
    }
}
