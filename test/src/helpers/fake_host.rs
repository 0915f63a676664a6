use std::{collections::BTreeMap, time::Duration};

use log::trace;

use vml_shared::{
    Command, EntityId, EntityKind, Fragment, FragmentId, GeometryLayerType, HostEvent, Owner,
    Session, SessionError,
};

/// Order in which the acknowledgments gathered between two polls are
/// delivered.
#[derive(Clone, Copy, Debug)]
pub enum Delivery {
    InOrder,
    Reversed,
    Shuffled(u64),
}

/// What the host knows about one entity.
#[derive(Clone, Debug, Default)]
pub struct HostEntity {
    pub kind: Option<EntityKind>,
    pub name: Option<String>,
    pub tag_groups: BTreeMap<String, u16>,
    /// Layers, method groups, curves and buffers, all of which share one
    /// namespace per entity
    pub subresources: BTreeMap<String, u16>,
    pub fragments: BTreeMap<FragmentId, Fragment>,
    pub texts: BTreeMap<u16, String>,
}

/// In-memory stand-in for a scene-graph host. Every creation request is
/// answered with an acknowledgment that becomes visible on the next poll, or
/// `latency` polls later.
pub struct FakeHost {
    delivery: Delivery,
    rng: fastrand::Rng,
    commands: Vec<Command>,
    /// Events with the poll count after which they may be delivered
    queued: Vec<(u64, HostEvent)>,
    polls: u64,
    latency: u64,
    entities: BTreeMap<EntityId, HostEntity>,
    next_entity: EntityId,
    avatar: EntityId,
    foreign_traffic: bool,
    chatter: bool,
    decoy: Option<EntityId>,
    silent: bool,
}

impl FakeHost {
    pub fn new() -> Self {
        Self::with_delivery(Delivery::InOrder)
    }

    pub fn with_delivery(delivery: Delivery) -> Self {
        let seed = match delivery {
            Delivery::Shuffled(seed) => seed,
            _ => 0,
        };
        let mut host = Self {
            delivery,
            rng: fastrand::Rng::with_seed(seed),
            commands: Vec::new(),
            queued: Vec::new(),
            polls: 0,
            latency: 0,
            entities: BTreeMap::new(),
            next_entity: 0,
            avatar: 0,
            foreign_traffic: false,
            chatter: false,
            decoy: None,
            silent: false,
        };
        host.avatar = host.allocate_entity(EntityKind::Object);
        host
    }

    /// Also announce an entity created by some other client before every
    /// entity this client asks for.
    pub fn with_foreign_traffic(mut self) -> Self {
        self.foreign_traffic = true;
        self
    }

    /// Announce one more entity of some other client on every poll, whether
    /// or not this client asked for anything.
    pub fn with_chatter(mut self) -> Self {
        self.chatter = true;
        self
    }

    /// Echo every group, layer, curve, buffer and fragment acknowledgment to
    /// an entity of another client first, with a different id.
    pub fn with_crosstalk(mut self) -> Self {
        let decoy = self.allocate_foreign(EntityKind::Geometry);
        self.decoy = Some(decoy);
        self
    }

    /// Hold every event back for `polls` extra polls.
    pub fn with_latency(mut self, polls: u64) -> Self {
        self.latency = polls;
        self
    }

    /// Accept commands but never acknowledge anything.
    pub fn silent(mut self) -> Self {
        self.silent = true;
        self
    }

    pub fn avatar(&self) -> EntityId {
        self.avatar
    }

    /// Every command received, in order.
    pub fn commands(&self) -> &[Command] {
        &self.commands
    }

    pub fn entity(&self, entity: EntityId) -> Option<&HostEntity> {
        self.entities.get(&entity)
    }

    /// Entities created on behalf of this client, excluding the avatar.
    pub fn created_entities(&self) -> impl Iterator<Item = (EntityId, &HostEntity)> {
        self.entities
            .iter()
            .filter(|(id, entity)| **id != self.avatar && entity.kind.is_some())
            .map(|(id, entity)| (*id, entity))
    }

    pub fn entity_named(&self, name: &str) -> Option<(EntityId, &HostEntity)> {
        self.created_entities()
            .find(|(_, entity)| entity.name.as_deref() == Some(name))
    }

    fn allocate_entity(&mut self, kind: EntityKind) -> EntityId {
        let id = self.next_entity;
        self.next_entity += 1;
        let mut entity = HostEntity {
            kind: Some(kind),
            ..HostEntity::default()
        };
        if kind == EntityKind::Geometry {
            entity.subresources.insert("vertex".to_string(), 0);
            entity.subresources.insert("polygon".to_string(), 1);
        }
        self.entities.insert(id, entity);
        id
    }

    /// An entity that belongs to nobody this host reports on.
    fn allocate_foreign(&mut self, kind: EntityKind) -> EntityId {
        let foreign = self.allocate_entity(kind);
        if let Some(entity) = self.entities.get_mut(&foreign) {
            entity.kind = None;
        }
        foreign
    }

    fn announce(&mut self, event: HostEvent) {
        if self.silent {
            return;
        }
        if let Some(echo) = self.decoy.and_then(|decoy| crosstalk(&event, decoy)) {
            trace!("host queues decoy {:?}", echo);
            self.queued.push((self.polls + self.latency, echo));
        }
        trace!("host queues {:?}", event);
        self.queued.push((self.polls + self.latency, event));
    }

    /// Id of subresource `name`, created on first use.
    fn subresource(&mut self, entity: EntityId, name: &str) -> u16 {
        let Some(host_entity) = self.entities.get_mut(&entity) else {
            return u16::MAX;
        };
        let next = host_entity.subresources.len() as u16;
        *host_entity
            .subresources
            .entry(name.to_string())
            .or_insert(next)
    }

    fn apply(&mut self, command: &Command) {
        match command {
            Command::Connect { address, .. } => self.announce(HostEvent::ConnectAccept {
                avatar: self.avatar,
                address: address.clone(),
            }),
            Command::SubscribeIndex => self.announce(HostEvent::EntityCreated {
                entity: self.avatar,
                kind: EntityKind::Object,
                owner: Owner::Mine,
            }),
            Command::CreateEntity { kind } => {
                if self.foreign_traffic {
                    let foreign = self.allocate_foreign(*kind);
                    self.announce(HostEvent::EntityCreated {
                        entity: foreign,
                        kind: *kind,
                        owner: Owner::Other,
                    });
                }
                let entity = self.allocate_entity(*kind);
                self.announce(HostEvent::EntityCreated {
                    entity,
                    kind: *kind,
                    owner: Owner::Mine,
                });
            }
            Command::SubscribeEntity { entity } => {
                let Some(host_entity) = self.entities.get(entity) else {
                    return;
                };
                if host_entity.kind == Some(EntityKind::Geometry) {
                    let layers: Vec<(String, u16)> = host_entity
                        .subresources
                        .iter()
                        .map(|(name, id)| (name.clone(), *id))
                        .collect();
                    for (name, layer) in layers {
                        let layer_type = if name == "polygon" {
                            GeometryLayerType::PolygonCornerUint32
                        } else {
                            GeometryLayerType::VertexXyz
                        };
                        self.announce(HostEvent::GeometryLayerCreated {
                            entity: *entity,
                            layer,
                            name,
                            layer_type,
                        });
                    }
                }
            }
            Command::SetEntityName { entity, name } => {
                if let Some(host_entity) = self.entities.get_mut(entity) {
                    host_entity.name = Some(name.clone());
                }
            }
            Command::CreateTagGroup { entity, name } => {
                let Some(host_entity) = self.entities.get_mut(entity) else {
                    return;
                };
                let next = host_entity.tag_groups.len() as u16;
                let group = *host_entity.tag_groups.entry(name.clone()).or_insert(next);
                self.announce(HostEvent::TagGroupCreated {
                    entity: *entity,
                    group,
                    name: name.clone(),
                });
            }
            Command::CreateMethodGroup { entity, name } => {
                let group = self.subresource(*entity, name);
                self.announce(HostEvent::MethodGroupCreated {
                    entity: *entity,
                    group,
                    name: name.clone(),
                });
            }
            Command::CreateGeometryLayer {
                entity,
                name,
                layer_type,
            } => {
                let layer = self.subresource(*entity, name);
                self.announce(HostEvent::GeometryLayerCreated {
                    entity: *entity,
                    layer,
                    name: name.clone(),
                    layer_type: *layer_type,
                });
            }
            Command::CreateBitmapLayer {
                entity,
                name,
                layer_type,
            } => {
                let layer = self.subresource(*entity, name);
                self.announce(HostEvent::BitmapLayerCreated {
                    entity: *entity,
                    layer,
                    name: name.clone(),
                    layer_type: *layer_type,
                });
            }
            Command::CreateCurve {
                entity,
                name,
                dimensions,
            } => {
                let curve = self.subresource(*entity, name);
                self.announce(HostEvent::CurveCreated {
                    entity: *entity,
                    curve,
                    name: name.clone(),
                    dimensions: *dimensions,
                });
            }
            Command::CreateTextBuffer { entity, name } => {
                let buffer = self.subresource(*entity, name);
                self.announce(HostEvent::TextBufferCreated {
                    entity: *entity,
                    buffer,
                    name: name.clone(),
                });
            }
            Command::CreateAudioBuffer { entity, name, .. } => {
                let buffer = self.subresource(*entity, name);
                self.announce(HostEvent::AudioBufferCreated {
                    entity: *entity,
                    buffer,
                    name: name.clone(),
                });
            }
            Command::CreateFragment {
                entity,
                fragment,
                value,
            } => {
                let Some(host_entity) = self.entities.get_mut(entity) else {
                    return;
                };
                match fragment {
                    Some(fragment) => {
                        host_entity.fragments.insert(*fragment, value.clone());
                    }
                    None => {
                        let fragment = host_entity.fragments.len() as FragmentId;
                        host_entity.fragments.insert(fragment, value.clone());
                        self.announce(HostEvent::FragmentCreated {
                            entity: *entity,
                            fragment,
                            fragment_type: value.fragment_type(),
                        });
                    }
                }
            }
            Command::SetText {
                entity,
                buffer,
                pos,
                text,
                ..
            } => {
                if let Some(host_entity) = self.entities.get_mut(entity) {
                    let content = host_entity.texts.entry(*buffer).or_default();
                    content.truncate(*pos as usize);
                    content.push_str(text);
                }
            }
            _ => {}
        }
    }
}

/// The same acknowledgment for `decoy`, with the assigned id shifted so a
/// mix-up shows in the uploaded data.
fn crosstalk(event: &HostEvent, decoy: EntityId) -> Option<HostEvent> {
    const SHIFT: u16 = 100;
    let mut echo = event.clone();
    match &mut echo {
        HostEvent::TagGroupCreated { entity, group: id, .. }
        | HostEvent::MethodGroupCreated { entity, group: id, .. }
        | HostEvent::GeometryLayerCreated { entity, layer: id, .. }
        | HostEvent::BitmapLayerCreated { entity, layer: id, .. }
        | HostEvent::FragmentCreated { entity, fragment: id, .. }
        | HostEvent::CurveCreated { entity, curve: id, .. }
        | HostEvent::TextBufferCreated { entity, buffer: id, .. }
        | HostEvent::AudioBufferCreated { entity, buffer: id, .. } => {
            *entity = decoy;
            *id += SHIFT;
        }
        HostEvent::ConnectAccept { .. } | HostEvent::EntityCreated { .. } => return None,
    }
    Some(echo)
}

impl Default for FakeHost {
    fn default() -> Self {
        Self::new()
    }
}

impl Session for FakeHost {
    fn send(&mut self, command: Command) -> Result<(), SessionError> {
        if matches!(self.commands.last(), Some(Command::Terminate { .. })) {
            return Err(SessionError::Closed);
        }
        self.apply(&command);
        self.commands.push(command);
        Ok(())
    }

    fn poll(&mut self, _timeout: Duration) -> Result<Vec<HostEvent>, SessionError> {
        self.polls += 1;
        if self.chatter {
            let foreign = self.allocate_foreign(EntityKind::Object);
            self.announce(HostEvent::EntityCreated {
                entity: foreign,
                kind: EntityKind::Object,
                owner: Owner::Other,
            });
        }
        let polls = self.polls;
        let (due, later): (Vec<_>, Vec<_>) = std::mem::take(&mut self.queued)
            .into_iter()
            .partition(|(after, _)| *after < polls);
        self.queued = later;
        let mut events: Vec<HostEvent> = due.into_iter().map(|(_, event)| event).collect();
        match self.delivery {
            Delivery::InOrder => {}
            Delivery::Reversed => events.reverse(),
            Delivery::Shuffled(_) => self.rng.shuffle(&mut events),
        }
        Ok(events)
    }

    fn outstanding(&self) -> usize {
        self.queued.len()
    }
}
