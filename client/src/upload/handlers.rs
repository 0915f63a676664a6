use log::{debug, info, trace};

use vml_shared::{Command, EntityId, EntityKind, FragmentId, FragmentType, HostEvent, Owner};

use super::{
    pending::{GroupKind, Pending, SubresourceKind},
    uploader::Uploader,
};

/// Which name index an acknowledgment resolves into.
#[derive(Clone, Copy)]
enum Index {
    TagGroups,
    Names,
}

impl<'d> Uploader<'d> {
    /// Apply one host event to the dictionaries, tables and tracker.
    pub fn handle_event(&mut self, event: HostEvent) {
        match event {
            HostEvent::ConnectAccept { avatar, address } => {
                info!("connected as {} to {}", avatar, address);
                self.avatar = Some(avatar);
                self.send(Command::SubscribeIndex);
                if self.tracker.is_awaiting(Pending::Connect) {
                    self.tracker.complete();
                }
            }
            HostEvent::EntityCreated {
                entity,
                kind,
                owner,
            } => self.on_entity_created(entity, kind, owner),
            HostEvent::TagGroupCreated {
                entity,
                group,
                name,
            } => self.on_named_created(
                entity,
                Pending::GroupCreate(GroupKind::Tag),
                Index::TagGroups,
                &name,
                group,
                false,
            ),
            // the host creates default method groups and geometry layers on
            // its own, so those are stored even when not asked for
            HostEvent::MethodGroupCreated {
                entity,
                group,
                name,
            } => self.on_named_created(
                entity,
                Pending::GroupCreate(GroupKind::Method),
                Index::Names,
                &name,
                group,
                true,
            ),
            HostEvent::GeometryLayerCreated {
                entity, layer, name, ..
            } => self.on_named_created(
                entity,
                Pending::SubresourceCreate(SubresourceKind::Layer),
                Index::Names,
                &name,
                layer,
                true,
            ),
            HostEvent::BitmapLayerCreated {
                entity, layer, name, ..
            } => self.on_named_created(
                entity,
                Pending::SubresourceCreate(SubresourceKind::Layer),
                Index::Names,
                &name,
                layer,
                false,
            ),
            HostEvent::CurveCreated {
                entity, curve, name, ..
            } => self.on_named_created(
                entity,
                Pending::SubresourceCreate(SubresourceKind::Curve),
                Index::Names,
                &name,
                curve,
                false,
            ),
            HostEvent::TextBufferCreated {
                entity,
                buffer,
                name,
            }
            | HostEvent::AudioBufferCreated {
                entity,
                buffer,
                name,
            } => self.on_named_created(
                entity,
                Pending::SubresourceCreate(SubresourceKind::Buffer),
                Index::Names,
                &name,
                buffer,
                false,
            ),
            HostEvent::FragmentCreated {
                entity,
                fragment,
                fragment_type,
            } => self.on_fragment_created(entity, fragment, fragment_type),
        }
    }

    fn on_entity_created(&mut self, entity: EntityId, kind: EntityKind, owner: Owner) {
        if self.avatar == Some(entity) {
            trace!("ignoring creation of our avatar {}", entity);
            return;
        }
        if !owner.is_mine() {
            trace!("ignoring {} entity {} owned by another client", kind.name(), entity);
            return;
        }
        if !self.tracker.is_awaiting(Pending::EntityCreate) {
            trace!("ignoring unrequested {} entity {}", kind.name(), entity);
            return;
        }
        let Some(current) = self.current.as_mut() else {
            return;
        };
        if current.kind != kind {
            trace!(
                "ignoring {} entity {} while waiting for a {}",
                kind.name(),
                entity,
                current.kind.name()
            );
            return;
        }

        current.id = Some(entity);
        let (element, ordinal) = (current.element, current.ordinal);
        self.entity_ids.set(ordinal, entity);
        self.tracker.complete();
        info!("{} entity n{} created as {}", kind.name(), ordinal, entity);

        self.send(Command::SubscribeEntity { entity });
        if let Some(name) = self.document.attribute(element, "name") {
            debug!("naming entity {} \"{}\"", entity, name);
            self.send(Command::SetEntityName {
                entity,
                name: name.to_string(),
            });
        }
    }

    fn on_named_created(
        &mut self,
        entity: EntityId,
        pending: Pending,
        index: Index,
        name: &str,
        id: u16,
        store_unprompted: bool,
    ) {
        if self.current_entity_id() != Some(entity) {
            trace!("ignoring \"{}\" created in entity {}", name, entity);
            return;
        }
        let index = match index {
            Index::TagGroups => &mut self.tag_groups,
            Index::Names => &mut self.names,
        };
        let awaited = self.tracker.is_awaiting(pending) && index.is_requested(name);
        if awaited || store_unprompted {
            debug!("\"{}\" in entity {} has id {}", name, entity, id);
            index.resolve(name, id);
        }
        if awaited {
            self.tracker.complete();
        } else {
            trace!("\"{}\" in entity {} was not waited for", name, entity);
        }
    }

    fn on_fragment_created(
        &mut self,
        entity: EntityId,
        fragment: FragmentId,
        fragment_type: FragmentType,
    ) {
        if self.current_entity_id() != Some(entity) {
            trace!("ignoring fragment {} of entity {}", fragment, entity);
            return;
        }
        if !self
            .tracker
            .is_awaiting(Pending::SubresourceCreate(SubresourceKind::Fragment))
        {
            trace!("ignoring unrequested {} fragment {}", fragment_type.name(), fragment);
            return;
        }
        match self.fragments.resolve_first(fragment_type, fragment) {
            Some(ordinal) => {
                debug!(
                    "{} fragment f{} of entity {} has id {}",
                    fragment_type.name(),
                    ordinal,
                    entity,
                    fragment
                );
                self.tracker.complete();
            }
            None => trace!(
                "no {} fragment waiting for id {}",
                fragment_type.name(),
                fragment
            ),
        }
    }
}
