use log::{error, info, trace, warn};

use vml_shared::{Command, Document, ElementId, EntityId, EntityKind, Ordinal};

use crate::client_config::ClientConfig;

use super::{
    id_table::{EntityIdTable, FragmentIdTable},
    name_index::NameIndex,
    pending::{Pending, PendingTracker},
    scan,
    traversal::{Phase, Traversal, ENTITY_PREFIX},
};

/// The entity whose subtree is being uploaded.
#[derive(Clone, Copy, Debug)]
pub(crate) struct CurrentEntity {
    pub(crate) element: ElementId,
    pub(crate) kind: EntityKind,
    pub(crate) ordinal: Ordinal,
    /// Host id, known once the create request is acknowledged
    pub(crate) id: Option<EntityId>,
}

/// Turns a loaded [`Document`] into a stream of host commands, one element at
/// a time, and correlates host acknowledgments back to the elements that
/// caused them.
///
/// The uploader never talks to a session itself: commands collect in an
/// outbox drained with [`Uploader::take_outgoing_commands`], and events are
/// applied with [`Uploader::handle_event`].
pub struct Uploader<'d> {
    pub(crate) document: &'d Document,
    pub(crate) traversal: Traversal,
    pub(crate) current: Option<CurrentEntity>,
    pub(crate) avatar: Option<EntityId>,
    pub(crate) tracker: PendingTracker,
    pub(crate) tag_groups: NameIndex,
    pub(crate) names: NameIndex,
    pub(crate) entity_ids: EntityIdTable,
    pub(crate) fragments: FragmentIdTable,
    pub(crate) text_chunk_size: usize,
    outgoing_commands: Vec<Command>,
}

impl<'d> Uploader<'d> {
    pub fn new(document: &'d Document, config: &ClientConfig) -> Self {
        Self {
            document,
            traversal: Traversal::new(document),
            current: None,
            avatar: None,
            tracker: PendingTracker::new(),
            tag_groups: NameIndex::new(),
            names: NameIndex::new(),
            entity_ids: EntityIdTable::new(),
            fragments: FragmentIdTable::new(),
            text_chunk_size: config.text_chunk_size.max(1),
            outgoing_commands: Vec::new(),
        }
    }

    /// Queue the connect request and wait for the host to accept it.
    pub fn connect(&mut self, name: &str, password: &str, address: &str) {
        info!("connecting to {} as \"{}\"", address, name);
        self.send(Command::Connect {
            name: name.to_string(),
            password: password.to_string(),
            address: address.to_string(),
        });
        self.tracker.begin(Pending::Connect, false);
    }

    pub fn is_connected(&self) -> bool {
        self.avatar.is_some()
    }

    /// True when no acknowledgment is owed and the next element may be
    /// processed.
    pub fn is_idle(&self) -> bool {
        self.tracker.is_idle()
    }

    /// True when the current pass has reached the end of the sequence.
    pub fn is_finished(&self) -> bool {
        self.traversal.is_finished()
    }

    pub fn phase(&self) -> Phase {
        self.traversal.phase()
    }

    pub fn start_phase(&mut self, phase: Phase) {
        info!("starting {:?} pass over {} elements", phase, self.traversal.len());
        self.traversal.rewind(phase);
    }

    pub fn tracker(&self) -> &PendingTracker {
        &self.tracker
    }

    pub fn entity_ids(&self) -> &EntityIdTable {
        &self.entity_ids
    }

    pub fn fragments(&self) -> &FragmentIdTable {
        &self.fragments
    }

    /// Named sub-resources (layers, method groups, curves, buffers) of the
    /// current entity.
    pub fn names(&self) -> &NameIndex {
        &self.names
    }

    pub fn tag_groups(&self) -> &NameIndex {
        &self.tag_groups
    }

    /// Host id of the entity currently being uploaded.
    pub fn current_entity_id(&self) -> Option<EntityId> {
        self.current.and_then(|current| current.id)
    }

    pub fn take_outgoing_commands(&mut self) -> Vec<Command> {
        std::mem::take(&mut self.outgoing_commands)
    }

    pub(crate) fn send(&mut self, command: Command) {
        trace!("queue {:?}", command);
        self.outgoing_commands.push(command);
    }

    /// Process the element under the cursor. Does nothing, returning false,
    /// while an acknowledgment is owed or once the pass is finished.
    pub fn step(&mut self) -> bool {
        if !self.tracker.is_idle() {
            return false;
        }
        let Some(element) = self.traversal.current() else {
            return false;
        };
        if self.document.name(element).starts_with(ENTITY_PREFIX) {
            self.enter_entity(element);
        } else {
            self.process_element(element);
        }
        true
    }

    fn enter_entity(&mut self, element: ElementId) {
        let document = self.document;
        let name = document.name(element);
        self.current = None;

        let Some(kind) = name
            .strip_prefix(ENTITY_PREFIX)
            .and_then(EntityKind::from_name)
        else {
            if self.traversal.phase() == Phase::Assets {
                error!("unknown entity kind <{}>, skipping it", name);
            }
            self.traversal.skip_subtree(document, element);
            return;
        };

        let wanted = match self.traversal.phase() {
            Phase::Assets => kind != EntityKind::Object,
            Phase::Objects => kind == EntityKind::Object,
        };
        if !wanted {
            trace!("{} entity not uploaded in this pass", kind.name());
            self.traversal.skip_subtree(document, element);
            return;
        }

        let Some(ordinal) = document
            .attribute(element, "id")
            .and_then(|id| scan::ordinal(id, 'n'))
        else {
            warn!(
                "{} entity without a usable id attribute, skipping it",
                kind.name()
            );
            self.traversal.skip_subtree(document, element);
            return;
        };

        trace!("creating {} entity n{}", kind.name(), ordinal);
        self.current = Some(CurrentEntity {
            element,
            kind,
            ordinal,
            id: None,
        });
        self.traversal.advance();
        self.send(Command::CreateEntity { kind });
        self.tracker.begin(Pending::EntityCreate, false);
        self.tag_groups.clear();
        self.names.clear();
    }

    fn process_element(&mut self, element: ElementId) {
        let document = self.document;
        let Some(CurrentEntity {
            kind,
            id: Some(entity),
            ..
        }) = self.current
        else {
            warn!("<{}> outside of an uploaded entity, skipping", document.name(element));
            self.traversal.skip_subtree(document, element);
            return;
        };

        if self.process_common(element, entity) {
            return;
        }
        let handled = match kind {
            EntityKind::Object => self.process_object(element, entity),
            EntityKind::Geometry => self.process_geometry(element, entity),
            EntityKind::Material => self.process_material(element, entity),
            EntityKind::Bitmap => self.process_bitmap(element, entity),
            EntityKind::Curve => self.process_curve(element, entity),
            EntityKind::Text => self.process_text(element, entity),
            EntityKind::Audio => self.process_audio(element, entity),
        };
        if !handled {
            warn!(
                "unknown element <{}> in {} entity {}, skipping it",
                document.name(element),
                kind.name(),
                entity
            );
            self.traversal.skip_subtree(document, element);
        }
    }

    /// Host id of entity reference `name` (an `n7` value), read from a child
    /// element of `element`.
    pub(crate) fn entity_ref(&self, element: ElementId, name: &str) -> Option<EntityId> {
        let text = self.document.eval_single(element, name)?;
        let resolved = scan::ordinal(text, 'n').and_then(|ordinal| self.entity_ids.get(ordinal));
        if resolved.is_none() {
            warn!("unresolved entity reference \"{}\" in <{}>", text, name);
        }
        resolved
    }
}
