use log::debug;

use vml_shared::{Document, ElementId, EntityKind, UPLOAD_ORDER};

pub(crate) const ENTITY_PREFIX: &str = "node-";

/// Which entities a pass over the sequence uploads.
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub enum Phase {
    /// Everything except objects
    Assets,
    /// Objects only
    Objects,
}

/// Flattened, dependency-ordered walk over the entities of every loaded
/// document.
///
/// Top-level `node-<kind>` elements are ordered by kind priority, keeping
/// document order among equals; each entity then contributes its whole
/// subtree in pre-order.
#[derive(Debug)]
pub struct Traversal {
    sequence: Vec<ElementId>,
    position: usize,
    phase: Phase,
}

impl Traversal {
    pub fn new(document: &Document) -> Self {
        let entities = order_entities(document);
        debug!("upload order holds {} entities", entities.len());
        let sequence = entities
            .into_iter()
            .flat_map(|entity| document.preorder(entity))
            .collect();
        Self {
            sequence,
            position: 0,
            phase: Phase::Assets,
        }
    }

    pub fn phase(&self) -> Phase {
        self.phase
    }

    /// Restart from the beginning of the sequence for another pass.
    pub fn rewind(&mut self, phase: Phase) {
        self.position = 0;
        self.phase = phase;
    }

    pub fn current(&self) -> Option<ElementId> {
        self.sequence.get(self.position).copied()
    }

    pub fn is_finished(&self) -> bool {
        self.position >= self.sequence.len()
    }

    /// Move to the next element, descending into children.
    pub fn advance(&mut self) {
        if self.position < self.sequence.len() {
            self.position += 1;
        }
    }

    /// Move past `ancestor` and everything below it.
    pub fn skip_subtree(&mut self, document: &Document, ancestor: ElementId) {
        self.advance();
        while let Some(element) = self.current() {
            if !document.has_ancestor(element, ancestor) {
                break;
            }
            self.position += 1;
        }
    }

    pub fn len(&self) -> usize {
        self.sequence.len()
    }

    pub fn is_empty(&self) -> bool {
        self.sequence.is_empty()
    }
}

/// Entity kind named by a top-level element, e.g. `node-geometry`.
pub(crate) fn entity_kind(document: &Document, element: ElementId) -> Option<EntityKind> {
    document
        .name(element)
        .strip_prefix(ENTITY_PREFIX)
        .and_then(EntityKind::from_name)
}

/// Top-level entity elements of every document root, sorted by upload
/// priority. Unknown kinds sort last.
pub(crate) fn order_entities(document: &Document) -> Vec<ElementId> {
    let mut entities: Vec<ElementId> = document
        .roots()
        .iter()
        .flat_map(|root| document.children_prefixed(*root, ENTITY_PREFIX))
        .collect();
    entities.sort_by_key(|entity| {
        entity_kind(document, *entity)
            .map(EntityKind::priority)
            .unwrap_or(UPLOAD_ORDER.len())
    });
    entities
}
