use log::warn;

use vml_shared::{EntityId, FragmentId, FragmentType, Ordinal, ORDINAL_MAX};

/// Maps document entity ordinals (`n7`) to host entity ids for the whole run.
///
/// Backed by a vector grown on demand; `None` marks an ordinal the host has
/// not acknowledged yet.
#[derive(Debug, Default)]
pub struct EntityIdTable {
    entries: Vec<Option<EntityId>>,
}

impl EntityIdTable {
    pub fn new() -> Self {
        Self::default()
    }

    /// Record the host id of `ordinal`. Returns false, changing nothing, for
    /// ordinals above [`ORDINAL_MAX`].
    pub fn set(&mut self, ordinal: Ordinal, id: EntityId) -> bool {
        if ordinal > ORDINAL_MAX {
            warn!("entity ordinal n{} is out of range", ordinal);
            return false;
        }
        let index = ordinal as usize;
        if index >= self.entries.len() {
            self.entries.resize(index + 1, None);
        }
        self.entries[index] = Some(id);
        true
    }

    pub fn get(&self, ordinal: Ordinal) -> Option<EntityId> {
        self.entries.get(ordinal as usize).copied().flatten()
    }

    /// Number of slots, including unresolved ones.
    pub fn len(&self) -> usize {
        self.entries.len()
    }

    pub fn is_empty(&self) -> bool {
        self.entries.is_empty()
    }

    pub fn resolved(&self) -> impl Iterator<Item = (Ordinal, EntityId)> + '_ {
        self.entries
            .iter()
            .enumerate()
            .filter_map(|(index, id)| id.map(|id| (index as Ordinal, id)))
    }
}

#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub struct FragmentSlot {
    pub fragment_type: FragmentType,
    pub id: Option<FragmentId>,
}

/// Maps fragment ordinals (`f3`) of the current material to host fragment ids.
///
/// Every slot is reserved with its fragment type when the create request is
/// sent. Acknowledgments carry only a type, so each one resolves the lowest
/// still-unresolved slot of that type.
#[derive(Debug, Default)]
pub struct FragmentIdTable {
    entries: Vec<Option<FragmentSlot>>,
}

impl FragmentIdTable {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn clear(&mut self) {
        self.entries.clear();
    }

    /// Reserve `ordinal` for a fragment about to be created. Returns false
    /// when the ordinal is already taken or above [`ORDINAL_MAX`].
    pub fn reserve(&mut self, ordinal: Ordinal, fragment_type: FragmentType) -> bool {
        if ordinal > ORDINAL_MAX {
            warn!("fragment ordinal f{} is out of range", ordinal);
            return false;
        }
        let index = ordinal as usize;
        if index >= self.entries.len() {
            self.entries.resize(index + 1, None);
        }
        if self.entries[index].is_some() {
            return false;
        }
        self.entries[index] = Some(FragmentSlot {
            fragment_type,
            id: None,
        });
        true
    }

    /// Resolve the first unresolved slot of `fragment_type`, returning its
    /// ordinal.
    pub fn resolve_first(&mut self, fragment_type: FragmentType, id: FragmentId) -> Option<Ordinal> {
        let (index, slot) = self.entries.iter_mut().enumerate().find_map(|(index, slot)| {
            slot.as_mut()
                .filter(|slot| slot.fragment_type == fragment_type && slot.id.is_none())
                .map(|slot| (index, slot))
        })?;
        slot.id = Some(id);
        Some(index as Ordinal)
    }

    pub fn slot(&self, ordinal: Ordinal) -> Option<FragmentSlot> {
        self.entries.get(ordinal as usize).copied().flatten()
    }

    pub fn get(&self, ordinal: Ordinal) -> Option<FragmentId> {
        self.slot(ordinal).and_then(|slot| slot.id)
    }

    pub fn unresolved(&self) -> usize {
        self.entries
            .iter()
            .flatten()
            .filter(|slot| slot.id.is_none())
            .count()
    }
}
