use std::collections::HashMap;

/// Names of the sub-resources of the current entity and the ids the host
/// assigned them.
///
/// A name is present with no id between the create request and its
/// acknowledgment. Cleared whenever traversal enters a new entity.
#[derive(Debug, Default)]
pub struct NameIndex {
    entries: HashMap<String, Option<u16>>,
}

impl NameIndex {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn clear(&mut self) {
        self.entries.clear();
    }

    /// Note that a create request for `name` is about to be sent. Returns
    /// false, changing nothing, when the name is already requested or known.
    pub fn request(&mut self, name: &str) -> bool {
        if self.entries.contains_key(name) {
            return false;
        }
        self.entries.insert(name.to_string(), None);
        true
    }

    pub fn resolve(&mut self, name: &str, id: u16) {
        self.entries.insert(name.to_string(), Some(id));
    }

    /// True when `name` was requested and has not been acknowledged yet.
    pub fn is_requested(&self, name: &str) -> bool {
        matches!(self.entries.get(name), Some(None))
    }

    pub fn get(&self, name: &str) -> Option<u16> {
        self.entries.get(name).copied().flatten()
    }

    pub fn len(&self) -> usize {
        self.entries.len()
    }

    pub fn is_empty(&self) -> bool {
        self.entries.is_empty()
    }

    /// Resolved entries, sorted by name.
    pub fn resolved(&self) -> Vec<(&str, u16)> {
        let mut output: Vec<(&str, u16)> = self
            .entries
            .iter()
            .filter_map(|(name, id)| id.map(|id| (name.as_str(), id)))
            .collect();
        output.sort();
        output
    }
}
