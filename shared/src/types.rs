use serde::{Deserialize, Serialize};

/// Identifier the host assigns to a created entity (a "node" on the host)
pub type EntityId = u32;
pub type LayerId = u16;
pub type FragmentId = u16;
pub type GroupId = u16;
pub type CurveId = u16;
pub type BufferId = u16;
pub type BoneId = u16;
/// Document-local number used for cross references before the host has
/// assigned its own identifier, e.g. the `7` in `n7` or the `3` in `f3`
pub type Ordinal = u32;

#[derive(Clone, Copy, Debug, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub enum Owner {
    Mine,
    Other,
}

impl Owner {
    pub fn is_mine(self) -> bool {
        self == Owner::Mine
    }
}
