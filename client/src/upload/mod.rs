mod emit;
mod handlers;
mod id_table;
mod name_index;
mod pending;
mod scan;
mod traversal;
mod uploader;

pub use id_table::{EntityIdTable, FragmentIdTable, FragmentSlot};
pub use name_index::NameIndex;
pub use pending::{GroupKind, Pending, PendingTracker, SubresourceKind};
pub use traversal::{Phase, Traversal};
pub use uploader::Uploader;
