//! Core data model types for tessera

mod entry;
mod kind;
mod object_id;

pub use entry::{EntryMode, TreeEntry};
pub use kind::ObjectKind;
pub use object_id::{ObjectId, HEX_LEN, ID_LEN};
