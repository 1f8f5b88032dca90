//! Directory snapshots as tree objects
//!
//! A directory becomes a tree whose entries point at blobs (files) and
//! child trees (subdirectories):
//! - Each tree's id is derived from its children's ids
//! - Unchanged subtrees produce identical ids and share storage
//! - The root id uniquely identifies the whole directory contents

mod builder;
mod reader;

pub use builder::TreeBuilder;
pub use reader::TreeReader;
