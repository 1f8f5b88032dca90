//! Tree entry types

use super::{ObjectId, ObjectKind};
use serde::{Deserialize, Serialize};
use std::fmt;

/// Entry type inside a tree, mapped to its fixed mode token
#[derive(Clone, Copy, Debug, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum EntryMode {
    /// A regular file, stored as a blob
    File,
    /// A subdirectory, stored as a tree
    Directory,
}

impl EntryMode {
    pub const FILE: &'static str = "100644";
    pub const DIRECTORY: &'static str = "40000";

    pub fn as_str(&self) -> &'static str {
        match self {
            EntryMode::File => Self::FILE,
            EntryMode::Directory => Self::DIRECTORY,
        }
    }

    pub fn from_bytes(b: &[u8]) -> Option<Self> {
        match b {
            b"100644" => Some(EntryMode::File),
            b"40000" => Some(EntryMode::Directory),
            _ => None,
        }
    }

    /// Kind of object an entry with this mode points at
    pub fn object_kind(&self) -> ObjectKind {
        match self {
            EntryMode::File => ObjectKind::Blob,
            EntryMode::Directory => ObjectKind::Tree,
        }
    }
}

impl fmt::Display for EntryMode {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

/// One named reference inside a tree object
///
/// `name` is kept as raw bytes: it is ordered and hashed byte-wise and
/// never contains `NUL` or `/`.
#[derive(Clone, Debug, PartialEq, Eq, Serialize, Deserialize)]
pub struct TreeEntry {
    pub mode: EntryMode,
    pub name: Vec<u8>,
    pub id: ObjectId,
}

impl TreeEntry {
    pub fn new(mode: EntryMode, name: impl Into<Vec<u8>>, id: ObjectId) -> Self {
        TreeEntry {
            mode,
            name: name.into(),
            id,
        }
    }

    pub fn file(name: impl Into<Vec<u8>>, id: ObjectId) -> Self {
        Self::new(EntryMode::File, name, id)
    }

    pub fn directory(name: impl Into<Vec<u8>>, id: ObjectId) -> Self {
        Self::new(EntryMode::Directory, name, id)
    }

    /// Name rendered for display, replacing invalid UTF-8
    pub fn name_lossy(&self) -> String {
        String::from_utf8_lossy(&self.name).into_owned()
    }

    /// A name is valid if non-empty and free of `NUL` and `/`
    pub fn is_valid_name(name: &[u8]) -> bool {
        !name.is_empty() && !name.iter().any(|&b| b == 0 || b == b'/')
    }
}

impl fmt::Display for TreeEntry {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(
            f,
            "{:0>6} {} {}\t{}",
            self.mode.as_str(),
            self.mode.object_kind(),
            self.id,
            self.name_lossy()
        )
    }
}
