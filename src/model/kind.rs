//! Object kind tag carried in every framed header

use serde::{Deserialize, Serialize};
use std::fmt;
use std::str::FromStr;

/// Type tag for stored objects
#[derive(Clone, Copy, Debug, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum ObjectKind {
    /// Raw file content
    Blob,
    /// Ordered list of named references to other objects
    Tree,
}

impl ObjectKind {
    pub fn as_str(&self) -> &'static str {
        match self {
            ObjectKind::Blob => "blob",
            ObjectKind::Tree => "tree",
        }
    }

    pub fn from_bytes(b: &[u8]) -> Option<Self> {
        match b {
            b"blob" => Some(ObjectKind::Blob),
            b"tree" => Some(ObjectKind::Tree),
            _ => None,
        }
    }
}

impl fmt::Display for ObjectKind {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

impl FromStr for ObjectKind {
    type Err = crate::Error;

    fn from_str(s: &str) -> crate::Result<Self> {
        ObjectKind::from_bytes(s.as_bytes())
            .ok_or_else(|| crate::Error::malformed(format!("unknown object kind '{}'", s)))
    }
}
