//! Object type - the unit of content-addressed storage

use crate::codec;
use crate::model::{ObjectId, ObjectKind, TreeEntry};
use crate::store::address::identify;
use crate::Result;

/// A typed, immutable payload
#[derive(Clone, Debug, PartialEq, Eq)]
pub struct Object {
    /// Type of content
    pub kind: ObjectKind,
    /// Raw payload (unframed, uncompressed)
    pub payload: Vec<u8>,
}

impl Object {
    /// Create a new object
    pub fn new(kind: ObjectKind, payload: Vec<u8>) -> Self {
        Object { kind, payload }
    }

    /// A blob holding raw file content
    pub fn blob(payload: impl Into<Vec<u8>>) -> Self {
        Object::new(ObjectKind::Blob, payload.into())
    }

    /// A tree holding the canonical encoding of `entries`
    pub fn tree(entries: &[TreeEntry]) -> Result<Self> {
        Ok(Object::new(
            ObjectKind::Tree,
            codec::encode_tree_entries(entries)?,
        ))
    }

    /// Header plus payload, the bytes that get hashed and compressed
    pub fn framed(&self) -> Vec<u8> {
        codec::frame(self.kind, &self.payload)
    }

    /// Compute the content id
    pub fn id(&self) -> ObjectId {
        identify(&self.framed())
    }

    /// Parse framed bytes back into an object
    pub fn from_framed(framed: &[u8]) -> Result<Self> {
        let (kind, payload) = codec::parse(framed)?;
        Ok(Object::new(kind, payload.to_vec()))
    }

    /// Decode the payload as tree entries
    pub fn entries(&self) -> Result<Vec<TreeEntry>> {
        codec::decode_tree_entries(&self.payload)
    }

    /// Get the size of the payload
    pub fn size(&self) -> usize {
        self.payload.len()
    }
}
