//! Read stored trees and blobs back out of the store

use crate::model::{EntryMode, ObjectId, ObjectKind, TreeEntry};
use crate::store::{LooseStore, Object};
use crate::{Error, Result};
use tracing::trace;

/// Typed read access to stored objects
pub struct TreeReader<'a> {
    store: &'a LooseStore,
}

impl<'a> TreeReader<'a> {
    pub fn new(store: &'a LooseStore) -> Self {
        TreeReader { store }
    }

    /// Read an object, requiring it to be of `expected` kind
    pub fn read_kind(&self, id: &ObjectId, expected: ObjectKind) -> Result<Object> {
        let object = self.store.read_object(id)?;
        if object.kind != expected {
            return Err(Error::UnexpectedObjectKind {
                id: *id,
                expected,
                found: object.kind,
            });
        }
        Ok(object)
    }

    /// Entries of a tree, in stored order
    pub fn read_tree(&self, id: &ObjectId) -> Result<Vec<TreeEntry>> {
        let tree = self.read_kind(id, ObjectKind::Tree)?;
        let entries = tree.entries().map_err(|e| e.with_id(*id))?;
        trace!(%id, entries = entries.len(), "read tree");
        Ok(entries)
    }

    /// Payload of a blob exactly as stored
    pub fn read_blob(&self, id: &ObjectId) -> Result<Vec<u8>> {
        Ok(self.read_kind(id, ObjectKind::Blob)?.payload)
    }

    /// Every entry below a tree, depth-first, with `/`-joined paths
    ///
    /// Subtree entries are listed before their contents.
    pub fn walk(&self, id: &ObjectId) -> Result<Vec<(Vec<u8>, TreeEntry)>> {
        let mut out = Vec::new();
        self.walk_into(id, &[], &mut out)?;
        Ok(out)
    }

    fn walk_into(
        &self,
        id: &ObjectId,
        prefix: &[u8],
        out: &mut Vec<(Vec<u8>, TreeEntry)>,
    ) -> Result<()> {
        for entry in self.read_tree(id)? {
            let mut path = prefix.to_vec();
            if !path.is_empty() {
                path.push(b'/');
            }
            path.extend_from_slice(&entry.name);

            let subtree = (entry.mode == EntryMode::Directory).then_some(entry.id);
            out.push((path.clone(), entry));
            if let Some(child) = subtree {
                self.walk_into(&child, &path, out)?;
            }
        }
        Ok(())
    }
}
