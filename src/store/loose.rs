//! Loose object store: one compressed file per object
//!
//! Layout:
//! ```text
//! objects/
//!   ab/                 first 2 hex chars of the id
//!     cdef0123...       remaining 38 hex chars, compressed framed bytes
//! ```

use crate::model::{ObjectId, HEX_LEN};
use crate::store::address::{identify, Compressor};
use crate::store::object::Object;
use crate::{Error, Result};
use std::io::{self, Write};
use std::path::{Path, PathBuf};
use tempfile::NamedTempFile;
use tracing::{debug, trace};

/// Shortest hex prefix accepted for abbreviated ids
pub const MIN_PREFIX_LEN: usize = 4;

/// A content-addressed object store backed by a sharded directory
#[derive(Clone, Debug)]
pub struct LooseStore {
    /// Path to the `objects` directory
    root: PathBuf,
    /// Codec applied to framed bytes on disk
    compressor: Compressor,
}

impl LooseStore {
    /// Open a store rooted at an existing `objects` directory
    pub fn new(root: impl Into<PathBuf>, compressor: Compressor) -> Self {
        LooseStore {
            root: root.into(),
            compressor,
        }
    }

    /// Get the `objects` directory path
    pub fn root(&self) -> &Path {
        &self.root
    }

    pub fn compressor(&self) -> &Compressor {
        &self.compressor
    }

    /// Derive the on-disk path of an object
    pub fn path_for(&self, id: &ObjectId) -> PathBuf {
        let hex = id.to_hex();
        self.root.join(&hex[..2]).join(&hex[2..])
    }

    /// Check if an object exists
    pub fn exists(&self, id: &ObjectId) -> bool {
        self.path_for(id).is_file()
    }

    /// Store compressed bytes under `id` unless already present
    ///
    /// The bytes are written to a temporary file in the shard directory and
    /// linked into place without clobbering, so readers never see a partial
    /// object. Returns `true` if this call created the object.
    pub fn put(&self, id: &ObjectId, compressed: &[u8]) -> Result<bool> {
        let hex = id.to_hex();
        let shard = self.root.join(&hex[..2]);
        let path = shard.join(&hex[2..]);
        if path.is_file() {
            trace!(%id, "object already stored");
            return Ok(false);
        }

        std::fs::create_dir_all(&shard)?;

        let mut tmp = NamedTempFile::new_in(&shard)?;
        tmp.write_all(compressed)?;
        tmp.as_file().sync_all()?;

        match tmp.persist_noclobber(&path) {
            Ok(_) => {
                debug!(%id, bytes = compressed.len(), "stored object");
                Ok(true)
            }
            // Lost a race with another writer of the same content
            Err(e) if e.error.kind() == io::ErrorKind::AlreadyExists => Ok(false),
            Err(e) => Err(e.error.into()),
        }
    }

    /// Read the compressed bytes stored under `id`
    pub fn get(&self, id: &ObjectId) -> Result<Vec<u8>> {
        match std::fs::read(self.path_for(id)) {
            Ok(data) => Ok(data),
            Err(e) if e.kind() == io::ErrorKind::NotFound => Err(Error::ObjectNotFound(*id)),
            Err(e) => Err(e.into()),
        }
    }

    /// Frame, hash, compress and store an object, returning its id
    pub fn write_object(&self, object: &Object) -> Result<ObjectId> {
        let framed = object.framed();
        let id = identify(&framed);
        if self.exists(&id) {
            return Ok(id);
        }
        let compressed = self.compressor.compress(&framed)?;
        self.put(&id, &compressed)?;
        Ok(id)
    }

    /// Load, decompress and parse an object
    pub fn read_object(&self, id: &ObjectId) -> Result<Object> {
        let compressed = self.get(id)?;
        let framed = self
            .compressor
            .decompress(&compressed)
            .map_err(|e| e.with_id(*id))?;
        Object::from_framed(&framed).map_err(|e| e.with_id(*id))
    }

    /// Resolve a full or abbreviated hex id to a stored object id
    pub fn resolve(&self, spec: &str) -> Result<ObjectId> {
        let spec = spec.trim().to_ascii_lowercase();
        let invalid = || Error::InvalidObjectId(spec.clone());

        if spec.len() < MIN_PREFIX_LEN
            || spec.len() > HEX_LEN
            || !spec.bytes().all(|b| b.is_ascii_hexdigit())
        {
            return Err(invalid());
        }

        if spec.len() == HEX_LEN {
            let id: ObjectId = spec.parse()?;
            return if self.exists(&id) {
                Ok(id)
            } else {
                Err(Error::ObjectNotFound(id))
            };
        }

        let (shard, rest) = spec.split_at(2);
        let dir = self.root.join(shard);
        let mut found = None;
        if dir.is_dir() {
            for entry in std::fs::read_dir(&dir)? {
                let name = entry?.file_name();
                let Some(name) = name.to_str() else { continue };
                if name.len() != HEX_LEN - 2 || !name.starts_with(rest) {
                    continue;
                }
                let Ok(id) = format!("{}{}", shard, name).parse::<ObjectId>() else {
                    continue;
                };
                if found.replace(id).is_some() {
                    return Err(Error::AmbiguousObjectId(spec));
                }
            }
        }

        found.ok_or_else(|| Error::InvalidObjectId(format!("no object matches '{}'", spec)))
    }
}
