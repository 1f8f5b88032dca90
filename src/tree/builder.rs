//! Reduce a directory to a single tree id

use crate::model::{ObjectId, TreeEntry};
use crate::store::{LooseStore, Object};
use crate::{Error, Result};
use std::ffi::{OsStr, OsString};
use std::path::{Path, PathBuf};
use tracing::{debug, instrument, trace};

/// Builds tree objects from a directory, bottom-up
///
/// Every directory's tree is written only after all of its children have
/// been resolved to ids, so each tree is hashed once over its complete
/// entry list.
pub struct TreeBuilder<'a> {
    store: &'a LooseStore,
    /// Base names skipped at every level
    exclude: Vec<OsString>,
    /// Canonical directory paths skipped wherever they appear
    skip_dirs: Vec<PathBuf>,
}

impl<'a> TreeBuilder<'a> {
    /// Create a builder writing into `store`
    pub fn new(store: &'a LooseStore) -> Self {
        TreeBuilder {
            store,
            exclude: Vec::new(),
            skip_dirs: Vec::new(),
        }
    }

    /// Skip one specific directory, matched by canonical path
    ///
    /// Used for the repository's own metadata directory, so a nested
    /// directory that merely shares its base name is still stored.
    pub fn skip_dir(mut self, dir: impl AsRef<Path>) -> Result<Self> {
        let dir = std::fs::canonicalize(dir.as_ref())?;
        if !self.skip_dirs.contains(&dir) {
            self.skip_dirs.push(dir);
        }
        Ok(self)
    }

    /// Skip entries with this base name anywhere in the walk
    pub fn exclude(mut self, name: impl Into<OsString>) -> Self {
        let name = name.into();
        if !self.exclude.contains(&name) {
            self.exclude.push(name);
        }
        self
    }

    /// Store every file and directory under `dir` and return the root tree id
    pub fn build(&self, dir: &Path) -> Result<ObjectId> {
        let root = self.build_dir(dir)?;
        debug!(%root, dir = %dir.display(), "built tree");
        Ok(root)
    }

    #[instrument(level = "trace", skip_all, fields(dir = %dir.display()))]
    fn build_dir(&self, dir: &Path) -> Result<ObjectId> {
        let mut entries = Vec::new();

        for child in std::fs::read_dir(dir)? {
            let child = child?;
            let name = child.file_name();
            if self.exclude.iter().any(|ex| ex == &name) {
                continue;
            }

            let path = child.path();
            // symlink_metadata so links are never followed
            let file_type = std::fs::symlink_metadata(&path)?.file_type();
            let name = name_bytes(&name, &path)?;

            if file_type.is_dir() {
                if !self.skip_dirs.is_empty()
                    && self.skip_dirs.contains(&std::fs::canonicalize(&path)?)
                {
                    trace!(path = %path.display(), "skipped metadata directory");
                    continue;
                }
                let id = self.build_dir(&path)?;
                entries.push(TreeEntry::directory(name, id));
            } else if file_type.is_file() {
                let id = self.store.write_object(&Object::blob(std::fs::read(&path)?))?;
                trace!(%id, path = %path.display(), "stored blob");
                entries.push(TreeEntry::file(name, id));
            } else {
                return Err(Error::UnsupportedEntry(path));
            }
        }

        self.store.write_object(&Object::tree(&entries)?)
    }
}

#[cfg(unix)]
fn name_bytes(name: &OsStr, _path: &Path) -> Result<Vec<u8>> {
    use std::os::unix::ffi::OsStrExt;
    Ok(name.as_bytes().to_vec())
}

#[cfg(not(unix))]
fn name_bytes(name: &OsStr, path: &Path) -> Result<Vec<u8>> {
    name.to_str()
        .map(|s| s.as_bytes().to_vec())
        .ok_or_else(|| Error::UnsupportedEntry(path.to_path_buf()))
}
