//! High-level Repository API
//!
//! This module provides the main entry point: a git dir holding the object
//! store, and the working directory around it that trees are built from.

use crate::config::RepoConfig;
use crate::model::{ObjectId, ObjectKind, TreeEntry};
use crate::store::{LooseStore, Object};
use crate::tree::{TreeBuilder, TreeReader};
use crate::{Error, Result, DEFAULT_BRANCH, DEFAULT_GIT_DIR};
use std::path::{Path, PathBuf};
use tracing::{debug, info};

/// A repository: git dir, object store and working directory
pub struct Repository {
    git_dir: PathBuf,
    work_dir: PathBuf,
    config: RepoConfig,
    store: LooseStore,
}

impl Repository {
    /// Create the git dir scaffolding and return the new repository
    ///
    /// Creates `objects/`, `refs/`, a `HEAD` pointing at the default branch
    /// and the config file.
    pub fn init(git_dir: impl AsRef<Path>, config: RepoConfig) -> Result<Self> {
        let git_dir = git_dir.as_ref();
        let objects = git_dir.join("objects");
        if objects.exists() {
            return Err(Error::AlreadyInitialized(git_dir.to_path_buf()));
        }

        std::fs::create_dir_all(&objects)?;
        std::fs::create_dir_all(git_dir.join("refs"))?;
        std::fs::write(
            git_dir.join("HEAD"),
            format!("ref: refs/heads/{}\n", DEFAULT_BRANCH),
        )?;
        config.save(git_dir)?;
        info!(git_dir = %git_dir.display(), "initialized repository");

        Self::open(git_dir)
    }

    /// Open an existing repository from its git dir
    pub fn open(git_dir: impl AsRef<Path>) -> Result<Self> {
        let git_dir = git_dir.as_ref().to_path_buf();
        let objects = git_dir.join("objects");
        if !objects.is_dir() {
            return Err(Error::NotARepository(git_dir));
        }

        let config = RepoConfig::load(&git_dir)?;
        // Resolved first so `.`, `..` or a trailing `objects/..` still name
        // the right working directory
        let canonical = std::fs::canonicalize(&git_dir)?;
        let work_dir = canonical
            .parent()
            .map(Path::to_path_buf)
            .unwrap_or_else(|| canonical.clone());
        let store = LooseStore::new(objects, config.compressor());
        debug!(git_dir = %git_dir.display(), ?config, "opened repository");

        Ok(Repository {
            git_dir,
            work_dir,
            config,
            store,
        })
    }

    /// Find a repository by walking up from `start`
    pub fn discover(start: impl AsRef<Path>) -> Result<Self> {
        let start = start.as_ref();
        for dir in start.ancestors() {
            let candidate = dir.join(DEFAULT_GIT_DIR);
            if candidate.join("objects").is_dir() {
                return Self::open(candidate);
            }
        }
        Err(Error::NotARepository(start.to_path_buf()))
    }

    pub fn git_dir(&self) -> &Path {
        &self.git_dir
    }

    pub fn work_dir(&self) -> &Path {
        &self.work_dir
    }

    pub fn config(&self) -> &RepoConfig {
        &self.config
    }

    pub fn store(&self) -> &LooseStore {
        &self.store
    }

    // === Writing ===

    /// Compute a file's blob id, storing the blob when `write` is set
    pub fn hash_object(&self, path: impl AsRef<Path>, write: bool) -> Result<ObjectId> {
        let object = Object::blob(std::fs::read(path.as_ref())?);
        if write {
            self.store.write_object(&object)
        } else {
            Ok(object.id())
        }
    }

    /// Snapshot a directory (the working directory by default) as a tree
    pub fn write_tree(&self, dir: Option<&Path>) -> Result<ObjectId> {
        let dir = dir.unwrap_or(&self.work_dir);
        self.tree_builder()?.build(dir)
    }

    fn tree_builder(&self) -> Result<TreeBuilder<'_>> {
        let mut builder = TreeBuilder::new(&self.store).skip_dir(&self.git_dir)?;
        for name in &self.config.ignore {
            builder = builder.exclude(name);
        }
        Ok(builder)
    }

    // === Reading ===

    /// Resolve a full or abbreviated hex id
    pub fn resolve(&self, spec: &str) -> Result<ObjectId> {
        self.store.resolve(spec)
    }

    /// Read any object
    pub fn read_object(&self, id: &ObjectId) -> Result<Object> {
        self.store.read_object(id)
    }

    /// Kind and payload size of an object
    pub fn object_info(&self, id: &ObjectId) -> Result<(ObjectKind, usize)> {
        let object = self.store.read_object(id)?;
        Ok((object.kind, object.size()))
    }

    /// Blob payload exactly as stored
    pub fn read_blob(&self, id: &ObjectId) -> Result<Vec<u8>> {
        TreeReader::new(&self.store).read_blob(id)
    }

    /// Entries of a tree
    pub fn read_tree(&self, id: &ObjectId) -> Result<Vec<TreeEntry>> {
        TreeReader::new(&self.store).read_tree(id)
    }

    /// All entries below a tree with their slash-joined paths
    pub fn walk_tree(&self, id: &ObjectId) -> Result<Vec<(Vec<u8>, TreeEntry)>> {
        TreeReader::new(&self.store).walk(id)
    }
}
