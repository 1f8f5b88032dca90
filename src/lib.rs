//! # tessera
//!
//! A content-addressed object store and directory snapshotter using git's
//! loose object format.
//!
//! tessera stores file content as immutable, SHA-1-identified objects and
//! reduces a directory hierarchy to a single tree id in the same object
//! space.
//!
//! ## Core Concepts
//!
//! - **Blobs**: Raw file content, framed as `blob <len>\0<bytes>`
//! - **Trees**: Sorted lists of named references to blobs and subtrees
//! - **Object ids**: SHA-1 of the framed bytes, so equal content shares an id
//! - **Loose store**: One compressed file per object under `objects/xx/`
//!
//! ## Example
//!
//! ```ignore
//! use tessera::{RepoConfig, Repository};
//!
//! let repo = Repository::init(".git", RepoConfig::default())?;
//! let root = repo.write_tree(None)?;
//! for entry in repo.read_tree(&root)? {
//!     println!("{}", entry);
//! }
//! ```

pub mod codec;
pub mod config;
pub mod model;
pub mod store;
pub mod tree;

mod error;
mod repository;

pub use config::RepoConfig;
pub use error::{Error, Result};
pub use model::{EntryMode, ObjectId, ObjectKind, TreeEntry};
pub use repository::Repository;
pub use store::{Compression, LooseStore, Object};
pub use tree::{TreeBuilder, TreeReader};

/// Default name of the repository metadata directory
pub const DEFAULT_GIT_DIR: &str = ".git";

/// Branch `HEAD` points at after `init`
pub const DEFAULT_BRANCH: &str = "main";
