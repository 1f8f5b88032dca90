//! Error types for tessera

use crate::model::{ObjectId, ObjectKind};
use std::path::PathBuf;
use thiserror::Error;

/// Result type alias for tessera operations
pub type Result<T> = std::result::Result<T, Error>;

fn describe(id: &Option<ObjectId>) -> String {
    match id {
        Some(id) => format!(" {}", id),
        None => String::new(),
    }
}

/// Errors that can occur in tessera operations
#[derive(Error, Debug)]
pub enum Error {
    #[error("IO error: {0}")]
    Io(#[from] std::io::Error),

    #[error("JSON error: {0}")]
    Json(#[from] serde_json::Error),

    #[error("Object not found: {0}")]
    ObjectNotFound(ObjectId),

    #[error("Malformed object{}: {reason}", describe(.id))]
    MalformedObject {
        id: Option<ObjectId>,
        reason: String,
    },

    #[error("Corrupt object{}: {reason}", describe(.id))]
    CorruptObject {
        id: Option<ObjectId>,
        reason: String,
    },

    #[error("Object {id} is a {found}, expected a {expected}")]
    UnexpectedObjectKind {
        id: ObjectId,
        expected: ObjectKind,
        found: ObjectKind,
    },

    #[error("Unsupported directory entry: {}", .0.display())]
    UnsupportedEntry(PathBuf),

    #[error("Invalid object id: {0}")]
    InvalidObjectId(String),

    #[error("Ambiguous object id: {0}")]
    AmbiguousObjectId(String),

    #[error("Not a repository: {}", .0.display())]
    NotARepository(PathBuf),

    #[error("Repository already initialized at {}", .0.display())]
    AlreadyInitialized(PathBuf),

    #[error("Config error: {0}")]
    Config(String),
}

impl Error {
    pub(crate) fn malformed(reason: impl Into<String>) -> Self {
        Error::MalformedObject {
            id: None,
            reason: reason.into(),
        }
    }

    pub(crate) fn corrupt(reason: impl Into<String>) -> Self {
        Error::CorruptObject {
            id: None,
            reason: reason.into(),
        }
    }

    /// Attach the object id to an error raised by a pure codec step
    pub fn with_id(self, object_id: ObjectId) -> Self {
        match self {
            Error::MalformedObject { id: None, reason } => Error::MalformedObject {
                id: Some(object_id),
                reason,
            },
            Error::CorruptObject { id: None, reason } => Error::CorruptObject {
                id: Some(object_id),
                reason,
            },
            other => other,
        }
    }
}
