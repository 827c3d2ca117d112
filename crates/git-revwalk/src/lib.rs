//! History walking over a loose object store.
//!
//! Starting from a branch head, [`walk_branch`] visits every reachable commit
//! exactly once and records the flattened file list of each commit's tree.
//! [`build_graph`] then inverts that into a file → commits mapping.
//!
//! Every operation takes the git directory explicitly; nothing is cached
//! between calls.

mod commit;
mod graph;
mod tree;
mod walk;

pub use commit::{decode_commit, read_commit, CommitRecord};
pub use graph::{build_graph, DependencyGraph};
pub use tree::{decode_tree, flatten_tree};
pub use walk::{walk_branch, RevWalk, WalkEntry};

use std::path::PathBuf;

use git_hash::ObjectId;
use git_loose::LooseError;
use git_object::ObjectError;
use git_ref::RefError;

/// The class of a [`RevWalkError`].
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum ErrorKind {
    ObjectNotFound,
    CorruptObject,
    MalformedCommit,
    BranchNotFound,
    Io,
}

/// Errors produced by history walking.
///
/// None of these are recovered from: the first failure aborts the walk.
#[derive(Debug, thiserror::Error)]
pub enum RevWalkError {
    #[error("object {oid} not found at {}", path.display())]
    ObjectNotFound { oid: String, path: PathBuf },

    #[error("corrupt object {oid}: {reason}")]
    CorruptObject { oid: String, reason: String },

    #[error("malformed commit {oid}: {source}")]
    MalformedCommit {
        oid: ObjectId,
        #[source]
        source: ObjectError,
    },

    #[error("branch '{name}' not found: {}", path.display())]
    BranchNotFound { name: String, path: PathBuf },

    #[error("I/O error on {}: {source}", path.display())]
    Io {
        path: PathBuf,
        #[source]
        source: std::io::Error,
    },
}

impl RevWalkError {
    pub fn kind(&self) -> ErrorKind {
        match self {
            Self::ObjectNotFound { .. } => ErrorKind::ObjectNotFound,
            Self::CorruptObject { .. } => ErrorKind::CorruptObject,
            Self::MalformedCommit { .. } => ErrorKind::MalformedCommit,
            Self::BranchNotFound { .. } => ErrorKind::BranchNotFound,
            Self::Io { .. } => ErrorKind::Io,
        }
    }

    /// Classify a failure reading or parsing the object `oid`.
    pub(crate) fn from_loose(oid: &ObjectId, objects_dir: &std::path::Path, err: LooseError) -> Self {
        match err {
            LooseError::NotFound { oid, path } => Self::ObjectNotFound { oid, path },
            LooseError::Decompress { oid, source } => Self::CorruptObject {
                oid,
                reason: format!("zlib: {source}"),
            },
            LooseError::Object(e) => Self::corrupt(oid, e),
            LooseError::InvalidName(name) => Self::CorruptObject {
                oid: name,
                reason: "invalid object name".into(),
            },
            LooseError::IoPath { path, source } => Self::Io { path, source },
            LooseError::Io(source) => Self::Io {
                path: objects_dir.join(oid.loose_path()),
                source,
            },
        }
    }

    pub(crate) fn corrupt(oid: &ObjectId, reason: impl std::fmt::Display) -> Self {
        Self::CorruptObject {
            oid: oid.to_hex(),
            reason: reason.to_string(),
        }
    }
}

impl From<RefError> for RevWalkError {
    fn from(err: RefError) -> Self {
        match err {
            RefError::BranchNotFound { name, path } => Self::BranchNotFound { name, path },
            RefError::IoPath { path, source } => Self::Io { path, source },
            RefError::InvalidName(name) => Self::BranchNotFound {
                path: PathBuf::from(&name),
                name,
            },
            other @ (RefError::SymrefLoop(_) | RefError::Parse { .. } | RefError::Hash(_)) => {
                Self::CorruptObject {
                    oid: "ref".into(),
                    reason: other.to_string(),
                }
            }
        }
    }
}
