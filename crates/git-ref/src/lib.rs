//! Branch reference resolution for the git-depgraph object layer.
//!
//! Only the files backend is supported: loose refs stored as individual files
//! under `.git/refs/`. A ref file holds either a hex OID or `ref: <target>`.

mod error;
pub mod files;
mod name;

pub use error::RefError;
pub use files::FilesRefStore;
pub use name::RefName;

/// A git reference: either direct (points to an OID) or symbolic (points to another ref).
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum Reference {
    /// Direct reference to an object.
    Direct {
        name: RefName,
        target: git_hash::ObjectId,
    },
    /// Symbolic reference to another ref.
    Symbolic { name: RefName, target: RefName },
}
