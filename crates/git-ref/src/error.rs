use std::path::PathBuf;

/// Error types for reference operations.
#[derive(Debug, thiserror::Error)]
pub enum RefError {
    #[error("invalid ref name: {0}")]
    InvalidName(String),

    #[error("branch '{name}' not found: {}", path.display())]
    BranchNotFound { name: String, path: PathBuf },

    #[error("symbolic ref loop detected: {0}")]
    SymrefLoop(String),

    #[error("parse error in {name}: {reason}")]
    Parse { name: String, reason: String },

    #[error("I/O error on {path}: {source}")]
    IoPath {
        path: PathBuf,
        #[source]
        source: std::io::Error,
    },

    #[error(transparent)]
    Hash(#[from] git_hash::HashError),
}
