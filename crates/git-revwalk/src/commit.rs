use std::path::Path;

use git_hash::ObjectId;
use git_loose::LooseObjectStore;
use git_object::{Commit, ObjectError, ObjectType};

use crate::tree::flatten_tree;
use crate::RevWalkError;

/// A decoded commit together with the files present in its tree.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct CommitRecord {
    /// OID of the root tree.
    pub tree: ObjectId,
    /// Parent commit OIDs in header order.
    pub parents: Vec<ObjectId>,
    /// Every file path in the commit's tree, in tree order.
    pub files: Vec<String>,
}

/// Decode the commit `commit_hash` of the repository at `git_dir`.
pub fn decode_commit(
    git_dir: impl AsRef<Path>,
    commit_hash: &ObjectId,
) -> Result<CommitRecord, RevWalkError> {
    let store = LooseObjectStore::at_git_dir(git_dir);
    read_commit(&store, commit_hash)
}

/// Read a commit's headers and resolve the file list of its tree.
pub fn read_commit(store: &LooseObjectStore, oid: &ObjectId) -> Result<CommitRecord, RevWalkError> {
    let payload = store
        .read_typed(oid, ObjectType::Commit)
        .map_err(|e| RevWalkError::from_loose(oid, store.objects_dir(), e))?;

    let Commit { tree, parents } = Commit::parse(&payload).map_err(|e| match e {
        ObjectError::MissingCommitField { .. } | ObjectError::InvalidCommitField { .. } => {
            RevWalkError::MalformedCommit {
                oid: *oid,
                source: e,
            }
        }
        other => RevWalkError::corrupt(oid, other),
    })?;

    let files = flatten_tree(store, &tree, "")?;
    Ok(CommitRecord {
        tree,
        parents,
        files,
    })
}
