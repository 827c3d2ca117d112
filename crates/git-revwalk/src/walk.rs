//! Commit graph traversal.

use std::path::Path;

use git_hash::collections::OidSet;
use git_hash::ObjectId;
use git_loose::LooseObjectStore;
use git_ref::FilesRefStore;

use crate::commit::read_commit;
use crate::RevWalkError;

/// One visited commit and the files in its tree.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct WalkEntry {
    pub oid: ObjectId,
    pub files: Vec<String>,
}

/// Iterator over every commit reachable from the pushed starting points.
///
/// Pending commits are kept on a stack (last in, first out) and each OID is
/// visited at most once, so shared ancestors and merge parents are not
/// re-read, and a corrupt store with a parent cycle still terminates.
/// Iteration stops after the first error.
pub struct RevWalk {
    store: LooseObjectStore,
    pending: Vec<ObjectId>,
    seen: OidSet,
    failed: bool,
}

impl RevWalk {
    /// Create a walker over the loose objects of `git_dir`.
    pub fn new(git_dir: impl AsRef<Path>) -> Self {
        Self::with_store(LooseObjectStore::at_git_dir(git_dir))
    }

    pub fn with_store(store: LooseObjectStore) -> Self {
        Self {
            store,
            pending: Vec::new(),
            seen: OidSet::new(),
            failed: false,
        }
    }

    /// Add a starting commit.
    pub fn push(&mut self, oid: ObjectId) {
        self.pending.push(oid);
    }

    /// Number of distinct commits visited so far.
    pub fn visited(&self) -> usize {
        self.seen.len()
    }

    fn next_unseen(&mut self) -> Option<ObjectId> {
        while let Some(oid) = self.pending.pop() {
            if self.seen.insert(oid) {
                return Some(oid);
            }
        }
        None
    }
}

impl Iterator for RevWalk {
    type Item = Result<WalkEntry, RevWalkError>;

    fn next(&mut self) -> Option<Self::Item> {
        if self.failed {
            return None;
        }
        let oid = self.next_unseen()?;
        match read_commit(&self.store, &oid) {
            Ok(record) => {
                tracing::debug!(
                    commit = %oid,
                    parents = record.parents.len(),
                    files = record.files.len(),
                    "visited commit"
                );
                self.pending.extend(record.parents);
                Some(Ok(WalkEntry {
                    oid,
                    files: record.files,
                }))
            }
            Err(e) => {
                self.failed = true;
                self.pending.clear();
                Some(Err(e))
            }
        }
    }
}

/// Walk the history of `refs/heads/<branch>` in the repository at `git_dir`.
///
/// The branch is resolved before any object is read. Entries come back in
/// visitation order, one per distinct commit.
pub fn walk_branch(git_dir: impl AsRef<Path>, branch: &str) -> Result<Vec<WalkEntry>, RevWalkError> {
    let git_dir = git_dir.as_ref();
    let head = FilesRefStore::new(git_dir).branch_head(branch)?;

    let mut walk = RevWalk::new(git_dir);
    walk.push(head);
    let entries = walk.collect::<Result<Vec<_>, _>>()?;
    tracing::info!(branch, commits = entries.len(), "walked branch history");
    Ok(entries)
}
