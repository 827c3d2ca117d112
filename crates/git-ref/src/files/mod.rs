//! Files backend: loose refs under `<git_dir>/refs/` and `<git_dir>/HEAD`.

mod loose;

use std::path::{Path, PathBuf};

use git_hash::ObjectId;

use crate::{RefError, RefName, Reference};

/// Maximum symbolic ref chain length before giving up.
const MAX_SYMREF_DEPTH: usize = 5;

/// Read-only ref store over a git directory.
#[derive(Debug, Clone)]
pub struct FilesRefStore {
    git_dir: PathBuf,
}

impl FilesRefStore {
    pub fn new(git_dir: impl AsRef<Path>) -> Self {
        Self {
            git_dir: git_dir.as_ref().to_path_buf(),
        }
    }

    /// File backing a ref name.
    pub fn ref_path(&self, name: &RefName) -> PathBuf {
        loose::loose_ref_path(&self.git_dir, name)
    }

    /// Read a single ref without following symbolic targets.
    pub fn resolve(&self, name: &RefName) -> Result<Option<Reference>, RefError> {
        loose::read_loose_ref(&self.git_dir, name)
    }

    /// Resolve a ref to its final OID, following symbolic ref chains.
    pub fn resolve_to_oid(&self, name: &RefName) -> Result<Option<ObjectId>, RefError> {
        let mut current = name.clone();
        for _ in 0..MAX_SYMREF_DEPTH {
            match self.resolve(&current)? {
                None => return Ok(None),
                Some(Reference::Direct { target, .. }) => return Ok(Some(target)),
                Some(Reference::Symbolic { target, .. }) => {
                    tracing::trace!(from = %current, to = %target, "following symbolic ref");
                    current = target;
                }
            }
        }
        Err(RefError::SymrefLoop(name.to_string()))
    }

    /// Resolve the head commit of a local branch (`refs/heads/<branch>`).
    ///
    /// A branch whose name cannot map onto a file under `refs/heads/`, or
    /// whose ref file (or symbolic target) is absent, is `BranchNotFound`.
    pub fn branch_head(&self, branch: &str) -> Result<ObjectId, RefError> {
        let not_found = |path: PathBuf| RefError::BranchNotFound {
            name: branch.to_string(),
            path,
        };
        let name = RefName::branch(branch)
            .map_err(|_| not_found(self.git_dir.join("refs").join("heads").join(branch)))?;

        let oid = self
            .resolve_to_oid(&name)?
            .ok_or_else(|| not_found(self.ref_path(&name)))?;
        tracing::debug!(branch, head = %oid, "resolved branch head");
        Ok(oid)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::fs;

    const OID: &str = "1111111111111111111111111111111111111111";

    fn write_ref(git_dir: &Path, name: &str, content: &str) {
        let path = git_dir.join(name);
        fs::create_dir_all(path.parent().unwrap()).unwrap();
        fs::write(path, content).unwrap();
    }

    #[test]
    fn branch_head_trims_whitespace() {
        let dir = tempfile::tempdir().unwrap();
        write_ref(dir.path(), "refs/heads/main", &format!("{OID}\n\n"));
        let store = FilesRefStore::new(dir.path());
        assert_eq!(store.branch_head("main").unwrap().to_hex(), OID);
    }

    #[test]
    fn missing_branch() {
        let dir = tempfile::tempdir().unwrap();
        let store = FilesRefStore::new(dir.path());
        let err = store.branch_head("nope").unwrap_err();
        match err {
            RefError::BranchNotFound { name, path } => {
                assert_eq!(name, "nope");
                assert_eq!(path, dir.path().join("refs/heads/nope"));
            }
            other => panic!("unexpected error: {other}"),
        }
    }

    #[test]
    fn invalid_branch_name_is_not_found() {
        let dir = tempfile::tempdir().unwrap();
        write_ref(dir.path(), "config", OID);
        let store = FilesRefStore::new(dir.path());
        let err = store.branch_head("../../config").unwrap_err();
        assert!(matches!(err, RefError::BranchNotFound { .. }));
    }

    #[test]
    fn symbolic_branch_is_followed() {
        let dir = tempfile::tempdir().unwrap();
        write_ref(dir.path(), "refs/heads/main", OID);
        write_ref(dir.path(), "refs/heads/alias", "ref: refs/heads/main\n");
        let store = FilesRefStore::new(dir.path());
        assert_eq!(store.branch_head("alias").unwrap().to_hex(), OID);
    }

    #[test]
    fn dangling_symbolic_branch_is_not_found() {
        let dir = tempfile::tempdir().unwrap();
        write_ref(dir.path(), "refs/heads/alias", "ref: refs/heads/gone\n");
        let store = FilesRefStore::new(dir.path());
        let err = store.branch_head("alias").unwrap_err();
        assert!(matches!(err, RefError::BranchNotFound { .. }));
    }

    #[test]
    fn symref_loop() {
        let dir = tempfile::tempdir().unwrap();
        write_ref(dir.path(), "refs/heads/a", "ref: refs/heads/b\n");
        write_ref(dir.path(), "refs/heads/b", "ref: refs/heads/a\n");
        let store = FilesRefStore::new(dir.path());
        let err = store.branch_head("a").unwrap_err();
        assert!(matches!(err, RefError::SymrefLoop(_)));
    }

    #[test]
    fn garbage_ref_content() {
        let dir = tempfile::tempdir().unwrap();
        write_ref(dir.path(), "refs/heads/main", "not a hash\n");
        let store = FilesRefStore::new(dir.path());
        let err = store.branch_head("main").unwrap_err();
        assert!(matches!(err, RefError::Hash(_)));
    }
}
