use std::fs;
use std::io::ErrorKind;
use std::path::{Path, PathBuf};

use bstr::ByteSlice;
use git_hash::ObjectId;

use crate::error::RefError;
use crate::name::RefName;
use crate::Reference;

/// Read a loose ref file and return the Reference.
///
/// A loose ref is a file under `.git/refs/` (or `.git/HEAD`) containing
/// either a hex OID or `ref: <target-ref>`, possibly with trailing whitespace.
pub(crate) fn read_loose_ref(git_dir: &Path, name: &RefName) -> Result<Option<Reference>, RefError> {
    let path = loose_ref_path(git_dir, name);
    let contents = match fs::read(&path) {
        Ok(data) => data,
        Err(e) if e.kind() == ErrorKind::NotFound => return Ok(None),
        // A directory where the ref should be (e.g. `refs/heads/feature` when
        // only `feature/x` exists) means the ref itself does not exist.
        Err(_) if path.is_dir() => return Ok(None),
        Err(e) => return Err(RefError::IoPath { path, source: e }),
    };

    let trimmed = contents.trim();
    let parse_err = |reason: &str| RefError::Parse {
        name: name.to_string(),
        reason: reason.into(),
    };

    if let Some(target_name) = trimmed.strip_prefix(b"ref: ") {
        let target_str = target_name
            .trim()
            .to_str()
            .map_err(|_| parse_err("invalid UTF-8 in symbolic ref target"))?;
        let target = RefName::new(target_str)?;
        Ok(Some(Reference::Symbolic {
            name: name.clone(),
            target,
        }))
    } else {
        let hex = trimmed
            .to_str()
            .map_err(|_| parse_err("invalid UTF-8 in ref OID"))?;
        let oid = ObjectId::from_hex(hex)?;
        Ok(Some(Reference::Direct {
            name: name.clone(),
            target: oid,
        }))
    }
}

/// Get the filesystem path for a loose ref.
pub(crate) fn loose_ref_path(git_dir: &Path, name: &RefName) -> PathBuf {
    let mut path = git_dir.to_path_buf();
    for component in name.components() {
        path.push(component);
    }
    path
}
