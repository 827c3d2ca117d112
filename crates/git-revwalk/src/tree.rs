use std::path::Path;

use git_hash::ObjectId;
use git_loose::LooseObjectStore;
use git_object::{ObjectType, Tree, TreeEntry};

use crate::RevWalkError;

/// Trees nested deeper than this are treated as corrupt (a hand-made tree
/// can name itself as a subdirectory).
const MAX_TREE_DEPTH: usize = 4096;

/// Flatten the tree `tree_hash` of the repository at `git_dir` into file paths.
///
/// Paths are relative to the tree root, prefixed with `path_prefix` when it
/// is non-empty.
pub fn decode_tree(
    git_dir: impl AsRef<Path>,
    tree_hash: &ObjectId,
    path_prefix: &str,
) -> Result<Vec<String>, RevWalkError> {
    let store = LooseObjectStore::at_git_dir(git_dir);
    flatten_tree(&store, tree_hash, path_prefix)
}

/// Flatten a tree into the paths of every non-directory entry.
///
/// Entries keep their payload order; a subdirectory's contents are spliced
/// in depth-first at the position of the directory entry. Anything whose
/// mode is not `40000` (blobs, symlinks, submodules) counts as a file.
pub fn flatten_tree(
    store: &LooseObjectStore,
    tree_hash: &ObjectId,
    path_prefix: &str,
) -> Result<Vec<String>, RevWalkError> {
    struct Frame {
        prefix: String,
        entries: std::vec::IntoIter<TreeEntry>,
    }

    let mut files = Vec::new();
    let mut stack = vec![Frame {
        prefix: path_prefix.to_string(),
        entries: read_tree(store, tree_hash)?.entries.into_iter(),
    }];

    while let Some(frame) = stack.last_mut() {
        let Some(entry) = frame.entries.next() else {
            stack.pop();
            continue;
        };
        let name = entry
            .name_str()
            .map_err(|e| RevWalkError::corrupt(tree_hash, e))?;
        let path = join_path(&frame.prefix, name);

        if entry.mode.is_tree() {
            if stack.len() >= MAX_TREE_DEPTH {
                return Err(RevWalkError::corrupt(
                    &entry.oid,
                    format!("tree nesting deeper than {MAX_TREE_DEPTH} at '{path}'"),
                ));
            }
            tracing::trace!(tree = %entry.oid, path = %path, "descending into subtree");
            let entries = read_tree(store, &entry.oid)?.entries.into_iter();
            stack.push(Frame {
                prefix: path,
                entries,
            });
        } else {
            files.push(path);
        }
    }

    Ok(files)
}

fn read_tree(store: &LooseObjectStore, oid: &ObjectId) -> Result<Tree, RevWalkError> {
    let payload = store
        .read_typed(oid, ObjectType::Tree)
        .map_err(|e| RevWalkError::from_loose(oid, store.objects_dir(), e))?;
    Tree::parse(&payload).map_err(|e| RevWalkError::corrupt(oid, e))
}

fn join_path(prefix: &str, name: &str) -> String {
    if prefix.is_empty() {
        name.to_string()
    } else {
        format!("{prefix}/{name}")
    }
}
