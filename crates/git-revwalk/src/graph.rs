use git_hash::ObjectId;
use indexmap::IndexMap;

use crate::walk::WalkEntry;

/// File path → commits whose tree contains that file.
///
/// Paths iterate in first-seen order; each path's commits are in walk
/// visitation order.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct DependencyGraph {
    files: IndexMap<String, Vec<ObjectId>>,
}

impl DependencyGraph {
    pub fn new() -> Self {
        Self::default()
    }

    /// Record that `commit` contains `path`.
    pub fn add(&mut self, path: &str, commit: ObjectId) {
        match self.files.get_mut(path) {
            Some(commits) => commits.push(commit),
            None => {
                self.files.insert(path.to_string(), vec![commit]);
            }
        }
    }

    /// Commits recorded for `path`.
    pub fn get(&self, path: &str) -> Option<&[ObjectId]> {
        self.files.get(path).map(Vec::as_slice)
    }

    pub fn contains(&self, path: &str) -> bool {
        self.files.contains_key(path)
    }

    /// Iterate `(path, commits)` pairs.
    pub fn iter(&self) -> impl Iterator<Item = (&str, &[ObjectId])> {
        self.files.iter().map(|(p, c)| (p.as_str(), c.as_slice()))
    }

    /// Number of distinct paths.
    pub fn len(&self) -> usize {
        self.files.len()
    }

    pub fn is_empty(&self) -> bool {
        self.files.is_empty()
    }

    /// Total number of (path, commit) pairs.
    pub fn edge_count(&self) -> usize {
        self.files.values().map(Vec::len).sum()
    }
}

/// Invert a walk into a file → commits graph.
///
/// A file present in several commits lists all of them, repeats included.
pub fn build_graph(walk: &[WalkEntry]) -> DependencyGraph {
    let mut graph = DependencyGraph::new();
    for entry in walk {
        for path in &entry.files {
            graph.add(path, entry.oid);
        }
    }
    graph
}
