//! Fixture repositories built directly from loose objects.
//!
//! No external `git` is needed: blobs, trees and commits are written with
//! `LooseObjectStore::write_raw`, and refs are plain files.

#![allow(dead_code)]

use std::fs;
use std::io::Write;
use std::path::Path;

use flate2::write::ZlibEncoder;
use flate2::Compression;
use git_hash::ObjectId;
use git_loose::LooseObjectStore;
use git_object::{FileMode, ObjectType, Tree};

pub struct FixtureRepo {
    dir: tempfile::TempDir,
    store: LooseObjectStore,
}

enum Node {
    File,
    Dir(Vec<String>),
}

impl FixtureRepo {
    pub fn new() -> Self {
        let dir = tempfile::tempdir().unwrap();
        fs::create_dir_all(dir.path().join("objects")).unwrap();
        fs::create_dir_all(dir.path().join("refs/heads")).unwrap();
        let store = LooseObjectStore::at_git_dir(dir.path());
        Self { dir, store }
    }

    pub fn git_dir(&self) -> &Path {
        self.dir.path()
    }

    /// Build a tree (with subtrees) holding the given slash-separated paths.
    ///
    /// Entries are written in the order paths are first mentioned.
    pub fn tree(&self, paths: &[&str]) -> ObjectId {
        let owned: Vec<String> = paths.iter().map(|p| p.to_string()).collect();
        self.tree_from(&owned)
    }

    fn tree_from(&self, paths: &[String]) -> ObjectId {
        let mut nodes: Vec<(String, Node)> = Vec::new();
        for path in paths {
            match path.split_once('/') {
                Some((dir, rest)) => match nodes.iter_mut().find(|(n, _)| n == dir) {
                    Some((_, Node::Dir(children))) => children.push(rest.to_string()),
                    _ => nodes.push((dir.to_string(), Node::Dir(vec![rest.to_string()]))),
                },
                None => nodes.push((path.clone(), Node::File)),
            }
        }

        let mut tree = Tree::new();
        for (name, node) in nodes {
            match node {
                Node::File => {
                    let blob = self
                        .store
                        .write_raw(ObjectType::Blob, format!("contents of {name}\n").as_bytes())
                        .unwrap();
                    tree.push(FileMode::Regular, name, blob);
                }
                Node::Dir(children) => tree.push(FileMode::Tree, name, self.tree_from(&children)),
            }
        }
        self.store
            .write_raw(ObjectType::Tree, &tree.serialize_content())
            .unwrap()
    }

    /// Write a commit object. `message` keeps otherwise-identical commits distinct.
    pub fn commit(&self, tree: ObjectId, parents: &[ObjectId], message: &str) -> ObjectId {
        self.store
            .write_raw(ObjectType::Commit, &commit_body(&tree.to_hex(), parents, message))
            .unwrap()
    }

    /// Write a commit whose tree holds `paths`.
    pub fn commit_files(&self, paths: &[&str], parents: &[ObjectId], message: &str) -> ObjectId {
        let tree = self.tree(paths);
        self.commit(tree, parents, message)
    }

    pub fn set_branch(&self, name: &str, oid: ObjectId) {
        let path = self.git_dir().join("refs/heads").join(name);
        fs::create_dir_all(path.parent().unwrap()).unwrap();
        fs::write(path, format!("{oid}\n")).unwrap();
    }

    /// Store `raw` (header included) under an arbitrary object name.
    pub fn plant(&self, hex: &str, raw: &[u8]) {
        let path = self.git_dir().join("objects").join(&hex[..2]).join(&hex[2..]);
        fs::create_dir_all(path.parent().unwrap()).unwrap();
        let mut encoder = ZlibEncoder::new(Vec::new(), Compression::default());
        encoder.write_all(raw).unwrap();
        fs::write(path, encoder.finish().unwrap()).unwrap();
    }

    /// Store a commit under an arbitrary object name.
    pub fn plant_commit(&self, hex: &str, tree: ObjectId, parents: &[ObjectId]) {
        let body = commit_body(&tree.to_hex(), parents, hex);
        let mut raw = format!("commit {}\0", body.len()).into_bytes();
        raw.extend_from_slice(&body);
        self.plant(hex, &raw);
    }
}

pub fn commit_body(tree: &str, parents: &[ObjectId], message: &str) -> Vec<u8> {
    let mut body = format!("tree {tree}\n");
    for parent in parents {
        body.push_str(&format!("parent {parent}\n"));
    }
    body.push_str("author Test Author <test@example.com> 1234567890 +0000\n");
    body.push_str("committer Test Committer <test@example.com> 1234567890 +0000\n");
    body.push('\n');
    body.push_str(message);
    body.push('\n');
    body.into_bytes()
}

pub fn oid(hex: &str) -> ObjectId {
    ObjectId::from_hex(hex).unwrap()
}
