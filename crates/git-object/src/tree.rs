use bstr::{BString, ByteSlice};
use git_hash::ObjectId;

use crate::ObjectError;

/// File mode for tree entries, keyed on the exact ASCII mode token.
///
/// Only the token `40000` names a subdirectory. Any other token, including
/// zero-padded or non-octal ones, is kept verbatim as [`FileMode::Other`]
/// and counts as a file.
#[derive(Debug, Clone, PartialEq, Eq, Hash)]
pub enum FileMode {
    /// Regular file (100644)
    Regular,
    /// Executable file (100755)
    Executable,
    /// Symbolic link (120000)
    Symlink,
    /// Git submodule link (160000)
    Gitlink,
    /// Subdirectory (40000)
    Tree,
    /// Any other token, preserved for round-trip.
    Other(BString),
}

impl FileMode {
    /// Classify a mode token (e.g., `b"100644"`).
    pub fn from_bytes(token: &[u8]) -> Self {
        match token {
            b"100644" => Self::Regular,
            b"100755" => Self::Executable,
            b"120000" => Self::Symlink,
            b"160000" => Self::Gitlink,
            b"40000" => Self::Tree,
            other => Self::Other(BString::from(other)),
        }
    }

    /// The mode token as written in tree payloads.
    pub fn as_bytes(&self) -> &[u8] {
        match self {
            Self::Regular => b"100644",
            Self::Executable => b"100755",
            Self::Symlink => b"120000",
            Self::Gitlink => b"160000",
            Self::Tree => b"40000",
            Self::Other(token) => token.as_slice(),
        }
    }

    /// Is this a subdirectory entry?
    pub fn is_tree(&self) -> bool {
        matches!(self, Self::Tree)
    }
}

/// A single entry in a git tree object.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct TreeEntry {
    pub mode: FileMode,
    pub name: BString,
    pub oid: ObjectId,
}

impl TreeEntry {
    /// The entry name as UTF-8 text.
    pub fn name_str(&self) -> Result<&str, ObjectError> {
        self.name.to_str().map_err(|_| ObjectError::InvalidTreeEntry {
            offset: 0,
            reason: format!("non-UTF-8 name {:?}", self.name),
        })
    }
}

/// A git tree object: a directory listing in payload order.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct Tree {
    pub entries: Vec<TreeEntry>,
}

impl Tree {
    pub fn new() -> Self {
        Self::default()
    }

    /// Parse tree content from binary format.
    ///
    /// Each entry is `<mode-ascii> <name>\0<20 raw oid bytes>`, with no
    /// separator between entries.
    pub fn parse(content: &[u8]) -> Result<Self, ObjectError> {
        let mut cursor = EntryCursor { content, pos: 0 };
        let mut entries = Vec::new();
        while let Some(entry) = cursor.next_entry()? {
            entries.push(entry);
        }
        Ok(Self { entries })
    }

    /// Append an entry. Entries are kept in insertion order.
    pub fn push(&mut self, mode: FileMode, name: impl Into<BString>, oid: ObjectId) {
        self.entries.push(TreeEntry {
            mode,
            name: name.into(),
            oid,
        });
    }

    /// Serialize tree content to binary format, in entry order.
    ///
    /// Git itself writes entries in its canonical sort order; callers that
    /// need byte-identical trees must push entries in that order.
    pub fn serialize_content(&self) -> Vec<u8> {
        let mut out = Vec::new();
        for entry in &self.entries {
            out.extend_from_slice(entry.mode.as_bytes());
            out.push(b' ');
            out.extend_from_slice(&entry.name);
            out.push(0);
            out.extend_from_slice(entry.oid.as_bytes());
        }
        out
    }

    /// Iterate entries.
    pub fn iter(&self) -> impl Iterator<Item = &TreeEntry> {
        self.entries.iter()
    }

    /// Number of entries.
    pub fn len(&self) -> usize {
        self.entries.len()
    }

    /// Whether the tree is empty.
    pub fn is_empty(&self) -> bool {
        self.entries.is_empty()
    }
}

/// Bounds-checked reader over a tree payload.
struct EntryCursor<'a> {
    content: &'a [u8],
    pos: usize,
}

impl EntryCursor<'_> {
    fn next_entry(&mut self) -> Result<Option<TreeEntry>, ObjectError> {
        let start = self.pos;
        let rest = &self.content[start..];
        if rest.is_empty() {
            return Ok(None);
        }

        let null_pos = rest.find_byte(0).ok_or_else(|| ObjectError::InvalidTreeEntry {
            offset: start,
            reason: "missing null after name".into(),
        })?;
        let mode_name = &rest[..null_pos];

        let space_pos = mode_name
            .find_byte(b' ')
            .ok_or_else(|| ObjectError::InvalidTreeEntry {
                offset: start,
                reason: "missing space after mode".into(),
            })?;
        let mode = FileMode::from_bytes(&mode_name[..space_pos]);
        let name = BString::from(&mode_name[space_pos + 1..]);

        let oid_start = null_pos + 1;
        let oid_end = oid_start + ObjectId::LEN;
        if oid_end > rest.len() {
            return Err(ObjectError::InvalidTreeEntry {
                offset: start + oid_start,
                reason: format!(
                    "truncated OID: need {} bytes, have {}",
                    ObjectId::LEN,
                    rest.len() - oid_start
                ),
            });
        }
        let oid = ObjectId::from_bytes(&rest[oid_start..oid_end])?;

        self.pos = start + oid_end;
        Ok(Some(TreeEntry { mode, name, oid }))
    }
}
