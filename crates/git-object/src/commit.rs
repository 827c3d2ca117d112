use bstr::ByteSlice;
use git_hash::ObjectId;

use crate::ObjectError;

/// The graph-relevant headers of a git commit object.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Commit {
    /// OID of the root tree.
    pub tree: ObjectId,
    /// Parent commit OIDs in header order (empty for a root commit).
    pub parents: Vec<ObjectId>,
}

impl Commit {
    /// Parse commit content from raw bytes (no object header).
    ///
    /// Only the header block is scanned; it ends at the first empty line.
    /// The first `tree` line wins and every `parent` line is kept. Other
    /// headers, continuation lines and the message are ignored.
    pub fn parse(content: &[u8]) -> Result<Self, ObjectError> {
        let mut tree: Option<ObjectId> = None;
        let mut parents = Vec::new();

        for line in content.lines() {
            if line.is_empty() {
                break;
            }
            // Continuation of a multi-line header (gpgsig, mergetag).
            if line.starts_with(b" ") {
                continue;
            }
            let mut fields = line.fields();
            match fields.next() {
                Some(b"tree") if tree.is_none() => {
                    tree = Some(parse_oid_field("tree", fields.next())?);
                }
                Some(b"parent") => {
                    parents.push(parse_oid_field("parent", fields.next())?);
                }
                _ => {}
            }
        }

        let tree = tree.ok_or(ObjectError::MissingCommitField { field: "tree" })?;
        Ok(Self { tree, parents })
    }

    /// Serialize a minimal commit body: tree, parents, then the given
    /// remaining headers and message verbatim.
    pub fn serialize_with(&self, rest: &[u8]) -> Vec<u8> {
        let mut out = Vec::new();
        out.extend_from_slice(b"tree ");
        out.extend_from_slice(self.tree.to_hex().as_bytes());
        out.push(b'\n');
        for parent in &self.parents {
            out.extend_from_slice(b"parent ");
            out.extend_from_slice(parent.to_hex().as_bytes());
            out.push(b'\n');
        }
        out.extend_from_slice(rest);
        out
    }
}

fn parse_oid_field(field: &'static str, value: Option<&[u8]>) -> Result<ObjectId, ObjectError> {
    let value = value.ok_or_else(|| ObjectError::InvalidCommitField {
        field,
        reason: "missing value".into(),
    })?;
    let hex = value.to_str().map_err(|_| ObjectError::InvalidCommitField {
        field,
        reason: "non-UTF-8 value".into(),
    })?;
    ObjectId::from_hex(hex).map_err(|e| ObjectError::InvalidCommitField {
        field,
        reason: e.to_string(),
    })
}
