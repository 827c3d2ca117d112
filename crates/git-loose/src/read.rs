use std::fs;
use std::io::{ErrorKind, Read};
use std::path::{Path, PathBuf};

use flate2::read::ZlibDecoder;
use git_hash::ObjectId;
use git_object::{header, ObjectType};

use crate::{LooseError, LooseObjectStore};

impl LooseObjectStore {
    /// Check if a loose object exists.
    pub fn contains(&self, oid: &ObjectId) -> bool {
        self.object_path(oid).is_file()
    }

    /// Read and decompress a loose object, header included.
    ///
    /// Every call reads the file again; nothing is cached.
    pub fn read_raw(&self, oid: &ObjectId) -> Result<Vec<u8>, LooseError> {
        read_path(&oid.to_hex(), self.object_path(oid))
    }

    /// Read a loose object and return its payload, checking its type.
    pub fn read_typed(&self, oid: &ObjectId, expected: ObjectType) -> Result<Vec<u8>, LooseError> {
        let raw = self.read_raw(oid)?;
        let content = header::expect_object(&raw, expected)?;
        Ok(content.to_vec())
    }
}

/// Read and decompress the loose object named `hash` from `git_dir`.
///
/// The name is split after its second character into the fan-out directory
/// and file name; it is not otherwise validated.
pub fn read_object(git_dir: impl AsRef<Path>, hash: &str) -> Result<Vec<u8>, LooseError> {
    if hash.len() < 2 || !hash.is_char_boundary(2) {
        return Err(LooseError::InvalidName(hash.to_string()));
    }
    let path = git_dir
        .as_ref()
        .join("objects")
        .join(&hash[..2])
        .join(&hash[2..]);
    read_path(hash, path)
}

fn read_path(name: &str, path: PathBuf) -> Result<Vec<u8>, LooseError> {
    let compressed = match fs::read(&path) {
        Ok(data) => data,
        Err(e) if e.kind() == ErrorKind::NotFound => {
            return Err(LooseError::NotFound {
                oid: name.to_string(),
                path,
            })
        }
        Err(e) => return Err(LooseError::IoPath { path, source: e }),
    };
    tracing::debug!(oid = name, bytes = compressed.len(), "read loose object");
    decompress_all(&compressed, name)
}

/// Zlib-decompress the full contents of a loose object file.
fn decompress_all(compressed: &[u8], name: &str) -> Result<Vec<u8>, LooseError> {
    let mut decoder = ZlibDecoder::new(compressed);
    let mut decompressed = Vec::new();
    decoder
        .read_to_end(&mut decompressed)
        .map_err(|e| LooseError::Decompress {
            oid: name.to_string(),
            source: e,
        })?;
    Ok(decompressed)
}
