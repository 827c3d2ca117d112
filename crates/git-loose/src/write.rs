use std::fs;
use std::io::Write;

use flate2::write::ZlibEncoder;
use flate2::Compression;
use git_hash::hasher::Hasher;
use git_hash::ObjectId;
use git_object::{header, ObjectType};
use tempfile::NamedTempFile;

use crate::{LooseError, LooseObjectStore};

impl LooseObjectStore {
    /// Write raw content with a known type. Returns the OID.
    ///
    /// No-op if the object already exists. The file is written to a temp
    /// file in the objects directory and renamed into place.
    pub fn write_raw(&self, obj_type: ObjectType, content: &[u8]) -> Result<ObjectId, LooseError> {
        let hdr = header::write_header(obj_type, content.len());

        let oid = {
            let mut hasher = Hasher::new();
            hasher.update(&hdr);
            hasher.update(content);
            hasher.finalize()
        };

        if self.contains(&oid) {
            return Ok(oid);
        }

        let final_path = self.object_path(&oid);
        if let Some(parent) = final_path.parent() {
            fs::create_dir_all(parent).map_err(|e| LooseError::IoPath {
                path: parent.to_path_buf(),
                source: e,
            })?;
        }

        let tmp = NamedTempFile::new_in(&self.objects_dir)?;
        let mut encoder = ZlibEncoder::new(tmp, Compression::default());
        encoder.write_all(&hdr)?;
        encoder.write_all(content)?;
        let tmp = encoder.finish()?;

        tmp.persist(&final_path).map_err(|e| LooseError::IoPath {
            path: final_path,
            source: e.error,
        })?;
        Ok(oid)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn write_then_read_typed() {
        let dir = tempfile::tempdir().unwrap();
        let store = LooseObjectStore::open(dir.path());
        let oid = store.write_raw(ObjectType::Blob, b"hello\n").unwrap();

        assert_eq!(oid.to_hex(), "ce013625030ba8dba906f756967f9e9ca394464a");
        assert!(store.contains(&oid));
        assert_eq!(store.read_typed(&oid, ObjectType::Blob).unwrap(), b"hello\n");
    }

    #[test]
    fn write_is_idempotent() {
        let dir = tempfile::tempdir().unwrap();
        let store = LooseObjectStore::open(dir.path());
        let a = store.write_raw(ObjectType::Blob, b"same").unwrap();
        let b = store.write_raw(ObjectType::Blob, b"same").unwrap();
        assert_eq!(a, b);
    }

    #[test]
    fn read_typed_rejects_other_kind() {
        let dir = tempfile::tempdir().unwrap();
        let store = LooseObjectStore::open(dir.path());
        let oid = store.write_raw(ObjectType::Blob, b"data").unwrap();
        let err = store.read_typed(&oid, ObjectType::Tree).unwrap_err();
        assert!(matches!(
            err,
            LooseError::Object(git_object::ObjectError::UnexpectedType { .. })
        ));
    }
}
