use sha1::{Digest, Sha1};

use crate::ObjectId;

/// Streaming SHA-1 computation producing an [`ObjectId`].
pub struct Hasher {
    inner: Sha1,
}

impl Hasher {
    pub fn new() -> Self {
        Self { inner: Sha1::new() }
    }

    /// Feed data into the hasher.
    pub fn update(&mut self, data: &[u8]) {
        self.inner.update(data);
    }

    /// Finalize and return the ObjectId.
    pub fn finalize(self) -> ObjectId {
        let digest = self.inner.finalize();
        // SHA-1 digests are always 20 bytes.
        ObjectId::from_bytes(digest.as_slice()).unwrap_or(ObjectId::NULL)
    }
}

impl Default for Hasher {
    fn default() -> Self {
        Self::new()
    }
}
