use std::collections::HashSet;

use crate::ObjectId;

/// Hash set of ObjectIds, used to mark commits already visited by a walk.
#[derive(Debug, Clone, Default)]
pub struct OidSet {
    inner: HashSet<ObjectId>,
}

impl OidSet {
    pub fn new() -> Self {
        Self::default()
    }

    /// Insert an OID. Returns `true` if the OID was newly inserted.
    pub fn insert(&mut self, oid: ObjectId) -> bool {
        self.inner.insert(oid)
    }

    pub fn len(&self) -> usize {
        self.inner.len()
    }

    pub fn is_empty(&self) -> bool {
        self.inner.is_empty()
    }
}
