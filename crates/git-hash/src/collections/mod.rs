//! Specialized OID collections.

mod oid_set;

pub use oid_set::OidSet;
