use std::fmt;

use bstr::{BString, ByteSlice};

use crate::error::RefError;

/// A validated reference name such as `refs/heads/main` or `HEAD`.
///
/// Validation follows the parts of `git-check-ref-format(1)` that matter for
/// mapping a name onto a file path:
/// - No empty name, NUL, control characters, or any of ` ~^:?*[\`
/// - No `..`, `//`, or `@{`
/// - Cannot begin or end with `/`, or end with `.`
/// - No component may start with `.` or end with `.lock`
#[derive(Debug, Clone, PartialEq, Eq, PartialOrd, Ord, Hash)]
pub struct RefName(BString);

/// Characters forbidden anywhere in a ref name.
const FORBIDDEN_CHARS: &[u8] = b" ~^:?*[\\";

const BRANCH_PREFIX: &str = "refs/heads/";

impl RefName {
    /// Create and validate a ref name.
    pub fn new(name: impl Into<BString>) -> Result<Self, RefError> {
        let name = name.into();
        validate_ref_name(&name)?;
        Ok(Self(name))
    }

    /// Build the full ref name of a local branch: `refs/heads/<short>`.
    pub fn branch(short: &str) -> Result<Self, RefError> {
        Self::new(format!("{BRANCH_PREFIX}{short}"))
    }

    /// Get as a string slice.
    pub fn as_str(&self) -> &str {
        // Names are only built from `&str` or UTF-8-checked ref contents.
        std::str::from_utf8(&self.0).unwrap_or("<invalid-utf8>")
    }

    /// Path components of the name, for joining onto the git directory.
    pub fn components(&self) -> impl Iterator<Item = &str> {
        self.as_str().split('/')
    }
}

impl fmt::Display for RefName {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

fn validate_ref_name(name: &[u8]) -> Result<(), RefError> {
    let invalid = |why: &str| {
        Err(RefError::InvalidName(format!(
            "'{}': {why}",
            String::from_utf8_lossy(name)
        )))
    };

    if name.is_empty() {
        return Err(RefError::InvalidName("ref name is empty".into()));
    }
    for &b in name {
        if b < 0x20 || b == 0x7f {
            return invalid("contains control character");
        }
        if FORBIDDEN_CHARS.contains(&b) {
            return invalid(&format!("contains forbidden character '{}'", b as char));
        }
    }
    if name.starts_with(b"/") || name.ends_with(b"/") {
        return invalid("begins or ends with '/'");
    }
    if name.ends_with(b".") {
        return invalid("ends with '.'");
    }
    for bad in ["..", "//", "@{"] {
        if name.find(bad).is_some() {
            return invalid(&format!("contains '{bad}'"));
        }
    }
    for component in name.split_str("/") {
        if component.starts_with(b".") {
            return invalid("component starts with '.'");
        }
        if component.ends_with(b".lock") {
            return invalid("component ends with '.lock'");
        }
    }
    Ok(())
}
