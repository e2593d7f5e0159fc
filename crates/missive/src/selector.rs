use std::{borrow::Borrow, fmt, ops::Deref};

/// Name of an operation sent to a receiver (`power`, `channel=`, `on?`, `upcase!`).
///
/// Selectors are compared by exact string equality: `channel` and `channel=` are
/// different operations. `Selector` implements `Borrow<str>` so maps keyed by
/// selectors can be queried with plain string slices.
#[derive(Debug, Clone, PartialEq, Eq, Hash, PartialOrd, Ord, serde::Serialize, serde::Deserialize)]
#[serde(transparent)]
pub struct Selector(String);

impl Selector {
    /// Returns the selector name.
    #[must_use]
    pub fn as_str(&self) -> &str {
        &self.0
    }
}

impl fmt::Display for Selector {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(&self.0)
    }
}

impl Deref for Selector {
    type Target = str;

    fn deref(&self) -> &str {
        &self.0
    }
}

impl Borrow<str> for Selector {
    fn borrow(&self) -> &str {
        &self.0
    }
}

impl AsRef<str> for Selector {
    fn as_ref(&self) -> &str {
        &self.0
    }
}

impl From<&str> for Selector {
    fn from(name: &str) -> Self {
        Self(name.to_owned())
    }
}

impl From<String> for Selector {
    fn from(name: String) -> Self {
        Self(name)
    }
}

impl From<&Selector> for Selector {
    fn from(selector: &Self) -> Self {
        selector.clone()
    }
}

impl PartialEq<str> for Selector {
    fn eq(&self, other: &str) -> bool {
        self.0 == other
    }
}

impl PartialEq<&str> for Selector {
    fn eq(&self, other: &&str) -> bool {
        self.0 == *other
    }
}
