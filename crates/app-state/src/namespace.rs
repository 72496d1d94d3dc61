//! Namespace prefixes for filter keys
//!
//! Several filter panels can live on one page. Each one owns the address keys
//! spelled `<prefix>_<key>`; a panel without a prefix owns the keys that carry
//! no `_` at all.

use serde::{Deserialize, Serialize};

/// Separator between a namespace prefix and the key it qualifies
pub const PREFIX_SEPARATOR: char = '_';

/// Optional prefix scoping a filter panel's address keys
#[derive(Debug, Clone, Default, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub struct Namespace(Option<String>);

impl Namespace {
    /// The unprefixed namespace
    pub fn root() -> Self {
        Self(None)
    }

    /// A namespace scoped by `prefix`; an empty prefix is the root namespace
    pub fn prefixed(prefix: impl Into<String>) -> Self {
        let prefix = prefix.into();
        if prefix.is_empty() {
            Self(None)
        } else {
            Self(Some(prefix))
        }
    }

    /// Build from an optional prefix
    pub fn from_prefix(prefix: Option<&str>) -> Self {
        prefix.map(Self::prefixed).unwrap_or_default()
    }

    /// The prefix, if any
    pub fn prefix(&self) -> Option<&str> {
        self.0.as_deref()
    }

    /// Qualify a bare key for storage in the address
    pub fn qualify(&self, key: &str) -> String {
        match &self.0 {
            Some(prefix) => format!("{}{}{}", prefix, PREFIX_SEPARATOR, key),
            None => key.to_string(),
        }
    }

    /// Strip the prefix from an address key belonging to this namespace
    pub fn strip<'a>(&self, raw_key: &'a str) -> Option<&'a str> {
        match &self.0 {
            Some(prefix) => raw_key
                .strip_prefix(prefix.as_str())
                .and_then(|rest| rest.strip_prefix(PREFIX_SEPARATOR))
                .filter(|rest| !rest.is_empty()),
            None if raw_key.contains(PREFIX_SEPARATOR) => None,
            None => Some(raw_key),
        }
    }

    /// Check whether an address key belongs to this namespace
    pub fn owns(&self, raw_key: &str) -> bool {
        self.strip(raw_key).is_some()
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_qualify() {
        assert_eq!(Namespace::prefixed("f").qualify("status"), "f_status");
        assert_eq!(Namespace::root().qualify("status"), "status");
    }

    #[test]
    fn test_empty_prefix_is_root() {
        assert_eq!(Namespace::prefixed(""), Namespace::root());
        assert_eq!(Namespace::from_prefix(None), Namespace::root());
    }

    #[test]
    fn test_strip_prefixed() {
        let ns = Namespace::prefixed("f");
        assert_eq!(ns.strip("f_status"), Some("status"));
        assert_eq!(ns.strip("status"), None);
        assert_eq!(ns.strip("fx_status"), None);
        assert_eq!(ns.strip("f_"), None);
    }

    #[test]
    fn test_root_ignores_other_namespaces() {
        let ns = Namespace::root();
        assert_eq!(ns.strip("status"), Some("status"));
        assert!(!ns.owns("f_status"));
    }
}
