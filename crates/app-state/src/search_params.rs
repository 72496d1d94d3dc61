//! Flat query-string multimap
//!
//! The page address carries its state as an ordered list of `key=value`
//! pairs. [`SearchParams`] owns that list and converts it to and from the
//! query component of a URL.

use serde::{Deserialize, Serialize};
use std::fmt;

/// Ordered key/value multimap backing the query component of the page address
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct SearchParams {
    entries: Vec<(String, String)>,
}

impl SearchParams {
    /// Create an empty set of params
    pub fn new() -> Self {
        Self::default()
    }

    /// Parse a query string (`a=1&b=2`, with or without a leading `?`)
    ///
    /// `+` decodes to a space. Pairs whose key or value is not valid
    /// percent-encoded UTF-8 are skipped. A pair without `=` is kept with an
    /// empty value.
    pub fn parse(query: &str) -> Self {
        let query = query.strip_prefix('?').unwrap_or(query);
        let mut params = Self::new();

        for pair in query.split('&').filter(|p| !p.is_empty()) {
            let (raw_key, raw_value) = pair.split_once('=').unwrap_or((pair, ""));
            match (decode_component(raw_key), decode_component(raw_value)) {
                (Some(key), Some(value)) if !key.is_empty() => params.append(key, value),
                _ => tracing::trace!(pair, "Skipping undecodable query pair"),
            }
        }

        params
    }

    /// Serialize to a query string without the leading `?`
    pub fn to_query_string(&self) -> String {
        self.entries
            .iter()
            .map(|(key, value)| format!("{}={}", encode_component(key), encode_component(value)))
            .collect::<Vec<_>>()
            .join("&")
    }

    /// First value stored under `key`
    pub fn get(&self, key: &str) -> Option<&str> {
        self.entries
            .iter()
            .find(|(k, _)| k == key)
            .map(|(_, v)| v.as_str())
    }

    /// Every value stored under `key`, in order
    pub fn get_all(&self, key: &str) -> Vec<&str> {
        self.entries
            .iter()
            .filter(|(k, _)| k == key)
            .map(|(_, v)| v.as_str())
            .collect()
    }

    /// Check whether `key` is present
    pub fn contains_key(&self, key: &str) -> bool {
        self.entries.iter().any(|(k, _)| k == key)
    }

    /// Set `key` to a single value
    ///
    /// The first existing entry is overwritten in place and any further
    /// duplicates are dropped; a new key is appended at the end.
    pub fn set(&mut self, key: impl Into<String>, value: impl Into<String>) {
        let key = key.into();
        let value = value.into();

        match self.entries.iter().position(|(k, _)| *k == key) {
            Some(index) => {
                self.entries[index].1 = value;
                let mut seen = 0usize;
                self.entries.retain(|(k, _)| {
                    if *k == key {
                        seen += 1;
                        seen == 1
                    } else {
                        true
                    }
                });
            }
            None => self.entries.push((key, value)),
        }
    }

    /// Append a value without touching existing entries for the same key
    pub fn append(&mut self, key: impl Into<String>, value: impl Into<String>) {
        self.entries.push((key.into(), value.into()));
    }

    /// Remove every entry for `key`, returning how many were removed
    pub fn remove(&mut self, key: &str) -> usize {
        let before = self.entries.len();
        self.entries.retain(|(k, _)| k != key);
        before - self.entries.len()
    }

    /// Keep only the entries for which `keep` returns true
    pub fn retain(&mut self, mut keep: impl FnMut(&str, &str) -> bool) {
        self.entries.retain(|(k, v)| keep(k, v));
    }

    /// Iterate over entries in order
    pub fn iter(&self) -> impl Iterator<Item = (&str, &str)> {
        self.entries.iter().map(|(k, v)| (k.as_str(), v.as_str()))
    }

    /// Number of entries
    pub fn len(&self) -> usize {
        self.entries.len()
    }

    /// Check if there are no entries
    pub fn is_empty(&self) -> bool {
        self.entries.is_empty()
    }

    /// Compare entries while ignoring their order
    pub fn same_entries(&self, other: &SearchParams) -> bool {
        let mut left: Vec<_> = self.entries.iter().collect();
        let mut right: Vec<_> = other.entries.iter().collect();
        left.sort();
        right.sort();
        left == right
    }
}

impl fmt::Display for SearchParams {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(&self.to_query_string())
    }
}

impl<K, V> FromIterator<(K, V)> for SearchParams
where
    K: Into<String>,
    V: Into<String>,
{
    fn from_iter<I: IntoIterator<Item = (K, V)>>(iter: I) -> Self {
        Self {
            entries: iter
                .into_iter()
                .map(|(k, v)| (k.into(), v.into()))
                .collect(),
        }
    }
}

impl IntoIterator for SearchParams {
    type Item = (String, String);
    type IntoIter = std::vec::IntoIter<(String, String)>;

    fn into_iter(self) -> Self::IntoIter {
        self.entries.into_iter()
    }
}

/// Percent-encode one query component, leaving `,` readable
///
/// Multi-value filters are comma separated, so commas stay literal in the
/// address. Decoding accepts both the literal and the `%2C` form.
pub fn encode_component(raw: &str) -> String {
    raw.split(',')
        .map(|part| urlencoding::encode(part).into_owned())
        .collect::<Vec<_>>()
        .join(",")
}

fn decode_component(raw: &str) -> Option<String> {
    let spaced = raw.replace('+', " ");
    urlencoding::decode(&spaced).ok().map(|s| s.into_owned())
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_parse_with_leading_question_mark() {
        let params = SearchParams::parse("?status=draft&currency=eur");
        assert_eq!(params.get("status"), Some("draft"));
        assert_eq!(params.get("currency"), Some("eur"));
        assert_eq!(params.len(), 2);
    }

    #[test]
    fn test_parse_decodes_components() {
        let params = SearchParams::parse("metadata=plan%3Dgold%26tier%3D1&q=hello+world");
        assert_eq!(params.get("metadata"), Some("plan=gold&tier=1"));
        assert_eq!(params.get("q"), Some("hello world"));
    }

    #[test]
    fn test_parse_skips_empty_pairs_and_keeps_bare_keys() {
        let params = SearchParams::parse("a=1&&flag");
        assert_eq!(params.len(), 2);
        assert_eq!(params.get("flag"), Some(""));
    }

    #[test]
    fn test_to_query_string_keeps_commas() {
        let params: SearchParams = [("paymentStatus", "failed,pending"), ("status", "finalized")]
            .into_iter()
            .collect();
        assert_eq!(
            params.to_query_string(),
            "paymentStatus=failed,pending&status=finalized"
        );
    }

    #[test]
    fn test_to_query_string_encodes_reserved_characters() {
        let mut params = SearchParams::new();
        params.set("metadata", "plan=gold&tier=1");
        assert_eq!(params.to_query_string(), "metadata=plan%3Dgold%26tier%3D1");

        let reparsed = SearchParams::parse(&params.to_query_string());
        assert_eq!(reparsed, params);
    }

    #[test]
    fn test_set_replaces_in_place_and_drops_duplicates() {
        let mut params = SearchParams::parse("a=1&b=2&a=3");
        params.set("a", "9");
        assert_eq!(params.to_query_string(), "a=9&b=2");

        params.set("c", "4");
        assert_eq!(params.to_query_string(), "a=9&b=2&c=4");
    }

    #[test]
    fn test_get_all_and_remove() {
        let mut params = SearchParams::parse("a=1&b=2&a=3");
        assert_eq!(params.get_all("a"), vec!["1", "3"]);
        assert_eq!(params.remove("a"), 2);
        assert!(!params.contains_key("a"));
        assert_eq!(params.remove("a"), 0);
    }

    #[test]
    fn test_same_entries_ignores_order() {
        let left = SearchParams::parse("a=1&b=2");
        let right = SearchParams::parse("b=2&a=1");
        assert!(left.same_entries(&right));
        assert_ne!(left, right);
        assert!(!left.same_entries(&SearchParams::parse("a=1")));
    }
}
