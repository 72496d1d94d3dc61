//! Filter panel configuration
//!
//! A hosting screen declares which filters its panel offers, which ones are
//! always applied, the namespace prefix and the quick filters it shows.

use super::keys::FilterKey;
use super::quick_filters::QuickFilterKind;
use app_state::Namespace;
use indexmap::IndexMap;
use serde::{Deserialize, Serialize};

/// Always-applied filters, in declaration order
pub type StaticFilterMap = IndexMap<FilterKey, String>;

/// Declarative configuration of one filter panel
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct FilterContext {
    /// Filters the user can pick
    pub available_filters: Vec<FilterKey>,

    /// Filters injected by the screen and restored on reset
    #[serde(default, skip_serializing_if = "IndexMap::is_empty")]
    pub static_filters: StaticFilterMap,

    /// Namespace prefix for the panel's address keys
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub filters_name_prefix: Option<String>,

    /// Quick filter presets shown above the panel
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub quick_filters_type: Option<QuickFilterKind>,
}

impl FilterContext {
    /// Create a context offering `available` filters
    pub fn new(available: impl IntoIterator<Item = FilterKey>) -> Self {
        Self {
            available_filters: available.into_iter().collect(),
            ..Default::default()
        }
    }

    /// Parse a context declared as JSON
    pub fn from_json(json: &str) -> serde_json::Result<Self> {
        serde_json::from_str(json)
    }

    /// Add a static filter
    pub fn with_static(mut self, key: FilterKey, value: impl Into<String>) -> Self {
        self.static_filters.insert(key, value.into());
        self
    }

    /// Set the namespace prefix
    pub fn with_prefix(mut self, prefix: impl Into<String>) -> Self {
        self.filters_name_prefix = Some(prefix.into());
        self
    }

    /// Show a family of quick filters
    pub fn with_quick_filters(mut self, kind: QuickFilterKind) -> Self {
        self.quick_filters_type = Some(kind);
        self
    }

    /// Namespace owning this panel's address keys
    pub fn namespace(&self) -> Namespace {
        Namespace::from_prefix(self.filters_name_prefix.as_deref())
    }

    /// Check if the user can pick `key`
    pub fn is_available(&self, key: FilterKey) -> bool {
        self.available_filters.contains(&key)
    }

    /// Check if `key` is always applied
    pub fn is_static(&self, key: FilterKey) -> bool {
        self.static_filters.contains_key(&key)
    }

    /// Check if `key` is static and not user-selectable
    pub fn is_static_only(&self, key: FilterKey) -> bool {
        self.is_static(key) && !self.is_available(key)
    }

    /// Check if reads should surface `key`
    pub fn accepts(&self, key: FilterKey) -> bool {
        self.is_available(key) || self.is_static(key)
    }

    /// Resolve an address key name to a filter this panel accepts
    pub fn accepts_name(&self, name: &str) -> Option<FilterKey> {
        FilterKey::parse(name).filter(|key| self.accepts(*key))
    }

    /// Available filters followed by static-only ones
    pub fn accepted_keys(&self) -> Vec<FilterKey> {
        self.available_filters
            .iter()
            .copied()
            .chain(
                self.static_filters
                    .keys()
                    .copied()
                    .filter(|key| !self.is_available(*key)),
            )
            .collect()
    }
}
