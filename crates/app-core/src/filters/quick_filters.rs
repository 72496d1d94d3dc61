//! Quick filters
//!
//! A quick filter is a named preset that sets a fixed combination of filters
//! in one click. Presets serialize to a canonical query string and can be
//! matched against the current address to highlight the active one.

use super::context::StaticFilterMap;
use super::keys::FilterKey;
use app_state::{Namespace, SearchParams};
use indexmap::IndexMap;
use serde::{Deserialize, Serialize};

/// Value of one preset entry
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(untagged)]
pub enum PresetValue {
    /// Flag
    Flag(bool),
    /// Single value
    One(String),
    /// Several values, joined with `,`
    Many(Vec<String>),
}

impl PresetValue {
    /// Text stored in the address
    pub fn to_query_value(&self) -> String {
        match self {
            PresetValue::Flag(flag) => flag.to_string(),
            PresetValue::One(value) => value.clone(),
            PresetValue::Many(values) => values.join(","),
        }
    }
}

impl From<&str> for PresetValue {
    fn from(value: &str) -> Self {
        PresetValue::One(value.to_string())
    }
}

impl From<bool> for PresetValue {
    fn from(flag: bool) -> Self {
        PresetValue::Flag(flag)
    }
}

impl<const N: usize> From<[&str; N]> for PresetValue {
    fn from(values: [&str; N]) -> Self {
        PresetValue::Many(values.iter().map(|v| v.to_string()).collect())
    }
}

/// Ordered set of filter values applied together
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(transparent)]
pub struct QuickFilterPreset {
    entries: IndexMap<FilterKey, PresetValue>,
}

impl QuickFilterPreset {
    /// Create an empty preset
    pub fn new() -> Self {
        Self::default()
    }

    /// Add an entry
    pub fn with(mut self, key: FilterKey, value: impl Into<PresetValue>) -> Self {
        self.entries.insert(key, value.into());
        self
    }

    /// Iterate over entries in order
    pub fn iter(&self) -> impl Iterator<Item = (FilterKey, &PresetValue)> {
        self.entries.iter().map(|(key, value)| (*key, value))
    }

    /// Keys set by this preset
    pub fn keys(&self) -> impl Iterator<Item = FilterKey> + '_ {
        self.entries.keys().copied()
    }

    /// Check if the preset sets nothing
    pub fn is_empty(&self) -> bool {
        self.entries.is_empty()
    }
}

/// Address entries written by a preset: static filters first, then the
/// preset's own entries overriding any static value for the same key
pub fn quick_filter_params(
    preset: &QuickFilterPreset,
    static_filters: &StaticFilterMap,
    namespace: &Namespace,
) -> SearchParams {
    let mut params = SearchParams::new();
    for (key, value) in static_filters {
        params.set(namespace.qualify(key.as_str()), value.clone());
    }
    for (key, value) in preset.iter() {
        params.set(namespace.qualify(key.as_str()), value.to_query_value());
    }
    params
}

/// Canonical query string of a preset
///
/// The same static filters and preset always give the same string.
pub fn build_quick_filter_url_params(
    preset: &QuickFilterPreset,
    static_filters: &StaticFilterMap,
    namespace: &Namespace,
) -> String {
    quick_filter_params(preset, static_filters, namespace).to_query_string()
}

/// Check whether every entry of `preset` holds exactly in `params`
///
/// An empty preset is never active.
pub fn is_quick_filter_active(
    preset: &QuickFilterPreset,
    params: &SearchParams,
    namespace: &Namespace,
) -> bool {
    !preset.is_empty()
        && preset.iter().all(|(key, value)| {
            params.get(&namespace.qualify(key.as_str())) == Some(value.to_query_value().as_str())
        })
}

// =============================================================================
// Built-in presets
// =============================================================================

/// Families of quick filters a panel can show
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub enum QuickFilterKind {
    /// Invoice status presets
    Invoices,
}

impl QuickFilterKind {
    /// Presets of this family, in display order
    pub fn presets(&self) -> Vec<(&'static str, QuickFilterPreset)> {
        match self {
            QuickFilterKind::Invoices => InvoiceQuickFilter::all()
                .into_iter()
                .map(|filter| (filter.name(), filter.preset()))
                .collect(),
        }
    }
}

/// Invoice list presets
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub enum InvoiceQuickFilter {
    /// Draft invoices
    Draft,
    /// Finalized invoices awaiting payment
    Outstanding,
    /// Finalized and paid
    Succeeded,
    /// Voided invoices
    Voided,
    /// Payment overdue
    PaymentOverdue,
    /// Payment dispute lost
    PaymentDisputeLost,
}

impl InvoiceQuickFilter {
    /// All presets in display order
    pub fn all() -> [InvoiceQuickFilter; 6] {
        [
            InvoiceQuickFilter::Draft,
            InvoiceQuickFilter::Outstanding,
            InvoiceQuickFilter::Succeeded,
            InvoiceQuickFilter::Voided,
            InvoiceQuickFilter::PaymentOverdue,
            InvoiceQuickFilter::PaymentDisputeLost,
        ]
    }

    /// Stable name of the preset
    pub fn name(&self) -> &'static str {
        match self {
            InvoiceQuickFilter::Draft => "draft",
            InvoiceQuickFilter::Outstanding => "outstanding",
            InvoiceQuickFilter::Succeeded => "succeeded",
            InvoiceQuickFilter::Voided => "voided",
            InvoiceQuickFilter::PaymentOverdue => "paymentOverdue",
            InvoiceQuickFilter::PaymentDisputeLost => "paymentDisputeLost",
        }
    }

    /// Filters set by the preset
    pub fn preset(&self) -> QuickFilterPreset {
        let preset = QuickFilterPreset::new();
        match self {
            InvoiceQuickFilter::Draft => preset.with(FilterKey::Status, "draft"),
            InvoiceQuickFilter::Outstanding => preset
                .with(FilterKey::PaymentStatus, ["failed", "pending"])
                .with(FilterKey::Status, "finalized"),
            InvoiceQuickFilter::Succeeded => preset
                .with(FilterKey::PaymentStatus, "succeeded")
                .with(FilterKey::Status, "finalized"),
            InvoiceQuickFilter::Voided => preset.with(FilterKey::Status, "voided"),
            InvoiceQuickFilter::PaymentOverdue => preset.with(FilterKey::PaymentOverdue, true),
            InvoiceQuickFilter::PaymentDisputeLost => {
                preset.with(FilterKey::PaymentDisputeLost, true)
            }
        }
    }

    /// Check whether the preset is active in `params`
    pub fn matches(&self, params: &SearchParams, namespace: &Namespace) -> bool {
        is_quick_filter_active(&self.preset(), params, namespace)
    }

    /// First preset active in `params`
    pub fn detect(params: &SearchParams, namespace: &Namespace) -> Option<InvoiceQuickFilter> {
        InvoiceQuickFilter::all()
            .into_iter()
            .find(|filter| filter.matches(params, namespace))
    }
}

/// Check for the draft preset
pub fn is_draft_url_params(params: &SearchParams, namespace: &Namespace) -> bool {
    InvoiceQuickFilter::Draft.matches(params, namespace)
}

/// Check for the outstanding preset
pub fn is_outstanding_url_params(params: &SearchParams, namespace: &Namespace) -> bool {
    InvoiceQuickFilter::Outstanding.matches(params, namespace)
}

/// Check for the succeeded preset
pub fn is_succeeded_url_params(params: &SearchParams, namespace: &Namespace) -> bool {
    InvoiceQuickFilter::Succeeded.matches(params, namespace)
}

/// Check for the voided preset
pub fn is_voided_url_params(params: &SearchParams, namespace: &Namespace) -> bool {
    InvoiceQuickFilter::Voided.matches(params, namespace)
}

/// Check for the payment overdue preset
pub fn is_payment_overdue_url_params(params: &SearchParams, namespace: &Namespace) -> bool {
    InvoiceQuickFilter::PaymentOverdue.matches(params, namespace)
}

/// Check for the payment dispute lost preset
pub fn is_payment_dispute_lost_url_params(params: &SearchParams, namespace: &Namespace) -> bool {
    InvoiceQuickFilter::PaymentDisputeLost.matches(params, namespace)
}
