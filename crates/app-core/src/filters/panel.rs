//! Filter panel
//!
//! Binds a [`FilterContext`] to the page address. Every read goes back to the
//! navigator, so several panels sharing one page never see stale filters.

use super::codec::CodecRegistry;
use super::context::FilterContext;
use super::display::filter_key_label;
use super::form::{self, FiltersFormValues, FormSource};
use super::keys::FilterKey;
use super::query::{format_filters_for_query_with, FilterQuery, KeyMap};
use super::quick_filters::{
    self, quick_filter_params, InvoiceQuickFilter, QuickFilterKind, QuickFilterPreset,
};
use super::value::FilterValue;
use app_state::{AddressState, Namespace, Navigator, SearchParams};
use i18n::Translate;
use serde::Serialize;

/// Summary chip of one active filter
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct ActiveFilterChip {
    /// Filter shown by the chip
    pub key: FilterKey,
    /// Filter name
    pub label: String,
    /// Raw address value
    pub value: String,
    /// Value rendered for people
    pub display: String,
    /// Whether the chip can be closed
    pub removable: bool,
}

/// One filter panel on a page
#[derive(Debug)]
pub struct FilterPanel<N> {
    context: FilterContext,
    namespace: Namespace,
    address: AddressState<N>,
    registry: CodecRegistry,
}

impl<N: Navigator> FilterPanel<N> {
    /// Create a panel using the standard codecs
    pub fn new(context: FilterContext, navigator: N) -> Self {
        Self {
            namespace: context.namespace(),
            context,
            address: AddressState::new(navigator),
            registry: CodecRegistry::standard().clone(),
        }
    }

    /// Use `registry` instead of the standard codecs
    pub fn with_registry(mut self, registry: CodecRegistry) -> Self {
        self.registry = registry;
        self
    }

    /// Panel configuration
    pub fn context(&self) -> &FilterContext {
        &self.context
    }

    /// Namespace owning the panel's address keys
    pub fn namespace(&self) -> &Namespace {
        &self.namespace
    }

    /// Address the panel reads and writes
    pub fn address(&self) -> &AddressState<N> {
        &self.address
    }

    /// Inject static filters missing from the address
    ///
    /// Runs once when the panel appears; nothing re-applies them if they are
    /// removed later. Returns the number of injected filters.
    pub fn mount(&self) -> usize {
        let mut scoped = self.address.read(&self.namespace);
        let mut injected = 0;

        for (key, value) in &self.context.static_filters {
            if !scoped.contains_key(key.as_str()) {
                scoped.append(key.as_str(), value.as_str());
                injected += 1;
            }
        }

        if injected > 0 {
            tracing::debug!(injected, "Injecting static filters on mount");
            self.address.write(&self.namespace, &scoped);
        }
        injected
    }

    // =========================================================================
    // Reads
    // =========================================================================

    /// Committed entries of the filters this panel accepts, prefix stripped
    pub fn filters(&self) -> SearchParams {
        self.address
            .read(&self.namespace)
            .iter()
            .filter(|(name, _)| self.context.accepts_name(name).is_some())
            .collect()
    }

    /// Decoded value of each active filter, first occurrence per key
    pub fn active_filters(&self) -> Vec<(FilterKey, FilterValue)> {
        self.accepted_entries()
            .into_iter()
            .map(|(key, raw)| (key, self.registry.decode(key, &raw)))
            .collect()
    }

    /// Query input of the panel's filters
    pub fn query(&self, key_map: Option<&KeyMap>) -> FilterQuery {
        format_filters_for_query_with(
            &self.registry,
            &self.address.snapshot(),
            &self.context.accepted_keys(),
            &self.namespace,
            key_map,
        )
    }

    /// Chips summarizing the active filters
    pub fn active_filter_chips(&self, translator: Option<&dyn Translate>) -> Vec<ActiveFilterChip> {
        self.accepted_entries()
            .into_iter()
            .map(|(key, value)| ActiveFilterChip {
                key,
                label: filter_key_label(key, translator),
                display: self.registry.display(key, &value, translator),
                removable: !self.context.is_static_only(key),
                value,
            })
            .collect()
    }

    fn accepted_entries(&self) -> Vec<(FilterKey, String)> {
        let mut entries: Vec<(FilterKey, String)> = Vec::new();
        for (name, value) in self.address.read(&self.namespace).iter() {
            let Some(key) = self.context.accepts_name(name) else {
                continue;
            };
            if !entries.iter().any(|(seen, _)| *seen == key) {
                entries.push((key, value.to_string()));
            }
        }
        entries
    }

    // =========================================================================
    // Form
    // =========================================================================

    /// Rows shown when the panel's form opens
    pub fn initial_form_values(&self, source: FormSource) -> FiltersFormValues {
        form::initial_form_values(&self.address.read(&self.namespace), &self.context, source)
    }

    /// Commit the complete rows of `values`
    ///
    /// Rows without a filter or value, or with a filter the panel does not
    /// accept, are dropped. When a filter appears twice the last row wins.
    pub fn apply_filters(&self, values: &FiltersFormValues) {
        let mut scoped = self.address.read(&self.namespace);
        scoped.retain(|name, _| self.context.accepts_name(name).is_none());

        for (key, value) in values.committed() {
            if self.context.accepts(key) {
                scoped.set(key.as_str(), value);
            } else {
                tracing::trace!(key = key.as_str(), "Dropping row for undeclared filter");
            }
        }

        self.address.write(&self.namespace, &scoped);
    }

    /// Validate `values`, then commit them
    ///
    /// The address is left untouched when validation fails.
    pub fn submit(&self, values: &FiltersFormValues) -> form::Result<()> {
        values.validate(&self.registry)?;
        self.apply_filters(values);
        Ok(())
    }

    /// Clear every user-selectable filter
    ///
    /// Static values come back; static-only filters are never removed.
    pub fn reset_filters(&self) {
        let mut scoped = self.address.read(&self.namespace);
        scoped.retain(|name, _| {
            FilterKey::parse(name).map_or(true, |key| !self.context.is_available(key))
        });

        for (key, value) in &self.context.static_filters {
            if self.context.is_available(*key) || !scoped.contains_key(key.as_str()) {
                scoped.set(key.as_str(), value.as_str());
            }
        }

        self.address.write(&self.namespace, &scoped);
    }

    /// Close the chip of `key`
    ///
    /// Returns `false` when the filter is static-only or not active.
    pub fn remove_filter(&self, key: FilterKey) -> bool {
        if !self.context.accepts(key) || self.context.is_static_only(key) {
            return false;
        }

        let mut scoped = self.address.read(&self.namespace);
        if scoped.remove(key.as_str()) == 0 {
            return false;
        }
        self.address.write(&self.namespace, &scoped);
        true
    }

    // =========================================================================
    // Quick filters
    // =========================================================================

    /// Query string selecting `preset` together with the static filters
    pub fn build_quick_filter_url_params(&self, preset: &QuickFilterPreset) -> String {
        quick_filters::build_quick_filter_url_params(
            preset,
            &self.context.static_filters,
            &self.namespace,
        )
    }

    /// Check whether `preset` holds in the current address
    pub fn is_quick_filter_active(&self, preset: &QuickFilterPreset) -> bool {
        quick_filters::is_quick_filter_active(preset, &self.address.snapshot(), &self.namespace)
    }

    /// Replace the panel's filters with the static filters and `preset`
    pub fn apply_quick_filter(&self, preset: &QuickFilterPreset) {
        let entries = quick_filter_params(preset, &self.context.static_filters, &Namespace::root());
        self.address.write(&self.namespace, &entries);
    }

    /// Apply `preset`, or reset the filters when it is already active
    ///
    /// Returns whether the preset is active afterwards.
    pub fn toggle_quick_filter(&self, preset: &QuickFilterPreset) -> bool {
        if self.is_quick_filter_active(preset) {
            self.reset_filters();
            false
        } else {
            self.apply_quick_filter(preset);
            true
        }
    }

    /// Invoice preset active in the address, if the panel shows invoice presets
    pub fn active_quick_filter(&self) -> Option<InvoiceQuickFilter> {
        match self.context.quick_filters_type {
            Some(QuickFilterKind::Invoices) => {
                InvoiceQuickFilter::detect(&self.address.snapshot(), &self.namespace)
            }
            None => None,
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::filters::form::FilterRow;
    use crate::filters::error::{FormError, RowError};
    use crate::filters::value::IntervalOperator;
    use app_state::MemoryNavigator;

    fn panel(location: &str, context: FilterContext) -> FilterPanel<MemoryNavigator> {
        FilterPanel::new(context, MemoryNavigator::new(location))
    }

    fn invoices() -> FilterContext {
        FilterContext::new([
            FilterKey::Status,
            FilterKey::PaymentStatus,
            FilterKey::Amount,
            FilterKey::Currency,
        ])
        .with_static(FilterKey::Currency, "eur")
        .with_static(FilterKey::CustomerExternalId, "cus_1|-|Acme")
        .with_prefix("f")
        .with_quick_filters(QuickFilterKind::Invoices)
    }

    fn location<N: Navigator>(panel: &FilterPanel<N>) -> String {
        panel.address().snapshot().to_query_string()
    }

    #[test]
    fn test_mount_injects_missing_statics_once() {
        let panel = panel("/invoices?f_currency=usd&tab=all", invoices());

        assert_eq!(panel.mount(), 1);
        assert_eq!(
            location(&panel),
            "tab=all&f_currency=usd&f_customerExternalId=cus_1%7C-%7CAcme"
        );
        assert_eq!(panel.mount(), 0);
    }

    #[test]
    fn test_mount_without_missing_statics_does_not_navigate() {
        let panel = panel(
            "/invoices?f_currency=eur&f_customerExternalId=cus_1|-|Acme",
            invoices(),
        );
        assert_eq!(panel.mount(), 0);
        assert_eq!(panel.address().navigator().depth(), 1);
    }

    #[test]
    fn test_reads_ignore_foreign_keys() {
        let panel = panel(
            "/invoices?f_status=draft&status=voided&f_utm=x&f_amount=isBetween,5,10&f_country=fr",
            invoices(),
        );

        assert_eq!(
            panel.filters().to_query_string(),
            "status=draft&amount=isBetween,5,10"
        );
        assert_eq!(
            panel.active_filters()[1],
            (
                FilterKey::Amount,
                FilterValue::Interval(crate::filters::value::IntervalValue::new(
                    IntervalOperator::IsBetween,
                    Some(5.0),
                    Some(10.0)
                ))
            )
        );
    }

    #[test]
    fn test_query_includes_static_only_filters() {
        let panel = panel("/invoices", invoices());
        panel.mount();

        let query = panel.query(None);
        assert_eq!(
            query.get("customerExternalId"),
            Some(&crate::filters::value::QueryValue::Text("cus_1".to_string()))
        );
        assert!(query.contains_key("currency"));
    }

    #[test]
    fn test_reset_is_idempotent() {
        let panel = panel(
            "/invoices?f_status=draft&f_currency=usd&other=1&f_customerExternalId=cus_2|-|Other",
            invoices(),
        );

        panel.reset_filters();
        let once = panel.address().snapshot();
        panel.reset_filters();
        let twice = panel.address().snapshot();

        assert!(once.same_entries(&twice));
        assert_eq!(once.get("f_status"), None);
        assert_eq!(once.get("f_currency"), Some("eur"));
        assert_eq!(once.get("f_customerExternalId"), Some("cus_2|-|Other"));
        assert_eq!(once.get("other"), Some("1"));
    }

    #[test]
    fn test_apply_filters_replaces_accepted_keys() {
        let panel = panel("/invoices?f_status=draft&f_sort=asc&g_status=voided", invoices());

        let form = FiltersFormValues::from_rows([
            FilterRow::new(FilterKey::PaymentStatus, "failed"),
            FilterRow::new(FilterKey::Country, "fr"),
            FilterRow::placeholder(),
        ]);
        panel.apply_filters(&form);

        assert_eq!(
            location(&panel),
            "g_status=voided&f_sort=asc&f_paymentStatus=failed"
        );
    }

    #[test]
    fn test_submit_leaves_address_untouched_on_failure() {
        let panel = panel("/invoices?f_status=draft", invoices());
        let form = FiltersFormValues::from_rows([FilterRow {
            filter_type: Some(FilterKey::Amount),
            ..FilterRow::default()
        }]);

        let err = panel.submit(&form).unwrap_err();
        assert!(matches!(
            err,
            FormError::Validation(ref failures) if failures[0].error == RowError::MissingValue
        ));
        assert_eq!(location(&panel), "f_status=draft");
        assert_eq!(panel.address().navigator().depth(), 1);
    }

    #[test]
    fn test_form_round_trip() {
        let panel = panel("/invoices?f_status=draft&f_amount=isUpTo,,50", invoices());
        let form = panel.initial_form_values(FormSource::Url);
        panel.submit(&form).unwrap();
        assert_eq!(location(&panel), "f_status=draft&f_amount=isUpTo,,50");
    }

    #[test]
    fn test_remove_filter() {
        let panel = panel(
            "/invoices?f_status=draft&f_currency=eur&f_customerExternalId=cus_1|-|Acme",
            invoices(),
        );

        assert!(panel.remove_filter(FilterKey::Status));
        assert!(panel.remove_filter(FilterKey::Currency));
        assert!(!panel.remove_filter(FilterKey::CustomerExternalId));
        assert!(!panel.remove_filter(FilterKey::Amount));
        assert_eq!(location(&panel), "f_customerExternalId=cus_1%7C-%7CAcme");
    }

    #[test]
    fn test_chips() {
        let panel = panel(
            "/invoices?f_paymentStatus=failed,pending&f_customerExternalId=cus_1|-|Acme",
            invoices(),
        );

        let chips = panel.active_filter_chips(None);
        assert_eq!(chips.len(), 2);
        assert_eq!(chips[0].label, "Payment status");
        assert_eq!(chips[0].display, "Failed, Pending");
        assert!(chips[0].removable);
        assert_eq!(chips[1].display, "Acme");
        assert!(!chips[1].removable);
    }

    #[test]
    fn test_quick_filter_toggle() {
        let panel = panel("/invoices?f_status=voided&tab=all", invoices());
        let outstanding = InvoiceQuickFilter::Outstanding.preset();

        assert!(panel.toggle_quick_filter(&outstanding));
        assert!(panel.is_quick_filter_active(&outstanding));
        assert_eq!(panel.active_quick_filter(), Some(InvoiceQuickFilter::Outstanding));
        assert_eq!(
            location(&panel),
            format!("tab=all&{}", panel.build_quick_filter_url_params(&outstanding))
        );

        assert!(!panel.toggle_quick_filter(&outstanding));
        assert_eq!(panel.active_quick_filter(), None);
        assert_eq!(panel.filters().get("currency"), Some("eur"));
    }

    #[test]
    fn test_panels_share_one_navigator() {
        let navigator = MemoryNavigator::new("/dashboard");
        let left = FilterPanel::new(
            FilterContext::new([FilterKey::Status]).with_prefix("l"),
            &navigator,
        );
        let right = FilterPanel::new(
            FilterContext::new([FilterKey::Status]).with_prefix("r"),
            &navigator,
        );

        left.apply_filters(&FiltersFormValues::from_rows([FilterRow::new(
            FilterKey::Status,
            "draft",
        )]));
        right.apply_filters(&FiltersFormValues::from_rows([FilterRow::new(
            FilterKey::Status,
            "voided",
        )]));
        left.reset_filters();

        assert_eq!(navigator.location(), "/dashboard?r_status=voided");
    }
}
