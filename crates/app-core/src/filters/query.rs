//! Query formatting
//!
//! Turns the committed address state of one panel into the flat input object
//! a list query receives: prefix stripped, values decoded, optional field
//! renames applied, unknown keys dropped.

use super::codec::CodecRegistry;
use super::keys::FilterKey;
use super::value::QueryValue;
use app_state::{Namespace, SearchParams};
use chrono::{DateTime, SecondsFormat, Utc};
use i18n::parse_iso_date;
use std::collections::{BTreeMap, HashMap, HashSet};

/// Decoded query input, keyed by output field
pub type FilterQuery = BTreeMap<String, QueryValue>;

/// Output field renames
pub type KeyMap = HashMap<String, String>;

/// Decode the filters of `namespace` using the standard codecs
pub fn format_filters_for_query(
    params: &SearchParams,
    available_filters: &[FilterKey],
    namespace: &Namespace,
    key_map: Option<&KeyMap>,
) -> FilterQuery {
    format_filters_for_query_with(
        CodecRegistry::standard(),
        params,
        available_filters,
        namespace,
        key_map,
    )
}

/// Decode the filters of `namespace` using `registry`
///
/// When a key appears more than once, the first value wins.
pub fn format_filters_for_query_with(
    registry: &CodecRegistry,
    params: &SearchParams,
    available_filters: &[FilterKey],
    namespace: &Namespace,
    key_map: Option<&KeyMap>,
) -> FilterQuery {
    let mut query = FilterQuery::new();
    let mut seen = HashSet::new();

    for (raw_key, raw_value) in params.iter() {
        let Some(name) = namespace.strip(raw_key) else {
            continue;
        };
        let Some(key) = FilterKey::parse(name).filter(|k| available_filters.contains(k)) else {
            tracing::trace!(key = raw_key, "Dropping undeclared filter key");
            continue;
        };
        if !seen.insert(key) {
            continue;
        }

        for (field, value) in registry.query_fields(key, raw_value) {
            let field = key_map
                .and_then(|map| map.get(&field).cloned())
                .unwrap_or(field);
            query.insert(field, value);
        }
    }

    query
}

fn key_map(pairs: &[(&str, &str)]) -> KeyMap {
    pairs
        .iter()
        .map(|(from, to)| (from.to_string(), to.to_string()))
        .collect()
}

// =============================================================================
// Screen queries
// =============================================================================

/// Filters offered on the invoice list
pub const INVOICE_FILTERS: &[FilterKey] = &[
    FilterKey::Status,
    FilterKey::InvoiceType,
    FilterKey::PaymentStatus,
    FilterKey::PaymentOverdue,
    FilterKey::PaymentDisputeLost,
    FilterKey::PartiallyPaid,
    FilterKey::SelfBilled,
    FilterKey::Currency,
    FilterKey::CustomerExternalId,
    FilterKey::BillingEntityIds,
    FilterKey::InvoiceNumber,
    FilterKey::IssuingDate,
    FilterKey::Amount,
    FilterKey::Metadata,
];

/// Filters offered on the credit note list
pub const CREDIT_NOTE_FILTERS: &[FilterKey] = &[
    FilterKey::CreditNoteCreditStatus,
    FilterKey::CreditNoteRefundStatus,
    FilterKey::CreditNoteReason,
    FilterKey::Currency,
    FilterKey::CustomerExternalId,
    FilterKey::BillingEntityIds,
    FilterKey::InvoiceNumber,
    FilterKey::IssuingDate,
    FilterKey::Amount,
    FilterKey::SelfBilled,
];

/// Filters offered on the revenue streams breakdown
pub const REVENUE_STREAMS_FILTERS: &[FilterKey] = &[
    FilterKey::Currency,
    FilterKey::CustomerExternalId,
    FilterKey::CustomerType,
    FilterKey::Country,
    FilterKey::PlanCode,
    FilterKey::SubscriptionExternalId,
    FilterKey::TimeGranularity,
    FilterKey::Date,
];

/// Filters offered on the MRR breakdown
pub const MRR_FILTERS: &[FilterKey] = &[
    FilterKey::Currency,
    FilterKey::CustomerExternalId,
    FilterKey::CustomerType,
    FilterKey::Country,
    FilterKey::PlanCode,
    FilterKey::TimeGranularity,
    FilterKey::Date,
];

/// Query input for the invoice list
pub fn format_filters_for_invoice_query(params: &SearchParams, namespace: &Namespace) -> FilterQuery {
    format_filters_for_query(params, INVOICE_FILTERS, namespace, None)
}

/// Query input for the credit note list
pub fn format_filters_for_credit_notes_query(
    params: &SearchParams,
    namespace: &Namespace,
) -> FilterQuery {
    let renames = key_map(&[
        ("creditNoteCreditStatus", "creditStatus"),
        ("creditNoteRefundStatus", "refundStatus"),
        ("creditNoteReason", "reason"),
        ("customerExternalId", "externalCustomerId"),
    ]);
    format_filters_for_query(params, CREDIT_NOTE_FILTERS, namespace, Some(&renames))
}

/// Query input for the revenue streams breakdown
pub fn format_filters_for_revenue_streams_query(
    params: &SearchParams,
    namespace: &Namespace,
) -> FilterQuery {
    let renames = key_map(&[
        ("customerExternalId", "externalCustomerId"),
        ("subscriptionExternalId", "externalSubscriptionId"),
    ]);
    format_filters_for_query(params, REVENUE_STREAMS_FILTERS, namespace, Some(&renames))
}

/// Query input for the MRR breakdown
pub fn format_filters_for_mrr_query(params: &SearchParams, namespace: &Namespace) -> FilterQuery {
    let renames = key_map(&[("customerExternalId", "externalCustomerId")]);
    format_filters_for_query(params, MRR_FILTERS, namespace, Some(&renames))
}

// =============================================================================
// Activity log dates
// =============================================================================

/// Clamp the end of the `loggedDate` range to now
///
/// Uses the current time; see [`define_default_to_date_value_at`].
pub fn define_default_to_date_value(params: &SearchParams, namespace: &Namespace) -> SearchParams {
    define_default_to_date_value_at(params, namespace, Utc::now())
}

/// Clamp the end of the `loggedDate` range to `now`
///
/// A missing end, or one whose end of day lies after `now`, becomes `now`.
/// Otherwise the end moves to 23:59:59.999 UTC of its day. The input is never
/// modified; params without a `loggedDate` range are returned unchanged.
pub fn define_default_to_date_value_at(
    params: &SearchParams,
    namespace: &Namespace,
    now: DateTime<Utc>,
) -> SearchParams {
    let key = namespace.qualify(FilterKey::LoggedDate.as_str());
    let mut next = params.clone();

    let Some(raw) = params.get(&key) else {
        return next;
    };
    let (from, to) = raw.split_once(',').unwrap_or((raw, ""));

    let end = parse_iso_date(to)
        .and_then(|date| date.and_hms_milli_opt(23, 59, 59, 999))
        .map(|end_of_day| end_of_day.and_utc())
        .filter(|end_of_day| *end_of_day <= now)
        .unwrap_or(now);

    next.set(
        key,
        format!("{},{}", from, end.to_rfc3339_opts(SecondsFormat::Millis, true)),
    );
    next
}
