//! Filter-state engine
//!
//! List screens keep their filters in the page address. This module turns
//! those flat entries into typed values, query inputs and chip labels, and
//! back again from the edit form and quick filter presets.

pub mod codec;
pub mod context;
pub mod display;
pub mod error;
pub mod form;
pub mod keys;
pub mod panel;
pub mod query;
pub mod quick_filters;
pub mod value;

pub use codec::{
    encode_metadata_filter, parse_from_to_value, parse_metadata_filter, split_composite,
    CodecRegistry, FilterCodec, RangeFields, RegistryBuilder, COMPOSITE_SEPARATOR,
    MAX_METADATA_PAIRS, MULTI_VALUE_SEPARATOR,
};
pub use context::{FilterContext, StaticFilterMap};
pub use display::{filter_key_label, format_active_filter_value_display, humanize_value};
pub use error::{CodecError, FormError, RowError, RowValidationError};
pub use form::{initial_form_values, FilterRow, FiltersFormValues, FormSource};
pub use keys::{FilterKey, UnknownFilterKey};
pub use panel::{ActiveFilterChip, FilterPanel};
pub use query::{
    define_default_to_date_value, define_default_to_date_value_at,
    format_filters_for_credit_notes_query, format_filters_for_invoice_query,
    format_filters_for_mrr_query, format_filters_for_query, format_filters_for_query_with,
    format_filters_for_revenue_streams_query, FilterQuery, KeyMap,
};
pub use quick_filters::{
    build_quick_filter_url_params, is_draft_url_params, is_outstanding_url_params,
    is_payment_dispute_lost_url_params, is_payment_overdue_url_params, is_quick_filter_active,
    is_succeeded_url_params, is_voided_url_params, quick_filter_params, InvoiceQuickFilter,
    PresetValue, QuickFilterKind, QuickFilterPreset,
};
pub use value::{
    AmountRange, CompositeValue, DateRangeValue, FilterKind, FilterValue, IntervalOperator,
    IntervalValue, MetadataPair, QueryValue,
};
