//! Core filter logic for the billing console
//!
//! This crate contains the filter-state engine shared by every list and
//! analytics screen: value codecs, quick filter presets, the filter form
//! model, query formatting and active-filter labels.

#![warn(missing_docs)]
#![warn(clippy::all)]

pub mod filters;

pub use filters::{
    format_active_filter_value_display, format_filters_for_query, CodecError, CodecRegistry,
    FilterContext, FilterKey, FilterPanel, FilterValue, FiltersFormValues, FormError, QueryValue,
};
