//! Billing console filter engine
//!
//! Facade over the workspace crates: page-address state, the filter engine
//! and translations.

#![warn(missing_docs)]

pub use app_core;
pub use app_state;
pub use i18n;

pub use app_core::filters::{
    format_active_filter_value_display, format_filters_for_query, FilterContext, FilterKey,
    FilterPanel, FiltersFormValues,
};
pub use app_state::{AddressState, MemoryNavigator, Namespace, Navigator, SearchParams};
pub use i18n::{Language, Translate, Translator};
