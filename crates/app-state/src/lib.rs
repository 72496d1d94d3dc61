//! Page-address state for the billing console
//!
//! This crate owns the query component of the page address: parsing and
//! serializing it, scoping it by namespace prefix so several filter panels
//! can share one page, and committing changes through navigation.

#![warn(missing_docs)]
#![warn(clippy::all)]

pub mod address;
pub mod namespace;
pub mod navigator;
pub mod search_params;

pub use address::AddressState;
pub use namespace::{Namespace, PREFIX_SEPARATOR};
pub use navigator::{HistoryEntry, MemoryNavigator, Navigator};
pub use search_params::{encode_component, SearchParams};
