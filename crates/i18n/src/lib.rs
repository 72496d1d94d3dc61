//! Internationalization for the billing console
//!
//! This crate provides translation loading, language negotiation,
//! and locale-aware date formatting.

#![warn(missing_docs)]
#![warn(clippy::all)]

pub mod lang;
pub mod translator;

pub use lang::{parse_iso_date, DateStyle, Language};
pub use translator::{Translate, Translator, TranslatorError};
