//! Identifier plus label codec
//!
//! Pickers backed by remote lookups store both the identifier and the label
//! the user picked, so chips can show the label without another lookup.
//! Queries only ever see the identifier.

use super::{kind_mismatch, FilterCodec};
use crate::filters::error::{CodecError, Result};
use crate::filters::keys::FilterKey;
use crate::filters::value::{CompositeValue, FilterKind, FilterValue, QueryValue};
use i18n::Translate;

/// Inline separator between identifier and label
pub const COMPOSITE_SEPARATOR: &str = "|-|";

/// Split stored text into identifier and label
pub fn split_composite(raw: &str) -> CompositeValue {
    match raw.split_once(COMPOSITE_SEPARATOR) {
        Some((id, label)) => CompositeValue {
            id: id.to_string(),
            label: (!label.is_empty()).then(|| label.to_string()),
        },
        None => CompositeValue {
            id: raw.to_string(),
            label: None,
        },
    }
}

/// Codec for identifier plus label filters
#[derive(Debug, Clone, Copy, Default)]
pub struct CompositeCodec;

impl FilterCodec for CompositeCodec {
    fn kind(&self) -> FilterKind {
        FilterKind::Composite
    }

    fn encode(&self, value: &FilterValue) -> Result<String> {
        let FilterValue::Composite(composite) = value else {
            return Err(kind_mismatch(self.kind(), value));
        };

        if composite.id.is_empty() {
            return Err(CodecError::EmptyElement(self.kind()));
        }
        // Any `|` in the id could fuse with the separator that follows it
        super::reject_separator(&composite.id, "|")?;

        match &composite.label {
            Some(label) if label.is_empty() => Err(CodecError::EmptyElement(self.kind())),
            Some(label) => Ok(format!("{}{}{}", composite.id, COMPOSITE_SEPARATOR, label)),
            None => Ok(composite.id.clone()),
        }
    }

    fn decode(&self, raw: &str) -> FilterValue {
        FilterValue::Composite(split_composite(raw))
    }

    fn query_fields(&self, key: FilterKey, raw: &str) -> Vec<(String, QueryValue)> {
        let id = split_composite(raw).id;
        let value = if id.is_empty() {
            QueryValue::Null
        } else {
            QueryValue::Text(id)
        };
        vec![(key.as_str().to_string(), value)]
    }

    fn display(&self, raw: &str, _translator: Option<&dyn Translate>) -> String {
        let composite = split_composite(raw);
        composite.label.unwrap_or(composite.id)
    }
}
