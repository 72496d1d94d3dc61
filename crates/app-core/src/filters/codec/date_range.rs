//! Date range codec
//!
//! Stored as `<fromISO>,<toISO>`. Boundaries pass through to queries as text.

use super::{kind_mismatch, non_empty, reject_separator, FilterCodec, RangeFields};
use crate::filters::error::{CodecError, Result, RowError};
use crate::filters::keys::FilterKey;
use crate::filters::value::{DateRangeValue, FilterKind, FilterValue, QueryValue};
use i18n::{parse_iso_date, Translate};
use regex::Regex;
use std::sync::OnceLock;

/// Split stored text into its two boundaries
pub(crate) fn split_date_range(raw: &str) -> DateRangeValue {
    let (from, to) = match raw.split_once(',') {
        Some((from, to)) => (from, Some(to)),
        None => (raw, None),
    };

    DateRangeValue {
        from: non_empty(Some(from)),
        to: non_empty(to),
    }
}

fn encode_bound(bound: Option<&String>) -> Result<&str> {
    match bound {
        Some(b) if b.is_empty() => Err(CodecError::EmptyElement(FilterKind::DateRange)),
        Some(b) => {
            reject_separator(b, ",")?;
            Ok(b.as_str())
        }
        None => Ok(""),
    }
}

fn date_range_grammar() -> &'static Regex {
    static DATE_RANGE_REGEX: OnceLock<Regex> = OnceLock::new();
    DATE_RANGE_REGEX.get_or_init(|| Regex::new(r"^[^,]+,[^,]+$").unwrap())
}

/// Codec for date range filters
#[derive(Debug, Clone)]
pub struct DateRangeCodec {
    fields: RangeFields,
}

impl DateRangeCodec {
    /// Create a codec writing boundaries to `fields`
    pub fn new(fields: RangeFields) -> Self {
        Self { fields }
    }
}

impl FilterCodec for DateRangeCodec {
    fn kind(&self) -> FilterKind {
        FilterKind::DateRange
    }

    fn encode(&self, value: &FilterValue) -> Result<String> {
        let FilterValue::DateRange(range) = value else {
            return Err(kind_mismatch(self.kind(), value));
        };

        Ok(format!(
            "{},{}",
            encode_bound(range.from.as_ref())?,
            encode_bound(range.to.as_ref())?
        ))
    }

    fn decode(&self, raw: &str) -> FilterValue {
        FilterValue::DateRange(split_date_range(raw))
    }

    fn query_fields(&self, key: FilterKey, raw: &str) -> Vec<(String, QueryValue)> {
        let range = split_date_range(raw);
        let (from_field, to_field) = self.fields.names(key);
        vec![
            (from_field, QueryValue::from(range.from)),
            (to_field, QueryValue::from(range.to)),
        ]
    }

    fn display(&self, raw: &str, translator: Option<&dyn Translate>) -> String {
        let style = translator
            .map(|t| t.language())
            .unwrap_or_default()
            .date_style();
        let render = |bound: &str| {
            parse_iso_date(bound)
                .map(|date| style.format(date))
                .unwrap_or_else(|| bound.to_string())
        };

        let range = split_date_range(raw);
        [range.from, range.to]
            .iter()
            .flatten()
            .map(|bound| render(bound))
            .collect::<Vec<_>>()
            .join(" - ")
    }

    fn validate(&self, raw: &str) -> std::result::Result<(), RowError> {
        if raw.trim().is_empty() {
            Err(RowError::MissingValue)
        } else if date_range_grammar().is_match(raw) {
            Ok(())
        } else {
            Err(RowError::InvalidDateRange)
        }
    }
}
