//! Numeric interval codec
//!
//! Stored as `<operator>,<from>,<to>` under one key and fanned out into a
//! lower and an upper bound field.

use super::{kind_mismatch, FilterCodec, RangeFields};
use crate::filters::error::{CodecError, Result};
use crate::filters::keys::FilterKey;
use crate::filters::value::{
    AmountRange, FilterKind, FilterValue, IntervalOperator, IntervalValue, QueryValue,
};
use i18n::Translate;

fn parse_number(raw: &str) -> Option<f64> {
    if raw.is_empty() {
        return None;
    }
    match raw.trim().parse::<f64>() {
        Ok(number) if number.is_finite() => Some(number),
        _ => {
            tracing::debug!(raw, "Ignoring malformed interval bound");
            None
        }
    }
}

fn format_number(number: Option<f64>) -> Result<String> {
    match number {
        Some(n) if !n.is_finite() => Err(CodecError::NonFiniteNumber(n)),
        Some(n) => Ok(n.to_string()),
        None => Ok(String::new()),
    }
}

/// Parse the stored segments without applying the operator
pub(crate) fn parse_interval(raw: &str) -> IntervalValue {
    let mut segments = raw.splitn(3, ',');
    let operator = segments.next().and_then(IntervalOperator::parse);
    let from = segments.next().and_then(parse_number);
    let to = segments.next().and_then(parse_number);

    if operator.is_none() && !raw.is_empty() {
        tracing::debug!(raw, "Interval filter without a known operator");
    }

    IntervalValue { operator, from, to }
}

/// Query bounds of a stored interval
///
/// `isEqualTo` pins both bounds to `from`, `isUpTo` keeps only `to`,
/// `isAtLeast` keeps only `from`. A missing or unknown operator yields no
/// bounds.
pub fn parse_from_to_value(raw: &str) -> AmountRange {
    parse_interval(raw).range()
}

/// Codec for interval filters
#[derive(Debug, Clone)]
pub struct IntervalCodec {
    fields: RangeFields,
}

impl IntervalCodec {
    /// Create a codec writing bounds to `fields`
    pub fn new(fields: RangeFields) -> Self {
        Self { fields }
    }
}

impl FilterCodec for IntervalCodec {
    fn kind(&self) -> FilterKind {
        FilterKind::Interval
    }

    fn encode(&self, value: &FilterValue) -> Result<String> {
        let FilterValue::Interval(interval) = value else {
            return Err(kind_mismatch(self.kind(), value));
        };

        Ok(format!(
            "{},{},{}",
            interval.operator.map(|op| op.as_str()).unwrap_or_default(),
            format_number(interval.from)?,
            format_number(interval.to)?
        ))
    }

    fn decode(&self, raw: &str) -> FilterValue {
        FilterValue::Interval(parse_interval(raw))
    }

    fn query_fields(&self, key: FilterKey, raw: &str) -> Vec<(String, QueryValue)> {
        let range = parse_from_to_value(raw);
        let (from_field, to_field) = self.fields.names(key);
        vec![
            (from_field, QueryValue::from(range.from)),
            (to_field, QueryValue::from(range.to)),
        ]
    }

    fn display(&self, raw: &str, translator: Option<&dyn Translate>) -> String {
        let mut segments = raw.splitn(3, ',');
        let Some(operator) = segments.next().and_then(IntervalOperator::parse) else {
            return raw.to_string();
        };
        let from = segments.next().unwrap_or_default();
        let to = segments.next().unwrap_or_default();

        let label = translator
            .and_then(|t| t.lookup(operator.label_key()))
            .unwrap_or_else(|| operator.default_label().to_string());

        match operator {
            IntervalOperator::IsBetween => {
                let and = translator
                    .and_then(|t| t.lookup("filters-and"))
                    .unwrap_or_else(|| "and".to_string());
                format!("{} {} {} {}", label, from, and, to)
            }
            IntervalOperator::IsUpTo => format!("{} {}", label, to),
            IntervalOperator::IsEqualTo | IntervalOperator::IsAtLeast => {
                format!("{} {}", label, from)
            }
        }
    }
}
