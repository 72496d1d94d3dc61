//! Typed filter values
//!
//! [`FilterValue`] is what a filter means; [`QueryValue`] is what a
//! downstream query receives for one output field.

use serde::{Deserialize, Serialize};
use std::fmt;

/// Shape of a filter's value
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub enum FilterKind {
    /// One option out of many
    SingleChoice,
    /// Several options, comma separated
    MultiChoice,
    /// `true` or `false`
    Boolean,
    /// Numeric interval with a comparison operator
    Interval,
    /// Pair of ISO-8601 boundaries
    DateRange,
    /// Identifier plus a display label
    Composite,
    /// Free-form key/value pairs
    Metadata,
    /// Free text
    Text,
}

/// Comparison operator of an interval filter
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub enum IntervalOperator {
    /// Exactly `from`
    IsEqualTo,
    /// Between `from` and `to`
    IsBetween,
    /// At most `to`
    IsUpTo,
    /// At least `from`
    IsAtLeast,
}

impl IntervalOperator {
    /// All operators
    pub fn all() -> [IntervalOperator; 4] {
        [
            IntervalOperator::IsEqualTo,
            IntervalOperator::IsBetween,
            IntervalOperator::IsUpTo,
            IntervalOperator::IsAtLeast,
        ]
    }

    /// Name used in the page address
    pub fn as_str(&self) -> &'static str {
        match self {
            IntervalOperator::IsEqualTo => "isEqualTo",
            IntervalOperator::IsBetween => "isBetween",
            IntervalOperator::IsUpTo => "isUpTo",
            IntervalOperator::IsAtLeast => "isAtLeast",
        }
    }

    /// Look up an operator by its address name
    pub fn parse(name: &str) -> Option<IntervalOperator> {
        IntervalOperator::all()
            .into_iter()
            .find(|op| op.as_str() == name)
    }

    /// Translation key of the operator label
    pub fn label_key(&self) -> &'static str {
        match self {
            IntervalOperator::IsEqualTo => "filters-interval-is-equal-to",
            IntervalOperator::IsBetween => "filters-interval-is-between",
            IntervalOperator::IsUpTo => "filters-interval-is-up-to",
            IntervalOperator::IsAtLeast => "filters-interval-is-at-least",
        }
    }

    /// English label used when no translation is available
    pub fn default_label(&self) -> &'static str {
        match self {
            IntervalOperator::IsEqualTo => "is equal to",
            IntervalOperator::IsBetween => "is between",
            IntervalOperator::IsUpTo => "is up to",
            IntervalOperator::IsAtLeast => "is at least",
        }
    }
}

impl fmt::Display for IntervalOperator {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

/// Interval as stored in the address: operator plus raw bounds
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
pub struct IntervalValue {
    /// Comparison operator, `None` when missing or unknown
    pub operator: Option<IntervalOperator>,
    /// Lower bound
    pub from: Option<f64>,
    /// Upper bound
    pub to: Option<f64>,
}

impl IntervalValue {
    /// Create an interval
    pub fn new(operator: IntervalOperator, from: Option<f64>, to: Option<f64>) -> Self {
        Self {
            operator: Some(operator),
            from,
            to,
        }
    }

    /// Effective bounds for a query, applying the operator
    pub fn range(&self) -> AmountRange {
        match self.operator {
            Some(IntervalOperator::IsEqualTo) => AmountRange {
                from: self.from,
                to: self.from,
            },
            Some(IntervalOperator::IsBetween) => AmountRange {
                from: self.from,
                to: self.to,
            },
            Some(IntervalOperator::IsUpTo) => AmountRange {
                from: None,
                to: self.to,
            },
            Some(IntervalOperator::IsAtLeast) => AmountRange {
                from: self.from,
                to: None,
            },
            None => AmountRange::default(),
        }
    }
}

/// Query-ready bounds of an interval filter
#[derive(Debug, Clone, Copy, Default, PartialEq, Serialize, Deserialize)]
pub struct AmountRange {
    /// Inclusive lower bound
    pub from: Option<f64>,
    /// Inclusive upper bound
    pub to: Option<f64>,
}

/// Date range boundaries, kept as ISO-8601 text
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct DateRangeValue {
    /// Start boundary
    pub from: Option<String>,
    /// End boundary
    pub to: Option<String>,
}

impl DateRangeValue {
    /// Create a range with both boundaries
    pub fn new(from: impl Into<String>, to: impl Into<String>) -> Self {
        Self {
            from: Some(from.into()),
            to: Some(to.into()),
        }
    }
}

/// Identifier with the label shown to the user
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct CompositeValue {
    /// Identifier sent to queries
    pub id: String,
    /// Display label
    pub label: Option<String>,
}

impl CompositeValue {
    /// Create a composite value with a label
    pub fn new(id: impl Into<String>, label: impl Into<String>) -> Self {
        Self {
            id: id.into(),
            label: Some(label.into()),
        }
    }
}

/// One metadata constraint
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct MetadataPair {
    /// Metadata key
    pub key: String,
    /// Expected value
    pub value: String,
}

impl MetadataPair {
    /// Create a pair
    pub fn new(key: impl Into<String>, value: impl Into<String>) -> Self {
        Self {
            key: key.into(),
            value: value.into(),
        }
    }
}

/// Typed value of one filter
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(tag = "kind", content = "value", rename_all = "camelCase")]
pub enum FilterValue {
    /// Single option
    Choice(String),
    /// Ordered options
    Choices(Vec<String>),
    /// Flag
    Bool(bool),
    /// Numeric interval
    Interval(IntervalValue),
    /// Date range
    DateRange(DateRangeValue),
    /// Identifier plus label
    Composite(CompositeValue),
    /// Metadata pairs
    Metadata(Vec<MetadataPair>),
    /// Free text
    Text(String),
}

impl FilterValue {
    /// Kind this value belongs to
    pub fn kind(&self) -> FilterKind {
        match self {
            FilterValue::Choice(_) => FilterKind::SingleChoice,
            FilterValue::Choices(_) => FilterKind::MultiChoice,
            FilterValue::Bool(_) => FilterKind::Boolean,
            FilterValue::Interval(_) => FilterKind::Interval,
            FilterValue::DateRange(_) => FilterKind::DateRange,
            FilterValue::Composite(_) => FilterKind::Composite,
            FilterValue::Metadata(_) => FilterKind::Metadata,
            FilterValue::Text(_) => FilterKind::Text,
        }
    }
}

/// Value of one output field handed to a query builder
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(untagged)]
pub enum QueryValue {
    /// Absent or malformed
    Null,
    /// Flag
    Bool(bool),
    /// Number
    Number(f64),
    /// Text
    Text(String),
    /// Ordered list of options
    List(Vec<String>),
    /// Metadata pairs
    Pairs(Vec<MetadataPair>),
}

impl From<Option<f64>> for QueryValue {
    fn from(value: Option<f64>) -> Self {
        value.map(QueryValue::Number).unwrap_or(QueryValue::Null)
    }
}

impl From<Option<String>> for QueryValue {
    fn from(value: Option<String>) -> Self {
        value.map(QueryValue::Text).unwrap_or(QueryValue::Null)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_operator_names() {
        for op in IntervalOperator::all() {
            assert_eq!(IntervalOperator::parse(op.as_str()), Some(op));
        }
        assert_eq!(IntervalOperator::parse("isLessThan"), None);
    }

    #[test]
    fn test_interval_range_per_operator() {
        let equal = IntervalValue::new(IntervalOperator::IsEqualTo, Some(7.0), None);
        assert_eq!(equal.range(), AmountRange { from: Some(7.0), to: Some(7.0) });

        let up_to = IntervalValue::new(IntervalOperator::IsUpTo, None, Some(15.0));
        assert_eq!(up_to.range(), AmountRange { from: None, to: Some(15.0) });

        let at_least = IntervalValue::new(IntervalOperator::IsAtLeast, Some(3.0), Some(9.0));
        assert_eq!(at_least.range(), AmountRange { from: Some(3.0), to: None });

        assert_eq!(IntervalValue::default().range(), AmountRange::default());
    }

    #[test]
    fn test_query_value_serializes_untagged() {
        let values = vec![
            QueryValue::Null,
            QueryValue::Bool(true),
            QueryValue::Number(5.0),
            QueryValue::List(vec!["a".to_string()]),
            QueryValue::Pairs(vec![MetadataPair::new("k", "v")]),
        ];
        let json = serde_json::to_string(&values).unwrap();
        assert_eq!(json, r#"[null,true,5.0,["a"],[{"key":"k","value":"v"}]]"#);
    }

    #[test]
    fn test_filter_value_kind() {
        assert_eq!(FilterValue::Bool(true).kind(), FilterKind::Boolean);
        assert_eq!(
            FilterValue::Metadata(vec![]).kind(),
            FilterKind::Metadata
        );
    }
}
