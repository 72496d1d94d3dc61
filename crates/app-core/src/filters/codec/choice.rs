//! Choice, boolean and free-text codecs

use super::{kind_mismatch, reject_separator, FilterCodec, MULTI_VALUE_SEPARATOR};
use crate::filters::error::{CodecError, Result};
use crate::filters::keys::FilterKey;
use crate::filters::value::{FilterKind, FilterValue, QueryValue};

fn text_field(key: FilterKey, raw: &str) -> Vec<(String, QueryValue)> {
    let value = if raw.is_empty() {
        QueryValue::Null
    } else {
        QueryValue::Text(raw.to_string())
    };
    vec![(key.as_str().to_string(), value)]
}

/// One option, stored as-is
#[derive(Debug, Clone, Copy, Default)]
pub struct SingleChoiceCodec;

impl FilterCodec for SingleChoiceCodec {
    fn kind(&self) -> FilterKind {
        FilterKind::SingleChoice
    }

    fn encode(&self, value: &FilterValue) -> Result<String> {
        match value {
            FilterValue::Choice(choice) => Ok(choice.clone()),
            other => Err(kind_mismatch(self.kind(), other)),
        }
    }

    fn decode(&self, raw: &str) -> FilterValue {
        FilterValue::Choice(raw.to_string())
    }

    fn query_fields(&self, key: FilterKey, raw: &str) -> Vec<(String, QueryValue)> {
        text_field(key, raw)
    }
}

/// Several options joined with `,`
#[derive(Debug, Clone, Copy, Default)]
pub struct MultiChoiceCodec;

impl MultiChoiceCodec {
    fn split(raw: &str) -> Vec<String> {
        raw.split(MULTI_VALUE_SEPARATOR)
            .filter(|segment| !segment.is_empty())
            .map(str::to_string)
            .collect()
    }
}

impl FilterCodec for MultiChoiceCodec {
    fn kind(&self) -> FilterKind {
        FilterKind::MultiChoice
    }

    fn encode(&self, value: &FilterValue) -> Result<String> {
        let FilterValue::Choices(choices) = value else {
            return Err(kind_mismatch(self.kind(), value));
        };

        for choice in choices {
            if choice.is_empty() {
                return Err(CodecError::EmptyElement(self.kind()));
            }
            reject_separator(choice, ",")?;
        }

        Ok(choices.join(","))
    }

    fn decode(&self, raw: &str) -> FilterValue {
        FilterValue::Choices(Self::split(raw))
    }

    fn query_fields(&self, key: FilterKey, raw: &str) -> Vec<(String, QueryValue)> {
        vec![(key.as_str().to_string(), QueryValue::List(Self::split(raw)))]
    }
}

/// `true` / `false`; anything else decodes to `false`
#[derive(Debug, Clone, Copy, Default)]
pub struct BooleanCodec;

impl FilterCodec for BooleanCodec {
    fn kind(&self) -> FilterKind {
        FilterKind::Boolean
    }

    fn encode(&self, value: &FilterValue) -> Result<String> {
        match value {
            FilterValue::Bool(flag) => Ok(flag.to_string()),
            other => Err(kind_mismatch(self.kind(), other)),
        }
    }

    fn decode(&self, raw: &str) -> FilterValue {
        FilterValue::Bool(raw == "true")
    }

    fn query_fields(&self, key: FilterKey, raw: &str) -> Vec<(String, QueryValue)> {
        vec![(key.as_str().to_string(), QueryValue::Bool(raw == "true"))]
    }
}

/// Free text, stored as-is
#[derive(Debug, Clone, Copy, Default)]
pub struct TextCodec;

impl FilterCodec for TextCodec {
    fn kind(&self) -> FilterKind {
        FilterKind::Text
    }

    fn encode(&self, value: &FilterValue) -> Result<String> {
        match value {
            FilterValue::Text(text) => Ok(text.clone()),
            other => Err(kind_mismatch(self.kind(), other)),
        }
    }

    fn decode(&self, raw: &str) -> FilterValue {
        FilterValue::Text(raw.to_string())
    }

    fn query_fields(&self, key: FilterKey, raw: &str) -> Vec<(String, QueryValue)> {
        text_field(key, raw)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_multi_choice_drops_empty_segments() {
        assert_eq!(
            MultiChoiceCodec.decode("failed,,pending,"),
            FilterValue::Choices(vec!["failed".to_string(), "pending".to_string()])
        );
        assert_eq!(MultiChoiceCodec.decode(""), FilterValue::Choices(vec![]));
    }

    #[test]
    fn test_multi_choice_query_keeps_order() {
        assert_eq!(
            MultiChoiceCodec.query_fields(FilterKey::PaymentStatus, "pending,failed"),
            vec![(
                "paymentStatus".to_string(),
                QueryValue::List(vec!["pending".to_string(), "failed".to_string()])
            )]
        );
    }

    #[test]
    fn test_multi_choice_encode_rejects_separator_and_empty() {
        let with_comma = FilterValue::Choices(vec!["a,b".to_string()]);
        assert!(matches!(
            MultiChoiceCodec.encode(&with_comma),
            Err(CodecError::ReservedSeparator { .. })
        ));

        let with_empty = FilterValue::Choices(vec![String::new()]);
        assert_eq!(
            MultiChoiceCodec.encode(&with_empty),
            Err(CodecError::EmptyElement(FilterKind::MultiChoice))
        );
    }

    #[test]
    fn test_boolean_is_strict() {
        assert_eq!(BooleanCodec.decode("true"), FilterValue::Bool(true));
        assert_eq!(BooleanCodec.decode("TRUE"), FilterValue::Bool(false));
        assert_eq!(BooleanCodec.decode("1"), FilterValue::Bool(false));
        assert_eq!(
            BooleanCodec.query_fields(FilterKey::SelfBilled, "yes"),
            vec![("selfBilled".to_string(), QueryValue::Bool(false))]
        );
    }

    #[test]
    fn test_single_choice_empty_is_null() {
        assert_eq!(
            SingleChoiceCodec.query_fields(FilterKey::Currency, ""),
            vec![("currency".to_string(), QueryValue::Null)]
        );
    }

    #[test]
    fn test_text_display_uses_default_formatting() {
        assert_eq!(TextCodec.display("inv_001,inv_002", None), "Inv 001, Inv 002");
        assert_eq!(
            crate::filters::display::format_active_filter_value_display(
                FilterKey::InvoiceNumber,
                "inv_001,inv_002",
                None
            ),
            "Inv 001, Inv 002"
        );
    }
}
