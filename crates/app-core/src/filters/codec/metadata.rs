//! Metadata codec
//!
//! Stored as `k1=v1&k2=v2`. The whole string lives inside one address value,
//! percent-encoded by the address layer.

use super::{kind_mismatch, reject_separator, FilterCodec};
use crate::filters::error::{CodecError, Result, RowError};
use crate::filters::keys::FilterKey;
use crate::filters::value::{FilterKind, FilterValue, MetadataPair, QueryValue};
use i18n::Translate;

/// Separator between pairs
pub const METADATA_PAIR_SEPARATOR: char = '&';

/// Separator between a key and its value
pub const METADATA_KEY_VALUE_SEPARATOR: char = '=';

/// Maximum number of pairs accepted by the edit form
pub const MAX_METADATA_PAIRS: usize = 5;

/// Parse stored metadata into ordered pairs
///
/// Empty input gives no pairs; a pair without `=` keeps the whole segment
/// as its key with an empty value.
pub fn parse_metadata_filter(raw: &str) -> Vec<MetadataPair> {
    raw.split(METADATA_PAIR_SEPARATOR)
        .filter(|segment| !segment.is_empty())
        .map(|segment| match segment.split_once(METADATA_KEY_VALUE_SEPARATOR) {
            Some((key, value)) => MetadataPair::new(key, value),
            None => MetadataPair::new(segment, ""),
        })
        .collect()
}

/// Encode pairs for storage
pub fn encode_metadata_filter(pairs: &[MetadataPair]) -> Result<String> {
    let mut encoded = Vec::with_capacity(pairs.len());

    for pair in pairs {
        if pair.key.is_empty() {
            return Err(CodecError::EmptyElement(FilterKind::Metadata));
        }
        reject_separator(&pair.key, "=")?;
        reject_separator(&pair.key, "&")?;
        reject_separator(&pair.value, "&")?;

        encoded.push(format!(
            "{}{}{}",
            pair.key, METADATA_KEY_VALUE_SEPARATOR, pair.value
        ));
    }

    Ok(encoded.join("&"))
}

/// Codec for metadata filters
#[derive(Debug, Clone, Copy, Default)]
pub struct MetadataCodec;

impl FilterCodec for MetadataCodec {
    fn kind(&self) -> FilterKind {
        FilterKind::Metadata
    }

    fn encode(&self, value: &FilterValue) -> Result<String> {
        match value {
            FilterValue::Metadata(pairs) => encode_metadata_filter(pairs),
            other => Err(kind_mismatch(self.kind(), other)),
        }
    }

    fn decode(&self, raw: &str) -> FilterValue {
        FilterValue::Metadata(parse_metadata_filter(raw))
    }

    fn query_fields(&self, key: FilterKey, raw: &str) -> Vec<(String, QueryValue)> {
        vec![(
            key.as_str().to_string(),
            QueryValue::Pairs(parse_metadata_filter(raw)),
        )]
    }

    fn display(&self, raw: &str, _translator: Option<&dyn Translate>) -> String {
        parse_metadata_filter(raw)
            .iter()
            .map(|pair| format!("{}: {}", pair.key, pair.value))
            .collect::<Vec<_>>()
            .join(", ")
    }

    fn validate(&self, raw: &str) -> std::result::Result<(), RowError> {
        let segments: Vec<&str> = raw
            .split(METADATA_PAIR_SEPARATOR)
            .filter(|segment| !segment.is_empty())
            .collect();

        if segments.is_empty() {
            return Err(RowError::MissingValue);
        }
        if segments.len() > MAX_METADATA_PAIRS {
            return Err(RowError::TooManyMetadataPairs {
                count: segments.len(),
                max: MAX_METADATA_PAIRS,
            });
        }

        for (index, segment) in segments.iter().enumerate() {
            match segment.split_once(METADATA_KEY_VALUE_SEPARATOR) {
                Some((key, value)) if !key.is_empty() && !value.is_empty() => {}
                _ => return Err(RowError::InvalidMetadataPair { index }),
            }
        }

        Ok(())
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_parse_metadata_filter() {
        assert_eq!(
            parse_metadata_filter("metadata=value&anotherMetadata=value"),
            vec![
                MetadataPair::new("metadata", "value"),
                MetadataPair::new("anotherMetadata", "value"),
            ]
        );
        assert!(parse_metadata_filter("").is_empty());
    }

    #[test]
    fn test_parse_pair_without_separator() {
        assert_eq!(
            parse_metadata_filter("orphan&k=v"),
            vec![MetadataPair::new("orphan", ""), MetadataPair::new("k", "v")]
        );
    }

    #[test]
    fn test_encode_rejects_reserved_characters() {
        let bad_key = [MetadataPair::new("a=b", "v")];
        assert!(encode_metadata_filter(&bad_key).is_err());

        let bad_value = [MetadataPair::new("k", "a&b")];
        assert!(encode_metadata_filter(&bad_value).is_err());

        let empty_key = [MetadataPair::new("", "v")];
        assert_eq!(
            encode_metadata_filter(&empty_key),
            Err(CodecError::EmptyElement(FilterKind::Metadata))
        );
    }

    #[test]
    fn test_validate() {
        assert_eq!(MetadataCodec.validate("a=1&b=2"), Ok(()));
        assert_eq!(
            MetadataCodec.validate("a=1&b"),
            Err(RowError::InvalidMetadataPair { index: 1 })
        );
        assert_eq!(
            MetadataCodec.validate("=1"),
            Err(RowError::InvalidMetadataPair { index: 0 })
        );
        assert_eq!(
            MetadataCodec.validate("a=1&b=2&c=3&d=4&e=5&f=6"),
            Err(RowError::TooManyMetadataPairs { count: 6, max: 5 })
        );
        assert_eq!(MetadataCodec.validate(""), Err(RowError::MissingValue));
    }

    #[test]
    fn test_display() {
        assert_eq!(
            MetadataCodec.display("plan=gold&region=eu", None),
            "plan: gold, region: eu"
        );
    }
}
