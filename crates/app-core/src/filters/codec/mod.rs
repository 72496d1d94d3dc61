//! Value codecs
//!
//! Each filter kind has a codec that turns a typed [`FilterValue`] into the
//! text stored in the page address and back, fans that text out into query
//! fields, renders it for an active-filter chip and checks it at submit time.
//!
//! Codecs are attached to keys through a [`CodecRegistry`]. Adding a filter
//! means registering one more entry; nothing else dispatches on the key.
//!
//! # Separators
//!
//! Encodings use fixed separators with no escaping:
//!
//! | Kind | Separator |
//! |---|---|
//! | multi-choice, date range, interval | `,` |
//! | metadata pairs | `&` between pairs, `=` between key and value |
//! | composite | `|-|` between id and label |
//!
//! Encoding rejects values that contain a separator reserved at their
//! position. Decoding splits on the first occurrence and never fails.

mod choice;
mod composite;
mod date_range;
mod interval;
mod metadata;

pub use choice::{BooleanCodec, MultiChoiceCodec, SingleChoiceCodec, TextCodec};
pub use composite::{split_composite, CompositeCodec, COMPOSITE_SEPARATOR};
pub use date_range::DateRangeCodec;
pub use interval::{parse_from_to_value, IntervalCodec};
pub use metadata::{
    encode_metadata_filter, parse_metadata_filter, MetadataCodec, MAX_METADATA_PAIRS,
    METADATA_KEY_VALUE_SEPARATOR, METADATA_PAIR_SEPARATOR,
};

use super::display::humanize_value;
use super::error::{CodecError, Result, RowError};
use super::keys::FilterKey;
use super::value::{FilterKind, FilterValue, QueryValue};
use i18n::Translate;
use std::collections::HashMap;
use std::fmt;
use std::sync::{Arc, OnceLock};

/// Separator between the elements of a multi-value filter
pub const MULTI_VALUE_SEPARATOR: char = ',';

/// Encoding, decoding and rendering of one filter kind
pub trait FilterCodec: fmt::Debug + Send + Sync {
    /// Kind handled by this codec
    fn kind(&self) -> FilterKind;

    /// Encode a typed value for the page address
    fn encode(&self, value: &FilterValue) -> Result<String>;

    /// Decode address text; malformed text yields the kind's neutral value
    fn decode(&self, raw: &str) -> FilterValue;

    /// Output fields for a downstream query
    fn query_fields(&self, key: FilterKey, raw: &str) -> Vec<(String, QueryValue)>;

    /// Human-readable label for an active-filter chip
    fn display(&self, raw: &str, _translator: Option<&dyn Translate>) -> String {
        humanize_value(raw)
    }

    /// Structural check run when the edit form is submitted
    fn validate(&self, raw: &str) -> std::result::Result<(), RowError> {
        if raw.trim().is_empty() {
            Err(RowError::MissingValue)
        } else {
            Ok(())
        }
    }
}

/// Output field names of a filter that fans out into two bounds
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum RangeFields {
    /// `<key>From` and `<key>To`
    Suffixed,
    /// Fixed names
    Named {
        /// Field receiving the lower bound
        from: String,
        /// Field receiving the upper bound
        to: String,
    },
}

impl RangeFields {
    /// Fixed field names
    pub fn named(from: impl Into<String>, to: impl Into<String>) -> Self {
        RangeFields::Named {
            from: from.into(),
            to: to.into(),
        }
    }

    /// Field names for `key`
    pub fn names(&self, key: FilterKey) -> (String, String) {
        match self {
            RangeFields::Suffixed => (format!("{}From", key), format!("{}To", key)),
            RangeFields::Named { from, to } => (from.clone(), to.clone()),
        }
    }
}

pub(crate) fn kind_mismatch(expected: FilterKind, value: &FilterValue) -> CodecError {
    CodecError::KindMismatch {
        expected,
        found: value.kind(),
    }
}

pub(crate) fn reject_separator(value: &str, separator: &'static str) -> Result<()> {
    if value.contains(separator) {
        Err(CodecError::ReservedSeparator {
            value: value.to_string(),
            separator,
        })
    } else {
        Ok(())
    }
}

pub(crate) fn non_empty(value: Option<&str>) -> Option<String> {
    value.filter(|v| !v.is_empty()).map(str::to_string)
}

// =============================================================================
// Registry
// =============================================================================

static FALLBACK: TextCodec = TextCodec;

/// Codecs attached to filter keys
///
/// Keys without a registration fall back to [`TextCodec`].
#[derive(Debug, Clone, Default)]
pub struct CodecRegistry {
    codecs: HashMap<FilterKey, Arc<dyn FilterCodec>>,
}

impl CodecRegistry {
    /// Shared registry with every built-in filter registered
    pub fn standard() -> &'static CodecRegistry {
        static STANDARD: OnceLock<CodecRegistry> = OnceLock::new();
        STANDARD.get_or_init(|| CodecRegistry::builder().with_standard().build())
    }

    /// Start an empty registry
    pub fn builder() -> RegistryBuilder {
        RegistryBuilder::default()
    }

    /// Codec attached to `key`
    pub fn codec(&self, key: FilterKey) -> &dyn FilterCodec {
        match self.codecs.get(&key) {
            Some(codec) => codec.as_ref(),
            None => &FALLBACK,
        }
    }

    /// Check whether `key` has an explicit registration
    pub fn is_registered(&self, key: FilterKey) -> bool {
        self.codecs.contains_key(&key)
    }

    /// Kind of `key`
    pub fn kind(&self, key: FilterKey) -> FilterKind {
        self.codec(key).kind()
    }

    /// Encode a typed value for `key`
    pub fn encode(&self, key: FilterKey, value: &FilterValue) -> Result<String> {
        self.codec(key).encode(value)
    }

    /// Decode address text for `key`
    pub fn decode(&self, key: FilterKey, raw: &str) -> FilterValue {
        self.codec(key).decode(raw)
    }

    /// Output query fields for `key`
    pub fn query_fields(&self, key: FilterKey, raw: &str) -> Vec<(String, QueryValue)> {
        self.codec(key).query_fields(key, raw)
    }

    /// Chip label for `key`
    pub fn display(&self, key: FilterKey, raw: &str, translator: Option<&dyn Translate>) -> String {
        self.codec(key).display(raw, translator)
    }

    /// Submit-time check for `key`
    pub fn validate(&self, key: FilterKey, raw: &str) -> std::result::Result<(), RowError> {
        self.codec(key).validate(raw)
    }
}

/// Builder for [`CodecRegistry`]
#[derive(Debug, Default)]
pub struct RegistryBuilder {
    codecs: HashMap<FilterKey, Arc<dyn FilterCodec>>,
}

impl RegistryBuilder {
    /// Attach `codec` to `key`, replacing any earlier registration
    pub fn register(mut self, key: FilterKey, codec: impl FilterCodec + 'static) -> Self {
        self.codecs.insert(key, Arc::new(codec));
        self
    }

    /// Register every built-in filter
    pub fn with_standard(mut self) -> Self {
        use FilterKey::*;

        for key in [
            Currency,
            Country,
            CustomerType,
            CustomerAccountType,
            TimeGranularity,
            Period,
        ] {
            self = self.register(key, SingleChoiceCodec);
        }

        for key in [
            Status,
            InvoiceType,
            PaymentStatus,
            BillingEntityIds,
            CreditNoteCreditStatus,
            CreditNoteRefundStatus,
            CreditNoteReason,
            ActivityTypes,
            ActivitySources,
            ApiKeyIds,
            UserEmails,
            ResourceTypes,
            ResourceIds,
            WebhookStatus,
            WebhookEventTypes,
            WebhookHttpStatuses,
        ] {
            self = self.register(key, MultiChoiceCodec);
        }

        for key in [PaymentOverdue, PaymentDisputeLost, PartiallyPaid, SelfBilled] {
            self = self.register(key, BooleanCodec);
        }

        for key in [CustomerExternalId, PlanCode, SubscriptionExternalId] {
            self = self.register(key, CompositeCodec);
        }

        self.register(Amount, IntervalCodec::new(RangeFields::Suffixed))
            .register(IssuingDate, DateRangeCodec::new(RangeFields::Suffixed))
            .register(LoggedDate, DateRangeCodec::new(RangeFields::Suffixed))
            .register(Date, DateRangeCodec::new(RangeFields::named("fromDate", "toDate")))
            .register(
                WebhookDate,
                DateRangeCodec::new(RangeFields::named("fromDate", "toDate")),
            )
            .register(Metadata, MetadataCodec)
            .register(InvoiceNumber, TextCodec)
    }

    /// Finish the registry
    pub fn build(self) -> CodecRegistry {
        CodecRegistry {
            codecs: self.codecs,
        }
    }
}
