//! Filter keys
//!
//! A [`FilterKey`] names one filterable dimension of a list screen. Keys carry
//! no behavior; the codec registry attaches it.

use serde::{Deserialize, Serialize};
use std::fmt;
use std::str::FromStr;

/// Every filter known to the billing console
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, PartialOrd, Ord, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub enum FilterKey {
    // Invoices
    /// Invoice status
    Status,
    /// Invoice type (subscription, one-off, credit, ...)
    InvoiceType,
    /// Payment status
    PaymentStatus,
    /// Payment is overdue
    PaymentOverdue,
    /// Payment dispute was lost
    PaymentDisputeLost,
    /// Invoice is partially paid
    PartiallyPaid,
    /// Invoice is self billed
    SelfBilled,
    /// Invoice number
    InvoiceNumber,
    /// Invoice issuing date range
    IssuingDate,
    /// Total amount interval
    Amount,
    /// Invoice metadata pairs
    Metadata,

    // Customers
    /// Currency
    Currency,
    /// Billing country
    Country,
    /// Customer type (company, individual)
    CustomerType,
    /// Customer account type (customer, partner)
    CustomerAccountType,
    /// Customer, stored as id and display name
    CustomerExternalId,
    /// Billing entities
    BillingEntityIds,

    // Credit notes
    /// Credit status
    CreditNoteCreditStatus,
    /// Refund status
    CreditNoteRefundStatus,
    /// Credit note reason
    CreditNoteReason,

    // Analytics
    /// Plan, stored as code and display name
    PlanCode,
    /// Subscription, stored as id and display name
    SubscriptionExternalId,
    /// Time granularity of an analytics breakdown
    TimeGranularity,
    /// Analytics period
    Period,
    /// Generic date range
    Date,

    // Activity logs
    /// Activity log date range
    LoggedDate,
    /// Activity types
    ActivityTypes,
    /// Activity sources
    ActivitySources,
    /// API keys
    ApiKeyIds,
    /// Users, by email
    UserEmails,
    /// Resource types
    ResourceTypes,
    /// Resource ids
    ResourceIds,

    // Webhooks
    /// Webhook delivery status
    WebhookStatus,
    /// Webhook event types
    WebhookEventTypes,
    /// Webhook HTTP statuses
    WebhookHttpStatuses,
    /// Webhook delivery date range
    WebhookDate,
}

impl FilterKey {
    /// All keys in declaration order
    pub fn all() -> [FilterKey; 36] {
        use FilterKey::*;
        [
            Status,
            InvoiceType,
            PaymentStatus,
            PaymentOverdue,
            PaymentDisputeLost,
            PartiallyPaid,
            SelfBilled,
            InvoiceNumber,
            IssuingDate,
            Amount,
            Metadata,
            Currency,
            Country,
            CustomerType,
            CustomerAccountType,
            CustomerExternalId,
            BillingEntityIds,
            CreditNoteCreditStatus,
            CreditNoteRefundStatus,
            CreditNoteReason,
            PlanCode,
            SubscriptionExternalId,
            TimeGranularity,
            Period,
            Date,
            LoggedDate,
            ActivityTypes,
            ActivitySources,
            ApiKeyIds,
            UserEmails,
            ResourceTypes,
            ResourceIds,
            WebhookStatus,
            WebhookEventTypes,
            WebhookHttpStatuses,
            WebhookDate,
        ]
    }

    /// Name used in the page address
    pub fn as_str(&self) -> &'static str {
        match self {
            FilterKey::Status => "status",
            FilterKey::InvoiceType => "invoiceType",
            FilterKey::PaymentStatus => "paymentStatus",
            FilterKey::PaymentOverdue => "paymentOverdue",
            FilterKey::PaymentDisputeLost => "paymentDisputeLost",
            FilterKey::PartiallyPaid => "partiallyPaid",
            FilterKey::SelfBilled => "selfBilled",
            FilterKey::InvoiceNumber => "invoiceNumber",
            FilterKey::IssuingDate => "issuingDate",
            FilterKey::Amount => "amount",
            FilterKey::Metadata => "metadata",
            FilterKey::Currency => "currency",
            FilterKey::Country => "country",
            FilterKey::CustomerType => "customerType",
            FilterKey::CustomerAccountType => "customerAccountType",
            FilterKey::CustomerExternalId => "customerExternalId",
            FilterKey::BillingEntityIds => "billingEntityIds",
            FilterKey::CreditNoteCreditStatus => "creditNoteCreditStatus",
            FilterKey::CreditNoteRefundStatus => "creditNoteRefundStatus",
            FilterKey::CreditNoteReason => "creditNoteReason",
            FilterKey::PlanCode => "planCode",
            FilterKey::SubscriptionExternalId => "subscriptionExternalId",
            FilterKey::TimeGranularity => "timeGranularity",
            FilterKey::Period => "period",
            FilterKey::Date => "date",
            FilterKey::LoggedDate => "loggedDate",
            FilterKey::ActivityTypes => "activityTypes",
            FilterKey::ActivitySources => "activitySources",
            FilterKey::ApiKeyIds => "apiKeyIds",
            FilterKey::UserEmails => "userEmails",
            FilterKey::ResourceTypes => "resourceTypes",
            FilterKey::ResourceIds => "resourceIds",
            FilterKey::WebhookStatus => "webhookStatus",
            FilterKey::WebhookEventTypes => "webhookEventTypes",
            FilterKey::WebhookHttpStatuses => "webhookHttpStatuses",
            FilterKey::WebhookDate => "webhookDate",
        }
    }

    /// Look up a key by its address name
    pub fn parse(name: &str) -> Option<FilterKey> {
        FilterKey::all().into_iter().find(|key| key.as_str() == name)
    }
}

impl fmt::Display for FilterKey {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

/// Error returned when parsing an unknown filter key
#[derive(Debug, Clone, PartialEq, Eq, thiserror::Error)]
#[error("Unknown filter key: {0}")]
pub struct UnknownFilterKey(pub String);

impl FromStr for FilterKey {
    type Err = UnknownFilterKey;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        FilterKey::parse(s).ok_or_else(|| UnknownFilterKey(s.to_string()))
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_names_round_trip() {
        for key in FilterKey::all() {
            assert_eq!(FilterKey::parse(key.as_str()), Some(key));
        }
    }

    #[test]
    fn test_names_match_serde() {
        for key in FilterKey::all() {
            let json = serde_json::to_string(&key).unwrap();
            assert_eq!(json, format!("\"{}\"", key.as_str()));
        }
    }

    #[test]
    fn test_names_never_contain_prefix_separator() {
        for key in FilterKey::all() {
            assert!(!key.as_str().contains(app_state::PREFIX_SEPARATOR));
        }
    }

    #[test]
    fn test_unknown_key() {
        assert_eq!(FilterKey::parse("utm_source"), None);
        assert_eq!(
            "nope".parse::<FilterKey>(),
            Err(UnknownFilterKey("nope".to_string()))
        );
    }
}
