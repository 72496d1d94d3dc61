//! Active-filter chip labels
//!
//! Chips show what a committed filter means in words. Rendering goes through
//! the codec registry but is independent from query decoding.

use super::codec::CodecRegistry;
use super::keys::FilterKey;
use i18n::Translate;

/// Label for the value of an active filter
pub fn format_active_filter_value_display(
    key: FilterKey,
    value: &str,
    translator: Option<&dyn Translate>,
) -> String {
    CodecRegistry::standard().display(key, value, translator)
}

/// Label for a filter key, e.g. `Payment status`
pub fn filter_key_label(key: FilterKey, translator: Option<&dyn Translate>) -> String {
    translator
        .and_then(|t| t.lookup(&format!("filters-key-{}", key)))
        .unwrap_or_else(|| humanize_key(key.as_str()))
}

/// Default rendering of choice values
///
/// Each comma-separated segment gets an upper-case first letter and spaces
/// instead of underscores.
pub fn humanize_value(raw: &str) -> String {
    raw.split(',')
        .filter(|segment| !segment.is_empty())
        .map(|segment| capitalize(segment).replace('_', " "))
        .collect::<Vec<_>>()
        .join(", ")
}

fn capitalize(text: &str) -> String {
    let mut chars = text.chars();
    match chars.next() {
        Some(first) => first.to_uppercase().chain(chars).collect(),
        None => String::new(),
    }
}

fn humanize_key(name: &str) -> String {
    let mut words = String::with_capacity(name.len() + 4);
    for c in name.chars() {
        if c.is_uppercase() {
            words.push(' ');
            words.extend(c.to_lowercase());
        } else {
            words.push(c);
        }
    }
    capitalize(&words)
}

#[cfg(test)]
mod tests {
    use super::*;
    use i18n::Language;

    struct Labels;

    impl Translate for Labels {
        fn lookup(&self, key: &str) -> Option<String> {
            match key {
                "filters-key-status" => Some("Statut".to_string()),
                "filters-interval-is-between" => Some("entre".to_string()),
                "filters-and" => Some("et".to_string()),
                _ => None,
            }
        }

        fn language(&self) -> Language {
            Language::Fr
        }
    }

    #[test]
    fn test_default_display() {
        assert_eq!(
            format_active_filter_value_display(
                FilterKey::InvoiceType,
                "advance_charges,credit,one_off,subscription",
                None
            ),
            "Advance charges, Credit, One off, Subscription"
        );
        assert_eq!(
            format_active_filter_value_display(FilterKey::PaymentOverdue, "true", None),
            "True"
        );
    }

    #[test]
    fn test_interval_display_with_translator() {
        assert_eq!(
            format_active_filter_value_display(FilterKey::Amount, "isBetween,5,10", Some(&Labels)),
            "entre 5 et 10"
        );
    }

    #[test]
    fn test_composite_display() {
        assert_eq!(
            format_active_filter_value_display(
                FilterKey::CustomerExternalId,
                "cus_42|-|Globex",
                None
            ),
            "Globex"
        );
    }

    #[test]
    fn test_date_display() {
        assert_eq!(
            format_active_filter_value_display(
                FilterKey::IssuingDate,
                "2024-01-05,2024-01-06",
                Some(&Labels)
            ),
            "05/01/2024 - 06/01/2024"
        );
    }

    #[test]
    fn test_key_labels() {
        assert_eq!(filter_key_label(FilterKey::PaymentStatus, None), "Payment status");
        assert_eq!(filter_key_label(FilterKey::ApiKeyIds, None), "Api key ids");
        assert_eq!(filter_key_label(FilterKey::Status, Some(&Labels)), "Statut");
    }

    #[test]
    fn test_humanize_value_unicode() {
        assert_eq!(humanize_value("école_primaire"), "École primaire");
        assert_eq!(humanize_value(""), "");
    }
}
