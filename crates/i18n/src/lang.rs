//! Supported languages and per-language formatting
//!
//! Language selection negotiates the user's requested locales against the
//! bundled translations, falling back to US English.

use chrono::{DateTime, NaiveDate, NaiveDateTime};
use fluent_langneg::{negotiate_languages, NegotiationStrategy};
use serde::{Deserialize, Serialize};
use unic_langid::{langid, LanguageIdentifier};

/// Languages with bundled translations
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Default, Serialize, Deserialize)]
pub enum Language {
    /// US English
    #[default]
    #[serde(rename = "en-US")]
    EnUs,
    /// French
    #[serde(rename = "fr")]
    Fr,
}

impl Language {
    /// All bundled languages
    pub fn all() -> [Language; 2] {
        [Language::EnUs, Language::Fr]
    }

    /// BCP 47 identifier
    pub fn identifier(&self) -> LanguageIdentifier {
        match self {
            Language::EnUs => langid!("en-US"),
            Language::Fr => langid!("fr"),
        }
    }

    /// Map an identifier to a bundled language by its primary subtag
    pub fn from_identifier(id: &LanguageIdentifier) -> Option<Language> {
        match id.language.as_str() {
            "en" => Some(Language::EnUs),
            "fr" => Some(Language::Fr),
            _ => None,
        }
    }

    /// Pick the best bundled language for the requested locales
    ///
    /// Unparseable locale strings are ignored.
    pub fn negotiate(requested: &[&str]) -> Language {
        let requested: Vec<LanguageIdentifier> = requested
            .iter()
            .filter_map(|locale| locale.parse().ok())
            .collect();
        let available: Vec<LanguageIdentifier> =
            Language::all().iter().map(Language::identifier).collect();
        let default = Language::default().identifier();

        let supported = negotiate_languages(
            &requested,
            &available,
            Some(&default),
            NegotiationStrategy::Lookup,
        );
        supported
            .first()
            .and_then(|id| Language::from_identifier(id))
            .unwrap_or_default()
    }

    /// Date style used for this language
    pub fn date_style(&self) -> DateStyle {
        match self {
            Language::EnUs => DateStyle::MonthDayYear,
            Language::Fr => DateStyle::DayMonthYear,
        }
    }
}

/// How a calendar date is rendered
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum DateStyle {
    /// `Jan 5, 2024`
    MonthDayYear,
    /// `05/01/2024`
    DayMonthYear,
}

impl DateStyle {
    /// Format a date in this style
    pub fn format(&self, date: NaiveDate) -> String {
        match self {
            DateStyle::MonthDayYear => date.format("%b %-d, %Y").to_string(),
            DateStyle::DayMonthYear => date.format("%d/%m/%Y").to_string(),
        }
    }
}

/// Parse the calendar date of an ISO-8601 date or timestamp
///
/// Timestamps keep the date in their own offset.
pub fn parse_iso_date(raw: &str) -> Option<NaiveDate> {
    let raw = raw.trim();

    if let Ok(datetime) = DateTime::parse_from_rfc3339(raw) {
        return Some(datetime.date_naive());
    }
    if let Ok(datetime) = NaiveDateTime::parse_from_str(raw, "%Y-%m-%dT%H:%M:%S%.f") {
        return Some(datetime.date());
    }
    NaiveDate::parse_from_str(raw, "%Y-%m-%d").ok()
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_negotiate_exact_and_region_fallback() {
        assert_eq!(Language::negotiate(&["fr"]), Language::Fr);
        assert_eq!(Language::negotiate(&["fr-CA", "en-US"]), Language::Fr);
        assert_eq!(Language::negotiate(&["en-GB"]), Language::EnUs);
    }

    #[test]
    fn test_negotiate_falls_back_to_default() {
        assert_eq!(Language::negotiate(&["ja"]), Language::EnUs);
        assert_eq!(Language::negotiate(&[]), Language::EnUs);
        assert_eq!(Language::negotiate(&["not a locale!"]), Language::EnUs);
    }

    #[test]
    fn test_date_styles() {
        let date = NaiveDate::from_ymd_opt(2024, 1, 5).unwrap();
        assert_eq!(DateStyle::MonthDayYear.format(date), "Jan 5, 2024");
        assert_eq!(DateStyle::DayMonthYear.format(date), "05/01/2024");
    }

    #[test]
    fn test_parse_iso_date_variants() {
        let expected = NaiveDate::from_ymd_opt(2024, 3, 31);
        assert_eq!(parse_iso_date("2024-03-31"), expected);
        assert_eq!(parse_iso_date("2024-03-31T23:59:59.999Z"), expected);
        assert_eq!(parse_iso_date("2024-03-31T10:00:00+02:00"), expected);
        assert_eq!(parse_iso_date("2024-03-31T10:00:00"), expected);
        assert_eq!(parse_iso_date("yesterday"), None);
    }

    #[test]
    fn test_language_serialization() {
        assert_eq!(serde_json::to_string(&Language::EnUs).unwrap(), "\"en-US\"");
    }
}
