//! Message translation backed by Fluent
//!
//! Bundled `.ftl` resources are compiled into the binary. Callers that only
//! need labels depend on the [`Translate`] trait so tests and hosts can plug
//! in their own lookup.

use crate::lang::Language;
use fluent::{FluentBundle, FluentResource};
use std::fmt;
use thiserror::Error;
use unic_langid::LanguageIdentifier;

/// Errors that can occur while loading translations
#[derive(Debug, Error)]
pub enum TranslatorError {
    /// An FTL resource failed to parse
    #[error("Failed to parse {language:?} resource: {count} syntax error(s)")]
    Parse {
        /// Language of the resource
        language: Language,
        /// Number of syntax errors
        count: usize,
    },

    /// A resource could not be added to the bundle
    #[error("Failed to register {language:?} resource: {message}")]
    Registration {
        /// Language of the resource
        language: Language,
        /// First registration error
        message: String,
    },

    /// No bundled translations for the requested locale
    #[error("Unsupported language: {0}")]
    UnsupportedLanguage(String),
}

/// Result type for translator operations
pub type Result<T> = std::result::Result<T, TranslatorError>;

/// Label lookup
pub trait Translate {
    /// Translated text for `key`, if known
    fn lookup(&self, key: &str) -> Option<String>;

    /// Language labels are produced in
    fn language(&self) -> Language {
        Language::default()
    }
}

fn bundled_resource(language: Language) -> &'static str {
    match language {
        Language::EnUs => include_str!("../locales/en-US/filters.ftl"),
        Language::Fr => include_str!("../locales/fr/filters.ftl"),
    }
}

/// Fluent translator for one language
pub struct Translator {
    language: Language,
    bundle: FluentBundle<FluentResource>,
}

impl Translator {
    /// Load the bundled resources for `language`
    pub fn new(language: Language) -> Result<Self> {
        let resource = FluentResource::try_new(bundled_resource(language).to_string())
            .map_err(|(_, errors)| TranslatorError::Parse {
                language,
                count: errors.len(),
            })?;

        let mut bundle = FluentBundle::new(vec![language.identifier()]);
        // Labels are spliced into plain strings, so skip bidi isolation marks
        bundle.set_use_isolating(false);
        bundle
            .add_resource(resource)
            .map_err(|errors| TranslatorError::Registration {
                language,
                message: errors
                    .first()
                    .map(|e| e.to_string())
                    .unwrap_or_default(),
            })?;

        Ok(Self { language, bundle })
    }

    /// Load the best bundled language for the requested locales
    pub fn negotiated(requested: &[&str]) -> Result<Self> {
        Self::new(Language::negotiate(requested))
    }

    /// Load the bundled resources for exactly `locale`
    ///
    /// Unlike [`Translator::negotiated`], there is no fallback: a locale
    /// without bundled translations is an error.
    pub fn for_locale(locale: &str) -> Result<Self> {
        let language = locale
            .parse::<LanguageIdentifier>()
            .ok()
            .and_then(|id| Language::from_identifier(&id))
            .ok_or_else(|| TranslatorError::UnsupportedLanguage(locale.to_string()))?;
        Self::new(language)
    }
}

impl Translate for Translator {
    fn lookup(&self, key: &str) -> Option<String> {
        let message = self.bundle.get_message(key)?;
        let pattern = message.value()?;

        let mut errors = vec![];
        let text = self.bundle.format_pattern(pattern, None, &mut errors);
        if !errors.is_empty() {
            tracing::warn!(key, count = errors.len(), "Translation formatted with errors");
        }

        Some(text.into_owned())
    }

    fn language(&self) -> Language {
        self.language
    }
}

impl fmt::Debug for Translator {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("Translator")
            .field("language", &self.language)
            .finish_non_exhaustive()
    }
}
