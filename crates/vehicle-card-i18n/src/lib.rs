// Copyright (c) 2025 SOLARE S.R.O.
//
// This file is part of VehicleCard.
//
// Licensed under the Creative Commons Attribution-NonCommercial-NoDerivatives 4.0 International
// (CC BY-NC-ND 4.0). You may use and share this file for non-commercial purposes only and you may not
// create derivatives. See <https://creativecommons.org/licenses/by-nc-nd/4.0/>.
//
// This software is provided "AS IS", without warranty of any kind.
//
// For commercial licensing, please contact: info@solare.cz

use fluent_bundle::concurrent::FluentBundle;
use fluent_bundle::{FluentArgs, FluentResource};
use std::collections::BTreeMap;
use thiserror::Error;
use unic_langid::LanguageIdentifier;

/// Supported languages
#[derive(
    Debug, Clone, Copy, PartialEq, Eq, Hash, serde::Serialize, serde::Deserialize, Default,
)]
#[serde(rename_all = "lowercase")]
pub enum Language {
    /// English (default)
    #[default]
    #[serde(alias = "en")]
    English,
    /// Czech
    #[serde(alias = "cs")]
    Czech,
    /// German
    #[serde(alias = "de")]
    German,
}

impl Language {
    /// Get the language identifier string (e.g., "en", "cs")
    #[must_use]
    pub fn code(&self) -> &'static str {
        match self {
            Self::English => "en",
            Self::Czech => "cs",
            Self::German => "de",
        }
    }

    /// Get the language display name
    #[must_use]
    pub fn display_name(&self) -> &'static str {
        match self {
            Self::English => "English",
            Self::Czech => "Čeština",
            Self::German => "Deutsch",
        }
    }

    /// List all supported languages
    pub const ALL: [Language; 3] = [Language::English, Language::Czech, Language::German];

    /// Parse language from string code.
    ///
    /// Region suffixes are ignored, so HA's `de-DE` or `cs_CZ` resolve too.
    pub fn from_code(code: &str) -> Result<Self, I18nError> {
        let lowered = code.trim().to_lowercase();
        let primary = lowered.split(['-', '_']).next().unwrap_or_default();
        match primary {
            "en" | "english" => Ok(Self::English),
            "cs" | "czech" | "cz" => Ok(Self::Czech),
            "de" | "german" | "deutsch" => Ok(Self::German),
            _ => Err(I18nError::UnsupportedLanguage(code.to_owned())),
        }
    }
}

impl std::fmt::Display for Language {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.write_str(self.code())
    }
}

impl std::str::FromStr for Language {
    type Err = I18nError;
    fn from_str(s: &str) -> Result<Self, Self::Err> {
        Self::from_code(s)
    }
}

/// Translation errors
#[derive(Debug, Error)]
pub enum I18nError {
    /// Translation key not found
    #[error("Translation key not found: {0}")]
    KeyNotFound(String),

    /// Failed to load translation resource
    #[error("Failed to load translation resource: {0}")]
    LoadError(String),

    /// Unsupported language
    #[error("Unsupported language: {0}")]
    UnsupportedLanguage(String),

    /// Formatting error
    #[error("Failed to format translation: {0}")]
    FormatError(String),
}

/// Translation domains embedded in the binary
const DOMAINS: [&str; 2] = ["names", "states"];

/// Main i18n interface.
///
/// Bundles are immutable after construction; switching language means
/// building a new `I18n`.
pub struct I18n {
    bundles: BTreeMap<&'static str, FluentBundle<FluentResource>>,
    language: Language,
}

impl std::fmt::Debug for I18n {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("I18n")
            .field("language", &self.language)
            .field("domains", &self.bundles.keys().collect::<Vec<_>>())
            .finish()
    }
}

impl I18n {
    /// Create a new i18n instance for the specified language
    pub fn new(language: Language) -> Result<Self, I18nError> {
        let mut i18n = Self {
            bundles: BTreeMap::new(),
            language,
        };

        for domain in DOMAINS {
            i18n.load_domain(domain)?;
        }

        Ok(i18n)
    }

    /// Load a translation domain ("names" or "states")
    fn load_domain(&mut self, domain: &'static str) -> Result<(), I18nError> {
        let lang_code = self.language.code();
        let ftl_content = Self::load_ftl_file(lang_code, domain)?;

        let resource = FluentResource::try_new(ftl_content.to_owned())
            .map_err(|e| I18nError::LoadError(format!("Failed to parse {domain}.ftl: {e:?}")))?;

        let lang_id: LanguageIdentifier = lang_code
            .parse()
            .map_err(|e| I18nError::LoadError(format!("Invalid language ID: {e}")))?;

        let mut bundle = FluentBundle::new_concurrent(vec![lang_id]);
        // Labels are shown inside widgets, bidi isolation marks only get in the way
        bundle.set_use_isolating(false);
        bundle
            .add_resource(resource)
            .map_err(|e| I18nError::LoadError(format!("Failed to add resource: {e:?}")))?;

        self.bundles.insert(domain, bundle);
        Ok(())
    }

    /// Load FTL file content
    fn load_ftl_file(lang_code: &str, domain: &str) -> Result<&'static str, I18nError> {
        match (lang_code, domain) {
            ("en", "names") => Ok(include_str!("../locales/en/names.ftl")),
            ("en", "states") => Ok(include_str!("../locales/en/states.ftl")),
            ("cs", "names") => Ok(include_str!("../locales/cs/names.ftl")),
            ("cs", "states") => Ok(include_str!("../locales/cs/states.ftl")),
            ("de", "names") => Ok(include_str!("../locales/de/names.ftl")),
            ("de", "states") => Ok(include_str!("../locales/de/states.ftl")),
            _ => Err(I18nError::LoadError(format!(
                "Translation file not found: {lang_code}/{domain}.ftl"
            ))),
        }
    }

    /// Get a translated string by key
    pub fn get(&self, key: &str) -> Result<String, I18nError> {
        self.format(key, None)
    }

    /// Format a translated string with arguments
    pub fn format(&self, key: &str, args: Option<&FluentArgs<'_>>) -> Result<String, I18nError> {
        // Try each domain until we find the key
        for bundle in self.bundles.values() {
            if let Some(message) = bundle.get_message(key).and_then(|msg| msg.value()) {
                let mut errors = vec![];
                let value = bundle.format_pattern(message, args, &mut errors);

                if !errors.is_empty() {
                    return Err(I18nError::FormatError(format!(
                        "Formatting errors: {errors:?}"
                    )));
                }

                return Ok(value.to_string());
            }
        }

        Err(I18nError::KeyNotFound(key.to_owned()))
    }

    /// Whether any domain defines `key`
    #[must_use]
    pub fn has_key(&self, key: &str) -> bool {
        self.bundles.values().any(|bundle| bundle.has_message(key))
    }

    /// Get the current language
    #[must_use]
    pub fn language(&self) -> Language {
        self.language
    }
}
