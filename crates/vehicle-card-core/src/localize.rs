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

use std::sync::Arc;
use tracing::debug;
use vehicle_card_i18n::I18n;

/// Translation lookup used by the tables, the formatter and the aggregator.
///
/// A missing translation is not an error: [`Localize::localize`] falls back
/// to the translation id itself.
pub trait Localize {
    /// Translated text for `key`, `None` when no translation exists
    fn translate(&self, key: &str) -> Option<String>;

    fn localize(&self, key: &str) -> String {
        self.translate(key).unwrap_or_else(|| key.to_owned())
    }
}

impl Localize for I18n {
    fn translate(&self, key: &str) -> Option<String> {
        match self.get(key) {
            Ok(text) => Some(text),
            Err(e) => {
                debug!("No {} translation for '{key}': {e}", self.language());
                None
            }
        }
    }
}

impl<T: Localize + ?Sized> Localize for &T {
    fn translate(&self, key: &str) -> Option<String> {
        (**self).translate(key)
    }
}

impl<T: Localize + ?Sized> Localize for Arc<T> {
    fn translate(&self, key: &str) -> Option<String> {
        (**self).translate(key)
    }
}

/// Localizer without translations; every label falls back to its id
/// and every name to its catalog default
#[derive(Debug, Clone, Copy, Default)]
pub struct NoTranslations;

impl Localize for NoTranslations {
    fn translate(&self, _key: &str) -> Option<String> {
        None
    }
}
