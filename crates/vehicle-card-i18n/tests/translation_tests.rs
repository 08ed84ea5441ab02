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

use std::collections::BTreeSet;
use vehicle_card_i18n::{I18n, Language};

/// Keys the card cannot render without
const REQUIRED_KEYS: &[&str] = &[
    // Names
    "name-lockSensor",
    "name-parkBrake",
    "name-odometer",
    "name-soc",
    "name-selectedProgram",
    "name-stateCharging",
    "name-titleServices",
    "name-sunroofstatus",
    "name-chargeflapdcstatus",
    "name-doorstatusoverall",
    "name-windowstatusrearblind",
    // Sections
    "section-base",
    "section-charging",
    "section-lock",
    "section-door",
    "section-window",
    // State labels
    "lock-locked",
    "lock-unlocked",
    "door-open",
    "door-closed",
    "window-closed",
    "ignition-start",
    "sunroof-running",
    "sunroof-opening",
    "starter-battery-green",
    "park-brake-engaged",
    "charge-flap-open",
    "charging-state-charging",
    // Generic
    "state-on",
    "state-off",
    "state-unavailable",
    "state-unknown",
    "value-yes",
    "value-no",
];

/// Message identifiers defined in an FTL source
fn message_ids(ftl: &str) -> BTreeSet<String> {
    ftl.lines()
        .filter(|line| !line.starts_with('#') && !line.starts_with(' '))
        .filter_map(|line| line.split_once(" ="))
        .map(|(id, _)| id.trim().to_owned())
        .filter(|id| !id.is_empty())
        .collect()
}

fn all_ids(names: &str, states: &str) -> BTreeSet<String> {
    let mut ids = message_ids(names);
    ids.extend(message_ids(states));
    ids
}

#[test]
fn test_required_keys_present_in_all_languages() {
    for language in Language::ALL {
        let i18n = I18n::new(language)
            .unwrap_or_else(|e| panic!("Failed to load {language} translations: {e}"));

        let missing_keys: Vec<&str> = REQUIRED_KEYS
            .iter()
            .copied()
            .filter(|key| i18n.get(key).is_err())
            .collect();

        assert!(
            missing_keys.is_empty(),
            "Missing {} translations for keys: {:?}",
            language.display_name(),
            missing_keys
        );
    }
}

#[test]
fn test_languages_define_same_keys() {
    let english = all_ids(
        include_str!("../locales/en/names.ftl"),
        include_str!("../locales/en/states.ftl"),
    );
    let czech = all_ids(
        include_str!("../locales/cs/names.ftl"),
        include_str!("../locales/cs/states.ftl"),
    );
    let german = all_ids(
        include_str!("../locales/de/names.ftl"),
        include_str!("../locales/de/states.ftl"),
    );

    assert!(english.len() > REQUIRED_KEYS.len());
    assert_eq!(
        english.symmetric_difference(&czech).collect::<Vec<_>>(),
        Vec::<&String>::new(),
        "en/cs key sets differ"
    );
    assert_eq!(
        english.symmetric_difference(&german).collect::<Vec<_>>(),
        Vec::<&String>::new(),
        "en/de key sets differ"
    );
}

#[test]
fn test_translations_differ_between_languages() {
    let en = I18n::new(Language::English).unwrap();
    let cs = I18n::new(Language::Czech).unwrap();
    let de = I18n::new(Language::German).unwrap();

    assert_eq!(en.get("lock-locked").unwrap(), "Locked");
    assert_eq!(cs.get("lock-locked").unwrap(), "Zamčeno");
    assert_eq!(de.get("lock-locked").unwrap(), "Verriegelt");
    assert_eq!(de.language(), Language::German);
}

#[test]
fn test_missing_key_is_reported() {
    let i18n = I18n::new(Language::English).unwrap();
    assert!(!i18n.has_key("lock-does-not-exist"));
    let err = i18n.get("lock-does-not-exist").unwrap_err();
    assert_eq!(
        err.to_string(),
        "Translation key not found: lock-does-not-exist"
    );
}

#[test]
fn test_format_without_arguments_matches_get() {
    let i18n = I18n::new(Language::Czech).unwrap();
    assert_eq!(
        i18n.format("sunroof-running", None).unwrap(),
        i18n.get("sunroof-running").unwrap()
    );
}
