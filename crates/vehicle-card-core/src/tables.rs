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

//! Static state tables and their localized form.
//!
//! A [`StateTable`] is the locale-independent definition: raw code to
//! symbolic label. [`DisplayTables::build`] turns all definitions into
//! [`StateDisplayTable`]s for one localizer; a locale change builds a new set.

use crate::localize::Localize;
use serde::{Deserialize, Serialize};
use std::borrow::Cow;
use std::collections::HashMap;

/// Identifies one state table
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, PartialOrd, Ord, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum TableId {
    Lock,
    DoorLock,
    Door,
    DoorOverall,
    Window,
    Ignition,
    Sunroof,
    ChargeProgram,
    StarterBattery,
    ParkBrake,
    ChargeFlap,
    ChargingState,
}

/// How raw values are keyed and how labels are rendered
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum TableKind {
    /// Integer codes, `"7"`, `"7.0"` and `7` all address entry `"7"`
    NumericCode,
    /// `"true"`/`"false"` (and `"on"`/`"off"`), case-insensitive
    BooleanFlag,
    /// Integer codes whose labels are shown verbatim, never localized
    Passthrough,
}

impl TableKind {
    /// Canonical lookup key for a raw value
    pub fn normalize(self, raw: &str) -> Cow<'_, str> {
        let trimmed = raw.trim();
        match self {
            Self::NumericCode | Self::Passthrough => {
                if trimmed.parse::<i64>().is_ok() {
                    return Cow::Borrowed(trimmed);
                }
                match trimmed.parse::<f64>() {
                    Ok(value) if value.is_finite() && value.fract() == 0.0 => {
                        Cow::Owned(format!("{value:.0}"))
                    }
                    _ => Cow::Borrowed(trimmed),
                }
            }
            Self::BooleanFlag => {
                if trimmed.chars().any(|c| c.is_ascii_uppercase()) {
                    Cow::Owned(trimmed.to_ascii_lowercase())
                } else {
                    Cow::Borrowed(trimmed)
                }
            }
        }
    }
}

/// How the `active` flag is derived from a raw value
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum Activity {
    /// Active unless the value is one of the closed/locked sentinels
    /// `"2"`, `"1"` or `false`
    ClosedSentinels,
    /// Active unless the value is `"0"`
    NonZero,
    /// No activity semantics
    Unset,
}

const CLOSED_SENTINELS: [&str; 3] = ["2", "1", "false"];

impl Activity {
    /// `normalized` must already be in the table's canonical form
    pub fn evaluate(self, normalized: &str) -> Option<bool> {
        match self {
            Self::ClosedSentinels => Some(!CLOSED_SENTINELS.contains(&normalized)),
            Self::NonZero => Some(normalized != "0"),
            Self::Unset => None,
        }
    }
}

/// Locale-independent table definition
#[derive(Debug, Clone, Copy)]
pub struct StateTable {
    pub id: TableId,
    pub kind: TableKind,
    /// Translation ids are `<namespace>-<label>`
    pub namespace: &'static str,
    pub activity: Activity,
    pub entries: &'static [(&'static str, &'static str)],
}

impl StateTable {
    /// Translation id for a symbolic label
    pub fn label_id(&self, label: &str) -> String {
        format!("{}-{label}", self.namespace)
    }
}

const LOCK_STATES: &[(&str, &str)] = &[
    ("0", "unlocked"),
    ("1", "locked-int"),
    ("2", "locked"),
    ("3", "partly-unlocked"),
    ("4", "unknown"),
];

const DOOR_LOCK_STATES: &[(&str, &str)] = &[("false", "locked"), ("true", "unlocked")];

const DOOR_STATES: &[(&str, &str)] = &[("false", "closed"), ("true", "open")];

const DOOR_OVERALL_STATES: &[(&str, &str)] = &[
    ("0", "open"),
    ("1", "closed"),
    ("2", "not-existing"),
    ("3", "unknown"),
];

const WINDOW_STATES: &[(&str, &str)] = &[
    ("0", "open"),
    ("1", "intermediate"),
    ("2", "closed"),
    ("3", "airing"),
    ("4", "intermediate-airing"),
    ("5", "running"),
];

const IGNITION_STATES: &[(&str, &str)] = &[
    ("0", "lock"),
    ("1", "off"),
    ("2", "accessory"),
    ("4", "on"),
    ("5", "start"),
];

const SUNROOF_STATES: &[(&str, &str)] = &[
    ("0", "closed"),
    ("1", "open"),
    ("2", "open-lifting"),
    ("3", "running"),
    ("4", "closing-anti-booming"),
    ("5", "intermediate-sliding"),
    ("6", "intermediate-lifting"),
    ("7", "opening"),
    ("8", "closing"),
    ("9", "anti-booming-lifting"),
    ("10", "intermediate-position"),
    ("11", "opening-lifting"),
    ("12", "closing-lifting"),
];

const CHARGE_PROGRAMS: &[(&str, &str)] = &[("0", "Standard"), ("2", "Home"), ("3", "Work")];

const STARTER_BATTERY_STATES: &[(&str, &str)] = &[
    ("0", "green"),
    ("1", "yellow"),
    ("2", "red"),
    ("3", "service-disabled"),
    ("4", "vehicle-not-available"),
];

const PARK_BRAKE_STATES: &[(&str, &str)] = &[
    ("true", "engaged"),
    ("false", "released"),
    ("on", "engaged"),
    ("off", "released"),
];

const CHARGE_FLAP_STATES: &[(&str, &str)] = &[("0", "open"), ("1", "closed")];

const CHARGING_STATES: &[(&str, &str)] = &[("true", "charging"), ("false", "not-charging")];

impl TableId {
    pub const ALL: [TableId; 12] = [
        TableId::Lock,
        TableId::DoorLock,
        TableId::Door,
        TableId::DoorOverall,
        TableId::Window,
        TableId::Ignition,
        TableId::Sunroof,
        TableId::ChargeProgram,
        TableId::StarterBattery,
        TableId::ParkBrake,
        TableId::ChargeFlap,
        TableId::ChargingState,
    ];

    /// Static definition of this table
    #[must_use]
    pub fn definition(self) -> StateTable {
        let (kind, namespace, activity, entries) = match self {
            Self::Lock => (
                TableKind::NumericCode,
                "lock",
                Activity::ClosedSentinels,
                LOCK_STATES,
            ),
            Self::DoorLock => (
                TableKind::BooleanFlag,
                "door-lock",
                Activity::ClosedSentinels,
                DOOR_LOCK_STATES,
            ),
            Self::Door => (
                TableKind::BooleanFlag,
                "door",
                Activity::ClosedSentinels,
                DOOR_STATES,
            ),
            Self::DoorOverall => (
                TableKind::NumericCode,
                "door-overall",
                Activity::ClosedSentinels,
                DOOR_OVERALL_STATES,
            ),
            Self::Window => (
                TableKind::NumericCode,
                "window",
                Activity::ClosedSentinels,
                WINDOW_STATES,
            ),
            Self::Ignition => (
                TableKind::NumericCode,
                "ignition",
                Activity::Unset,
                IGNITION_STATES,
            ),
            Self::Sunroof => (
                TableKind::NumericCode,
                "sunroof",
                Activity::NonZero,
                SUNROOF_STATES,
            ),
            Self::ChargeProgram => (
                TableKind::Passthrough,
                "charge-program",
                Activity::Unset,
                CHARGE_PROGRAMS,
            ),
            Self::StarterBattery => (
                TableKind::NumericCode,
                "starter-battery",
                Activity::Unset,
                STARTER_BATTERY_STATES,
            ),
            Self::ParkBrake => (
                TableKind::BooleanFlag,
                "park-brake",
                Activity::Unset,
                PARK_BRAKE_STATES,
            ),
            Self::ChargeFlap => (
                TableKind::NumericCode,
                "charge-flap",
                Activity::ClosedSentinels,
                CHARGE_FLAP_STATES,
            ),
            Self::ChargingState => (
                TableKind::BooleanFlag,
                "charging-state",
                Activity::Unset,
                CHARGING_STATES,
            ),
        };

        StateTable {
            id: self,
            kind,
            namespace,
            activity,
            entries,
        }
    }
}

/// One table with labels resolved for the active locale
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct StateDisplayTable {
    kind: TableKind,
    activity: Activity,
    labels: HashMap<&'static str, String>,
}

impl StateDisplayTable {
    pub fn build(definition: &StateTable, localizer: &dyn Localize) -> Self {
        let labels = definition
            .entries
            .iter()
            .map(|&(code, label)| {
                let text = match definition.kind {
                    TableKind::Passthrough => label.to_owned(),
                    TableKind::NumericCode | TableKind::BooleanFlag => {
                        localizer.localize(&definition.label_id(label))
                    }
                };
                (code, text)
            })
            .collect();

        Self {
            kind: definition.kind,
            activity: definition.activity,
            labels,
        }
    }

    /// Localized label for a raw value, `None` when the value is not in the table
    pub fn lookup(&self, raw: &str) -> Option<&str> {
        self.labels
            .get(&*self.kind.normalize(raw))
            .map(String::as_str)
    }

    /// `active` flag for a raw value, `None` for tables without activity semantics
    pub fn activity(&self, raw: &str) -> Option<bool> {
        self.activity.evaluate(&self.kind.normalize(raw))
    }

    pub fn len(&self) -> usize {
        self.labels.len()
    }

    pub fn is_empty(&self) -> bool {
        self.labels.is_empty()
    }
}

/// All state tables localized for one locale
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct DisplayTables {
    tables: HashMap<TableId, StateDisplayTable>,
}

impl DisplayTables {
    pub fn build(localizer: &dyn Localize) -> Self {
        let tables = TableId::ALL
            .into_iter()
            .map(|id| (id, StateDisplayTable::build(&id.definition(), localizer)))
            .collect();
        Self { tables }
    }

    pub fn get(&self, id: TableId) -> Option<&StateDisplayTable> {
        self.tables.get(&id)
    }
}
