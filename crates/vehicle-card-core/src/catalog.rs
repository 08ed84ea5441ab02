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

use crate::keys::{AttrKey, CarKey, DerivedKey, EntityKey};
use crate::tables::TableId;
use serde::{Deserialize, Serialize};
use std::collections::BTreeMap;
use vehicle_card_types::RegistryEntry;

/// How to find the backend entity for an [`EntityKey`]
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(untagged)]
pub enum MatchRule {
    /// Exact `original_name` equality
    ByName { name: String },
    /// `entity_id` starts with `prefix` and ends with `suffix`; without a
    /// prefix either `unique_id` or `entity_id` must end with `suffix`
    Pattern {
        #[serde(default, skip_serializing_if = "Option::is_none")]
        prefix: Option<String>,
        suffix: String,
    },
}

impl MatchRule {
    pub fn suffix(suffix: impl Into<String>) -> Self {
        Self::Pattern {
            prefix: None,
            suffix: suffix.into(),
        }
    }

    pub fn prefixed(prefix: impl Into<String>, suffix: impl Into<String>) -> Self {
        Self::Pattern {
            prefix: Some(prefix.into()),
            suffix: suffix.into(),
        }
    }

    pub fn by_name(name: impl Into<String>) -> Self {
        Self::ByName { name: name.into() }
    }

    pub fn matches(&self, entry: &RegistryEntry) -> bool {
        match self {
            Self::ByName { name } => entry.original_name.as_deref() == Some(name.as_str()),
            Self::Pattern {
                prefix: Some(prefix),
                suffix,
            } => entry.entity_id.starts_with(prefix.as_str()) && entry.entity_id.ends_with(suffix.as_str()),
            Self::Pattern {
                prefix: None,
                suffix,
            } => {
                entry
                    .unique_id
                    .as_deref()
                    .is_some_and(|id| id.ends_with(suffix.as_str()))
                    || entry.entity_id.ends_with(suffix.as_str())
            }
        }
    }
}

/// Static presentation data of one key
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct CatalogEntry {
    /// Default (English) name, used when no translation exists
    pub name: &'static str,
    pub icon: &'static str,
    pub table: Option<TableId>,
}

const fn entry(name: &'static str, icon: &'static str, table: Option<TableId>) -> CatalogEntry {
    CatalogEntry { name, icon, table }
}

fn standard_rule(key: EntityKey) -> MatchRule {
    match key {
        EntityKey::LockSensor => MatchRule::prefixed("sensor.", "_lock"),
        EntityKey::ParkBrake => MatchRule::suffix("_parkbrakestatus"),
        EntityKey::WindowsClosed => MatchRule::prefixed("binary_sensor.", "_windowstatusoverall"),
        EntityKey::IgnitionState => MatchRule::prefixed("sensor.", "_ignitionstate"),
        EntityKey::StarterBattery => MatchRule::prefixed("sensor.", "_starterbatterystate"),
        EntityKey::Odometer => MatchRule::prefixed("sensor.", "_odometer"),
        EntityKey::FuelLevel => MatchRule::prefixed("sensor.", "_fuellevelpercent"),
        EntityKey::AdBlueLevel => MatchRule::prefixed("sensor.", "_tanklevelpercent"),
        EntityKey::RangeLiquid => MatchRule::prefixed("sensor.", "_rangeliquid"),
        EntityKey::RangeElectric => MatchRule::prefixed("sensor.", "_rangeelectrickm"),
        EntityKey::Soc => MatchRule::by_name("State of Charge"),
        EntityKey::MaxSoc => MatchRule::by_name("Max State of Charge"),
        EntityKey::ChargingPower => MatchRule::prefixed("sensor.", "_chargingpowerkw"),
        EntityKey::TirePressureFrontLeft => MatchRule::prefixed("sensor.", "_tirepressurefrontleft"),
        EntityKey::TirePressureFrontRight => {
            MatchRule::prefixed("sensor.", "_tirepressurefrontright")
        }
        EntityKey::TirePressureRearLeft => MatchRule::prefixed("sensor.", "_tirepressurerearleft"),
        EntityKey::TirePressureRearRight => MatchRule::prefixed("sensor.", "_tirepressurerearright"),
        EntityKey::TireWarning => MatchRule::prefixed("binary_sensor.", "_tirewarninglamp"),
        EntityKey::LowBrakeFluid => MatchRule::prefixed("binary_sensor.", "_warningbrakefluid"),
        EntityKey::LowCoolantLevel => {
            MatchRule::prefixed("binary_sensor.", "_warningcoolantlevellow")
        }
        EntityKey::LowWashWater => MatchRule::prefixed("binary_sensor.", "_warningwashwater"),
        EntityKey::EngineLight => MatchRule::prefixed("binary_sensor.", "_warningenginelight"),
        EntityKey::SunroofStatus => MatchRule::prefixed("sensor.", "_sunroofstatus"),
        EntityKey::ChargeFlapDcStatus => MatchRule::prefixed("sensor.", "_chargeflapdcstatus"),
        EntityKey::DeviceTracker => MatchRule::prefixed("device_tracker.", "_device_tracker"),
    }
}

fn entity_entry(key: EntityKey) -> CatalogEntry {
    match key {
        EntityKey::LockSensor => entry("Lock", "mdi:lock", Some(TableId::Lock)),
        EntityKey::ParkBrake => entry(
            "Parking brake",
            "mdi:car-brake-parking",
            Some(TableId::ParkBrake),
        ),
        EntityKey::WindowsClosed => entry("Windows", "mdi:car-door", None),
        EntityKey::IgnitionState => entry("Ignition", "mdi:key", Some(TableId::Ignition)),
        EntityKey::StarterBattery => entry(
            "Starter battery",
            "mdi:car-battery",
            Some(TableId::StarterBattery),
        ),
        EntityKey::Odometer => entry("Odometer", "mdi:counter", None),
        EntityKey::FuelLevel => entry("Fuel level", "mdi:gas-station", None),
        EntityKey::AdBlueLevel => entry("AdBlue level", "mdi:water", None),
        EntityKey::RangeLiquid => entry("Range (fuel)", "mdi:gas-station", None),
        EntityKey::RangeElectric => entry("Range (electric)", "mdi:ev-station", None),
        EntityKey::Soc => entry("State of charge", "mdi:battery-charging-medium", None),
        EntityKey::MaxSoc => entry("Maximum charge", "mdi:battery-charging-100", None),
        EntityKey::ChargingPower => entry("Charging power", "mdi:flash", None),
        EntityKey::TirePressureFrontLeft => entry("Front left tire", "mdi:tire", None),
        EntityKey::TirePressureFrontRight => entry("Front right tire", "mdi:tire", None),
        EntityKey::TirePressureRearLeft => entry("Rear left tire", "mdi:tire", None),
        EntityKey::TirePressureRearRight => entry("Rear right tire", "mdi:tire", None),
        EntityKey::TireWarning => entry("Tire warning", "mdi:car-tire-alert", None),
        EntityKey::LowBrakeFluid => entry("Brake fluid", "mdi:car-brake-fluid-level", None),
        EntityKey::LowCoolantLevel => entry("Coolant level", "mdi:car-coolant-level", None),
        EntityKey::LowWashWater => entry("Washer fluid", "mdi:wiper-wash-alert", None),
        EntityKey::EngineLight => entry("Engine light", "mdi:engine", None),
        EntityKey::SunroofStatus => entry("Sunroof", "mdi:car-select", Some(TableId::Sunroof)),
        EntityKey::ChargeFlapDcStatus => entry(
            "Charge flap",
            "mdi:ev-plug-ccs2",
            Some(TableId::ChargeFlap),
        ),
        EntityKey::DeviceTracker => entry("Location", "mdi:map-marker", None),
    }
}

fn derived_entry(key: DerivedKey) -> CatalogEntry {
    match key {
        DerivedKey::SelectedProgram => entry(
            "Charging program",
            "mdi:ev-station",
            Some(TableId::ChargeProgram),
        ),
        DerivedKey::StateCharging => entry(
            "Charging",
            "mdi:ev-station",
            Some(TableId::ChargingState),
        ),
        DerivedKey::TitleServices => entry("Services", "mdi:car-wrench", None),
    }
}

fn attr_entry(key: AttrKey) -> CatalogEntry {
    let door_lock = Some(TableId::DoorLock);
    let door = Some(TableId::Door);
    let window = Some(TableId::Window);
    match key {
        AttrKey::DoorLockStatusVehicle => entry("Vehicle lock", "mdi:car-key", Some(TableId::Lock)),
        AttrKey::DoorLockStatusDecklid => entry("Trunk lock", "mdi:lock", door_lock),
        AttrKey::DoorLockStatusGas => entry("Fuel lid lock", "mdi:gas-station", door_lock),
        AttrKey::DoorLockStatusFrontLeft => entry("Front left door lock", "mdi:lock", door_lock),
        AttrKey::DoorLockStatusFrontRight => entry("Front right door lock", "mdi:lock", door_lock),
        AttrKey::DoorLockStatusRearLeft => entry("Rear left door lock", "mdi:lock", door_lock),
        AttrKey::DoorLockStatusRearRight => entry("Rear right door lock", "mdi:lock", door_lock),
        AttrKey::DoorStatusOverall => entry("Doors", "mdi:car-door", Some(TableId::DoorOverall)),
        AttrKey::DecklidStatus => entry("Trunk", "mdi:car-back", door),
        AttrKey::EngineHoodStatus => entry("Hood", "mdi:car-lifted-pickup", door),
        AttrKey::DoorStatusFrontLeft => entry("Front left door", "mdi:car-door", door),
        AttrKey::DoorStatusFrontRight => entry("Front right door", "mdi:car-door", door),
        AttrKey::DoorStatusRearLeft => entry("Rear left door", "mdi:car-door", door),
        AttrKey::DoorStatusRearRight => entry("Rear right door", "mdi:car-door", door),
        AttrKey::WindowStatusFrontLeft => entry("Front left window", "mdi:window-closed", window),
        AttrKey::WindowStatusFrontRight => entry("Front right window", "mdi:window-closed", window),
        AttrKey::WindowStatusRearLeft => entry("Rear left window", "mdi:window-closed", window),
        AttrKey::WindowStatusRearRight => entry("Rear right window", "mdi:window-closed", window),
        AttrKey::WindowStatusRearBlind => entry("Rear blind", "mdi:blinds", window),
        AttrKey::WindowStatusRearLeftBlind => entry("Rear left blind", "mdi:blinds", window),
        AttrKey::WindowStatusRearRightBlind => entry("Rear right blind", "mdi:blinds", window),
    }
}

/// Canonical registry of every key: match rule, default name, icon and
/// state table. Built once and shared; rules can be overridden per device
/// family before sharing.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Catalog {
    rules: BTreeMap<EntityKey, MatchRule>,
}

impl Catalog {
    /// Naming conventions of the Mercedes me integration
    pub fn standard() -> Self {
        let rules = EntityKey::ALL
            .iter()
            .map(|&key| (key, standard_rule(key)))
            .collect();
        Self { rules }
    }

    /// Replace the match rule of one key
    #[must_use]
    pub fn with_rule(mut self, key: EntityKey, rule: MatchRule) -> Self {
        self.rules.insert(key, rule);
        self
    }

    pub fn rule(&self, key: EntityKey) -> Option<&MatchRule> {
        self.rules.get(&key)
    }

    /// Rules in key declaration order
    pub fn rules(&self) -> impl Iterator<Item = (EntityKey, &MatchRule)> {
        self.rules.iter().map(|(key, rule)| (*key, rule))
    }

    #[must_use]
    pub fn entry(&self, key: CarKey) -> CatalogEntry {
        match key {
            CarKey::Entity(key) => entity_entry(key),
            CarKey::Derived(key) => derived_entry(key),
            CarKey::Attr(key) => attr_entry(key),
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_every_entity_key_has_a_rule() {
        let catalog = Catalog::standard();
        for key in EntityKey::ALL {
            assert!(catalog.rule(*key).is_some(), "{key} has no rule");
        }
    }

    #[test]
    fn test_prefixed_rule() {
        let rule = MatchRule::prefixed("sensor.", "_odometer");
        assert!(rule.matches(&RegistryEntry::new("sensor.car_odometer")));
        assert!(!rule.matches(&RegistryEntry::new("number.car_odometer")));
        assert!(!rule.matches(
            &RegistryEntry::new("number.car_odometer").with_unique_id("x_odometer")
        ));
    }

    #[test]
    fn test_suffix_rule_checks_unique_id_or_entity_id() {
        let rule = MatchRule::suffix("_parkbrakestatus");
        assert!(rule.matches(
            &RegistryEntry::new("binary_sensor.renamed").with_unique_id("xyz_parkbrakestatus")
        ));
        assert!(rule.matches(&RegistryEntry::new("binary_sensor.car_parkbrakestatus")));
        assert!(!rule.matches(&RegistryEntry::new("binary_sensor.car_lock")));
    }

    #[test]
    fn test_name_rule_ignores_ids() {
        let rule = MatchRule::by_name("State of Charge");
        assert!(rule.matches(
            &RegistryEntry::new("sensor.anything").with_original_name("State of Charge")
        ));
        assert!(!rule.matches(
            &RegistryEntry::new("sensor.car_soc").with_unique_id("car_soc")
        ));
        assert!(!rule.matches(
            &RegistryEntry::new("sensor.car_max_soc").with_original_name("Max State of Charge")
        ));
    }

    #[test]
    fn test_rule_deserializes_from_config() {
        let rule: MatchRule = serde_json::from_str(r#"{"suffix": "_odo"}"#).unwrap();
        assert_eq!(rule, MatchRule::suffix("_odo"));
        let rule: MatchRule =
            serde_json::from_str(r#"{"prefix": "sensor.", "suffix": "_odo"}"#).unwrap();
        assert_eq!(rule, MatchRule::prefixed("sensor.", "_odo"));
        let rule: MatchRule = serde_json::from_str(r#"{"name": "State of Charge"}"#).unwrap();
        assert_eq!(rule, MatchRule::by_name("State of Charge"));
    }

    #[test]
    fn test_with_rule_overrides() {
        let catalog =
            Catalog::standard().with_rule(EntityKey::Odometer, MatchRule::suffix("_mileage"));
        assert_eq!(
            catalog.rule(EntityKey::Odometer),
            Some(&MatchRule::suffix("_mileage"))
        );
    }

    #[test]
    fn test_entries_reference_tables() {
        let catalog = Catalog::standard();
        assert_eq!(
            catalog.entry(EntityKey::SunroofStatus.into()).table,
            Some(TableId::Sunroof)
        );
        assert_eq!(
            catalog.entry(DerivedKey::TitleServices.into()).name,
            "Services"
        );
        assert_eq!(
            catalog.entry(AttrKey::WindowStatusFrontLeft.into()).table,
            Some(TableId::Window)
        );
    }
}
