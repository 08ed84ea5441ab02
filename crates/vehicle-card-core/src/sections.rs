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

//! Section enumeration and the per-key display record.
//!
//! Every read goes through [`SectionAggregator::entity_config_by_key`]; the
//! section helpers only fix the order of keys.

use crate::catalog::Catalog;
use crate::formatter::StateFormatter;
use crate::keys::{AttrKey, CarKey, DerivedKey, EntityKey, UnknownKey};
use crate::localize::Localize;
use crate::mapper::{MappedState, StateDisplayMapper};
use crate::resolver::CarEntities;
use crate::tables::TableId;
use serde::ser::SerializeMap;
use serde::{Deserialize, Serialize, Serializer};
use std::fmt;
use std::str::FromStr;
use vehicle_card_types::{EntityState, StateSnapshot};

/// Attribute of the electric range entity holding the charge program code
pub const SELECTED_CHARGE_PROGRAM_ATTR: &str = "selectedChargeProgram";
/// Attribute of the electric range entity telling whether the car charges
pub const CHARGING_ACTIVE_ATTR: &str = "chargingactive";

const fn entity(key: EntityKey) -> CarKey {
    CarKey::Entity(key)
}

const fn derived(key: DerivedKey) -> CarKey {
    CarKey::Derived(key)
}

const fn attr(key: AttrKey) -> CarKey {
    CarKey::Attr(key)
}

const BASE_KEYS: &[CarKey] = &[
    entity(EntityKey::LockSensor),
    entity(EntityKey::ParkBrake),
    entity(EntityKey::IgnitionState),
    entity(EntityKey::WindowsClosed),
    entity(EntityKey::StarterBattery),
    derived(DerivedKey::StateCharging),
];

const TRIP_KEYS: &[CarKey] = &[
    entity(EntityKey::Odometer),
    entity(EntityKey::FuelLevel),
    entity(EntityKey::AdBlueLevel),
    entity(EntityKey::RangeLiquid),
    entity(EntityKey::RangeElectric),
    entity(EntityKey::Soc),
];

const CHARGING_KEYS: &[CarKey] = &[
    entity(EntityKey::ChargingPower),
    entity(EntityKey::Soc),
    entity(EntityKey::MaxSoc),
    derived(DerivedKey::SelectedProgram),
    derived(DerivedKey::StateCharging),
];

const TIRE_KEYS: &[CarKey] = &[
    entity(EntityKey::TirePressureFrontLeft),
    entity(EntityKey::TirePressureFrontRight),
    entity(EntityKey::TirePressureRearLeft),
    entity(EntityKey::TirePressureRearRight),
    entity(EntityKey::TireWarning),
];

const SERVICE_KEYS: &[CarKey] = &[
    derived(DerivedKey::TitleServices),
    entity(EntityKey::LowBrakeFluid),
    entity(EntityKey::LowCoolantLevel),
    entity(EntityKey::LowWashWater),
    entity(EntityKey::EngineLight),
    entity(EntityKey::TireWarning),
];

const LOCK_KEYS: &[CarKey] = &[
    attr(AttrKey::DoorLockStatusVehicle),
    attr(AttrKey::DoorLockStatusDecklid),
    attr(AttrKey::DoorLockStatusGas),
    attr(AttrKey::DoorLockStatusFrontLeft),
    attr(AttrKey::DoorLockStatusFrontRight),
    attr(AttrKey::DoorLockStatusRearLeft),
    attr(AttrKey::DoorLockStatusRearRight),
];

const DOOR_KEYS: &[CarKey] = &[
    attr(AttrKey::DoorStatusOverall),
    attr(AttrKey::DoorStatusFrontLeft),
    attr(AttrKey::DoorStatusFrontRight),
    attr(AttrKey::DoorStatusRearLeft),
    attr(AttrKey::DoorStatusRearRight),
    attr(AttrKey::DecklidStatus),
    attr(AttrKey::EngineHoodStatus),
    entity(EntityKey::ChargeFlapDcStatus),
];

const WINDOW_KEYS: &[CarKey] = &[
    attr(AttrKey::WindowStatusFrontLeft),
    attr(AttrKey::WindowStatusFrontRight),
    attr(AttrKey::WindowStatusRearLeft),
    attr(AttrKey::WindowStatusRearRight),
    attr(AttrKey::WindowStatusRearBlind),
    attr(AttrKey::WindowStatusRearLeftBlind),
    attr(AttrKey::WindowStatusRearRightBlind),
    entity(EntityKey::SunroofStatus),
];

/// Sections composed from whole entities
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum IndicatorSection {
    Base,
    Trip,
    Charging,
    Tires,
    Services,
}

impl IndicatorSection {
    pub const ALL: [IndicatorSection; 5] = [
        IndicatorSection::Base,
        IndicatorSection::Trip,
        IndicatorSection::Charging,
        IndicatorSection::Tires,
        IndicatorSection::Services,
    ];

    #[must_use]
    pub fn keys(self) -> &'static [CarKey] {
        match self {
            Self::Base => BASE_KEYS,
            Self::Trip => TRIP_KEYS,
            Self::Charging => CHARGING_KEYS,
            Self::Tires => TIRE_KEYS,
            Self::Services => SERVICE_KEYS,
        }
    }

    #[must_use]
    pub fn as_str(self) -> &'static str {
        match self {
            Self::Base => "base",
            Self::Trip => "trip",
            Self::Charging => "charging",
            Self::Tires => "tires",
            Self::Services => "services",
        }
    }
}

/// Sections composed from the attributes of the lock and windows sensors
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum AttrSection {
    Lock,
    Door,
    Window,
}

impl AttrSection {
    pub const ALL: [AttrSection; 3] = [AttrSection::Lock, AttrSection::Door, AttrSection::Window];

    /// Ordered keys; door and window end with their standalone entity
    #[must_use]
    pub fn keys(self) -> &'static [CarKey] {
        match self {
            Self::Lock => LOCK_KEYS,
            Self::Door => DOOR_KEYS,
            Self::Window => WINDOW_KEYS,
        }
    }

    #[must_use]
    pub fn as_str(self) -> &'static str {
        match self {
            Self::Lock => "lock",
            Self::Door => "door",
            Self::Window => "window",
        }
    }
}

/// Any section, as selected on the command line
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum Section {
    Indicator(IndicatorSection),
    Attr(AttrSection),
}

impl Section {
    pub const ALL: [Section; 8] = [
        Section::Indicator(IndicatorSection::Base),
        Section::Indicator(IndicatorSection::Trip),
        Section::Indicator(IndicatorSection::Charging),
        Section::Indicator(IndicatorSection::Tires),
        Section::Indicator(IndicatorSection::Services),
        Section::Attr(AttrSection::Lock),
        Section::Attr(AttrSection::Door),
        Section::Attr(AttrSection::Window),
    ];

    #[must_use]
    pub fn as_str(self) -> &'static str {
        match self {
            Self::Indicator(section) => section.as_str(),
            Self::Attr(section) => section.as_str(),
        }
    }

    #[must_use]
    pub fn keys(self) -> &'static [CarKey] {
        match self {
            Self::Indicator(section) => section.keys(),
            Self::Attr(section) => section.keys(),
        }
    }

    /// Translation id of the section heading
    #[must_use]
    pub fn title_id(self) -> String {
        format!("section-{}", self.as_str())
    }
}

impl From<IndicatorSection> for Section {
    fn from(section: IndicatorSection) -> Self {
        Self::Indicator(section)
    }
}

impl From<AttrSection> for Section {
    fn from(section: AttrSection) -> Self {
        Self::Attr(section)
    }
}

impl FromStr for Section {
    type Err = UnknownKey;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        Self::ALL
            .into_iter()
            .find(|section| section.as_str().eq_ignore_ascii_case(s))
            .ok_or_else(|| UnknownKey(s.to_owned()))
    }
}

impl fmt::Display for Section {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

/// Everything a renderer needs for one key
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct CarItemDisplay {
    pub key: CarKey,
    pub name: String,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub entity_id: Option<String>,
    pub icon: Option<String>,
    pub state: Option<String>,
    pub display_state: Option<String>,
    pub active: Option<bool>,
}

/// Ordered section content; serializes as a map keyed by the logical key
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct SectionItems(Vec<CarItemDisplay>);

impl SectionItems {
    pub fn get(&self, key: impl Into<CarKey>) -> Option<&CarItemDisplay> {
        let key = key.into();
        self.0.iter().find(|item| item.key == key)
    }

    pub fn iter(&self) -> std::slice::Iter<'_, CarItemDisplay> {
        self.0.iter()
    }

    pub fn keys(&self) -> impl Iterator<Item = CarKey> + '_ {
        self.0.iter().map(|item| item.key)
    }

    pub fn len(&self) -> usize {
        self.0.len()
    }

    pub fn is_empty(&self) -> bool {
        self.0.is_empty()
    }
}

impl FromIterator<CarItemDisplay> for SectionItems {
    fn from_iter<I: IntoIterator<Item = CarItemDisplay>>(iter: I) -> Self {
        Self(iter.into_iter().collect())
    }
}

impl IntoIterator for SectionItems {
    type Item = CarItemDisplay;
    type IntoIter = std::vec::IntoIter<CarItemDisplay>;

    fn into_iter(self) -> Self::IntoIter {
        self.0.into_iter()
    }
}

impl<'a> IntoIterator for &'a SectionItems {
    type Item = &'a CarItemDisplay;
    type IntoIter = std::slice::Iter<'a, CarItemDisplay>;

    fn into_iter(self) -> Self::IntoIter {
        self.0.iter()
    }
}

impl Serialize for SectionItems {
    fn serialize<S: Serializer>(&self, serializer: S) -> Result<S::Ok, S::Error> {
        let mut map = serializer.serialize_map(Some(self.0.len()))?;
        for item in &self.0 {
            map.serialize_entry(item.key.as_str(), item)?;
        }
        map.end()
    }
}

/// Borrowed view over one consistent set of inputs. Pure: the same inputs
/// always produce the same records.
#[derive(Clone, Copy)]
pub struct SectionAggregator<'a> {
    catalog: &'a Catalog,
    entities: &'a CarEntities,
    states: &'a StateSnapshot,
    mapper: &'a StateDisplayMapper,
    localizer: &'a dyn Localize,
    formatter: &'a dyn StateFormatter,
}

impl<'a> SectionAggregator<'a> {
    pub fn new(
        catalog: &'a Catalog,
        entities: &'a CarEntities,
        states: &'a StateSnapshot,
        mapper: &'a StateDisplayMapper,
        localizer: &'a dyn Localize,
        formatter: &'a dyn StateFormatter,
    ) -> Self {
        Self {
            catalog,
            entities,
            states,
            mapper,
            localizer,
            formatter,
        }
    }

    /// Display record of one key. Never fails: unresolved keys and missing
    /// states yield a record with the catalog name and no state.
    pub fn entity_config_by_key(&self, key: impl Into<CarKey>) -> CarItemDisplay {
        let key = key.into();
        let catalog_entry = self.catalog.entry(key);
        let name = self
            .localizer
            .translate(&key.name_id())
            .unwrap_or_else(|| catalog_entry.name.to_owned());

        let (entity_id, icon, mapped) = match key {
            CarKey::Entity(entity_key) => {
                let descriptor = self.entities.get(&entity_key);
                let icon = descriptor.and_then(|d| d.icon.clone());
                (
                    descriptor.map(|d| d.entity_id.clone()),
                    icon,
                    self.entity_state(key, entity_key),
                )
            }
            CarKey::Attr(attr_key) => {
                let source = attr_key.group().source();
                (
                    self.entities.get(&source).map(|d| d.entity_id.clone()),
                    None,
                    self.attribute_state(key, source, attr_key.as_str()),
                )
            }
            CarKey::Derived(DerivedKey::SelectedProgram) => (
                self.entity_id(EntityKey::RangeElectric),
                None,
                self.attribute_state(key, EntityKey::RangeElectric, SELECTED_CHARGE_PROGRAM_ATTR),
            ),
            CarKey::Derived(DerivedKey::StateCharging) => (
                self.entity_id(EntityKey::RangeElectric),
                None,
                self.charging_state(),
            ),
            CarKey::Derived(DerivedKey::TitleServices) => (
                None,
                None,
                MappedState {
                    display_state: Some(name.clone()),
                    ..MappedState::default()
                },
            ),
        };

        CarItemDisplay {
            key,
            name,
            entity_id,
            icon: icon.or_else(|| Some(catalog_entry.icon.to_owned())),
            state: mapped.state,
            display_state: mapped.display_state,
            active: mapped.active,
        }
    }

    /// Records of an entity section, in section order
    pub fn indicator_section_items(&self, section: IndicatorSection) -> SectionItems {
        self.items(section.keys())
    }

    /// Records of an attribute section, in section order
    pub fn attr_section_item_config(&self, section: AttrSection) -> SectionItems {
        self.items(section.keys())
    }

    pub fn section_items(&self, section: Section) -> SectionItems {
        match section {
            Section::Indicator(section) => self.indicator_section_items(section),
            Section::Attr(section) => self.attr_section_item_config(section),
        }
    }

    fn items(&self, keys: &[CarKey]) -> SectionItems {
        keys.iter()
            .map(|&key| self.entity_config_by_key(key))
            .collect()
    }

    fn entity_id(&self, key: EntityKey) -> Option<String> {
        self.entities.get(&key).map(|d| d.entity_id.clone())
    }

    fn live_state(&self, key: EntityKey) -> Option<&'a EntityState> {
        let descriptor = self.entities.get(&key)?;
        self.states.get(&descriptor.entity_id)
    }

    fn entity_state(&self, key: CarKey, entity_key: EntityKey) -> MappedState {
        let Some(state) = self.live_state(entity_key) else {
            return MappedState::default();
        };
        self.mapper.display(key, Some(&state.state), |_| {
            self.formatter.format_state(state, self.localizer)
        })
    }

    fn attribute_state(&self, key: CarKey, source: EntityKey, attribute: &str) -> MappedState {
        let Some(state) = self.live_state(source) else {
            return MappedState::default();
        };
        let raw = state.attribute_string(attribute);
        self.mapper.display(key, raw.as_deref(), |raw| {
            self.formatter
                .format_attribute(state, attribute, self.localizer)
                .unwrap_or_else(|| raw.to_owned())
        })
    }

    /// `state` is `"true"`/`"false"` from the range entity's charging flag;
    /// an absent flag counts as not charging
    fn charging_state(&self) -> MappedState {
        let Some(state) = self.live_state(EntityKey::RangeElectric) else {
            return MappedState::default();
        };
        let charging = state
            .attribute_string(CHARGING_ACTIVE_ATTR)
            .is_some_and(|raw| raw.trim().eq_ignore_ascii_case("true"));
        let raw = if charging { "true" } else { "false" };

        let mapped = self
            .mapper
            .display_with_table(TableId::ChargingState, Some(raw), str::to_owned);
        MappedState {
            active: Some(charging),
            ..mapped
        }
    }
}

impl fmt::Debug for SectionAggregator<'_> {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("SectionAggregator")
            .field("entities", &self.entities.len())
            .field("states", &self.states.len())
            .finish_non_exhaustive()
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::formatter::DefaultFormatter;
    use crate::localize::NoTranslations;
    use crate::tables::DisplayTables;
    use std::sync::Arc;
    use vehicle_card_types::EntityDescriptor;

    /// Echoes translation ids back, except for item names
    struct Echo;

    impl Localize for Echo {
        fn translate(&self, key: &str) -> Option<String> {
            (!key.starts_with("name-")).then(|| key.to_owned())
        }
    }

    struct Fixture {
        catalog: Arc<Catalog>,
        entities: CarEntities,
        states: StateSnapshot,
        mapper: StateDisplayMapper,
    }

    impl Fixture {
        fn new() -> Self {
            let catalog = Arc::new(Catalog::standard());
            let tables = Arc::new(DisplayTables::build(&Echo));
            Self {
                mapper: StateDisplayMapper::new(Arc::clone(&catalog), tables),
                catalog,
                entities: CarEntities::new(),
                states: StateSnapshot::new(),
            }
        }

        fn with_entity(mut self, key: EntityKey, state: EntityState) -> Self {
            self.entities
                .insert(key, EntityDescriptor::new(state.entity_id.clone()));
            self.states.insert(state);
            self
        }

        fn aggregator(&self) -> SectionAggregator<'_> {
            SectionAggregator::new(
                &self.catalog,
                &self.entities,
                &self.states,
                &self.mapper,
                &Echo,
                &DefaultFormatter,
            )
        }
    }

    fn lock_sensor() -> EntityState {
        EntityState::new("sensor.car_lock", "2")
            .with_attribute("doorlockstatusvehicle", "0")
            .with_attribute("doorlockstatusfrontleft", false)
            .with_attribute("doorstatusrearright", true)
            .with_attribute("decklidstatus", "false")
    }

    fn range_electric(charging: Option<bool>) -> EntityState {
        let state = EntityState::new("sensor.car_rangeelectrickm", "312")
            .with_attribute("unit_of_measurement", "km")
            .with_attribute(SELECTED_CHARGE_PROGRAM_ATTR, 2);
        match charging {
            Some(flag) => state.with_attribute(CHARGING_ACTIVE_ATTR, flag),
            None => state,
        }
    }

    #[test]
    fn test_title_services_without_entity() {
        let fixture = Fixture::new();
        let item = fixture
            .aggregator()
            .entity_config_by_key(DerivedKey::TitleServices);

        assert_eq!(item.name, "Services");
        assert_eq!(item.display_state.as_deref(), Some("Services"));
        assert_eq!(item.state, None);
        assert_eq!(item.active, None);
    }

    #[test]
    fn test_unresolved_key_keeps_catalog_name() {
        let fixture = Fixture::new();
        let item = fixture.aggregator().entity_config_by_key(EntityKey::Odometer);

        assert_eq!(item.name, "Odometer");
        assert_eq!(item.icon.as_deref(), Some("mdi:counter"));
        assert_eq!(item.entity_id, None);
        assert_eq!(item.state, None);
        assert_eq!(item.display_state, None);
    }

    #[test]
    fn test_entity_with_table() {
        let fixture = Fixture::new().with_entity(EntityKey::LockSensor, lock_sensor());
        let item = fixture.aggregator().entity_config_by_key(EntityKey::LockSensor);

        assert_eq!(item.entity_id.as_deref(), Some("sensor.car_lock"));
        assert_eq!(item.state.as_deref(), Some("2"));
        assert_eq!(item.display_state.as_deref(), Some("lock-locked"));
        assert_eq!(item.active, Some(false));
    }

    #[test]
    fn test_entity_without_table_uses_formatter() {
        let fixture = Fixture::new().with_entity(
            EntityKey::Odometer,
            EntityState::new("sensor.car_odometer", "15230.0")
                .with_attribute("unit_of_measurement", "km"),
        );
        let item = fixture.aggregator().entity_config_by_key(EntityKey::Odometer);

        assert_eq!(item.state.as_deref(), Some("15230.0"));
        assert_eq!(item.display_state.as_deref(), Some("15230 km"));
        assert_eq!(item.active, None);
    }

    #[test]
    fn test_lock_attribute_section() {
        let fixture = Fixture::new().with_entity(EntityKey::LockSensor, lock_sensor());
        let items = fixture.aggregator().attr_section_item_config(AttrSection::Lock);

        assert_eq!(items.len(), AttrSection::Lock.keys().len());
        let vehicle = items.get(AttrKey::DoorLockStatusVehicle).unwrap();
        assert_eq!(vehicle.display_state.as_deref(), Some("lock-unlocked"));
        assert_eq!(vehicle.active, Some(true));

        let front_left = items.get(AttrKey::DoorLockStatusFrontLeft).unwrap();
        assert_eq!(front_left.state.as_deref(), Some("false"));
        assert_eq!(front_left.display_state.as_deref(), Some("door-lock-locked"));
        assert_eq!(front_left.active, Some(false));

        let gas = items.get(AttrKey::DoorLockStatusGas).unwrap();
        assert_eq!(gas.entity_id.as_deref(), Some("sensor.car_lock"));
        assert_eq!(gas.state, None);
    }

    #[test]
    fn test_door_section_includes_charge_flap() {
        let fixture = Fixture::new()
            .with_entity(EntityKey::LockSensor, lock_sensor())
            .with_entity(
                EntityKey::ChargeFlapDcStatus,
                EntityState::new("sensor.car_chargeflapdcstatus", "0"),
            );
        let items = fixture.aggregator().attr_section_item_config(AttrSection::Door);

        let keys: Vec<CarKey> = items.keys().collect();
        assert_eq!(keys.last(), Some(&CarKey::Entity(EntityKey::ChargeFlapDcStatus)));

        let flap = items.get(EntityKey::ChargeFlapDcStatus).unwrap();
        assert_eq!(flap.display_state.as_deref(), Some("charge-flap-open"));
        assert_eq!(flap.active, Some(true));

        let rear_right = items.get(AttrKey::DoorStatusRearRight).unwrap();
        assert_eq!(rear_right.display_state.as_deref(), Some("door-open"));
        assert_eq!(rear_right.active, Some(true));

        let decklid = items.get(AttrKey::DecklidStatus).unwrap();
        assert_eq!(decklid.active, Some(false));
    }

    #[test]
    fn test_window_section_includes_sunroof() {
        let fixture = Fixture::new().with_entity(
            EntityKey::SunroofStatus,
            EntityState::new("sensor.car_sunroofstatus", "3"),
        );
        let items = fixture.aggregator().attr_section_item_config(AttrSection::Window);

        let sunroof = items.get(EntityKey::SunroofStatus).unwrap();
        assert_eq!(sunroof.display_state.as_deref(), Some("sunroof-running"));
        assert_eq!(sunroof.active, Some(true));

        let blind = items.get(AttrKey::WindowStatusRearBlind).unwrap();
        assert_eq!(blind.state, None);
        assert_eq!(blind.entity_id, None);
    }

    #[test]
    fn test_selected_program_is_not_localized() {
        let fixture = Fixture::new().with_entity(EntityKey::RangeElectric, range_electric(None));
        let item = fixture
            .aggregator()
            .entity_config_by_key(DerivedKey::SelectedProgram);

        assert_eq!(item.state.as_deref(), Some("2"));
        assert_eq!(item.display_state.as_deref(), Some("Home"));
        assert_eq!(item.active, None);
    }

    #[test]
    fn test_state_charging_from_range_entity() {
        let charging = Fixture::new().with_entity(EntityKey::RangeElectric, range_electric(Some(true)));
        let item = charging
            .aggregator()
            .entity_config_by_key(DerivedKey::StateCharging);
        assert_eq!(item.name, "Charging");
        assert_eq!(item.state.as_deref(), Some("true"));
        assert_eq!(item.display_state.as_deref(), Some("charging-state-charging"));
        assert_eq!(item.active, Some(true));

        let idle = Fixture::new().with_entity(EntityKey::RangeElectric, range_electric(None));
        let item = idle.aggregator().entity_config_by_key(DerivedKey::StateCharging);
        assert_eq!(item.state.as_deref(), Some("false"));
        assert_eq!(item.active, Some(false));

        let absent = Fixture::new();
        let item = absent
            .aggregator()
            .entity_config_by_key(DerivedKey::StateCharging);
        assert_eq!(item.name, "Charging");
        assert_eq!(item.state, None);
        assert_eq!(item.active, None);
    }

    #[test]
    fn test_sections_are_idempotent() {
        let fixture = Fixture::new()
            .with_entity(EntityKey::LockSensor, lock_sensor())
            .with_entity(EntityKey::RangeElectric, range_electric(Some(true)));
        let aggregator = fixture.aggregator();

        for section in Section::ALL {
            assert_eq!(
                aggregator.section_items(section),
                aggregator.section_items(section),
                "{section}"
            );
        }
    }

    #[test]
    fn test_section_order_is_preserved() {
        let fixture = Fixture::new();
        let items = fixture
            .aggregator()
            .indicator_section_items(IndicatorSection::Base);
        let keys: Vec<CarKey> = items.keys().collect();
        assert_eq!(keys, IndicatorSection::Base.keys());
    }

    #[test]
    fn test_items_serialize_as_ordered_map() {
        let fixture = Fixture::new().with_entity(EntityKey::LockSensor, lock_sensor());
        let items = fixture
            .aggregator()
            .indicator_section_items(IndicatorSection::Base);
        let json = serde_json::to_string(&items).unwrap();

        let lock = json.find("\"lockSensor\"").unwrap();
        let park = json.find("\"parkBrake\"").unwrap();
        assert!(lock < park);
        assert!(json.contains("\"display_state\":\"lock-locked\""));
    }

    #[test]
    fn test_section_names() {
        for section in Section::ALL {
            assert_eq!(section.as_str().parse::<Section>().unwrap(), section);
        }
        assert_eq!("Door".parse::<Section>().unwrap(), AttrSection::Door.into());
        assert!("roof".parse::<Section>().is_err());
        assert_eq!(Section::from(IndicatorSection::Tires).title_id(), "section-tires");
    }

    #[test]
    fn test_name_is_localized_when_available() {
        struct Names;
        impl Localize for Names {
            fn translate(&self, key: &str) -> Option<String> {
                (key == "name-lockSensor").then(|| "Zámek".to_owned())
            }
        }

        let fixture = Fixture::new();
        let aggregator = SectionAggregator::new(
            &fixture.catalog,
            &fixture.entities,
            &fixture.states,
            &fixture.mapper,
            &Names,
            &DefaultFormatter,
        );
        assert_eq!(aggregator.entity_config_by_key(EntityKey::LockSensor).name, "Zámek");

        let plain = SectionAggregator::new(
            &fixture.catalog,
            &fixture.entities,
            &fixture.states,
            &fixture.mapper,
            &NoTranslations,
            &DefaultFormatter,
        );
        assert_eq!(plain.entity_config_by_key(EntityKey::LockSensor).name, "Lock");
    }
}
