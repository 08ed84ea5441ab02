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

use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};
use serde_json::{Map, Value};
use std::collections::HashMap;

/// Live state of one entity as pushed by HA
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct EntityState {
    pub entity_id: String,
    pub state: String,
    #[serde(default)]
    pub attributes: Map<String, Value>,
    #[serde(default)]
    pub last_changed: Option<DateTime<Utc>>,
    #[serde(default)]
    pub last_updated: Option<DateTime<Utc>>,
}

impl EntityState {
    pub fn new(entity_id: impl Into<String>, state: impl Into<String>) -> Self {
        Self {
            entity_id: entity_id.into(),
            state: state.into(),
            attributes: Map::new(),
            last_changed: None,
            last_updated: None,
        }
    }

    #[must_use]
    pub fn with_attribute(mut self, name: impl Into<String>, value: impl Into<Value>) -> Self {
        self.attributes.insert(name.into(), value.into());
        self
    }

    pub fn attribute(&self, name: &str) -> Option<&Value> {
        self.attributes.get(name)
    }

    /// Attribute value coerced to its string form, see [`stringify_value`]
    pub fn attribute_string(&self, name: &str) -> Option<String> {
        self.attribute(name).and_then(stringify_value)
    }

    pub fn unit_of_measurement(&self) -> Option<&str> {
        self.attribute("unit_of_measurement").and_then(Value::as_str)
    }

    pub fn friendly_name(&self) -> Option<&str> {
        self.attribute("friendly_name").and_then(Value::as_str)
    }

    pub fn icon(&self) -> Option<&str> {
        self.attribute("icon").and_then(Value::as_str)
    }
}

/// Coerce a dynamic attribute value into the string form used by state tables.
///
/// Numbers keep their JSON spelling (`7` -> `"7"`), booleans become
/// `"true"`/`"false"`, `null` yields `None`.
pub fn stringify_value(value: &Value) -> Option<String> {
    match value {
        Value::Null => None,
        Value::String(s) => Some(s.clone()),
        Value::Bool(b) => Some(b.to_string()),
        Value::Number(n) => Some(n.to_string()),
        Value::Array(_) | Value::Object(_) => Some(value.to_string()),
    }
}

/// Snapshot of all known entity states, keyed by entity id
#[derive(Debug, Clone, Default, PartialEq)]
pub struct StateSnapshot {
    states: HashMap<String, EntityState>,
}

impl StateSnapshot {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn get(&self, entity_id: &str) -> Option<&EntityState> {
        self.states.get(entity_id)
    }

    /// Insert or replace a state, returning the previous one
    pub fn insert(&mut self, state: EntityState) -> Option<EntityState> {
        self.states.insert(state.entity_id.clone(), state)
    }

    pub fn len(&self) -> usize {
        self.states.len()
    }

    pub fn is_empty(&self) -> bool {
        self.states.is_empty()
    }

    pub fn iter(&self) -> impl Iterator<Item = &EntityState> {
        self.states.values()
    }
}

impl FromIterator<EntityState> for StateSnapshot {
    fn from_iter<I: IntoIterator<Item = EntityState>>(iter: I) -> Self {
        Self {
            states: iter
                .into_iter()
                .map(|state| (state.entity_id.clone(), state))
                .collect(),
        }
    }
}

impl From<Vec<EntityState>> for StateSnapshot {
    fn from(states: Vec<EntityState>) -> Self {
        states.into_iter().collect()
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use serde_json::json;

    #[test]
    fn test_stringify_value() {
        assert_eq!(stringify_value(&json!(7)), Some("7".to_owned()));
        assert_eq!(stringify_value(&json!(2.5)), Some("2.5".to_owned()));
        assert_eq!(stringify_value(&json!(false)), Some("false".to_owned()));
        assert_eq!(stringify_value(&json!("open")), Some("open".to_owned()));
        assert_eq!(stringify_value(&Value::Null), None);
    }

    #[test]
    fn test_entity_state_deserialize_ha_payload() {
        let json = r#"{
            "entity_id": "sensor.car_odometer",
            "state": "12345",
            "attributes": {"unit_of_measurement": "km", "friendly_name": "Car Odometer"},
            "last_changed": "2025-03-01T10:00:00.123456+00:00",
            "last_updated": "2025-03-01T10:00:00.123456+00:00"
        }"#;
        let state: EntityState = serde_json::from_str(json).unwrap();
        assert_eq!(state.state, "12345");
        assert_eq!(state.unit_of_measurement(), Some("km"));
        assert_eq!(state.friendly_name(), Some("Car Odometer"));
        assert!(state.last_changed.is_some());
    }

    #[test]
    fn test_snapshot_replaces_by_entity_id() {
        let mut snapshot: StateSnapshot = vec![EntityState::new("sensor.a", "1")].into();
        let previous = snapshot.insert(EntityState::new("sensor.a", "2"));
        assert_eq!(previous.map(|s| s.state), Some("1".to_owned()));
        assert_eq!(snapshot.len(), 1);
        assert_eq!(snapshot.get("sensor.a").map(|s| s.state.as_str()), Some("2"));
    }
}
