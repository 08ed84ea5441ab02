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

use crate::localize::Localize;
use serde_json::Value;
use vehicle_card_types::EntityState;

/// Fallback formatting for values no state table covers.
///
/// Implementations must be total: any defined state yields a string.
pub trait StateFormatter {
    fn format_state(&self, state: &EntityState, localizer: &dyn Localize) -> String;

    /// `None` when the attribute is absent or null
    fn format_attribute(
        &self,
        state: &EntityState,
        attribute: &str,
        localizer: &dyn Localize,
    ) -> Option<String>;
}

/// Formatting in the spirit of HA's frontend: well-known states are
/// translated, numbers are trimmed and suffixed with their unit, anything
/// else is humanized.
#[derive(Debug, Clone, Copy, Default)]
pub struct DefaultFormatter;

impl StateFormatter for DefaultFormatter {
    fn format_state(&self, state: &EntityState, localizer: &dyn Localize) -> String {
        match state.state.as_str() {
            "unavailable" => localizer.localize("state-unavailable"),
            "unknown" => localizer.localize("state-unknown"),
            "on" => localizer.localize("state-on"),
            "off" => localizer.localize("state-off"),
            "home" => localizer.localize("state-home"),
            "not_home" => localizer.localize("state-not-home"),
            raw => match raw.parse::<f64>() {
                Ok(number) if number.is_finite() => {
                    with_unit(&format_number(number), state.unit_of_measurement())
                }
                _ => humanize(raw),
            },
        }
    }

    fn format_attribute(
        &self,
        state: &EntityState,
        attribute: &str,
        localizer: &dyn Localize,
    ) -> Option<String> {
        match state.attribute(attribute)? {
            Value::Null => None,
            Value::Bool(true) => Some(localizer.localize("value-yes")),
            Value::Bool(false) => Some(localizer.localize("value-no")),
            Value::Number(n) => Some(n.as_f64().map_or_else(|| n.to_string(), format_number)),
            Value::String(s) => Some(s.clone()),
            other @ (Value::Array(_) | Value::Object(_)) => Some(other.to_string()),
        }
    }
}

/// At most two decimals, trailing zeros dropped
fn format_number(value: f64) -> String {
    if value.fract() == 0.0 {
        return format!("{value:.0}");
    }
    let fixed = format!("{value:.2}");
    fixed.trim_end_matches('0').trim_end_matches('.').to_owned()
}

fn with_unit(value: &str, unit: Option<&str>) -> String {
    match unit {
        Some("%") => format!("{value}%"),
        Some(unit) if !unit.is_empty() => format!("{value} {unit}"),
        _ => value.to_owned(),
    }
}

/// `charging_active` -> `Charging active`
fn humanize(raw: &str) -> String {
    let spaced = raw.replace('_', " ");
    let mut chars = spaced.chars();
    match chars.next() {
        Some(first) => first.to_uppercase().chain(chars).collect(),
        None => spaced,
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::localize::NoTranslations;
    use serde_json::json;

    fn format(state: &EntityState) -> String {
        DefaultFormatter.format_state(state, &NoTranslations)
    }

    #[test]
    fn test_numbers_with_units() {
        let odometer =
            EntityState::new("sensor.car_odometer", "12345.0").with_attribute("unit_of_measurement", "km");
        assert_eq!(format(&odometer), "12345 km");

        let fuel = EntityState::new("sensor.car_fuel", "42.456")
            .with_attribute("unit_of_measurement", "%");
        assert_eq!(format(&fuel), "42.46%");

        let plain = EntityState::new("sensor.x", "2.50");
        assert_eq!(format(&plain), "2.5");
    }

    #[test]
    fn test_well_known_states_are_translated() {
        assert_eq!(format(&EntityState::new("binary_sensor.x", "on")), "state-on");
        assert_eq!(
            format(&EntityState::new("sensor.x", "unavailable")),
            "state-unavailable"
        );
        assert_eq!(
            format(&EntityState::new("device_tracker.car", "not_home")),
            "state-not-home"
        );
    }

    #[test]
    fn test_other_states_are_humanized() {
        assert_eq!(format(&EntityState::new("sensor.x", "charging_active")), "Charging active");
        assert_eq!(format(&EntityState::new("sensor.x", "")), "");
    }

    #[test]
    fn test_attributes() {
        let state = EntityState::new("sensor.car_lock", "2")
            .with_attribute("flag", true)
            .with_attribute("level", 3.0)
            .with_attribute("label", "Home")
            .with_attribute("missing", Value::Null)
            .with_attribute("list", json!([1, 2]));
        let fmt = |name: &str| DefaultFormatter.format_attribute(&state, name, &NoTranslations);

        assert_eq!(fmt("flag").as_deref(), Some("value-yes"));
        assert_eq!(fmt("level").as_deref(), Some("3"));
        assert_eq!(fmt("label").as_deref(), Some("Home"));
        assert_eq!(fmt("missing"), None);
        assert_eq!(fmt("absent"), None);
        assert_eq!(fmt("list").as_deref(), Some("[1,2]"));
    }
}
