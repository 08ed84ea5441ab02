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

use anyhow::Result;
use clap::ValueEnum;
use serde::Serialize;
use std::collections::BTreeMap;
use std::fmt::Write;
use vehicle_card_core::{CardView, EntityResolver, Section, SectionItems};
use vehicle_card_types::{RegistryEntry, StateSnapshot};

#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, ValueEnum)]
pub enum OutputFormat {
    #[default]
    Text,
    Json,
}

#[derive(Serialize)]
struct SectionOutput<'a> {
    section: &'a str,
    title: String,
    items: SectionItems,
}

pub fn render(view: &CardView, sections: &[Section], format: OutputFormat) -> Result<String> {
    match format {
        OutputFormat::Text => render_text(view, sections),
        OutputFormat::Json => {
            let output: Vec<SectionOutput<'_>> = sections
                .iter()
                .map(|&section| SectionOutput {
                    section: section.as_str(),
                    title: view.section_title(section),
                    items: view.section_items(section),
                })
                .collect();
            Ok(serde_json::to_string_pretty(&output)?)
        }
    }
}

fn render_text(view: &CardView, sections: &[Section]) -> Result<String> {
    let mut out = String::new();
    for (idx, &section) in sections.iter().enumerate() {
        if idx > 0 {
            out.push('\n');
        }
        writeln!(out, "{}", view.section_title(section))?;

        let items = view.section_items(section);
        let width = items.iter().map(|item| item.name.chars().count()).max().unwrap_or(0);
        for item in &items {
            let marker = match item.active {
                Some(true) => "●",
                Some(false) => "○",
                None => " ",
            };
            let value = item.display_state.as_deref().unwrap_or("-");
            writeln!(out, "  {marker} {:<width$}  {value}", item.name)?;
        }
    }
    Ok(out)
}

/// Devices found in a registry dump, with the number of signals each
/// resolves to
pub fn render_devices(
    resolver: &EntityResolver,
    entries: &[RegistryEntry],
    states: &StateSnapshot,
) -> Result<String> {
    let mut devices: BTreeMap<&str, usize> = BTreeMap::new();
    for entry in entries {
        if let Some(device_id) = entry.device_id.as_deref() {
            *devices.entry(device_id).or_default() += 1;
        }
    }

    let mut out = String::new();
    for (device_id, entity_count) in devices {
        let resolved = resolver.resolve(Some(device_id), entries, states).entities.len();
        writeln!(out, "{device_id}  {entity_count} entities, {resolved} signals")?;
    }
    Ok(out)
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::sync::Arc;
    use vehicle_card_core::{
        Catalog, DefaultFormatter, IndicatorSection, NoTranslations, VehicleCard,
    };
    use vehicle_card_types::EntityState;

    fn card() -> VehicleCard {
        let card = VehicleCard::new(
            Arc::new(Catalog::standard()),
            Arc::new(NoTranslations),
            Arc::new(DefaultFormatter),
        );
        card.update_states(StateSnapshot::from(vec![EntityState::new(
            "sensor.car_lock",
            "2",
        )]));
        card.set_device(
            Some("dev-1"),
            &[RegistryEntry::new("sensor.car_lock").with_device_id("dev-1")],
        );
        card
    }

    #[test]
    fn test_text_output() {
        let view = card().view();
        let text = render(&view, &[IndicatorSection::Base.into()], OutputFormat::Text).unwrap();

        let mut lines = text.lines();
        assert_eq!(lines.next(), Some("section-base"));
        let lock = lines.next().unwrap();
        assert!(lock.starts_with("  ○ Lock"));
        assert!(lock.ends_with("lock-locked"));
        assert!(text.contains("Parking brake"));
    }

    #[test]
    fn test_json_output() {
        let view = card().view();
        let json = render(
            &view,
            &[IndicatorSection::Base.into(), IndicatorSection::Services.into()],
            OutputFormat::Json,
        )
        .unwrap();
        let value: serde_json::Value = serde_json::from_str(&json).unwrap();

        assert_eq!(value[0]["section"], "base");
        assert_eq!(value[0]["items"]["lockSensor"]["state"], "2");
        assert_eq!(value[0]["items"]["lockSensor"]["active"], false);
        assert_eq!(value[1]["items"]["titleServices"]["display_state"], "Services");
    }

    #[test]
    fn test_device_listing() {
        let entries = vec![
            RegistryEntry::new("sensor.car_lock").with_device_id("dev-1"),
            RegistryEntry::new("sensor.car_odometer").with_device_id("dev-1"),
            RegistryEntry::new("sensor.car_weather").with_device_id("dev-1"),
            RegistryEntry::new("light.kitchen").with_device_id("dev-2"),
            RegistryEntry::new("sensor.garage_door_lock"),
        ];
        let resolver = EntityResolver::new(Arc::new(Catalog::standard()));
        let listing = render_devices(&resolver, &entries, &StateSnapshot::new()).unwrap();

        assert_eq!(
            listing,
            "dev-1  3 entities, 2 signals\ndev-2  1 entities, 0 signals\n"
        );
    }
}
