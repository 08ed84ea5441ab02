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

use crate::catalog::Catalog;
use crate::keys::EntityKey;
use serde::Serialize;
use std::collections::BTreeMap;
use std::sync::Arc;
use tracing::{debug, warn};
use vehicle_card_types::{EntityDescriptor, RegistryEntry, StateSnapshot};

/// Logical key -> resolved entity. Unresolved keys are absent.
pub type CarEntities = BTreeMap<EntityKey, EntityDescriptor>;

/// More than one registry entry satisfied a rule; the first one was kept
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct ResolutionConflict {
    pub key: EntityKey,
    pub chosen: String,
    pub ignored: Vec<String>,
}

/// Outcome of resolving one device
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize)]
pub struct Resolution {
    pub entities: CarEntities,
    pub conflicts: Vec<ResolutionConflict>,
}

/// Registry entries of one device that can carry a state
pub fn device_entities<'a>(
    device_id: &'a str,
    entries: &'a [RegistryEntry],
) -> impl Iterator<Item = &'a RegistryEntry> + 'a {
    entries
        .iter()
        .filter(move |entry| entry.belongs_to(device_id) && !entry.is_disabled())
}

/// Matches each catalog rule against a device's registry entries
#[derive(Debug, Clone)]
pub struct EntityResolver {
    catalog: Arc<Catalog>,
}

impl EntityResolver {
    pub fn new(catalog: Arc<Catalog>) -> Self {
        Self { catalog }
    }

    /// Resolve all keys for one device.
    ///
    /// First matching entry in input order wins; further matches are
    /// reported as conflicts. Without a device id the result is empty.
    pub fn resolve(
        &self,
        device_id: Option<&str>,
        entries: &[RegistryEntry],
        states: &StateSnapshot,
    ) -> Resolution {
        let Some(device_id) = device_id.filter(|id| !id.is_empty()) else {
            debug!("No device id, nothing to resolve");
            return Resolution::default();
        };

        let candidates: Vec<&RegistryEntry> = device_entities(device_id, entries).collect();
        let mut resolution = Resolution::default();

        for (key, rule) in self.catalog.rules() {
            let mut matches = candidates.iter().filter(|entry| rule.matches(entry));
            let Some(first) = matches.next() else {
                debug!("No entity for '{key}' on device {device_id}");
                continue;
            };

            let ignored: Vec<String> = matches.map(|entry| entry.entity_id.clone()).collect();
            if !ignored.is_empty() {
                warn!(
                    "'{key}' matched {} entities on device {device_id}, using {} and ignoring {:?}",
                    ignored.len() + 1,
                    first.entity_id,
                    ignored
                );
                resolution.conflicts.push(ResolutionConflict {
                    key,
                    chosen: first.entity_id.clone(),
                    ignored,
                });
            }

            resolution.entities.insert(key, describe(first, states));
        }

        debug!(
            "Resolved {}/{} signals for device {device_id} from {} entities",
            resolution.entities.len(),
            EntityKey::ALL.len(),
            candidates.len()
        );
        resolution
    }
}

/// Descriptor enriched from the live state where the registry is silent
fn describe(entry: &RegistryEntry, states: &StateSnapshot) -> EntityDescriptor {
    let state = states.get(&entry.entity_id);
    EntityDescriptor {
        entity_id: entry.entity_id.clone(),
        original_name: entry
            .original_name
            .clone()
            .or_else(|| state.and_then(|s| s.friendly_name()).map(str::to_owned)),
        icon: entry
            .registry_icon()
            .or_else(|| state.and_then(|s| s.icon()))
            .map(str::to_owned),
        unit: state
            .and_then(|s| s.unit_of_measurement())
            .map(str::to_owned),
    }
}
