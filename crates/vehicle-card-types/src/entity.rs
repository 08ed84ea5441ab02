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

use serde::{Deserialize, Serialize};

/// One record of the Home Assistant entity registry
/// (result item of the `config/entity_registry/list` websocket command)
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct RegistryEntry {
    pub entity_id: String,

    #[serde(default)]
    pub unique_id: Option<String>,

    #[serde(default)]
    pub original_name: Option<String>,

    #[serde(default)]
    pub device_id: Option<String>,

    /// "user" or "integration" when hidden
    #[serde(default)]
    pub hidden_by: Option<String>,

    /// "user", "integration", "config_entry" or "device" when disabled
    #[serde(default)]
    pub disabled_by: Option<String>,

    /// User-set icon
    #[serde(default)]
    pub icon: Option<String>,

    /// Integration default icon
    #[serde(default)]
    pub original_icon: Option<String>,
}

impl RegistryEntry {
    /// Minimal entry, mostly useful for tests and fixtures
    pub fn new(entity_id: impl Into<String>) -> Self {
        Self {
            entity_id: entity_id.into(),
            unique_id: None,
            original_name: None,
            device_id: None,
            hidden_by: None,
            disabled_by: None,
            icon: None,
            original_icon: None,
        }
    }

    #[must_use]
    pub fn with_unique_id(mut self, unique_id: impl Into<String>) -> Self {
        self.unique_id = Some(unique_id.into());
        self
    }

    #[must_use]
    pub fn with_original_name(mut self, name: impl Into<String>) -> Self {
        self.original_name = Some(name.into());
        self
    }

    #[must_use]
    pub fn with_device_id(mut self, device_id: impl Into<String>) -> Self {
        self.device_id = Some(device_id.into());
        self
    }

    /// Disabled entities never receive states from HA
    pub fn is_disabled(&self) -> bool {
        self.disabled_by.is_some()
    }

    /// Registry icon, preferring the user override
    pub fn registry_icon(&self) -> Option<&str> {
        self.icon.as_deref().or(self.original_icon.as_deref())
    }

    /// Whether this entry is attached to the given device.
    /// Helpers and template sensors carry no device and never belong to one.
    pub fn belongs_to(&self, device_id: &str) -> bool {
        self.device_id.as_deref() == Some(device_id)
    }
}

/// Lightweight descriptor of a resolved entity
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct EntityDescriptor {
    pub entity_id: String,

    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub original_name: Option<String>,

    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub icon: Option<String>,

    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub unit: Option<String>,
}

impl EntityDescriptor {
    pub fn new(entity_id: impl Into<String>) -> Self {
        Self {
            entity_id: entity_id.into(),
            original_name: None,
            icon: None,
            unit: None,
        }
    }

    /// Entity domain, e.g. `sensor` for `sensor.car_odometer`
    pub fn domain(&self) -> &str {
        self.entity_id
            .split_once('.')
            .map_or(self.entity_id.as_str(), |(domain, _)| domain)
    }
}
