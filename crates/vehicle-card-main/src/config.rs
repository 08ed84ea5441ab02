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

use anyhow::{Context, Result};
use serde::{Deserialize, Serialize};
use std::collections::BTreeMap;
use std::path::{Path, PathBuf};
use tracing::info;
use vehicle_card_core::{Catalog, EntityKey, MatchRule};
use vehicle_card_i18n::Language;

/// Application configuration
#[derive(Debug, Clone, Default, Serialize, Deserialize)]
pub struct AppConfig {
    #[serde(default)]
    pub card: CardConfig,

    #[serde(default)]
    pub source: SourceConfig,

    /// Match rule overrides for integrations with other naming conventions,
    /// e.g. `[rules.odometer] prefix = "sensor." suffix = "_mileage"`
    #[serde(default)]
    pub rules: BTreeMap<EntityKey, MatchRule>,
}

/// What the card shows
#[derive(Debug, Clone, Default, Serialize, Deserialize)]
pub struct CardConfig {
    /// HA device id of the vehicle
    #[serde(default)]
    pub device_id: Option<String>,

    /// Display language ("en", "cs", "de" or the full name)
    #[serde(default)]
    pub language: Language,
}

#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum SourceKind {
    /// Registry and states from JSON dumps
    #[default]
    File,
    /// Registry from a dump, states from the REST API
    HomeAssistant,
}

/// Where registry records and states come from
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct SourceConfig {
    #[serde(default)]
    pub kind: SourceKind,

    /// Result of the `config/entity_registry/list` websocket command
    #[serde(default = "default_registry_path")]
    pub registry_path: PathBuf,

    /// Result of `GET /api/states`, used by the file source
    #[serde(default = "default_states_path")]
    pub states_path: PathBuf,

    /// Falls back to `HA_BASE_URL`
    #[serde(default)]
    pub ha_base_url: Option<String>,

    /// Falls back to `HA_TOKEN`
    #[serde(default)]
    pub ha_token: Option<String>,
}

fn default_registry_path() -> PathBuf {
    PathBuf::from("entity_registry.json")
}

fn default_states_path() -> PathBuf {
    PathBuf::from("states.json")
}

impl Default for SourceConfig {
    fn default() -> Self {
        Self {
            kind: SourceKind::default(),
            registry_path: default_registry_path(),
            states_path: default_states_path(),
            ha_base_url: None,
            ha_token: None,
        }
    }
}

impl AppConfig {
    /// Load from a TOML (or `.json`) file
    pub fn from_file(path: &Path) -> Result<Self> {
        let content = std::fs::read_to_string(path)
            .with_context(|| format!("Failed to read {}", path.display()))?;

        let config: AppConfig = if path.extension().is_some_and(|ext| ext == "json") {
            serde_json::from_str(&content)
                .with_context(|| format!("Failed to parse {}", path.display()))?
        } else {
            toml::from_str(&content).with_context(|| format!("Failed to parse {}", path.display()))?
        };

        info!("✅ Loaded configuration from {}", path.display());
        Ok(config)
    }

    /// Explicit path, else `config.toml` in the working directory when it
    /// exists, else defaults
    pub fn load(path: Option<&Path>) -> Result<Self> {
        match path {
            Some(path) => Self::from_file(path),
            None => {
                let fallback = Path::new("config.toml");
                if fallback.exists() {
                    Self::from_file(fallback)
                } else {
                    info!("No config.toml found, using defaults");
                    Ok(Self::default())
                }
            }
        }
    }

    pub fn validate(&self) -> Result<()> {
        if let Some(device_id) = &self.card.device_id
            && device_id.trim().is_empty()
        {
            anyhow::bail!("card.device_id must not be empty");
        }

        for (key, rule) in &self.rules {
            match rule {
                MatchRule::ByName { name } => {
                    if name.trim().is_empty() {
                        anyhow::bail!("Rule for '{key}' has an empty name");
                    }
                }
                MatchRule::Pattern { suffix, .. } => {
                    if suffix.is_empty() {
                        anyhow::bail!("Rule for '{key}' has an empty suffix");
                    }
                }
            }
        }

        if self.source.kind == SourceKind::File && self.source.states_path.as_os_str().is_empty()
        {
            anyhow::bail!("source.states_path is required for the file source");
        }
        if self.source.registry_path.as_os_str().is_empty() {
            anyhow::bail!("source.registry_path must not be empty");
        }

        Ok(())
    }

    /// Standard catalog with the configured rule overrides applied
    pub fn catalog(&self) -> Catalog {
        self.rules
            .iter()
            .fold(Catalog::standard(), |catalog, (key, rule)| {
                catalog.with_rule(*key, rule.clone())
            })
    }
}
