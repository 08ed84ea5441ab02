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

//! Where the card gets its registry records and live states from.

use crate::client::HomeAssistantClient;
use crate::errors::{HaError, HaResult};
use async_trait::async_trait;
use serde::Deserialize;
use std::path::{Path, PathBuf};
use std::sync::Arc;
use tracing::{debug, info};
use vehicle_card_types::{EntityState, RegistryEntry, StateSnapshot};

/// Provider of the two inputs entity resolution needs
#[async_trait]
pub trait EntitySource: Send + Sync {
    /// Full entity registry; device filtering happens in the resolver
    async fn registry_entries(&self) -> HaResult<Vec<RegistryEntry>>;

    /// Current states of all entities
    async fn states(&self) -> HaResult<StateSnapshot>;
}

/// A registry dump is either the bare list or the websocket reply
/// (`{"id": 1, "type": "result", "success": true, "result": [...]}`)
#[derive(Deserialize)]
#[serde(untagged)]
enum RegistryDump {
    List(Vec<RegistryEntry>),
    Reply { result: Vec<RegistryEntry> },
}

async fn read_file(path: &Path) -> HaResult<String> {
    tokio::fs::read_to_string(path)
        .await
        .map_err(|source| HaError::FileError {
            path: path.to_path_buf(),
            source,
        })
}

/// Read a registry dump from disk
pub async fn load_registry(path: &Path) -> HaResult<Vec<RegistryEntry>> {
    let content = read_file(path).await?;
    let entries = match serde_json::from_str(&content)? {
        RegistryDump::List(entries) | RegistryDump::Reply { result: entries } => entries,
    };
    debug!("📂 Loaded {} registry entries from {}", entries.len(), path.display());
    Ok(entries)
}

/// Read a `/api/states` dump from disk
pub async fn load_states(path: &Path) -> HaResult<StateSnapshot> {
    let content = read_file(path).await?;
    let states: Vec<EntityState> = serde_json::from_str(&content)?;
    debug!("📂 Loaded {} states from {}", states.len(), path.display());
    Ok(StateSnapshot::from(states))
}

/// Registry and states both read from JSON files
#[derive(Debug, Clone)]
pub struct FileSource {
    registry_path: PathBuf,
    states_path: PathBuf,
}

impl FileSource {
    pub fn new(registry_path: impl Into<PathBuf>, states_path: impl Into<PathBuf>) -> Self {
        Self {
            registry_path: registry_path.into(),
            states_path: states_path.into(),
        }
    }
}

#[async_trait]
impl EntitySource for FileSource {
    async fn registry_entries(&self) -> HaResult<Vec<RegistryEntry>> {
        load_registry(&self.registry_path).await
    }

    async fn states(&self) -> HaResult<StateSnapshot> {
        load_states(&self.states_path).await
    }
}

/// Live states from the REST API. The REST API does not expose the entity
/// registry, so that still comes from a dump.
#[derive(Debug, Clone)]
pub struct HaSource {
    client: Arc<HomeAssistantClient>,
    registry_path: PathBuf,
}

impl HaSource {
    pub fn new(client: Arc<HomeAssistantClient>, registry_path: impl Into<PathBuf>) -> Self {
        Self {
            client,
            registry_path: registry_path.into(),
        }
    }
}

#[async_trait]
impl EntitySource for HaSource {
    async fn registry_entries(&self) -> HaResult<Vec<RegistryEntry>> {
        load_registry(&self.registry_path).await
    }

    async fn states(&self) -> HaResult<StateSnapshot> {
        let states = self.client.get_all_states().await?;
        info!("🔄 Fetched {} states from {}", states.len(), self.client.base_url());
        Ok(StateSnapshot::from(states))
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use mockito::Server;
    use serde_json::json;
    use std::io::Write;
    use tempfile::NamedTempFile;

    fn write_json(value: &serde_json::Value) -> NamedTempFile {
        let mut file = NamedTempFile::new().unwrap();
        write!(file, "{value}").unwrap();
        file
    }

    fn registry_json() -> serde_json::Value {
        json!([
            {
                "entity_id": "sensor.car_lock",
                "unique_id": "WDD123_lock",
                "device_id": "dev-1",
                "original_name": "Lock",
                "platform": "mbapi2020",
                "has_entity_name": true
            },
            {
                "entity_id": "sensor.car_soc",
                "device_id": "dev-1",
                "original_name": "State of Charge",
                "disabled_by": "user"
            }
        ])
    }

    #[tokio::test]
    async fn test_file_source() {
        let registry = write_json(&registry_json());
        let states = write_json(&json!([
            {"entity_id": "sensor.car_lock", "state": "2", "attributes": {}}
        ]));

        let source = FileSource::new(registry.path(), states.path());
        let entries = source.registry_entries().await.unwrap();
        assert_eq!(entries.len(), 2);
        assert_eq!(entries[0].unique_id.as_deref(), Some("WDD123_lock"));
        assert!(entries[1].is_disabled());

        let snapshot = source.states().await.unwrap();
        assert_eq!(snapshot.get("sensor.car_lock").unwrap().state, "2");
    }

    #[tokio::test]
    async fn test_websocket_reply_dump() {
        let registry = write_json(&json!({
            "id": 3,
            "type": "result",
            "success": true,
            "result": registry_json()
        }));

        let entries = load_registry(registry.path()).await.unwrap();
        assert_eq!(entries.len(), 2);
    }

    #[tokio::test]
    async fn test_missing_file() {
        let result = load_registry(Path::new("/nonexistent/registry.json")).await;
        assert!(matches!(result, Err(HaError::FileError { .. })));
    }

    #[tokio::test]
    async fn test_invalid_json() {
        let mut file = NamedTempFile::new().unwrap();
        write!(file, "not json").unwrap();
        let result = load_states(file.path()).await;
        assert!(matches!(result, Err(HaError::JsonError(_))));
    }

    #[tokio::test]
    async fn test_ha_source_states() {
        let mut server = Server::new_async().await;
        let mock = server
            .mock("GET", "/api/states")
            .with_status(200)
            .with_body(
                json!([{"entity_id": "sensor.car_sunroofstatus", "state": "3", "attributes": {}}])
                    .to_string(),
            )
            .create_async()
            .await;

        let registry = write_json(&registry_json());
        let client = Arc::new(HomeAssistantClient::new(server.url(), "token").unwrap());
        let source = HaSource::new(client, registry.path());

        let snapshot = source.states().await.unwrap();
        assert_eq!(snapshot.len(), 1);
        assert_eq!(source.registry_entries().await.unwrap().len(), 2);
        mock.assert_async().await;
    }
}
