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
use crate::keys::CarKey;
use crate::tables::{DisplayTables, StateDisplayTable, TableId};
use std::sync::Arc;

/// Raw and display value of one signal
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct MappedState {
    pub state: Option<String>,
    pub display_state: Option<String>,
    pub active: Option<bool>,
}

/// Turns raw entity or attribute values into localized labels
#[derive(Debug, Clone)]
pub struct StateDisplayMapper {
    catalog: Arc<Catalog>,
    tables: Arc<DisplayTables>,
}

impl StateDisplayMapper {
    pub fn new(catalog: Arc<Catalog>, tables: Arc<DisplayTables>) -> Self {
        Self { catalog, tables }
    }

    /// Table the key's values are looked up in, if it is enumerable
    pub fn table_for(&self, key: CarKey) -> Option<&StateDisplayTable> {
        self.catalog
            .entry(key)
            .table
            .and_then(|id| self.tables.get(id))
    }

    /// Map a raw value of `key`.
    ///
    /// `fallback` runs only when the value is missing from the key's table
    /// (or the key has none). A missing raw value maps to all-`None`.
    pub fn display(
        &self,
        key: CarKey,
        raw: Option<&str>,
        fallback: impl FnOnce(&str) -> String,
    ) -> MappedState {
        map_with(self.table_for(key), raw, fallback)
    }

    /// Same as [`Self::display`] with an explicit table
    pub fn display_with_table(
        &self,
        table: TableId,
        raw: Option<&str>,
        fallback: impl FnOnce(&str) -> String,
    ) -> MappedState {
        map_with(self.tables.get(table), raw, fallback)
    }
}

fn map_with(
    table: Option<&StateDisplayTable>,
    raw: Option<&str>,
    fallback: impl FnOnce(&str) -> String,
) -> MappedState {
    let Some(raw) = raw else {
        return MappedState::default();
    };

    let display_state = table
        .and_then(|table| table.lookup(raw))
        .map_or_else(|| fallback(raw), str::to_owned);

    MappedState {
        state: Some(raw.to_owned()),
        display_state: Some(display_state),
        active: table.and_then(|table| table.activity(raw)),
    }
}
