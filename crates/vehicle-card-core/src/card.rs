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
use crate::formatter::StateFormatter;
use crate::keys::CarKey;
use crate::localize::Localize;
use crate::mapper::StateDisplayMapper;
use crate::resolver::{CarEntities, EntityResolver, Resolution, ResolutionConflict};
use crate::sections::{
    AttrSection, CarItemDisplay, IndicatorSection, Section, SectionAggregator, SectionItems,
};
use crate::tables::DisplayTables;
use parking_lot::RwLock;
use std::fmt;
use std::sync::Arc;
use tracing::{debug, info};
use vehicle_card_types::{RegistryEntry, StateSnapshot};

pub type SharedLocalizer = Arc<dyn Localize + Send + Sync>;
pub type SharedFormatter = Arc<dyn StateFormatter + Send + Sync>;

/// Immutable snapshot of everything the card displays.
///
/// Cloning is cheap; every field is shared.
#[derive(Clone)]
pub struct CardView {
    catalog: Arc<Catalog>,
    device_id: Option<Arc<str>>,
    resolution: Arc<Resolution>,
    states: Arc<StateSnapshot>,
    mapper: StateDisplayMapper,
    localizer: SharedLocalizer,
    formatter: SharedFormatter,
}

impl CardView {
    pub fn device_id(&self) -> Option<&str> {
        self.device_id.as_deref()
    }

    pub fn entities(&self) -> &CarEntities {
        &self.resolution.entities
    }

    pub fn conflicts(&self) -> &[ResolutionConflict] {
        &self.resolution.conflicts
    }

    pub fn states(&self) -> &StateSnapshot {
        &self.states
    }

    pub fn localizer(&self) -> &SharedLocalizer {
        &self.localizer
    }

    pub fn aggregator(&self) -> SectionAggregator<'_> {
        SectionAggregator::new(
            &self.catalog,
            &self.resolution.entities,
            &self.states,
            &self.mapper,
            self.localizer.as_ref(),
            self.formatter.as_ref(),
        )
    }

    pub fn entity_config_by_key(&self, key: impl Into<CarKey>) -> CarItemDisplay {
        self.aggregator().entity_config_by_key(key)
    }

    pub fn indicator_section_items(&self, section: IndicatorSection) -> SectionItems {
        self.aggregator().indicator_section_items(section)
    }

    pub fn attr_section_item_config(&self, section: AttrSection) -> SectionItems {
        self.aggregator().attr_section_item_config(section)
    }

    pub fn section_items(&self, section: Section) -> SectionItems {
        self.aggregator().section_items(section)
    }

    /// Localized section heading
    pub fn section_title(&self, section: Section) -> String {
        self.localizer.localize(&section.title_id())
    }
}

impl fmt::Debug for CardView {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("CardView")
            .field("device_id", &self.device_id)
            .field("entities", &self.resolution.entities.len())
            .field("conflicts", &self.resolution.conflicts.len())
            .field("states", &self.states.len())
            .finish_non_exhaustive()
    }
}

/// Card state shared between the update path and readers.
///
/// Updates build a new [`CardView`] and swap it in; readers holding an
/// older view keep a consistent snapshot.
pub struct VehicleCard {
    resolver: EntityResolver,
    view: RwLock<Arc<CardView>>,
}

impl VehicleCard {
    pub fn new(
        catalog: Arc<Catalog>,
        localizer: SharedLocalizer,
        formatter: SharedFormatter,
    ) -> Self {
        let tables = Arc::new(DisplayTables::build(localizer.as_ref()));
        let view = CardView {
            mapper: StateDisplayMapper::new(Arc::clone(&catalog), tables),
            catalog: Arc::clone(&catalog),
            device_id: None,
            resolution: Arc::new(Resolution::default()),
            states: Arc::new(StateSnapshot::new()),
            localizer,
            formatter,
        };

        Self {
            resolver: EntityResolver::new(catalog),
            view: RwLock::new(Arc::new(view)),
        }
    }

    /// Current snapshot
    pub fn view(&self) -> Arc<CardView> {
        Arc::clone(&*self.view.read())
    }

    /// Resolve the entity set of a (new) device. Returns the conflicts
    /// found while resolving.
    pub fn set_device(
        &self,
        device_id: Option<&str>,
        entries: &[RegistryEntry],
    ) -> Vec<ResolutionConflict> {
        let mut guard = self.view.write();
        let resolution = self.resolver.resolve(device_id, entries, &guard.states);
        info!(
            "🚗 Device {} resolved: {} entities, {} conflicts",
            device_id.unwrap_or("<none>"),
            resolution.entities.len(),
            resolution.conflicts.len()
        );

        let conflicts = resolution.conflicts.clone();
        let mut next = CardView::clone(&guard);
        next.device_id = device_id.map(Arc::from);
        next.resolution = Arc::new(resolution);
        *guard = Arc::new(next);
        conflicts
    }

    /// Replace the live state snapshot
    pub fn update_states(&self, states: StateSnapshot) {
        let mut guard = self.view.write();
        debug!("State snapshot updated: {} entities", states.len());
        let mut next = CardView::clone(&guard);
        next.states = Arc::new(states);
        *guard = Arc::new(next);
    }

    /// Switch locale: all tables are rebuilt with the new localizer
    pub fn set_localizer(&self, localizer: SharedLocalizer) {
        let tables = Arc::new(DisplayTables::build(localizer.as_ref()));
        let mut guard = self.view.write();
        let mut next = CardView::clone(&guard);
        next.mapper = StateDisplayMapper::new(Arc::clone(&next.catalog), tables);
        next.localizer = localizer;
        *guard = Arc::new(next);
        info!("🌐 Display tables rebuilt for new locale");
    }
}

impl fmt::Debug for VehicleCard {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("VehicleCard")
            .field("view", &*self.view.read())
            .finish_non_exhaustive()
    }
}
