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

//! Entity resolution and display mapping for a vehicle dashboard card.

pub mod card;
pub mod catalog;
pub mod formatter;
pub mod keys;
pub mod localize;
pub mod mapper;
pub mod resolver;
pub mod sections;
pub mod tables;

pub use card::{CardView, SharedFormatter, SharedLocalizer, VehicleCard};
pub use catalog::{Catalog, CatalogEntry, MatchRule};
pub use formatter::{DefaultFormatter, StateFormatter};
pub use keys::{AttrGroup, AttrKey, CarKey, DerivedKey, EntityKey, UnknownKey};
pub use localize::{Localize, NoTranslations};
pub use mapper::{MappedState, StateDisplayMapper};
pub use resolver::{CarEntities, EntityResolver, Resolution, ResolutionConflict, device_entities};
pub use sections::{
    AttrSection, CarItemDisplay, IndicatorSection, Section, SectionAggregator, SectionItems,
};
pub use tables::{Activity, DisplayTables, StateDisplayTable, StateTable, TableId, TableKind};
