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

mod config;
mod render;

use anyhow::{Context, Result};
use clap::Parser;
use std::path::PathBuf;
use std::sync::Arc;
use tracing::{info, warn};
use tracing_subscriber::FmtSubscriber;

use config::{AppConfig, SourceKind};
use render::OutputFormat;
use vehicle_card_core::{DefaultFormatter, EntityResolver, Section, VehicleCard};
use vehicle_card_ha::{EntitySource, FileSource, HaSource, HomeAssistantClient};
use vehicle_card_i18n::{I18n, Language};

#[derive(Parser, Debug)]
#[command(name = "vehicle-card", version)]
#[command(about = "Resolve a vehicle's Home Assistant entities and print its card sections", long_about = None)]
struct Cli {
    /// Configuration file (TOML, or JSON with a .json extension)
    #[arg(short, long)]
    config: Option<PathBuf>,

    /// HA device id of the vehicle, overrides the configuration
    #[arg(short, long)]
    device: Option<String>,

    /// Display language: en, cs or de
    #[arg(short, long)]
    language: Option<Language>,

    /// Sections to print (repeatable); all sections when omitted
    #[arg(short, long)]
    section: Vec<Section>,

    #[arg(short, long, value_enum, default_value_t = OutputFormat::Text)]
    format: OutputFormat,

    /// List the devices of the registry dump instead of printing a card
    #[arg(long)]
    list_devices: bool,
}

fn build_source(config: &AppConfig) -> Result<Box<dyn EntitySource>> {
    let source = &config.source;
    Ok(match source.kind {
        SourceKind::File => {
            info!(
                "📂 Reading registry from {} and states from {}",
                source.registry_path.display(),
                source.states_path.display()
            );
            Box::new(FileSource::new(&source.registry_path, &source.states_path))
        }
        SourceKind::HomeAssistant => {
            info!("🏠 Initializing HA client from configuration...");
            let client = HomeAssistantClient::from_config(
                source.ha_base_url.clone(),
                source.ha_token.clone(),
            )?;
            Box::new(HaSource::new(Arc::new(client), &source.registry_path))
        }
    })
}

#[tokio::main]
async fn main() -> Result<()> {
    let cli = Cli::parse();

    // Respects RUST_LOG; logs go to stderr so stdout stays parseable
    let subscriber = FmtSubscriber::builder()
        .with_env_filter(
            tracing_subscriber::EnvFilter::try_from_default_env()
                .unwrap_or_else(|_| tracing_subscriber::EnvFilter::new("info")),
        )
        .with_writer(std::io::stderr)
        .finish();
    tracing::subscriber::set_global_default(subscriber)
        .context("Failed to install tracing subscriber")?;

    let mut config = AppConfig::load(cli.config.as_deref())?;
    if let Some(device) = cli.device {
        config.card.device_id = Some(device);
    }
    if let Some(language) = cli.language {
        config.card.language = language;
    }
    config.validate().context("Invalid configuration")?;

    let source = build_source(&config)?;
    let (entries, states) = tokio::try_join!(source.registry_entries(), source.states())
        .context("Failed to load entities")?;
    info!("📋 {} registry entries, {} states", entries.len(), states.len());

    let catalog = Arc::new(config.catalog());

    if cli.list_devices {
        let resolver = EntityResolver::new(catalog);
        print!("{}", render::render_devices(&resolver, &entries, &states)?);
        return Ok(());
    }

    let i18n = I18n::new(config.card.language)
        .with_context(|| format!("Failed to load {} translations", config.card.language))?;
    let card = VehicleCard::new(catalog, Arc::new(i18n), Arc::new(DefaultFormatter));
    card.update_states(states);

    let device_id = config.card.device_id.as_deref();
    if device_id.is_none() {
        warn!("⚠️ No device id configured, use --device or --list-devices");
    }
    for conflict in card.set_device(device_id, &entries) {
        warn!(
            "⚠️ {} is ambiguous: using {}, ignoring {}",
            conflict.key,
            conflict.chosen,
            conflict.ignored.join(", ")
        );
    }

    let sections = if cli.section.is_empty() {
        Section::ALL.to_vec()
    } else {
        cli.section
    };
    println!("{}", render::render(&card.view(), &sections, cli.format)?);
    Ok(())
}
