//! Gearsmith - Budgeted loadout recommendations and DPS estimates
//!
//! Reads a catalog snapshot and answers selection, upgrade and DPS requests
//! as JSON on stdout. Logs go to stderr.

mod settings;

use std::path::{Path, PathBuf};

use anyhow::{bail, Context, Result};
use clap::{Parser, Subcommand};
use serde::Serialize;
use tracing::{debug, info};
use tracing_subscriber::{EnvFilter, FmtSubscriber};

use gearsmith_core::{Discipline, SubStyle};
use gearsmith_engine::{
    compute_dps, rank_upgrades, select_best_loadout, select_preset_loadout, ItemCatalog, Loadout,
    PlayerContext, Preset, PresetTier, PriceLookup, SelectionRequest,
};
use gearsmith_integration::{
    load_catalog, load_json, DpsRequestPayload, SelectionRequestPayload, UpgradeRequestPayload,
};

use settings::GearsmithSettings;

#[derive(Parser)]
#[command(name = "gearsmith", version, about = "Budgeted loadout recommendations and DPS estimates")]
struct Cli {
    /// Catalog snapshot (JSON). Overrides `[data] catalog` in the settings file
    #[arg(long, global = true)]
    catalog: Option<PathBuf>,

    /// Settings file (default: ~/.config/gearsmith/settings.toml)
    #[arg(long, global = true)]
    config: Option<PathBuf>,

    /// Log filter, e.g. `debug` or `gearsmith_engine=debug`
    #[arg(long, global = true)]
    log: Option<String>,

    #[command(subcommand)]
    command: Commands,
}

#[derive(Subcommand)]
enum Commands {
    /// Pick the best loadout within a budget
    Select {
        /// Selection request file (JSON). Flags are ignored when given
        request: Option<PathBuf>,

        /// Budget in coins
        #[arg(long)]
        budget: Option<u64>,

        /// melee, ranged, magic or prayer
        #[arg(long)]
        discipline: Option<String>,

        /// stab, slash or crush
        #[arg(long)]
        sub_style: Option<String>,

        /// Preset tier (budget, mid, high, max). Requires --style
        #[arg(long, requires = "style")]
        preset: Option<String>,

        /// Preset style, e.g. `melee-crush` or `ranged`
        #[arg(long, requires = "preset")]
        style: Option<String>,
    },
    /// Rank per-slot upgrades for an existing loadout
    Upgrades {
        /// Upgrade request file (JSON)
        request: PathBuf,
    },
    /// Estimate the DPS of a loadout
    Dps {
        /// DPS request file (JSON)
        request: PathBuf,
    },
    /// Search the catalog by name
    Find {
        name: String,

        #[arg(long, default_value_t = 10)]
        limit: usize,
    },
    /// List preset tiers and their budgets
    Presets,
    /// Write the current settings to the settings file
    InitConfig,
}

#[derive(Serialize)]
#[serde(rename_all = "camelCase")]
struct FoundItem<'a> {
    id: u32,
    name: &'a str,
    slot: &'a str,
    price: u64,
}

#[derive(Serialize)]
struct PresetInfo {
    tier: &'static str,
    budget: u64,
}

fn main() -> Result<()> {
    let cli = Cli::parse();

    let settings = match &cli.config {
        Some(path) => GearsmithSettings::load_from(path),
        None => GearsmithSettings::load(),
    };
    init_logging(cli.log.as_deref().unwrap_or(&settings.logging.level), cli.log.is_some())?;

    match cli.command {
        Commands::Select {
            request,
            budget,
            discipline,
            sub_style,
            preset,
            style,
        } => {
            let catalog = open_catalog(cli.catalog.as_deref(), &settings)?;
            match (request, preset, style) {
                (Some(path), _, _) => cmd_select_file(&catalog, &path),
                (None, Some(tier), Some(style)) => cmd_select_preset(&catalog, &settings, &tier, &style),
                _ => cmd_select(&catalog, &settings, budget, discipline, sub_style),
            }
        }
        Commands::Upgrades { request } => {
            let catalog = open_catalog(cli.catalog.as_deref(), &settings)?;
            cmd_upgrades(&catalog, &request)
        }
        Commands::Dps { request } => {
            let catalog = open_catalog(cli.catalog.as_deref(), &settings)?;
            cmd_dps(&catalog, &request)
        }
        Commands::Find { name, limit } => {
            let catalog = open_catalog(cli.catalog.as_deref(), &settings)?;
            cmd_find(&catalog, &name, limit)
        }
        Commands::Presets => cmd_presets(),
        Commands::InitConfig => cmd_init_config(&settings, cli.config.as_deref()),
    }
}

/// An explicit `--log` beats `RUST_LOG`, which beats the settings file
fn init_logging(level: &str, explicit: bool) -> Result<()> {
    let filter = if explicit {
        EnvFilter::try_new(level)?
    } else {
        EnvFilter::try_from_default_env().or_else(|_| EnvFilter::try_new(level))?
    };

    let subscriber = FmtSubscriber::builder()
        .with_env_filter(filter)
        .with_target(false)
        .with_writer(std::io::stderr)
        .finish();
    tracing::subscriber::set_global_default(subscriber).context("Failed to set subscriber")
}

fn open_catalog(flag: Option<&Path>, settings: &GearsmithSettings) -> Result<ItemCatalog> {
    let Some(path) = flag.or(settings.data.catalog.as_deref()) else {
        bail!("No catalog snapshot: pass --catalog or set `catalog` under [data] in the settings file");
    };
    load_catalog(path).with_context(|| format!("Failed to load catalog from {}", path.display()))
}

fn print_json<T: Serialize>(value: &T) -> Result<()> {
    println!("{}", serde_json::to_string_pretty(value)?);
    Ok(())
}

fn cmd_select_file(catalog: &ItemCatalog, path: &Path) -> Result<()> {
    let payload: SelectionRequestPayload = load_json(path)?;
    let request = payload.to_request()?;
    info!(
        "Selecting {} {} loadout with budget {}",
        request.discipline, request.sub_style, request.budget
    );
    print_json(&select_best_loadout(catalog, catalog, &request))
}

fn cmd_select_preset(
    catalog: &ItemCatalog,
    settings: &GearsmithSettings,
    tier: &str,
    style: &str,
) -> Result<()> {
    let preset = Preset::from_names(tier, style)?;
    info!("Selecting preset {} (budget {})", preset, preset.budget());
    let player = PlayerContext::default().with_account_mode(settings.selection.account_mode);
    print_json(&select_preset_loadout(catalog, catalog, &preset, player))
}

fn cmd_select(
    catalog: &ItemCatalog,
    settings: &GearsmithSettings,
    budget: Option<u64>,
    discipline: Option<String>,
    sub_style: Option<String>,
) -> Result<()> {
    let defaults = &settings.selection;
    let discipline = discipline.map_or(defaults.discipline, Discipline::from);
    let sub_style = sub_style.map_or(defaults.sub_style, SubStyle::from);
    let budget = budget.unwrap_or(defaults.budget);

    let request = SelectionRequest::new(discipline, sub_style, budget)
        .with_player(PlayerContext::default().with_account_mode(defaults.account_mode));
    info!("Selecting {} {} loadout with budget {}", discipline, sub_style, budget);
    print_json(&select_best_loadout(catalog, catalog, &request))
}

fn cmd_upgrades(catalog: &ItemCatalog, path: &Path) -> Result<()> {
    let payload: UpgradeRequestPayload = load_json(path)?;
    let request = payload.to_request()?;
    let plan = rank_upgrades(catalog, catalog, &payload.current_loadout, &request);
    info!(
        "{} upgrades found, total cost {}",
        plan.recommended_upgrades.len(),
        plan.total_upgrade_cost
    );
    print_json(&plan)
}

fn cmd_dps(catalog: &ItemCatalog, path: &Path) -> Result<()> {
    let payload: DpsRequestPayload = load_json(path)?;
    let skills = payload.stats.map(|s| s.to_skills()).transpose()?;
    let loadout = Loadout::resolve(&payload.loadout, catalog);
    debug!("Resolved {} of the requested items", loadout.len());
    print_json(&compute_dps(&loadout, payload.discipline, payload.sub_style, skills.as_ref()))
}

fn cmd_find(catalog: &ItemCatalog, name: &str, limit: usize) -> Result<()> {
    let found: Vec<FoundItem> = catalog
        .search_by_name(name, limit)
        .into_iter()
        .map(|item| FoundItem {
            id: item.id.0,
            name: &item.name,
            slot: item.slot.name(),
            price: catalog.price(item.id),
        })
        .collect();
    if found.is_empty() {
        info!("No items match '{}'", name);
    }
    print_json(&found)
}

fn cmd_presets() -> Result<()> {
    let presets: Vec<PresetInfo> = PresetTier::all()
        .iter()
        .map(|tier| PresetInfo {
            tier: tier.name(),
            budget: tier.budget(),
        })
        .collect();
    print_json(&presets)
}

fn cmd_init_config(settings: &GearsmithSettings, path: Option<&Path>) -> Result<()> {
    let written = match path {
        Some(path) => {
            settings.save_to(path)?;
            path.to_path_buf()
        }
        None => settings.save()?,
    };
    println!("{}", written.display());
    Ok(())
}
