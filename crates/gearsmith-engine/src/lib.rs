//! Gearsmith Engine - Loadout optimization and damage modeling
//!
//! Every operation here is a pure function over a read-only item catalog and
//! price lookup:
//! - [`eligible`]: can a player wear an item
//! - [`score`]: scalar combat value of an item for a discipline
//! - [`compute_dps`]: expected damage per second of a loadout
//! - [`select_best_loadout`]: greedy budgeted per-slot selection
//! - [`rank_upgrades`]: per-slot replacements ranked by DPS gained per coin

pub mod catalog;
pub mod damage;
pub mod error;
pub mod loadout;
pub mod preset;
pub mod requirements;
pub mod scoring;
pub mod selector;
pub mod upgrades;

pub use catalog::{CatalogLookup, ItemCatalog, PriceLookup, PriceTable};
pub use damage::{compute_dps, DpsResult, MAGIC_PLACEHOLDER_MAX_HIT};
pub use error::EngineError;
pub use loadout::{Loadout, LoadoutIds};
pub use preset::{select_preset_loadout, Preset, PresetTier};
pub use requirements::{account_permits, eligible, AccountMode, AccountPolicy, PlayerContext};
pub use scoring::{score, ScoredCandidate};
pub use selector::{select_best_loadout, LoadoutResult, SelectionRequest};
pub use upgrades::{rank_upgrades, RankedUpgrade, UpgradePlan, UpgradeRecommendation, UpgradeRequest};
