//! Gearsmith Core - Domain types shared by the loadout engine
//!
//! This crate provides the foundational types used throughout Gearsmith:
//! - Items with requirements, combat bonuses and weapon metadata
//! - Equipment slots and skill levels
//! - Combat disciplines and melee sub-styles
//! - Game tick timing
//! - Common error types

pub mod error;
pub mod style;
pub mod ticks;
pub mod types;

pub use error::CoreError;
pub use style::{Discipline, SubStyle};
pub use ticks::{Ticks, TICK_SECONDS};
pub use types::{
    CombatBonuses, EquipmentSlot, Item, ItemId, ItemRequirements, OffensiveBonus, SkillLevels,
    WeaponStats, MAX_LEVEL, MIN_LEVEL,
};
