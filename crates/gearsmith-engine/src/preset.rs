//! Named selection presets
//!
//! A preset pairs a budget tier with a combat style, so callers can ask for
//! "a mid-budget ranged setup" without spelling out numbers.

use std::fmt;
use std::str::FromStr;

use gearsmith_core::{Discipline, SubStyle};
use serde::{Deserialize, Serialize};

use crate::catalog::{CatalogLookup, PriceLookup};
use crate::error::EngineError;
use crate::requirements::PlayerContext;
use crate::selector::{select_best_loadout, LoadoutResult, SelectionRequest};

/// Budget tiers
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum PresetTier {
    Budget,
    Mid,
    High,
    Max,
}

impl PresetTier {
    pub fn all() -> &'static [PresetTier] {
        &[Self::Budget, Self::Mid, Self::High, Self::Max]
    }

    /// Coins available at this tier
    pub fn budget(self) -> u64 {
        match self {
            Self::Budget => 1_000_000,
            Self::Mid => 10_000_000,
            Self::High => 100_000_000,
            // Largest stack of coins a player can hold
            Self::Max => 2_147_483_647,
        }
    }

    pub fn name(self) -> &'static str {
        match self {
            Self::Budget => "budget",
            Self::Mid => "mid",
            Self::High => "high",
            Self::Max => "max",
        }
    }
}

impl fmt::Display for PresetTier {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.name())
    }
}

impl FromStr for PresetTier {
    type Err = EngineError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s.trim().to_ascii_lowercase().as_str() {
            "budget" | "low" => Ok(Self::Budget),
            "mid" | "medium" => Ok(Self::Mid),
            "high" => Ok(Self::High),
            "max" | "maxed" => Ok(Self::Max),
            _ => Err(EngineError::InvalidPresetTier(s.to_string())),
        }
    }
}

/// Parse a style name such as `ranged` or `melee-slash`.
fn parse_style(name: &str) -> Result<(Discipline, SubStyle), EngineError> {
    let style = match name.trim().to_ascii_lowercase().as_str() {
        "melee" => (Discipline::Melee, SubStyle::Unspecified),
        "melee-stab" => (Discipline::Melee, SubStyle::Stab),
        "melee-slash" => (Discipline::Melee, SubStyle::Slash),
        "melee-crush" => (Discipline::Melee, SubStyle::Crush),
        "ranged" => (Discipline::Ranged, SubStyle::Unspecified),
        "magic" => (Discipline::Magic, SubStyle::Unspecified),
        "prayer" => (Discipline::Prayer, SubStyle::Unspecified),
        _ => return Err(EngineError::InvalidPresetStyle(name.to_string())),
    };
    Ok(style)
}

/// A budget tier and combat style
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub struct Preset {
    pub tier: PresetTier,
    pub discipline: Discipline,
    pub sub_style: SubStyle,
}

impl Preset {
    pub fn new(tier: PresetTier, discipline: Discipline, sub_style: SubStyle) -> Self {
        Self {
            tier,
            discipline,
            sub_style,
        }
    }

    /// Build a preset from its tier and style names.
    ///
    /// Unknown names are rejected rather than mapped to an unsupported style.
    pub fn from_names(tier: &str, style: &str) -> Result<Self, EngineError> {
        let tier = tier.parse::<PresetTier>()?;
        let (discipline, sub_style) = parse_style(style)?;
        Ok(Self::new(tier, discipline, sub_style))
    }

    pub fn budget(&self) -> u64 {
        self.tier.budget()
    }

    /// Style name in the form accepted by [`Preset::from_names`]
    pub fn style_name(&self) -> String {
        match (self.discipline, self.sub_style) {
            (Discipline::Melee, SubStyle::Stab | SubStyle::Slash | SubStyle::Crush) => {
                format!("melee-{}", self.sub_style)
            }
            (discipline, _) => discipline.to_string(),
        }
    }

    /// Selection request for this preset with default slot order and no exclusions
    pub fn request<'a>(&self, player: PlayerContext) -> SelectionRequest<'a> {
        SelectionRequest::new(self.discipline, self.sub_style, self.budget()).with_player(player)
    }
}

impl fmt::Display for Preset {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{} {}", self.tier, self.style_name())
    }
}

/// Run the selector with a preset's budget and style.
pub fn select_preset_loadout<C, P>(
    catalog: &C,
    prices: &P,
    preset: &Preset,
    player: PlayerContext,
) -> LoadoutResult
where
    C: CatalogLookup + ?Sized,
    P: PriceLookup + ?Sized,
{
    select_best_loadout(catalog, prices, &preset.request(player))
}
