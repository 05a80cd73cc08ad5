//! Core types used throughout Gearsmith

use std::fmt;
use std::str::FromStr;

use serde::{Deserialize, Serialize};

use crate::error::CoreError;
use crate::style::{Discipline, SubStyle};
use crate::ticks::Ticks;

/// Lowest skill level; an item requirement at this level is no requirement
pub const MIN_LEVEL: u32 = 1;
/// Highest skill level
pub const MAX_LEVEL: u32 = 99;

/// Catalog identifier of an item
#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Hash, Serialize, Deserialize)]
#[serde(transparent)]
pub struct ItemId(pub u32);

impl fmt::Display for ItemId {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "#{}", self.0)
    }
}

/// Equipment positions
///
/// `TwoHanded` is the catalog marker for weapons that need both hands. Items
/// carrying it are worn in the weapon slot and always clear the shield slot.
#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Hash, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum EquipmentSlot {
    Head,
    Cape,
    Neck,
    Ammo,
    Weapon,
    Shield,
    Body,
    Legs,
    #[serde(alias = "gloves")]
    Hands,
    #[serde(alias = "boots")]
    Feet,
    Ring,
    #[serde(alias = "2h")]
    TwoHanded,
}

impl EquipmentSlot {
    /// The eleven wearable slots, in default selection order
    pub fn wearable() -> &'static [EquipmentSlot] {
        &[
            Self::Head,
            Self::Cape,
            Self::Neck,
            Self::Ammo,
            Self::Weapon,
            Self::Shield,
            Self::Body,
            Self::Legs,
            Self::Hands,
            Self::Feet,
            Self::Ring,
        ]
    }

    /// Lowercase display name
    pub fn name(self) -> &'static str {
        match self {
            Self::Head => "head",
            Self::Cape => "cape",
            Self::Neck => "neck",
            Self::Ammo => "ammo",
            Self::Weapon => "weapon",
            Self::Shield => "shield",
            Self::Body => "body",
            Self::Legs => "legs",
            Self::Hands => "hands",
            Self::Feet => "feet",
            Self::Ring => "ring",
            Self::TwoHanded => "2h",
        }
    }

    /// The wearable slot an item of this slot occupies
    pub fn worn_slot(self) -> EquipmentSlot {
        match self {
            Self::TwoHanded => Self::Weapon,
            other => other,
        }
    }
}

impl fmt::Display for EquipmentSlot {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.name())
    }
}

impl FromStr for EquipmentSlot {
    type Err = CoreError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s.trim().to_ascii_lowercase().as_str() {
            "head" => Ok(Self::Head),
            "cape" => Ok(Self::Cape),
            "neck" => Ok(Self::Neck),
            "ammo" => Ok(Self::Ammo),
            "weapon" => Ok(Self::Weapon),
            "shield" => Ok(Self::Shield),
            "body" => Ok(Self::Body),
            "legs" => Ok(Self::Legs),
            "hands" | "gloves" => Ok(Self::Hands),
            "feet" | "boots" => Ok(Self::Feet),
            "ring" => Ok(Self::Ring),
            "2h" | "two_handed" | "two-handed" => Ok(Self::TwoHanded),
            _ => Err(CoreError::UnknownSlot(s.to_string())),
        }
    }
}

/// Levels in the six combat skills.
///
/// Used both for a player's levels and for an item's minimum requirements.
/// Missing fields deserialize to level 1, i.e. "no requirement".
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(default)]
pub struct SkillLevels {
    pub attack: u32,
    pub strength: u32,
    pub defence: u32,
    pub ranged: u32,
    pub magic: u32,
    pub prayer: u32,
}

impl Default for SkillLevels {
    fn default() -> Self {
        Self::uniform(MIN_LEVEL)
    }
}

impl SkillLevels {
    /// Every skill at the same level
    pub fn uniform(level: u32) -> Self {
        Self {
            attack: level,
            strength: level,
            defence: level,
            ranged: level,
            magic: level,
            prayer: level,
        }
    }

    /// Every skill at 99
    pub fn maxed() -> Self {
        Self::uniform(MAX_LEVEL)
    }

    fn named(&self) -> [(&'static str, u32); 6] {
        [
            ("attack", self.attack),
            ("strength", self.strength),
            ("defence", self.defence),
            ("ranged", self.ranged),
            ("magic", self.magic),
            ("prayer", self.prayer),
        ]
    }

    /// Whether every level here is at least the corresponding level in `required`
    pub fn meets(&self, required: &SkillLevels) -> bool {
        self.named()
            .iter()
            .zip(required.named().iter())
            .all(|((_, have), (_, need))| have >= need)
    }

    /// Reject levels outside `1..=99`
    pub fn validate(&self) -> Result<(), CoreError> {
        for (skill, level) in self.named() {
            if !(MIN_LEVEL..=MAX_LEVEL).contains(&level) {
                return Err(CoreError::LevelOutOfRange {
                    skill,
                    level,
                    min: MIN_LEVEL,
                    max: MAX_LEVEL,
                });
            }
        }
        Ok(())
    }
}

/// Attack and strength-type bonus that drive one discipline
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq)]
pub struct OffensiveBonus {
    /// Accuracy-side bonus (stab/slash/crush, ranged attack or magic attack)
    pub attack: i32,
    /// Damage-side bonus (melee strength, ranged strength or magic damage)
    pub strength: i32,
}

/// Flat equipment bonuses. Every field defaults to 0.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(default)]
pub struct CombatBonuses {
    pub attack_stab: i32,
    pub attack_slash: i32,
    pub attack_crush: i32,
    pub attack_ranged: i32,
    pub attack_magic: i32,
    pub melee_strength: i32,
    pub ranged_strength: i32,
    pub magic_damage: i32,
    pub prayer: i32,
    pub defence_stab: i32,
    pub defence_slash: i32,
    pub defence_crush: i32,
    pub defence_magic: i32,
    pub defence_ranged: i32,
}

impl CombatBonuses {
    /// Highest of the three melee attack bonuses
    pub fn best_melee_attack(&self) -> i32 {
        self.attack_stab.max(self.attack_slash).max(self.attack_crush)
    }

    /// Melee attack bonus for a sub-style. `None` for an unsupported style.
    pub fn melee_attack(&self, sub_style: SubStyle) -> Option<i32> {
        match sub_style {
            SubStyle::Stab => Some(self.attack_stab),
            SubStyle::Slash => Some(self.attack_slash),
            SubStyle::Crush => Some(self.attack_crush),
            SubStyle::Unspecified => Some(self.best_melee_attack()),
            SubStyle::Unsupported => None,
        }
    }

    /// The attack/strength pair a discipline uses.
    ///
    /// Prayer has no offensive pair and yields `None`, as do unsupported
    /// disciplines and unsupported melee sub-styles.
    pub fn offensive(&self, discipline: Discipline, sub_style: SubStyle) -> Option<OffensiveBonus> {
        match discipline {
            Discipline::Melee => Some(OffensiveBonus {
                attack: self.melee_attack(sub_style)?,
                strength: self.melee_strength,
            }),
            Discipline::Ranged => Some(OffensiveBonus {
                attack: self.attack_ranged,
                strength: self.ranged_strength,
            }),
            Discipline::Magic => Some(OffensiveBonus {
                attack: self.attack_magic,
                strength: self.magic_damage,
            }),
            Discipline::Prayer | Discipline::Unsupported => None,
        }
    }
}

/// Weapon-only metadata
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(default)]
pub struct WeaponStats {
    /// Attack interval; `None` falls back to [`WeaponStats::DEFAULT_ATTACK_SPEED`]
    pub attack_speed: Option<Ticks>,
    /// Occupies both hands, forcing the shield slot empty
    pub two_handed: bool,
}

impl WeaponStats {
    pub const DEFAULT_ATTACK_SPEED: Ticks = Ticks(4);

    pub fn new(attack_speed: u32, two_handed: bool) -> Self {
        Self {
            attack_speed: Some(Ticks(attack_speed)),
            two_handed,
        }
    }

    pub fn attack_speed_or_default(&self) -> Ticks {
        self.attack_speed.unwrap_or(Self::DEFAULT_ATTACK_SPEED)
    }
}

/// Gates an item places on who may wear it
#[derive(Debug, Clone, Default, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(default)]
pub struct ItemRequirements {
    /// Minimum skill levels (level 1 means no requirement)
    pub skills: SkillLevels,
    /// Quest that must be completed
    pub quest: Option<String>,
    /// Achievement that must be completed
    pub achievement: Option<String>,
}

/// An immutable catalog entry.
///
/// Prices are deliberately absent: they come from a price lookup at
/// evaluation time.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Item {
    pub id: ItemId,
    pub name: String,
    pub slot: EquipmentSlot,
    #[serde(default)]
    pub requirements: ItemRequirements,
    #[serde(default)]
    pub bonuses: CombatBonuses,
    /// Present only for weapons
    #[serde(default)]
    pub weapon: Option<WeaponStats>,
    /// Obtainable without the market; read by restricted account modes
    #[serde(default = "default_self_obtainable")]
    pub self_obtainable: bool,
}

fn default_self_obtainable() -> bool {
    true
}

impl Item {
    /// A bare item with no requirements and zero bonuses
    pub fn new(id: u32, name: impl Into<String>, slot: EquipmentSlot) -> Self {
        let weapon = match slot {
            EquipmentSlot::Weapon => Some(WeaponStats::default()),
            EquipmentSlot::TwoHanded => Some(WeaponStats {
                two_handed: true,
                ..Default::default()
            }),
            _ => None,
        };
        Self {
            id: ItemId(id),
            name: name.into(),
            slot,
            requirements: ItemRequirements::default(),
            bonuses: CombatBonuses::default(),
            weapon,
            self_obtainable: true,
        }
    }

    /// Slot this item occupies when worn
    pub fn worn_slot(&self) -> EquipmentSlot {
        self.slot.worn_slot()
    }

    /// Whether wearing this item empties the shield slot
    pub fn is_two_handed(&self) -> bool {
        self.slot == EquipmentSlot::TwoHanded || self.weapon.is_some_and(|w| w.two_handed)
    }

    /// Attack interval, defaulting to 4 ticks when unset
    pub fn attack_speed(&self) -> Ticks {
        self.weapon
            .map(|w| w.attack_speed_or_default())
            .unwrap_or(WeaponStats::DEFAULT_ATTACK_SPEED)
    }
}
