//! Damage model
//!
//! Expected damage per second of a loadout for one discipline. The model is
//! deterministic: max hit and accuracy come from the player's levels and the
//! summed equipment bonuses, and DPS is the expected hit over the weapon's
//! attack interval.

use gearsmith_core::{Discipline, SkillLevels, SubStyle, Ticks};
use serde::{Deserialize, Serialize};

use crate::loadout::Loadout;

/// Added to a skill level to get its effective level
pub const EFFECTIVE_LEVEL_BONUS: i64 = 8;

/// Constant term of the accuracy denominator
pub const ACCURACY_DEFENCE_TERM: f64 = 100.0;

/// Magic max hit used for every magic loadout.
///
/// Spells are not modelled, so magic DPS is only comparable between
/// loadouts through accuracy and attack speed.
pub const MAGIC_PLACEHOLDER_MAX_HIT: u32 = 30;

/// Output of [`compute_dps`]. Fractional values are rounded to 2 decimals.
#[derive(Debug, Clone, Copy, Default, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct DpsResult {
    pub dps: f64,
    pub max_hit: u32,
    pub attack_speed_ticks: u32,
    pub accuracy_percent: f64,
    pub total_attack_bonus: i32,
    pub total_primary_strength_bonus: i32,
}

impl DpsResult {
    /// The all-zero result, returned when there is nothing to compute
    pub fn zero() -> Self {
        Self::default()
    }

    /// Attack interval in real-time seconds
    pub fn attack_speed_seconds(&self) -> f64 {
        Ticks(self.attack_speed_ticks).as_seconds()
    }
}

/// Max hit for an effective level of `level + 8` and a strength-type bonus.
/// Never negative.
pub fn max_hit(level: u32, strength_bonus: i64) -> u32 {
    let effective = i64::from(level) + EFFECTIVE_LEVEL_BONUS;
    let raw = effective
        .saturating_mul(strength_bonus.saturating_add(64))
        .saturating_add(320)
        .div_euclid(640);
    u32::try_from(raw.max(0)).unwrap_or(u32::MAX)
}

/// Hit chance in `0.0..=1.0` for an offensive level and attack bonus.
pub fn accuracy(level: u32, attack_bonus: i64) -> f64 {
    let roll = (i64::from(level) + EFFECTIVE_LEVEL_BONUS).saturating_add(attack_bonus) as f64;
    if roll <= 0.0 {
        return 0.0;
    }
    (roll / (roll + ACCURACY_DEFENCE_TERM)).min(1.0)
}

/// Expected DPS of `loadout`.
///
/// Without player stats every skill is taken as 99. An empty weapon slot,
/// prayer, an unsupported discipline or an unsupported melee sub-style all
/// give [`DpsResult::zero`].
pub fn compute_dps(
    loadout: &Loadout,
    discipline: Discipline,
    sub_style: SubStyle,
    player_stats: Option<&SkillLevels>,
) -> DpsResult {
    let Some(weapon) = loadout.weapon() else {
        return DpsResult::zero();
    };
    let Some((attack_bonus, strength_bonus)) = offensive_totals(loadout, discipline, sub_style)
    else {
        return DpsResult::zero();
    };
    let stats = player_stats.copied().unwrap_or_else(SkillLevels::maxed);

    let (hit, offence_level) = match discipline {
        Discipline::Melee => (max_hit(stats.strength, strength_bonus), stats.attack),
        Discipline::Ranged => (max_hit(stats.ranged, strength_bonus), stats.ranged),
        Discipline::Magic => (MAGIC_PLACEHOLDER_MAX_HIT, stats.magic),
        Discipline::Prayer | Discipline::Unsupported => return DpsResult::zero(),
    };
    let chance = accuracy(offence_level, attack_bonus);

    let speed = weapon.attack_speed();
    let seconds = speed.as_seconds();
    let dps = if seconds > 0.0 {
        (f64::from(hit) / 2.0) * chance / seconds
    } else {
        0.0
    };

    DpsResult {
        dps: round2(dps),
        max_hit: hit,
        attack_speed_ticks: speed.get(),
        accuracy_percent: round2(chance * 100.0),
        total_attack_bonus: saturate(attack_bonus),
        total_primary_strength_bonus: saturate(strength_bonus),
    }
}

/// Summed attack and strength-type bonus over occupied slots. Melee
/// without a sub-style takes each item's best melee attack.
///
/// Sums are kept in `i64`: eleven `i32` bonuses cannot overflow it.
fn offensive_totals(
    loadout: &Loadout,
    discipline: Discipline,
    sub_style: SubStyle,
) -> Option<(i64, i64)> {
    let mut attack = 0i64;
    let mut strength = 0i64;
    for (_, item) in loadout.iter_equipped() {
        let offence = item.bonuses.offensive(discipline, sub_style)?;
        attack += i64::from(offence.attack);
        strength += i64::from(offence.strength);
    }
    Some((attack, strength))
}

fn saturate(total: i64) -> i32 {
    total.clamp(i64::from(i32::MIN), i64::from(i32::MAX)) as i32
}

pub(crate) fn round2(value: f64) -> f64 {
    (value * 100.0).round() / 100.0
}
