//! Item scoring
//!
//! A single number per item and discipline, used to rank items within a slot.
//! The weights express how much one point of strength/damage bonus is worth
//! relative to one point of attack bonus, and are tied to the DPS model.

use gearsmith_core::{Discipline, Item, SubStyle};

use crate::catalog::PriceLookup;

/// Weight of one melee strength point against one melee attack point
pub const MELEE_STRENGTH_WEIGHT: f64 = 4.0;
/// Weight of one ranged strength point against one ranged attack point
pub const RANGED_STRENGTH_WEIGHT: f64 = 4.0;
/// Weight of one magic damage point against one magic attack point
pub const MAGIC_DAMAGE_WEIGHT: f64 = 10.0;
/// Weight of one prayer bonus point
pub const PRAYER_WEIGHT: f64 = 10.0;

/// Combat value of `item` for a discipline.
///
/// Melee uses the chosen sub-style's attack bonus, or the best of the three
/// when unspecified. Unsupported disciplines and unsupported melee
/// sub-styles score 0.
pub fn score(item: &Item, discipline: Discipline, sub_style: SubStyle) -> f64 {
    let b = &item.bonuses;
    if discipline == Discipline::Prayer {
        return PRAYER_WEIGHT * b.prayer as f64;
    }
    let Some(offence) = b.offensive(discipline, sub_style) else {
        return 0.0;
    };
    let weight = match discipline {
        Discipline::Melee => MELEE_STRENGTH_WEIGHT,
        Discipline::Ranged => RANGED_STRENGTH_WEIGHT,
        Discipline::Magic => MAGIC_DAMAGE_WEIGHT,
        Discipline::Prayer | Discipline::Unsupported => return 0.0,
    };
    weight * offence.strength as f64 + offence.attack as f64
}

/// An item evaluated for one selection or ranking pass
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct ScoredCandidate<'a> {
    pub item: &'a Item,
    pub score: f64,
    pub price: u64,
}

impl<'a> ScoredCandidate<'a> {
    pub fn evaluate<P: PriceLookup + ?Sized>(
        item: &'a Item,
        discipline: Discipline,
        sub_style: SubStyle,
        prices: &P,
    ) -> Self {
        Self {
            item,
            score: score(item, discipline, sub_style),
            price: prices.price(item.id),
        }
    }
}

/// The highest-scoring candidate. On equal scores the first one seen wins.
pub fn best_candidate<'a>(
    candidates: impl IntoIterator<Item = ScoredCandidate<'a>>,
) -> Option<ScoredCandidate<'a>> {
    candidates.into_iter().fold(None, |best, candidate| match best {
        Some(current) if current.score >= candidate.score => Some(current),
        _ => Some(candidate),
    })
}
