//! Greedy loadout selection under a budget
//!
//! Slots are filled one at a time in the request's slot order. Each slot takes
//! the best-scoring affordable item the player may wear, and its price comes
//! out of the budget left for the slots after it. The result depends on the
//! slot order.

use std::collections::BTreeSet;

use gearsmith_core::{Discipline, EquipmentSlot, SubStyle};
use serde::{Deserialize, Serialize};
use tracing::debug;

use crate::catalog::{CatalogLookup, PriceLookup};
use crate::damage::{compute_dps, DpsResult};
use crate::loadout::Loadout;
use crate::requirements::{account_permits, eligible, AccountPolicy, PlayerContext};
use crate::scoring::{best_candidate, ScoredCandidate};

/// What to optimize for and under which constraints
#[derive(Clone)]
pub struct SelectionRequest<'a> {
    pub discipline: Discipline,
    pub sub_style: SubStyle,
    /// Coins available for the whole loadout
    pub budget: u64,
    pub player: PlayerContext,
    /// Slots in the order they are filled
    pub slot_order: Vec<EquipmentSlot>,
    /// Slots left empty. The two-handed marker excludes the weapon slot.
    pub excluded_slots: BTreeSet<EquipmentSlot>,
    /// Item names never picked, compared ignoring case and surrounding spaces
    pub excluded_item_names: BTreeSet<String>,
    /// Overrides the player's account mode when set
    pub account_policy: Option<&'a dyn AccountPolicy>,
}

impl<'a> SelectionRequest<'a> {
    /// Default player, every wearable slot in standard order, no exclusions
    pub fn new(discipline: Discipline, sub_style: SubStyle, budget: u64) -> Self {
        Self {
            discipline,
            sub_style,
            budget,
            player: PlayerContext::default(),
            slot_order: EquipmentSlot::wearable().to_vec(),
            excluded_slots: BTreeSet::new(),
            excluded_item_names: BTreeSet::new(),
            account_policy: None,
        }
    }

    pub fn with_player(mut self, player: PlayerContext) -> Self {
        self.player = player;
        self
    }

    pub fn with_slot_order(mut self, slots: impl IntoIterator<Item = EquipmentSlot>) -> Self {
        self.slot_order = slots.into_iter().collect();
        self
    }

    pub fn excluding_slot(mut self, slot: EquipmentSlot) -> Self {
        self.excluded_slots.insert(slot.worn_slot());
        self
    }

    pub fn excluding_item(mut self, name: impl Into<String>) -> Self {
        self.excluded_item_names.insert(name.into());
        self
    }

    pub fn with_account_policy(mut self, policy: &'a dyn AccountPolicy) -> Self {
        self.account_policy = Some(policy);
        self
    }

    /// The policy in force: the override if set, else the player's account mode
    pub fn policy(&self) -> &dyn AccountPolicy {
        match self.account_policy {
            Some(policy) => policy,
            None => &self.player.account_mode,
        }
    }

    /// Slots to fill, in order, without excluded or repeated slots
    pub fn active_slots(&self) -> Vec<EquipmentSlot> {
        let excluded: BTreeSet<EquipmentSlot> =
            self.excluded_slots.iter().map(|slot| slot.worn_slot()).collect();
        let mut seen = BTreeSet::new();
        self.slot_order
            .iter()
            .map(|slot| slot.worn_slot())
            .filter(|slot| !excluded.contains(slot))
            .filter(|slot| seen.insert(*slot))
            .collect()
    }
}

fn name_key(name: &str) -> String {
    name.trim().to_lowercase()
}

/// A selected loadout with what it cost and what it deals
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct LoadoutResult {
    pub loadout: Loadout,
    /// Coins spent during selection, including a shield removed afterwards
    pub total_cost: u64,
    pub budget_remaining: u64,
    pub dps: DpsResult,
}

/// Fill a loadout greedily, slot by slot, within the request's budget.
///
/// Ties on score go to the item seen first in catalog order. A shield picked
/// before a two-handed weapon is removed afterwards; what was paid for it
/// stays spent.
pub fn select_best_loadout<C, P>(catalog: &C, prices: &P, request: &SelectionRequest<'_>) -> LoadoutResult
where
    C: CatalogLookup + ?Sized,
    P: PriceLookup + ?Sized,
{
    let policy = request.policy();
    let excluded: BTreeSet<String> = request
        .excluded_item_names
        .iter()
        .map(|name| name_key(name))
        .collect();

    let mut loadout = Loadout::new();
    let mut remaining = request.budget;

    for slot in request.active_slots() {
        let candidates = catalog
            .items_by_slot(slot)
            .into_iter()
            .filter(|item| eligible(item, &request.player))
            .filter(|item| account_permits(item, policy))
            .filter(|item| !excluded.contains(&name_key(&item.name)))
            .map(|item| ScoredCandidate::evaluate(item, request.discipline, request.sub_style, prices))
            .filter(|candidate| candidate.price <= remaining);

        match best_candidate(candidates) {
            Some(best) => {
                debug!(
                    "{}: picked {} (score {}, {} coins, {} left)",
                    slot,
                    best.item.name,
                    best.score,
                    best.price,
                    remaining - best.price
                );
                remaining -= best.price;
                loadout.place(slot, best.item.clone());
            }
            None => debug!("{}: no affordable eligible item", slot),
        }
    }

    if let Some(shield) = loadout.enforce_two_handed() {
        debug!("Removed {} beside a two-handed weapon", shield.name);
    }

    let total_cost = request.budget - remaining;
    let dps = compute_dps(
        &loadout,
        request.discipline,
        request.sub_style,
        Some(&request.player.skills),
    );

    LoadoutResult {
        loadout,
        total_cost,
        budget_remaining: remaining,
        dps,
    }
}
