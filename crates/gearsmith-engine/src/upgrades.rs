//! Upgrade path ranking
//!
//! For a worn loadout, finds per-slot replacements that score higher than the
//! current item and ranks them by DPS gained per coin spent.
//!
//! The budget here caps each slot's upgrade cost on its own. It is not shared
//! between slots, so the summed cost of the recommendations may exceed it.

use std::cmp::Ordering;

use gearsmith_core::{Discipline, EquipmentSlot, ItemId, SubStyle};
use serde::{Deserialize, Serialize};
use tracing::debug;

use crate::catalog::{CatalogLookup, PriceLookup};
use crate::damage::{compute_dps, round2};
use crate::loadout::{Loadout, LoadoutIds};
use crate::requirements::{account_permits, eligible, AccountPolicy, PlayerContext};
use crate::scoring::ScoredCandidate;

/// Alternatives kept per slot after the recommended upgrade
pub const MAX_ALTERNATIVES: usize = 5;

/// Ranking parameters
#[derive(Clone)]
pub struct UpgradeRequest<'a> {
    pub discipline: Discipline,
    pub sub_style: SubStyle,
    /// Most a single slot's upgrade may cost over the current item
    pub budget: u64,
    pub player: PlayerContext,
    /// Overrides the player's account mode when set
    pub account_policy: Option<&'a dyn AccountPolicy>,
}

impl<'a> UpgradeRequest<'a> {
    pub fn new(discipline: Discipline, sub_style: SubStyle, budget: u64) -> Self {
        Self {
            discipline,
            sub_style,
            budget,
            player: PlayerContext::default(),
            account_policy: None,
        }
    }

    pub fn with_player(mut self, player: PlayerContext) -> Self {
        self.player = player;
        self
    }

    pub fn with_account_policy(mut self, policy: &'a dyn AccountPolicy) -> Self {
        self.account_policy = Some(policy);
        self
    }

    pub fn policy(&self) -> &dyn AccountPolicy {
        match self.account_policy {
            Some(policy) => policy,
            None => &self.player.account_mode,
        }
    }
}

/// An item reference with the price it was evaluated at
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct PricedItem {
    pub id: ItemId,
    pub name: String,
    pub price: u64,
}

impl PricedItem {
    fn from_candidate(candidate: &ScoredCandidate<'_>) -> Self {
        Self {
            id: candidate.item.id,
            name: candidate.item.name.clone(),
            price: candidate.price,
        }
    }
}

/// Swapping one slot's item for a better one
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct UpgradeRecommendation {
    pub slot: EquipmentSlot,
    pub current: PricedItem,
    pub candidate: PricedItem,
    pub score_delta: f64,
    /// Whole-loadout DPS change, rounded to 2 decimals
    pub dps_delta: f64,
    /// Candidate price minus current price; negative when the upgrade is cheaper
    pub cost_delta: i64,
    /// `dps_delta / max(cost_delta, 1)`
    pub efficiency: f64,
}

/// A slot's recommended upgrade with its runners-up
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct RankedUpgrade {
    /// 1-based rank across all slots
    pub priority: usize,
    pub upgrade: UpgradeRecommendation,
    pub alternatives: Vec<UpgradeRecommendation>,
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct UpgradePlan {
    pub current_dps: f64,
    pub recommended_upgrades: Vec<RankedUpgrade>,
    /// Sum of the recommended upgrades' cost deltas
    pub total_upgrade_cost: i64,
}

impl UpgradePlan {
    pub fn is_empty(&self) -> bool {
        self.recommended_upgrades.is_empty()
    }
}

fn by_efficiency_desc(a: &UpgradeRecommendation, b: &UpgradeRecommendation) -> Ordering {
    b.efficiency.total_cmp(&a.efficiency)
}

/// Rank upgrades for the loadout described by `current`.
///
/// Slots that are empty, or whose id is not in the catalog, are skipped.
pub fn rank_upgrades<C, P>(
    catalog: &C,
    prices: &P,
    current: &LoadoutIds,
    request: &UpgradeRequest<'_>,
) -> UpgradePlan
where
    C: CatalogLookup + ?Sized,
    P: PriceLookup + ?Sized,
{
    let loadout = Loadout::resolve(current, catalog);
    let stats = Some(&request.player.skills);
    let current_dps = compute_dps(&loadout, request.discipline, request.sub_style, stats).dps;
    let policy = request.policy();

    let mut per_slot: Vec<(UpgradeRecommendation, Vec<UpgradeRecommendation>)> = Vec::new();

    for (slot, worn) in loadout.iter_equipped() {
        let current_item =
            ScoredCandidate::evaluate(worn, request.discipline, request.sub_style, prices);

        let mut options: Vec<UpgradeRecommendation> = catalog
            .items_by_slot(slot)
            .into_iter()
            .filter(|item| item.id != worn.id)
            .filter(|item| eligible(item, &request.player))
            .filter(|item| account_permits(item, policy))
            .map(|item| ScoredCandidate::evaluate(item, request.discipline, request.sub_style, prices))
            .filter(|candidate| candidate.score > current_item.score)
            .filter_map(|candidate| {
                let cost_delta = price_delta(candidate.price, current_item.price);
                if cost_delta > budget_as_i64(request.budget) {
                    return None;
                }
                let swapped = loadout.with_item(slot, candidate.item.clone());
                let dps = compute_dps(&swapped, request.discipline, request.sub_style, stats).dps;
                let dps_delta = round2(dps - current_dps);
                Some(UpgradeRecommendation {
                    slot,
                    current: PricedItem::from_candidate(&current_item),
                    candidate: PricedItem::from_candidate(&candidate),
                    score_delta: candidate.score - current_item.score,
                    dps_delta,
                    cost_delta,
                    efficiency: dps_delta / cost_delta.max(1) as f64,
                })
            })
            .collect();

        if options.is_empty() {
            debug!("{}: nothing better than {} within budget", slot, worn.name);
            continue;
        }
        options.sort_by(by_efficiency_desc);
        let mut options = options.into_iter();
        if let Some(best) = options.next() {
            debug!(
                "{}: {} -> {} ({} dps for {} coins)",
                slot, best.current.name, best.candidate.name, best.dps_delta, best.cost_delta
            );
            per_slot.push((best, options.take(MAX_ALTERNATIVES).collect()));
        }
    }

    for (slot, id) in current.iter_assigned() {
        if loadout.get(slot).is_none() {
            debug!("{}: current item {} not found, skipping", slot, id);
        }
    }

    per_slot.sort_by(|(a, _), (b, _)| by_efficiency_desc(a, b));
    let total_upgrade_cost = per_slot.iter().map(|(best, _)| best.cost_delta).sum();
    let recommended_upgrades = per_slot
        .into_iter()
        .enumerate()
        .map(|(i, (upgrade, alternatives))| RankedUpgrade {
            priority: i + 1,
            upgrade,
            alternatives,
        })
        .collect();

    UpgradePlan {
        current_dps,
        recommended_upgrades,
        total_upgrade_cost,
    }
}

fn price_delta(candidate: u64, current: u64) -> i64 {
    let delta = i128::from(candidate) - i128::from(current);
    delta.clamp(i128::from(i64::MIN), i128::from(i64::MAX)) as i64
}

fn budget_as_i64(budget: u64) -> i64 {
    i64::try_from(budget).unwrap_or(i64::MAX)
}
