//! Requirement filter
//!
//! Decides whether a player may wear an item: skill levels, quest and
//! achievement gates, and account-mode restrictions.

use std::collections::BTreeSet;

use gearsmith_core::{Item, SkillLevels};
use serde::{Deserialize, Serialize};

/// Account restrictions on which items may be used.
///
/// Any `Fn(&Item) -> bool` is a policy, so callers can plug in their own.
pub trait AccountPolicy {
    fn permits(&self, item: &Item) -> bool;
}

impl<F> AccountPolicy for F
where
    F: Fn(&Item) -> bool,
{
    fn permits(&self, item: &Item) -> bool {
        self(item)
    }
}

/// Built-in account modes
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum AccountMode {
    /// No restrictions
    #[default]
    Standard,
    /// Cannot buy from other players; only self-obtainable items are usable
    Ironman,
}

impl AccountPolicy for AccountMode {
    fn permits(&self, item: &Item) -> bool {
        match self {
            Self::Standard => true,
            Self::Ironman => item.self_obtainable,
        }
    }
}

/// Who is asking: levels, completed content and account mode.
///
/// Quest and achievement sets are never optional here. A caller that did not
/// supply them passes empty sets, which gates out every quest- or
/// achievement-locked item.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct PlayerContext {
    pub skills: SkillLevels,
    #[serde(default)]
    pub quests_completed: BTreeSet<String>,
    #[serde(default)]
    pub achievements_completed: BTreeSet<String>,
    #[serde(default)]
    pub account_mode: AccountMode,
}

impl Default for PlayerContext {
    /// Maxed skills, nothing completed, standard account
    fn default() -> Self {
        Self::new(SkillLevels::maxed())
    }
}

impl PlayerContext {
    pub fn new(skills: SkillLevels) -> Self {
        Self {
            skills,
            quests_completed: BTreeSet::new(),
            achievements_completed: BTreeSet::new(),
            account_mode: AccountMode::Standard,
        }
    }

    pub fn with_quests<I, S>(mut self, quests: I) -> Self
    where
        I: IntoIterator<Item = S>,
        S: Into<String>,
    {
        self.quests_completed.extend(quests.into_iter().map(Into::into));
        self
    }

    pub fn with_achievements<I, S>(mut self, achievements: I) -> Self
    where
        I: IntoIterator<Item = S>,
        S: Into<String>,
    {
        self.achievements_completed
            .extend(achievements.into_iter().map(Into::into));
        self
    }

    pub fn with_account_mode(mut self, mode: AccountMode) -> Self {
        self.account_mode = mode;
        self
    }
}

/// Whether `player` meets every requirement of `item`.
pub fn eligible(item: &Item, player: &PlayerContext) -> bool {
    let req = &item.requirements;
    if !player.skills.meets(&req.skills) {
        return false;
    }
    if let Some(quest) = &req.quest {
        if !player.quests_completed.contains(quest) {
            return false;
        }
    }
    if let Some(achievement) = &req.achievement {
        if !player.achievements_completed.contains(achievement) {
            return false;
        }
    }
    true
}

/// Whether an account policy allows `item`.
pub fn account_permits(item: &Item, policy: &dyn AccountPolicy) -> bool {
    policy.permits(item)
}

#[cfg(test)]
mod tests {
    use super::*;
    use gearsmith_core::{EquipmentSlot, ItemRequirements};
    use rand::rngs::StdRng;
    use rand::{Rng, SeedableRng};

    fn gated_item(skills: SkillLevels, quest: Option<&str>, achievement: Option<&str>) -> Item {
        Item {
            requirements: ItemRequirements {
                skills,
                quest: quest.map(str::to_string),
                achievement: achievement.map(str::to_string),
            },
            ..Item::new(1, "Gated", EquipmentSlot::Body)
        }
    }

    #[test]
    fn test_no_requirements_always_eligible() {
        let item = Item::new(1, "Cape", EquipmentSlot::Cape);
        let novice = PlayerContext::new(SkillLevels::default());
        assert!(eligible(&item, &novice));
    }

    #[test]
    fn test_skill_below_requirement_fails() {
        let item = gated_item(
            SkillLevels {
                attack: 70,
                ..Default::default()
            },
            None,
            None,
        );
        let player = PlayerContext::new(SkillLevels {
            attack: 69,
            ..SkillLevels::maxed()
        });
        assert!(!eligible(&item, &player));

        let player = PlayerContext::new(SkillLevels {
            attack: 70,
            ..SkillLevels::default()
        });
        assert!(eligible(&item, &player));
    }

    #[test]
    fn test_quest_gate_with_no_quests_fails() {
        let item = gated_item(SkillLevels::default(), Some("Q"), None);
        let player = PlayerContext::default();
        assert!(!eligible(&item, &player));
    }

    #[test]
    fn test_quest_gate_with_explicit_empty_set_fails() {
        let item = gated_item(SkillLevels::default(), Some("Q"), None);
        let player = PlayerContext::default().with_quests(Vec::<String>::new());
        assert!(!eligible(&item, &player));
    }

    #[test]
    fn test_quest_gate_satisfied() {
        let item = gated_item(SkillLevels::default(), Some("Dragon Slayer I"), None);
        let player = PlayerContext::default().with_quests(["Dragon Slayer I"]);
        assert!(eligible(&item, &player));
    }

    #[test]
    fn test_achievement_gate() {
        let item = gated_item(SkillLevels::default(), None, Some("Elite Diary"));
        assert!(!eligible(&item, &PlayerContext::default()));
        let player = PlayerContext::default().with_achievements(["Elite Diary"]);
        assert!(eligible(&item, &player));
        // Quest names do not satisfy achievement gates
        let player = PlayerContext::default().with_quests(["Elite Diary"]);
        assert!(!eligible(&item, &player));
    }

    #[test]
    fn test_account_modes() {
        let tradeable = Item::new(1, "Whip", EquipmentSlot::Weapon);
        let market_only = Item {
            self_obtainable: false,
            ..Item::new(2, "Bond", EquipmentSlot::Ring)
        };
        assert!(account_permits(&tradeable, &AccountMode::Standard));
        assert!(account_permits(&market_only, &AccountMode::Standard));
        assert!(account_permits(&tradeable, &AccountMode::Ironman));
        assert!(!account_permits(&market_only, &AccountMode::Ironman));
    }

    #[test]
    fn test_closure_policy() {
        let no_rings = |item: &Item| item.slot != EquipmentSlot::Ring;
        assert!(account_permits(&Item::new(1, "Helm", EquipmentSlot::Head), &no_rings));
        assert!(!account_permits(&Item::new(2, "Ring", EquipmentSlot::Ring), &no_rings));
    }

    fn random_levels(rng: &mut StdRng) -> SkillLevels {
        SkillLevels {
            attack: rng.gen_range(1..=99),
            strength: rng.gen_range(1..=99),
            defence: rng.gen_range(1..=99),
            ranged: rng.gen_range(1..=99),
            magic: rng.gen_range(1..=99),
            prayer: rng.gen_range(1..=99),
        }
    }

    fn raise(levels: SkillLevels, rng: &mut StdRng) -> SkillLevels {
        let mut bump = |level: u32| (level + rng.gen_range(0..=20)).min(99);
        SkillLevels {
            attack: bump(levels.attack),
            strength: bump(levels.strength),
            defence: bump(levels.defence),
            ranged: bump(levels.ranged),
            magic: bump(levels.magic),
            prayer: bump(levels.prayer),
        }
    }

    #[test]
    fn test_eligibility_monotonic_in_levels() {
        let mut rng = StdRng::seed_from_u64(7);
        for _ in 0..500 {
            let item = gated_item(random_levels(&mut rng), None, None);
            let weaker = PlayerContext::new(random_levels(&mut rng));
            let stronger = PlayerContext::new(raise(weaker.skills, &mut rng));
            if eligible(&item, &weaker) {
                assert!(
                    eligible(&item, &stronger),
                    "raising levels {:?} -> {:?} lost eligibility",
                    weaker.skills,
                    stronger.skills
                );
            }
        }
    }
}
