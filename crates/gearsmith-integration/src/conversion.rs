//! Conversion between wire records and core/engine types
//!
//! Absent quest and achievement lists become empty sets here, so the engine
//! never sees an "unknown" completion state.

use gearsmith_core::{
    CombatBonuses, EquipmentSlot, Item, ItemId, ItemRequirements, SkillLevels, WeaponStats,
};
use gearsmith_engine::{PlayerContext, SelectionRequest, UpgradeRequest};

use crate::error::IntegrationError;
use crate::types::{
    BonusRecord, CatalogItemRecord, PlayerPayload, SelectionRequestPayload, StatsPayload,
    UpgradeRequestPayload,
};

impl From<&BonusRecord> for CombatBonuses {
    fn from(b: &BonusRecord) -> Self {
        CombatBonuses {
            attack_stab: b.attack_stab,
            attack_slash: b.attack_slash,
            attack_crush: b.attack_crush,
            attack_ranged: b.attack_ranged,
            attack_magic: b.attack_magic,
            melee_strength: b.melee_strength,
            ranged_strength: b.ranged_strength,
            magic_damage: b.magic_damage,
            prayer: b.prayer,
            defence_stab: b.defence_stab,
            defence_slash: b.defence_slash,
            defence_crush: b.defence_crush,
            defence_magic: b.defence_magic,
            defence_ranged: b.defence_ranged,
        }
    }
}

impl From<&CombatBonuses> for BonusRecord {
    fn from(b: &CombatBonuses) -> Self {
        BonusRecord {
            attack_stab: b.attack_stab,
            attack_slash: b.attack_slash,
            attack_crush: b.attack_crush,
            attack_ranged: b.attack_ranged,
            attack_magic: b.attack_magic,
            melee_strength: b.melee_strength,
            ranged_strength: b.ranged_strength,
            magic_damage: b.magic_damage,
            prayer: b.prayer,
            defence_stab: b.defence_stab,
            defence_slash: b.defence_slash,
            defence_crush: b.defence_crush,
            defence_magic: b.defence_magic,
            defence_ranged: b.defence_ranged,
        }
    }
}

/// Convert a catalog record into an item.
///
/// Weapon metadata is kept only for weapon and two-handed slots; the
/// two-handed slot always yields a two-handed weapon.
pub fn record_to_item(record: &CatalogItemRecord) -> Result<Item, IntegrationError> {
    let invalid = |reason: &str| IntegrationError::InvalidRecord {
        id: record.id,
        reason: reason.to_string(),
    };

    if record.name.trim().is_empty() {
        return Err(invalid("empty name"));
    }
    let slot: EquipmentSlot = record.slot.parse()?;
    record.requirements.validate()?;

    let weapon = match slot {
        EquipmentSlot::Weapon | EquipmentSlot::TwoHanded => {
            if record.attack_speed == Some(0) {
                return Err(invalid("attack speed must be at least 1 tick"));
            }
            Some(WeaponStats {
                attack_speed: record.attack_speed.map(gearsmith_core::Ticks),
                two_handed: record.two_handed || slot == EquipmentSlot::TwoHanded,
            })
        }
        _ => None,
    };

    Ok(Item {
        id: ItemId(record.id),
        name: record.name.trim().to_string(),
        slot,
        requirements: ItemRequirements {
            skills: record.requirements,
            quest: non_empty(record.quest_req.as_deref()),
            achievement: non_empty(record.achievement_req.as_deref()),
        },
        bonuses: CombatBonuses::from(&record.bonuses),
        weapon,
        self_obtainable: record.self_obtainable,
    })
}

/// Convert an item back into a catalog record with the given static value
pub fn item_to_record(item: &Item, value: u64) -> CatalogItemRecord {
    CatalogItemRecord {
        id: item.id.0,
        name: item.name.clone(),
        slot: item.slot.name().to_string(),
        bonuses: BonusRecord::from(&item.bonuses),
        requirements: item.requirements.skills,
        quest_req: item.requirements.quest.clone(),
        achievement_req: item.requirements.achievement.clone(),
        attack_speed: item.weapon.and_then(|w| w.attack_speed).map(|t| t.get()),
        two_handed: item.is_two_handed(),
        value,
        self_obtainable: item.self_obtainable,
    }
}

fn non_empty(name: Option<&str>) -> Option<String> {
    name.map(str::trim)
        .filter(|name| !name.is_empty())
        .map(str::to_string)
}

impl StatsPayload {
    /// Validated skill levels
    pub fn to_skills(&self) -> Result<SkillLevels, IntegrationError> {
        let skills = SkillLevels {
            attack: self.attack,
            strength: self.strength,
            defence: self.defence,
            ranged: self.ranged,
            magic: self.magic,
            prayer: self.prayer,
        };
        skills.validate()?;
        Ok(skills)
    }
}

impl PlayerPayload {
    pub fn to_context(&self) -> Result<PlayerContext, IntegrationError> {
        Ok(PlayerContext::new(self.stats.to_skills()?)
            .with_quests(self.quests_completed.iter().flatten().cloned())
            .with_achievements(self.achievements_completed.iter().flatten().cloned())
            .with_account_mode(self.account_mode))
    }
}

impl SelectionRequestPayload {
    pub fn to_request<'a>(&self) -> Result<SelectionRequest<'a>, IntegrationError> {
        let mut request = SelectionRequest::new(self.discipline, self.sub_style, self.budget)
            .with_player(self.player.to_context()?);
        if let Some(order) = &self.slot_order {
            if order.is_empty() {
                return Err(IntegrationError::InvalidRequest(
                    "slotOrder must name at least one slot".to_string(),
                ));
            }
            request = request.with_slot_order(order.iter().copied());
        }
        for &slot in &self.excluded_slots {
            request = request.excluding_slot(slot);
        }
        for name in &self.excluded_item_names {
            request = request.excluding_item(name.clone());
        }
        Ok(request)
    }
}

impl UpgradeRequestPayload {
    pub fn to_request<'a>(&self) -> Result<UpgradeRequest<'a>, IntegrationError> {
        Ok(UpgradeRequest::new(self.discipline, self.sub_style, self.budget)
            .with_player(self.player.to_context()?))
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use gearsmith_core::{CoreError, Discipline, SubStyle, Ticks};
    use gearsmith_engine::AccountMode;

    fn record(json: &str) -> CatalogItemRecord {
        serde_json::from_str(json).unwrap()
    }

    #[test]
    fn test_record_to_item_weapon() {
        let item = record_to_item(&record(
            r#"{"id": 4151, "name": "Abyssal whip", "slot": "weapon",
                "attackSlash": 82, "meleeStrength": 82, "attackSpeed": 4,
                "requirements": {"attack": 70}}"#,
        ))
        .unwrap();
        assert_eq!(item.id, ItemId(4151));
        assert_eq!(item.slot, EquipmentSlot::Weapon);
        assert_eq!(item.bonuses.attack_slash, 82);
        assert_eq!(item.attack_speed(), Ticks(4));
        assert!(!item.is_two_handed());
        assert_eq!(item.requirements.skills.attack, 70);
    }

    #[test]
    fn test_two_handed_slot_forces_flag() {
        let item = record_to_item(&record(
            r#"{"id": 1, "name": "Godsword", "slot": "2h", "attackSpeed": 6}"#,
        ))
        .unwrap();
        assert!(item.is_two_handed());
        assert_eq!(item.worn_slot(), EquipmentSlot::Weapon);
    }

    #[test]
    fn test_weapon_fields_ignored_on_armour() {
        let item = record_to_item(&record(
            r#"{"id": 2, "name": "Helm", "slot": "head", "attackSpeed": 4, "twoHanded": true}"#,
        ))
        .unwrap();
        assert!(item.weapon.is_none());
        assert!(!item.is_two_handed());
    }

    #[test]
    fn test_invalid_records() {
        let err = record_to_item(&record(r#"{"id": 3, "name": "Belt", "slot": "belt"}"#)).unwrap_err();
        assert!(matches!(err, IntegrationError::Core(CoreError::UnknownSlot(_))));

        let err = record_to_item(&record(r#"{"id": 4, "name": "  ", "slot": "head"}"#)).unwrap_err();
        assert!(matches!(err, IntegrationError::InvalidRecord { id: 4, .. }));

        let err = record_to_item(&record(
            r#"{"id": 5, "name": "Stick", "slot": "weapon", "attackSpeed": 0}"#,
        ))
        .unwrap_err();
        assert!(matches!(err, IntegrationError::InvalidRecord { id: 5, .. }));

        let err = record_to_item(&record(
            r#"{"id": 6, "name": "Cape", "slot": "cape", "requirements": {"prayer": 120}}"#,
        ))
        .unwrap_err();
        assert!(matches!(err, IntegrationError::Core(CoreError::LevelOutOfRange { .. })));
    }

    #[test]
    fn test_blank_quest_is_no_quest() {
        let item = record_to_item(&record(
            r#"{"id": 7, "name": "Boots", "slot": "boots", "questReq": " ", "achievementReq": "Hard Diary"}"#,
        ))
        .unwrap();
        assert_eq!(item.slot, EquipmentSlot::Feet);
        assert!(item.requirements.quest.is_none());
        assert_eq!(item.requirements.achievement.as_deref(), Some("Hard Diary"));
    }

    #[test]
    fn test_item_to_record_converts_back() {
        let original = record(
            r#"{"id": 11802, "name": "Armadyl godsword", "slot": "2h",
                "attackSlash": 132, "meleeStrength": 132, "attackSpeed": 6,
                "questReq": "Some quest", "value": 1000, "selfObtainable": false}"#,
        );
        let item = record_to_item(&original).unwrap();
        let back = item_to_record(&item, 1000);
        assert_eq!(back.slot, "2h");
        assert!(back.two_handed);
        assert_eq!(record_to_item(&back).unwrap(), item);
    }

    #[test]
    fn test_player_payload_omitted_sets_are_empty() {
        let payload: PlayerPayload = serde_json::from_str("{}").unwrap();
        let player = payload.to_context().unwrap();
        assert!(player.quests_completed.is_empty());
        assert!(player.achievements_completed.is_empty());
        assert_eq!(player.skills, SkillLevels::maxed());
        assert_eq!(player.account_mode, AccountMode::Standard);
    }

    #[test]
    fn test_player_payload_rejects_bad_levels() {
        let payload: PlayerPayload = serde_json::from_str(r#"{"stats": {"magic": 0}}"#).unwrap();
        assert!(payload.to_context().is_err());
    }

    #[test]
    fn test_selection_payload_to_request() {
        let payload: SelectionRequestPayload = serde_json::from_str(
            r#"{"discipline": "magic", "budget": 1000,
                "slotOrder": ["weapon", "head"],
                "excludedSlots": ["head"],
                "excludedItemNames": ["Kodai wand"],
                "player": {"questsCompleted": ["Q"]}}"#,
        )
        .unwrap();
        let request = payload.to_request().unwrap();
        assert_eq!(request.discipline, Discipline::Magic);
        assert_eq!(request.sub_style, SubStyle::Unspecified);
        assert_eq!(request.active_slots(), vec![EquipmentSlot::Weapon]);
        assert!(request.excluded_item_names.contains("Kodai wand"));
        assert!(request.player.quests_completed.contains("Q"));
    }

    #[test]
    fn test_empty_slot_order_rejected() {
        let payload: SelectionRequestPayload =
            serde_json::from_str(r#"{"discipline": "melee", "budget": 1, "slotOrder": []}"#).unwrap();
        assert!(matches!(payload.to_request(), Err(IntegrationError::InvalidRequest(_))));
    }

    #[test]
    fn test_upgrade_payload_to_request() {
        let payload: UpgradeRequestPayload = serde_json::from_str(
            r#"{"currentLoadout": {}, "discipline": "ranged", "budget": 50,
                "player": {"accountMode": "ironman"}}"#,
        )
        .unwrap();
        let request = payload.to_request().unwrap();
        assert_eq!(request.budget, 50);
        assert_eq!(request.player.account_mode, AccountMode::Ironman);
    }
}
