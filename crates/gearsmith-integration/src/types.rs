use std::collections::HashMap;

use gearsmith_core::{Discipline, EquipmentSlot, SkillLevels, SubStyle, MAX_LEVEL};
use gearsmith_engine::{AccountMode, LoadoutIds};
use serde::{Deserialize, Serialize};

fn default_true() -> bool {
    true
}

fn default_max_level() -> u32 {
    MAX_LEVEL
}

/// Flat bonus fields of a catalog record. Missing fields read as 0.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase", default)]
pub struct BonusRecord {
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

/// An item as stored in a catalog snapshot file
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct CatalogItemRecord {
    pub id: u32,
    pub name: String,
    pub slot: String,
    #[serde(flatten)]
    pub bonuses: BonusRecord,
    /// Minimum skill levels; missing skills read as level 1
    #[serde(default)]
    pub requirements: SkillLevels,
    #[serde(default)]
    pub quest_req: Option<String>,
    #[serde(default)]
    pub achievement_req: Option<String>,
    #[serde(default)]
    pub attack_speed: Option<u32>,
    #[serde(default)]
    pub two_handed: bool,
    /// Static item value, used when the snapshot has no live price
    #[serde(default)]
    pub value: u64,
    #[serde(default = "default_true")]
    pub self_obtainable: bool,
}

/// A catalog snapshot file: item records plus live prices keyed by item id
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct CatalogSnapshot {
    pub items: Vec<CatalogItemRecord>,
    #[serde(default)]
    pub prices: HashMap<u32, u64>,
}

/// Player levels in a request. Missing skills read as 99.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase", deny_unknown_fields)]
pub struct StatsPayload {
    #[serde(default = "default_max_level")]
    pub attack: u32,
    #[serde(default = "default_max_level")]
    pub strength: u32,
    #[serde(default = "default_max_level")]
    pub defence: u32,
    #[serde(default = "default_max_level")]
    pub ranged: u32,
    #[serde(default = "default_max_level")]
    pub magic: u32,
    #[serde(default = "default_max_level")]
    pub prayer: u32,
}

impl Default for StatsPayload {
    fn default() -> Self {
        Self {
            attack: MAX_LEVEL,
            strength: MAX_LEVEL,
            defence: MAX_LEVEL,
            ranged: MAX_LEVEL,
            magic: MAX_LEVEL,
            prayer: MAX_LEVEL,
        }
    }
}

/// Who the request is for
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase", deny_unknown_fields)]
pub struct PlayerPayload {
    #[serde(default)]
    pub stats: StatsPayload,
    /// Omitted means nothing completed
    #[serde(default)]
    pub quests_completed: Option<Vec<String>>,
    #[serde(default)]
    pub achievements_completed: Option<Vec<String>>,
    #[serde(default)]
    pub account_mode: AccountMode,
}

/// Body of a `select` request
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase", deny_unknown_fields)]
pub struct SelectionRequestPayload {
    pub discipline: Discipline,
    #[serde(default)]
    pub sub_style: SubStyle,
    pub budget: u64,
    #[serde(default)]
    pub player: PlayerPayload,
    /// Fill order; omitted means the standard eleven-slot order
    #[serde(default)]
    pub slot_order: Option<Vec<EquipmentSlot>>,
    #[serde(default)]
    pub excluded_slots: Vec<EquipmentSlot>,
    #[serde(default)]
    pub excluded_item_names: Vec<String>,
}

/// Body of an `upgrades` request
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase", deny_unknown_fields)]
pub struct UpgradeRequestPayload {
    pub current_loadout: LoadoutIds,
    pub discipline: Discipline,
    #[serde(default)]
    pub sub_style: SubStyle,
    /// Per-slot budget
    pub budget: u64,
    #[serde(default)]
    pub player: PlayerPayload,
}

/// Body of a `dps` request
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase", deny_unknown_fields)]
pub struct DpsRequestPayload {
    pub loadout: LoadoutIds,
    pub discipline: Discipline,
    #[serde(default)]
    pub sub_style: SubStyle,
    #[serde(default)]
    pub stats: Option<StatsPayload>,
}

#[cfg(test)]
mod tests {
    use super::*;
    use gearsmith_core::ItemId;

    #[test]
    fn test_catalog_record_minimal() {
        let record: CatalogItemRecord =
            serde_json::from_str(r#"{"id": 1, "name": "Cape", "slot": "cape"}"#).unwrap();
        assert_eq!(record.bonuses, BonusRecord::default());
        assert_eq!(record.requirements, SkillLevels::default());
        assert_eq!(record.value, 0);
        assert!(record.self_obtainable);
        assert!(record.attack_speed.is_none());
    }

    #[test]
    fn test_catalog_record_full() {
        let json = r#"{
            "id": 4151,
            "name": "Abyssal whip",
            "slot": "weapon",
            "attackSlash": 82,
            "meleeStrength": 82,
            "requirements": {"attack": 70},
            "questReq": null,
            "attackSpeed": 4,
            "value": 120001,
            "selfObtainable": true
        }"#;
        let record: CatalogItemRecord = serde_json::from_str(json).unwrap();
        assert_eq!(record.bonuses.attack_slash, 82);
        assert_eq!(record.bonuses.melee_strength, 82);
        assert_eq!(record.requirements.attack, 70);
        assert_eq!(record.requirements.strength, 1);
        assert_eq!(record.attack_speed, Some(4));
        assert_eq!(record.value, 120_001);
    }

    #[test]
    fn test_snapshot_prices_keyed_by_id() {
        let json = r#"{"items": [], "prices": {"4151": 1500000}}"#;
        let snapshot: CatalogSnapshot = serde_json::from_str(json).unwrap();
        assert_eq!(snapshot.prices.get(&4151), Some(&1_500_000));
    }

    #[test]
    fn test_stats_default_to_99() {
        let stats: StatsPayload = serde_json::from_str(r#"{"attack": 60}"#).unwrap();
        assert_eq!(stats.attack, 60);
        assert_eq!(stats.strength, 99);
        assert_eq!(StatsPayload::default().prayer, 99);
    }

    #[test]
    fn test_payloads_reject_unknown_keys() {
        assert!(serde_json::from_str::<StatsPayload>(r#"{"agility": 50}"#).is_err());
        assert!(serde_json::from_str::<PlayerPayload>(r#"{"quests": []}"#).is_err());
        let bad = r#"{"discipline": "melee", "budget": 10, "slots": []}"#;
        assert!(serde_json::from_str::<SelectionRequestPayload>(bad).is_err());
        let bad = r#"{"loadout": {"belt": 1}, "discipline": "melee"}"#;
        assert!(serde_json::from_str::<DpsRequestPayload>(bad).is_err());
    }

    #[test]
    fn test_selection_payload() {
        let json = r#"{
            "discipline": "melee",
            "subStyle": "slash",
            "budget": 5000000,
            "player": {"stats": {"attack": 75}, "questsCompleted": ["Dragon Slayer I"]},
            "excludedSlots": ["ring"],
            "excludedItemNames": ["Abyssal whip"]
        }"#;
        let payload: SelectionRequestPayload = serde_json::from_str(json).unwrap();
        assert_eq!(payload.discipline, Discipline::Melee);
        assert_eq!(payload.sub_style, SubStyle::Slash);
        assert_eq!(payload.player.stats.attack, 75);
        assert_eq!(payload.player.account_mode, AccountMode::Standard);
        assert_eq!(payload.excluded_slots, vec![EquipmentSlot::Ring]);
        assert!(payload.slot_order.is_none());
    }

    #[test]
    fn test_unknown_discipline_is_soft() {
        let json = r#"{"discipline": "necromancy", "budget": 0}"#;
        let payload: SelectionRequestPayload = serde_json::from_str(json).unwrap();
        assert_eq!(payload.discipline, Discipline::Unsupported);
    }

    #[test]
    fn test_upgrade_payload() {
        let json = r#"{
            "currentLoadout": {"weapon": 4151, "head": null},
            "discipline": "ranged",
            "budget": 100000,
            "player": {"accountMode": "ironman"}
        }"#;
        let payload: UpgradeRequestPayload = serde_json::from_str(json).unwrap();
        assert_eq!(payload.current_loadout.weapon, Some(ItemId(4151)));
        assert!(payload.current_loadout.head.is_none());
        assert_eq!(payload.player.account_mode, AccountMode::Ironman);
        assert_eq!(payload.sub_style, SubStyle::Unspecified);
    }
}
