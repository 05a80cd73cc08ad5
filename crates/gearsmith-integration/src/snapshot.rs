//! Catalog snapshots loaded from disk

use std::fs;
use std::path::Path;

use gearsmith_core::ItemId;
use gearsmith_engine::{ItemCatalog, PriceLookup, PriceTable};
use serde::de::DeserializeOwned;
use tracing::{info, warn};

use crate::conversion::record_to_item;
use crate::error::IntegrationError;
use crate::types::CatalogSnapshot;

/// Live prices with a fallback to each item's static value.
#[derive(Debug, Clone, Default)]
pub struct PriceSnapshot {
    live: PriceTable,
    static_values: PriceTable,
}

impl PriceSnapshot {
    pub fn new(live: PriceTable, static_values: PriceTable) -> Self {
        Self {
            live,
            static_values,
        }
    }

    /// Whether a live price exists for the item
    pub fn has_live_price(&self, id: ItemId) -> bool {
        self.live.get(id).is_some()
    }
}

impl PriceLookup for PriceSnapshot {
    fn price(&self, id: ItemId) -> u64 {
        self.live
            .get(id)
            .or_else(|| self.static_values.get(id))
            .unwrap_or(0)
    }
}

impl CatalogSnapshot {
    /// Price lookup for this snapshot's records
    pub fn price_snapshot(&self) -> PriceSnapshot {
        let live = self
            .prices
            .iter()
            .map(|(&id, &price)| (ItemId(id), price))
            .collect();
        let mut static_values = PriceTable::new();
        for record in &self.items {
            let id = ItemId(record.id);
            if static_values.get(id).is_none() {
                static_values.insert(id, record.value);
            }
        }
        PriceSnapshot::new(live, static_values)
    }

    /// Convert every record into a catalog item with its resolved price.
    ///
    /// Records that fail conversion are skipped with a warning.
    pub fn into_catalog(self) -> ItemCatalog {
        let prices = self.price_snapshot();
        let mut entries = Vec::with_capacity(self.items.len());
        let mut skipped = 0usize;

        for record in &self.items {
            match record_to_item(record) {
                Ok(item) => {
                    let price = prices.price(item.id);
                    entries.push((item, price));
                }
                Err(e) => {
                    warn!("Skipping catalog record {} ({}): {}", record.id, record.name, e);
                    skipped += 1;
                }
            }
        }

        let live = entries
            .iter()
            .filter(|(item, _)| prices.has_live_price(item.id))
            .count();
        info!(
            "Loaded catalog snapshot: {} items ({} with live prices, {} skipped)",
            entries.len(),
            live,
            skipped
        );
        ItemCatalog::from_priced(entries)
    }
}

/// Parse a JSON file into `T`
pub fn load_json<T: DeserializeOwned>(path: &Path) -> Result<T, IntegrationError> {
    let content = fs::read_to_string(path).map_err(|source| IntegrationError::Io {
        path: path.to_path_buf(),
        source,
    })?;
    Ok(serde_json::from_str(&content)?)
}

/// Parse a catalog snapshot from a JSON string
pub fn parse_catalog(json: &str) -> Result<ItemCatalog, IntegrationError> {
    let snapshot: CatalogSnapshot = serde_json::from_str(json)?;
    Ok(snapshot.into_catalog())
}

/// Load a catalog snapshot file
pub fn load_catalog(path: &Path) -> Result<ItemCatalog, IntegrationError> {
    let snapshot: CatalogSnapshot = load_json(path)?;
    info!("Read catalog snapshot from {:?}", path);
    Ok(snapshot.into_catalog())
}

#[cfg(test)]
mod tests {
    use super::*;
    use gearsmith_core::{Discipline, EquipmentSlot, SubStyle};
    use gearsmith_engine::{
        rank_upgrades, select_best_loadout, CatalogLookup, LoadoutIds, SelectionRequest,
        UpgradeRequest,
    };

    const SNAPSHOT: &str = r#"{
        "items": [
            {"id": 4151, "name": "Abyssal whip", "slot": "weapon",
             "attackSlash": 82, "meleeStrength": 82, "attackSpeed": 4, "value": 120001},
            {"id": 11802, "name": "Armadyl godsword", "slot": "2h",
             "attackSlash": 132, "meleeStrength": 132, "attackSpeed": 6, "value": 1250000},
            {"id": 1163, "name": "Rune full helm", "slot": "head", "defenceSlash": 32, "value": 35200},
            {"id": 9, "name": "Mystery belt", "slot": "belt"},
            {"id": 1163, "name": "Duplicate helm", "slot": "head"}
        ],
        "prices": {"4151": 1500000, "11802": 12000000}
    }"#;

    #[test]
    fn test_parse_catalog_skips_bad_records() {
        let catalog = parse_catalog(SNAPSHOT).unwrap();
        assert_eq!(catalog.len(), 3);
        assert!(catalog.item_by_id(ItemId(9)).is_none());
        assert_eq!(catalog.item_by_id(ItemId(1163)).unwrap().name, "Rune full helm");
        assert_eq!(catalog.items_by_slot(EquipmentSlot::Weapon).len(), 2);
    }

    #[test]
    fn test_live_price_then_static_value() {
        let catalog = parse_catalog(SNAPSHOT).unwrap();
        assert_eq!(catalog.price(ItemId(4151)), 1_500_000);
        assert_eq!(catalog.price(ItemId(1163)), 35_200);
        assert_eq!(catalog.price(ItemId(424242)), 0);
    }

    #[test]
    fn test_price_snapshot() {
        let snapshot: CatalogSnapshot = serde_json::from_str(SNAPSHOT).unwrap();
        let prices = snapshot.price_snapshot();
        assert!(prices.has_live_price(ItemId(11802)));
        assert!(!prices.has_live_price(ItemId(1163)));
        assert_eq!(prices.price(ItemId(11802)), 12_000_000);
        assert_eq!(prices.price(ItemId(1163)), 35_200);
    }

    #[test]
    fn test_parse_catalog_rejects_malformed_json() {
        let err = parse_catalog("{\"items\": 3}").unwrap_err();
        assert!(matches!(err, IntegrationError::Serialization(_)));
    }

    #[test]
    fn test_load_catalog_from_file() {
        let path = std::env::temp_dir().join(format!("gearsmith-snapshot-{}.json", std::process::id()));
        fs::write(&path, SNAPSHOT).unwrap();
        let catalog = load_catalog(&path).unwrap();
        fs::remove_file(&path).unwrap();
        assert_eq!(catalog.len(), 3);
    }

    #[test]
    fn test_load_missing_file() {
        let path = std::env::temp_dir().join("gearsmith-does-not-exist.json");
        let err = load_catalog(&path).unwrap_err();
        assert!(matches!(err, IntegrationError::Io { .. }));
        assert!(err.to_string().contains("gearsmith-does-not-exist.json"));
    }

    #[test]
    fn test_extreme_bonuses_load_and_evaluate() {
        let json = r#"{"items": [
            {"id": 1, "name": "Huge sword", "slot": "weapon", "attackSlash": 2147483647,
             "meleeStrength": 1500000000, "attackSpeed": 4},
            {"id": 2, "name": "Huge helm", "slot": "head", "attackSlash": 2147483647,
             "meleeStrength": 1500000000},
            {"id": 3, "name": "Plain helm", "slot": "head"}
        ]}"#;
        let catalog = parse_catalog(json).unwrap();
        let request = SelectionRequest::new(Discipline::Melee, SubStyle::Slash, 0);
        let result = select_best_loadout(&catalog, &catalog, &request);
        assert_eq!(result.dps.total_primary_strength_bonus, i32::MAX);
        assert!(result.dps.dps > 0.0);

        let current = LoadoutIds {
            weapon: Some(ItemId(1)),
            head: Some(ItemId(3)),
            ..Default::default()
        };
        let plan = rank_upgrades(
            &catalog,
            &catalog,
            &current,
            &UpgradeRequest::new(Discipline::Melee, SubStyle::Slash, 0),
        );
        assert_eq!(plan.recommended_upgrades.len(), 1);
        assert_eq!(plan.recommended_upgrades[0].upgrade.candidate.id, ItemId(2));
    }
}
