//! Item catalog: a read-only snapshot of items and their prices

use std::collections::HashMap;

use gearsmith_core::{EquipmentSlot, Item, ItemId};
use tracing::warn;

/// Read-only item lookups the engine consumes.
pub trait CatalogLookup {
    /// Items worn in `slot`, in catalog order. Two-handed weapons are
    /// returned for the weapon slot.
    fn items_by_slot(&self, slot: EquipmentSlot) -> Vec<&Item>;

    /// Item with the given id, if any
    fn item_by_id(&self, id: ItemId) -> Option<&Item>;
}

/// Current price of an item in coins.
///
/// Whatever a lookup returns is treated as authoritative.
pub trait PriceLookup {
    fn price(&self, id: ItemId) -> u64;
}

impl<F> PriceLookup for F
where
    F: Fn(ItemId) -> u64,
{
    fn price(&self, id: ItemId) -> u64 {
        self(id)
    }
}

/// A fixed price list. Unlisted items cost 0.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct PriceTable {
    prices: HashMap<ItemId, u64>,
}

impl PriceTable {
    pub fn new() -> Self {
        Self::default()
    }

    /// Set the price of an item, returning the previous price if any
    pub fn insert(&mut self, id: ItemId, price: u64) -> Option<u64> {
        self.prices.insert(id, price)
    }

    /// Price if the item is listed
    pub fn get(&self, id: ItemId) -> Option<u64> {
        self.prices.get(&id).copied()
    }

    pub fn len(&self) -> usize {
        self.prices.len()
    }

    pub fn is_empty(&self) -> bool {
        self.prices.is_empty()
    }
}

impl PriceLookup for PriceTable {
    fn price(&self, id: ItemId) -> u64 {
        self.get(id).unwrap_or(0)
    }
}

impl FromIterator<(ItemId, u64)> for PriceTable {
    fn from_iter<T: IntoIterator<Item = (ItemId, u64)>>(iter: T) -> Self {
        Self {
            prices: iter.into_iter().collect(),
        }
    }
}

/// A snapshot of catalog items together with their prices.
#[derive(Debug, Clone, Default)]
pub struct ItemCatalog {
    /// Items in catalog order
    items: Vec<Item>,
    /// Position of each id in `items`
    index: HashMap<ItemId, usize>,
    prices: PriceTable,
}

impl ItemCatalog {
    /// Build a catalog with no prices (every item costs 0).
    pub fn new(items: Vec<Item>) -> Self {
        Self::with_prices(items, PriceTable::new())
    }

    /// Build a catalog from items and a price table.
    /// When two items share an id, the first one wins.
    pub fn with_prices(items: Vec<Item>, prices: PriceTable) -> Self {
        let mut kept = Vec::with_capacity(items.len());
        let mut index = HashMap::with_capacity(items.len());
        for item in items {
            if index.contains_key(&item.id) {
                warn!("Duplicate catalog id {} ({}), keeping the first entry", item.id, item.name);
                continue;
            }
            index.insert(item.id, kept.len());
            kept.push(item);
        }
        Self {
            items: kept,
            index,
            prices,
        }
    }

    /// Build a catalog from `(item, price)` pairs.
    pub fn from_priced(entries: impl IntoIterator<Item = (Item, u64)>) -> Self {
        let mut items = Vec::new();
        let mut prices = PriceTable::new();
        for (item, price) in entries {
            prices.insert(item.id, price);
            items.push(item);
        }
        Self::with_prices(items, prices)
    }

    /// Number of items in the catalog.
    pub fn len(&self) -> usize {
        self.items.len()
    }

    /// Whether the catalog is empty.
    pub fn is_empty(&self) -> bool {
        self.items.is_empty()
    }

    /// Look an item up by name, ignoring case, spacing and punctuation.
    ///
    /// An exact normalized match wins; otherwise the first item (in catalog
    /// order) whose normalized name contains the query.
    pub fn find_by_name(&self, name: &str) -> Option<&Item> {
        let query = normalize_name(name);
        if query.is_empty() {
            return None;
        }
        self.items
            .iter()
            .find(|item| normalize_name(&item.name) == query)
            .or_else(|| {
                self.items
                    .iter()
                    .find(|item| normalize_name(&item.name).contains(&query))
            })
    }

    /// Up to `limit` items whose normalized name contains the query, exact
    /// matches first.
    pub fn search_by_name(&self, query: &str, limit: usize) -> Vec<&Item> {
        let query = normalize_name(query);
        if query.is_empty() {
            return Vec::new();
        }
        let (mut exact, partial): (Vec<&Item>, Vec<&Item>) = self
            .items
            .iter()
            .filter(|item| normalize_name(&item.name).contains(&query))
            .partition(|item| normalize_name(&item.name) == query);
        exact.extend(partial);
        exact.truncate(limit);
        exact
    }
}

impl CatalogLookup for ItemCatalog {
    fn items_by_slot(&self, slot: EquipmentSlot) -> Vec<&Item> {
        let slot = slot.worn_slot();
        self.items
            .iter()
            .filter(|item| item.worn_slot() == slot)
            .collect()
    }

    fn item_by_id(&self, id: ItemId) -> Option<&Item> {
        self.index.get(&id).map(|&i| &self.items[i])
    }
}

impl PriceLookup for ItemCatalog {
    fn price(&self, id: ItemId) -> u64 {
        self.prices.price(id)
    }
}

/// Lowercase alphanumerics only, so "Abyssal whip" matches "abyssal-whip".
pub fn normalize_name(name: &str) -> String {
    name.chars()
        .filter(|c| c.is_alphanumeric())
        .flat_map(char::to_lowercase)
        .collect()
}
