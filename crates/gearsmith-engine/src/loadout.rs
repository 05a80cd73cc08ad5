//! Loadouts with eleven slots
//!
//! A loadout holds at most one item per wearable slot and upholds the
//! two-handed rule: a two-handed weapon means the shield slot is empty.

use gearsmith_core::{EquipmentSlot, Item, ItemId};
use serde::{Deserialize, Serialize};
use tracing::debug;

use crate::catalog::CatalogLookup;

/// A complete or partial slot → item assignment
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
pub struct Loadout {
    pub head: Option<Item>,
    pub cape: Option<Item>,
    pub neck: Option<Item>,
    pub ammo: Option<Item>,
    pub weapon: Option<Item>,
    pub shield: Option<Item>,
    pub body: Option<Item>,
    pub legs: Option<Item>,
    pub hands: Option<Item>,
    pub feet: Option<Item>,
    pub ring: Option<Item>,
}

impl Loadout {
    /// Create an empty loadout
    pub fn new() -> Self {
        Self::default()
    }

    /// Get the item in a slot. The two-handed marker reads the weapon slot.
    pub fn get(&self, slot: EquipmentSlot) -> Option<&Item> {
        match slot {
            EquipmentSlot::Head => self.head.as_ref(),
            EquipmentSlot::Cape => self.cape.as_ref(),
            EquipmentSlot::Neck => self.neck.as_ref(),
            EquipmentSlot::Ammo => self.ammo.as_ref(),
            EquipmentSlot::Weapon | EquipmentSlot::TwoHanded => self.weapon.as_ref(),
            EquipmentSlot::Shield => self.shield.as_ref(),
            EquipmentSlot::Body => self.body.as_ref(),
            EquipmentSlot::Legs => self.legs.as_ref(),
            EquipmentSlot::Hands => self.hands.as_ref(),
            EquipmentSlot::Feet => self.feet.as_ref(),
            EquipmentSlot::Ring => self.ring.as_ref(),
        }
    }

    fn get_mut(&mut self, slot: EquipmentSlot) -> &mut Option<Item> {
        match slot {
            EquipmentSlot::Head => &mut self.head,
            EquipmentSlot::Cape => &mut self.cape,
            EquipmentSlot::Neck => &mut self.neck,
            EquipmentSlot::Ammo => &mut self.ammo,
            EquipmentSlot::Weapon | EquipmentSlot::TwoHanded => &mut self.weapon,
            EquipmentSlot::Shield => &mut self.shield,
            EquipmentSlot::Body => &mut self.body,
            EquipmentSlot::Legs => &mut self.legs,
            EquipmentSlot::Hands => &mut self.hands,
            EquipmentSlot::Feet => &mut self.feet,
            EquipmentSlot::Ring => &mut self.ring,
        }
    }

    /// Put an item in a slot without checking the two-handed rule.
    /// Callers finish with [`Loadout::enforce_two_handed`].
    pub(crate) fn place(&mut self, slot: EquipmentSlot, item: Item) {
        *self.get_mut(slot) = Some(item);
    }

    /// Empty the shield slot if a two-handed weapon is worn, returning the
    /// removed shield.
    pub fn enforce_two_handed(&mut self) -> Option<Item> {
        if self.has_two_handed_weapon() {
            self.shield.take()
        } else {
            None
        }
    }

    /// A copy of this loadout with `item` swapped into `slot`.
    ///
    /// A two-handed item pushes out the shield; a shield swapped in beside a
    /// two-handed weapon is dropped.
    pub fn with_item(&self, slot: EquipmentSlot, item: Item) -> Loadout {
        let mut swapped = self.clone();
        swapped.place(slot.worn_slot(), item);
        swapped.enforce_two_handed();
        swapped
    }

    /// Build a loadout from slot → id assignments.
    ///
    /// Ids that are unknown to the catalog, or whose item is not worn in the
    /// slot it was assigned to, are skipped. A shield next to a two-handed
    /// weapon is dropped.
    pub fn resolve<C: CatalogLookup + ?Sized>(ids: &LoadoutIds, catalog: &C) -> Loadout {
        let mut loadout = Loadout::new();
        for (slot, id) in ids.iter_assigned() {
            match catalog.item_by_id(id) {
                Some(item) if item.worn_slot() == slot => loadout.place(slot, item.clone()),
                Some(item) => {
                    debug!("Skipping {} ({}): worn in {}, assigned to {}", item.name, id, item.worn_slot(), slot);
                }
                None => debug!("Skipping unknown item {} in {}", id, slot),
            }
        }
        if let Some(shield) = loadout.enforce_two_handed() {
            debug!("Dropped {} beside a two-handed weapon", shield.name);
        }
        loadout
    }

    /// The weapon, if one is equipped
    pub fn weapon(&self) -> Option<&Item> {
        self.weapon.as_ref()
    }

    /// Whether the equipped weapon occupies both hands
    pub fn has_two_handed_weapon(&self) -> bool {
        self.weapon.as_ref().is_some_and(Item::is_two_handed)
    }

    /// Occupied slots with their items, in slot order
    pub fn iter_equipped(&self) -> impl Iterator<Item = (EquipmentSlot, &Item)> {
        EquipmentSlot::wearable()
            .iter()
            .filter_map(move |&slot| self.get(slot).map(|item| (slot, item)))
    }

    /// Number of occupied slots
    pub fn len(&self) -> usize {
        self.iter_equipped().count()
    }

    pub fn is_empty(&self) -> bool {
        self.len() == 0
    }
}

/// Slot → item id assignments, as callers describe a worn loadout.
/// Unknown keys are rejected when deserializing.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(default, deny_unknown_fields)]
pub struct LoadoutIds {
    pub head: Option<ItemId>,
    pub cape: Option<ItemId>,
    pub neck: Option<ItemId>,
    pub ammo: Option<ItemId>,
    #[serde(alias = "2h")]
    pub weapon: Option<ItemId>,
    pub shield: Option<ItemId>,
    pub body: Option<ItemId>,
    pub legs: Option<ItemId>,
    #[serde(alias = "gloves")]
    pub hands: Option<ItemId>,
    #[serde(alias = "boots")]
    pub feet: Option<ItemId>,
    pub ring: Option<ItemId>,
}

impl LoadoutIds {
    pub fn get(&self, slot: EquipmentSlot) -> Option<ItemId> {
        match slot {
            EquipmentSlot::Head => self.head,
            EquipmentSlot::Cape => self.cape,
            EquipmentSlot::Neck => self.neck,
            EquipmentSlot::Ammo => self.ammo,
            EquipmentSlot::Weapon | EquipmentSlot::TwoHanded => self.weapon,
            EquipmentSlot::Shield => self.shield,
            EquipmentSlot::Body => self.body,
            EquipmentSlot::Legs => self.legs,
            EquipmentSlot::Hands => self.hands,
            EquipmentSlot::Feet => self.feet,
            EquipmentSlot::Ring => self.ring,
        }
    }

    pub fn set(&mut self, slot: EquipmentSlot, id: Option<ItemId>) {
        match slot {
            EquipmentSlot::Head => self.head = id,
            EquipmentSlot::Cape => self.cape = id,
            EquipmentSlot::Neck => self.neck = id,
            EquipmentSlot::Ammo => self.ammo = id,
            EquipmentSlot::Weapon | EquipmentSlot::TwoHanded => self.weapon = id,
            EquipmentSlot::Shield => self.shield = id,
            EquipmentSlot::Body => self.body = id,
            EquipmentSlot::Legs => self.legs = id,
            EquipmentSlot::Hands => self.hands = id,
            EquipmentSlot::Feet => self.feet = id,
            EquipmentSlot::Ring => self.ring = id,
        }
    }

    /// Assigned slots with their ids, in slot order
    pub fn iter_assigned(&self) -> impl Iterator<Item = (EquipmentSlot, ItemId)> + '_ {
        EquipmentSlot::wearable()
            .iter()
            .filter_map(move |&slot| self.get(slot).map(|id| (slot, id)))
    }
}
