//! Equipment definitions - all item properties in one place.
//!
//! This module provides a data-driven approach to the equipment catalog.
//! Instead of scattering match statements across the codebase, every item
//! and its recipe is defined in a single static table.

use crate::components::{EquipmentSlot, ResourceKind};
use crate::constants::*;

pub const STARTER_WEAPON: &str = "Wooden Sword";
pub const STARTER_ARMOR: &str = "Leather Armor";
pub const STARTER_SHIELD: &str = "Wooden Shield";

/// Complete definition of an equipment item
#[derive(Debug)]
pub struct ItemDef {
    pub name: &'static str,
    pub slot: EquipmentSlot,
    /// Flat damage added to every landed swing (weapons only)
    pub weapon_bonus: i32,
    /// Crafting cost; starter gear has none
    pub recipe: Option<&'static [(ResourceKind, u32)]>,
}

/// Look up an item by its display name
pub fn get_def(name: &str) -> Option<&'static ItemDef> {
    ITEM_DEFS.iter().find(|def| def.name == name)
}

/// Every item that can be crafted, in catalog order
pub fn craftable() -> impl Iterator<Item = &'static ItemDef> {
    ITEM_DEFS.iter().filter(|def| def.recipe.is_some())
}

/// Damage bonus of the named weapon; unknown names fall back to the starter bonus
pub fn weapon_bonus(name: &str) -> i32 {
    get_def(name)
        .filter(|def| def.slot == EquipmentSlot::Weapon)
        .map(|def| def.weapon_bonus)
        .unwrap_or(STARTER_WEAPON_BONUS)
}

/// Static table of all equipment definitions
pub static ITEM_DEFS: &[ItemDef] = &[
    // =========================================================================
    // WEAPONS
    // =========================================================================
    ItemDef {
        name: STARTER_WEAPON,
        slot: EquipmentSlot::Weapon,
        weapon_bonus: STARTER_WEAPON_BONUS,
        recipe: None,
    },
    ItemDef {
        name: "Iron Sword",
        slot: EquipmentSlot::Weapon,
        weapon_bonus: CRAFTED_WEAPON_BONUS,
        recipe: Some(&[(ResourceKind::Iron, 5), (ResourceKind::Wood, 2)]),
    },
    ItemDef {
        name: "Crystal Blade",
        slot: EquipmentSlot::Weapon,
        weapon_bonus: CRAFTED_WEAPON_BONUS,
        recipe: Some(&[
            (ResourceKind::Crystal, 5),
            (ResourceKind::Iron, 3),
            (ResourceKind::Gold, 2),
        ]),
    },
    // =========================================================================
    // ARMOR
    // =========================================================================
    ItemDef {
        name: STARTER_ARMOR,
        slot: EquipmentSlot::Armor,
        weapon_bonus: 0,
        recipe: None,
    },
    ItemDef {
        name: "Iron Armor",
        slot: EquipmentSlot::Armor,
        weapon_bonus: 0,
        recipe: Some(&[(ResourceKind::Iron, 8), (ResourceKind::Leather, 3)]),
    },
    ItemDef {
        name: "Dragon Scale Armor",
        slot: EquipmentSlot::Armor,
        weapon_bonus: 0,
        recipe: Some(&[(ResourceKind::DragonScale, 3), (ResourceKind::Leather, 5)]),
    },
    // =========================================================================
    // SHIELDS
    // =========================================================================
    ItemDef {
        name: STARTER_SHIELD,
        slot: EquipmentSlot::Shield,
        weapon_bonus: 0,
        recipe: None,
    },
    ItemDef {
        name: "Iron Shield",
        slot: EquipmentSlot::Shield,
        weapon_bonus: 0,
        recipe: Some(&[(ResourceKind::Iron, 4), (ResourceKind::Wood, 3)]),
    },
];
