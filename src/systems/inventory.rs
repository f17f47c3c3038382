//! Resource inventory and crafting systems.

use hecs::{Entity, World};
use log::{debug, info};

use crate::components::{Equipment, EquipmentSlot, ResourceKind, Resources};
use crate::error::CraftError;
use crate::events::{EventQueue, GameEvent};
use crate::systems::item_defs::{self, ItemDef};

/// Add resources directly to an entity's inventory
pub fn add_resources(world: &mut World, entity: Entity, amounts: &[(ResourceKind, u32)]) -> bool {
    if let Ok(mut resources) = world.get::<&mut Resources>(entity) {
        resources.add_all(amounts);
        true
    } else {
        false
    }
}

fn recipe_for(name: &str) -> Result<(&'static ItemDef, &'static [(ResourceKind, u32)]), CraftError> {
    item_defs::get_def(name)
        .and_then(|def| def.recipe.map(|recipe| (def, recipe)))
        .ok_or_else(|| CraftError::UnknownRecipe(name.to_string()))
}

/// Check a craft without performing it (drives the enabled state of craft buttons)
pub fn check_craft(world: &World, entity: Entity, name: &str) -> Result<EquipmentSlot, CraftError> {
    let (def, recipe) = recipe_for(name)?;
    let resources = world
        .get::<&Resources>(entity)
        .map_err(|_| CraftError::UnknownRecipe(name.to_string()))?;
    if let Some((resource, needed, available)) = resources.first_shortfall(recipe) {
        return Err(CraftError::InsufficientResources {
            resource,
            needed,
            available,
        });
    }
    Ok(def.slot)
}

/// Craft an item: pay every cost at once and equip the result in its slot.
/// A failed craft leaves resources and equipment untouched.
pub fn craft_item(
    world: &mut World,
    entity: Entity,
    name: &str,
    events: &mut EventQueue,
) -> Result<EquipmentSlot, CraftError> {
    let (def, recipe) = recipe_for(name)?;
    let slot = EquipmentSlot::from_item_name(def.name).unwrap_or(def.slot);

    let Ok((resources, equipment)) = world.query_one_mut::<(&mut Resources, &mut Equipment)>(entity) else {
        return Err(CraftError::UnknownRecipe(name.to_string()));
    };

    if let Some((resource, needed, available)) = resources.first_shortfall(recipe) {
        debug!(
            "Cannot craft {}: need {} {}, have {}",
            def.name,
            needed,
            resource.name(),
            available
        );
        return Err(CraftError::InsufficientResources {
            resource,
            needed,
            available,
        });
    }

    resources.try_spend(recipe);
    equipment.equip(slot, def.name);
    info!("Crafted {} into the {:?} slot", def.name, slot);
    events.push(GameEvent::ItemCrafted { name: def.name, slot });
    Ok(slot)
}
