//! Per-actor inventory - consumable stacks and equip-slot exclusivity.

use serde::{Deserialize, Serialize};

use crate::items::{ItemId, ItemKind, Slot};

/// Identifier of a user or superhero.
pub type ActorId = u64;

/// A held quantity of one catalog item.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub struct Stack {
    pub item_id: ItemId,
    pub quantity: u32,
}

/// A worn clothing item and the slot it occupies.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub struct EquippedSlot {
    pub slot: Slot,
    pub item_id: ItemId,
}

/// Why a stack could not be consumed.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum TakeError {
    /// No stack for that item (or it is already at zero).
    Insufficient,
}

#[derive(Debug, Clone, PartialEq, Eq, Default, Serialize, Deserialize)]
#[serde(default)]
pub struct Inventory {
    pub actor_id: ActorId,
    pub food: Vec<Stack>,
    pub medicine: Vec<Stack>,
    pub clothing: Vec<Stack>,
    pub equipped: Vec<EquippedSlot>,
}

impl Inventory {
    /// Empty inventory for a first-time actor.
    pub fn empty(actor_id: ActorId) -> Self {
        Self {
            actor_id,
            ..Self::default()
        }
    }

    fn stacks(&self, kind: ItemKind) -> &Vec<Stack> {
        match kind {
            ItemKind::Food => &self.food,
            ItemKind::Medicine => &self.medicine,
            ItemKind::Clothing => &self.clothing,
        }
    }

    fn stacks_mut(&mut self, kind: ItemKind) -> &mut Vec<Stack> {
        match kind {
            ItemKind::Food => &mut self.food,
            ItemKind::Medicine => &mut self.medicine,
            ItemKind::Clothing => &mut self.clothing,
        }
    }

    /// Held quantity of an item (0 when absent).
    pub fn quantity(&self, kind: ItemKind, item_id: ItemId) -> u32 {
        self.stacks(kind)
            .iter()
            .find(|s| s.item_id == item_id)
            .map(|s| s.quantity)
            .unwrap_or(0)
    }

    pub fn holds(&self, kind: ItemKind, item_id: ItemId) -> bool {
        self.quantity(kind, item_id) >= 1
    }

    /// Add `quantity` to the item's stack, creating it if needed.
    pub fn add(&mut self, kind: ItemKind, item_id: ItemId, quantity: u32) {
        if quantity == 0 {
            return;
        }
        let stacks = self.stacks_mut(kind);
        match stacks.iter_mut().find(|s| s.item_id == item_id) {
            Some(stack) => stack.quantity = stack.quantity.saturating_add(quantity),
            None => stacks.push(Stack { item_id, quantity }),
        }
    }

    /// Consume one unit. The stack is removed when it reaches zero.
    /// Returns the quantity left.
    pub fn take_one(&mut self, kind: ItemKind, item_id: ItemId) -> Result<u32, TakeError> {
        let stacks = self.stacks_mut(kind);
        let index = stacks
            .iter()
            .position(|s| s.item_id == item_id && s.quantity >= 1)
            .ok_or(TakeError::Insufficient)?;

        stacks[index].quantity -= 1;
        let remaining = stacks[index].quantity;
        if remaining == 0 {
            stacks.remove(index);
        }
        Ok(remaining)
    }

    /// Wear `item_id` in `slot`, replacing whatever was there.
    /// Returns the item that was displaced, if any.
    pub fn equip(&mut self, slot: Slot, item_id: ItemId) -> Option<ItemId> {
        let displaced = self.unequip(slot).map(|e| e.item_id);
        self.equipped.push(EquippedSlot { slot, item_id });
        displaced
    }

    /// Remove whatever is worn in `slot`.
    pub fn unequip(&mut self, slot: Slot) -> Option<EquippedSlot> {
        let index = self.equipped.iter().position(|e| e.slot == slot)?;
        Some(self.equipped.remove(index))
    }

    pub fn equipped_in(&self, slot: Slot) -> Option<ItemId> {
        self.equipped
            .iter()
            .find(|e| e.slot == slot)
            .map(|e| e.item_id)
    }
}
