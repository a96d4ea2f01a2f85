//! # Order Composer
//!
//! The working item list of the currently selected table.
//!
//! ## Composer Operations
//! ```text
//! ┌─────────────────────────────────────────────────────────────────────────┐
//! │  Waiter Action           Composer Call           Working List Change    │
//! │  ─────────────           ─────────────           ───────────────────    │
//! │                                                                         │
//! │  Tap menu item ────────► add_item() ───────────► qty += 1 or push(1)   │
//! │                                                                         │
//! │  Tap "−" on a line ────► remove_item() ────────► qty -= 1 or remove    │
//! │                                                                         │
//! │  Type a note ──────────► set_notes() ──────────► line.notes = ...      │
//! │                                                                         │
//! │  Order footer ─────────► total() ──────────────► (read only)           │
//! └─────────────────────────────────────────────────────────────────────────┘
//! ```
//!
//! The composer knows nothing about tables. The session copies the list back
//! into the registry after every edit.

use crate::error::{CoreError, CoreResult};
use crate::money::Money;
use crate::types::{items_total, MenuItem, OrderItem};
use crate::validation::validate_notes;
use crate::{MAX_ITEM_QUANTITY, MAX_ORDER_LINES};

/// In-progress item list.
///
/// ## Invariants
/// - Lines are unique by menu item id
/// - Every line has `1 <= quantity <= MAX_ITEM_QUANTITY`
/// - At most `MAX_ORDER_LINES` lines
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct WorkingOrder {
    items: Vec<OrderItem>,
}

impl WorkingOrder {
    /// Creates an empty working order.
    pub fn new() -> Self {
        WorkingOrder { items: Vec::new() }
    }

    /// Starts from a table's existing items.
    ///
    /// Lines with quantity 0 are dropped so the invariant holds even for
    /// hand-edited persisted data.
    pub fn from_items(items: Vec<OrderItem>) -> Self {
        WorkingOrder {
            items: items.into_iter().filter(|i| i.quantity > 0).collect(),
        }
    }

    /// Adds one unit of `menu_item`.
    ///
    /// ## Behavior
    /// - Item already present: quantity + 1
    /// - Otherwise: new line with quantity 1
    pub fn add_item(&mut self, menu_item: &MenuItem) -> CoreResult<()> {
        if let Some(line) = self.items.iter_mut().find(|i| i.item_id() == menu_item.id) {
            let requested = line.quantity + 1;
            if requested > MAX_ITEM_QUANTITY {
                return Err(CoreError::QuantityTooLarge {
                    requested,
                    max: MAX_ITEM_QUANTITY,
                });
            }
            line.quantity = requested;
            return Ok(());
        }

        if self.items.len() >= MAX_ORDER_LINES {
            return Err(CoreError::OrderTooLarge {
                max: MAX_ORDER_LINES,
            });
        }

        self.items.push(OrderItem::new(menu_item));
        Ok(())
    }

    /// Removes one unit of the item.
    ///
    /// ## Behavior
    /// - quantity > 1: decrement
    /// - quantity == 1: drop the line
    /// - unknown id: no-op
    ///
    /// Returns whether the list changed.
    pub fn remove_item(&mut self, menu_item_id: &str) -> bool {
        let Some(pos) = self.items.iter().position(|i| i.item_id() == menu_item_id) else {
            return false;
        };

        if self.items[pos].quantity > 1 {
            self.items[pos].quantity -= 1;
        } else {
            self.items.remove(pos);
        }
        true
    }

    /// Sets or clears (empty string) the notes of a line.
    pub fn set_notes(&mut self, menu_item_id: &str, notes: &str) -> CoreResult<()> {
        let notes = validate_notes(notes)?;
        let line = self
            .items
            .iter_mut()
            .find(|i| i.item_id() == menu_item_id)
            .ok_or_else(|| CoreError::ItemNotInOrder(menu_item_id.to_string()))?;
        line.notes = notes;
        Ok(())
    }

    /// Σ quantity × unit price.
    pub fn total(&self) -> Money {
        items_total(&self.items)
    }

    /// Quantity of one item (0 when absent).
    pub fn quantity_of(&self, menu_item_id: &str) -> u32 {
        self.items
            .iter()
            .find(|i| i.item_id() == menu_item_id)
            .map_or(0, |i| i.quantity)
    }

    /// Sum of all line quantities.
    pub fn total_quantity(&self) -> u32 {
        self.items.iter().map(|i| i.quantity).sum()
    }

    pub fn items(&self) -> &[OrderItem] {
        &self.items
    }

    pub fn into_items(self) -> Vec<OrderItem> {
        self.items
    }

    pub fn len(&self) -> usize {
        self.items.len()
    }

    pub fn is_empty(&self) -> bool {
        self.items.is_empty()
    }

    pub fn clear(&mut self) {
        self.items.clear();
    }
}

// =============================================================================
// Unit Tests
// =============================================================================
