//! # Kitchen Ticket Differ
//!
//! Decides what the kitchen printer has to print when a waiter sends a table's
//! order, so items already being prepared are not printed twice.
//!
//! ## Diff Rules
//! ```text
//! ┌─────────────────────────────────────────────────────────────────────────┐
//! │  previous snapshot      current order       ticket line                 │
//! │  ─────────────────      ─────────────       ───────────                 │
//! │  (absent)               2x X-Tudo       ──► 2x X-Tudo     (new line)    │
//! │  1x Fritas 200          3x Fritas 200   ──► 2x Fritas 200 (delta)       │
//! │  2x Coca-Cola           2x Coca-Cola    ──► (nothing)                   │
//! │  3x Guaraná             1x Guaraná      ──► (nothing)                   │
//! └─────────────────────────────────────────────────────────────────────────┘
//! ```
//!
//! If the rules leave nothing to print (only decreases since the last send),
//! the whole current list is printed instead. That fallback reprints items
//! the kitchen already has; it is kept as-is pending a product decision.

use chrono::{DateTime, Utc};
use tracing::debug;

use crate::types::{KitchenTicket, Order, OrderItem, Table, TableStatus};

/// Lines of `current` the kitchen has not seen yet, relative to `previous`.
///
/// New lines are returned whole; grown lines carry only the positive
/// quantity difference; unchanged or shrunk lines are omitted.
pub fn pending_items(previous: &[OrderItem], current: &[OrderItem]) -> Vec<OrderItem> {
    current
        .iter()
        .filter_map(|line| {
            match previous.iter().find(|p| p.item_id() == line.item_id()) {
                None => Some(line.clone()),
                Some(prev) if line.quantity > prev.quantity => Some(OrderItem {
                    quantity: line.quantity - prev.quantity,
                    ..line.clone()
                }),
                Some(_) => None,
            }
        })
        .collect()
}

/// Items to put on a ticket: the pending delta, or the full current list
/// when the delta is empty.
pub fn ticket_items(previous: &[OrderItem], current: &[OrderItem]) -> Vec<OrderItem> {
    let delta = pending_items(previous, current);
    if delta.is_empty() {
        current.to_vec()
    } else {
        delta
    }
}

/// Whether the order holds anything the kitchen has not been told about.
pub fn has_unsent_additions(order: &Order) -> bool {
    !order.sent_to_kitchen || !pending_items(&order.sent_items, &order.items).is_empty()
}

/// Records a kitchen send on `table` and builds the ticket.
///
/// `current` is the working list; it becomes both the order's items and its
/// new sent snapshot. Returns `None` when `current` is empty. An order is
/// attached first if the table has none.
pub fn record_send(
    table: &mut Table,
    current: &[OrderItem],
    now: DateTime<Utc>,
) -> Option<KitchenTicket> {
    if current.is_empty() {
        return None;
    }

    let table_id = table.id.clone();
    let order = table
        .order
        .get_or_insert_with(|| Order::new(&table_id, now));

    let items = ticket_items(&order.sent_items, current);

    order.items = current.to_vec();
    order.sent_items = current.to_vec();
    order.sent_to_kitchen = true;
    order.kitchen_ticket_time = Some(now);
    let order_id = order.id.clone();

    table.status = TableStatus::Waiting;

    debug!(
        table = table.number,
        order_id = %order_id,
        lines = items.len(),
        "Kitchen send recorded"
    );

    Some(KitchenTicket {
        order_id,
        table_number: table.number,
        table_name: table.display_name(),
        items,
        created_at: now,
        notes: None,
    })
}

// =============================================================================
// Unit Tests
// =============================================================================

#[cfg(test)]
mod tests {
    use super::*;
    use crate::menu::MenuCatalog;

    fn line(menu: &MenuCatalog, id: &str, quantity: u32) -> OrderItem {
        OrderItem {
            quantity,
            ..OrderItem::new(menu.find(id).unwrap())
        }
    }

    #[test]
    fn test_first_send_prints_everything() {
        let menu = MenuCatalog::dube_burger();
        let current = vec![line(&menu, "side-1", 3)];

        let items = ticket_items(&[], &current);
        assert_eq!(items, current);
    }

    #[test]
    fn test_grown_line_prints_only_difference() {
        let menu = MenuCatalog::dube_burger();
        let previous = vec![line(&menu, "side-1", 3), line(&menu, "drink-1", 2)];
        let current = vec![
            line(&menu, "side-1", 5),
            line(&menu, "drink-1", 2),
            line(&menu, "podrao-5", 1),
        ];

        let items = pending_items(&previous, &current);
        assert_eq!(items.len(), 2);
        assert_eq!(items[0].item_id(), "side-1");
        assert_eq!(items[0].quantity, 2);
        assert_eq!(items[1].item_id(), "podrao-5");
        assert_eq!(items[1].quantity, 1);
    }

    #[test]
    fn test_decrease_only_falls_back_to_full_list() {
        let menu = MenuCatalog::dube_burger();
        let previous = vec![line(&menu, "drink-3", 3), line(&menu, "side-2", 1)];
        let current = vec![line(&menu, "drink-3", 1), line(&menu, "side-2", 1)];

        assert!(pending_items(&previous, &current).is_empty());
        assert_eq!(ticket_items(&previous, &current), current);
    }

    #[test]
    fn test_delta_keeps_line_notes() {
        let menu = MenuCatalog::dube_burger();
        let previous = vec![line(&menu, "podrao-1", 1)];
        let mut grown = line(&menu, "podrao-1", 2);
        grown.notes = Some("bem passado".to_string());

        let items = pending_items(&previous, &[grown]);
        assert_eq!(items[0].quantity, 1);
        assert_eq!(items[0].notes.as_deref(), Some("bem passado"));
    }

    #[test]
    fn test_record_send_updates_table_and_snapshot() {
        let menu = MenuCatalog::dube_burger();
        let mut table = Table::new(3);
        let now = Utc::now();

        let ticket = record_send(&mut table, &[line(&menu, "side-1", 3)], now).unwrap();
        assert_eq!(ticket.table_number, 3);
        assert_eq!(ticket.table_name, "Table 3");
        assert_eq!(ticket.items[0].quantity, 3);
        assert_eq!(table.status, TableStatus::Waiting);

        let ticket = record_send(&mut table, &[line(&menu, "side-1", 5)], now).unwrap();
        assert_eq!(ticket.items.len(), 1);
        assert_eq!(ticket.items[0].quantity, 2);

        let order = table.order.as_ref().unwrap();
        assert_eq!(order.sent_items[0].quantity, 5);
        assert_eq!(order.kitchen_ticket_time, Some(now));
        assert!(order.sent_to_kitchen);
        assert!(!has_unsent_additions(order));
    }

    #[test]
    fn test_record_send_with_empty_list_is_noop() {
        let mut table = Table::new(1);
        assert!(record_send(&mut table, &[], Utc::now()).is_none());
        assert!(table.order.is_none());
        assert_eq!(table.status, TableStatus::Free);
    }
}
