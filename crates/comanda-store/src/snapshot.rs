//! # Snapshot Blobs
//!
//! Encoding of the two persisted blobs and the fail-closed loaders.
//!
//! ## Blob Layout
//! ```text
//! comanda-tables  →  {"tables": [ {id, number, name?, status, order?}, ... ]}
//! comanda-ledger  →  {"orders": [ {id, tableNumber, items, total, ...}, ... ]}
//! ```
//!
//! ## Load Policy
//! ```text
//! ┌─────────────────────────────────────────────────────────────────────────┐
//! │  store.get(key)                                                         │
//! │     ├── Ok(Some(blob)) ── decode ok ──────────► loaded state            │
//! │     │                  └─ decode fails ───────► warn!, defaults         │
//! │     ├── Ok(None) ─────────────────────────────► defaults                │
//! │     └── Err(_) ───────────────────────────────► warn!, defaults         │
//! └─────────────────────────────────────────────────────────────────────────┘
//! ```
//! Defaults are N free tables numbered 1..=N, or an empty ledger. Loaders
//! never return an error: a POS that cannot read yesterday's state must
//! still open for service.

use std::collections::HashSet;

use serde::{Deserialize, Serialize};
use tracing::{debug, info, warn};

use comanda_core::table::{expected_status, TableRegistry};
use comanda_core::{items_total, CompletedOrder, OrderItem, Table, MAX_ITEM_QUANTITY};

use crate::error::{StoreError, StoreResult};
use crate::kv::KeyValueStore;

/// Key of the table-list blob.
pub const TABLES_KEY: &str = "comanda-tables";

/// Key of the completed-order ledger blob.
pub const LEDGER_KEY: &str = "comanda-ledger";

#[derive(Debug, Deserialize)]
struct TablesBlob {
    #[serde(default)]
    tables: Option<Vec<Table>>,
}

#[derive(Debug, Serialize)]
struct TablesBlobRef<'a> {
    tables: &'a [Table],
}

#[derive(Debug, Deserialize)]
struct LedgerBlob {
    #[serde(default)]
    orders: Vec<CompletedOrder>,
}

#[derive(Debug, Serialize)]
struct LedgerBlobRef<'a> {
    orders: &'a [CompletedOrder],
}

fn malformed(key: &str, reason: String) -> StoreError {
    StoreError::serialization(key, <serde_json::Error as serde::de::Error>::custom(reason))
}

/// Checks item lines against the composer's rules: unique menu item ids,
/// `quantity <= MAX_ITEM_QUANTITY`, no negative prices.
fn check_lines(key: &str, lines: &[OrderItem]) -> StoreResult<()> {
    let mut ids = HashSet::new();
    for line in lines {
        if !ids.insert(line.item_id()) {
            return Err(malformed(key, format!("duplicate line {}", line.item_id())));
        }
        if line.quantity > MAX_ITEM_QUANTITY {
            return Err(malformed(
                key,
                format!("quantity {} of {} over limit", line.quantity, line.item_id()),
            ));
        }
        if line.menu_item.price.cents() < 0 {
            return Err(malformed(key, format!("negative price on {}", line.item_id())));
        }
    }
    Ok(())
}

// =============================================================================
// Tables
// =============================================================================

/// Decodes a table blob.
///
/// Returns `Ok(None)` when the blob has no `tables` field. Duplicate table
/// ids and order lines that break the composer's rules are rejected as
/// malformed.
pub fn decode_tables(blob: &str) -> StoreResult<Option<Vec<Table>>> {
    let parsed: TablesBlob =
        serde_json::from_str(blob).map_err(|e| StoreError::serialization(TABLES_KEY, e))?;

    if let Some(tables) = &parsed.tables {
        let mut ids = HashSet::new();
        if let Some(dup) = tables.iter().find(|t| !ids.insert(t.id.as_str())) {
            return Err(malformed(TABLES_KEY, format!("duplicate table id {}", dup.id)));
        }
        for order in tables.iter().filter_map(|t| t.order.as_ref()) {
            check_lines(TABLES_KEY, &order.items)?;
            check_lines(TABLES_KEY, &order.sent_items)?;
        }
    }

    Ok(parsed.tables)
}

/// Encodes the table list.
pub fn encode_tables(tables: &[Table]) -> StoreResult<String> {
    serde_json::to_string(&TablesBlobRef { tables })
        .map_err(|e| StoreError::serialization(TABLES_KEY, e))
}

/// Loads the registry, falling back to `default_count` free tables.
pub fn load_tables<S: KeyValueStore + ?Sized>(store: &S, default_count: u32) -> TableRegistry {
    let blob = match store.get(TABLES_KEY) {
        Ok(Some(blob)) => blob,
        Ok(None) => {
            info!(count = default_count, "No saved tables, creating defaults");
            return TableRegistry::with_default_tables(default_count);
        }
        Err(e) => {
            warn!(error = %e, "Failed to read saved tables, using defaults");
            return TableRegistry::with_default_tables(default_count);
        }
    };

    match decode_tables(&blob) {
        Ok(Some(tables)) => {
            let fixed = tables
                .iter()
                .filter(|t| t.status != expected_status(t))
                .count();
            if fixed > 0 {
                warn!(fixed, "Saved table statuses disagreed with their orders");
            }
            let registry = TableRegistry::new(tables);
            debug!(tables = registry.len(), "Tables loaded");
            registry
        }
        Ok(None) => {
            info!(count = default_count, "Saved state has no tables, creating defaults");
            TableRegistry::with_default_tables(default_count)
        }
        Err(e) => {
            warn!(error = %e, "Discarding malformed table blob");
            TableRegistry::with_default_tables(default_count)
        }
    }
}

/// Writes the full table list.
pub fn save_tables<S: KeyValueStore + ?Sized>(
    store: &mut S,
    registry: &TableRegistry,
) -> StoreResult<()> {
    let blob = encode_tables(registry.tables())?;
    store.set(TABLES_KEY, &blob)
}

// =============================================================================
// Ledger
// =============================================================================

/// Decodes a ledger blob.
///
/// Every entry must hold valid lines and a `total` equal to the sum of
/// its lines.
pub fn decode_ledger(blob: &str) -> StoreResult<Vec<CompletedOrder>> {
    let parsed: LedgerBlob =
        serde_json::from_str(blob).map_err(|e| StoreError::serialization(LEDGER_KEY, e))?;

    for order in &parsed.orders {
        check_lines(LEDGER_KEY, &order.items)?;
        if order.total != items_total(&order.items) {
            return Err(malformed(
                LEDGER_KEY,
                format!("total of {} does not match its items", order.id),
            ));
        }
    }

    Ok(parsed.orders)
}

/// Encodes the ledger.
pub fn encode_ledger(orders: &[CompletedOrder]) -> StoreResult<String> {
    serde_json::to_string(&LedgerBlobRef { orders })
        .map_err(|e| StoreError::serialization(LEDGER_KEY, e))
}

/// Loads the ledger, falling back to an empty one.
pub fn load_ledger<S: KeyValueStore + ?Sized>(store: &S) -> Vec<CompletedOrder> {
    let blob = match store.get(LEDGER_KEY) {
        Ok(Some(blob)) => blob,
        Ok(None) => return Vec::new(),
        Err(e) => {
            warn!(error = %e, "Failed to read ledger, starting empty");
            return Vec::new();
        }
    };

    match decode_ledger(&blob) {
        Ok(orders) => {
            debug!(orders = orders.len(), "Ledger loaded");
            orders
        }
        Err(e) => {
            warn!(error = %e, "Discarding malformed ledger blob");
            Vec::new()
        }
    }
}

/// Writes the full ledger.
pub fn save_ledger<S: KeyValueStore + ?Sized>(
    store: &mut S,
    orders: &[CompletedOrder],
) -> StoreResult<()> {
    let blob = encode_ledger(orders)?;
    store.set(LEDGER_KEY, &blob)
}

// =============================================================================
// Unit Tests
// =============================================================================

#[cfg(test)]
mod tests {
    use super::*;
    use crate::kv::MemoryStore;
    use chrono::Utc;
    use comanda_core::menu::MenuCatalog;
    use comanda_core::settlement::complete_order;
    use comanda_core::{Money, PaymentMethod, TableStatus};

    /// A store whose reads always fail.
    struct BrokenStore;

    impl KeyValueStore for BrokenStore {
        fn get(&self, key: &str) -> StoreResult<Option<String>> {
            Err(StoreError::io(
                key,
                std::io::Error::new(std::io::ErrorKind::Other, "disk on fire"),
            ))
        }

        fn set(&mut self, _key: &str, _value: &str) -> StoreResult<()> {
            Ok(())
        }

        fn remove(&mut self, _key: &str) -> StoreResult<()> {
            Ok(())
        }
    }

    #[test]
    fn test_missing_blobs_give_defaults() {
        let store = MemoryStore::new();
        let registry = load_tables(&store, 6);
        assert_eq!(registry.len(), 6);
        assert!(load_ledger(&store).is_empty());
    }

    #[test]
    fn test_read_failure_gives_defaults() {
        let registry = load_tables(&BrokenStore, 4);
        assert_eq!(registry.len(), 4);
        assert!(load_ledger(&BrokenStore).is_empty());
    }

    #[test]
    fn test_malformed_blobs_fail_closed() {
        let mut store = MemoryStore::new();
        store.set(TABLES_KEY, "{not json").unwrap();
        store.set(LEDGER_KEY, "{\"orders\": 12}").unwrap();

        let registry = load_tables(&store, 3);
        assert_eq!(registry.len(), 3);
        assert!(registry.tables().iter().all(Table::is_free));
        assert!(load_ledger(&store).is_empty());
    }

    #[test]
    fn test_ledger_with_inconsistent_total_fails_closed() {
        let menu = MenuCatalog::dube_burger();
        let items = vec![OrderItem::new(menu.find("drink-1").unwrap())];
        let mut forged = complete_order(1, items, PaymentMethod::Cash, Utc::now());
        forged.total = Money::from_cents(i64::MAX);

        let mut store = MemoryStore::new();
        save_ledger(&mut store, &[forged.clone(), forged]).unwrap();

        assert!(decode_ledger(&store.get(LEDGER_KEY).unwrap().unwrap()).is_err());
        assert!(load_ledger(&store).is_empty());
    }

    #[test]
    fn test_ledger_with_over_limit_quantity_fails_closed() {
        let menu = MenuCatalog::dube_burger();
        let mut line = OrderItem::new(menu.find("drink-1").unwrap());
        line.quantity = u32::MAX;
        let done = complete_order(1, vec![line], PaymentMethod::Pix, Utc::now());

        let blob = encode_ledger(&[done]).unwrap();
        assert!(decode_ledger(&blob).is_err());
    }

    fn table_with_items(items: Vec<OrderItem>) -> Table {
        let mut registry = TableRegistry::with_default_tables(1);
        let id = registry.tables()[0].id.clone();
        registry.write_back(&id, &items, Utc::now()).unwrap();
        registry.tables()[0].clone()
    }

    #[test]
    fn test_duplicate_order_lines_fail_closed() {
        let menu = MenuCatalog::dube_burger();
        let coke = OrderItem::new(menu.find("drink-1").unwrap());
        let table = table_with_items(vec![coke.clone(), coke]);

        let mut store = MemoryStore::new();
        store.set(TABLES_KEY, &encode_tables(&[table]).unwrap()).unwrap();

        let registry = load_tables(&store, 4);
        assert_eq!(registry.len(), 4);
        assert!(registry.tables().iter().all(Table::is_free));
    }

    #[test]
    fn test_bad_sent_lines_fail_closed() {
        let menu = MenuCatalog::dube_burger();
        let coke = OrderItem::new(menu.find("drink-1").unwrap());
        let mut table = table_with_items(vec![coke.clone()]);
        let mut cheap = coke;
        cheap.menu_item.price = Money::from_cents(-700);
        if let Some(order) = table.order.as_mut() {
            order.sent_items = vec![cheap];
        }

        let blob = encode_tables(&[table]).unwrap();
        assert!(decode_tables(&blob).is_err());
    }

    #[test]
    fn test_blob_without_tables_field_gives_defaults() {
        let mut store = MemoryStore::new();
        store.set(TABLES_KEY, "{}").unwrap();
        assert_eq!(load_tables(&store, 2).len(), 2);
    }

    #[test]
    fn test_duplicate_table_ids_are_malformed() {
        let table = Table::new(1);
        let blob = encode_tables(&[table.clone(), table]).unwrap();
        assert!(decode_tables(&blob).is_err());
    }

    #[test]
    fn test_tables_roundtrip_with_order() {
        let menu = MenuCatalog::dube_burger();
        let mut registry = TableRegistry::with_default_tables(2);
        let id = registry.tables()[1].id.clone();
        registry.rename(&id, "Varanda").unwrap();
        let items = vec![OrderItem::new(menu.find("drink-8").unwrap())];
        registry.write_back(&id, &items, Utc::now()).unwrap();

        let mut store = MemoryStore::new();
        save_tables(&mut store, &registry).unwrap();
        let loaded = load_tables(&store, 6);

        assert_eq!(loaded, registry);
        let table = loaded.get(&id).unwrap();
        assert_eq!(table.status, TableStatus::Ordering);
        assert_eq!(table.display_name(), "Varanda");
    }

    #[test]
    fn test_loaded_status_is_reconciled() {
        let mut table = Table::new(1);
        table.status = TableStatus::Waiting;
        let mut store = MemoryStore::new();
        store.set(TABLES_KEY, &encode_tables(&[table]).unwrap()).unwrap();

        let registry = load_tables(&store, 6);
        assert_eq!(registry.tables()[0].status, TableStatus::Free);
    }

    #[test]
    fn test_ledger_roundtrip() {
        let menu = MenuCatalog::dube_burger();
        let items = vec![OrderItem::new(menu.find("side-5").unwrap())];
        let done = complete_order(2, items, PaymentMethod::Card, Utc::now());

        let mut store = MemoryStore::new();
        save_ledger(&mut store, std::slice::from_ref(&done)).unwrap();

        assert_eq!(load_ledger(&store), vec![done]);
    }
}
