//! # POS Session
//!
//! The single owned state object of a running POS: tables, the working order
//! of the selected table, the completed-order ledger, and the store they are
//! persisted to.
//!
//! ## Operation Flow
//! ```text
//! ┌─────────────────────────────────────────────────────────────────────────┐
//! │                    Session Operations                                   │
//! │                                                                         │
//! │  Waiter Action         Session Method           State Change            │
//! │  ─────────────         ──────────────           ────────────            │
//! │                                                                         │
//! │  Tap table ──────────► select_table() ────────► working = order items  │
//! │                                                                         │
//! │  Tap menu item ──────► add_item() ────────────► working +1, write-back │
//! │                                                 persist tables         │
//! │                                                                         │
//! │  Tap "-" ────────────► remove_item() ─────────► working -1, write-back │
//! │                                                 persist tables         │
//! │                                                                         │
//! │  "Enviar cozinha" ───► send_to_kitchen() ─────► snapshot, Waiting      │
//! │                                                 persist tables         │
//! │                                                                         │
//! │  "Fechar conta" ─────► finalize(method) ──────► ledger += order        │
//! │                                                 table Free, deselect   │
//! │                                                 persist both           │
//! │                                                                         │
//! │  NOTE: Saves are fire-and-forget. A failed save is logged at warn      │
//! │        and the in-memory state stays authoritative.                    │
//! └─────────────────────────────────────────────────────────────────────────┘
//! ```

use chrono::NaiveDate;
use tracing::{debug, info, warn};

use comanda_core::order::WorkingOrder;
use comanda_core::settlement::{complete_order, remove_day, summarize};
use comanda_core::table::TableRegistry;
use comanda_core::{
    Clock, CompletedOrder, CoreError, CoreResult, DailySummary, KitchenTicket, MenuItem, Money,
    OrderItem, PaymentMethod, SystemClock, Table, TableStatus,
};
use comanda_store::{load_ledger, load_tables, save_ledger, save_tables, KeyValueStore};

/// A POS session over a store `S`, reading time from `C`.
#[derive(Debug)]
pub struct PosSession<S: KeyValueStore, C: Clock = SystemClock> {
    registry: TableRegistry,
    ledger: Vec<CompletedOrder>,
    selected: Option<String>,
    working: WorkingOrder,
    store: S,
    clock: C,
}

impl<S: KeyValueStore, C: Clock> PosSession<S, C> {
    /// Opens a session, loading tables and ledger from `store`.
    ///
    /// Missing or unreadable state yields `default_table_count` free tables
    /// and an empty ledger. Nothing is selected.
    pub fn open(store: S, clock: C, default_table_count: u32) -> Self {
        let registry = load_tables(&store, default_table_count);
        let ledger = load_ledger(&store);

        info!(
            tables = registry.len(),
            ledger = ledger.len(),
            "POS session opened"
        );

        PosSession {
            registry,
            ledger,
            selected: None,
            working: WorkingOrder::new(),
            store,
            clock,
        }
    }

    // =========================================================================
    // Table Registry
    // =========================================================================

    pub fn tables(&self) -> &[Table] {
        self.registry.tables()
    }

    pub fn table(&self, table_id: &str) -> Option<&Table> {
        self.registry.get(table_id)
    }

    /// The active table, if any.
    pub fn selected_table(&self) -> Option<&Table> {
        self.selected.as_deref().and_then(|id| self.registry.get(id))
    }

    /// Appends a free table numbered one above the current maximum.
    pub fn add_table(&mut self) -> Table {
        let table = self.registry.add_table().clone();
        self.persist_tables();
        table
    }

    /// Sets the table's display name; blank clears it.
    pub fn update_table_name(&mut self, table_id: &str, name: &str) -> CoreResult<()> {
        self.registry.rename(table_id, name)?;
        self.persist_tables();
        Ok(())
    }

    /// Makes `table_id` the active table and loads its items.
    pub fn select_table(&mut self, table_id: &str) -> CoreResult<()> {
        self.load_working_order(table_id)?;
        self.selected = Some(table_id.to_string());
        debug!(table_id, "Table selected");
        Ok(())
    }

    /// Replaces the working set with the items saved on `table_id` (empty if
    /// the table has no order).
    pub fn load_working_order(&mut self, table_id: &str) -> CoreResult<()> {
        let table = self
            .registry
            .get(table_id)
            .ok_or_else(|| CoreError::TableNotFound(table_id.to_string()))?;

        let items = table
            .order
            .as_ref()
            .map(|order| order.items.clone())
            .unwrap_or_default();
        self.working = WorkingOrder::from_items(items);
        Ok(())
    }

    /// Deselects the active table. The registry is untouched.
    pub fn close_table(&mut self) {
        if let Some(id) = self.selected.take() {
            debug!(table_id = %id, "Table closed");
        }
        self.working.clear();
    }

    // =========================================================================
    // Order Composer
    // =========================================================================

    /// Lines of the working order.
    pub fn working_items(&self) -> &[OrderItem] {
        self.working.items()
    }

    /// Σ quantity × unit price of the working order.
    pub fn order_total(&self) -> Money {
        self.working.total()
    }

    /// Adds one unit of `menu_item` to the active table.
    ///
    /// Returns the table's status after the write-back: a free or waiting
    /// table becomes `Ordering`.
    pub fn add_item(&mut self, menu_item: &MenuItem) -> CoreResult<TableStatus> {
        let table_id = self.selected_id()?;
        self.working.add_item(menu_item)?;
        debug!(item = %menu_item.id, qty = self.working.quantity_of(&menu_item.id), "Item added");
        self.write_back(&table_id)
    }

    /// Removes one unit of the item. Unknown ids leave everything unchanged.
    ///
    /// Removing the last unit of the last line detaches the order and frees
    /// the table.
    pub fn remove_item(&mut self, menu_item_id: &str) -> CoreResult<TableStatus> {
        let table_id = self.selected_id()?;
        if !self.working.remove_item(menu_item_id) {
            return self.current_status(&table_id);
        }
        debug!(item = menu_item_id, "Item removed");
        self.write_back(&table_id)
    }

    /// Sets or clears the notes of a working-order line.
    pub fn set_item_notes(&mut self, menu_item_id: &str, notes: &str) -> CoreResult<()> {
        let table_id = self.selected_id()?;
        self.working.set_notes(menu_item_id, notes)?;
        self.write_back(&table_id)?;
        Ok(())
    }

    fn write_back(&mut self, table_id: &str) -> CoreResult<TableStatus> {
        let now = self.clock.now();
        let status = self
            .registry
            .write_back(table_id, self.working.items(), now)?;
        self.persist_tables();
        Ok(status)
    }

    fn selected_id(&self) -> CoreResult<String> {
        self.selected.clone().ok_or(CoreError::NoTableSelected)
    }

    fn current_status(&self, table_id: &str) -> CoreResult<TableStatus> {
        self.registry
            .get(table_id)
            .map(|t| t.status)
            .ok_or_else(|| CoreError::TableNotFound(table_id.to_string()))
    }

    // =========================================================================
    // Kitchen
    // =========================================================================

    /// Sends the active table's order to the kitchen.
    ///
    /// Returns `None` when nothing is selected or the working order is empty.
    /// Otherwise the ticket holds the lines the kitchen has not seen yet, or
    /// the whole order when there are none.
    pub fn send_to_kitchen(&mut self) -> Option<KitchenTicket> {
        let table_id = self.selected.clone()?;
        if self.working.is_empty() {
            return None;
        }

        let now = self.clock.now();
        let ticket = match self
            .registry
            .send_to_kitchen(&table_id, self.working.items(), now)
        {
            Ok(ticket) => ticket?,
            Err(e) => {
                warn!(error = %e, "Selected table vanished before kitchen send");
                return None;
            }
        };
        self.persist_tables();

        info!(
            table = ticket.table_number,
            order = %ticket.short_order_id(),
            lines = ticket.items.len(),
            "Order sent to kitchen"
        );
        Some(ticket)
    }

    // =========================================================================
    // Settlement Ledger
    // =========================================================================

    /// Closes the active table's bill.
    ///
    /// Appends a completed order with the computed total, frees the table,
    /// clears the working order and deselects. Returns `None` when nothing is
    /// selected or the working order is empty.
    pub fn finalize(&mut self, payment_method: PaymentMethod) -> Option<CompletedOrder> {
        let table_id = self.selected.clone()?;
        if self.working.is_empty() {
            return None;
        }
        let table_number = self.registry.get(&table_id)?.number;

        let items = std::mem::take(&mut self.working).into_items();
        let completed = complete_order(table_number, items, payment_method, self.clock.now());

        self.ledger.push(completed.clone());
        if let Err(e) = self.registry.release(&table_id) {
            warn!(error = %e, "Could not release finalized table");
        }
        self.selected = None;

        self.persist_ledger();
        self.persist_tables();

        info!(
            table = table_number,
            total = %completed.total,
            method = payment_method.label(),
            "Order finalized"
        );
        Some(completed)
    }

    /// Cashier closing for today.
    pub fn daily_summary(&self) -> DailySummary {
        self.summary_for(self.clock.today())
    }

    /// Cashier closing for any local calendar day.
    pub fn summary_for(&self, day: NaiveDate) -> DailySummary {
        summarize(&self.ledger, day)
    }

    /// Deletes today's entries from the ledger. Earlier days are kept.
    ///
    /// Returns how many entries were removed. Irreversible.
    pub fn clear_today(&mut self) -> usize {
        let today = self.clock.today();
        let removed = remove_day(&mut self.ledger, today);
        self.persist_ledger();
        info!(%today, removed, "Today's ledger cleared");
        removed
    }

    /// Every completed order, in completion order.
    pub fn ledger(&self) -> &[CompletedOrder] {
        &self.ledger
    }

    // =========================================================================
    // Persistence
    // =========================================================================

    pub fn store(&self) -> &S {
        &self.store
    }

    /// Ends the session, handing back the store.
    pub fn into_store(self) -> S {
        self.store
    }

    fn persist_tables(&mut self) {
        if let Err(e) = save_tables(&mut self.store, &self.registry) {
            warn!(error = %e, "Failed to save tables");
        }
    }

    fn persist_ledger(&mut self) {
        if let Err(e) = save_ledger(&mut self.store, &self.ledger) {
            warn!(error = %e, "Failed to save ledger");
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use comanda_core::menu::MenuCatalog;
    use comanda_core::FixedClock;
    use comanda_store::MemoryStore;

    fn session() -> PosSession<MemoryStore, FixedClock> {
        PosSession::open(MemoryStore::new(), FixedClock(chrono::Utc::now()), 6)
    }

    #[test]
    fn test_open_creates_default_tables() {
        let session = session();
        assert_eq!(session.tables().len(), 6);
        assert!(session.selected_table().is_none());
        assert!(session.ledger().is_empty());
    }

    #[test]
    fn test_edits_require_selection() {
        let menu = MenuCatalog::dube_burger();
        let mut session = session();
        let item = menu.find("drink-1").unwrap();

        assert_eq!(session.add_item(item), Err(CoreError::NoTableSelected));
        assert_eq!(session.remove_item("drink-1"), Err(CoreError::NoTableSelected));
    }

    #[test]
    fn test_select_unknown_table() {
        let mut session = session();
        assert_eq!(
            session.select_table("nope"),
            Err(CoreError::TableNotFound("nope".to_string()))
        );
        assert!(session.selected_table().is_none());
    }

    #[test]
    fn test_remove_unknown_item_is_noop() {
        let menu = MenuCatalog::dube_burger();
        let mut session = session();
        let id = session.tables()[0].id.clone();
        session.select_table(&id).unwrap();
        session.add_item(menu.find("side-1").unwrap()).unwrap();

        assert_eq!(session.remove_item("nope"), Ok(TableStatus::Ordering));
        assert_eq!(session.working_items().len(), 1);
    }

    #[test]
    fn test_notes_are_written_back() {
        let menu = MenuCatalog::dube_burger();
        let mut session = session();
        let id = session.tables()[0].id.clone();
        session.select_table(&id).unwrap();
        session.add_item(menu.find("artesanal-1").unwrap()).unwrap();

        session.set_item_notes("artesanal-1", " sem cebola ").unwrap();

        let order = session.table(&id).unwrap().order.as_ref().unwrap();
        assert_eq!(order.items[0].notes.as_deref(), Some("sem cebola"));
        assert!(matches!(
            session.set_item_notes("drink-1", "gelo"),
            Err(CoreError::ItemNotInOrder(_))
        ));
    }

    #[test]
    fn test_close_table_keeps_registry() {
        let menu = MenuCatalog::dube_burger();
        let mut session = session();
        let id = session.tables()[0].id.clone();
        session.select_table(&id).unwrap();
        session.add_item(menu.find("side-1").unwrap()).unwrap();

        session.close_table();

        assert!(session.selected_table().is_none());
        assert!(session.working_items().is_empty());
        assert_eq!(session.table(&id).unwrap().status, TableStatus::Ordering);

        session.select_table(&id).unwrap();
        assert_eq!(session.working_items().len(), 1);
    }
}
