//! # Table Registry
//!
//! Owns every table, its status and its attached order.
//!
//! ## Status Invariant
//! ```text
//! ┌─────────────────────────────────────────────────────────────────────────┐
//! │  order        sent_to_kitchen    unsent additions    status             │
//! │  ─────        ───────────────    ────────────────    ──────             │
//! │  None         -                  -                   Free               │
//! │  Some         false              -                   Ordering           │
//! │  Some         true               yes                 Ordering           │
//! │  Some         true               no                  Waiting            │
//! └─────────────────────────────────────────────────────────────────────────┘
//! ```
//!
//! Every mutating method leaves each table satisfying this table. The
//! registry does no I/O; the session persists it after each mutation.

use chrono::{DateTime, Utc};
use tracing::debug;

use crate::error::{CoreError, CoreResult};
use crate::kitchen;
use crate::types::{KitchenTicket, Order, OrderItem, Table, TableStatus};
use crate::validation::validate_table_name;

/// Status a table must have given its order.
pub fn expected_status(table: &Table) -> TableStatus {
    match &table.order {
        None => TableStatus::Free,
        Some(order) if kitchen::has_unsent_additions(order) => TableStatus::Ordering,
        Some(_) => TableStatus::Waiting,
    }
}

/// `count` free tables numbered 1..=count.
pub fn default_tables(count: u32) -> Vec<Table> {
    (1..=count).map(Table::new).collect()
}

/// The set of tables of the restaurant.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct TableRegistry {
    tables: Vec<Table>,
}

impl TableRegistry {
    /// Wraps loaded tables, repairing any status that breaks the invariant.
    pub fn new(tables: Vec<Table>) -> Self {
        let mut registry = TableRegistry { tables };
        registry.reconcile();
        registry
    }

    /// Registry of `count` free tables.
    pub fn with_default_tables(count: u32) -> Self {
        TableRegistry {
            tables: default_tables(count),
        }
    }

    /// Appends a free table numbered one above the current maximum.
    pub fn add_table(&mut self) -> &Table {
        let number = self.tables.iter().map(|t| t.number).max().unwrap_or(0) + 1;
        let idx = self.tables.len();
        self.tables.push(Table::new(number));
        debug!(number, "Table added");
        &self.tables[idx]
    }

    /// Sets the custom name, or clears it when `name` is blank.
    pub fn rename(&mut self, table_id: &str, name: &str) -> CoreResult<()> {
        let name = validate_table_name(name)?;
        let table = self.get_mut(table_id)?;
        debug!(number = table.number, ?name, "Table renamed");
        table.name = name;
        Ok(())
    }

    /// Copies the working list into the table's order.
    ///
    /// ## Behavior
    /// - Non-empty list, no order yet: an order is created
    /// - Empty list: the order is detached and the table becomes free
    /// - Status is recomputed afterwards
    pub fn write_back(
        &mut self,
        table_id: &str,
        items: &[OrderItem],
        now: DateTime<Utc>,
    ) -> CoreResult<TableStatus> {
        let table = self.get_mut(table_id)?;

        if items.is_empty() {
            if table.order.take().is_some() {
                debug!(number = table.number, "Last item removed, order detached");
            }
        } else {
            let table_id = table.id.clone();
            let order = table
                .order
                .get_or_insert_with(|| Order::new(&table_id, now));
            order.items = items.to_vec();
        }

        table.status = expected_status(table);
        Ok(table.status)
    }

    /// Records a kitchen send; see [`kitchen::record_send`].
    pub fn send_to_kitchen(
        &mut self,
        table_id: &str,
        items: &[OrderItem],
        now: DateTime<Utc>,
    ) -> CoreResult<Option<KitchenTicket>> {
        let table = self.get_mut(table_id)?;
        Ok(kitchen::record_send(table, items, now))
    }

    /// Detaches the order and frees the table. Returns the detached order.
    pub fn release(&mut self, table_id: &str) -> CoreResult<Option<Order>> {
        let table = self.get_mut(table_id)?;
        table.status = TableStatus::Free;
        Ok(table.order.take())
    }

    /// Forces every table's status to match its order. Returns how many
    /// tables were corrected.
    pub fn reconcile(&mut self) -> usize {
        let mut fixed = 0;
        for table in &mut self.tables {
            let expected = expected_status(table);
            if table.status != expected {
                debug!(number = table.number, from = ?table.status, to = ?expected, "Status reconciled");
                table.status = expected;
                fixed += 1;
            }
        }
        fixed
    }

    pub fn get(&self, table_id: &str) -> Option<&Table> {
        self.tables.iter().find(|t| t.id == table_id)
    }

    fn get_mut(&mut self, table_id: &str) -> CoreResult<&mut Table> {
        self.tables
            .iter_mut()
            .find(|t| t.id == table_id)
            .ok_or_else(|| CoreError::TableNotFound(table_id.to_string()))
    }

    /// Tables in insertion order.
    pub fn tables(&self) -> &[Table] {
        &self.tables
    }

    pub fn len(&self) -> usize {
        self.tables.len()
    }

    pub fn is_empty(&self) -> bool {
        self.tables.is_empty()
    }
}

// =============================================================================
// Unit Tests
// =============================================================================
