//! # Domain Types
//!
//! Core domain types used throughout Comanda POS.
//!
//! ## Type Hierarchy
//! ```text
//! ┌─────────────────────────────────────────────────────────────────────────┐
//! │                         Domain Types                                    │
//! │                                                                         │
//! │  ┌─────────────────┐   ┌─────────────────┐   ┌─────────────────┐       │
//! │  │     Table       │   │     Order       │   │   OrderItem     │       │
//! │  │  ─────────────  │   │  ─────────────  │   │  ─────────────  │       │
//! │  │  id (UUID)      │ 1 │  id (UUID)      │ * │  menu_item      │       │
//! │  │  number         │──►│  items          │──►│  quantity ≥ 1   │       │
//! │  │  name?          │ ? │  sent_items     │   │  notes?         │       │
//! │  │  status         │   │  sent_to_kitchen│   └─────────────────┘       │
//! │  └─────────────────┘   └─────────────────┘                              │
//! │                                                                         │
//! │  ┌─────────────────┐   ┌─────────────────┐   ┌─────────────────┐       │
//! │  │ CompletedOrder  │   │  DailySummary   │   │ PaymentMethod   │       │
//! │  │  ─────────────  │   │  ─────────────  │   │  ─────────────  │       │
//! │  │  table_number   │──►│  date           │   │  Cash           │       │
//! │  │  total          │ * │  total_cash/... │   │  Card           │       │
//! │  │  payment_method │   │  grand_total    │   │  Pix            │       │
//! │  └─────────────────┘   └─────────────────┘   └─────────────────┘       │
//! └─────────────────────────────────────────────────────────────────────────┘
//! ```
//!
//! ## Snapshot Pattern
//! `OrderItem` stores a full copy of the `MenuItem` it was created from, so
//! persisted orders and ledger entries keep the name and price that applied
//! when the item was ordered.

use chrono::{DateTime, NaiveDate, Utc};
use serde::{Deserialize, Serialize};
use ts_rs::TS;

use crate::money::Money;

// =============================================================================
// Menu
// =============================================================================

/// Menu sections, in the order the order screen shows them.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize, TS)]
#[ts(export)]
#[serde(rename_all = "snake_case")]
pub enum MenuCategory {
    /// House burgers.
    Artesanal,
    /// Street-style "podrão" sandwiches.
    Podrao,
    /// Pasta dishes and add-ons.
    Macarrao,
    Drinks,
    Sides,
}

impl MenuCategory {
    /// All categories in display order.
    pub const ALL: [MenuCategory; 5] = [
        MenuCategory::Artesanal,
        MenuCategory::Podrao,
        MenuCategory::Macarrao,
        MenuCategory::Drinks,
        MenuCategory::Sides,
    ];
}

/// A purchasable menu entry. Immutable once the catalog is built.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize, TS)]
#[ts(export)]
#[serde(rename_all = "camelCase")]
pub struct MenuItem {
    /// Stable business identifier (e.g. `drink-1`).
    pub id: String,
    pub name: String,
    /// Unit price in centavos.
    pub price: Money,
    pub category: MenuCategory,
}

// =============================================================================
// Order Item
// =============================================================================

/// One line of an order.
///
/// ## Invariant
/// `quantity >= 1`. The composer removes a line instead of letting it reach 0.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize, TS)]
#[ts(export)]
#[serde(rename_all = "camelCase")]
pub struct OrderItem {
    /// Menu item at the time it was ordered (frozen).
    pub menu_item: MenuItem,
    pub quantity: u32,
    /// Free-text kitchen notes ("sem cebola").
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub notes: Option<String>,
}

impl OrderItem {
    /// Creates a single-quantity line for a menu item.
    pub fn new(menu_item: &MenuItem) -> Self {
        OrderItem {
            menu_item: menu_item.clone(),
            quantity: 1,
            notes: None,
        }
    }

    /// Menu item id this line refers to.
    #[inline]
    pub fn item_id(&self) -> &str {
        &self.menu_item.id
    }

    /// Line total (unit price × quantity).
    #[inline]
    pub fn line_total(&self) -> Money {
        self.menu_item.price.multiply_quantity(self.quantity)
    }
}

/// Sums line totals.
pub fn items_total(items: &[OrderItem]) -> Money {
    items.iter().map(OrderItem::line_total).sum()
}

// =============================================================================
// Table Status
// =============================================================================

/// Where a table is in its service cycle.
///
/// ```text
///  free ──add_item──► ordering ──send_to_kitchen──► waiting
///   ▲                    ▲                             │
///   │                    └──────── add_item ───────────┘
///   └──────────────── finalize ────────────────────────┘
/// ```
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default, Serialize, Deserialize, TS)]
#[ts(export)]
#[serde(rename_all = "snake_case")]
pub enum TableStatus {
    /// No order attached.
    #[default]
    Free,
    /// Order attached, not sent or with unsent additions.
    Ordering,
    /// Everything in the order has been sent to the kitchen.
    Waiting,
}

// =============================================================================
// Order
// =============================================================================

/// The active order of one table.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize, TS)]
#[ts(export)]
#[serde(rename_all = "camelCase")]
pub struct Order {
    pub id: String,
    /// Owning table.
    pub table_id: String,
    pub items: Vec<OrderItem>,
    #[ts(as = "String")]
    pub created_at: DateTime<Utc>,
    /// Whether at least one kitchen ticket was produced for this order.
    #[serde(default)]
    pub sent_to_kitchen: bool,
    /// Items as they were at the last kitchen send (diff baseline).
    #[serde(default)]
    pub sent_items: Vec<OrderItem>,
    /// When the last kitchen ticket was produced.
    #[serde(default)]
    #[ts(as = "Option<String>")]
    pub kitchen_ticket_time: Option<DateTime<Utc>>,
}

impl Order {
    /// Creates an empty, unsent order for a table.
    pub fn new(table_id: &str, now: DateTime<Utc>) -> Self {
        Order {
            id: uuid::Uuid::new_v4().to_string(),
            table_id: table_id.to_string(),
            items: Vec::new(),
            created_at: now,
            sent_to_kitchen: false,
            sent_items: Vec::new(),
            kitchen_ticket_time: None,
        }
    }

    /// Order total.
    pub fn total(&self) -> Money {
        items_total(&self.items)
    }
}

// =============================================================================
// Table
// =============================================================================

/// A dining table.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize, TS)]
#[ts(export)]
#[serde(rename_all = "camelCase")]
pub struct Table {
    pub id: String,
    /// Sequential number, unique within the registry.
    pub number: u32,
    /// Custom display name ("Varanda", "Balcão").
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub name: Option<String>,
    pub status: TableStatus,
    #[serde(default)]
    pub order: Option<Order>,
}

impl Table {
    /// Creates a free table with a fresh id.
    pub fn new(number: u32) -> Self {
        Table {
            id: uuid::Uuid::new_v4().to_string(),
            number,
            name: None,
            status: TableStatus::Free,
            order: None,
        }
    }

    /// Custom name if set, otherwise `Table {number}`.
    pub fn display_name(&self) -> String {
        match &self.name {
            Some(name) => name.clone(),
            None => format!("Table {}", self.number),
        }
    }

    #[inline]
    pub fn is_free(&self) -> bool {
        self.status == TableStatus::Free
    }
}

// =============================================================================
// Payment Method
// =============================================================================

#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize, TS)]
#[ts(export)]
#[serde(rename_all = "snake_case")]
pub enum PaymentMethod {
    /// Physical cash ("dinheiro").
    Cash,
    /// Card on an external terminal.
    Card,
    /// Brazilian instant payment.
    Pix,
}

impl PaymentMethod {
    /// All methods, in cashier-report order.
    pub const ALL: [PaymentMethod; 3] =
        [PaymentMethod::Cash, PaymentMethod::Card, PaymentMethod::Pix];

    /// Label printed on receipts and the closing report.
    pub fn label(&self) -> &'static str {
        match self {
            PaymentMethod::Cash => "Dinheiro",
            PaymentMethod::Card => "Cartão",
            PaymentMethod::Pix => "PIX",
        }
    }
}

// =============================================================================
// Completed Order
// =============================================================================

/// An append-only ledger entry for a paid order.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize, TS)]
#[ts(export)]
#[serde(rename_all = "camelCase")]
pub struct CompletedOrder {
    pub id: String,
    pub table_number: u32,
    pub items: Vec<OrderItem>,
    pub total: Money,
    pub payment_method: PaymentMethod,
    #[ts(as = "String")]
    pub completed_at: DateTime<Utc>,
}

// =============================================================================
// Daily Summary
// =============================================================================

/// Cashier closing for one calendar day. Derived, never stored.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize, TS)]
#[ts(export)]
#[serde(rename_all = "camelCase")]
pub struct DailySummary {
    #[ts(as = "String")]
    pub date: NaiveDate,
    /// Orders of the day, in ledger order.
    pub orders: Vec<CompletedOrder>,
    pub total_cash: Money,
    pub total_card: Money,
    pub total_pix: Money,
    pub grand_total: Money,
}

impl DailySummary {
    /// Total for one payment method.
    pub fn total_for(&self, method: PaymentMethod) -> Money {
        match method {
            PaymentMethod::Cash => self.total_cash,
            PaymentMethod::Card => self.total_card,
            PaymentMethod::Pix => self.total_pix,
        }
    }

    /// Number of orders paid with `method`.
    pub fn count(&self, method: PaymentMethod) -> usize {
        self.orders
            .iter()
            .filter(|o| o.payment_method == method)
            .count()
    }

    /// Orders sorted newest first, as the cashier report lists them.
    pub fn orders_by_recency(&self) -> Vec<&CompletedOrder> {
        let mut orders: Vec<&CompletedOrder> = self.orders.iter().collect();
        orders.sort_by(|a, b| b.completed_at.cmp(&a.completed_at));
        orders
    }
}

// =============================================================================
// Kitchen Ticket
// =============================================================================

/// What the kitchen printer receives after `send_to_kitchen`.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize, TS)]
#[ts(export)]
#[serde(rename_all = "camelCase")]
pub struct KitchenTicket {
    pub order_id: String,
    pub table_number: u32,
    /// Display name of the table at send time.
    pub table_name: String,
    /// Delta items (or the full list, see `kitchen::ticket_items`).
    pub items: Vec<OrderItem>,
    #[ts(as = "String")]
    pub created_at: DateTime<Utc>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub notes: Option<String>,
}

impl KitchenTicket {
    /// Short order reference printed on the ticket: `#` + last six
    /// characters of the order id, upper-cased.
    pub fn short_order_id(&self) -> String {
        let chars: Vec<char> = self.order_id.chars().collect();
        let start = chars.len().saturating_sub(6);
        let tail: String = chars[start..].iter().collect();
        format!("#{}", tail.to_uppercase())
    }
}

// =============================================================================
// Unit Tests
// =============================================================================
