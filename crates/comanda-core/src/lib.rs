//! # comanda-core: Pure Business Logic for Comanda POS
//!
//! This crate is the **heart** of Comanda POS. It owns the table lifecycle,
//! order composition, kitchen-ticket diffing and daily settlement as plain
//! data structures with zero I/O dependencies.
//!
//! ## Architecture Position
//! ```text
//! ┌─────────────────────────────────────────────────────────────────────────┐
//! │                       Comanda POS Architecture                          │
//! │                                                                         │
//! │  ┌─────────────────────────────────────────────────────────────────┐   │
//! │  │              Rendering layer (table grid, order screen)         │   │
//! │  └─────────────────────────────┬───────────────────────────────────┘   │
//! │                                │                                        │
//! │  ┌─────────────────────────────▼───────────────────────────────────┐   │
//! │  │                 comanda-pos (PosSession)                        │   │
//! │  │    select_table, add_item, send_to_kitchen, finalize, etc.      │   │
//! │  └─────────────────────────────┬───────────────────────────────────┘   │
//! │                                │                                        │
//! │  ┌─────────────────────────────▼───────────────────────────────────┐   │
//! │  │              ★ comanda-core (THIS CRATE) ★                      │   │
//! │  │                                                                 │   │
//! │  │   ┌──────────┐ ┌──────────┐ ┌──────────┐ ┌──────────────────┐  │   │
//! │  │   │   menu   │ │  order   │ │ kitchen  │ │ table/settlement │  │   │
//! │  │   │ Catalog  │ │ Composer │ │  Differ  │ │ Registry, Ledger │  │   │
//! │  │   └──────────┘ └──────────┘ └──────────┘ └──────────────────┘  │   │
//! │  │                                                                 │   │
//! │  │   NO I/O • NO STORAGE • NO PRINTER • NO SYSTEM CLOCK           │   │
//! │  └─────────────────────────────────────────────────────────────────┘   │
//! │                                │                                        │
//! │  ┌─────────────────────────────▼───────────────────────────────────┐   │
//! │  │              comanda-store (key-value persistence)              │   │
//! │  └─────────────────────────────────────────────────────────────────┘   │
//! └─────────────────────────────────────────────────────────────────────────┘
//! ```
//!
//! ## Modules
//!
//! - [`types`] - Domain types (Table, Order, CompletedOrder, etc.)
//! - [`money`] - Money type with integer arithmetic (no floating point!)
//! - [`menu`] - Static menu catalog
//! - [`order`] - Working order composer
//! - [`kitchen`] - Kitchen ticket differ
//! - [`table`] - Table registry and status transitions
//! - [`settlement`] - Daily summary and ledger filtering
//! - [`clock`] - Time source port
//! - [`error`] - Domain error types
//! - [`validation`] - Input validation
//!
//! ## Example Usage
//!
//! ```rust
//! use comanda_core::menu::MenuCatalog;
//! use comanda_core::order::WorkingOrder;
//!
//! let menu = MenuCatalog::dube_burger();
//! let fries = menu.find("side-1").unwrap();
//!
//! let mut order = WorkingOrder::new();
//! order.add_item(fries).unwrap();
//! order.add_item(fries).unwrap();
//!
//! assert_eq!(order.items().len(), 1);
//! assert_eq!(order.total().cents(), 3400);
//! ```

// =============================================================================
// Module Declarations
// =============================================================================

pub mod clock;
pub mod error;
pub mod kitchen;
pub mod menu;
pub mod money;
pub mod order;
pub mod settlement;
pub mod table;
pub mod types;
pub mod validation;

// =============================================================================
// Re-exports for Convenience
// =============================================================================

pub use clock::{Clock, FixedClock, SystemClock};
pub use error::{CoreError, CoreResult, ValidationError};
pub use money::Money;
pub use types::*;

// =============================================================================
// Crate-Level Constants
// =============================================================================

/// Number of tables created on first start (or after discarding bad state).
pub const DEFAULT_TABLE_COUNT: u32 = 6;

/// Maximum distinct lines in a single order.
///
/// ## Business Reason
/// Prevents runaway orders from a stuck touch screen.
pub const MAX_ORDER_LINES: usize = 100;

/// Maximum quantity of a single item in an order.
///
/// ## Business Reason
/// Prevents accidental over-ordering (e.g., a held-down "+" button).
pub const MAX_ITEM_QUANTITY: u32 = 999;

/// Maximum length of a custom table name.
pub const MAX_TABLE_NAME_LEN: usize = 40;

/// Maximum length of per-line kitchen notes.
pub const MAX_NOTES_LEN: usize = 140;
