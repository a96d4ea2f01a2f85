//! # Settlement
//!
//! Ledger math: turning a finalized order into a `CompletedOrder` and
//! aggregating one calendar day of them into a `DailySummary`.
//!
//! ## Cashier Closing
//! ```text
//!  ledger (all days)                      DailySummary (today)
//!  ─────────────────                      ────────────────────
//!  yesterday  cash  30,00   ─ filtered ─►
//!  today      cash  10,00   ───────────►  total_cash   25,00
//!  today      card  20,00   ───────────►  total_card   20,00
//!  today      cash  15,00   ───────────►  total_pix     0,00
//!                                         grand_total  45,00
//! ```
//!
//! Days are local calendar days (see [`crate::clock::local_date`]).

use chrono::{DateTime, NaiveDate, Utc};

use crate::clock::local_date;
use crate::money::Money;
use crate::types::{items_total, CompletedOrder, DailySummary, OrderItem, PaymentMethod};

/// Builds the ledger entry for a paid order. The total is computed from the
/// items, never taken from the caller.
pub fn complete_order(
    table_number: u32,
    items: Vec<OrderItem>,
    payment_method: PaymentMethod,
    now: DateTime<Utc>,
) -> CompletedOrder {
    CompletedOrder {
        id: uuid::Uuid::new_v4().to_string(),
        table_number,
        total: items_total(&items),
        items,
        payment_method,
        completed_at: now,
    }
}

/// Whether `order` was completed on local calendar day `day`.
#[inline]
pub fn is_on_day(order: &CompletedOrder, day: NaiveDate) -> bool {
    local_date(order.completed_at) == day
}

/// Aggregates the entries of `day`.
pub fn summarize(ledger: &[CompletedOrder], day: NaiveDate) -> DailySummary {
    let orders: Vec<CompletedOrder> = ledger
        .iter()
        .filter(|o| is_on_day(o, day))
        .cloned()
        .collect();

    let mut total_cash = Money::zero();
    let mut total_card = Money::zero();
    let mut total_pix = Money::zero();

    for order in &orders {
        match order.payment_method {
            PaymentMethod::Cash => total_cash += order.total,
            PaymentMethod::Card => total_card += order.total,
            PaymentMethod::Pix => total_pix += order.total,
        }
    }

    DailySummary {
        date: day,
        orders,
        total_cash,
        total_card,
        total_pix,
        grand_total: total_cash + total_card + total_pix,
    }
}

/// Drops the entries of `day` from the ledger. Returns how many were removed.
pub fn remove_day(ledger: &mut Vec<CompletedOrder>, day: NaiveDate) -> usize {
    let before = ledger.len();
    ledger.retain(|o| !is_on_day(o, day));
    before - ledger.len()
}

// =============================================================================
// Unit Tests
// =============================================================================
