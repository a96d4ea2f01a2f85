//! # Printing
//!
//! The printer boundary and the plain-text documents sent through it.
//!
//! ## Print Flow
//! ```text
//! ┌─────────────────────────────────────────────────────────────────────────┐
//! │  KitchenTicket / CompletedOrder / DailySummary                          │
//! │       │                                                                 │
//! │       ▼                                                                 │
//! │  DocumentRenderer { width: 32 | 48 }  ──► String (one line per row)    │
//! │       │                                                                 │
//! │       ▼                                                                 │
//! │  Printer::print(&str)   fire-and-forget, no result                     │
//! │       ├── LogPrinter      tracing output                               │
//! │       └── StdoutPrinter   terminal (cash-report)                       │
//! └─────────────────────────────────────────────────────────────────────────┘
//! ```
//!
//! Widths are counted in characters, so accented names ("Guaraná") pad
//! correctly on the thermal printer's code page.

use chrono::{DateTime, Local, Utc};
use tracing::{debug, info};

use comanda_core::{CompletedOrder, DailySummary, KitchenTicket, OrderItem, PaymentMethod};

use crate::config::{PosConfig, PAPER_WIDTH_80MM};

/// Accepts a formatted document. Delivery failures are the printer's
/// problem; nothing is reported back.
pub trait Printer {
    fn print(&self, document: &str);
}

/// Writes documents to the log.
#[derive(Debug, Clone)]
pub struct LogPrinter {
    name: String,
}

impl LogPrinter {
    pub fn new(name: impl Into<String>) -> Self {
        LogPrinter { name: name.into() }
    }
}

impl Printer for LogPrinter {
    fn print(&self, document: &str) {
        info!(
            printer = %self.name,
            lines = document.lines().count(),
            "Printing document"
        );
        for line in document.lines() {
            debug!(printer = %self.name, "{}", line);
        }
    }
}

/// Writes documents to standard output.
#[derive(Debug, Clone, Copy, Default)]
pub struct StdoutPrinter;

impl Printer for StdoutPrinter {
    fn print(&self, document: &str) {
        println!("{document}");
    }
}

// =============================================================================
// Document Renderer
// =============================================================================

/// Renders POS documents for a fixed paper width.
///
/// Common widths:
/// - 58mm paper: 32 characters
/// - 80mm paper: 48 characters
#[derive(Debug, Clone)]
pub struct DocumentRenderer {
    width: usize,
    store_name: String,
}

impl DocumentRenderer {
    pub fn new(width: usize, store_name: impl Into<String>) -> Self {
        DocumentRenderer {
            width,
            store_name: store_name.into(),
        }
    }

    pub fn from_config(config: &PosConfig) -> Self {
        Self::new(config.paper_width, config.store_name.clone())
    }

    pub fn width(&self) -> usize {
        self.width
    }

    /// Kitchen ticket: table, short order id, `{qty}x {name}` lines with
    /// their notes, send time.
    pub fn kitchen_ticket(&self, ticket: &KitchenTicket) -> String {
        let mut doc = Document::new(self.width);

        doc.center(&self.store_name.to_uppercase());
        doc.center("COZINHA");
        doc.sep('=');
        doc.center(&ticket.table_name);
        doc.two_col("Pedido:", &ticket.short_order_id());
        doc.sep('-');

        for item in &ticket.items {
            self.item_line(&mut doc, item);
        }

        if let Some(notes) = &ticket.notes {
            doc.sep('-');
            doc.line(&format!("Obs: {notes}"));
        }

        doc.sep('=');
        doc.center(&format_timestamp(ticket.created_at));
        doc.finish()
    }

    /// Customer receipt for a paid order.
    pub fn receipt(&self, order: &CompletedOrder) -> String {
        let mut doc = Document::new(self.width);

        doc.center(&self.store_name.to_uppercase());
        doc.center(&format!("Mesa {}", order.table_number));
        doc.center(&format_timestamp(order.completed_at));
        doc.sep('-');

        for item in &order.items {
            doc.two_col(
                &format!("{}x {}", item.quantity, item.menu_item.name),
                &item.line_total().to_string(),
            );
        }

        doc.sep('-');
        doc.two_col("TOTAL", &order.total.to_string());
        doc.two_col("Pagamento:", order.payment_method.label());
        doc.sep('=');
        doc.center("Obrigado pela preferência!");
        doc.finish()
    }

    /// Cashier closing: per-method totals and counts, grand total, then the
    /// day's orders newest first.
    pub fn closing_report(&self, summary: &DailySummary) -> String {
        let mut doc = Document::new(self.width);

        doc.center(&self.store_name.to_uppercase());
        doc.center("FECHAMENTO DE CAIXA");
        doc.center(&summary.date.format("%d/%m/%Y").to_string());
        doc.sep('=');

        for method in PaymentMethod::ALL {
            doc.two_col(
                &format!("{} ({})", method.label(), summary.count(method)),
                &summary.total_for(method).to_string(),
            );
        }

        doc.sep('-');
        doc.two_col(
            &format!("TOTAL ({} pedidos)", summary.orders.len()),
            &summary.grand_total.to_string(),
        );
        doc.sep('=');

        if summary.orders.is_empty() {
            doc.center("Nenhum pedido finalizado");
        }

        for order in summary.orders_by_recency() {
            let time = order.completed_at.with_timezone(&Local).format("%H:%M");
            doc.two_col(
                &format!("{time} Mesa {} {}", order.table_number, order.payment_method.label()),
                &order.total.to_string(),
            );
            let items: Vec<String> = order
                .items
                .iter()
                .map(|i| format!("{}x {}", i.quantity, i.menu_item.name))
                .collect();
            doc.line(&format!("  {}", items.join(", ")));
        }

        doc.finish()
    }

    fn item_line(&self, doc: &mut Document, item: &OrderItem) {
        doc.line(&format!("{}x {}", item.quantity, item.menu_item.name));
        if let Some(notes) = &item.notes {
            doc.line(&format!("   * {notes}"));
        }
    }
}

impl Default for DocumentRenderer {
    fn default() -> Self {
        Self::new(PAPER_WIDTH_80MM, PosConfig::default().store_name)
    }
}

fn format_timestamp(at: DateTime<Utc>) -> String {
    at.with_timezone(&Local).format("%d/%m/%Y %H:%M").to_string()
}

/// Line buffer that never exceeds `width` characters per line.
struct Document {
    width: usize,
    lines: Vec<String>,
}

impl Document {
    fn new(width: usize) -> Self {
        Document {
            width,
            lines: Vec::new(),
        }
    }

    fn line(&mut self, text: &str) {
        self.lines.push(text.chars().take(self.width).collect());
    }

    fn center(&mut self, text: &str) {
        let len = text.chars().count().min(self.width);
        let pad = (self.width - len) / 2;
        self.line(&format!("{}{}", " ".repeat(pad), text));
    }

    fn sep(&mut self, ch: char) {
        self.lines.push(ch.to_string().repeat(self.width));
    }

    /// `left` and `right` on one line, right-aligned; `left` is truncated
    /// to keep at least one space between them.
    fn two_col(&mut self, left: &str, right: &str) {
        let right_len = right.chars().count();
        let max_left = self.width.saturating_sub(right_len + 1);
        let left: String = left.chars().take(max_left).collect();
        let pad = self
            .width
            .saturating_sub(left.chars().count() + right_len)
            .max(1);
        self.line(&format!("{left}{}{right}", " ".repeat(pad)));
    }

    fn finish(self) -> String {
        let mut out = self.lines.join("\n");
        out.push('\n');
        out
    }
}
