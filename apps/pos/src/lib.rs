//! # Comanda POS
//!
//! Session layer of the Comanda restaurant POS. Frontends (touch screen,
//! terminal tools) drive a [`PosSession`]; all rules live in `comanda-core`
//! and all persistence in `comanda-store`.
//!
//! ## Module Organization
//! ```text
//! comanda_pos/
//! ├── lib.rs          ◄─── You are here (exports, tracing setup)
//! ├── session.rs      ◄─── PosSession: tables, working order, ledger
//! ├── config.rs       ◄─── PosConfig: comanda.toml + COMANDA_* env
//! ├── print.rs        ◄─── Printer trait, document rendering
//! ├── error.rs        ◄─── PosError
//! └── bin/
//!     └── cash_report.rs ◄─ Today's closing report
//! ```
//!
//! ## Example
//! ```rust
//! use comanda_core::menu::MenuCatalog;
//! use comanda_core::{PaymentMethod, SystemClock};
//! use comanda_pos::PosSession;
//! use comanda_store::MemoryStore;
//!
//! let menu = MenuCatalog::dube_burger();
//! let mut session = PosSession::open(MemoryStore::new(), SystemClock, 6);
//!
//! let table_id = session.tables()[0].id.clone();
//! session.select_table(&table_id).unwrap();
//! session.add_item(menu.find("podrao-5").unwrap()).unwrap();
//!
//! let ticket = session.send_to_kitchen().unwrap();
//! assert_eq!(ticket.items[0].quantity, 1);
//!
//! let paid = session.finalize(PaymentMethod::Pix).unwrap();
//! assert_eq!(paid.total.to_string(), "R$ 30,00");
//! ```

pub mod config;
pub mod error;
pub mod print;
pub mod session;

use tracing_subscriber::EnvFilter;

pub use config::PosConfig;
pub use error::{PosError, PosResult};
pub use print::{DocumentRenderer, LogPrinter, Printer, StdoutPrinter};
pub use session::PosSession;

/// Initializes the tracing subscriber for structured logging.
///
/// ## Log Levels
/// - `RUST_LOG=debug` - Show debug messages
/// - `RUST_LOG=comanda_store=trace` - Trace one crate only
/// - Default: INFO, DEBUG for the comanda crates
pub fn init_tracing() {
    let filter = EnvFilter::try_from_default_env()
        .unwrap_or_else(|_| EnvFilter::new("info,comanda=debug"));

    // A second call (tests, embedding apps) keeps the first subscriber.
    let _ = tracing_subscriber::fmt()
        .with_env_filter(filter)
        .with_writer(std::io::stderr)
        .try_init();
}
