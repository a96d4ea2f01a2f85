//! # comanda-store: Persistence Layer for Comanda POS
//!
//! The POS persists exactly two blobs through a generic key-value store:
//! the table list and the completed-order ledger.
//!
//! ## Architecture Position
//! ```text
//! ┌─────────────────────────────────────────────────────────────────────────┐
//! │                       Comanda POS Data Flow                             │
//! │                                                                         │
//! │  PosSession (add_item, finalize, ...)                                  │
//! │       │                                                                 │
//! │       ▼                                                                 │
//! │  ┌─────────────────────────────────────────────────────────────────┐   │
//! │  │                  comanda-store (THIS CRATE)                     │   │
//! │  │                                                                 │   │
//! │  │   ┌───────────────────┐          ┌──────────────────────────┐  │   │
//! │  │   │    snapshot.rs    │          │          kv.rs           │  │   │
//! │  │   │                   │          │                          │  │   │
//! │  │   │ load_tables       │─────────►│ KeyValueStore (trait)    │  │   │
//! │  │   │ save_ledger ...   │          │ MemoryStore / FileStore  │  │   │
//! │  │   └───────────────────┘          └──────────────────────────┘  │   │
//! │  │                                                                 │   │
//! │  └─────────────────────────────────────────────────────────────────┘   │
//! │       │                                                                 │
//! │       ▼                                                                 │
//! │  ~/.local/share/comanda-pos/comanda-tables.json  (FileStore)           │
//! └─────────────────────────────────────────────────────────────────────────┘
//! ```
//!
//! ## Usage
//!
//! ```rust
//! use comanda_store::{load_tables, save_tables, MemoryStore};
//!
//! let mut store = MemoryStore::new();
//! let mut registry = load_tables(&store, 6); // nothing saved yet: 6 free tables
//! registry.add_table();
//! save_tables(&mut store, &registry).unwrap();
//!
//! assert_eq!(load_tables(&store, 6).len(), 7);
//! ```

pub mod error;
pub mod kv;
pub mod snapshot;

pub use error::{StoreError, StoreResult};
pub use kv::{FileStore, KeyValueStore, MemoryStore};
pub use snapshot::{load_ledger, load_tables, save_ledger, save_tables, LEDGER_KEY, TABLES_KEY};
