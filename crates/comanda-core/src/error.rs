//! # Error Types
//!
//! Domain-specific error types for comanda-core.
//!
//! ## Error Hierarchy
//! ```text
//! ┌─────────────────────────────────────────────────────────────────────────┐
//! │                         Error Types                                     │
//! │                                                                         │
//! │  comanda-core errors (this file)                                       │
//! │  ├── CoreError        - Business rule violations                       │
//! │  └── ValidationError  - Input validation failures                      │
//! │                                                                         │
//! │  comanda-store errors (separate crate)                                 │
//! │  └── StoreError       - Key-value store failures                       │
//! │                                                                         │
//! │  comanda-pos errors (app)                                              │
//! │  └── PosError         - Everything above plus configuration            │
//! │                                                                         │
//! │  Flow: ValidationError → CoreError → PosError → caller                 │
//! └─────────────────────────────────────────────────────────────────────────┘
//! ```
//!
//! Editing the order with no active table is `NoTableSelected`; sending to
//! the kitchen or finalizing without a selection yields `None` instead.

use thiserror::Error;

// =============================================================================
// Core Error
// =============================================================================

/// Core business logic errors.
#[derive(Debug, Error, PartialEq, Eq)]
pub enum CoreError {
    /// No table with this id exists in the registry.
    #[error("Table not found: {0}")]
    TableNotFound(String),

    /// The order already holds the maximum number of distinct lines.
    #[error("Order cannot have more than {max} lines")]
    OrderTooLarge { max: usize },

    /// A line would exceed the per-item quantity limit.
    ///
    /// ## User Workflow
    /// ```text
    /// Tap "Coca-Cola" (qty already 999)
    ///      │
    ///      ▼
    /// QuantityTooLarge { requested: 1000, max: 999 }
    ///      │
    ///      ▼
    /// UI keeps the line at 999
    /// ```
    #[error("Quantity {requested} exceeds maximum allowed ({max})")]
    QuantityTooLarge { requested: u32, max: u32 },

    /// An order edit was attempted with no active table.
    #[error("No table selected")]
    NoTableSelected,

    /// The menu item id is not part of the working order.
    #[error("Item not in order: {0}")]
    ItemNotInOrder(String),

    /// Validation error (wraps ValidationError).
    #[error("Validation error: {0}")]
    Validation(#[from] ValidationError),
}

// =============================================================================
// Validation Error
// =============================================================================

/// Input validation errors.
#[derive(Debug, Error, PartialEq, Eq)]
pub enum ValidationError {
    /// A required field is missing or empty.
    #[error("{field} is required")]
    Required { field: String },

    /// Field value is too long.
    #[error("{field} must be at most {max} characters")]
    TooLong { field: String, max: usize },

    /// Value must be positive.
    #[error("{field} must be positive")]
    MustBePositive { field: String },

    /// Numeric value is out of range.
    #[error("{field} must be between {min} and {max}")]
    OutOfRange { field: String, min: i64, max: i64 },

    /// Duplicate value (e.g., two menu items sharing an id).
    #[error("{field} '{value}' already exists")]
    Duplicate { field: String, value: String },
}

// =============================================================================
// Result Type Alias
// =============================================================================

/// Convenience type alias for Results with CoreError.
pub type CoreResult<T> = Result<T, CoreError>;

// =============================================================================
// Unit Tests
// =============================================================================
