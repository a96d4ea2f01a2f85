//! # Validation Module
//!
//! Input validation for the few free-form values the POS accepts.
//!
//! ## Normalizing Validators
//! Table names and notes are optional. The validators trim the input and
//! map "nothing left" to `None`, so callers never store `Some("")`:
//!
//! ```rust
//! use comanda_core::validation::validate_table_name;
//!
//! assert_eq!(validate_table_name("  Varanda ").unwrap(), Some("Varanda".to_string()));
//! assert_eq!(validate_table_name("   ").unwrap(), None);
//! assert!(validate_table_name(&"x".repeat(41)).is_err());
//! ```

use crate::error::ValidationError;
use crate::types::MenuItem;
use crate::{MAX_NOTES_LEN, MAX_TABLE_NAME_LEN};

/// Result type for validation operations.
pub type ValidationResult<T> = Result<T, ValidationError>;

/// Upper bound for the number of tables a registry may be seeded with.
pub const MAX_TABLE_COUNT: u32 = 100;

// =============================================================================
// String Validators
// =============================================================================

/// Validates a custom table name.
///
/// ## Rules
/// - Leading/trailing whitespace is dropped
/// - Empty after trimming clears the name (`None`)
/// - At most 40 characters
pub fn validate_table_name(name: &str) -> ValidationResult<Option<String>> {
    optional_text(name, "table name", MAX_TABLE_NAME_LEN)
}

/// Validates per-line kitchen notes. Same rules as names, 140 characters.
pub fn validate_notes(notes: &str) -> ValidationResult<Option<String>> {
    optional_text(notes, "notes", MAX_NOTES_LEN)
}

fn optional_text(value: &str, field: &str, max: usize) -> ValidationResult<Option<String>> {
    let value = value.trim();

    if value.is_empty() {
        return Ok(None);
    }

    if value.chars().count() > max {
        return Err(ValidationError::TooLong {
            field: field.to_string(),
            max,
        });
    }

    Ok(Some(value.to_string()))
}

// =============================================================================
// Entity Validators
// =============================================================================

/// Validates a catalog entry.
///
/// ## Rules
/// - `id` and `name` must not be blank
/// - Price must be positive
pub fn validate_menu_item(item: &MenuItem) -> ValidationResult<()> {
    if item.id.trim().is_empty() {
        return Err(ValidationError::Required {
            field: "id".to_string(),
        });
    }

    if item.name.trim().is_empty() {
        return Err(ValidationError::Required {
            field: "name".to_string(),
        });
    }

    if !item.price.is_positive() {
        return Err(ValidationError::MustBePositive {
            field: "price".to_string(),
        });
    }

    Ok(())
}

/// Validates how many tables to create on first start.
pub fn validate_table_count(count: u32) -> ValidationResult<()> {
    if count == 0 || count > MAX_TABLE_COUNT {
        return Err(ValidationError::OutOfRange {
            field: "table count".to_string(),
            min: 1,
            max: MAX_TABLE_COUNT as i64,
        });
    }
    Ok(())
}

// =============================================================================
// Unit Tests
// =============================================================================

#[cfg(test)]
mod tests {
    use super::*;
    use crate::money::Money;
    use crate::types::MenuCategory;

    fn item(id: &str, name: &str, cents: i64) -> MenuItem {
        MenuItem {
            id: id.to_string(),
            name: name.to_string(),
            price: Money::from_cents(cents),
            category: MenuCategory::Drinks,
        }
    }

    #[test]
    fn test_table_name_rules() {
        assert_eq!(validate_table_name("Balcão").unwrap(), Some("Balcão".into()));
        assert_eq!(validate_table_name("").unwrap(), None);
        // 40 multi-byte characters are still 40 characters
        assert!(validate_table_name(&"ã".repeat(40)).is_ok());
        assert!(matches!(
            validate_table_name(&"a".repeat(41)),
            Err(ValidationError::TooLong { max: 40, .. })
        ));
    }

    #[test]
    fn test_notes_rules() {
        assert_eq!(validate_notes(" sem cebola ").unwrap(), Some("sem cebola".into()));
        assert!(validate_notes(&"n".repeat(141)).is_err());
    }

    #[test]
    fn test_menu_item_rules() {
        assert!(validate_menu_item(&item("drink-1", "Coca-Cola", 700)).is_ok());
        assert!(validate_menu_item(&item("", "Coca-Cola", 700)).is_err());
        assert!(validate_menu_item(&item("drink-1", " ", 700)).is_err());
        assert!(matches!(
            validate_menu_item(&item("drink-1", "Coca-Cola", 0)),
            Err(ValidationError::MustBePositive { .. })
        ));
    }

    #[test]
    fn test_table_count_rules() {
        assert!(validate_table_count(6).is_ok());
        assert!(validate_table_count(0).is_err());
        assert!(validate_table_count(101).is_err());
    }
}
