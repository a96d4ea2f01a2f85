//! # Menu Catalog
//!
//! The static list of things a waiter can add to an order. The catalog is
//! built once at startup and never mutated.

use std::collections::HashSet;

use crate::error::{CoreResult, ValidationError};
use crate::money::Money;
use crate::types::{MenuCategory, MenuItem};
use crate::validation::validate_menu_item;

/// Immutable, validated menu.
#[derive(Debug, Clone)]
pub struct MenuCatalog {
    items: Vec<MenuItem>,
}

impl MenuCatalog {
    /// Builds a catalog, rejecting invalid entries and duplicate ids.
    pub fn new(items: Vec<MenuItem>) -> CoreResult<Self> {
        let mut seen = HashSet::new();
        for item in &items {
            validate_menu_item(item)?;
            if !seen.insert(item.id.as_str()) {
                return Err(ValidationError::Duplicate {
                    field: "menu item id".to_string(),
                    value: item.id.clone(),
                }
                .into());
            }
        }
        Ok(MenuCatalog { items })
    }

    /// The Dube Burger house menu.
    pub fn dube_burger() -> Self {
        use MenuCategory::*;

        let entries: [(&str, &str, i64, MenuCategory); 25] = [
            ("artesanal-1", "Dube Cheese", 2500, Artesanal),
            ("artesanal-2", "Dube Bacon", 3000, Artesanal),
            ("artesanal-3", "Dube Melt", 3000, Artesanal),
            ("artesanal-4", "Dube Burger", 4000, Artesanal),
            ("podrao-1", "X-Burger", 2200, Podrao),
            ("podrao-2", "X-Bacon", 2600, Podrao),
            ("podrao-3", "X-EggBacon", 2800, Podrao),
            ("podrao-4", "X-EggBurger", 2500, Podrao),
            ("podrao-5", "X-Tudo", 3000, Podrao),
            ("podrao-6", "X-Dube", 3500, Podrao),
            ("macarrao-1", "Dube na Chapa", 3000, Macarrao),
            ("macarrao-2", "Gratinar", 200, Macarrao),
            ("drink-1", "Coca-Cola", 700, Drinks),
            ("drink-2", "Coca-Cola Zero", 700, Drinks),
            ("drink-3", "Guaraná", 700, Drinks),
            ("drink-4", "Guaraná Zero", 700, Drinks),
            ("drink-5", "Fanta Laranja", 700, Drinks),
            ("drink-6", "Suco", 700, Drinks),
            ("drink-7", "Água Mineral", 400, Drinks),
            ("drink-8", "Heineken", 1200, Drinks),
            ("side-1", "Fritas 200", 1700, Sides),
            ("side-2", "Fritas 200 C/B", 2400, Sides),
            ("side-3", "Fritas 400", 3000, Sides),
            ("side-4", "Fritas 400 C/B", 4000, Sides),
            ("side-5", "Nuggets (10un)", 2000, Sides),
        ];

        let items = entries
            .into_iter()
            .map(|(id, name, cents, category)| MenuItem {
                id: id.to_string(),
                name: name.to_string(),
                price: Money::from_cents(cents),
                category,
            })
            .collect();

        MenuCatalog { items }
    }

    /// Looks up an item by id.
    pub fn find(&self, id: &str) -> Option<&MenuItem> {
        self.items.iter().find(|item| item.id == id)
    }

    /// All items in catalog order.
    pub fn items(&self) -> &[MenuItem] {
        &self.items
    }

    /// Items of one category, in catalog order.
    pub fn by_category(&self, category: MenuCategory) -> impl Iterator<Item = &MenuItem> {
        self.items.iter().filter(move |item| item.category == category)
    }

    pub fn len(&self) -> usize {
        self.items.len()
    }

    pub fn is_empty(&self) -> bool {
        self.items.is_empty()
    }
}

impl Default for MenuCatalog {
    fn default() -> Self {
        Self::dube_burger()
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::error::CoreError;

    #[test]
    fn test_house_menu_is_valid() {
        let menu = MenuCatalog::dube_burger();
        let rebuilt = MenuCatalog::new(menu.items().to_vec()).unwrap();
        assert_eq!(rebuilt.len(), 25);
    }

    #[test]
    fn test_find_and_by_category() {
        let menu = MenuCatalog::dube_burger();

        let heineken = menu.find("drink-8").unwrap();
        assert_eq!(heineken.price.cents(), 1200);
        assert!(menu.find("drink-99").is_none());

        assert_eq!(menu.by_category(MenuCategory::Drinks).count(), 8);
        assert_eq!(menu.by_category(MenuCategory::Macarrao).count(), 2);
    }

    #[test]
    fn test_duplicate_ids_rejected() {
        let menu = MenuCatalog::dube_burger();
        let mut items = menu.items().to_vec();
        items.push(items[0].clone());

        let err = MenuCatalog::new(items).unwrap_err();
        assert!(matches!(
            err,
            CoreError::Validation(ValidationError::Duplicate { .. })
        ));
    }
}
