//! Request models that only exist at the HTTP boundary.

use grocery_core::Product;
use rust_decimal::Decimal;
use serde::Deserialize;

/// Body of `PUT /api/product/{id}`.
///
/// Every field is optional; present fields overwrite the stored value and
/// absent fields keep it. `description` may be sent as `null` to clear it.
/// The id always comes from the path.
#[derive(Debug, Clone, Default, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct ProductChanges {
    pub name: Option<String>,
    /// `None`: keep, `Some(None)`: clear, `Some(Some(_))`: replace.
    #[serde(default, with = "::serde_with::rust::double_option")]
    pub description: Option<Option<String>>,
    pub category: Option<String>,
    pub initial_quantity: Option<i32>,
    pub remaining_quantity: Option<i32>,
    #[serde(
        default,
        deserialize_with = "rust_decimal::serde::arbitrary_precision_option::deserialize"
    )]
    pub price_per_unit: Option<Decimal>,
}

impl ProductChanges {
    /// Merges the supplied fields onto `existing` in place.
    pub fn apply_to(self, existing: &mut Product) {
        if let Some(category) = self.category {
            existing.category = category;
        }
        if let Some(description) = self.description {
            existing.description = description;
        }
        if let Some(initial_quantity) = self.initial_quantity {
            existing.initial_quantity = initial_quantity;
        }
        if let Some(price_per_unit) = self.price_per_unit {
            existing.price_per_unit = price_per_unit;
        }
        if let Some(remaining_quantity) = self.remaining_quantity {
            existing.remaining_quantity = remaining_quantity;
        }
        if let Some(name) = self.name {
            existing.name = name;
        }
    }
}

/// Query string of `GET /api/product`.
#[derive(Debug, Clone, Default, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct ListFilter {
    pub category: Option<String>,
    #[serde(default)]
    pub in_stock: bool,
}
