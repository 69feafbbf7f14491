//! Product domain model.
//!
//! # Responsibility
//! - Define the single stored record served by the backend.
//! - Provide field-level validation used by the service layer.
//!
//! # Invariants
//! - `id` is `None` until the store assigns it and never changes afterwards.
//! - `name` and `category` are non-empty once validated.
//! - `price_per_unit` is an exact decimal; binary floats are never used.
//! - No relation between `remaining_quantity` and `initial_quantity` is enforced.

use rust_decimal::Decimal;
use serde::{Deserialize, Serialize};
use std::error::Error;
use std::fmt::{Display, Formatter};

/// Store-assigned surrogate key.
pub type ProductId = i64;

/// A stocked grocery item.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct Product {
    /// `None` before the first successful save.
    #[serde(default)]
    pub id: Option<ProductId>,
    /// Unique across all stored products.
    pub name: String,
    #[serde(default)]
    pub description: Option<String>,
    pub category: String,
    /// Quantity originally stocked.
    #[serde(default)]
    pub initial_quantity: i32,
    /// Quantity currently available; `> 0` means in stock.
    #[serde(default)]
    pub remaining_quantity: i32,
    /// Serialized as a decimal string. Accepted as a string or a JSON number;
    /// numbers are read from their literal digits, never through `f64`.
    #[serde(
        default,
        deserialize_with = "rust_decimal::serde::arbitrary_precision::deserialize"
    )]
    pub price_per_unit: Decimal,
}

/// Field-level validation failure for [`Product`].
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum ProductValidationError {
    EmptyName,
    EmptyCategory,
}

impl Display for ProductValidationError {
    fn fmt(&self, f: &mut Formatter<'_>) -> std::fmt::Result {
        match self {
            Self::EmptyName => write!(f, "product name must not be empty"),
            Self::EmptyCategory => write!(f, "product category must not be empty"),
        }
    }
}

impl Error for ProductValidationError {}

impl Product {
    /// Creates an unsaved product with zero quantities and price.
    pub fn new(name: impl Into<String>, category: impl Into<String>) -> Self {
        Self {
            id: None,
            name: name.into(),
            description: None,
            category: category.into(),
            initial_quantity: 0,
            remaining_quantity: 0,
            price_per_unit: Decimal::ZERO,
        }
    }

    /// Sets both quantities to `quantity`, as for freshly stocked items.
    pub fn with_stock(mut self, quantity: i32) -> Self {
        self.initial_quantity = quantity;
        self.remaining_quantity = quantity;
        self
    }

    pub fn with_price(mut self, price_per_unit: Decimal) -> Self {
        self.price_per_unit = price_per_unit;
        self
    }

    pub fn with_description(mut self, description: impl Into<String>) -> Self {
        self.description = Some(description.into());
        self
    }

    /// Returns whether this product counts as available.
    pub fn is_in_stock(&self) -> bool {
        self.remaining_quantity > 0
    }

    /// Checks required fields.
    ///
    /// Whitespace-only values count as empty.
    pub fn validate(&self) -> Result<(), ProductValidationError> {
        if self.name.trim().is_empty() {
            return Err(ProductValidationError::EmptyName);
        }
        if self.category.trim().is_empty() {
            return Err(ProductValidationError::EmptyCategory);
        }
        Ok(())
    }
}
