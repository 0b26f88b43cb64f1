use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};

use stockroom_core::{DomainError, DomainResult, ItemId};

/// Largest accepted quantity for one item. Keeps the inventory-wide quantity
/// total inside `i64` for any realistic number of items (over nine million
/// items at this cap).
pub const MAX_QUANTITY: i64 = 1_000_000_000_000;

/// The mutable field set of an item, as supplied to create and update.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct ItemFields {
    pub name: String,
    pub category: String,
    pub quantity: i64,
    pub price: f64,
    #[serde(default)]
    pub description: String,
}

impl ItemFields {
    pub fn new(
        name: impl Into<String>,
        category: impl Into<String>,
        quantity: i64,
        price: f64,
    ) -> Self {
        Self {
            name: name.into(),
            category: category.into(),
            quantity,
            price,
            description: String::new(),
        }
    }

    pub fn with_description(mut self, description: impl Into<String>) -> Self {
        self.description = description.into();
        self
    }

    /// Check the fields, failing on the first violated rule:
    /// - name and category must be non-empty after trimming
    /// - quantity must be in `0..=MAX_QUANTITY`
    /// - price must be finite and >= 0
    ///
    /// Values are returned as given; trimming is only used for the emptiness
    /// checks.
    pub fn validate(self) -> DomainResult<Self> {
        if self.name.trim().is_empty() {
            return Err(DomainError::validation("name is required"));
        }

        if self.category.trim().is_empty() {
            return Err(DomainError::validation("category is required"));
        }

        if self.quantity < 0 {
            return Err(DomainError::validation("quantity must be non-negative"));
        }
        if self.quantity > MAX_QUANTITY {
            return Err(DomainError::validation(format!(
                "quantity must not exceed {MAX_QUANTITY}"
            )));
        }

        if !self.price.is_finite() {
            return Err(DomainError::validation("price must be a finite number"));
        }
        if self.price < 0.0 {
            return Err(DomainError::validation("price must be non-negative"));
        }

        Ok(self)
    }

    /// Copy with surrounding whitespace stripped from the text fields, as
    /// form and file inputs are cleaned before they reach the store.
    pub fn trimmed(self) -> Self {
        Self {
            name: self.name.trim().to_string(),
            category: self.category.trim().to_string(),
            description: self.description.trim().to_string(),
            ..self
        }
    }
}

/// Canonical item record.
///
/// Consumers receive owned copies; the store is the only writer.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Item {
    pub id: ItemId,
    pub name: String,
    pub category: String,
    pub quantity: i64,
    pub price: f64,
    pub description: String,
    pub created_at: DateTime<Utc>,
    pub updated_at: DateTime<Utc>,
}

impl Item {
    /// Stock value of this line: `quantity * price`.
    pub fn total_value(&self) -> f64 {
        self.quantity as f64 * self.price
    }

    /// The mutable fields of this item, e.g. to pre-fill an edit form.
    pub fn fields(&self) -> ItemFields {
        ItemFields {
            name: self.name.clone(),
            category: self.category.clone(),
            quantity: self.quantity,
            price: self.price,
            description: self.description.clone(),
        }
    }
}
