//! The `Product` entity and its draft form.

use chrono::{DateTime, Utc};
use rust_decimal::Decimal;
use serde::{Deserialize, Serialize};

/// A single inventory row.
///
/// The store is the sole authority for `id` and both timestamps:
/// `id` and `created_at` are assigned on insert and never change,
/// `updated_at` stays `None` until the row is first updated and is
/// refreshed by the store on every update thereafter.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct Product {
    /// Store-assigned identifier, unique for the lifetime of the store.
    pub id: i64,

    /// Display name, non-empty, at most 200 characters.
    pub name: String,

    /// Category label, non-empty, at most 100 characters.
    pub category: String,

    /// Unit price. Fixed-point decimal (NUMERIC(18,2) in the store) so
    /// monetary values do not accumulate rounding drift.
    pub price: Decimal,

    /// Units on hand, never negative.
    pub quantity: i32,

    /// Set once by the store at insert time, UTC.
    pub created_at: DateTime<Utc>,

    /// `None` if and only if the row has never been updated.
    #[serde(skip_serializing_if = "Option::is_none")]
    pub updated_at: Option<DateTime<Utc>>,
}

impl Product {
    /// Case-insensitive substring match across all five searchable
    /// fields. Numeric fields are matched on their text rendering, not
    /// numerically, so a term like "999" matches a price of 999.99.
    ///
    /// `term` must already be lowercased and trimmed by the caller.
    #[must_use]
    pub fn matches_term(&self, term: &str) -> bool {
        self.name.to_lowercase().contains(term)
            || self.category.to_lowercase().contains(term)
            || self.price.to_string().contains(term)
            || self.quantity.to_string().contains(term)
            || self.id.to_string().contains(term)
    }
}

/// Caller-supplied fields for creating a product.
///
/// Carries no `id` or timestamps; those belong to the store. Callers
/// are expected to have validated the fields at the API boundary.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct ProductDraft {
    pub name: String,
    pub category: String,
    pub price: Decimal,
    pub quantity: i32,
}

impl ProductDraft {
    /// Materializes the draft into a stored row with store-assigned
    /// identity and creation time.
    #[must_use]
    pub fn into_product(self, id: i64, created_at: DateTime<Utc>) -> Product {
        Product {
            id,
            name: self.name,
            category: self.category,
            price: self.price,
            quantity: self.quantity,
            created_at,
            updated_at: None,
        }
    }
}
