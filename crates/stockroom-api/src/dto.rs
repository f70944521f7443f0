//! Request types for the product endpoints.

use chrono::{DateTime, Utc};
use rust_decimal::Decimal;
use serde::{Deserialize, Serialize};

use stockroom_core::{Product, ProductDraft};

/// Body of `POST /api/products`.
#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct CreateProductRequest {
    pub name: String,
    pub category: String,
    pub price: Decimal,
    pub quantity: i32,
}

impl CreateProductRequest {
    /// Validate the request body.
    pub fn validate(&self) -> Result<(), String> {
        validate_fields(&self.name, &self.category, self.price, self.quantity)
    }

    /// Converts the validated request into a store draft.
    #[must_use]
    pub fn into_draft(self) -> ProductDraft {
        ProductDraft {
            name: self.name,
            category: self.category,
            price: self.price,
            quantity: self.quantity,
        }
    }
}

/// Body of `PUT /api/products/{id}`.
///
/// Carries the id so the handler can reject a path/body mismatch
/// before anything reaches the service.
#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct UpdateProductRequest {
    pub id: i64,
    pub name: String,
    pub category: String,
    pub price: Decimal,
    pub quantity: i32,
}

impl UpdateProductRequest {
    /// Validate the request body.
    pub fn validate(&self) -> Result<(), String> {
        validate_fields(&self.name, &self.category, self.price, self.quantity)
    }

    /// Converts the validated request into a `Product` for the update
    /// path. The store ignores caller-supplied timestamps, so they are
    /// filled with placeholders here.
    #[must_use]
    pub fn into_product(self) -> Product {
        Product {
            id: self.id,
            name: self.name,
            category: self.category,
            price: self.price,
            quantity: self.quantity,
            created_at: DateTime::<Utc>::UNIX_EPOCH,
            updated_at: None,
        }
    }
}

fn validate_fields(
    name: &str,
    category: &str,
    price: Decimal,
    quantity: i32,
) -> Result<(), String> {
    let name_len = name.chars().count();
    if !(2..=200).contains(&name_len) {
        return Err("Name must be between 2 and 200 characters".to_string());
    }
    let category_len = category.chars().count();
    if !(2..=100).contains(&category_len) {
        return Err("Category must be between 2 and 100 characters".to_string());
    }
    if price <= Decimal::ZERO {
        return Err("Price must be greater than 0".to_string());
    }
    if quantity < 0 {
        return Err("Quantity cannot be negative".to_string());
    }
    Ok(())
}

#[cfg(test)]
mod tests {
    use super::*;
    use rust_decimal_macros::dec;

    fn create_request() -> CreateProductRequest {
        CreateProductRequest {
            name: "Laptop".into(),
            category: "Electronics".into(),
            price: dec!(999.99),
            quantity: 10,
        }
    }

    #[test]
    fn valid_request_passes() {
        assert!(create_request().validate().is_ok());
    }

    #[test]
    fn name_bounds_are_enforced() {
        let mut req = create_request();
        req.name = "x".into();
        assert!(req.validate().is_err());

        req.name = "y".repeat(201);
        assert!(req.validate().is_err());

        req.name = "ok".into();
        assert!(req.validate().is_ok());
    }

    #[test]
    fn category_bounds_are_enforced() {
        let mut req = create_request();
        req.category = "z".repeat(101);
        assert!(req.validate().is_err());
    }

    #[test]
    fn price_must_be_positive() {
        let mut req = create_request();
        req.price = Decimal::ZERO;
        assert!(req.validate().is_err());
        req.price = dec!(-1.50);
        assert!(req.validate().is_err());
        req.price = dec!(0.01);
        assert!(req.validate().is_ok());
    }

    #[test]
    fn quantity_must_be_non_negative() {
        let mut req = create_request();
        req.quantity = -1;
        assert!(req.validate().is_err());
        req.quantity = 0;
        assert!(req.validate().is_ok());
    }

    #[test]
    fn into_draft_carries_all_fields() {
        let draft = create_request().into_draft();
        assert_eq!(draft.name, "Laptop");
        assert_eq!(draft.price, dec!(999.99));
    }

    #[test]
    fn update_request_deserializes_camel_case() {
        let req: UpdateProductRequest = serde_json::from_str(
            r#"{"id": 1, "name": "Laptop", "category": "Electronics", "price": "999.99", "quantity": 10}"#,
        )
        .unwrap();
        assert_eq!(req.id, 1);
        assert_eq!(req.price, dec!(999.99));

        let product = req.into_product();
        assert_eq!(product.id, 1);
        assert!(product.updated_at.is_none());
    }
}
