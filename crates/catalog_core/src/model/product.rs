//! Product domain model.
//!
//! # Responsibility
//! - Define the single catalog record exchanged between HTTP, service and storage.
//! - Provide boundary validation for required fields.
//!
//! # Invariants
//! - `id` is assigned exactly once by storage and never reused.
//! - A valid product has a non-blank `name` and a strictly positive `price`.
//! - Validation runs at the request boundary, not inside the service layer.

use rust_decimal::Decimal;
use serde::{Deserialize, Serialize};
use std::error::Error;
use std::fmt::{Display, Formatter};

/// Storage-assigned product identifier.
pub type ProductId = i64;

/// Catalog product record.
///
/// Serialized with camelCase field names to match the public JSON shape
/// (`imageUrl`).
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct Product {
    /// `None` until storage assigns one on first save.
    #[serde(default)]
    pub id: Option<ProductId>,
    pub name: String,
    #[serde(default)]
    pub description: Option<String>,
    /// Accepts JSON numbers or decimal strings; emitted as a JSON number.
    #[serde(serialize_with = "rust_decimal::serde::float::serialize")]
    pub price: Decimal,
    #[serde(default)]
    pub image_url: Option<String>,
}

/// Boundary validation failures for product payloads.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum ProductValidationError {
    BlankName,
    NonPositivePrice(Decimal),
}

impl Display for ProductValidationError {
    fn fmt(&self, f: &mut Formatter<'_>) -> std::fmt::Result {
        match self {
            Self::BlankName => write!(f, "Name is required"),
            Self::NonPositivePrice(_) => write!(f, "Price must be a positive value"),
        }
    }
}

impl Error for ProductValidationError {}

impl Product {
    /// Creates an unsaved product with only the required fields set.
    pub fn new(name: impl Into<String>, price: Decimal) -> Self {
        Self {
            id: None,
            name: name.into(),
            description: None,
            price,
            image_url: None,
        }
    }

    /// Builder-style setter for `description`.
    pub fn with_description(mut self, description: impl Into<String>) -> Self {
        self.description = Some(description.into());
        self
    }

    /// Builder-style setter for `image_url`.
    pub fn with_image_url(mut self, image_url: impl Into<String>) -> Self {
        self.image_url = Some(image_url.into());
        self
    }

    /// Returns whether storage has assigned an id yet.
    pub fn is_persisted(&self) -> bool {
        self.id.is_some()
    }

    /// Checks required-field rules for create/update payloads.
    ///
    /// # Errors
    /// - `BlankName` when `name` is empty or whitespace only.
    /// - `NonPositivePrice` when `price <= 0`.
    pub fn validate(&self) -> Result<(), ProductValidationError> {
        if self.name.trim().is_empty() {
            return Err(ProductValidationError::BlankName);
        }
        if self.price <= Decimal::ZERO {
            return Err(ProductValidationError::NonPositivePrice(self.price));
        }
        Ok(())
    }
}

#[cfg(test)]
mod tests {
    use super::{Product, ProductValidationError};
    use rust_decimal::Decimal;

    #[test]
    fn validate_accepts_minimal_product() {
        let product = Product::new("Widget", Decimal::new(999, 2));
        assert_eq!(product.validate(), Ok(()));
        assert!(!product.is_persisted());
    }

    #[test]
    fn validate_rejects_whitespace_name() {
        let product = Product::new(" \t ", Decimal::ONE);
        assert_eq!(product.validate(), Err(ProductValidationError::BlankName));
    }

    #[test]
    fn validate_rejects_zero_and_negative_price() {
        let zero = Product::new("Widget", Decimal::ZERO);
        assert_eq!(
            zero.validate(),
            Err(ProductValidationError::NonPositivePrice(Decimal::ZERO))
        );

        let negative = Product::new("Widget", Decimal::new(-1, 0));
        assert!(matches!(
            negative.validate(),
            Err(ProductValidationError::NonPositivePrice(_))
        ));
    }
}
