//! Product catalogue entries.

use rust_decimal::Decimal;
use serde::{Deserialize, Serialize};

use super::{Form, Labels, Resource, parse_decimal, required};
use crate::ImsError;

/// A product as listed by `GET /products`.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct Product {
    pub product_id: i64,
    #[serde(default)]
    pub name: String,
    #[serde(default)]
    pub category: String,
    #[serde(with = "rust_decimal::serde::float")]
    pub price: Decimal,
    #[serde(default)]
    pub description: String,
}

/// Edit form for a product.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct ProductDraft {
    pub name: String,
    pub category: String,
    pub price: String,
    pub description: String,
}

/// Body of `POST /products` and `PUT /products/{id}`.
#[derive(Debug, Clone, PartialEq, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct ProductPayload {
    pub name: String,
    pub category: String,
    /// Sent as a JSON number.
    #[serde(with = "rust_decimal::serde::float")]
    pub price: Decimal,
    pub description: String,
}

impl Form for ProductDraft {
    const FIELDS: &'static [&'static str] = &["Name", "Category", "Price", "Description"];

    fn field(&self, index: usize) -> &str {
        match index {
            0 => &self.name,
            1 => &self.category,
            2 => &self.price,
            3 => &self.description,
            _ => "",
        }
    }

    fn field_mut(&mut self, index: usize) -> Option<&mut String> {
        match index {
            0 => Some(&mut self.name),
            1 => Some(&mut self.category),
            2 => Some(&mut self.price),
            3 => Some(&mut self.description),
            _ => None,
        }
    }
}

impl Resource for Product {
    type Id = i64;
    type Draft = ProductDraft;
    type Payload = ProductPayload;

    const PATH: &'static str = "products";
    const LABELS: Labels = Labels {
        title: "Products",
        fetch_failed: "Failed to fetch products",
        create_failed: "Failed to add product",
        update_failed: "Failed to update product",
        invalid_draft: "Please enter valid name, category, price, and description",
        create_action: "Add Product",
        update_action: "Update Product",
    };
    const COLUMNS: &'static [&'static str] = &["ID", "Name", "Category", "Price"];

    fn id(&self) -> i64 {
        self.product_id
    }

    fn to_draft(&self) -> ProductDraft {
        ProductDraft {
            name: self.name.clone(),
            category: self.category.clone(),
            price: self.price.normalize().to_string(),
            description: self.description.clone(),
        }
    }

    fn validate(draft: &ProductDraft) -> crate::Result<ProductPayload> {
        let invalid = || ImsError::Validation(Self::LABELS.invalid_draft);

        let name = required(&draft.name).ok_or_else(invalid)?;
        let category = required(&draft.category).ok_or_else(invalid)?;
        let price = parse_decimal(&draft.price).ok_or_else(invalid)?;
        let description = required(&draft.description).ok_or_else(invalid)?;

        Ok(ProductPayload {
            name: name.to_string(),
            category: category.to_string(),
            price,
            description: description.to_string(),
        })
    }

    fn row(&self) -> Vec<String> {
        vec![
            self.product_id.to_string(),
            self.name.clone(),
            self.category.clone(),
            self.price.normalize().to_string(),
        ]
    }
}
