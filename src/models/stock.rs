//! Stock levels per product.
//!
//! The server owns the full stock schema. Fields this console does not
//! edit are kept in [`Stock::extra`] so they survive deserialization.

use serde::{Deserialize, Serialize};
use serde_json::{Map, Value};

use super::{Form, Labels, Resource, parse_integer};
use crate::ImsError;

/// A stock record as listed by `GET /stock`.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct Stock {
    pub stock_id: i64,
    pub product_id: i64,
    pub quantity: i64,
    #[serde(flatten)]
    pub extra: Map<String, Value>,
}

#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct StockDraft {
    pub product_id: String,
    pub quantity: String,
}

#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct StockPayload {
    pub product_id: i64,
    pub quantity: i64,
}

impl Form for StockDraft {
    const FIELDS: &'static [&'static str] = &["Product ID", "Quantity"];

    fn field(&self, index: usize) -> &str {
        match index {
            0 => &self.product_id,
            1 => &self.quantity,
            _ => "",
        }
    }

    fn field_mut(&mut self, index: usize) -> Option<&mut String> {
        match index {
            0 => Some(&mut self.product_id),
            1 => Some(&mut self.quantity),
            _ => None,
        }
    }
}

impl Resource for Stock {
    type Id = i64;
    type Draft = StockDraft;
    type Payload = StockPayload;

    const PATH: &'static str = "stock";
    const LABELS: Labels = Labels {
        title: "Stock",
        fetch_failed: "Failed to fetch stock",
        create_failed: "Failed to add stock",
        update_failed: "Failed to update stock",
        invalid_draft: "Please enter valid numeric product ID and non-negative quantity",
        create_action: "Add Stock",
        update_action: "Update Stock",
    };
    const COLUMNS: &'static [&'static str] = &["ID", "Product ID", "Quantity"];

    fn id(&self) -> i64 {
        self.stock_id
    }

    fn to_draft(&self) -> StockDraft {
        StockDraft {
            product_id: self.product_id.to_string(),
            quantity: self.quantity.to_string(),
        }
    }

    fn validate(draft: &StockDraft) -> crate::Result<StockPayload> {
        let product_id = parse_integer(&draft.product_id);
        // An empty shelf is a legitimate stock level.
        let quantity = parse_integer(&draft.quantity).filter(|q| *q >= 0);

        match (product_id, quantity) {
            (Some(product_id), Some(quantity)) => Ok(StockPayload {
                product_id,
                quantity,
            }),
            _ => Err(ImsError::Validation(Self::LABELS.invalid_draft)),
        }
    }

    fn row(&self) -> Vec<String> {
        vec![
            self.stock_id.to_string(),
            self.product_id.to_string(),
            self.quantity.to_string(),
        ]
    }
}
