//! Customer orders.
//!
//! Only the product reference and quantity are editable. `orderDate` and
//! `status` are assigned by the server and shown read-only.

use chrono::{DateTime, NaiveDate, NaiveDateTime, Utc};
use serde::{Deserialize, Serialize};

use super::{Form, Labels, Resource, parse_integer};
use crate::ImsError;

/// An order as listed by `GET /orders`.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct Order {
    pub order_id: i64,
    pub product_id: i64,
    pub quantity: i64,
    #[serde(default)]
    pub order_date: Option<String>,
    #[serde(default)]
    pub status: Option<String>,
}

#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct OrderDraft {
    pub product_id: String,
    pub quantity: String,
}

#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct OrderPayload {
    pub product_id: i64,
    pub quantity: i64,
}

impl Order {
    /// Returns the order date as `YYYY-MM-DD`.
    pub fn display_date(&self) -> String {
        self.order_date
            .as_deref()
            .map_or_else(|| "-".to_string(), calendar_date)
    }
}

/// Reduces a server timestamp to its calendar date.
///
/// Zoned timestamps are converted to UTC first. Text that is not a
/// recognisable date is returned unchanged.
fn calendar_date(raw: &str) -> String {
    let raw = raw.trim();
    let date = DateTime::parse_from_rfc3339(raw)
        .map(|dt| dt.with_timezone(&Utc).date_naive())
        .or_else(|_| NaiveDateTime::parse_from_str(raw, "%Y-%m-%dT%H:%M:%S%.f").map(|dt| dt.date()))
        .or_else(|_| NaiveDate::parse_from_str(raw, "%Y-%m-%d"));

    match date {
        Ok(date) => date.format("%Y-%m-%d").to_string(),
        Err(_) => raw.to_string(),
    }
}

impl Form for OrderDraft {
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

impl Resource for Order {
    type Id = i64;
    type Draft = OrderDraft;
    type Payload = OrderPayload;

    const PATH: &'static str = "orders";
    const LABELS: Labels = Labels {
        title: "Orders",
        fetch_failed: "Failed to fetch orders",
        create_failed: "Failed to place order",
        update_failed: "Failed to update order",
        invalid_draft: "Please enter valid numeric product ID and positive quantity",
        create_action: "Place Order",
        update_action: "Update Order",
    };
    const COLUMNS: &'static [&'static str] = &["ID", "Product ID", "Quantity", "Date", "Status"];

    fn id(&self) -> i64 {
        self.order_id
    }

    fn to_draft(&self) -> OrderDraft {
        OrderDraft {
            product_id: self.product_id.to_string(),
            quantity: self.quantity.to_string(),
        }
    }

    fn validate(draft: &OrderDraft) -> crate::Result<OrderPayload> {
        let product_id = parse_integer(&draft.product_id);
        let quantity = parse_integer(&draft.quantity).filter(|q| *q > 0);

        match (product_id, quantity) {
            (Some(product_id), Some(quantity)) => Ok(OrderPayload {
                product_id,
                quantity,
            }),
            _ => Err(ImsError::Validation(Self::LABELS.invalid_draft)),
        }
    }

    fn row(&self) -> Vec<String> {
        vec![
            self.order_id.to_string(),
            self.product_id.to_string(),
            self.quantity.to_string(),
            self.display_date(),
            self.status.clone().unwrap_or_default(),
        ]
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn draft(product_id: &str, quantity: &str) -> OrderDraft {
        OrderDraft {
            product_id: product_id.to_string(),
            quantity: quantity.to_string(),
        }
    }

    #[test]
    fn quantity_must_be_positive() {
        for quantity in ["0", "-2", "", "many"] {
            let err = Order::validate(&draft("3", quantity)).unwrap_err();
            assert_eq!(
                err.to_string(),
                "Please enter valid numeric product ID and positive quantity"
            );
        }
    }

    #[test]
    fn product_id_must_be_numeric() {
        assert!(Order::validate(&draft("bolt", "1")).is_err());
        assert_eq!(
            Order::validate(&draft(" 3 ", "2")).unwrap(),
            OrderPayload {
                product_id: 3,
                quantity: 2
            }
        );
    }

    #[test]
    fn calendar_date_handles_server_formats() {
        assert_eq!(calendar_date("2024-01-15T10:30:00.123456"), "2024-01-15");
        assert_eq!(calendar_date("2024-01-15T23:30:00-05:00"), "2024-01-16");
        assert_eq!(calendar_date("2024-01-15T10:30:00Z"), "2024-01-15");
        assert_eq!(calendar_date("2024-01-15"), "2024-01-15");
        assert_eq!(calendar_date("last tuesday"), "last tuesday");
    }

    #[test]
    fn missing_date_renders_placeholder() {
        let order = Order {
            order_id: 1,
            product_id: 2,
            quantity: 3,
            order_date: None,
            status: None,
        };
        assert_eq!(order.row(), vec!["1", "2", "3", "-", ""]);
    }
}
