//! Inventory resources managed by the console.
//!
//! Every resource (product, supplier, stock, order) implements
//! [`Resource`], which ties together the entity as the server returns it,
//! the all-text [`Form`] draft bound to the edit form, and the typed
//! payload sent on create and update. Drafts are checked by
//! [`Resource::validate`] before anything goes on the wire.

pub mod order;
pub mod product;
pub mod stock;
pub mod supplier;

use std::fmt;
use std::str::FromStr;

use rust_decimal::Decimal;
use serde::Serialize;
use serde::de::DeserializeOwned;

pub use order::{Order, OrderDraft, OrderPayload};
pub use product::{Product, ProductDraft, ProductPayload};
pub use stock::{Stock, StockDraft, StockPayload};
pub use supplier::{Supplier, SupplierDraft, SupplierPayload};

/// Prefix shared by every failed delete.
pub const DELETE_FAILED: &str = "Delete failed";

/// User-facing strings for one resource screen.
#[derive(Debug, Clone, Copy)]
pub struct Labels {
    /// Screen title.
    pub title: &'static str,
    /// Prefix for a failed collection fetch.
    pub fetch_failed: &'static str,
    /// Prefix for a failed create.
    pub create_failed: &'static str,
    /// Prefix for a failed update.
    pub update_failed: &'static str,
    /// Message shown when the draft does not validate.
    pub invalid_draft: &'static str,
    /// Label of the create button.
    pub create_action: &'static str,
    /// Label of the update button.
    pub update_action: &'static str,
}

/// A collection exposed by the inventory API.
///
/// Implemented on the entity type itself.
pub trait Resource: DeserializeOwned + Clone + fmt::Debug + Send + Sync + 'static {
    /// Server-assigned identifier.
    type Id: Clone + PartialEq + fmt::Display + fmt::Debug + Send + Sync + 'static;
    /// Text-only form state.
    type Draft: Form + Default + Clone + fmt::Debug + Send + Sync + 'static;
    /// Validated body for create and update requests.
    type Payload: Serialize + fmt::Debug + Send + Sync + 'static;

    /// Path segment under the API base URL.
    const PATH: &'static str;
    /// Strings for the screen and its error banner.
    const LABELS: Labels;
    /// Table column headers, matching [`Resource::row`].
    const COLUMNS: &'static [&'static str];

    /// Returns the entity's identifier.
    fn id(&self) -> Self::Id;

    /// Copies the editable fields into a draft, numbers stringified.
    fn to_draft(&self) -> Self::Draft;

    /// Checks a draft and coerces it into a request payload.
    ///
    /// # Errors
    ///
    /// Returns [`ImsError::Validation`](crate::ImsError::Validation) with
    /// the resource's `invalid_draft` message.
    fn validate(draft: &Self::Draft) -> crate::Result<Self::Payload>;

    /// Cell text for the list table.
    fn row(&self) -> Vec<String>;
}

/// Form state made of plain text fields.
pub trait Form {
    /// Field labels in display order.
    const FIELDS: &'static [&'static str];

    /// Returns the text of a field, or `""` when out of range.
    fn field(&self, index: usize) -> &str;

    /// Returns a mutable handle to a field's text.
    fn field_mut(&mut self, index: usize) -> Option<&mut String>;
}

/// Returns the trimmed text when it is not blank.
pub(crate) fn required(text: &str) -> Option<&str> {
    let trimmed = text.trim();
    (!trimmed.is_empty()).then_some(trimmed)
}

/// Parses a required decimal, accepting plain and scientific notation.
pub(crate) fn parse_decimal(text: &str) -> Option<Decimal> {
    let text = required(text)?;
    Decimal::from_str(text)
        .or_else(|_| Decimal::from_scientific(text))
        .ok()
}

/// Parses a required integer.
pub(crate) fn parse_integer(text: &str) -> Option<i64> {
    required(text)?.parse().ok()
}
