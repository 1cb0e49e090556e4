//! Suppliers and their contact details.

use serde::{Deserialize, Serialize};

use super::{Form, Labels, Resource, required};
use crate::ImsError;

/// A supplier as listed by `GET /suppliers`.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct Supplier {
    pub supplier_id: i64,
    #[serde(default)]
    pub name: String,
    #[serde(default)]
    pub contact_info: String,
}

#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct SupplierDraft {
    pub name: String,
    pub contact_info: String,
}

#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct SupplierPayload {
    pub name: String,
    pub contact_info: String,
}

impl Form for SupplierDraft {
    const FIELDS: &'static [&'static str] = &["Name", "Contact Info"];

    fn field(&self, index: usize) -> &str {
        match index {
            0 => &self.name,
            1 => &self.contact_info,
            _ => "",
        }
    }

    fn field_mut(&mut self, index: usize) -> Option<&mut String> {
        match index {
            0 => Some(&mut self.name),
            1 => Some(&mut self.contact_info),
            _ => None,
        }
    }
}

impl Resource for Supplier {
    type Id = i64;
    type Draft = SupplierDraft;
    type Payload = SupplierPayload;

    const PATH: &'static str = "suppliers";
    const LABELS: Labels = Labels {
        title: "Suppliers",
        fetch_failed: "Failed to fetch suppliers",
        create_failed: "Failed to add supplier",
        update_failed: "Failed to update supplier",
        invalid_draft: "Please enter a valid name and contact info",
        create_action: "Add Supplier",
        update_action: "Update Supplier",
    };
    const COLUMNS: &'static [&'static str] = &["ID", "Name", "Contact Info"];

    fn id(&self) -> i64 {
        self.supplier_id
    }

    fn to_draft(&self) -> SupplierDraft {
        SupplierDraft {
            name: self.name.clone(),
            contact_info: self.contact_info.clone(),
        }
    }

    fn validate(draft: &SupplierDraft) -> crate::Result<SupplierPayload> {
        match (required(&draft.name), required(&draft.contact_info)) {
            (Some(name), Some(contact_info)) => Ok(SupplierPayload {
                name: name.to_string(),
                contact_info: contact_info.to_string(),
            }),
            _ => Err(ImsError::Validation(Self::LABELS.invalid_draft)),
        }
    }

    fn row(&self) -> Vec<String> {
        vec![
            self.supplier_id.to_string(),
            self.name.clone(),
            self.contact_info.clone(),
        ]
    }
}
