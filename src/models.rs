use serde::{Deserialize, Serialize};
use serde_json::{Map, Value};

use crate::error::ServiceError;

/// Fields that must be present (presence only, not type) before a purchase
/// is accepted for storage.
pub const REQUIRED_FIELDS: [&str; 3] = ["items", "purchase_date", "total_amount"];

/// One product entry within a purchase, as the extraction prompt asks the
/// model to produce it.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct LineItem {
    pub name: String,
    pub quantity: f64,
    pub unit_price: f64,
    pub total_price: f64,
}

/// The persisted document describing one shopping receipt.
///
/// The three required fields are kept as raw JSON values on purpose: the
/// service validates that the keys exist, never their types, and extractions
/// from the model are stored exactly as received. Unknown keys (including a
/// caller-attached `user_id`) ride along in `extra`.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct PurchaseRecord {
    pub items: Value,
    pub purchase_date: Value,
    pub total_amount: Value,
    #[serde(flatten)]
    pub extra: Map<String, Value>,
}

impl PurchaseRecord {
    /// Validates a request body for storage.
    ///
    /// A missing, null or empty body is distinguished from a body that is
    /// merely missing one of the required keys, because the two produce
    /// different client-facing messages.
    pub fn from_body(body: Option<Value>) -> Result<Self, ServiceError> {
        let data = match body {
            Some(Value::Object(map)) if !map.is_empty() => map,
            _ => return Err(ServiceError::bad_input("No data provided")),
        };

        if !REQUIRED_FIELDS.iter().all(|key| data.contains_key(*key)) {
            return Err(ServiceError::bad_input("Missing required fields"));
        }

        let mut extra = data;
        let items = extra.remove("items").unwrap_or(Value::Null);
        let purchase_date = extra.remove("purchase_date").unwrap_or(Value::Null);
        let total_amount = extra.remove("total_amount").unwrap_or(Value::Null);

        Ok(Self {
            items,
            purchase_date,
            total_amount,
            extra,
        })
    }

    pub fn into_value(self) -> Value {
        serde_json::to_value(self).unwrap_or(Value::Null)
    }
}
