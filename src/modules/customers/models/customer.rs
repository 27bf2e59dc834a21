use serde::{Deserialize, Serialize};

use crate::core::{Result, StoreError};

/// The customer an order is bound to. Session handling and account storage
/// are outside this crate; the ledger only distinguishes guests from known
/// customers and carries enough identity to re-link on restore.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(tag = "type", rename_all = "snake_case")]
pub enum Customer {
    Guest,
    Registered {
        id: String,
        name: String,
        email: String,
    },
}

impl Customer {
    pub fn registered(
        id: impl Into<String>,
        name: impl Into<String>,
        email: impl Into<String>,
    ) -> Self {
        Customer::Registered {
            id: id.into(),
            name: name.into(),
            email: email.into(),
        }
    }

    pub fn id(&self) -> Option<&str> {
        match self {
            Customer::Guest => None,
            Customer::Registered { id, .. } => Some(id),
        }
    }

    pub fn is_guest(&self) -> bool {
        matches!(self, Customer::Guest)
    }

    /// Encode for the flat dump. The persisted representation is an opaque
    /// JSON string; the storage layer may wrap it in another encoding layer.
    pub fn encode(&self) -> Result<String> {
        Ok(serde_json::to_string(self)?)
    }

    /// Decode a persisted customer blob.
    ///
    /// Some storage layers re-encode stored values, so the blob may arrive
    /// wrapped in one extra JSON string layer. A direct decode is attempted
    /// first; on failure the blob is unwrapped once and decoded again.
    /// Anything else is corrupt state.
    pub fn decode(raw: &str) -> Result<Customer> {
        if let Ok(customer) = serde_json::from_str::<Customer>(raw) {
            return Ok(customer);
        }

        let inner: String = serde_json::from_str(raw)
            .map_err(|err| StoreError::corrupt_state(format!("undecodable customer: {err}")))?;
        serde_json::from_str(&inner)
            .map_err(|err| StoreError::corrupt_state(format!("undecodable customer: {err}")))
    }
}

impl Default for Customer {
    fn default() -> Self {
        Customer::Guest
    }
}
