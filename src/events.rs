//! Tagged union over the three product lifecycle events.
//!
//! Create and update payloads carry only the product id; the full record is
//! fetched from the commerce backend before syncing. Delete payloads are
//! flatter: the record is already gone, so whatever sync metadata the event
//! carries rides at the top level of the payload itself.

use serde::Deserialize;
use serde_json::Value;

use crate::error::SyncError;
use crate::product::SyncMetadata;

/// A product lifecycle event received from the commerce backend.
#[derive(Debug, Clone)]
pub enum ProductEvent {
    Created { id: String },
    Updated { id: String },
    Deleted { payload: DeletedPayload },
}

/// Raw payload of a `product.deleted` event.
#[derive(Debug, Clone, Deserialize)]
pub struct DeletedPayload {
    pub id: String,
    #[serde(default)]
    pub metadata: Option<SyncMetadata>,
}

#[derive(Debug, Deserialize)]
struct IdPayload {
    id: String,
}

impl ProductEvent {
    /// Parse an event from its wire name and raw JSON payload.
    pub fn from_wire(name: &str, data: Value) -> Result<Self, SyncError> {
        match name {
            "product.created" => {
                let payload: IdPayload = serde_json::from_value(data)?;
                Ok(Self::Created { id: payload.id })
            }
            "product.updated" => {
                let payload: IdPayload = serde_json::from_value(data)?;
                Ok(Self::Updated { id: payload.id })
            }
            "product.deleted" => {
                let payload: DeletedPayload = serde_json::from_value(data)?;
                Ok(Self::Deleted { payload })
            }
            other => Err(SyncError::UnknownEvent(other.to_string())),
        }
    }

    /// Wire name of this event.
    pub fn name(&self) -> &'static str {
        match self {
            Self::Created { .. } => "product.created",
            Self::Updated { .. } => "product.updated",
            Self::Deleted { .. } => "product.deleted",
        }
    }

    /// Commerce-side product id the event refers to.
    pub fn product_id(&self) -> &str {
        match self {
            Self::Created { id } | Self::Updated { id } => id,
            Self::Deleted { payload } => &payload.id,
        }
    }
}
