//! Record shapes on both sides of the sync boundary, plus the provenance
//! stamp that rides along with every synced record.

use chrono::{DateTime, Utc};
use rand::distributions::Alphanumeric;
use rand::Rng;
use serde::{Deserialize, Serialize};

/// Which system originated the last sync of a record.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "kebab-case")]
pub enum SyncSource {
    Commerce,
    ContentStore,
}

/// Provenance stamp attached to every synced record.
///
/// Overwritten on every sync with a fresh timestamp, the originating system's
/// tag, and a new random token. The token is opaque and collisions are not
/// guarded against; a stamp is stale the moment either system mutates the
/// record again.
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct SyncMetadata {
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub last_synced_at: Option<DateTime<Utc>>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub sync_source: Option<SyncSource>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub sync_id: Option<String>,
}

impl SyncMetadata {
    /// Fresh stamp for a sync performed now by `source`.
    pub fn stamp(source: SyncSource) -> Self {
        let token: String = rand::thread_rng()
            .sample_iter(&Alphanumeric)
            .take(7)
            .map(char::from)
            .collect::<String>()
            .to_lowercase();

        Self {
            last_synced_at: Some(Utc::now()),
            sync_source: Some(source),
            sync_id: Some(token),
        }
    }
}

/// Product as fetched from the commerce admin API.
///
/// Only the fields the sync projects are modeled; everything else in the
/// admin payload is ignored.
#[derive(Debug, Clone, Deserialize)]
pub struct CommerceProduct {
    pub id: String,
    pub title: String,
    #[serde(default)]
    pub description: Option<String>,
    #[serde(default)]
    pub handle: Option<String>,
    #[serde(default)]
    pub variants: Vec<ProductVariant>,
    #[serde(default)]
    pub updated_at: Option<DateTime<Utc>>,
    #[serde(default)]
    pub metadata: Option<SyncMetadata>,
}

#[derive(Debug, Clone, Default, Deserialize)]
pub struct ProductVariant {
    #[serde(default)]
    pub sku: Option<String>,
    #[serde(default)]
    pub prices: Vec<VariantPrice>,
}

#[derive(Debug, Clone, Default, Deserialize)]
pub struct VariantPrice {
    #[serde(default)]
    pub amount: i64,
    #[serde(default)]
    pub sku: Option<String>,
}

/// Product record in the content store's `products` collection.
///
/// `medusa_reference_id` is the custom field linking a content-store record
/// back to its commerce-side product; the link is best-effort, enforced only
/// by the filtered lookup in the content-store client.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct ContentProduct {
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub id: Option<String>,
    pub name: String,
    pub description: String,
    pub price: i64,
    pub slug: String,
    pub sku: String,
    pub medusa_reference_id: String,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub date_updated: Option<DateTime<Utc>>,
    #[serde(default)]
    pub metadata: SyncMetadata,
}

#[cfg(test)]
mod tests {
    use super::*;
    use serde_json::json;

    #[test]
    fn test_stamp_marks_source_and_token() {
        let stamp = SyncMetadata::stamp(SyncSource::Commerce);
        assert_eq!(stamp.sync_source, Some(SyncSource::Commerce));
        assert!(stamp.last_synced_at.is_some());
        let token = stamp.sync_id.unwrap();
        assert!(!token.is_empty());
        assert!(token.chars().all(|c| c.is_ascii_lowercase() || c.is_ascii_digit()));
    }

    #[test]
    fn test_sync_source_wire_names() {
        assert_eq!(
            serde_json::to_value(SyncSource::Commerce).unwrap(),
            json!("commerce")
        );
        assert_eq!(
            serde_json::to_value(SyncSource::ContentStore).unwrap(),
            json!("content-store")
        );
    }

    #[test]
    fn test_metadata_uses_camel_case_keys() {
        let metadata: SyncMetadata = serde_json::from_value(json!({
            "lastSyncedAt": "2024-03-01T12:00:00Z",
            "syncSource": "content-store",
            "syncId": "a1b2c3d"
        }))
        .unwrap();

        assert!(metadata.last_synced_at.is_some());
        assert_eq!(metadata.sync_source, Some(SyncSource::ContentStore));
        assert_eq!(metadata.sync_id.as_deref(), Some("a1b2c3d"));
    }

    #[test]
    fn test_metadata_tolerates_unrelated_keys() {
        let metadata: SyncMetadata =
            serde_json::from_value(json!({ "color": "red" })).unwrap();
        assert_eq!(metadata, SyncMetadata::default());
    }

    #[test]
    fn test_commerce_product_deserializes_admin_payload() {
        let product: CommerceProduct = serde_json::from_value(json!({
            "id": "prod_01",
            "title": "Shirt",
            "description": "A shirt",
            "handle": "shirt",
            "status": "published",
            "variants": [
                { "sku": "SHIRT-S", "prices": [{ "amount": 1900, "currency_code": "usd" }] }
            ]
        }))
        .unwrap();

        assert_eq!(product.id, "prod_01");
        assert_eq!(product.variants[0].prices[0].amount, 1900);
        assert!(product.metadata.is_none());
    }
}
