//! Content store REST client.
//!
//! Talks to a headless CMS items API: `GET/POST /items/products` plus
//! `PATCH`/`DELETE` on individual records, with equality-filtered lookups
//! keyed on the commerce reference field. Every operation is a single
//! request/response cycle — no retry, no per-call timeout override — and
//! failures are logged at the call site before being propagated.

use async_trait::async_trait;
use serde::Deserialize;

use crate::config::SyncConfig;
use crate::error::SyncError;
use crate::product::ContentProduct;

/// Custom field on the content-store record linking back to the commerce
/// product.
pub const REFERENCE_FIELD: &str = "medusa_reference_id";

const ITEMS_PATH: &str = "items/products";

/// Operations the sync pipeline needs from the content store.
///
/// The trait is the seam for tests: the pipeline only ever sees this
/// interface, so an in-memory implementation can stand in for the real CMS.
#[async_trait]
pub trait ContentStore: Send + Sync {
    /// Create a new record in the `products` collection.
    async fn create_product(&self, product: ContentProduct) -> Result<(), SyncError>;

    /// Update the record whose reference field equals `reference_id`.
    ///
    /// Zero matches is a [`SyncError::NotFound`]; more than one is a
    /// [`SyncError::MultipleMatches`].
    async fn update_product(
        &self,
        reference_id: &str,
        product: ContentProduct,
    ) -> Result<(), SyncError>;

    /// Delete the record whose reference field equals `reference_id`, with
    /// the same zero/multiple match errors as updates.
    async fn delete_product(&self, reference_id: &str) -> Result<(), SyncError>;

    /// All records whose reference field equals `reference_id`.
    async fn find_by_reference(&self, reference_id: &str)
        -> Result<Vec<ContentProduct>, SyncError>;
}

#[derive(Debug, Deserialize)]
struct ItemsEnvelope {
    data: Vec<ContentProduct>,
}

/// reqwest-backed [`ContentStore`] implementation.
#[derive(Debug, Clone)]
pub struct ContentStoreClient {
    client: reqwest::Client,
    base_url: String,
    token: Option<String>,
}

impl ContentStoreClient {
    pub fn new(base_url: impl Into<String>) -> Self {
        Self {
            client: reqwest::Client::new(),
            base_url: base_url.into(),
            token: None,
        }
    }

    /// Use a static bearer token on every request.
    pub fn with_token(mut self, token: impl Into<String>) -> Self {
        self.token = Some(token.into());
        self
    }

    pub fn from_config(config: &SyncConfig) -> Self {
        let client = Self::new(config.content_store_url.clone());
        match &config.content_store_token {
            Some(token) => client.with_token(token.clone()),
            None => client,
        }
    }

    fn items_url(&self) -> String {
        format!("{}/{}", self.base_url.trim_end_matches('/'), ITEMS_PATH)
    }

    fn item_url(&self, id: &str) -> String {
        format!("{}/{}", self.items_url(), id)
    }

    fn authorize(&self, request: reqwest::RequestBuilder) -> reqwest::RequestBuilder {
        match &self.token {
            Some(token) => request.bearer_auth(token),
            None => request,
        }
    }

    /// Resolve a lookup result to the single record it should address.
    fn resolve_single(
        reference_id: &str,
        mut matches: Vec<ContentProduct>,
    ) -> Result<ContentProduct, SyncError> {
        match matches.len() {
            0 => Err(SyncError::NotFound(reference_id.to_string())),
            1 => Ok(matches.remove(0)),
            count => Err(SyncError::MultipleMatches {
                reference_id: reference_id.to_string(),
                count,
            }),
        }
    }

    async fn check(response: reqwest::Response) -> Result<reqwest::Response, SyncError> {
        if response.status().is_success() {
            return Ok(response);
        }
        let status = response.status();
        let body = response.text().await.unwrap_or_default();
        Err(SyncError::Api {
            system: "content store",
            status,
            body,
        })
    }

    async fn try_find(&self, reference_id: &str) -> Result<Vec<ContentProduct>, SyncError> {
        let filter_key = format!("filter[{REFERENCE_FIELD}][_eq]");
        let response = self
            .authorize(self.client.get(self.items_url()))
            .query(&[(filter_key.as_str(), reference_id)])
            .send()
            .await?;

        let envelope: ItemsEnvelope = Self::check(response).await?.json().await?;
        Ok(envelope.data)
    }

    async fn try_create(&self, product: &ContentProduct) -> Result<(), SyncError> {
        let response = self
            .authorize(self.client.post(self.items_url()))
            .json(product)
            .send()
            .await?;
        Self::check(response).await?;
        Ok(())
    }

    async fn try_update(
        &self,
        reference_id: &str,
        product: &ContentProduct,
    ) -> Result<(), SyncError> {
        let matches = self.try_find(reference_id).await?;
        let existing = Self::resolve_single(reference_id, matches)?;
        let id = existing
            .id
            .ok_or_else(|| SyncError::MissingId(reference_id.to_string()))?;

        let response = self
            .authorize(self.client.patch(self.item_url(&id)))
            .json(product)
            .send()
            .await?;
        Self::check(response).await?;
        Ok(())
    }

    async fn try_delete(&self, reference_id: &str) -> Result<(), SyncError> {
        let matches = self.try_find(reference_id).await?;
        let existing = Self::resolve_single(reference_id, matches)?;
        let id = existing
            .id
            .ok_or_else(|| SyncError::MissingId(reference_id.to_string()))?;

        let response = self
            .authorize(self.client.delete(self.item_url(&id)))
            .send()
            .await?;
        Self::check(response).await?;
        Ok(())
    }
}

#[async_trait]
impl ContentStore for ContentStoreClient {
    async fn create_product(&self, product: ContentProduct) -> Result<(), SyncError> {
        self.try_create(&product).await.map_err(|e| {
            tracing::error!("error creating product in content store: {e}");
            e
        })
    }

    async fn update_product(
        &self,
        reference_id: &str,
        product: ContentProduct,
    ) -> Result<(), SyncError> {
        self.try_update(reference_id, &product).await.map_err(|e| {
            tracing::error!("error updating product in content store: {e}");
            e
        })
    }

    async fn delete_product(&self, reference_id: &str) -> Result<(), SyncError> {
        self.try_delete(reference_id).await.map_err(|e| {
            tracing::error!("error deleting product from content store: {e}");
            e
        })
    }

    async fn find_by_reference(
        &self,
        reference_id: &str,
    ) -> Result<Vec<ContentProduct>, SyncError> {
        self.try_find(reference_id).await.map_err(|e| {
            tracing::error!("error finding product in content store by reference id: {e}");
            e
        })
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::product::SyncMetadata;

    fn record(id: Option<&str>, reference_id: &str) -> ContentProduct {
        ContentProduct {
            id: id.map(String::from),
            name: "Shirt".to_string(),
            description: String::new(),
            price: 1900,
            slug: "shirt".to_string(),
            sku: String::new(),
            medusa_reference_id: reference_id.to_string(),
            date_updated: None,
            metadata: SyncMetadata::default(),
        }
    }

    #[test]
    fn test_urls_tolerate_trailing_slash() {
        let client = ContentStoreClient::new("http://localhost:8055/");
        assert_eq!(client.items_url(), "http://localhost:8055/items/products");
        assert_eq!(
            client.item_url("abc"),
            "http://localhost:8055/items/products/abc"
        );
    }

    #[test]
    fn test_from_config_carries_token() {
        let config = SyncConfig::new()
            .with_content_store_url("http://cms:8055")
            .with_content_store_token("secret");
        let client = ContentStoreClient::from_config(&config);
        assert_eq!(client.base_url, "http://cms:8055");
        assert_eq!(client.token.as_deref(), Some("secret"));
    }

    #[test]
    fn test_resolve_single_zero_matches_is_not_found() {
        let err = ContentStoreClient::resolve_single("P1", Vec::new()).unwrap_err();
        assert!(matches!(err, SyncError::NotFound(ref id) if id == "P1"));
    }

    #[test]
    fn test_resolve_single_one_match() {
        let matches = vec![record(Some("cms_1"), "P1")];
        let resolved = ContentStoreClient::resolve_single("P1", matches).unwrap();
        assert_eq!(resolved.id.as_deref(), Some("cms_1"));
    }

    #[test]
    fn test_resolve_single_duplicates_are_an_error() {
        let matches = vec![record(Some("cms_1"), "P1"), record(Some("cms_2"), "P1")];
        let err = ContentStoreClient::resolve_single("P1", matches).unwrap_err();
        assert!(
            matches!(err, SyncError::MultipleMatches { ref reference_id, count } if reference_id == "P1" && count == 2)
        );
    }
}
