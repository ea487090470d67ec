//! Commerce admin API client.
//!
//! The webhook payload for creates and updates carries only a product id;
//! the full record is fetched from `GET /admin/products/{id}` before mapping.

use async_trait::async_trait;
use serde::Deserialize;

use crate::config::SyncConfig;
use crate::error::SyncError;
use crate::product::CommerceProduct;

/// Read access to the commerce backend's product catalog.
#[async_trait]
pub trait CommerceCatalog: Send + Sync {
    /// Fetch the full product record for `id`.
    async fn retrieve_product(&self, id: &str) -> Result<CommerceProduct, SyncError>;
}

#[derive(Debug, Deserialize)]
struct ProductEnvelope {
    product: CommerceProduct,
}

/// reqwest-backed [`CommerceCatalog`] implementation.
#[derive(Debug, Clone)]
pub struct CommerceClient {
    client: reqwest::Client,
    base_url: String,
    token: Option<String>,
}

impl CommerceClient {
    pub fn new(base_url: impl Into<String>) -> Self {
        Self {
            client: reqwest::Client::new(),
            base_url: base_url.into(),
            token: None,
        }
    }

    /// Use an admin API token on every request.
    pub fn with_token(mut self, token: impl Into<String>) -> Self {
        self.token = Some(token.into());
        self
    }

    pub fn from_config(config: &SyncConfig) -> Self {
        let client = Self::new(config.commerce_url.clone());
        match &config.commerce_token {
            Some(token) => client.with_token(token.clone()),
            None => client,
        }
    }

    fn product_url(&self, id: &str) -> String {
        format!("{}/admin/products/{id}", self.base_url.trim_end_matches('/'))
    }

    async fn try_retrieve(&self, id: &str) -> Result<CommerceProduct, SyncError> {
        let mut request = self.client.get(self.product_url(id));
        if let Some(token) = &self.token {
            request = request.bearer_auth(token);
        }
        let response = request.send().await?;

        if !response.status().is_success() {
            let status = response.status();
            let body = response.text().await.unwrap_or_default();
            return Err(SyncError::Api {
                system: "commerce",
                status,
                body,
            });
        }

        let envelope: ProductEnvelope = response.json().await?;
        Ok(envelope.product)
    }
}

#[async_trait]
impl CommerceCatalog for CommerceClient {
    async fn retrieve_product(&self, id: &str) -> Result<CommerceProduct, SyncError> {
        self.try_retrieve(id).await.map_err(|e| {
            tracing::error!("error retrieving product {id} from commerce backend: {e}");
            e
        })
    }
}
