//! Event receiver: guard, stamp, map, push.
//!
//! One synchronous request/response cycle per event, no queue and no retry.
//! Events for the same product arriving close together can race on the
//! content store's lookup-then-write sequence; nothing here locks against
//! that.

use std::sync::Arc;

use crate::clients::{CommerceCatalog, ContentStore};
use crate::config::DEFAULT_SYNC_THRESHOLD_MS;
use crate::error::SyncError;
use crate::events::ProductEvent;
use crate::product::{SyncMetadata, SyncSource};
use crate::sync::guard::is_external_sync;
use crate::sync::mapper::map_product;

/// What `handle_event` did with an event.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum SyncOutcome {
    /// The change was pushed to the content store.
    Synced,
    /// The loop guard judged the event externally originated; nothing was
    /// pushed.
    Skipped,
}

/// Drives the sync pipeline for incoming product events.
///
/// Clients are injected rather than global: each process (or test) builds
/// its own handler around whatever [`CommerceCatalog`] and [`ContentStore`]
/// implementations it wants.
pub struct SyncHandler {
    commerce: Arc<dyn CommerceCatalog>,
    content_store: Arc<dyn ContentStore>,
    threshold_ms: i64,
}

impl SyncHandler {
    pub fn new(commerce: Arc<dyn CommerceCatalog>, content_store: Arc<dyn ContentStore>) -> Self {
        Self {
            commerce,
            content_store,
            threshold_ms: DEFAULT_SYNC_THRESHOLD_MS,
        }
    }

    /// Override the loop-guard window.
    pub fn with_threshold_ms(mut self, threshold_ms: i64) -> Self {
        self.threshold_ms = threshold_ms;
        self
    }

    /// Handle one lifecycle event end to end.
    pub async fn handle_event(&self, event: ProductEvent) -> Result<SyncOutcome, SyncError> {
        match event {
            ProductEvent::Created { id } => {
                let product = self.commerce.retrieve_product(&id).await?;
                tracing::info!(product_id = %id, "product created");

                if is_external_sync(product.metadata.as_ref(), self.threshold_ms) {
                    tracing::info!("skipping sync - product created from content store");
                    return Ok(SyncOutcome::Skipped);
                }

                let mut record = map_product(&product);
                record.metadata = SyncMetadata::stamp(SyncSource::Commerce);

                self.content_store.create_product(record).await?;
                tracing::info!(product_id = %id, "product synced to content store");
                Ok(SyncOutcome::Synced)
            }

            ProductEvent::Updated { id } => {
                let product = self.commerce.retrieve_product(&id).await?;
                tracing::info!(product_id = %id, "product updated");

                if is_external_sync(product.metadata.as_ref(), self.threshold_ms) {
                    tracing::info!("skipping sync - product updated from content store");
                    return Ok(SyncOutcome::Skipped);
                }

                let mut record = map_product(&product);
                record.metadata = SyncMetadata::stamp(SyncSource::Commerce);

                self.content_store.update_product(&id, record).await?;
                tracing::info!(product_id = %id, "product updated in content store");
                Ok(SyncOutcome::Synced)
            }

            ProductEvent::Deleted { payload } => {
                if is_external_sync(payload.metadata.as_ref(), self.threshold_ms) {
                    tracing::info!("skipping sync - product deleted from content store");
                    return Ok(SyncOutcome::Skipped);
                }

                self.content_store.delete_product(&payload.id).await?;
                tracing::info!(product_id = %payload.id, "product deleted from content store");
                Ok(SyncOutcome::Synced)
            }
        }
    }

    /// Outer layer used by the webhook route: handle the event and log any
    /// failure. A failed sync is lost; there is no retry or dead-letter.
    pub async fn process(&self, event: ProductEvent) {
        let name = event.name();
        if let Err(e) = self.handle_event(event).await {
            tracing::error!("error handling {name} event: {e}");
        }
    }
}
