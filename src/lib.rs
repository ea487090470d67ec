//! Bidirectional product synchronization between a commerce backend and a
//! headless content store.
//!
//! Commerce-side lifecycle events (`product.created`, `product.updated`,
//! `product.deleted`) arrive over a webhook, pass through a loop-prevention
//! guard, are projected into the content-store record shape, and pushed via
//! REST. Every push stamps fresh sync metadata (timestamp, origin tag, random
//! token); the guard reads that metadata on the way back in to keep a
//! sync-triggered write from ping-ponging between the two systems.

pub mod api;
pub mod clients;
pub mod config;
pub mod error;
pub mod events;
pub mod product;
pub mod sync;

pub use clients::{CommerceCatalog, CommerceClient, ContentStore, ContentStoreClient};
pub use config::SyncConfig;
pub use error::SyncError;
pub use events::ProductEvent;
pub use product::{CommerceProduct, ContentProduct, SyncMetadata, SyncSource};
pub use sync::{SyncHandler, SyncOutcome};
