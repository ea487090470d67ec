//! REST clients for the two systems being bridged.

pub mod commerce;
pub mod content_store;

pub use commerce::{CommerceCatalog, CommerceClient};
pub use content_store::{ContentStore, ContentStoreClient, REFERENCE_FIELD};
