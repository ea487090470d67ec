//! Sync pipeline: loop guard, field mapper, and the event handler that
//! strings them together.

pub mod guard;
pub mod handler;
pub mod mapper;

pub use guard::is_external_sync;
pub use handler::{SyncHandler, SyncOutcome};
pub use mapper::map_product;
