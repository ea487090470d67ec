//! HTTP surface: the webhook endpoint the commerce backend posts lifecycle
//! events to, plus a greeting stub and a health endpoint.

pub mod handlers;
pub mod server;

pub use handlers::AppState;
pub use server::ApiServer;
