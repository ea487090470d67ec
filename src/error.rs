use reqwest::StatusCode;
use thiserror::Error;

/// Errors surfaced by the sync pipeline and its REST clients.
///
/// Client operations catch, log, and rethrow: every failure is logged at the
/// call site and then propagated unchanged. There is no retry layer; the
/// webhook receiver logs whatever reaches it and drops the event.
#[derive(Debug, Error)]
pub enum SyncError {
    /// No content-store record carries the given commerce reference id.
    #[error("no product found with medusa_reference_id: {0}")]
    NotFound(String),

    /// More than one content-store record carries the same reference id.
    /// Uniqueness is not enforced store-side, so this is reported instead of
    /// silently operating on the first match.
    #[error("{count} products share medusa_reference_id: {reference_id}")]
    MultipleMatches { reference_id: String, count: usize },

    /// A content-store record came back without a primary key.
    #[error("content store record for {0} has no id")]
    MissingId(String),

    /// Transport-level failure from either REST client.
    #[error("http request failed: {0}")]
    Http(#[from] reqwest::Error),

    /// Non-success response from either system's API.
    #[error("{system} API error ({status}): {body}")]
    Api {
        system: &'static str,
        status: StatusCode,
        body: String,
    },

    /// Event name outside the three product lifecycle events.
    #[error("unhandled event: {0}")]
    UnknownEvent(String),

    /// Event payload that does not deserialize into the expected shape.
    #[error("malformed event payload: {0}")]
    Payload(#[from] serde_json::Error),
}
