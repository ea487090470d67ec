//! Loop-prevention guard.
//!
//! A write pushed into the content store triggers a change event back on the
//! commerce side (and vice versa); without a guard the two systems ping-pong
//! forever. The guard reads the provenance stamp on the incoming record: if
//! the last sync came from the content store and happened inside the
//! threshold window, the event is judged externally originated and skipped.
//!
//! Known weaknesses, kept on purpose: the comparison uses this process's
//! wall clock with no skew compensation, and a genuine edit landing inside
//! the window right after a cross-system sync is suppressed along with the
//! echo it resembles.

use chrono::Utc;

use crate::product::{SyncMetadata, SyncSource};

/// Decide whether an incoming change was caused by a prior sync from the
/// content store and should therefore be skipped.
///
/// Records with no metadata, or no `lastSyncedAt`, are never external.
/// `threshold_ms` is the window width; events timestamped in the future
/// (negative elapsed) count as inside the window.
pub fn is_external_sync(metadata: Option<&SyncMetadata>, threshold_ms: i64) -> bool {
    let Some(metadata) = metadata else {
        return false;
    };
    let Some(last_synced_at) = metadata.last_synced_at else {
        return false;
    };

    let elapsed_ms = Utc::now()
        .signed_duration_since(last_synced_at)
        .num_milliseconds();
    tracing::info!(elapsed_ms, "time since last sync");

    metadata.sync_source == Some(SyncSource::ContentStore) && elapsed_ms < threshold_ms
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::config::DEFAULT_SYNC_THRESHOLD_MS;
    use chrono::Duration;

    fn metadata_synced_ago(source: SyncSource, ago: Duration) -> SyncMetadata {
        SyncMetadata {
            last_synced_at: Some(Utc::now() - ago),
            sync_source: Some(source),
            sync_id: Some("tok1234".to_string()),
        }
    }

    #[test]
    fn test_no_metadata_is_not_external() {
        assert!(!is_external_sync(None, DEFAULT_SYNC_THRESHOLD_MS));
    }

    #[test]
    fn test_metadata_without_timestamp_is_not_external() {
        let metadata = SyncMetadata {
            last_synced_at: None,
            sync_source: Some(SyncSource::ContentStore),
            sync_id: Some("tok1234".to_string()),
        };
        assert!(!is_external_sync(Some(&metadata), DEFAULT_SYNC_THRESHOLD_MS));
    }

    #[test]
    fn test_recent_content_store_sync_is_external() {
        let metadata = metadata_synced_ago(SyncSource::ContentStore, Duration::seconds(2));
        assert!(is_external_sync(Some(&metadata), DEFAULT_SYNC_THRESHOLD_MS));
    }

    #[test]
    fn test_stale_content_store_sync_is_not_external() {
        let metadata = metadata_synced_ago(SyncSource::ContentStore, Duration::seconds(30));
        assert!(!is_external_sync(Some(&metadata), DEFAULT_SYNC_THRESHOLD_MS));
    }

    #[test]
    fn test_commerce_sync_is_never_external() {
        let recent = metadata_synced_ago(SyncSource::Commerce, Duration::seconds(1));
        assert!(!is_external_sync(Some(&recent), DEFAULT_SYNC_THRESHOLD_MS));

        let stale = metadata_synced_ago(SyncSource::Commerce, Duration::hours(1));
        assert!(!is_external_sync(Some(&stale), DEFAULT_SYNC_THRESHOLD_MS));
    }

    #[test]
    fn test_future_timestamp_counts_as_inside_window() {
        let metadata = metadata_synced_ago(SyncSource::ContentStore, Duration::seconds(-5));
        assert!(is_external_sync(Some(&metadata), DEFAULT_SYNC_THRESHOLD_MS));
    }

    #[test]
    fn test_threshold_is_configurable() {
        let metadata = metadata_synced_ago(SyncSource::ContentStore, Duration::seconds(2));
        assert!(!is_external_sync(Some(&metadata), 1_000));
    }
}
