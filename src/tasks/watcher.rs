//! Data File Watch Task
//!
//! Background task that polls the item data file and fires a callback when it
//! changes on disk, so edits made outside the service still invalidate the
//! stats cache.

use std::collections::hash_map::DefaultHasher;
use std::hash::{Hash, Hasher};
use std::path::{Path, PathBuf};
use std::time::{Duration, SystemTime};

use tokio::task::JoinHandle;
use tracing::{debug, info};

use crate::catalog::MutationObserver;

/// Observable identity of the file between polls.
///
/// The content hash catches same-size rewrites that land within the
/// filesystem's mtime granularity.
#[derive(Debug, Clone, PartialEq, Eq)]
struct Fingerprint {
    modified: Option<SystemTime>,
    len: u64,
    content: u64,
}

async fn fingerprint(path: &Path) -> Option<Fingerprint> {
    let meta = tokio::fs::metadata(path).await.ok()?;
    let bytes = tokio::fs::read(path).await.ok()?;

    let mut hasher = DefaultHasher::new();
    bytes.hash(&mut hasher);

    Some(Fingerprint {
        modified: meta.modified().ok(),
        len: meta.len(),
        content: hasher.finish(),
    })
}

/// Spawns a background task that watches `path` for modifications.
///
/// The task samples the file's modification time, size and content hash every
/// `interval` and calls `on_change` whenever any of them differs from the
/// previous sample. The file appearing or disappearing also counts as a change.
///
/// # Returns
/// A JoinHandle for the spawned task, which can be used to abort the task
/// during graceful shutdown.
///
/// # Example
/// ```ignore
/// let cache = service.stats_cache().invalidator();
/// let watch_handle = spawn_watch_task(config.data_path.clone(), cache, Duration::from_secs(1));
/// // Later, during shutdown:
/// watch_handle.abort();
/// ```
pub fn spawn_watch_task(
    path: PathBuf,
    on_change: MutationObserver,
    interval: Duration,
) -> JoinHandle<()> {
    tokio::spawn(async move {
        info!(
            "Watching {} for changes every {}ms",
            path.display(),
            interval.as_millis()
        );

        let mut last = fingerprint(&path).await;

        loop {
            // Sleep for the configured interval
            tokio::time::sleep(interval).await;

            let current = fingerprint(&path).await;
            if current != last {
                info!("Items file changed, invalidating stats cache");
                on_change();
                last = current;
            } else {
                debug!("Items file unchanged");
            }
        }
    })
}
