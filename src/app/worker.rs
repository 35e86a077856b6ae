//! Background worker answering catalog fetch requests.

use tokio::sync::mpsc;
use tokio::task::JoinHandle;
use tracing::debug;

use crate::sources::CatalogSource;
use crate::state::{CatalogQuery, CatalogResults, StoreEvent};

/// What: Spawn the worker that turns fetch requests into store events.
///
/// Inputs:
/// - `source`: Catalog source to call for every request
/// - `query_rx`: Requests from the store
/// - `event_tx`: The store's event channel
///
/// Output:
/// - Handle of the spawned task; it ends when either channel closes.
///
/// Details:
/// - Requests queued behind a slow fetch are coalesced; only the newest is
///   fetched and answered.
/// - Errors are reported as their display string so the store can show them verbatim.
pub fn spawn_catalog_worker<S>(
    source: S,
    mut query_rx: mpsc::UnboundedReceiver<CatalogQuery>,
    event_tx: mpsc::UnboundedSender<StoreEvent>,
) -> JoinHandle<()>
where
    S: CatalogSource + 'static,
{
    tokio::spawn(async move {
        while let Some(mut latest) = query_rx.recv().await {
            while let Ok(newer) = query_rx.try_recv() {
                debug!(skipped = latest.id, "coalescing queued catalog request");
                latest = newer;
            }
            let outcome = source
                .fetch_catalog()
                .await
                .map_err(|err| err.to_string());
            let results = CatalogResults {
                id: latest.id,
                outcome,
            };
            if event_tx.send(StoreEvent::Results(results)).is_err() {
                debug!("catalog store dropped; stopping worker");
                break;
            }
        }
    })
}
