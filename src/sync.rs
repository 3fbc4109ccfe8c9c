//! Single owner of catalog refreshes.
//!
//! Startup, manual refresh and realtime changes all send a trigger here. The
//! coordinator drains whatever is queued before each fetch, so a burst of
//! triggers costs one fetch and two fetches never overlap.

use std::future::Future;

use tokio::sync::mpsc;
use tracing::{debug, info};

use crate::api::SupabaseClient;
use crate::app::AsyncAction;
use crate::catalog::{self, CatalogSnapshot};

#[derive(Debug, Clone, PartialEq)]
pub enum RefreshTrigger {
    Startup,
    Manual,
    /// Table name reported by the change feed
    RemoteChange(String),
}

pub async fn run_coordinator<F, Fut>(
    mut triggers: mpsc::Receiver<RefreshTrigger>,
    fetch: F,
    deliver: mpsc::Sender<AsyncAction>,
) where
    F: Fn() -> Fut,
    Fut: Future<Output = CatalogSnapshot>,
{
    while let Some(first) = triggers.recv().await {
        let mut coalesced = 0usize;
        while let Ok(extra) = triggers.try_recv() {
            debug!("Coalescing refresh trigger {:?}", extra);
            coalesced += 1;
        }
        info!("Refreshing catalog ({:?}, {} coalesced)", first, coalesced);

        let snapshot = fetch().await;
        if deliver.send(AsyncAction::CatalogLoaded(snapshot)).await.is_err() {
            break;
        }
    }
    debug!("Refresh coordinator stopped");
}

/// Start the coordinator for `client`; send triggers on the returned sender
pub fn spawn_coordinator(client: SupabaseClient, deliver: mpsc::Sender<AsyncAction>) -> mpsc::Sender<RefreshTrigger> {
    let (tx, rx) = mpsc::channel::<RefreshTrigger>(64);
    tokio::spawn(async move {
        run_coordinator(
            rx,
            || {
                let client = client.clone();
                async move { catalog::fetch_all(&client).await }
            },
            deliver,
        )
        .await;
    });
    tx
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::sync::atomic::{AtomicUsize, Ordering};
    use std::sync::Arc;
    use tokio::sync::Notify;

    #[tokio::test]
    async fn test_burst_is_one_fetch() {
        let (trig_tx, trig_rx) = mpsc::channel(16);
        let (out_tx, mut out_rx) = mpsc::channel(16);
        for _ in 0..5 {
            trig_tx.send(RefreshTrigger::RemoteChange("channels".into())).await.unwrap();
        }
        drop(trig_tx);

        let count = Arc::new(AtomicUsize::new(0));
        let c = count.clone();
        run_coordinator(
            trig_rx,
            move || {
                let c = c.clone();
                async move {
                    c.fetch_add(1, Ordering::SeqCst);
                    CatalogSnapshot::fallback()
                }
            },
            out_tx,
        )
        .await;

        assert_eq!(count.load(Ordering::SeqCst), 1);
        assert!(matches!(out_rx.recv().await, Some(AsyncAction::CatalogLoaded(_))));
        assert!(out_rx.recv().await.is_none());
    }

    #[tokio::test]
    async fn test_triggers_during_fetch_collapse_into_one_more() {
        let (trig_tx, trig_rx) = mpsc::channel(16);
        let (out_tx, mut out_rx) = mpsc::channel(16);
        let count = Arc::new(AtomicUsize::new(0));
        let gate = Arc::new(Notify::new());

        let c = count.clone();
        let g = gate.clone();
        let coordinator = tokio::spawn(run_coordinator(
            trig_rx,
            move || {
                let c = c.clone();
                let g = g.clone();
                async move {
                    if c.fetch_add(1, Ordering::SeqCst) == 0 {
                        g.notified().await;
                    }
                    CatalogSnapshot::default()
                }
            },
            out_tx,
        ));

        trig_tx.send(RefreshTrigger::Startup).await.unwrap();
        while count.load(Ordering::SeqCst) == 0 {
            tokio::task::yield_now().await;
        }

        // First fetch is parked on the gate
        for table in ["categories", "channels", "matches"] {
            trig_tx.send(RefreshTrigger::RemoteChange(table.into())).await.unwrap();
        }
        gate.notify_one();

        assert!(out_rx.recv().await.is_some());
        assert!(out_rx.recv().await.is_some());
        drop(trig_tx);
        coordinator.await.unwrap();

        assert_eq!(count.load(Ordering::SeqCst), 2);
        assert!(out_rx.recv().await.is_none());
    }
}
