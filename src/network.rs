// Network status monitoring.
// Reduces connectivity reports to a tri-state signal and fans it out to
// subscribers over a watch channel.

use std::sync::Arc;

use async_trait::async_trait;
use tokio::sync::{mpsc, watch};
use tokio::task::JoinHandle;

/// Connectivity as reported by the platform: either flag may be undetermined.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq)]
pub struct Reachability {
    pub is_connected: Option<bool>,
    pub is_internet_reachable: Option<bool>,
}

/// Tri-state network signal.
///
/// `Unknown` only occurs before the first status report arrives and is
/// treated as "attempt the online path", never as confirmed offline.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub enum NetworkState {
    Online,
    Offline,
    #[default]
    Unknown,
}

impl NetworkState {
    /// Reduce a raw reachability report: both flags definitively true means
    /// online, either definitively false means offline, anything else is
    /// undetermined.
    pub fn from_reachability(reachability: Reachability) -> Self {
        match (
            reachability.is_connected,
            reachability.is_internet_reachable,
        ) {
            (Some(true), Some(true)) => NetworkState::Online,
            (Some(false), _) | (_, Some(false)) => NetworkState::Offline,
            _ => NetworkState::Unknown,
        }
    }

    pub fn is_offline(&self) -> bool {
        matches!(self, NetworkState::Offline)
    }
}

/// One-shot connectivity check issued when monitoring starts.
#[async_trait]
pub trait ConnectivityProbe: Send + Sync + 'static {
    async fn check(&self) -> Reachability;
}

/// Observes connectivity and publishes the current `NetworkState`.
///
/// On start, issues one immediate probe and consumes a continuous stream of
/// reachability events; both feed the same state, last-write-wins — the
/// probe result and the first stream event may arrive in either order.
/// Dropping the monitor aborts both tasks, releasing the subscription
/// deterministically.
pub struct NetworkMonitor {
    tx: watch::Sender<NetworkState>,
    probe_task: JoinHandle<()>,
    stream_task: JoinHandle<()>,
}

impl NetworkMonitor {
    /// Start monitoring from an initial probe plus a stream of change events.
    pub fn start<P: ConnectivityProbe>(
        probe: Arc<P>,
        mut events: mpsc::Receiver<Reachability>,
    ) -> Self {
        let (tx, _rx) = watch::channel(NetworkState::Unknown);

        let probe_tx = tx.clone();
        let probe_task = tokio::spawn(async move {
            let state = NetworkState::from_reachability(probe.check().await);
            probe_tx.send_replace(state);
        });

        let stream_tx = tx.clone();
        let stream_task = tokio::spawn(async move {
            while let Some(reachability) = events.recv().await {
                let state = NetworkState::from_reachability(reachability);
                stream_tx.send_replace(state);
            }
        });

        Self {
            tx,
            probe_task,
            stream_task,
        }
    }

    /// The most recently observed state.
    pub fn current(&self) -> NetworkState {
        *self.tx.borrow()
    }

    /// Subscribe to state changes.
    pub fn subscribe(&self) -> watch::Receiver<NetworkState> {
        self.tx.subscribe()
    }
}

impl Drop for NetworkMonitor {
    fn drop(&mut self) {
        self.probe_task.abort();
        self.stream_task.abort();
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn reachability(connected: Option<bool>, reachable: Option<bool>) -> Reachability {
        Reachability {
            is_connected: connected,
            is_internet_reachable: reachable,
        }
    }

    struct FixedProbe(Reachability);

    #[async_trait]
    impl ConnectivityProbe for FixedProbe {
        async fn check(&self) -> Reachability {
            self.0
        }
    }

    /// Probe that never completes, so only stream events drive the state.
    struct PendingProbe;

    #[async_trait]
    impl ConnectivityProbe for PendingProbe {
        async fn check(&self) -> Reachability {
            std::future::pending().await
        }
    }

    #[test]
    fn test_reduction_both_true_is_online() {
        assert_eq!(
            NetworkState::from_reachability(reachability(Some(true), Some(true))),
            NetworkState::Online
        );
    }

    #[test]
    fn test_reduction_any_false_is_offline() {
        assert_eq!(
            NetworkState::from_reachability(reachability(Some(false), Some(true))),
            NetworkState::Offline
        );
        assert_eq!(
            NetworkState::from_reachability(reachability(Some(true), Some(false))),
            NetworkState::Offline
        );
        assert_eq!(
            NetworkState::from_reachability(reachability(Some(false), None)),
            NetworkState::Offline
        );
        assert_eq!(
            NetworkState::from_reachability(reachability(None, Some(false))),
            NetworkState::Offline
        );
    }

    #[test]
    fn test_reduction_undetermined_is_unknown() {
        assert_eq!(
            NetworkState::from_reachability(reachability(None, None)),
            NetworkState::Unknown
        );
        assert_eq!(
            NetworkState::from_reachability(reachability(Some(true), None)),
            NetworkState::Unknown
        );
        assert_eq!(
            NetworkState::from_reachability(reachability(None, Some(true))),
            NetworkState::Unknown
        );
    }

    #[tokio::test]
    async fn test_initial_probe_updates_state() {
        let (_events_tx, events_rx) = mpsc::channel(4);
        let monitor = NetworkMonitor::start(
            Arc::new(FixedProbe(reachability(Some(true), Some(true)))),
            events_rx,
        );

        let mut rx = monitor.subscribe();
        rx.wait_for(|s| *s == NetworkState::Online).await.unwrap();
        assert_eq!(monitor.current(), NetworkState::Online);
    }

    #[tokio::test]
    async fn test_stream_events_update_state() {
        let (events_tx, events_rx) = mpsc::channel(4);
        let monitor = NetworkMonitor::start(Arc::new(PendingProbe), events_rx);

        assert_eq!(monitor.current(), NetworkState::Unknown);

        let mut rx = monitor.subscribe();
        events_tx
            .send(reachability(Some(false), Some(true)))
            .await
            .unwrap();
        rx.wait_for(|s| *s == NetworkState::Offline).await.unwrap();

        events_tx
            .send(reachability(Some(true), Some(true)))
            .await
            .unwrap();
        rx.wait_for(|s| *s == NetworkState::Online).await.unwrap();
    }

    #[tokio::test]
    async fn test_drop_releases_subscription() {
        let (events_tx, events_rx) = mpsc::channel(4);
        let monitor = NetworkMonitor::start(Arc::new(PendingProbe), events_rx);
        drop(monitor);

        // The stream consumer is gone, so the sender observes closure.
        events_tx.closed().await;
    }
}
