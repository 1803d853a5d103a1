use crate::api::client::MetricsApi;
use crate::error::{AppError, Result};
use crate::metrics::store::{ConnectionStatus, DashboardStore};
use chrono::Local;
use std::sync::atomic::{AtomicUsize, Ordering};
use std::sync::Arc;
use tokio::sync::mpsc::UnboundedSender;
use tokio::sync::RwLock;
use tokio::task::JoinHandle;

/// Result of one background API call, delivered to the dashboard controller.
#[derive(Debug)]
pub enum PollOutcome {
    MetricsUpdated,
    MetricsFailed(AppError),
    Health(ConnectionStatus),
    Cleared,
    ClearFailed(AppError),
}

pub struct Poller {
    api: Arc<dyn MetricsApi>,
    store: Arc<RwLock<DashboardStore>>,
    in_flight: AtomicUsize,
}

struct InFlight<'a>(&'a AtomicUsize);

impl<'a> InFlight<'a> {
    fn enter(counter: &'a AtomicUsize) -> Self {
        counter.fetch_add(1, Ordering::SeqCst);
        Self(counter)
    }
}

impl Drop for InFlight<'_> {
    fn drop(&mut self) {
        self.0.fetch_sub(1, Ordering::SeqCst);
    }
}

impl Poller {
    pub fn new(api: Arc<dyn MetricsApi>, store: Arc<RwLock<DashboardStore>>) -> Self {
        Self {
            api,
            store,
            in_flight: AtomicUsize::new(0),
        }
    }

    pub fn store(&self) -> &Arc<RwLock<DashboardStore>> {
        &self.store
    }

    /// Number of metric fetches currently awaiting a response.
    pub fn in_flight(&self) -> usize {
        self.in_flight.load(Ordering::SeqCst)
    }

    /// Fetches one snapshot and records it. A failed fetch only touches the
    /// connection status; the chart history is left as it was.
    pub async fn poll_metrics(&self) -> Result<()> {
        let _guard = InFlight::enter(&self.in_flight);

        match self.api.fetch_metrics().await {
            Ok(snapshot) => {
                tracing::debug!(
                    cpu = snapshot.cpu.usage_percent,
                    memory = snapshot.memory.usage_percent,
                    disk = snapshot.disk.usage_percent,
                    "metrics received"
                );
                let mut store = self.store.write().await;
                store.record_snapshot(snapshot, Local::now());
                Ok(())
            }
            Err(e) => {
                let status = if e.is_transport() {
                    ConnectionStatus::Offline
                } else {
                    ConnectionStatus::Error
                };
                tracing::warn!(error = %e, ?status, "metrics poll failed");
                self.store.write().await.set_connection(status);
                Err(e)
            }
        }
    }

    /// Refreshes the Redis panel. Failures are logged and otherwise ignored.
    pub async fn load_stats(&self) -> Result<()> {
        match self.api.fetch_stats().await {
            Ok(stats) => {
                self.store.write().await.record_stats(stats.redis);
                Ok(())
            }
            Err(e) => {
                tracing::warn!(error = %e, "failed to load stats");
                Err(e)
            }
        }
    }

    pub async fn check_health(&self) -> ConnectionStatus {
        let status = match self.api.health().await {
            Ok(health) if health.is_healthy() => ConnectionStatus::Online,
            Ok(health) => {
                tracing::warn!(status = %health.status, error = ?health.error, "server unhealthy");
                ConnectionStatus::Error
            }
            Err(e) => {
                tracing::warn!(error = %e, "health check failed");
                ConnectionStatus::Offline
            }
        };

        self.store.write().await.set_connection(status);

        if status == ConnectionStatus::Online {
            let _ = self.load_stats().await;
        }

        status
    }

    /// Asks the server to drop its stored history, then empties the local
    /// chart. The chart is untouched when the server refuses.
    pub async fn clear_remote(&self) -> Result<()> {
        if let Err(e) = self.api.clear_metrics().await {
            tracing::warn!(error = %e, "clear request failed");
            return Err(e);
        }

        self.store.write().await.clear_series();
        tracing::info!("metrics history cleared");

        let _ = self.load_stats().await;
        Ok(())
    }

    pub fn spawn_poll(self: &Arc<Self>, tx: UnboundedSender<PollOutcome>) -> JoinHandle<()> {
        let poller = Arc::clone(self);
        tokio::spawn(async move {
            let outcome = match poller.poll_metrics().await {
                Ok(()) => PollOutcome::MetricsUpdated,
                Err(e) => PollOutcome::MetricsFailed(e),
            };
            let _ = tx.send(outcome);
        })
    }

    pub fn spawn_health_check(self: &Arc<Self>, tx: UnboundedSender<PollOutcome>) -> JoinHandle<()> {
        let poller = Arc::clone(self);
        tokio::spawn(async move {
            let status = poller.check_health().await;
            let _ = tx.send(PollOutcome::Health(status));
        })
    }

    pub fn spawn_clear(self: &Arc<Self>, tx: UnboundedSender<PollOutcome>) -> JoinHandle<()> {
        let poller = Arc::clone(self);
        tokio::spawn(async move {
            let outcome = match poller.clear_remote().await {
                Ok(()) => PollOutcome::Cleared,
                Err(e) => PollOutcome::ClearFailed(e),
            };
            let _ = tx.send(outcome);
        })
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::api::fake::{FakeEntry, FakeMetricsApi};
    use crate::api::types::{HealthResponse, MetricsSnapshot, RedisStats, StatsData};
    use crate::metrics::series::SeriesKind;
    use std::time::Duration;

    fn snapshot(cpu: f64) -> MetricsSnapshot {
        let mut snapshot = MetricsSnapshot::default();
        snapshot.cpu.usage_percent = cpu;
        snapshot.memory.usage_percent = cpu / 2.0;
        snapshot.disk.usage_percent = 50.0;
        snapshot
    }

    fn make_poller(api: FakeMetricsApi) -> (Arc<Poller>, Arc<FakeMetricsApi>) {
        let api = Arc::new(api);
        let store = Arc::new(RwLock::new(DashboardStore::default()));
        (Arc::new(Poller::new(api.clone(), store)), api)
    }

    #[tokio::test]
    async fn test_successful_poll_updates_store() {
        let (poller, api) = make_poller(FakeMetricsApi::new(vec![Ok(snapshot(42.0))]));

        poller.poll_metrics().await.unwrap();

        let store = poller.store().read().await;
        assert_eq!(api.metrics_calls(), 1);
        assert_eq!(store.connection, ConnectionStatus::Online);
        assert_eq!(store.series.values(SeriesKind::Cpu), vec![42.0]);
        assert_eq!(store.series.values(SeriesKind::Memory), vec![21.0]);
        assert!(store.last_updated.is_some());
        assert_eq!(poller.in_flight(), 0);
    }

    #[tokio::test]
    async fn test_failed_poll_leaves_series_untouched() {
        let (poller, _api) = make_poller(FakeMetricsApi::new(vec![
            Ok(snapshot(10.0)),
            Ok(snapshot(20.0)),
            Err(AppError::Api("collector crashed".to_string())),
            Err(AppError::Transport("connection refused".to_string())),
        ]));

        poller.poll_metrics().await.unwrap();
        poller.poll_metrics().await.unwrap();
        let before = poller.store().read().await.series.clone();

        let err = poller.poll_metrics().await.unwrap_err();
        assert!(!err.is_transport());
        assert_eq!(
            poller.store().read().await.connection,
            ConnectionStatus::Error
        );

        let err = poller.poll_metrics().await.unwrap_err();
        assert!(err.is_transport());

        let store = poller.store().read().await;
        assert_eq!(store.connection, ConnectionStatus::Offline);
        assert_eq!(
            store.series.points().cloned().collect::<Vec<_>>(),
            before.points().cloned().collect::<Vec<_>>()
        );
        assert_eq!(store.latest.as_ref().unwrap().cpu.usage_percent, 20.0);
    }

    #[tokio::test]
    async fn test_health_check_loads_stats_when_healthy() {
        let stats = StatsData {
            redis: RedisStats {
                redis_connected: true,
                total_metrics_stored: 7,
                redis_memory_usage: Some("900K".to_string()),
                redis_uptime: 60,
            },
            ..StatsData::default()
        };
        let (poller, api) = make_poller(FakeMetricsApi::default().script_stats(vec![Ok(stats)]));

        let status = poller.check_health().await;

        assert_eq!(status, ConnectionStatus::Online);
        assert_eq!(api.stats_calls(), 1);
        let store = poller.store().read().await;
        assert_eq!(store.redis.as_ref().unwrap().total_metrics_stored, 7);
    }

    #[tokio::test]
    async fn test_failed_stats_keep_previous_panel() {
        let stats = StatsData {
            redis: RedisStats {
                redis_connected: true,
                total_metrics_stored: 42,
                ..RedisStats::default()
            },
            ..StatsData::default()
        };
        let (poller, api) = make_poller(FakeMetricsApi::default().script_stats(vec![
            Ok(stats),
            Err(AppError::Parse("stats response carried no data".to_string())),
        ]));

        poller.load_stats().await.unwrap();
        assert!(poller.load_stats().await.is_err());

        assert_eq!(api.stats_calls(), 2);
        let store = poller.store().read().await;
        let redis = store.redis.as_ref().unwrap();
        assert!(redis.redis_connected);
        assert_eq!(redis.total_metrics_stored, 42);
    }

    #[tokio::test]
    async fn test_health_check_unhealthy_and_unreachable() {
        let (poller, api) = make_poller(FakeMetricsApi::default().script_health(vec![
            Ok(HealthResponse {
                status: "unhealthy".to_string(),
                ..HealthResponse::default()
            }),
            Err(AppError::Transport("refused".to_string())),
        ]));

        assert_eq!(poller.check_health().await, ConnectionStatus::Error);
        assert_eq!(poller.check_health().await, ConnectionStatus::Offline);
        assert_eq!(api.stats_calls(), 0);
    }

    #[tokio::test]
    async fn test_clear_success_empties_series_and_reloads_stats() {
        let (poller, api) = make_poller(FakeMetricsApi::always(snapshot(5.0)));
        poller.poll_metrics().await.unwrap();
        poller.poll_metrics().await.unwrap();

        poller.clear_remote().await.unwrap();

        assert!(poller.store().read().await.series.is_empty());
        assert_eq!(api.clear_calls(), 1);
        assert_eq!(api.stats_calls(), 1);
    }

    #[tokio::test]
    async fn test_clear_failure_keeps_series() {
        let (poller, api) = make_poller(
            FakeMetricsApi::always(snapshot(5.0))
                .script_clears(vec![Err(AppError::Api("redis down".to_string()))]),
        );
        poller.poll_metrics().await.unwrap();

        let err = poller.clear_remote().await.unwrap_err();

        assert_eq!(err.to_string(), "redis down");
        assert_eq!(poller.store().read().await.series.len(), 1);
        assert_eq!(api.stats_calls(), 0);
    }

    #[tokio::test(start_paused = true)]
    async fn test_in_flight_counts_pending_fetches() {
        let (poller, _api) = make_poller(FakeMetricsApi::with_script(vec![FakeEntry::with_delay(
            Ok(snapshot(1.0)),
            Duration::from_secs(3),
        )]));
        let (tx, mut rx) = tokio::sync::mpsc::unbounded_channel();

        let handle = poller.spawn_poll(tx);
        tokio::time::sleep(Duration::from_secs(1)).await;
        assert_eq!(poller.in_flight(), 1);

        handle.await.unwrap();
        assert_eq!(poller.in_flight(), 0);
        assert!(matches!(rx.recv().await, Some(PollOutcome::MetricsUpdated)));
    }
}
