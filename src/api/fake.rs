use crate::api::client::MetricsApi;
use crate::api::types::{HealthResponse, MetricsSnapshot, StatsData};
use crate::error::{AppError, Result};
use async_trait::async_trait;
use std::collections::VecDeque;
use std::sync::atomic::{AtomicUsize, Ordering};
use std::sync::Mutex;
use std::time::Duration;

pub struct FakeEntry<T> {
    response: Result<T>,
    delay: Option<Duration>,
}

impl<T> FakeEntry<T> {
    pub fn immediate(response: Result<T>) -> Self {
        Self {
            response,
            delay: None,
        }
    }

    pub fn with_delay(response: Result<T>, delay: Duration) -> Self {
        Self {
            response,
            delay: Some(delay),
        }
    }
}

impl<T> From<Result<T>> for FakeEntry<T> {
    fn from(response: Result<T>) -> Self {
        Self::immediate(response)
    }
}

/// Scripted metrics server for unit tests. Each endpoint pops its
/// next scripted response; once a script runs dry the endpoint falls back to
/// a fixed answer.
#[derive(Default)]
pub struct FakeMetricsApi {
    metrics: Mutex<VecDeque<FakeEntry<MetricsSnapshot>>>,
    metrics_fallback: Option<MetricsSnapshot>,
    stats: Mutex<VecDeque<Result<StatsData>>>,
    clears: Mutex<VecDeque<Result<()>>>,
    health: Mutex<VecDeque<Result<HealthResponse>>>,
    metrics_calls: AtomicUsize,
    stats_calls: AtomicUsize,
    clear_calls: AtomicUsize,
    health_calls: AtomicUsize,
}

impl FakeMetricsApi {
    pub fn new(script: Vec<Result<MetricsSnapshot>>) -> Self {
        Self::with_script(script.into_iter().map(FakeEntry::from).collect())
    }

    pub fn with_script(script: Vec<FakeEntry<MetricsSnapshot>>) -> Self {
        Self {
            metrics: Mutex::new(script.into()),
            ..Self::default()
        }
    }

    /// Answers every metrics request with `snapshot`.
    pub fn always(snapshot: MetricsSnapshot) -> Self {
        Self {
            metrics_fallback: Some(snapshot),
            ..Self::default()
        }
    }

    pub fn script_stats(self, script: Vec<Result<StatsData>>) -> Self {
        *lock(&self.stats) = script.into();
        self
    }

    pub fn script_clears(self, script: Vec<Result<()>>) -> Self {
        *lock(&self.clears) = script.into();
        self
    }

    pub fn script_health(self, script: Vec<Result<HealthResponse>>) -> Self {
        *lock(&self.health) = script.into();
        self
    }

    pub fn metrics_calls(&self) -> usize {
        self.metrics_calls.load(Ordering::SeqCst)
    }

    pub fn stats_calls(&self) -> usize {
        self.stats_calls.load(Ordering::SeqCst)
    }

    pub fn clear_calls(&self) -> usize {
        self.clear_calls.load(Ordering::SeqCst)
    }

    pub fn health_calls(&self) -> usize {
        self.health_calls.load(Ordering::SeqCst)
    }
}

fn lock<T>(mutex: &Mutex<T>) -> std::sync::MutexGuard<'_, T> {
    mutex.lock().unwrap_or_else(|poisoned| poisoned.into_inner())
}

#[async_trait]
impl MetricsApi for FakeMetricsApi {
    async fn fetch_metrics(&self) -> Result<MetricsSnapshot> {
        self.metrics_calls.fetch_add(1, Ordering::SeqCst);

        let entry = lock(&self.metrics).pop_front();
        match entry {
            Some(entry) => {
                if let Some(delay) = entry.delay {
                    tokio::time::sleep(delay).await;
                }
                entry.response
            }
            None => self
                .metrics_fallback
                .clone()
                .ok_or_else(|| AppError::Transport("connection refused".to_string())),
        }
    }

    async fn fetch_stats(&self) -> Result<StatsData> {
        self.stats_calls.fetch_add(1, Ordering::SeqCst);
        lock(&self.stats)
            .pop_front()
            .unwrap_or_else(|| Ok(StatsData::default()))
    }

    async fn clear_metrics(&self) -> Result<()> {
        self.clear_calls.fetch_add(1, Ordering::SeqCst);
        lock(&self.clears).pop_front().unwrap_or(Ok(()))
    }

    async fn health(&self) -> Result<HealthResponse> {
        self.health_calls.fetch_add(1, Ordering::SeqCst);
        lock(&self.health).pop_front().unwrap_or_else(|| {
            Ok(HealthResponse {
                status: "healthy".to_string(),
                redis_connected: true,
                error: None,
            })
        })
    }
}
