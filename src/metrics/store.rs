use crate::api::types::{MetricsSnapshot, RedisStats};
use crate::metrics::series::RollingSeriesBuffer;
use chrono::{DateTime, Local};

#[derive(Debug, Clone, Copy, PartialEq, Eq, Default, strum::Display)]
pub enum ConnectionStatus {
    #[default]
    #[strum(to_string = "Connecting...")]
    Unknown,
    #[strum(to_string = "Connected")]
    Online,
    #[strum(to_string = "Disconnected")]
    Offline,
    #[strum(to_string = "Error")]
    Error,
}

#[derive(Debug, Clone)]
pub struct DashboardStore {
    pub latest: Option<MetricsSnapshot>,
    pub series: RollingSeriesBuffer,
    pub redis: Option<RedisStats>,
    pub last_updated: Option<DateTime<Local>>,
    pub connection: ConnectionStatus,
}

impl DashboardStore {
    pub fn new(history_size: usize) -> Self {
        Self {
            latest: None,
            series: RollingSeriesBuffer::new(history_size),
            redis: None,
            last_updated: None,
            connection: ConnectionStatus::Unknown,
        }
    }

    /// Applies one successful poll: gauges, chart, and info panels all read
    /// from what is recorded here.
    pub fn record_snapshot(&mut self, snapshot: MetricsSnapshot, at: DateTime<Local>) {
        self.series.push(
            at.format("%H:%M:%S").to_string(),
            snapshot.cpu.usage_percent,
            snapshot.memory.usage_percent,
            snapshot.disk.usage_percent,
        );
        self.latest = Some(snapshot);
        self.last_updated = Some(at);
        self.connection = ConnectionStatus::Online;
    }

    pub fn record_stats(&mut self, stats: RedisStats) {
        self.redis = Some(stats);
    }

    pub fn set_connection(&mut self, status: ConnectionStatus) {
        self.connection = status;
    }

    pub fn clear_series(&mut self) {
        self.series.clear();
    }
}

impl Default for DashboardStore {
    fn default() -> Self {
        Self::new(crate::metrics::series::DEFAULT_SERIES_CAPACITY)
    }
}
