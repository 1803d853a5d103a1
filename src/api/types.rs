use crate::error::{AppError, Result};
use serde::{Deserialize, Deserializer, Serialize};

/// Response envelope shared by every `/api/*` endpoint.
#[derive(Debug, Deserialize)]
pub struct ApiEnvelope<T> {
    #[serde(default)]
    pub success: bool,
    pub data: Option<T>,
    #[serde(default)]
    pub error: Option<String>,
    #[serde(default)]
    pub message: Option<String>,
}

impl<T> ApiEnvelope<T> {
    pub fn into_result(self) -> Result<Option<T>> {
        if self.success {
            Ok(self.data)
        } else {
            Err(AppError::Api(
                self.error.unwrap_or_else(|| "Unknown error".to_string()),
            ))
        }
    }
}

#[derive(Debug, Clone, Default, Serialize, Deserialize)]
#[serde(default)]
pub struct MetricsSnapshot {
    pub timestamp: String,
    pub cpu: CpuMetrics,
    pub memory: MemoryMetrics,
    pub disk: DiskMetrics,
    pub network: NetworkMetrics,
    pub system: SystemInfo,
    pub top_processes: Vec<ProcessInfo>,
}

#[derive(Debug, Clone, Default, Serialize, Deserialize)]
#[serde(default)]
pub struct CpuMetrics {
    #[serde(deserialize_with = "null_as_default")]
    pub usage_percent: f64,
    #[serde(deserialize_with = "null_as_default")]
    pub frequency_mhz: f64,
    #[serde(deserialize_with = "null_as_default")]
    pub cores: u32,
    #[serde(deserialize_with = "null_as_default")]
    pub load_average: Vec<f64>,
}

impl CpuMetrics {
    pub fn load_average_1m(&self) -> f64 {
        self.load_average.first().copied().unwrap_or(0.0)
    }
}

#[derive(Debug, Clone, Default, Serialize, Deserialize)]
#[serde(default)]
pub struct MemoryMetrics {
    pub total_gb: f64,
    pub available_gb: f64,
    pub used_gb: f64,
    #[serde(deserialize_with = "null_as_default")]
    pub usage_percent: f64,
    pub swap_total_gb: f64,
    pub swap_used_gb: f64,
    pub swap_percent: f64,
}

#[derive(Debug, Clone, Default, Serialize, Deserialize)]
#[serde(default)]
pub struct DiskMetrics {
    pub total_gb: f64,
    pub used_gb: f64,
    pub free_gb: f64,
    #[serde(deserialize_with = "null_as_default")]
    pub usage_percent: f64,
    pub read_bytes: u64,
    pub write_bytes: u64,
}

#[derive(Debug, Clone, Default, Serialize, Deserialize)]
#[serde(default)]
pub struct NetworkMetrics {
    pub bytes_sent: u64,
    pub bytes_recv: u64,
    pub packets_sent: u64,
    pub packets_recv: u64,
    pub bytes_sent_mb: f64,
    pub bytes_recv_mb: f64,
}

#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(default)]
pub struct SystemInfo {
    pub hostname: String,
    pub platform: String,
    pub processor: String,
    pub boot_time: String,
    pub uptime_seconds: u64,
    pub uptime_hours: f64,
    pub current_time: String,
}

impl Default for SystemInfo {
    fn default() -> Self {
        Self {
            hostname: "Unknown".to_string(),
            platform: "Unknown".to_string(),
            processor: "Unknown".to_string(),
            boot_time: "Unknown".to_string(),
            uptime_seconds: 0,
            uptime_hours: 0.0,
            current_time: "Unknown".to_string(),
        }
    }
}

/// psutil reports `null` for processes it could not sample.
#[derive(Debug, Clone, Default, Serialize, Deserialize)]
#[serde(default)]
pub struct ProcessInfo {
    pub pid: Option<u32>,
    pub name: Option<String>,
    #[serde(deserialize_with = "null_as_default")]
    pub cpu_percent: f64,
    #[serde(deserialize_with = "null_as_default")]
    pub memory_percent: f64,
}

#[derive(Debug, Clone, Default, Serialize, Deserialize)]
#[serde(default)]
pub struct StatsData {
    pub redis: RedisStats,
    pub system: Option<SystemInfo>,
    pub monitoring_active: bool,
}

#[derive(Debug, Clone, Default, Serialize, Deserialize, PartialEq)]
#[serde(default)]
pub struct RedisStats {
    pub redis_connected: bool,
    pub total_metrics_stored: u64,
    pub redis_memory_usage: Option<String>,
    pub redis_uptime: u64,
}

#[derive(Debug, Clone, Default, Deserialize)]
#[serde(default)]
pub struct HealthResponse {
    pub status: String,
    pub redis_connected: bool,
    pub error: Option<String>,
}

impl HealthResponse {
    pub fn is_healthy(&self) -> bool {
        self.status == "healthy"
    }
}

fn null_as_default<'de, D, T>(deserializer: D) -> std::result::Result<T, D::Error>
where
    D: Deserializer<'de>,
    T: Default + Deserialize<'de>,
{
    Ok(Option::<T>::deserialize(deserializer)?.unwrap_or_default())
}
