use crate::metrics::ring_buffer::RingBuffer;
use serde::Serialize;

pub const DEFAULT_SERIES_CAPACITY: usize = 20;

#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct SeriesPoint {
    pub label: String,
    pub cpu: f64,
    pub memory: f64,
    pub disk: f64,
}

/// Which usage column of the chart to read.
#[derive(Debug, Clone, Copy, PartialEq, Eq, strum::Display, strum::EnumIter)]
pub enum SeriesKind {
    #[strum(to_string = "CPU Usage (%)")]
    Cpu,
    #[strum(to_string = "Memory Usage (%)")]
    Memory,
    #[strum(to_string = "Disk Usage (%)")]
    Disk,
}

impl SeriesPoint {
    pub fn value(&self, kind: SeriesKind) -> f64 {
        match kind {
            SeriesKind::Cpu => self.cpu,
            SeriesKind::Memory => self.memory,
            SeriesKind::Disk => self.disk,
        }
    }
}

/// Bounded chart history: one time label plus cpu/memory/disk percentages per
/// point. Appends at the tail and evicts exactly one point from the head once
/// the capacity is exceeded.
#[derive(Debug, Clone, Serialize)]
pub struct RollingSeriesBuffer {
    points: RingBuffer<SeriesPoint>,
}

impl RollingSeriesBuffer {
    pub fn new(capacity: usize) -> Self {
        Self {
            points: RingBuffer::new(capacity),
        }
    }

    pub fn push(&mut self, label: impl Into<String>, cpu: f64, memory: f64, disk: f64) {
        let point = SeriesPoint {
            label: label.into(),
            cpu: sanitize(cpu),
            memory: sanitize(memory),
            disk: sanitize(disk),
        };

        if let Some(evicted) = self.points.push(point) {
            tracing::trace!(label = %evicted.label, "evicted oldest chart point");
        }
    }

    pub fn clear(&mut self) {
        self.points.clear();
    }

    pub fn len(&self) -> usize {
        self.points.len()
    }

    pub fn is_empty(&self) -> bool {
        self.points.is_empty()
    }

    pub fn capacity(&self) -> usize {
        self.points.capacity()
    }

    pub fn points(&self) -> impl Iterator<Item = &SeriesPoint> {
        self.points.iter()
    }

    pub fn latest(&self) -> Option<&SeriesPoint> {
        self.points.last()
    }

    pub fn labels(&self) -> Vec<&str> {
        self.points.iter().map(|p| p.label.as_str()).collect()
    }

    pub fn values(&self, kind: SeriesKind) -> Vec<f64> {
        self.points.iter().map(|p| p.value(kind)).collect()
    }

    /// `(index, value)` pairs for a line chart.
    pub fn chart_points(&self, kind: SeriesKind) -> Vec<(f64, f64)> {
        self.points
            .iter()
            .enumerate()
            .map(|(i, p)| (i as f64, p.value(kind)))
            .collect()
    }
}

impl Default for RollingSeriesBuffer {
    fn default() -> Self {
        Self::new(DEFAULT_SERIES_CAPACITY)
    }
}

fn sanitize(value: f64) -> f64 {
    if value.is_finite() {
        value
    } else {
        0.0
    }
}
