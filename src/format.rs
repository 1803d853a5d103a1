//! Display helpers shared by the views.

/// `1234` -> `1.2K`, `2500000` -> `2.5M`.
pub fn format_number(num: u64) -> String {
    if num >= 1_000_000 {
        format!("{:.1}M", num as f64 / 1_000_000.0)
    } else if num >= 1_000 {
        format!("{:.1}K", num as f64 / 1_000.0)
    } else {
        num.to_string()
    }
}

pub fn format_uptime(seconds: u64) -> String {
    let hours = seconds / 3600;
    let minutes = (seconds % 3600) / 60;
    format!("{}h {}m", hours, minutes)
}

/// Cuts `text` to `max_len` characters and marks the cut with `...`.
pub fn truncate_text(text: &str, max_len: usize) -> String {
    if text.chars().count() > max_len {
        let head: String = text.chars().take(max_len).collect();
        format!("{}...", head)
    } else {
        text.to_string()
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum UsageLevel {
    Normal,
    High,
    Critical,
}

impl UsageLevel {
    pub fn from_percent(percent: f64) -> Self {
        if percent > 80.0 {
            UsageLevel::Critical
        } else if percent > 60.0 {
            UsageLevel::High
        } else {
            UsageLevel::Normal
        }
    }
}

/// Gauge fill for a percentage, clamped to `0.0..=1.0`.
pub fn gauge_ratio(percent: f64) -> f64 {
    if percent.is_finite() {
        percent.clamp(0.0, 100.0) / 100.0
    } else {
        0.0
    }
}
