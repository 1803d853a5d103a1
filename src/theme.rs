use crate::app::AlertKind;
use crate::format::UsageLevel;
use crate::metrics::series::SeriesKind;
use crate::metrics::store::ConnectionStatus;
use ratatui::style::Color;

#[derive(Debug, Clone, Copy)]
pub struct Theme;

impl Theme {
    pub fn new() -> Self {
        Self
    }

    pub fn primary(&self) -> Color {
        Color::Cyan
    }

    pub fn text(&self) -> Color {
        Color::Reset
    }

    pub fn text_dim(&self) -> Color {
        Color::Indexed(8)
    }

    pub fn background(&self) -> Color {
        Color::Reset
    }

    pub fn success(&self) -> Color {
        Color::Green
    }

    pub fn warning(&self) -> Color {
        Color::Yellow
    }

    pub fn error(&self) -> Color {
        Color::Red
    }

    pub fn border(&self) -> Color {
        Color::Indexed(8)
    }

    pub fn border_focused(&self) -> Color {
        Color::Cyan
    }

    pub fn highlight(&self) -> Color {
        Color::Yellow
    }

    pub fn gauge_background(&self) -> Color {
        Color::Reset
    }

    pub fn usage(&self, level: UsageLevel) -> Color {
        match level {
            UsageLevel::Normal => Color::Indexed(99),
            UsageLevel::High => Color::Yellow,
            UsageLevel::Critical => Color::Red,
        }
    }

    pub fn series(&self, kind: SeriesKind) -> Color {
        match kind {
            SeriesKind::Cpu => Color::Indexed(105),
            SeriesKind::Memory => Color::Magenta,
            SeriesKind::Disk => Color::Cyan,
        }
    }

    pub fn connection(&self, status: ConnectionStatus) -> Color {
        match status {
            ConnectionStatus::Online => self.success(),
            ConnectionStatus::Offline => self.error(),
            ConnectionStatus::Error => self.warning(),
            ConnectionStatus::Unknown => self.text_dim(),
        }
    }

    pub fn alert(&self, kind: AlertKind) -> Color {
        match kind {
            AlertKind::Success => self.success(),
            AlertKind::Error => self.error(),
        }
    }
}

impl Default for Theme {
    fn default() -> Self {
        Self::new()
    }
}
