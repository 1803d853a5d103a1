use crate::format::format_uptime;
use crate::metrics::store::DashboardStore;
use crate::theme::Theme;
use ratatui::{
    layout::{Constraint, Direction, Layout, Rect},
    prelude::*,
    widgets::{Block, Borders, Paragraph},
};

pub struct SystemView;

impl SystemView {
    pub fn render(frame: &mut Frame, area: Rect, store: &DashboardStore, theme: &Theme) {
        let chunks = Layout::default()
            .direction(Direction::Horizontal)
            .constraints([Constraint::Percentage(55), Constraint::Percentage(45)])
            .split(area);

        Self::render_system_info(frame, chunks[0], store, theme);
        Self::render_storage_stats(frame, chunks[1], store, theme);
    }

    fn render_system_info(frame: &mut Frame, area: Rect, store: &DashboardStore, theme: &Theme) {
        let system = store
            .latest
            .as_ref()
            .map(|s| s.system.clone())
            .unwrap_or_default();

        let text = format!(
            "Hostname: {}\n\
             Platform: {}\n\
             Processor: {}\n\
             Uptime: {} hours\n\
             Boot Time: {}",
            system.hostname,
            system.platform,
            system.processor,
            system.uptime_hours,
            system.boot_time,
        );

        let widget = Paragraph::new(text)
            .block(Block::default().borders(Borders::ALL).title("System Information"))
            .style(Style::default().fg(theme.text()));

        frame.render_widget(widget, area);
    }

    fn render_storage_stats(frame: &mut Frame, area: Rect, store: &DashboardStore, theme: &Theme) {
        let block = Block::default().borders(Borders::ALL).title("Metrics Storage");

        let Some(redis) = &store.redis else {
            let pending = Paragraph::new("No storage statistics yet")
                .style(Style::default().fg(theme.text_dim()))
                .block(block);
            frame.render_widget(pending, area);
            return;
        };

        let (connected, color) = if redis.redis_connected {
            ("Yes", theme.success())
        } else {
            ("No", theme.error())
        };

        let lines = vec![
            Line::from(vec![
                Span::raw("Redis Connected: "),
                Span::styled(connected, Style::default().fg(color).bold()),
            ]),
            Line::from(format!("Metrics Stored: {}", redis.total_metrics_stored)),
            Line::from(format!(
                "Memory Usage: {}",
                redis.redis_memory_usage.as_deref().unwrap_or("N/A")
            )),
            Line::from(format!("Uptime: {}", format_uptime(redis.redis_uptime))),
        ];

        let widget = Paragraph::new(lines)
            .block(block)
            .style(Style::default().fg(theme.text()));

        frame.render_widget(widget, area);
    }
}
