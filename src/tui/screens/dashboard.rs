use crate::app::{App, AppMode, Tab};
use crate::metrics::store::DashboardStore;
use crate::tui::views::{overview::OverviewView, processes::ProcessesView, system::SystemView};
use crate::tui::widgets::{
    alert_banner::AlertBanner, confirmation_dialog::ConfirmationDialog, help_overlay::HelpOverlay,
};
use ratatui::{
    layout::{Constraint, Direction, Layout, Rect},
    prelude::*,
    widgets::{Block, Borders, Paragraph, Tabs},
};

pub struct DashboardScreen;

impl DashboardScreen {
    pub fn render(frame: &mut Frame, app: &App, store: &DashboardStore) {
        let area = frame.area();
        let chunks = Layout::default()
            .direction(Direction::Vertical)
            .constraints([
                Constraint::Length(3),
                Constraint::Length(3),
                Constraint::Min(0),
                Constraint::Length(3),
            ])
            .split(area);

        Self::render_header(frame, chunks[0], app, store);
        Self::render_tabs(frame, chunks[1], app);
        Self::render_content(frame, chunks[2], app, store);
        Self::render_footer(frame, chunks[3], app);

        if let Some(alert) = &app.alert {
            AlertBanner::render(frame, chunks[2], alert, &app.theme);
        }

        match app.mode {
            AppMode::Help => HelpOverlay::render(frame, area, &app.theme),
            AppMode::ConfirmClear => ConfirmationDialog::render(
                frame,
                area,
                "Clear Metrics",
                "Delete all stored metrics on the server? The usage chart will be emptied.",
                &app.theme,
            ),
            AppMode::Normal => {}
        }
    }

    fn render_header(frame: &mut Frame, area: Rect, app: &App, store: &DashboardStore) {
        let theme = &app.theme;
        let updated = store
            .last_updated
            .map(|at| at.format("%H:%M:%S").to_string())
            .unwrap_or_else(|| "never".to_string());

        let mut spans = vec![
            Span::styled(
                format!("● {}", store.connection),
                Style::default().fg(theme.connection(store.connection)).bold(),
            ),
            Span::styled(
                format!(" │ Last updated: {} │ Auto-refresh: {}", updated, app.auto_refresh_label()),
                Style::default().fg(theme.text()),
            ),
        ];

        if app.is_loading() {
            spans.push(Span::styled(
                " │ Loading...",
                Style::default().fg(theme.highlight()),
            ));
        }

        let header = Paragraph::new(Line::from(spans)).block(
            Block::default()
                .borders(Borders::ALL)
                .border_style(Style::default().fg(theme.border()))
                .title(Span::styled(
                    "System Monitor",
                    Style::default().fg(theme.primary()).bold(),
                )),
        );

        frame.render_widget(header, area);
    }

    fn render_tabs(frame: &mut Frame, area: Rect, app: &App) {
        let theme = &app.theme;
        let titles: Vec<Line> = Tab::all()
            .iter()
            .enumerate()
            .map(|(i, tab)| {
                let title = format!("{}:{}", i + 1, tab.title());
                if *tab == app.current_tab {
                    Line::from(format!("[{}]", title))
                        .style(Style::default().fg(theme.highlight()).bold())
                } else {
                    Line::from(title).style(Style::default().fg(theme.text_dim()))
                }
            })
            .collect();

        let tabs = Tabs::new(titles)
            .block(Block::default().borders(Borders::ALL).title("Views"))
            .divider(" ");

        frame.render_widget(tabs, area);
    }

    fn render_content(frame: &mut Frame, area: Rect, app: &App, store: &DashboardStore) {
        match app.current_tab {
            Tab::Overview => OverviewView::render(frame, area, store, &app.theme),
            Tab::Processes => {
                ProcessesView::render(frame, area, store, app.scroll_offset, &app.theme)
            }
            Tab::System => SystemView::render(frame, area, store, &app.theme),
        }
    }

    fn render_footer(frame: &mut Frame, area: Rect, app: &App) {
        let footer_text = match app.current_tab {
            Tab::Processes => format!(
                "1-3: Tab | j/k: Scroll | r: Refresh | a: Auto | c: Clear | e: Export ({}) | ?: Help | q: Quit",
                app.export_format
            ),
            _ => format!(
                "1-3: Tab | h/l: Prev/Next | r: Refresh | a: Auto | c: Clear | e: Export ({}) | ?: Help | q: Quit",
                app.export_format
            ),
        };

        let footer = Paragraph::new(footer_text)
            .style(Style::default().fg(app.theme.text_dim()))
            .block(Block::default().borders(Borders::ALL).title("Controls"));

        frame.render_widget(footer, area);
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::api::fake::FakeMetricsApi;
    use crate::api::types::MetricsSnapshot;
    use crate::config::Config;
    use crate::metrics::poller::Poller;
    use chrono::Local;
    use ratatui::{backend::TestBackend, Terminal};
    use std::sync::Arc;
    use tokio::sync::RwLock;

    fn render_to_text(app: &App, store: &DashboardStore) -> String {
        let mut terminal = Terminal::new(TestBackend::new(140, 40)).unwrap();
        terminal
            .draw(|frame| DashboardScreen::render(frame, app, store))
            .unwrap();

        let buffer = terminal.backend().buffer();
        let mut text = String::new();
        for y in 0..buffer.area.height {
            for x in 0..buffer.area.width {
                text.push_str(buffer[(x, y)].symbol());
            }
            text.push('\n');
        }
        text
    }

    fn test_app() -> App {
        let api = Arc::new(FakeMetricsApi::default());
        let store = Arc::new(RwLock::new(DashboardStore::default()));
        App::new(Arc::new(Poller::new(api, store)), &Config::default())
    }

    #[tokio::test]
    async fn test_renders_waiting_state() {
        let app = test_app();
        let text = render_to_text(&app, &DashboardStore::default());

        assert!(text.contains("Connecting..."));
        assert!(text.contains("Last updated: never"));
        assert!(text.contains("Auto-refresh: Off"));
        assert!(text.contains("Waiting for metrics..."));
    }

    #[tokio::test]
    async fn test_renders_snapshot_and_overlays() {
        let mut app = test_app();
        let mut store = DashboardStore::default();
        let mut snapshot = MetricsSnapshot::default();
        snapshot.cpu.usage_percent = 42.5;
        store.record_snapshot(snapshot, Local::now());

        let text = render_to_text(&app, &store);
        assert!(text.contains("Connected"));
        assert!(text.contains("42.5%"));
        assert!(text.contains("Usage History (1/20 points)"));

        app.request_clear();
        let text = render_to_text(&app, &store);
        assert!(text.contains("Clear Metrics"));

        app.cancel_confirmation();
        app.show_error("Failed to connect to server".to_string());
        let text = render_to_text(&app, &store);
        assert!(text.contains("Failed to connect to server"));
    }
}
