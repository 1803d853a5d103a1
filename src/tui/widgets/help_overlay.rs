use crate::theme::Theme;
use crate::tui::widgets::centered_rect;
use ratatui::{
    layout::{Alignment, Constraint, Direction, Layout, Rect},
    prelude::*,
    widgets::{Block, Borders, Cell, Clear, Paragraph, Row, Table, Wrap},
};

pub struct HelpOverlay;

impl HelpOverlay {
    pub fn render(frame: &mut Frame, area: Rect, theme: &Theme) {
        let popup_area = centered_rect(70, 80, area);

        frame.render_widget(Clear, popup_area);

        let outer_block = Block::default()
            .title(" Help - Press ? or Esc to close ")
            .title_alignment(Alignment::Center)
            .borders(Borders::ALL)
            .border_style(Style::default().fg(theme.border_focused()))
            .style(Style::default().bg(theme.background()));

        frame.render_widget(outer_block, popup_area);

        let inner_area = popup_area.inner(ratatui::layout::Margin {
            horizontal: 2,
            vertical: 1,
        });

        let sections = Layout::default()
            .direction(Direction::Vertical)
            .constraints([
                Constraint::Length(3),
                Constraint::Length(5),
                Constraint::Length(7),
                Constraint::Min(0),
            ])
            .split(inner_area);

        Self::render_section(
            frame,
            sections[0],
            "Global",
            vec![("q / Ctrl+C", "Quit"), ("?", "Toggle this help screen")],
            theme,
        );

        Self::render_section(
            frame,
            sections[1],
            "Navigation",
            vec![
                ("1-3", "Switch to tab (Overview/Processes/System)"),
                ("h / l", "Previous / next tab"),
                ("j / k", "Scroll the process table"),
            ],
            theme,
        );

        Self::render_section(
            frame,
            sections[2],
            "Actions",
            vec![
                ("r", "Refresh metrics now"),
                ("a", "Toggle auto-refresh"),
                ("c", "Clear stored metrics (with confirmation)"),
                ("e", "Export chart history"),
                ("f", "Switch export format (JSON/CSV)"),
            ],
            theme,
        );

        let about = Paragraph::new(concat!(
            "SysMon-TUI v",
            env!("CARGO_PKG_VERSION"),
            "\nLive system metrics from a remote monitoring server."
        ))
        .block(
            Block::default()
                .borders(Borders::TOP)
                .title(" About ")
                .border_style(Style::default().fg(theme.border())),
        )
        .style(Style::default().fg(theme.text_dim()))
        .alignment(Alignment::Center)
        .wrap(Wrap { trim: true });

        frame.render_widget(about, sections[3]);
    }

    fn render_section(
        frame: &mut Frame,
        area: Rect,
        title: &str,
        keybindings: Vec<(&str, &str)>,
        theme: &Theme,
    ) {
        let rows: Vec<Row> = keybindings
            .iter()
            .map(|(key, desc)| {
                Row::new(vec![
                    Cell::from(*key).style(Style::default().fg(theme.highlight()).bold()),
                    Cell::from(*desc).style(Style::default().fg(theme.text())),
                ])
            })
            .collect();

        let table = Table::new(rows, [Constraint::Length(12), Constraint::Percentage(85)])
            .block(
                Block::default()
                    .borders(Borders::TOP)
                    .title(format!(" {} ", title))
                    .border_style(Style::default().fg(theme.border())),
            )
            .column_spacing(2);

        frame.render_widget(table, area);
    }
}
