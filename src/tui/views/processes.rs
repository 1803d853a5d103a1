use crate::format::truncate_text;
use crate::metrics::store::DashboardStore;
use crate::theme::Theme;
use ratatui::{
    layout::{Constraint, Rect},
    prelude::*,
    widgets::{Block, Borders, Cell, Paragraph, Row, Table},
};

pub struct ProcessesView;

impl ProcessesView {
    pub fn render(
        frame: &mut Frame,
        area: Rect,
        store: &DashboardStore,
        scroll_offset: usize,
        theme: &Theme,
    ) {
        let processes = store
            .latest
            .as_ref()
            .map(|s| s.top_processes.as_slice())
            .unwrap_or_default();

        let block = Block::default()
            .borders(Borders::ALL)
            .title(format!("Top Processes ({})", processes.len()));

        if processes.is_empty() {
            let empty = Paragraph::new("No process data available")
                .style(Style::default().fg(theme.text_dim()))
                .block(block);
            frame.render_widget(empty, area);
            return;
        }

        let offset = scroll_offset.min(processes.len().saturating_sub(1));

        let header = Row::new(vec!["PID", "Name", "CPU %", "Memory %"])
            .style(Style::default().fg(theme.highlight()).bold())
            .bottom_margin(1);

        let rows: Vec<Row> = processes
            .iter()
            .skip(offset)
            .map(|process| {
                let pid = process
                    .pid
                    .map(|p| p.to_string())
                    .unwrap_or_else(|| "N/A".to_string());
                let name = truncate_text(process.name.as_deref().unwrap_or("Unknown"), 20);

                Row::new(vec![
                    Cell::from(pid),
                    Cell::from(name),
                    Cell::from(format!("{:.1}%", process.cpu_percent)),
                    Cell::from(format!("{:.1}%", process.memory_percent)),
                ])
                .style(Style::default().fg(theme.text()))
            })
            .collect();

        let table = Table::new(
            rows,
            [
                Constraint::Length(8),
                Constraint::Min(24),
                Constraint::Length(10),
                Constraint::Length(10),
            ],
        )
        .header(header)
        .block(block)
        .column_spacing(2);

        frame.render_widget(table, area);
    }
}
