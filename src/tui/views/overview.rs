use crate::api::types::MetricsSnapshot;
use crate::format::{format_number, gauge_ratio, UsageLevel};
use crate::metrics::series::SeriesKind;
use crate::metrics::store::DashboardStore;
use crate::theme::Theme;
use ratatui::{
    layout::{Constraint, Direction, Layout, Rect},
    prelude::*,
    symbols,
    widgets::{Axis, Block, Borders, Chart, Dataset, Gauge, GraphType, Paragraph},
};
use strum::IntoEnumIterator;

pub struct OverviewView;

impl OverviewView {
    pub fn render(frame: &mut Frame, area: Rect, store: &DashboardStore, theme: &Theme) {
        let chunks = Layout::default()
            .direction(Direction::Vertical)
            .constraints([
                Constraint::Length(3),
                Constraint::Length(6),
                Constraint::Min(8),
            ])
            .split(area);

        let snapshot = store.latest.clone().unwrap_or_default();

        Self::render_gauges(frame, chunks[0], &snapshot, theme);
        Self::render_details(frame, chunks[1], &snapshot, theme);
        Self::render_usage_chart(frame, chunks[2], store, theme);
    }

    fn render_gauges(frame: &mut Frame, area: Rect, snapshot: &MetricsSnapshot, theme: &Theme) {
        let columns = Layout::default()
            .direction(Direction::Horizontal)
            .constraints([
                Constraint::Ratio(1, 3),
                Constraint::Ratio(1, 3),
                Constraint::Ratio(1, 3),
            ])
            .split(area);

        let gauges = [
            ("CPU", snapshot.cpu.usage_percent),
            ("Memory", snapshot.memory.usage_percent),
            ("Disk", snapshot.disk.usage_percent),
        ];

        for ((title, percent), column) in gauges.into_iter().zip(columns.iter()) {
            let gauge = Gauge::default()
                .block(Block::default().borders(Borders::ALL).title(title))
                .gauge_style(
                    Style::default()
                        .fg(theme.usage(UsageLevel::from_percent(percent)))
                        .bg(theme.gauge_background()),
                )
                .label(format!("{}%", percent))
                .ratio(gauge_ratio(percent));

            frame.render_widget(gauge, *column);
        }
    }

    fn render_details(frame: &mut Frame, area: Rect, snapshot: &MetricsSnapshot, theme: &Theme) {
        let columns = Layout::default()
            .direction(Direction::Horizontal)
            .constraints([Constraint::Percentage(50), Constraint::Percentage(50)])
            .split(area);

        let cpu = &snapshot.cpu;
        let memory = &snapshot.memory;
        let disk = &snapshot.disk;

        let resources_text = format!(
            "CPU: {} cores @ {} MHz │ Load: {:.2}\n\
             Memory: {} GB used / {} GB total ({} GB available)\n\
             Disk: {} GB used / {} GB total ({} GB free)",
            cpu.cores,
            cpu.frequency_mhz,
            cpu.load_average_1m(),
            memory.used_gb,
            memory.total_gb,
            memory.available_gb,
            disk.used_gb,
            disk.total_gb,
            disk.free_gb,
        );

        let resources = Paragraph::new(resources_text)
            .block(Block::default().borders(Borders::ALL).title("Resources"))
            .style(Style::default().fg(theme.text()));

        frame.render_widget(resources, columns[0]);

        let network = &snapshot.network;
        let network_text = format!(
            "Sent: {} MB ({} packets)\n\
             Received: {} MB ({} packets)",
            network.bytes_sent_mb,
            format_number(network.packets_sent),
            network.bytes_recv_mb,
            format_number(network.packets_recv),
        );

        let network_widget = Paragraph::new(network_text)
            .block(Block::default().borders(Borders::ALL).title("Network"))
            .style(Style::default().fg(theme.text()));

        frame.render_widget(network_widget, columns[1]);
    }

    fn render_usage_chart(frame: &mut Frame, area: Rect, store: &DashboardStore, theme: &Theme) {
        let series = &store.series;
        let title = format!(
            "Usage History ({}/{} points)",
            series.len(),
            series.capacity()
        );

        if series.is_empty() {
            let empty = Paragraph::new("Waiting for metrics...")
                .style(Style::default().fg(theme.text_dim()))
                .block(Block::default().borders(Borders::ALL).title(title));
            frame.render_widget(empty, area);
            return;
        }

        let points: Vec<(SeriesKind, Vec<(f64, f64)>)> = SeriesKind::iter()
            .map(|kind| (kind, series.chart_points(kind)))
            .collect();

        let datasets: Vec<Dataset> = points
            .iter()
            .map(|(kind, data)| {
                Dataset::default()
                    .name(kind.to_string())
                    .marker(symbols::Marker::Braille)
                    .graph_type(GraphType::Line)
                    .style(Style::default().fg(theme.series(*kind)))
                    .data(data)
            })
            .collect();

        let labels = series.labels();
        let x_max = (series.len().saturating_sub(1)).max(1) as f64;
        let x_labels: Vec<Span> = match (labels.first(), labels.last()) {
            (Some(first), Some(last)) if labels.len() > 1 => {
                vec![Span::raw(first.to_string()), Span::raw(last.to_string())]
            }
            (Some(only), _) => vec![Span::raw(only.to_string())],
            _ => vec![],
        };

        let chart = Chart::new(datasets)
            .block(Block::default().borders(Borders::ALL).title(title))
            .x_axis(
                Axis::default()
                    .style(Style::default().fg(theme.text_dim()))
                    .bounds([0.0, x_max])
                    .labels(x_labels),
            )
            .y_axis(
                Axis::default()
                    .style(Style::default().fg(theme.text_dim()))
                    .bounds([0.0, 100.0])
                    .labels(vec![
                        Span::raw("0%"),
                        Span::raw("50%"),
                        Span::raw("100%"),
                    ]),
            );

        frame.render_widget(chart, area);
    }
}
