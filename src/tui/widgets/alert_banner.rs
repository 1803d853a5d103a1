use crate::app::{Alert, AlertKind};
use crate::theme::Theme;
use ratatui::{
    layout::{Alignment, Rect},
    prelude::*,
    widgets::{Block, Borders, Clear, Paragraph, Wrap},
};

pub struct AlertBanner;

impl AlertBanner {
    /// Draws the banner over the top rows of `area`.
    pub fn render(frame: &mut Frame, area: Rect, alert: &Alert, theme: &Theme) {
        let banner_area = Rect {
            x: area.x + 2,
            y: area.y,
            width: area.width.saturating_sub(4),
            height: area.height.min(3),
        };

        let color = theme.alert(alert.kind);
        let title = match alert.kind {
            AlertKind::Success => " Success ",
            AlertKind::Error => " Error ",
        };

        frame.render_widget(Clear, banner_area);

        let banner = Paragraph::new(alert.message.as_str())
            .style(Style::default().fg(color).bold())
            .alignment(Alignment::Center)
            .wrap(Wrap { trim: true })
            .block(
                Block::default()
                    .title(title)
                    .borders(Borders::ALL)
                    .border_style(Style::default().fg(color)),
            );

        frame.render_widget(banner, banner_area);
    }
}
