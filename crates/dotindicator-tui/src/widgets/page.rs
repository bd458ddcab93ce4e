use ratatui::{
    layout::{Alignment, Rect},
    style::{Modifier, Style},
    text::{Line, Span},
    widgets::{Block, Borders, Paragraph},
    Frame,
};

use crate::app::App;
use crate::theme::to_color;

/// The page the carousel currently shows
pub struct PageWidget;

impl PageWidget {
    pub fn render(frame: &mut Frame, area: Rect, app: &App) {
        let theme = &app.theme;
        let block = Block::default()
            .borders(Borders::ALL)
            .title(" dotindicator ")
            .border_style(Style::default().fg(to_color(theme.dim)))
            .style(Style::default().bg(to_color(theme.background)));

        let mut lines = Vec::new();
        // Keep the title roughly centered vertically
        let padding = area.height.saturating_sub(4) / 2;
        lines.extend((0..padding).map(|_| Line::from("")));
        lines.push(Line::from(Span::styled(
            app.page_title(),
            Style::default()
                .fg(to_color(theme.accent))
                .add_modifier(Modifier::BOLD),
        )));

        let detail = match &app.carousel {
            Some(carousel) if carousel.is_dragging() => {
                format!("dragging at {:.2}", carousel.position())
            }
            Some(carousel) if carousel.is_moving() => {
                format!("scrolling at {:.2}", carousel.position())
            }
            Some(_) => format!("{} of {}", app.current_page() + 1, app.page_count()),
            None => "standalone".to_string(),
        };
        lines.push(Line::from(Span::styled(
            detail,
            Style::default().fg(to_color(theme.dim)),
        )));

        let paragraph = Paragraph::new(lines)
            .block(block)
            .alignment(Alignment::Center);
        frame.render_widget(paragraph, area);
    }
}
