use ratatui::{
    layout::Rect,
    style::Style,
    widgets::{Block, Borders},
    Frame,
};

use crate::app::App;
use crate::theme::to_color;

pub struct IndicatorWidget;

impl IndicatorWidget {
    pub fn render(frame: &mut Frame, area: Rect, app: &mut App) {
        let block = Block::default()
            .borders(Borders::TOP | Borders::BOTTOM)
            .border_style(Style::default().fg(to_color(app.theme.dim)))
            .style(Style::default().bg(to_color(app.theme.panel)));
        let inner = block.inner(area);
        frame.render_widget(block, area);

        if !app.indicator.draw() {
            return;
        }

        let (width, height) = app.indicator.preferred_size();
        let rows = app.surface.rows().min(inner.height);
        let columns = app.surface.columns_for(width, height).min(inner.width);
        let centered = Rect {
            x: inner.x + (inner.width - columns) / 2,
            y: inner.y + (inner.height - rows) / 2,
            width: columns,
            height: rows,
        };
        app.surface.render(frame, centered);
    }
}
