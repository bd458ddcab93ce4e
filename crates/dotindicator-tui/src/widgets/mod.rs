mod indicator;
mod page;
mod status_bar;

pub use indicator::IndicatorWidget;
pub use page::PageWidget;
pub use status_bar::StatusBarWidget;

use ratatui::{
    layout::{Constraint, Direction, Layout},
    Frame,
};

use crate::app::{App, INDICATOR_ROWS};

/// Lay out the whole demo screen: page, indicator row, status bar
pub fn render(frame: &mut Frame, app: &mut App) {
    let layout = Layout::default()
        .direction(Direction::Vertical)
        .constraints([
            Constraint::Min(3),
            Constraint::Length(INDICATOR_ROWS + 2),
            Constraint::Length(1),
        ])
        .split(frame.area());

    PageWidget::render(frame, layout[0], app);
    IndicatorWidget::render(frame, layout[1], app);
    StatusBarWidget::render(frame, layout[2], app);
}
