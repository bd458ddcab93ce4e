use dotindicator_core::Phase;
use ratatui::{
    layout::Rect,
    style::Style,
    text::{Line, Span},
    widgets::Paragraph,
    Frame,
};

use crate::app::App;
use crate::theme::to_color;

pub struct StatusBarWidget;

impl StatusBarWidget {
    pub fn render(frame: &mut Frame, area: Rect, app: &App) {
        let theme = &app.theme;
        let phase_str = match app.indicator.phase() {
            Phase::Unbound => "STOPPED",
            Phase::Autoplaying => "AUTOPLAY",
            Phase::Interacting => "HOLD",
        };

        let progress = app.indicator.progress_driver();
        let status_text = if let Some(msg) = &app.status_message {
            format!(" {}", msg)
        } else {
            format!(
                " {} | Page {}/{} | {:>3.0}% | Timeouts: {}",
                phase_str,
                app.current_page() + 1,
                app.page_count(),
                progress.value() * 100.0,
                app.timeouts()
            )
        };

        let help_hint = " q:quit h/l:swipe space:hold n:next ";
        let padding_len = area
            .width
            .saturating_sub(status_text.len() as u16 + help_hint.len() as u16)
            as usize;

        let bar = Style::default().bg(to_color(theme.panel));
        let line = Line::from(vec![
            Span::styled(status_text, bar.fg(to_color(theme.fg))),
            Span::styled(" ".repeat(padding_len), bar),
            Span::styled(help_hint, bar.fg(to_color(theme.dim))),
        ]);

        frame.render_widget(Paragraph::new(line), area);
    }
}
