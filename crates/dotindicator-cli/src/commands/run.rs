use std::io;
use std::time::Instant;

use anyhow::Result;
use crossterm::{
    execute,
    terminal::{disable_raw_mode, enable_raw_mode, EnterAlternateScreen, LeaveAlternateScreen, SetTitle},
};
use ratatui::{backend::CrosstermBackend, Terminal};

use dotindicator_core::AppConfig;
use dotindicator_tui::{
    event::{DemoEvent, FramePacer},
    input::handle_key_event,
    widgets, App,
};

type Backend = CrosstermBackend<io::Stdout>;

pub fn run(config: AppConfig) -> Result<()> {
    // Setup terminal
    enable_raw_mode()?;
    let mut stdout = io::stdout();
    execute!(stdout, EnterAlternateScreen, SetTitle("dotindicator"))?;

    let backend = CrosstermBackend::new(stdout);
    let mut terminal = Terminal::new(backend)?;

    let now = Instant::now();
    let mut app = App::new(&config, now);
    let mut pacer = FramePacer::new(config.demo.tick_rate_ms, now);

    let result = main_loop(&mut terminal, &mut app, &mut pacer);
    app.shutdown();

    // Restore terminal
    disable_raw_mode()?;
    execute!(terminal.backend_mut(), LeaveAlternateScreen)?;
    terminal.show_cursor()?;

    result
}

fn main_loop(terminal: &mut Terminal<Backend>, app: &mut App, pacer: &mut FramePacer) -> Result<()> {
    // Something outside the indicator changed: status text, page title, size
    let mut dirty = true;

    loop {
        if app.needs_redraw() || dirty {
            terminal.draw(|frame| widgets::render(frame, app))?;
            dirty = false;
        }

        match pacer.next()? {
            Some(DemoEvent::Key(key)) => {
                app.on_action(handle_key_event(key), Instant::now());
                dirty = true;
            }
            Some(DemoEvent::Resize) => dirty = true,
            Some(DemoEvent::Frame(now)) => {
                app.on_tick(now);
                // The carousel moves without indicator redraws during a hold
                dirty |= app.carousel.as_ref().is_some_and(|c| c.is_moving());
            }
            None => {}
        }

        if app.should_quit {
            break;
        }
    }

    Ok(())
}
