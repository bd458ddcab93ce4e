use std::cell::Cell;
use std::rc::Rc;
use std::time::{Duration, Instant};

use dotindicator_core::{AppConfig, DotIndicator, Phase};
use tracing::{debug, info};

use crate::carousel::Carousel;
use crate::input::Action;
use crate::surface::CanvasSurface;
use crate::theme::Theme;

/// Terminal rows given to the indicator row
pub const INDICATOR_ROWS: u16 = 3;

/// Demo application state
pub struct App {
    pub config: AppConfig,
    pub indicator: DotIndicator,
    /// Simulated host; `None` when the indicator runs standalone
    pub carousel: Option<Carousel>,
    pub surface: CanvasSurface,
    pub theme: Theme,
    pub should_quit: bool,
    pub status_message: Option<String>,
    timeouts: Rc<Cell<usize>>,
}

impl App {
    pub fn new(config: &AppConfig, now: Instant) -> Self {
        let theme = Theme::default();
        let surface = CanvasSurface::new(theme.panel, INDICATOR_ROWS);

        let mut indicator = DotIndicator::new(config.indicator.clone());
        indicator.attach_surface(Box::new(surface.clone()));

        let timeouts = Rc::new(Cell::new(0));
        let counter = Rc::clone(&timeouts);
        indicator.set_timeout_listener(move |page| {
            counter.set(counter.get() + 1);
            debug!(page, "Timeout listener fired");
        });

        let carousel = if config.demo.standalone {
            indicator.start(now);
            None
        } else {
            let carousel = Carousel::with_page_count(
                config.demo.page_count,
                Duration::from_millis(config.demo.swipe_duration_ms),
            );
            indicator.bind(Box::new(carousel.clone()), now);
            Some(carousel)
        };
        info!(
            standalone = carousel.is_none(),
            pages = indicator.state().dot_count,
            "Demo started"
        );

        Self {
            config: config.clone(),
            indicator,
            carousel,
            surface,
            theme,
            should_quit: false,
            status_message: None,
            timeouts,
        }
    }

    /// Number of countdowns that ran out
    pub fn timeouts(&self) -> usize {
        self.timeouts.get()
    }

    /// Page the content area shows
    pub fn current_page(&self) -> usize {
        match &self.carousel {
            Some(carousel) => carousel.current(),
            None => self.indicator.state().focused_page,
        }
    }

    pub fn page_count(&self) -> usize {
        self.indicator.state().dot_count
    }

    pub fn page_title(&self) -> String {
        let page = self.current_page();
        self.carousel
            .as_ref()
            .and_then(|carousel| carousel.title(page))
            .unwrap_or_else(|| format!("Page {}", page + 1))
    }

    pub fn set_status(&mut self, msg: impl Into<String>) {
        self.status_message = Some(msg.into());
    }

    pub fn clear_status(&mut self) {
        self.status_message = None;
    }

    /// Step the host first so the indicator sees its notifications this frame
    pub fn on_tick(&mut self, now: Instant) {
        if let Some(carousel) = &self.carousel {
            carousel.tick(now);
        }
        self.indicator.tick(now);
    }

    pub fn on_action(&mut self, action: Action, now: Instant) {
        if action != Action::None {
            self.clear_status();
        }
        match action {
            Action::Quit => self.should_quit = true,
            Action::SwipeNext => self.swipe(true, now),
            Action::SwipePrev => self.swipe(false, now),
            Action::ToggleHold => match &self.carousel {
                Some(carousel) => carousel.toggle_hold(now),
                None => self.set_status("Nothing to hold in standalone mode"),
            },
            Action::Advance => {
                if self.indicator.phase() == Phase::Autoplaying {
                    self.indicator.advance(now);
                } else {
                    self.set_status("Release the carousel first");
                }
            }
            Action::None => {}
        }
    }

    fn swipe(&mut self, forward: bool, now: Instant) {
        match &self.carousel {
            Some(carousel) => carousel.swipe(forward, now),
            None => {
                let state = self.indicator.state();
                let page = if forward {
                    state.focused_page + 1
                } else {
                    state.focused_page + state.dot_count - 1
                };
                self.indicator.set_current_page(page, now);
            }
        }
    }

    /// Whether the indicator asked to be repainted since the last call
    pub fn needs_redraw(&self) -> bool {
        self.surface.take_redraw()
    }

    /// Stop the indicator and release the surface
    pub fn shutdown(&mut self) {
        self.indicator.detach_surface();
        debug!(timeouts = self.timeouts(), "Demo stopped");
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn ms(n: u64) -> Duration {
        Duration::from_millis(n)
    }

    fn carousel_app(now: Instant) -> App {
        App::new(&AppConfig::default(), now)
    }

    fn standalone_app(now: Instant) -> App {
        let mut config = AppConfig::default();
        config.demo.standalone = true;
        App::new(&config, now)
    }

    #[test]
    fn test_carousel_app_binds() {
        let t0 = Instant::now();
        let app = carousel_app(t0);
        assert!(app.indicator.is_bound());
        assert_eq!(app.indicator.phase(), Phase::Autoplaying);
        assert_eq!(app.page_count(), 3);
        assert_eq!(app.page_title(), "Page 1");
    }

    #[test]
    fn test_timeout_moves_carousel() {
        let t0 = Instant::now();
        let mut app = carousel_app(t0);

        app.on_tick(t0 + ms(4000));
        assert_eq!(app.timeouts(), 1);
        assert_eq!(app.indicator.pending_advance(), Some(1));

        // The carousel starts settling on its next tick
        app.on_tick(t0 + ms(4016));
        app.on_tick(t0 + ms(4016 + 350));
        assert_eq!(app.current_page(), 1);
        assert_eq!(app.indicator.state().focused_page, 1);
        assert_eq!(app.indicator.pending_advance(), None);
        assert!(app.indicator.progress_driver().is_running());
    }

    #[test]
    fn test_hold_interrupts_autoplay() {
        let t0 = Instant::now();
        let mut app = carousel_app(t0);

        app.on_action(Action::ToggleHold, t0 + ms(1000));
        app.on_tick(t0 + ms(1016));
        assert_eq!(app.indicator.phase(), Phase::Interacting);

        app.on_action(Action::Advance, t0 + ms(1100));
        assert_eq!(app.status_message.as_deref(), Some("Release the carousel first"));

        app.on_action(Action::ToggleHold, t0 + ms(2000));
        app.on_tick(t0 + ms(2016));
        app.on_tick(t0 + ms(2016 + 350));
        assert_eq!(app.indicator.phase(), Phase::Autoplaying);
        assert_eq!(app.current_page(), 0);
    }

    #[test]
    fn test_standalone_swipes_move_the_dot() {
        let t0 = Instant::now();
        let mut app = standalone_app(t0);
        assert!(app.carousel.is_none());

        app.on_action(Action::SwipePrev, t0);
        assert_eq!(app.current_page(), 2);
        app.on_action(Action::SwipeNext, t0);
        assert_eq!(app.current_page(), 0);

        app.on_action(Action::ToggleHold, t0);
        assert!(app.status_message.is_some());
    }

    #[test]
    fn test_standalone_timeout_counts() {
        let t0 = Instant::now();
        let mut app = standalone_app(t0);
        app.on_tick(t0 + ms(4000));
        assert_eq!(app.timeouts(), 1);
        assert_eq!(app.current_page(), 1);
    }

    #[test]
    fn test_quit_and_shutdown() {
        let t0 = Instant::now();
        let mut app = carousel_app(t0);
        assert!(app.needs_redraw());

        app.on_action(Action::Quit, t0);
        assert!(app.should_quit);

        app.shutdown();
        assert!(!app.indicator.is_bound());
        assert!(!app.indicator.draw());
    }
}
