//! Autoplaying dot indicator state machine
//!
//! [`DotIndicator`] follows a paged host: it counts down the focused page with
//! the progress driver, asks the host for the next page when the countdown runs
//! out, and eases the arc back to rest with the reverse driver when a user drag
//! interrupts it.
//!
//! Everything runs on one logical thread. [`DotIndicator::tick`] is the only
//! scheduling source: it drains pending host notifications in order, then
//! advances both drivers.
//!
//! ```text
//! Unbound --bind/start--> Autoplaying --Dragging--> Interacting
//!    ^                     |  ^    |                    |
//!    |                     |  +----+ timeout            |
//!    |                     |  ^                         |
//!    |                     |  +---------Idle------------+
//!    +------unbind/detach--+----------------------------+
//! ```

use std::time::Instant;

use serde::Serialize;
use tracing::{debug, trace};

use crate::anim::{AnimationDriver, DriverKind, Tick};
use crate::config::{IndicatorConfig, IndicatorOptions};
use crate::page::{PageBinding, PageEvent, PageSource, ScrollState};
use crate::render::{self, Frame, RenderSurface, Snapshot, START_ANGLE};

/// Lifecycle phase
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize)]
#[serde(rename_all = "snake_case")]
pub enum Phase {
    /// No host and no standalone run; drivers idle
    Unbound,
    /// Counting down the focused page
    Autoplaying,
    /// A user drag is in progress; auto-advance is suppressed
    Interacting,
}

#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct IndicatorState {
    pub focused_page: usize,
    /// Dot whose arc follows the drivers; when set it equals `focused_page`
    pub animating_dot: Option<usize>,
    /// Page that was focused before the last advance
    pub previous_dot: Option<usize>,
    /// Fraction of the way from `focused_page` to the next page, in `[0, 1)`
    pub offset_fraction: f64,
    pub scroll_state: ScrollState,
    /// Always at least 1
    pub dot_count: usize,
    /// Set while a drag interrupts autoplay
    pub suppress_auto_advance_on_completion: bool,
}

impl IndicatorState {
    pub fn unbound() -> Self {
        Self {
            focused_page: 0,
            animating_dot: None,
            previous_dot: None,
            offset_fraction: 0.0,
            scroll_state: ScrollState::Idle,
            dot_count: 1,
            suppress_auto_advance_on_completion: false,
        }
    }
}

type TimeoutListener = Box<dyn FnMut(usize)>;

pub struct DotIndicator {
    config: IndicatorConfig,
    state: IndicatorState,
    phase: Phase,
    /// Free-running through `standalone_dot_count` dots without a host
    standalone: bool,
    binding: PageBinding,
    /// Page requested from the host and not yet confirmed
    pending_advance: Option<usize>,
    progress: AnimationDriver,
    reverse: AnimationDriver,
    surface: Option<Box<dyn RenderSurface>>,
    timeout_listener: Option<TimeoutListener>,
}

impl std::fmt::Debug for DotIndicator {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("DotIndicator")
            .field("phase", &self.phase)
            .field("state", &self.state)
            .field("standalone", &self.standalone)
            .field("binding", &self.binding)
            .field("pending_advance", &self.pending_advance)
            .field("progress", &self.progress)
            .field("reverse", &self.reverse)
            .field("surface", &self.surface.is_some())
            .finish_non_exhaustive()
    }
}

impl Default for DotIndicator {
    fn default() -> Self {
        Self::new(IndicatorConfig::default())
    }
}

impl DotIndicator {
    pub fn new(config: IndicatorConfig) -> Self {
        let config = config.sanitized();
        let state = IndicatorState {
            dot_count: config.standalone_dot_count,
            ..IndicatorState::unbound()
        };
        Self {
            config,
            state,
            phase: Phase::Unbound,
            standalone: false,
            binding: PageBinding::new(),
            pending_advance: None,
            progress: AnimationDriver::new(DriverKind::Progress),
            reverse: AnimationDriver::new(DriverKind::Reverse),
            surface: None,
            timeout_listener: None,
        }
    }

    pub fn config(&self) -> &IndicatorConfig {
        &self.config
    }

    /// Merge `options` into the configuration
    ///
    /// Durations and easings take effect the next time a driver starts.
    pub fn configure(&mut self, options: &IndicatorOptions) {
        let mut config = self.config.clone();
        config.apply(options);
        self.config = config.sanitized();
        debug!(?options, "Indicator reconfigured");
        self.request_redraw();
    }

    #[inline]
    pub fn phase(&self) -> Phase {
        self.phase
    }

    #[inline]
    pub fn state(&self) -> &IndicatorState {
        &self.state
    }

    #[inline]
    pub fn is_bound(&self) -> bool {
        self.binding.is_bound()
    }

    #[inline]
    pub fn is_standalone(&self) -> bool {
        self.standalone
    }

    /// Page requested from the host that it has not confirmed yet
    #[inline]
    pub fn pending_advance(&self) -> Option<usize> {
        self.pending_advance
    }

    pub fn progress_driver(&self) -> &AnimationDriver {
        &self.progress
    }

    pub fn reverse_driver(&self) -> &AnimationDriver {
        &self.reverse
    }

    /// Called with the page index each time a countdown runs out naturally
    pub fn set_timeout_listener<F>(&mut self, listener: F)
    where
        F: FnMut(usize) + 'static,
    {
        self.timeout_listener = Some(Box::new(listener));
    }

    pub fn snapshot(&self) -> Snapshot {
        Snapshot {
            phase: self.phase,
            state: self.state.clone(),
            progress: (&self.progress).into(),
            reverse: (&self.reverse).into(),
        }
    }

    pub fn frame(&self) -> Frame {
        render::render(&self.snapshot(), &self.config)
    }

    pub fn preferred_size(&self) -> (f64, f64) {
        render::preferred_size(&self.config, self.state.dot_count)
    }

    pub fn attach_surface(&mut self, surface: Box<dyn RenderSurface>) {
        self.surface = Some(surface);
        self.request_redraw();
    }

    /// Tear everything down and hand the surface back
    pub fn detach_surface(&mut self) -> Option<Box<dyn RenderSurface>> {
        self.unbind();
        self.surface.take()
    }

    /// Paint the current frame onto the attached surface
    ///
    /// Returns false when no surface is attached.
    pub fn draw(&mut self) -> bool {
        let frame = self.frame();
        let Some(surface) = self.surface.as_mut() else {
            return false;
        };
        surface.measure(frame.width, frame.height);
        frame.paint(surface.as_mut());
        true
    }

    /// Follow `host` and start counting down its current page
    pub fn bind(&mut self, host: Box<dyn PageSource>, now: Instant) {
        self.unbind();
        self.binding.bind(host);

        let dot_count = self.refresh_dot_count();
        let current = self.binding.current_index().unwrap_or(0);
        self.state = IndicatorState {
            focused_page: current.min(dot_count - 1),
            dot_count,
            ..IndicatorState::unbound()
        };
        self.phase = Phase::Autoplaying;
        debug!(
            dot_count,
            focused_page = self.state.focused_page,
            "Autoplay started"
        );
        self.restart_progress(now);
        self.request_redraw();
    }

    /// Cycle through `standalone_dot_count` dots without a host, from the first
    pub fn start(&mut self, now: Instant) {
        self.unbind();
        self.standalone = true;
        self.state = IndicatorState {
            dot_count: self.config.standalone_dot_count,
            ..IndicatorState::unbound()
        };
        self.phase = Phase::Autoplaying;
        debug!(dot_count = self.state.dot_count, "Standalone autoplay started");
        self.restart_progress(now);
        self.request_redraw();
    }

    /// Cancel both drivers and drop the host subscription
    ///
    /// Returns the host if one was bound. Any notification the host sends
    /// afterwards is never seen.
    pub fn unbind(&mut self) -> Option<Box<dyn PageSource>> {
        self.progress.cancel();
        self.reverse.cancel();
        let host = self.binding.unbind();

        if self.phase != Phase::Unbound {
            debug!(phase = ?self.phase, "Indicator stopped");
        }
        self.phase = Phase::Unbound;
        self.standalone = false;
        self.pending_advance = None;
        self.state.animating_dot = None;
        self.state.scroll_state = ScrollState::Idle;
        self.state.suppress_auto_advance_on_completion = false;
        host
    }

    /// Advance to `now`: drain host notifications, then step both drivers
    pub fn tick(&mut self, now: Instant) {
        while let Some(event) = self.binding.poll() {
            self.apply_event(event, now);
        }
        if self.phase == Phase::Unbound {
            return;
        }

        match self.progress.tick(now) {
            Tick::Idle => {}
            Tick::Running(_) => self.request_redraw(),
            Tick::Completed(_) => {
                self.request_redraw();
                self.on_progress_complete(now);
            }
        }

        match self.reverse.tick(now) {
            Tick::Idle => {}
            Tick::Running(_) => self.request_redraw(),
            Tick::Completed(_) => {
                self.request_redraw();
                debug!("Arc restored to rest");
            }
        }
    }

    /// Deliver a notification from a host that pushes instead of queueing
    ///
    /// Ignored unless a host is bound.
    pub fn handle_event(&mut self, event: PageEvent, now: Instant) {
        if !self.binding.is_bound() {
            trace!(?event, "Ignoring page event while unbound");
            return;
        }
        self.apply_event(event.normalized(), now);
    }

    /// Move to the next page right away, as a timeout would
    pub fn advance(&mut self, now: Instant) {
        if self.phase != Phase::Autoplaying {
            trace!(phase = ?self.phase, "Advance ignored");
            return;
        }

        if self.standalone {
            let next = (self.state.focused_page + 1) % self.state.dot_count;
            self.focus_standalone(next, now);
            return;
        }

        // The host may have gained or lost pages since the last query
        let dot_count = self.refresh_dot_count();
        if dot_count <= 1 {
            debug!("Single page, restarting countdown in place");
            self.restart_progress(now);
            return;
        }
        let target = (self.state.focused_page + 1) % dot_count;
        self.request_host_page(target);
    }

    /// Jump to `page`: directly when standalone, through the host when bound
    pub fn set_current_page(&mut self, page: usize, now: Instant) {
        if self.phase != Phase::Autoplaying {
            trace!(page, phase = ?self.phase, "Page change ignored");
            return;
        }

        if self.standalone {
            let page = page % self.state.dot_count;
            if page != self.state.focused_page {
                self.focus_standalone(page, now);
            } else {
                self.restart_progress(now);
            }
            return;
        }

        let dot_count = self.refresh_dot_count();
        let target = page % dot_count;
        if target != self.state.focused_page {
            self.request_host_page(target);
        }
    }

    fn apply_event(&mut self, event: PageEvent, now: Instant) {
        if self.phase == Phase::Unbound || self.standalone {
            trace!(?event, "Ignoring page event");
            return;
        }

        match event {
            PageEvent::ScrolledTo { position, offset } => self.on_scrolled(position, offset, now),
            PageEvent::ScrollStateChanged(ScrollState::Dragging) => self.on_drag_started(now),
            PageEvent::ScrollStateChanged(ScrollState::Idle) => self.on_scroll_idle(now),
        }
    }

    fn on_scrolled(&mut self, position: usize, offset: f64, now: Instant) {
        self.state.focused_page = position;
        self.state.offset_fraction = offset;

        // Tracking only ever follows the focused page
        if self.state.animating_dot.is_some_and(|dot| dot != position) {
            self.state.animating_dot = None;
        }

        if self.pending_advance == Some(position) && offset == 0.0 {
            self.pending_advance = None;
            debug!(page = position, "Host confirmed page");
            self.restart_progress(now);
        }

        self.request_redraw();
    }

    fn on_drag_started(&mut self, now: Instant) {
        if self.phase != Phase::Autoplaying {
            trace!("Drag already in progress");
            return;
        }

        let focused = self.state.focused_page;
        let (captured, _) = render::arc_angles(&self.snapshot(), focused);

        self.state.suppress_auto_advance_on_completion = true;
        self.progress.cancel();
        self.pending_advance = None;
        self.state.scroll_state = ScrollState::Dragging;
        self.state.animating_dot = Some(focused);
        self.reverse.start(
            captured,
            START_ANGLE,
            self.config.reverse_duration(),
            self.config.reverse_easing,
            now,
        );
        self.phase = Phase::Interacting;
        debug!(page = focused, angle = captured, "Autoplay interrupted");
        self.request_redraw();
    }

    fn on_scroll_idle(&mut self, now: Instant) {
        match self.phase {
            Phase::Interacting => {
                self.reverse.cancel();
                self.state.suppress_auto_advance_on_completion = false;
                self.state.scroll_state = ScrollState::Idle;
                self.phase = Phase::Autoplaying;
                debug!(page = self.state.focused_page, "Autoplay resumed");
                self.restart_progress(now);
                self.request_redraw();
            }
            Phase::Autoplaying => {
                let page = self.state.focused_page;
                if let Some(target) = self.pending_advance.take() {
                    // The host stopped without reporting a zero offset on the
                    // page we asked for
                    debug!(target, page, "Host settled");
                } else if self.state.animating_dot != Some(page) {
                    // Navigation we did not request moved off the counted page
                    debug!(page, "Host changed page on its own");
                } else {
                    return;
                }
                self.restart_progress(now);
                self.request_redraw();
            }
            Phase::Unbound => {}
        }
    }

    fn on_progress_complete(&mut self, now: Instant) {
        if self.state.suppress_auto_advance_on_completion {
            debug!("Stale countdown completion, not advancing");
            return;
        }

        let page = self.state.focused_page;
        debug!(page, "Page timed out");
        if let Some(listener) = self.timeout_listener.as_mut() {
            listener(page);
        }
        self.advance(now);
    }

    fn focus_standalone(&mut self, page: usize, now: Instant) {
        self.state.previous_dot = Some(self.state.focused_page);
        self.state.focused_page = page;
        self.state.offset_fraction = 0.0;
        self.restart_progress(now);
        self.request_redraw();
    }

    fn request_host_page(&mut self, target: usize) {
        self.progress.cancel();
        self.state.previous_dot = Some(self.state.focused_page);
        self.pending_advance = Some(target);
        debug!(from = self.state.focused_page, target, "Requesting page");
        self.binding.request_page(target);
    }

    fn restart_progress(&mut self, now: Instant) {
        self.reverse.cancel();
        self.state.animating_dot = Some(self.state.focused_page);
        self.progress.start(
            0.0,
            1.0,
            self.config.progress_duration(),
            self.config.progress_easing,
            now,
        );
    }

    /// Re-read the page count from the host; zero pages count as one
    fn refresh_dot_count(&mut self) -> usize {
        let Some(count) = self.binding.item_count() else {
            return self.state.dot_count;
        };
        let count = count.max(1);
        if count != self.state.dot_count {
            debug!(old = self.state.dot_count, new = count, "Page count changed");
            self.state.dot_count = count;
        }
        count
    }

    fn request_redraw(&mut self) {
        if let Some(surface) = self.surface.as_mut() {
            surface.request_redraw();
        }
    }
}
