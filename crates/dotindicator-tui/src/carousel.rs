//! Simulated paged host for the terminal demo
//!
//! `Carousel` keeps a continuous scroll position and animates it with the same
//! `AnimationDriver` the indicator uses. User gestures report `Dragging` first;
//! every motion reports `ScrolledTo` while it runs and `Idle` once it settles on
//! a page. Programmatic navigation (`set_current_index`) settles without a drag.

use std::cell::RefCell;
use std::rc::Rc;
use std::time::{Duration, Instant};

use dotindicator_core::page::page_channel;
use dotindicator_core::{
    AnimationDriver, DriverKind, EasingType, PageEvent, PageEventSender, PageEvents, PageSource,
    ScrollState, Tick,
};
use tracing::debug;

/// How far a held drag pulls the page before it is released
const HOLD_OFFSET: f64 = 0.35;

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
enum Motion {
    /// Resting on `current`
    Still,
    /// Moving to `target`; reports `Idle` on arrival
    Settling { target: usize },
    /// Pulled off `current` by a held drag
    Holding,
}

#[derive(Debug)]
struct CarouselState {
    titles: Vec<String>,
    current: usize,
    position: f64,
    motion: Motion,
    scroll: AnimationDriver,
    swipe_duration: Duration,
    /// Navigation requested through `PageSource`, started on the next tick
    requested: Option<usize>,
    scroll_state: ScrollState,
    subscribers: Vec<PageEventSender>,
}

impl CarouselState {
    fn emit(&mut self, event: PageEvent) {
        self.subscribers.retain(|tx| tx.send(event).is_ok());
    }

    fn set_scroll_state(&mut self, state: ScrollState) {
        if self.scroll_state != state {
            self.scroll_state = state;
            self.emit(PageEvent::ScrollStateChanged(state));
        }
    }

    fn emit_position(&mut self) {
        let floor = self.position.floor().max(0.0);
        self.emit(PageEvent::ScrolledTo {
            position: floor as usize,
            offset: self.position - floor,
        });
    }

    fn animate_to(&mut self, to: f64, now: Instant) {
        self.scroll.start(
            self.position,
            to,
            self.swipe_duration,
            EasingType::AccelerateDecelerate,
            now,
        );
    }
}

/// Shared handle: the indicator owns one clone as its `PageSource`, the app
/// drives another
#[derive(Debug, Clone)]
pub struct Carousel {
    inner: Rc<RefCell<CarouselState>>,
}

impl Carousel {
    pub fn new(titles: Vec<String>, swipe_duration: Duration) -> Self {
        Self {
            inner: Rc::new(RefCell::new(CarouselState {
                titles,
                current: 0,
                position: 0.0,
                motion: Motion::Still,
                scroll: AnimationDriver::new(DriverKind::Progress),
                swipe_duration,
                requested: None,
                scroll_state: ScrollState::Idle,
                subscribers: Vec::new(),
            })),
        }
    }

    /// Pages titled "Page 1" through "Page N"
    pub fn with_page_count(count: usize, swipe_duration: Duration) -> Self {
        let titles = (1..=count).map(|n| format!("Page {}", n)).collect();
        Self::new(titles, swipe_duration)
    }

    pub fn title(&self, index: usize) -> Option<String> {
        self.inner.borrow().titles.get(index).cloned()
    }

    pub fn position(&self) -> f64 {
        self.inner.borrow().position
    }

    pub fn current(&self) -> usize {
        self.inner.borrow().current
    }

    pub fn is_dragging(&self) -> bool {
        self.inner.borrow().scroll_state == ScrollState::Dragging
    }

    pub fn is_moving(&self) -> bool {
        let state = self.inner.borrow();
        state.scroll.is_running() || state.requested.is_some()
    }

    /// User swipe one page forward (`forward`) or back; the edges bounce
    pub fn swipe(&self, forward: bool, now: Instant) {
        let mut state = self.inner.borrow_mut();
        if state.motion == Motion::Holding {
            return;
        }
        let last = state.titles.len().saturating_sub(1);
        let from = state.current;
        let target = if forward {
            (from + 1).min(last)
        } else {
            from.saturating_sub(1)
        };
        debug!(from, target, "Swipe");

        state.set_scroll_state(ScrollState::Dragging);
        state.motion = Motion::Settling { target };
        state.animate_to(target as f64, now);
    }

    /// Start a held drag, or release the one in progress
    pub fn toggle_hold(&self, now: Instant) {
        let mut state = self.inner.borrow_mut();
        match state.motion {
            Motion::Holding => {
                let target = state.current;
                debug!(target, "Hold released");
                state.motion = Motion::Settling { target };
                state.animate_to(target as f64, now);
            }
            _ => {
                // Pull toward the previous page when there is no next one
                let last = state.titles.len().saturating_sub(1);
                let pull = if state.current < last {
                    state.current as f64 + HOLD_OFFSET
                } else {
                    state.current as f64 - HOLD_OFFSET
                };
                debug!(page = state.current, "Hold started");
                state.requested = None;
                state.set_scroll_state(ScrollState::Dragging);
                state.motion = Motion::Holding;
                state.animate_to(pull.max(0.0), now);
            }
        }
    }

    /// Advance the scroll animation and notify subscribers
    pub fn tick(&self, now: Instant) {
        let mut state = self.inner.borrow_mut();

        if let Some(target) = state.requested.take() {
            if state.motion != Motion::Holding {
                state.motion = Motion::Settling { target };
                state.animate_to(target as f64, now);
            }
        }

        match state.scroll.tick(now) {
            Tick::Idle => {}
            Tick::Running(position) => {
                state.position = position;
                state.emit_position();
            }
            Tick::Completed(position) => {
                state.position = position;
                state.emit_position();
                if let Motion::Settling { target } = state.motion {
                    state.current = target;
                    state.motion = Motion::Still;
                    state.set_scroll_state(ScrollState::Idle);
                }
            }
        }
    }
}

impl PageSource for Carousel {
    fn current_index(&self) -> usize {
        self.inner.borrow().current
    }

    fn set_current_index(&mut self, index: usize) {
        let mut state = self.inner.borrow_mut();
        if index < state.titles.len() {
            state.requested = Some(index);
        }
    }

    fn item_count(&self) -> usize {
        self.inner.borrow().titles.len()
    }

    fn subscribe(&mut self) -> PageEvents {
        let (tx, rx) = page_channel();
        self.inner.borrow_mut().subscribers.push(tx);
        rx
    }
}
