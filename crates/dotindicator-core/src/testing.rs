//! In-memory page source for unit tests

use std::cell::RefCell;
use std::rc::Rc;

use crate::page::{page_channel, PageEvent, PageEventSender, PageEvents, PageSource};
use crate::render::RenderSurface;
use crate::Rgba;

#[derive(Default)]
struct FakePagerState {
    current: usize,
    count: usize,
    requests: Vec<usize>,
    subscribers: Vec<PageEventSender>,
}

/// Shared handle: the test keeps one clone, the indicator owns another
#[derive(Clone, Default)]
pub(crate) struct FakePager {
    inner: Rc<RefCell<FakePagerState>>,
}

impl FakePager {
    pub(crate) fn new(count: usize) -> Self {
        let pager = Self::default();
        pager.inner.borrow_mut().count = count;
        pager
    }

    /// Deliver `event` to every live subscriber; false if nobody is listening
    pub(crate) fn emit(&self, event: PageEvent) -> bool {
        let mut inner = self.inner.borrow_mut();
        inner.subscribers.retain(|tx| tx.send(event).is_ok());
        !inner.subscribers.is_empty()
    }

    /// Indices passed to `set_current_index`, in order
    pub(crate) fn requests(&self) -> Vec<usize> {
        self.inner.borrow().requests.clone()
    }

    pub(crate) fn set_item_count(&self, count: usize) {
        self.inner.borrow_mut().count = count;
    }

    pub(crate) fn set_current(&self, index: usize) {
        self.inner.borrow_mut().current = index;
    }
}

impl PageSource for FakePager {
    fn current_index(&self) -> usize {
        self.inner.borrow().current
    }

    fn set_current_index(&mut self, index: usize) {
        let mut inner = self.inner.borrow_mut();
        inner.requests.push(index);
        inner.current = index;
    }

    fn item_count(&self) -> usize {
        self.inner.borrow().count
    }

    fn subscribe(&mut self) -> PageEvents {
        let (tx, rx) = page_channel();
        self.inner.borrow_mut().subscribers.push(tx);
        rx
    }
}

/// Draw call captured by `RecordingSurface`
#[derive(Debug, Clone, PartialEq)]
pub(crate) enum Recorded {
    Circle,
    Arc { filled: bool, color: Rgba },
}

#[derive(Default)]
struct RecordingState {
    redraws: usize,
    calls: Vec<Recorded>,
}

/// Surface that counts redraw requests and records draw calls
#[derive(Clone, Default)]
pub(crate) struct RecordingSurface {
    inner: Rc<RefCell<RecordingState>>,
}

impl RecordingSurface {
    pub(crate) fn redraws(&self) -> usize {
        self.inner.borrow().redraws
    }

    pub(crate) fn calls(&self) -> Vec<Recorded> {
        self.inner.borrow().calls.clone()
    }
}

impl RenderSurface for RecordingSurface {
    fn measure(&mut self, preferred_width: f64, preferred_height: f64) -> (f64, f64) {
        (preferred_width, preferred_height)
    }

    fn draw_circle(&mut self, _cx: f64, _cy: f64, _radius: f64, _color: Rgba) {
        self.inner.borrow_mut().calls.push(Recorded::Circle);
    }

    fn draw_arc(
        &mut self,
        _bounds: crate::render::ArcBounds,
        _start_angle: f64,
        _sweep_angle: f64,
        filled: bool,
        color: Rgba,
        _stroke_width: f64,
    ) {
        self.inner
            .borrow_mut()
            .calls
            .push(Recorded::Arc { filled, color });
    }

    fn request_redraw(&mut self) {
        self.inner.borrow_mut().redraws += 1;
    }
}
