//! Binding to a paged content host
//!
//! A host implements [`PageSource`] and hands out a notification stream from
//! [`PageSource::subscribe`]. [`PageBinding`] owns both the host and the
//! receiving end of that stream; dropping it on `unbind` is what makes any later
//! host notification unreachable.

use serde::Serialize;
use tokio::sync::mpsc;
use tokio::sync::mpsc::error::TryRecvError;
use tracing::{debug, trace};

/// Scroll state reported by the host
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default, Serialize)]
#[serde(rename_all = "snake_case")]
pub enum ScrollState {
    #[default]
    Idle,
    /// A user gesture is moving the pages
    Dragging,
}

/// Host notification, delivered in the order the host produced it
#[derive(Debug, Clone, Copy, PartialEq)]
pub enum PageEvent {
    ScrollStateChanged(ScrollState),
    /// `offset` is the fraction of the way from `position` to `position + 1`
    ScrolledTo { position: usize, offset: f64 },
}

impl PageEvent {
    /// Clamp the offset into `[0, 1)`, mapping NaN to 0
    pub fn normalized(self) -> Self {
        match self {
            PageEvent::ScrolledTo { position, offset } => {
                let offset = if offset.is_nan() {
                    0.0
                } else {
                    offset.clamp(0.0, 1.0 - f64::EPSILON)
                };
                PageEvent::ScrolledTo { position, offset }
            }
            other => other,
        }
    }
}

pub type PageEventSender = mpsc::UnboundedSender<PageEvent>;
pub type PageEvents = mpsc::UnboundedReceiver<PageEvent>;

/// Create a notification channel for a `PageSource` implementation
pub fn page_channel() -> (PageEventSender, PageEvents) {
    mpsc::unbounded_channel()
}

/// A paged content host the indicator can follow and drive
pub trait PageSource {
    /// Page currently shown
    fn current_index(&self) -> usize;

    /// Request navigation to `index`; the host reports the move through its
    /// notifications
    fn set_current_index(&mut self, index: usize);

    /// Number of pages right now; may change between calls
    fn item_count(&self) -> usize;

    /// Open a new notification stream
    fn subscribe(&mut self) -> PageEvents;
}

/// Subscription to a host, or nothing when unbound
#[derive(Default)]
pub struct PageBinding {
    host: Option<Box<dyn PageSource>>,
    events: Option<PageEvents>,
}

impl std::fmt::Debug for PageBinding {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("PageBinding")
            .field("bound", &self.is_bound())
            .finish()
    }
}

impl PageBinding {
    pub fn new() -> Self {
        Self::default()
    }

    #[inline]
    pub fn is_bound(&self) -> bool {
        self.host.is_some()
    }

    /// Subscribe to `host`, replacing any previous binding
    pub fn bind(&mut self, mut host: Box<dyn PageSource>) {
        self.unbind();
        self.events = Some(host.subscribe());
        self.host = Some(host);
        debug!("Bound page source");
    }

    /// Drop the subscription and the host, returning the host
    pub fn unbind(&mut self) -> Option<Box<dyn PageSource>> {
        if let Some(mut events) = self.events.take() {
            events.close();
        }
        let host = self.host.take();
        if host.is_some() {
            debug!("Unbound page source");
        }
        host
    }

    /// Next pending notification, normalized
    pub fn poll(&mut self) -> Option<PageEvent> {
        let events = self.events.as_mut()?;
        match events.try_recv() {
            Ok(event) => Some(event.normalized()),
            Err(TryRecvError::Empty) => None,
            Err(TryRecvError::Disconnected) => {
                trace!("Page source closed its notification stream");
                None
            }
        }
    }

    /// Page count as the host reports it now
    pub fn item_count(&self) -> Option<usize> {
        self.host.as_ref().map(|h| h.item_count())
    }

    pub fn current_index(&self) -> Option<usize> {
        self.host.as_ref().map(|h| h.current_index())
    }

    /// Ask the host to show `index`; no-op when unbound
    pub fn request_page(&mut self, index: usize) -> bool {
        match self.host.as_mut() {
            Some(host) => {
                host.set_current_index(index);
                true
            }
            None => false,
        }
    }
}
