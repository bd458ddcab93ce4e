//! Frame pacing for the demo loop
//!
//! The indicator and carousel advance on `Frame` events at a fixed cadence;
//! terminal input that arrives between two frames is delivered as soon as it
//! is read. A frame that falls behind is dropped rather than replayed.

use std::time::{Duration, Instant};

use anyhow::Result;
use crossterm::event::{self, Event, KeyEvent, KeyEventKind};

#[derive(Debug)]
pub enum DemoEvent {
    Key(KeyEvent),
    /// Layout must be recomputed
    Resize,
    /// Time to step the animations, stamped with the frame time
    Frame(Instant),
}

pub struct FramePacer {
    interval: Duration,
    next_frame: Instant,
}

impl FramePacer {
    pub fn new(interval_ms: u64, now: Instant) -> Self {
        let interval = Duration::from_millis(interval_ms.max(1));
        Self {
            interval,
            next_frame: now + interval,
        }
    }

    pub fn interval(&self) -> Duration {
        self.interval
    }

    /// Block until input arrives or the next frame is due
    ///
    /// Returns `None` for terminal events the demo does not use.
    pub fn next(&mut self) -> Result<Option<DemoEvent>> {
        let now = Instant::now();
        let wait = self.next_frame.saturating_duration_since(now);
        if !wait.is_zero() && event::poll(wait)? {
            return Ok(translate(event::read()?));
        }

        let now = Instant::now();
        self.next_frame = following_frame(self.next_frame, now, self.interval);
        Ok(Some(DemoEvent::Frame(now)))
    }
}

/// Deadline after `due`, skipping frames already missed at `now`
fn following_frame(due: Instant, now: Instant, interval: Duration) -> Instant {
    let next = due + interval;
    if next <= now {
        now + interval
    } else {
        next
    }
}

fn translate(event: Event) -> Option<DemoEvent> {
    match event {
        // Some terminals also report releases and repeats
        Event::Key(key) if key.kind == KeyEventKind::Press => Some(DemoEvent::Key(key)),
        Event::Resize(_, _) => Some(DemoEvent::Resize),
        _ => None,
    }
}

#[cfg(test)]
mod tests {
    use crossterm::event::{KeyCode, KeyEventState, KeyModifiers};

    use super::*;

    fn ms(n: u64) -> Duration {
        Duration::from_millis(n)
    }

    #[test]
    fn test_frames_keep_cadence() {
        let t0 = Instant::now();
        assert_eq!(following_frame(t0 + ms(16), t0 + ms(17), ms(16)), t0 + ms(32));
    }

    #[test]
    fn test_missed_frames_are_dropped() {
        let t0 = Instant::now();
        assert_eq!(following_frame(t0 + ms(16), t0 + ms(100), ms(16)), t0 + ms(116));
    }

    #[test]
    fn test_zero_interval_is_clamped() {
        let pacer = FramePacer::new(0, Instant::now());
        assert_eq!(pacer.interval(), ms(1));
    }

    #[test]
    fn test_only_key_presses_are_delivered() {
        let press = KeyEvent::new(KeyCode::Char('l'), KeyModifiers::NONE);
        assert!(matches!(translate(Event::Key(press)), Some(DemoEvent::Key(_))));

        let release = KeyEvent {
            kind: KeyEventKind::Release,
            state: KeyEventState::NONE,
            ..press
        };
        assert!(translate(Event::Key(release)).is_none());
        assert!(matches!(translate(Event::Resize(80, 24)), Some(DemoEvent::Resize)));
        assert!(translate(Event::FocusGained).is_none());
    }
}
