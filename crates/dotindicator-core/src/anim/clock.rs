//! Restartable timed value driver
//!
//! An `AnimationDriver` interpolates between a start and end value over a fixed
//! duration. It is advanced by `tick` once per frame and reports completion
//! exactly once, on the tick that reaches the end. Canceling never reports
//! completion. The owner reacts to `Tick::Completed` the way a completion
//! listener would; the driver is already stopped at that point, so restarting it
//! from the completion handler is allowed.

use std::time::{Duration, Instant};

use serde::Serialize;

use super::easing::EasingType;
use super::timing::{lerp, progress};

/// Which of the indicator's two drivers this is
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize)]
#[serde(rename_all = "snake_case")]
pub enum DriverKind {
    /// Long autoplay countdown, 0 -> 1
    Progress,
    /// Short snap-back of the arc angle to rest
    Reverse,
}

/// Outcome of advancing a driver by one tick
#[derive(Debug, Clone, Copy, PartialEq)]
pub enum Tick {
    /// Not running; nothing changed
    Idle,
    /// Still running with the new value
    Running(f64),
    /// Reached the end value on this tick and stopped
    Completed(f64),
}

/// A single in-flight run
#[derive(Debug, Clone)]
struct ActiveRun {
    start: Instant,
    from: f64,
    to: f64,
    duration: Duration,
    easing: EasingType,
}

/// Timed value driver
///
/// Lives for the whole lifetime of its owner and is started and canceled
/// repeatedly rather than recreated.
#[derive(Debug, Clone)]
pub struct AnimationDriver {
    kind: DriverKind,
    run: Option<ActiveRun>,
    /// Last interpolated value; kept after stopping
    value: f64,
    /// Last eased fraction of the current or most recent run
    fraction: f64,
    /// Number of runs started so far
    runs: u64,
}

impl AnimationDriver {
    pub fn new(kind: DriverKind) -> Self {
        Self {
            kind,
            run: None,
            value: 0.0,
            fraction: 0.0,
            runs: 0,
        }
    }

    #[inline]
    pub fn kind(&self) -> DriverKind {
        self.kind
    }

    #[inline]
    pub fn is_running(&self) -> bool {
        self.run.is_some()
    }

    /// Current interpolated value
    #[inline]
    pub fn value(&self) -> f64 {
        self.value
    }

    /// Eased fraction of the current or most recent run
    #[inline]
    pub fn fraction(&self) -> f64 {
        self.fraction
    }

    /// Number of runs started over the driver's lifetime
    #[inline]
    pub fn runs(&self) -> u64 {
        self.runs
    }

    /// Start animating `from -> to`
    ///
    /// A run already in flight is canceled first, so completions never stack.
    pub fn start(
        &mut self,
        from: f64,
        to: f64,
        duration: Duration,
        easing: EasingType,
        now: Instant,
    ) {
        self.cancel();
        self.runs += 1;
        self.value = from;
        self.fraction = 0.0;
        self.run = Some(ActiveRun {
            start: now,
            from,
            to,
            duration,
            easing,
        });
    }

    /// Stop without completing
    ///
    /// Leaves the value where the last tick put it. Returns whether a run was
    /// actually stopped; canceling an idle driver is a no-op.
    pub fn cancel(&mut self) -> bool {
        self.run.take().is_some()
    }

    /// Advance to `now`
    pub fn tick(&mut self, now: Instant) -> Tick {
        let Some(run) = self.run.as_ref() else {
            return Tick::Idle;
        };

        let t = progress(run.start, now, run.duration);
        self.fraction = run.easing.apply(t);
        self.value = lerp(run.from, run.to, self.fraction);

        if t >= 1.0 {
            // Land exactly on the end value
            self.value = run.to;
            self.run = None;
            Tick::Completed(self.value)
        } else {
            Tick::Running(self.value)
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn ms(n: u64) -> Duration {
        Duration::from_millis(n)
    }

    #[test]
    fn test_linear_run_completes_once() {
        let t0 = Instant::now();
        let mut driver = AnimationDriver::new(DriverKind::Progress);
        driver.start(0.0, 1.0, ms(4000), EasingType::Linear, t0);
        assert!(driver.is_running());

        match driver.tick(t0 + ms(2000)) {
            Tick::Running(v) => assert!((v - 0.5).abs() < 1e-9),
            other => panic!("unexpected {:?}", other),
        }
        assert_eq!(driver.tick(t0 + ms(4000)), Tick::Completed(1.0));
        assert!(!driver.is_running());
        assert_eq!(driver.tick(t0 + ms(5000)), Tick::Idle);
        assert_eq!(driver.value(), 1.0);
    }

    #[test]
    fn test_cancel_is_idempotent_and_silent() {
        let t0 = Instant::now();
        let mut driver = AnimationDriver::new(DriverKind::Reverse);
        driver.start(90.0, -90.0, ms(200), EasingType::AccelerateDecelerate, t0);
        driver.tick(t0 + ms(100));
        let value = driver.value();

        assert!(driver.cancel());
        assert!(!driver.cancel());
        assert!(!driver.is_running());
        assert_eq!(driver.value(), value);
        // No completion after cancel, even past the deadline
        assert_eq!(driver.tick(t0 + ms(1000)), Tick::Idle);
    }

    #[test]
    fn test_restart_discards_previous_run() {
        let t0 = Instant::now();
        let mut driver = AnimationDriver::new(DriverKind::Progress);
        driver.start(0.0, 1.0, ms(100), EasingType::Linear, t0);
        driver.tick(t0 + ms(90));

        driver.start(0.0, 1.0, ms(100), EasingType::Linear, t0 + ms(90));
        assert_eq!(driver.value(), 0.0);
        assert_eq!(driver.runs(), 2);
        // The first run's deadline passes without a completion
        assert!(matches!(driver.tick(t0 + ms(110)), Tick::Running(_)));
        assert_eq!(driver.tick(t0 + ms(190)), Tick::Completed(1.0));
    }

    #[test]
    fn test_restart_from_completion() {
        let t0 = Instant::now();
        let mut driver = AnimationDriver::new(DriverKind::Progress);
        driver.start(0.0, 1.0, ms(100), EasingType::Linear, t0);

        let done = t0 + ms(100);
        if let Tick::Completed(_) = driver.tick(done) {
            driver.start(0.0, 1.0, ms(100), EasingType::Linear, done);
        }
        assert!(driver.is_running());
        assert_eq!(driver.value(), 0.0);
    }

    #[test]
    fn test_zero_duration_completes_on_first_tick() {
        let t0 = Instant::now();
        let mut driver = AnimationDriver::new(DriverKind::Reverse);
        driver.start(45.0, -90.0, Duration::ZERO, EasingType::Linear, t0);
        assert_eq!(driver.tick(t0), Tick::Completed(-90.0));
    }
}
