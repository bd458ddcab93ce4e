//! Timed value drivers for the indicator arc
//!
//! # Layers
//!
//! - `easing` - Pure easing curves mapping [0, 1] onto [0, 1]
//! - `timing` - Progress and interpolation helpers over explicit instants
//! - `clock` - `AnimationDriver`, a restartable from/to animation advanced once per tick
//!
//! # Usage
//!
//! ```
//! use std::time::{Duration, Instant};
//! use dotindicator_core::{AnimationDriver, DriverKind, EasingType, Tick};
//!
//! let t0 = Instant::now();
//! let mut driver = AnimationDriver::new(DriverKind::Progress);
//! driver.start(0.0, 1.0, Duration::from_millis(100), EasingType::Linear, t0);
//!
//! assert_eq!(driver.tick(t0 + Duration::from_millis(50)), Tick::Running(0.5));
//! assert_eq!(driver.tick(t0 + Duration::from_millis(100)), Tick::Completed(1.0));
//! assert_eq!(driver.tick(t0 + Duration::from_millis(150)), Tick::Idle);
//! ```

pub mod clock;
pub mod easing;
pub mod timing;

pub use clock::{AnimationDriver, DriverKind, Tick};
