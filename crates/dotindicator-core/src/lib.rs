pub mod anim;
pub mod color;
pub mod config;
pub mod error;
pub mod indicator;
pub mod page;
pub mod render;

#[cfg(test)]
pub(crate) mod testing;

pub use anim::{AnimationDriver, DriverKind, Tick};
pub use color::Rgba;
pub use config::{AppConfig, DemoConfig, EasingType, IndicatorConfig, IndicatorOptions};
pub use error::{Error, Result};
pub use indicator::{DotIndicator, IndicatorState, Phase};
pub use page::{PageBinding, PageEvent, PageEventSender, PageEvents, PageSource, ScrollState};
pub use render::{ArcBounds, DrawCommand, DriverSample, Frame, RenderSurface, Snapshot};
