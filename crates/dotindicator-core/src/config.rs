use serde::{Deserialize, Serialize};
use std::path::{Path, PathBuf};
use std::time::Duration;
use tracing::warn;

use crate::color::Rgba;

#[derive(Debug, Clone, Default, Serialize, Deserialize)]
pub struct AppConfig {
    #[serde(default)]
    pub indicator: IndicatorConfig,
    #[serde(default)]
    pub demo: DemoConfig,
}

/// Easing curve applied to a driver's time fraction
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum EasingType {
    /// Constant rate
    #[default]
    Linear,
    /// Symmetric ease-in/ease-out with zero velocity at both ends
    AccelerateDecelerate,
}

/// Indicator appearance and timing. Fixed once handed to a `DotIndicator`,
/// except through `DotIndicator::configure`.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct IndicatorConfig {
    /// Dot diameter in px; also the horizontal gap between dots
    #[serde(default = "default_dot_diameter")]
    pub dot_diameter: f64,
    /// Border ring stroke width in px
    #[serde(default = "default_line_width")]
    pub line_width: f64,
    /// Fixed padding around the row in px
    #[serde(default)]
    pub padding: f64,
    /// Autoplay countdown per page
    #[serde(default = "default_progress_duration")]
    pub progress_duration_ms: u64,
    /// Snap-back duration when autoplay is interrupted
    #[serde(default = "default_reverse_duration")]
    pub reverse_duration_ms: u64,
    #[serde(default)]
    pub progress_easing: EasingType,
    #[serde(default = "default_reverse_easing")]
    pub reverse_easing: EasingType,
    #[serde(default = "default_border_color")]
    pub border_color: Rgba,
    #[serde(default = "default_unread_color")]
    pub unread_color: Rgba,
    #[serde(default = "default_inner_arc_color")]
    pub inner_arc_color: Rgba,
    /// Number of dots cycled by `DotIndicator::start` when no host is bound
    #[serde(default = "default_standalone_dot_count")]
    pub standalone_dot_count: usize,
}

impl Default for IndicatorConfig {
    fn default() -> Self {
        Self {
            dot_diameter: default_dot_diameter(),
            line_width: default_line_width(),
            padding: 0.0,
            progress_duration_ms: default_progress_duration(),
            reverse_duration_ms: default_reverse_duration(),
            progress_easing: EasingType::Linear,
            reverse_easing: default_reverse_easing(),
            border_color: default_border_color(),
            unread_color: default_unread_color(),
            inner_arc_color: default_inner_arc_color(),
            standalone_dot_count: default_standalone_dot_count(),
        }
    }
}

impl IndicatorConfig {
    #[inline]
    pub fn progress_duration(&self) -> Duration {
        Duration::from_millis(self.progress_duration_ms)
    }

    #[inline]
    pub fn reverse_duration(&self) -> Duration {
        Duration::from_millis(self.reverse_duration_ms)
    }

    /// Replace degenerate geometry with usable values, logging each substitution.
    pub fn sanitized(mut self) -> Self {
        if !self.dot_diameter.is_finite() || self.dot_diameter <= 0.0 {
            warn!("Invalid dot_diameter {}, using default", self.dot_diameter);
            self.dot_diameter = default_dot_diameter();
        }
        if !self.line_width.is_finite() || self.line_width < 0.0 {
            warn!("Invalid line_width {}, using dot_diameter / 8", self.line_width);
            self.line_width = self.dot_diameter / 8.0;
        }
        if self.line_width > self.dot_diameter / 2.0 {
            warn!(
                "line_width {} exceeds the dot radius, clamping",
                self.line_width
            );
            self.line_width = self.dot_diameter / 2.0;
        }
        if !self.padding.is_finite() || self.padding < 0.0 {
            warn!("Invalid padding {}, using 0", self.padding);
            self.padding = 0.0;
        }
        if self.standalone_dot_count == 0 {
            warn!("standalone_dot_count must be at least 1");
            self.standalone_dot_count = 1;
        }
        self
    }

    /// Merge the set fields of `options` over this configuration.
    pub fn apply(&mut self, options: &IndicatorOptions) {
        if let Some(dot_diameter) = options.dot_diameter {
            self.dot_diameter = dot_diameter;
        }
        if let Some(line_width) = options.line_width {
            self.line_width = line_width;
        }
        if let Some(ms) = options.progress_duration_ms {
            self.progress_duration_ms = ms;
        }
        if let Some(ms) = options.reverse_duration_ms {
            self.reverse_duration_ms = ms;
        }
        if let Some(easing) = options.progress_easing {
            self.progress_easing = easing;
        }
        if let Some(easing) = options.reverse_easing {
            self.reverse_easing = easing;
        }
        if let Some(color) = options.border_color {
            self.border_color = color;
        }
        if let Some(color) = options.unread_color {
            self.unread_color = color;
        }
        if let Some(color) = options.inner_arc_color {
            self.inner_arc_color = color;
        }
    }
}

/// Partial configuration accepted by `DotIndicator::configure`
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
pub struct IndicatorOptions {
    pub dot_diameter: Option<f64>,
    pub line_width: Option<f64>,
    pub progress_duration_ms: Option<u64>,
    pub reverse_duration_ms: Option<u64>,
    pub progress_easing: Option<EasingType>,
    pub reverse_easing: Option<EasingType>,
    pub border_color: Option<Rgba>,
    pub unread_color: Option<Rgba>,
    pub inner_arc_color: Option<Rgba>,
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct DemoConfig {
    /// Pages in the simulated carousel
    #[serde(default = "default_page_count")]
    pub page_count: usize,
    /// Frame interval in milliseconds
    #[serde(default = "default_tick_rate")]
    pub tick_rate_ms: u64,
    /// Duration of a simulated swipe or settle
    #[serde(default = "default_swipe_duration")]
    pub swipe_duration_ms: u64,
    /// Run the indicator without a bound carousel
    #[serde(default)]
    pub standalone: bool,
}

impl Default for DemoConfig {
    fn default() -> Self {
        Self {
            page_count: default_page_count(),
            tick_rate_ms: default_tick_rate(),
            swipe_duration_ms: default_swipe_duration(),
            standalone: false,
        }
    }
}

fn default_dot_diameter() -> f64 {
    30.0
}

fn default_line_width() -> f64 {
    default_dot_diameter() / 8.0
}

fn default_progress_duration() -> u64 {
    4000
}

fn default_reverse_duration() -> u64 {
    200
}

fn default_reverse_easing() -> EasingType {
    EasingType::AccelerateDecelerate
}

fn default_border_color() -> Rgba {
    Rgba::opaque(0x61, 0x77, 0xe5)
}

fn default_unread_color() -> Rgba {
    Rgba::opaque(0x22, 0x26, 0x2f)
}

fn default_inner_arc_color() -> Rgba {
    Rgba::new(0x61, 0x77, 0xe5, 0xb3)
}

fn default_standalone_dot_count() -> usize {
    3
}

fn default_page_count() -> usize {
    3
}

fn default_tick_rate() -> u64 {
    16 // ~60fps
}

fn default_swipe_duration() -> u64 {
    350
}

impl AppConfig {
    /// Load configuration from the default path or return defaults
    pub fn load() -> crate::Result<Self> {
        Self::load_from(&Self::config_path())
    }

    /// Load configuration from `path`; a missing file yields defaults
    pub fn load_from(path: &Path) -> crate::Result<Self> {
        if path.exists() {
            let content = std::fs::read_to_string(path)?;
            Self::from_toml(&content)
        } else {
            Ok(Self::default())
        }
    }

    pub fn from_toml(content: &str) -> crate::Result<Self> {
        let mut config: Self =
            toml::from_str(content).map_err(|e| crate::Error::Config(e.to_string()))?;
        config.indicator = config.indicator.sanitized();
        Ok(config)
    }

    pub fn to_toml(&self) -> crate::Result<String> {
        toml::to_string_pretty(self).map_err(|e| crate::Error::Config(e.to_string()))
    }

    /// Save configuration to the default path
    pub fn save(&self) -> crate::Result<()> {
        let config_path = Self::config_path();

        if let Some(parent) = config_path.parent() {
            std::fs::create_dir_all(parent)?;
        }

        std::fs::write(&config_path, self.to_toml()?)?;

        Ok(())
    }

    /// Get the configuration file path
    /// Always uses ~/.config/dotindicator/config.toml on all platforms
    pub fn config_path() -> PathBuf {
        dirs::home_dir()
            .unwrap_or_else(|| PathBuf::from("."))
            .join(".config")
            .join("dotindicator")
            .join("config.toml")
    }
}
