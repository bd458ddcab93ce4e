//! Render model: indicator state in, drawing instructions out
//!
//! [`render`] is a pure function of a [`Snapshot`] and the configuration. Every
//! dot gets a filled circle in its slot; the focused dot and its successor, the
//! only two that change during a swipe, also get a border ring and a filled pie
//! whose angles follow the live driver.
//!
//! Canonical arc policy for those two dots:
//! - the dot tracked by `animating_dot` shows the live countdown: the progress
//!   driver's sweep while it runs, the reverse driver's angle while that runs,
//!   a full pie while a drag holds it, and an empty pie once the countdown has
//!   run out;
//! - the other one is drawn as a full pie, so it reads as a complete dot fading
//!   in or out with the drag offset.
//!
//! The border ring is drawn only for those two dots, always as a full circle at
//! the configured border color.

use serde::Serialize;

use crate::anim::timing::lerp;
use crate::anim::AnimationDriver;
use crate::color::Rgba;
use crate::config::IndicatorConfig;
use crate::indicator::{IndicatorState, Phase};
use crate::page::ScrollState;

/// Angle where arcs start, 12 o'clock
pub const START_ANGLE: f64 = -90.0;
/// Angle the countdown start edge reaches when it runs out
pub const END_ANGLE: f64 = 270.0;
pub const FULL_SWEEP: f64 = 360.0;

/// Drawing surface the indicator paints onto
///
/// Angles are in degrees, clockwise from 3 o'clock.
pub trait RenderSurface {
    /// Size the surface grants for the preferred size
    fn measure(&mut self, preferred_width: f64, preferred_height: f64) -> (f64, f64);

    fn draw_circle(&mut self, cx: f64, cy: f64, radius: f64, color: Rgba);

    /// Draw an arc inside `bounds`; `filled` draws a pie, otherwise a stroke of
    /// `stroke_width`
    fn draw_arc(
        &mut self,
        bounds: ArcBounds,
        start_angle: f64,
        sweep_angle: f64,
        filled: bool,
        color: Rgba,
        stroke_width: f64,
    );

    /// Ask for `DotIndicator::draw` to be called again soon
    fn request_redraw(&mut self);
}

/// Oval bounding an arc
#[derive(Debug, Clone, Copy, PartialEq, Serialize)]
pub struct ArcBounds {
    pub left: f64,
    pub top: f64,
    pub right: f64,
    pub bottom: f64,
}

impl ArcBounds {
    #[inline]
    pub fn width(&self) -> f64 {
        self.right - self.left
    }

    #[inline]
    pub fn height(&self) -> f64 {
        self.bottom - self.top
    }

    #[inline]
    pub fn center(&self) -> (f64, f64) {
        (
            (self.left + self.right) / 2.0,
            (self.top + self.bottom) / 2.0,
        )
    }
}

#[derive(Debug, Clone, PartialEq, Serialize)]
#[serde(tag = "kind", rename_all = "snake_case")]
pub enum DrawCommand {
    Circle {
        cx: f64,
        cy: f64,
        radius: f64,
        color: Rgba,
    },
    Arc {
        bounds: ArcBounds,
        start_angle: f64,
        sweep_angle: f64,
        filled: bool,
        color: Rgba,
        stroke_width: f64,
    },
}

impl DrawCommand {
    pub fn paint(&self, surface: &mut dyn RenderSurface) {
        match *self {
            DrawCommand::Circle {
                cx,
                cy,
                radius,
                color,
            } => surface.draw_circle(cx, cy, radius, color),
            DrawCommand::Arc {
                bounds,
                start_angle,
                sweep_angle,
                filled,
                color,
                stroke_width,
            } => surface.draw_arc(bounds, start_angle, sweep_angle, filled, color, stroke_width),
        }
    }
}

/// Instructions for one dot, in paint order
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct DotDrawing {
    pub index: usize,
    pub commands: Vec<DrawCommand>,
}

impl DotDrawing {
    /// `(start_angle, sweep_angle, color)` of the filled pie, if this dot has one
    pub fn inner_arc(&self) -> Option<(f64, f64, Rgba)> {
        self.commands.iter().find_map(|command| match *command {
            DrawCommand::Arc {
                start_angle,
                sweep_angle,
                filled: true,
                color,
                ..
            } => Some((start_angle, sweep_angle, color)),
            _ => None,
        })
    }

    pub fn has_ring(&self) -> bool {
        self.commands
            .iter()
            .any(|command| matches!(command, DrawCommand::Arc { filled: false, .. }))
    }
}

/// A full set of drawing instructions
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct Frame {
    pub width: f64,
    pub height: f64,
    pub dots: Vec<DotDrawing>,
}

impl Frame {
    pub fn dot(&self, index: usize) -> Option<&DotDrawing> {
        self.dots.get(index)
    }

    pub fn commands(&self) -> impl Iterator<Item = &DrawCommand> {
        self.dots.iter().flat_map(|dot| dot.commands.iter())
    }

    pub fn paint(&self, surface: &mut dyn RenderSurface) {
        for command in self.commands() {
            command.paint(surface);
        }
    }
}

/// Observable state of one driver
#[derive(Debug, Clone, Copy, PartialEq, Serialize)]
pub struct DriverSample {
    pub running: bool,
    pub value: f64,
}

impl From<&AnimationDriver> for DriverSample {
    fn from(driver: &AnimationDriver) -> Self {
        Self {
            running: driver.is_running(),
            value: driver.value(),
        }
    }
}

/// Everything the render model reads
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct Snapshot {
    pub phase: Phase,
    pub state: IndicatorState,
    pub progress: DriverSample,
    pub reverse: DriverSample,
}

/// Preferred `(width, height)` for `dot_count` dots
pub fn preferred_size(config: &IndicatorConfig, dot_count: usize) -> (f64, f64) {
    let slots = (2 * dot_count.max(1) - 1) as f64;
    let padding = 2.0 * config.padding;
    (
        slots * config.dot_diameter + padding,
        config.dot_diameter + padding,
    )
}

/// `(start_angle, sweep_angle)` of the filled pie for dot `index`
pub fn arc_angles(snapshot: &Snapshot, index: usize) -> (f64, f64) {
    if snapshot.state.animating_dot != Some(index) {
        return (START_ANGLE, FULL_SWEEP);
    }

    let start = if snapshot.progress.running {
        lerp(START_ANGLE, END_ANGLE, snapshot.progress.value)
    } else if snapshot.reverse.running {
        snapshot.reverse.value
    } else if snapshot.state.scroll_state == ScrollState::Dragging {
        START_ANGLE
    } else {
        END_ANGLE
    };

    (start, FULL_SWEEP - start + START_ANGLE)
}

/// Inner-arc color for dot `index`, faded by the drag offset
fn inner_arc_color(snapshot: &Snapshot, index: usize, color: Rgba) -> Rgba {
    let offset = snapshot.state.offset_fraction;
    if index == snapshot.state.focused_page {
        color.lerp(Rgba::TRANSPARENT, offset)
    } else {
        Rgba::TRANSPARENT.lerp(color, offset)
    }
}

pub fn render(snapshot: &Snapshot, config: &IndicatorConfig) -> Frame {
    let state = &snapshot.state;
    let diameter = config.dot_diameter;
    let radius = diameter / 2.0;
    let inset = config.line_width / 2.0;
    let (width, height) = preferred_size(config, state.dot_count);

    let dots = (0..state.dot_count)
        .map(|index| {
            let left = config.padding + 2.0 * diameter * index as f64;
            let top = config.padding;

            let mut commands = vec![DrawCommand::Circle {
                cx: left + radius,
                cy: top + radius,
                radius,
                color: config.unread_color,
            }];

            if index == state.focused_page || index == state.focused_page + 1 {
                let bounds = ArcBounds {
                    left: left + inset,
                    top: top + inset,
                    right: left + diameter - inset,
                    bottom: top + diameter - inset,
                };
                commands.push(DrawCommand::Arc {
                    bounds,
                    start_angle: START_ANGLE,
                    sweep_angle: FULL_SWEEP,
                    filled: false,
                    color: config.border_color,
                    stroke_width: config.line_width,
                });

                let (start_angle, sweep_angle) = arc_angles(snapshot, index);
                commands.push(DrawCommand::Arc {
                    bounds,
                    start_angle,
                    sweep_angle,
                    filled: true,
                    color: inner_arc_color(snapshot, index, config.inner_arc_color),
                    stroke_width: config.line_width,
                });
            }

            DotDrawing { index, commands }
        })
        .collect();

    Frame {
        width,
        height,
        dots,
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn snapshot(dot_count: usize, focused: usize) -> Snapshot {
        Snapshot {
            phase: Phase::Autoplaying,
            state: IndicatorState {
                focused_page: focused,
                animating_dot: Some(focused),
                dot_count,
                ..IndicatorState::unbound()
            },
            progress: DriverSample {
                running: true,
                value: 0.0,
            },
            reverse: DriverSample {
                running: false,
                value: 0.0,
            },
        }
    }

    #[test]
    fn test_size_contract() {
        let config = IndicatorConfig::default();
        assert_eq!(preferred_size(&config, 3), (150.0, 30.0));
        assert_eq!(preferred_size(&config, 1), (30.0, 30.0));
        assert_eq!(preferred_size(&config, 0), (30.0, 30.0));

        let padded = IndicatorConfig {
            padding: 4.0,
            ..Default::default()
        };
        let frame = render(&snapshot(3, 0), &padded);
        assert_eq!((frame.width, frame.height), (158.0, 38.0));
    }

    #[test]
    fn test_slots_are_evenly_spaced() {
        let frame = render(&snapshot(3, 0), &IndicatorConfig::default());
        let centers: Vec<f64> = frame
            .dots
            .iter()
            .map(|dot| match dot.commands[0] {
                DrawCommand::Circle { cx, radius, .. } => {
                    assert_eq!(radius, 15.0);
                    cx
                }
                _ => panic!("first command must be the dot circle"),
            })
            .collect();
        assert_eq!(centers, vec![15.0, 75.0, 135.0]);
    }

    #[test]
    fn test_half_progress_angles() {
        let mut snap = snapshot(3, 0);
        snap.progress.value = 0.5;
        let (start, sweep) = arc_angles(&snap, 0);
        assert!((start - 90.0).abs() < 1e-9);
        assert!((sweep - 180.0).abs() < 1e-9);
    }

    #[test]
    fn test_reverse_value_drives_start_angle() {
        let mut snap = snapshot(3, 1);
        snap.progress.running = false;
        snap.reverse = DriverSample {
            running: true,
            value: 30.0,
        };
        assert_eq!(arc_angles(&snap, 1), (30.0, 240.0));
    }

    #[test]
    fn test_idle_tracked_dot_rest_states() {
        let mut snap = snapshot(3, 0);
        snap.progress.running = false;

        // Countdown ran out
        assert_eq!(arc_angles(&snap, 0), (END_ANGLE, 0.0));

        // Held by a drag
        snap.state.scroll_state = ScrollState::Dragging;
        assert_eq!(arc_angles(&snap, 0), (START_ANGLE, FULL_SWEEP));
    }

    #[test]
    fn test_untracked_dots_are_full() {
        let snap = snapshot(3, 0);
        assert_eq!(arc_angles(&snap, 1), (START_ANGLE, FULL_SWEEP));

        let mut unbound = snap.clone();
        unbound.state.animating_dot = None;
        assert_eq!(arc_angles(&unbound, 0), (START_ANGLE, FULL_SWEEP));
    }

    #[test]
    fn test_only_focused_and_successor_get_arcs() {
        let frame = render(&snapshot(4, 1), &IndicatorConfig::default());
        let with_arcs: Vec<usize> = frame
            .dots
            .iter()
            .filter(|dot| dot.has_ring())
            .map(|dot| dot.index)
            .collect();
        assert_eq!(with_arcs, vec![1, 2]);
        assert!(frame.dot(0).unwrap().inner_arc().is_none());
        assert_eq!(frame.commands().count(), 4 + 2 * 2);
    }

    #[test]
    fn test_last_page_has_no_successor() {
        let frame = render(&snapshot(3, 2), &IndicatorConfig::default());
        assert!(frame.dot(2).unwrap().has_ring());
        assert!(!frame.dot(1).unwrap().has_ring());
    }

    #[test]
    fn test_color_blend_boundaries() {
        let config = IndicatorConfig::default();
        let inner = config.inner_arc_color;

        let frame = render(&snapshot(3, 0), &config);
        assert_eq!(frame.dot(0).unwrap().inner_arc().unwrap().2, inner);
        assert_eq!(frame.dot(1).unwrap().inner_arc().unwrap().2, Rgba::TRANSPARENT);

        let mut snap = snapshot(3, 0);
        snap.state.offset_fraction = 1.0 - f64::EPSILON;
        let frame = render(&snap, &config);
        assert_eq!(frame.dot(0).unwrap().inner_arc().unwrap().2, Rgba::TRANSPARENT);
        assert_eq!(frame.dot(1).unwrap().inner_arc().unwrap().2, inner);
    }

    #[test]
    fn test_border_ring_ignores_offset() {
        let config = IndicatorConfig::default();
        let mut snap = snapshot(3, 0);
        snap.state.offset_fraction = 0.6;
        let frame = render(&snap, &config);
        for index in [0, 1] {
            let ring = frame.dot(index).unwrap().commands[1].clone();
            assert!(matches!(
                ring,
                DrawCommand::Arc { filled: false, sweep_angle, color, .. }
                    if sweep_angle == FULL_SWEEP && color == config.border_color
            ));
        }
    }

    #[test]
    fn test_paint_replays_commands() {
        use crate::testing::{Recorded, RecordingSurface};

        let mut surface = RecordingSurface::default();
        let frame = render(&snapshot(2, 0), &IndicatorConfig::default());
        frame.paint(&mut surface);

        let calls = surface.calls();
        assert_eq!(calls.len(), frame.commands().count());
        assert_eq!(calls[0], Recorded::Circle);
        assert!(matches!(calls[1], Recorded::Arc { filled: false, .. }));
        assert!(matches!(calls[2], Recorded::Arc { filled: true, .. }));
        assert_eq!(surface.redraws(), 0);
    }
}
