//! Terminal `RenderSurface` on a ratatui braille canvas
//!
//! Shapes are rasterized into point layers at one sample per braille dot and
//! composited over the background color, since terminals have no alpha.
//! `measure` opens a new frame: it clears the layers and sets the canvas bounds
//! to the indicator's preferred size.

use std::cell::RefCell;
use std::rc::Rc;

use dotindicator_core::render::ArcBounds;
use dotindicator_core::{RenderSurface, Rgba};
use ratatui::{
    layout::Rect,
    style::Color,
    symbols::Marker,
    widgets::canvas::{Canvas, Points},
    Frame,
};

use crate::theme::to_color;

/// Points sharing one color, painted in insertion order
#[derive(Debug, Clone)]
struct Layer {
    color: Color,
    points: Vec<(f64, f64)>,
}

#[derive(Debug)]
struct SurfaceState {
    background: Rgba,
    /// Terminal rows the indicator occupies; sets the sampling density
    rows: u16,
    width: f64,
    height: f64,
    layers: Vec<Layer>,
    redraw_requested: bool,
}

/// Shared handle: the indicator owns one clone, the UI renders another
#[derive(Debug, Clone)]
pub struct CanvasSurface {
    inner: Rc<RefCell<SurfaceState>>,
}

impl CanvasSurface {
    pub fn new(background: Rgba, rows: u16) -> Self {
        Self {
            inner: Rc::new(RefCell::new(SurfaceState {
                background,
                rows: rows.max(1),
                width: 0.0,
                height: 0.0,
                layers: Vec::new(),
                redraw_requested: true,
            })),
        }
    }

    /// Return and clear the pending redraw request
    pub fn take_redraw(&self) -> bool {
        std::mem::take(&mut self.inner.borrow_mut().redraw_requested)
    }

    /// Terminal columns needed to keep dots round in `rows` rows
    pub fn columns_for(&self, width: f64, height: f64) -> u16 {
        let rows = self.inner.borrow().rows as f64;
        if height <= 0.0 {
            return 0;
        }
        // A braille cell is 2x4 dots, roughly square dots on a 1:2 cell
        (width / height * rows * 2.0).ceil() as u16
    }

    pub fn rows(&self) -> u16 {
        self.inner.borrow().rows
    }

    /// Number of sampled points in the current frame
    pub fn point_count(&self) -> usize {
        self.inner.borrow().layers.iter().map(|l| l.points.len()).sum()
    }

    /// Paint the last rasterized frame into `area`
    pub fn render(&self, frame: &mut Frame, area: Rect) {
        let state = self.inner.borrow();
        let height = state.height;
        let canvas = Canvas::default()
            .marker(Marker::Braille)
            .background_color(to_color(state.background))
            .x_bounds([0.0, state.width.max(1.0)])
            .y_bounds([0.0, height.max(1.0)])
            .paint(|ctx| {
                for layer in &state.layers {
                    ctx.draw(&Points {
                        coords: &layer.points,
                        color: layer.color,
                    });
                }
            });
        frame.render_widget(canvas, area);
    }

    /// Distance between samples in indicator px
    fn step(state: &SurfaceState) -> f64 {
        (state.height / (state.rows as f64 * 4.0)).max(0.25)
    }

    /// Sample the box around a shape and keep the points `inside` accepts
    fn rasterize(
        &self,
        left: f64,
        top: f64,
        right: f64,
        bottom: f64,
        color: Rgba,
        inside: impl Fn(f64, f64) -> bool,
    ) {
        if color.is_transparent() {
            return;
        }
        let mut state = self.inner.borrow_mut();
        let step = Self::step(&state);
        let height = state.height;
        let color = to_color(color.over(state.background));

        let mut points = Vec::new();
        let mut y = top + step / 2.0;
        while y < bottom {
            let mut x = left + step / 2.0;
            while x < right {
                if inside(x, y) {
                    // Canvas y grows upwards
                    points.push((x, height - y));
                }
                x += step;
            }
            y += step;
        }
        if !points.is_empty() {
            state.layers.push(Layer { color, points });
        }
    }
}

/// Whether the direction of `(dx, dy)` lies in the clockwise sweep from `start`
fn within_sweep(dx: f64, dy: f64, start: f64, sweep: f64) -> bool {
    if sweep >= 360.0 {
        return true;
    }
    if sweep <= 0.0 {
        return false;
    }
    // y grows downwards, so atan2 already runs clockwise
    let angle = dy.atan2(dx).to_degrees();
    (angle - start).rem_euclid(360.0) <= sweep
}

impl RenderSurface for CanvasSurface {
    fn measure(&mut self, preferred_width: f64, preferred_height: f64) -> (f64, f64) {
        let mut state = self.inner.borrow_mut();
        state.width = preferred_width;
        state.height = preferred_height;
        state.layers.clear();
        (preferred_width, preferred_height)
    }

    fn draw_circle(&mut self, cx: f64, cy: f64, radius: f64, color: Rgba) {
        let r2 = radius * radius;
        self.rasterize(
            cx - radius,
            cy - radius,
            cx + radius,
            cy + radius,
            color,
            |x, y| (x - cx).powi(2) + (y - cy).powi(2) <= r2,
        );
    }

    fn draw_arc(
        &mut self,
        bounds: ArcBounds,
        start_angle: f64,
        sweep_angle: f64,
        filled: bool,
        color: Rgba,
        stroke_width: f64,
    ) {
        let (cx, cy) = bounds.center();
        let radius = bounds.width().min(bounds.height()) / 2.0;
        let half_stroke = (stroke_width / 2.0).max(0.5);
        let (inner, outer) = if filled {
            (0.0, radius)
        } else {
            ((radius - half_stroke).max(0.0), radius + half_stroke)
        };

        self.rasterize(
            cx - outer,
            cy - outer,
            cx + outer,
            cy + outer,
            color,
            |x, y| {
                let (dx, dy) = (x - cx, y - cy);
                let distance = (dx * dx + dy * dy).sqrt();
                distance >= inner
                    && distance <= outer
                    && within_sweep(dx, dy, start_angle, sweep_angle)
            },
        );
    }

    fn request_redraw(&mut self) {
        self.inner.borrow_mut().redraw_requested = true;
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_within_sweep() {
        // Straight up is -90 degrees on screen
        assert!(within_sweep(0.0, -1.0, -90.0, 10.0));
        // Right half, clockwise from 12 o'clock to 6 o'clock
        assert!(within_sweep(1.0, 0.0, -90.0, 180.0));
        assert!(!within_sweep(-1.0, 0.0, -90.0, 180.0));
        assert!(within_sweep(-1.0, 0.0, -90.0, 360.0));
        assert!(!within_sweep(1.0, 0.0, -90.0, 0.0));
    }

    #[test]
    fn test_measure_starts_new_frame() {
        let mut surface = CanvasSurface::new(Rgba::BLACK, 3);
        surface.measure(150.0, 30.0);
        surface.draw_circle(15.0, 15.0, 15.0, Rgba::WHITE);
        assert!(surface.point_count() > 0);

        surface.measure(150.0, 30.0);
        assert_eq!(surface.point_count(), 0);
    }

    #[test]
    fn test_transparent_shapes_are_skipped() {
        let mut surface = CanvasSurface::new(Rgba::BLACK, 3);
        surface.measure(30.0, 30.0);
        surface.draw_circle(15.0, 15.0, 15.0, Rgba::TRANSPARENT);
        assert_eq!(surface.point_count(), 0);
    }

    #[test]
    fn test_half_pie_covers_half_the_disc() {
        let mut surface = CanvasSurface::new(Rgba::BLACK, 3);
        surface.measure(30.0, 30.0);
        let bounds = ArcBounds {
            left: 0.0,
            top: 0.0,
            right: 30.0,
            bottom: 30.0,
        };
        surface.draw_arc(bounds, -90.0, 360.0, true, Rgba::WHITE, 1.0);
        let full = surface.point_count();

        surface.measure(30.0, 30.0);
        surface.draw_arc(bounds, -90.0, 180.0, true, Rgba::WHITE, 1.0);
        let half = surface.point_count();

        assert!(half * 2 >= full - 4 && half * 2 <= full + 4, "{half} vs {full}");
    }

    #[test]
    fn test_redraw_flag() {
        let mut surface = CanvasSurface::new(Rgba::BLACK, 3);
        assert!(surface.take_redraw());
        assert!(!surface.take_redraw());
        surface.request_redraw();
        assert!(surface.take_redraw());
    }

    #[test]
    fn test_columns_keep_dots_round() {
        let surface = CanvasSurface::new(Rgba::BLACK, 3);
        assert_eq!(surface.columns_for(150.0, 30.0), 30);
    }
}
