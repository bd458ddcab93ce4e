use std::io::{self, Write};
use std::time::{Duration, Instant};

use anyhow::{bail, Result};
use serde::Serialize;
use tracing::info;

use dotindicator_core::{AppConfig, Snapshot};
use dotindicator_tui::{input::Action, App};

pub struct SimulateOptions {
    pub seconds: f64,
    pub fps: u32,
    /// Millisecond offset at which the carousel is grabbed
    pub hold_at: Option<u64>,
    pub hold_for: u64,
}

/// One output line
#[derive(Serialize)]
struct FrameRecord<'a> {
    t_ms: u64,
    page: usize,
    carousel_position: Option<f64>,
    timeouts: usize,
    inner_arc: Option<(f64, f64)>,
    #[serde(flatten)]
    snapshot: &'a Snapshot,
}

/// Drive the demo on a synthetic clock, as fast as it can print
pub fn run(config: &AppConfig, options: &SimulateOptions) -> Result<()> {
    if options.fps == 0 {
        bail!("fps must be positive");
    }
    if !options.seconds.is_finite() || options.seconds < 0.0 {
        bail!("seconds must be a non-negative number");
    }

    let t0 = Instant::now();
    let mut app = App::new(config, t0);
    let frame_ms = 1000.0 / options.fps as f64;
    let frames = (options.seconds * options.fps as f64).ceil() as u64;
    let hold = options
        .hold_at
        .map(|start| (start, start + options.hold_for));
    let mut holding = false;

    let stdout = io::stdout();
    let mut out = stdout.lock();

    for frame in 0..=frames {
        let t_ms = (frame as f64 * frame_ms).round() as u64;
        let now = t0 + Duration::from_millis(t_ms);

        if let Some((start, end)) = hold {
            if !holding && t_ms >= start && t_ms < end {
                app.on_action(Action::ToggleHold, now);
                holding = true;
            } else if holding && t_ms >= end {
                app.on_action(Action::ToggleHold, now);
                holding = false;
            }
        }

        app.on_tick(now);

        let snapshot = app.indicator.snapshot();
        let focused = snapshot.state.focused_page;
        let record = FrameRecord {
            t_ms,
            page: app.current_page(),
            carousel_position: app.carousel.as_ref().map(|c| c.position()),
            timeouts: app.timeouts(),
            inner_arc: app
                .indicator
                .frame()
                .dot(focused)
                .and_then(|dot| dot.inner_arc())
                .map(|(start, sweep, _)| (start, sweep)),
            snapshot: &snapshot,
        };
        serde_json::to_writer(&mut out, &record)?;
        writeln!(out)?;
    }

    app.shutdown();
    info!(frames, timeouts = app.timeouts(), "Simulation finished");
    Ok(())
}
