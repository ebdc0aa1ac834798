#![forbid(unsafe_code)]

//! JSONL touch-trace replay.
//!
//! A trace is one step per line. Times are milliseconds from the start of the
//! replay, so a trace produces the same frames on every run.
//!
//! # JSONL Schema
//!
//! ```json
//! {"step":"resize","width":1000,"height":1000}
//! {"step":"enable","at_ms":0,"enabled":true}
//! {"step":"touch","at_ms":10,"event":{"phase":"down","pointers":[{"id":0,"x":200,"y":300}]}}
//! {"step":"tick","at_ms":16}
//! ```
//!
//! Each `tick` step advances the view, draws it onto a [`RecordingCanvas`],
//! and yields one [`FrameRecord`].

use std::io::BufRead;
use std::time::Duration;

use serde::{Deserialize, Serialize};
use tracing::{debug, info};
use web_time::Instant;
use zoomlist_core::config::ZoomConfig;
use zoomlist_core::event::TouchEvent;
use zoomlist_widgets::{TransformSnapshot, ZoomListView};

use crate::canvas::{Matrix, RecordingCanvas};
use crate::error::{HarnessError, Result};
use crate::host::ListHost;

/// One line of a trace.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(tag = "step", rename_all = "snake_case")]
pub enum TraceStep {
    Touch { at_ms: u64, event: TouchEvent },
    Tick { at_ms: u64 },
    Resize { width: f32, height: f32 },
    Enable { at_ms: u64, enabled: bool },
}

/// Snapshot emitted for each `tick` step.
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct FrameRecord {
    pub at_ms: u64,
    #[serde(flatten)]
    pub state: TransformSnapshot,
    /// Whether the view asked for another tick.
    pub running: bool,
    /// Matrix the list content was drawn with.
    pub content: Matrix,
    /// Host scroll offset at draw time.
    pub scroll_offset: f32,
}

/// Outcome of a full replay.
#[derive(Debug)]
pub struct ReplayReport {
    pub frames: Vec<FrameRecord>,
    /// Touch steps reported as handled by the view.
    pub handled_touches: usize,
    pub final_state: TransformSnapshot,
    pub invalidations: usize,
}

/// Host-side replay parameters.
#[derive(Debug, Clone)]
pub struct ReplayOptions {
    pub item_count: usize,
    pub item_height: f32,
}

impl Default for ReplayOptions {
    fn default() -> Self {
        Self {
            item_count: 200,
            item_height: 48.0,
        }
    }
}

/// Parse a JSONL trace. Blank lines are skipped.
pub fn parse_trace(reader: impl BufRead) -> Result<Vec<TraceStep>> {
    let mut steps = Vec::new();
    for (index, line) in reader.lines().enumerate() {
        let line = line?;
        let trimmed = line.trim();
        if trimmed.is_empty() {
            continue;
        }
        let step = serde_json::from_str(trimmed).map_err(|source| HarnessError::Trace {
            line: index + 1,
            source,
        })?;
        steps.push(step);
    }
    Ok(steps)
}

/// Replay `steps` against a fresh [`ListHost`] wrapped in a [`ZoomListView`].
pub fn replay_trace(
    steps: &[TraceStep],
    config: ZoomConfig,
    options: &ReplayOptions,
) -> Result<ReplayReport> {
    let host = ListHost::new(options.item_count, options.item_height);
    let mut view = ZoomListView::new(host, config)?;
    let origin = Instant::now();
    let at = |ms: u64| origin + Duration::from_millis(ms);

    let mut canvas = RecordingCanvas::new();
    let mut frames = Vec::new();
    let mut handled_touches = 0;

    info!(steps = steps.len(), "trace replay started");
    for step in steps {
        match step {
            TraceStep::Touch { at_ms, event } => {
                if view.on_touch_event(event, at(*at_ms)) {
                    handled_touches += 1;
                }
            }
            TraceStep::Tick { at_ms } => {
                let running = view.tick(at(*at_ms));
                canvas.clear();
                view.draw(&mut canvas);
                let content = canvas.content_matrix().unwrap_or_default();
                let frame = FrameRecord {
                    at_ms: *at_ms,
                    state: view.state().snapshot(),
                    running,
                    content,
                    scroll_offset: view.host().scroll_offset(),
                };
                debug!(at_ms, scale = frame.state.scale, running, "frame");
                frames.push(frame);
            }
            TraceStep::Resize { width, height } => {
                view.host_mut().set_viewport_height(*height);
                view.on_size_changed(*width, *height);
            }
            TraceStep::Enable { at_ms, enabled } => {
                view.set_zoom_enabled(*enabled, at(*at_ms));
            }
        }
    }
    info!(frames = frames.len(), handled_touches, "trace replay finished");

    Ok(ReplayReport {
        frames,
        handled_touches,
        final_state: view.state().snapshot(),
        invalidations: view.host().invalidations,
    })
}
