#![forbid(unsafe_code)]

//! Test harness for zoomlist: a recording canvas, a fake list host, and
//! deterministic JSONL touch-trace replay.

pub mod canvas;
pub mod cli;
pub mod error;
pub mod host;
pub mod trace;

pub use canvas::{CanvasOp, Matrix, RecordingCanvas};
pub use error::{HarnessError, Result};
pub use host::ListHost;
pub use trace::{FrameRecord, ReplayOptions, ReplayReport, TraceStep, parse_trace, replay_trace};
