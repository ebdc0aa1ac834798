use std::fs::File;
use std::io::{BufReader, Write};
use std::path::PathBuf;

use clap::Parser;
use zoomlist_core::config::ZoomConfig;

use crate::error::{HarnessError, Result};
use crate::trace::{ReplayOptions, parse_trace, replay_trace};

#[derive(Debug, Parser)]
#[command(
    name = "zoomlist-replay",
    about = "Replay a JSONL touch trace through a zoomable list and print one frame per tick",
    version
)]
pub struct Cli {
    /// Trace file, one JSON step per line.
    pub trace: PathBuf,

    /// Zoom configuration (TOML).
    #[arg(long)]
    pub config: Option<PathBuf>,

    /// Rows in the fake list.
    #[arg(long, default_value_t = 200)]
    pub items: usize,

    /// Row height in pixels.
    #[arg(long, default_value_t = 48.0)]
    pub item_height: f32,

    /// Print only the final state instead of every frame.
    #[arg(long)]
    pub summary: bool,
}

pub fn run_from_env() -> Result<()> {
    let cli = Cli::parse();
    let stdout = std::io::stdout();
    let mut out = stdout.lock();
    run(cli, &mut out)
}

pub fn run(cli: Cli, out: &mut dyn Write) -> Result<()> {
    if !cli.trace.exists() {
        return Err(HarnessError::MissingTrace { path: cli.trace });
    }
    let config = match &cli.config {
        Some(path) => ZoomConfig::from_toml_file(path)?,
        None => ZoomConfig::default(),
    };
    let steps = parse_trace(BufReader::new(File::open(&cli.trace)?))?;
    let options = ReplayOptions {
        item_count: cli.items,
        item_height: cli.item_height,
    };
    let report = replay_trace(&steps, config, &options)?;

    if cli.summary {
        let summary = serde_json::json!({
            "frames": report.frames.len(),
            "handled_touches": report.handled_touches,
            "invalidations": report.invalidations,
            "final": report.final_state,
        });
        writeln!(out, "{summary}")?;
    } else {
        for frame in &report.frames {
            writeln!(out, "{}", serde_json::to_string(frame)?)?;
        }
    }
    Ok(())
}

#[cfg(test)]
mod tests {
    use clap::CommandFactory;

    use super::*;

    #[test]
    fn cli_definition_is_consistent() {
        Cli::command().debug_assert();
    }

    #[test]
    fn parses_flags() {
        let cli = Cli::try_parse_from([
            "zoomlist-replay",
            "trace.jsonl",
            "--config",
            "zoom.toml",
            "--items",
            "10",
            "--summary",
        ])
        .unwrap();
        assert_eq!(cli.trace, PathBuf::from("trace.jsonl"));
        assert_eq!(cli.config, Some(PathBuf::from("zoom.toml")));
        assert_eq!(cli.items, 10);
        assert_eq!(cli.item_height, 48.0);
        assert!(cli.summary);
    }

    #[test]
    fn missing_trace_is_reported() {
        let cli = Cli::try_parse_from(["zoomlist-replay", "/nonexistent/trace.jsonl"]).unwrap();
        let mut out = Vec::new();
        let err = run(cli, &mut out).unwrap_err();
        assert!(matches!(err, HarnessError::MissingTrace { .. }));
        assert_eq!(err.exit_code(), 3);
    }
}
