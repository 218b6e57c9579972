// SPDX-License-Identifier: MIT OR Apache-2.0
//! cutlist - export a timeline snapshot as CMX 3600 EDL files.
//!
//! ## Usage
//!
//! ```bash
//! cutlist timeline.ron                     # writes timeline_V_01.edl ... beside the snapshot
//! cutlist timeline.json -o /cut/scene.edl  # choose the output base path
//! ```

use clap::Parser;
use cutlist_edl::{export_timeline, ExportError, TimelineSnapshot};
use std::ffi::OsStr;
use std::path::{Path, PathBuf};
use std::process::ExitCode;
use tracing_subscriber::layer::SubscriberExt;
use tracing_subscriber::util::SubscriberInitExt;

/// Export a timeline snapshot as CMX 3600 EDL files, one per channel per
/// medium
#[derive(Debug, Parser)]
#[command(name = "cutlist", version, about)]
struct Cli {
    /// Timeline snapshot file (.ron or .json)
    snapshot: PathBuf,

    /// Output base path; track files land beside it as `<stem>_V_NN.edl`
    /// and `<stem>_A_NN.edl` [default: the snapshot path with an .edl
    /// extension]
    #[arg(short, long)]
    output: Option<PathBuf>,
}

/// Errors surfaced to the user on exit.
#[derive(Debug, thiserror::Error)]
enum CliError {
    /// Snapshot file could not be read
    #[error("failed to read {}: {source}", path.display())]
    Read {
        /// Snapshot path.
        path: PathBuf,
        /// Underlying I/O error.
        source: std::io::Error,
    },

    /// Snapshot file could not be parsed
    #[error("failed to parse {}: {message}", path.display())]
    Parse {
        /// Snapshot path.
        path: PathBuf,
        /// Deserializer message.
        message: String,
    },

    /// Export failed
    #[error(transparent)]
    Export(#[from] ExportError),
}

fn main() -> ExitCode {
    let env_filter = tracing_subscriber::EnvFilter::from_default_env()
        .add_directive("cutlist_cli=info".parse().unwrap())
        .add_directive("cutlist_edl=info".parse().unwrap());

    tracing_subscriber::registry()
        .with(env_filter)
        .with(tracing_subscriber::fmt::layer())
        .init();

    match run(Cli::parse()) {
        Ok(()) => ExitCode::SUCCESS,
        Err(e) => {
            eprintln!("Error: {e}");
            ExitCode::FAILURE
        }
    }
}

fn run(cli: Cli) -> Result<(), CliError> {
    let content = std::fs::read_to_string(&cli.snapshot).map_err(|source| CliError::Read {
        path: cli.snapshot.clone(),
        source,
    })?;
    let snapshot = parse_snapshot(&cli.snapshot, &content)?;

    let base_path = cli
        .output
        .unwrap_or_else(|| cli.snapshot.with_extension("edl"));
    let report = export_timeline(&snapshot, &base_path)?;

    tracing::info!(
        "exported {} file(s) with {} warning(s)",
        report.written.len(),
        report.warnings.len()
    );
    Ok(())
}

/// Deserialize a snapshot: JSON for `.json` files, RON otherwise.
fn parse_snapshot(path: &Path, content: &str) -> Result<TimelineSnapshot, CliError> {
    let parsed = match path.extension().and_then(OsStr::to_str) {
        Some("json") => serde_json::from_str(content).map_err(|e| e.to_string()),
        _ => ron::from_str(content).map_err(|e| e.to_string()),
    };
    parsed.map_err(|message| CliError::Parse { path: path.to_path_buf(), message })
}

#[cfg(test)]
mod tests {
    use super::*;
    use cutlist_edl::EntryKind;

    #[test]
    fn test_parse_ron_snapshot() {
        let content = r#"(
            frame_rate: (num: 25, den: 1),
            entries: [
                (
                    id: ("67e55044-10b1-426f-9247-bb680e5fe0c8"),
                    kind: Movie,
                    channel: 1,
                    timeline_start: 0,
                    duration: 100,
                    source_offset: 0,
                    source_duration: 100,
                    media_path: "a.mov",
                ),
            ],
        )"#;
        let snapshot = parse_snapshot(Path::new("t.ron"), content).unwrap();
        assert_eq!(snapshot.entries.len(), 1);
        assert_eq!(snapshot.entries[0].kind, EntryKind::Movie);
        assert_eq!(snapshot.frame_rate.validate().unwrap(), 25);
    }

    #[test]
    fn test_parse_json_snapshot() {
        let content = r#"{
            "frame_rate": {"num": 24, "den": 1},
            "entries": [{
                "id": "67e55044-10b1-426f-9247-bb680e5fe0c8",
                "kind": "Sound",
                "channel": 1,
                "timeline_start": 0,
                "duration": 48,
                "source_offset": 0,
                "source_duration": 48,
                "media_path": "mix.wav"
            }]
        }"#;
        let snapshot = parse_snapshot(Path::new("t.json"), content).unwrap();
        assert_eq!(snapshot.entries[0].kind, EntryKind::Sound);
    }

    #[test]
    fn test_parse_error_names_the_file() {
        let err = parse_snapshot(Path::new("broken.ron"), "not a snapshot").unwrap_err();
        assert!(err.to_string().contains("broken.ron"));
    }
}
