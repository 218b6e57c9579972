// SPDX-License-Identifier: MIT OR Apache-2.0
//! Export driver: validates the frame rate, sequences the snapshot, and
//! writes one `.edl` file per planned track.

use crate::error::{ExportError, ExportWarning};
use crate::sequencer::{sequence_timeline, TrackEdl};
use crate::timeline::TimelineSnapshot;
use std::ffi::OsStr;
use std::path::{Path, PathBuf};

/// What an export wrote and what it had to skip.
#[derive(Debug)]
pub struct ExportReport {
    /// Paths written, in emission order.
    pub written: Vec<PathBuf>,
    /// Warnings accumulated while sequencing.
    pub warnings: Vec<ExportWarning>,
}

/// Export a timeline snapshot to EDL files next to `base_path`.
///
/// `base_path` is the requested output path (e.g. `scene.edl`); each track
/// lands at `<stem>_V_<NN>.edl` / `<stem>_A_<NN>.edl` beside it. Writes are
/// blocking and happen in track order; on an I/O error the files already
/// written remain on disk and the error names the failing path.
pub fn export_timeline(
    snapshot: &TimelineSnapshot,
    base_path: &Path,
) -> Result<ExportReport, ExportError> {
    let fps = snapshot.frame_rate.validate()?;
    let base_name = base_stem(base_path);
    let output = sequence_timeline(snapshot, fps, base_name);

    for warning in &output.warnings {
        tracing::warn!("{warning}");
    }

    let mut written = Vec::with_capacity(output.files.len());
    for track in &output.files {
        let path = track_path(base_path, track);
        std::fs::write(&path, track.edl.render())
            .map_err(|source| ExportError::Write { path: path.clone(), source })?;
        tracing::info!("wrote {}", path.display());
        written.push(path);
    }

    Ok(ExportReport { written, warnings: output.warnings })
}

/// The requested output name without its extension; titles and file names
/// derive from it.
fn base_stem(base_path: &Path) -> &str {
    base_path
        .file_stem()
        .and_then(OsStr::to_str)
        .unwrap_or("untitled")
}

fn track_path(base_path: &Path, track: &TrackEdl) -> PathBuf {
    let name = format!(
        "{}_{}_{:02}.edl",
        base_stem(base_path),
        track.medium.as_edl(),
        track.track_number
    );
    base_path.with_file_name(name)
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::record::{Edl, Medium};

    #[test]
    fn test_track_path_naming() {
        let track = TrackEdl {
            medium: Medium::Audio,
            channel: 1,
            track_number: 3,
            edl: Edl::new("t", 24),
        };
        let path = track_path(Path::new("/out/scene.edl"), &track);
        assert_eq!(path, Path::new("/out/scene_A_03.edl"));
    }

    #[test]
    fn test_base_stem_fallback() {
        assert_eq!(base_stem(Path::new("/out/scene.edl")), "scene");
        assert_eq!(base_stem(Path::new("")), "untitled");
    }
}
