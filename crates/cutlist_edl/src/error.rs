// SPDX-License-Identifier: MIT OR Apache-2.0
//! Error and warning types for EDL export.

use crate::timeline::EntryId;
use std::path::PathBuf;
use thiserror::Error;

/// Errors that abort an export.
#[derive(Debug, Error)]
pub enum ExportError {
    /// The project frame rate is outside the EDL-supported set. Raised
    /// before any file is touched.
    #[error("frame rate '{fps}' not supported by EDL, change to 24, 25, 30, 60")]
    UnsupportedFrameRate {
        /// The rejected rate, rounded to 3 places.
        fps: f64,
    },

    /// Writing an output file failed. Files written before the failure
    /// remain on disk.
    #[error("failed to write {}: {source}", path.display())]
    Write {
        /// Path of the file that could not be written.
        path: PathBuf,
        /// Underlying I/O error.
        source: std::io::Error,
    },
}

/// Why a transition entry was skipped during sequencing.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Error)]
pub enum SkipReason {
    /// No entry precedes the transition on its channel.
    #[error("no clip precedes the transition on its channel")]
    NoPrecedingClip,

    /// No movie entry follows the transition on its channel.
    #[error("no movie clip follows the transition on its channel")]
    NoFollowingClip,

    /// A transition input references an entry that is not in the snapshot.
    #[error("transition input {0:?} is not in the snapshot")]
    MissingInput(EntryId),
}

/// Recoverable conditions noted while sequencing. One bad entry degrades
/// output locally instead of aborting the export.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Error)]
pub enum ExportWarning {
    /// A transition could not resolve its neighbors and was left out of the
    /// emitted records.
    #[error("skipped transition {entry:?} on channel {channel}: {reason}")]
    SkippedTransition {
        /// The transition entry that was skipped.
        entry: EntryId,
        /// The channel it sits on.
        channel: u32,
        /// What could not be resolved.
        reason: SkipReason,
    },
}
