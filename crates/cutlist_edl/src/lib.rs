// SPDX-License-Identifier: MIT OR Apache-2.0
//! CMX-3600 EDL synthesis for cutlist.
//!
//! This crate turns a multi-track timeline snapshot into Edit Decision
//! List text files, one per channel per medium:
//! - Frame-accurate timecode arithmetic
//! - EDL record model with fixed-width text rendering
//! - Frame-rate validation against the EDL-supported set
//! - Timeline sequencing with cross-dissolve pairing
//! - Channel partitioning into `_V_NN` / `_A_NN` output files
//!
//! ## Architecture
//!
//! The engine is a single synchronous pass: [`FrameRate::validate`] gates
//! entry, [`sequence_timeline`] walks the sorted snapshot once and produces
//! one [`Edl`] per exportable channel, and [`export_timeline`] renders and
//! writes each of them. Per-entry problems (an unresolvable transition, an
//! unparsable timecode string) degrade output locally and surface as
//! warnings; only an unsupported frame rate or an I/O failure aborts.

pub mod error;
pub mod export;
pub mod rate;
pub mod record;
pub mod sequencer;
pub mod timecode;
pub mod timeline;

pub use error::{ExportError, ExportWarning, SkipReason};
pub use export::{export_timeline, ExportReport};
pub use rate::{FrameRate, SUPPORTED_RATES};
pub use record::{Edl, EdlBlock, Medium, TransitionKind};
pub use sequencer::{sequence_timeline, SequencerOutput, TrackEdl};
pub use timecode::Timecode;
pub use timeline::{EntryId, EntryKind, TimelineEntry, TimelineSnapshot};
