// SPDX-License-Identifier: MIT OR Apache-2.0
//! Timeline snapshot input model.
//!
//! The host hands the exporter a fully-materialized snapshot of its
//! timeline: a flat list of entries with frame positions, source offsets,
//! and media paths. The snapshot is a plain value - the engine never reads
//! live editor state.

use crate::rate::FrameRate;
use serde::{Deserialize, Serialize};
use std::ffi::OsStr;
use std::path::Path;
use uuid::Uuid;

/// Unique identifier for a timeline entry
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub struct EntryId(pub Uuid);

impl EntryId {
    /// Create a new random entry ID
    pub fn new() -> Self {
        Self(Uuid::new_v4())
    }
}

impl Default for EntryId {
    fn default() -> Self {
        Self::new()
    }
}

/// What a timeline entry is.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub enum EntryKind {
    /// A video clip
    Movie,
    /// An audio clip
    Sound,
    /// A cross-dissolve bridging two movie entries
    Transition {
        /// The outgoing clip.
        from: EntryId,
        /// The incoming clip.
        to: EntryId,
    },
}

/// One entry of the timeline snapshot.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct TimelineEntry {
    /// Unique entry ID
    pub id: EntryId,
    /// Entry kind
    pub kind: EntryKind,
    /// Channel (track lane) index; higher channels sit on top
    pub channel: u32,
    /// Timeline position in frames
    pub timeline_start: i64,
    /// Length on the timeline in frames
    pub duration: i64,
    /// Offset into the source media in frames
    pub source_offset: i64,
    /// Total source media length in frames
    pub source_duration: i64,
    /// Path of the source media file; empty for entries without media
    pub media_path: String,
}

impl TimelineEntry {
    /// Create a movie entry.
    pub fn movie(
        channel: u32,
        timeline_start: i64,
        duration: i64,
        source_offset: i64,
        media_path: impl Into<String>,
    ) -> Self {
        Self::with_kind(EntryKind::Movie, channel, timeline_start, duration, source_offset, media_path)
    }

    /// Create a sound entry.
    pub fn sound(
        channel: u32,
        timeline_start: i64,
        duration: i64,
        source_offset: i64,
        media_path: impl Into<String>,
    ) -> Self {
        Self::with_kind(EntryKind::Sound, channel, timeline_start, duration, source_offset, media_path)
    }

    /// Create a cross-dissolve entry bridging `from` and `to`.
    pub fn transition(
        channel: u32,
        timeline_start: i64,
        duration: i64,
        from: EntryId,
        to: EntryId,
    ) -> Self {
        Self::with_kind(EntryKind::Transition { from, to }, channel, timeline_start, duration, 0, "")
    }

    fn with_kind(
        kind: EntryKind,
        channel: u32,
        timeline_start: i64,
        duration: i64,
        source_offset: i64,
        media_path: impl Into<String>,
    ) -> Self {
        Self {
            id: EntryId::new(),
            kind,
            channel,
            timeline_start,
            duration,
            source_offset,
            source_duration: duration,
            media_path: media_path.into(),
        }
    }

    /// Frame just past the last timeline frame of this entry.
    pub fn timeline_end(&self) -> i64 {
        self.timeline_start + self.duration
    }

    /// Source-media frame just past the portion used on the timeline.
    pub fn source_end(&self) -> i64 {
        self.source_offset + self.duration
    }

    /// Filename (with extension) of the source media, for clip-name
    /// comments.
    pub fn file_name(&self) -> &str {
        Path::new(&self.media_path)
            .file_name()
            .and_then(OsStr::to_str)
            .unwrap_or("")
    }

    /// Filename without extension, used as the reel name.
    pub fn reel_stem(&self) -> &str {
        Path::new(&self.media_path)
            .file_stem()
            .and_then(OsStr::to_str)
            .unwrap_or("")
    }
}

/// A fully-materialized, immutable view of the host timeline.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct TimelineSnapshot {
    /// Project frame rate as a rational.
    pub frame_rate: FrameRate,
    /// All timeline entries, in no particular order.
    pub entries: Vec<TimelineEntry>,
}

impl TimelineSnapshot {
    /// Create an empty snapshot at the given frame rate.
    pub fn new(frame_rate: FrameRate) -> Self {
        Self { frame_rate, entries: Vec::new() }
    }

    /// Add an entry and return its ID.
    pub fn add_entry(&mut self, entry: TimelineEntry) -> EntryId {
        let id = entry.id;
        self.entries.push(entry);
        id
    }

    /// Look up an entry by ID.
    pub fn entry(&self, id: EntryId) -> Option<&TimelineEntry> {
        self.entries.iter().find(|entry| entry.id == id)
    }

    /// Highest channel index present, or 0 for an empty snapshot.
    pub fn max_channel(&self) -> u32 {
        self.entries.iter().map(|entry| entry.channel).max().unwrap_or(0)
    }

    /// Entries in sequencing order: higher channels first, ascending
    /// timeline start within a channel.
    ///
    /// Grouping each channel contiguously is what lets the sequencer close
    /// one output file per channel as it walks the list.
    pub fn sorted_entries(&self) -> Vec<&TimelineEntry> {
        let mut ordered: Vec<&TimelineEntry> = self.entries.iter().collect();
        ordered.sort_by(|a, b| {
            b.channel
                .cmp(&a.channel)
                .then(a.timeline_start.cmp(&b.timeline_start))
        });
        ordered
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_sorted_entries_channel_major() {
        let mut snapshot = TimelineSnapshot::new(FrameRate::whole(24));
        snapshot.add_entry(TimelineEntry::movie(1, 0, 100, 0, "low_a.mov"));
        snapshot.add_entry(TimelineEntry::movie(2, 50, 100, 0, "top.mov"));
        snapshot.add_entry(TimelineEntry::movie(1, 100, 100, 0, "low_b.mov"));

        let order: Vec<&str> = snapshot
            .sorted_entries()
            .iter()
            .map(|entry| entry.file_name())
            .collect();
        assert_eq!(order, ["top.mov", "low_a.mov", "low_b.mov"]);
    }

    #[test]
    fn test_sorted_entries_stable_on_equal_start() {
        let mut snapshot = TimelineSnapshot::new(FrameRate::whole(24));
        let first = snapshot.add_entry(TimelineEntry::movie(1, 10, 5, 0, "first.mov"));
        let second = snapshot.add_entry(TimelineEntry::movie(1, 10, 5, 0, "second.mov"));

        let order: Vec<EntryId> = snapshot.sorted_entries().iter().map(|entry| entry.id).collect();
        assert_eq!(order, [first, second]);
    }

    #[test]
    fn test_media_names() {
        let entry = TimelineEntry::movie(1, 0, 10, 0, "/footage/day_01/shot_a.mov");
        assert_eq!(entry.file_name(), "shot_a.mov");
        assert_eq!(entry.reel_stem(), "shot_a");

        let empty = TimelineEntry::movie(1, 0, 10, 0, "");
        assert_eq!(empty.file_name(), "");
        assert_eq!(empty.reel_stem(), "");
    }

    #[test]
    fn test_entry_windows() {
        let entry = TimelineEntry::movie(1, 100, 50, 25, "a.mov");
        assert_eq!(entry.timeline_end(), 150);
        assert_eq!(entry.source_end(), 75);
    }

    #[test]
    fn test_entry_lookup() {
        let mut snapshot = TimelineSnapshot::new(FrameRate::whole(25));
        let id = snapshot.add_entry(TimelineEntry::sound(1, 0, 10, 0, "a.wav"));
        assert!(snapshot.entry(id).is_some());
        assert!(snapshot.entry(EntryId::new()).is_none());
    }

    #[test]
    fn test_max_channel() {
        let mut snapshot = TimelineSnapshot::new(FrameRate::whole(25));
        assert_eq!(snapshot.max_channel(), 0);
        snapshot.add_entry(TimelineEntry::movie(3, 0, 10, 0, "a.mov"));
        snapshot.add_entry(TimelineEntry::sound(1, 0, 10, 0, "a.wav"));
        assert_eq!(snapshot.max_channel(), 3);
    }
}
