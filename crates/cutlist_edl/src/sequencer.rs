// SPDX-License-Identifier: MIT OR Apache-2.0
//! Timeline sequencing: walks a sorted snapshot and emits ordered EDL
//! records, one file per channel per medium.
//!
//! The video pass turns movie entries into cut records and cross-dissolve
//! entries into the CMX two-row transition form (an outgoing zero-duration
//! marker row followed by the dissolve row, sharing one event number). The
//! audio pass emits cut records for sound entries. Both passes walk the
//! same channel-major ordering and restart event numbering per output file.

use crate::error::{ExportWarning, SkipReason};
use crate::record::{Edl, EdlBlock, Medium, TransitionKind};
use crate::timecode::Timecode;
use crate::timeline::{EntryId, EntryKind, TimelineEntry, TimelineSnapshot};
use indexmap::IndexMap;

/// The records for one output file: one channel of one medium.
#[derive(Debug, Clone)]
pub struct TrackEdl {
    /// Medium of every record in the file.
    pub medium: Medium,
    /// Source channel index in the snapshot.
    pub channel: u32,
    /// 1-based distance from the top channel; forms the `_V_01`-style file
    /// suffix.
    pub track_number: u32,
    /// The records, ready to render.
    pub edl: Edl,
}

/// Everything the sequencer produced for one snapshot.
#[derive(Debug, Clone)]
pub struct SequencerOutput {
    /// Planned output files: video tracks first (top channel down), then
    /// audio tracks.
    pub files: Vec<TrackEdl>,
    /// Entries that had to be skipped, with the reason.
    pub warnings: Vec<ExportWarning>,
}

/// Per-file accumulation state: the block list plus the event id counter.
/// Never shared across channel or medium boundaries.
struct EdlBuilder {
    blocks: Vec<EdlBlock>,
    next_id: u32,
}

impl EdlBuilder {
    fn new() -> Self {
        Self { blocks: Vec::new(), next_id: 1 }
    }

    /// Append a single-record event.
    fn push(&mut self, mut block: EdlBlock) {
        block.id = self.next_id;
        self.next_id += 1;
        self.blocks.push(block);
    }

    /// Append a transition pair. Both rows carry the same event number.
    fn push_pair(&mut self, mut outgoing: EdlBlock, mut dissolve: EdlBlock) {
        outgoing.id = self.next_id;
        dissolve.id = self.next_id;
        self.next_id += 1;
        self.blocks.push(outgoing);
        self.blocks.push(dissolve);
    }

    fn finish(self) -> Vec<EdlBlock> {
        self.blocks
    }
}

/// Sequence a snapshot into per-channel EDLs.
///
/// `fps` must already have passed [`crate::rate::FrameRate::validate`];
/// `base_name` is the output file stem the per-track titles are derived
/// from. Pure function: no I/O.
pub fn sequence_timeline(
    snapshot: &TimelineSnapshot,
    fps: u32,
    base_name: &str,
) -> SequencerOutput {
    let ordered = snapshot.sorted_entries();
    let max_channel = snapshot.max_channel();

    // Group the ordering by channel. Insertion order follows the sort, so
    // iterating the map visits channels top-down.
    let mut channels: IndexMap<u32, Vec<&TimelineEntry>> = IndexMap::new();
    for entry in ordered {
        channels.entry(entry.channel).or_default().push(entry);
    }

    let mut files = Vec::new();
    let mut warnings = Vec::new();

    for medium in [Medium::Video, Medium::Audio] {
        for (&channel, entries) in &channels {
            let blocks = match medium {
                Medium::Video => video_channel_blocks(snapshot, entries, fps, &mut warnings),
                Medium::Audio => audio_channel_blocks(entries, fps),
            };
            if blocks.is_empty() {
                continue;
            }

            let track_number = max_channel - channel + 1;
            let title = format!("{base_name}_{}_{track_number:02}", medium.as_edl());
            let mut edl = Edl::new(title, fps);
            for block in blocks {
                edl.push(block);
            }
            files.push(TrackEdl { medium, channel, track_number, edl });
        }
    }

    SequencerOutput { files, warnings }
}

/// Video pass over one channel: cuts for plain movies, marker + dissolve
/// pairs for transitions. The movie following a successful transition is
/// consumed by the pair and not emitted again on its own turn.
fn video_channel_blocks(
    snapshot: &TimelineSnapshot,
    entries: &[&TimelineEntry],
    fps: u32,
    warnings: &mut Vec<ExportWarning>,
) -> Vec<EdlBlock> {
    let mut builder = EdlBuilder::new();
    let mut consumed = false;

    for (index, entry) in entries.iter().enumerate() {
        match entry.kind {
            EntryKind::Sound => {}
            EntryKind::Movie => {
                if consumed {
                    consumed = false;
                    continue;
                }
                builder.push(cut_block(Medium::Video, entry, fps));
            }
            EntryKind::Transition { from, to } => {
                match dissolve_pair(snapshot, entries, index, from, to, fps) {
                    Ok((outgoing, dissolve)) => {
                        builder.push_pair(outgoing, dissolve);
                        consumed = true;
                    }
                    Err(reason) => warnings.push(ExportWarning::SkippedTransition {
                        entry: entry.id,
                        channel: entry.channel,
                        reason,
                    }),
                }
            }
        }
    }

    builder.finish()
}

/// Audio pass over one channel: sound entries become cut records. Dissolves
/// are a video-only concept here.
fn audio_channel_blocks(entries: &[&TimelineEntry], fps: u32) -> Vec<EdlBlock> {
    let mut builder = EdlBuilder::new();
    for entry in entries {
        if entry.kind == EntryKind::Sound {
            builder.push(cut_block(Medium::Audio, entry, fps));
        }
    }
    builder.finish()
}

/// A plain cut record for one clip.
fn cut_block(medium: Medium, entry: &TimelineEntry, fps: u32) -> EdlBlock {
    EdlBlock {
        id: 0, // assigned by the builder
        reel: entry.reel_stem().to_string(),
        medium,
        transition: TransitionKind::Cut,
        src_in: Timecode::from_frames(entry.source_offset, fps),
        src_out: Timecode::from_frames(entry.source_end(), fps),
        rec_in: Timecode::from_frames(entry.timeline_start, fps),
        rec_out: Timecode::from_frames(entry.timeline_end(), fps),
        from_clip: entry.file_name().to_string(),
        to_clip: None,
    }
}

/// Build the two rows of a cross-dissolve event, or the reason it cannot be
/// resolved.
///
/// The outgoing row is a zero-duration marker (`srcIn == srcOut`,
/// `recIn == recOut`) that records the outgoing reel ahead of the dissolve;
/// its source side comes from the entry preceding the transition in
/// iteration order, its record side from the end of the transition's
/// outgoing input.
fn dissolve_pair(
    snapshot: &TimelineSnapshot,
    entries: &[&TimelineEntry],
    index: usize,
    from: EntryId,
    to: EntryId,
    fps: u32,
) -> Result<(EdlBlock, EdlBlock), SkipReason> {
    let transition = entries[index];
    let previous = index
        .checked_sub(1)
        .and_then(|i| entries.get(i))
        .ok_or(SkipReason::NoPrecedingClip)?;
    let following = entries.get(index + 1).ok_or(SkipReason::NoFollowingClip)?;
    if following.kind != EntryKind::Movie {
        return Err(SkipReason::NoFollowingClip);
    }
    let from_entry = snapshot.entry(from).ok_or(SkipReason::MissingInput(from))?;
    let to_entry = snapshot.entry(to).ok_or(SkipReason::MissingInput(to))?;

    let source_mark = Timecode::from_frames(previous.source_end(), fps);
    let record_mark = Timecode::from_frames(from_entry.timeline_end(), fps);
    let outgoing = EdlBlock {
        id: 0,
        reel: from_entry.reel_stem().to_string(),
        medium: Medium::Video,
        transition: TransitionKind::Cut,
        src_in: source_mark,
        src_out: source_mark,
        rec_in: record_mark,
        rec_out: record_mark,
        from_clip: String::new(),
        to_clip: None,
    };

    let dissolve = EdlBlock {
        id: 0,
        reel: to_entry.reel_stem().to_string(),
        medium: Medium::Video,
        transition: TransitionKind::Dissolve { frames: transition.duration },
        src_in: Timecode::from_frames(following.source_offset - transition.duration, fps),
        src_out: Timecode::from_frames(following.source_end(), fps),
        rec_in: Timecode::from_frames(transition.timeline_start, fps),
        rec_out: Timecode::from_frames(following.timeline_end(), fps),
        from_clip: from_entry.file_name().to_string(),
        to_clip: Some(to_entry.file_name().to_string()),
    };

    Ok((outgoing, dissolve))
}
