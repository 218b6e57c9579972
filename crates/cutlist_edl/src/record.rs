// SPDX-License-Identifier: MIT OR Apache-2.0
//! EDL record model and text rendering.
//!
//! [`EdlBlock`] is one printable event row (plus its optional clip-name
//! comment); [`Edl`] is the ordered collection of blocks forming one output
//! file. The enums here are the closed internal forms; the fixed-width CMX
//! text codes only appear at the formatting boundary in [`Edl::render`].

use crate::timecode::Timecode;
use std::fmt::Write as _;

/// The medium a record belongs to. One EDL file carries a single medium.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Medium {
    /// Video track records (`V`)
    Video,
    /// Audio track records (`A`)
    Audio,
}

impl Medium {
    /// The CMX channel code for this medium.
    pub fn as_edl(&self) -> &'static str {
        match self {
            Self::Video => "V",
            Self::Audio => "A",
        }
    }
}

/// How a record transitions from the previous event.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum TransitionKind {
    /// Straight cut (`C`)
    Cut,
    /// Cross-dissolve (`D`) with its duration in frames
    Dissolve {
        /// Dissolve length in frames, rendered zero-padded to 3 digits
        frames: i64,
    },
}

impl TransitionKind {
    /// The CMX transition code for this kind.
    pub fn code(&self) -> &'static str {
        match self {
            Self::Cut => "C",
            Self::Dissolve { .. } => "D",
        }
    }

    /// The 3-character duration field: zero-padded frames for dissolves,
    /// blank for cuts.
    pub fn duration_field(&self) -> String {
        match self {
            Self::Cut => "   ".to_string(),
            Self::Dissolve { frames } => format!("{frames:03}"),
        }
    }
}

/// One printable EDL event row.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct EdlBlock {
    /// Event number, 1-based and sequential within one output file. The two
    /// rows of a dissolve pair share one number (CMX convention).
    pub id: u32,
    /// Source reel name; left-justified and truncated to 8 characters when
    /// rendered.
    pub reel: String,
    /// Channel code for the row.
    pub medium: Medium,
    /// Cut or dissolve.
    pub transition: TransitionKind,
    /// Source-media in point.
    pub src_in: Timecode,
    /// Source-media out point.
    pub src_out: Timecode,
    /// Record (timeline) in point.
    pub rec_in: Timecode,
    /// Record (timeline) out point.
    pub rec_out: Timecode,
    /// Media filename for the `FROM CLIP NAME` comment; empty suppresses
    /// the comment line.
    pub from_clip: String,
    /// Incoming media filename for the `TO CLIP NAME` comment on dissolves.
    pub to_clip: Option<String>,
}

/// An ordered sequence of blocks plus file-level metadata; corresponds to
/// exactly one output file.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Edl {
    /// Title line content.
    pub title: String,
    /// Drop-frame flag. The sequencer only produces non-drop files.
    pub dropframe: bool,
    /// Frame rate stamped into the title line.
    pub fps: u32,
    blocks: Vec<EdlBlock>,
}

impl Edl {
    /// Create an empty EDL for one output file.
    pub fn new(title: impl Into<String>, fps: u32) -> Self {
        Self {
            title: title.into(),
            dropframe: false,
            fps,
            blocks: Vec::new(),
        }
    }

    /// Append a block. Blocks must be appended in ascending id order.
    pub fn push(&mut self, block: EdlBlock) {
        self.blocks.push(block);
    }

    /// The blocks appended so far.
    pub fn blocks(&self) -> &[EdlBlock] {
        &self.blocks
    }

    /// Render the complete file text.
    ///
    /// Row layout (CMX 3600, as emitted by Premiere/Resolve):
    /// ```text
    /// 002  10_sec   V     D    012 00:00:02:20 00:00:04:19 01:00:02:20 01:00:04:19
    /// 111^^22222222^3333^^4444^555^66666666666^77777777777^88888888888^99999999999
    /// ```
    pub fn render(&self) -> String {
        let mut out = String::new();
        if !self.title.is_empty() {
            let _ = writeln!(out, "TITLE: {}  {} fps", self.title, self.fps);
        }
        if self.dropframe {
            out.push_str("FCM: DROP FRAME\n");
        } else {
            out.push_str("FCM: NON DROP FRAME\n\n");
        }

        for block in &self.blocks {
            let _ = writeln!(
                out,
                "{:03}  {:<8.8} {:<4}  {:<4} {:>3} {:<11} {:<11} {:<11} {:<11}",
                block.id,
                block.reel,
                block.medium.as_edl(),
                block.transition.code(),
                block.transition.duration_field(),
                block.src_in.to_string(),
                block.src_out.to_string(),
                block.rec_in.to_string(),
                block.rec_out.to_string(),
            );
            if !block.from_clip.is_empty() {
                let _ = writeln!(out, "* FROM CLIP NAME: {}", block.from_clip);
                if let Some(to_clip) = &block.to_clip {
                    let _ = writeln!(out, "* TO CLIP NAME: {to_clip}");
                }
                out.push('\n');
            }
        }
        out
    }
}
