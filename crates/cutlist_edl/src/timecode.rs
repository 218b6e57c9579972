// SPDX-License-Identifier: MIT OR Apache-2.0
//! Frame-accurate timecode arithmetic.

use serde::{Deserialize, Serialize};
use std::fmt;
use std::ops::{Add, Mul, Neg, Sub};

/// Field separators accepted in `hh:mm:ss:ff` text.
const SEPARATORS: [char; 4] = [':', ';', ',', '.'];

/// A point or duration in frames, bound to one frame rate.
///
/// The canonical value is the signed total frame count returned by
/// [`Timecode::as_frames`]; the hours/minutes/seconds/frame decomposition is
/// derived from it. [`Timecode::parse`] may store a literal, non-normalized
/// decomposition (e.g. 75 frames in the frame field) - equality, arithmetic,
/// and display all go through the total frame count, so such values behave
/// identically to their normalized form.
///
/// Arithmetic operators return a new value at the left operand's frame rate;
/// mixing frame rates across operands is not checked.
#[derive(Debug, Clone, Copy, Serialize, Deserialize)]
pub struct Timecode {
    fps: u32,
    hours: i64,
    minutes: i64,
    seconds: i64,
    frame: i64,
}

impl Timecode {
    /// Decompose a signed frame count into a timecode at the given rate.
    ///
    /// Negative counts are decomposed on the absolute value with the sign
    /// reapplied to every field. `fps` must be positive.
    pub fn from_frames(frames: i64, fps: u32) -> Self {
        debug_assert!(fps > 0, "timecode frame rate must be positive");
        let fps_i = i64::from(fps);
        let frames_per_minute = 60 * fps_i;
        let frames_per_hour = 60 * frames_per_minute;

        let negative = frames < 0;
        let mut rem = frames.abs();

        let hours = rem / frames_per_hour;
        rem %= frames_per_hour;
        let minutes = rem / frames_per_minute;
        rem %= frames_per_minute;
        let seconds = rem / fps_i;
        let frame = rem % fps_i;

        if negative {
            Self {
                fps,
                hours: -hours,
                minutes: -minutes,
                seconds: -seconds,
                frame: -frame,
            }
        } else {
            Self { fps, hours, minutes, seconds, frame }
        }
    }

    /// Parse a timecode from the textual forms used by EDL files.
    ///
    /// Accepted shapes:
    /// - `hh:mm:ss:ff` with `:`, `;`, `,` or `.` as separators; the four
    ///   fields are taken literally, without renormalization
    /// - `<seconds>s` or `<seconds>mps`, seconds scaled by the frame rate
    ///   and truncated to whole frames
    /// - a bare digit string, read as a raw frame count
    ///
    /// Any other shape is reported with a warning and yields the zero
    /// timecode, so a malformed value never aborts an export.
    pub fn parse(text: &str, fps: u32) -> Self {
        let lower = text.to_ascii_lowercase();
        if let Some(seconds) = lower.strip_suffix("mps") {
            return Self::from_seconds_text(text, seconds, fps);
        }
        if let Some(seconds) = lower.strip_suffix('s') {
            return Self::from_seconds_text(text, seconds, fps);
        }
        if !text.is_empty() && text.bytes().all(|b| b.is_ascii_digit()) {
            // A digit run can still overflow i64.
            return match text.parse::<i64>() {
                Ok(frames) => Self::from_frames(frames, fps),
                Err(_) => Self::unparsable(text, fps),
            };
        }
        if text.contains(&SEPARATORS[..]) {
            let fields: Result<Vec<i64>, _> = text
                .split(&SEPARATORS[..])
                .map(|field| field.trim().parse::<i64>())
                .collect();
            if let Ok(fields) = fields {
                if let [hours, minutes, seconds, frame] = fields[..] {
                    return Self { fps, hours, minutes, seconds, frame };
                }
            }
        }
        Self::unparsable(text, fps)
    }

    fn from_seconds_text(full: &str, seconds: &str, fps: u32) -> Self {
        match seconds.trim().parse::<f64>() {
            Ok(value) => Self::from_frames((value * f64::from(fps)) as i64, fps),
            Err(_) => Self::unparsable(full, fps),
        }
    }

    fn unparsable(text: &str, fps: u32) -> Self {
        tracing::warn!("could not convert {text:?} into a timecode");
        Self::from_frames(0, fps)
    }

    /// The frame rate this timecode is bound to.
    pub fn fps(&self) -> u32 {
        self.fps
    }

    /// Total signed frame count.
    pub fn as_frames(&self) -> i64 {
        let fps = i64::from(self.fps);
        self.frame + self.seconds * fps + self.minutes * 60 * fps + self.hours * 3600 * fps
    }

    /// Absolute value.
    #[must_use]
    pub fn abs(self) -> Self {
        Self::from_frames(self.as_frames().abs(), self.fps)
    }
}

impl fmt::Display for Timecode {
    /// Renders as `hh:mm:ss:ff` after renormalizing from the total frame
    /// count. Hours grow past two digits for large values but are never
    /// printed with fewer.
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        let norm = Self::from_frames(self.as_frames(), self.fps);
        write!(
            f,
            "{:02}:{:02}:{:02}:{:02}",
            norm.hours, norm.minutes, norm.seconds, norm.frame
        )
    }
}

impl PartialEq for Timecode {
    fn eq(&self, other: &Self) -> bool {
        self.fps == other.fps && self.as_frames() == other.as_frames()
    }
}

impl Eq for Timecode {}

impl Add for Timecode {
    type Output = Self;

    fn add(self, rhs: Self) -> Self {
        Self::from_frames(self.as_frames() + rhs.as_frames(), self.fps)
    }
}

impl Sub for Timecode {
    type Output = Self;

    fn sub(self, rhs: Self) -> Self {
        Self::from_frames(self.as_frames() - rhs.as_frames(), self.fps)
    }
}

impl Mul for Timecode {
    type Output = Self;

    fn mul(self, rhs: Self) -> Self {
        Self::from_frames(self.as_frames() * rhs.as_frames(), self.fps)
    }
}

impl Neg for Timecode {
    type Output = Self;

    fn neg(self) -> Self {
        Self::from_frames(-self.as_frames(), self.fps)
    }
}
