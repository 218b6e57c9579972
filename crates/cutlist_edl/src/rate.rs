// SPDX-License-Identifier: MIT OR Apache-2.0
//! Frame-rate validation.
//!
//! The EDL text format carries no per-record frame rate; the chosen rate
//! governs every timecode string in a file, so an unsupported rate is
//! rejected before any synthesis or I/O happens.

use crate::error::ExportError;
use serde::{Deserialize, Serialize};

/// Frame rates the exporter accepts. Drop-frame rates (23.976, 29.97,
/// 59.94, ...) are out of scope.
pub const SUPPORTED_RATES: [u32; 4] = [24, 25, 30, 60];

/// A project frame rate as the host expresses it: a rational
/// numerator/denominator pair (e.g. 30000/1001 for 29.97).
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub struct FrameRate {
    /// Frames-per-second numerator.
    pub num: u32,
    /// Frames-per-second denominator.
    pub den: u32,
}

impl FrameRate {
    /// Create a rational frame rate.
    pub fn new(num: u32, den: u32) -> Self {
        Self { num, den }
    }

    /// Create a whole-number frame rate.
    pub fn whole(fps: u32) -> Self {
        Self { num: fps, den: 1 }
    }

    /// The decimal rate, rounded to 3 places.
    pub fn as_fps(&self) -> f64 {
        (self.num as f64 / self.den as f64 * 1000.0).round() / 1000.0
    }

    /// Gate for export: returns the integer rate when it is one of
    /// [`SUPPORTED_RATES`], otherwise the fatal configuration error
    /// carrying the rejected value.
    pub fn validate(&self) -> Result<u32, ExportError> {
        let fps = self.as_fps();
        if fps.fract() == 0.0 && fps > 0.0 && SUPPORTED_RATES.contains(&(fps as u32)) {
            Ok(fps as u32)
        } else {
            Err(ExportError::UnsupportedFrameRate { fps })
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_supported_whole_rates() {
        for fps in SUPPORTED_RATES {
            assert_eq!(FrameRate::whole(fps).validate().unwrap(), fps);
        }
    }

    #[test]
    fn test_ntsc_rate_rejected() {
        let err = FrameRate::new(30000, 1001).validate().unwrap_err();
        match err {
            ExportError::UnsupportedFrameRate { fps } => assert_eq!(fps, 29.97),
            other => panic!("unexpected error: {other}"),
        }
    }

    #[test]
    fn test_unsupported_whole_rate_rejected() {
        assert!(FrameRate::whole(23).validate().is_err());
        assert!(FrameRate::whole(120).validate().is_err());
        assert!(FrameRate::new(25, 2).validate().is_err());
    }

    #[test]
    fn test_rational_reduction() {
        assert_eq!(FrameRate::new(48, 2).validate().unwrap(), 24);
        assert_eq!(FrameRate::new(30000, 1001).as_fps(), 29.97);
    }
}
