//! Annotation Record
//!
//! One labeled temporal interval in one video. Frame bounds are inclusive on
//! both ends, so an annotation covering frames [a, b] spans `b - a + 1` frames.

use serde::{Deserialize, Serialize};

/// Integer frame index. Signed so that gaps between annotations can go negative.
pub type FrameIndex = i64;

/// A labeled temporal interval
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(deny_unknown_fields)]
pub struct Annotation {
    /// Source video identifier
    pub filename: String,
    /// First frame of the interval (inclusive)
    pub start_frame: FrameIndex,
    /// Last frame of the interval (inclusive)
    pub end_frame: FrameIndex,
    pub start_seconds: f64,
    pub end_seconds: f64,
    /// Frame rate used to derive the frame bounds
    pub frames_per_second: f64,
    /// Action class label
    pub category: String,
}

impl Annotation {
    /// Number of frames covered, `end_frame - start_frame + 1`
    ///
    /// Saturates at the bounds of [`FrameIndex`] for extreme frame values.
    pub fn duration(&self) -> FrameIndex {
        self.end_frame
            .saturating_sub(self.start_frame)
            .saturating_add(1)
    }

    /// Whether `frame` falls within `[start_frame, end_frame]`
    pub fn contains_frame(&self, frame: FrameIndex) -> bool {
        self.start_frame <= frame && frame <= self.end_frame
    }

    /// Whether the two intervals share at least one frame
    pub fn overlaps(&self, other: &Annotation) -> bool {
        let ends_before_other_starts = self.end_frame < other.start_frame;
        let starts_after_other_ends = self.start_frame > other.end_frame;
        !(ends_before_other_starts || starts_after_other_ends)
    }
}
