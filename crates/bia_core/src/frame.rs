//! Frame ranges.

use std::ops::RangeInclusive;

use serde::{Deserialize, Serialize};

/// Lowest frame number the host accepts for a bake bound.
pub const FRAME_MIN: i32 = -1_000_000;
/// Highest frame number the host accepts for a bake bound.
pub const FRAME_MAX: i32 = 1_000_000;

/// A closed frame interval `[start, end]`.
///
/// A reversed range (`start > end`) is not an error: it simply contains no
/// frames, since frames are only ever walked forward.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub struct FrameRange {
    pub start: i32,
    pub end: i32,
}

impl FrameRange {
    #[inline]
    #[must_use]
    pub const fn new(start: i32, end: i32) -> Self {
        Self { start, end }
    }

    /// Frames in ascending order.
    #[inline]
    #[must_use]
    pub fn frames(&self) -> RangeInclusive<i32> {
        self.start..=self.end
    }

    /// Number of frames visited when walking the range.
    #[must_use]
    pub fn len(&self) -> usize {
        if self.start > self.end {
            0
        } else {
            (i64::from(self.end) - i64::from(self.start) + 1) as usize
        }
    }

    #[inline]
    #[must_use]
    pub fn is_empty(&self) -> bool {
        self.start > self.end
    }

    #[inline]
    #[must_use]
    pub fn contains(&self, frame: i32) -> bool {
        self.frames().contains(&frame)
    }
}
