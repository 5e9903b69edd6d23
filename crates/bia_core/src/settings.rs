//! Bake configuration.
//!
//! Mirrors the property group a host panel exposes to the user. The struct is
//! serde-serializable so the host can persist it alongside the scene.

use serde::{Deserialize, Serialize};

use crate::frame::{FRAME_MAX, FRAME_MIN, FrameRange};

/// Collection used when the user leaves the name blank.
pub const DEFAULT_COLLECTION_NAME: &str = "bake_animation";

/// User-facing options of the bake action.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(default)]
pub struct BakeSettings {
    /// Collection receiving the baked objects. Blank means [`DEFAULT_COLLECTION_NAME`].
    pub collection_name: String,
    pub frame_start: i32,
    pub frame_end: i32,
}

impl Default for BakeSettings {
    fn default() -> Self {
        Self {
            collection_name: String::new(),
            frame_start: 1,
            frame_end: 250,
        }
    }
}

impl BakeSettings {
    /// Collection name with the blank-means-default rule applied.
    #[must_use]
    pub fn resolved_collection_name(&self) -> &str {
        if self.collection_name.trim().is_empty() {
            DEFAULT_COLLECTION_NAME
        } else {
            &self.collection_name
        }
    }

    /// Sets the start frame, clamped to the host bounds.
    pub fn set_frame_start(&mut self, frame: i32) {
        self.frame_start = frame.clamp(FRAME_MIN, FRAME_MAX);
    }

    /// Sets the end frame, clamped to the host bounds.
    pub fn set_frame_end(&mut self, frame: i32) {
        self.frame_end = frame.clamp(FRAME_MIN, FRAME_MAX);
    }

    /// The configured range. Each bound is clamped independently; the range
    /// itself may still be reversed.
    #[must_use]
    pub fn frame_range(&self) -> FrameRange {
        FrameRange::new(
            self.frame_start.clamp(FRAME_MIN, FRAME_MAX),
            self.frame_end.clamp(FRAME_MIN, FRAME_MAX),
        )
    }
}
