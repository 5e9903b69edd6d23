//! Per-run bake report.
//!
//! Every stage of a bake reports what it did here instead of unwinding:
//! skipped and failed extractions, match gaps, untracked instances and the
//! error that stopped a source, if any.

use bia_core::{BakeError, ExtractError, FrameRange};
use bia_scene::{CollectionKey, ObjectKey};

/// An extraction that failed and was skipped.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ExtractionFailure {
    /// Name the output object would have had.
    pub label: String,
    pub error: ExtractError,
}

/// What happened to one source object.
#[derive(Debug, Clone)]
pub struct SourceReport {
    pub source: ObjectKey,
    pub name: String,
    /// Output objects created from instances.
    pub instance_outputs: usize,
    /// Whether an `_Geometry` object was created.
    pub geometry_output: bool,
    /// Instances skipped because their geometry had no vertices.
    pub skipped_degenerate: usize,
    pub extraction_failures: Vec<ExtractionFailure>,
    /// Instance outputs without a stable identity; they are never keyframed.
    pub untracked: usize,
    /// Object-frames that received a keyframe on every channel.
    pub samples: usize,
    /// Object-frames where the instance could not be found.
    pub gaps: usize,
    /// The failure that stopped this source. Work done before it is kept.
    pub error: Option<BakeError>,
}

impl SourceReport {
    #[must_use]
    pub fn new(source: ObjectKey, name: impl Into<String>) -> Self {
        Self {
            source,
            name: name.into(),
            instance_outputs: 0,
            geometry_output: false,
            skipped_degenerate: 0,
            extraction_failures: Vec::new(),
            untracked: 0,
            samples: 0,
            gaps: 0,
            error: None,
        }
    }

    #[must_use]
    pub fn output_count(&self) -> usize {
        self.instance_outputs + usize::from(self.geometry_output)
    }
}

/// Outcome of a whole bake.
#[derive(Debug, Clone)]
pub struct BakeReport {
    pub collection: CollectionKey,
    pub frames: FrameRange,
    pub sources: Vec<SourceReport>,
}

impl BakeReport {
    #[must_use]
    pub fn new(collection: CollectionKey, frames: FrameRange) -> Self {
        Self {
            collection,
            frames,
            sources: Vec::new(),
        }
    }

    /// Number of frames the range covers (zero for a reversed range).
    #[must_use]
    pub fn frames_processed(&self) -> usize {
        self.frames.len()
    }

    #[must_use]
    pub fn output_count(&self) -> usize {
        self.sources.iter().map(SourceReport::output_count).sum()
    }

    #[must_use]
    pub fn source(&self, source: ObjectKey) -> Option<&SourceReport> {
        self.sources.iter().find(|report| report.source == source)
    }

    /// The first error that stopped a source.
    #[must_use]
    pub fn first_error(&self) -> Option<&BakeError> {
        self.sources.iter().find_map(|report| report.error.as_ref())
    }

    #[must_use]
    pub fn is_complete(&self) -> bool {
        self.first_error().is_none()
    }
}
