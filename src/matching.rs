//! Matching baked outputs to live instances.
//!
//! Instances are matched by stable id only. The position of an instance in the
//! evaluator's output is never used: generators reorder, add and remove
//! instances between frames.

use bia_core::InstanceIdentity;
use bia_depsgraph::{Evaluation, LiveInstance};
use bia_scene::ObjectKey;
use glam::Mat4;
use rustc_hash::FxHashMap;

/// Result of looking up one output's instance in one evaluation.
#[derive(Debug, Clone, Copy, PartialEq)]
pub enum MatchResult {
    /// The instance exists at this frame, with this world transform.
    Matched(Mat4),
    /// The instance is absent at this frame.
    Missing,
    /// The output has no stable identity and cannot be tracked.
    Untracked,
}

/// Live instances of one source, indexed by stable id.
///
/// When several instances share an id, the first one in evaluator order wins.
pub struct InstanceIndex<'e> {
    by_id: FxHashMap<u32, &'e LiveInstance>,
}

impl<'e> InstanceIndex<'e> {
    #[must_use]
    pub fn build(evaluation: &'e Evaluation, source: ObjectKey) -> Self {
        let mut by_id = FxHashMap::default();
        for instance in evaluation.instances_of(source) {
            if let InstanceIdentity::Stable(id) = instance.identity {
                by_id.entry(id).or_insert(instance);
            }
        }
        Self { by_id }
    }

    #[must_use]
    pub fn resolve(&self, identity: InstanceIdentity) -> MatchResult {
        match identity {
            InstanceIdentity::Stable(id) => self
                .by_id
                .get(&id)
                .map_or(MatchResult::Missing, |instance| {
                    MatchResult::Matched(instance.world_transform)
                }),
            InstanceIdentity::Unstable => MatchResult::Untracked,
        }
    }

    #[inline]
    #[must_use]
    pub fn len(&self) -> usize {
        self.by_id.len()
    }

    #[inline]
    #[must_use]
    pub fn is_empty(&self) -> bool {
        self.by_id.is_empty()
    }
}
