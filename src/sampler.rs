//! Sampling phase: one keyframe per output per visited frame.

use bia_animation::TransformChannel;
use bia_core::{BakeError, FrameRange, IdentityKey};
use bia_depsgraph::EvaluationContext;
use bia_scene::{ObjectKey, Scene};
use glam::Mat4;

use crate::matching::{InstanceIndex, MatchResult};
use crate::report::SourceReport;
use crate::snapshot::SourceSnapshot;

/// Walks `frames` forward and keys every output of `snapshot` whose instance
/// can be found at each frame.
///
/// An instance that is absent at a frame leaves a gap at that frame: nothing
/// is interpolated or carried over. Outputs without a stable identity are
/// never keyed. Geometry outputs follow the source and are keyed on every
/// frame. A reversed range visits no frame.
pub fn sample_transforms(
    scene: &mut Scene,
    context: &mut EvaluationContext<'_>,
    snapshot: &SourceSnapshot,
    frames: FrameRange,
    report: &mut SourceReport,
) -> Result<(), BakeError> {
    if report.untracked > 0 {
        log::warn!(
            "'{}': {} instances have no stable id and will not be animated",
            report.name,
            report.untracked
        );
    }

    for frame in frames.frames() {
        let evaluated = context.advance_to(scene, frame)?;
        evaluated.object_error(snapshot.source)?;
        let index = InstanceIndex::build(&evaluated, snapshot.source);

        for output in snapshot.outputs() {
            let world = match output.identity {
                IdentityKey::Instance(identity) => match index.resolve(identity) {
                    MatchResult::Matched(world) => world,
                    MatchResult::Missing => {
                        log::trace!("{identity} missing at frame {frame}");
                        report.gaps += 1;
                        continue;
                    }
                    MatchResult::Untracked => continue,
                },
                IdentityKey::Geometry => evaluated.world_transform(snapshot.source)?,
            };
            key_transform(scene, output.object, &world, frame)?;
            report.samples += 1;
        }
    }
    Ok(())
}

/// Writes `world` onto the object and keys location, rotation and scale.
fn key_transform(scene: &mut Scene, object: ObjectKey, world: &Mat4, frame: i32) -> Result<(), BakeError> {
    scene.set_world_matrix(object, world)?;
    for channel in TransformChannel::ALL {
        scene.insert_transform_keyframe(object, channel, frame)?;
    }
    Ok(())
}
