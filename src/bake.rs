//! The bake run: selection, collection, and the two phases per source.

use bia_core::{BakeError, BakeSettings, FrameRange, Result};
use bia_depsgraph::{DependencyGraph, EvaluationContext};
use bia_scene::{CollectionKey, ObjectKey, Scene};

use crate::report::{BakeReport, SourceReport};
use crate::sampler::sample_transforms;
use crate::snapshot::build_snapshot;

/// Selected mesh objects carrying a procedural modifier, in selection order.
#[must_use]
pub fn eligible_sources(scene: &Scene) -> Vec<ObjectKey> {
    scene
        .selected_meshes()
        .filter_map(|(key, object)| {
            if object.procedural_modifier().is_some() {
                Some(key)
            } else {
                log::debug!("Skipping '{}': no geometry-node modifier", object.name());
                None
            }
        })
        .collect()
}

/// Bakes every eligible selected object into the configured collection.
///
/// Returns [`BakeError::NoEligibleSelection`] without touching the scene when
/// nothing can be baked. Any other failure stops only the source it happened
/// on and is recorded in the report; objects and keys written before it stay
/// in the scene.
///
/// Every source is snapshotted at the frame the cursor was on when the bake
/// started. The cursor is left on the last sampled frame.
pub fn bake_instance_animation(
    scene: &mut Scene,
    graph: &mut dyn DependencyGraph,
    settings: &BakeSettings,
) -> Result<BakeReport> {
    let sources = eligible_sources(scene);
    if sources.is_empty() {
        return Err(BakeError::NoEligibleSelection);
    }

    let collection = scene.ensure_collection(settings.resolved_collection_name());
    let frames = settings.frame_range();
    let mut context = EvaluationContext::new(graph);
    let start_frame = context.frame();
    if !context.supports_stable_ids() {
        log::warn!("The evaluator reports no stable instance ids; baked instances will not be animated");
    }
    let mut report = BakeReport::new(collection, frames);

    log::info!(
        "Baking {} objects into '{}', frames {}..={}",
        sources.len(),
        settings.resolved_collection_name(),
        frames.start,
        frames.end
    );

    for source in sources {
        let name = scene
            .object(source)
            .map(|object| object.name().to_owned())
            .unwrap_or_default();
        let mut source_report = SourceReport::new(source, name);

        if let Err(err) = bake_source(
            scene,
            &mut context,
            source,
            collection,
            start_frame,
            frames,
            &mut source_report,
        ) {
            log::error!("Baking '{}' failed: {err}", source_report.name);
            source_report.error = Some(err);
        } else {
            log::info!(
                "Baked '{}': {} objects, {} samples, {} gaps",
                source_report.name,
                source_report.output_count(),
                source_report.samples,
                source_report.gaps
            );
        }
        report.sources.push(source_report);
    }

    Ok(report)
}

fn bake_source(
    scene: &mut Scene,
    context: &mut EvaluationContext<'_>,
    source: ObjectKey,
    collection: CollectionKey,
    start_frame: i32,
    frames: FrameRange,
    report: &mut SourceReport,
) -> Result<()> {
    let snapshot = {
        let evaluated = context.advance_to(scene, start_frame)?;
        build_snapshot(scene, &evaluated, source, collection, report)?
    };

    if snapshot.is_empty() {
        log::info!("'{}' produced no geometry, nothing to sample", report.name);
        return Ok(());
    }

    sample_transforms(scene, context, &snapshot, frames, report)
}
