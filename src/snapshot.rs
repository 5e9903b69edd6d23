//! Snapshot phase: one persistent object per instance of a source.

use bia_core::{BakeError, IdentityKey};
use bia_depsgraph::{Evaluation, ExtractionResult};
use bia_scene::{BakeOrigin, CollectionKey, MeshData, ObjectKey, Scene, SceneObject};
use glam::Mat4;

use crate::report::{ExtractionFailure, SourceReport};

/// A baked object and the identity it tracks.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct BakedOutput {
    pub object: ObjectKey,
    pub identity: IdentityKey,
}

impl BakedOutput {
    #[inline]
    #[must_use]
    pub fn is_instance(&self) -> bool {
        self.identity.is_instance()
    }
}

/// The outputs created for one source. Fixed once built.
#[derive(Debug, Clone)]
pub struct SourceSnapshot {
    pub source: ObjectKey,
    outputs: Vec<BakedOutput>,
}

impl SourceSnapshot {
    #[inline]
    #[must_use]
    pub fn outputs(&self) -> &[BakedOutput] {
        &self.outputs
    }

    #[inline]
    #[must_use]
    pub fn is_empty(&self) -> bool {
        self.outputs.is_empty()
    }
}

/// Creates the output objects of `source` from an evaluation and links them
/// into `collection`.
///
/// Instance outputs are named `Instance_001`, `Instance_002`, ... after the
/// position of the instance among the source's instances; skipped instances
/// still consume their number. Geometry the generator emits directly becomes
/// `{source}_Geometry`.
pub fn build_snapshot(
    scene: &mut Scene,
    evaluation: &Evaluation,
    source: ObjectKey,
    collection: CollectionKey,
    report: &mut SourceReport,
) -> Result<SourceSnapshot, BakeError> {
    let source_name = scene.try_object(source)?.name().to_owned();
    evaluation.object_error(source)?;
    let mut outputs = Vec::new();

    for (n, instance) in evaluation.instances_of(source).enumerate() {
        let label = format!("Instance_{:03}", n + 1);
        let Some(mesh) = accept(evaluation.extract_instance_mesh(instance), &label, report) else {
            continue;
        };
        let identity = IdentityKey::Instance(instance.identity);
        let object = create_output(
            scene,
            collection,
            &label,
            mesh,
            &instance.world_transform,
            BakeOrigin { source, identity },
        )?;
        outputs.push(BakedOutput { object, identity });
        report.instance_outputs += 1;
        if !instance.identity.is_stable() {
            report.untracked += 1;
        }
    }

    let label = format!("{source_name}_Geometry");
    // Most sources emit instances only; an empty result here is not worth counting
    let geometry = match evaluation.extract_object_mesh(source) {
        ExtractionResult::Degenerate => None,
        result => accept(result, &label, report),
    };
    if let Some(mesh) = geometry {
        let world = evaluation.world_transform(source)?;
        let identity = IdentityKey::Geometry;
        let object = create_output(
            scene,
            collection,
            &label,
            mesh,
            &world,
            BakeOrigin { source, identity },
        )?;
        outputs.push(BakedOutput { object, identity });
        report.geometry_output = true;
    }

    log::debug!(
        "Snapshot of '{source_name}': {} outputs, {} degenerate, {} failed",
        outputs.len(),
        report.skipped_degenerate,
        report.extraction_failures.len()
    );
    Ok(SourceSnapshot { source, outputs })
}

fn accept(result: ExtractionResult, label: &str, report: &mut SourceReport) -> Option<MeshData> {
    match result {
        ExtractionResult::Extracted(mesh) => Some(mesh),
        ExtractionResult::Degenerate => {
            report.skipped_degenerate += 1;
            None
        }
        ExtractionResult::Failed(error) => {
            log::warn!("Error copying {label} of '{}': {error}", report.name);
            report.extraction_failures.push(ExtractionFailure {
                label: label.to_owned(),
                error,
            });
            None
        }
    }
}

fn create_output(
    scene: &mut Scene,
    collection: CollectionKey,
    name: &str,
    mesh: MeshData,
    world: &Mat4,
    origin: BakeOrigin,
) -> Result<ObjectKey, BakeError> {
    let mesh = scene.add_mesh(mesh);
    let mut object = SceneObject::mesh(name, mesh);
    object.set_world_matrix(world);
    object.origin = Some(origin);

    let key = scene.add_object(object);
    scene.link_object(collection, key)?;
    Ok(key)
}
