use std::sync::Arc;

use bia_core::{EvalError, ExtractError, InstanceIdentity};
use bia_scene::{MeshData, ObjectKey};
use glam::Mat4;
use rustc_hash::FxHashMap;

/// One instance of one evaluation. Only meaningful for the frame it was evaluated at.
#[derive(Debug, Clone)]
pub struct LiveInstance {
    pub world_transform: Mat4,
    /// The source object that generated this instance, or `None` when the
    /// entry stands for an object's own evaluated geometry.
    pub parent: Option<ObjectKey>,
    pub identity: InstanceIdentity,
    /// Instanced geometry, shared between all instances of the same mesh.
    pub geometry: Arc<MeshData>,
}

/// Evaluated state of a scene object.
#[derive(Debug, Clone)]
pub struct EvaluatedObject {
    pub name: String,
    pub world_transform: Mat4,
    /// Geometry with all modifiers applied, instances excluded.
    pub geometry: Option<Arc<MeshData>>,
}

/// Outcome of copying evaluated geometry into a standalone mesh.
#[derive(Debug, Clone, PartialEq)]
pub enum ExtractionResult {
    Extracted(MeshData),
    /// No vertices. Not an error; the caller skips it.
    Degenerate,
    Failed(ExtractError),
}

impl ExtractionResult {
    fn from_geometry(geometry: &MeshData) -> Self {
        if geometry.is_degenerate() {
            return Self::Degenerate;
        }
        match geometry.validate() {
            Ok(()) => Self::Extracted(geometry.clone()),
            Err(err) => Self::Failed(err),
        }
    }
}

/// The fully resolved scene at one frame.
#[derive(Debug, Clone, Default)]
pub struct Evaluation {
    pub frame: i32,
    pub instances: Vec<LiveInstance>,
    pub objects: FxHashMap<ObjectKey, EvaluatedObject>,
    /// Objects that failed to evaluate. They contribute neither instances nor
    /// an entry in `objects`.
    pub errors: FxHashMap<ObjectKey, EvalError>,
}

impl Evaluation {
    #[must_use]
    pub fn new(frame: i32) -> Self {
        Self {
            frame,
            ..Self::default()
        }
    }

    /// Instances generated by `source`, in evaluator order.
    pub fn instances_of(&self, source: ObjectKey) -> impl Iterator<Item = &LiveInstance> {
        self.instances
            .iter()
            .filter(move |instance| instance.parent == Some(source))
    }

    /// The failure recorded for `key`, if its evaluation failed.
    pub fn object_error(&self, key: ObjectKey) -> Result<(), EvalError> {
        self.errors.get(&key).map_or(Ok(()), |err| Err(err.clone()))
    }

    #[must_use]
    pub fn object(&self, key: ObjectKey) -> Option<&EvaluatedObject> {
        self.objects.get(&key)
    }

    /// World transform of an evaluated object.
    pub fn world_transform(&self, key: ObjectKey) -> Result<Mat4, EvalError> {
        self.objects
            .get(&key)
            .map(|object| object.world_transform)
            .ok_or_else(|| EvalError::MissingObject(format!("{key:?}")))
    }

    #[must_use]
    pub fn extract_instance_mesh(&self, instance: &LiveInstance) -> ExtractionResult {
        ExtractionResult::from_geometry(&instance.geometry)
    }

    /// Extracts an object's own evaluated geometry.
    #[must_use]
    pub fn extract_object_mesh(&self, key: ObjectKey) -> ExtractionResult {
        match self.objects.get(&key) {
            Some(EvaluatedObject {
                geometry: Some(geometry),
                ..
            }) => ExtractionResult::from_geometry(geometry),
            Some(_) => ExtractionResult::Degenerate,
            None => ExtractionResult::Failed(ExtractError::NotEvaluated(format!("{key:?}"))),
        }
    }
}
