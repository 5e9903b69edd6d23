//! Procedural reference evaluator.
//!
//! Stands in for a geometry-node evaluator: every object whose procedural
//! modifier names a registered node group runs the matching [`Generator`] at
//! the current frame. Generated instances are placed relative to the object's
//! evaluated world transform.

use std::sync::Arc;

use bia_core::{EvalError, InstanceIdentity};
use bia_scene::{MeshData, ObjectKey, Scene, SceneObject};
use glam::Mat4;
use rustc_hash::FxHashMap;

use crate::context::DependencyGraph;
use crate::evaluation::{EvaluatedObject, Evaluation, LiveInstance};

/// What a generator sees when it runs.
#[derive(Debug, Clone, Copy)]
pub struct GeneratorInput<'a> {
    pub frame: i32,
    pub object_name: &'a str,
    /// The object's base mesh, before any modifier.
    pub base_mesh: Option<&'a MeshData>,
}

/// One instance emitted by a generator.
#[derive(Debug, Clone)]
pub struct GeneratedInstance {
    /// Placement relative to the generating object.
    pub local_transform: Mat4,
    pub id: Option<u32>,
    pub geometry: Arc<MeshData>,
}

impl GeneratedInstance {
    #[must_use]
    pub fn new(id: u32, local_transform: Mat4, geometry: Arc<MeshData>) -> Self {
        Self {
            local_transform,
            id: Some(id),
            geometry,
        }
    }
}

/// Everything a generator produces for one frame.
#[derive(Debug, Clone, Default)]
pub struct GeneratorOutput {
    pub instances: Vec<GeneratedInstance>,
    /// Geometry emitted directly rather than as instances.
    pub geometry: Option<MeshData>,
}

/// A node group: a frame-dependent producer of geometry and instances.
pub trait Generator {
    fn generate(&self, input: &GeneratorInput<'_>) -> Result<GeneratorOutput, String>;
}

impl<F> Generator for F
where
    F: Fn(&GeneratorInput<'_>) -> Result<GeneratorOutput, String>,
{
    fn generate(&self, input: &GeneratorInput<'_>) -> Result<GeneratorOutput, String> {
        self(input)
    }
}

/// Evaluator running registered generators by node group name.
pub struct ProceduralGraph {
    frame: i32,
    node_groups: FxHashMap<String, Box<dyn Generator>>,
    stable_ids: bool,
}

impl ProceduralGraph {
    #[must_use]
    pub fn new(frame: i32) -> Self {
        Self {
            frame,
            node_groups: FxHashMap::default(),
            stable_ids: true,
        }
    }

    /// Registers (or replaces) the generator behind `node_group`.
    pub fn register(&mut self, node_group: impl Into<String>, generator: impl Generator + 'static) {
        self.node_groups.insert(node_group.into(), Box::new(generator));
    }

    #[must_use]
    pub fn with_node_group(
        mut self,
        node_group: impl Into<String>,
        generator: impl Generator + 'static,
    ) -> Self {
        self.register(node_group, generator);
        self
    }

    /// Behaves like an older evaluator that reports no instance ids.
    #[must_use]
    pub fn without_stable_ids(mut self) -> Self {
        self.stable_ids = false;
        self
    }

    fn identity(&self, id: Option<u32>) -> InstanceIdentity {
        if self.stable_ids {
            InstanceIdentity::from_stable_id(id)
        } else {
            InstanceIdentity::Unstable
        }
    }

    fn evaluate_object(
        &self,
        scene: &Scene,
        key: ObjectKey,
        object: &SceneObject,
        evaluation: &mut Evaluation,
    ) -> Result<(), EvalError> {
        let world = object.transform_at(self.frame as f32).matrix();
        let base_mesh = object.mesh.and_then(|mesh| scene.mesh(mesh));

        let node_group = object
            .procedural_modifier()
            .and_then(|handle| object.modifier(handle))
            .filter(|modifier| modifier.enabled)
            .and_then(|modifier| modifier.node_group());

        let geometry = match node_group {
            Some(node_group) => {
                let generator = self.node_groups.get(node_group).ok_or_else(|| {
                    EvalError::UnknownNodeGroup {
                        object: object.name().to_owned(),
                        node_group: node_group.to_owned(),
                    }
                })?;
                let input = GeneratorInput {
                    frame: self.frame,
                    object_name: object.name(),
                    base_mesh,
                };
                let output = generator
                    .generate(&input)
                    .map_err(|message| EvalError::Generator {
                        node_group: node_group.to_owned(),
                        frame: self.frame,
                        message,
                    })?;

                evaluation
                    .instances
                    .extend(output.instances.into_iter().map(|instance| LiveInstance {
                        world_transform: world * instance.local_transform,
                        parent: Some(key),
                        identity: self.identity(instance.id),
                        geometry: instance.geometry,
                    }));
                output.geometry.map(Arc::new)
            }
            None => base_mesh.cloned().map(Arc::new),
        };

        // The object's own geometry is listed as an instance without parent
        if let Some(geometry) = &geometry {
            evaluation.instances.push(LiveInstance {
                world_transform: world,
                parent: None,
                identity: InstanceIdentity::Unstable,
                geometry: Arc::clone(geometry),
            });
        }

        evaluation.objects.insert(
            key,
            EvaluatedObject {
                name: object.name().to_owned(),
                world_transform: world,
                geometry,
            },
        );
        Ok(())
    }
}

impl DependencyGraph for ProceduralGraph {
    fn frame(&self) -> i32 {
        self.frame
    }

    fn set_frame(&mut self, frame: i32) {
        self.frame = frame;
    }

    /// Evaluates every object except bake outputs.
    ///
    /// An object that fails is recorded in [`Evaluation::errors`] and left out;
    /// the rest of the scene is still evaluated, so this never returns `Err`.
    fn evaluate(&mut self, scene: &Scene) -> Result<Evaluation, EvalError> {
        let mut evaluation = Evaluation::new(self.frame);
        // Bake outputs are plain keyed meshes nothing reads back from the evaluation
        for (key, object) in scene.objects().filter(|(_, object)| object.origin.is_none()) {
            if let Err(err) = self.evaluate_object(scene, key, object, &mut evaluation) {
                log::warn!("Skipping '{}' at frame {}: {err}", object.name(), self.frame);
                evaluation.errors.insert(key, err);
            }
        }
        log::trace!(
            "Evaluated frame {}: {} objects, {} instances, {} failed",
            self.frame,
            evaluation.objects.len(),
            evaluation.instances.len(),
            evaluation.errors.len()
        );
        Ok(evaluation)
    }

    fn supports_stable_ids(&self) -> bool {
        self.stable_ids
    }
}
