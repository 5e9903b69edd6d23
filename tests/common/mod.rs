//! Shared fixtures: scripted generators and scene helpers.

#![allow(dead_code)]

use std::cell::Cell;
use std::collections::BTreeMap;
use std::f32::consts::TAU;
use std::sync::Arc;

use glam::{Mat4, Quat, Vec3};

use bia::depsgraph::{GeneratedInstance, Generator, GeneratorInput, GeneratorOutput};
use bia::scene::{MeshData, Modifier, ObjectKey, Scene, SceneObject};

pub fn init_logger() {
    let _ = env_logger::builder().is_test(true).try_init();
}

pub fn cube() -> Arc<MeshData> {
    Arc::new(MeshData::new_box(1.0, 1.0, 1.0))
}

pub fn at(x: f32) -> Mat4 {
    Mat4::from_translation(Vec3::new(x, 0.0, 0.0))
}

/// An instance placed by [`Scripted`].
#[derive(Clone)]
pub struct Placement {
    pub id: Option<u32>,
    pub transform: Mat4,
    pub geometry: Arc<MeshData>,
}

impl Placement {
    pub fn new(id: u32, transform: Mat4) -> Self {
        Self {
            id: Some(id),
            transform,
            geometry: cube(),
        }
    }

    pub fn with_geometry(mut self, geometry: MeshData) -> Self {
        self.geometry = Arc::new(geometry);
        self
    }
}

/// Emits a fixed list of instances per frame; frames without a list use the default one.
#[derive(Default)]
pub struct Scripted {
    frames: BTreeMap<i32, Vec<Placement>>,
    default: Vec<Placement>,
    geometry: Option<MeshData>,
}

impl Scripted {
    pub fn always(placements: Vec<Placement>) -> Self {
        Self {
            default: placements,
            ..Self::default()
        }
    }

    pub fn at_frame(mut self, frame: i32, placements: Vec<Placement>) -> Self {
        self.frames.insert(frame, placements);
        self
    }

    pub fn with_direct_geometry(mut self, geometry: MeshData) -> Self {
        self.geometry = Some(geometry);
        self
    }
}

impl Generator for Scripted {
    fn generate(&self, input: &GeneratorInput<'_>) -> Result<GeneratorOutput, String> {
        let placements = self.frames.get(&input.frame).unwrap_or(&self.default);
        Ok(GeneratorOutput {
            instances: placements
                .iter()
                .map(|p| GeneratedInstance {
                    local_transform: p.transform,
                    id: p.id,
                    geometry: Arc::clone(&p.geometry),
                })
                .collect(),
            geometry: self.geometry.clone(),
        })
    }
}

/// `count` cubes on a spinning, breathing ring.
pub struct Orbit {
    pub count: u32,
    pub radius: f32,
}

impl Generator for Orbit {
    fn generate(&self, input: &GeneratorInput<'_>) -> Result<GeneratorOutput, String> {
        let geometry = cube();
        let time = input.frame as f32 * 0.1;
        let instances = (0..self.count)
            .map(|i| {
                let angle = time + i as f32 * TAU / self.count as f32;
                let rotation = Quat::from_rotation_z(angle) * Quat::from_rotation_x(time * 0.5);
                let scale = Vec3::splat(1.0 + 0.25 * (time + i as f32).sin());
                let position = Vec3::new(angle.cos(), angle.sin(), 0.0) * self.radius;
                GeneratedInstance::new(
                    i * 7 + 3,
                    Mat4::from_scale_rotation_translation(scale, rotation, position),
                    Arc::clone(&geometry),
                )
            })
            .collect();
        Ok(GeneratorOutput {
            instances,
            geometry: None,
        })
    }
}

/// Wraps a generator and fails every run after the first `healthy_runs`.
pub struct Flaky<G> {
    pub inner: G,
    pub healthy_runs: u32,
    pub runs: Cell<u32>,
}

impl<G> Flaky<G> {
    pub fn new(inner: G, healthy_runs: u32) -> Self {
        Self {
            inner,
            healthy_runs,
            runs: Cell::new(0),
        }
    }
}

impl<G: Generator> Generator for Flaky<G> {
    fn generate(&self, input: &GeneratorInput<'_>) -> Result<GeneratorOutput, String> {
        let run = self.runs.get() + 1;
        self.runs.set(run);
        if run > self.healthy_runs {
            return Err("simulated evaluation fault".to_owned());
        }
        self.inner.generate(input)
    }
}

/// Spawns and selects a mesh object whose geometry-node modifier uses `node_group`.
pub fn spawn_emitter(scene: &mut Scene, name: &str, node_group: &str) -> ObjectKey {
    let mesh = scene.add_mesh(MeshData::new_plane(1.0));
    let key = scene.spawn(
        SceneObject::mesh(name, mesh).with_modifier(Modifier::nodes("GeometryNodes", node_group)),
    );
    scene.select(key);
    key
}

/// Baked objects of `collection`, by name.
pub fn collection_object_names(scene: &Scene, collection: &str) -> Vec<String> {
    let key = scene.find_collection(collection).expect("collection exists");
    scene
        .collection(key)
        .unwrap()
        .objects()
        .iter()
        .map(|&object| scene.object(object).unwrap().name().to_owned())
        .collect()
}

/// Frames keyed on an object's location channel.
pub fn keyed_frames(scene: &Scene, object: ObjectKey) -> Vec<f32> {
    scene
        .object(object)
        .unwrap()
        .animation
        .as_ref()
        .map(|action| action.keyed_frames().to_vec())
        .unwrap_or_default()
}
