use std::f32::consts::TAU;
use std::sync::Arc;

use anyhow::bail;
use glam::{Mat4, Quat, Vec3};

use bia::depsgraph::{GeneratedInstance, Generator, GeneratorInput, GeneratorOutput};
use bia::scene::{MeshData, Modifier, SceneObject};
use bia::{BakeInstanceAnimation, BakeSettings, ProceduralGraph, Scene, ShowReadme};

/// Cubes travelling around a ring. Every few frames one cube drops out for a
/// frame, so the bake has a gap to report.
struct Ring {
    count: u32,
    radius: f32,
    cube: Arc<MeshData>,
}

impl Generator for Ring {
    fn generate(&self, input: &GeneratorInput<'_>) -> Result<GeneratorOutput, String> {
        let time = input.frame as f32 / 24.0;
        let dropped = (input.frame % 5 == 0).then(|| input.frame as u32 % self.count);

        let instances = (0..self.count)
            .filter(|&i| Some(i) != dropped)
            .map(|i| {
                let angle = time + i as f32 * TAU / self.count as f32;
                let position = Vec3::new(angle.cos(), angle.sin(), 0.0) * self.radius;
                let rotation = Quat::from_rotation_z(angle * 2.0);
                GeneratedInstance::new(
                    i,
                    Mat4::from_rotation_translation(rotation, position),
                    Arc::clone(&self.cube),
                )
            })
            .collect();

        Ok(GeneratorOutput {
            instances,
            geometry: input.base_mesh.cloned(),
        })
    }
}

fn main() -> anyhow::Result<()> {
    env_logger::Builder::from_env(env_logger::Env::default().default_filter_or("info")).init();

    for line in ShowReadme.lines() {
        log::info!("{line}");
    }

    // 1. Scene: one plane carrying a geometry-node modifier
    let mut scene = Scene::new();
    let plane = scene.add_mesh(MeshData::new_plane(2.0));
    let emitter = scene.spawn(
        SceneObject::mesh("RingEmitter", plane).with_modifier(Modifier::nodes("GeometryNodes", "ring")),
    );
    scene.select(emitter);

    // 2. Evaluator
    let mut graph = ProceduralGraph::new(1).with_node_group(
        "ring",
        Ring {
            count: 8,
            radius: 3.0,
            cube: Arc::new(MeshData::new_box(0.5, 0.5, 0.5)),
        },
    );

    // 3. Bake
    let mut settings = BakeSettings::default();
    settings.set_frame_start(1);
    settings.set_frame_end(48);
    let (outcome, report) = BakeInstanceAnimation::new(settings).run(&mut scene, &mut graph);

    let Some(report) = report else {
        bail!("{}", outcome.message());
    };
    for source in &report.sources {
        log::info!(
            "{}: {} objects, {} keyed samples, {} gaps, {} untracked",
            source.name,
            source.output_count(),
            source.samples,
            source.gaps,
            source.untracked
        );
    }

    if outcome.is_finished() {
        log::info!("{}", outcome.message());
        Ok(())
    } else {
        bail!("{}", outcome.message())
    }
}
