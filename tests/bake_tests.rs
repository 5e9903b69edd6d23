//! Bake Run Tests
//!
//! Tests for:
//! - Selection filtering and the no-selection user error
//! - Collection creation, reuse and naming
//! - Snapshot phase: output naming, degenerate and broken geometry
//! - Sample counts over frame ranges, reversed ranges
//! - Per-source failure isolation
//! - Operator messages and the documentation action

mod common;

use bia::core::DEFAULT_COLLECTION_NAME;
use bia::scene::{MASTER_COLLECTION_NAME, MeshData, Modifier, ObjectKind, SceneObject};
use bia::{
    BakeError, BakeInstanceAnimation, BakeSettings, IdentityKey, InstanceIdentity, OperatorOutcome,
    ProceduralGraph, Scene, ShowReadme, bake_instance_animation, eligible_sources,
};

use common::{
    Flaky, Placement, Scripted, at, collection_object_names, init_logger, keyed_frames,
    spawn_emitter,
};

fn settings(frame_start: i32, frame_end: i32) -> BakeSettings {
    BakeSettings {
        collection_name: String::new(),
        frame_start,
        frame_end,
    }
}

fn three_in_a_row() -> Scripted {
    Scripted::always(vec![
        Placement::new(1, at(0.0)),
        Placement::new(2, at(1.0)),
        Placement::new(3, at(2.0)),
    ])
}

// ============================================================================
// Selection
// ============================================================================

#[test]
fn no_eligible_selection_is_a_user_error() {
    init_logger();
    let mut scene = Scene::new();
    let cube = scene.spawn_mesh("Cube", MeshData::new_box(1.0, 1.0, 1.0));
    scene.select(cube);
    let mut graph = ProceduralGraph::new(1);

    let err = bake_instance_animation(&mut scene, &mut graph, &settings(1, 10)).unwrap_err();

    assert_eq!(err, BakeError::NoEligibleSelection);
    assert_eq!(scene.object_count(), 1);
    assert!(
        scene.find_collection(DEFAULT_COLLECTION_NAME).is_none(),
        "Nothing may be created before the selection is validated"
    );
}

#[test]
fn empty_selection_is_a_user_error() {
    let mut scene = Scene::new();
    spawn_emitter(&mut scene, "Emitter", "row");
    scene.deselect_all();
    let mut graph = ProceduralGraph::new(1).with_node_group("row", three_in_a_row());

    let outcome = BakeInstanceAnimation::new(settings(1, 10)).execute(&mut scene, &mut graph);

    assert_eq!(
        outcome,
        OperatorOutcome::Cancelled(
            "Baking failed: Please select objects containing geometry nodes instances.".into()
        )
    );
}

#[test]
fn objects_without_procedural_modifier_are_skipped() {
    let mut scene = Scene::new();
    let cube = scene.spawn_mesh("Cube", MeshData::new_box(1.0, 1.0, 1.0));
    let empty = scene.spawn(SceneObject::new("Empty", ObjectKind::Empty));
    scene.select(cube);
    scene.select(empty);
    let emitter = spawn_emitter(&mut scene, "Emitter", "row");

    assert_eq!(eligible_sources(&scene), vec![emitter]);

    let mut graph = ProceduralGraph::new(1).with_node_group("row", three_in_a_row());
    let report = bake_instance_animation(&mut scene, &mut graph, &settings(1, 2)).unwrap();

    assert_eq!(report.sources.len(), 1);
    assert_eq!(report.sources[0].source, emitter);
    assert!(report.is_complete());
}

// ============================================================================
// Collection
// ============================================================================

#[test]
fn blank_collection_name_uses_default() {
    let mut scene = Scene::new();
    spawn_emitter(&mut scene, "Emitter", "row");
    let mut graph = ProceduralGraph::new(1).with_node_group("row", three_in_a_row());

    let report = bake_instance_animation(&mut scene, &mut graph, &settings(1, 1)).unwrap();

    assert_eq!(scene.find_collection("bake_animation"), Some(report.collection));
    let master = scene.collection(scene.master_collection()).unwrap();
    assert!(master.children().contains(&report.collection));
}

#[test]
fn custom_collection_name() {
    let mut scene = Scene::new();
    spawn_emitter(&mut scene, "Emitter", "row");
    let mut graph = ProceduralGraph::new(1).with_node_group("row", three_in_a_row());
    let settings = BakeSettings {
        collection_name: "crowd".into(),
        ..settings(1, 1)
    };

    bake_instance_animation(&mut scene, &mut graph, &settings).unwrap();

    assert!(scene.find_collection("crowd").is_some());
    assert!(scene.find_collection(DEFAULT_COLLECTION_NAME).is_none());
}

#[test]
fn settings_restored_from_json_drive_the_bake() -> anyhow::Result<()> {
    let mut scene = Scene::new();
    spawn_emitter(&mut scene, "Emitter", "row");
    let mut graph = ProceduralGraph::new(1).with_node_group("row", three_in_a_row());
    let settings: BakeSettings =
        serde_json::from_str(r#"{ "collection_name": "  ", "frame_end": 4 }"#)?;

    let report = bake_instance_animation(&mut scene, &mut graph, &settings)?;

    assert_eq!(report.frames_processed(), 4);
    assert_eq!(scene.find_collection(DEFAULT_COLLECTION_NAME), Some(report.collection));
    Ok(())
}

#[test]
fn master_collection_name_bakes_into_the_master() {
    let mut scene = Scene::new();
    spawn_emitter(&mut scene, "Emitter", "row");
    let mut graph = ProceduralGraph::new(1).with_node_group("row", three_in_a_row());
    let settings = BakeSettings {
        collection_name: MASTER_COLLECTION_NAME.into(),
        ..settings(1, 1)
    };

    let report = bake_instance_animation(&mut scene, &mut graph, &settings).unwrap();

    assert_eq!(report.collection, scene.master_collection());
    let master = scene.collection(scene.master_collection()).unwrap();
    assert!(master.children().is_empty());
    assert_eq!(master.objects().len(), 4);
}

#[test]
fn repeated_bakes_accumulate_in_the_same_collection() {
    let mut scene = Scene::new();
    spawn_emitter(&mut scene, "Emitter", "row");
    let mut graph = ProceduralGraph::new(1).with_node_group("row", three_in_a_row());

    let first = bake_instance_animation(&mut scene, &mut graph, &settings(1, 3)).unwrap();
    let second = bake_instance_animation(&mut scene, &mut graph, &settings(1, 3)).unwrap();

    assert_eq!(first.collection, second.collection);
    let names = collection_object_names(&scene, DEFAULT_COLLECTION_NAME);
    assert_eq!(
        names,
        vec![
            "Instance_001",
            "Instance_002",
            "Instance_003",
            "Instance_001.001",
            "Instance_002.001",
            "Instance_003.001",
        ]
    );
}

// ============================================================================
// Snapshot
// ============================================================================

#[test]
fn instance_outputs_are_named_and_tagged() {
    let mut scene = Scene::new();
    let emitter = spawn_emitter(&mut scene, "Emitter", "row");
    let mut graph = ProceduralGraph::new(1).with_node_group("row", three_in_a_row());

    let report = bake_instance_animation(&mut scene, &mut graph, &settings(1, 1)).unwrap();
    let collection = scene.collection(report.collection).unwrap();

    for (name, id) in [("Instance_001", 1), ("Instance_002", 2), ("Instance_003", 3)] {
        let key = scene.find_object(name).expect(name);
        assert!(collection.contains(key));
        let object = scene.object(key).unwrap();
        let origin = object.origin.expect("baked objects remember their origin");
        assert_eq!(origin.source, emitter);
        assert_eq!(origin.identity, IdentityKey::Instance(InstanceIdentity::Stable(id)));
        assert_eq!(object.kind, ObjectKind::Mesh);

        let mesh = scene.mesh(object.mesh.unwrap()).unwrap();
        assert_eq!(mesh.vertex_count(), 8);
    }
    assert!(scene.find_object("Emitter_Geometry").is_none());
}

#[test]
fn zero_vertex_instance_is_skipped_silently() {
    let mut scene = Scene::new();
    spawn_emitter(&mut scene, "Emitter", "five");
    let generator = Scripted::always(vec![
        Placement::new(1, at(0.0)),
        Placement::new(2, at(1.0)),
        Placement::new(3, at(2.0)).with_geometry(MeshData::default()),
        Placement::new(4, at(3.0)),
        Placement::new(5, at(4.0)),
    ]);
    let mut graph = ProceduralGraph::new(1).with_node_group("five", generator);

    let (outcome, report) =
        BakeInstanceAnimation::new(settings(1, 4)).run(&mut scene, &mut graph);
    let report = report.unwrap();

    assert!(outcome.is_finished(), "{}", outcome.message());
    let source = &report.sources[0];
    assert_eq!(source.instance_outputs, 4);
    assert_eq!(source.skipped_degenerate, 1);
    assert!(source.extraction_failures.is_empty());
    assert_eq!(
        collection_object_names(&scene, DEFAULT_COLLECTION_NAME),
        vec!["Instance_001", "Instance_002", "Instance_004", "Instance_005"]
    );
}

#[test]
fn broken_instance_geometry_is_recorded_and_skipped() {
    let mut scene = Scene::new();
    spawn_emitter(&mut scene, "Emitter", "broken");
    let dangling = MeshData::new(vec![glam::Vec3::ZERO; 3], vec![0, 1, 7]);
    let generator = Scripted::always(vec![
        Placement::new(1, at(0.0)).with_geometry(dangling),
        Placement::new(2, at(1.0)),
    ]);
    let mut graph = ProceduralGraph::new(1).with_node_group("broken", generator);

    let (outcome, report) =
        BakeInstanceAnimation::new(settings(1, 2)).run(&mut scene, &mut graph);
    let report = report.unwrap();

    assert!(outcome.is_finished());
    let source = &report.sources[0];
    assert_eq!(source.instance_outputs, 1);
    assert_eq!(source.extraction_failures.len(), 1);
    assert_eq!(source.extraction_failures[0].label, "Instance_001");
    assert_eq!(source.samples, 2);
}

#[test]
fn direct_geometry_gets_its_own_object() {
    let mut scene = Scene::new();
    let emitter = spawn_emitter(&mut scene, "Emitter", "mixed");
    let generator = Scripted::always(vec![Placement::new(1, at(0.0))])
        .with_direct_geometry(MeshData::new_plane(4.0));
    let mut graph = ProceduralGraph::new(1).with_node_group("mixed", generator);

    let report = bake_instance_animation(&mut scene, &mut graph, &settings(1, 1)).unwrap();

    let geometry = scene.find_object("Emitter_Geometry").expect("geometry object");
    let origin = scene.object(geometry).unwrap().origin.unwrap();
    assert_eq!(origin.identity, IdentityKey::Geometry);
    assert_eq!(origin.source, emitter);
    assert!(report.sources[0].geometry_output);
    assert_eq!(report.output_count(), 2);
}

#[test]
fn source_without_any_output_contributes_nothing() {
    let mut scene = Scene::new();
    spawn_emitter(&mut scene, "Emitter", "nothing");
    let mut graph = ProceduralGraph::new(1).with_node_group("nothing", Scripted::default());

    let (outcome, report) =
        BakeInstanceAnimation::new(settings(1, 5)).run(&mut scene, &mut graph);
    let report = report.unwrap();

    assert!(outcome.is_finished());
    assert_eq!(report.output_count(), 0);
    assert_eq!(report.sources[0].samples, 0);
    // Sampling was skipped, so the cursor never left the start frame
    assert_eq!(bia::DependencyGraph::frame(&graph), 1);
}

#[test]
fn every_source_is_snapshotted_at_the_start_frame() {
    let mut scene = Scene::new();
    spawn_emitter(&mut scene, "First", "row");
    let second = spawn_emitter(&mut scene, "Second", "thinning");
    // Two instances at the start frame, only one later on
    let thinning = Scripted::always(vec![Placement::new(1, at(0.0))])
        .at_frame(1, vec![Placement::new(1, at(0.0)), Placement::new(2, at(1.0))]);
    let mut graph = ProceduralGraph::new(1)
        .with_node_group("row", three_in_a_row())
        .with_node_group("thinning", thinning);

    let report = bake_instance_animation(&mut scene, &mut graph, &settings(5, 8)).unwrap();

    assert_eq!(report.source(second).unwrap().instance_outputs, 2);
    assert_eq!(report.source(second).unwrap().gaps, 4);
}

// ============================================================================
// Frame ranges
// ============================================================================

#[test]
fn geometry_output_gets_one_sample_per_frame() {
    for (start, end) in [(1, 1), (1, 10), (-5, 5), (100, 103)] {
        let mut scene = Scene::new();
        spawn_emitter(&mut scene, "Emitter", "plane");
        let generator = Scripted::default().with_direct_geometry(MeshData::new_plane(1.0));
        let mut graph = ProceduralGraph::new(start).with_node_group("plane", generator);

        let report = bake_instance_animation(&mut scene, &mut graph, &settings(start, end)).unwrap();

        let geometry = scene.find_object("Emitter_Geometry").unwrap();
        let frames = keyed_frames(&scene, geometry);
        let expected: Vec<f32> = (start..=end).map(|f| f as f32).collect();
        assert_eq!(frames, expected, "range {start}..={end}");
        assert_eq!(report.sources[0].samples, (end - start + 1) as usize);
        assert_eq!(report.frames_processed(), (end - start + 1) as usize);
    }
}

#[test]
fn reversed_range_records_nothing() {
    let mut scene = Scene::new();
    spawn_emitter(&mut scene, "Emitter", "row");
    let mut graph = ProceduralGraph::new(1).with_node_group("row", three_in_a_row());

    let bake = BakeInstanceAnimation::new(settings(10, 5));
    let (outcome, report) = bake.run(&mut scene, &mut graph);
    let report = report.unwrap();

    assert_eq!(
        outcome,
        OperatorOutcome::Finished("Instance animation baking completed! 0 frames processed.".into())
    );
    assert_eq!(report.sources[0].instance_outputs, 3);
    assert_eq!(report.sources[0].samples, 0);
    let first = scene.find_object("Instance_001").unwrap();
    assert!(scene.object(first).unwrap().animation.is_none());
}

#[test]
fn finished_message_counts_frames() {
    let mut scene = Scene::new();
    spawn_emitter(&mut scene, "Emitter", "row");
    let mut graph = ProceduralGraph::new(1).with_node_group("row", three_in_a_row());

    let outcome = BakeInstanceAnimation::new(settings(1, 10)).execute(&mut scene, &mut graph);

    assert_eq!(
        outcome.message(),
        "Instance animation baking completed! 10 frames processed."
    );
    assert_eq!(bia::DependencyGraph::frame(&graph), 10);
}

// ============================================================================
// Failures
// ============================================================================

#[test]
fn failing_source_does_not_stop_the_others() {
    init_logger();
    let mut scene = Scene::new();
    let healthy = spawn_emitter(&mut scene, "Healthy", "row");
    let failing = spawn_emitter(&mut scene, "Failing", "flaky");
    // Every evaluation runs both generators. The healthy source needs one
    // snapshot evaluation and five frames; the failing one then gets its
    // snapshot and two frames before the fault.
    let mut graph = ProceduralGraph::new(1)
        .with_node_group("row", three_in_a_row())
        .with_node_group("flaky", Flaky::new(three_in_a_row(), 9));

    let (outcome, report) =
        BakeInstanceAnimation::new(settings(1, 5)).run(&mut scene, &mut graph);
    let report = report.unwrap();

    assert_eq!(
        outcome,
        OperatorOutcome::Cancelled(
            "Baking failed: Node group 'flaky' failed at frame 3: simulated evaluation fault"
                .into()
        )
    );

    let healthy_report = report.source(healthy).unwrap();
    assert!(healthy_report.error.is_none());
    assert_eq!(healthy_report.samples, 15);

    let failing_report = report.source(failing).unwrap();
    assert!(matches!(failing_report.error, Some(BakeError::Evaluation(_))));
    assert_eq!(failing_report.instance_outputs, 3);
    assert_eq!(failing_report.samples, 6);

    // Work done before the fault stays in the scene
    let partial = scene.find_object("Instance_001.001").unwrap();
    assert_eq!(keyed_frames(&scene, partial), vec![1.0, 2.0]);
}

#[test]
fn source_failing_first_does_not_stop_later_sources() {
    let mut scene = Scene::new();
    let failing = spawn_emitter(&mut scene, "Failing", "flaky");
    let healthy = spawn_emitter(&mut scene, "Healthy", "row");
    // Snapshot and frame 1 succeed, frame 2 fails. The generator keeps failing
    // for every later evaluation, including the healthy source's.
    let mut graph = ProceduralGraph::new(1)
        .with_node_group("row", three_in_a_row())
        .with_node_group("flaky", Flaky::new(three_in_a_row(), 2));

    let (outcome, report) =
        BakeInstanceAnimation::new(settings(1, 5)).run(&mut scene, &mut graph);
    let report = report.unwrap();

    assert_eq!(
        outcome.message(),
        "Baking failed: Node group 'flaky' failed at frame 2: simulated evaluation fault"
    );

    let failing_report = report.source(failing).unwrap();
    assert!(failing_report.error.is_some());
    assert_eq!(failing_report.samples, 3);

    let healthy_report = report.source(healthy).unwrap();
    assert!(healthy_report.error.is_none());
    assert_eq!(healthy_report.instance_outputs, 3);
    assert_eq!(healthy_report.samples, 15);
    let first = scene.find_object("Instance_001.001").unwrap();
    assert_eq!(keyed_frames(&scene, first), vec![1.0, 2.0, 3.0, 4.0, 5.0]);
}

#[test]
fn broken_unselected_object_does_not_affect_the_bake() {
    init_logger();
    let mut scene = Scene::new();
    let plane = scene.add_mesh(MeshData::new_plane(1.0));
    scene.spawn(
        SceneObject::mesh("Unrelated", plane).with_modifier(Modifier::nodes("GeometryNodes", "missing")),
    );
    let healthy = spawn_emitter(&mut scene, "Healthy", "row");
    let mut graph = ProceduralGraph::new(1).with_node_group("row", three_in_a_row());

    let (outcome, report) =
        BakeInstanceAnimation::new(settings(1, 5)).run(&mut scene, &mut graph);
    let report = report.unwrap();

    assert!(outcome.is_finished(), "{}", outcome.message());
    let healthy_report = report.source(healthy).unwrap();
    assert!(healthy_report.error.is_none());
    assert_eq!(healthy_report.instance_outputs, 3);
    assert_eq!(healthy_report.samples, 15);
}

#[test]
fn unknown_node_group_is_reported_per_source() {
    let mut scene = Scene::new();
    spawn_emitter(&mut scene, "Emitter", "missing");
    let mut graph = ProceduralGraph::new(1);

    let outcome = BakeInstanceAnimation::new(settings(1, 3)).execute(&mut scene, &mut graph);

    assert_eq!(
        outcome.message(),
        "Baking failed: Object 'Emitter' uses unknown node group 'missing'"
    );
}

// ============================================================================
// Documentation action
// ============================================================================

#[test]
fn readme_lists_description_lines() {
    let lines: Vec<_> = ShowReadme.lines().collect();
    assert_eq!(lines.first(), Some(&"Bake Instance Animation"));
    assert!(lines.iter().any(|line| line.starts_with("- Instance baking")));

    let outcome = ShowReadme.execute();
    assert!(outcome.is_finished());
    assert_eq!(outcome.message(), bia::about::PLUGIN_DESCRIPTION);
    assert_eq!(outcome.message().lines().count(), lines.len());
}
