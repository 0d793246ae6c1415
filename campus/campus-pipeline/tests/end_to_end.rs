//! End-to-end tests: merged mesh in, matched buildings out.
//!
//! Run with: cargo test -p campus-pipeline --test end_to_end

use std::sync::Arc;

use campus_pipeline::{MeshNode, PipelineConfig, PipelineContext, SceneNode, TransformConfig};
use geo_match::{GeoDataset, GeoError};
use mesh_types::{Color, Point2};

// =============================================================================
// Fixtures
// =============================================================================

/// Five triangles: a fan of three near the origin and a pair 100 units away.
fn five_triangles() -> MeshNode {
    let positions = vec![
        // Group A, fan around vertex 0.
        0.0, 0.0, 0.0, //
        2.0, 0.0, 0.0, //
        2.0, 0.0, 2.0, //
        0.0, 0.0, 2.0, //
        -2.0, 0.0, 2.0, //
        // Group B, a 2x2 square at x = 100.
        100.0, 0.0, 0.0, //
        102.0, 0.0, 0.0, //
        102.0, 0.0, 2.0, //
        100.0, 0.0, 2.0,
    ];
    let indices = vec![
        0, 2, 1, //
        0, 3, 2, //
        0, 4, 3, //
        5, 7, 6, //
        5, 8, 7,
    ];
    MeshNode::new("campus", positions, indices)
}

/// Dataset with one footprint centred on group B under an identity transform.
fn dataset_for_group_b() -> &'static str {
    r#"{
        "type": "FeatureCollection",
        "features": [{
            "type": "Feature",
            "properties": { "BldgName": "Science Hall", "BldgNo": "7", "Height": 21 },
            "geometry": {
                "type": "Polygon",
                "coordinates": [[[100, 0], [102, 0], [102, 2], [100, 2]]]
            }
        }]
    }"#
}

fn identity() -> PipelineConfig {
    let transform = TransformConfig::default()
        .with_scale(1.0)
        .with_offset([0.0, 0.0]);
    PipelineConfig::default().with_transform(transform)
}

// =============================================================================
// Segmentation
// =============================================================================

#[test]
fn five_triangles_split_into_three_and_two() {
    let ctx = PipelineContext::new(PipelineConfig::default(), Ok(GeoDataset::empty())).unwrap();
    let out = ctx.run(&five_triangles()).unwrap();

    assert_eq!(out.buildings.len(), 2);
    assert_eq!(out.buildings[0].name, "Building_0");
    assert_eq!(out.buildings[0].triangle_count(), 3);
    assert_eq!(out.buildings[0].source_faces, vec![0, 1, 2]);
    assert_eq!(out.buildings[0].mesh.vertex_count(), 5);
    assert_eq!(out.buildings[1].name, "Building_1");
    assert_eq!(out.buildings[1].triangle_count(), 2);
    assert_eq!(out.buildings[1].mesh.vertex_count(), 4);

    let d = &out.diagnostics;
    assert_eq!(d.triangle_count, 5);
    assert_eq!(d.cluster_count, 2);
    assert_eq!(d.singleton_clusters, 0);
    assert!(!d.no_adjacency);
}

#[test]
fn tiny_epsilon_reports_no_adjacency() {
    let mut config = PipelineConfig::default();
    config.cluster.epsilon = 1e-9;
    let ctx = PipelineContext::new(config, Ok(GeoDataset::empty())).unwrap();

    // Shared corners are at distance zero, so only disjoint soups are
    // fully isolated.
    let mesh = MeshNode::new(
        "soup",
        vec![
            0.0, 0.0, 0.0, 1.0, 0.0, 0.0, 0.0, 0.0, 1.0, //
            3.0, 0.0, 0.0, 4.0, 0.0, 0.0, 3.0, 0.0, 1.0,
        ],
        vec![0, 2, 1, 3, 5, 4],
    );
    let out = ctx.run(&mesh).unwrap();
    assert!(out.diagnostics.no_adjacency);
    assert_eq!(out.diagnostics.singleton_clusters, 2);
}

// =============================================================================
// Geographic join
// =============================================================================

#[test]
fn matching_footprint_attaches_record() {
    let dataset = GeoDataset::from_geojson_str(dataset_for_group_b()).unwrap();
    let ctx = PipelineContext::new(identity(), Ok(dataset)).unwrap();
    let out = ctx.run(&five_triangles()).unwrap();

    assert!(!out.buildings[0].is_matched());
    let hall = &out.buildings[1];
    assert!(hall.is_matched());
    assert_eq!(hall.label(), "Science Hall");
    assert_eq!(hall.record.as_ref().unwrap().attributes.height, Some(21.0));
    assert!(Arc::ptr_eq(hall.record.as_ref().unwrap(), &ctx.dataset().records[0]));

    let debug = hall.debug.unwrap();
    assert!(debug.matched);
    assert_eq!(debug.key.unwrap().to_string(), "101.00,1.00");

    assert_eq!(out.diagnostics.matches.matched, 1);
    assert_eq!(out.diagnostics.matches.total, 2);
    assert!((out.diagnostics.match_rate - 50.0).abs() < 1e-12);

    let record = &ctx.dataset().records[0];
    assert_eq!(out.building_for_record(record).map(|b| b.name.as_str()), Some("Building_1"));
}

#[test]
fn far_dataset_matches_nothing() {
    let far = r#"{
        "type": "FeatureCollection",
        "features": [{
            "type": "Feature",
            "properties": { "BldgName": "Elsewhere" },
            "geometry": {
                "type": "Polygon",
                "coordinates": [[[5000, 5000], [5002, 5000], [5001, 5002]]]
            }
        }]
    }"#;
    let dataset = GeoDataset::from_geojson_str(far).unwrap();
    let ctx = PipelineContext::new(identity(), Ok(dataset)).unwrap();
    let out = ctx.run(&five_triangles()).unwrap();

    assert!(out.buildings.iter().all(|b| !b.is_matched()));
    assert_eq!(out.diagnostics.matches.matched, 0);
    assert_eq!(out.diagnostics.matches.total, 2);
    assert!(out.diagnostics.match_rate.abs() < f64::EPSILON);
}

#[test]
fn missing_dataset_degrades_to_geometry() {
    let missing = std::path::Path::new("/nonexistent/footprints.geojson");
    let ctx = PipelineContext::new(PipelineConfig::default(), GeoDataset::from_path(missing))
        .unwrap();
    assert!(!ctx.attributes_available());

    let out = ctx.run(&five_triangles()).unwrap();
    assert_eq!(out.buildings.len(), 2);
    assert!(out.buildings.iter().all(|b| b.record.is_none()));
    assert!(out.diagnostics.to_string().contains("attributes unavailable"));

    let err = GeoDataset::from_path(missing).unwrap_err();
    assert!(matches!(err, GeoError::MissingAttributes { .. }));
}

#[test]
fn point_query_finds_footprint() {
    let dataset = GeoDataset::from_geojson_str(dataset_for_group_b()).unwrap();
    let ctx = PipelineContext::new(identity(), Ok(dataset)).unwrap();
    let out = ctx.run(&five_triangles()).unwrap();

    let hit = ctx.building_at(&Point2::new(101.5, 0.5)).unwrap();
    assert_eq!(hit.attributes.number.as_deref(), Some("7"));
    assert!(ctx.building_at(&Point2::new(50.0, 50.0)).is_none());

    let geo = out.transform.to_geo(&Point2::new(101.0, 1.0));
    assert!(ctx.building_at(&geo).is_some());
}

// =============================================================================
// Display state
// =============================================================================

#[test]
fn debug_view_tints_by_match() {
    let dataset = GeoDataset::from_geojson_str(dataset_for_group_b()).unwrap();
    let ctx = PipelineContext::new(identity().with_debug_view(true), Ok(dataset)).unwrap();
    let out = ctx.run(&five_triangles()).unwrap();

    assert_eq!(out.buildings[0].material.color, Color::RED);
    assert_eq!(out.buildings[1].material.color, Color::GREEN);
    assert!(out.buildings.iter().all(|b| b.material.transparent));
}

#[test]
fn highlighting_one_building_leaves_others() {
    let ctx = PipelineContext::new(PipelineConfig::default(), Ok(GeoDataset::empty())).unwrap();
    let mut out = ctx.run(&five_triangles()).unwrap();

    out.find_mut("Building_0").unwrap().highlight();
    assert!(out.find("Building_0").unwrap().material.is_highlighted());
    assert!(!out.find("Building_1").unwrap().material.is_highlighted());
}

#[test]
fn scene_tree_runs_last_mesh() {
    let ctx = PipelineContext::new(PipelineConfig::default(), Ok(GeoDataset::empty())).unwrap();
    let scene = SceneNode::Group {
        name: "gltf".into(),
        children: vec![
            SceneNode::Light { name: "sun".into() },
            MeshNode::new(
                "placeholder",
                vec![0.0, 0.0, 0.0, 1.0, 0.0, 0.0, 0.0, 0.0, 1.0],
                vec![0, 2, 1],
            )
            .into(),
            five_triangles().into(),
        ],
    };
    let out = ctx.run_scene(&scene).unwrap();
    assert_eq!(out.buildings.len(), 2);
}
