use approx::assert_relative_eq;
use nalgebra::Point3;
use pretty_assertions::assert_eq;

use hole_placer::config::{resolve_config, HoleConfig};
use hole_placer::error::ConfigurationError;
use hole_placer::export::{export_json, PlacementRecord, PlacementReport};
use hole_placer::geometry::{Ray, WallIndex};
use hole_placer::model::{Document, ElementKind, RayHit, Session, WallRef};
use hole_placer::parser::parse_scene;
use hole_placer::pipeline::{apply_plan, BatchPlan, BatchReport, HostLookup, InstanceLog, Pipeline};

const TOWER: &str = include_str!("../scenes/tower.json");

fn plan_for(session: &Session) -> BatchPlan {
    let resolved = resolve_config(session, &HoleConfig::default()).unwrap();
    let index = WallIndex::new(&resolved.host.walls);
    let lookup = HostLookup::new(resolved.host);
    Pipeline::new(&index, &lookup).plan(resolved.companion.linear_curves())
}

/// Host with walls crossing the X axis at the given entry distances, plus a
/// companion holding one duct from the origin along +X.
fn x_axis_scene(entries: &[(u64, f64)], length: f64) -> Session {
    let walls: Vec<String> = entries
        .iter()
        .map(|(id, entry)| {
            let center = entry + 0.25;
            format!(
                r#"{{ "id": {id}, "level": 1, "start": [{center}, -5, -1], "end": [{center}, 5, -1],
                     "thickness": 0.5, "height": 3 }}"#
            )
        })
        .collect();

    let json = format!(
        r#"{{
            "documents": [
                {{
                    "title": "Test_AR",
                    "active": true,
                    "levels": [{{ "id": 1, "name": "Level 1" }}],
                    "walls": [{walls}],
                    "family_symbols": [{{ "id": 50, "family": "Opening" }}],
                    "views": [{{ "id": 60, "name": "{{3D}}", "kind": "three_d" }}]
                }},
                {{
                    "title": "Test_MEP",
                    "ducts": [{{ "id": 1, "diameter": 0.2,
                                "centerline": {{ "type": "line", "start": [0, 0, 0], "end": [{length}, 0, 0] }} }}]
                }}
            ]
        }}"#,
        walls = walls.join(",")
    );

    parse_scene(&json).unwrap()
}

#[test]
fn two_walls_give_two_square_openings() {
    let plan = plan_for(&x_axis_scene(&[(1, 1.0), (2, 3.0)], 5.0));

    assert_eq!(plan.placements.len(), 2);
    assert_relative_eq!(plan.placements[0].point, Point3::new(1.0, 0.0, 0.0));
    assert_relative_eq!(plan.placements[1].point, Point3::new(3.0, 0.0, 0.0));
    assert_eq!(plan.placements[0].host_wall, WallRef::local(1));
    assert_eq!(plan.placements[1].host_wall, WallRef::local(2));
    for placement in &plan.placements {
        assert_relative_eq!(placement.width, 0.2);
        assert_relative_eq!(placement.height, 0.2);
    }
}

#[test]
fn no_walls_gives_no_openings() {
    let plan = plan_for(&x_axis_scene(&[], 5.0));

    assert!(plan.placements.is_empty());
    assert!(plan.geometry_errors.is_empty());
}

#[test]
fn wall_past_the_element_end_is_ignored() {
    let plan = plan_for(&x_axis_scene(&[(1, 6.0)], 5.0));

    assert!(plan.placements.is_empty());
}

#[test]
fn wall_at_the_element_end_is_included() {
    let plan = plan_for(&x_axis_scene(&[(1, 5.0)], 5.0));

    assert_eq!(plan.placements.len(), 1);
    assert_relative_eq!(plan.placements[0].point, Point3::new(5.0, 0.0, 0.0));
}

#[test]
fn tower_scene_places_openings_per_wall() {
    let session = parse_scene(TOWER).unwrap();
    let plan = plan_for(&session);

    let walls_for = |element: u64| -> Vec<WallRef> {
        plan.placements
            .iter()
            .filter(|p| p.source_id == element)
            .map(|p| p.host_wall)
            .collect()
    };

    assert_eq!(
        walls_for(100),
        vec![WallRef::local(10), WallRef::linked(7, 10), WallRef::local(11)]
    );
    assert_eq!(walls_for(101), vec![WallRef::local(20)]);
    assert!(walls_for(102).is_empty());
    assert_eq!(walls_for(200), vec![WallRef::local(10), WallRef::linked(7, 10)]);
    assert_eq!(walls_for(202), vec![WallRef::local(10)]);
    assert_eq!(plan.geometry_errors.len(), 1);

    let upper = plan
        .placements
        .iter()
        .find(|p| p.source_id == 101)
        .unwrap();
    assert_eq!(upper.level_id, 2);
    assert_relative_eq!(upper.point, Point3::new(1.75, 0.0, 5.0));
}

#[test]
fn tower_scene_summary_and_instances() {
    let session = parse_scene(TOWER).unwrap();
    let config = HoleConfig::default();
    let resolved = resolve_config(&session, &config).unwrap();
    let index = WallIndex::new(&resolved.host.walls);
    let lookup = HostLookup::new(resolved.host);
    let plan = Pipeline::new(&index, &lookup).plan_parallel(resolved.companion.linear_curves());

    let mut log = InstanceLog::new(&config.width_parameter, &config.height_parameter);
    let applied = apply_plan(&plan, resolved.symbol, &mut log);

    assert_eq!(
        applied.report,
        BatchReport {
            duct_openings: 4,
            pipe_openings: 3,
            skipped_elements: 1,
            skipped_hits: 0,
            failed_openings: 0,
        }
    );
    assert_eq!(log.instances().len(), 7);
    assert_eq!(applied.created, plan.placements);
    for (instance, placement) in log.instances().iter().zip(&plan.placements) {
        assert_eq!(instance.symbol_id, 50);
        assert_eq!(instance.parameter("Width"), Some(placement.width));
        assert_eq!(instance.parameter("Height"), Some(placement.height));
    }
}

#[test]
fn wall_on_deleted_level_is_counted_not_fatal() {
    let mut session = x_axis_scene(&[(1, 1.0), (2, 3.0)], 5.0);
    session.documents[0].walls[0].level_id = 99;

    let plan = plan_for(&session);

    assert_eq!(plan.placements.len(), 1);
    assert_eq!(plan.placements[0].host_wall, WallRef::local(2));
    assert_eq!(plan.resolution_errors.len(), 1);
}

#[test]
fn missing_family_aborts_before_planning() {
    let mut session = parse_scene(TOWER).unwrap();
    session.documents[0].family_symbols.clear();

    assert_eq!(
        resolve_config(&session, &HoleConfig::default()).unwrap_err(),
        ConfigurationError::MissingFamily {
            family: "Opening".to_string()
        }
    );
}

#[test]
fn rerunning_produces_identical_placements() {
    let session = parse_scene(TOWER).unwrap();

    assert_eq!(plan_for(&session), plan_for(&session));
}

#[test]
fn json_export_contains_every_placement() {
    let session = parse_scene(TOWER).unwrap();
    let plan = plan_for(&session);
    let host: &Document = &session.documents[0];

    let report = PlacementReport {
        host: host.title.clone(),
        companion: session.documents[1].title.clone(),
        view: "{3D}".to_string(),
        summary: BatchReport::default(),
        placements: PlacementRecord::collect(&plan.placements, host),
    };
    assert_eq!(report.count(ElementKind::Duct), 4);

    let path = std::env::temp_dir().join(format!("hole-placer-{}.json", std::process::id()));
    export_json(&report, &path).unwrap();
    let written: serde_json::Value =
        serde_json::from_str(&std::fs::read_to_string(&path).unwrap()).unwrap();
    std::fs::remove_file(&path).unwrap();

    assert_eq!(written["placements"].as_array().unwrap().len(), 7);
    assert_eq!(written["placements"][0]["level_name"], "Level 1");
    assert_eq!(written["host"], "Tower_AR");
}

#[test]
fn near_coincident_hits_on_one_wall_give_one_opening() {
    let session = x_axis_scene(&[(7, 1.0)], 5.0);
    let resolved = resolve_config(&session, &HoleConfig::default()).unwrap();
    let lookup = HostLookup::new(resolved.host);
    let intersector = |_: &Ray, _: f64| {
        vec![
            RayHit::new(1.0, WallRef::local(7)),
            RayHit::new(1.0001, WallRef::local(7)),
        ]
    };

    let plan = Pipeline::new(&intersector, &lookup).plan(resolved.companion.linear_curves());

    assert_eq!(plan.placements.len(), 1);
    let placement = &plan.placements[0];
    assert_eq!(placement.host_wall, WallRef::local(7));
    assert_eq!(placement.level_id, 1);
    assert_relative_eq!(placement.point, Point3::new(1.0, 0.0, 0.0));
    assert_relative_eq!(placement.width, 0.2);
    assert_relative_eq!(placement.height, 0.2);
}
