//! Integration tests for butterfly-guidance
//!
//! The first half exercises the public library API on whole routes; the
//! second half runs the compiled binary against route files on disk.

use std::io::Write;
use std::process::{Command, Output, Stdio};

use butterfly_guidance::guidance::{Intersection, LaneTupel, TurnLaneType};
use butterfly_guidance::{
    collapse_use_lane, suppress_short_name_segments, validate_collapsed, DirectionModifier,
    ReductionConfig, RouteDocument, RouteStep, TravelMode, TurnType, VerbosityReducer,
    WaypointType,
};
use serde_json::{json, Value};

fn step(turn_type: TurnType, name_id: u32, name: &str, distance: f64) -> RouteStep {
    RouteStep::new(turn_type, DirectionModifier::Straight)
        .with_name(name_id, name)
        .with_extent(distance, distance / 8.0)
}

fn use_lane(left: TurnLaneType, right: TurnLaneType, distance: f64) -> RouteStep {
    step(TurnType::UseLane, 1, "A", distance).with_intersection(Intersection {
        bearings: vec![0, 180],
        entry: vec![false, true],
        lanes: LaneTupel::new(1, 1),
        lane_description: vec![left, TurnLaneType::STRAIGHT, right],
    })
}

fn anchored(inner: Vec<RouteStep>) -> Vec<RouteStep> {
    let mut steps = vec![RouteStep::depart().with_name(1, "A")];
    steps.extend(inner);
    steps.push(RouteStep::arrive());
    steps
}

fn totals(steps: &[RouteStep]) -> (f64, f64) {
    (
        steps.iter().map(|s| s.distance).sum(),
        steps.iter().map(|s| s.duration).sum(),
    )
}

/// A deterministic mix of routes covering every step kind the passes care about
fn route_corpus() -> Vec<Vec<RouteStep>> {
    let kinds = [
        TurnType::Turn,
        TurnType::NewName,
        TurnType::Suppressed,
        TurnType::UseLane,
        TurnType::Continue,
        TurnType::NewName,
    ];
    let lanes = [
        TurnLaneType::LEFT,
        TurnLaneType::RIGHT,
        TurnLaneType::STRAIGHT,
        TurnLaneType::NONE,
    ];

    (0..40)
        .map(|seed: usize| {
            let length = 1 + seed % 9;
            let inner = (0..length)
                .map(|i| {
                    let k = seed * 7 + i * 3;
                    let distance = ((k * 37) % 160) as f64 + 0.5;
                    let turn_type = kinds[k % kinds.len()];
                    let name_id = (k % 4) as u32;
                    let name = ["A", "B", "C", "D"][name_id as usize];
                    let mut s = if turn_type == TurnType::UseLane {
                        use_lane(lanes[k % 4], lanes[(k / 4) % 4], distance)
                    } else {
                        step(turn_type, name_id, name, distance)
                    };
                    if k % 11 == 0 {
                        s = s.with_mode(TravelMode::Cycling);
                    }
                    s
                })
                .collect();
            anchored(inner)
        })
        .collect()
}

#[test]
fn test_short_name_segment_scenarios() {
    let merged = suppress_short_name_segments(anchored(vec![
        step(TurnType::Turn, 1, "A", 20.0),
        step(TurnType::NewName, 2, "B", 50.0),
        step(TurnType::Suppressed, 2, "B", 40.0),
        step(TurnType::Turn, 3, "C", 30.0),
    ]));
    assert_eq!(merged.len(), 4);
    assert_eq!(merged[1].turn_type(), TurnType::Turn);
    assert_eq!(merged[1].distance, 110.0);
    assert_eq!(merged[2].distance, 30.0);

    let kept = suppress_short_name_segments(anchored(vec![
        step(TurnType::Turn, 1, "A", 20.0),
        step(TurnType::NewName, 2, "B", 50.0),
        step(TurnType::Suppressed, 2, "B", 60.0),
        step(TurnType::Turn, 3, "C", 30.0),
    ]));
    assert_eq!(kept.len(), 6);
    assert_eq!(kept[2].turn_type(), TurnType::NewName);
    assert_eq!(kept[3].turn_type(), TurnType::Suppressed);
}

#[test]
fn test_use_lane_scenarios() {
    let ambiguous = collapse_use_lane(anchored(vec![
        step(TurnType::Turn, 1, "A", 20.0),
        use_lane(TurnLaneType::LEFT, TurnLaneType::STRAIGHT, 40.0),
    ]));
    assert_eq!(ambiguous.len(), 4);

    let unambiguous = collapse_use_lane(anchored(vec![
        step(TurnType::Turn, 1, "A", 20.0),
        use_lane(TurnLaneType::RIGHT, TurnLaneType::LEFT, 40.0),
    ]));
    assert_eq!(unambiguous.len(), 3);
    assert_eq!(unambiguous[1].distance, 60.0);
}

#[test]
fn test_empty_input() {
    assert!(suppress_short_name_segments(Vec::new()).is_empty());
    assert!(collapse_use_lane(Vec::new()).is_empty());
}

#[test]
fn test_reduction_properties_hold_on_corpus() {
    let reducer = VerbosityReducer::default();

    for (i, steps) in route_corpus().into_iter().enumerate() {
        let (distance, duration) = totals(&steps);
        let len = steps.len();

        let reduced = reducer.reduce(steps);

        assert!(reduced.len() <= len, "route {i} grew");
        assert_eq!(reduced[0].waypoint_type(), WaypointType::Depart, "route {i}");
        assert_eq!(reduced[reduced.len() - 1].waypoint_type(), WaypointType::Arrive, "route {i}");
        validate_collapsed(i, &reduced).unwrap_or_else(|e| panic!("route {i}: {e}"));

        let (reduced_distance, reduced_duration) = totals(&reduced);
        assert!((distance - reduced_distance).abs() < 1e-6, "route {i} lost distance");
        assert!((duration - reduced_duration).abs() < 1e-6, "route {i} lost duration");
    }
}

#[test]
fn test_each_pass_is_idempotent_on_corpus() {
    for (i, steps) in route_corpus().into_iter().enumerate() {
        let names = suppress_short_name_segments(steps.clone());
        assert_eq!(suppress_short_name_segments(names.clone()), names, "route {i}");

        let lanes = collapse_use_lane(steps);
        assert_eq!(collapse_use_lane(lanes.clone()), lanes, "route {i}");
    }
}

#[test]
fn test_cutoff_threshold() {
    let route = |distance: f64| {
        anchored(vec![
            step(TurnType::Turn, 1, "A", 20.0),
            step(TurnType::NewName, 2, "B", distance),
            step(TurnType::Turn, 3, "C", 30.0),
        ])
    };

    assert_eq!(suppress_short_name_segments(route(105.0)).len(), 5);
    assert_eq!(suppress_short_name_segments(route(104.999)).len(), 4);

    let strict = VerbosityReducer::new(ReductionConfig {
        name_segment_cutoff: 200.0,
        ..ReductionConfig::names_only()
    });
    assert_eq!(strict.reduce(route(150.0)).len(), 4);
}

// ---------------------------------------------------------------------------
// Binary
// ---------------------------------------------------------------------------

fn binary_path() -> &'static str {
    env!("CARGO_BIN_EXE_butterfly-guidance")
}

fn step_json(turn_type: &str, name_id: u32, name: &str, distance: f64) -> Value {
    json!({
        "name_id": name_id,
        "name": name,
        "maneuver": { "instruction": { "type": turn_type, "direction_modifier": "straight" } },
        "intersections": [ { "bearings": [0, 180], "entry": [false, true] } ],
        "distance": distance,
        "duration": distance / 10.0,
        "weight": distance / 10.0
    })
}

fn waypoint_json(waypoint_type: &str) -> Value {
    json!({
        "maneuver": {
            "instruction": { "type": "no_turn", "direction_modifier": "u_turn" },
            "waypoint_type": waypoint_type
        },
        "intersections": [ { "bearings": [0], "entry": [true] } ],
        "distance": 0.0,
        "duration": 0.0
    })
}

fn route_document() -> Value {
    json!({
        "routes": [ {
            "legs": [ {
                "steps": [
                    waypoint_json("depart"),
                    step_json("turn", 1, "Main Street", 20.0),
                    step_json("new_name", 2, "Market Square", 50.0),
                    step_json("suppressed", 2, "Market Square", 40.0),
                    step_json("turn", 3, "Station Road", 30.0),
                    waypoint_json("arrive")
                ]
            } ]
        } ]
    })
}

fn write_fixture(contents: &str) -> tempfile::NamedTempFile {
    let mut file = tempfile::NamedTempFile::new().expect("create fixture");
    file.write_all(contents.as_bytes()).expect("write fixture");
    file
}

fn run(args: &[&str]) -> Output {
    Command::new(binary_path())
        .args(args)
        .output()
        .expect("Failed to run butterfly-guidance")
}

fn step_types(document: &Value) -> Vec<String> {
    document["routes"][0]["legs"][0]["steps"]
        .as_array()
        .expect("steps array")
        .iter()
        .map(|s| s["maneuver"]["instruction"]["type"].as_str().unwrap_or_default().to_string())
        .collect()
}

#[test]
fn test_cli_reduces_to_stdout() {
    let input = write_fixture(&route_document().to_string());

    let output = run(&[input.path().to_str().unwrap()]);

    assert!(output.status.success(), "stderr: {}", String::from_utf8_lossy(&output.stderr));
    let reduced: Value = serde_json::from_slice(&output.stdout).expect("stdout is JSON");
    assert_eq!(step_types(&reduced), vec!["no_turn", "turn", "turn", "no_turn"]);
    assert_eq!(reduced["routes"][0]["legs"][0]["steps"][1]["distance"], 110.0);

    let stderr = String::from_utf8_lossy(&output.stderr);
    assert!(stderr.contains("leg 0: 6 -> 4 steps (2 removed)"), "stderr: {stderr}");
}

#[test]
fn test_cli_writes_output_file() {
    let input = write_fixture(&route_document().to_string());
    let dir = tempfile::tempdir().unwrap();
    let out = dir.path().join("reduced.json");

    let output = run(&[input.path().to_str().unwrap(), out.to_str().unwrap()]);

    assert!(output.status.success());
    assert!(output.stdout.is_empty());
    let document = RouteDocument::read(&out).expect("output is a route document");
    assert_eq!(document.routes[0].legs[0].steps.len(), 4);
}

#[test]
fn test_cli_reads_stdin() {
    let mut child = Command::new(binary_path())
        .arg("-")
        .stdin(Stdio::piped())
        .stdout(Stdio::piped())
        .stderr(Stdio::piped())
        .spawn()
        .expect("Failed to spawn butterfly-guidance");
    child
        .stdin
        .take()
        .unwrap()
        .write_all(route_document().to_string().as_bytes())
        .unwrap();
    let output = child.wait_with_output().unwrap();

    assert!(output.status.success());
    let reduced: Value = serde_json::from_slice(&output.stdout).unwrap();
    assert_eq!(step_types(&reduced).len(), 4);
}

#[test]
fn test_cli_pass_and_cutoff_overrides() {
    let input = write_fixture(&route_document().to_string());
    let path = input.path().to_str().unwrap();

    let lanes_only = run(&[path, "--pass", "lanes"]);
    let reduced: Value = serde_json::from_slice(&lanes_only.stdout).unwrap();
    assert_eq!(step_types(&reduced).len(), 6);

    let tight_cutoff = run(&[path, "--cutoff", "60"]);
    let reduced: Value = serde_json::from_slice(&tight_cutoff.stdout).unwrap();
    assert_eq!(step_types(&reduced).len(), 6);
}

#[test]
fn test_cli_config_file() {
    let input = write_fixture(&route_document().to_string());
    let config = write_fixture("suppress_short_name_segments = false\n");

    let output = run(&[
        input.path().to_str().unwrap(),
        "--config",
        config.path().to_str().unwrap(),
    ]);

    assert!(output.status.success());
    let reduced: Value = serde_json::from_slice(&output.stdout).unwrap();
    assert_eq!(step_types(&reduced).len(), 6);
}

#[test]
fn test_cli_validate_only() {
    let input = write_fixture(&route_document().to_string());

    let output = run(&[input.path().to_str().unwrap(), "--validate-only"]);

    assert!(output.status.success());
    assert!(output.stdout.is_empty());
    assert!(String::from_utf8_lossy(&output.stderr).contains("1 legs valid"));
}

#[test]
fn test_cli_rejects_unanchored_route() {
    let mut document = route_document();
    document["routes"][0]["legs"][0]["steps"]
        .as_array_mut()
        .unwrap()
        .remove(0);
    let input = write_fixture(&document.to_string());

    let output = run(&[input.path().to_str().unwrap()]);

    assert!(!output.status.success());
    assert!(output.stdout.is_empty());
    let stderr = String::from_utf8_lossy(&output.stderr);
    assert!(stderr.contains("Invalid route (leg 0)"), "stderr: {stderr}");
}

#[test]
fn test_cli_rejects_malformed_json_and_missing_file() {
    let input = write_fixture("{ not json");
    assert!(!run(&[input.path().to_str().unwrap()]).status.success());

    let output = run(&["/nonexistent/route.json"]);
    assert!(!output.status.success());
    assert!(String::from_utf8_lossy(&output.stderr).contains("Failed to read"));
}
