//! Integration tests for cycle detection (`is_dag`, D001–D002).

#[allow(dead_code)]
mod helpers;

use helpers::*;
use pipeline_validator::parse;
use pipeline_validator::validate::dag;

#[test]
fn empty_graph_is_a_dag() {
    let report = report(&[], &[]);
    assert!(report.is_dag);
    assert!(report.dag_validation_messages.is_empty());
    assert_eq!(report.cycle, None);
}

#[test]
fn isolated_nodes_are_acyclic() {
    let report = report(&["a", "b", "c"], &[]);
    assert!(report.is_dag);
}

#[test]
fn self_loop_is_a_cycle_of_length_one() {
    let report = report(&["a"], &[("a", "a")]);
    assert!(!report.is_dag);
    assert_eq!(report.cycle, Some(vec!["a".to_string(), "a".to_string()]));
    assert_has_code(&report, "D001");
    assert_eq!(
        report.dag_validation_messages,
        vec!["Self-loop detected (node connected to itself): a → a"]
    );
}

#[test]
fn three_node_cycle_reports_closed_path() {
    let report = report(&["a", "b", "c"], &[("a", "b"), ("b", "c"), ("c", "a")]);
    assert!(!report.is_dag);
    assert!(!report.is_pipeline);
    let cycle = report.cycle.as_ref().expect("cycle path recorded");
    assert!(is_rotation_of(cycle, &["a", "b", "c"]), "got {:?}", cycle);
    assert_has_code(&report, "D002");
    assert!(report.dag_validation_messages[0].starts_with("Complex cycle detected: "));
}

#[test]
fn cycle_fixture_from_editor() {
    let json = include_str!("fixtures/cycle.json");
    let request = parse::parse(json).unwrap();
    let report = report_for(&request);
    assert!(!report.is_dag);
    let cycle = report.cycle.as_ref().unwrap();
    assert!(is_rotation_of(cycle, &["a", "b", "c"]), "got {:?}", cycle);
}

#[test]
fn two_node_cycle_is_direct() {
    let report = report(&["a", "b"], &[("a", "b"), ("b", "a")]);
    assert!(!report.is_dag);
    let cycle = report.cycle.as_ref().unwrap();
    assert!(is_rotation_of(cycle, &["a", "b"]), "got {:?}", cycle);
    assert!(report.dag_validation_messages[0].starts_with("Direct cycle detected: "));
}

#[test]
fn cycle_in_one_component_is_found_from_any_root() {
    // the acyclic component comes first in request order
    let report = report(
        &["x", "y", "a", "b"],
        &[("x", "y"), ("a", "b"), ("b", "a")],
    );
    assert!(!report.is_dag);
    assert!(is_rotation_of(report.cycle.as_ref().unwrap(), &["a", "b"]));
}

#[test]
fn handles_do_not_split_vertices() {
    // two ports on the same aggregate node, still one vertex
    let mut request = typed_request(
        &[("src", "input"), ("agg", "aggregate")],
        &[("src", "agg"), ("agg", "src")],
    );
    request.edges[0].target_handle = Some("agg-data".into());
    request.edges[1].source_handle = Some("agg-aggregated".into());
    let report = report_for(&request);
    assert!(!report.is_dag);
    assert!(is_rotation_of(report.cycle.as_ref().unwrap(), &["src", "agg"]));
}

#[test]
fn parallel_edges_are_not_a_cycle() {
    let report = report(&["a", "b"], &[("a", "b"), ("a", "b")]);
    assert!(report.is_dag);
    assert!(report.is_pipeline);
}

#[test]
fn long_chain_does_not_overflow() {
    let ids: Vec<String> = (0..50_000).map(|i| format!("n{}", i)).collect();
    let names: Vec<&str> = ids.iter().map(String::as_str).collect();
    let pairs: Vec<(&str, &str)> = names.windows(2).map(|w| (w[0], w[1])).collect();
    let graph = build(&request(&names, &pairs));
    assert_eq!(dag::find_cycle(&graph), None);
}
