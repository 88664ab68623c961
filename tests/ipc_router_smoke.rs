mod test_support;

use serde_json::json;
use std::io::{BufRead, Write};
use test_support::{seeded_workspace, spawn_sidecar};

#[test]
fn health_and_unknown_methods() {
    let mut sidecar = spawn_sidecar();
    let health = sidecar.request_ok("health", json!({}));
    assert!(health.get("version").and_then(|v| v.as_str()).is_some());
    assert!(health.get("workspacePath").map(|v| v.is_null()).unwrap_or(false));

    sidecar.request_err("students.list", json!({}), "not_implemented");
}

#[test]
fn malformed_line_gets_bad_json_and_loop_continues() {
    let mut sidecar = spawn_sidecar();
    writeln!(sidecar.stdin, "{{not json").expect("write");
    sidecar.stdin.flush().expect("flush");
    let mut line = String::new();
    sidecar.reader.read_line(&mut line).expect("read");
    let value: serde_json::Value = serde_json::from_str(line.trim()).expect("json");
    assert_eq!(value["ok"], json!(false));
    assert_eq!(value["error"]["code"], json!("bad_json"));

    sidecar.request_ok("health", json!({}));
}

#[test]
fn data_methods_need_a_workspace() {
    let mut sidecar = spawn_sidecar();
    sidecar.request_err("records.list", json!({}), "no_workspace");
    sidecar.request_err("dataset.refresh", json!({}), "no_workspace");
    sidecar.request_err("analytics.frequency", json!({ "field": "sex" }), "no_workspace");
    // The catalog is static and works without one.
    sidecar.request_ok("catalog.list", json!({}));
}

#[test]
fn router_dispatch_covers_handler_families() {
    let (mut sidecar, _workspace) = seeded_workspace("natinsightd-router-smoke");

    let calls = [
        ("records.list", json!({})),
        ("dataset.refresh", json!({})),
        ("dataset.status", json!({})),
        ("catalog.list", json!({})),
        ("catalog.describe", json!({ "field": "study_habit" })),
        ("catalog.domain", json!({ "field": "sex" })),
        ("analytics.frequency", json!({ "field": "ethnic" })),
        ("analytics.crossTab", json!({ "rowField": "sex", "colField": "ethnic" })),
        (
            "analytics.groupedAverage",
            json!({ "groupField": "sex", "valueField": "age" }),
        ),
        (
            "analytics.pairedSamples",
            json!({ "xField": "age", "yField": "nat_results" }),
        ),
        (
            "analytics.correlate",
            json!({ "xField": "age", "yField": "nat_results" }),
        ),
        ("analytics.trend", json!({ "field": "nat_results" })),
        ("analytics.dashboard", json!({})),
        (
            "insights.view",
            json!({ "mode": "distribution", "primary": "study_habit" }),
        ),
    ];
    for (method, params) in calls {
        sidecar.request_ok(method, params);
    }
}
