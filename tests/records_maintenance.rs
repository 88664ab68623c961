mod test_support;

use serde_json::json;
use test_support::{seeded_workspace, spawn_sidecar, temp_dir, write_file};

fn id_of(records: &serde_json::Value, respondent: &str) -> String {
    records["records"]
        .as_array()
        .expect("records")
        .iter()
        .find(|r| r["respondents"] == json!(respondent))
        .and_then(|r| r["id"].as_str())
        .expect("respondent id")
        .to_string()
}

#[test]
fn list_keeps_import_order_and_raw_values() {
    let (mut sidecar, _ws) = seeded_workspace("natinsightd-list");
    let listed = sidecar.request_ok("records.list", json!({}));
    let rows = listed["records"].as_array().expect("records");
    let names: Vec<&str> = rows
        .iter()
        .filter_map(|r| r["respondents"].as_str())
        .collect();
    assert_eq!(names, vec!["R-001", "R-002", "R-003", "R-004"]);
    assert_eq!(rows[0]["nat_results"], json!(90.0));
    assert_eq!(rows[3]["nat_results"], json!("N/A"));
}

#[test]
fn update_then_refresh_changes_analytics() {
    let (mut sidecar, _ws) = seeded_workspace("natinsightd-update");
    let listed = sidecar.request_ok("records.list", json!({}));
    let id = id_of(&listed, "R-004");

    let updated = sidecar.request_ok(
        "records.update",
        json!({
            "id": id,
            "record": {
                "respondents": "R-004",
                "sex": "Female",
                "type_of_school": "Public",
                "nat_results": 60
            }
        }),
    );
    assert_eq!(updated["updated"], json!(true));
    assert_eq!(updated["record"]["id"], json!(id));
    assert_eq!(updated["record"]["nat_results"], json!(60.0));

    let d = sidecar.request_ok("dataset.refresh", json!({}));
    assert_eq!(d["version"], json!(1));
    let g = sidecar.request_ok(
        "analytics.groupedAverage",
        json!({ "groupField": "type_of_school", "valueField": "nat_results" }),
    );
    assert_eq!(g["averages"], json!([85.0, 65.0]));
    assert_eq!(g["sampleCounts"], json!([2, 2]));

    sidecar.request_err(
        "records.update",
        json!({ "id": "missing", "record": { "sex": "Male" } }),
        "not_found",
    );
    sidecar.request_err(
        "records.update",
        json!({ "id": id, "record": "Male" }),
        "bad_params",
    );
}

#[test]
fn delete_removes_record_once() {
    let (mut sidecar, _ws) = seeded_workspace("natinsightd-delete");
    let listed = sidecar.request_ok("records.list", json!({}));
    let id = id_of(&listed, "R-002");

    let deleted = sidecar.request_ok("records.delete", json!({ "id": id }));
    assert_eq!(deleted["deleted"], json!(true));
    sidecar.request_err("records.delete", json!({ "id": id }), "not_found");

    let t = sidecar.request_ok("analytics.frequency", json!({ "field": "ethnic" }));
    assert_eq!(t["labels"], json!(["Cebuano", "Maranao", "Iliganon"]));
    assert_eq!(t["counts"], json!([2, 0, 1]));
}

#[test]
fn import_rejects_unrelated_or_missing_files() {
    let workspace = temp_dir("natinsightd-import-bad");
    let mut sidecar = spawn_sidecar();
    sidecar.request_ok(
        "workspace.select",
        json!({ "path": workspace.to_string_lossy() }),
    );

    let other = write_file(&workspace, "other.csv", "name,colour\nA,red\n");
    sidecar.request_err(
        "records.importCsv",
        json!({ "path": other.to_string_lossy() }),
        "import_failed",
    );
    sidecar.request_err(
        "records.importCsv",
        json!({ "path": workspace.join("nope.csv").to_string_lossy() }),
        "import_failed",
    );
    sidecar.request_err("records.importCsv", json!({}), "bad_params");

    let listed = sidecar.request_ok("records.list", json!({}));
    assert_eq!(listed["records"], json!([]));
}

#[test]
fn workspace_config_sets_store_file_and_dashboard_size() {
    let workspace = temp_dir("natinsightd-config");
    write_file(
        &workspace,
        "natinsightd.toml",
        "[store]\nfile_name = \"survey.sqlite3\"\n\n[dashboard]\ntop_performers = 1\n",
    );
    let csv = write_file(&workspace, "nat.csv", test_support::SAMPLE_CSV);

    let mut sidecar = spawn_sidecar();
    let selected = sidecar.request_ok(
        "workspace.select",
        json!({ "path": workspace.to_string_lossy() }),
    );
    assert_eq!(selected["config"]["store"]["file_name"], json!("survey.sqlite3"));
    assert!(workspace.join("survey.sqlite3").is_file());

    sidecar.request_ok("records.importCsv", json!({ "path": csv.to_string_lossy() }));
    let d = sidecar.request_ok("analytics.dashboard", json!({}));
    let top = d["topPerformers"].as_array().expect("top");
    assert_eq!(top.len(), 1);
    assert_eq!(top[0]["record"]["respondents"], json!("R-001"));
}

#[test]
fn broken_config_falls_back_to_defaults() {
    let workspace = temp_dir("natinsightd-config-broken");
    write_file(&workspace, "natinsightd.toml", "[store\nfile_name = ");
    let mut sidecar = spawn_sidecar();
    let selected = sidecar.request_ok(
        "workspace.select",
        json!({ "path": workspace.to_string_lossy() }),
    );
    assert_eq!(
        selected["config"]["store"]["file_name"],
        json!("natinsight.sqlite3")
    );
    assert_eq!(selected["config"]["dashboard"]["top_performers"], json!(5));
}
