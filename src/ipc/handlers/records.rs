use crate::import;
use crate::ipc::error::{err, ok};
use crate::ipc::helpers::{db_conn, required_str, store_err};
use crate::ipc::types::{AppState, Request};
use crate::record::Record;
use crate::store::{RecordStore, SqliteStore};
use serde_json::json;
use std::path::PathBuf;

fn parse_record(req: &Request) -> Result<Record, serde_json::Value> {
    let Some(raw) = req.params.get("record") else {
        return Err(err(&req.id, "bad_params", "missing record", None));
    };
    if !raw.is_object() {
        return Err(err(&req.id, "bad_params", "record must be an object", None));
    }
    serde_json::from_value(raw.clone())
        .map_err(|e| err(&req.id, "bad_params", format!("invalid record: {e}"), None))
}

fn handle_records_import_csv(state: &mut AppState, req: &Request) -> serde_json::Value {
    let conn = match db_conn(state, req) {
        Ok(v) => v,
        Err(e) => return e,
    };
    let path = match required_str(req, "path") {
        Ok(v) => PathBuf::from(v),
        Err(e) => return e,
    };

    let parsed = match import::read_csv_file(&path) {
        Ok(v) => v,
        Err(e) => return err(&req.id, "import_failed", format!("{e:#}"), None),
    };
    let ids = match SqliteStore::new(conn).insert_many(&parsed.records) {
        Ok(v) => v,
        Err(e) => return store_err(req, &e, state.dataset.as_ref()),
    };
    tracing::info!(
        path = %path.display(),
        imported = ids.len(),
        ignored = parsed.ignored_columns.len(),
        "csv imported"
    );

    ok(
        &req.id,
        json!({
            "imported": ids.len(),
            "ids": ids,
            "ignoredColumns": parsed.ignored_columns
        }),
    )
}

fn handle_records_list(state: &mut AppState, req: &Request) -> serde_json::Value {
    let conn = match db_conn(state, req) {
        Ok(v) => v,
        Err(e) => return e,
    };
    match SqliteStore::new(conn).fetch_all() {
        Ok(records) => ok(&req.id, json!({ "records": records })),
        Err(e) => store_err(req, &e, state.dataset.as_ref()),
    }
}

fn handle_records_update(state: &mut AppState, req: &Request) -> serde_json::Value {
    let conn = match db_conn(state, req) {
        Ok(v) => v,
        Err(e) => return e,
    };
    let id = match required_str(req, "id") {
        Ok(v) => v,
        Err(e) => return e,
    };
    let record = match parse_record(req) {
        Ok(v) => v,
        Err(e) => return e,
    };
    let store = SqliteStore::new(conn);
    match store.update(&id, &record).and_then(|found| {
        if found {
            store.get(&id)
        } else {
            Ok(None)
        }
    }) {
        Ok(Some(stored)) => ok(&req.id, json!({ "updated": true, "record": stored })),
        Ok(None) => err(&req.id, "not_found", "record not found", None),
        Err(e) => store_err(req, &e, state.dataset.as_ref()),
    }
}

fn handle_records_delete(state: &mut AppState, req: &Request) -> serde_json::Value {
    let conn = match db_conn(state, req) {
        Ok(v) => v,
        Err(e) => return e,
    };
    let id = match required_str(req, "id") {
        Ok(v) => v,
        Err(e) => return e,
    };
    match SqliteStore::new(conn).delete(&id) {
        Ok(true) => ok(&req.id, json!({ "deleted": true, "id": id })),
        Ok(false) => err(&req.id, "not_found", "record not found", None),
        Err(e) => store_err(req, &e, state.dataset.as_ref()),
    }
}

pub fn try_handle(state: &mut AppState, req: &Request) -> Option<serde_json::Value> {
    match req.method.as_str() {
        "records.importCsv" => Some(handle_records_import_csv(state, req)),
        "records.list" => Some(handle_records_list(state, req)),
        "records.update" => Some(handle_records_update(state, req)),
        "records.delete" => Some(handle_records_delete(state, req)),
        _ => None,
    }
}
