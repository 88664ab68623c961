use crate::dataset;
use crate::ipc::error::ok;
use crate::ipc::helpers::{no_workspace, ok_value, store_err};
use crate::ipc::types::{AppState, Request};
use crate::store::SqliteStore;
use serde_json::json;

fn handle_dataset_refresh(state: &mut AppState, req: &Request) -> serde_json::Value {
    let Some(conn) = state.db.as_ref() else {
        return no_workspace(req);
    };
    let store = SqliteStore::new(conn);
    match dataset::refresh(&mut state.dataset, &store) {
        Ok(d) => ok_value(req, d),
        Err(e) => store_err(req, &e, state.dataset.as_ref()),
    }
}

fn handle_dataset_status(state: &mut AppState, req: &Request) -> serde_json::Value {
    match state.dataset.as_ref() {
        Some(d) => ok(
            &req.id,
            json!({
                "loaded": true,
                "version": d.version,
                "recordCount": d.record_count,
                "loadedAt": d.loaded_at
            }),
        ),
        None => ok(&req.id, json!({ "loaded": false })),
    }
}

pub fn try_handle(state: &mut AppState, req: &Request) -> Option<serde_json::Value> {
    match req.method.as_str() {
        "dataset.refresh" => Some(handle_dataset_refresh(state, req)),
        "dataset.status" => Some(handle_dataset_status(state, req)),
        _ => None,
    }
}
