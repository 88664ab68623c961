use crate::dataset::{self, Dataset};
use crate::error::{EngineError, StoreError};
use crate::ipc::error::{err, ok};
use crate::ipc::types::{AppState, Request};
use crate::store::SqliteStore;
use rusqlite::Connection;
use serde::Serialize;
use serde_json::json;

pub fn required_str(req: &Request, key: &str) -> Result<String, serde_json::Value> {
    req.params
        .get(key)
        .and_then(|v| v.as_str())
        .map(|v| v.trim().to_string())
        .filter(|v| !v.is_empty())
        .ok_or_else(|| err(&req.id, "bad_params", format!("missing {}", key), None))
}

pub fn no_workspace(req: &Request) -> serde_json::Value {
    err(&req.id, "no_workspace", "select a workspace first", None)
}

pub fn db_conn<'a>(state: &'a AppState, req: &Request) -> Result<&'a Connection, serde_json::Value> {
    state.db.as_ref().ok_or_else(|| no_workspace(req))
}

pub fn engine_err(req: &Request, e: EngineError) -> serde_json::Value {
    err(&req.id, e.code(), e.to_string(), None)
}

/// Store failures keep whatever snapshot is loaded; the response says so.
pub fn store_err(req: &Request, e: &StoreError, stale: Option<&Dataset>) -> serde_json::Value {
    tracing::warn!(error = %e, stale = stale.is_some(), "record store unavailable");
    err(
        &req.id,
        e.code(),
        e.to_string(),
        Some(json!({
            "stale": stale.is_some(),
            "version": stale.map(|d| d.version),
        })),
    )
}

pub fn ok_value<T: Serialize>(req: &Request, value: &T) -> serde_json::Value {
    match serde_json::to_value(value) {
        Ok(v) => ok(&req.id, v),
        Err(e) => err(&req.id, "serialize_failed", e.to_string(), None),
    }
}

/// Like `ok_value`, tagging the result with the snapshot version it was
/// computed from.
pub fn ok_versioned<T: Serialize>(req: &Request, version: u64, value: &T) -> serde_json::Value {
    match serde_json::to_value(value) {
        Ok(mut v) => {
            if let Some(obj) = v.as_object_mut() {
                obj.insert("datasetVersion".into(), json!(version));
            }
            ok(&req.id, v)
        }
        Err(e) => err(&req.id, "serialize_failed", e.to_string(), None),
    }
}

/// The loaded snapshot, fetching it on first use only.
pub fn ensure_dataset<'a>(
    state: &'a mut AppState,
    req: &Request,
) -> Result<&'a Dataset, serde_json::Value> {
    if state.dataset.is_none() {
        let conn = state.db.as_ref().ok_or_else(|| no_workspace(req))?;
        let store = SqliteStore::new(conn);
        if let Err(e) = dataset::refresh(&mut state.dataset, &store) {
            return Err(store_err(req, &e, None));
        }
    }
    state
        .dataset
        .as_ref()
        .ok_or_else(|| err(&req.id, "store_unavailable", "no dataset loaded", None))
}
