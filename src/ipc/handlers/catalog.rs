use crate::catalog;
use crate::ipc::error::ok;
use crate::ipc::helpers::{engine_err, ok_value, required_str};
use crate::ipc::types::{AppState, Request};
use serde_json::json;

fn handle_catalog_list(_state: &mut AppState, req: &Request) -> serde_json::Value {
    ok(&req.id, json!({ "fields": catalog::fields() }))
}

fn handle_catalog_describe(_state: &mut AppState, req: &Request) -> serde_json::Value {
    let field = match required_str(req, "field") {
        Ok(v) => v,
        Err(e) => return e,
    };
    match catalog::describe(&field) {
        Ok(spec) => ok_value(req, spec),
        Err(e) => engine_err(req, e),
    }
}

fn handle_catalog_domain(_state: &mut AppState, req: &Request) -> serde_json::Value {
    let field = match required_str(req, "field") {
        Ok(v) => v,
        Err(e) => return e,
    };
    match catalog::domain_of(&field) {
        Ok(domain) => ok(&req.id, json!({ "field": field, "domain": domain })),
        Err(e) => engine_err(req, e),
    }
}

pub fn try_handle(state: &mut AppState, req: &Request) -> Option<serde_json::Value> {
    match req.method.as_str() {
        "catalog.list" => Some(handle_catalog_list(state, req)),
        "catalog.describe" => Some(handle_catalog_describe(state, req)),
        "catalog.domain" => Some(handle_catalog_domain(state, req)),
        _ => None,
    }
}
