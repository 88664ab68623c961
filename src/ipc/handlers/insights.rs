use crate::ipc::error::err;
use crate::ipc::helpers::{engine_err, ensure_dataset, ok_versioned};
use crate::ipc::types::{AppState, Request};
use crate::views::{self, Selection};

fn parse_selection(req: &Request) -> Result<Selection, serde_json::Value> {
    if !req.params.is_object() {
        return Err(err(&req.id, "bad_params", "params must be an object", None));
    }
    serde_json::from_value(req.params.clone())
        .map_err(|e| err(&req.id, "bad_params", format!("invalid selection: {e}"), None))
}

fn handle_insights_view(state: &mut AppState, req: &Request) -> serde_json::Value {
    let selection = match parse_selection(req) {
        Ok(v) => v,
        Err(e) => return e,
    };
    let ds = match ensure_dataset(state, req) {
        Ok(v) => v,
        Err(e) => return e,
    };
    match views::analyze(&ds.records, &selection) {
        Ok(report) => {
            tracing::debug!(mode = selection.mode.as_str(), insight = report.insight.text(), "view computed");
            ok_versioned(req, ds.version, &report)
        }
        Err(e) => engine_err(req, e),
    }
}

pub fn try_handle(state: &mut AppState, req: &Request) -> Option<serde_json::Value> {
    match req.method.as_str() {
        "insights.view" => Some(handle_insights_view(state, req)),
        _ => None,
    }
}
