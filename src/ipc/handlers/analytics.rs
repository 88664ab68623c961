use crate::aggregate;
use crate::correlate;
use crate::dashboard;
use crate::ipc::error::err;
use crate::ipc::helpers::{engine_err, ensure_dataset, ok_versioned, required_str};
use crate::ipc::types::{AppState, Request};

fn two_fields(req: &Request, a: &str, b: &str) -> Result<(String, String), serde_json::Value> {
    Ok((required_str(req, a)?, required_str(req, b)?))
}

fn handle_analytics_frequency(state: &mut AppState, req: &Request) -> serde_json::Value {
    let field = match required_str(req, "field") {
        Ok(v) => v,
        Err(e) => return e,
    };
    let ds = match ensure_dataset(state, req) {
        Ok(v) => v,
        Err(e) => return e,
    };
    match aggregate::frequency_table(&ds.records, &field) {
        Ok(t) => ok_versioned(req, ds.version, &t),
        Err(e) => engine_err(req, e),
    }
}

fn handle_analytics_cross_tab(state: &mut AppState, req: &Request) -> serde_json::Value {
    let (row_field, col_field) = match two_fields(req, "rowField", "colField") {
        Ok(v) => v,
        Err(e) => return e,
    };
    let ds = match ensure_dataset(state, req) {
        Ok(v) => v,
        Err(e) => return e,
    };
    match aggregate::cross_tabulate(&ds.records, &row_field, &col_field) {
        Ok(t) => ok_versioned(req, ds.version, &t),
        Err(e) => engine_err(req, e),
    }
}

fn handle_analytics_grouped_average(state: &mut AppState, req: &Request) -> serde_json::Value {
    let (group_field, value_field) = match two_fields(req, "groupField", "valueField") {
        Ok(v) => v,
        Err(e) => return e,
    };
    let ds = match ensure_dataset(state, req) {
        Ok(v) => v,
        Err(e) => return e,
    };
    match aggregate::grouped_average(&ds.records, &group_field, &value_field) {
        Ok(g) => ok_versioned(req, ds.version, &g),
        Err(e) => engine_err(req, e),
    }
}

fn handle_analytics_paired_samples(state: &mut AppState, req: &Request) -> serde_json::Value {
    let (x_field, y_field) = match two_fields(req, "xField", "yField") {
        Ok(v) => v,
        Err(e) => return e,
    };
    let ds = match ensure_dataset(state, req) {
        Ok(v) => v,
        Err(e) => return e,
    };
    match aggregate::paired_samples(&ds.records, &x_field, &y_field) {
        Ok(p) => ok_versioned(req, ds.version, &p),
        Err(e) => engine_err(req, e),
    }
}

fn handle_analytics_correlate(state: &mut AppState, req: &Request) -> serde_json::Value {
    let (x_field, y_field) = match two_fields(req, "xField", "yField") {
        Ok(v) => v,
        Err(e) => return e,
    };
    let ds = match ensure_dataset(state, req) {
        Ok(v) => v,
        Err(e) => return e,
    };
    match aggregate::paired_samples(&ds.records, &x_field, &y_field) {
        Ok(p) => ok_versioned(req, ds.version, &correlate::correlate(&p)),
        Err(e) => engine_err(req, e),
    }
}

fn handle_analytics_trend(state: &mut AppState, req: &Request) -> serde_json::Value {
    let field = match required_str(req, "field") {
        Ok(v) => v,
        Err(e) => return e,
    };
    let ds = match ensure_dataset(state, req) {
        Ok(v) => v,
        Err(e) => return e,
    };
    match aggregate::trend_series(&ds.records, &field) {
        Ok(s) => ok_versioned(req, ds.version, &s),
        Err(e) => engine_err(req, e),
    }
}

fn handle_analytics_dashboard(state: &mut AppState, req: &Request) -> serde_json::Value {
    let top_n = match req.params.get("topN") {
        None => state.config.dashboard.top_performers,
        Some(v) if v.is_null() => state.config.dashboard.top_performers,
        Some(v) => match v.as_u64() {
            Some(n) => n as usize,
            None => {
                return err(
                    &req.id,
                    "bad_params",
                    "topN must be a non-negative integer",
                    None,
                )
            }
        },
    };
    let ds = match ensure_dataset(state, req) {
        Ok(v) => v,
        Err(e) => return e,
    };
    ok_versioned(req, ds.version, &dashboard::dashboard_view(&ds.records, top_n))
}

pub fn try_handle(state: &mut AppState, req: &Request) -> Option<serde_json::Value> {
    match req.method.as_str() {
        "analytics.frequency" => Some(handle_analytics_frequency(state, req)),
        "analytics.crossTab" => Some(handle_analytics_cross_tab(state, req)),
        "analytics.groupedAverage" => Some(handle_analytics_grouped_average(state, req)),
        "analytics.pairedSamples" => Some(handle_analytics_paired_samples(state, req)),
        "analytics.correlate" => Some(handle_analytics_correlate(state, req)),
        "analytics.trend" => Some(handle_analytics_trend(state, req)),
        "analytics.dashboard" => Some(handle_analytics_dashboard(state, req)),
        _ => None,
    }
}
