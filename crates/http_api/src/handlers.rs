use axum::{
    body::Bytes,
    extract::{Json, State},
    response::IntoResponse,
};
use serde::Deserialize;

use cur_report::DEFAULT_METRIC;

use crate::{errors::HttpError, state::HttpState};

/// Request shape. Direct callers send `{"metric": "..."}`; gateway-style
/// callers wrap the same JSON in a `"body"` string.
#[derive(Debug, Default, Deserialize)]
struct ReportRequest {
    metric: Option<String>,
    body: Option<String>,
}

pub async fn report(
    State(state): State<HttpState>,
    body: Bytes,
) -> Result<impl IntoResponse, HttpError> {
    let metric = requested_metric(&body);
    let report = cur_report::run_report(state.store.as_ref(), &state.config, &metric).await?;
    Ok(Json(report))
}

/// Pull the metric name out of the request body, falling back to the
/// default on any shape the caller got wrong. Malformed optional input
/// never aborts a run.
fn requested_metric(body: &[u8]) -> String {
    let request: ReportRequest = serde_json::from_slice(body).unwrap_or_default();
    if let Some(metric) = request.metric {
        return metric;
    }
    request
        .body
        .and_then(|inner| serde_json::from_str::<ReportRequest>(&inner).ok())
        .and_then(|inner| inner.metric)
        .unwrap_or_else(|| DEFAULT_METRIC.to_string())
}
