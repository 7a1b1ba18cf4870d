use axum::{
    body::Body,
    extract::State,
    http::{Request, StatusCode},
    middleware::Next,
    response::Response,
};

use crate::{errors::HttpError, state::HttpState};

/// Single shared-secret check: the `x-api-key` header must equal the
/// configured key, case-sensitively. Absent or mismatched denies.
pub async fn require_api_key(
    State(state): State<HttpState>,
    req: Request<Body>,
    next: Next,
) -> Result<Response, HttpError> {
    let key = req
        .headers()
        .get("x-api-key")
        .and_then(|value| value.to_str().ok());
    if key != Some(state.api_key.as_str()) {
        return Err(HttpError::new(
            StatusCode::UNAUTHORIZED,
            "missing or invalid API key",
            Some("unauthorized".to_string()),
        ));
    }

    Ok(next.run(req).await)
}
