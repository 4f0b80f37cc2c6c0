use std::sync::Arc;

use axum::{
    body::Bytes,
    extract::State,
    http::{header, HeaderMap, StatusCode},
    response::{IntoResponse, Response},
    routing::post,
    Json, Router,
};
use serde_json::{json, Value};
use tracing::error;

use super::service::{RecordError, RecordService};
use super::store::RecordStore;
use super::APPLICATIONS_PATH;

/// Router exposing the application intake endpoint.
pub fn records_router<S>(service: Arc<RecordService<S>>) -> Router
where
    S: RecordStore + 'static,
{
    Router::new()
        .route(APPLICATIONS_PATH, post(submit_handler::<S>))
        .with_state(service)
}

pub(crate) async fn submit_handler<S>(
    State(service): State<Arc<RecordService<S>>>,
    headers: HeaderMap,
    body: Bytes,
) -> Response
where
    S: RecordStore + 'static,
{
    let outcome = service
        .decode(declares_json(&headers), &body)
        .and_then(|payload| service.record(payload));

    match outcome {
        Ok(()) => (
            StatusCode::OK,
            Json(json!({ "message": "Application saved" })),
        )
            .into_response(),
        Err(RecordError::Invalid(errors)) => {
            let details: Vec<Value> = errors
                .iter()
                .map(|err| json!({ "error": err, "message": err.to_string() }))
                .collect();
            let payload = json!({
                "error": "application failed validation",
                "errors": details,
            });
            (StatusCode::UNPROCESSABLE_ENTITY, Json(payload)).into_response()
        }
        Err(RecordError::Malformed(err)) => {
            let payload = json!({ "error": format!("payload is not an application: {err}") });
            (StatusCode::UNPROCESSABLE_ENTITY, Json(payload)).into_response()
        }
        Err(RecordError::UnsupportedMediaType) => {
            let payload = json!({ "error": RecordError::UnsupportedMediaType.to_string() });
            (StatusCode::UNSUPPORTED_MEDIA_TYPE, Json(payload)).into_response()
        }
        Err(err @ RecordError::Unreadable(_)) => {
            let payload = json!({ "error": err.to_string() });
            (StatusCode::BAD_REQUEST, Json(payload)).into_response()
        }
        Err(RecordError::Store(err)) => {
            error!(error = %err, "failed to append application");
            let payload = json!({ "error": err.to_string() });
            (StatusCode::INTERNAL_SERVER_ERROR, Json(payload)).into_response()
        }
    }
}

fn declares_json(headers: &HeaderMap) -> bool {
    headers
        .get(header::CONTENT_TYPE)
        .and_then(|value| value.to_str().ok())
        .and_then(|value| value.split(';').next())
        .map(|mime| {
            let mime = mime.trim().to_ascii_lowercase();
            mime == "application/json" || mime.ends_with("+json")
        })
        .unwrap_or(false)
}
