use crate::infra::AppState;
use axum::http::{header, StatusCode};
use axum::response::IntoResponse;
use axum::routing::get;
use axum::{Extension, Json, Router};
use landlord_aid::workflows::intake::{addresses_router, AddressBook};
use landlord_aid::workflows::records::{records_router, RecordService, RecordStore};
use serde_json::json;
use std::path::Path;
use std::sync::atomic::Ordering;
use std::sync::Arc;
use tower_http::services::{ServeDir, ServeFile};

/// Intake and address endpoints, health and metrics routes, and the built frontend with an
/// `index.html` fallback for client-side routes such as `/qualify` and `/dashboard`.
pub(crate) fn with_service_routes<S>(
    service: Arc<RecordService<S>>,
    addresses: Arc<AddressBook>,
    static_dir: &Path,
) -> Router
where
    S: RecordStore + 'static,
{
    let frontend =
        ServeDir::new(static_dir).fallback(ServeFile::new(static_dir.join("index.html")));

    records_router(service)
        .merge(addresses_router(addresses))
        .route("/health", get(healthcheck))
        .route("/ready", get(readiness_endpoint))
        .route("/metrics", get(metrics_endpoint))
        .fallback_service(frontend)
}

pub(crate) async fn healthcheck() -> Json<serde_json::Value> {
    Json(json!({ "status": "ok" }))
}

pub(crate) async fn readiness_endpoint(Extension(state): Extension<AppState>) -> impl IntoResponse {
    let ready = state.readiness.load(Ordering::Relaxed);
    let status = if ready {
        StatusCode::OK
    } else {
        StatusCode::SERVICE_UNAVAILABLE
    };

    let payload = if ready {
        json!({ "status": "ready" })
    } else {
        json!({ "status": "initializing" })
    };

    (status, Json(payload))
}

pub(crate) async fn metrics_endpoint(Extension(state): Extension<AppState>) -> impl IntoResponse {
    (
        StatusCode::OK,
        [(header::CONTENT_TYPE, "text/plain; version=0.0.4")],
        state.metrics.render(),
    )
}

#[cfg(test)]
mod tests {
    use super::*;
    use axum::body::{to_bytes, Body};
    use axum::http::{Method, Request};
    use landlord_aid::workflows::records::{MemoryRecordStore, PayloadPolicy};
    use metrics_exporter_prometheus::PrometheusBuilder;
    use std::sync::atomic::AtomicBool;
    use tower::ServiceExt;

    struct Harness {
        app: Router,
        readiness: Arc<AtomicBool>,
        store: Arc<MemoryRecordStore>,
        _static_dir: tempfile::TempDir,
    }

    fn harness() -> Harness {
        let static_dir = tempfile::tempdir().expect("tempdir");
        std::fs::write(static_dir.path().join("index.html"), "<html>intake app</html>")
            .expect("write index");
        std::fs::create_dir(static_dir.path().join("assets")).expect("assets dir");
        std::fs::write(static_dir.path().join("assets/app.js"), "console.log('app');")
            .expect("write asset");

        let readiness = Arc::new(AtomicBool::new(false));
        let state = AppState {
            readiness: readiness.clone(),
            metrics: Arc::new(PrometheusBuilder::new().build_recorder().handle()),
        };
        let store = Arc::new(MemoryRecordStore::default());
        let service = Arc::new(RecordService::new(store.clone(), PayloadPolicy::Permissive));
        let addresses = Arc::new(AddressBook::new(["123 Main St, Philadelphia, PA 19102"]));
        let app = with_service_routes(service, addresses, static_dir.path())
            .layer(Extension(state));

        Harness {
            app,
            readiness,
            store,
            _static_dir: static_dir,
        }
    }

    async fn get_text(app: &Router, uri: &str) -> (StatusCode, String) {
        let response = app
            .clone()
            .oneshot(Request::get(uri).body(Body::empty()).expect("request"))
            .await
            .expect("router responds");
        let status = response.status();
        let bytes = to_bytes(response.into_body(), usize::MAX)
            .await
            .expect("body");
        (status, String::from_utf8(bytes.to_vec()).expect("utf8 body"))
    }

    #[tokio::test]
    async fn health_reports_ok() {
        let harness = harness();
        let (status, body) = get_text(&harness.app, "/health").await;
        assert_eq!(status, StatusCode::OK);
        assert_eq!(body, r#"{"status":"ok"}"#);
    }

    #[tokio::test]
    async fn readiness_flips_once_bound() {
        let harness = harness();
        let (status, body) = get_text(&harness.app, "/ready").await;
        assert_eq!(status, StatusCode::SERVICE_UNAVAILABLE);
        assert!(body.contains("initializing"));

        harness.readiness.store(true, Ordering::Release);
        let (status, _) = get_text(&harness.app, "/ready").await;
        assert_eq!(status, StatusCode::OK);
    }

    #[tokio::test]
    async fn address_suggestions_are_served() {
        let harness = harness();
        let (status, body) = get_text(&harness.app, "/api/addresses?q=123+M").await;
        assert_eq!(status, StatusCode::OK);
        assert_eq!(body, r#"{"suggestions":["123 Main St, Philadelphia, PA 19102"]}"#);
    }

    #[tokio::test]
    async fn unknown_routes_fall_back_to_index() {
        let harness = harness();
        let (status, body) = get_text(&harness.app, "/dashboard").await;
        assert_eq!(status, StatusCode::OK);
        assert_eq!(body, "<html>intake app</html>");

        let (status, body) = get_text(&harness.app, "/assets/app.js").await;
        assert_eq!(status, StatusCode::OK);
        assert_eq!(body, "console.log('app');");
    }

    #[tokio::test]
    async fn applications_are_accepted_alongside_static_routes() {
        let harness = harness();
        let response = harness
            .app
            .clone()
            .oneshot(
                Request::builder()
                    .method(Method::POST)
                    .uri("/api/applications")
                    .header(header::CONTENT_TYPE, "application/json")
                    .body(Body::from(r#"{"firstName":"Ada"}"#))
                    .expect("request"),
            )
            .await
            .expect("router responds");

        assert_eq!(response.status(), StatusCode::OK);
        let saved = harness.store.read_all().expect("records readable");
        assert_eq!(saved, vec![json!({ "firstName": "Ada" })]);
    }
}
