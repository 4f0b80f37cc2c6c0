use std::sync::Arc;

use axum::{extract::Query, extract::State, routing::get, Json, Router};
use serde::Deserialize;
use serde_json::{json, Value};

use super::addresses::AddressBook;

pub const ADDRESSES_PATH: &str = "/api/addresses";

#[derive(Debug, Default, Deserialize)]
pub(crate) struct SuggestQuery {
    #[serde(default)]
    q: String,
}

/// Address suggestions for the property address field, `GET /api/addresses?q=...`.
pub fn addresses_router(book: Arc<AddressBook>) -> Router {
    Router::new()
        .route(ADDRESSES_PATH, get(suggest_handler))
        .with_state(book)
}

pub(crate) async fn suggest_handler(
    State(book): State<Arc<AddressBook>>,
    Query(query): Query<SuggestQuery>,
) -> Json<Value> {
    Json(json!({ "suggestions": book.suggest(&query.q) }))
}
