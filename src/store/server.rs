use std::sync::Arc;

use axum::{Json, Router, extract::State, routing::get};
use serde::{Deserialize, Serialize};

use crate::model::LayoutSnapshot;

use super::memory::{CURRENT_LAYOUT_KEY, LayoutStore};

#[derive(Clone, Debug, Serialize, Deserialize)]
pub struct SaveAck {
    pub message: String,
}

/// The layout endpoint. The server is a dumb store: no validation happens
/// here, a POST fully replaces whatever the injected store held before, and
/// invariant enforcement stays client-side in `replace`.
pub fn layout_router(store: Arc<dyn LayoutStore>) -> Router {
    Router::new()
        .route("/layouts", get(get_layout).post(post_layout))
        .with_state(store)
}

async fn get_layout(State(store): State<Arc<dyn LayoutStore>>) -> Json<LayoutSnapshot> {
    Json(store.fetch(CURRENT_LAYOUT_KEY).unwrap_or_default())
}

async fn post_layout(
    State(store): State<Arc<dyn LayoutStore>>,
    Json(snapshot): Json<LayoutSnapshot>,
) -> Json<SaveAck> {
    tracing::info!(
        nodes = snapshot.nodes.len(),
        edges = snapshot.edges.len(),
        "layout replaced"
    );
    store.put(CURRENT_LAYOUT_KEY, snapshot);
    Json(SaveAck {
        message: "Layout saved successfully".to_owned(),
    })
}
