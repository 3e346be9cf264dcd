//! HTTP routes.

use axum::{
    extract::State,
    routing::{get, post},
    Json, Router,
};
use std::sync::Arc;

use echoes_protocol::{DialogueEvent, DialogueResponse};

use crate::app::App;

/// Create all HTTP routes.
pub fn routes() -> Router<Arc<App>> {
    Router::new()
        .route("/", get(health))
        .route("/health", get(health))
        .route("/dialogue", post(dialogue))
}

async fn health() -> &'static str {
    "OK"
}

/// The resolver service's callback target: one recognized intent in, one
/// dialogue action out. Always 200; faults become fixed player-facing text
/// inside the fulfillment machine.
async fn dialogue(
    State(app): State<Arc<App>>,
    Json(event): Json<DialogueEvent>,
) -> Json<DialogueResponse> {
    let action = app.fulfillment.handle(&event).await;
    Json(DialogueResponse::from(action))
}
