//! Liveness endpoint (`GET /api/health`).

use std::sync::Arc;

use axum::{Json, extract::State};
use serde_json::{Value, json};

use crate::server::AppState;

pub async fn health(State(state): State<Arc<AppState>>) -> Json<Value> {
    Json(json!({
        "status": "ok",
        "service": "plchat",
        "version": env!("CARGO_PKG_VERSION"),
        "model": state.service.model(),
    }))
}
