pub mod contact;
pub mod og;
pub mod pages;
pub mod proxy;

use axum::{extract::State, http::StatusCode, Json};
use serde_json::{json, Value};

use crate::error::AppError;
use crate::state::AppState;

pub async fn health_check(State(state): State<AppState>) -> (StatusCode, Json<Value>) {
    let cms_ok = state.cms.is_healthy().await;

    let http_status = if cms_ok {
        StatusCode::OK
    } else {
        StatusCode::SERVICE_UNAVAILABLE
    };

    (
        http_status,
        Json(json!({
            "status": if cms_ok { "ok" } else { "degraded" },
            "service": "aaitek-edge",
            "version": env!("CARGO_PKG_VERSION"),
            "cms": if cms_ok { "ok" } else { "unavailable" },
        })),
    )
}

pub async fn method_not_allowed() -> AppError {
    AppError::MethodNotAllowed
}

pub async fn api_not_found() -> AppError {
    AppError::NotFound("Unknown API endpoint".into())
}
