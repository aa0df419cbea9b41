use axum::{
    body::Body,
    extract::{rejection::JsonRejection, State},
    http::{header, HeaderValue, StatusCode},
    response::Response,
    routing::{post, MethodRouter},
    Json,
};
use tracing::info;
use validator::Validate;

use crate::{
    cms::Collection,
    error::{AppError, AppResult},
    handlers::method_not_allowed,
    models::ContactSubmission,
    state::AppState,
};

pub fn submission_route() -> MethodRouter<AppState> {
    post(create_submission).fallback(method_not_allowed)
}

fn validation_error(e: validator::ValidationErrors) -> AppError {
    let mut messages: Vec<String> = e
        .field_errors()
        .values()
        .flat_map(|v| v.iter())
        .filter_map(|e| e.message.as_ref())
        .map(|m| m.to_string())
        .collect();
    messages.sort();
    AppError::Validation(messages.join(", "))
}

/// POST /api/contact-submissions
///
/// Stores the enquiry in the CMS, then emails the sales inbox when a mail API
/// key is configured. Email failures are logged and do not fail the request.
pub async fn create_submission(
    State(state): State<AppState>,
    payload: Result<Json<ContactSubmission>, JsonRejection>,
) -> AppResult<Response> {
    let Json(req) = payload.map_err(|rejection| AppError::Validation(rejection.body_text()))?;
    let submission = req.trimmed();
    submission.validate().map_err(validation_error)?;

    let payload = serde_json::to_value(&submission).map_err(|_| AppError::Internal)?;
    let upstream = state
        .cms
        .create_entry(Collection::ContactSubmissions, &payload)
        .await
        .map_err(|e| {
            tracing::error!(error = %e, "Failed to store contact submission");
            AppError::Upstream("Failed to submit contact form".into())
        })?;

    let status = StatusCode::from_u16(upstream.status().as_u16()).unwrap_or(StatusCode::OK);
    let body = upstream.bytes().await.map_err(|e| {
        tracing::error!(error = ?e, "Failed to read CMS response body");
        AppError::Upstream("Failed to submit contact form".into())
    })?;

    info!(email = %submission.email, "Contact submission stored");

    match &state.notifier {
        Some(notifier) => {
            if let Err(e) = notifier.notify_contact(&submission).await {
                tracing::warn!(error = %e, "Contact notification email failed");
            }
        }
        None => tracing::debug!("Email notifications disabled, skipping"),
    }

    Response::builder()
        .status(status)
        .header(header::CONTENT_TYPE, HeaderValue::from_static("application/json"))
        .header(header::CACHE_CONTROL, HeaderValue::from_static("no-store"))
        .body(Body::from(body))
        .map_err(|_| AppError::Internal)
}
