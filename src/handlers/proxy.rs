use axum::{
    body::Body,
    extract::{RawQuery, State},
    http::{header, HeaderValue, StatusCode},
    response::Response,
    routing::{get, MethodRouter},
};

use crate::{
    cms::Collection,
    error::{AppError, AppResult},
    handlers::method_not_allowed,
    state::AppState,
};

/// Collections exposed read-only under `/api/{collection}`.
pub const READ_COLLECTIONS: [Collection; 5] = [
    Collection::Articles,
    Collection::CaseStudies,
    Collection::Products,
    Collection::Services,
    Collection::Testimonials,
];

/// GET-only route for one collection; other methods get a JSON 405.
pub fn collection_route(collection: Collection) -> MethodRouter<AppState> {
    get(move |state: State<AppState>, query: RawQuery| list_collection(state, collection, query))
        .fallback(method_not_allowed)
}

/// GET /api/{collection}?<anything>
///
/// Forwards the query string untouched and relays the CMS JSON verbatim.
pub async fn list_collection(
    State(state): State<AppState>,
    collection: Collection,
    RawQuery(query): RawQuery,
) -> AppResult<Response> {
    let upstream = state
        .cms
        .fetch_raw(collection, query.as_deref())
        .await
        .map_err(|e| {
            tracing::error!(error = %e, %collection, "Failed to fetch collection from CMS");
            AppError::Upstream(format!("Failed to fetch {collection}"))
        })?;

    let body = upstream.bytes().await.map_err(|e| {
        tracing::error!(error = ?e, %collection, "Failed to read CMS response body");
        AppError::Upstream(format!("Failed to fetch {collection}"))
    })?;

    Response::builder()
        .status(StatusCode::OK)
        .header(header::CONTENT_TYPE, HeaderValue::from_static("application/json"))
        .body(Body::from(body))
        .map_err(|_| AppError::Internal)
}
