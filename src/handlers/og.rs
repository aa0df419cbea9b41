use axum::{
    extract::{Query, State},
    http::{header, HeaderValue},
    response::{Html, IntoResponse, Response},
    Json,
};

use crate::{
    meta::{normalize_path, resolve},
    models::{PageMetaDto, PathQuery},
    render::render_meta_page,
    state::AppState,
};

pub const CRAWLER_CACHE_CONTROL: &str = "public, max-age=0, s-maxage=3600";

/// Resolve and render the crawler document for `path`.
pub async fn meta_document(state: &AppState, path: &str) -> Response {
    let path = normalize_path(path);
    let meta = resolve(&path, &state.site, &state.cms).await;
    let canonical = state.site.canonical_url(&path);

    let mut response = Html(render_meta_page(&meta, &canonical)).into_response();
    let headers = response.headers_mut();
    headers.insert(
        header::CACHE_CONTROL,
        HeaderValue::from_static(CRAWLER_CACHE_CONTROL),
    );
    headers.insert(header::VARY, HeaderValue::from_static("User-Agent"));
    response
}

/// GET /api/og?path=/case-study/slug
///
/// Always renders the crawler document, whatever the user agent.
pub async fn og_page(State(state): State<AppState>, Query(params): Query<PathQuery>) -> Response {
    let path = params.path.unwrap_or_else(|| "/".to_string());
    meta_document(&state, &path).await
}

/// GET /api/meta?path=/case-study/slug
///
/// Resolved metadata as JSON, for the SPA's head manager.
pub async fn page_meta(
    State(state): State<AppState>,
    Query(params): Query<PathQuery>,
) -> Json<PageMetaDto> {
    let path = normalize_path(params.path.as_deref().unwrap_or("/"));
    let meta = resolve(&path, &state.site, &state.cms).await;

    Json(PageMetaDto {
        canonical: state.site.canonical_url(&path),
        path,
        meta,
    })
}
