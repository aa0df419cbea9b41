use axum::{
    extract::{Request, State},
    http::{header, HeaderMap, HeaderValue, Method},
    response::{Html, IntoResponse, Response},
};
use tower::ServiceExt;
use tower_http::services::{ServeDir, ServeFile};

use crate::{
    crawler::is_prerender_agent,
    handlers::og::{meta_document, CRAWLER_CACHE_CONTROL},
    meta::normalize_path,
    state::{AppState, PrerenderConfig},
};

pub const PRERENDER_TOKEN_HEADER: &str = "X-Prerender-Token";

fn user_agent(headers: &HeaderMap) -> Option<&str> {
    headers
        .get(header::USER_AGENT)
        .and_then(|v| v.to_str().ok())
}

const ASSET_EXTENSIONS: &[&str] = &[
    "js", "mjs", "css", "map", "json", "txt", "xml", "webmanifest", "ico", "png", "jpg", "jpeg",
    "gif", "svg", "webp", "avif", "woff", "woff2", "ttf", "otf", "eot", "mp4", "webm", "pdf",
];

/// Paths ending in a known static file extension are assets, never pages.
/// Other dotted segments (`/article/release-v1.2`) still count as pages.
pub fn looks_like_asset(path: &str) -> bool {
    path.rsplit('/')
        .next()
        .and_then(|segment| segment.rsplit_once('.'))
        .is_some_and(|(_, ext)| {
            ASSET_EXTENSIONS
                .iter()
                .any(|known| ext.eq_ignore_ascii_case(known))
        })
}

/// Fallback for every non-API path.
///
/// Crawlers get a rendered meta document (via the prerender service when one
/// is configured); everyone else gets the SPA build with `index.html` as the
/// catch-all.
pub async fn serve_page(State(state): State<AppState>, req: Request) -> Response {
    let ua = user_agent(req.headers());
    let path = req.uri().path();

    let wants_meta = matches!(*req.method(), Method::GET | Method::HEAD)
        && state.crawlers.is_crawler(ua)
        && !is_prerender_agent(ua)
        && !looks_like_asset(path);

    if !wants_meta {
        return serve_spa(&state, req).await;
    }

    let path = normalize_path(path);
    tracing::debug!(%path, user_agent = ua.unwrap_or_default(), "Serving crawler metadata");

    if let Some(prerender) = &state.prerender {
        if let Some(html) = fetch_prerendered(&state, prerender, &path).await {
            let mut response = Html(html).into_response();
            response.headers_mut().insert(
                header::CACHE_CONTROL,
                HeaderValue::from_static(CRAWLER_CACHE_CONTROL),
            );
            response
                .headers_mut()
                .insert(header::VARY, HeaderValue::from_static("User-Agent"));
            return response;
        }
    }

    meta_document(&state, &path).await
}

async fn fetch_prerendered(
    state: &AppState,
    prerender: &PrerenderConfig,
    path: &str,
) -> Option<String> {
    let target = format!(
        "{}/{}",
        prerender.service_url.trim_end_matches('/'),
        state.site.canonical_url(path)
    );

    let response = match state
        .http_client
        .get(&target)
        .header(PRERENDER_TOKEN_HEADER, &*prerender.token)
        .send()
        .await
    {
        Ok(resp) => resp,
        Err(e) => {
            tracing::warn!(error = ?e, %path, "Prerender request failed, rendering metadata locally");
            return None;
        }
    };

    if !response.status().is_success() {
        tracing::warn!(status = %response.status(), %path, "Prerender service returned an error");
        return None;
    }

    match response.text().await {
        Ok(html) if !html.trim().is_empty() => Some(html),
        Ok(_) => {
            tracing::warn!(%path, "Prerender service returned an empty page");
            None
        }
        Err(e) => {
            tracing::warn!(error = ?e, %path, "Failed to read prerendered page");
            None
        }
    }
}

async fn serve_spa(state: &AppState, req: Request) -> Response {
    let index = state.static_dir.join("index.html");
    let service = ServeDir::new(state.static_dir.as_path()).fallback(ServeFile::new(index));
    match service.oneshot(req).await {
        Ok(response) => response.into_response(),
        Err(never) => match never {},
    }
}
