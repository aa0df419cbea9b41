use axum::{
    http::{header, HeaderValue, Method},
    routing::{any, get},
    Router,
};
use tower_http::{
    cors::{AllowOrigin, Any, CorsLayer},
    set_header::SetResponseHeaderLayer,
    trace::TraceLayer,
};

use crate::handlers::{self, contact, og, pages, proxy};
use crate::state::AppState;

pub const PROXY_CACHE_CONTROL: &str = "public, s-maxage=60, stale-while-revalidate=300";

/// CORS for the `/api` surface: any origin unless an allow-list is given.
pub fn cors_layer(allowed_origins: &[String]) -> CorsLayer {
    let origins: Vec<HeaderValue> = allowed_origins
        .iter()
        .filter_map(|o| match HeaderValue::from_str(o) {
            Ok(v) => Some(v),
            Err(_) => {
                tracing::warn!(origin = %o, "Ignoring invalid ALLOWED_ORIGINS entry");
                None
            }
        })
        .collect();

    let allow_origin = if origins.is_empty() {
        AllowOrigin::from(Any)
    } else {
        AllowOrigin::list(origins)
    };

    CorsLayer::new()
        .allow_origin(allow_origin)
        .allow_methods([Method::GET, Method::POST, Method::OPTIONS])
        .allow_headers([header::CONTENT_TYPE, header::AUTHORIZATION])
}

/// Build the full application router.
pub fn router(state: AppState, allowed_origins: &[String]) -> Router {
    let cached_reads = proxy::READ_COLLECTIONS
        .into_iter()
        .fold(Router::<AppState>::new(), |router, collection| {
            router.route(
                &format!("/api/{collection}"),
                proxy::collection_route(collection),
            )
        })
        .layer(SetResponseHeaderLayer::if_not_present(
            header::CACHE_CONTROL,
            HeaderValue::from_static(PROXY_CACHE_CONTROL),
        ));

    let api = Router::new()
        .merge(cached_reads)
        .route("/api/contact-submissions", contact::submission_route())
        .route("/api/og", get(og::og_page))
        .route("/api/meta", get(og::page_meta))
        .route("/api", any(handlers::api_not_found))
        .route("/api/*rest", any(handlers::api_not_found))
        .layer(cors_layer(allowed_origins));

    Router::new()
        .route("/health", get(handlers::health_check))
        .merge(api)
        .fallback(pages::serve_page)
        .layer(TraceLayer::new_for_http())
        .with_state(state)
}
