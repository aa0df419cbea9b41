// Each integration test file is a separate binary; helpers not used in every
// binary would otherwise trigger dead_code warnings from clippy.
#![allow(dead_code)]

use std::collections::HashMap;
use std::sync::{Arc, Mutex};

use axum::{
    body::Body,
    extract::{Path, Query, RawQuery, State},
    http::{header, HeaderMap, Method, Request, StatusCode},
    routing,
    Json, Router,
};
use http_body_util::BodyExt;
use serde_json::{json, Value};
use tower::ServiceExt;

use aaitek_edge::{router, AppState, Config};

pub const FACEBOOK_UA: &str = "facebookexternalhit/1.1 (+http://www.facebook.com/externalhit_uatext.php)";
pub const CHROME_UA: &str = "Mozilla/5.0 (Macintosh; Intel Mac OS X 10_15_7) AppleWebKit/537.36 \
                             (KHTML, like Gecko) Chrome/124.0.0.0 Safari/537.36";
pub const SITE_URL: &str = "https://www.aaitek.com";
pub const DEFAULT_IMAGE: &str = "https://www.aaitek.com/og-image.png";

/// Nothing listens on port 1, so requests fail fast with "connection refused".
pub const UNREACHABLE: &str = "http://127.0.0.1:1";

/// Serve `app` on an ephemeral local port and return its base URL.
pub async fn spawn(app: Router) -> String {
    let listener = tokio::net::TcpListener::bind("127.0.0.1:0")
        .await
        .expect("bind test listener");
    let addr = listener.local_addr().unwrap();
    tokio::spawn(async move {
        axum::serve(listener, app).await.unwrap();
    });
    format!("http://{addr}")
}

// ── Fake upstreams ───────────────────────────────────────────────────────────

/// What a fake upstream saw.
#[derive(Debug, Clone)]
pub struct Recorded {
    pub path: String,
    pub query: Option<String>,
    pub authorization: Option<String>,
    pub extra_header: Option<String>,
    pub body: Value,
}

#[derive(Clone, Default)]
pub struct Recorder(Arc<Mutex<Vec<Recorded>>>);

impl Recorder {
    pub fn push(&self, r: Recorded) {
        self.0.lock().unwrap().push(r);
    }

    pub fn all(&self) -> Vec<Recorded> {
        self.0.lock().unwrap().clone()
    }
}

#[derive(Clone)]
struct FakeCmsState {
    /// collection -> entries in CMS envelope shape
    entries: Arc<HashMap<String, Vec<Value>>>,
    recorder: Recorder,
}

fn header_str(headers: &HeaderMap, name: &str) -> Option<String> {
    headers
        .get(name)
        .and_then(|v| v.to_str().ok())
        .map(str::to_string)
}

async fn cms_list(
    State(state): State<FakeCmsState>,
    Path(collection): Path<String>,
    RawQuery(raw): RawQuery,
    Query(params): Query<HashMap<String, String>>,
    headers: HeaderMap,
) -> Json<Value> {
    state.recorder.push(Recorded {
        path: format!("/api/{collection}"),
        query: raw.clone(),
        authorization: header_str(&headers, "authorization"),
        extra_header: None,
        body: Value::Null,
    });

    let entries = state.entries.get(&collection).cloned().unwrap_or_default();
    match params.get("filters[slug][$eq]") {
        Some(slug) => {
            let matching: Vec<Value> = entries
                .into_iter()
                .filter(|e| e["attributes"]["slug"] == slug.as_str())
                .collect();
            Json(json!({ "data": matching, "meta": { "pagination": { "total": 0 } } }))
        }
        None => Json(json!({
            "data": entries,
            "meta": { "echo": raw.unwrap_or_default() }
        })),
    }
}

async fn cms_create(
    State(state): State<FakeCmsState>,
    headers: HeaderMap,
    Json(body): Json<Value>,
) -> Json<Value> {
    state.recorder.push(Recorded {
        path: "/api/contact-submissions".into(),
        query: None,
        authorization: header_str(&headers, "authorization"),
        extra_header: None,
        body: body.clone(),
    });
    Json(json!({ "data": { "id": 42, "attributes": body["data"] }, "meta": {} }))
}

/// A CMS with the given `(collection, entries)` content.
pub async fn spawn_cms(content: Vec<(&str, Vec<Value>)>) -> (String, Recorder) {
    let recorder = Recorder::default();
    let state = FakeCmsState {
        entries: Arc::new(
            content
                .into_iter()
                .map(|(c, e)| (c.to_string(), e))
                .collect(),
        ),
        recorder: recorder.clone(),
    };
    let app = Router::new()
        .route("/_health", routing::get(|| async { StatusCode::NO_CONTENT }))
        .route("/api/contact-submissions", routing::post(cms_create))
        .route("/api/:collection", routing::get(cms_list))
        .with_state(state);
    (spawn(app).await, recorder)
}

/// A CMS that answers every request with the given status.
pub async fn spawn_failing_cms(status: StatusCode) -> String {
    let app = Router::new().fallback(move || async move {
        (status, Json(json!({ "error": { "status": status.as_u16() } })))
    });
    spawn(app).await
}

/// A CMS that answers every request with 200 and a fixed body.
pub async fn spawn_static_cms(body: &'static str) -> String {
    let app = Router::new().fallback(move || async move {
        ([(header::CONTENT_TYPE, "application/json")], body)
    });
    spawn(app).await
}

/// A Resend-style email API that records what it is asked to send.
pub async fn spawn_email_api(status: StatusCode) -> (String, Recorder) {
    let recorder = Recorder::default();
    let rec = recorder.clone();
    let app = Router::new().route(
        "/emails",
        routing::post(move |headers: HeaderMap, Json(body): Json<Value>| {
            let rec = rec.clone();
            async move {
                rec.push(Recorded {
                    path: "/emails".into(),
                    query: None,
                    authorization: header_str(&headers, "authorization"),
                    extra_header: None,
                    body,
                });
                (status, Json(json!({ "id": "email_123" })))
            }
        }),
    );
    (spawn(app).await, recorder)
}

/// A prerender service that echoes the page URL it was asked to render.
pub async fn spawn_prerender(status: StatusCode) -> (String, Recorder) {
    let recorder = Recorder::default();
    let rec = recorder.clone();
    let app = Router::new().fallback(move |req: Request<Body>| {
        let rec = rec.clone();
        async move {
            let path = req.uri().path().to_string();
            rec.push(Recorded {
                path: path.clone(),
                query: None,
                authorization: None,
                extra_header: header_str(req.headers(), "x-prerender-token"),
                body: Value::Null,
            });
            (
                status,
                [(header::CONTENT_TYPE, "text/html")],
                format!("<html><body>prerendered {path}</body></html>"),
            )
        }
    });
    (spawn(app).await, recorder)
}

/// A CMS entry in attribute-wrapped envelope shape.
pub fn entry(slug: &str, title: &str, excerpt: &str, image: &str) -> Value {
    json!({
        "id": 1,
        "attributes": {
            "slug": slug,
            "title": title,
            "excerpt": excerpt,
            "featuredImage": { "data": { "attributes": {
                "url": image,
                "formats": { "large": { "url": image } }
            }}}
        }
    })
}

// ── App construction ─────────────────────────────────────────────────────────

pub fn test_config(cms_url: &str, overrides: &[(&str, &str)]) -> Config {
    let mut vars: HashMap<String, String> = HashMap::from([
        ("CMS_URL".to_string(), cms_url.to_string()),
        ("SITE_URL".to_string(), SITE_URL.to_string()),
        ("UPSTREAM_TIMEOUT_SECS".to_string(), "5".to_string()),
    ]);
    for (k, v) in overrides {
        vars.insert(k.to_string(), v.to_string());
    }
    Config::from_lookup(|key| vars.get(key).cloned()).expect("valid test config")
}

pub fn create_test_app(config: &Config) -> Router {
    let state = AppState::from_config(config).expect("build app state");
    router(state, &config.allowed_origins)
}

pub async fn app_with_cms(cms_url: &str) -> Router {
    create_test_app(&test_config(cms_url, &[]))
}

// ── Request helpers ──────────────────────────────────────────────────────────

pub struct TestResponse {
    pub status: StatusCode,
    pub headers: HeaderMap,
    pub body: String,
}

impl TestResponse {
    pub fn json(&self) -> Value {
        serde_json::from_str(&self.body).unwrap_or(Value::Null)
    }

    pub fn header(&self, name: header::HeaderName) -> Option<&str> {
        self.headers.get(name).and_then(|v| v.to_str().ok())
    }
}

pub async fn send(app: Router, req: Request<Body>) -> TestResponse {
    let response = app.oneshot(req).await.unwrap();
    let status = response.status();
    let headers = response.headers().clone();
    let bytes = response.into_body().collect().await.unwrap().to_bytes();
    TestResponse {
        status,
        headers,
        body: String::from_utf8_lossy(&bytes).into_owned(),
    }
}

pub async fn get(app: Router, uri: &str) -> TestResponse {
    let req = Request::builder()
        .method(Method::GET)
        .uri(uri)
        .body(Body::empty())
        .unwrap();
    send(app, req).await
}

pub async fn get_as(app: Router, uri: &str, user_agent: &str) -> TestResponse {
    let req = Request::builder()
        .method(Method::GET)
        .uri(uri)
        .header(header::USER_AGENT, user_agent)
        .body(Body::empty())
        .unwrap();
    send(app, req).await
}

pub async fn request(app: Router, method: Method, uri: &str) -> TestResponse {
    let req = Request::builder()
        .method(method)
        .uri(uri)
        .body(Body::empty())
        .unwrap();
    send(app, req).await
}

pub async fn post_raw(app: Router, uri: &str, body: &str) -> TestResponse {
    let req = Request::builder()
        .method(Method::POST)
        .uri(uri)
        .header(header::CONTENT_TYPE, "application/json")
        .body(Body::from(body.to_string()))
        .unwrap();
    send(app, req).await
}

pub async fn post_json(app: Router, uri: &str, body: Value) -> TestResponse {
    let req = Request::builder()
        .method(Method::POST)
        .uri(uri)
        .header(header::CONTENT_TYPE, "application/json")
        .body(Body::from(body.to_string()))
        .unwrap();
    send(app, req).await
}

// ── HTML helpers ─────────────────────────────────────────────────────────────

pub fn meta_content(html: &str, selector: &str) -> Option<String> {
    let doc = scraper::Html::parse_document(html);
    let selector = scraper::Selector::parse(selector).unwrap();
    doc.select(&selector)
        .next()
        .and_then(|el| el.value().attr("content"))
        .map(str::to_string)
}

pub fn og(html: &str, property: &str) -> Option<String> {
    meta_content(html, &format!(r#"meta[property="{property}"]"#))
}

pub fn title(html: &str) -> Option<String> {
    let doc = scraper::Html::parse_document(html);
    let selector = scraper::Selector::parse("title").unwrap();
    doc.select(&selector)
        .next()
        .map(|el| el.text().collect::<String>())
}
