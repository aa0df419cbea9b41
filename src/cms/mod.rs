//! Read access to the headless CMS REST API.
//!
//! The CMS answers collection queries with a `{ "data": [...] }` envelope.
//! Entries come either wrapped in `attributes` or flat, and media fields carry
//! size variants under `formats.{size}.url`.

use std::sync::Arc;

use axum::async_trait;
use reqwest::{Client as ReqwestClient, RequestBuilder};
use serde_json::Value;
use strum::{Display, EnumIter};
use thiserror::Error;

#[derive(Error, Debug)]
pub enum CmsError {
    #[error("CMS request failed: {0}")]
    Request(#[from] reqwest::Error),

    #[error("CMS returned status {0}")]
    Status(u16),

    #[error("CMS response could not be decoded: {0}")]
    Decode(String),
}

/// CMS content types reachable through this service.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Display, EnumIter)]
#[strum(serialize_all = "kebab-case")]
pub enum Collection {
    Articles,
    CaseStudies,
    Products,
    Services,
    Testimonials,
    ContactSubmissions,
}

/// The subset of a CMS entry needed to build page metadata.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ContentItem {
    pub slug: Option<String>,
    pub title: String,
    pub description: Option<String>,
    pub image_url: Option<String>,
}

const DESCRIPTION_FIELDS: &[&str] = &["description", "excerpt", "summary", "shortDescription"];
const IMAGE_FIELDS: &[&str] = &["featuredImage", "coverImage", "image", "heroImage", "thumbnail"];
const IMAGE_SIZES: &[&str] = &["large", "medium", "small"];

impl ContentItem {
    /// Map one envelope entry. Returns `None` when the entry has no title.
    /// Relative media paths are resolved against `media_base`.
    pub fn from_entry(entry: &Value, media_base: &str) -> Option<Self> {
        let fields = unwrap_attributes(entry);

        let title = non_empty_str(&fields["title"])?;
        let description = DESCRIPTION_FIELDS
            .iter()
            .find_map(|f| non_empty_str(&fields[*f]));
        let image_url = IMAGE_FIELDS
            .iter()
            .find_map(|f| media_url(&fields[*f]))
            .map(|url| absolute_media_url(media_base, &url));

        Some(ContentItem {
            slug: non_empty_str(&fields["slug"]),
            title,
            description,
            image_url,
        })
    }

    /// Entries without a slug field are trusted to match the filter.
    pub fn matches_slug(&self, slug: &str) -> bool {
        self.slug.as_deref().map_or(true, |s| s == slug)
    }
}

fn unwrap_attributes(entry: &Value) -> &Value {
    match entry.get("attributes") {
        Some(attrs) if attrs.is_object() => attrs,
        _ => entry,
    }
}

fn non_empty_str(value: &Value) -> Option<String> {
    value
        .as_str()
        .map(str::trim)
        .filter(|s| !s.is_empty())
        .map(str::to_string)
}

/// Pick the best URL from a media field, accepting `{data: {attributes}}`,
/// `{data: [...]}` and flat media objects.
fn media_url(field: &Value) -> Option<String> {
    let media = match field.get("data") {
        Some(Value::Array(items)) => items.first()?,
        Some(Value::Null) => return None,
        Some(data) => data,
        None => field,
    };
    let media = unwrap_attributes(media);
    if !media.is_object() {
        return None;
    }

    IMAGE_SIZES
        .iter()
        .find_map(|size| non_empty_str(&media["formats"][*size]["url"]))
        .or_else(|| non_empty_str(&media["url"]))
}

pub fn absolute_media_url(base: &str, url: &str) -> String {
    if url.starts_with("http://") || url.starts_with("https://") {
        url.to_string()
    } else if let Some(rest) = url.strip_prefix("//") {
        format!("https://{rest}")
    } else {
        format!("{}/{}", base.trim_end_matches('/'), url.trim_start_matches('/'))
    }
}

/// Lookup seam for the metadata resolver.
#[async_trait]
pub trait ContentSource: Send + Sync {
    async fn find_by_slug(
        &self,
        collection: Collection,
        slug: &str,
    ) -> Result<Option<ContentItem>, CmsError>;
}

#[derive(Clone)]
pub struct CmsClient {
    http: ReqwestClient,
    base_url: Arc<str>,
    api_token: Option<Arc<str>>,
}

impl CmsClient {
    pub fn new(http: ReqwestClient, base_url: &str, api_token: Option<&str>) -> Self {
        Self {
            http,
            base_url: Arc::from(base_url.trim_end_matches('/')),
            api_token: api_token.map(Arc::from),
        }
    }

    pub fn collection_url(&self, collection: Collection) -> String {
        format!("{}/api/{}", self.base_url, collection)
    }

    fn authorize(&self, builder: RequestBuilder) -> RequestBuilder {
        match &self.api_token {
            Some(token) => builder.bearer_auth(token),
            None => builder,
        }
    }

    /// GET a collection, forwarding `raw_query` untouched.
    pub async fn fetch_raw(
        &self,
        collection: Collection,
        raw_query: Option<&str>,
    ) -> Result<reqwest::Response, CmsError> {
        let mut url = self.collection_url(collection);
        if let Some(query) = raw_query.filter(|q| !q.is_empty()) {
            url.push('?');
            url.push_str(query);
        }

        let response = self.authorize(self.http.get(&url)).send().await?;
        if !response.status().is_success() {
            return Err(CmsError::Status(response.status().as_u16()));
        }
        Ok(response)
    }

    /// POST a new entry as `{ "data": payload }`.
    pub async fn create_entry(
        &self,
        collection: Collection,
        payload: &Value,
    ) -> Result<reqwest::Response, CmsError> {
        let body = serde_json::json!({ "data": payload });
        let response = self
            .authorize(self.http.post(self.collection_url(collection)))
            .json(&body)
            .send()
            .await?;
        if !response.status().is_success() {
            return Err(CmsError::Status(response.status().as_u16()));
        }
        Ok(response)
    }

    pub async fn is_healthy(&self) -> bool {
        let url = format!("{}/_health", self.base_url);
        match self.http.get(&url).send().await {
            Ok(resp) => resp.status().is_success(),
            Err(e) => {
                tracing::warn!(error = ?e, "Health check: CMS unreachable");
                false
            }
        }
    }
}

#[async_trait]
impl ContentSource for CmsClient {
    async fn find_by_slug(
        &self,
        collection: Collection,
        slug: &str,
    ) -> Result<Option<ContentItem>, CmsError> {
        let request = self
            .http
            .get(self.collection_url(collection))
            .query(&[("filters[slug][$eq]", slug), ("populate", "*")]);
        let response = self.authorize(request).send().await?;
        if !response.status().is_success() {
            return Err(CmsError::Status(response.status().as_u16()));
        }

        let body: Value = response
            .json()
            .await
            .map_err(|e| CmsError::Decode(e.to_string()))?;
        let entries = body["data"]
            .as_array()
            .ok_or_else(|| CmsError::Decode("missing data array".into()))?;

        Ok(entries
            .iter()
            .filter_map(|entry| ContentItem::from_entry(entry, &self.base_url))
            .find(|item| item.matches_slug(slug)))
    }
}
