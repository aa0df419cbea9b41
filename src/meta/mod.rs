//! Page metadata resolution shared by every crawler-facing entry point.
//!
//! A request path maps to a [`RouteMeta`] in one of three ways: a compiled-in
//! static entry, a CMS lookup for detail pages, or the site default. Resolution
//! never fails; CMS trouble degrades to the per-category fallback.

pub mod routes;

use once_cell::sync::Lazy;
use regex::Regex;
use serde::{Deserialize, Serialize};
use strum::{Display, IntoStaticStr};
use url::Url;

use crate::cms::{ContentItem, ContentSource};

pub use routes::{Category, StaticMeta, SITE_NAME};

const MAX_DESCRIPTION_CHARS: usize = 160;
const MAX_SLUG_LEN: usize = 200;

static SLUG_RE: Lazy<Regex> =
    Lazy::new(|| Regex::new(r"^[A-Za-z0-9][A-Za-z0-9_-]*$").expect("valid regex"));
static TAG_RE: Lazy<Regex> = Lazy::new(|| Regex::new(r"<[^>]*>").expect("valid regex"));

#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize, Display, IntoStaticStr)]
pub enum OgType {
    #[serde(rename = "website")]
    #[strum(serialize = "website")]
    Website,
    #[serde(rename = "article")]
    #[strum(serialize = "article")]
    Article,
    #[serde(rename = "video.other")]
    #[strum(serialize = "video.other")]
    VideoOther,
}

impl OgType {
    pub fn as_str(self) -> &'static str {
        self.into()
    }
}

#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct RouteMeta {
    pub title: String,
    pub description: String,
    pub image: String,
    #[serde(rename = "type")]
    pub og_type: OgType,
}

/// Public site identity used to make URLs absolute.
#[derive(Debug, Clone)]
pub struct Site {
    base_url: String,
    default_image: String,
}

impl Site {
    pub fn new(base_url: &str, default_image: &str) -> Self {
        Self {
            base_url: base_url.trim_end_matches('/').to_string(),
            default_image: default_image.to_string(),
        }
    }

    pub fn default_image(&self) -> &str {
        &self.default_image
    }

    /// `path` must already be normalized.
    pub fn canonical_url(&self, path: &str) -> String {
        if path == "/" {
            format!("{}/", self.base_url)
        } else {
            format!("{}{}", self.base_url, path)
        }
    }

    fn record(&self, meta: &StaticMeta) -> RouteMeta {
        RouteMeta {
            title: meta.title.to_string(),
            description: meta.description.to_string(),
            image: meta
                .image
                .map(|img| format!("{}{}", self.base_url, img))
                .unwrap_or_else(|| self.default_image.clone()),
            og_type: meta.og_type,
        }
    }

    pub fn default_record(&self) -> RouteMeta {
        self.record(&routes::SITE_DEFAULT)
    }
}

/// Strip query and fragment, collapse repeated slashes and drop the trailing one.
pub fn normalize_path(raw: &str) -> String {
    let end = raw.find(['?', '#']).unwrap_or(raw.len());
    let segments: Vec<&str> = raw[..end].split('/').filter(|s| !s.is_empty()).collect();
    if segments.is_empty() {
        "/".to_string()
    } else {
        format!("/{}", segments.join("/"))
    }
}

/// Split `/prefix/slug` into its detail category and slug.
pub fn parse_detail_path(path: &str) -> Option<(Category, &str)> {
    let mut parts = path.trim_start_matches('/').split('/');
    let prefix = parts.next()?;
    let slug = parts.next()?;
    if parts.next().is_some() || slug.is_empty() {
        return None;
    }
    Category::ALL
        .into_iter()
        .find(|c| c.prefix() == prefix)
        .map(|c| (c, slug))
}

pub fn is_valid_slug(slug: &str) -> bool {
    slug.len() <= MAX_SLUG_LEN && SLUG_RE.is_match(slug)
}

/// Resolve metadata for a raw request path.
pub async fn resolve(path: &str, site: &Site, content: &dyn ContentSource) -> RouteMeta {
    let path = normalize_path(path);

    if let Some(meta) = routes::static_route(&path) {
        return site.record(meta);
    }

    let Some((category, slug)) = parse_detail_path(&path) else {
        return site.default_record();
    };

    let fallback = site.record(&category.fallback());
    if !is_valid_slug(slug) {
        tracing::debug!(%path, "Rejected malformed slug");
        return fallback;
    }

    match content.find_by_slug(category.collection(), slug).await {
        Ok(Some(item)) => from_content(&item, category, site, fallback),
        Ok(None) => {
            tracing::info!(%path, "No CMS entry for slug, using fallback metadata");
            fallback
        }
        Err(e) => {
            tracing::warn!(error = %e, %path, "CMS lookup failed, using fallback metadata");
            fallback
        }
    }
}

fn from_content(item: &ContentItem, category: Category, site: &Site, fallback: RouteMeta) -> RouteMeta {
    let description = item
        .description
        .as_deref()
        .map(clean_description)
        .filter(|d| !d.is_empty())
        .unwrap_or(fallback.description);

    let image = item
        .image_url
        .as_deref()
        .filter(|url| is_http_url(url))
        .map(str::to_string)
        .unwrap_or_else(|| site.default_image().to_string());

    RouteMeta {
        title: format!("{} - {}", item.title, SITE_NAME),
        description,
        image,
        og_type: category.og_type(),
    }
}

fn is_http_url(raw: &str) -> bool {
    Url::parse(raw)
        .map(|u| matches!(u.scheme(), "http" | "https") && u.host_str().is_some())
        .unwrap_or(false)
}

/// Strip markup, collapse whitespace and cap the length for preview cards.
pub fn clean_description(raw: &str) -> String {
    let text = TAG_RE.replace_all(raw, " ");
    let text = text.split_whitespace().collect::<Vec<_>>().join(" ");
    if text.chars().count() <= MAX_DESCRIPTION_CHARS {
        return text;
    }
    let cut: String = text.chars().take(MAX_DESCRIPTION_CHARS - 3).collect();
    format!("{}...", cut.trim_end())
}
