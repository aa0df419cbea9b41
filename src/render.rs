//! HTML documents served to crawlers.
//!
//! Every interpolated value goes through maud, so metadata pulled from the CMS
//! is HTML-escaped before it reaches the page.

use maud::{html, Markup, DOCTYPE};

use crate::meta::{RouteMeta, SITE_NAME};

pub const TWITTER_CARD: &str = "summary_large_image";

pub fn meta_page(meta: &RouteMeta, canonical_url: &str) -> Markup {
    html! {
        (DOCTYPE)
        html lang="en" {
            head {
                meta charset="utf-8";
                meta name="viewport" content="width=device-width, initial-scale=1";
                title { (meta.title) }
                meta name="description" content=(meta.description);
                link rel="canonical" href=(canonical_url);

                meta property="og:type" content=(meta.og_type.as_str());
                meta property="og:site_name" content=(SITE_NAME);
                meta property="og:title" content=(meta.title);
                meta property="og:description" content=(meta.description);
                meta property="og:image" content=(meta.image);
                meta property="og:url" content=(canonical_url);

                meta name="twitter:card" content=(TWITTER_CARD);
                meta name="twitter:title" content=(meta.title);
                meta name="twitter:description" content=(meta.description);
                meta name="twitter:image" content=(meta.image);
            }
            body {
                h1 { (meta.title) }
                p { (meta.description) }
                img src=(meta.image) alt=(meta.title);
                p {
                    a href=(canonical_url) { "Continue to " (SITE_NAME) }
                }
            }
        }
    }
}

pub fn render_meta_page(meta: &RouteMeta, canonical_url: &str) -> String {
    meta_page(meta, canonical_url).into_string()
}
