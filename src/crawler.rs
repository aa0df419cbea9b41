//! User-agent based detection of link-preview and search crawlers.
//!
//! Matching is a case-sensitive substring test against fixed token lists.

/// Link-preview bots operated by social networks and chat apps.
pub const SOCIAL_CRAWLERS: &[&str] = &[
    "facebookexternalhit",
    "Facebot",
    "Twitterbot",
    "LinkedInBot",
    "WhatsApp",
    "Slackbot",
    "Slack-ImgProxy",
    "SkypeUriPreview",
    "Discordbot",
    "TelegramBot",
    "Pinterestbot",
    "redditbot",
    "Embedly",
    "vkShare",
];

pub const SEARCH_CRAWLERS: &[&str] = &["Googlebot", "bingbot", "Applebot", "DuckDuckBot"];

const PRERENDER_AGENT: &str = "Prerender";

#[derive(Debug, Clone, Copy)]
pub struct CrawlerDetector {
    include_search_engines: bool,
}

impl Default for CrawlerDetector {
    fn default() -> Self {
        Self {
            include_search_engines: true,
        }
    }
}

impl CrawlerDetector {
    pub fn new(include_search_engines: bool) -> Self {
        Self {
            include_search_engines,
        }
    }

    pub fn is_crawler(&self, user_agent: Option<&str>) -> bool {
        let Some(ua) = user_agent.filter(|ua| !ua.is_empty()) else {
            return false;
        };
        let search: &[&str] = if self.include_search_engines {
            SEARCH_CRAWLERS
        } else {
            &[]
        };
        SOCIAL_CRAWLERS
            .iter()
            .chain(search.iter())
            .any(|token| ua.contains(token))
    }
}

/// The prerender service identifies itself with this token; its requests must
/// reach the SPA, or it would render our crawler page instead of the app.
pub fn is_prerender_agent(user_agent: Option<&str>) -> bool {
    user_agent.is_some_and(|ua| ua.contains(PRERENDER_AGENT))
}
