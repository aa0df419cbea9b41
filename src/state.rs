use std::path::PathBuf;
use std::sync::Arc;

use reqwest::Client as ReqwestClient;

use crate::cms::CmsClient;
use crate::config::Config;
use crate::crawler::CrawlerDetector;
use crate::email::EmailNotifier;
use crate::meta::Site;

pub const USER_AGENT: &str = concat!("aaitek-edge/", env!("CARGO_PKG_VERSION"));

/// Settings for forwarding crawler requests to a prerender service.
#[derive(Clone, Debug)]
pub struct PrerenderConfig {
    pub service_url: Arc<str>,
    pub token: Arc<str>,
}

/// Shared application state passed to all handlers.
/// Everything here is read-only after startup.
#[derive(Clone)]
pub struct AppState {
    pub http_client: ReqwestClient,
    pub cms: CmsClient,
    pub site: Arc<Site>,
    pub crawlers: CrawlerDetector,
    pub static_dir: Arc<PathBuf>,
    pub prerender: Option<PrerenderConfig>,
    pub notifier: Option<EmailNotifier>,
}

impl AppState {
    pub fn from_config(config: &Config) -> Result<Self, reqwest::Error> {
        let http_client = ReqwestClient::builder()
            .timeout(config.upstream_timeout)
            .user_agent(USER_AGENT)
            .build()?;

        Ok(AppState {
            cms: CmsClient::new(
                http_client.clone(),
                &config.cms_url,
                config.cms_api_token.as_deref(),
            ),
            site: Arc::new(Site::new(&config.site_url, &config.default_og_image)),
            crawlers: CrawlerDetector::new(config.crawler_include_search_engines),
            static_dir: Arc::new(PathBuf::from(&config.static_dir)),
            prerender: config.prerender_token.as_deref().map(|token| PrerenderConfig {
                service_url: Arc::from(config.prerender_url.as_str()),
                token: Arc::from(token),
            }),
            notifier: EmailNotifier::from_config(config, http_client.clone()),
            http_client,
        })
    }
}
