use std::env;
use std::time::Duration;

use thiserror::Error;
use url::Url;

#[derive(Error, Debug, PartialEq, Eq)]
pub enum ConfigError {
    #[error("{var} is not a valid http(s) URL: {value}")]
    InvalidUrl { var: &'static str, value: String },

    #[error("{var} is not a valid number: {value}")]
    InvalidNumber { var: &'static str, value: String },
}

#[derive(Clone, Debug)]
pub struct Config {
    pub server_host: String,
    pub server_port: u16,
    pub is_dev: bool,
    /// CMS base URL without a trailing slash.
    pub cms_url: String,
    pub cms_api_token: Option<String>,
    /// Public site URL without a trailing slash; canonical URLs are built on it.
    pub site_url: String,
    pub default_og_image: String,
    pub static_dir: String,
    pub prerender_token: Option<String>,
    pub prerender_url: String,
    pub crawler_include_search_engines: bool,
    pub resend_api_key: Option<String>,
    pub resend_api_url: String,
    pub contact_email_to: String,
    pub contact_email_from: String,
    pub allowed_origins: Vec<String>,
    pub upstream_timeout: Duration,
}

impl Config {
    pub fn from_env() -> Result<Self, ConfigError> {
        dotenvy::dotenv().ok();
        Self::from_lookup(|key| env::var(key).ok())
    }

    /// Build a config from an arbitrary variable source. Empty values count as unset.
    pub fn from_lookup<F>(lookup: F) -> Result<Self, ConfigError>
    where
        F: Fn(&str) -> Option<String>,
    {
        let get = |key: &str| lookup(key).filter(|v| !v.trim().is_empty());

        let cms_url = http_url(
            "CMS_URL",
            get("CMS_URL").unwrap_or_else(|| "http://localhost:1337".to_string()),
        )?;
        let site_url = http_url(
            "SITE_URL",
            get("SITE_URL").unwrap_or_else(|| "https://www.aaitek.com".to_string()),
        )?;
        let default_og_image = match get("DEFAULT_OG_IMAGE") {
            Some(image) => http_url("DEFAULT_OG_IMAGE", image)?,
            None => format!("{site_url}/og-image.png"),
        };
        let prerender_url = http_url(
            "PRERENDER_SERVICE_URL",
            get("PRERENDER_SERVICE_URL")
                .unwrap_or_else(|| "https://service.prerender.io".to_string()),
        )?;
        let resend_api_url = http_url(
            "RESEND_API_URL",
            get("RESEND_API_URL").unwrap_or_else(|| "https://api.resend.com".to_string()),
        )?;

        let server_port = number("SERVER_PORT", get("SERVER_PORT"), 8080u16)?;
        let timeout_secs = number("UPSTREAM_TIMEOUT_SECS", get("UPSTREAM_TIMEOUT_SECS"), 10u64)?;

        Ok(Config {
            server_host: get("SERVER_HOST").unwrap_or_else(|| "127.0.0.1".to_string()),
            server_port,
            is_dev: get("APP_ENV").as_deref() != Some("production"),
            cms_url,
            cms_api_token: get("CMS_API_TOKEN"),
            site_url,
            default_og_image,
            static_dir: get("STATIC_DIR").unwrap_or_else(|| "dist".to_string()),
            prerender_token: get("PRERENDER_TOKEN"),
            prerender_url,
            crawler_include_search_engines: get("CRAWLER_INCLUDE_SEARCH_ENGINES")
                .map(|v| !matches!(v.trim(), "0" | "false" | "no" | "off"))
                .unwrap_or(true),
            resend_api_key: get("RESEND_API_KEY"),
            resend_api_url,
            contact_email_to: get("CONTACT_EMAIL_TO")
                .unwrap_or_else(|| "info@aaitek.com".to_string()),
            contact_email_from: get("CONTACT_EMAIL_FROM")
                .unwrap_or_else(|| "Aaitek Website <noreply@aaitek.com>".to_string()),
            allowed_origins: get("ALLOWED_ORIGINS")
                .map(|v| {
                    v.split(',')
                        .map(|o| o.trim().to_string())
                        .filter(|o| !o.is_empty())
                        .collect()
                })
                .unwrap_or_default(),
            upstream_timeout: Duration::from_secs(timeout_secs),
        })
    }

    pub fn server_addr(&self) -> String {
        format!("{}:{}", self.server_host, self.server_port)
    }
}

fn http_url(var: &'static str, value: String) -> Result<String, ConfigError> {
    let trimmed = value.trim().trim_end_matches('/').to_string();
    match Url::parse(&trimmed) {
        Ok(url) if matches!(url.scheme(), "http" | "https") && url.host_str().is_some() => {
            Ok(trimmed)
        }
        _ => Err(ConfigError::InvalidUrl { var, value }),
    }
}

fn number<T: std::str::FromStr>(
    var: &'static str,
    value: Option<String>,
    default: T,
) -> Result<T, ConfigError> {
    match value {
        Some(v) => v
            .trim()
            .parse()
            .map_err(|_| ConfigError::InvalidNumber { var, value: v }),
        None => Ok(default),
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::collections::HashMap;

    fn config_from(pairs: &[(&str, &str)]) -> Result<Config, ConfigError> {
        let vars: HashMap<String, String> = pairs
            .iter()
            .map(|(k, v)| (k.to_string(), v.to_string()))
            .collect();
        Config::from_lookup(|key| vars.get(key).cloned())
    }

    #[test]
    fn defaults_when_nothing_is_set() {
        let config = config_from(&[]).unwrap();
        assert_eq!(config.cms_url, "http://localhost:1337");
        assert_eq!(config.site_url, "https://www.aaitek.com");
        assert_eq!(config.default_og_image, "https://www.aaitek.com/og-image.png");
        assert_eq!(config.server_addr(), "127.0.0.1:8080");
        assert!(config.is_dev);
        assert!(config.crawler_include_search_engines);
        assert!(config.prerender_token.is_none());
        assert!(config.allowed_origins.is_empty());
        assert_eq!(config.upstream_timeout, Duration::from_secs(10));
    }

    #[test]
    fn trailing_slashes_are_trimmed() {
        let config = config_from(&[
            ("CMS_URL", "https://cms.example.com/"),
            ("SITE_URL", "https://example.com//"),
        ])
        .unwrap();
        assert_eq!(config.cms_url, "https://cms.example.com");
        assert_eq!(config.site_url, "https://example.com");
        assert_eq!(config.default_og_image, "https://example.com/og-image.png");
    }

    #[test]
    fn rejects_non_http_cms_url() {
        let err = config_from(&[("CMS_URL", "ftp://cms.example.com")]).unwrap_err();
        assert!(matches!(err, ConfigError::InvalidUrl { var: "CMS_URL", .. }));
    }

    #[test]
    fn rejects_bad_port() {
        let err = config_from(&[("SERVER_PORT", "eighty")]).unwrap_err();
        assert!(matches!(err, ConfigError::InvalidNumber { var: "SERVER_PORT", .. }));
    }

    #[test]
    fn production_mode_and_lists() {
        let config = config_from(&[
            ("APP_ENV", "production"),
            ("ALLOWED_ORIGINS", "https://a.example, ,https://b.example"),
            ("CRAWLER_INCLUDE_SEARCH_ENGINES", "false"),
            ("PRERENDER_TOKEN", "tok"),
        ])
        .unwrap();
        assert!(!config.is_dev);
        assert_eq!(
            config.allowed_origins,
            vec!["https://a.example".to_string(), "https://b.example".to_string()]
        );
        assert!(!config.crawler_include_search_engines);
        assert_eq!(config.prerender_token.as_deref(), Some("tok"));
    }

    #[test]
    fn blank_values_count_as_unset() {
        let config = config_from(&[("RESEND_API_KEY", "  "), ("CMS_API_TOKEN", "")]).unwrap();
        assert!(config.resend_api_key.is_none());
        assert!(config.cms_api_token.is_none());
    }
}
