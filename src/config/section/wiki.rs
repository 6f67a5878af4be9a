//! `[wiki]` section configuration.
//!
//! Connection settings for the MediaWiki content API.
//!
//! # Example
//!
//! ```toml
//! [wiki]
//! language = "en"                # Primary language edition
//! host = "wikipedia.org"         # Sites live at https://{language}.{host}
//! api_path = "/w/api.php"
//! user_agent = "icdwiki/0.1"
//! timeout_secs = 30
//! ```

use serde::{Deserialize, Serialize};

/// MediaWiki API connection settings.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(default)]
pub struct WikiConfig {
    /// Primary language; the canonical variant and all API calls use it.
    pub language: String,

    /// Domain shared by every language edition.
    pub host: String,

    /// Path of `api.php` on each site.
    pub api_path: String,

    /// `User-Agent` header sent with every request.
    pub user_agent: String,

    /// Request timeout in seconds, 0 disables it.
    pub timeout_secs: u64,
}

impl Default for WikiConfig {
    fn default() -> Self {
        Self {
            language: "en".to_string(),
            host: "wikipedia.org".to_string(),
            api_path: "/w/api.php".to_string(),
            user_agent: concat!(env!("CARGO_PKG_NAME"), "/", env!("CARGO_PKG_VERSION")).to_string(),
            timeout_secs: 30,
        }
    }
}

impl WikiConfig {
    /// Site root for a language edition, e.g. `https://pl.wikipedia.org`.
    pub fn site_url(&self, language: &str) -> String {
        format!("https://{}.{}", language, self.host)
    }

    /// API endpoint of the primary language edition.
    pub fn api_endpoint(&self) -> String {
        format!("{}{}", self.site_url(&self.language), self.api_path)
    }
}

#[cfg(test)]
mod tests {
    use crate::config::test_parse_config;

    #[test]
    fn test_wiki_config_defaults() {
        let config = test_parse_config("");
        assert_eq!(config.wiki.language, "en");
        assert_eq!(config.wiki.timeout_secs, 30);
        assert_eq!(
            config.wiki.api_endpoint(),
            "https://en.wikipedia.org/w/api.php"
        );
    }

    #[test]
    fn test_wiki_config_custom() {
        let config = test_parse_config(
            "[wiki]\nlanguage = \"de\"\nhost = \"wiki.example.org\"\napi_path = \"/api.php\"",
        );
        assert_eq!(config.wiki.site_url("pl"), "https://pl.wiki.example.org");
        assert_eq!(config.wiki.api_endpoint(), "https://de.wiki.example.org/api.php");
        // untouched fields keep defaults
        assert_eq!(config.wiki.timeout_secs, 30);
    }
}
