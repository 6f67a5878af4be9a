//! Blocking MediaWiki client.

use std::time::Duration;

use percent_encoding::{AsciiSet, NON_ALPHANUMERIC, utf8_percent_encode};
use reqwest::blocking::Client;
use serde::de::DeserializeOwned;

use super::response::{self, LangLinksResponse, LanguageLink, ParseResponse, SearchResponse};
use super::{ClientError, ContentClient};
use crate::config::WikiConfig;
use crate::debug;

/// Characters left as-is in query values (RFC 3986 unreserved).
const QUERY_VALUE: &AsciiSet = &NON_ALPHANUMERIC
    .remove(b'-')
    .remove(b'_')
    .remove(b'.')
    .remove(b'~');

/// Client for one language edition's `api.php`.
#[derive(Debug)]
pub struct WikiClient {
    http: Client,
    endpoint: String,
}

impl WikiClient {
    pub fn new(config: &WikiConfig) -> Result<Self, ClientError> {
        let mut builder = Client::builder().user_agent(config.user_agent.clone());
        if config.timeout_secs > 0 {
            builder = builder.timeout(Duration::from_secs(config.timeout_secs));
        }
        let http = builder.build().map_err(ClientError::Build)?;

        Ok(Self {
            http,
            endpoint: config.api_endpoint(),
        })
    }

    pub fn endpoint(&self) -> &str {
        &self.endpoint
    }

    /// Full request URL with percent-encoded parameters.
    fn api_url(&self, params: &[(&str, &str)]) -> String {
        let mut url = self.endpoint.clone();
        for (i, (key, value)) in params.iter().enumerate() {
            url.push(if i == 0 { '?' } else { '&' });
            url.push_str(key);
            url.push('=');
            url.extend(utf8_percent_encode(value, QUERY_VALUE));
        }
        url
    }

    fn get<T: DeserializeOwned>(&self, params: &[(&str, &str)]) -> Result<T, ClientError> {
        let url = self.api_url(params);
        debug!("wiki"; "GET {}", url);

        let transport = |source| ClientError::Transport {
            url: url.clone(),
            source,
        };
        let reply = self.http.get(url.as_str()).send().map_err(transport)?;

        let status = reply.status();
        if !status.is_success() {
            return Err(ClientError::Status {
                url: url.clone(),
                status: status.as_u16(),
            });
        }

        let body = reply.text().map_err(transport)?;
        response::decode(&url, &body)
    }
}

impl ContentClient for WikiClient {
    fn search_title(&self, query: &str) -> Result<Option<String>, ClientError> {
        let response: SearchResponse = self.get(&[
            ("action", "query"),
            ("list", "search"),
            ("format", "json"),
            ("srsearch", query),
            ("srlimit", "1"),
            ("srprop", ""),
        ])?;
        Ok(response.into_top_title())
    }

    fn language_link(
        &self,
        title: &str,
        language: &str,
    ) -> Result<Option<LanguageLink>, ClientError> {
        let response: LangLinksResponse = self.get(&[
            ("action", "query"),
            ("titles", title),
            ("prop", "langlinks"),
            ("format", "json"),
            ("llprop", "url"),
            ("lllang", language),
        ])?;
        Ok(response.into_link(language))
    }

    fn page_html(&self, title: &str) -> Result<String, ClientError> {
        let response: ParseResponse = self.get(&[
            ("action", "parse"),
            ("page", title),
            ("prop", "text"),
            ("format", "json"),
            ("redirects", "1"),
        ])?;
        Ok(response.into_html())
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn client() -> WikiClient {
        WikiClient::new(&WikiConfig::default()).unwrap()
    }

    #[test]
    fn test_endpoint_from_config() {
        let config = WikiConfig {
            language: "pl".to_string(),
            ..WikiConfig::default()
        };
        let client = WikiClient::new(&config).unwrap();
        assert_eq!(client.endpoint(), "https://pl.wikipedia.org/w/api.php");
    }

    #[test]
    fn test_api_url_encoding() {
        let url = client().api_url(&[
            ("action", "query"),
            ("srsearch", "Chapter IV of ICD-10 deals with"),
        ]);
        assert_eq!(
            url,
            "https://en.wikipedia.org/w/api.php?action=query&srsearch=Chapter%20IV%20of%20ICD-10%20deals%20with"
        );
    }

    #[test]
    fn test_api_url_reserved_and_unicode() {
        let url = client().api_url(&[("titles", "Crohn's disease & more"), ("x", "Żółć")]);
        assert_eq!(
            url,
            "https://en.wikipedia.org/w/api.php?titles=Crohn%27s%20disease%20%26%20more&x=%C5%BB%C3%B3%C5%82%C4%87"
        );
    }

    #[test]
    fn test_api_url_empty_value() {
        let url = client().api_url(&[("srprop", "")]);
        assert!(url.ends_with("?srprop="));
    }
}
