//! MediaWiki API response shapes.
//!
//! Only the fields the resolver reads are modelled. Everything else in the
//! payload is ignored by serde.

use std::collections::BTreeMap;

use serde::Deserialize;
use serde::de::DeserializeOwned;
use serde_json::Value;

use super::ClientError;

/// Decode a response body, surfacing an `"error"` payload as [`ClientError::Api`].
pub fn decode<T: DeserializeOwned>(url: &str, body: &str) -> Result<T, ClientError> {
    let decode_err = |source| ClientError::Decode {
        url: url.to_string(),
        source,
    };

    let payload: Value = serde_json::from_str(body).map_err(decode_err)?;
    if let Some(error) = payload.get("error") {
        let field = |name: &str, fallback: &str| {
            error
                .get(name)
                .and_then(Value::as_str)
                .unwrap_or(fallback)
                .to_string()
        };
        return Err(ClientError::Api {
            code: field("code", "unknown_error"),
            info: field("info", "unknown info"),
        });
    }
    serde_json::from_value(payload).map_err(decode_err)
}

// ============================================================================
// list=search
// ============================================================================

#[derive(Debug, Deserialize)]
pub struct SearchResponse {
    #[serde(default)]
    query: Option<SearchQuery>,
}

#[derive(Debug, Deserialize)]
struct SearchQuery {
    #[serde(default)]
    search: Vec<SearchHit>,
}

#[derive(Debug, Deserialize)]
struct SearchHit {
    title: String,
}

impl SearchResponse {
    /// Title of the best hit.
    pub fn into_top_title(self) -> Option<String> {
        self.query?.search.into_iter().next().map(|hit| hit.title)
    }
}

// ============================================================================
// prop=langlinks
// ============================================================================

#[derive(Debug, Deserialize)]
pub struct LangLinksResponse {
    #[serde(default)]
    query: Option<LangLinksQuery>,
}

#[derive(Debug, Deserialize)]
struct LangLinksQuery {
    #[serde(default)]
    pages: BTreeMap<String, LangLinksPage>,
}

#[derive(Debug, Deserialize)]
struct LangLinksPage {
    #[serde(default)]
    langlinks: Vec<LangLink>,
}

#[derive(Debug, Deserialize)]
struct LangLink {
    lang: String,
    #[serde(default)]
    url: Option<String>,
    #[serde(rename = "*")]
    title: String,
}

/// A page's counterpart in another language edition.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct LanguageLink {
    pub url: String,
    pub title: String,
}

impl LangLinksResponse {
    /// First link to `language` on any returned page.
    ///
    /// Links without a `url` are skipped; the request always asks for one.
    pub fn into_link(self, language: &str) -> Option<LanguageLink> {
        self.query?
            .pages
            .into_values()
            .flat_map(|page| page.langlinks)
            .find_map(|link| {
                let url = link.url.filter(|_| link.lang == language)?;
                Some(LanguageLink {
                    url,
                    title: link.title,
                })
            })
    }
}

// ============================================================================
// action=parse
// ============================================================================

#[derive(Debug, Deserialize)]
pub struct ParseResponse {
    parse: ParsedPage,
}

#[derive(Debug, Deserialize)]
struct ParsedPage {
    text: ParsedText,
}

#[derive(Debug, Deserialize)]
struct ParsedText {
    #[serde(rename = "*")]
    html: String,
}

impl ParseResponse {
    /// Rendered article body.
    pub fn into_html(self) -> String {
        self.parse.text.html
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    const URL: &str = "https://en.wikipedia.org/w/api.php";

    #[test]
    fn test_search_top_title() {
        let body = r#"{"batchcomplete":"","query":{"searchinfo":{"totalhits":2},
            "search":[{"ns":0,"title":"ICD-10 Chapter IV: Endocrine, nutritional and metabolic diseases"},
                      {"ns":0,"title":"ICD-10"}]}}"#;
        let response: SearchResponse = decode(URL, body).unwrap();
        assert_eq!(
            response.into_top_title().as_deref(),
            Some("ICD-10 Chapter IV: Endocrine, nutritional and metabolic diseases")
        );
    }

    #[test]
    fn test_search_no_hits() {
        let body = r#"{"batchcomplete":"","query":{"searchinfo":{"totalhits":0},"search":[]}}"#;
        let response: SearchResponse = decode(URL, body).unwrap();
        assert_eq!(response.into_top_title(), None);

        let response: SearchResponse = decode(URL, "{}").unwrap();
        assert_eq!(response.into_top_title(), None);
    }

    #[test]
    fn test_langlinks_found() {
        let body = r#"{"query":{"pages":{"8640":{"pageid":8640,"ns":0,"title":"Diabetes",
            "langlinks":[{"lang":"pl","url":"https://pl.wikipedia.org/wiki/Cukrzyca","*":"Cukrzyca"}]}}}}"#;
        let response: LangLinksResponse = decode(URL, body).unwrap();
        assert_eq!(
            response.into_link("pl"),
            Some(LanguageLink {
                url: "https://pl.wikipedia.org/wiki/Cukrzyca".to_string(),
                title: "Cukrzyca".to_string(),
            })
        );
    }

    #[test]
    fn test_langlinks_missing() {
        // page exists but has no link in the language
        let body = r#"{"batchcomplete":"","query":{"pages":{"8640":{"pageid":8640,"ns":0,"title":"Diabetes"}}}}"#;
        let response: LangLinksResponse = decode(URL, body).unwrap();
        assert_eq!(response.into_link("pl"), None);

        // page does not exist
        let body = r#"{"query":{"pages":{"-1":{"ns":0,"title":"Nope","missing":""}}}}"#;
        let response: LangLinksResponse = decode(URL, body).unwrap();
        assert_eq!(response.into_link("pl"), None);
    }

    #[test]
    fn test_langlinks_other_language_ignored() {
        let body = r#"{"query":{"pages":{"1":{"langlinks":[{"lang":"de","url":"https://de.wikipedia.org/wiki/Diabetes_mellitus","*":"Diabetes mellitus"}]}}}}"#;
        let response: LangLinksResponse = decode(URL, body).unwrap();
        assert_eq!(response.into_link("pl"), None);
    }

    #[test]
    fn test_parse_html() {
        let body = r#"{"parse":{"title":"ICD-10 Chapter IV","pageid":1,"text":{"*":"<div><ul></ul></div>"}}}"#;
        let response: ParseResponse = decode(URL, body).unwrap();
        assert_eq!(response.into_html(), "<div><ul></ul></div>");
    }

    #[test]
    fn test_api_error_payload() {
        let body = r#"{"error":{"code":"missingtitle","info":"The page you specified doesn't exist.","*":"..."}}"#;
        let err = decode::<ParseResponse>(URL, body).unwrap_err();
        assert!(matches!(err, ClientError::Api { ref code, .. } if code == "missingtitle"));
    }

    #[test]
    fn test_malformed_body() {
        let err = decode::<SearchResponse>(URL, "<html>").unwrap_err();
        assert!(matches!(err, ClientError::Decode { .. }));

        // valid JSON, wrong shape
        let err = decode::<ParseResponse>(URL, r#"{"parse":{}}"#).unwrap_err();
        assert!(matches!(err, ClientError::Decode { .. }));
    }
}
