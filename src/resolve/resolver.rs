//! Code → article orchestration.

use url::Url;

use super::{LanguageVariant, ResolveError, SetupError};
use crate::cache::ArticleCache;
use crate::code::{ParsedCode, RangeTable};
use crate::config::{ResolverConfig, ResolverSectionConfig};
use crate::markup::find_disease;
use crate::wiki::{ContentClient, WikiClient};
use crate::debug;

/// Resolves ICD-10 codes to encyclopedia articles.
///
/// Owns the code space table and the chapter page cache for its whole
/// lifetime. `resolve` takes `&self`, so one resolver can serve many threads
/// when `C: Sync`.
pub struct CodeResolver<C> {
    client: C,
    table: RangeTable,
    cache: ArticleCache,
    primary_language: String,
    site_url: String,
    settings: ResolverSectionConfig,
}

impl CodeResolver<WikiClient> {
    /// Resolver backed by the live API described by `config`.
    pub fn from_config(config: &ResolverConfig) -> Result<Self, SetupError> {
        let table = config.code_space_table()?;
        let client = WikiClient::new(&config.wiki)?;
        debug!("resolve"; "{} code spaces, api {}", table.len(), client.endpoint());
        Ok(Self::new(client, table, config))
    }
}

impl<C: ContentClient> CodeResolver<C> {
    pub fn new(client: C, table: RangeTable, config: &ResolverConfig) -> Self {
        let language = config.wiki.language.clone();
        Self {
            client,
            table,
            cache: ArticleCache::new(config.resolver.cache_capacity),
            site_url: config.wiki.site_url(&language),
            primary_language: language,
            settings: config.resolver.clone(),
        }
    }

    pub fn client(&self) -> &C {
        &self.client
    }

    pub fn cache(&self) -> &ArticleCache {
        &self.cache
    }

    pub fn primary_language(&self) -> &str {
        &self.primary_language
    }

    /// Resolve `code` into article variants.
    ///
    /// The primary-language variant comes first, then one variant per
    /// requested language that has a counterpart, in request order. An empty
    /// result means no article is known for the code.
    pub fn resolve<S: AsRef<str>>(
        &self,
        code: &str,
        languages: &[S],
    ) -> Result<Vec<LanguageVariant>, ResolveError> {
        let parsed = ParsedCode::parse(code)?;

        let Some(chapter) = self.table.chapter_for(&parsed) else {
            debug!("resolve"; "{}: no chapter", parsed);
            return Ok(Vec::new());
        };

        let query = self.settings.chapter_query(chapter);
        let Some(chapter_title) = self.client.search_title(&query)? else {
            debug!("resolve"; "{}: no article for chapter {}", parsed, chapter);
            return Ok(Vec::new());
        };
        if chapter_title == self.settings.index_title {
            return Err(ResolveError::IndexPage(chapter_title));
        }

        let markup = self
            .cache
            .get_or_try_insert_with(&chapter_title, || self.client.page_html(&chapter_title))?;

        let Some(link) = find_disease(&markup, parsed.raw())? else {
            debug!("resolve"; "{}: no entry in '{}'", parsed, chapter_title);
            return Ok(Vec::new());
        };

        let canonical = self.client.search_title(&link.title)?;
        let url = self.absolute_url(&link.href);

        let Some(canonical) = canonical else {
            debug!("resolve"; "{}: '{}' has no canonical article", parsed, link.title);
            return Ok(vec![LanguageVariant::new(
                &self.primary_language,
                link.title,
                url,
            )]);
        };

        let lookup = strip_possessive(&canonical);
        let mut variants = vec![LanguageVariant::new(
            &self.primary_language,
            canonical.as_str(),
            url,
        )];

        for language in languages {
            let language = language.as_ref();
            match self.client.language_link(&lookup, language)? {
                Some(found) if !found.url.is_empty() => {
                    variants.push(LanguageVariant::new(language, found.title, found.url));
                }
                _ => debug!("resolve"; "{}: no '{}' article", parsed, language),
            }
        }

        debug!("resolve"; "{}: '{}' in {} languages", parsed, canonical, variants.len());
        Ok(variants)
    }

    /// Site-relative `href` made absolute against the primary site.
    fn absolute_url(&self, href: &str) -> String {
        Url::parse(&self.site_url)
            .and_then(|base| base.join(href))
            .map(String::from)
            .unwrap_or_else(|_| format!("{}{}", self.site_url, href))
    }
}

/// Drop every `'s` from a title before a language-link lookup.
fn strip_possessive(title: &str) -> String {
    title.replace("'s", "")
}
