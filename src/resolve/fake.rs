//! In-memory content client for resolver tests.

use std::sync::atomic::{AtomicUsize, Ordering};

use rustc_hash::FxHashMap;

use crate::wiki::{ClientError, ContentClient, LanguageLink};

pub const CHAPTER_IV_QUERY: &str = "Chapter IV of ICD-10 deals with";
pub const CHAPTER_IV_TITLE: &str =
    "ICD-10 Chapter IV: Endocrine, nutritional and metabolic diseases";

pub const CHAPTER_IV_HTML: &str = r##"<div class="mw-parser-output">
<div id="toc"><ul><li><a href="#E10">E10.3</a> <a href="/wiki/Toc" title="Toc">toc</a></li></ul></div>
<h2>(E10&ndash;E14) Diabetes mellitus</h2>
<ul>
  <li><a href="https://icd.who.int/browse10/2019/en#/E10">E10</a> <a href="/wiki/Diabetes_mellitus_type_1" title="Diabetes mellitus type 1">Insulin-dependent diabetes mellitus</a>
    <ul>
      <li><a href="https://icd.who.int/browse10/2019/en#/E10.3">E10.3</a> <a href="/wiki/Diabetic_retinopathy" title="Diabetic retinopathy">With ophthalmic complications</a></li>
    </ul>
  </li>
</ul>
<h2>(E70&ndash;E90) Metabolic disorders</h2>
<ul>
  <li><a href="https://icd.who.int/browse10/2019/en#/E75.0">E75.0</a> <a href="/wiki/Tay%E2%80%93Sachs_disease" title="Tay-Sachs disease">GM2 gangliosidosis</a></li>
  <li><a href="https://icd.who.int/browse10/2019/en#/E84">E84</a> <a href="/wiki/Cystic_fibrosis" title="Cystic fibrosis">Cystic fibrosis</a></li>
</ul>
</div>"##;

/// Scripted responses plus per-operation call counters.
#[derive(Default)]
pub struct FakeClient {
    searches: FxHashMap<String, String>,
    links: FxHashMap<(String, String), LanguageLink>,
    pages: FxHashMap<String, String>,
    fail_pages: bool,
    pub search_calls: AtomicUsize,
    pub link_calls: AtomicUsize,
    pub page_calls: AtomicUsize,
}

impl FakeClient {
    /// Chapter IV with diabetic retinopathy and its Polish counterpart.
    pub fn chapter_iv() -> Self {
        Self::default()
            .search(CHAPTER_IV_QUERY, CHAPTER_IV_TITLE)
            .page(CHAPTER_IV_TITLE, CHAPTER_IV_HTML)
            .search("Diabetic retinopathy", "Diabetic retinopathy")
            .link(
                "Diabetic retinopathy",
                "pl",
                "https://pl.wikipedia.org/wiki/Retinopatia_cukrzycowa",
                "Retinopatia cukrzycowa",
            )
    }

    pub fn search(mut self, query: &str, title: &str) -> Self {
        self.searches.insert(query.to_string(), title.to_string());
        self
    }

    pub fn page(mut self, title: &str, html: &str) -> Self {
        self.pages.insert(title.to_string(), html.to_string());
        self
    }

    pub fn link(mut self, title: &str, language: &str, url: &str, link_title: &str) -> Self {
        self.links.insert(
            (title.to_string(), language.to_string()),
            LanguageLink {
                url: url.to_string(),
                title: link_title.to_string(),
            },
        );
        self
    }

    pub fn failing_pages(mut self) -> Self {
        self.fail_pages = true;
        self
    }

    pub fn calls(&self) -> (usize, usize, usize) {
        (
            self.search_calls.load(Ordering::SeqCst),
            self.link_calls.load(Ordering::SeqCst),
            self.page_calls.load(Ordering::SeqCst),
        )
    }
}

impl ContentClient for FakeClient {
    fn search_title(&self, query: &str) -> Result<Option<String>, ClientError> {
        self.search_calls.fetch_add(1, Ordering::SeqCst);
        Ok(self.searches.get(query).cloned())
    }

    fn language_link(
        &self,
        title: &str,
        language: &str,
    ) -> Result<Option<LanguageLink>, ClientError> {
        self.link_calls.fetch_add(1, Ordering::SeqCst);
        Ok(self
            .links
            .get(&(title.to_string(), language.to_string()))
            .cloned())
    }

    fn page_html(&self, title: &str) -> Result<String, ClientError> {
        self.page_calls.fetch_add(1, Ordering::SeqCst);
        if self.fail_pages {
            return Err(ClientError::Status {
                url: format!("https://en.wikipedia.org/w/api.php?page={title}"),
                status: 503,
            });
        }
        self.pages.get(title).cloned().ok_or_else(|| ClientError::Api {
            code: "missingtitle".to_string(),
            info: format!("no page `{title}`"),
        })
    }
}
