use serde::Serialize;

/// One language edition of the resolved disease article.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct LanguageVariant {
    pub language: String,
    pub title: String,
    pub url: String,
}

impl LanguageVariant {
    pub fn new(
        language: impl Into<String>,
        title: impl Into<String>,
        url: impl Into<String>,
    ) -> Self {
        Self {
            language: language.into(),
            title: title.into(),
            url: url.into(),
        }
    }
}
