//! Parallel resolution of many codes.

use std::collections::BTreeMap;

use rayon::prelude::*;
use serde::Serialize;

use super::{CodeResolver, LanguageVariant, ResolveError};
use crate::wiki::ContentClient;

/// Outcome for one code of a batch.
#[derive(Debug)]
pub struct Resolution {
    pub code: String,
    pub outcome: Result<Vec<LanguageVariant>, ResolveError>,
    /// Requested languages absent from a successful result.
    pub missing_languages: Vec<String>,
}

impl Resolution {
    fn new<S: AsRef<str>>(
        code: &str,
        outcome: Result<Vec<LanguageVariant>, ResolveError>,
        requested: &[S],
    ) -> Self {
        let missing_languages = match &outcome {
            Ok(variants) => requested
                .iter()
                .map(|lang| lang.as_ref())
                .filter(|lang| !variants.iter().any(|v| v.language == *lang))
                .map(str::to_string)
                .collect(),
            Err(_) => Vec::new(),
        };
        Self {
            code: code.to_string(),
            outcome,
            missing_languages,
        }
    }

    /// Resolved without error but nothing was found.
    pub fn is_not_found(&self) -> bool {
        matches!(&self.outcome, Ok(variants) if variants.is_empty())
    }
}

impl<C: ContentClient + Sync> CodeResolver<C> {
    /// Resolve `codes` in parallel. Results keep the input order.
    pub fn resolve_batch<S: AsRef<str> + Sync>(
        &self,
        codes: &[String],
        languages: &[S],
    ) -> Vec<Resolution> {
        self.resolve_batch_with(codes, languages, |_| {})
    }

    /// Like [`resolve_batch`](Self::resolve_batch), calling `on_done` as each
    /// code finishes (in completion order).
    pub fn resolve_batch_with<S, F>(
        &self,
        codes: &[String],
        languages: &[S],
        on_done: F,
    ) -> Vec<Resolution>
    where
        S: AsRef<str> + Sync,
        F: Fn(&Resolution) + Sync,
    {
        codes
            .par_iter()
            .map(|code| {
                let resolution = Resolution::new(code, self.resolve(code, languages), languages);
                on_done(&resolution);
                resolution
            })
            .collect()
    }
}

/// A failed code and its error message.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct FailedCode {
    pub code: String,
    pub error: String,
}

/// Summary of a batch.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize)]
pub struct BatchReport {
    pub resolved: usize,
    pub not_found: Vec<String>,
    pub failed: Vec<FailedCode>,
    /// Code → requested languages without an article.
    pub missing_languages: BTreeMap<String, Vec<String>>,
}

impl BatchReport {
    pub fn from_resolutions(resolutions: &[Resolution]) -> Self {
        let mut report = Self::default();
        for resolution in resolutions {
            match &resolution.outcome {
                Ok(variants) if variants.is_empty() => {
                    report.not_found.push(resolution.code.clone());
                }
                Ok(_) => {
                    report.resolved += 1;
                    if !resolution.missing_languages.is_empty() {
                        report.missing_languages.insert(
                            resolution.code.clone(),
                            resolution.missing_languages.clone(),
                        );
                    }
                }
                Err(err) => report.failed.push(FailedCode {
                    code: resolution.code.clone(),
                    error: error_chain(err),
                }),
            }
        }
        report
    }

    pub fn is_clean(&self) -> bool {
        self.not_found.is_empty() && self.failed.is_empty()
    }
}

/// `err` and its sources joined with `: `.
fn error_chain(err: &dyn std::error::Error) -> String {
    let mut message = err.to_string();
    let mut source = err.source();
    while let Some(cause) = source {
        message.push_str(": ");
        message.push_str(&cause.to_string());
        source = cause.source();
    }
    message
}
