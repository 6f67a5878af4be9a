//! Locate a disease entry inside an ICD-10 chapter article.
//!
//! Chapter articles list diseases as nested `<ul>` blocks. Each `<li>` starts
//! with an anchor whose text is the code (or code range), followed by an
//! anchor to the disease article:
//!
//! ```html
//! <li><a href="https://icd.who.int/...">E10</a> <a href="/wiki/Diabetes_mellitus_type_1" title="...">...</a>
//!   <ul>
//!     <li><a href="https://icd.who.int/...">E10.3</a> <a href="/wiki/Diabetic_retinopathy" title="Diabetic retinopathy">...</a></li>
//!   </ul>
//! </li>
//! ```
//!
//! Search order:
//! 1. Every `<ul>` that is a direct child of a `<div>` other than the table of
//!    contents, in document order.
//! 2. Within a list, items first to last. For each item, its nested lists are
//!    searched before its own anchors, so the narrowest entry wins.
//! 3. The first match is returned, there is no ranking.

use serde::Serialize;

use super::tree::{Document, Element, MarkupError};

/// `id` of the table-of-contents block, never searched.
pub const TOC_ID: &str = "toc";

/// The anchor pointing at a disease article.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct DiseaseLink {
    /// Site-relative link, e.g. `/wiki/Diabetic_retinopathy`.
    pub href: String,
    pub title: String,
}

/// Parse `markup` and find the entry for `code`.
///
/// `Ok(None)` means the page has no entry for the code, which is an ordinary
/// outcome. Must not be called on the generic ICD-10 index page.
pub fn find_disease(markup: &str, code: &str) -> Result<Option<DiseaseLink>, MarkupError> {
    let doc = Document::parse(markup)?;
    Ok(find_in_document(&doc, code))
}

/// Search an already parsed document.
pub fn find_in_document(doc: &Document, code: &str) -> Option<DiseaseLink> {
    let code = code.trim().to_uppercase();
    if code.is_empty() {
        return None;
    }

    let mut lists = Vec::new();
    for root in doc.elements() {
        collect_section_lists(root, &mut lists);
    }

    lists.into_iter().find_map(|list| find_in_list(list, &code))
}

/// Collect `div:not(#toc) > ul` in document order.
fn collect_section_lists<'a>(parent: &'a Element, out: &mut Vec<&'a Element>) {
    let is_section = parent.is("div") && parent.id() != Some(TOC_ID);

    for child in parent.elements() {
        if is_section && child.is("ul") {
            out.push(child);
        }
        collect_section_lists(child, out);
    }
}

fn find_in_list(list: &Element, code: &str) -> Option<DiseaseLink> {
    list.children_named("li").find_map(|item| {
        item.children_named("ul")
            .find_map(|nested| find_in_list(nested, code))
            .or_else(|| match_item(item, code))
    })
}

/// Check the item's own anchors: label first, disease link second.
fn match_item(item: &Element, code: &str) -> Option<DiseaseLink> {
    let mut anchors = item.children_named("a");
    let label = anchors.next()?;
    let link = anchors.next()?;

    if !label_covers(&label.text(), code) {
        return None;
    }

    let href = link.attr("href").filter(|href| !href.is_empty())?;
    let title = match link.attr("title") {
        Some(title) if !title.is_empty() => title.to_string(),
        _ => link.text().trim().to_string(),
    };

    Some(DiseaseLink {
        href: href.to_string(),
        title,
    })
}

/// Whether `label` mentions `code` as a whole code.
///
/// `E10` is contained in `(E10)` and `E10-E14`, but not in `E10.3` or `E101`:
/// a match followed by more code characters belongs to a narrower entry.
fn label_covers(label: &str, code: &str) -> bool {
    label.match_indices(code).any(|(start, _)| {
        let before = label[..start].chars().next_back();
        let mut after = label[start + code.len()..].chars();

        let starts_clean = !before.is_some_and(|c| c.is_ascii_alphanumeric());
        let ends_clean = match after.next() {
            None => true,
            Some('.') => !after.next().is_some_and(|c| c.is_ascii_digit()),
            Some(c) => !c.is_ascii_alphanumeric(),
        };
        starts_clean && ends_clean
    })
}
