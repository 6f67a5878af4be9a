//! Owned element tree built from rendered article HTML.
//!
//! `tl` produces a borrowed, handle-based DOM. It is converted once into
//! plain `Element`/`Node` values so the scanner can recurse over children
//! without juggling parser handles and lifetimes.

use thiserror::Error;

use super::entity::unescape;

#[derive(Debug, Error)]
pub enum MarkupError {
    #[error("failed to parse article markup: {0}")]
    Parse(String),
}

/// A node in the tree: element or text.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum Node {
    Element(Element),
    Text(String),
}

/// An HTML element with lower-cased tag name and decoded attribute values.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Element {
    pub tag: String,
    pub attrs: Vec<(String, String)>,
    pub children: Vec<Node>,
}

impl Element {
    pub fn new(tag: impl Into<String>) -> Self {
        Self {
            tag: tag.into(),
            attrs: Vec::new(),
            children: Vec::new(),
        }
    }

    #[inline]
    pub fn is(&self, tag: &str) -> bool {
        self.tag == tag
    }

    pub fn attr(&self, name: &str) -> Option<&str> {
        self.attrs
            .iter()
            .find(|(key, _)| key == name)
            .map(|(_, value)| value.as_str())
    }

    #[inline]
    pub fn id(&self) -> Option<&str> {
        self.attr("id")
    }

    /// Direct element children, in document order.
    pub fn elements(&self) -> impl Iterator<Item = &Element> {
        self.children.iter().filter_map(|node| match node {
            Node::Element(el) => Some(el),
            Node::Text(_) => None,
        })
    }

    /// Direct element children with the given tag.
    pub fn children_named<'a>(&'a self, tag: &'a str) -> impl Iterator<Item = &'a Element> {
        self.elements().filter(move |el| el.is(tag))
    }

    /// Concatenated text of all descendants.
    pub fn text(&self) -> String {
        let mut out = String::new();
        self.collect_text(&mut out);
        out
    }

    fn collect_text(&self, out: &mut String) {
        for child in &self.children {
            match child {
                Node::Text(text) => out.push_str(text),
                Node::Element(el) => el.collect_text(out),
            }
        }
    }

    /// First descendant (pre-order) with the given tag.
    pub fn find_first(&self, tag: &str) -> Option<&Element> {
        self.elements()
            .find_map(|el| if el.is(tag) { Some(el) } else { el.find_first(tag) })
    }
}

/// A parsed HTML document: the top-level nodes.
#[derive(Debug, Clone, Default)]
pub struct Document {
    roots: Vec<Node>,
}

impl Document {
    pub fn parse(html: &str) -> Result<Self, MarkupError> {
        let dom = tl::parse(html, tl::ParserOptions::default())
            .map_err(|err| MarkupError::Parse(format!("{err:?}")))?;
        let parser = dom.parser();

        let roots = dom
            .children()
            .iter()
            .filter_map(|handle| convert(*handle, parser))
            .collect();

        Ok(Self { roots })
    }

    /// Top-level elements.
    pub fn elements(&self) -> impl Iterator<Item = &Element> {
        self.roots.iter().filter_map(|node| match node {
            Node::Element(el) => Some(el),
            Node::Text(_) => None,
        })
    }

    /// First element (pre-order) with the given tag.
    pub fn find_first(&self, tag: &str) -> Option<&Element> {
        self.elements()
            .find_map(|el| if el.is(tag) { Some(el) } else { el.find_first(tag) })
    }

    /// Trimmed text of the `<title>` element, if any.
    pub fn title(&self) -> Option<String> {
        self.find_first("title").map(|el| el.text().trim().to_string())
    }
}

/// Convert a `tl` node and its subtree. Comments are dropped.
fn convert(handle: tl::NodeHandle, parser: &tl::Parser) -> Option<Node> {
    match handle.get(parser)? {
        tl::Node::Tag(tag) => {
            let mut element = Element::new(tag.name().as_utf8_str().to_lowercase());

            let attributes = tag.attributes();
            for (key, value) in attributes.iter() {
                let value = value.map(|v| unescape(&v).into_owned()).unwrap_or_default();
                element.attrs.push((key.to_lowercase(), value));
            }
            if element.id().is_none()
                && let Some(id) = attributes.id()
            {
                element.attrs.push(("id".to_string(), id.as_utf8_str().into_owned()));
            }

            element.children = tag
                .children()
                .top()
                .iter()
                .filter_map(|child| convert(*child, parser))
                .collect();

            Some(Node::Element(element))
        }
        tl::Node::Raw(bytes) => Some(Node::Text(unescape(&bytes.as_utf8_str()).into_owned())),
        tl::Node::Comment(_) => None,
    }
}
