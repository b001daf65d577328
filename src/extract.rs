//! Selector-based extraction over parsed markup.
//!
//! The HTML library is kept behind [`MarkupEngine`] so the rest of the crate
//! only sees documents, ordered node handles and [`ExtractedElement`]s.

use scraper::{ElementRef, Html, Selector};
use crate::api::models::ExtractedElement;

#[derive(Debug, Clone, PartialEq, Eq, thiserror::Error)]
pub enum SelectorError {
    #[error("Error parsing HTML with selector {selector}: {message}")]
    Parse { selector: String, message: String },

    #[error("No elements found with selector: {selector}")]
    NoMatches { selector: String },
}

pub trait NodeHandle {
    /// Concatenated descendant text.
    fn text(&self) -> String;
    /// Serialized markup including the node's own tag.
    fn outer_markup(&self) -> String;
}

pub trait MarkupEngine {
    type Document;
    type Node<'a>: NodeHandle;

    /// Best-effort parse; never fails on the document itself.
    fn parse(&self, markup: &str) -> Self::Document;

    /// Matches in document order.
    fn query<'a>(
        &self,
        document: &'a Self::Document,
        selector: &str,
    ) -> Result<Vec<Self::Node<'a>>, SelectorError>;
}

/// CSS selectors over an html5ever tree.
#[derive(Debug, Default, Clone, Copy)]
pub struct CssEngine;

impl NodeHandle for ElementRef<'_> {
    fn text(&self) -> String {
        ElementRef::text(self).collect()
    }

    fn outer_markup(&self) -> String {
        self.html()
    }
}

impl MarkupEngine for CssEngine {
    type Document = Html;
    type Node<'a> = ElementRef<'a>;

    fn parse(&self, markup: &str) -> Html {
        Html::parse_document(markup)
    }

    fn query<'a>(&self, document: &'a Html, selector: &str) -> Result<Vec<ElementRef<'a>>, SelectorError> {
        let parsed = Selector::parse(selector).map_err(|e| SelectorError::Parse {
            selector: selector.to_string(),
            message: e.to_string(),
        })?;

        Ok(document.select(&parsed).collect())
    }
}

/// Runs `selector` against `markup` and returns one element per match.
///
/// Zero matches is `SelectorError::NoMatches`, which callers report as a soft
/// failure rather than a request error.
pub fn extract_with<E: MarkupEngine>(
    engine: &E,
    markup: &str,
    selector: &str,
) -> Result<Vec<ExtractedElement>, SelectorError> {
    let document = engine.parse(markup);
    let nodes = engine.query(&document, selector)?;

    if nodes.is_empty() {
        return Err(SelectorError::NoMatches { selector: selector.to_string() });
    }

    Ok(nodes
        .iter()
        .enumerate()
        .map(|(index, node)| ExtractedElement {
            text: node.text().trim().to_string(),
            html: node.outer_markup(),
            index,
        })
        .collect())
}

pub fn extract(markup: &str, selector: &str) -> Result<Vec<ExtractedElement>, SelectorError> {
    extract_with(&CssEngine, markup, selector)
}

#[cfg(test)]
mod tests {
    use super::*;

    const PAGE: &str = r#"<!DOCTYPE html>
<html>
  <head><title>Fixture</title></head>
  <body>
    <h1>Hello</h1>
    <ul id="items">
      <li class="item">  first  </li>
      <li class="item"><b>second</b> item</li>
      <li class="other">skip</li>
      <li class="item">
        third
      </li>
    </ul>
  </body>
</html>"#;

    #[test]
    fn single_heading() {
        let found = extract("<html><body><h1>Hello</h1></body></html>", "h1").unwrap();
        assert_eq!(
            found,
            vec![ExtractedElement { text: "Hello".into(), html: "<h1>Hello</h1>".into(), index: 0 }]
        );
    }

    #[test]
    fn matches_keep_document_order_and_trimmed_text() {
        let found = extract(PAGE, "li.item").unwrap();
        let texts: Vec<_> = found.iter().map(|e| e.text.as_str()).collect();
        assert_eq!(texts, ["first", "second item", "third"]);

        let indexes: Vec<_> = found.iter().map(|e| e.index).collect();
        assert_eq!(indexes, [0, 1, 2]);

        assert_eq!(found[1].html, r#"<li class="item"><b>second</b> item</li>"#);
        for element in &found {
            assert_eq!(element.text, element.text.trim());
        }
    }

    #[test]
    fn nested_matches_are_preorder() {
        let markup = "<div id=a><div id=b></div></div><div id=c></div>";
        let found = extract(markup, "div").unwrap();
        let ids: Vec<_> = found
            .iter()
            .map(|e| e.html.split('"').nth(1).unwrap_or_default().to_string())
            .collect();
        assert_eq!(ids, ["a", "b", "c"]);
    }

    #[test]
    fn zero_matches_is_no_matches() {
        let err = extract(PAGE, "table.prices").unwrap_err();
        assert_eq!(err, SelectorError::NoMatches { selector: "table.prices".into() });
        assert_eq!(err.to_string(), "No elements found with selector: table.prices");
    }

    #[test]
    fn malformed_selector_is_parse_error() {
        let err = extract(PAGE, "li[[").unwrap_err();
        match &err {
            SelectorError::Parse { selector, message } => {
                assert_eq!(selector, "li[[");
                assert!(!message.is_empty());
            }
            other => panic!("expected parse error, got {other:?}"),
        }
        assert!(err.to_string().starts_with("Error parsing HTML with selector li[[: "));
    }

    #[test]
    fn broken_markup_still_parses() {
        let found = extract("<p>one<p>two<div><span>three", "p, span").unwrap();
        let texts: Vec<_> = found.iter().map(|e| e.text.as_str()).collect();
        assert_eq!(texts, ["one", "two", "three"]);
    }

    #[test]
    fn extraction_is_repeatable() {
        let first = extract(PAGE, "ul > li").unwrap();
        let second = extract(PAGE, "ul > li").unwrap();
        assert_eq!(first, second);
    }
}
