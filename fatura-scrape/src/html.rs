//! `DocumentTree` over an HTML5 parse (scraper / html5ever).

use fatura_core::ScrapeError;
use scraper::{ElementRef, Html, Selector};

use crate::tree::{DocumentTree, TreeNode};

/// A parsed statement page.
pub struct HtmlDocument {
    html: Html,
}

impl HtmlDocument {
    pub fn parse(source: &str) -> Self {
        Self {
            html: Html::parse_document(source),
        }
    }
}

fn compile(selector: &str) -> Result<Selector, ScrapeError> {
    Selector::parse(selector).map_err(|e| ScrapeError::Selector {
        selector: selector.to_string(),
        reason: e.to_string(),
    })
}

fn push_visible_text(el: ElementRef<'_>, attr: &str, value: &str, out: &mut String) {
    for child in el.children() {
        if let Some(child_el) = ElementRef::wrap(child) {
            if child_el.value().attr(attr) != Some(value) {
                push_visible_text(child_el, attr, value, out);
            }
        } else if let Some(text) = child.value().as_text() {
            out.push_str(text);
        }
    }
}

impl<'a> TreeNode<'a> for ElementRef<'a> {
    fn tag_name(&self) -> &'a str {
        self.value().name()
    }

    fn attr(&self, name: &str) -> Option<&'a str> {
        self.value().attr(name)
    }

    fn text_content(&self) -> String {
        ElementRef::text(self).collect()
    }

    fn text_excluding(&self, attr: &str, value: &str) -> String {
        let mut out = String::new();
        if self.value().attr(attr) != Some(value) {
            push_visible_text(*self, attr, value, &mut out);
        }
        out
    }

    fn parent_element(&self) -> Option<Self> {
        self.parent().and_then(ElementRef::wrap)
    }

    fn query(&self, selector: &str) -> Result<Vec<Self>, ScrapeError> {
        let sel = compile(selector)?;
        Ok(ElementRef::select(self, &sel).collect())
    }
}

impl DocumentTree for HtmlDocument {
    type Node<'a>
        = ElementRef<'a>
    where
        Self: 'a;

    fn query<'a>(&'a self, selector: &str) -> Result<Vec<ElementRef<'a>>, ScrapeError> {
        let sel = compile(selector)?;
        Ok(self.html.select(&sel).collect())
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    const PAGE: &str = r#"
<html><body>
  <table class="charge"><tbody><tr>
    <td class="description">Pinboard</td>
    <td class="amount"><span aria-hidden="true">US$ 22,00</span><span>R$ 127,82</span></td>
  </tr></tbody></table>
</body></html>
"#;

    #[test]
    fn test_select_by_class_and_tag() {
        let doc = HtmlDocument::parse(PAGE);
        assert_eq!(doc.by_class("description").unwrap().len(), 1);
        assert_eq!(doc.by_tag("table").unwrap().len(), 1);
        assert_eq!(doc.by_tag("tbody").unwrap().len(), 1);
    }

    #[test]
    fn test_closest_walks_up_to_table() {
        let doc = HtmlDocument::parse(PAGE);
        let desc = doc.by_class("description").unwrap()[0];
        let table = desc.closest("table").unwrap();
        assert_eq!(TreeNode::attr(&table, "class"), Some("charge"));
        assert_eq!(table.closest("table"), Some(table));
        assert!(desc.closest("ul").is_none());
    }

    #[test]
    fn test_not_attribute_selector_and_hidden_text() {
        let doc = HtmlDocument::parse(PAGE);
        let cell = doc.by_class("amount").unwrap()[0];
        let visible = cell.query(r#"span:not([aria-hidden="true"])"#).unwrap();
        assert_eq!(visible.len(), 1);
        assert_eq!(visible[0].text_content(), "R$ 127,82");
        assert_eq!(cell.text_excluding("aria-hidden", "true"), "R$ 127,82");
        assert_eq!(cell.text_content(), "US$ 22,00R$ 127,82");
    }

    #[test]
    fn test_node_equality_is_identity_and_text_is_raw() {
        let doc = HtmlDocument::parse(
            r#"<p class="description"> Uber </p><p class="description"> Uber </p>"#,
        );
        let found = doc.by_class("description").unwrap();
        let again = doc.by_class("description").unwrap();
        let unique = fatura_core::first_occurrences(found.iter().chain(again.iter()).copied());
        assert_eq!(unique, found);
        assert_eq!(unique[0].text_content(), " Uber ");
    }

    #[test]
    fn test_bad_selector_is_typed_error() {
        let doc = HtmlDocument::parse(PAGE);
        let err = doc.query("td[").unwrap_err();
        assert!(matches!(err, ScrapeError::Selector { .. }));
    }
}
