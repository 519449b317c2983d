//! Read-only document-tree capability the scraper runs against.
//!
//! Anything that can answer CSS-selector queries and walk up to an
//! ancestor works; `HtmlDocument` is the implementation over a parsed page.

use fatura_core::ScrapeError;

/// An element in the tree. Equality is node identity.
pub trait TreeNode<'a>: Copy + PartialEq {
    fn tag_name(&self) -> &'a str;

    fn attr(&self, name: &str) -> Option<&'a str>;

    /// Concatenated text of the element and all descendants.
    fn text_content(&self) -> String;

    /// Text content, skipping every subtree whose root has `attr == value`.
    fn text_excluding(&self, attr: &str, value: &str) -> String;

    fn parent_element(&self) -> Option<Self>;

    /// Descendants matching a CSS selector, in document order.
    fn query(&self, selector: &str) -> Result<Vec<Self>, ScrapeError>;

    /// Nearest element (self included) with the given tag name.
    fn closest(&self, tag: &str) -> Option<Self> {
        let mut current = Some(*self);
        while let Some(node) = current {
            if node.tag_name().eq_ignore_ascii_case(tag) {
                return Some(node);
            }
            current = node.parent_element();
        }
        None
    }
}

pub trait DocumentTree {
    type Node<'a>: TreeNode<'a>
    where
        Self: 'a;

    /// All elements matching a CSS selector, in document order.
    fn query<'a>(&'a self, selector: &str) -> Result<Vec<Self::Node<'a>>, ScrapeError>;

    fn by_class<'a>(&'a self, class: &str) -> Result<Vec<Self::Node<'a>>, ScrapeError> {
        self.query(&format!(".{class}"))
    }

    fn by_tag<'a>(&'a self, tag: &str) -> Result<Vec<Self::Node<'a>>, ScrapeError> {
        self.query(tag)
    }
}
