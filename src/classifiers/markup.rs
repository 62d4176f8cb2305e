//! Navigation in a parsed HTML document.
//!
//! Advisory pages are not navigated with CSS selectors but by walking the
//! document in order: "the first link after this text", "the next cell after
//! this marker". [`Markup`] gives each node its position in a pre-order walk
//! of the tree and every search starts from such a position.

use scraper::{ElementRef, Html, Node};

/// A parsed HTML page.
pub struct Markup {
    document: Html,
}

/// Returns the text of a text node.
fn text_of(node: &Node) -> Option<&str> {
    match node {
        Node::Text(text) => Some(&*text.text),
        _ => None,
    }
}

/// Returns the tag name of an element node.
fn element_name(node: &Node) -> Option<&str> {
    match node {
        Node::Element(element) => Some(element.name()),
        _ => None,
    }
}

impl Markup {
    /// Parses a whole HTML document. Parsing never fails, broken markup
    /// is fixed up the way browsers do.
    pub fn parse(html: &str) -> Self {
        Self {
            document: Html::parse_document(html),
        }
    }

    /// Position of the first node, at or after `start`, accepted by the predicate.
    fn find_from<F>(&self, start: usize, predicate: F) -> Option<usize>
    where
        F: Fn(&Node) -> bool,
    {
        self.document
            .tree
            .root()
            .descendants()
            .enumerate()
            .skip(start)
            .find(|(_, node)| predicate(node.value()))
            .map(|(position, _)| position)
    }

    /// Position of the first text node accepted by the predicate.
    pub fn find_text<F>(&self, predicate: F) -> Option<usize>
    where
        F: Fn(&str) -> bool,
    {
        self.find_next_text(None, predicate)
    }

    /// Position of the first text node after `after` accepted by the predicate.
    pub fn find_next_text<F>(&self, after: Option<usize>, predicate: F) -> Option<usize>
    where
        F: Fn(&str) -> bool,
    {
        let start = after.map_or(0, |position| position + 1);
        self.find_from(start, |node| text_of(node).is_some_and(&predicate))
    }

    /// Position of the first text node whose trimmed text equals `text`.
    pub fn find_exact_text(&self, after: Option<usize>, text: &str) -> Option<usize> {
        self.find_next_text(after, |candidate| candidate.trim() == text)
    }

    /// Position of the first `name` element after `after`.
    pub fn find_next_element(&self, after: usize, name: &str) -> Option<usize> {
        self.find_from(after + 1, |node| element_name(node) == Some(name))
    }

    /// Position of the first `name` element having `attribute="value"`.
    pub fn find_element_with_attr(&self, name: &str, attribute: &str, value: &str) -> Option<usize> {
        self.find_from(0, |node| match node {
            Node::Element(element) => {
                element.name() == name && element.attr(attribute) == Some(value)
            }
            _ => false,
        })
    }

    /// Value of an attribute of the element at `position`.
    pub fn attr(&self, position: usize, attribute: &str) -> Option<String> {
        self.document
            .tree
            .root()
            .descendants()
            .nth(position)
            .and_then(|node| match node.value() {
                Node::Element(element) => element.attr(attribute).map(str::to_string),
                _ => None,
            })
    }

    /// All the text fragments under the element at `position`, in order.
    pub fn text_fragments(&self, position: usize) -> Vec<String> {
        self.document
            .tree
            .root()
            .descendants()
            .nth(position)
            .and_then(ElementRef::wrap)
            .map(|element| element.text().map(str::to_string).collect())
            .unwrap_or_default()
    }

    /// Text of the first child of the node at `position`, when that child is
    /// a text node.
    pub fn first_child_text(&self, position: usize) -> Option<String> {
        self.document
            .tree
            .root()
            .descendants()
            .nth(position)
            .and_then(|node| node.first_child())
            .and_then(|child| text_of(child.value()).map(str::to_string))
    }
}
