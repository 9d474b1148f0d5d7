//! Markup parsing capability.
//!
//! The segmenter only needs a flat view of a fragment: the top-level nodes
//! with tag name, outer markup, and text content. Any parser that can
//! produce that view is substitutable; the default implementation walks a
//! tree-sitter HTML parse without descending into nested containers.

use once_cell::sync::Lazy;
use regex::Regex;
use tree_sitter::{Node, Parser};

/// One top-level node of a parsed fragment.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct RawNode {
    /// Lowercased tag name; `None` for bare text nodes.
    pub tag: Option<String>,
    /// Outer markup, byte-preserved from the source fragment.
    pub outer: String,
    /// Concatenated text content of the node and its descendants.
    pub text: String,
}

/// Capability to split a markup fragment into flat top-level nodes.
pub trait MarkupParser: Send + Sync {
    /// Parse a fragment into its top-level nodes.
    ///
    /// Malformed input degrades to fewer (possibly zero) nodes; parsing
    /// never fails.
    fn parse_fragment(&self, markup: &str) -> Vec<RawNode>;
}

/// Tree-sitter backed HTML parser.
#[derive(Debug, Default, Clone, Copy)]
pub struct HtmlParser;

impl HtmlParser {
    /// Create an HTML parser.
    #[inline]
    #[must_use]
    pub fn new() -> Self {
        Self
    }
}

impl MarkupParser for HtmlParser {
    fn parse_fragment(&self, markup: &str) -> Vec<RawNode> {
        let mut parser = Parser::new();
        if parser
            .set_language(&tree_sitter_html::LANGUAGE.into())
            .is_err()
        {
            tracing::warn!("html grammar rejected by tree-sitter; fragment dropped");
            return Vec::new();
        }
        let Some(tree) = parser.parse(markup, None) else {
            tracing::warn!(len = markup.len(), "unparseable markup fragment dropped");
            return Vec::new();
        };

        let src = markup.as_bytes();
        let root = tree.root_node();
        let mut out = Vec::new();
        let mut cursor = root.walk();
        for child in root.named_children(&mut cursor) {
            // Comments and doctype carry no editable content.
            if matches!(child.kind(), "comment" | "doctype") {
                continue;
            }
            out.push(RawNode {
                tag: tag_name(child, src),
                outer: child.utf8_text(src).unwrap_or_default().to_string(),
                text: collect_text(child, src),
            });
        }
        out
    }
}

/// Tag name of an element node, lowercased.
fn tag_name(node: Node<'_>, src: &[u8]) -> Option<String> {
    if node.kind() == "text" {
        return None;
    }
    let mut cursor = node.walk();
    for child in node.children(&mut cursor) {
        if matches!(child.kind(), "start_tag" | "self_closing_tag") {
            let mut inner = child.walk();
            for part in child.children(&mut inner) {
                if part.kind() == "tag_name" {
                    return part.utf8_text(src).ok().map(str::to_ascii_lowercase);
                }
            }
        }
    }
    None
}

/// Concatenated text content of a node and its descendants.
///
/// The grammar does not represent whitespace between sibling nodes as nodes
/// of its own, so the gaps between children are recovered from the source
/// span; `<p>Hello <b>world</b></p>` reads as `Hello world`, not
/// `Helloworld`.
fn collect_text(node: Node<'_>, src: &[u8]) -> String {
    let mut out = String::new();
    push_text(node, src, &mut out);
    out
}

fn push_text(node: Node<'_>, src: &[u8], out: &mut String) {
    match node.kind() {
        "text" | "entity" => {
            if let Ok(text) = node.utf8_text(src) {
                out.push_str(text);
            }
        }
        "comment" | "doctype" => {}
        _ => {
            let mut cursor = node.walk();
            let mut prev_end: Option<usize> = None;
            for child in node.children(&mut cursor) {
                match child.kind() {
                    "start_tag" | "end_tag" | "self_closing_tag" | "comment" | "doctype" => {}
                    _ => {
                        if let Some(end) = prev_end {
                            push_gap(src, end, child.start_byte(), out);
                        }
                        push_text(child, src, out);
                    }
                }
                prev_end = Some(child.end_byte());
            }
        }
    }
}

/// Push the inter-node source span when it is whitespace.
fn push_gap(src: &[u8], from: usize, to: usize, out: &mut String) {
    let Some(gap) = src.get(from..to) else {
        return;
    };
    if !gap.is_empty() && gap.iter().all(u8::is_ascii_whitespace) {
        if let Ok(gap) = std::str::from_utf8(gap) {
            out.push_str(gap);
        }
    }
}

static TAG: Lazy<Regex> = Lazy::new(|| Regex::new(r"<[^>]*>").expect("valid tag regex"));

static IMG_SRC: Lazy<Regex> = Lazy::new(|| {
    Regex::new(r#"(?i)<img[^>]*\ssrc\s*=\s*["']([^"']+)["']"#).expect("valid img regex")
});

/// Strip markup tags, leaving text content only.
///
/// This is the view the character-count metric is defined over.
#[must_use]
pub fn strip_tags(markup: &str) -> String {
    TAG.replace_all(markup, "").into_owned()
}

/// Source url of the first image reference in the markup, if any.
#[must_use]
pub fn first_image_src(markup: &str) -> Option<String> {
    IMG_SRC.captures(markup).map(|c| c[1].to_string())
}

#[cfg(test)]
mod tests {
    use super::*;
    use pretty_assertions::assert_eq;

    #[test]
    fn parses_flat_top_level_nodes() {
        let parser = HtmlParser::new();
        let nodes = parser.parse_fragment("<h2>Title</h2><p>Hello <b>world</b></p>");

        assert_eq!(nodes.len(), 2);
        assert_eq!(nodes[0].tag.as_deref(), Some("h2"));
        assert_eq!(nodes[0].outer, "<h2>Title</h2>");
        assert_eq!(nodes[0].text, "Title");
        assert_eq!(nodes[1].tag.as_deref(), Some("p"));
        assert_eq!(nodes[1].text, "Hello world");
    }

    #[test]
    fn nested_containers_stay_inside_one_node() {
        let parser = HtmlParser::new();
        let nodes = parser.parse_fragment("<ul><li>one</li><li>two</li></ul>");

        assert_eq!(nodes.len(), 1);
        assert_eq!(nodes[0].tag.as_deref(), Some("ul"));
        assert_eq!(nodes[0].outer, "<ul><li>one</li><li>two</li></ul>");
    }

    #[test]
    fn whitespace_between_inline_nodes_survives() {
        let parser = HtmlParser::new();
        let nodes = parser.parse_fragment("<p>one <b>two</b> <i>three</i></p>");

        assert_eq!(nodes.len(), 1);
        assert_eq!(nodes[0].text, "one two three");
    }

    #[test]
    fn entities_keep_their_surrounding_spacing() {
        let parser = HtmlParser::new();
        let nodes = parser.parse_fragment("<p>a &amp; b</p>");

        assert_eq!(nodes[0].text, "a &amp; b");
    }

    #[test]
    fn bare_text_has_no_tag() {
        let parser = HtmlParser::new();
        let nodes = parser.parse_fragment("just text");

        assert_eq!(nodes.len(), 1);
        assert_eq!(nodes[0].tag, None);
        assert_eq!(nodes[0].text, "just text");
    }

    #[test]
    fn comments_and_doctype_are_dropped() {
        let parser = HtmlParser::new();
        let nodes = parser.parse_fragment("<!-- note --><p>kept</p>");

        assert_eq!(nodes.len(), 1);
        assert_eq!(nodes[0].tag.as_deref(), Some("p"));
    }

    #[test]
    fn empty_input_yields_no_nodes() {
        let parser = HtmlParser::new();
        assert!(parser.parse_fragment("").is_empty());
    }

    #[test]
    fn strip_tags_removes_all_markup() {
        assert_eq!(strip_tags("<h2>Title</h2>"), "Title");
        assert_eq!(strip_tags("<p>Hello world</p>"), "Hello world");
        assert_eq!(strip_tags("<figure><img src=\"a.png\"></figure>"), "");
        assert_eq!(strip_tags("no tags"), "no tags");
    }

    #[test]
    fn first_image_src_extracts_first_reference() {
        let markup = r#"<figure><img src="a.png"><img src='b.png'></figure>"#;
        assert_eq!(first_image_src(markup).as_deref(), Some("a.png"));
        assert_eq!(first_image_src("<p>none</p>"), None);
    }

    #[test]
    fn first_image_src_ignores_case_and_spacing() {
        let markup = r#"<IMG  SRC = "shot.jpg" alt="x">"#;
        assert_eq!(first_image_src(markup).as_deref(), Some("shot.jpg"));
    }
}
