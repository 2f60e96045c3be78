//! Plain-text excerpts of markdown bodies for list cards.

use comrak::nodes::{AstNode, NodeValue};
use comrak::{Arena, Options, parse_document};

/// Flatten rendered markdown to its visible text.
///
/// Block elements end with a newline; inline HTML is dropped.
pub fn strip_markdown(markdown: &str) -> String {
    if markdown.is_empty() {
        return String::new();
    }
    let arena = Arena::new();
    let mut options = Options::default();
    options.extension.strikethrough = true;
    options.extension.table = true;
    options.extension.autolink = true;
    options.extension.tasklist = true;
    let root = parse_document(&arena, markdown, &options);

    let mut text = String::new();
    collect_text(root, &mut text);
    text.trim().to_string()
}

fn collect_text<'a>(node: &'a AstNode<'a>, text: &mut String) {
    let is_block = match &node.data.borrow().value {
        NodeValue::Text(t) => {
            text.push_str(t);
            return;
        }
        NodeValue::Code(c) => {
            text.push_str(&c.literal);
            return;
        }
        NodeValue::CodeBlock(block) => {
            text.push_str(&block.literal);
            true
        }
        NodeValue::HtmlInline(_) | NodeValue::HtmlBlock(_) => return,
        NodeValue::SoftBreak | NodeValue::LineBreak => {
            text.push('\n');
            return;
        }
        NodeValue::Paragraph
        | NodeValue::Heading(_)
        | NodeValue::Item(_)
        | NodeValue::TableRow(_)
        | NodeValue::ThematicBreak => true,
        _ => false,
    };
    for child in node.children() {
        collect_text(child, text);
    }
    if is_block && !text.ends_with('\n') {
        text.push('\n');
    }
}

/// Cut `text` to `limit` chars, trimming the cut and appending `...`.
pub fn truncate_text(text: &str, limit: usize) -> String {
    if text.chars().count() <= limit {
        return text.to_string();
    }
    let head: String = text.chars().take(limit).collect();
    format!("{}...", head.trim())
}

/// Card layouts in the public list pages, each with its own excerpt length.
#[derive(Debug, Clone, Copy, PartialEq, Eq, clap::ValueEnum)]
#[value(rename_all = "snake_case")]
pub enum CardView {
    /// Blog cards on the top page.
    Blog,
    /// Portfolio grid.
    Grid,
    /// Portfolio list.
    List,
}

impl CardView {
    pub const fn excerpt_limit(self) -> usize {
        match self {
            Self::Blog => 160,
            Self::Grid => 110,
            Self::List => 200,
        }
    }
}

/// A card excerpt: stripped markdown truncated to `limit` chars.
pub fn excerpt(markdown: &str, limit: usize) -> String {
    truncate_text(&strip_markdown(markdown), limit)
}

/// Split a comma-separated tag field. An empty field has no tags.
pub fn parse_tags(input: &str) -> Vec<String> {
    if input.is_empty() {
        return Vec::new();
    }
    input.split(',').map(|t| t.trim().to_string()).collect()
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_strip_markdown_drops_syntax() {
        let text = strip_markdown("# Title\n\nSome **bold** and `code`.\n\n- one\n- two");
        assert_eq!(text, "Title\nSome bold and code.\none\ntwo");
    }

    #[test]
    fn test_strip_markdown_keeps_link_text() {
        assert_eq!(
            strip_markdown("[click here](https://example.com)"),
            "click here"
        );
    }

    #[test]
    fn test_strip_markdown_drops_inline_html() {
        assert_eq!(strip_markdown("a <span>b</span> c"), "a b c");
    }

    #[test]
    fn test_strip_markdown_empty() {
        assert_eq!(strip_markdown(""), "");
    }

    #[test]
    fn test_truncate_short_text_unchanged() {
        assert_eq!(truncate_text("短い", 5), "短い");
    }

    #[test]
    fn test_truncate_trims_and_appends_ellipsis() {
        assert_eq!(truncate_text("hello world again", 6), "hello...");
        assert_eq!(truncate_text("あいうえおかきくけこ", 3), "あいう...");
    }

    #[test]
    fn test_excerpt_combines_strip_and_truncate() {
        assert_eq!(excerpt("**Rust** is fun", 4), "Rust...");
    }

    #[test]
    fn test_parse_tags() {
        assert!(parse_tags("").is_empty());
        assert_eq!(parse_tags("rust, web ,life"), vec!["rust", "web", "life"]);
    }
}
