//! Markdown display projections.
//!
//! # Responsibility
//! - Render draft content to HTML for the live preview pane.
//! - Derive plain-text preview lines and display labels for the note list.
//!
//! # Invariants
//! - Every projection is a pure function of its input; no disk access.
//! - Raw HTML in the source is dropped, never passed through to the output.

use once_cell::sync::Lazy;
use pulldown_cmark::{html, Event, Options, Parser};
use regex::Regex;
use std::path::Path;

const PREVIEW_MAX_CHARS: usize = 100;

static MARKDOWN_IMAGE_RE: Lazy<Regex> =
    Lazy::new(|| Regex::new(r"!\[[^\]]*]\(([^)]+)\)").expect("valid image regex"));
static MARKDOWN_LINK_RE: Lazy<Regex> =
    Lazy::new(|| Regex::new(r"\[([^\]]+)\]\(([^)]+)\)").expect("valid link regex"));
static MARKDOWN_SYMBOL_RE: Lazy<Regex> =
    Lazy::new(|| Regex::new(r#"[\*_`#>~\-\[\]\(\)!]+"#).expect("valid markdown symbol regex"));
static WHITESPACE_RE: Lazy<Regex> = Lazy::new(|| Regex::new(r"\s+").expect("valid ws regex"));

/// Renders markdown to HTML for the preview pane.
///
/// Tables, strikethrough and task lists are enabled. Raw HTML blocks and
/// inline HTML are filtered out of the event stream so note content cannot
/// inject markup into the preview.
pub fn render_html(markdown: &str) -> String {
    let mut options = Options::empty();
    options.insert(Options::ENABLE_TABLES);
    options.insert(Options::ENABLE_STRIKETHROUGH);
    options.insert(Options::ENABLE_TASKLISTS);

    let parser = Parser::new_ext(markdown, options)
        .filter(|event| !matches!(event, Event::Html(_) | Event::InlineHtml(_)));

    let mut output = String::new();
    html::push_html(&mut output, parser);
    output
}

/// Derives a short plain-text preview line from markdown content.
///
/// Rules:
/// - images are removed and links reduced to their label;
/// - markdown symbols are stripped and whitespace collapsed;
/// - the first 100 characters are retained;
/// - returns `None` when nothing displayable remains.
pub fn preview_line(markdown: &str) -> Option<String> {
    let without_images = MARKDOWN_IMAGE_RE.replace_all(markdown, " ");
    let without_links = MARKDOWN_LINK_RE.replace_all(&without_images, "$1");
    let without_symbols = MARKDOWN_SYMBOL_RE.replace_all(&without_links, " ");
    let normalized = WHITESPACE_RE.replace_all(&without_symbols, " ");
    let trimmed = normalized.trim();
    if trimmed.is_empty() {
        None
    } else {
        Some(trimmed.chars().take(PREVIEW_MAX_CHARS).collect())
    }
}

/// Display label for a note path: the file stem, falling back to the full
/// file name when there is no stem.
pub fn display_name(path: &Path) -> String {
    path.file_stem()
        .or_else(|| path.file_name())
        .map(|name| name.to_string_lossy().into_owned())
        .unwrap_or_default()
}

#[cfg(test)]
mod tests {
    use super::{display_name, preview_line, render_html};
    use std::path::Path;

    #[test]
    fn render_converts_basic_markdown() {
        let html = render_html("# Title\n\nsome *emphasis*");
        assert!(html.contains("<h1>Title</h1>"));
        assert!(html.contains("<em>emphasis</em>"));
    }

    #[test]
    fn render_drops_raw_html() {
        let html = render_html("before\n\n<script>alert(1)</script>\n\nafter");
        assert!(!html.contains("<script>"));
        assert!(html.contains("before"));
        assert!(html.contains("after"));
    }

    #[test]
    fn render_drops_inline_html() {
        let html = render_html("a <b onclick=\"x()\">b</b> c");
        assert!(!html.contains("onclick"));
    }

    #[test]
    fn preview_strips_markdown_and_limits_length() {
        let source = "# title\n\n- [link](https://example.com)\n**bold** ![img](x.png)";
        let text = preview_line(source).expect("preview should exist");
        assert!(!text.contains('#'));
        assert!(!text.contains('*'));
        assert!(text.contains("link"));
        assert!(!text.contains("x.png"));
        assert!(text.chars().count() <= 100);
    }

    #[test]
    fn preview_is_none_for_symbol_only_content() {
        assert!(preview_line("---\n###\n").is_none());
    }

    #[test]
    fn display_name_uses_file_stem() {
        assert_eq!(display_name(Path::new("/vault/sub/todo.md")), "todo");
        assert_eq!(display_name(Path::new("/vault/.md")), ".md");
    }
}
