//! Rendering of stored comment text for display.

use crate::assign::Context;
use db::models::feedback_writeup::CommentFormat;
use scraper::node::Text;
use scraper::{Html, Node};

/// Visible characters kept by a feedback summary.
pub const SUMMARY_LENGTH: usize = 140;

/// Appended to text cut by [`shorten_html`].
pub const ELLIPSIS: &str = "...";

/// Turns stored comment text into display HTML.
pub trait TextFormatter: Send + Sync {
    fn format(&self, text: &str, format: CommentFormat, context: Context) -> String;

    /// Cuts rendered HTML to `max_len` visible characters. The flag reports
    /// whether anything was removed.
    fn shorten(&self, rendered: &str, max_len: usize) -> (String, bool) {
        shorten_html(rendered, max_len)
    }
}

/// Default formatter.
///
/// HTML passes through, plain text is escaped, and markup keeps its HTML but
/// turns newlines into breaks. Empty input always renders empty.
#[derive(Debug, Clone, Copy, Default)]
pub struct HtmlFormatter;

impl TextFormatter for HtmlFormatter {
    fn format(&self, text: &str, format: CommentFormat, _context: Context) -> String {
        if text.is_empty() {
            return String::new();
        }

        match format {
            CommentFormat::Html => text.to_string(),
            CommentFormat::Plain => nl2br(&escape_html(text)),
            CommentFormat::Markup => format!("<div class=\"text_to_html\">{}</div>", nl2br(text)),
        }
    }
}

/// Escapes text for use as element content.
pub fn escape_html(text: &str) -> String {
    let mut fragment = Html::parse_fragment("");
    let root = fragment.root_element().id();
    if let Some(mut node) = fragment.tree.get_mut(root) {
        node.append(Node::Text(Text { text: text.into() }));
    }
    fragment.root_element().inner_html()
}

fn nl2br(text: &str) -> String {
    text.replace("\r\n", "\n").replace('\n', "<br />\n")
}

fn count_visible(fragment: &Html) -> usize {
    fragment
        .root_element()
        .text()
        .map(|text| text.chars().count())
        .sum()
}

/// Number of visible characters in an HTML fragment. Markup, comments and
/// attribute values are not counted; a character reference counts as one.
pub fn visible_len(html: &str) -> usize {
    count_visible(&Html::parse_fragment(html))
}

/// Shortens HTML to at most `max_len` visible characters, preferring to cut at
/// the last whitespace. Elements open at the cut are closed after the
/// ellipsis. Returns the input untouched when it already fits.
pub fn shorten_html(html: &str, max_len: usize) -> (String, bool) {
    let mut fragment = Html::parse_fragment(html);
    if count_visible(&fragment) <= max_len {
        return (html.to_string(), false);
    }

    // Document order, so every ancestor of a node precedes it.
    let nodes: Vec<_> = fragment
        .root_element()
        .descendants()
        .skip(1)
        .map(|node| {
            let chars = node
                .value()
                .as_text()
                .map(|text| text.chars().collect::<Vec<char>>());
            (node.id(), chars)
        })
        .collect();

    let mut seen = 0;
    let mut last_break = None;
    let mut hard_cut = None;
    'scan: for (index, (_, chars)) in nodes.iter().enumerate() {
        let Some(chars) = chars else { continue };
        for (offset, c) in chars.iter().enumerate() {
            if seen == max_len {
                hard_cut = Some((index, offset));
                break 'scan;
            }
            if c.is_whitespace() && seen > 0 {
                last_break = Some((index, offset));
            }
            seen += 1;
        }
    }

    let Some((index, offset)) = last_break.or(hard_cut) else {
        return (html.to_string(), false);
    };

    let (cut_id, chars) = &nodes[index];
    let mut kept: String = chars.iter().flatten().take(offset).collect();
    kept.push_str(ELLIPSIS);
    if let Some(mut node) = fragment.tree.get_mut(*cut_id) {
        *node.value() = Node::Text(Text {
            text: kept.as_str().into(),
        });
    }

    for (id, _) in &nodes[index + 1..] {
        if let Some(mut node) = fragment.tree.get_mut(*id) {
            node.detach();
        }
    }

    (fragment.root_element().inner_html(), true)
}
