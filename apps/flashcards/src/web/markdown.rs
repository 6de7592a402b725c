//! Markdown rendering for card text.
//!
//! Cards are user-authored, so the output never contains links, images or
//! raw HTML: link text is kept without the anchor, images are dropped with
//! their alt text, and inline or block HTML is discarded.

use pulldown_cmark::{html, Event, Options, Parser, Tag, TagEnd};

pub fn render_markdown(source: &str) -> String {
    let options = Options::ENABLE_TABLES | Options::ENABLE_STRIKETHROUGH;

    let mut image_depth = 0_usize;
    let events = Parser::new_ext(source, options).filter(move |event| match event {
        Event::Start(Tag::Image { .. }) => {
            image_depth += 1;
            false
        }
        Event::End(TagEnd::Image) => {
            image_depth = image_depth.saturating_sub(1);
            false
        }
        _ if image_depth > 0 => false,
        Event::Start(Tag::Link { .. }) | Event::End(TagEnd::Link) => false,
        Event::Html(_) | Event::InlineHtml(_) => false,
        Event::Start(Tag::HtmlBlock) | Event::End(TagEnd::HtmlBlock) => false,
        _ => true,
    });

    let mut out = String::with_capacity(source.len() * 3 / 2);
    html::push_html(&mut out, events);
    out
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn renders_basic_formatting() {
        let html = render_markdown("* **Bold**\n* _Italics_\n\n1. One\n2. Two");
        assert!(html.contains("<ul>"));
        assert!(html.contains("<strong>Bold</strong>"));
        assert!(html.contains("<em>Italics</em>"));
        assert!(html.contains("<ol>"));
    }

    #[test]
    fn renders_tables_and_strikethrough() {
        let html = render_markdown("| a | b |\n|---|---|\n| 1 | 2 |\n\n~~gone~~");
        assert!(html.contains("<table>"));
        assert!(html.contains("<del>gone</del>"));
    }

    #[test]
    fn links_keep_text_only() {
        let html = render_markdown("But [links](http://some.bad.site/) are disabled");
        assert!(html.contains("links"));
        assert!(!html.contains("<a"));
        assert!(!html.contains("some.bad.site"));
    }

    #[test]
    fn images_are_dropped() {
        let html = render_markdown("before ![alt text](http://x/y.png) after");
        assert!(!html.contains("<img"));
        assert!(!html.contains("alt text"));
        assert!(html.contains("before"));
        assert!(html.contains("after"));
    }

    #[test]
    fn raw_html_is_discarded() {
        let html = render_markdown("<script>alert(1)</script>\n\nhello <b>there</b>");
        assert!(!html.contains("<script>"));
        assert!(!html.contains("<b>"));
        assert!(html.contains("hello"));
    }

    #[test]
    fn inline_code_is_escaped() {
        let html = render_markdown("Does `Markdown` work?");
        assert_eq!(html.trim(), "<p>Does <code>Markdown</code> work?</p>");
    }
}
