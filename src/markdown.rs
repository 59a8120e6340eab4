//! Description Rendering
//!
//! Project and task descriptions are markdown written by users, so the
//! pulldown-cmark event stream is filtered before it reaches `push_html`:
//! - raw HTML is shown as text, never injected
//! - links and images with a non-http(s) scheme lose their target
//! - images render with a bounded size

use pulldown_cmark::{html::push_html, CowStr, Event, Options, Parser, Tag, TagEnd};

fn options() -> Options {
    Options::ENABLE_STRIKETHROUGH | Options::ENABLE_TABLES | Options::ENABLE_TASKLISTS
}

/// Relative links and http(s)/mailto are fine; anything else with a scheme is not
fn is_safe_url(url: &str) -> bool {
    let lower = url.trim().to_ascii_lowercase();
    match lower.split_once(':') {
        Some((scheme, _)) if !scheme.contains('/') => {
            matches!(scheme, "http" | "https" | "mailto")
        }
        _ => true,
    }
}

enum State {
    Normal,
    /// Inside an image's alt text, which is folded into the `<img>` tag
    InImage { src: String, alt: String, depth: usize },
    /// Inside a link whose target was dropped
    InUnsafeLink { depth: usize },
}

fn transform_events<'a>(parser: Parser<'a>) -> Vec<Event<'a>> {
    let mut events = Vec::new();
    let mut state = State::Normal;

    for event in parser {
        match state {
            State::Normal => match event {
                Event::Html(raw) | Event::InlineHtml(raw) => events.push(Event::Text(raw)),
                Event::Start(Tag::Image { dest_url, .. }) => {
                    state = State::InImage {
                        src: dest_url.to_string(),
                        alt: String::new(),
                        depth: 0,
                    };
                }
                Event::Start(Tag::Link { dest_url, .. }) if !is_safe_url(&dest_url) => {
                    log::debug!("[markdown] dropping link target {}", dest_url);
                    state = State::InUnsafeLink { depth: 0 };
                }
                other => events.push(other),
            },

            State::InImage { ref src, ref mut alt, ref mut depth } => match event {
                Event::Text(text) | Event::Code(text) => alt.push_str(&text),
                Event::Start(_) => *depth += 1,
                Event::End(TagEnd::Image) if *depth == 0 => {
                    if is_safe_url(src) {
                        events.push(Event::Html(CowStr::from(format!(
                            r#"<img class="description-image" src="{}" alt="{}" />"#,
                            escape_html(src),
                            escape_html(alt)
                        ))));
                    } else {
                        events.push(Event::Text(CowStr::from(alt.clone())));
                    }
                    state = State::Normal;
                }
                Event::End(_) => *depth = depth.saturating_sub(1),
                _ => {}
            },

            State::InUnsafeLink { ref mut depth } => match event {
                Event::Start(Tag::Link { .. }) => *depth += 1,
                Event::End(TagEnd::Link) if *depth == 0 => state = State::Normal,
                Event::End(TagEnd::Link) => *depth -= 1,
                Event::Html(raw) | Event::InlineHtml(raw) => events.push(Event::Text(raw)),
                other => events.push(other),
            },
        }
    }

    events
}

/// Render a description to HTML safe for `inner_html`
pub fn render_description(text: &str) -> String {
    let parser = Parser::new_ext(text, options());
    let events = transform_events(parser);
    let mut html = String::new();
    push_html(&mut html, events.into_iter());
    html
}

/// Plain-text preview of a description, cut at `max_chars` with an ellipsis
pub fn plain_excerpt(text: &str, max_chars: usize) -> String {
    let mut plain = String::new();
    for event in Parser::new_ext(text, options()) {
        match event {
            Event::Text(t) | Event::Code(t) => plain.push_str(&t),
            Event::SoftBreak
            | Event::HardBreak
            | Event::End(TagEnd::Paragraph | TagEnd::Heading(_) | TagEnd::Item) => plain.push(' '),
            _ => {}
        }
    }
    let plain = plain.split_whitespace().collect::<Vec<_>>().join(" ");
    if plain.chars().count() <= max_chars {
        return plain;
    }
    let cut: String = plain.chars().take(max_chars).collect();
    format!("{}…", cut.trim_end())
}

fn escape_html(text: &str) -> String {
    text.replace('&', "&amp;")
        .replace('<', "&lt;")
        .replace('>', "&gt;")
        .replace('"', "&quot;")
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_basic_markdown() {
        let html = render_description("**Launch** the _beta_\n\n- [x] docs");
        assert!(html.contains("<strong>Launch</strong>"));
        assert!(html.contains("<em>beta</em>"));
        assert!(html.contains("checkbox"));
    }

    #[test]
    fn test_raw_html_is_escaped() {
        let html = render_description("hello <script>alert(1)</script>");
        assert!(!html.contains("<script>"));
        assert!(html.contains("&lt;script&gt;"));
    }

    #[test]
    fn test_unsafe_link_keeps_text_only() {
        let html = render_description("[click me](javascript:alert(1)) and [docs](https://example.com)");
        assert!(!html.contains("javascript:"));
        assert!(html.contains("click me"));
        assert!(html.contains(r#"<a href="https://example.com">docs</a>"#));
    }

    #[test]
    fn test_images_are_bounded_and_checked() {
        let html = render_description("![chart](https://example.com/a.png)");
        assert!(html.contains(r#"class="description-image""#));
        assert!(html.contains(r#"alt="chart""#));
        let html = render_description("![x](data:text/html;base64,AAAA)");
        assert!(!html.contains("<img"));
    }

    #[test]
    fn test_plain_excerpt() {
        assert_eq!(plain_excerpt("# Title\n\nSome **bold** text", 100), "Title Some bold text");
        assert_eq!(plain_excerpt("abcdefgh", 4), "abcd…");
        assert_eq!(plain_excerpt("", 4), "");
    }
}
