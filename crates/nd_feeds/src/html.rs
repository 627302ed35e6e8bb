use scraper::{Html, Node};

const SKIPPED_ELEMENTS: &[&str] = &["script", "style", "noscript", "iframe"];
const BLOCK_ELEMENTS: &[&str] = &[
    "p", "br", "div", "li", "ul", "ol", "h1", "h2", "h3", "h4", "h5", "h6", "blockquote",
    "pre", "tr", "td", "th", "figure", "figcaption", "section", "article",
];

/// Strips markup from feed HTML. Link text is kept without the link, images
/// and scripts vanish, and whitespace collapses to single spaces.
pub fn html_to_text(html: &str) -> String {
    let fragment = Html::parse_fragment(html);
    let mut text = String::with_capacity(html.len());

    for node in fragment.root_element().descendants() {
        match node.value() {
            Node::Element(element) if BLOCK_ELEMENTS.contains(&element.name()) => {
                text.push(' ');
            }
            Node::Text(fragment_text) => {
                let hidden = node.ancestors().any(|ancestor| match ancestor.value() {
                    Node::Element(element) => SKIPPED_ELEMENTS.contains(&element.name()),
                    _ => false,
                });
                if !hidden {
                    text.push_str(fragment_text);
                }
            }
            _ => {}
        }
    }

    collapse_whitespace(&text)
}

pub fn collapse_whitespace(text: &str) -> String {
    text.split_whitespace().collect::<Vec<_>>().join(" ")
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_links_are_unwrapped() {
        let html = r#"<p>Read the <a href="https://example.com/advisory">full advisory</a> now.</p>"#;
        assert_eq!(html_to_text(html), "Read the full advisory now.");
    }

    #[test]
    fn test_images_and_scripts_dropped() {
        let html = r#"<p>Patch <img src="x.png" alt="chart"> today</p><script>track()</script><style>p{}</style>"#;
        assert_eq!(html_to_text(html), "Patch today");
    }

    #[test]
    fn test_block_elements_separate_words() {
        let html = "<h2>Title</h2><p>First</p><ul><li>one</li><li>two</li></ul>";
        assert_eq!(html_to_text(html), "Title First one two");
    }

    #[test]
    fn test_entities_and_whitespace() {
        let html = "AT&amp;T   customers\n\n\thit by <b>SIM</b>-swap";
        assert_eq!(html_to_text(html), "AT&T customers hit by SIM-swap");
    }

    #[test]
    fn test_plain_text_passthrough() {
        assert_eq!(html_to_text("no markup here"), "no markup here");
        assert_eq!(html_to_text(""), "");
    }
}
