//! Just enough markdown for email previews: `#` to `###` headers, bold,
//! italic, links, `-`/`*` bullet lists and blank-line paragraphs. Nested
//! lists, code blocks, tables and the rest render as plain paragraphs.

use html_escape::{encode_double_quoted_attribute, encode_text};
use lazy_static::lazy_static;
use regex::Regex;

lazy_static! {
    static ref BOLD: Regex = Regex::new(r"\*\*([^*]+?)\*\*").unwrap();
    static ref ITALIC: Regex = Regex::new(r"\*([^*\s][^*]*?)\*").unwrap();
    static ref LINK: Regex = Regex::new(r"\[([^\]]+)\]\(((?:https?://|mailto:|/)[^)\s]*)\)").unwrap();
}

/// Bold and italic on one run of plain text.
fn emphasis(text: &str) -> String {
    let text = encode_text(text);
    let text = BOLD.replace_all(&text, "<strong>$1</strong>");
    ITALIC.replace_all(&text, "<em>$1</em>").into_owned()
}

/// Links first, then emphasis on the text between and inside them, so
/// markup never lands inside an attribute.
fn inline(text: &str) -> String {
    let mut out = String::with_capacity(text.len());
    let mut last = 0;
    for caps in LINK.captures_iter(text) {
        let (Some(whole), Some(label), Some(href)) = (caps.get(0), caps.get(1), caps.get(2)) else {
            continue;
        };
        out.push_str(&emphasis(&text[last..whole.start()]));
        out.push_str(&format!(
            r#"<a href="{}">{}</a>"#,
            encode_double_quoted_attribute(href.as_str()),
            emphasis(label.as_str())
        ));
        last = whole.end();
    }
    out.push_str(&emphasis(&text[last..]));
    out
}

fn header(line: &str) -> Option<(usize, &str)> {
    let level = line.chars().take_while(|c| *c == '#').count();
    if !(1..=3).contains(&level) {
        return None;
    }
    line[level..]
        .strip_prefix(' ')
        .map(|rest| (level, rest.trim()))
}

fn list_item(line: &str) -> Option<&str> {
    line.strip_prefix("- ")
        .or_else(|| line.strip_prefix("* "))
        .map(str::trim)
}

fn flush_paragraph(paragraph: &mut Vec<String>, html: &mut Vec<String>) {
    if !paragraph.is_empty() {
        html.push(format!("<p>{}</p>", inline(&paragraph.join(" "))));
        paragraph.clear();
    }
}

fn flush_list(items: &mut Vec<String>, html: &mut Vec<String>) {
    if !items.is_empty() {
        let lis: String = items
            .iter()
            .map(|item| format!("<li>{}</li>", inline(item)))
            .collect();
        html.push(format!("<ul>{}</ul>", lis));
        items.clear();
    }
}

pub fn to_html(markdown: &str) -> String {
    let mut html = Vec::new();
    let mut paragraph = Vec::new();
    let mut items = Vec::new();

    for line in markdown.lines().map(str::trim) {
        if line.is_empty() {
            flush_paragraph(&mut paragraph, &mut html);
            flush_list(&mut items, &mut html);
        } else if let Some((level, text)) = header(line) {
            flush_paragraph(&mut paragraph, &mut html);
            flush_list(&mut items, &mut html);
            html.push(format!("<h{0}>{1}</h{0}>", level, inline(text)));
        } else if let Some(item) = list_item(line) {
            flush_paragraph(&mut paragraph, &mut html);
            items.push(item.to_string());
        } else {
            flush_list(&mut items, &mut html);
            paragraph.push(line.to_string());
        }
    }
    flush_paragraph(&mut paragraph, &mut html);
    flush_list(&mut items, &mut html);

    html.join("\n")
}
