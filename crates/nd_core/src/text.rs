use unicode_normalization::UnicodeNormalization;

/// Average adult reading speed used for the reading-time estimate.
pub const WORDS_PER_MINUTE: usize = 200;

const STRIPPED: &[char] = &[
    '*', '+', '~', '.', '(', ')', '\'', '"', '!', ':', '@', ',', '?', ';', '[', ']', '{', '}',
    '<', '>', '/', '\\', '|', '#', '$', '%', '^', '&', '=',
];

/// Turns a title into a URL-safe slug made only of `[a-z0-9-]`.
///
/// Accented letters are decomposed and reduced to their ASCII base, anything
/// else outside ASCII is dropped. Punctuation is removed outright, so
/// "Don't" becomes "dont" rather than "don-t". Runs of whitespace, dashes and
/// underscores collapse into a single dash.
pub fn slugify(title: &str) -> String {
    let mut slug = String::with_capacity(title.len());
    let mut pending_dash = false;

    for c in title.nfkd() {
        if !c.is_ascii() || STRIPPED.contains(&c) {
            continue;
        }
        if c.is_ascii_alphanumeric() {
            if pending_dash && !slug.is_empty() {
                slug.push('-');
            }
            pending_dash = false;
            slug.push(c.to_ascii_lowercase());
        } else {
            pending_dash = true;
        }
    }

    slug
}

/// Estimated reading time of a markdown body, e.g. "5 min read".
pub fn reading_time(content: &str) -> String {
    let words = content.split_whitespace().count();
    let minutes = words.div_ceil(WORDS_PER_MINUTE).max(1);
    format!("{} min read", minutes)
}

/// The first `max` characters of `s`, never splitting a code point.
pub fn truncate_chars(s: &str, max: usize) -> &str {
    match s.char_indices().nth(max) {
        Some((idx, _)) => &s[..idx],
        None => s,
    }
}
