//! Text cleansing applied before vectorization
//!
//! Strips markup artifacts, URLs, and characters that carry no lexical
//! signal, and collapses runs of spaces. Applied to a working copy of the
//! text only; the record itself keeps its raw form so output can show the
//! original post.

use regex::Regex;
use std::sync::OnceLock;

fn noise_re() -> &'static Regex {
    static RE: OnceLock<Regex> = OnceLock::new();
    // Drops '&amp;', any character outside the kept alphabet
    // (alphanumerics, quotes, '.', ',', '@', '#', space), and URLs.
    RE.get_or_init(|| Regex::new(r#"(&amp;)|([^0-9A-Za-z'".,@# ])|(\w+://\S+)"#).unwrap())
}

fn spaces_re() -> &'static Regex {
    static RE: OnceLock<Regex> = OnceLock::new();
    RE.get_or_init(|| Regex::new(r"  +").unwrap())
}

fn url_re() -> &'static Regex {
    static RE: OnceLock<Regex> = OnceLock::new();
    RE.get_or_init(|| Regex::new(r"http\S+").unwrap())
}

/// Cleanse one text for vectorization.
pub fn cleanse(text: &str) -> String {
    let stripped = noise_re().replace_all(text, " ");
    let collapsed = spaces_re().replace_all(&stripped, " ");
    collapsed.trim().to_string()
}

/// Prepare raw text for display in output: URLs become a `[link]` marker
/// and escaped ampersands are restored.
pub fn display_text(text: &str) -> String {
    let linked = url_re().replace_all(text, "[link]");
    linked.replace("&amp;", "&")
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn strips_urls_and_markup() {
        let raw = "Check this out! https://example.com/x?y=1 &amp; more";
        let clean = cleanse(raw);
        assert!(!clean.contains("http"));
        assert!(!clean.contains("&amp;"));
        assert!(!clean.contains('!'));
        assert!(clean.starts_with("Check this out"));
    }

    #[test]
    fn keeps_tags_and_apostrophes() {
        let clean = cleanse("@alice don't miss #rust");
        assert_eq!(clean, "@alice don't miss #rust");
    }

    #[test]
    fn collapses_spaces() {
        assert_eq!(cleanse("a    (b)   c"), "a b c");
    }

    #[test]
    fn display_text_marks_links() {
        let raw = "look https://t.co/abc &amp; enjoy";
        assert_eq!(display_text(raw), "look [link] & enjoy");
    }
}
