//! Highlighter: HTML-escaped text with the first query occurrence marked.
//!
//! Escaping runs before any markup is inserted, so document content can
//! never smuggle tags into the rendered list. The marker wraps the
//! already-escaped matched slice; nothing is escaped twice.

use crate::search::normalize;

const MARK_OPEN: &str = "<mark>";
const MARK_CLOSE: &str = "</mark>";

/// Escape `& < > "`, the minimum set that neutralizes element and
/// attribute injection.
pub fn escape_html(text: &str) -> String {
    let mut out = String::with_capacity(text.len());
    for ch in text.chars() {
        match ch {
            '&' => out.push_str("&amp;"),
            '<' => out.push_str("&lt;"),
            '>' => out.push_str("&gt;"),
            '"' => out.push_str("&quot;"),
            _ => out.push(ch),
        }
    }
    out
}

/// Escaped `text` with the first case-insensitive occurrence of `query`
/// wrapped in `<mark>`. The matched slice keeps its original casing and its
/// length equals the normalized query's length. Empty or absent query →
/// fully escaped text, unmarked.
pub fn highlight(text: &str, query: &str) -> String {
    let needle = normalize(query);
    if needle.is_empty() {
        return escape_html(text);
    }
    let folded = text.to_lowercase();
    let Some(start) = folded.find(&needle) else {
        return escape_html(text);
    };
    let end = start + needle.len();
    // Case folding can shift byte offsets (e.g. İ → i̇). If the folded
    // position no longer lands on boundaries of the original text, marking
    // would slice mid-char; return the text unmarked instead.
    if end > text.len() || !text.is_char_boundary(start) || !text.is_char_boundary(end) {
        return escape_html(text);
    }
    let mut out = String::with_capacity(text.len() + MARK_OPEN.len() + MARK_CLOSE.len());
    out.push_str(&escape_html(&text[..start]));
    out.push_str(MARK_OPEN);
    out.push_str(&escape_html(&text[start..end]));
    out.push_str(MARK_CLOSE);
    out.push_str(&escape_html(&text[end..]));
    out
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_escape_minimum_set() {
        assert_eq!(
            escape_html(r#"<a href="x">&y</a>"#),
            "&lt;a href=&quot;x&quot;&gt;&amp;y&lt;/a&gt;"
        );
    }

    #[test]
    fn test_empty_query_returns_escaped_text() {
        assert_eq!(highlight("a < b", ""), "a &lt; b");
    }

    #[test]
    fn test_no_occurrence_returns_escaped_text() {
        assert_eq!(highlight("hello world", "xyz"), "hello world");
    }

    #[test]
    fn test_marks_first_occurrence_only() {
        assert_eq!(
            highlight("rust and rust again", "rust"),
            "<mark>rust</mark> and rust again"
        );
    }

    #[test]
    fn test_match_preserves_original_casing() {
        assert_eq!(highlight("Intro to Rust", "rUSt"), "Intro to <mark>Rust</mark>");
    }

    #[test]
    fn test_escaping_composes_with_marking() {
        // The marker wraps already-escaped matched text, not raw text.
        assert_eq!(
            highlight("<script>", "script"),
            "&lt;<mark>script</mark>&gt;"
        );
    }

    #[test]
    fn test_match_inside_escaped_content() {
        assert_eq!(
            highlight(r#"say "rust" loudly"#, "rust"),
            "say &quot;<mark>rust</mark>&quot; loudly"
        );
    }

    #[test]
    fn test_span_length_equals_query_length() {
        let marked = highlight("unrustworthy", "rust");
        assert_eq!(marked, "un<mark>rust</mark>worthy");
    }

    #[test]
    fn test_multibyte_text_before_match() {
        assert_eq!(highlight("café — rust", "rust"), "café — <mark>rust</mark>");
    }

    #[test]
    fn test_query_with_markup_chars_is_escaped_in_output() {
        assert_eq!(highlight(r#"a "b" c"#, r#""b""#), "a <mark>&quot;b&quot;</mark> c");
    }

    #[test]
    fn test_boundary_shift_falls_back_unmarked() {
        // 'İ' lower-cases to two chars, shifting folded offsets past the
        // original text's length.
        let text = "İİİİ";
        let out = highlight(text, "i̇i̇i̇i̇");
        assert_eq!(out, escape_html(text));
    }
}
