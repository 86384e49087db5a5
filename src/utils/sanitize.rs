//! Utilities for shortening record text before it is placed in a reason.
//!
//! DKIM public keys run to hundreds of characters; reasons quote only the
//! start of the offending record.

/// Truncates `text` to at most `max_chars` characters.
///
/// Truncation happens on a character boundary and appends `...` when any
/// text was removed. Control characters are replaced by spaces so the
/// excerpt stays on one line.
///
/// # Arguments
///
/// * `text` - The record text to shorten
/// * `max_chars` - Maximum number of characters kept before the ellipsis
pub fn truncate_excerpt(text: &str, max_chars: usize) -> String {
    let mut chars = text.chars();
    let mut excerpt: String = chars
        .by_ref()
        .take(max_chars)
        .map(|c| if c.is_control() { ' ' } else { c })
        .collect();
    if chars.next().is_some() {
        excerpt.push_str("...");
    }
    excerpt
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_truncate_excerpt_short_text_unchanged() {
        assert_eq!(truncate_excerpt("v=DKIM1; p=", 50), "v=DKIM1; p=");
    }

    #[test]
    fn test_truncate_excerpt_exact_length_has_no_ellipsis() {
        let text = "a".repeat(50);
        assert_eq!(truncate_excerpt(&text, 50), text);
    }

    #[test]
    fn test_truncate_excerpt_long_text() {
        let text = format!("v=DKIM1; k=rsa; p={}", "A".repeat(100));
        let excerpt = truncate_excerpt(&text, 50);
        assert_eq!(excerpt.chars().count(), 53);
        assert!(excerpt.ends_with("..."));
        assert!(excerpt.starts_with("v=DKIM1; k=rsa; p=AAAA"));
    }

    #[test]
    fn test_truncate_excerpt_respects_char_boundaries() {
        let text = "测试".repeat(30);
        let excerpt = truncate_excerpt(&text, 5);
        assert_eq!(excerpt, "测试测试测...");
    }

    #[test]
    fn test_truncate_excerpt_replaces_control_chars() {
        assert_eq!(truncate_excerpt("a\nb\tc", 10), "a b c");
    }
}
