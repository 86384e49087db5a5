//! TXT record text normalization.
//!
//! DoH JSON answers carry TXT data in presentation format: one or more
//! quoted character-strings (`"v=spf1 include:a" " -all"`). These helpers turn
//! that into the logical record text the checks operate on.

/// Returns the logical text of a TXT answer.
///
/// Quoted character-strings are concatenated without separators (RFC 7208
/// §3.3), `\"`, `\\` and `\DDD` escapes inside quotes are resolved, and
/// whitespace between strings is dropped. Unquoted data is returned trimmed.
pub fn unquote_txt(data: &str) -> String {
    let trimmed = data.trim();
    if !trimmed.starts_with('"') {
        return trimmed.to_string();
    }

    // Bytes, not chars: consecutive \DDD escapes may encode one UTF-8 sequence
    let mut out: Vec<u8> = Vec::with_capacity(trimmed.len());
    let mut chars = trimmed.chars().peekable();
    let mut in_quotes = false;
    let mut utf8 = [0u8; 4];

    while let Some(c) = chars.next() {
        match c {
            '"' => in_quotes = !in_quotes,
            '\\' if in_quotes => {
                if chars.peek().is_some_and(|n| n.is_ascii_digit()) {
                    let digits: String = (0..3).filter_map(|_| chars.next()).collect();
                    match digits.parse::<u8>() {
                        Ok(byte) => out.push(byte),
                        Err(_) => {
                            out.push(b'\\');
                            out.extend_from_slice(digits.as_bytes());
                        }
                    }
                } else if let Some(escaped) = chars.next() {
                    out.extend_from_slice(escaped.encode_utf8(&mut utf8).as_bytes());
                }
            }
            c if in_quotes => out.extend_from_slice(c.encode_utf8(&mut utf8).as_bytes()),
            c if c.is_whitespace() => {}
            c => out.extend_from_slice(c.encode_utf8(&mut utf8).as_bytes()),
        }
    }

    String::from_utf8_lossy(&out).trim().to_string()
}

/// ASCII case-insensitive prefix test.
pub fn starts_with_ignore_case(text: &str, prefix: &str) -> bool {
    text.len() >= prefix.len()
        && text.as_bytes()[..prefix.len()].eq_ignore_ascii_case(prefix.as_bytes())
}

/// ASCII case-insensitive substring test.
pub fn contains_ignore_case(text: &str, needle: &str) -> bool {
    text.to_ascii_lowercase()
        .contains(&needle.to_ascii_lowercase())
}
