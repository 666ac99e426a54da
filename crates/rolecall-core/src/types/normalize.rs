//! Surface-form normalization shared by the validator, canonicalizer and store.

/// Case/whitespace/punctuation-folded form of a role mention.
///
/// Lowercases, maps `&` to `and`, turns punctuation into spaces (hyphens and
/// slashes included), strips possessive `'s`, and collapses whitespace.
pub fn normalize_role_text(text: &str) -> String {
    let mut out = String::with_capacity(text.len());
    let mut chars = text.chars().peekable();
    while let Some(c) = chars.next() {
        if c == '\'' || c == '\u{2019}' {
            // Possessive 's at a word end is dropped entirely.
            if matches!(chars.peek(), Some('s') | Some('S')) {
                let mut lookahead = chars.clone();
                lookahead.next();
                if lookahead.peek().map_or(true, |n| !n.is_alphanumeric()) {
                    chars.next();
                }
            }
            continue;
        }
        if c == '&' {
            out.push_str(" and ");
        } else if c.is_alphanumeric() {
            out.extend(c.to_lowercase());
        } else {
            out.push(' ');
        }
    }
    out.split_whitespace().collect::<Vec<_>>().join(" ")
}

/// Whether `text` is an all-caps acronym of `min..=max` ASCII letters.
pub fn is_acronym(text: &str, min: usize, max: usize) -> bool {
    let len = text.chars().count();
    (min..=max).contains(&len) && text.chars().all(|c| c.is_ascii_uppercase())
}
