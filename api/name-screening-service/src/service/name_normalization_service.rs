/// Lowercases a name, replaces every character that is not a Unicode letter,
/// number or whitespace with a space, then collapses and trims whitespace.
pub fn canonicalize(raw: &str) -> String {
    raw.to_lowercase()
        .chars()
        .map(|c| {
            if c.is_alphabetic() || c.is_numeric() || c.is_whitespace() {
                c
            } else {
                ' '
            }
        })
        .collect::<String>()
        .split_whitespace()
        .collect::<Vec<_>>()
        .join(" ")
}

/// Canonical form with its tokens sorted, so "Smith Alex" and "Alex Smith"
/// reduce to the same string.
pub fn reordered_canonical(raw: &str) -> String {
    let canonical = canonicalize(raw);
    let mut tokens = canonical.split_whitespace().collect::<Vec<_>>();
    tokens.sort_unstable();
    tokens.join(" ")
}
