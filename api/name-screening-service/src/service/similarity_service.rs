use super::name_normalization_service::reordered_canonical;

/// Levenshtein distance counted in Unicode scalar values.
pub fn edit_distance(a: &str, b: &str) -> usize {
    strsim::levenshtein(a, b)
}

/// Normalized edit similarity in `[0, 1]`.
///
/// Identical strings (including two empty strings) score 1, a comparison
/// against an empty string scores 0.
pub fn similarity(a: &str, b: &str) -> f64 {
    if a == b {
        return 1.0;
    }
    if a.is_empty() || b.is_empty() {
        return 0.0;
    }
    let max_len = a.chars().count().max(b.chars().count());
    1.0 - edit_distance(a, b) as f64 / max_len as f64
}

/// Token-order-insensitive similarity between two raw names.
pub fn name_similarity(name1: &str, name2: &str) -> f64 {
    similarity(&reordered_canonical(name1), &reordered_canonical(name2))
}
