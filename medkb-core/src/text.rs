//! Text shaping for knowledge example reports

/// Marker appended to text cut at its character budget
pub const ELLIPSIS: &str = "...";

/// Cut `text` to at most `budget` characters, appending [`ELLIPSIS`]
/// when anything was removed. Counts chars, not bytes.
pub fn truncate(text: &str, budget: usize) -> String {
    let text = text.trim();
    match text.char_indices().nth(budget) {
        Some((cut, _)) => format!("{}{}", text[..cut].trim_end(), ELLIPSIS),
        None => text.to_string(),
    }
}

/// Join non-empty items with `", "`
pub fn join(items: &[String]) -> String {
    items
        .iter()
        .map(|s| s.trim())
        .filter(|s| !s.is_empty())
        .collect::<Vec<_>>()
        .join(", ")
}

/// Join the first `limit` items, marking with [`ELLIPSIS`] when more exist
pub fn join_limited(items: &[String], limit: usize) -> String {
    let shown = join(&items[..items.len().min(limit)]);
    if items.len() > limit {
        format!("{shown}{ELLIPSIS}")
    } else {
        shown
    }
}
