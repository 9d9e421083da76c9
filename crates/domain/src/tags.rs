//! Tag name normalization.

/// Normalizes a tag name before any store lookup or insert.
///
/// Trimmed and lowercased, so `"go"`, `"GO"` and `"go "` all resolve to
/// the same tag row. Returns `None` when nothing remains after trimming.
pub fn normalize_tag(raw: &str) -> Option<String> {
    let normalized = raw.trim().to_lowercase();
    if normalized.is_empty() {
        None
    } else {
        Some(normalized)
    }
}
