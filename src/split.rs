// Splits a long message into post-sized fragments. Lengths are counted in
// Unicode scalar values, so multi-byte text is never cut mid-character.

/// Split `message` into fragments of at most `limit` characters.
///
/// Cuts at the last whitespace at or before `limit`, or exactly at `limit`
/// when the window has none. Leading whitespace is stripped from what
/// remains after each cut.
pub fn split_message(message: &str, limit: usize) -> Vec<String> {
    // A zero limit could never make progress.
    let limit = limit.max(1);

    let mut parts = Vec::new();
    let mut rest = message;
    while rest.chars().count() > limit {
        let (head, tail) = rest.split_at(cut_point(rest, limit));
        parts.push(head.to_string());
        rest = tail.trim_start();
    }
    if !rest.is_empty() || parts.is_empty() {
        parts.push(rest.to_string());
    }
    parts
}

/// Byte offset to cut at. `text` must be longer than `limit` characters.
fn cut_point(text: &str, limit: usize) -> usize {
    let window: Vec<(usize, char)> = text.char_indices().take(limit + 1).collect();
    window
        .iter()
        .skip(1)
        .rev()
        .find(|(_, c)| c.is_whitespace())
        .map(|(i, _)| *i)
        .unwrap_or_else(|| window.get(limit).map_or(text.len(), |(i, _)| *i))
}
