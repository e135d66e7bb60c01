/// Truncate to at most `max_chars` characters, marking the cut with `...`.
pub fn truncate_text(s: &str, max_chars: usize) -> String {
    if s.chars().count() <= max_chars {
        return s.to_string();
    }
    let keep = max_chars.saturating_sub(3);
    let mut out = s.chars().take(keep).collect::<String>();
    out.push_str("...");
    out
}

/// Split text into chunks of at most `limit` characters.
///
/// Prefers breaking after a newline when one falls inside the window.
pub fn split_text_chunks(text: &str, limit: usize) -> Vec<String> {
    let limit = limit.max(1);
    if text.chars().count() <= limit {
        return vec![text.to_string()];
    }

    let mut out = Vec::new();
    let mut rest = text;
    while !rest.is_empty() {
        let cut = byte_index_after_chars(rest, limit);
        if cut == rest.len() {
            out.push(rest.to_string());
            break;
        }
        let window = &rest[..cut];
        let split_at = match window.rfind('\n') {
            Some(nl) if nl > 0 => nl + 1,
            _ => cut,
        };
        out.push(rest[..split_at].to_string());
        rest = &rest[split_at..];
    }
    out
}

fn byte_index_after_chars(s: &str, n: usize) -> usize {
    s.char_indices().nth(n).map(|(i, _)| i).unwrap_or(s.len())
}
