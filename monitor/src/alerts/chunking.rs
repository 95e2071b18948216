//! Size-limited splitting of report text
//!
//! Budgets count characters, not bytes: the chat transport limits display
//! characters and reports are full of multi-byte emoji.

/// Split `text` into chunks of at most `budget` characters.
///
/// Each cut lands just after the last line break inside the budget window,
/// or exactly at the budget when the window has no line break. Line breaks
/// stay with the chunk they terminate, so concatenating the chunks gives
/// back `text` unchanged.
pub fn split_message(text: &str, budget: usize) -> Vec<String> {
    let budget = budget.max(1);
    let mut chunks = Vec::new();
    let mut rest = text;

    loop {
        // Byte offset of the first character past the budget, if any
        let Some((cut, _)) = rest.char_indices().nth(budget) else {
            chunks.push(rest.to_string());
            break;
        };

        let split = match rest[..cut].rfind('\n') {
            Some(newline) => newline + 1,
            None => cut,
        };

        chunks.push(rest[..split].to_string());
        rest = &rest[split..];
    }

    chunks
}

/// Keep `text` whole when it fits `limit`, otherwise pre-split it at `budget`
pub fn chunk_for_transport(text: &str, limit: usize, budget: usize) -> Vec<String> {
    if text.chars().count() <= limit {
        vec![text.to_string()]
    } else {
        split_message(text, budget.min(limit))
    }
}
