//! Sentence-aligned text chunking.

/// Maximum chunk length in bytes, matching the synthesis API's input bound.
///
/// This is a soft target over sentence boundaries: a single sentence longer
/// than the bound is emitted whole rather than sliced mid-sentence.
pub const MAX_CHUNK_LENGTH: usize = 2500;

/// Split text into sentence-aligned chunks no longer than
/// [`MAX_CHUNK_LENGTH`] wherever sentence boundaries allow.
///
/// Sentences end at terminal punctuation (`.`, `!`, `?`), with the
/// delimiter retained on the preceding sentence. Text without terminal
/// punctuation is one sentence. Sentences accumulate greedily into the
/// current chunk; when appending the next sentence would exceed the bound,
/// the current chunk is closed (trimmed) and a new one starts. Chunk order
/// follows text order, and concatenating the chunks reproduces the original
/// sentence sequence.
///
/// Empty input yields a single empty chunk, mirroring the one degenerate
/// synthesis call the original behavior performs; callers that care should
/// validate emptiness themselves.
///
/// # Examples
///
/// ```
/// use oratorio_speech::chunk_text;
///
/// let chunks = chunk_text("One sentence. Another one!");
/// assert_eq!(chunks, vec!["One sentence. Another one!"]);
/// ```
pub fn chunk_text(text: &str) -> Vec<String> {
    if text.is_empty() {
        return vec![String::new()];
    }

    let mut chunks = Vec::new();
    let mut current = String::new();

    for sentence in text.split_inclusive(['.', '!', '?']) {
        if !current.is_empty() && current.len() + sentence.len() > MAX_CHUNK_LENGTH {
            let closed = current.trim();
            if !closed.is_empty() {
                chunks.push(closed.to_string());
            }
            current.clear();
        }
        current.push_str(sentence);
    }

    let closed = current.trim();
    if !closed.is_empty() {
        chunks.push(closed.to_string());
    }

    if chunks.is_empty() {
        // Whitespace-only input trims away entirely; keep the single-chunk
        // contract rather than returning nothing.
        chunks.push(String::new());
    }

    chunks
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn short_text_is_one_chunk() {
        let text = "  A single short sentence. ";
        assert_eq!(chunk_text(text), vec![text.trim()]);
    }

    #[test]
    fn no_punctuation_is_one_unit() {
        let text = "a".repeat(MAX_CHUNK_LENGTH + 100);
        let chunks = chunk_text(&text);
        assert_eq!(chunks.len(), 1);
        assert_eq!(chunks[0].len(), MAX_CHUNK_LENGTH + 100);
    }

    #[test]
    fn sentences_near_the_bound_get_their_own_chunks() {
        let sentence = format!("{}.", "b".repeat(MAX_CHUNK_LENGTH - 100));
        let text = format!("{s} {s} {s}", s = sentence);
        let chunks = chunk_text(&text);
        assert_eq!(chunks.len(), 3);
        for chunk in &chunks {
            assert_eq!(chunk.trim(), sentence);
        }
    }

    #[test]
    fn sentence_sequence_survives_chunking() {
        let sentences: Vec<String> = (0..200)
            .map(|i| format!("Sentence number {} has some padding text in it.", i))
            .collect();
        let text = sentences.join(" ");

        let chunks = chunk_text(&text);
        assert!(chunks.len() > 1);
        for chunk in &chunks {
            assert!(chunk.len() <= MAX_CHUNK_LENGTH);
        }

        let rejoined = chunks.join(" ");
        let normalize = |s: &str| s.split_whitespace().collect::<Vec<_>>().join(" ");
        assert_eq!(normalize(&rejoined), normalize(&text));
    }

    #[test]
    fn empty_input_yields_one_empty_chunk() {
        assert_eq!(chunk_text(""), vec![String::new()]);
    }

    #[test]
    fn delimiter_stays_on_preceding_sentence() {
        let chunks = chunk_text("Really? Yes! Good.");
        assert_eq!(chunks, vec!["Really? Yes! Good."]);
    }
}
