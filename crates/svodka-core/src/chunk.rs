//! Fixed-width transcript chunker.
//!
//! Splits a transcript into consecutive slices of at most `max_chars`
//! chars each. Splitting is deliberately boundary-blind: a chunk edge may
//! fall mid-sentence or mid-word. Slices always land on char boundaries,
//! so multi-byte text never produces an invalid chunk.

/// Split `transcript` into ordered, non-overlapping chunks of at most
/// `max_chars` chars. The chunks concatenate back to the input exactly;
/// the chunk count is `ceil(chars / max_chars)`.
///
/// A transcript of `max_chars` chars or fewer comes back as a single
/// chunk; callers treat that case as "no chunking needed" and skip the
/// per-chunk summarize stage. `max_chars` must be positive (enforced at
/// config load).
pub fn plan(transcript: &str, max_chars: usize) -> Vec<String> {
    if !needs_chunking(transcript, max_chars) {
        return vec![transcript.to_string()];
    }

    let mut chunks = Vec::new();
    let mut current = String::new();
    let mut count = 0;
    for c in transcript.chars() {
        current.push(c);
        count += 1;
        if count == max_chars {
            chunks.push(std::mem::take(&mut current));
            count = 0;
        }
    }
    if !current.is_empty() {
        chunks.push(current);
    }
    chunks
}

/// True when the transcript is too long for a single generation call.
pub fn needs_chunking(transcript: &str, max_chars: usize) -> bool {
    transcript.chars().count() > max_chars
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn short_transcript_is_a_single_chunk() {
        assert_eq!(plan("abc", 10), vec!["abc"]);
        assert!(!needs_chunking("abc", 10));
    }

    #[test]
    fn exact_fit_is_not_chunked() {
        assert_eq!(plan("abcdefghij", 10), vec!["abcdefghij"]);
        assert!(!needs_chunking("abcdefghij", 10));
    }

    #[test]
    fn long_transcript_splits_at_fixed_offsets() {
        let chunks = plan("abcdefghijklmno", 10);
        assert_eq!(chunks, vec!["abcdefghij", "klmno"]);
    }

    #[test]
    fn chunk_count_is_ceiling_of_length_over_max() {
        let transcript = "x".repeat(95);
        let chunks = plan(&transcript, 10);
        assert_eq!(chunks.len(), 10);
        assert_eq!(chunks.last().unwrap().len(), 5);
    }

    #[test]
    fn concatenation_reconstructs_the_transcript() {
        let transcript = "the quick brown fox jumps over the lazy dog".repeat(7);
        let chunks = plan(&transcript, 13);
        assert_eq!(chunks.concat(), transcript);
        for chunk in &chunks[..chunks.len() - 1] {
            assert_eq!(chunk.chars().count(), 13);
        }
    }

    #[test]
    fn multibyte_text_splits_on_char_boundaries() {
        let transcript = "добрый день всем слушателям";
        let chunks = plan(transcript, 5);
        assert_eq!(chunks.concat(), transcript);
        assert!(chunks.iter().all(|c| c.chars().count() <= 5));
    }
}
