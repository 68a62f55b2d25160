//! Fixed-size character windows.

/// Default window size in characters.
pub const DEFAULT_MAX_CHUNK_SIZE: usize = 1000;

/// One summarization unit.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Chunk {
    /// 0-based index within the document.
    pub index: usize,
    /// The chunk text content.
    pub content: String,
    /// Character offset in the original text.
    pub char_offset: usize,
}

/// Split `text` into consecutive, non-overlapping windows of at most
/// `max_chunk_size` characters (Unicode scalar values).
///
/// Concatenating the chunks in order gives back `text`. Empty input yields no
/// chunks. A `max_chunk_size` of zero is treated as one.
pub fn chunk_text(text: &str, max_chunk_size: usize) -> Vec<Chunk> {
    let size = max_chunk_size.max(1);
    let mut chunks = Vec::new();
    let mut start_byte = 0;
    let mut char_offset = 0;
    let mut count = 0;

    for (byte_idx, _) in text.char_indices() {
        if count == size {
            chunks.push(Chunk {
                index: chunks.len(),
                content: text[start_byte..byte_idx].to_string(),
                char_offset,
            });
            start_byte = byte_idx;
            char_offset += count;
            count = 0;
        }
        count += 1;
    }

    if count > 0 {
        chunks.push(Chunk {
            index: chunks.len(),
            content: text[start_byte..].to_string(),
            char_offset,
        });
    }

    chunks
}

#[cfg(test)]
mod tests {
    use super::*;

    fn rejoin(chunks: &[Chunk]) -> String {
        chunks.iter().map(|c| c.content.as_str()).collect()
    }

    #[test]
    fn empty_text_has_no_chunks() {
        assert!(chunk_text("", DEFAULT_MAX_CHUNK_SIZE).is_empty());
    }

    #[test]
    fn short_text_is_one_chunk() {
        let chunks = chunk_text("hello", 1000);
        assert_eq!(chunks.len(), 1);
        assert_eq!(chunks[0].content, "hello");
        assert_eq!(chunks[0].char_offset, 0);
    }

    #[test]
    fn exact_multiple_has_no_trailing_empty_chunk() {
        let text = "a".repeat(2000);
        let chunks = chunk_text(&text, 1000);
        assert_eq!(chunks.len(), 2);
        assert!(chunks.iter().all(|c| c.content.len() == 1000));
    }

    #[test]
    fn chunk_count_is_ceiling_and_text_is_reconstructed() {
        for (len, size) in [(2400usize, 1000usize), (1, 1), (7, 3), (999, 1000), (1001, 1000), (10, 10)] {
            let text: String = (0..len).map(|i| (b'a' + (i % 26) as u8) as char).collect();
            let chunks = chunk_text(&text, size);
            assert_eq!(chunks.len(), len.div_ceil(size), "len={len} size={size}");
            assert_eq!(rejoin(&chunks), text);
        }
    }

    #[test]
    fn indices_and_offsets_are_sequential() {
        let chunks = chunk_text(&"x".repeat(25), 10);
        let meta: Vec<(usize, usize)> = chunks.iter().map(|c| (c.index, c.char_offset)).collect();
        assert_eq!(meta, vec![(0, 0), (1, 10), (2, 20)]);
        assert_eq!(chunks[2].content.len(), 5);
    }

    #[test]
    fn multibyte_characters_are_never_split() {
        let text = "héllo wörld ünïcode 🎉🎉🎉";
        let chunks = chunk_text(text, 4);
        assert_eq!(rejoin(&chunks), text);
        assert!(chunks.iter().all(|c| c.content.chars().count() <= 4));
        assert_eq!(chunks.len(), text.chars().count().div_ceil(4));
    }

    #[test]
    fn zero_size_behaves_like_one() {
        let chunks = chunk_text("abc", 0);
        assert_eq!(chunks.len(), 3);
    }
}
