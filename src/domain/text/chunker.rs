/// Default chunk budget, in characters, for one synthesis request.
pub const DEFAULT_CHUNK_SIZE: usize = 300;

/// An ordered slice of normalized text, dispatched to synthesis as one unit.
/// The index is the sole ordering key for reassembly.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct TextChunk {
    pub index: usize,
    pub content: String,
}

impl TextChunk {
    pub fn char_count(&self) -> usize {
        self.content.chars().count()
    }
}

/// Split normalized text into bounded chunks at ". " sentence boundaries.
///
/// Sentences accumulate greedily; a chunk closes when the next sentence would
/// push it past `max_chunk_size` (the sentence plus two bytes of ". "
/// separator). A single sentence longer than the budget becomes its own
/// oversized chunk: semantic integrity wins over strict size compliance.
///
/// The plan is eager, since parallel dispatch needs the full chunk count up
/// front.
/// Empty fragments are dropped, and joining the chunk contents with single
/// spaces reconstructs the input text.
pub fn split(text: &str, max_chunk_size: usize) -> Vec<TextChunk> {
    let mut chunks: Vec<TextChunk> = Vec::new();
    let mut current = String::new();

    for sentence in text.split(". ") {
        let sentence = sentence.trim();
        if sentence.is_empty() {
            continue;
        }

        // Only a non-empty chunk closes here, which is what lets an oversized
        // sentence through whole instead of being split mid-sentence.
        if !current.is_empty() && current.len() + sentence.len() + 2 > max_chunk_size {
            close_chunk(&mut chunks, &mut current);
        }

        current.push_str(sentence);
        if !current.ends_with(['.', '!', '?']) {
            // Restore the terminal period the ". " split consumed
            current.push('.');
        }
        current.push(' ');
    }

    if !current.trim().is_empty() {
        close_chunk(&mut chunks, &mut current);
    }

    chunks
}

fn close_chunk(chunks: &mut Vec<TextChunk>, current: &mut String) {
    let content = current.trim().to_string();
    if !content.is_empty() {
        chunks.push(TextChunk {
            index: chunks.len(),
            content,
        });
    }
    current.clear();
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_split_small_text_is_single_chunk() {
        let chunks = split("This is a short text.", DEFAULT_CHUNK_SIZE);
        assert_eq!(chunks.len(), 1);
        assert_eq!(chunks[0].index, 0);
        assert_eq!(chunks[0].content, "This is a short text.");
    }

    #[test]
    fn test_split_respects_max_size() {
        let text = "This is a sentence. ".repeat(50).trim_end().to_string();
        let chunks = split(&text, 100);

        assert!(chunks.len() > 1, "text should be split into multiple chunks");
        for chunk in &chunks {
            assert!(
                chunk.content.len() <= 100,
                "chunk {} has length {}",
                chunk.index,
                chunk.content.len()
            );
        }
    }

    #[test]
    fn test_split_assigns_sequential_indices() {
        let text = "One. Two. Three. Four. Five.";
        let chunks = split(text, 10);
        for (expected, chunk) in chunks.iter().enumerate() {
            assert_eq!(chunk.index, expected);
        }
    }

    #[test]
    fn test_oversized_sentence_becomes_own_chunk() {
        // Splitting mid-sentence is never acceptable, so a sentence over the
        // budget travels whole.
        let long_sentence = format!("{}.", "word ".repeat(80).trim_end());
        let text = format!("Short one. {} Short two.", long_sentence);
        let chunks = split(&text, 100);

        assert_eq!(chunks.len(), 3);
        assert_eq!(chunks[0].content, "Short one.");
        assert_eq!(chunks[1].content, long_sentence);
        assert!(chunks[1].content.len() > 100);
        assert_eq!(chunks[2].content, "Short two.");
    }

    #[test]
    fn test_split_reconstructs_input() {
        let text = "The fox ran. The dog slept. The owl watched. The moon rose.";
        let chunks = split(text, 30);
        let rejoined = chunks
            .iter()
            .map(|c| c.content.as_str())
            .collect::<Vec<_>>()
            .join(" ");
        assert_eq!(rejoined, text);
    }

    #[test]
    fn test_split_boundary_at_150_of_301_characters() {
        // 148-char first sentence, ". ", then a 151-char closing sentence:
        // exactly 301 characters with the one boundary at character 150.
        let first = "a".repeat(148);
        let second = format!("{}.", "b".repeat(150));
        let text = format!("{first}. {second}");
        assert_eq!(text.len(), 301);

        let chunks = split(&text, 300);
        assert_eq!(chunks.len(), 2);
        assert_eq!(chunks[0].content, format!("{first}."));
        assert_eq!(chunks[1].content, second);
    }

    #[test]
    fn test_split_drops_empty_fragments() {
        let chunks = split("One. . Two.", DEFAULT_CHUNK_SIZE);
        assert_eq!(chunks.len(), 1);
        assert_eq!(chunks[0].content, "One. Two.");
        assert!(chunks.iter().all(|c| !c.content.trim().is_empty()));
    }

    #[test]
    fn test_split_empty_text_yields_no_chunks() {
        assert!(split("", DEFAULT_CHUNK_SIZE).is_empty());
        assert!(split("   ", DEFAULT_CHUNK_SIZE).is_empty());
    }
}
