/// Default maximum length, in characters, of text sent into synthesis.
pub const DEFAULT_MAX_TEXT_LENGTH: usize = 4500;

#[derive(Debug, Clone, Copy, PartialEq, Eq, thiserror::Error)]
#[error("no usable text after normalization")]
pub struct EmptyInputError;

/// Cleans raw text for speech synthesis: whitespace collapse, blank-line
/// sentence termination, ASCII-ization of typography, terminal punctuation,
/// and a sentence-boundary length cap.
///
/// `normalize` is idempotent; pipeline stages can re-run it safely.
#[derive(Debug, Clone)]
pub struct TextNormalizer {
    max_length: usize,
}

impl Default for TextNormalizer {
    fn default() -> Self {
        Self {
            max_length: DEFAULT_MAX_TEXT_LENGTH,
        }
    }
}

impl TextNormalizer {
    pub fn new(max_length: usize) -> Self {
        // The hard-truncation marker needs room of its own
        Self {
            max_length: max_length.max(4),
        }
    }

    pub fn normalize(&self, text: &str) -> Result<String, EmptyInputError> {
        if text.trim().is_empty() {
            return Err(EmptyInputError);
        }

        // A blank line terminates a sentence. When terminal punctuation is
        // already there, the blank line only becomes the join space.
        let terminated =
            regex::Regex::new(r"([.!?])\s*\n\s*\n\s*").unwrap().replace_all(text, "$1 ");
        let terminated =
            regex::Regex::new(r"\s*\n\s*\n\s*").unwrap().replace_all(&terminated, ". ");

        // Remaining whitespace runs (single newlines, tabs) become one space
        let collapsed = regex::Regex::new(r"\s+").unwrap().replace_all(&terminated, " ");

        // Typography the synthesis voices stumble on
        let cleaned = collapsed
            .replace('“', "\"")
            .replace('”', "\"")
            .replace('‘', "'")
            .replace('’', "'")
            .replace('—', "-")
            .replace('–', "-")
            .replace('…', "...");

        let mut cleaned = cleaned.trim().to_string();
        if cleaned.is_empty() {
            return Err(EmptyInputError);
        }

        if !cleaned.ends_with(['.', '!', '?']) {
            cleaned.push('.');
        }

        Ok(self.cap_length(cleaned))
    }

    fn cap_length(&self, text: String) -> String {
        if text.chars().count() <= self.max_length {
            return text;
        }

        // Prefer cutting at the last sentence boundary inside the limit
        let mut truncated = String::new();
        let mut kept = 0usize;
        for sentence in text.split(". ") {
            let sentence_chars = sentence.chars().count();
            if kept + sentence_chars + 2 > self.max_length {
                break;
            }
            truncated.push_str(sentence);
            truncated.push_str(". ");
            kept += sentence_chars + 2;
        }
        let truncated = truncated.trim_end().to_string();

        if truncated.is_empty() {
            // No boundary in range: hard cut and mark the elision
            let cut: String = text.chars().take(self.max_length - 3).collect();
            format!("{cut}...")
        } else {
            truncated
        }
    }
}
