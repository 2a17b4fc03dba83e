use super::language::LanguageCode;
use super::voice::NarratorVoice;
use crate::domain::enhancement::{NarrationStyle, Tone};
use crate::domain::synthesis::ChunkFailure;
use crate::domain::text::DEFAULT_CHUNK_SIZE;
use uuid::Uuid;

/// One narration request: raw text in, a single audio artifact out.
/// Immutable once built; discarded after producing a result or failing.
#[derive(Debug, Clone)]
pub struct NarrationJob {
    pub id: Uuid,
    pub text: String,
    pub voice: NarratorVoice,
    pub tone: Tone,
    pub style: NarrationStyle,
    pub chunk_size: usize,
}

impl NarrationJob {
    pub fn new(text: impl Into<String>, voice: NarratorVoice) -> Self {
        Self {
            id: Uuid::new_v4(),
            text: text.into(),
            voice,
            tone: Tone::default(),
            style: NarrationStyle::default(),
            chunk_size: DEFAULT_CHUNK_SIZE,
        }
    }

    pub fn with_tone(mut self, tone: Tone) -> Self {
        self.tone = tone;
        self
    }

    pub fn with_style(mut self, style: NarrationStyle) -> Self {
        self.style = style;
        self
    }

    /// Chunk sizes below one character are forced up to one.
    pub fn with_chunk_size(mut self, chunk_size: usize) -> Self {
        self.chunk_size = chunk_size.max(1);
        self
    }

    /// Cache key. Jobs with identical inputs produce identical audio; the job
    /// id stays out so repeat requests hit the cache.
    pub(crate) fn signature(&self) -> String {
        format!(
            "{}:{}:{}:{}:{}",
            self.voice, self.tone, self.style, self.chunk_size, self.text
        )
    }
}

/// Final outcome of a narration job, including the failure bookkeeping that
/// lets callers report partial degradation.
#[derive(Debug, Clone)]
pub struct NarrationResult {
    pub audio: Vec<u8>,
    pub narrated_text: String,
    pub language: LanguageCode,
    pub char_count: usize,
    pub duration_minutes: f32,
    pub chunk_count: usize,
    pub succeeded_chunks: usize,
    pub failed_chunks: usize,
    pub failures: Vec<ChunkFailure>,
}

impl NarrationResult {
    /// True when some chunks failed but the job still produced audio.
    pub fn is_partial(&self) -> bool {
        self.failed_chunks > 0
    }
}
