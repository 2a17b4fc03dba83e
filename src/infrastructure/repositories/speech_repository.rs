use crate::domain::narration::NarratorVoice;
use async_trait::async_trait;

/// Per-call failure kinds for a synthesis provider.
///
/// Chunk-level failures are recovered by the orchestrator unless every chunk
/// fails, so these carry enough to report degradation, nothing more.
#[derive(Debug, Clone, thiserror::Error)]
pub enum SpeechError {
    #[error("authentication failed: {0}")]
    Authentication(String),
    #[error("service unavailable: {0}")]
    ServiceUnavailable(String),
    #[error("synthesis failed: {0}")]
    Synthesis(String),
}

/// Repository for speech synthesis operations.
/// Abstracts the underlying TTS provider (AWS Polly, OpenAI, ...)
///
/// Implementations perform exactly one network round-trip per call and handle
/// provider-specific voice selection. Retry and timeout policy live in the
/// orchestrator, never here.
#[async_trait]
pub trait SpeechRepository: Send + Sync {
    /// Convert one text chunk to encoded audio (MP3) for the given narrator.
    async fn synthesize(&self, text: &str, voice: NarratorVoice) -> Result<Vec<u8>, SpeechError>;
}
