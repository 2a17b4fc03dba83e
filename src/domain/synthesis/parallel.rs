use super::assembler::{AudioAssembler, AudioSegment};
use crate::domain::narration::NarratorVoice;
use crate::domain::text::TextChunk;
use crate::infrastructure::repositories::{SpeechError, SpeechRepository};
use std::sync::Arc;
use std::time::Duration;
use tokio::task::JoinSet;

/// Default independent timeout for one chunk's synthesis call.
pub const DEFAULT_CHUNK_TIMEOUT: Duration = Duration::from_secs(45);

/// Why one chunk produced no audio.
#[derive(Debug, Clone)]
pub struct ChunkFailure {
    pub index: usize,
    pub error: SpeechError,
}

/// Outcome of one synthesis job: the assembled audio plus per-chunk failure
/// bookkeeping, so callers can report partial degradation instead of a bare
/// success flag.
#[derive(Debug, Clone)]
pub struct SynthesisResult {
    pub audio: Vec<u8>,
    pub succeeded: usize,
    pub failed: usize,
    pub failures: Vec<ChunkFailure>,
}

#[derive(Debug, thiserror::Error)]
pub enum SynthesisJobError {
    #[error("all {failed} chunks failed to synthesize")]
    TotalFailure {
        failed: usize,
        failures: Vec<ChunkFailure>,
    },
    #[error(transparent)]
    Assembly(#[from] super::assembler::AssemblyError),
}

/// Fans one job out to the speech provider, one concurrent task per chunk,
/// and joins every task before assembly.
///
/// Results land in a slot array addressed by chunk index. Each task reports
/// its own index exactly once, so every slot has exactly one writer and the
/// join is the only synchronization point. Task completion order is
/// unconstrained; the assembled output order is always strictly increasing by
/// chunk index because assembly reads the slots by index, never by arrival.
pub struct ParallelSynthesizer {
    speech_repo: Arc<dyn SpeechRepository>,
    assembler: AudioAssembler,
    chunk_timeout: Duration,
}

impl ParallelSynthesizer {
    pub fn new(speech_repo: Arc<dyn SpeechRepository>) -> Self {
        Self::with_timeout(speech_repo, DEFAULT_CHUNK_TIMEOUT)
    }

    pub fn with_timeout(speech_repo: Arc<dyn SpeechRepository>, chunk_timeout: Duration) -> Self {
        Self {
            speech_repo,
            assembler: AudioAssembler::new(),
            chunk_timeout,
        }
    }

    /// Synthesize every chunk of one job concurrently and assemble the
    /// successful segments in index order.
    ///
    /// A failing chunk never aborts its siblings; its index is simply skipped
    /// at assembly and reported in the result. Only a job where *zero* chunks
    /// succeed is an error.
    pub async fn synthesize_job(
        &self,
        chunks: &[TextChunk],
        voice: NarratorVoice,
    ) -> Result<SynthesisResult, SynthesisJobError> {
        if chunks.is_empty() {
            return Err(SynthesisJobError::TotalFailure {
                failed: 0,
                failures: Vec::new(),
            });
        }

        let start_time = std::time::Instant::now();

        let mut tasks = JoinSet::new();
        for chunk in chunks {
            let repo = Arc::clone(&self.speech_repo);
            let content = chunk.content.clone();
            let index = chunk.index;
            let timeout = self.chunk_timeout;

            tasks.spawn(async move {
                tracing::debug!(chunk_index = index, chunk_size = content.len(), "Chunk synthesis started");

                let result = match tokio::time::timeout(timeout, repo.synthesize(&content, voice)).await {
                    Ok(result) => result,
                    // A timed-out call is an ordinary per-chunk failure
                    Err(_) => Err(SpeechError::ServiceUnavailable(format!(
                        "synthesis timed out after {}s",
                        timeout.as_secs()
                    ))),
                };

                (index, result)
            });
        }

        // Fan-in: every slot is written at most once, and only by this loop.
        let mut slots: Vec<Option<Result<Vec<u8>, SpeechError>>> =
            chunks.iter().map(|_| None).collect();
        while let Some(joined) = tasks.join_next().await {
            match joined {
                Ok((index, result)) => slots[index] = Some(result),
                Err(join_error) => {
                    // The task never reported its index; its slot stays empty
                    // and is counted as a failure below.
                    tracing::error!(error = %join_error, "Synthesis task aborted before reporting");
                }
            }
        }

        let mut segments = Vec::new();
        let mut failures = Vec::new();
        for (index, slot) in slots.into_iter().enumerate() {
            match slot {
                Some(Ok(audio)) => segments.push(AudioSegment { index, audio }),
                Some(Err(error)) => {
                    tracing::warn!(chunk_index = index, error = %error, "Chunk synthesis failed");
                    failures.push(ChunkFailure { index, error });
                }
                None => failures.push(ChunkFailure {
                    index,
                    error: SpeechError::Synthesis("synthesis task aborted".to_string()),
                }),
            }
        }

        if segments.is_empty() {
            return Err(SynthesisJobError::TotalFailure {
                failed: failures.len(),
                failures,
            });
        }

        let audio = self.assembler.assemble(&segments)?;

        let duration = start_time.elapsed();
        let characters_count: usize = chunks.iter().map(|c| c.content.len()).sum();
        tracing::info!(
            chunk_count = chunks.len(),
            succeeded = segments.len(),
            failed = failures.len(),
            characters_count = characters_count,
            latency_ms = duration.as_millis(),
            audio_size_bytes = audio.len(),
            "Synthesis job completed"
        );

        Ok(SynthesisResult {
            audio,
            succeeded: segments.len(),
            failed: failures.len(),
            failures,
        })
    }
}
