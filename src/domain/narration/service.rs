use super::dto::{NarrationJob, NarrationResult};
use super::error::NarrationServiceError;
use super::language::{build_detector, detect_language};
use super::voice::NarratorVoice;
use crate::domain::enhancement::EnhancementService;
use crate::domain::synthesis::ParallelSynthesizer;
use crate::domain::text::{chunker, TextNormalizer, DEFAULT_CHUNK_SIZE};
use crate::infrastructure::repositories::{
    DocumentKind, ExtractionRepository, LocalExtractionRepository,
};
use async_trait::async_trait;
use lingua::LanguageDetector;
use moka::future::Cache;
use std::path::Path;
use std::sync::Arc;
use std::time::Duration;

/// Rough speaking rate used to estimate narration length.
const CHARACTERS_PER_MINUTE: f32 = 1000.0;

/// Pipeline façade: raw or document text in, one narrated MP3 out.
pub struct NarrationService {
    enhancement: Arc<EnhancementService>,
    synthesizer: ParallelSynthesizer,
    extraction_repo: Arc<dyn ExtractionRepository>,
    normalizer: TextNormalizer,
    language_detector: LanguageDetector,
    default_chunk_size: usize,
    cache: Option<Cache<String, NarrationResult>>,
}

impl NarrationService {
    pub fn new(
        enhancement: Arc<EnhancementService>,
        synthesizer: ParallelSynthesizer,
        cache_enabled: bool,
    ) -> Self {
        let language_detector = build_detector();

        // Initialize cache if enabled
        let cache = if cache_enabled {
            Some(
                Cache::builder()
                    .max_capacity(100)
                    .time_to_idle(Duration::from_secs(30 * 60)) // 30 minutes, refreshes on access
                    .build(),
            )
        } else {
            None
        };

        Self {
            enhancement,
            synthesizer,
            extraction_repo: Arc::new(LocalExtractionRepository),
            normalizer: TextNormalizer::default(),
            language_detector,
            default_chunk_size: DEFAULT_CHUNK_SIZE,
            cache,
        }
    }

    pub fn with_normalizer(mut self, normalizer: TextNormalizer) -> Self {
        self.normalizer = normalizer;
        self
    }

    pub fn with_extraction_repo(mut self, extraction_repo: Arc<dyn ExtractionRepository>) -> Self {
        self.extraction_repo = extraction_repo;
        self
    }

    /// Chunk budget for jobs the service builds itself (document narration).
    pub fn with_default_chunk_size(mut self, chunk_size: usize) -> Self {
        self.default_chunk_size = chunk_size.max(1);
        self
    }
}

#[async_trait]
pub trait NarrationServiceApi: Send + Sync {
    /// Narrate one job
    ///
    /// This operation:
    /// - Normalizes and validates the raw text
    /// - Rewrites it for delivery, degrading to the local formatter on failure
    /// - Chunk-plans, synthesizes all chunks concurrently, assembles in order
    ///
    /// Chunk failures are reported in the result, not raised; only a job
    /// where every chunk fails is an error.
    async fn narrate(&self, job: NarrationJob) -> Result<NarrationResult, NarrationServiceError>;

    /// Extract a document's text and narrate it. Extraction failures surface
    /// before any synthesis is attempted.
    async fn narrate_document(
        &self,
        kind: DocumentKind,
        bytes: &[u8],
        voice: NarratorVoice,
    ) -> Result<NarrationResult, NarrationServiceError>;

    /// Narrate and persist the artifact to a caller-supplied path.
    async fn narrate_to_file(
        &self,
        job: NarrationJob,
        path: &Path,
    ) -> Result<NarrationResult, NarrationServiceError>;
}

#[async_trait]
impl NarrationServiceApi for NarrationService {
    async fn narrate(&self, job: NarrationJob) -> Result<NarrationResult, NarrationServiceError> {
        tracing::info!(
            job_id = %job.id,
            voice = %job.voice,
            tone = %job.tone,
            style = %job.style,
            text_length = job.text.len(),
            "Narration request"
        );

        // Check cache first (if enabled)
        if let Some(cache) = &self.cache {
            if let Some(cached) = cache.get(&job.signature()).await {
                tracing::info!(
                    job_id = %job.id,
                    cached_audio_size = cached.audio.len(),
                    "Narration cache hit - returning cached audio"
                );
                return Ok(cached);
            }
        }

        // 1. Normalize and validate the raw text
        let normalized = self.normalizer.normalize(&job.text)?;
        tracing::info!(
            job_id = %job.id,
            original_length = job.text.len(),
            normalized_length = normalized.len(),
            "Text normalized"
        );

        // 2. Detect language
        let language = detect_language(&self.language_detector, &normalized);
        tracing::info!(job_id = %job.id, language = %language, "Language detected");

        // 3. Rewrite for delivery; the chain degrades to the local formatter
        let enhanced = self.enhancement.enhance(&normalized, job.tone, job.style).await;

        // The rewrite goes back through the normalizer so chunking always
        // sees canonical sentence boundaries. A rewrite that normalizes to
        // nothing falls back to the plain normalized text.
        let narrated_text = match self.normalizer.normalize(&enhanced) {
            Ok(text) => text,
            Err(_) => {
                tracing::warn!(
                    job_id = %job.id,
                    "Rewritten text normalized to nothing, narrating the plain text"
                );
                normalized
            }
        };

        // 4. Chunk-plan the whole job before dispatch
        let chunks = chunker::split(&narrated_text, job.chunk_size);
        tracing::info!(
            job_id = %job.id,
            chunk_count = chunks.len(),
            chunk_size = job.chunk_size,
            "Text chunk-planned"
        );

        // 5. Fan out, join, assemble
        let synthesis = self.synthesizer.synthesize_job(&chunks, job.voice).await?;

        if synthesis.failed > 0 {
            tracing::warn!(
                job_id = %job.id,
                succeeded = synthesis.succeeded,
                failed = synthesis.failed,
                "Narration degraded: some chunks failed"
            );
        }

        // 6. Build result with partial-degradation bookkeeping
        let char_count = narrated_text.chars().count();
        let result = NarrationResult {
            audio: synthesis.audio,
            narrated_text,
            language,
            char_count,
            duration_minutes: char_count as f32 / CHARACTERS_PER_MINUTE,
            chunk_count: chunks.len(),
            succeeded_chunks: synthesis.succeeded,
            failed_chunks: synthesis.failed,
            failures: synthesis.failures,
        };

        // 7. Cache the result if caching is enabled
        if let Some(cache) = &self.cache {
            cache.insert(job.signature(), result.clone()).await;
            tracing::info!(
                job_id = %job.id,
                audio_size = result.audio.len(),
                "Narration result cached"
            );
        }

        Ok(result)
    }

    async fn narrate_document(
        &self,
        kind: DocumentKind,
        bytes: &[u8],
        voice: NarratorVoice,
    ) -> Result<NarrationResult, NarrationServiceError> {
        let text = self.extraction_repo.extract(kind, bytes).await?;
        tracing::info!(
            kind = ?kind,
            byte_count = bytes.len(),
            text_length = text.len(),
            "Document extracted for narration"
        );

        let job = NarrationJob::new(text, voice).with_chunk_size(self.default_chunk_size);
        self.narrate(job).await
    }

    async fn narrate_to_file(
        &self,
        job: NarrationJob,
        path: &Path,
    ) -> Result<NarrationResult, NarrationServiceError> {
        let result = self.narrate(job).await?;

        tokio::fs::write(path, &result.audio).await?;
        tracing::info!(
            path = %path.display(),
            audio_size = result.audio.len(),
            "Audio artifact written"
        );

        Ok(result)
    }
}
