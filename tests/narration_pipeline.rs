use std::path::PathBuf;
use std::sync::atomic::{AtomicUsize, Ordering};
use std::sync::Arc;

use async_trait::async_trait;
use pretty_assertions::assert_eq;

use taletape::domain::text::chunker;
use taletape::infrastructure::repositories::{
    DocumentKind, EnhancementRepository, SpeechError, SpeechRepository,
};
use taletape::{
    DefaultPacingPolicy, EnhancementService, NarrationJob, NarrationService, NarrationServiceApi,
    NarrationServiceError, NarrationStyle, NarratorVoice, PacingPolicy, ParallelSynthesizer, Tone,
};

/// Minimal valid MP3 frame (silence) wrapping the chunk text, so assembled
/// output can be checked for ordering.
fn mock_audio(text: &str) -> Vec<u8> {
    let mut bytes = vec![0xFF, 0xFB, 0x90, 0x00];
    bytes.extend_from_slice(text.as_bytes());
    bytes
}

/// Scripted provider: chunks containing "boom" fail, everything else echoes
/// its text inside a frame. Counts calls for the cache tests.
struct MockSpeechRepository {
    calls: AtomicUsize,
}

impl MockSpeechRepository {
    fn new() -> Self {
        Self {
            calls: AtomicUsize::new(0),
        }
    }
}

#[async_trait]
impl SpeechRepository for MockSpeechRepository {
    async fn synthesize(&self, text: &str, _voice: NarratorVoice) -> Result<Vec<u8>, SpeechError> {
        self.calls.fetch_add(1, Ordering::SeqCst);
        if text.contains("boom") {
            return Err(SpeechError::Synthesis("scripted failure".to_string()));
        }
        Ok(mock_audio(text))
    }
}

struct FailingEnhancementRepository;

#[async_trait]
impl EnhancementRepository for FailingEnhancementRepository {
    async fn enhance(
        &self,
        _text: &str,
        _tone: Tone,
        _style: NarrationStyle,
    ) -> Result<String, String> {
        Err("model offline".to_string())
    }
}

/// Pass-through policy so content assertions stay byte-exact.
struct IdentityPolicy;

impl PacingPolicy for IdentityPolicy {
    fn apply(&self, text: &str, _tone: Tone, _style: NarrationStyle) -> String {
        text.to_string()
    }
}

fn plain_service(repo: Arc<MockSpeechRepository>, cache_enabled: bool) -> NarrationService {
    let enhancement = Arc::new(EnhancementService::with_policy(None, Arc::new(IdentityPolicy)));
    NarrationService::new(enhancement, ParallelSynthesizer::new(repo), cache_enabled)
}

#[tokio::test]
async fn it_should_narrate_text_end_to_end() {
    let repo = Arc::new(MockSpeechRepository::new());
    let service = plain_service(repo.clone(), false);

    let text = "The fox ran. The dog slept. The owl watched. The moon rose.";
    let job = NarrationJob::new(text, NarratorVoice::Kate).with_chunk_size(30);
    let result = service.narrate(job).await.unwrap();

    let expected_chunks = chunker::split(text, 30);
    assert_eq!(result.chunk_count, expected_chunks.len());
    assert_eq!(result.succeeded_chunks, expected_chunks.len());
    assert_eq!(result.failed_chunks, 0);
    assert!(!result.is_partial());
    assert_eq!(result.language.as_str(), "en");
    assert_eq!(result.narrated_text, text);

    let expected_audio: Vec<u8> = expected_chunks
        .iter()
        .flat_map(|c| mock_audio(&c.content))
        .collect();
    assert_eq!(result.audio, expected_audio);
}

#[tokio::test]
async fn it_should_keep_index_order_through_partial_failure() {
    let repo = Arc::new(MockSpeechRepository::new());
    let service = plain_service(repo.clone(), false);

    // A tiny chunk budget gives each sentence its own chunk
    let job = NarrationJob::new("First part. boom middle. Last part.", NarratorVoice::Lisa)
        .with_chunk_size(5);
    let result = service.narrate(job).await.unwrap();

    assert_eq!(result.chunk_count, 3);
    assert_eq!(result.succeeded_chunks, 2);
    assert_eq!(result.failed_chunks, 1);
    assert!(result.is_partial());
    assert_eq!(result.failures.len(), 1);
    assert_eq!(result.failures[0].index, 1);

    // Never swapped: chunk 0 then chunk 2, with the failed index skipped
    let mut expected = mock_audio("First part.");
    expected.extend_from_slice(&mock_audio("Last part."));
    assert_eq!(result.audio, expected);
}

#[tokio::test]
async fn it_should_fail_wholesale_when_every_chunk_fails() {
    let repo = Arc::new(MockSpeechRepository::new());
    let service = plain_service(repo.clone(), false);

    let job = NarrationJob::new("boom one. boom two. boom three.", NarratorVoice::Michael)
        .with_chunk_size(5);
    let err = service.narrate(job).await.unwrap_err();

    match err {
        NarrationServiceError::TotalSynthesisFailure { failed, failures } => {
            assert_eq!(failed, 3);
            assert_eq!(failures.len(), 3);
        }
        other => panic!("expected TotalSynthesisFailure, got {other:?}"),
    }
}

#[tokio::test]
async fn it_should_reject_empty_input_before_synthesis() {
    let repo = Arc::new(MockSpeechRepository::new());
    let service = plain_service(repo.clone(), false);

    let job = NarrationJob::new("   \n\t ", NarratorVoice::default());
    let err = service.narrate(job).await.unwrap_err();

    assert!(matches!(err, NarrationServiceError::EmptyInput(_)));
    assert_eq!(repo.calls.load(Ordering::SeqCst), 0, "no synthesis attempted");
}

#[tokio::test]
async fn it_should_degrade_to_local_formatter_when_rewrite_fails() {
    let repo = Arc::new(MockSpeechRepository::new());
    let enhancement = Arc::new(EnhancementService::with_policy(
        Some(Arc::new(FailingEnhancementRepository)),
        Arc::new(DefaultPacingPolicy),
    ));
    let service = NarrationService::new(enhancement, ParallelSynthesizer::new(repo), false);

    let job = NarrationJob::new("One ends. Two ends.", NarratorVoice::Allison);
    let result = service.narrate(job).await.unwrap();

    // The local formatter ran: pacing ellipses are in the narrated text
    assert!(result.narrated_text.contains("..."));
    assert_eq!(result.failed_chunks, 0);
    assert!(!result.audio.is_empty());
}

#[tokio::test]
async fn it_should_serve_repeat_requests_from_cache() {
    let repo = Arc::new(MockSpeechRepository::new());
    let service = plain_service(repo.clone(), true);

    let text = "A tale worth telling twice.";
    let first = service
        .narrate(NarrationJob::new(text, NarratorVoice::Kate))
        .await
        .unwrap();
    let calls_after_first = repo.calls.load(Ordering::SeqCst);

    let second = service
        .narrate(NarrationJob::new(text, NarratorVoice::Kate))
        .await
        .unwrap();

    assert_eq!(first.audio, second.audio);
    assert_eq!(
        repo.calls.load(Ordering::SeqCst),
        calls_after_first,
        "second request should not reach the provider"
    );
}

#[tokio::test]
async fn it_should_narrate_an_uploaded_document() {
    let repo = Arc::new(MockSpeechRepository::new());
    let service = plain_service(repo.clone(), false);

    let html = b"<html><body><p>A story from a page.</p></body></html>";
    let result = service
        .narrate_document(DocumentKind::Html, html, NarratorVoice::Lisa)
        .await
        .unwrap();

    assert!(result.narrated_text.contains("A story from a page."));
    assert!(!result.audio.is_empty());
}

#[tokio::test]
async fn it_should_surface_extraction_failures_before_the_pipeline() {
    let repo = Arc::new(MockSpeechRepository::new());
    let service = plain_service(repo.clone(), false);

    let err = service
        .narrate_document(DocumentKind::PlainText, &[0xFF, 0xFE], NarratorVoice::Lisa)
        .await
        .unwrap_err();

    assert!(matches!(err, NarrationServiceError::Extraction(_)));
    assert_eq!(repo.calls.load(Ordering::SeqCst), 0);
}

#[tokio::test]
async fn it_should_persist_the_artifact_to_a_caller_path() {
    let repo = Arc::new(MockSpeechRepository::new());
    let service = plain_service(repo.clone(), false);

    let path: PathBuf =
        std::env::temp_dir().join(format!("taletape-{}.mp3", uuid::Uuid::new_v4()));
    let job = NarrationJob::new("Saved to disk.", NarratorVoice::Michael);
    let result = service.narrate_to_file(job, &path).await.unwrap();

    let written = tokio::fs::read(&path).await.unwrap();
    assert_eq!(written, result.audio);

    tokio::fs::remove_file(&path).await.unwrap();
}
