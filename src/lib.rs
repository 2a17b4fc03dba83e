pub mod domain;
pub mod infrastructure;

pub use domain::enhancement::{
    DefaultPacingPolicy, EnhancementService, NarrationStyle, PacingPolicy, Tone,
};
pub use domain::narration::{
    LanguageCode, NarrationJob, NarrationResult, NarrationService, NarrationServiceApi,
    NarrationServiceError, NarratorVoice,
};
pub use domain::synthesis::{AudioAssembler, ParallelSynthesizer};
pub use domain::text::{TextChunk, TextNormalizer};
pub use infrastructure::config::{Config, Environment, LogFormat};

use async_openai::{config::OpenAIConfig, Client as OpenAiClient};
use infrastructure::repositories::{
    EnhancementRepository, OpenAiEnhancementRepository, OpenAiSpeechRepository,
    PollySpeechRepository, SpeechRepository,
};
use std::sync::Arc;
use std::time::Duration;
use tracing_subscriber::{layer::SubscriberExt, util::SubscriberInitExt};

/// Wire the default production pipeline from configuration: Polly synthesis,
/// an OpenAI rewrite collaborator when an API key is configured, and the
/// optional result cache.
pub async fn build_narration_service(config: &Config) -> NarrationService {
    let polly_client = Arc::new(PollySpeechRepository::client_from_env(&config.aws_region).await);
    let speech_repo: Arc<dyn SpeechRepository> =
        Arc::new(PollySpeechRepository::new(polly_client));

    let enhancement_repo = config.openai_api_key.as_deref().map(|key| {
        Arc::new(OpenAiEnhancementRepository::from_api_key(
            key,
            config.openai_chat_model.clone(),
        )) as Arc<dyn EnhancementRepository>
    });
    if enhancement_repo.is_none() {
        tracing::warn!("No OpenAI API key configured; narration will use the local formatter only");
    }

    let enhancement = Arc::new(EnhancementService::new(enhancement_repo));
    let synthesizer = ParallelSynthesizer::with_timeout(
        speech_repo,
        Duration::from_secs(config.chunk_timeout_secs),
    );

    NarrationService::new(enhancement, synthesizer, config.narration_cache_enabled)
        .with_normalizer(TextNormalizer::new(config.max_text_length))
        .with_default_chunk_size(config.max_chunk_size)
}

/// Wire the pipeline over the single-call OpenAI speech provider instead of
/// Polly. Suited to short texts where the fan-out buys nothing; the remote
/// voice follows the configured language, not the narrator identity.
pub fn build_simple_narration_service(
    config: &Config,
    language: LanguageCode,
) -> anyhow::Result<NarrationService> {
    let api_key = config.openai_api_key.as_deref().ok_or_else(|| {
        anyhow::anyhow!("OPENAI_API_KEY is required for the OpenAI speech provider")
    })?;

    let client = Arc::new(OpenAiClient::with_config(
        OpenAIConfig::new().with_api_key(api_key),
    ));
    let speech_repo: Arc<dyn SpeechRepository> = Arc::new(OpenAiSpeechRepository::new(
        client.clone(),
        config.openai_speech_model.clone(),
        language,
    ));
    let enhancement_repo: Arc<dyn EnhancementRepository> = Arc::new(
        OpenAiEnhancementRepository::new(client, config.openai_chat_model.clone()),
    );

    let enhancement = Arc::new(EnhancementService::new(Some(enhancement_repo)));
    let synthesizer = ParallelSynthesizer::with_timeout(
        speech_repo,
        Duration::from_secs(config.chunk_timeout_secs),
    );

    Ok(
        NarrationService::new(enhancement, synthesizer, config.narration_cache_enabled)
            .with_normalizer(TextNormalizer::new(config.max_text_length))
            .with_default_chunk_size(config.max_chunk_size),
    )
}

/// Initialize the tracing stack from configuration. Meant for binary
/// consumers; hosts embedding the pipeline install their own subscriber.
pub fn init_logging(config: &Config) {
    if config.log_format == LogFormat::Json {
        tracing_subscriber::registry()
            .with(
                tracing_subscriber::EnvFilter::try_from_default_env()
                    .unwrap_or_else(|_| "taletape=debug".into()),
            )
            .with(tracing_subscriber::fmt::layer().json())
            .init();
    } else {
        tracing_subscriber::registry()
            .with(
                tracing_subscriber::EnvFilter::try_from_default_env()
                    .unwrap_or_else(|_| "taletape=debug".into()),
            )
            .with(tracing_subscriber::fmt::layer().pretty())
            .init();
    }
}
