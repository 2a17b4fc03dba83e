use super::speech_repository::{SpeechError, SpeechRepository};
use crate::domain::narration::NarratorVoice;
use async_trait::async_trait;
use aws_sdk_polly::{
    error::{ProvideErrorMetadata, SdkError},
    types::{Engine, OutputFormat, VoiceId},
    Client as PollyClient,
};
use std::sync::Arc;

/// AWS Polly implementation of the speech repository: the voice-selectable
/// provider used by the parallel path.
pub struct PollySpeechRepository {
    polly_client: Arc<PollyClient>,
}

impl PollySpeechRepository {
    pub fn new(polly_client: Arc<PollyClient>) -> Self {
        Self { polly_client }
    }

    /// Build a Polly client from the ambient AWS credential chain.
    pub async fn client_from_env(region: &str) -> PollyClient {
        let has_access_key = std::env::var("AWS_ACCESS_KEY_ID").is_ok();
        let has_secret_key = std::env::var("AWS_SECRET_ACCESS_KEY").is_ok();
        if !has_access_key || !has_secret_key {
            tracing::warn!("AWS credentials not found in environment variables. Will attempt to use other credential providers (instance metadata, etc.)");
        }

        let aws_config = aws_config::defaults(aws_config::BehaviorVersion::latest())
            .region(aws_config::Region::new(region.to_string()))
            .load()
            .await;

        tracing::info!(region = ?aws_config.region(), "AWS configuration loaded");

        PollyClient::new(&aws_config)
    }
}

#[async_trait]
impl SpeechRepository for PollySpeechRepository {
    async fn synthesize(&self, text: &str, voice: NarratorVoice) -> Result<Vec<u8>, SpeechError> {
        let voice_id = VoiceId::from(voice.polly_voice_id());
        let engine = if voice.is_neural_compatible() {
            Engine::Neural
        } else {
            Engine::Standard
        };

        tracing::info!(
            narrator = %voice,
            voice_id = ?voice_id,
            engine = ?engine,
            output_format = "Mp3",
            text_length = text.len(),
            "Calling AWS Polly synthesize_speech"
        );

        let result = self
            .polly_client
            .synthesize_speech()
            .text(text)
            .voice_id(voice_id.clone())
            .output_format(OutputFormat::Mp3)
            .engine(engine.clone())
            .send()
            .await
            .map_err(|e| {
                tracing::error!(
                    error = ?e,
                    narrator = %voice,
                    voice_id = ?voice_id,
                    engine = ?engine,
                    text_length = text.len(),
                    "AWS Polly synthesize_speech failed"
                );
                map_polly_error(e)
            })?;

        tracing::debug!("AWS Polly synthesize_speech successful, reading audio stream");

        let audio_stream = result.audio_stream.collect().await.map_err(|e| {
            tracing::error!(error = %e, "Failed to collect audio stream from Polly response");
            SpeechError::Synthesis(format!("failed to read audio stream: {}", e))
        })?;

        let audio_bytes = audio_stream.into_bytes().to_vec();
        tracing::debug!(
            audio_size = audio_bytes.len(),
            "Audio stream collected successfully"
        );

        Ok(audio_bytes)
    }
}

/// Sort an SDK failure into the repository error taxonomy.
fn map_polly_error<E, R>(err: SdkError<E, R>) -> SpeechError
where
    E: ProvideErrorMetadata + std::fmt::Debug,
    R: std::fmt::Debug,
{
    match &err {
        SdkError::ConstructionFailure(_) => SpeechError::Authentication(format!(
            "Polly request could not be built or signed: {:?}",
            err
        )),
        SdkError::DispatchFailure(_) | SdkError::TimeoutError(_) => {
            SpeechError::ServiceUnavailable(format!("AWS Polly unreachable: {:?}", err))
        }
        SdkError::ServiceError(_) => {
            let code = err.code().unwrap_or_default();
            if matches!(
                code,
                "UnrecognizedClientException"
                    | "InvalidSignatureException"
                    | "AccessDeniedException"
                    | "ExpiredTokenException"
                    | "IncompleteSignatureException"
            ) {
                SpeechError::Authentication(format!("AWS Polly rejected credentials: {:?}", err))
            } else {
                SpeechError::Synthesis(format!("AWS Polly error: {:?}", err))
            }
        }
        _ => SpeechError::Synthesis(format!("AWS Polly error: {:?}", err)),
    }
}
