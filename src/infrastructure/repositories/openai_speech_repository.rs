use super::speech_repository::{SpeechError, SpeechRepository};
use crate::domain::narration::{LanguageCode, NarratorVoice};
use async_openai::{
    config::OpenAIConfig,
    error::OpenAIError,
    types::{CreateSpeechRequest, SpeechModel, Voice},
    Client,
};
use async_trait::async_trait;
use std::sync::Arc;

/// OpenAI implementation of the speech repository: the simple, single-call
/// provider. It is addressed by language code; the narrator identity does not
/// select the remote voice.
pub struct OpenAiSpeechRepository {
    client: Arc<Client<OpenAIConfig>>,
    model: String,
    language: LanguageCode,
}

impl OpenAiSpeechRepository {
    pub fn new(client: Arc<Client<OpenAIConfig>>, model: String, language: LanguageCode) -> Self {
        Self {
            client,
            model,
            language,
        }
    }

    pub fn from_api_key(api_key: &str, model: String, language: LanguageCode) -> Self {
        let client = Client::with_config(OpenAIConfig::new().with_api_key(api_key));
        Self::new(Arc::new(client), model, language)
    }

    /// Select the appropriate OpenAI voice for the configured language
    /// Based on voice characteristics that suit each language
    fn voice_for_language(&self) -> Voice {
        match self.language {
            LanguageCode::English => Voice::Alloy, // Neutral American accent
            LanguageCode::Spanish => Voice::Echo,  // Warm, clear for Spanish
            LanguageCode::French => Voice::Nova,   // Soft, suitable for French
            LanguageCode::German => Voice::Onyx,   // Clear, authoritative
            LanguageCode::Italian => Voice::Fable, // Expressive for Italian
            LanguageCode::Portuguese => Voice::Shimmer, // Clear articulation
        }
    }
}

#[async_trait]
impl SpeechRepository for OpenAiSpeechRepository {
    async fn synthesize(&self, text: &str, voice: NarratorVoice) -> Result<Vec<u8>, SpeechError> {
        tracing::info!(
            model = %self.model,
            language = %self.language,
            requested_narrator = %voice,
            text_length = text.len(),
            "Calling OpenAI speech API"
        );

        // Parse model string to SpeechModel enum
        let model = match self.model.as_str() {
            "tts-1" => SpeechModel::Tts1,
            "tts-1-hd" => SpeechModel::Tts1Hd,
            other => SpeechModel::Other(other.to_string()),
        };

        let request = CreateSpeechRequest {
            model,
            input: text.to_string(),
            voice: self.voice_for_language(),
            response_format: None, // Defaults to MP3
            speed: None,           // Defaults to 1.0
        };

        let response = self.client.audio().speech(request).await.map_err(|e| {
            tracing::error!(
                error = %e,
                model = %self.model,
                language = %self.language,
                text_length = text.len(),
                "OpenAI speech API call failed"
            );
            map_openai_error(e)
        })?;

        let audio_bytes = response.bytes.to_vec();
        tracing::debug!(
            audio_size = audio_bytes.len(),
            "OpenAI speech audio received successfully"
        );

        Ok(audio_bytes)
    }
}

/// Sort an OpenAI client failure into the repository error taxonomy.
fn map_openai_error(err: OpenAIError) -> SpeechError {
    match &err {
        OpenAIError::ApiError(api) => {
            let kind = api.r#type.as_deref().unwrap_or_default();
            if kind.contains("authentication") || api.message.contains("API key") {
                SpeechError::Authentication(format!("OpenAI rejected credentials: {}", api.message))
            } else {
                SpeechError::Synthesis(format!("OpenAI speech error: {}", api.message))
            }
        }
        OpenAIError::Reqwest(e) => {
            SpeechError::ServiceUnavailable(format!("OpenAI unreachable: {}", e))
        }
        _ => SpeechError::Synthesis(format!("OpenAI speech error: {}", err)),
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_voice_follows_configured_language() {
        let repo = OpenAiSpeechRepository::from_api_key(
            "test-key",
            "tts-1".to_string(),
            LanguageCode::French,
        );
        assert!(matches!(repo.voice_for_language(), Voice::Nova));
    }

    #[test]
    fn test_api_error_maps_to_taxonomy() {
        let err = OpenAIError::ApiError(async_openai::error::ApiError {
            message: "Incorrect API key provided".to_string(),
            r#type: Some("invalid_request_error".to_string()),
            param: None,
            code: None,
        });
        assert!(matches!(
            map_openai_error(err),
            SpeechError::Authentication(_)
        ));
    }
}
