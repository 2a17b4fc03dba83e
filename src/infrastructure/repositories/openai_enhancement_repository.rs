use super::enhancement_repository::EnhancementRepository;
use crate::domain::enhancement::{NarrationStyle, Tone};
use async_openai::{
    config::OpenAIConfig,
    types::{
        ChatCompletionRequestSystemMessageArgs, ChatCompletionRequestUserMessageArgs,
        CreateChatCompletionRequestArgs,
    },
    Client,
};
use async_trait::async_trait;
use std::sync::Arc;

/// Upper bound on the rewrite length, in tokens.
const MAX_REWRITE_TOKENS: usize = 512;

/// OpenAI chat-completion implementation of the rewrite collaborator.
pub struct OpenAiEnhancementRepository {
    client: Arc<Client<OpenAIConfig>>,
    model: String,
}

impl OpenAiEnhancementRepository {
    pub fn new(client: Arc<Client<OpenAIConfig>>, model: String) -> Self {
        Self { client, model }
    }

    pub fn from_api_key(api_key: &str, model: String) -> Self {
        let client = Client::with_config(OpenAIConfig::new().with_api_key(api_key));
        Self::new(Arc::new(client), model)
    }

    fn build_prompt(text: &str, tone: Tone, style: NarrationStyle) -> String {
        format!(
            "Enhance the following text for audiobook narration. \
             Make it {} in tone and {} in style. \
             Add appropriate pauses, emphasis, and flow for better audio delivery. \
             Preserve the original meaning while making it more suitable for spoken word.\n\n\
             Original text: {}\n\nEnhanced text:",
            tone.description(),
            style.description(),
            text,
        )
    }
}

#[async_trait]
impl EnhancementRepository for OpenAiEnhancementRepository {
    async fn enhance(
        &self,
        text: &str,
        tone: Tone,
        style: NarrationStyle,
    ) -> Result<String, String> {
        let prompt = Self::build_prompt(text, tone, style);
        let max_tokens = (text.split_whitespace().count() * 2).min(MAX_REWRITE_TOKENS) as u32;

        tracing::info!(
            model = %self.model,
            tone = %tone,
            style = %style,
            text_length = text.len(),
            max_tokens = max_tokens,
            "Calling OpenAI chat completion for narration rewrite"
        );

        let request = CreateChatCompletionRequestArgs::default()
            .model(self.model.clone())
            .temperature(0.7)
            .max_tokens(max_tokens)
            .messages([
                ChatCompletionRequestSystemMessageArgs::default()
                    .content("You rewrite text so it reads well aloud.")
                    .build()
                    .map_err(|e| format!("invalid chat request: {}", e))?
                    .into(),
                ChatCompletionRequestUserMessageArgs::default()
                    .content(prompt.clone())
                    .build()
                    .map_err(|e| format!("invalid chat request: {}", e))?
                    .into(),
            ])
            .build()
            .map_err(|e| format!("invalid chat request: {}", e))?;

        let response = self.client.chat().create(request).await.map_err(|e| {
            tracing::error!(error = %e, model = %self.model, "OpenAI chat completion failed");
            format!("OpenAI enhancement error: {}", e)
        })?;

        let rewritten = response
            .choices
            .into_iter()
            .next()
            .and_then(|choice| choice.message.content)
            .unwrap_or_default();

        // Some models echo the prompt back; strip it if present
        let rewritten = rewritten.replace(&prompt, "").trim().to_string();

        if rewritten.is_empty() {
            return Err("model returned an empty rewrite".to_string());
        }

        tracing::debug!(
            rewritten_length = rewritten.len(),
            "Narration rewrite received"
        );

        Ok(rewritten)
    }
}
