use serde::Deserialize;
use std::env;

#[derive(Debug, Clone, Deserialize)]
pub struct Config {
    pub aws_region: String,
    // OpenAI collaborators
    pub openai_api_key: Option<String>,
    pub openai_chat_model: String,
    pub openai_speech_model: String,
    pub environment: Environment,
    pub log_format: LogFormat,
    // Narration pipeline
    pub narration_cache_enabled: bool,
    pub max_chunk_size: usize,
    pub chunk_timeout_secs: u64,
    pub max_text_length: usize,
}

#[derive(Debug, Clone, Deserialize, PartialEq)]
#[serde(rename_all = "lowercase")]
pub enum Environment {
    Development,
    Production,
}

#[derive(Debug, Clone, Deserialize, PartialEq)]
#[serde(rename_all = "lowercase")]
pub enum LogFormat {
    Pretty,
    Json,
}

impl Config {
    pub fn from_env() -> Result<Self, Box<dyn std::error::Error>> {
        dotenvy::dotenv().ok();

        let config = Config {
            aws_region: env::var("AWS_REGION").unwrap_or_else(|_| "eu-west-1".to_string()),
            openai_api_key: env::var("OPENAI_API_KEY").ok(),
            openai_chat_model: env::var("OPENAI_CHAT_MODEL")
                .unwrap_or_else(|_| "gpt-4o-mini".to_string()),
            openai_speech_model: env::var("OPENAI_SPEECH_MODEL")
                .unwrap_or_else(|_| "tts-1".to_string()),
            environment: env::var("ENVIRONMENT")
                .unwrap_or_else(|_| "development".to_string())
                .parse::<String>()
                .map(|s| match s.as_str() {
                    "production" => Environment::Production,
                    _ => Environment::Development,
                })?,
            log_format: env::var("LOG_FORMAT")
                .unwrap_or_else(|_| "pretty".to_string())
                .parse::<String>()
                .map(|s| match s.as_str() {
                    "json" => LogFormat::Json,
                    _ => LogFormat::Pretty,
                })?,
            narration_cache_enabled: env::var("NARRATION_CACHE_ENABLED")
                .unwrap_or_else(|_| "false".to_string())
                .parse::<String>()
                .map(|s| s.to_lowercase() == "true")
                .unwrap_or(false),
            max_chunk_size: env::var("MAX_CHUNK_SIZE")
                .unwrap_or_else(|_| "300".to_string())
                .parse()?,
            chunk_timeout_secs: env::var("CHUNK_TIMEOUT_SECS")
                .unwrap_or_else(|_| "45".to_string())
                .parse()?,
            max_text_length: env::var("MAX_TEXT_LENGTH")
                .unwrap_or_else(|_| "4500".to_string())
                .parse()?,
        };

        Ok(config)
    }

    pub fn is_development(&self) -> bool {
        self.environment == Environment::Development
    }
}
