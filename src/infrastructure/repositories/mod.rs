pub mod enhancement_repository;
pub mod extraction_repository;
pub mod openai_enhancement_repository;
pub mod openai_speech_repository;
pub mod polly_speech_repository;
pub mod speech_repository;

pub use enhancement_repository::EnhancementRepository;
pub use extraction_repository::{
    DocumentKind, ExtractionError, ExtractionRepository, LocalExtractionRepository,
};
pub use openai_enhancement_repository::OpenAiEnhancementRepository;
pub use openai_speech_repository::OpenAiSpeechRepository;
pub use polly_speech_repository::PollySpeechRepository;
pub use speech_repository::{SpeechError, SpeechRepository};
