pub mod dto;
pub mod error;
pub mod language;
pub mod service;
pub mod voice;

pub use dto::{NarrationJob, NarrationResult};
pub use error::NarrationServiceError;
pub use language::{detect_language, LanguageCode};
pub use service::{NarrationService, NarrationServiceApi};
pub use voice::NarratorVoice;
