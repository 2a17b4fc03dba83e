pub mod enhancement;
pub mod narration;
pub mod synthesis;
pub mod text;
