pub mod chunker;
pub mod normalizer;

pub use chunker::{TextChunk, DEFAULT_CHUNK_SIZE};
pub use normalizer::{EmptyInputError, TextNormalizer};
