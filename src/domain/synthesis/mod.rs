pub mod assembler;
pub mod parallel;

pub use assembler::{AssemblyError, AudioAssembler, AudioSegment};
pub use parallel::{
    ChunkFailure, ParallelSynthesizer, SynthesisJobError, SynthesisResult, DEFAULT_CHUNK_TIMEOUT,
};
