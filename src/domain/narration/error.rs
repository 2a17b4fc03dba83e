use crate::domain::synthesis::{AssemblyError, ChunkFailure, SynthesisJobError};
use crate::domain::text::EmptyInputError;
use crate::infrastructure::repositories::ExtractionError;

#[derive(Debug, thiserror::Error)]
pub enum NarrationServiceError {
    #[error(transparent)]
    EmptyInput(#[from] EmptyInputError),
    #[error(transparent)]
    Extraction(#[from] ExtractionError),
    #[error("all {failed} chunks failed to synthesize")]
    TotalSynthesisFailure {
        failed: usize,
        failures: Vec<ChunkFailure>,
    },
    #[error(transparent)]
    Assembly(#[from] AssemblyError),
    #[error("could not write audio artifact: {0}")]
    Io(#[from] std::io::Error),
    #[error(transparent)]
    Other(#[from] anyhow::Error),
}

impl From<SynthesisJobError> for NarrationServiceError {
    fn from(err: SynthesisJobError) -> Self {
        match err {
            SynthesisJobError::TotalFailure { failed, failures } => {
                NarrationServiceError::TotalSynthesisFailure { failed, failures }
            }
            SynthesisJobError::Assembly(err) => NarrationServiceError::Assembly(err),
        }
    }
}
