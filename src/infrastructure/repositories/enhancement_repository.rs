use crate::domain::enhancement::{NarrationStyle, Tone};
use async_trait::async_trait;

/// Repository for the text-rewriting collaborator.
///
/// Failures here are never terminal for a job: the enhancement service
/// degrades to the local formatter, so a plain message error is all the
/// caller needs.
#[async_trait]
pub trait EnhancementRepository: Send + Sync {
    /// Rewrite text for spoken delivery in the given tone and style.
    async fn enhance(
        &self,
        text: &str,
        tone: Tone,
        style: NarrationStyle,
    ) -> Result<String, String>;
}
