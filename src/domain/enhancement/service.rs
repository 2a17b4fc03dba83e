use super::formatter::{DefaultPacingPolicy, PacingPolicy};
use super::{NarrationStyle, Tone};
use crate::infrastructure::repositories::EnhancementRepository;
use std::sync::Arc;

/// Rewrites text for expressive delivery.
///
/// The work degrades through an ordered list of strategies, each transition
/// logged: remote rewrite first, then the local pacing formatter over the
/// untouched input. Enhancement never fails a job; the formatter is the floor
/// of the chain.
pub struct EnhancementService {
    enhancement_repo: Option<Arc<dyn EnhancementRepository>>,
    pacing: Arc<dyn PacingPolicy>,
}

impl EnhancementService {
    /// The rewrite collaborator is injected and shared across jobs; pass
    /// `None` to run on the local formatter alone.
    pub fn new(enhancement_repo: Option<Arc<dyn EnhancementRepository>>) -> Self {
        Self::with_policy(enhancement_repo, Arc::new(DefaultPacingPolicy))
    }

    pub fn with_policy(
        enhancement_repo: Option<Arc<dyn EnhancementRepository>>,
        pacing: Arc<dyn PacingPolicy>,
    ) -> Self {
        Self {
            enhancement_repo,
            pacing,
        }
    }

    /// Returns the text to narrate. Infallible by design of the chain.
    pub async fn enhance(&self, text: &str, tone: Tone, style: NarrationStyle) -> String {
        let rewritten = match &self.enhancement_repo {
            Some(repo) => match repo.enhance(text, tone, style).await {
                Ok(rewritten) if !rewritten.trim().is_empty() => Some(rewritten),
                Ok(_) => {
                    tracing::warn!(
                        "Rewrite service returned empty text, falling back to local formatter"
                    );
                    None
                }
                Err(error) => {
                    tracing::warn!(
                        error = %error,
                        "Rewrite service failed, falling back to local formatter"
                    );
                    None
                }
            },
            None => {
                tracing::debug!("No rewrite service configured, using local formatter");
                None
            }
        };

        match rewritten {
            Some(rewritten) => self.pacing.apply(&rewritten, tone, style),
            None => self.pacing.apply(text, tone, style),
        }
    }
}
