use super::{NarrationStyle, Tone};

/// Post-processing applied to text before synthesis.
///
/// The pacing heuristics are stylistic, not a correctness property, so they
/// sit behind a trait and can be swapped without touching the pipeline.
pub trait PacingPolicy: Send + Sync {
    fn apply(&self, text: &str, tone: Tone, style: NarrationStyle) -> String;
}

/// Deterministic local formatter. It is both the default post-processing step
/// and the floor of the enhancement degradation chain.
#[derive(Debug, Clone, Copy, Default)]
pub struct DefaultPacingPolicy;

impl PacingPolicy for DefaultPacingPolicy {
    fn apply(&self, text: &str, tone: Tone, style: NarrationStyle) -> String {
        // Ellipsis runs after sentence punctuation slow the voice down
        let mut text = text
            .replace(". ", ". ... ")
            .replace("! ", "! ... ")
            .replace("? ", "? ... ");

        if tone == Tone::Suspenseful {
            // Longer holds between sentences
            text = text.replace("...", "......");
        }

        match style {
            NarrationStyle::Narration => {
                let lowered = text.to_lowercase();
                if !["once", "there", "in"].iter().any(|p| lowered.starts_with(p)) {
                    text = format!("Once upon a time... {text}");
                }
            }
            NarrationStyle::Animated => {
                text = text.replace('.', "!");
            }
            NarrationStyle::Neutral => {}
        }

        text.trim().to_string()
    }
}
