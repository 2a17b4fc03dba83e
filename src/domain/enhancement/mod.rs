pub mod formatter;
pub mod service;

pub use formatter::{DefaultPacingPolicy, PacingPolicy};
pub use service::EnhancementService;

use serde::{Deserialize, Serialize};

/// Narrative tone requested for the rewrite.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum Tone {
    Neutral,
    Suspenseful,
    Inspiring,
}

impl Tone {
    pub fn as_str(&self) -> &'static str {
        match self {
            Tone::Neutral => "neutral",
            Tone::Suspenseful => "suspenseful",
            Tone::Inspiring => "inspiring",
        }
    }

    /// Wording used in the rewrite prompt.
    pub fn description(&self) -> &'static str {
        match self {
            Tone::Neutral => "calm and balanced",
            Tone::Suspenseful => "tense and gripping",
            Tone::Inspiring => "uplifting and motivating",
        }
    }
}

impl Default for Tone {
    fn default() -> Self {
        Tone::Neutral
    }
}

impl std::fmt::Display for Tone {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        write!(f, "{}", self.as_str())
    }
}

/// Delivery style for the narration.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum NarrationStyle {
    Neutral,
    Narration,
    Animated,
}

impl NarrationStyle {
    pub fn as_str(&self) -> &'static str {
        match self {
            NarrationStyle::Neutral => "neutral",
            NarrationStyle::Narration => "narration",
            NarrationStyle::Animated => "animated",
        }
    }

    /// Wording used in the rewrite prompt.
    pub fn description(&self) -> &'static str {
        match self {
            NarrationStyle::Neutral => "clear and balanced",
            NarrationStyle::Narration => "storytelling with appropriate pacing",
            NarrationStyle::Animated => "dynamic and expressive",
        }
    }
}

impl Default for NarrationStyle {
    fn default() -> Self {
        NarrationStyle::Neutral
    }
}

impl std::fmt::Display for NarrationStyle {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        write!(f, "{}", self.as_str())
    }
}
