use serde::{Deserialize, Serialize};

/// Narrator voices offered to callers. Each maps to a provider-specific voice
/// identifier; the set is deliberately small and curated.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub enum NarratorVoice {
    Lisa,
    Michael,
    Allison,
    Kate,
}

impl NarratorVoice {
    /// The documented fallback when a requested name is unknown.
    pub const DEFAULT: NarratorVoice = NarratorVoice::Allison;

    /// Resolve a caller-supplied name. Unknown names fall back to the default
    /// narrator rather than failing the job.
    pub fn from_name(name: &str) -> Self {
        match name {
            "Lisa" => NarratorVoice::Lisa,
            "Michael" => NarratorVoice::Michael,
            "Allison" => NarratorVoice::Allison,
            "Kate" => NarratorVoice::Kate,
            _ => Self::DEFAULT,
        }
    }

    pub fn as_str(&self) -> &'static str {
        match self {
            NarratorVoice::Lisa => "Lisa",
            NarratorVoice::Michael => "Michael",
            NarratorVoice::Allison => "Allison",
            NarratorVoice::Kate => "Kate",
        }
    }

    /// AWS Polly voice id backing this narrator.
    pub fn polly_voice_id(&self) -> &'static str {
        match self {
            NarratorVoice::Lisa => "Joanna",
            NarratorVoice::Michael => "Matthew",
            NarratorVoice::Allison => "Salli",
            NarratorVoice::Kate => "Amy",
        }
    }

    /// Check if the mapped voice supports the neural engine
    /// Based on AWS Polly documentation
    pub fn is_neural_compatible(&self) -> bool {
        const NEURAL_VOICES: &[&str] = &[
            // English (US)
            "Joanna", "Matthew", "Ivy", "Kendra", "Kimberly", "Salli", "Joey", "Justin",
            "Kevin", // English (GB)
            "Amy", "Emma", "Brian", "Arthur",
        ];

        NEURAL_VOICES.contains(&self.polly_voice_id())
    }
}

impl Default for NarratorVoice {
    fn default() -> Self {
        Self::DEFAULT
    }
}

impl std::fmt::Display for NarratorVoice {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        write!(f, "{}", self.as_str())
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_known_names_resolve() {
        assert_eq!(NarratorVoice::from_name("Lisa"), NarratorVoice::Lisa);
        assert_eq!(NarratorVoice::from_name("Michael"), NarratorVoice::Michael);
        assert_eq!(NarratorVoice::from_name("Kate"), NarratorVoice::Kate);
    }

    #[test]
    fn test_unknown_name_falls_back_to_default() {
        assert_eq!(NarratorVoice::from_name("Zelda"), NarratorVoice::Allison);
        assert_eq!(NarratorVoice::from_name(""), NarratorVoice::DEFAULT);
    }

    #[test]
    fn test_every_narrator_maps_to_a_neural_voice() {
        for voice in [
            NarratorVoice::Lisa,
            NarratorVoice::Michael,
            NarratorVoice::Allison,
            NarratorVoice::Kate,
        ] {
            assert!(voice.is_neural_compatible(), "{voice} should be neural");
        }
    }
}
