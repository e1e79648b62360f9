//! Per-note inputs and outputs of the resolver.

use serde::{Deserialize, Serialize};

/// Pitch of a note as a MIDI note number (`C4` = 60)
pub type Tone = i32;

/// One syllable as produced by the upstream segmenter
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct Syllable {
    /// Nucleus of the previous syllable, absent at phrase start
    pub previous_vowel: Option<String>,
    /// Onset consonants, ordered toward the nucleus
    pub consonants: Vec<String>,
    /// Nucleus vowel
    pub vowel: String,
    /// Tone of the note carrying the onset
    pub tone: Tone,
    /// Tone of the note carrying the vowel
    pub vowel_tone: Tone,
    /// Onset consonants that belong to the current word
    pub current_word_consonants: Vec<String>,
    /// Number of onset consonants carried over from the previous word
    pub previous_word_consonant_count: usize,
    /// Whether the previous sample can be lengthened in place over a hiatus
    #[serde(default)]
    pub can_extend_previous: bool,
}

impl Syllable {
    /// Syllable with no previous vowel and no word-boundary information
    #[must_use]
    pub fn new<V: Into<String>>(consonants: &[&str], vowel: V, tone: Tone) -> Self {
        let consonants: Vec<String> = consonants.iter().map(|c| (*c).to_string()).collect();
        Self {
            previous_vowel: None,
            current_word_consonants: consonants.clone(),
            consonants,
            vowel: vowel.into(),
            tone,
            vowel_tone: tone,
            previous_word_consonant_count: 0,
            can_extend_previous: false,
        }
    }

    /// Set the previous syllable's vowel
    #[must_use]
    pub fn after<V: Into<String>>(mut self, previous_vowel: V) -> Self {
        self.previous_vowel = Some(previous_vowel.into());
        self
    }

    /// Set the tone of the vowel note
    #[must_use]
    pub fn with_vowel_tone(mut self, vowel_tone: Tone) -> Self {
        self.vowel_tone = vowel_tone;
        self
    }

    /// Split the onset at a word boundary: the first `count` consonants end
    /// the previous word
    #[must_use]
    pub fn with_previous_word_consonants(mut self, count: usize) -> Self {
        let count = count.min(self.consonants.len());
        self.previous_word_consonant_count = count;
        self.current_word_consonants = self.consonants[count..].to_vec();
        self
    }

    /// Allow the previous sample to sustain through a hiatus
    #[must_use]
    pub fn extendable(mut self) -> Self {
        self.can_extend_previous = true;
        self
    }
}

/// Phrase-final consonant tail after the last vowel
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct Ending {
    /// Nucleus of the final syllable
    pub previous_vowel: String,
    /// Trailing consonants, ordered away from the nucleus
    pub consonants: Vec<String>,
    /// Tone of the final note
    pub tone: Tone,
}

impl Ending {
    /// Create an ending
    #[must_use]
    pub fn new<V: Into<String>>(previous_vowel: V, consonants: &[&str], tone: Tone) -> Self {
        Self {
            previous_vowel: previous_vowel.into(),
            consonants: consonants.iter().map(|c| (*c).to_string()).collect(),
            tone,
        }
    }
}

/// An alias chosen for playback together with its pitch
#[derive(Debug, Clone, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub struct ResolvedPhoneme {
    /// Sample alias
    pub alias: String,
    /// Pitch at which the alias was resolved
    pub tone: Tone,
}

impl ResolvedPhoneme {
    /// Create a resolved phoneme
    #[must_use]
    pub fn new<S: Into<String>>(alias: S, tone: Tone) -> Self {
        Self {
            alias: alias.into(),
            tone,
        }
    }
}

/// Outcome of resolving one syllable
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub enum Resolution {
    /// Samples to play, in playback order
    Emit(Vec<ResolvedPhoneme>),
    /// No new sample: the previous one sustains into this syllable
    Sustain,
}

impl Resolution {
    /// Emitted phonemes, empty for [`Resolution::Sustain`]
    #[must_use]
    pub fn phonemes(&self) -> &[ResolvedPhoneme] {
        match self {
            Self::Emit(phonemes) => phonemes,
            Self::Sustain => &[],
        }
    }

    /// Check whether the previous sample sustains
    #[must_use]
    pub const fn is_sustain(&self) -> bool {
        matches!(self, Self::Sustain)
    }

    /// Emitted aliases in playback order
    #[must_use]
    pub fn aliases(&self) -> Vec<&str> {
        self.phonemes().iter().map(|p| p.alias.as_str()).collect()
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_word_boundary_split() {
        let syllable = Syllable::new(&["s", "t", "r"], "iy", 60).with_previous_word_consonants(1);
        assert_eq!(syllable.previous_word_consonant_count, 1);
        assert_eq!(syllable.current_word_consonants, vec!["t", "r"]);
    }

    #[test]
    fn test_resolution_accessors() {
        let emit = Resolution::Emit(vec![ResolvedPhoneme::new("k", 60), ResolvedPhoneme::new("k ae", 62)]);
        assert_eq!(emit.aliases(), vec!["k", "k ae"]);
        assert!(!emit.is_sustain());
        assert!(Resolution::Sustain.phonemes().is_empty());
    }

    #[test]
    fn test_syllable_serde() {
        let syllable = Syllable::new(&["k"], "ae", 60).after("iy");
        let json = serde_json::to_string(&syllable).unwrap();
        let back: Syllable = serde_json::from_str(&json).unwrap();
        assert_eq!(back, syllable);
    }
}
