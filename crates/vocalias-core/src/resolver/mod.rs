//! Syllable and ending resolution against a voice.
//!
//! A [`Resolver`] owns the oracle for one voice together with the sticky
//! missing-tier flags detected for it. Each syllable is classified into a
//! [`SyllableState`] and handed to that state's cascade; every cascade ends
//! in the literal spelling, so resolution never fails.

mod cascade;
mod cluster;
mod ending;
mod onset;
mod probe;

use crate::config::ResolverConfig;
use crate::duration::DurationEstimator;
use crate::error::VocaliasResult;
use crate::normalizer::AliasNormalizer;
use crate::oracle::AliasOracle;
use crate::session::{MissingTiers, Session};
use crate::syllable::{Ending, Resolution, ResolvedPhoneme, Syllable, Tone};
use crate::tokens::TokenNormalizer;
use onset::Onset;
use probe::Probe;
use std::time::Duration;
use tracing::debug;

/// Dispatch class of a syllable, tested in declaration order
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum SyllableState {
    /// No previous vowel, no onset
    StartingVowel,
    /// Previous vowel, no onset
    VowelHiatus,
    /// No previous vowel, one onset consonant
    StartingSingleConsonant,
    /// No previous vowel, two or more onset consonants
    StartingCluster,
    /// Previous vowel and at least one onset consonant
    VowelConsonantVowel,
}

impl SyllableState {
    /// Classify a syllable. A previous vowel that is empty or a rest token
    /// counts as absent.
    #[must_use]
    pub fn classify(syllable: &Syllable, config: &ResolverConfig) -> Self {
        let has_previous = previous_vowel(syllable, config).is_some();
        match (has_previous, syllable.consonants.len()) {
            (false, 0) => Self::StartingVowel,
            (true, 0) => Self::VowelHiatus,
            (false, 1) => Self::StartingSingleConsonant,
            (false, _) => Self::StartingCluster,
            (true, _) => Self::VowelConsonantVowel,
        }
    }
}

fn previous_vowel<'s>(syllable: &'s Syllable, config: &ResolverConfig) -> Option<&'s str> {
    syllable
        .previous_vowel
        .as_deref()
        .filter(|v| !v.is_empty() && !config.is_rest(v))
}

/// Alias resolver bound to one voice
#[derive(Debug)]
pub struct Resolver<O> {
    oracle: O,
    session: Session,
    config: ResolverConfig,
}

impl<O: AliasOracle> Resolver<O> {
    /// Resolver with the default configuration
    pub fn new(oracle: O) -> Self {
        Self {
            oracle,
            session: Session::new(),
            config: ResolverConfig::default(),
        }
    }

    /// Resolver with a validated configuration
    ///
    /// # Errors
    ///
    /// Returns a configuration error if `config` fails validation
    pub fn with_config(oracle: O, config: ResolverConfig) -> VocaliasResult<Self> {
        config.validate()?;
        Ok(Self {
            oracle,
            session: Session::new(),
            config,
        })
    }

    /// The voice being resolved against
    pub fn oracle(&self) -> &O {
        &self.oracle
    }

    /// Active configuration
    pub fn config(&self) -> &ResolverConfig {
        &self.config
    }

    /// Missing tiers detected so far
    pub fn tiers(&self) -> MissingTiers {
        self.session.tiers()
    }

    /// Forget detected tiers, e.g. after the voice's samples changed
    pub fn reset_session(&mut self) {
        debug!("Resetting missing tier detection");
        self.session.reset();
    }

    /// Normalizer using the tiers detected so far
    pub fn normalizer(&self) -> AliasNormalizer<'static> {
        AliasNormalizer::new(self.session.tiers())
    }

    /// Normalize one alias with the tiers detected so far
    pub fn validate(&self, alias: &str) -> String {
        self.normalizer().validate(alias)
    }

    /// Resolve one syllable into samples in playback order, or
    /// [`Resolution::Sustain`] when the previous sample carries a hiatus
    pub fn resolve_syllable(&mut self, syllable: &Syllable) -> Resolution {
        let tiers = self.session.detect(&self.oracle, syllable.tone);
        let probe = Probe::new(&self.oracle, tiers);
        let onset = Onset::new(syllable);
        let state = SyllableState::classify(syllable, &self.config);
        debug!(?state, vowel = %syllable.vowel, consonants = ?syllable.consonants, "Resolving syllable");

        match (state, previous_vowel(syllable, &self.config)) {
            (SyllableState::VowelHiatus, Some(previous)) => onset::hiatus(&probe, &onset, previous),
            (SyllableState::VowelConsonantVowel, Some(previous)) => {
                onset::vcv(&probe, &onset, previous, self.config.consonant_vowel_fallback)
            }
            (SyllableState::StartingSingleConsonant, _) => onset::single_start(&probe, &onset),
            (SyllableState::StartingCluster, _) => onset::cluster_start(&probe, &onset),
            _ => onset::starting_vowel(&probe, &onset),
        }
    }

    /// Resolve a phrase-final consonant tail. Empty when nothing needs to
    /// follow the final vowel sample.
    pub fn resolve_ending(&mut self, ending: &Ending) -> Vec<ResolvedPhoneme> {
        let vowel = ending.previous_vowel.as_str();
        if vowel.is_empty() || self.config.is_rest(vowel) {
            return Vec::new();
        }
        let tiers = self.session.detect(&self.oracle, ending.tone);
        let probe = Probe::new(&self.oracle, tiers);
        let consonants: Vec<&str> = ending.consonants.iter().map(String::as_str).collect();
        debug!(vowel, ?consonants, "Resolving ending");
        ending::resolve(&probe, vowel, &consonants, ending.tone)
    }

    /// Rewrite raw phoneme tokens before syllabification
    pub fn normalize_tokens<S: AsRef<str>>(&mut self, tokens: &[S], tone: Tone) -> Vec<String> {
        let tiers = self.session.detect(&self.oracle, tone);
        TokenNormalizer::new(&self.oracle, tiers).normalize(tokens, tone)
    }

    /// Rewrite the tokens of one note. Rest lyrics bypass normalization.
    pub fn normalize_note<S: AsRef<str>>(&mut self, lyric: &str, tokens: &[S], tone: Tone) -> Vec<String> {
        let tiers = self.session.detect(&self.oracle, tone);
        TokenNormalizer::new(&self.oracle, tiers).normalize_note(lyric, tokens, tone, &self.config)
    }

    /// Estimator configured with this resolver's base transition length
    pub fn duration_estimator(&self) -> DurationEstimator<'static> {
        DurationEstimator::new(&self.config)
    }

    /// Crossfade length for a resolved alias
    pub fn transition_length(&self, alias: &str) -> Duration {
        self.duration_estimator().transition_length(alias)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::oracle::AliasSet;
    use rstest::rstest;

    fn voice(aliases: &[&str]) -> Resolver<AliasSet> {
        Resolver::new(aliases.iter().copied().collect())
    }

    #[rstest]
    #[case(Syllable::new(&[], "ah", 60), SyllableState::StartingVowel)]
    #[case(Syllable::new(&[], "ah", 60).after("iy"), SyllableState::VowelHiatus)]
    #[case(Syllable::new(&[], "ah", 60).after("-"), SyllableState::StartingVowel)]
    #[case(Syllable::new(&[], "ah", 60).after(""), SyllableState::StartingVowel)]
    #[case(Syllable::new(&["k"], "ah", 60), SyllableState::StartingSingleConsonant)]
    #[case(Syllable::new(&["s", "k"], "ah", 60).after("R"), SyllableState::StartingCluster)]
    #[case(Syllable::new(&["k"], "ah", 60).after("iy"), SyllableState::VowelConsonantVowel)]
    fn test_classify(#[case] syllable: Syllable, #[case] expected: SyllableState) {
        assert_eq!(SyllableState::classify(&syllable, &ResolverConfig::default()), expected);
    }

    #[test]
    fn test_with_config_validates() {
        let config = ResolverConfig {
            base_transition_ms: -1.0,
            ..ResolverConfig::default()
        };
        assert!(Resolver::with_config(AliasSet::new(), config).is_err());
    }

    #[test]
    fn test_starting_vowel_prefers_tagged_spelling() {
        let mut resolver = voice(&["- ah", "ah"]);
        let resolution = resolver.resolve_syllable(&Syllable::new(&[], "ah", 60));
        assert_eq!(resolution.aliases(), vec!["- ah"]);
    }

    #[test]
    fn test_starting_vowel_literal() {
        let mut resolver = voice(&[]);
        let resolution = resolver.resolve_syllable(&Syllable::new(&[], "ah", 60).with_vowel_tone(62));
        assert_eq!(resolution, Resolution::Emit(vec![ResolvedPhoneme::new("ah", 62)]));
    }

    #[test]
    fn test_hiatus_sustains() {
        let mut resolver = voice(&["iy ah"]);
        let extend = Syllable::new(&[], "ah", 60).after("iy").extendable();
        assert!(resolver.resolve_syllable(&extend).is_sustain());

        let mut empty = voice(&[]);
        let plain = Syllable::new(&[], "ah", 60).after("iy");
        assert!(empty.resolve_syllable(&plain).is_sustain());
    }

    #[test]
    fn test_hiatus_bridge() {
        let mut resolver = voice(&["ay y", "y ah"]);
        let syllable = Syllable::new(&[], "ah", 60).after("ay").with_vowel_tone(64);
        assert_eq!(
            resolver.resolve_syllable(&syllable).phonemes(),
            [ResolvedPhoneme::new("ay y", 60), ResolvedPhoneme::new("y ah", 64)]
        );
    }

    #[test]
    fn test_single_start_rest_pair() {
        let mut resolver = voice(&["- k ae", "k", "k ae"]);
        let resolution = resolver.resolve_syllable(&Syllable::new(&["k"], "ae", 60));
        assert_eq!(resolution.aliases(), vec!["- k ae"]);
    }

    #[test]
    fn test_single_start_lead_in_tone() {
        let mut resolver = voice(&["- k", "k ae"]);
        let syllable = Syllable::new(&["k"], "ae", 60).with_vowel_tone(65);
        assert_eq!(
            resolver.resolve_syllable(&syllable).phonemes(),
            [ResolvedPhoneme::new("- k", 60), ResolvedPhoneme::new("k ae", 65)]
        );
    }

    #[test]
    fn test_cluster_start_whole_sample() {
        let mut resolver = voice(&["- st ae"]);
        let resolution = resolver.resolve_syllable(&Syllable::new(&["s", "t"], "ae", 60));
        assert_eq!(resolution.aliases(), vec!["- st ae"]);
    }

    #[test]
    fn test_cluster_start_lead_in_and_sweep() {
        let mut resolver = voice(&["- s", "t r", "r ae"]);
        let resolution = resolver.resolve_syllable(&Syllable::new(&["s", "t", "r"], "ae", 60));
        assert_eq!(resolution.aliases(), vec!["- s", "t r", "r ae"]);
    }

    #[test]
    fn test_vcv_liaison() {
        let mut resolver = voice(&["a か", "a k"]);
        let syllable = Syllable::new(&["k"], "a", 60).after("a");
        assert_eq!(resolver.resolve_syllable(&syllable).aliases(), vec!["a か"]);
    }

    #[test]
    fn test_vcv_transition_then_base() {
        let mut resolver = voice(&["ah k", "k ae"]);
        let syllable = Syllable::new(&["k"], "ae", 60).after("ah");
        assert_eq!(resolver.resolve_syllable(&syllable).aliases(), vec!["ah k", "k ae"]);
    }

    #[test]
    fn test_vcv_cluster_transition_into_whole_cluster() {
        let mut resolver = voice(&["ah st", "st ae"]);
        let syllable = Syllable::new(&["s", "t"], "ae", 60).after("ah");
        assert_eq!(resolver.resolve_syllable(&syllable).aliases(), vec!["ah st", "st ae"]);
    }

    #[test]
    fn test_vcv_cluster_transition_needs_whole_cluster_base() {
        let mut resolver = voice(&["ah st", "ah s", "t ae"]);
        let syllable = Syllable::new(&["s", "t"], "ae", 60).after("ah");
        assert_eq!(resolver.resolve_syllable(&syllable).aliases(), vec!["ah s", "t ae"]);
    }

    #[test]
    fn test_vcv_rest_boundary() {
        let mut resolver = voice(&["ah -", "- k", "k ae"]);
        let syllable = Syllable::new(&["s", "k"], "ae", 60).after("ah");
        assert_eq!(
            resolver.resolve_syllable(&syllable).aliases(),
            vec!["ah -", "s", "k ae"]
        );
    }

    #[test]
    fn test_consonant_vowel_fallback_mode() {
        let config = ResolverConfig {
            consonant_vowel_fallback: true,
            ..ResolverConfig::default()
        };
        let voice: AliasSet = ["ah -", "kae"].into_iter().collect();
        let mut resolver = Resolver::with_config(voice, config).expect("valid config");
        let syllable = Syllable::new(&["k"], "ae", 60).after("ah");
        assert_eq!(resolver.resolve_syllable(&syllable).aliases(), vec!["ah k", "kae"]);
    }

    #[test]
    fn test_ending_after_rest_is_empty() {
        let mut resolver = voice(&["- k"]);
        assert!(resolver.resolve_ending(&Ending::new("-", &["k"], 60)).is_empty());
    }

    #[test]
    fn test_tiers_persist_across_syllables() {
        let mut resolver = voice(&[]);
        resolver.resolve_syllable(&Syllable::new(&[], "ah", 60));
        assert_eq!(resolver.tiers(), MissingTiers::ALL);
        resolver.reset_session();
        assert_eq!(resolver.tiers(), MissingTiers::NONE);
    }
}
