//! Oracle queries shared by every resolver state.

use crate::alias::AliasFormat;
use crate::kana;
use crate::normalizer::AliasNormalizer;
use crate::oracle::AliasOracle;
use crate::session::MissingTiers;
use crate::syllable::{ResolvedPhoneme, Tone};
use crate::tables;

/// Read-only view of the oracle with the session's normalizer attached
pub(crate) struct Probe<'a, O: ?Sized> {
    oracle: &'a O,
    normalizer: AliasNormalizer<'static>,
}

impl<'a, O: AliasOracle + ?Sized> Probe<'a, O> {
    pub(crate) fn new(oracle: &'a O, tiers: MissingTiers) -> Self {
        Self {
            oracle,
            normalizer: AliasNormalizer::new(tiers),
        }
    }

    pub(crate) fn validate(&self, alias: &str) -> String {
        self.normalizer.validate(alias)
    }

    /// The alias or its normalized form is registered
    pub(crate) fn has(&self, alias: &str, tone: Tone) -> bool {
        self.oracle.exists(alias, tone) || self.oracle.exists(&self.validate(alias), tone)
    }

    /// The exact spelling is registered
    pub(crate) fn exists(&self, alias: &str, tone: Tone) -> bool {
        self.oracle.exists(alias, tone)
    }

    /// First registered candidate
    pub(crate) fn first<I, S>(&self, tone: Tone, candidates: I) -> Option<String>
    where
        I: IntoIterator<Item = S>,
        S: Into<String>,
    {
        candidates
            .into_iter()
            .map(Into::into)
            .find(|candidate| self.has(candidate, tone))
    }

    /// First registered spelling of `alias` in `format`, else `alias` itself
    pub(crate) fn format(&self, format: AliasFormat<'_>, alias: &str, tone: Tone) -> String {
        self.try_format(format, alias, tone)
            .unwrap_or_else(|| alias.to_string())
    }

    /// First registered spelling of `alias` in `format`
    pub(crate) fn try_format(&self, format: AliasFormat<'_>, alias: &str, tone: Tone) -> Option<String> {
        self.first(tone, format.candidates(alias))
    }

    /// Hiragana spelling of `romaji`; unregistered spellings get the
    /// katakana `ヴ` and a rest marker for `q`
    pub(crate) fn kana(&self, romaji: &str, tone: Tone) -> String {
        let hiragana = kana::to_hiragana(romaji);
        if self.has(&hiragana, tone) {
            hiragana
        } else {
            kana::unregistered_spelling(&hiragana)
        }
    }

    /// Kana spelling of a fused consonant-vowel string after respelling
    pub(crate) fn kana_cv(&self, cv: &str, tone: Tone) -> String {
        self.kana(&tables::alt_cv(cv), tone)
    }

    /// `vowel kana` probe for sonorant onsets, falling back to the plain or
    /// rest-prefixed kana
    pub(crate) fn sonorant_cv(&self, consonant: &str, cv_kana: &str, tone: Tone) -> Option<String> {
        let vowel = tables::vcv_exception(consonant)?;
        let vcv = format!("{vowel} {cv_kana}");
        if self.exists(&vcv, tone) {
            return Some(vcv);
        }
        let rested = format!("- {cv_kana}");
        if !self.exists(cv_kana, tone) && self.exists(&rested, tone) {
            return Some(rested);
        }
        Some(cv_kana.to_string())
    }

    /// Spelling to hand to the renderer: the alias if registered, else its
    /// normalized form if that is, else the alias unchanged
    pub(crate) fn finalize(&self, alias: &str, tone: Tone) -> ResolvedPhoneme {
        if self.exists(alias, tone) {
            return ResolvedPhoneme::new(alias, tone);
        }
        let validated = self.validate(alias);
        if self.exists(&validated, tone) {
            return ResolvedPhoneme::new(validated, tone);
        }
        ResolvedPhoneme::new(alias, tone)
    }

    /// Finalized phoneme if the alias or its normalized form is registered
    pub(crate) fn try_emit(&self, alias: &str, tone: Tone) -> Option<ResolvedPhoneme> {
        self.has(alias, tone).then(|| self.finalize(alias, tone))
    }
}
