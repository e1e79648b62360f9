//! Consonant clusters: choosing the CV base sample and sweeping the
//! consonants in front of it.

use super::cascade::Cascade;
use super::onset::Onset;
use super::probe::Probe;
use crate::alias::AliasFormat;
use crate::kana;
use crate::oracle::AliasOracle;
use crate::syllable::{ResolvedPhoneme, Tone};
use crate::tables;

/// Sample carrying the nucleus and the index of its first consonant
#[derive(Debug, Clone, PartialEq, Eq)]
pub(crate) struct Base {
    pub(crate) alias: String,
    pub(crate) start: usize,
}

/// Guard for phrase-initial `- CC V` samples. The exception check binds
/// only to the last probe; voices rely on that grouping.
pub(crate) const fn rest_cluster_guard(
    split: bool,
    split_validated: bool,
    fused: bool,
    fused_validated: bool,
    exception: bool,
) -> bool {
    split || split_validated || fused || (fused_validated && !exception)
}

/// Longest registered cluster-vowel sample within the current word, else
/// the last consonant with the vowel
pub(crate) fn find_base<O: AliasOracle + ?Sized>(probe: &Probe<'_, O>, onset: &Onset<'_>) -> Base {
    let cc = &onset.consonants;
    let n = cc.len();
    let (v, vt) = (onset.vowel, onset.vowel_tone);

    if onset.current_len >= 2 {
        for start in n - onset.current_len..n - 1 {
            if tables::is_cluster_exception(cc[start]) {
                continue;
            }
            let suffix = cc[start..].concat();
            let fused = kana::to_hiragana(&tables::alt_cv(&format!("{suffix}{v}")));
            let alias = if probe.has(&fused, vt) {
                Some(fused)
            } else {
                probe.try_format(AliasFormat::DynamicMid, &format!("{suffix} {v}"), vt)
            };
            if let Some(alias) = alias {
                return Base { alias, start };
            }
        }
    }

    Base {
        alias: single_base(probe, onset),
        start: n.saturating_sub(1),
    }
}

fn single_base<O: AliasOracle + ?Sized>(probe: &Probe<'_, O>, onset: &Onset<'_>) -> String {
    let (c, v, vt) = (onset.last(), onset.vowel, onset.vowel_tone);
    let cv_kana = probe.kana_cv(&format!("{c}{v}"), vt);
    let split = format!("{c} {v}");

    Cascade::new("consonant vowel")
        .rule("sonorant", || {
            probe
                .sonorant_cv(c, &cv_kana, onset.tone)
                .filter(|alias| probe.has(alias, vt))
        })
        .rule("kana", || probe.has(&cv_kana, vt).then(|| cv_kana.clone()))
        .rule("pair", || probe.try_format(AliasFormat::DynamicMid, &split, vt))
        .run_or_else(|| probe.format(AliasFormat::DynamicMid, &split, vt))
}

/// Phrase-initial lead-in in front of a base starting at `base_start`, and
/// how many consonants it covers
pub(crate) fn lead_in<O: AliasOracle + ?Sized>(
    probe: &Probe<'_, O>,
    onset: &Onset<'_>,
    base_start: usize,
) -> (Option<ResolvedPhoneme>, usize) {
    let cc = &onset.consonants;
    let tone = onset.tone;
    let c0 = cc[0];

    if base_start == 0 {
        let alias = probe.format(AliasFormat::ConsonantStart, c0, tone);
        return (probe.try_emit(&alias, tone), 0);
    }
    if base_start >= 2 && !tables::is_cluster_exception(c0) {
        let joined = cc[..base_start].concat();
        if let Some(alias) = probe.try_format(AliasFormat::ConsonantStart, &joined, tone) {
            return (Some(probe.finalize(&alias, tone)), base_start);
        }
    }
    let literal = format!("- {}", c0.replace('_', ""));
    (Some(probe.finalize(&literal, tone)), 1)
}

/// Emit every consonant in `from..stop` left to right, as pairs where a
/// pair sample exists and as single bridging samples otherwise
pub(crate) fn sweep<O: AliasOracle + ?Sized>(
    probe: &Probe<'_, O>,
    cc: &[&str],
    from: usize,
    stop: usize,
    tone: Tone,
    after_rest: bool,
) -> Vec<ResolvedPhoneme> {
    let mut phonemes = Vec::new();
    let mut i = from;

    while i < stop {
        let c = cc[i];
        if i + 1 < stop {
            let next = cc[i + 1];
            if let Some(alias) = probe.first(tone, [format!("{c} {next}"), format!("{c}{next}")]) {
                phonemes.push(probe.finalize(&alias, tone));
                i += 2;
                continue;
            }
        } else if let Some(next) = cc.get(i + 1) {
            if let Some(phoneme) = probe.try_emit(&format!("{c} {next}"), tone) {
                phonemes.push(phoneme);
                i += 1;
                continue;
            }
        }

        let single = if after_rest && i == from {
            probe.try_format(AliasFormat::ConsonantStart, c, tone)
        } else {
            None
        };
        let single = single
            .or_else(|| probe.try_format(AliasFormat::ConsonantTail, c, tone))
            .unwrap_or_else(|| c.to_string());
        phonemes.push(probe.finalize(&single, tone));
        i += 1;
    }

    phonemes
}
