//! Phrase-final consonant tails.

use super::cascade::Cascade;
use super::probe::Probe;
use crate::alias::AliasFormat;
use crate::oracle::AliasOracle;
use crate::syllable::{ResolvedPhoneme, Tone};
use crate::tables;

pub(crate) fn resolve<O: AliasOracle + ?Sized>(
    probe: &Probe<'_, O>,
    vowel: &str,
    cc: &[&str],
    tone: Tone,
) -> Vec<ResolvedPhoneme> {
    match cc {
        [] => ending_vowel(probe, vowel, tone),
        [c] => ending_single(probe, vowel, c, tone),
        _ => ending_cluster(probe, vowel, cc, tone),
    }
}

fn ending_vowel<O: AliasOracle + ?Sized>(probe: &Probe<'_, O>, vowel: &str, tone: Tone) -> Vec<ResolvedPhoneme> {
    let registered = [format!("{vowel} -"), format!("{vowel} R"), format!("{vowel}-")]
        .iter()
        .any(|alias| probe.has(alias, tone));
    if !registered {
        return Vec::new();
    }
    let alias = probe.format(AliasFormat::RestEnding, vowel, tone);
    vec![probe.finalize(&alias, tone)]
}

fn ending_single<O: AliasOracle + ?Sized>(
    probe: &Probe<'_, O>,
    vowel: &str,
    consonant: &str,
    tone: Tone,
) -> Vec<ResolvedPhoneme> {
    if tables::is_romaji_vowel(consonant) {
        return Vec::new();
    }
    if probe.has(&format!("{vowel} {consonant}-"), tone) || probe.has(&format!("{vowel}{consonant} -"), tone) {
        let alias = probe.format(AliasFormat::DynamicEnd, &format!("{vowel} {consonant}"), tone);
        return vec![probe.finalize(&alias, tone)];
    }
    let mut phonemes = vec![probe.finalize(&format!("{vowel} {consonant}"), tone)];
    phonemes.extend(rest_tail(probe, consonant, tone));
    phonemes
}

fn ending_cluster<O: AliasOracle + ?Sized>(
    probe: &Probe<'_, O>,
    vowel: &str,
    cc: &[&str],
    tone: Tone,
) -> Vec<ResolvedPhoneme> {
    let n = cc.len();
    let (c0, c1) = (cc[0], cc[1]);

    let (mut phonemes, owned) = if tables::is_romaji_vowel(c0) {
        (Vec::new(), 1)
    } else {
        Cascade::new("ending cluster")
            .rule("rest compound", || {
                if n != 2 || tables::is_cluster_exception(c0) {
                    return None;
                }
                let alias = probe.first(tone, [format!("{vowel} {c0}{c1}-"), format!("{vowel}{c0} {c1} -")])?;
                Some((vec![probe.finalize(&alias, tone)], 2))
            })
            .rule("compound", || {
                let mut out = vec![probe.try_emit(&format!("{vowel} {c0}{c1}"), tone)?];
                if n == 2 {
                    out.extend(rest_tail(probe, c1, tone));
                }
                Some((out, 2))
            })
            .run_or_else(|| (vec![probe.finalize(&format!("{vowel} {c0}"), tone)], 1))
    };

    phonemes.extend(sweep(probe, cc, owned, tone));
    phonemes
}

/// Rest-tagged consonant after a vowel-consonant sample, if registered
fn rest_tail<O: AliasOracle + ?Sized>(probe: &Probe<'_, O>, consonant: &str, tone: Tone) -> Option<ResolvedPhoneme> {
    probe
        .try_format(AliasFormat::RestEnding, consonant, tone)
        .map(|alias| probe.finalize(&alias, tone))
}

fn tail_single<O: AliasOracle + ?Sized>(probe: &Probe<'_, O>, consonant: &str, tone: Tone) -> ResolvedPhoneme {
    probe.finalize(&probe.format(AliasFormat::ConsonantTail, consonant, tone), tone)
}

fn rest_single<O: AliasOracle + ?Sized>(probe: &Probe<'_, O>, consonant: &str, tone: Tone) -> ResolvedPhoneme {
    probe.finalize(&probe.format(AliasFormat::ConsonantRest, consonant, tone), tone)
}

/// Remaining consonants after the head. Without a pair sample the final
/// two are emitted as a tail and a rest single.
fn sweep<O: AliasOracle + ?Sized>(
    probe: &Probe<'_, O>,
    cc: &[&str],
    from: usize,
    tone: Tone,
) -> Vec<ResolvedPhoneme> {
    let n = cc.len();
    let mut phonemes = Vec::new();
    let mut i = from;

    while i < n {
        let c = cc[i];
        if i + 1 == n {
            phonemes.push(rest_single(probe, c, tone));
            break;
        }

        let next = cc[i + 1];
        let pair = probe.first(tone, [format!("{c} {next}"), format!("{c}{next}")]);
        if i + 2 == n {
            if let Some(phoneme) = probe.try_emit(&format!("{c} {next}-"), tone) {
                phonemes.push(phoneme);
            } else if let Some(alias) = pair {
                phonemes.push(probe.finalize(&alias, tone));
                if let Some(alias) = probe.try_format(AliasFormat::ConsonantRest, next, tone) {
                    phonemes.push(probe.finalize(&alias, tone));
                }
            } else {
                phonemes.push(tail_single(probe, c, tone));
                phonemes.push(rest_single(probe, next, tone));
            }
            break;
        }

        if let Some(alias) = pair {
            phonemes.push(probe.finalize(&alias, tone));
            i += 2;
        } else {
            phonemes.push(tail_single(probe, c, tone));
            i += 1;
        }
    }

    phonemes
}
