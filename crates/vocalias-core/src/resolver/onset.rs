//! Syllable states: phrase starts, hiatus and the medial VCV case.

use super::cascade::Cascade;
use super::cluster::{self, Base};
use super::probe::Probe;
use crate::alias::AliasFormat;
use crate::kana;
use crate::oracle::AliasOracle;
use crate::phonetics::{Inventory, PhoneClass};
use crate::syllable::{Resolution, ResolvedPhoneme, Syllable, Tone};
use crate::tables;

/// Borrowed view of a syllable's onset and nucleus
pub(crate) struct Onset<'s> {
    pub(crate) consonants: Vec<&'s str>,
    pub(crate) vowel: &'s str,
    pub(crate) tone: Tone,
    pub(crate) vowel_tone: Tone,
    pub(crate) current_len: usize,
    pub(crate) previous_count: usize,
    pub(crate) can_extend_previous: bool,
}

impl<'s> Onset<'s> {
    pub(crate) fn new(syllable: &'s Syllable) -> Self {
        let consonants: Vec<&str> = syllable.consonants.iter().map(String::as_str).collect();
        Self {
            current_len: syllable.current_word_consonants.len().min(consonants.len()),
            consonants,
            vowel: &syllable.vowel,
            tone: syllable.tone,
            vowel_tone: syllable.vowel_tone,
            previous_count: syllable.previous_word_consonant_count,
            can_extend_previous: syllable.can_extend_previous,
        }
    }

    pub(crate) fn joined(&self) -> String {
        self.consonants.concat()
    }

    pub(crate) fn last(&self) -> &'s str {
        self.consonants.last().copied().unwrap_or_default()
    }
}

pub(crate) fn starting_vowel<O: AliasOracle + ?Sized>(probe: &Probe<'_, O>, onset: &Onset<'_>) -> Resolution {
    let (v, vt) = (onset.vowel, onset.vowel_tone);
    let alias = Cascade::new("starting vowel")
        .rule("kana", || probe.try_format(AliasFormat::StartingVowel, &kana::to_hiragana(v), vt))
        .rule("romaji", || probe.try_format(AliasFormat::StartingVowel, v, vt))
        .run_or_else(|| v.to_string());
    Resolution::Emit(vec![probe.finalize(&alias, vt)])
}

pub(crate) fn hiatus<O: AliasOracle + ?Sized>(
    probe: &Probe<'_, O>,
    onset: &Onset<'_>,
    previous: &str,
) -> Resolution {
    if onset.can_extend_previous {
        return Resolution::Sustain;
    }
    let (v, vt) = (onset.vowel, onset.vowel_tone);
    let pair = format!("{previous} {v}");
    let single = |alias: String| probe.try_emit(&alias, vt).map(|p| vec![p]);

    Cascade::new("vowel hiatus")
        .rule("direct", || {
            probe.has(&pair, vt).then(|| {
                let alias = probe.format(AliasFormat::DynamicMidHiatus, &pair, vt);
                vec![probe.finalize(&alias, vt)]
            })
        })
        .rule("bridge", || bridge(probe, onset, previous))
        .rule("kana vowel", || single(format!("{previous} {}", kana::to_hiragana(v))))
        .rule("kana pair", || single(kana::to_hiragana(&format!("{previous}{v}"))))
        .rule("bare vowel", || single(v.to_string()))
        .run()
        .map_or(Resolution::Sustain, Resolution::Emit)
}

/// Bridge consonant implied by the previous vowel, emitted on its own and
/// re-attached to the vowel. Only used when either half is registered.
fn bridge<O: AliasOracle + ?Sized>(
    probe: &Probe<'_, O>,
    onset: &Onset<'_>,
    previous: &str,
) -> Option<Vec<ResolvedPhoneme>> {
    let (v, vt, tone) = (onset.vowel, onset.vowel_tone, onset.tone);
    let consonant = tables::hiatus_bridge(previous)?;
    if previous == v {
        return None;
    }
    let leg = probe.try_format(AliasFormat::VowelBridge { previous_vowel: previous }, consonant, tone);
    let fused = kana::to_hiragana(&format!("{consonant}{v}"));
    let split = format!("{consonant} {v}");
    let cv = if probe.has(&fused, vt) {
        Some(fused)
    } else {
        probe.try_format(AliasFormat::DynamicMid, &split, vt)
    };
    if leg.is_none() && cv.is_none() {
        return None;
    }
    let leg = leg.unwrap_or_else(|| format!("{previous} {consonant}"));
    let cv = cv.unwrap_or(split);
    Some(vec![probe.finalize(&leg, tone), probe.finalize(&cv, vt)])
}

/// Consonant lead-in before a phrase-initial CV sample. A bare consonant
/// sample only leads into the split `c v` spelling.
fn lead_in<O: AliasOracle + ?Sized>(
    probe: &Probe<'_, O>,
    consonant: &str,
    tone: Tone,
    allow_bare: bool,
) -> Option<ResolvedPhoneme> {
    if allow_bare {
        probe.try_emit(&probe.format(AliasFormat::ConsonantStart, consonant, tone), tone)
    } else {
        probe
            .try_format(AliasFormat::ConsonantStart, consonant, tone)
            .map(|alias| probe.finalize(&alias, tone))
    }
}

pub(crate) fn single_start<O: AliasOracle + ?Sized>(probe: &Probe<'_, O>, onset: &Onset<'_>) -> Resolution {
    let (c, v, vt, tone) = (onset.last(), onset.vowel, onset.vowel_tone, onset.tone);
    let cv_kana = kana::to_hiragana(&tables::alt_cv(&format!("{c}{v}")));
    let split = format!("{c} {v}");

    let with_lead = |base: String| {
        let allow_bare = base == split;
        let mut out: Vec<_> = lead_in(probe, c, tone, allow_bare).into_iter().collect();
        out.push(probe.finalize(&base, vt));
        out
    };

    let phonemes = Cascade::new("starting consonant")
        .rule("rest kana", || probe.try_emit(&format!("- {cv_kana}"), vt).map(|p| vec![p]))
        .rule("rest pair", || {
            (probe.has(&format!("- {c}{v}"), vt) || probe.has(&format!("- {split}"), vt)).then(|| {
                let alias = probe.format(AliasFormat::DynamicStart, &split, vt);
                vec![probe.finalize(&alias, vt)]
            })
        })
        .rule("kana", || probe.has(&cv_kana, vt).then(|| with_lead(cv_kana.clone())))
        .rule("split", || {
            probe
                .has(&split, vt)
                .then(|| with_lead(probe.format(AliasFormat::DynamicMid, &split, vt)))
        })
        .run_or_else(|| with_lead(probe.format(AliasFormat::DynamicMid, &split, vt)));
    Resolution::Emit(phonemes)
}

pub(crate) fn cluster_start<O: AliasOracle + ?Sized>(probe: &Probe<'_, O>, onset: &Onset<'_>) -> Resolution {
    let (v, vt, tone) = (onset.vowel, onset.vowel_tone, onset.tone);
    let joined = onset.joined();

    let whole = Cascade::new("starting cluster")
        .rule("rest kana", || {
            let alias = format!("- {}", kana::to_hiragana(&format!("{joined}{v}")));
            probe.try_emit(&alias, vt)
        })
        .rule("rest cluster", || {
            let split = format!("- {joined} {v}");
            let fused = format!("- {joined}{v}");
            let guard = cluster::rest_cluster_guard(
                probe.exists(&split, vt),
                probe.exists(&probe.validate(&split), vt),
                probe.exists(&fused, vt),
                probe.exists(&probe.validate(&fused), vt),
                tables::is_cluster_exception(onset.consonants[0]),
            );
            guard.then(|| {
                let alias = probe.format(AliasFormat::DynamicStart, &format!("{joined} {v}"), vt);
                probe.finalize(&alias, vt)
            })
        })
        .run();
    if let Some(phoneme) = whole {
        return Resolution::Emit(vec![phoneme]);
    }

    let base = cluster::find_base(probe, onset);
    let (lead, owned) = cluster::lead_in(probe, onset, base.start);
    let mut phonemes: Vec<_> = lead.into_iter().collect();
    phonemes.extend(cluster::sweep(probe, &onset.consonants, owned, base.start, tone, false));
    phonemes.push(probe.finalize(&base.alias, vt));
    Resolution::Emit(phonemes)
}

/// Transition out of the previous vowel
struct Transition {
    phoneme: ResolvedPhoneme,
    owned: usize,
    into_rest: bool,
}

pub(crate) fn vcv<O: AliasOracle + ?Sized>(
    probe: &Probe<'_, O>,
    onset: &Onset<'_>,
    previous: &str,
    consonant_vowel_fallback: bool,
) -> Resolution {
    if let Some(phoneme) = vcv_compound(probe, onset, previous) {
        return Resolution::Emit(vec![phoneme]);
    }

    let (v, vt, tone) = (onset.vowel, onset.vowel_tone, onset.tone);
    let cc = &onset.consonants;
    let c0 = cc[0];
    let base = cluster::find_base(probe, onset);
    let emit = |alias: String, owned: usize, into_rest: bool| Transition {
        phoneme: probe.finalize(&alias, tone),
        owned,
        into_rest,
    };
    let hit = |alias: String, owned: usize| probe.has(&alias, tone).then(|| emit(alias, owned, false));

    let transition = Cascade::new("vowel consonant")
        .rule("cluster", || {
            cluster_transition_ready(onset, &base)
                .then(|| format!("{previous} {}{}", c0, cc[1]))
                .and_then(|alias| hit(alias, 2))
        })
        .rule("consonant fallback", || {
            let last_cv = format!("{} {v}", onset.last());
            (consonant_vowel_fallback && !probe.has(&last_cv, vt))
                .then(|| emit(format!("{previous} {c0}"), 1, false))
        })
        .rule("kana", || hit(format!("{previous} {}", probe.kana(c0, tone)), 1))
        .rule("plain", || hit(format!("{previous} {c0}"), 1))
        .rule("unlinked", || {
            c0.contains('_')
                .then(|| format!("{previous} {}", c0.replace('_', "")))
                .and_then(|alias| hit(alias, 1))
        })
        .rule("rest", || {
            let rested = [format!("{previous} -"), format!("{previous} R")];
            probe.first(tone, rested).map(|alias| emit(alias, 0, true))
        })
        .run_or_else(|| emit(format!("{previous} {c0}"), 1, false));

    let owned = transition.owned.min(base.start);
    let mut phonemes = vec![transition.phoneme];
    phonemes.extend(cluster::sweep(probe, cc, owned, base.start, tone, transition.into_rest));
    phonemes.push(probe.finalize(&base.alias, vt));
    Resolution::Emit(phonemes)
}

/// Whole-syllable VCV samples spanning the previous vowel and the onset
fn vcv_compound<O: AliasOracle + ?Sized>(
    probe: &Probe<'_, O>,
    onset: &Onset<'_>,
    previous: &str,
) -> Option<ResolvedPhoneme> {
    let (v, vt) = (onset.vowel, onset.vowel_tone);
    let n = onset.consonants.len();
    let c0 = onset.consonants[0];
    let vcv_kana = format!("{previous} {}", probe.kana_cv(&format!("{}{v}", onset.last()), vt));
    let vcv_end = format!("{previous}{c0} {v}");

    let alias = Cascade::new("vcv")
        .rule("liaison", || {
            (n == 1 && onset.previous_count == 0 && onset.current_len == 1 && probe.has(&vcv_kana, vt))
                .then(|| vcv_kana.clone())
        })
        .rule("word end", || {
            (n == 1 && onset.previous_count == 1 && onset.current_len == 0 && probe.has(&vcv_end, vt))
                .then(|| vcv_end.clone())
        })
        .rule("compound", || {
            (n == 1 && !probe.has(&vcv_end, vt) && probe.has(&vcv_kana, vt)).then(|| vcv_kana.clone())
        })
        .rule("cluster compound", || {
            if n < 2 || onset.previous_count != 0 {
                return None;
            }
            let alias = format!("{previous} {}", probe.kana_cv(&format!("{}{v}", onset.joined()), vt));
            probe.has(&alias, vt).then_some(alias)
        })
        .run()?;
    Some(probe.finalize(&alias, vt))
}

/// A `v c1c2` transition only opens a current-word cluster whose base
/// spans every onset consonant
fn cluster_transition_ready(onset: &Onset<'_>, base: &Base) -> bool {
    let cc = &onset.consonants;
    if base.start != 0 || onset.current_len < 2 || tables::is_cluster_exception(cc[0]) {
        return false;
    }
    !Inventory::english().has_class(&format!("{}{}", cc[0], cc[1]), PhoneClass::Affricate)
}
