//! Properties that hold for any syllable against an empty voice

use proptest::prelude::*;
use vocalias_core::{AliasNormalizer, AliasSet, Ending, Inventory, MissingTiers, Resolution, Resolver, Syllable};

const CONSONANTS: &[&str] = &["b", "d", "f", "g", "k", "l", "m", "n", "p", "r", "s", "t"];
const VOWELS: &[&str] = &["aa", "ae", "ah", "eh", "ih", "iy", "uw"];

fn consonant() -> impl Strategy<Value = &'static str> {
    prop::sample::select(CONSONANTS)
}

fn vowel() -> impl Strategy<Value = &'static str> {
    prop::sample::select(VOWELS)
}

/// Consonant symbols named by the resolved aliases
fn consonants_emitted(resolution: &[vocalias_core::ResolvedPhoneme]) -> usize {
    let inventory = Inventory::english();
    resolution
        .iter()
        .flat_map(|p| p.alias.split_whitespace())
        .filter(|token| inventory.is_consonant(token))
        .count()
}

proptest! {
    #[test]
    fn prop_onset_cluster_is_fully_covered(
        cluster in prop::collection::vec(consonant(), 2..5),
        v in vowel(),
        previous in prop::option::of(vowel()),
    ) {
        let mut resolver = Resolver::new(AliasSet::new());
        let mut syllable = Syllable::new(&cluster, v, 60);
        if let Some(previous) = previous {
            syllable = syllable.after(previous);
        }
        let resolution = resolver.resolve_syllable(&syllable);
        prop_assert_eq!(consonants_emitted(resolution.phonemes()), cluster.len());
    }

    #[test]
    fn prop_ending_cluster_is_fully_covered(
        cluster in prop::collection::vec(consonant(), 2..5),
        v in vowel(),
    ) {
        let mut resolver = Resolver::new(AliasSet::new());
        let tail = resolver.resolve_ending(&Ending::new(v, &cluster, 60));
        prop_assert_eq!(consonants_emitted(&tail), cluster.len());
    }

    #[test]
    fn prop_resolution_is_never_empty(
        onset in prop::collection::vec(consonant(), 0..4),
        v in vowel(),
        previous in prop::option::of(vowel()),
    ) {
        let mut resolver = Resolver::new(AliasSet::new());
        let mut syllable = Syllable::new(&onset, v, 60);
        if let Some(previous) = previous {
            syllable = syllable.after(previous);
        }
        match resolver.resolve_syllable(&syllable) {
            Resolution::Sustain => prop_assert!(previous.is_some() && onset.is_empty()),
            Resolution::Emit(phonemes) => {
                prop_assert!(!phonemes.is_empty());
                prop_assert!(phonemes.iter().all(|p| !p.alias.is_empty()));
            }
        }
    }
}

/// Every alias the resolver produces for a grid of syllables
fn resolver_corpus() -> Vec<String> {
    let mut resolver = Resolver::new(AliasSet::new());
    let onsets: [&[&str]; 5] = [&[], &["k"], &["s", "t"], &["s", "t", "r"], &["n", "d"]];
    let mut corpus = Vec::new();
    for v in VOWELS {
        for previous in [None, Some("ah"), Some("iy")] {
            for onset in onsets {
                let mut syllable = Syllable::new(onset, *v, 60);
                if let Some(previous) = previous {
                    syllable = syllable.after(previous);
                }
                corpus.extend(resolver.resolve_syllable(&syllable).aliases().into_iter().map(String::from));
            }
        }
        corpus.extend(
            resolver
                .resolve_ending(&Ending::new(*v, &["n", "t"], 60))
                .into_iter()
                .map(|p| p.alias),
        );
    }
    corpus.sort();
    corpus.dedup();
    corpus
}

#[test_log::test]
fn test_idempotence_report_over_resolver_output() {
    let corpus = resolver_corpus();
    assert!(!corpus.is_empty());

    for tiers in [MissingTiers::NONE, MissingTiers::ALL] {
        let normalizer = AliasNormalizer::new(tiers);
        let violations = normalizer.idempotence_violations(&corpus);
        tracing::info!(?tiers, count = violations.len(), "Idempotence violations");
        for violation in &violations {
            tracing::info!(?violation, "Second pass changed the alias");
            assert_eq!(violation.once, normalizer.validate(&violation.input));
            assert_eq!(violation.twice, normalizer.validate(&violation.once));
            assert_ne!(violation.once, violation.twice);
        }
        let stable = corpus.len() - violations.len();
        assert!(stable > 0);
    }
}
