//! End-to-end resolution against in-memory and on-disk voices

use rstest::rstest;
use std::fs;
use vocalias_core::{
    AliasOracle, AliasSet, CachedOracle, DictionaryLoader, Ending, G2p, Resolution, ResolvedPhoneme, Resolver,
    ResolverConfig, Syllable, VoiceBank,
};

fn resolver(aliases: &[&str]) -> Resolver<AliasSet> {
    Resolver::new(aliases.iter().copied().collect())
}

#[test_log::test]
fn test_starting_vowel_single_sample() {
    let mut resolver = resolver(&["ah"]);
    let resolution = resolver.resolve_syllable(&Syllable::new(&[], "ah", 60));
    assert_eq!(resolution, Resolution::Emit(vec![ResolvedPhoneme::new("ah", 60)]));
}

#[test_log::test]
fn test_vowel_hiatus_uses_vowel_tone() {
    let mut resolver = resolver(&["iy ah"]);
    let syllable = Syllable::new(&[], "ah", 60).after("iy").with_vowel_tone(67);
    let resolution = resolver.resolve_syllable(&syllable);
    assert_eq!(resolution, Resolution::Emit(vec![ResolvedPhoneme::new("iy ah", 67)]));
}

#[test_log::test]
fn test_split_consonant_vowel_with_bare_lead_in() {
    let mut resolver = resolver(&["k", "k ae"]);
    let syllable = Syllable::new(&["k"], "ae", 60).with_vowel_tone(62);
    let resolution = resolver.resolve_syllable(&syllable);
    assert_eq!(
        resolution.phonemes(),
        [ResolvedPhoneme::new("k", 60), ResolvedPhoneme::new("k ae", 62)]
    );
}

#[rstest]
#[case(&["kae"], "kae")]
#[case(&["- kae", "k"], "- kae")]
#[case(&["kae", "k"], "kae")]
fn test_combined_consonant_vowel_is_single_phoneme(#[case] voice: &[&str], #[case] expected: &str) {
    let mut resolver = resolver(voice);
    let resolution = resolver.resolve_syllable(&Syllable::new(&["k"], "ae", 60));
    assert_eq!(resolution.aliases(), vec![expected]);
}

#[test_log::test]
fn test_phrase_in_playback_order() {
    let mut resolver = resolver(&["- s", "t ah", "ah p", "p iy", "iy -"]);
    let first = resolver.resolve_syllable(&Syllable::new(&["s", "t"], "ah", 60));
    let second = resolver.resolve_syllable(&Syllable::new(&["p"], "iy", 60).after("ah"));
    let ending = resolver.resolve_ending(&Ending::new("iy", &[], 60));

    let aliases: Vec<&str> = first
        .phonemes()
        .iter()
        .chain(second.phonemes())
        .chain(&ending)
        .map(|p| p.alias.as_str())
        .collect();
    assert_eq!(aliases, vec!["- s", "t ah", "ah p", "p iy", "iy -"]);
}

#[test]
fn test_ending_cluster_keeps_every_consonant() {
    let mut resolver = resolver(&[]);
    let tail = resolver.resolve_ending(&Ending::new("ae", &["n", "t", "s"], 60));
    let aliases: Vec<&str> = tail.iter().map(|p| p.alias.as_str()).collect();
    assert_eq!(aliases, vec!["ae n", "t", "s"]);
}

#[test]
fn test_transition_lengths_follow_configuration() {
    let config = ResolverConfig {
        base_transition_ms: 50.0,
        ..ResolverConfig::default()
    };
    let resolver = Resolver::with_config(AliasSet::new(), config).expect("valid config");
    assert!(resolver.transition_length("ah dx") < resolver.transition_length("ah s"));
    assert!((resolver.duration_estimator().transition_length_ms("ah") - 50.0).abs() < f64::EPSILON);
}

#[test]
fn test_cached_oracle_answers_like_inner() {
    let voice: AliasSet = ["k", "k ae"].into_iter().collect();
    let cached = CachedOracle::new(voice);
    let mut resolver = Resolver::new(&cached);
    let resolution = resolver.resolve_syllable(&Syllable::new(&["k"], "ae", 60));
    assert_eq!(resolution.aliases(), vec!["k", "k ae"]);
    assert!(cached.cached_len() > 0);
    assert!(cached.exists("k ae", 60));
}

#[test_log::test]
fn test_voice_bank_from_directory() {
    let dir = tempfile::tempdir().expect("tempdir");
    let sub = dir.path().join("normal");
    fs::create_dir_all(&sub).expect("create subdir");
    fs::write(
        sub.join("oto.ini"),
        "k_ae.wav=k ae,0,50,-80,20,10\nka.wav=kae_C4,0,50,-80,20,10\n",
    )
    .expect("write oto");
    fs::write(dir.path().join("prefix.map"), "C4\t\t_C4\n").expect("write prefix map");

    let bank = VoiceBank::load(dir.path()).expect("bank loads");
    assert_eq!(bank.len(), 2);
    assert!(bank.exists("kae", 60));
    assert!(!bank.exists("kae", 62));

    let mut resolver = Resolver::new(bank);
    let at_c4 = resolver.resolve_syllable(&Syllable::new(&["k"], "ae", 60));
    assert_eq!(at_c4.aliases(), vec!["kae"]);
    let at_d4 = resolver.resolve_syllable(&Syllable::new(&["k"], "ae", 62));
    assert_eq!(at_d4.aliases(), vec!["k ae"]);
}

#[test]
fn test_missing_voice_bank_is_an_error() {
    let dir = tempfile::tempdir().expect("tempdir");
    let err = VoiceBank::load(&dir.path().join("missing")).unwrap_err();
    assert_eq!(err.category(), "voice_bank");
}

fn loader(plugin_dir: &std::path::Path) -> DictionaryLoader {
    DictionaryLoader::new(ResolverConfig {
        plugin_dir: Some(plugin_dir.to_path_buf()),
        ..ResolverConfig::default()
    })
}

#[test_log::test]
fn test_dictionary_chain_precedence() {
    let plugin = tempfile::tempdir().expect("tempdir");
    let voice = tempfile::tempdir().expect("tempdir");
    fs::write(
        voice.path().join("vocalias_dictionary.toml"),
        "[[entries]]\ngrapheme = \"teto\"\nphonemes = [\"t\", \"eh\", \"t\", \"ow\"]\n",
    )
    .expect("write override");

    let chain = loader(plugin.path()).load(Some(voice.path())).expect("chain loads");
    assert_eq!(chain.len(), 3);
    assert!(plugin.path().join("vocalias_dictionary.toml").is_file());

    let words = |w: &str| chain.query(w).map(|p| p.join(" "));
    assert_eq!(words("teto").as_deref(), Some("t eh t ow"));
    assert_eq!(words("kasane").as_deref(), Some("k aa s aa n eh"));
    assert_eq!(words("dog").as_deref(), Some("d aa g"));
}

#[test_log::test]
fn test_malformed_override_is_skipped() {
    let plugin = tempfile::tempdir().expect("tempdir");
    let voice = tempfile::tempdir().expect("tempdir");
    fs::write(voice.path().join("vocalias_dictionary.toml"), "[[entries]\nbroken").expect("write override");

    let chain = loader(plugin.path()).load(Some(voice.path())).expect("chain loads");
    assert_eq!(chain.len(), 2);
    assert_eq!(chain.query("teto").map(|p| p.join(" ")).as_deref(), Some("t eh dx ow"));
}

#[test]
fn test_existing_base_dictionary_is_kept() {
    let plugin = tempfile::tempdir().expect("tempdir");
    let base = plugin.path().join("vocalias_dictionary.toml");
    fs::write(&base, "[[entries]]\ngrapheme = \"la\"\nphonemes = [\"l\", \"aa\"]\n").expect("write base");

    let chain = loader(plugin.path()).load(None).expect("chain loads");
    assert_eq!(chain.query("la").map(|p| p.join(" ")).as_deref(), Some("l aa"));
    assert_eq!(chain.query("teto").map(|p| p.join(" ")).as_deref(), Some("t eh t aa"));
}
