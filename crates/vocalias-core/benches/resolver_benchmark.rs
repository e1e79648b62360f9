use criterion::{black_box, criterion_group, criterion_main, BenchmarkId, Criterion};
use vocalias_core::{
    AliasNormalizer, AliasSet, CachedOracle, DurationEstimator, Ending, MissingTiers, Resolver, ResolverConfig,
    Syllable,
};

fn sample_voice() -> AliasSet {
    let mut voice = AliasSet::new();
    for v in ["aa", "ae", "ah", "eh", "ih", "iy", "uw"] {
        voice.insert(v);
        voice.insert(format!("- {v}"));
        voice.insert(format!("{v} -"));
        for c in ["k", "s", "t", "r", "n"] {
            voice.insert(format!("{c} {v}"));
            voice.insert(format!("{v} {c}"));
        }
    }
    voice
}

fn bench_resolve_syllable(c: &mut Criterion) {
    let mut group = c.benchmark_group("resolve_syllable");

    let cases = vec![
        ("starting_vowel", Syllable::new(&[], "ah", 60)),
        ("hiatus", Syllable::new(&[], "ah", 60).after("iy")),
        ("single_consonant", Syllable::new(&["k"], "ae", 60)),
        ("cluster", Syllable::new(&["s", "t", "r"], "ae", 60)),
        ("vcv_cluster", Syllable::new(&["n", "s", "t"], "iy", 60).after("ah")),
    ];

    for (name, syllable) in &cases {
        group.bench_with_input(BenchmarkId::new("in_memory", name), syllable, |b, syllable| {
            let mut resolver = Resolver::new(sample_voice());
            b.iter(|| black_box(resolver.resolve_syllable(black_box(syllable))));
        });
        group.bench_with_input(BenchmarkId::new("cached", name), syllable, |b, syllable| {
            let mut resolver = Resolver::new(CachedOracle::new(sample_voice()));
            b.iter(|| black_box(resolver.resolve_syllable(black_box(syllable))));
        });
    }

    group.finish();
}

fn bench_resolve_ending(c: &mut Criterion) {
    let mut group = c.benchmark_group("resolve_ending");
    let mut resolver = Resolver::new(sample_voice());

    for cc in [&["k"][..], &["n", "t"], &["n", "t", "s"]] {
        let ending = Ending::new("ae", cc, 60);
        group.bench_with_input(BenchmarkId::from_parameter(cc.len()), &ending, |b, ending| {
            b.iter(|| black_box(resolver.resolve_ending(black_box(ending))));
        });
    }

    group.finish();
}

fn bench_normalizer(c: &mut Criterion) {
    let mut group = c.benchmark_group("alias_normalizer");
    let aliases = ["k ae", "- str ae", "ay w", "ah k -", "dx ax", "aa ng -"];

    for tiers in [MissingTiers::NONE, MissingTiers::ALL] {
        let normalizer = AliasNormalizer::new(tiers);
        let label = if tiers.any() { "all_tiers" } else { "no_tiers" };
        group.bench_function(label, |b| {
            b.iter(|| {
                for alias in &aliases {
                    black_box(normalizer.validate(black_box(alias)));
                }
            });
        });
    }

    group.finish();
}

fn bench_duration(c: &mut Criterion) {
    let estimator = DurationEstimator::new(&ResolverConfig::default());
    c.bench_function("transition_length", |b| {
        b.iter(|| {
            for alias in ["ah s", "ah dx", "ah ch", "aa r", "ah k", "k -"] {
                black_box(estimator.transition_length(black_box(alias)));
            }
        });
    });
}

criterion_group!(
    benches,
    bench_resolve_syllable,
    bench_resolve_ending,
    bench_normalizer,
    bench_duration
);
criterion_main!(benches);
