use criterion::{criterion_group, criterion_main, BenchmarkId, Criterion};
use wordgraph_core::alphabet::{Alphabet, LetterDef};
use wordgraph_core::dict::{Dawg, DawgBuilder};
use wordgraph_core::regexp::{self, RegexpOptions};
use wordgraph_core::search::WordSearch;

const VOWELS: &str = "AEIOUY";

fn bench_alphabet() -> Alphabet {
    let mut defs: Vec<LetterDef> = ('A'..='Z')
        .map(|c| {
            let vowel = VOWELS.contains(c);
            LetterDef::new(c, 1, 2, vowel, !vowel || c == 'Y')
        })
        .collect();
    defs.push(LetterDef::new('?', 0, 2, true, true));
    Alphabet::new(defs).expect("valid alphabet")
}

/// Deterministic pseudo-words: every combination of a few syllables.
fn bench_words() -> Vec<String> {
    let syllables = [
        "BA", "CE", "DI", "FO", "GU", "LA", "MER", "NO", "PRE", "RA", "SI", "TE", "TION", "VE",
    ];
    let mut words = Vec::new();
    for a in syllables {
        for b in syllables {
            words.push(format!("{a}{b}"));
            for c in syllables {
                words.push(format!("{a}{b}{c}"));
            }
        }
    }
    words.sort();
    words.dedup();
    words
}

fn bench_dict() -> Dawg {
    DawgBuilder::new(bench_alphabet())
        .compile("bench", bench_words())
        .expect("valid word list")
}

fn bench_build(c: &mut Criterion) {
    let words = bench_words();
    c.bench_function("dict/compile", |b| {
        b.iter(|| {
            DawgBuilder::new(bench_alphabet())
                .compile("bench", &words)
                .expect("valid word list")
        });
    });
}

static RACKS: &[(&str, &str)] = &[("short", "ABE"), ("medium", "RATIONS"), ("joker", "RATION?")];

fn bench_plus1(c: &mut Criterion) {
    let dict = bench_dict();
    let mut group = c.benchmark_group("search/plus1");
    for &(label, rack) in RACKS {
        group.bench_with_input(BenchmarkId::new(label, rack.len()), &rack, |b, &rack| {
            b.iter(|| dict.search_plus1(rack, true, 0));
        });
    }
    group.finish();
}

static PATTERNS: &[(&str, &str)] = &[
    ("literal", "BACETION"),
    ("wildcard", "BA.*"),
    ("classes", ":c::v:[^AEIOU]+TION"),
    ("optional", "(PRE)?RA(TION)?"),
];

fn bench_regexp(c: &mut Criterion) {
    let dict = bench_dict();
    let options = RegexpOptions {
        min_length: 1,
        max_length: 15,
        max_results: 0,
        user_list_1: String::new(),
        user_list_2: String::new(),
    };
    let mut group = c.benchmark_group("search/regexp");
    for &(label, pattern) in PATTERNS {
        group.bench_with_input(
            BenchmarkId::new(label, pattern.len()),
            &pattern,
            |b, &pattern| {
                b.iter(|| regexp::search(&dict, pattern, &options));
            },
        );
    }
    group.finish();

    c.bench_function("regexp/compile", |b| {
        b.iter(|| regexp::compile(":c::v:[^AEIOU]+TION", dict.alphabet(), &options));
    });
}

fn bench_cross(c: &mut Criterion) {
    let dict = bench_dict();
    c.bench_function("search/cross", |b| {
        b.iter(|| dict.search_cross("..R..ION", 0));
    });
}

criterion_group!(benches, bench_build, bench_plus1, bench_regexp, bench_cross);
criterion_main!(benches);
