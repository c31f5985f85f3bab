use std::borrow::Cow;

use wordgraph_core::dict::Dawg;
use wordgraph_core::regexp::RegexpOptions;
use wordgraph_core::search::WordSearch;
use wordgraph_core::settings::settings;

use super::open_dict;

fn input<'a>(dawg: &Dawg, text: &'a str) -> Cow<'a, str> {
    die!(
        dawg.alphabet().convert_from_input(text),
        "Error: invalid input '{text}': {}"
    )
}

fn print_words(dawg: &Dawg, words: &[String]) {
    for word in words {
        println!("{}", dawg.alphabet().convert_to_display(word));
    }
}

pub fn plus1(file: &str, rack: &str, joker: bool, limit: Option<usize>) {
    let dawg = open_dict(file);
    let rack = input(&dawg, rack);
    let limit = limit.unwrap_or(settings().search.plus1_max_results);
    let results = die!(dawg.search_plus1(&rack, joker, limit), "Error: {}");
    for (added, words) in &results {
        match added {
            None => println!("[]"),
            Some(ch) => println!("[+{}]", dawg.alphabet().convert_to_display(&ch.to_string())),
        }
        print_words(&dawg, words);
    }
}

pub fn racc(file: &str, word: &str, limit: Option<usize>) {
    let dawg = open_dict(file);
    let word = input(&dawg, word);
    let limit = limit.unwrap_or(settings().search.racc_max_results);
    print_words(&dawg, &dawg.search_racc(&word, limit));
}

pub fn benj(file: &str, word: &str, limit: Option<usize>) {
    let dawg = open_dict(file);
    let word = input(&dawg, word);
    let limit = limit.unwrap_or(settings().search.benj_max_results);
    print_words(&dawg, &dawg.search_benj(&word, limit));
}

pub fn cross(file: &str, mask: &str, limit: Option<usize>) {
    let dawg = open_dict(file);
    let limit = limit.unwrap_or(settings().search.cross_max_results);
    print_words(&dawg, &dawg.search_cross(mask, limit));
}

pub fn regexp(
    file: &str,
    pattern: &str,
    min: Option<usize>,
    max: Option<usize>,
    limit: Option<usize>,
) {
    let dawg = open_dict(file);
    let defaults = RegexpOptions::default();
    let options = RegexpOptions {
        min_length: min.unwrap_or(defaults.min_length),
        max_length: max.unwrap_or(defaults.max_length),
        max_results: limit.unwrap_or(defaults.max_results),
        ..defaults
    };
    let pattern = dawg.alphabet().convert_pattern_from_input(pattern);
    let matches = die!(dawg.search_regexp(&pattern, &options), "Error: {}");
    print_words(&dawg, &matches.words);
    eprintln!(
        "{} match(es){}",
        matches.words.len(),
        if matches.truncated { " (truncated)" } else { "" }
    );
}
