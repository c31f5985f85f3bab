use std::io::{self, Write};
use std::path::Path;

use wordgraph_core::dict::build_dictionary;
use wordgraph_core::search::WordSearch;

use super::open_dict;

pub fn compile(name: &str, letters: &str, input: &str, output: &str) {
    eprintln!("Compiling {input} with letters from {letters}...");
    let report = die!(
        build_dictionary(
            Path::new(letters),
            Path::new(input),
            Path::new(output),
            name
        ),
        "Error compiling dictionary: {}"
    );

    println!("{}", report.header);
    println!(
        "compression ratio: {:.2}%",
        report.header.compression_ratio()
    );
    eprintln!(
        "Wrote {output} ({} bytes), load time {:.3} s, compression time {:.3} s, max depth {}",
        report.file_size,
        report.load_time.as_secs_f64(),
        report.build_time.as_secs_f64(),
        report.max_depth,
    );
}

pub fn info(file: &str) {
    let dawg = open_dict(file);
    println!("{}", dawg.header());
}

pub fn list(file: &str) {
    let dawg = open_dict(file);
    let alphabet = dawg.alphabet();
    let stdout = io::stdout();
    let mut out = stdout.lock();
    for word in dawg.words() {
        die!(
            writeln!(out, "{}", alphabet.convert_to_display(&word)),
            "Error writing output: {}"
        );
    }
}

pub fn hex(file: &str) {
    let dawg = open_dict(file);
    let stdout = io::stdout();
    die!(dawg.hex_dump(&mut stdout.lock()), "Error writing output: {}");
}

pub fn lookup(file: &str, word: &str) {
    let dawg = open_dict(file);
    let word = die!(
        dawg.alphabet().convert_from_input(word),
        "Error: invalid word: {}"
    );
    if dawg.search_word(&word) {
        println!("{word}: found");
    } else {
        println!("{word}: not found");
    }
}
