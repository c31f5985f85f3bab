use std::fs;

pub fn settings_export() {
    print!("{}", wordgraph_core::settings::default_toml());
}

pub fn settings_validate(file: &str) {
    let content = die!(fs::read_to_string(file), "Error reading {file}: {}");
    let s = die!(
        wordgraph_core::settings::parse_settings_toml(&content),
        "Error: {}"
    );
    println!(
        "OK: search.max_word_length={}, regexp.max_results={}, builder.max_siblings={}",
        s.search.max_word_length, s.regexp.max_results, s.builder.max_siblings
    );
}

/// Install a custom settings file before any query runs.
pub fn load_settings(file: &str) {
    let content = die!(fs::read_to_string(file), "Error reading {file}: {}");
    die!(
        wordgraph_core::settings::init_custom(content),
        "Error in {file}: {}"
    );
}
