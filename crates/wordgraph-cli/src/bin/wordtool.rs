use clap::{Parser, Subcommand};

use wordgraph_cli::commands::{config_ops, search_ops};
use wordgraph_cli::trace_init::init_tracing;

#[derive(Parser)]
#[command(name = "wordtool", about = "Word graph dictionary queries")]
struct Cli {
    /// Custom settings TOML file
    #[arg(long, global = true)]
    settings: Option<String>,
    #[command(subcommand)]
    command: Command,
}

#[derive(Subcommand)]
enum Command {
    /// Words from the whole rack, then from the rack plus one letter
    Plus1 {
        /// Dictionary file
        dict_file: String,
        /// Rack letters ('?' is a joker)
        rack: String,
        /// Allow jokers in the rack
        #[arg(long)]
        joker: bool,
        /// Maximum number of results (0: unlimited)
        #[arg(long)]
        limit: Option<usize>,
    },
    /// Words with one letter added in front or at the end
    Racc {
        /// Dictionary file
        dict_file: String,
        /// Word to extend
        word: String,
        /// Maximum number of results (0: unlimited)
        #[arg(long)]
        limit: Option<usize>,
    },
    /// Words with three letters added in front
    Benj {
        /// Dictionary file
        dict_file: String,
        /// Word to extend
        word: String,
        /// Maximum number of results (0: unlimited)
        #[arg(long)]
        limit: Option<usize>,
    },
    /// Words matching a mask; any non-letter is a wildcard
    Cross {
        /// Dictionary file
        dict_file: String,
        /// Mask, e.g. "C.T"
        mask: String,
        /// Maximum number of results (0: unlimited)
        #[arg(long)]
        limit: Option<usize>,
    },
    /// Words matching a regular expression
    Regexp {
        /// Dictionary file
        dict_file: String,
        /// Pattern, e.g. "AB?C" or ":c::v:+"
        pattern: String,
        /// Minimum word length
        #[arg(long)]
        min: Option<usize>,
        /// Maximum word length
        #[arg(long)]
        max: Option<usize>,
        /// Maximum number of results (0: unlimited)
        #[arg(long)]
        limit: Option<usize>,
    },
}

fn main() {
    let cli = Cli::parse();
    init_tracing();
    if let Some(file) = &cli.settings {
        config_ops::load_settings(file);
    }

    match cli.command {
        Command::Plus1 {
            dict_file,
            rack,
            joker,
            limit,
        } => search_ops::plus1(&dict_file, &rack, joker, limit),
        Command::Racc {
            dict_file,
            word,
            limit,
        } => search_ops::racc(&dict_file, &word, limit),
        Command::Benj {
            dict_file,
            word,
            limit,
        } => search_ops::benj(&dict_file, &word, limit),
        Command::Cross {
            dict_file,
            mask,
            limit,
        } => search_ops::cross(&dict_file, &mask, limit),
        Command::Regexp {
            dict_file,
            pattern,
            min,
            max,
            limit,
        } => search_ops::regexp(&dict_file, &pattern, min, max, limit),
    }
}
