use clap::{Parser, Subcommand};

use wordgraph_cli::commands::{config_ops, dict_ops};
use wordgraph_cli::trace_init::init_tracing;

#[derive(Parser)]
#[command(name = "dictool", about = "Word graph dictionary build tool")]
struct Cli {
    #[command(subcommand)]
    command: Command,
}

#[derive(Subcommand)]
enum Command {
    /// Compile a sorted word list into a dictionary file
    Compile {
        /// Dictionary name stored in the header
        #[arg(long)]
        name: String,
        /// Letters file (letter points frequency vowel consonant [display [inputs]])
        #[arg(long)]
        letters: String,
        /// Word list, one word per line, in alphabetical order
        #[arg(long)]
        input: String,
        /// Output file
        #[arg(long)]
        output: String,
    },
    /// Show the dictionary header
    Info {
        /// Dictionary file
        dict_file: String,
    },
    /// Print every word of the dictionary
    List {
        /// Dictionary file
        dict_file: String,
    },
    /// Dump the edge table
    Hex {
        /// Dictionary file
        dict_file: String,
    },
    /// Check whether a word is in the dictionary
    Lookup {
        /// Dictionary file
        dict_file: String,
        /// Word to look up
        word: String,
    },
    /// Export default settings as TOML
    SettingsExport,
    /// Validate a custom settings TOML file
    SettingsValidate {
        /// Path to the TOML file
        file: String,
    },
}

fn main() {
    let cli = Cli::parse();
    init_tracing();

    match cli.command {
        Command::Compile {
            name,
            letters,
            input,
            output,
        } => dict_ops::compile(&name, &letters, &input, &output),
        Command::Info { dict_file } => dict_ops::info(&dict_file),
        Command::List { dict_file } => dict_ops::list(&dict_file),
        Command::Hex { dict_file } => dict_ops::hex(&dict_file),
        Command::Lookup { dict_file, word } => dict_ops::lookup(&dict_file, &word),
        Command::SettingsExport => config_ops::settings_export(),
        Command::SettingsValidate { file } => config_ops::settings_validate(&file),
    }
}
