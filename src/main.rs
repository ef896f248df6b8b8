//! gstree - build generalized suffix trees from the command line
//!
//! Reads words from a preset, stdin, a file, or the command line, builds
//! the tree, and prints one of: the tree itself, the suffix array, the
//! sorted suffixes, or the LCP array. `--walkthrough` instead narrates the
//! construction phase by phase.

use std::io::BufRead;
use std::path::PathBuf;

use anyhow::{bail, Context, Result};
use clap::{ArgGroup, Parser, ValueEnum};

use gstree::{build_with_config, render, Alphabet, BuildConfig, Tree, DEFAULT_TERMINATORS};

/// Build a generalized suffix tree and derive its suffix and LCP arrays.
///
/// Words are validated against the alphabet before anything is built; each
/// word is closed with its own terminator, taken in order from the
/// terminator set.
#[derive(Parser, Debug)]
#[command(name = "gstree")]
#[command(version)]
#[command(about = "Generalized suffix trees with suffix and LCP arrays")]
#[command(group = ArgGroup::new("input").required(true).args(["preset", "stdin", "file", "words"]))]
struct Cli {
    /// Alphabet symbols, in order (default: lowercase Latin letters)
    #[arg(short = 'a', long = "alphabet")]
    alphabet: Option<String>,

    /// Terminator symbols in order, or a count taken from A..Z
    #[arg(short = 't', long = "terminators")]
    terminators: Option<String>,

    /// Build one of the built-in example inputs
    #[arg(short = 'p', long = "preset", value_enum)]
    preset: Option<Preset>,

    /// Read words from stdin, one per line
    #[arg(short = 'i', long = "stdin")]
    stdin: bool,

    /// Read words from a file, one per line
    #[arg(short = 'f', long = "file")]
    file: Option<PathBuf>,

    /// Words given directly on the command line
    #[arg(short = 'w', long = "word", num_args = 1..)]
    words: Vec<String>,

    /// What to print once the tree is built
    #[arg(short = 'o', long = "output", value_enum, default_value = "tree", conflicts_with = "walkthrough")]
    output: Output,

    /// Narrate every construction phase instead of printing a result
    #[arg(long)]
    walkthrough: bool,

    /// Also print the input words and the concatenated text
    #[arg(short = 'd', long = "details")]
    details: bool,
}

#[derive(ValueEnum, Clone, Copy, Debug)]
enum Preset {
    /// Single word abacababacabacaba
    Abac,
    /// Two words abaabaab and abbaabbab
    Abab,
}

#[derive(ValueEnum, Clone, Copy, Debug)]
enum Output {
    /// Indented tree with edge labels and leaf ranks
    Tree,
    /// Suffix array
    Sa,
    /// Sorted suffixes, truncated at their sentinel
    Sfx,
    /// LCP array
    Lcp,
}

fn main() -> Result<()> {
    let cli = Cli::parse();

    let alphabet = match &cli.alphabet {
        Some(symbols) => Alphabet::new(symbols.chars())?,
        None => Alphabet::lowercase(),
    };
    let terminators = parse_terminators(cli.terminators.as_deref())?;
    let words = collect_words(&cli)?;

    let config = BuildConfig {
        alphabet,
        walkthrough: cli.walkthrough,
    };
    let tree = build_with_config(&words, &terminators, &config)?;

    if cli.details {
        print_details(&tree);
    }
    if !cli.walkthrough {
        match cli.output {
            Output::Tree => print!("{}", render::tree(&tree)),
            Output::Sa => print!("{}", render::array(tree.suffix_array())),
            Output::Sfx => print!("{}", render::suffixes(&tree)),
            Output::Lcp => print!("{}", render::array(tree.lcp_array())),
        }
    }
    Ok(())
}

/// `-t` takes either the terminator symbols themselves or a count selecting
/// the first n of the default pool.
fn parse_terminators(arg: Option<&str>) -> Result<Vec<char>> {
    let Some(arg) = arg else {
        return Ok(DEFAULT_TERMINATORS.chars().collect());
    };
    if !arg.is_empty() && arg.chars().all(|c| c.is_ascii_digit()) {
        let count: usize = arg.parse().context("terminator count out of range")?;
        if count == 0 || count > DEFAULT_TERMINATORS.len() {
            bail!(
                "terminator count must be between 1 and {}",
                DEFAULT_TERMINATORS.len()
            );
        }
        return Ok(DEFAULT_TERMINATORS.chars().take(count).collect());
    }
    Ok(arg.chars().collect())
}

fn collect_words(cli: &Cli) -> Result<Vec<String>> {
    if let Some(preset) = cli.preset {
        return Ok(match preset {
            Preset::Abac => vec!["abacababacabacaba".to_string()],
            Preset::Abab => vec!["abaabaab".to_string(), "abbaabbab".to_string()],
        });
    }
    if cli.stdin {
        let mut words = Vec::new();
        for line in std::io::stdin().lock().lines() {
            let line = line.context("failed to read from stdin")?;
            let word = line.trim();
            if !word.is_empty() {
                words.push(word.to_string());
            }
        }
        return Ok(words);
    }
    if let Some(path) = &cli.file {
        let contents = std::fs::read_to_string(path)
            .with_context(|| format!("failed to read words from {}", path.display()))?;
        return Ok(contents
            .lines()
            .map(str::trim)
            .filter(|w| !w.is_empty())
            .map(str::to_string)
            .collect());
    }
    Ok(cli.words.clone())
}

fn print_details(tree: &Tree) {
    for (i, word) in tree.words().iter().enumerate() {
        println!("word {}: {} ('{}')", i, word, tree.terminators()[i]);
    }
    let text: String = tree.text().iter().collect();
    println!("text: {} ({} symbols)", text, tree.len());
    println!("nodes: {}", tree.node_count());
}
