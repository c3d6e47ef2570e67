// File: src/bin/main.rs
use anyhow::{bail, Context, Result};
use checker_core::persistence::save_trie;
use checker_core::synonyms::SynonymTable;
use checker_core::text::{DefaultNormalizer, Normalizer};
use checker_core::{build_reference, CheckerConfig, ScanEngine, ScanResult, SharedIndex, Trie};
use clap::{Args, Parser, Subcommand};
use crossterm::style::Stylize;
use std::io::{stdin, stdout, BufRead, Write};
use std::path::PathBuf;
use std::sync::Arc;
use tracing_subscriber::EnvFilter;

#[derive(Parser, Debug)]
#[command(name = "checker")]
#[command(version)]
#[command(about = "Rabin-Karp n-gram plagiarism checker with trie word suggestions", long_about = None)]
struct Cli {
    /// JSON config file; flags below override its values
    #[arg(short, long, global = true, value_name = "PATH")]
    config: Option<PathBuf>,

    /// Store reference and trie files under this directory
    #[arg(long, global = true, value_name = "DIR")]
    data_dir: Option<PathBuf>,

    /// JSON synonym table used by --synonyms scans
    #[arg(long, global = true, value_name = "PATH")]
    synonym_table: Option<PathBuf>,

    /// Log everything to stderr
    #[arg(long, global = true)]
    debug: bool,

    #[command(subcommand)]
    command: Command,
}

#[derive(Args, Debug, Clone, Copy)]
struct WindowArg {
    /// n-gram window size
    #[arg(short = 'k', long = "window", value_name = "K")]
    window: Option<usize>,
}

#[derive(Subcommand, Debug)]
enum Command {
    /// Hash a reference corpus and save its hash set and vocabulary
    BuildReference {
        /// Reference text files
        #[arg(required = true)]
        inputs: Vec<PathBuf>,
        #[command(flatten)]
        window: WindowArg,
    },
    /// Build the suggestion trie from corpus words
    BuildTrie {
        #[arg(required = true)]
        inputs: Vec<PathBuf>,
    },
    /// Score a suspect document against the reference
    Scan {
        /// Suspect text given inline
        #[arg(long, conflicts_with = "file")]
        text: Option<String>,
        /// Suspect text file
        #[arg(short, long)]
        file: Option<PathBuf>,
        #[command(flatten)]
        window: WindowArg,
        /// Canonicalize suspect words through the synonym table first
        #[arg(short, long)]
        synonyms: bool,
        /// Print the result as JSON
        #[arg(long)]
        json: bool,
    },
    /// Complete the last word of PREFIX
    Suggest {
        prefix: String,
        #[arg(short = 'n', long = "max")]
        max_results: Option<usize>,
    },
    /// Interactive loop: text is scanned, `?prefix` shows suggestions
    Repl {
        #[command(flatten)]
        window: WindowArg,
        #[arg(short, long)]
        synonyms: bool,
    },
}

/// Initialize tracing subscriber for log output
fn init_tracing(debug: bool) {
    let filter = if debug {
        EnvFilter::from_default_env().add_directive(tracing::Level::TRACE.into())
    } else {
        EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new("warn"))
    };
    tracing_subscriber::fmt()
        .with_env_filter(filter)
        .with_writer(std::io::stderr)
        .init();
}

fn load_config(cli: &Cli) -> Result<CheckerConfig> {
    let mut config = match &cli.config {
        Some(path) => CheckerConfig::from_json_file(path)?,
        None => CheckerConfig::default(),
    };
    if let Some(dir) = &cli.data_dir {
        config.hashes_path = dir.join("reference").join("reference_hashes.bin");
        config.vocab_path = dir.join("reference").join("vocab.bin");
        config.trie_path = dir.join("trie").join("trie.bin");
    }
    if let Some(path) = &cli.synonym_table {
        config.synonyms_path = Some(path.clone());
    }
    Ok(config)
}

fn read_corpus_tokens(inputs: &[PathBuf]) -> Result<Vec<String>> {
    let normalizer = DefaultNormalizer::default();
    let mut tokens = Vec::new();
    for path in inputs {
        let raw = std::fs::read_to_string(path)
            .with_context(|| format!("reading {}", path.display()))?;
        tokens.extend(normalizer.tokenize(&normalizer.clean(&raw)));
    }
    Ok(tokens)
}

fn build_engine(config: &CheckerConfig) -> Result<ScanEngine> {
    let index = SharedIndex::new(config.reference_paths(), &config.trie_path);
    let mut engine = ScanEngine::new(Arc::new(index), config.hash_params())
        .with_preview_chars(config.preview_chars);
    if let Some(path) = &config.synonyms_path {
        engine = engine.with_synonyms(SynonymTable::from_json_file(path)?);
    }
    Ok(engine)
}

fn print_result(result: &ScanResult) {
    println!("Tokens          : {}", result.tokens);
    println!("Total n-grams   : {}", result.ngrams_total);
    println!("Matched n-grams : {}", result.ngrams_matched);

    let score = format!("{:.2}%", result.score_percent);
    let score = if result.score_percent >= 50.0 {
        score.red().bold()
    } else if result.score_percent > 0.0 {
        score.yellow()
    } else {
        score.green()
    };
    println!("Score           : {} (k = {})", score, result.window);

    if result.matches.is_empty() {
        println!("No matches found.");
    } else {
        println!("Matched n-grams (first 10):");
        for m in result.matches.iter().take(10) {
            println!("  - hash {} at index {}", m.hash, m.start);
        }
    }
}

fn run_repl(engine: &ScanEngine, window: usize, synonyms: bool, max_suggestions: usize) -> Result<()> {
    println!("{}", "Plagiarism checker. Type text to scan, '?prefix' for suggestions, 'exit' to quit.".bold());
    let stdin = stdin();
    let mut lines = stdin.lock().lines();
    loop {
        print!("> ");
        stdout().flush()?;
        let Some(line) = lines.next() else { break };
        let input = line?;
        let input = input.trim();

        match input {
            "exit" => break,
            "" => continue,
            s if s.starts_with('?') => match engine.suggest(&s[1..], max_suggestions) {
                Ok(words) if words.is_empty() => println!("No suggestions found."),
                Ok(words) => println!("{}", words.join("  ")),
                Err(e) => eprintln!("{} {}", "[ERROR]".red(), e),
            },
            s => match engine.scan_with_window(s, window, synonyms) {
                Ok(result) => print_result(&result),
                Err(e) => eprintln!("{} {}", "[ERROR]".red(), e),
            },
        }
        println!();
    }
    Ok(())
}

fn main() -> Result<()> {
    let cli = Cli::parse();
    init_tracing(cli.debug);
    let config = load_config(&cli)?;

    match &cli.command {
        Command::BuildReference { inputs, window } => {
            let tokens = read_corpus_tokens(inputs)?;
            let params = config.hash_params().with_window(window.window.unwrap_or(config.window));
            let summary = build_reference(&tokens, &params, &config.reference_paths())?;

            println!("=== Reference build summary ===");
            println!("Tokens        : {}", summary.tokens);
            println!("Vocab size    : {}", summary.vocab_size);
            println!("Unique hashes : {}", summary.hash_count);
            println!("Window k      : {}", summary.window);
            println!("Hash set      : {}", config.hashes_path.display());
            println!("Vocabulary    : {}", config.vocab_path.display());
        }
        Command::BuildTrie { inputs } => {
            let tokens = read_corpus_tokens(inputs)?;
            let trie = Trie::build_from_tokens(&tokens);
            save_trie(&trie, &config.trie_path)?;
            println!(
                "Trie built with {} words ({} nodes) -> {}",
                trie.word_count(),
                trie.node_count(),
                config.trie_path.display()
            );
        }
        Command::Scan { text, file, window, synonyms, json } => {
            let raw = match (text, file) {
                (Some(text), _) => text.clone(),
                (None, Some(path)) => std::fs::read_to_string(path)
                    .with_context(|| format!("reading {}", path.display()))?,
                (None, None) => bail!("pass the suspect text with --text or --file"),
            };
            let engine = build_engine(&config)?;
            let result = engine
                .scan_with_window(&raw, window.window.unwrap_or(config.window), *synonyms)
                .context("scan failed")?;
            if *json {
                println!("{}", serde_json::to_string_pretty(&result)?);
            } else {
                print_result(&result);
            }
        }
        Command::Suggest { prefix, max_results } => {
            let engine = build_engine(&config)?;
            for word in engine.suggest(prefix, max_results.unwrap_or(config.max_suggestions))? {
                println!("{word}");
            }
        }
        Command::Repl { window, synonyms } => {
            let engine = build_engine(&config)?;
            run_repl(
                &engine,
                window.window.unwrap_or(config.window),
                *synonyms,
                config.max_suggestions,
            )?;
        }
    }
    Ok(())
}
