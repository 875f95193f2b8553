use anyhow::{Context, Result};
use clap::{ArgAction, CommandFactory, Parser};
use clap_complete::{generate, Shell};
use rayon::prelude::*;
use spchk::checker::{DocumentReport, SpellChecker};
use spchk::cli::output::{self, OutputFormat};
use spchk::config::Overrides;
use spchk::sources::{self, Target};
use spchk::{Config, DictionaryLoader, Mismatch};
use std::io::{self, Write};
use std::path::{Path, PathBuf};
use tracing::{info, warn};
use tracing_subscriber::EnvFilter;

#[derive(Parser, Debug)]
#[command(name = "spchk")]
#[command(version, about = "Report every word of a text file or tree that is not in a dictionary", long_about = None)]
struct Cli {
    /// Dictionary word list (words separated by spaces or newlines)
    #[arg(value_name = "DICTIONARY", required_unless_present = "completion")]
    dictionary: Option<PathBuf>,

    /// Text file or directory to check
    #[arg(value_name = "TARGET", required_unless_present = "completion")]
    target: Option<PathBuf>,

    /// Output format (text, json)
    #[arg(short = 'o', long, default_value = "text")]
    format: OutputFormat,

    /// Print a summary line to stderr when done
    #[arg(long)]
    summary: bool,

    /// Disable colored output
    #[arg(long)]
    no_color: bool,

    /// Exit with code 1 if any misspelling is found
    #[arg(long)]
    strict: bool,

    /// Check documents in parallel (output order is unchanged)
    #[arg(long)]
    parallel: bool,

    /// Bytes read per chunk
    #[arg(long, value_name = "BYTES")]
    chunk_size: Option<usize>,

    /// Longest document token kept before truncation
    #[arg(long, value_name = "N")]
    max_token_len: Option<usize>,

    /// Longest dictionary word kept before truncation
    #[arg(long, value_name = "N")]
    max_word_len: Option<usize>,

    /// File extension to check when walking a directory (repeatable)
    #[arg(long = "ext", value_name = "EXT")]
    extensions: Vec<String>,

    /// Increase log verbosity (-v info, -vv debug)
    #[arg(short, long, action = ArgAction::Count)]
    verbose: u8,

    /// Generate shell completion script
    #[arg(long, value_name = "SHELL")]
    completion: Option<Shell>,
}

fn main() -> Result<()> {
    let cli = Cli::parse();

    // Handle shell completion generation
    if let Some(shell) = cli.completion {
        let mut cmd = Cli::command();
        generate(shell, &mut cmd, "spchk", &mut io::stdout());
        return Ok(());
    }

    init_logging(cli.verbose);
    if cli.no_color {
        colored::control::set_override(false);
    }

    let config = Config::load(Overrides {
        max_word_len: cli.max_word_len,
        max_token_len: cli.max_token_len,
        chunk_size: cli.chunk_size,
        extensions: cli.extensions.clone(),
        parallel: cli.parallel,
    })?;

    let (Some(dictionary_path), Some(target_path)) = (&cli.dictionary, &cli.target) else {
        anyhow::bail!("Both a dictionary and a target path are required. Use --help for usage information.");
    };

    let words = DictionaryLoader::new(config.max_word_len, config.chunk_size)
        .load_from_path(dictionary_path)?;

    let documents = match Target::from_path(target_path)? {
        Target::Directory(root) => sources::walk(&root, &config.extensions),
        Target::File(path) => {
            if !sources::has_extension(&path, &config.extensions) {
                eprintln!("Error: Not a text file: {}", path.display());
                return Ok(());
            }
            vec![path]
        }
    };
    info!(documents = documents.len(), "checking documents");

    let checker = SpellChecker::from_config(&words, &config);
    let stdout = io::stdout();
    let mut out = stdout.lock();

    let total = if config.parallel || cli.format == OutputFormat::Json {
        let reports = collect_reports(&checker, &documents, config.parallel);
        let mut all = Vec::new();
        for report in reports {
            if let Some(e) = &report.error {
                warn!("{}", e);
            }
            all.extend(report.mismatches);
        }

        match cli.format {
            OutputFormat::Text => write_lines(&mut out, &all)?,
            OutputFormat::Json => output::write_json(&mut out, documents.len(), &all)
                .context("Failed to write JSON output")?,
        }
        all.len()
    } else {
        let mut total = 0;
        for path in &documents {
            total += stream_document(&checker, path, &mut out)?;
        }
        total
    };
    out.flush()?;

    if cli.summary {
        output::print_check_summary(total, documents.len(), !cli.no_color);
    }

    if total > 0 && cli.strict {
        std::process::exit(1);
    }

    Ok(())
}

fn init_logging(verbose: u8) {
    let level = match verbose {
        0 => "warn",
        1 => "info",
        _ => "debug",
    };
    let filter = EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new(level));
    tracing_subscriber::fmt()
        .with_env_filter(filter)
        .with_writer(io::stderr)
        .with_target(false)
        .without_time()
        .init();
}

fn collect_reports(
    checker: &SpellChecker<'_>,
    documents: &[PathBuf],
    parallel: bool,
) -> Vec<DocumentReport> {
    if parallel {
        documents
            .par_iter()
            .map(|path| checker.check_path(path))
            .collect()
    } else {
        documents
            .iter()
            .map(|path| checker.check_path(path))
            .collect()
    }
}

fn write_lines<W: Write>(out: &mut W, mismatches: &[Mismatch]) -> Result<()> {
    for mismatch in mismatches {
        output::write_mismatch(out, mismatch).context("Failed to write output")?;
    }
    Ok(())
}

/// Print mismatches as they are found. Unreadable files are reported and
/// skipped.
fn stream_document<W: Write>(
    checker: &SpellChecker<'_>,
    path: &Path,
    out: &mut W,
) -> Result<usize> {
    let shown = path.display().to_string();
    let file = match std::fs::File::open(path) {
        Ok(file) => file,
        Err(source) => {
            warn!("{}", spchk::Error::DocumentRead { path: shown, source });
            return Ok(0);
        }
    };

    let mut count = 0;
    for item in checker.check(file, &shown) {
        match item {
            Ok(mismatch) => {
                output::write_mismatch(out, &mismatch).context("Failed to write output")?;
                count += 1;
            }
            Err(e) => warn!("{}", e),
        }
    }
    Ok(count)
}
