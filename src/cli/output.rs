use crate::Mismatch;
use colored::*;
use serde::{Deserialize, Serialize};
use std::fmt;
use std::io::{self, Write};
use std::str::FromStr;

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum OutputFormat {
    Text,
    Json,
}

impl FromStr for OutputFormat {
    type Err = String;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s.to_lowercase().as_str() {
            "text" => Ok(OutputFormat::Text),
            "json" => Ok(OutputFormat::Json),
            _ => Err(format!("Unknown format: {}", s)),
        }
    }
}

impl fmt::Display for OutputFormat {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            OutputFormat::Text => write!(f, "text"),
            OutputFormat::Json => write!(f, "json"),
        }
    }
}

#[derive(Debug, Serialize, Deserialize)]
struct JsonMismatch {
    file: String,
    line: usize,
    column: usize,
    word: String,
}

#[derive(Debug, Serialize, Deserialize)]
struct JsonOutput {
    files_checked: usize,
    total_mismatches: usize,
    mismatches: Vec<JsonMismatch>,
}

/// One `<path> (<line>,<column>): <word>` line.
pub fn write_mismatch<W: Write>(out: &mut W, mismatch: &Mismatch) -> io::Result<()> {
    writeln!(out, "{}", mismatch)
}

pub fn write_json<W: Write>(
    out: &mut W,
    files_checked: usize,
    mismatches: &[Mismatch],
) -> io::Result<()> {
    let output = JsonOutput {
        files_checked,
        total_mismatches: mismatches.len(),
        mismatches: mismatches
            .iter()
            .map(|m| JsonMismatch {
                file: m.path.clone(),
                line: m.position.line,
                column: m.position.column,
                word: m.word.clone(),
            })
            .collect(),
    };

    serde_json::to_writer_pretty(&mut *out, &output)?;
    writeln!(out)
}

pub fn format_check_summary(total: usize, files_checked: usize, colored: bool) -> String {
    let file_word = if files_checked == 1 { "file" } else { "files" };
    if total == 0 {
        let line = format!("✓ No misspellings found in {} {}", files_checked, file_word);
        if colored {
            line.green().bold().to_string()
        } else {
            line
        }
    } else {
        let word = if total == 1 { "misspelling" } else { "misspellings" };
        if colored {
            format!(
                "{} {} {} found in {} {}",
                "✗".red().bold(),
                total.to_string().red().bold(),
                word,
                files_checked,
                file_word
            )
        } else {
            format!("✗ {} {} found in {} {}", total, word, files_checked, file_word)
        }
    }
}

pub fn print_check_summary(total: usize, files_checked: usize, colored: bool) {
    eprintln!();
    eprintln!("{}", format_check_summary(total, files_checked, colored));
}
