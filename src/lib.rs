pub mod checker;
pub mod cli;
pub mod config;
pub mod error;
pub mod sources;

pub use checker::dictionary::{load_dictionary, DictionaryLoader};
pub use checker::tokenizer::{Position, Token, Tokenizer};
pub use checker::wordset::WordSet;
pub use checker::{check_document, SpellChecker};
pub use config::Config;
pub use error::{Error, Result};

use std::fmt;

/// A word that is not in the dictionary, with where it was found.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Mismatch {
    pub path: String,
    pub position: Position,
    pub word: String,
}

impl fmt::Display for Mismatch {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(
            f,
            "{} ({},{}): {}",
            self.path, self.position.line, self.position.column, self.word
        )
    }
}
