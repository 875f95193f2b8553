pub mod dictionary;
pub mod hyphen;
pub mod normalize;
pub mod tokenizer;
pub mod wordset;

use crate::error::{Error, Result};
use crate::{Config, Mismatch};
use std::fs::File;
use std::io::Read;
use std::path::Path;
use tokenizer::Tokenizer;
use tracing::debug;
use wordset::WordSet;

/// Checks documents against a loaded dictionary.
///
/// The checker only borrows the word set, so any number of checkers (and
/// threads) can share one dictionary once loading is done.
#[derive(Debug, Clone, Copy)]
pub struct SpellChecker<'w> {
    words: &'w WordSet,
    chunk_size: usize,
    max_token_len: usize,
}

/// Everything found in one document. `error` is set when the document could
/// not be opened or stopped being readable; `mismatches` then holds whatever
/// was found before the failure.
#[derive(Debug, Default)]
pub struct DocumentReport {
    pub mismatches: Vec<Mismatch>,
    pub error: Option<Error>,
}

impl<'w> SpellChecker<'w> {
    pub fn new(words: &'w WordSet) -> Self {
        Self {
            words,
            chunk_size: dictionary::DEFAULT_CHUNK_SIZE,
            max_token_len: tokenizer::DEFAULT_MAX_TOKEN_LEN,
        }
    }

    pub fn from_config(words: &'w WordSet, config: &Config) -> Self {
        Self {
            words,
            chunk_size: config.chunk_size,
            max_token_len: config.max_token_len,
        }
    }

    /// Whether a normalized, non-empty word is spelled correctly.
    pub fn is_correct(&self, word: &str) -> bool {
        if hyphen::is_hyphenated(word) {
            hyphen::check(word, self.words)
        } else {
            self.words.contains(word)
        }
    }

    /// Stream the mismatches of one document in document order.
    pub fn check<R: Read>(&self, reader: R, path: &str) -> Mismatches<'w, R> {
        Mismatches {
            checker: *self,
            tokens: Tokenizer::with_limits(reader, self.chunk_size, self.max_token_len),
            path: path.to_string(),
        }
    }

    /// Open and check a file, collecting its mismatches.
    pub fn check_path(&self, path: &Path) -> DocumentReport {
        let shown = path.display().to_string();
        let file = match File::open(path) {
            Ok(file) => file,
            Err(source) => {
                return DocumentReport {
                    mismatches: Vec::new(),
                    error: Some(Error::DocumentRead {
                        path: shown,
                        source,
                    }),
                }
            }
        };

        let mut report = DocumentReport::default();
        for item in self.check(file, &shown) {
            match item {
                Ok(mismatch) => report.mismatches.push(mismatch),
                Err(e) => report.error = Some(e),
            }
        }
        debug!(path = %shown, mismatches = report.mismatches.len(), "checked document");
        report
    }
}

/// Lazy sequence of the mismatches in one document.
///
/// Yields at most one error, after which the sequence ends.
pub struct Mismatches<'w, R> {
    checker: SpellChecker<'w>,
    tokens: Tokenizer<R>,
    path: String,
}

impl<R: Read> Iterator for Mismatches<'_, R> {
    type Item = Result<Mismatch>;

    fn next(&mut self) -> Option<Self::Item> {
        loop {
            let token = match self.tokens.next()? {
                Ok(token) => token,
                Err(source) => {
                    return Some(Err(Error::DocumentRead {
                        path: self.path.clone(),
                        source,
                    }))
                }
            };

            let word = normalize::normalize(&token.text);
            if word.is_empty() || self.checker.is_correct(word) {
                continue;
            }

            return Some(Ok(Mismatch {
                path: self.path.clone(),
                position: token.position,
                word: word.to_string(),
            }));
        }
    }
}

/// Check one document stream against `words` with the default limits.
pub fn check_document<'w, R: Read>(
    reader: R,
    path: &str,
    words: &'w WordSet,
) -> Mismatches<'w, R> {
    SpellChecker::new(words).check(reader, path)
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::checker::dictionary::{load_dictionary, DictionaryLoader};
    use crate::checker::tokenizer::Position;
    use std::io::{self, Write};
    use tempfile::{tempdir, NamedTempFile};

    fn dictionary(content: &str) -> WordSet {
        load_dictionary(content.as_bytes()).unwrap()
    }

    fn lines(checker: &SpellChecker, text: &str) -> Vec<String> {
        checker
            .check(text.as_bytes(), "doc.txt")
            .map(|m| m.unwrap().to_string())
            .collect()
    }

    #[test]
    fn test_small_chunks_end_to_end() {
        let words = DictionaryLoader::new(100, 4)
            .load("cat dog\nfish".as_bytes())
            .unwrap();
        let config = Config {
            chunk_size: 4,
            ..Config::default()
        };
        let checker = SpellChecker::from_config(&words, &config);

        assert_eq!(
            lines(&checker, "Cat dogg fish-cat"),
            vec!["doc.txt (1,5): dogg".to_string()]
        );
    }

    #[test]
    fn test_apostrophes_are_not_split() {
        let words = dictionary("it well known");
        let checker = SpellChecker::new(&words);
        assert_eq!(
            lines(&checker, "it's well-known."),
            vec!["doc.txt (1,1): it's".to_string()]
        );

        let words = dictionary("it's well known");
        let checker = SpellChecker::new(&words);
        assert!(lines(&checker, "it's well-known.").is_empty());
    }

    #[test]
    fn test_final_word_without_delimiter() {
        let words = dictionary("hello");
        let checker = SpellChecker::new(&words);
        assert_eq!(
            lines(&checker, "hello wrld"),
            vec!["doc.txt (1,7): wrld".to_string()]
        );
    }

    #[test]
    fn test_mismatches_in_document_order() {
        let words = dictionary("the a");
        let mismatches: Vec<_> = check_document("zz the yy\nA xx zz".as_bytes(), "p", &words)
            .map(|m| m.unwrap())
            .collect();

        let found: Vec<_> = mismatches
            .iter()
            .map(|m| (m.word.as_str(), m.position.line, m.position.column))
            .collect();
        assert_eq!(
            found,
            vec![("zz", 1, 1), ("yy", 1, 8), ("xx", 2, 3), ("zz", 2, 6)]
        );
        assert!(mismatches.windows(2).all(|w| w[0].position < w[1].position));
    }

    #[test]
    fn test_normalized_word_is_reported() {
        let words = dictionary("fine");
        let mismatches: Vec<_> = check_document("fine bad'".as_bytes(), "p", &words)
            .map(|m| m.unwrap())
            .collect();
        assert_eq!(mismatches.len(), 1);
        assert_eq!(mismatches[0].word, "bad");
        assert_eq!(mismatches[0].position, Position { line: 1, column: 6 });
    }

    #[test]
    fn test_case_variants_only() {
        let words = dictionary("paris");
        let checker = SpellChecker::new(&words);
        assert!(checker.is_correct("paris"));
        assert!(checker.is_correct("Paris"));
        assert!(checker.is_correct("PARIS"));
        assert!(!checker.is_correct("pArIs"));
        assert!(!checker.is_correct("parisx"));
    }

    #[test]
    fn test_read_error_after_partial_output() {
        struct HalfBroken(bool);

        impl Read for HalfBroken {
            fn read(&mut self, buf: &mut [u8]) -> io::Result<usize> {
                if self.0 {
                    return Err(io::Error::new(io::ErrorKind::Other, "gone"));
                }
                self.0 = true;
                let data = b"qq ok ";
                buf[..data.len()].copy_from_slice(data);
                Ok(data.len())
            }
        }

        let words = dictionary("ok");
        let results: Vec<_> = check_document(HalfBroken(false), "p", &words).collect();
        assert_eq!(results.len(), 2);
        assert_eq!(results[0].as_ref().unwrap().word, "qq");
        assert!(matches!(results[1], Err(Error::DocumentRead { .. })));
    }

    #[test]
    fn test_check_path() {
        let mut file = NamedTempFile::new().unwrap();
        write!(file, "good bda\ngood").unwrap();

        let words = dictionary("good");
        let report = SpellChecker::new(&words).check_path(file.path());
        assert!(report.error.is_none());
        assert_eq!(report.mismatches.len(), 1);
        assert_eq!(
            report.mismatches[0].to_string(),
            format!("{} (1,6): bda", file.path().display())
        );
    }

    #[test]
    fn test_check_missing_path() {
        let dir = tempdir().unwrap();
        let words = WordSet::new();
        let report = SpellChecker::new(&words).check_path(&dir.path().join("nope.txt"));
        assert!(report.mismatches.is_empty());
        assert!(matches!(report.error, Some(Error::DocumentRead { .. })));
    }
}
