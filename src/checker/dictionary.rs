use crate::checker::wordset::WordSet;
use crate::error::{Error, Result};
use std::fs::{self, File};
use std::io::{ErrorKind, Read};
use std::path::Path;
use tracing::{debug, info};

pub const DEFAULT_MAX_WORD_LEN: usize = 100;
pub const DEFAULT_CHUNK_SIZE: usize = 4096;

/// Streams a word list into a [`WordSet`].
///
/// Words are separated by a space, a newline or a NUL byte. Every word is
/// inserted verbatim, with its first letter upper-cased, and fully
/// upper-cased. Words longer than `max_word_len` bytes are truncated.
#[derive(Debug, Clone, Copy)]
pub struct DictionaryLoader {
    max_word_len: usize,
    chunk_size: usize,
}

impl Default for DictionaryLoader {
    fn default() -> Self {
        Self {
            max_word_len: DEFAULT_MAX_WORD_LEN,
            chunk_size: DEFAULT_CHUNK_SIZE,
        }
    }
}

impl DictionaryLoader {
    pub fn new(max_word_len: usize, chunk_size: usize) -> Self {
        Self {
            max_word_len,
            chunk_size: chunk_size.max(1),
        }
    }

    /// Load a dictionary from a path, checking that it names a regular file
    pub fn load_from_path(&self, path: &Path) -> Result<WordSet> {
        let metadata = fs::metadata(path).map_err(|source| Error::DictionaryOpen {
            path: path.to_path_buf(),
            source,
        })?;
        if !metadata.is_file() {
            return Err(Error::DictionaryNotFile(path.to_path_buf()));
        }

        let file = File::open(path).map_err(|source| Error::DictionaryOpen {
            path: path.to_path_buf(),
            source,
        })?;

        let words = self.load(file)?;
        info!(
            path = %path.display(),
            entries = words.len(),
            "loaded dictionary"
        );
        Ok(words)
    }

    /// Read the whole stream into a new set. A read failure aborts the load.
    pub fn load<R: Read>(&self, mut reader: R) -> Result<WordSet> {
        let mut words = WordSet::new();
        let mut buffer = vec![0u8; self.chunk_size];
        let mut word: Vec<u8> = Vec::with_capacity(self.max_word_len);
        let mut loaded = 0usize;

        loop {
            let n = match reader.read(&mut buffer) {
                Ok(0) => break,
                Ok(n) => n,
                Err(e) if e.kind() == ErrorKind::Interrupted => continue,
                Err(e) => return Err(Error::DictionaryRead(e)),
            };

            for &byte in &buffer[..n] {
                if is_boundary(byte) {
                    if !word.is_empty() {
                        insert_variants(&mut words, &word);
                        loaded += 1;
                        word.clear();
                    }
                } else if word.len() < self.max_word_len {
                    word.push(byte);
                }
            }
        }

        if !word.is_empty() {
            insert_variants(&mut words, &word);
            loaded += 1;
        }

        debug!(words = loaded, entries = words.len(), "dictionary stream consumed");
        Ok(words)
    }
}

fn is_boundary(byte: u8) -> bool {
    matches!(byte, b' ' | b'\n' | b'\0')
}

fn insert_variants(words: &mut WordSet, raw: &[u8]) {
    let word = String::from_utf8_lossy(raw).into_owned();
    let [initial_cap, all_caps] = case_variants(&word);
    words.insert(initial_cap);
    words.insert(all_caps);
    words.insert(word);
}

/// The initial-cap and all-caps forms of a word. Only ASCII letters change.
pub fn case_variants(word: &str) -> [String; 2] {
    let mut initial_cap = word.to_string();
    if let Some(first) = initial_cap.get_mut(..1) {
        first.make_ascii_uppercase();
    }
    [initial_cap, word.to_ascii_uppercase()]
}

/// Load a dictionary stream with the default limits.
pub fn load_dictionary<R: Read>(reader: R) -> Result<WordSet> {
    DictionaryLoader::default().load(reader)
}
