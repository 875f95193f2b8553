use std::collections::HashSet;
use std::hash::{BuildHasherDefault, Hasher};

/// Odd multiplier spreading the djb2 state into the high bits, which the
/// table uses for its control tags.
const FINISH_MIX: u64 = 0x9E37_79B9_7F4A_7C15;

/// djb2 string hash: `h = h * 33 + byte`, seeded with 5381.
#[derive(Debug, Clone, Copy)]
pub struct Djb2Hasher(u64);

impl Default for Djb2Hasher {
    fn default() -> Self {
        Self(5381)
    }
}

impl Hasher for Djb2Hasher {
    fn finish(&self) -> u64 {
        self.0.wrapping_mul(FINISH_MIX)
    }

    fn write(&mut self, bytes: &[u8]) {
        for &b in bytes {
            self.0 = (self.0 << 5).wrapping_add(self.0).wrapping_add(u64::from(b));
        }
    }
}

type Djb2State = BuildHasherDefault<Djb2Hasher>;

/// Case-sensitive set of dictionary words.
///
/// Words are only ever added; the table grows as needed so chains stay short
/// regardless of dictionary size. Once loading is finished the set is shared
/// by reference, which freezes it for the remainder of the run.
#[derive(Debug, Clone, Default)]
pub struct WordSet {
    words: HashSet<String, Djb2State>,
}

impl WordSet {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn with_capacity(capacity: usize) -> Self {
        Self {
            words: HashSet::with_capacity_and_hasher(capacity, Djb2State::default()),
        }
    }

    /// Add a word. Inserting a word that is already present is a no-op.
    pub fn insert(&mut self, word: impl Into<String>) {
        self.words.insert(word.into());
    }

    /// Exact, case-sensitive membership test.
    pub fn contains(&self, word: &str) -> bool {
        self.words.contains(word)
    }

    pub fn len(&self) -> usize {
        self.words.len()
    }

    pub fn is_empty(&self) -> bool {
        self.words.is_empty()
    }

    pub fn iter(&self) -> impl Iterator<Item = &str> {
        self.words.iter().map(String::as_str)
    }
}

impl Extend<String> for WordSet {
    fn extend<I: IntoIterator<Item = String>>(&mut self, iter: I) {
        self.words.extend(iter);
    }
}

impl FromIterator<String> for WordSet {
    fn from_iter<I: IntoIterator<Item = String>>(iter: I) -> Self {
        let mut set = WordSet::new();
        set.extend(iter);
        set
    }
}

impl<'a> FromIterator<&'a str> for WordSet {
    fn from_iter<I: IntoIterator<Item = &'a str>>(iter: I) -> Self {
        iter.into_iter().map(str::to_string).collect()
    }
}
