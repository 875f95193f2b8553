use crate::checker::dictionary::DEFAULT_CHUNK_SIZE;
use std::io::{self, ErrorKind, Read};

pub const DEFAULT_MAX_TOKEN_LEN: usize = 1023;

/// 1-based line and column of a token's first byte.
#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Hash)]
pub struct Position {
    pub line: usize,
    pub column: usize,
}

#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Token {
    pub text: String,
    pub position: Position,
}

/// Lazily splits a byte stream into word candidates.
///
/// A token starts at an ASCII alphanumeric byte and continues through
/// alphanumerics, apostrophes and hyphens. Anything else ends it. The stream
/// is read in `chunk_size` pieces; the in-progress token and the running
/// position carry across reads, so the output does not depend on how the
/// input happens to be chunked.
pub struct Tokenizer<R> {
    reader: R,
    buffer: Vec<u8>,
    pos: usize,
    filled: usize,
    max_token_len: usize,
    line: usize,
    column: usize,
    current: String,
    start: Position,
    finished: bool,
}

impl<R: Read> Tokenizer<R> {
    pub fn new(reader: R) -> Self {
        Self::with_limits(reader, DEFAULT_CHUNK_SIZE, DEFAULT_MAX_TOKEN_LEN)
    }

    pub fn with_limits(reader: R, chunk_size: usize, max_token_len: usize) -> Self {
        Self {
            reader,
            buffer: vec![0; chunk_size.max(1)],
            pos: 0,
            filled: 0,
            max_token_len,
            line: 1,
            column: 0,
            current: String::new(),
            start: Position { line: 1, column: 1 },
            finished: false,
        }
    }

    fn fill(&mut self) -> io::Result<usize> {
        loop {
            match self.reader.read(&mut self.buffer) {
                Ok(n) => {
                    self.pos = 0;
                    self.filled = n;
                    return Ok(n);
                }
                Err(e) if e.kind() == ErrorKind::Interrupted => continue,
                Err(e) => return Err(e),
            }
        }
    }

    fn take_token(&mut self) -> Token {
        Token {
            text: std::mem::take(&mut self.current),
            position: self.start,
        }
    }

    /// Feed one byte; returns a token if this byte closed one.
    fn consume(&mut self, byte: u8) -> Option<Token> {
        if byte == b'\n' {
            self.line += 1;
            self.column = 0;
        } else {
            self.column += 1;
        }

        if belongs_to_token(byte, !self.current.is_empty()) {
            if self.current.is_empty() {
                self.start = Position {
                    line: self.line,
                    column: self.column,
                };
            }
            if self.current.len() < self.max_token_len {
                self.current.push(char::from(byte));
            }
            None
        } else if !self.current.is_empty() {
            Some(self.take_token())
        } else {
            None
        }
    }
}

impl<R: Read> Iterator for Tokenizer<R> {
    type Item = io::Result<Token>;

    fn next(&mut self) -> Option<Self::Item> {
        if self.finished {
            return None;
        }

        loop {
            while self.pos < self.filled {
                let byte = self.buffer[self.pos];
                self.pos += 1;
                if let Some(token) = self.consume(byte) {
                    return Some(Ok(token));
                }
            }

            match self.fill() {
                Ok(0) => {
                    self.finished = true;
                    if self.current.is_empty() {
                        return None;
                    }
                    return Some(Ok(self.take_token()));
                }
                Ok(_) => {}
                Err(e) => {
                    self.finished = true;
                    return Some(Err(e));
                }
            }
        }
    }
}

fn belongs_to_token(byte: u8, in_token: bool) -> bool {
    byte.is_ascii_alphanumeric() || (in_token && matches!(byte, b'\'' | b'-'))
}
