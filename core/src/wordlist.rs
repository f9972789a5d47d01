use std::{
    borrow::Cow,
    fs::File,
    io::{BufRead, BufReader},
    path::{Path, PathBuf},
    sync::Arc,
};

use tracing::warn;

use crate::{
    advisor,
    error::{CrackleError, CrackleResult},
};

/// An ordered, restartable source of words.
#[derive(Clone, Debug)]
pub enum WordSource {
    /// A text file with one word per line.
    File(PathBuf),
    /// Words held in memory.
    Words(Arc<[String]>),
}

impl WordSource {
    pub fn file(path: impl Into<PathBuf>) -> Self {
        Self::File(path.into())
    }

    pub fn words<S: Into<String>>(words: impl IntoIterator<Item = S>) -> Self {
        Self::Words(words.into_iter().map(Into::into).collect())
    }

    /// Builds a word source from the raw output of a strategy advisor.
    /// Unusable output falls back to a default word list.
    pub fn from_advice(text: &str) -> Self {
        Self::words(advisor::parse_wordlist(text))
    }

    /// Starts a new pass over the source.
    /// Fails if the file cannot be opened.
    pub fn iter(&self) -> CrackleResult<Words> {
        let inner = match self {
            Self::File(path) => {
                let file = File::open(path).map_err(|source| CrackleError::Wordlist {
                    path: path.clone(),
                    source,
                })?;

                WordsInner::File {
                    reader: BufReader::new(file),
                    path: path.clone(),
                    buf: Vec::new(),
                    line: 0,
                }
            }
            Self::Words(words) => WordsInner::Memory {
                words: words.clone(),
                index: 0,
            },
        };

        Ok(Words { inner })
    }
}

enum WordsInner {
    File {
        reader: BufReader<File>,
        path: PathBuf,
        buf: Vec<u8>,
        line: usize,
    },
    Memory {
        words: Arc<[String]>,
        index: usize,
    },
}

/// A single pass over a [`WordSource`].
/// Yields trimmed, non-empty words in source order.
pub struct Words {
    inner: WordsInner,
}

impl Iterator for Words {
    type Item = CrackleResult<String>;

    fn next(&mut self) -> Option<Self::Item> {
        match &mut self.inner {
            WordsInner::File {
                reader,
                path,
                buf,
                line,
            } => loop {
                buf.clear();
                match reader.read_until(b'\n', buf) {
                    Ok(0) => return None,
                    Ok(_) => {
                        *line += 1;
                        if let Some(word) = clean_line(buf, path, *line) {
                            return Some(Ok(word));
                        }
                    }
                    Err(source) => {
                        return Some(Err(CrackleError::Wordlist {
                            path: path.clone(),
                            source,
                        }))
                    }
                }
            },
            WordsInner::Memory { words, index } => loop {
                let word = words.get(*index)?.trim();
                *index += 1;
                if !word.is_empty() {
                    return Some(Ok(word.to_owned()));
                }
            },
        }
    }
}

/// Decodes and trims a raw line. Malformed UTF-8 bytes are dropped.
fn clean_line(raw: &[u8], path: &Path, line: usize) -> Option<String> {
    let word = match String::from_utf8_lossy(raw) {
        Cow::Borrowed(word) => word.trim().to_owned(),
        Cow::Owned(word) => {
            warn!(
                "Dropping malformed UTF-8 bytes on line {line} of {}",
                path.display()
            );
            word.replace(char::REPLACEMENT_CHARACTER, "").trim().to_owned()
        }
    };

    (!word.is_empty()).then_some(word)
}
