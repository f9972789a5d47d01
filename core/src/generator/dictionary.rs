use std::vec;

use itertools::Itertools;

use crate::{error::CrackleResult, wordlist::Words};

/// Numbers commonly appended to a password.
const NUMBER_SUFFIXES: [&str; 6] = ["1", "123", "12", "1234", "2024", "2025"];

/// Symbols commonly appended to a password.
const SYMBOL_SUFFIXES: [&str; 4] = ["!", "@", "#", "$"];

/// Uppercases the first character and lowercases the rest.
fn capitalize(word: &str) -> String {
    let mut chars = word.chars();
    match chars.next() {
        Some(first) => first.to_uppercase().chain(chars.flat_map(char::to_lowercase)).collect(),
        None => String::new(),
    }
}

/// Returns the common mutations of a word, without duplicates.
/// The first occurrence of a mutation decides its position.
pub fn mutations(word: &str) -> Vec<String> {
    let capitalized = capitalize(word);
    let mut raw = vec![
        word.to_owned(),
        capitalized.clone(),
        word.to_uppercase(),
        word.to_lowercase(),
    ];

    for suffix in NUMBER_SUFFIXES.into_iter().chain(SYMBOL_SUFFIXES) {
        raw.push(format!("{word}{suffix}"));
        raw.push(format!("{capitalized}{suffix}"));
    }

    for (number, symbol) in ["1", "123"].into_iter().cartesian_product(["!", "@"]) {
        raw.push(format!("{capitalized}{number}{symbol}"));
    }

    raw.into_iter().unique().collect()
}

/// Candidates read from a word source, optionally expanded with [`mutations`].
pub struct DictionaryCandidates {
    words: Words,
    apply_mutations: bool,
    pending: vec::IntoIter<String>,
}

impl DictionaryCandidates {
    pub fn new(words: Words, apply_mutations: bool) -> Self {
        Self {
            words,
            apply_mutations,
            pending: Vec::new().into_iter(),
        }
    }
}

impl Iterator for DictionaryCandidates {
    type Item = CrackleResult<String>;

    fn next(&mut self) -> Option<Self::Item> {
        loop {
            if let Some(mutation) = self.pending.next() {
                return Some(Ok(mutation));
            }

            let word = match self.words.next()? {
                Ok(word) => word,
                Err(e) => return Some(Err(e)),
            };

            if !self.apply_mutations {
                return Some(Ok(word));
            }

            self.pending = mutations(&word).into_iter();
        }
    }
}
