use num_bigint::BigUint;

use crate::charset::CharSet;

/// Every string of `min_length..=max_length` characters over a charset.
///
/// Strings are enumerated length by length, and inside a length as a cartesian
/// product in charset order where the rightmost position varies fastest.
#[derive(Clone, Debug)]
pub struct BruteForceCandidates {
    chars: Vec<char>,
    max_length: u32,
    /// Position of each character of the next candidate in the charset.
    indices: Vec<usize>,
    done: bool,
}

impl BruteForceCandidates {
    /// Creates the enumeration. Nothing is yielded when `min_length > max_length`.
    pub fn new(charset: &CharSet, min_length: u32, max_length: u32) -> Self {
        Self {
            chars: charset.chars().to_vec(),
            max_length,
            indices: vec![0; min_length as usize],
            done: min_length > max_length || charset.is_empty(),
        }
    }

    /// Moves `indices` to the next candidate, growing the length when every
    /// combination of the current one has been produced.
    fn advance(&mut self) {
        for index in self.indices.iter_mut().rev() {
            *index += 1;
            if *index < self.chars.len() {
                return;
            }
            *index = 0;
        }

        // every position wrapped around
        let length = self.indices.len() as u32 + 1;
        if length > self.max_length {
            self.done = true;
        } else {
            self.indices = vec![0; length as usize];
        }
    }
}

impl Iterator for BruteForceCandidates {
    type Item = String;

    fn next(&mut self) -> Option<Self::Item> {
        if self.done {
            return None;
        }

        let candidate = self.indices.iter().map(|&i| self.chars[i]).collect();
        self.advance();

        Some(candidate)
    }
}

/// The number of candidates a brute-force enumeration produces:
/// the sum of `|charset|^length` for every length of the range.
pub fn estimate_combinations(charset_len: usize, min_length: u32, max_length: u32) -> BigUint {
    let base = BigUint::from(charset_len);
    (min_length..=max_length).map(|length| base.pow(length)).sum()
}
