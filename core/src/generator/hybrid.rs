use std::sync::Arc;

use crate::{
    charset::CharSet,
    error::CrackleResult,
    generator::{brute_force::BruteForceCandidates, Placement},
    wordlist::Words,
};

/// Dictionary words combined with every brute-force segment of a fixed length.
///
/// The segments are computed once up front. For each word, every segment is
/// tried in order before moving on to the next word.
pub struct HybridCandidates {
    words: Words,
    segments: Arc<[String]>,
    placement: Placement,
    word: Option<String>,
    position: usize,
}

impl HybridCandidates {
    pub fn new(words: Words, charset: &CharSet, segment_length: u32, placement: Placement) -> Self {
        let segments = BruteForceCandidates::new(charset, segment_length, segment_length).collect();

        Self {
            words,
            segments,
            placement,
            word: None,
            position: 0,
        }
    }

    /// Number of candidates produced for every word.
    fn per_word(&self) -> usize {
        match self.placement {
            Placement::Suffix | Placement::Prefix => self.segments.len(),
            Placement::Both => self.segments.len() * 2,
        }
    }
}

impl Iterator for HybridCandidates {
    type Item = CrackleResult<String>;

    fn next(&mut self) -> Option<Self::Item> {
        loop {
            if let Some(word) = &self.word {
                if self.position < self.per_word() {
                    let segment = &self.segments[self.position % self.segments.len()];
                    let as_suffix = match self.placement {
                        Placement::Suffix => true,
                        Placement::Prefix => false,
                        // all suffixes of a word come before its prefixes
                        Placement::Both => self.position < self.segments.len(),
                    };
                    self.position += 1;

                    let candidate = if as_suffix {
                        format!("{word}{segment}")
                    } else {
                        format!("{segment}{word}")
                    };
                    return Some(Ok(candidate));
                }
            }

            match self.words.next()? {
                Ok(word) => {
                    self.word = Some(word);
                    self.position = 0;
                }
                Err(e) => return Some(Err(e)),
            }
        }
    }
}

#[cfg(test)]
mod tests {
    use crate::{
        charset::CharSet,
        error::CrackleResult,
        generator::{hybrid::HybridCandidates, Placement},
        wordlist::WordSource,
    };

    fn candidates(placement: Placement) -> Vec<String> {
        let source = WordSource::words(["cat", "dog"]);
        let charset = CharSet::resolve("01").unwrap();

        HybridCandidates::new(source.iter().unwrap(), &charset, 1, placement)
            .collect::<CrackleResult<Vec<_>>>()
            .unwrap()
    }

    #[test]
    fn test_suffix() {
        assert_eq!(vec!["cat0", "cat1", "dog0", "dog1"], candidates(Placement::Suffix));
    }

    #[test]
    fn test_prefix() {
        assert_eq!(vec!["0cat", "1cat", "0dog", "1dog"], candidates(Placement::Prefix));
    }

    #[test]
    fn test_both() {
        assert_eq!(
            vec!["cat0", "cat1", "0cat", "1cat", "dog0", "dog1", "0dog", "1dog"],
            candidates(Placement::Both)
        );
    }

    #[test]
    fn test_two_digit_segments() {
        let source = WordSource::words(["admin"]);
        let charset = CharSet::resolve("digits").unwrap();
        let candidates = HybridCandidates::new(source.iter().unwrap(), &charset, 2, Placement::Suffix)
            .collect::<CrackleResult<Vec<_>>>()
            .unwrap();

        assert_eq!(100, candidates.len());
        assert_eq!("admin00", candidates[0]);
        assert_eq!("admin99", candidates[99]);
    }

    #[test]
    fn test_empty_source() {
        let source = WordSource::words(Vec::<String>::new());
        let charset = CharSet::resolve("01").unwrap();
        let mut candidates =
            HybridCandidates::new(source.iter().unwrap(), &charset, 1, Placement::Both);

        assert!(candidates.next().is_none());
    }
}
