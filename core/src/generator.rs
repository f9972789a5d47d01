mod brute_force;
mod dictionary;
mod hybrid;

use std::{fmt::Display, str::FromStr};

use num_bigint::BigUint;
use serde::{Deserialize, Serialize};

use crate::{
    charset::CharSet,
    error::{CrackleError, CrackleResult},
    wordlist::WordSource,
    MAX_BRUTE_FORCE_LENGTH, MAX_HYBRID_SEGMENTS,
};

pub use {
    brute_force::{estimate_combinations, BruteForceCandidates},
    dictionary::{mutations, DictionaryCandidates},
    hybrid::HybridCandidates,
};

/// Where the brute-force segment of a hybrid candidate goes.
#[derive(Clone, Copy, Debug, Default, PartialEq, Eq)]
pub enum Placement {
    /// `word + segment`.
    #[default]
    Suffix,
    /// `segment + word`.
    Prefix,
    /// Both, suffixes first.
    Both,
}

impl FromStr for Placement {
    type Err = CrackleError;

    fn from_str(s: &str) -> CrackleResult<Self> {
        match s.trim().to_ascii_lowercase().as_str() {
            "suffix" => Ok(Self::Suffix),
            "prefix" => Ok(Self::Prefix),
            "both" => Ok(Self::Both),
            _ => Err(CrackleError::UnknownPlacement(s.to_owned())),
        }
    }
}

impl Display for Placement {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        let name = match self {
            Self::Suffix => "suffix",
            Self::Prefix => "prefix",
            Self::Both => "both",
        };
        f.write_str(name)
    }
}

/// The name of an attack strategy.
#[derive(Clone, Copy, Debug, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum AttackKind {
    Dictionary,
    BruteForce,
    Hybrid,
}

impl FromStr for AttackKind {
    type Err = CrackleError;

    fn from_str(s: &str) -> CrackleResult<Self> {
        match s.trim().to_ascii_lowercase().as_str() {
            "dictionary" => Ok(Self::Dictionary),
            "brute_force" | "brute-force" | "bruteforce" => Ok(Self::BruteForce),
            "hybrid" => Ok(Self::Hybrid),
            _ => Err(CrackleError::UnknownAttack(s.to_owned())),
        }
    }
}

impl Display for AttackKind {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        let name = match self {
            Self::Dictionary => "dictionary",
            Self::BruteForce => "brute_force",
            Self::Hybrid => "hybrid",
        };
        f.write_str(name)
    }
}

/// How candidates are generated.
#[derive(Clone, Debug)]
pub enum AttackSpec {
    /// Words from a source, optionally expanded with common mutations.
    Dictionary {
        source: WordSource,
        apply_mutations: bool,
    },
    /// Every string of `min_length..=max_length` characters over a charset.
    BruteForce {
        min_length: u32,
        max_length: u32,
        charset: CharSet,
    },
    /// Words from a source combined with short brute-force segments.
    Hybrid {
        source: WordSource,
        segment_length: u32,
        charset: CharSet,
        placement: Placement,
    },
}

impl AttackSpec {
    pub fn kind(&self) -> AttackKind {
        match self {
            Self::Dictionary { .. } => AttackKind::Dictionary,
            Self::BruteForce { .. } => AttackKind::BruteForce,
            Self::Hybrid { .. } => AttackKind::Hybrid,
        }
    }

    /// Checks the spec before any work is done.
    pub fn validate(&self) -> CrackleResult<()> {
        match self {
            Self::Dictionary { .. } => Ok(()),
            Self::BruteForce {
                min_length,
                max_length,
                ..
            } => {
                if min_length > max_length {
                    return Err(CrackleError::LengthRange {
                        min: *min_length,
                        max: *max_length,
                    });
                }
                if *max_length > MAX_BRUTE_FORCE_LENGTH {
                    return Err(CrackleError::LengthTooLong(*max_length, MAX_BRUTE_FORCE_LENGTH));
                }
                Ok(())
            }
            Self::Hybrid {
                segment_length,
                charset,
                ..
            } => {
                // the segment table lives in memory for the whole search
                match charset.len().checked_pow(*segment_length) {
                    Some(segments) if segments <= MAX_HYBRID_SEGMENTS => Ok(()),
                    _ => Err(CrackleError::SegmentSpace(
                        format!("{}^{segment_length}", charset.len()),
                        MAX_HYBRID_SEGMENTS,
                    )),
                }
            }
        }
    }

    /// The exact number of candidates, when it is known without reading a word source.
    /// Lengths beyond [`MAX_BRUTE_FORCE_LENGTH`] have no estimate.
    pub fn estimate(&self) -> Option<BigUint> {
        match self {
            Self::BruteForce {
                min_length,
                max_length,
                charset,
            } if *max_length <= MAX_BRUTE_FORCE_LENGTH => {
                Some(estimate_combinations(charset.len(), *min_length, *max_length))
            }
            Self::BruteForce { .. } => None,
            Self::Dictionary { .. } | Self::Hybrid { .. } => None,
        }
    }

    /// Starts generating candidates.
    /// The spec is validated and word sources are opened here.
    pub fn candidates(&self) -> CrackleResult<Candidates> {
        self.validate()?;

        let candidates = match self {
            Self::Dictionary {
                source,
                apply_mutations,
            } => Candidates::Dictionary(DictionaryCandidates::new(source.iter()?, *apply_mutations)),
            Self::BruteForce {
                min_length,
                max_length,
                charset,
            } => Candidates::BruteForce(BruteForceCandidates::new(charset, *min_length, *max_length)),
            Self::Hybrid {
                source,
                segment_length,
                charset,
                placement,
            } => Candidates::Hybrid(HybridCandidates::new(
                source.iter()?,
                charset,
                *segment_length,
                *placement,
            )),
        };

        Ok(candidates)
    }
}

/// A lazy, forward-only sequence of candidates.
pub enum Candidates {
    Dictionary(DictionaryCandidates),
    BruteForce(BruteForceCandidates),
    Hybrid(HybridCandidates),
}

impl Iterator for Candidates {
    type Item = CrackleResult<String>;

    #[inline]
    fn next(&mut self) -> Option<Self::Item> {
        match self {
            Self::Dictionary(candidates) => candidates.next(),
            Self::BruteForce(candidates) => candidates.next().map(Ok),
            Self::Hybrid(candidates) => candidates.next(),
        }
    }
}

#[cfg(test)]
mod tests {
    use num_bigint::BigUint;

    use crate::{
        charset::CharSet,
        error::{CrackleError, CrackleResult},
        generator::{AttackKind, AttackSpec, Placement},
        wordlist::WordSource,
        MAX_BRUTE_FORCE_LENGTH,
    };

    #[test]
    fn test_brute_force_spec() {
        let spec = AttackSpec::BruteForce {
            min_length: 1,
            max_length: 2,
            charset: CharSet::resolve("ab").unwrap(),
        };

        let candidates = spec
            .candidates()
            .unwrap()
            .collect::<CrackleResult<Vec<_>>>()
            .unwrap();

        assert_eq!(vec!["a", "b", "aa", "ab", "ba", "bb"], candidates);
        assert_eq!(Some(BigUint::from(6u32)), spec.estimate());
    }

    #[test]
    fn test_inverted_length_range() {
        let spec = AttackSpec::BruteForce {
            min_length: 4,
            max_length: 2,
            charset: CharSet::resolve("lowercase").unwrap(),
        };

        assert!(matches!(
            spec.candidates(),
            Err(CrackleError::LengthRange { min: 4, max: 2 })
        ));
    }

    #[test]
    fn test_hybrid_segment_guard() {
        let spec = AttackSpec::Hybrid {
            source: WordSource::words(["admin"]),
            segment_length: 8,
            charset: CharSet::resolve("all").unwrap(),
            placement: Placement::Suffix,
        };

        assert!(matches!(spec.validate(), Err(CrackleError::SegmentSpace(..))));
    }

    #[test]
    fn test_huge_segment_length_fails_at_once() {
        let spec = AttackSpec::Hybrid {
            source: WordSource::words(["admin"]),
            segment_length: u32::MAX,
            charset: CharSet::resolve("all").unwrap(),
            placement: Placement::Both,
        };

        assert!(matches!(spec.validate(), Err(CrackleError::SegmentSpace(..))));
        assert!(matches!(spec.candidates(), Err(CrackleError::SegmentSpace(..))));
    }

    #[test]
    fn test_single_char_segments_are_allowed() {
        let spec = AttackSpec::Hybrid {
            source: WordSource::words(["admin"]),
            segment_length: 1000,
            charset: CharSet::resolve("x").unwrap(),
            placement: Placement::Suffix,
        };

        assert!(spec.validate().is_ok());
    }

    #[test]
    fn test_huge_brute_force_length() {
        let spec = AttackSpec::BruteForce {
            min_length: 1,
            max_length: u32::MAX,
            charset: CharSet::resolve("all").unwrap(),
        };

        assert!(matches!(
            spec.validate(),
            Err(CrackleError::LengthTooLong(u32::MAX, MAX_BRUTE_FORCE_LENGTH))
        ));
        assert_eq!(None, spec.estimate());

        let spec = AttackSpec::BruteForce {
            min_length: 1,
            max_length: MAX_BRUTE_FORCE_LENGTH,
            charset: CharSet::resolve("all").unwrap(),
        };
        assert!(spec.validate().is_ok());
        assert!(spec.estimate().is_some());
    }

    #[test]
    fn test_missing_wordlist_is_reported() {
        let spec = AttackSpec::Dictionary {
            source: WordSource::file("/no/such/wordlist.txt"),
            apply_mutations: true,
        };

        assert!(matches!(spec.candidates(), Err(CrackleError::Wordlist { .. })));
        assert_eq!(None, spec.estimate());
    }

    #[test]
    fn test_parse_names() {
        assert_eq!(Placement::Both, "BOTH".parse().unwrap());
        assert!("middle".parse::<Placement>().is_err());
        assert_eq!(AttackKind::BruteForce, "brute_force".parse().unwrap());
        assert_eq!(AttackKind::Hybrid, "hybrid".parse().unwrap());
        assert!(matches!(
            "rainbow".parse::<AttackKind>(),
            Err(CrackleError::UnknownAttack(_))
        ));
    }
}
