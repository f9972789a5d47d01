use std::{fmt::Display, str::FromStr};

use itertools::Itertools;

use crate::error::{CrackleError, CrackleResult};

const LOWERCASE: &str = "abcdefghijklmnopqrstuvwxyz";
const UPPERCASE: &str = "ABCDEFGHIJKLMNOPQRSTUVWXYZ";
const DIGITS: &str = "0123456789";
const SPECIAL: &str = r##"!"#$%&'()*+,-./:;<=>?@[\]^_`{|}~"##;

/// The characters used to build brute-force candidates.
///
/// Members are unique and keep the order in which they were first given,
/// which is the order candidates are enumerated in.
#[derive(Clone, Debug, PartialEq, Eq)]
pub struct CharSet {
    chars: Vec<char>,
}

impl CharSet {
    /// Resolves a preset name (`lowercase`, `uppercase`, `digits`, `special`,
    /// `alphanumeric`, `all`) or accepts `charset` as a literal set of characters.
    pub fn resolve(charset: &str) -> CrackleResult<Self> {
        let chars = match charset.to_ascii_lowercase().as_str() {
            "lowercase" => LOWERCASE.to_owned(),
            "uppercase" => UPPERCASE.to_owned(),
            "digits" => DIGITS.to_owned(),
            "special" => SPECIAL.to_owned(),
            "alphanumeric" => [LOWERCASE, UPPERCASE, DIGITS].concat(),
            "all" => [LOWERCASE, UPPERCASE, DIGITS, SPECIAL].concat(),
            _ => charset.to_owned(),
        };

        Self::from_chars(chars.chars())
    }

    /// Creates a charset from literal characters, dropping duplicates.
    pub fn from_chars(chars: impl IntoIterator<Item = char>) -> CrackleResult<Self> {
        let chars = chars.into_iter().unique().collect_vec();

        if chars.is_empty() {
            return Err(CrackleError::EmptyCharset);
        }

        Ok(Self { chars })
    }

    pub fn len(&self) -> usize {
        self.chars.len()
    }

    pub fn is_empty(&self) -> bool {
        self.chars.is_empty()
    }

    pub fn chars(&self) -> &[char] {
        &self.chars
    }
}

impl FromStr for CharSet {
    type Err = CrackleError;

    fn from_str(s: &str) -> CrackleResult<Self> {
        Self::resolve(s)
    }
}

impl Display for CharSet {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        self.chars.iter().try_for_each(|c| write!(f, "{c}"))
    }
}
