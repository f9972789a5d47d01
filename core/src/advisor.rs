//! Parsing of the output of a strategy advisor.
//!
//! The advisor is an external service suggesting words and attacks. Its output
//! is untrusted: anything that cannot be used falls back to sane defaults
//! instead of failing the search.

use serde::{Deserialize, Serialize};
use tracing::warn;

use crate::generator::AttackKind;

/// Maximum number of words kept from an advised word list.
pub const MAX_ADVISED_WORDS: usize = 50;

/// Words used when the advisor output is unusable.
pub const DEFAULT_ADVISED_WORDS: [&str; 3] = ["password", "admin", "test"];

/// An attack strategy suggested by an advisor.
#[derive(Clone, Debug, PartialEq, Eq, Serialize, Deserialize)]
pub struct StrategyAdvice {
    pub recommended_attack: AttackKind,
    pub reasoning: String,
    #[serde(default)]
    pub suggested_words: Vec<String>,
    pub estimated_difficulty: String,
    #[serde(default)]
    pub tips: Vec<String>,
}

impl Default for StrategyAdvice {
    fn default() -> Self {
        Self {
            recommended_attack: AttackKind::Dictionary,
            reasoning: "Default strategy".to_owned(),
            suggested_words: default_words(),
            estimated_difficulty: "medium".to_owned(),
            tips: vec!["Try common passwords first".to_owned()],
        }
    }
}

fn default_words() -> Vec<String> {
    DEFAULT_ADVISED_WORDS.map(str::to_owned).to_vec()
}

/// Removes a markdown code fence around `text`, if any.
fn strip_code_fence(text: &str) -> &str {
    let text = text.trim();

    let Some(inner) = text.strip_prefix("```") else {
        return text;
    };

    // skip the language tag
    let inner = match inner.split_once('\n') {
        Some((_, body)) => body,
        None => inner,
    };

    inner.trim_end().strip_suffix("```").unwrap_or(inner).trim()
}

/// Parses a JSON array of words.
/// Words are trimmed, blanks are dropped and at most [`MAX_ADVISED_WORDS`] are kept.
/// Falls back to [`DEFAULT_ADVISED_WORDS`] when nothing usable remains.
pub fn parse_wordlist(text: &str) -> Vec<String> {
    let words = match serde_json::from_str::<Vec<String>>(strip_code_fence(text)) {
        Ok(words) => words,
        Err(e) => {
            warn!("Unable to parse the advised word list ({e}), using the default words");
            return default_words();
        }
    };

    let words: Vec<_> = words
        .iter()
        .map(|word| word.trim())
        .filter(|word| !word.is_empty())
        .take(MAX_ADVISED_WORDS)
        .map(str::to_owned)
        .collect();

    if words.is_empty() {
        warn!("The advised word list is empty, using the default words");
        return default_words();
    }

    words
}

/// Parses a JSON strategy object.
/// Falls back to [`StrategyAdvice::default`] when the object is unusable.
pub fn parse_strategy(text: &str) -> StrategyAdvice {
    match serde_json::from_str(strip_code_fence(text)) {
        Ok(advice) => advice,
        Err(e) => {
            warn!("Unable to parse the advised strategy ({e}), using the default strategy");
            StrategyAdvice::default()
        }
    }
}

#[cfg(test)]
mod tests {
    use crate::{
        advisor::{parse_strategy, parse_wordlist, StrategyAdvice, MAX_ADVISED_WORDS},
        generator::AttackKind,
    };

    #[test]
    fn test_parse_wordlist() {
        let words = parse_wordlist(r#"["dragon", " monkey ", "", "letmein"]"#);

        assert_eq!(vec!["dragon", "monkey", "letmein"], words);
    }

    #[test]
    fn test_parse_fenced_wordlist() {
        let words = parse_wordlist("```json\n[\"qwerty\", \"shadow\"]\n```");

        assert_eq!(vec!["qwerty", "shadow"], words);
    }

    #[test]
    fn test_wordlist_is_capped() {
        let json = serde_json::to_string(&(0..200).map(|i| format!("word{i}")).collect::<Vec<_>>())
            .unwrap();
        let words = parse_wordlist(&json);

        assert_eq!(MAX_ADVISED_WORDS, words.len());
        assert_eq!("word0", words[0]);
    }

    #[test]
    fn test_wordlist_fallback() {
        let default = vec!["password", "admin", "test"];

        assert_eq!(default, parse_wordlist("Sure! Here are some passwords: 123456"));
        assert_eq!(default, parse_wordlist("[]"));
        assert_eq!(default, parse_wordlist(r#"["  ", ""]"#));
        assert_eq!(default, parse_wordlist(r#"{"words": ["a"]}"#));
    }

    #[test]
    fn test_parse_strategy() {
        let advice = parse_strategy(
            r#"{
                "recommended_attack": "hybrid",
                "reasoning": "Short corporate passwords",
                "suggested_words": ["acme", "welcome"],
                "estimated_difficulty": "easy",
                "tips": ["Append years"]
            }"#,
        );

        assert_eq!(AttackKind::Hybrid, advice.recommended_attack);
        assert_eq!(vec!["acme", "welcome"], advice.suggested_words);
        assert_eq!("easy", advice.estimated_difficulty);
    }

    #[test]
    fn test_strategy_fallback() {
        assert_eq!(StrategyAdvice::default(), parse_strategy("not json"));
        assert_eq!(
            StrategyAdvice::default(),
            parse_strategy(r#"{"recommended_attack": "rainbow_table"}"#)
        );

        let advice = StrategyAdvice::default();
        assert_eq!(AttackKind::Dictionary, advice.recommended_attack);
        assert_eq!(vec!["password", "admin", "test"], advice.suggested_words);
    }
}
