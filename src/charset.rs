use num_bigint::BigUint;
use num_traits::One;
use serde::{Deserialize, Serialize};
use std::fmt;

pub const LOWERCASE: &str = "abcdefghijklmnopqrstuvwxyz";
pub const DIGITS: &str = "0123456789";
pub const PUNCTUATION: &str = r##"!"#$%&'()*+,-./:;<=>?@[\]^_`{|}~"##;

/// Ordered, deduplicated set of characters a search draws candidates from.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct Alphabet {
    chars: Vec<char>,
}

impl Alphabet {
    /// Derive the smallest alphabet able to rebuild `target`
    ///
    /// Lowercase letters are always present. Digits follow when the target
    /// contains a digit, then punctuation when it contains a punctuation
    /// character. This ordering is the forward baseline every strategy
    /// rearranges.
    ///
    /// # Examples
    ///
    /// ```
    /// use brute_force::Alphabet;
    ///
    /// assert_eq!(Alphabet::for_target("hello").len(), 26);
    /// assert_eq!(Alphabet::for_target("h3llo").len(), 36);
    /// assert_eq!(Alphabet::for_target("h3ll0!").len(), 68);
    /// ```
    pub fn for_target(target: &str) -> Self {
        let mut chars: Vec<char> = LOWERCASE.chars().collect();
        if has_digits(target) {
            chars.extend(DIGITS.chars());
        }
        if has_symbols(target) {
            chars.extend(PUNCTUATION.chars());
        }
        Alphabet { chars }
    }

    /// Build an alphabet from arbitrary characters, keeping the first
    /// occurrence of each.
    pub fn from_chars<I: IntoIterator<Item = char>>(chars: I) -> Self {
        let mut unique = Vec::new();
        for c in chars {
            if !unique.contains(&c) {
                unique.push(c);
            }
        }
        Alphabet { chars: unique }
    }

    pub fn len(&self) -> usize {
        self.chars.len()
    }

    pub fn is_empty(&self) -> bool {
        self.chars.is_empty()
    }

    pub fn as_slice(&self) -> &[char] {
        &self.chars
    }

    pub fn contains(&self, c: char) -> bool {
        self.chars.contains(&c)
    }
}

impl fmt::Display for Alphabet {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        for c in &self.chars {
            write!(f, "{}", c)?;
        }
        Ok(())
    }
}

pub fn has_digits(word: &str) -> bool {
    word.chars().any(|c| c.is_ascii_digit())
}

pub fn has_symbols(word: &str) -> bool {
    word.chars().any(|c| PUNCTUATION.contains(c))
}

/// Number of candidates in `alphabet_len ^ length`
///
/// Computed with arbitrary precision since even modest targets overflow
/// 64 bits (68 characters over 11 positions already does).
pub fn combinations(alphabet_len: usize, length: usize) -> BigUint {
    let base = BigUint::from(alphabet_len);
    let mut total = BigUint::one();
    for _ in 0..length {
        total *= &base;
    }
    total
}
