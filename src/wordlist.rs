use crate::error::CrackError;
use crate::search::with_commas;
use rand::seq::SliceRandom;
use rand::Rng;
use std::fmt;
use std::fs;
use std::path::Path;

/// A target that was already in the word list.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct CommonMatch {
    pub word: String,
    /// 1-based position in the list.
    pub rank: usize,
}

impl fmt::Display for CommonMatch {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "Common Match: {} (#{})", self.word, with_commas(self.rank))
    }
}

/// Load one word per line, skipping blank lines
pub fn load_words(path: &Path) -> Result<Vec<String>, CrackError> {
    let contents = fs::read_to_string(path)?;
    let words: Vec<String> = contents
        .lines()
        .map(str::trim_end)
        .filter(|line| !line.is_empty())
        .map(str::to_string)
        .collect();

    if words.is_empty() {
        return Err(CrackError::EmptyWordList(path.to_path_buf()));
    }
    Ok(words)
}

pub fn pick_random_word<'a, R: Rng + ?Sized>(words: &'a [String], rng: &mut R) -> Option<&'a str> {
    words.choose(rng).map(String::as_str)
}

/// Shuffle the characters of `word`
pub fn scramble<R: Rng + ?Sized>(word: &str, rng: &mut R) -> String {
    let mut chars: Vec<char> = word.chars().collect();
    chars.shuffle(rng);
    chars.into_iter().collect()
}

pub fn find_common_match(word: &str, words: &[String]) -> Option<CommonMatch> {
    words
        .iter()
        .position(|candidate| candidate == word)
        .map(|index| CommonMatch {
            word: word.to_string(),
            rank: index + 1,
        })
}
