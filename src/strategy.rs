use crate::charset::Alphabet;
use serde::{Deserialize, Serialize};

/// Order in which one worker walks the candidate space.
///
/// Every strategy enumerates the same Cartesian product lexicographically;
/// they differ only in how the alphabet is rearranged beforehand.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub enum Strategy {
    Forward,
    Reversed,
    MiddleOut,
    MiddleOutReversed,
}

impl Strategy {
    /// All strategies, in worker order.
    pub const ALL: [Strategy; 4] = [
        Strategy::Forward,
        Strategy::Reversed,
        Strategy::MiddleOut,
        Strategy::MiddleOutReversed,
    ];

    /// 1-based id used in progress lines.
    pub fn worker_id(&self) -> usize {
        match self {
            Strategy::Forward => 1,
            Strategy::Reversed => 2,
            Strategy::MiddleOut => 3,
            Strategy::MiddleOutReversed => 4,
        }
    }

    /// Rearrange the alphabet for this strategy
    ///
    /// The middle-out variants split at `len / 2`, so on an odd-length
    /// alphabet the leading half is the shorter one.
    ///
    /// # Examples
    ///
    /// ```
    /// use brute_force::{Alphabet, Strategy};
    ///
    /// let alphabet = Alphabet::from_chars("abcde".chars());
    /// let arranged: String = Strategy::MiddleOutReversed.arrange(&alphabet).into_iter().collect();
    /// assert_eq!(arranged, "cdeba");
    /// ```
    pub fn arrange(&self, alphabet: &Alphabet) -> Vec<char> {
        let chars = alphabet.as_slice();
        let half = chars.len() / 2;
        match self {
            Strategy::Forward => chars.to_vec(),
            Strategy::Reversed => chars.iter().rev().copied().collect(),
            Strategy::MiddleOut => chars[half..].iter().chain(&chars[..half]).copied().collect(),
            Strategy::MiddleOutReversed => chars[half..]
                .iter()
                .chain(chars[..half].iter().rev())
                .copied()
                .collect(),
        }
    }
}

/// Lexicographic walk over `chars ^ length`, last position fastest.
pub struct Candidates {
    chars: Vec<char>,
    indices: Vec<usize>,
    buffer: String,
    started: bool,
    exhausted: bool,
}

impl Candidates {
    pub fn new(chars: Vec<char>, length: usize) -> Self {
        let exhausted = chars.is_empty() && length > 0;
        Candidates {
            chars,
            indices: vec![0; length],
            buffer: String::with_capacity(length),
            started: false,
            exhausted,
        }
    }

    /// Step to the next candidate, reusing the internal buffer.
    pub fn advance(&mut self) -> Option<&str> {
        if self.exhausted {
            return None;
        }

        if self.started {
            // Odometer increment from the rightmost position
            let mut pos = self.indices.len();
            loop {
                if pos == 0 {
                    self.exhausted = true;
                    return None;
                }
                pos -= 1;
                self.indices[pos] += 1;
                if self.indices[pos] < self.chars.len() {
                    break;
                }
                self.indices[pos] = 0;
            }
        } else {
            self.started = true;
        }

        self.buffer.clear();
        for &i in &self.indices {
            self.buffer.push(self.chars[i]);
        }
        Some(&self.buffer)
    }
}

impl Iterator for Candidates {
    type Item = String;

    fn next(&mut self) -> Option<String> {
        self.advance().map(str::to_owned)
    }
}
